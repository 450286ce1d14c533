//! In-process game store.

use rustc_hash::FxHashMap;

use super::{GameId, GameStore, StoreError};
use crate::core::GameState;

struct Entry {
    version: u64,
    state: GameState,
}

/// Hash-map backed [`GameStore`] for a single process.
///
/// IDs are sequential; versions start at 1 and bump on every swap.
#[derive(Default)]
pub struct MemoryStore {
    games: FxHashMap<GameId, Entry>,
    next_id: u64,
}

impl MemoryStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored games.
    #[must_use]
    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// Whether the store holds no games.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

impl GameStore for MemoryStore {
    fn create(&mut self, state: GameState) -> GameId {
        let id = GameId::new(self.next_id);
        self.next_id += 1;
        self.games.insert(id, Entry { version: 1, state });
        id
    }

    fn get(&self, id: GameId) -> Option<(u64, GameState)> {
        self.games
            .get(&id)
            .map(|entry| (entry.version, entry.state.clone()))
    }

    fn compare_and_swap(
        &mut self,
        id: GameId,
        expected: u64,
        state: GameState,
    ) -> Result<u64, StoreError> {
        let entry = self.games.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        if entry.version != expected {
            return Err(StoreError::Conflict {
                expected,
                found: entry.version,
            });
        }

        entry.version += 1;
        entry.state = state;
        Ok(entry.version)
    }

    fn remove(&mut self, id: GameId) -> Option<GameState> {
        self.games.remove(&id).map(|entry| entry.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, GameState, PlayerSpec};

    fn state(seed: u64) -> GameState {
        let config = GameConfig::new(
            700,
            5000,
            2,
            vec![PlayerSpec::human("ada"), PlayerSpec::human("grace")],
        )
        .unwrap();
        GameState::new(config, seed).unwrap()
    }

    #[test]
    fn test_create_allocates_distinct_ids() {
        let mut store = MemoryStore::new();

        let a = store.create(state(1));
        let b = store.create(state(2));

        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_get_returns_version_and_snapshot() {
        let mut store = MemoryStore::new();
        let id = store.create(state(1));

        let (version, snapshot) = store.get(id).unwrap();
        assert_eq!(version, 1);
        snapshot.check_invariants().unwrap();

        assert!(store.get(GameId::new(99)).is_none());
    }

    #[test]
    fn test_compare_and_swap_bumps_version() {
        let mut store = MemoryStore::new();
        let id = store.create(state(1));

        let (version, snapshot) = store.get(id).unwrap();
        let new_version = store.compare_and_swap(id, version, snapshot).unwrap();
        assert_eq!(new_version, 2);
    }

    #[test]
    fn test_compare_and_swap_detects_conflict() {
        let mut store = MemoryStore::new();
        let id = store.create(state(1));

        let (version, snapshot) = store.get(id).unwrap();
        store
            .compare_and_swap(id, version, snapshot.clone())
            .unwrap();

        let err = store.compare_and_swap(id, version, snapshot).unwrap_err();
        assert_eq!(
            err,
            StoreError::Conflict {
                expected: 1,
                found: 2
            }
        );
    }

    #[test]
    fn test_compare_and_swap_unknown_id() {
        let mut store = MemoryStore::new();
        let err = store
            .compare_and_swap(GameId::new(7), 1, state(1))
            .unwrap_err();
        assert_eq!(err, StoreError::NotFound(GameId::new(7)));
    }

    #[test]
    fn test_remove() {
        let mut store = MemoryStore::new();
        let id = store.create(state(1));

        assert!(store.remove(id).is_some());
        assert!(store.remove(id).is_none());
        assert!(store.is_empty());
    }
}
