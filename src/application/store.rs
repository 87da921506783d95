//! The in-memory workout collection and its durable snapshot.

use crate::domain::{Workout, WorkoutId};
use crate::infrastructure::{KeyValueStorage, StorageError};

/// Storage key holding the JSON array of workouts.
pub const STORAGE_KEY: &str = "workouts";

/// Workouts in creation order.
#[derive(Debug, Clone, Default)]
pub struct WorkoutStore {
    workouts: Vec<Workout>,
}

impl WorkoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a workout at the end. Does not persist.
    pub fn append(&mut self, workout: Workout) {
        self.workouts.push(workout);
    }

    /// Writes the whole collection, replacing the previous snapshot.
    pub fn persist(&self, storage: &mut dyn KeyValueStorage) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.workouts)?;
        storage.set_item(STORAGE_KEY, &json)?;
        tracing::debug!(count = self.workouts.len(), "persisted workouts");
        Ok(())
    }

    /// Replaces the collection with the stored snapshot.
    ///
    /// A missing, `null` or malformed snapshot leaves the collection as it
    /// is; the failure is logged and otherwise ignored. Returns the number of
    /// workouts loaded.
    pub fn reload(&mut self, storage: &dyn KeyValueStorage) -> usize {
        let raw = match storage.get_item(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return 0,
            Err(e) => {
                tracing::warn!(error = %e, "could not read saved workouts");
                return 0;
            }
        };

        match serde_json::from_str::<Option<Vec<Workout>>>(&raw) {
            Ok(Some(workouts)) => {
                self.workouts = workouts;
                tracing::info!(count = self.workouts.len(), "reloaded saved workouts");
                self.workouts.len()
            }
            Ok(None) => 0,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable workout snapshot");
                0
            }
        }
    }

    pub fn find(&self, id: &WorkoutId) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id() == id)
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coords;
    use crate::infrastructure::{FileStorage, MemoryStorage};
    use tempfile::TempDir;

    fn sample_store() -> WorkoutStore {
        let mut store = WorkoutStore::new();
        store.append(Workout::running(Coords::new(10.0, 20.0), "5", "30", "160").unwrap());
        store.append(Workout::cycling(Coords::new(-33.9, 151.2), "27", "95", "523").unwrap());
        store.append(Workout::running(Coords::new(0.5, -0.5), "3", "17", "171").unwrap());
        store
    }

    #[test]
    fn test_append_keeps_order() {
        let store = sample_store();
        assert_eq!(store.len(), 3);
        assert_eq!(store.workouts()[0].distance(), 5);
        assert_eq!(store.workouts()[1].distance(), 27);
        assert_eq!(store.workouts()[2].distance(), 3);
    }

    #[test]
    fn test_persist_reload_round_trip() {
        let store = sample_store();
        let mut storage = MemoryStorage::new();
        store.persist(&mut storage).unwrap();

        let mut reloaded = WorkoutStore::new();
        assert_eq!(reloaded.reload(&storage), 3);
        assert_eq!(reloaded.workouts(), store.workouts());
    }

    #[test]
    fn test_derived_metrics_reload_exactly() {
        let mut store = WorkoutStore::new();
        for distance in 1..=60u32 {
            for duration in 1..=60u32 {
                let (d, t) = (distance.to_string(), duration.to_string());
                store.append(Workout::running(Coords::new(1.0, 2.0), &d, &t, "150").unwrap());
                store.append(Workout::cycling(Coords::new(3.0, 4.0), &d, &t, "80").unwrap());
            }
        }
        let mut storage = MemoryStorage::new();
        store.persist(&mut storage).unwrap();

        let mut reloaded = WorkoutStore::new();
        assert_eq!(reloaded.reload(&storage), store.len());
        assert_eq!(reloaded.workouts(), store.workouts());

        let speed = Workout::cycling(Coords::new(0.0, 0.0), "1", "29", "1").unwrap().speed();
        let matching = reloaded
            .workouts()
            .iter()
            .find(|w| w.distance() == 1 && w.duration() == 29 && w.speed().is_some())
            .unwrap();
        assert_eq!(matching.speed(), speed);
    }

    #[test]
    fn test_round_trip_through_files() {
        let dir = TempDir::new().unwrap();
        let store = sample_store();
        store.persist(&mut FileStorage::new(dir.path())).unwrap();

        let mut reloaded = WorkoutStore::new();
        reloaded.reload(&FileStorage::new(dir.path()));
        assert_eq!(reloaded.workouts(), store.workouts());
    }

    #[test]
    fn test_persist_overwrites_snapshot() {
        let mut storage = MemoryStorage::new();
        sample_store().persist(&mut storage).unwrap();

        let mut smaller = WorkoutStore::new();
        smaller.append(Workout::running(Coords::new(1.0, 1.0), "1", "1", "1").unwrap());
        smaller.persist(&mut storage).unwrap();

        let mut reloaded = WorkoutStore::new();
        assert_eq!(reloaded.reload(&storage), 1);
    }

    #[test]
    fn test_reload_replaces_wholesale() {
        let mut storage = MemoryStorage::new();
        let saved = sample_store();
        saved.persist(&mut storage).unwrap();

        let mut store = WorkoutStore::new();
        store.append(Workout::cycling(Coords::new(5.0, 5.0), "9", "9", "9").unwrap());
        store.reload(&storage);

        assert_eq!(store.workouts(), saved.workouts());
    }

    #[test]
    fn test_reload_missing_snapshot() {
        let mut store = WorkoutStore::new();
        assert_eq!(store.reload(&MemoryStorage::new()), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_reload_ignores_garbage() {
        for raw in ["not json", "null", "{\"workouts\": 1}", "[{\"id\": \"x\"}]", ""] {
            let mut storage = MemoryStorage::new();
            storage.set_item(STORAGE_KEY, raw).unwrap();

            let mut store = WorkoutStore::new();
            assert_eq!(store.reload(&storage), 0, "{raw:?}");
            assert!(store.is_empty());
        }
    }

    #[test]
    fn test_find() {
        let store = sample_store();
        let id = store.workouts()[1].id().clone();

        assert_eq!(store.find(&id).map(|w| w.distance()), Some(27));
        assert!(store.find(&WorkoutId::from("missing")).is_none());
    }
}
