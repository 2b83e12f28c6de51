use crate::errors::StorageError;
use crate::models::Habit;
use crate::storage::KeyValueStore;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

pub const STORAGE_KEY: &str = "habits";

/// Reads the persisted collection. Missing or corrupt data is treated as empty.
pub fn load_habits<S: KeyValueStore>(storage: &S) -> Vec<Habit> {
    let raw = match storage.get(STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            error!("failed to read habits: {err}");
            return Vec::new();
        }
    };

    let habits: Vec<Habit> = match serde_json::from_str(&raw) {
        Ok(habits) => habits,
        Err(err) => {
            warn!("ignoring malformed habits data: {err}");
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    let total = habits.len();
    let unique: Vec<Habit> = habits
        .into_iter()
        .filter(|habit| seen.insert(habit.id.clone()))
        .collect();
    if unique.len() != total {
        warn!("dropped {} habits with duplicate ids", total - unique.len());
    }
    unique
}

pub fn save_habits<S: KeyValueStore>(storage: &mut S, habits: &[Habit]) -> Result<(), StorageError> {
    let payload = serde_json::to_string(habits)?;
    storage.set(STORAGE_KEY, &payload)
}

/// Ordered habit collection mirrored to `storage` after every change.
pub struct HabitStore<S> {
    storage: S,
    habits: Vec<Habit>,
}

impl<S: KeyValueStore> HabitStore<S> {
    pub fn load(storage: S) -> Self {
        let habits = load_habits(&storage);
        info!("loaded {} habits", habits.len());
        Self { storage, habits }
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    #[cfg(test)]
    pub(crate) fn storage(&self) -> &S {
        &self.storage
    }

    pub fn add_habit(&mut self, name: &str) -> Option<&Habit> {
        self.add_habit_at(name, Utc::now())
    }

    pub fn add_habit_at(&mut self, name: &str, created_at: DateTime<Utc>) -> Option<&Habit> {
        if name.trim().is_empty() {
            debug!("ignoring habit with empty name");
            return None;
        }

        let habit = Habit {
            id: self.fresh_id(),
            name: name.to_string(),
            dates: BTreeMap::new(),
            created_at,
        };
        info!(id = %habit.id, name = %habit.name, "habit added");
        self.habits.push(habit);
        self.save();
        self.habits.last()
    }

    /// Flips the completion flag for `day_key`, returning the new value.
    pub fn toggle_date(&mut self, habit_id: &str, day_key: &str) -> Option<bool> {
        let habit = self.habits.iter_mut().find(|habit| habit.id == habit_id)?;
        let entry = habit.dates.entry(day_key.to_string()).or_insert(false);
        *entry = !*entry;
        let completed = *entry;
        debug!(id = %habit_id, day = %day_key, completed, "habit toggled");
        self.save();
        Some(completed)
    }

    pub fn delete_habit(&mut self, habit_id: &str) -> bool {
        let before = self.habits.len();
        self.habits.retain(|habit| habit.id != habit_id);
        if self.habits.len() == before {
            return false;
        }
        info!(id = %habit_id, "habit deleted");
        self.save();
        true
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if !self.habits.iter().any(|habit| habit.id == id) {
                return id;
            }
        }
    }

    fn save(&mut self) {
        if let Err(err) = save_habits(&mut self.storage, &self.habits) {
            error!("failed to persist habits: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{compute_streak, date_key};
    use crate::storage::MemoryStore;
    use chrono::NaiveDate;

    fn empty_store() -> HabitStore<MemoryStore> {
        HabitStore::load(MemoryStore::new())
    }

    fn persisted(store: &HabitStore<MemoryStore>) -> Vec<Habit> {
        load_habits(store.storage())
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Io(std::io::Error::other("disk gone")))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("disk gone")))
        }
    }

    #[test]
    fn blank_names_are_rejected() {
        let mut store = empty_store();
        assert!(store.add_habit("").is_none());
        assert!(store.add_habit("   ").is_none());
        assert!(store.habits().is_empty());
        assert!(store.storage().peek(STORAGE_KEY).is_none());
    }

    #[test]
    fn add_appends_one_habit_with_empty_dates() {
        let mut store = empty_store();
        store.add_habit("Exercise").unwrap();
        let added = store.add_habit("  Read ").unwrap().clone();

        assert_eq!(store.habits().len(), 2);
        assert_eq!(store.habits()[0].name, "Exercise");
        assert_eq!(added.name, "  Read ");
        assert!(added.dates.is_empty());
        assert_ne!(store.habits()[0].id, added.id);
        assert_eq!(persisted(&store), store.habits());
    }

    #[test]
    fn toggle_twice_restores_value_and_keeps_key() {
        let mut store = empty_store();
        let id = store.add_habit("Exercise").unwrap().id.clone();

        assert_eq!(store.toggle_date(&id, "2026-03-02"), Some(true));
        assert_eq!(persisted(&store)[0].dates.get("2026-03-02"), Some(&true));
        assert_eq!(store.toggle_date(&id, "2026-03-02"), Some(false));

        let habit = &store.habits()[0];
        assert!(!habit.is_completed("2026-03-02"));
        assert_eq!(habit.dates.len(), 1);
        assert_eq!(persisted(&store), store.habits());
    }

    #[test]
    fn toggle_only_touches_the_given_day() {
        let mut store = empty_store();
        let id = store.add_habit("Exercise").unwrap().id.clone();
        store.toggle_date(&id, "2026-03-01");

        let keys: Vec<&String> = store.habits()[0].dates.keys().collect();
        assert_eq!(keys, vec!["2026-03-01"]);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut store = empty_store();
        store.add_habit("Exercise").unwrap();
        let snapshot = store.habits().to_vec();

        assert_eq!(store.toggle_date("missing", "2026-03-02"), None);
        assert!(!store.delete_habit("missing"));
        assert_eq!(store.habits(), snapshot.as_slice());
    }

    #[test]
    fn delete_removes_and_persists() {
        let mut store = empty_store();
        let first = store.add_habit("Exercise").unwrap().id.clone();
        let second = store.add_habit("Read").unwrap().id.clone();

        assert!(store.delete_habit(&first));
        assert_eq!(store.habits().len(), 1);
        assert_eq!(store.habits()[0].id, second);
        assert_eq!(persisted(&store), store.habits());
    }

    #[test]
    fn reload_restores_the_same_collection() {
        let mut store = empty_store();
        let id = store.add_habit("Exercise").unwrap().id.clone();
        store.add_habit("Read").unwrap();
        store.toggle_date(&id, "2026-03-01");
        store.toggle_date(&id, "2026-03-02");
        store.toggle_date(&id, "2026-03-01");

        let reloaded = HabitStore::load(store.storage().clone());
        assert_eq!(reloaded.habits(), store.habits());
    }

    #[test]
    fn malformed_or_missing_storage_loads_empty() {
        assert!(load_habits(&MemoryStore::new()).is_empty());
        assert!(load_habits(&MemoryStore::with_entry(STORAGE_KEY, "{not json")).is_empty());
        assert!(load_habits(&MemoryStore::with_entry(STORAGE_KEY, r#"{"id":"x"}"#)).is_empty());
        assert!(load_habits(&FailingStore).is_empty());
    }

    #[test]
    fn loads_the_persisted_wire_shape() {
        let raw = r#"[{"id":"a","name":"Read","dates":{"2026-03-02":true,"2026-03-01":false},"createdAt":"2026-02-01T08:30:00.000Z"}]"#;
        let habits = load_habits(&MemoryStore::with_entry(STORAGE_KEY, raw));

        assert_eq!(habits.len(), 1);
        assert_eq!(habits[0].name, "Read");
        assert!(habits[0].is_completed("2026-03-02"));
        assert!(!habits[0].is_completed("2026-03-01"));
    }

    #[test]
    fn duplicate_ids_keep_first_occurrence() {
        let raw = r#"[
            {"id":"a","name":"First","dates":{},"createdAt":"2026-02-01T08:30:00Z"},
            {"id":"a","name":"Second","dates":{},"createdAt":"2026-02-01T08:30:00Z"}
        ]"#;
        let habits = load_habits(&MemoryStore::with_entry(STORAGE_KEY, raw));
        assert_eq!(habits.len(), 1);
        assert_eq!(habits[0].name, "First");
    }

    #[test]
    fn serialized_form_uses_camel_case_created_at() {
        let mut store = empty_store();
        store.add_habit("Read").unwrap();
        let raw = store.storage().peek(STORAGE_KEY).unwrap();

        let value: serde_json::Value = serde_json::from_str(raw).unwrap();
        let entry = &value[0];
        assert!(entry["id"].is_string());
        assert_eq!(entry["name"], "Read");
        assert!(entry["dates"].as_object().unwrap().is_empty());
        assert!(entry["createdAt"].is_string());
    }

    #[test]
    fn failed_writes_keep_in_memory_state() {
        let mut store = HabitStore::load(FailingStore);
        let id = store.add_habit("Exercise").unwrap().id.clone();
        assert_eq!(store.toggle_date(&id, "2026-03-02"), Some(true));
        assert_eq!(store.habits().len(), 1);
    }

    #[test]
    fn exercise_scenario() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let key = date_key(today);
        let mut store = empty_store();

        let id = store.add_habit("Exercise").unwrap().id.clone();
        store.toggle_date(&id, &key);
        assert_eq!(compute_streak(&store.habits()[0].dates, today), 1);

        store.toggle_date(&id, &key);
        assert_eq!(compute_streak(&store.habits()[0].dates, today), 0);

        assert!(store.delete_habit(&id));
        assert!(store.habits().is_empty());
        assert!(persisted(&store).is_empty());
    }
}
