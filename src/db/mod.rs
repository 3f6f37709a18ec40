//! Persistence module for Noah Ward
//!
//! State is kept as named JSON blobs in a synchronous key-value store. The
//! store holds serialized copies; the live collections belong to the
//! hospital store.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod file;

pub use file::JsonFileStore;

/// Errors raised while reading or writing a slot.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access slot `{slot}`: {source}")]
    Io {
        slot: String,
        #[source]
        source: std::io::Error,
    },
    #[error("slot `{slot}` does not hold valid data: {source}")]
    Json {
        slot: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Synchronous get/set of JSON text under string keys.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
}

/// Named slots making up the persisted state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Doctors,
    Patients,
    Appointments,
    Emergencies,
    Beds,
    Sequence,
}

impl Slot {
    pub const ALL: [Slot; 6] = [
        Slot::Doctors,
        Slot::Patients,
        Slot::Appointments,
        Slot::Emergencies,
        Slot::Beds,
        Slot::Sequence,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Slot::Doctors => "doctors",
            Slot::Patients => "patients",
            Slot::Appointments => "appointments",
            Slot::Emergencies => "emergencies",
            Slot::Beds => "beds",
            Slot::Sequence => "sequence",
        }
    }
}

/// Reads and decodes a slot. A missing slot and a stored `null` both yield `None`.
pub fn load_slot<S, T>(store: &S, slot: Slot) -> Result<Option<T>, StoreError>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    let Some(raw) = store.get(slot.key())? else {
        return Ok(None);
    };
    serde_json::from_str::<Option<T>>(&raw).map_err(|source| StoreError::Json {
        slot: slot.key().to_string(),
        source,
    })
}

pub fn save_slot<S, T>(store: &mut S, slot: Slot, value: &T) -> Result<(), StoreError>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|source| StoreError::Json {
        slot: slot.key().to_string(),
        source,
    })?;
    store.set(slot.key(), raw)
}

/// Store kept entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Bed, BedStatus};

    #[test]
    fn missing_and_null_slots_are_absent() {
        let mut store = MemoryStore::new();
        let missing: Option<Vec<Bed>> = load_slot(&store, Slot::Beds).unwrap();
        assert!(missing.is_none());

        store.set("beds", "null".into()).unwrap();
        let null: Option<Vec<Bed>> = load_slot(&store, Slot::Beds).unwrap();
        assert!(null.is_none());
    }

    #[test]
    fn save_then_load_preserves_order_and_fields() {
        let mut store = MemoryStore::new();
        let mut beds = Bed::ward();
        beds[4].status = BedStatus::Occupied;
        beds.reverse();
        save_slot(&mut store, Slot::Beds, &beds).unwrap();

        let loaded: Vec<Bed> = load_slot(&store, Slot::Beds).unwrap().unwrap();
        assert_eq!(loaded, beds);
    }

    #[test]
    fn malformed_slot_names_the_slot() {
        let mut store = MemoryStore::new();
        store.set("doctors", "{not json".into()).unwrap();
        let err = load_slot::<_, Vec<Bed>>(&store, Slot::Doctors).unwrap_err();
        assert!(err.to_string().contains("`doctors`"));
    }
}
