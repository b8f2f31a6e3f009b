//! services/api/src/adapters/store.rs
//!
//! This module contains the in-memory medication store.
//! It implements the `MedicationStore` port from the `core` crate.
//!
//! The table lives for the process lifetime only; a restart loses every
//! record. Concurrent writers to the same id resolve last-write-wins.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use seniorsync_core::{
    domain::{MedicationDraft, MedicationRecord},
    ports::{MedicationStore, PortError, PortResult},
};
use uuid::Uuid;

//=========================================================================================
// The Main Store Struct
//=========================================================================================

/// The process-lifetime keyed medication table, owned by `AppState` and
/// handed to handlers by reference.
#[derive(Default)]
pub struct InMemoryMedicationStore {
    records: RwLock<HashMap<Uuid, MedicationRecord>>,
}

impl InMemoryMedicationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

//=========================================================================================
// `MedicationStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl MedicationStore for InMemoryMedicationStore {
    /// Stores a new record under a fresh v4 id, stamping the creation time.
    async fn put(&self, draft: MedicationDraft) -> PortResult<MedicationRecord> {
        let record = MedicationRecord {
            id: Uuid::new_v4(),
            user_id: draft.user_id,
            name: draft.name,
            dosage: draft.dosage,
            times: draft.times,
            instructions: draft.instructions,
            created_at: Utc::now(),
        };

        let mut records = self
            .records
            .write()
            .map_err(|_| PortError::Unexpected("medication table lock poisoned".to_string()))?;
        records.insert(record.id, record.clone());
        Ok(record)
    }

    /// All records whose user_id matches exactly, oldest first.
    async fn list(&self, user_id: &str) -> PortResult<Vec<MedicationRecord>> {
        let records = self
            .records
            .read()
            .map_err(|_| PortError::Unexpected("medication table lock poisoned".to_string()))?;
        let mut matching: Vec<MedicationRecord> = records
            .values()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect();
        matching.sort_by_key(|record| (record.created_at, record.id));
        Ok(matching)
    }

    /// Fully replaces the record's fields, keeping its id and creation time.
    async fn replace(&self, id: Uuid, draft: MedicationDraft) -> PortResult<MedicationRecord> {
        let mut records = self
            .records
            .write()
            .map_err(|_| PortError::Unexpected("medication table lock poisoned".to_string()))?;
        let existing = records
            .get_mut(&id)
            .ok_or_else(|| PortError::NotFound(format!("Medication {}", id)))?;

        existing.user_id = draft.user_id;
        existing.name = draft.name;
        existing.dosage = draft.dosage;
        existing.times = draft.times;
        existing.instructions = draft.instructions;
        Ok(existing.clone())
    }

    /// Removes the record with the given id.
    async fn delete(&self, id: Uuid) -> PortResult<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| PortError::Unexpected("medication table lock poisoned".to_string()))?;
        records
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| PortError::NotFound(format!("Medication {}", id)))
    }
}
