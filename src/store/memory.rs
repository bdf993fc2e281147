use std::collections::BTreeMap;
use std::sync::Mutex;

use chrono::Utc;

use crate::domain::AppointmentRecord;

use super::{apply_field, Result, RowStore};

/// In-memory row store for tests and embedding without a backing file.
/// Records are keyed by appointment number; iteration order is stable.
#[derive(Default)]
pub struct MemoryRowStore {
    records: Mutex<BTreeMap<String, AppointmentRecord>>,
}

impl MemoryRowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with existing records.
    pub fn with_records(records: impl IntoIterator<Item = AppointmentRecord>) -> Self {
        let store = Self::new();
        {
            let mut guard = store.records.lock().expect("record map poisoned");
            for record in records {
                guard.insert(record.appointment_number.clone(), record);
            }
        }
        store
    }

    pub fn len(&self) -> usize {
        self.records.lock().expect("record map poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RowStore for MemoryRowStore {
    fn get_field(&self, appointment_number: &str, field: &str) -> Result<Option<serde_json::Value>> {
        let guard = self.records.lock().expect("record map poisoned");
        let Some(record) = guard.get(appointment_number) else {
            return Ok(None);
        };
        let json = serde_json::to_value(record)?;
        Ok(json.get(field).filter(|v| !v.is_null()).cloned())
    }

    fn set_field(
        &self,
        appointment_number: &str,
        field: &str,
        value: serde_json::Value,
    ) -> Result<AppointmentRecord> {
        let mut guard = self.records.lock().expect("record map poisoned");
        let record = guard
            .entry(appointment_number.to_string())
            .or_insert_with(|| AppointmentRecord::new(appointment_number));
        apply_field(record, field, &value)?;
        record.updated_at = Some(Utc::now());
        let updated = record.clone();
        // A write to the number itself rekeys the entry so later edits
        // keyed by the new number hit the same record.
        if updated.appointment_number != appointment_number {
            guard.remove(appointment_number);
            guard.insert(updated.appointment_number.clone(), updated.clone());
        }
        Ok(updated)
    }

    fn load_all(&self) -> Result<Vec<AppointmentRecord>> {
        let guard = self.records.lock().expect("record map poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn batch_upsert(&self, records: &[AppointmentRecord]) -> Result<()> {
        let mut guard = self.records.lock().expect("record map poisoned");
        for record in records {
            let mut record = record.clone();
            record.updated_at = Some(Utc::now());
            guard.insert(record.appointment_number.clone(), record);
        }
        Ok(())
    }
}
