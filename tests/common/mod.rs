use std::sync::atomic::{AtomicUsize, Ordering};

use appointment_core::cache::NameCache;
use appointment_core::domain::AppointmentRecord;
use appointment_core::engine::{Engine, EngineConfig};
use appointment_core::errors::StoreError;
use appointment_core::store::{MemoryRowStore, RowStore};

/// Builds an engine over an in-memory store seeded with `records`.
pub fn engine_with(records: Vec<AppointmentRecord>) -> Engine {
    let store = MemoryRowStore::with_records(records);
    Engine::load(
        Box::new(store),
        NameCache::passthrough(),
        EngineConfig::default(),
    )
    .expect("load engine from memory store")
}

/// A record with the worked-example raw inputs already entered.
pub fn sample_record(number: &str) -> AppointmentRecord {
    let mut record = AppointmentRecord::new(number);
    record.subject = "Stålhal".into();
    record.responsible_person = "ab".into();
    record.tilbud = Some(100000.0);
    record.montage = Some(20000.0);
    record.underleverandor = Some(10000.0);
    record
}

/// Store double that fails every write after the first `allowed` successes.
/// Reads always succeed against the wrapped memory store.
pub struct FailingStore {
    inner: MemoryRowStore,
    allowed: usize,
    writes: AtomicUsize,
}

impl FailingStore {
    pub fn after(allowed: usize, records: Vec<AppointmentRecord>) -> Self {
        Self {
            inner: MemoryRowStore::with_records(records),
            allowed,
            writes: AtomicUsize::new(0),
        }
    }

    fn gate(&self) -> Result<(), StoreError> {
        if self.writes.fetch_add(1, Ordering::SeqCst) >= self.allowed {
            Err(StoreError::Backend("simulated outage".into()))
        } else {
            Ok(())
        }
    }
}

impl RowStore for FailingStore {
    fn get_field(
        &self,
        appointment_number: &str,
        field: &str,
    ) -> Result<Option<serde_json::Value>, StoreError> {
        self.inner.get_field(appointment_number, field)
    }

    fn set_field(
        &self,
        appointment_number: &str,
        field: &str,
        value: serde_json::Value,
    ) -> Result<AppointmentRecord, StoreError> {
        self.gate()?;
        self.inner.set_field(appointment_number, field, value)
    }

    fn load_all(&self) -> Result<Vec<AppointmentRecord>, StoreError> {
        self.inner.load_all()
    }

    fn batch_upsert(&self, records: &[AppointmentRecord]) -> Result<(), StoreError> {
        self.gate()?;
        self.inner.batch_upsert(records)
    }
}
