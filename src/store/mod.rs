pub mod json_backend;
pub mod memory;

use crate::domain::AppointmentRecord;
use crate::errors::StoreError;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Abstraction over persistence backends holding the appointment records.
///
/// `set_field` has upsert semantics keyed by appointment number: re-saving a
/// known number updates the record, an unknown number creates it. Records are
/// never deleted through this interface.
pub trait RowStore: Send + Sync {
    /// Reads a single field value, `None` when the record or field is unset.
    fn get_field(&self, appointment_number: &str, field: &str) -> Result<Option<serde_json::Value>>;

    /// Upserts one field and returns the full record after the write.
    fn set_field(
        &self,
        appointment_number: &str,
        field: &str,
        value: serde_json::Value,
    ) -> Result<AppointmentRecord>;

    /// Loads every persisted record.
    fn load_all(&self) -> Result<Vec<AppointmentRecord>>;

    /// Upserts a batch of whole records.
    fn batch_upsert(&self, records: &[AppointmentRecord]) -> Result<()>;
}

/// Applies one named field value onto a record, mirroring `set_field`.
/// Unknown field names are rejected so a typo cannot silently drop a write.
pub(crate) fn apply_field(
    record: &mut AppointmentRecord,
    field: &str,
    value: &serde_json::Value,
) -> Result<()> {
    let known = crate::columns::COLUMNS
        .iter()
        .filter_map(|spec| spec.field)
        .find(|f| f.key() == field);
    let Some(field) = known else {
        return Err(StoreError::Backend(format!("unknown field '{field}'")));
    };

    if field.is_text() {
        let text = value.as_str().unwrap_or_default();
        record.set_text(field, text);
    } else {
        record.set_numeric(field, value.as_f64());
    }
    Ok(())
}

pub use json_backend::JsonRowStore;
pub use memory::MemoryRowStore;
