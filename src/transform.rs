//! Bulk conversion between persisted records and flat display rows.
//!
//! Numbers render through the Danish formatter; an unset (`None`) numeric
//! field becomes an empty cell, never `"0,00"`, so "never set" stays
//! distinguishable from "computed to zero". The inverse direction treats
//! placeholder tokens as unset so a bulk import cannot stomp not-yet-computed
//! derived fields with zeros.

use crate::cache::NameCache;
use crate::columns::{Field, COLUMNS};
use crate::domain::{AppointmentRecord, DisplayRow};
use crate::locale::{format_number, is_real_value, parse_number};

/// Renders one record as a display row, resolving the responsible person
/// through the injected name cache.
pub fn to_display_row(record: &AppointmentRecord, names: &mut NameCache) -> DisplayRow {
    let mut row = DisplayRow::empty(record.kind());
    for spec in COLUMNS.iter() {
        let Some(field) = spec.field else { continue };
        if field == Field::ResponsiblePerson {
            row.set_field(field, names.display_name(&record.responsible_person));
        } else if let Some(text) = record.text(field) {
            row.set_field(field, text);
        } else if let Some(value) = record.numeric(field) {
            row.set_field(field, format_number(value));
        }
    }
    row
}

/// Renders every record, preserving input order.
pub fn to_display_rows(records: &[AppointmentRecord], names: &mut NameCache) -> Vec<DisplayRow> {
    records
        .iter()
        .map(|record| to_display_row(record, names))
        .collect()
}

/// Rebuilds records from display rows for bulk import. Rows without an
/// appointment number are skipped.
pub fn to_records(rows: &[DisplayRow]) -> Vec<AppointmentRecord> {
    rows.iter().filter_map(to_record).collect()
}

fn to_record(row: &DisplayRow) -> Option<AppointmentRecord> {
    let number = row.appointment_number().trim();
    if number.is_empty() {
        tracing::warn!("skipping display row without an appointment number");
        return None;
    }
    let mut record = AppointmentRecord::new(number);

    for spec in COLUMNS.iter() {
        let Some(field) = spec.field else { continue };
        let cell = row.field(field);
        if field.is_text() {
            record.set_text(field, cell);
        } else if is_real_value(cell) {
            record.set_numeric(field, Some(parse_number(cell)));
        }
        // Empty or placeholder cells stay None rather than zero.
    }
    Some(record)
}
