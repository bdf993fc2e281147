//! File-backed row store keeping the whole record set in one JSON document.
//!
//! Writes go through a temp file followed by a rename so a crash mid-write
//! never leaves a truncated store on disk.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::{env, io};

use chrono::Utc;

use crate::domain::AppointmentRecord;

use super::{apply_field, Result, RowStore};

const DEFAULT_DIR_NAME: &str = ".appointment_core";
const STORE_FILE: &str = "appointments.json";
const TMP_SUFFIX: &str = "tmp";

/// Returns the application data directory, defaulting to
/// `~/.appointment_core` with an `APPOINTMENT_CORE_HOME` override.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("APPOINTMENT_CORE_HOME") {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub struct JsonRowStore {
    path: PathBuf,
    records: Mutex<BTreeMap<String, AppointmentRecord>>,
}

impl JsonRowStore {
    /// Opens (or creates) the store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        let path = dir.join(STORE_FILE);
        let records = if path.exists() {
            let data = fs::read_to_string(&path)?;
            serde_json::from_str(&data)?
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            path,
            records: Mutex::new(records),
        })
    }

    /// Opens the store in the default data directory.
    pub fn new_default() -> Result<Self> {
        Self::new(app_data_dir())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, records: &BTreeMap<String, AppointmentRecord>) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }
}

fn write_atomic(path: &Path, data: &str) -> io::Result<()> {
    let tmp = path.with_extension(TMP_SUFFIX);
    {
        let mut file = File::create(&tmp)?;
        file.write_all(data.as_bytes())?;
        file.sync_all()?;
    }
    fs::rename(&tmp, path)
}

impl RowStore for JsonRowStore {
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
        self.flush(&guard)?;
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
        self.flush(&guard)
    }
}
