//! Drives one cell edit through the full recompute sequence.
//!
//! Per edit: optimistic display update, raw-field persist, dependency
//! resolution, ordered recompute with each result folded back into the
//! working row before the next formula runs, and a persist per derived
//! value. Phases for one edit are strictly sequential; edits themselves are
//! serialized by `&mut self`, so a superseded edit runs after its
//! predecessor finishes rather than interleaving store writes.

use serde_json::json;

use crate::cache::NameCache;
use crate::columns::{self, Field};
use crate::domain::DisplayRow;
use crate::errors::{EditError, EditPhase, StoreError};
use crate::formulas::{self, Derived, EVALUATION_ORDER};
use crate::locale::parse_number;
use crate::resolver;
use crate::store::RowStore;
use crate::transform;

/// Tunables for the engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Rows per `batch_upsert` during a full recalculation.
    pub recalc_batch_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            recalc_batch_size: 5,
        }
    }
}

/// What a successful edit did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The column has no persisted field; only the display cell changed.
    DisplayOnly,
    /// The raw field and every dependent derived field were persisted.
    Persisted {
        field: Field,
        recomputed: Vec<Derived>,
    },
}

/// Summary of a full recalculation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkReport {
    pub rows: usize,
    pub batches: usize,
}

/// Owns the working row set and orchestrates edits against the row store.
pub struct Engine {
    store: Box<dyn RowStore>,
    rows: Vec<DisplayRow>,
    names: NameCache,
    config: EngineConfig,
    needs_resync: bool,
}

impl Engine {
    /// Loads every record from `store` and builds the working display rows.
    pub fn load(
        store: Box<dyn RowStore>,
        mut names: NameCache,
        config: EngineConfig,
    ) -> Result<Self, StoreError> {
        let records = store.load_all()?;
        let rows = transform::to_display_rows(&records, &mut names);
        tracing::debug!(rows = rows.len(), "engine loaded working row set");
        Ok(Self {
            store,
            rows,
            names,
            config,
            needs_resync: false,
        })
    }

    pub fn rows(&self) -> &[DisplayRow] {
        &self.rows
    }

    /// True after a persistence failure, until `resync` runs.
    pub fn needs_resync(&self) -> bool {
        self.needs_resync
    }

    /// Full reload-and-replace of the working rows from the store. The only
    /// recovery path after a failed persist; optimistic edits are replaced
    /// wholesale, never point-fixed.
    pub fn resync(&mut self) -> Result<(), StoreError> {
        let records = self.store.load_all()?;
        self.rows = transform::to_display_rows(&records, &mut self.names);
        self.needs_resync = false;
        tracing::debug!(rows = self.rows.len(), "working row set resynced");
        Ok(())
    }

    /// Applies one cell edit.
    ///
    /// The display cell is updated before any store call so the user's
    /// keystroke is visible immediately. On a store failure the optimistic
    /// cells are left as-is and the engine flags itself for `resync`.
    pub fn apply_edit(
        &mut self,
        row_index: usize,
        column_index: usize,
        raw_text: &str,
    ) -> Result<EditOutcome, EditError> {
        if row_index >= self.rows.len() {
            return Err(EditError::new(
                EditPhase::UpdatingDisplay,
                StoreError::Backend(format!("row index {row_index} out of range")),
            ));
        }

        // Key the persistence by the number the row had when the edit began,
        // so an edit to the identifier column cannot fork the record.
        let appointment_number = self.rows[row_index].appointment_number().to_string();

        // Phase 1: optimistic display update.
        self.rows[row_index].set_cell(column_index, raw_text);

        // Phase 2: column lookup; display-only columns stop here.
        let Some(field) = columns::field_at(column_index) else {
            tracing::warn!(column_index, "edit to unmapped column, skipping persistence");
            return Ok(EditOutcome::DisplayOnly);
        };

        // Phase 3: parse and persist the raw field.
        let value = if field.is_text() {
            json!(raw_text)
        } else {
            json!(parse_number(raw_text))
        };
        self.persist(&appointment_number, field, value, EditPhase::PersistingRaw)?;

        // Phase 4: resolve dependents.
        let dependents = resolver::dependents(field);

        // Phase 5: recompute in order, folding each result into the working
        // row before the next formula reads it.
        for derived in &dependents {
            let computed = formulas::evaluate(*derived, &self.rows[row_index]);
            self.persist(
                &appointment_number,
                derived.field(),
                json!(computed.value),
                EditPhase::PersistingDerived,
            )?;
            self.rows[row_index].set_field(derived.field(), computed.text);
        }

        tracing::debug!(
            appointment = %appointment_number,
            field = %field,
            recomputed = dependents.len(),
            "edit applied"
        );
        Ok(EditOutcome::Persisted {
            field,
            recomputed: dependents,
        })
    }

    fn persist(
        &mut self,
        appointment_number: &str,
        field: Field,
        value: serde_json::Value,
        phase: EditPhase,
    ) -> Result<(), EditError> {
        match self.store.set_field(appointment_number, field.key(), value) {
            Ok(_) => Ok(()),
            Err(source) => {
                self.needs_resync = true;
                tracing::error!(
                    appointment = %appointment_number,
                    field = %field,
                    %phase,
                    error = %source,
                    "store write failed, resync pending"
                );
                Err(EditError::new(phase, source))
            }
        }
    }

    /// Recomputes every derived field of every row and persists the result in
    /// `recalc_batch_size`-row batches.
    pub fn recalculate_all(&mut self) -> Result<BulkReport, StoreError> {
        for row in &mut self.rows {
            for derived in EVALUATION_ORDER {
                let computed = formulas::evaluate(derived, row);
                row.set_field(derived.field(), computed.text);
            }
        }

        let records = transform::to_records(&self.rows);
        let batch_size = self.config.recalc_batch_size.max(1);
        let mut batches = 0;
        for chunk in records.chunks(batch_size) {
            if let Err(source) = self.store.batch_upsert(chunk) {
                self.needs_resync = true;
                tracing::error!(error = %source, "bulk recalculation upsert failed");
                return Err(source);
            }
            batches += 1;
        }
        tracing::debug!(rows = records.len(), batches, "bulk recalculation finished");
        Ok(BulkReport {
            rows: records.len(),
            batches,
        })
    }
}
