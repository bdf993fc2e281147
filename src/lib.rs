#![doc(test(attr(deny(warnings))))]

//! Appointment Core tracks construction appointments through a spreadsheet
//! style grid and owns the derived-field recalculation chain: Danish-locale
//! numeric text, the column/field table, per-field formulas, dependency
//! resolution, and the edit orchestration against a pluggable row store.

pub mod cache;
pub mod columns;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod formulas;
pub mod locale;
pub mod resolver;
pub mod store;
pub mod transform;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("appointment_core=info".parse().unwrap());
        fmt().with_env_filter(filter).init();
        tracing::info!("Appointment Core tracing initialized.");
    });
}
