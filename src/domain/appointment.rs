use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::columns::Field;

/// Classification of an appointment relative to its parent project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentKind {
    Parent,
    Sub,
}

impl AppointmentKind {
    /// Marker text carried in the trailing display-row cell.
    pub fn marker(self) -> &'static str {
        match self {
            AppointmentKind::Parent => "parent-appointment",
            AppointmentKind::Sub => "sub-appointment",
        }
    }
}

/// Classifies an appointment number: a hyphen suffix (`"24371-1"`) marks a
/// sub-item of the parent numbered by the prefix.
pub fn classify(appointment_number: &str) -> AppointmentKind {
    if appointment_number.contains('-') {
        AppointmentKind::Sub
    } else {
        AppointmentKind::Parent
    }
}

/// One persisted appointment/project row.
///
/// Raw inputs are entered by hand; derived fields are owned by the recompute
/// engine; realized fields are written by a separate ingestion path and never
/// touched here. `None` means "never set" and is distinct from a computed
/// zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub appointment_number: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub responsible_person: String,

    // Raw inputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tilbud: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub montage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underleverandor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub montage2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underleverandor2: Option<f64>,

    // Derived fields, written only through the recompute path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub materialer: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projektering_1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub produktion: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub montage_3: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timer_tilbage_1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timer_tilbage_2: Option<f64>,

    // Realized figures from the external time/cost feed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projektering_2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub produktion_realized: Option<f64>,

    // User-adjustable figures outside the formula chain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faerdig_pct_ex_montage_nu: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faerdig_pct_ex_montage_foer: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub est_timer_ift_faerdig_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plus_minus_timer: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub afsat_fragt: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl AppointmentRecord {
    pub fn new(appointment_number: impl Into<String>) -> Self {
        Self {
            appointment_number: appointment_number.into(),
            ..Self::default()
        }
    }

    pub fn kind(&self) -> AppointmentKind {
        classify(&self.appointment_number)
    }

    /// Numeric value of `field`, or `None` for text fields and unset values.
    pub fn numeric(&self, field: Field) -> Option<f64> {
        match field {
            Field::Tilbud => self.tilbud,
            Field::Montage => self.montage,
            Field::Underleverandor => self.underleverandor,
            Field::Montage2 => self.montage2,
            Field::Underleverandor2 => self.underleverandor2,
            Field::Materialer => self.materialer,
            Field::Projektering1 => self.projektering_1,
            Field::Produktion => self.produktion,
            Field::Montage3 => self.montage_3,
            Field::Total => self.total,
            Field::TimerTilbage1 => self.timer_tilbage_1,
            Field::TimerTilbage2 => self.timer_tilbage_2,
            Field::Projektering2 => self.projektering_2,
            Field::ProduktionRealized => self.produktion_realized,
            Field::FaerdigPctExMontageNu => self.faerdig_pct_ex_montage_nu,
            Field::FaerdigPctExMontageFoer => self.faerdig_pct_ex_montage_foer,
            Field::EstTimerIftFaerdigPct => self.est_timer_ift_faerdig_pct,
            Field::PlusMinusTimer => self.plus_minus_timer,
            Field::AfsatFragt => self.afsat_fragt,
            Field::AppointmentNumber | Field::Subject | Field::ResponsiblePerson => None,
        }
    }

    /// Sets a numeric field by name. Text fields are set via `set_text`.
    pub fn set_numeric(&mut self, field: Field, value: Option<f64>) {
        match field {
            Field::Tilbud => self.tilbud = value,
            Field::Montage => self.montage = value,
            Field::Underleverandor => self.underleverandor = value,
            Field::Montage2 => self.montage2 = value,
            Field::Underleverandor2 => self.underleverandor2 = value,
            Field::Materialer => self.materialer = value,
            Field::Projektering1 => self.projektering_1 = value,
            Field::Produktion => self.produktion = value,
            Field::Montage3 => self.montage_3 = value,
            Field::Total => self.total = value,
            Field::TimerTilbage1 => self.timer_tilbage_1 = value,
            Field::TimerTilbage2 => self.timer_tilbage_2 = value,
            Field::Projektering2 => self.projektering_2 = value,
            Field::ProduktionRealized => self.produktion_realized = value,
            Field::FaerdigPctExMontageNu => self.faerdig_pct_ex_montage_nu = value,
            Field::FaerdigPctExMontageFoer => self.faerdig_pct_ex_montage_foer = value,
            Field::EstTimerIftFaerdigPct => self.est_timer_ift_faerdig_pct = value,
            Field::PlusMinusTimer => self.plus_minus_timer = value,
            Field::AfsatFragt => self.afsat_fragt = value,
            Field::AppointmentNumber | Field::Subject | Field::ResponsiblePerson => {}
        }
    }

    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::AppointmentNumber => Some(&self.appointment_number),
            Field::Subject => Some(&self.subject),
            Field::ResponsiblePerson => Some(&self.responsible_person),
            _ => None,
        }
    }

    pub fn set_text(&mut self, field: Field, value: impl Into<String>) {
        match field {
            Field::AppointmentNumber => self.appointment_number = value.into(),
            Field::Subject => self.subject = value.into(),
            Field::ResponsiblePerson => self.responsible_person = value.into(),
            _ => {}
        }
    }
}
