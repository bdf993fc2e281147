//! Grid column table: the one place column positions meet field names.
//!
//! Formulas and the dependency resolver work on [`Field`] variants only; the
//! flat index-addressed representation exists solely at the grid boundary.
//! The index order is a compatibility surface for persisted data and must not
//! be reordered.

use std::fmt;

/// Persisted field names, one variant per independently stored column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    AppointmentNumber,
    Subject,
    ResponsiblePerson,
    Tilbud,
    Montage,
    Underleverandor,
    Materialer,
    Projektering1,
    Produktion,
    Montage3,
    Projektering2,
    ProduktionRealized,
    Total,
    TimerTilbage1,
    TimerTilbage2,
    FaerdigPctExMontageNu,
    FaerdigPctExMontageFoer,
    EstTimerIftFaerdigPct,
    PlusMinusTimer,
    AfsatFragt,
    Montage2,
    Underleverandor2,
}

impl Field {
    /// Snake-case name used as the persisted field key.
    pub fn key(self) -> &'static str {
        match self {
            Field::AppointmentNumber => "appointment_number",
            Field::Subject => "subject",
            Field::ResponsiblePerson => "responsible_person",
            Field::Tilbud => "tilbud",
            Field::Montage => "montage",
            Field::Underleverandor => "underleverandor",
            Field::Materialer => "materialer",
            Field::Projektering1 => "projektering_1",
            Field::Produktion => "produktion",
            Field::Montage3 => "montage_3",
            Field::Projektering2 => "projektering_2",
            Field::ProduktionRealized => "produktion_realized",
            Field::Total => "total",
            Field::TimerTilbage1 => "timer_tilbage_1",
            Field::TimerTilbage2 => "timer_tilbage_2",
            Field::FaerdigPctExMontageNu => "faerdig_pct_ex_montage_nu",
            Field::FaerdigPctExMontageFoer => "faerdig_pct_ex_montage_foer",
            Field::EstTimerIftFaerdigPct => "est_timer_ift_faerdig_pct",
            Field::PlusMinusTimer => "plus_minus_timer",
            Field::AfsatFragt => "afsat_fragt",
            Field::Montage2 => "montage2",
            Field::Underleverandor2 => "underleverandor2",
        }
    }

    /// True for fields whose value is free text rather than a Danish number.
    pub fn is_text(self) -> bool {
        matches!(
            self,
            Field::AppointmentNumber | Field::Subject | Field::ResponsiblePerson
        )
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One visible grid column: its persisted field (if any) and display header.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub field: Option<Field>,
    pub display: &'static str,
}

/// Number of data columns (indices `0..=22`); the marker cell follows.
pub const COLUMN_COUNT: usize = 23;

/// Index of the trailing sub/parent classification marker cell.
pub const MARKER_INDEX: usize = COLUMN_COUNT;

/// Fixed column table. Column 13 ("Afvigelse") is rendered from other cells
/// and has no persisted field of its own.
pub const COLUMNS: [ColumnSpec; COLUMN_COUNT] = [
    ColumnSpec { field: Some(Field::AppointmentNumber), display: "Nr." },
    ColumnSpec { field: Some(Field::Subject), display: "Emne" },
    ColumnSpec { field: Some(Field::ResponsiblePerson), display: "Ansvarlig" },
    ColumnSpec { field: Some(Field::Tilbud), display: "Tilbud" },
    ColumnSpec { field: Some(Field::Montage), display: "Montage" },
    ColumnSpec { field: Some(Field::Underleverandor), display: "Underleverandør" },
    ColumnSpec { field: Some(Field::Materialer), display: "Materialer" },
    ColumnSpec { field: Some(Field::Projektering1), display: "Projektering" },
    ColumnSpec { field: Some(Field::Produktion), display: "Produktion" },
    ColumnSpec { field: Some(Field::Montage3), display: "Montage (est.)" },
    ColumnSpec { field: Some(Field::Projektering2), display: "Projektering (real.)" },
    ColumnSpec { field: Some(Field::ProduktionRealized), display: "Produktion (real.)" },
    ColumnSpec { field: Some(Field::Total), display: "Total" },
    ColumnSpec { field: None, display: "Afvigelse" },
    ColumnSpec { field: Some(Field::TimerTilbage1), display: "Timer tilbage (proj.)" },
    ColumnSpec { field: Some(Field::TimerTilbage2), display: "Timer tilbage (prod.)" },
    ColumnSpec { field: Some(Field::FaerdigPctExMontageNu), display: "Færdig% ex. montage nu" },
    ColumnSpec { field: Some(Field::FaerdigPctExMontageFoer), display: "Færdig% ex. montage før" },
    ColumnSpec { field: Some(Field::EstTimerIftFaerdigPct), display: "Est. timer ift. færdig%" },
    ColumnSpec { field: Some(Field::PlusMinusTimer), display: "+/- timer" },
    ColumnSpec { field: Some(Field::AfsatFragt), display: "Afsat fragt" },
    ColumnSpec { field: Some(Field::Montage2), display: "Montage 2" },
    ColumnSpec { field: Some(Field::Underleverandor2), display: "Underleverandør 2" },
];

/// Persisted field for a column index, or `None` when the column is
/// display-only (or out of range) and must not be persisted directly.
pub fn field_at(index: usize) -> Option<Field> {
    COLUMNS.get(index).and_then(|spec| spec.field)
}

/// Display header for a column index.
pub fn display_name(index: usize) -> Option<&'static str> {
    COLUMNS.get(index).map(|spec| spec.display)
}

/// Column index holding `field`.
pub fn index_of(field: Field) -> usize {
    COLUMNS
        .iter()
        .position(|spec| spec.field == Some(field))
        .expect("every Field variant has a column")
}
