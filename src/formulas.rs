//! Per-field recompute formulas.
//!
//! Each formula is a pure function of the current working row: same row in,
//! same result out. Inputs are read through the override rule (a "2" column
//! replaces its base column only when it holds a genuine numeric value) and
//! any arithmetic that lands on a non-finite number renders as `"0,00"`
//! instead of failing the recompute chain.

use crate::columns::Field;
use crate::domain::DisplayRow;
use crate::locale::{format_number, is_real_value, parse_number};

/// Hours per projektering unit in the projektering estimate.
const PROJEKTERING_RATE: f64 = 830.0;
/// Hours per produktion unit in the produktion estimate.
const PRODUKTION_RATE: f64 = 750.0;
/// Hours per montage unit in the montage estimate.
const MONTAGE_RATE: f64 = 630.0;
/// Materials share of the offer net of montage and subcontractor.
const MATERIALER_SHARE: f64 = 0.25;
/// Projektering share of the offer net of montage.
const PROJEKTERING_SHARE: f64 = 0.10;
/// Deduction applied to montage before converting to hours.
const MONTAGE_DEDUCTION: f64 = 0.08;

/// The derived fields the engine owns, in canonical recompute order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Derived {
    Materialer,
    Projektering,
    Produktion,
    Montage3,
    TimerTilbage1,
    TimerTilbage2,
    Total,
}

/// Canonical evaluation order: producers strictly before consumers, `Total`
/// always last.
pub const EVALUATION_ORDER: [Derived; 7] = [
    Derived::Materialer,
    Derived::Projektering,
    Derived::Produktion,
    Derived::Montage3,
    Derived::TimerTilbage1,
    Derived::TimerTilbage2,
    Derived::Total,
];

impl Derived {
    /// The persisted field this derived value is written to.
    pub fn field(self) -> Field {
        match self {
            Derived::Materialer => Field::Materialer,
            Derived::Projektering => Field::Projektering1,
            Derived::Produktion => Field::Produktion,
            Derived::Montage3 => Field::Montage3,
            Derived::TimerTilbage1 => Field::TimerTilbage1,
            Derived::TimerTilbage2 => Field::TimerTilbage2,
            Derived::Total => Field::Total,
        }
    }
}

/// A freshly computed derived value: the parsed number and its Danish
/// rendering, ready to persist and to patch into the working row.
#[derive(Debug, Clone, PartialEq)]
pub struct Computed {
    pub value: f64,
    pub text: String,
}

fn computed(value: f64) -> Computed {
    if value.is_finite() {
        Computed {
            value,
            text: format_number(value),
        }
    } else {
        Computed {
            value: 0.0,
            text: format_number(f64::NAN),
        }
    }
}

/// Montage used by every formula: `montage2` when it holds a real value,
/// otherwise `montage`.
fn effective_montage(row: &DisplayRow) -> f64 {
    let override_cell = row.field(Field::Montage2);
    if is_real_value(override_cell) {
        parse_number(override_cell)
    } else {
        parse_number(row.field(Field::Montage))
    }
}

/// Underleverandør with the same override rule as montage.
fn effective_underleverandor(row: &DisplayRow) -> f64 {
    let override_cell = row.field(Field::Underleverandor2);
    if is_real_value(override_cell) {
        parse_number(override_cell)
    } else {
        parse_number(row.field(Field::Underleverandor))
    }
}

/// `((tilbud − montage) − underleverandør) × 0.25`
pub fn materialer(row: &DisplayRow) -> Computed {
    let tilbud = parse_number(row.field(Field::Tilbud));
    computed((tilbud - effective_montage(row) - effective_underleverandor(row)) * MATERIALER_SHARE)
}

/// `((tilbud − montage) × 0.10) / 830`
pub fn projektering(row: &DisplayRow) -> Computed {
    let tilbud = parse_number(row.field(Field::Tilbud));
    computed((tilbud - effective_montage(row)) * PROJEKTERING_SHARE / PROJEKTERING_RATE)
}

/// `((tilbud − montage − underleverandør − materialer) / 750) − projektering`
///
/// Reads `materialer` and `projektering` from the working row, so both must
/// already be fresh when this runs.
pub fn produktion(row: &DisplayRow) -> Computed {
    let tilbud = parse_number(row.field(Field::Tilbud));
    let materialer = parse_number(row.field(Field::Materialer));
    let projektering = parse_number(row.field(Field::Projektering1));
    let net =
        tilbud - effective_montage(row) - effective_underleverandor(row) - materialer;
    computed(net / PRODUKTION_RATE - projektering)
}

/// `(montage − montage × 0.08) / 630`
pub fn montage_3(row: &DisplayRow) -> Computed {
    let montage = effective_montage(row);
    computed((montage - montage * MONTAGE_DEDUCTION) / MONTAGE_RATE)
}

/// `projektering_2 + produktion_realized + montage_3`
///
/// Mixes the two realized figures with the estimated montage; that asymmetry
/// is intentional business policy.
pub fn total(row: &DisplayRow) -> Computed {
    let projektering_real = parse_number(row.field(Field::Projektering2));
    let produktion_real = parse_number(row.field(Field::ProduktionRealized));
    let montage_est = parse_number(row.field(Field::Montage3));
    computed(projektering_real + produktion_real + montage_est)
}

/// `projektering_1 − projektering_2` (estimate minus realized)
pub fn timer_tilbage_1(row: &DisplayRow) -> Computed {
    let estimate = parse_number(row.field(Field::Projektering1));
    let realized = parse_number(row.field(Field::Projektering2));
    computed(estimate - realized)
}

/// `produktion − produktion_realized` (estimate minus realized)
pub fn timer_tilbage_2(row: &DisplayRow) -> Computed {
    let estimate = parse_number(row.field(Field::Produktion));
    let realized = parse_number(row.field(Field::ProduktionRealized));
    computed(estimate - realized)
}

/// Evaluates one derived field against the current working row.
pub fn evaluate(derived: Derived, row: &DisplayRow) -> Computed {
    match derived {
        Derived::Materialer => materialer(row),
        Derived::Projektering => projektering(row),
        Derived::Produktion => produktion(row),
        Derived::Montage3 => montage_3(row),
        Derived::TimerTilbage1 => timer_tilbage_1(row),
        Derived::TimerTilbage2 => timer_tilbage_2(row),
        Derived::Total => total(row),
    }
}
