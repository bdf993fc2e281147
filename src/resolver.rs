//! Maps an edited field to the ordered set of derived fields to recompute.
//!
//! Each derived field declares the fields it reads (its producers). Resolution
//! takes the transitive closure over those edges, so a recomputed producer
//! drags its consumers into the same batch, then emits the result in the
//! canonical evaluation order. Consumers therefore always run after the
//! producers they read from the working row.

use crate::columns::Field;
use crate::formulas::{Derived, EVALUATION_ORDER};

/// Producer fields per derived field. A "2" override column counts as a
/// producer wherever its base column does.
fn producers(derived: Derived) -> &'static [Field] {
    match derived {
        Derived::Materialer => &[Field::Tilbud, Field::Montage, Field::Montage2],
        Derived::Projektering => &[Field::Tilbud, Field::Montage, Field::Montage2],
        Derived::Produktion => &[
            Field::Tilbud,
            Field::Montage,
            Field::Underleverandor,
            Field::Montage2,
            Field::Underleverandor2,
            Field::Materialer,
        ],
        Derived::Montage3 => &[Field::Tilbud, Field::Montage, Field::Montage2],
        Derived::TimerTilbage1 => &[Field::Projektering1, Field::Projektering2],
        Derived::TimerTilbage2 => &[Field::Produktion, Field::ProduktionRealized],
        Derived::Total => &[Field::Materialer, Field::Projektering1, Field::Montage3],
    }
}

/// Derived fields to recompute after an edit to `edited`, in evaluation
/// order. Deterministic: the order depends only on the dependency table,
/// never on which trigger pulled a field in.
pub fn dependents(edited: Field) -> Vec<Derived> {
    let mut dirty = vec![edited];
    let mut scheduled = [false; EVALUATION_ORDER.len()];

    loop {
        let mut changed = false;
        for (slot, derived) in EVALUATION_ORDER.iter().enumerate() {
            if scheduled[slot] {
                continue;
            }
            if producers(*derived).iter().any(|p| dirty.contains(p)) {
                scheduled[slot] = true;
                dirty.push(derived.field());
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    EVALUATION_ORDER
        .iter()
        .zip(scheduled)
        .filter_map(|(derived, on)| on.then_some(*derived))
        .collect()
}
