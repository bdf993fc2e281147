mod common;

use appointment_core::cache::NameCache;
use appointment_core::columns::Field;
use appointment_core::engine::{Engine, EngineConfig, EditOutcome};
use appointment_core::errors::EditPhase;
use appointment_core::formulas::Derived;

use common::{engine_with, sample_record, FailingStore};

const NUMBER_COL: usize = 0;
const TILBUD_COL: usize = 3;
const SUBJECT_COL: usize = 1;
const AFVIGELSE_COL: usize = 13;
const MONTAGE2_COL: usize = 21;

#[test]
fn tilbud_edit_recomputes_the_full_cascade_with_fresh_values() {
    let mut engine = engine_with(vec![sample_record("24371")]);

    let outcome = engine.apply_edit(0, TILBUD_COL, "100000,00").expect("edit");
    let EditOutcome::Persisted { field, recomputed } = outcome else {
        panic!("expected a persisted edit");
    };
    assert_eq!(field, Field::Tilbud);
    assert_eq!(
        recomputed,
        vec![
            Derived::Materialer,
            Derived::Projektering,
            Derived::Produktion,
            Derived::Montage3,
            Derived::TimerTilbage1,
            Derived::TimerTilbage2,
            Derived::Total,
        ]
    );

    let row = &engine.rows()[0];
    assert_eq!(row.field(Field::Materialer), "17.500,00");
    assert_eq!(row.field(Field::Projektering1), "9,64");
    // Produktion observes the just-written materialer and projektering, not
    // stale values: (100000 - 20000 - 10000 - 17500) / 750 - 9.64.
    assert_eq!(row.field(Field::Produktion), "60,36");
    assert_eq!(row.field(Field::Montage3), "29,21");
    assert_eq!(row.field(Field::Total), "29,21");
    assert_eq!(row.field(Field::TimerTilbage1), "9,64");
    assert_eq!(row.field(Field::TimerTilbage2), "60,36");

    // The same values came back from the store, not just the working copy.
    engine.resync().expect("resync");
    let row = &engine.rows()[0];
    assert_eq!(row.field(Field::Materialer), "17.500,00");
    assert_eq!(row.field(Field::Produktion), "60,36");
    assert_eq!(row.field(Field::Total), "29,21");
}

#[test]
fn reapplying_the_same_edit_persists_identical_values() {
    let mut engine = engine_with(vec![sample_record("24371")]);

    engine.apply_edit(0, TILBUD_COL, "100000,00").expect("first edit");
    engine.resync().expect("resync");
    let first: Vec<String> = engine.rows()[0].cells().to_vec();

    engine.apply_edit(0, TILBUD_COL, "100000,00").expect("second edit");
    engine.resync().expect("resync");
    let second: Vec<String> = engine.rows()[0].cells().to_vec();

    assert_eq!(first, second);
}

#[test]
fn last_edit_wins_when_the_same_cell_is_edited_twice() {
    let mut engine = engine_with(vec![sample_record("24371")]);

    engine.apply_edit(0, TILBUD_COL, "50000,00").expect("first edit");
    engine.apply_edit(0, TILBUD_COL, "100000,00").expect("second edit");
    engine.resync().expect("resync");

    let row = &engine.rows()[0];
    assert_eq!(row.field(Field::Tilbud), "100.000,00");
    assert_eq!(row.field(Field::Materialer), "17.500,00");
}

#[test]
fn unmapped_column_updates_display_only() {
    let mut engine = engine_with(vec![sample_record("24371")]);
    let before_derived = engine.rows()[0].field(Field::Materialer).to_string();

    let outcome = engine.apply_edit(0, AFVIGELSE_COL, "note").expect("edit");
    assert_eq!(outcome, EditOutcome::DisplayOnly);
    assert_eq!(engine.rows()[0].cell(AFVIGELSE_COL), "note");
    assert_eq!(engine.rows()[0].field(Field::Materialer), before_derived);

    // Nothing reached the store; a resync drops the display-only text.
    engine.resync().expect("resync");
    assert_eq!(engine.rows()[0].cell(AFVIGELSE_COL), "");
}

#[test]
fn text_edit_persists_without_recompute() {
    let mut engine = engine_with(vec![sample_record("24371")]);

    let outcome = engine.apply_edit(0, SUBJECT_COL, "Ny hal").expect("edit");
    assert_eq!(
        outcome,
        EditOutcome::Persisted {
            field: Field::Subject,
            recomputed: vec![],
        }
    );

    engine.resync().expect("resync");
    assert_eq!(engine.rows()[0].field(Field::Subject), "Ny hal");
}

#[test]
fn placeholder_override_falls_back_to_base_montage() {
    let mut record = sample_record("24371");
    record.montage = Some(1000.0);
    record.underleverandor = None;
    record.tilbud = None;
    let mut engine = engine_with(vec![record]);

    engine.apply_edit(0, MONTAGE2_COL, "R1C7").expect("edit");
    // montage_3 recomputed from the base montage: (1000 - 80) / 630.
    assert_eq!(engine.rows()[0].field(Field::Montage3), "1,46");

    engine.apply_edit(0, MONTAGE2_COL, "500,00").expect("edit");
    // A real override takes effect: (500 - 40) / 630.
    assert_eq!(engine.rows()[0].field(Field::Montage3), "0,73");
}

#[test]
fn renaming_an_appointment_never_forks_the_record() {
    let mut engine = engine_with(vec![sample_record("24371")]);

    engine.apply_edit(0, NUMBER_COL, "99999").expect("rename");
    engine.apply_edit(0, TILBUD_COL, "100000,00").expect("edit");
    engine.resync().expect("resync");

    assert_eq!(engine.rows().len(), 1);
    let row = &engine.rows()[0];
    assert_eq!(row.appointment_number(), "99999");
    assert_eq!(row.field(Field::Subject), "Stålhal");
    assert_eq!(row.field(Field::Tilbud), "100.000,00");
    assert_eq!(row.field(Field::Materialer), "17.500,00");
}

#[test]
fn raw_persist_failure_keeps_optimistic_cell_and_flags_resync() {
    let store = FailingStore::after(0, vec![sample_record("24371")]);
    let mut engine = Engine::load(
        Box::new(store),
        NameCache::passthrough(),
        EngineConfig::default(),
    )
    .expect("load engine");

    let err = engine
        .apply_edit(0, TILBUD_COL, "100000,00")
        .expect_err("write must fail");
    assert_eq!(err.phase, EditPhase::PersistingRaw);

    // Optimistic update survives the failure.
    assert_eq!(engine.rows()[0].field(Field::Tilbud), "100000,00");
    assert!(engine.needs_resync());

    // The reload path replaces the stale working rows from the store.
    engine.resync().expect("resync");
    assert!(!engine.needs_resync());
    assert_eq!(engine.rows()[0].field(Field::Tilbud), "100.000,00");
    assert_eq!(engine.rows()[0].field(Field::Materialer), "");
}

#[test]
fn derived_persist_failure_reports_the_phase() {
    let store = FailingStore::after(1, vec![sample_record("24371")]);
    let mut engine = Engine::load(
        Box::new(store),
        NameCache::passthrough(),
        EngineConfig::default(),
    )
    .expect("load engine");

    let err = engine
        .apply_edit(0, TILBUD_COL, "100000,00")
        .expect_err("derived write must fail");
    assert_eq!(err.phase, EditPhase::PersistingDerived);
    assert!(engine.needs_resync());
}

#[test]
fn out_of_range_row_is_rejected() {
    let mut engine = engine_with(vec![sample_record("24371")]);
    assert!(engine.apply_edit(7, TILBUD_COL, "1,00").is_err());
}

#[test]
fn rows_carry_sub_and_parent_markers() {
    let engine = engine_with(vec![sample_record("24371"), sample_record("24371-1")]);
    assert_eq!(engine.rows()[0].marker(), "parent-appointment");
    assert_eq!(engine.rows()[1].marker(), "sub-appointment");
}

#[test]
fn bulk_recalculation_processes_rows_in_batches() {
    let records = (1..=7)
        .map(|n| sample_record(&format!("2400{n}")))
        .collect();
    let mut engine = engine_with(records);

    let report = engine.recalculate_all().expect("bulk recalc");
    assert_eq!(report.rows, 7);
    assert_eq!(report.batches, 2);

    engine.resync().expect("resync");
    for row in engine.rows() {
        assert_eq!(row.field(Field::Materialer), "17.500,00");
        assert_eq!(row.field(Field::Montage3), "29,21");
    }
}

#[test]
fn bulk_recalculation_failure_flags_resync() {
    let store = FailingStore::after(0, vec![sample_record("24371")]);
    let mut engine = Engine::load(
        Box::new(store),
        NameCache::passthrough(),
        EngineConfig::default(),
    )
    .expect("load engine");

    assert!(engine.recalculate_all().is_err());
    assert!(engine.needs_resync());
}
