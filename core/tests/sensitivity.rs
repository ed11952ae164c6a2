//! Sensitivity table builder: percentage deviation from a base scenario.

use fuelcycle_core::error::SweepError;
use fuelcycle_core::sensitivity::{sensitivity_table, MetricTable};

fn three_scenario_table(base_values: Vec<f64>) -> MetricTable {
    let mut table = MetricTable::new(&["m1", "m2"]);
    table.push_row("base", base_values).unwrap();
    table.push_row("A", vec![15.0, 30.0]).unwrap();
    table.push_row("B", vec![5.0, 10.0]).unwrap();
    table
}

#[test]
fn cells_are_percentage_deviation_from_the_base_row() {
    let table = three_scenario_table(vec![10.0, 20.0]);
    let s = sensitivity_table(&table, "base").unwrap();

    assert_eq!(s.row("A").unwrap(), &[50.0, 50.0]);
    assert_eq!(s.row("B").unwrap(), &[-50.0, -50.0]);
}

#[test]
fn base_row_is_all_zeros() {
    let table = three_scenario_table(vec![10.0, 20.0]);
    let s = sensitivity_table(&table, "base").unwrap();
    assert_eq!(s.row("base").unwrap(), &[0.0, 0.0]);
}

#[test]
fn zero_base_value_marks_the_column_undefined_not_fatal() {
    let table = three_scenario_table(vec![10.0, 0.0]);
    let s = sensitivity_table(&table, "base").unwrap();

    assert_eq!(s.row("A").unwrap()[0], 50.0, "nonzero base column still computed");
    assert!(s.row("A").unwrap()[1].is_nan(), "zero base must give NaN, not an error");
    assert!(s.row("B").unwrap()[1].is_nan());
    assert_eq!(s.row("base").unwrap(), &[0.0, 0.0], "base row stays zero even with a zero base value");
}

#[test]
fn missing_base_case_is_an_input_error() {
    let table = three_scenario_table(vec![10.0, 20.0]);
    let err = sensitivity_table(&table, "CT99").unwrap_err();
    assert!(matches!(err, SweepError::BaseCaseNotFound { ref label } if label == "CT99"));
}

#[test]
fn output_preserves_scenario_order_and_shape() {
    let table = three_scenario_table(vec![10.0, 20.0]);
    let s = sensitivity_table(&table, "base").unwrap();

    let order: Vec<&str> = s.scenarios().collect();
    assert_eq!(order, vec!["base", "A", "B"]);
    assert_eq!(s.metrics(), table.metrics());
}

#[test]
fn ragged_rows_are_rejected_at_insertion() {
    let mut table = MetricTable::new(&["m1", "m2"]);
    let err = table.push_row("base", vec![1.0]).unwrap_err();
    assert!(matches!(err, SweepError::RowWidthMismatch { expected: 2, got: 1, .. }));
}
