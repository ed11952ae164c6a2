//! Scenario-by-metric tables and relative-deviation (sensitivity) tables.

use crate::error::{SweepError, SweepResult};
use crate::types::ScenarioId;
use std::collections::HashMap;

/// A rectangular table: scenario rows (insertion-ordered) by metric columns.
///
/// Rows are also indexed by scenario id so the base-case lookup is keyed,
/// not a scan.
#[derive(Debug, Clone, Default)]
pub struct MetricTable {
    metrics: Vec<String>,
    rows: Vec<(ScenarioId, Vec<f64>)>,
    index: HashMap<ScenarioId, usize>,
}

impl MetricTable {
    pub fn new(metrics: &[&str]) -> Self {
        Self {
            metrics: metrics.iter().map(|m| m.to_string()).collect(),
            rows: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn metrics(&self) -> &[String] {
        &self.metrics
    }

    pub fn scenarios(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|(id, _)| id.as_str())
    }

    pub fn row(&self, scenario: &str) -> Option<&[f64]> {
        self.index
            .get(scenario)
            .map(|&i| self.rows[i].1.as_slice())
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.rows.iter().map(|(id, v)| (id.as_str(), v.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append one scenario's metric values. The row must be exactly as wide
    /// as the metric header.
    pub fn push_row(&mut self, scenario: &str, values: Vec<f64>) -> SweepResult<()> {
        if values.len() != self.metrics.len() {
            return Err(SweepError::RowWidthMismatch {
                scenario: scenario.to_string(),
                expected: self.metrics.len(),
                got: values.len(),
            });
        }
        self.index.insert(scenario.to_string(), self.rows.len());
        self.rows.push((scenario.to_string(), values));
        Ok(())
    }
}

/// Percentage deviation of every cell from the base scenario's row.
///
/// cell = (value − base) / base × 100. A zero base value makes the column
/// undefined for every non-base row — those cells are NaN, not an error;
/// downstream consumers must tolerate them. The base row itself is all
/// zeros. A `base` id absent from the table is `BaseCaseNotFound`.
pub fn sensitivity_table(table: &MetricTable, base: &str) -> SweepResult<MetricTable> {
    let base_row = table
        .row(base)
        .ok_or_else(|| SweepError::BaseCaseNotFound {
            label: base.to_string(),
        })?
        .to_vec();

    let mut out = MetricTable {
        metrics: table.metrics.clone(),
        rows: Vec::new(),
        index: HashMap::new(),
    };

    for (scenario, values) in table.rows() {
        let deltas = if scenario == base {
            vec![0.0; values.len()]
        } else {
            values
                .iter()
                .zip(&base_row)
                .map(|(&v, &b)| {
                    if b == 0.0 {
                        f64::NAN
                    } else {
                        (v - b) / b * 100.0
                    }
                })
                .collect()
        };
        out.push_row(scenario, deltas)?;
    }
    Ok(out)
}
