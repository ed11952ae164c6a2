//! Turns raw (time, quantity) rows into fixed-length per-step sequences.
//!
//! Pure functions: no connection, no state. The store hands these the rows
//! it decoded and gets back a `Vec<f64>` indexed by timestep.

use crate::types::Timestep;
use chrono::NaiveDate;

/// Mass conversion factor applied when [`UnitConversion::KgToTons`] is set.
pub const KG_PER_TON: f64 = 1000.0;

/// One decoded fact row: a quantity observed at a timestep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowEntry {
    pub time: i64,
    pub quantity: f64,
}

impl FlowEntry {
    pub fn new(time: i64, quantity: f64) -> Self {
        Self { time, quantity }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesMode {
    /// entry[t] = sum of quantities at exactly t.
    PerStep,
    /// entry[t] = sum of quantities at any time <= t.
    Cumulative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitConversion {
    None,
    /// Scale every entry by 0.001 (engine reports kilograms, plots want tons).
    KgToTons,
}

impl UnitConversion {
    fn factor(self) -> f64 {
        match self {
            UnitConversion::None => 1.0,
            UnitConversion::KgToTons => 1.0 / KG_PER_TON,
        }
    }
}

/// Build a series of length `duration` from raw rows.
///
/// Rows whose time falls outside [0, duration) are ignored. Missing
/// timesteps contribute 0 in per-step mode and carry the running total
/// forward in cumulative mode.
///
/// An empty input yields an empty series, not a zero-filled one of length
/// `duration`. Callers that need the fixed-length axis must check for
/// absent data first; see `tests/timeseries.rs` for the regression pinning
/// this down.
pub fn timeseries(
    entries: &[FlowEntry],
    duration: Timestep,
    mode: SeriesMode,
    conversion: UnitConversion,
) -> Vec<f64> {
    if entries.is_empty() {
        return Vec::new();
    }

    let factor = conversion.factor();
    let mut series = vec![0.0; duration as usize];
    for e in entries {
        if e.time >= 0 && (e.time as u64) < duration {
            series[e.time as usize] += e.quantity * factor;
        }
    }

    if mode == SeriesMode::Cumulative {
        let mut total = 0.0;
        for v in series.iter_mut() {
            total += *v;
            *v = total;
        }
    }
    series
}

/// The timestep axis 0..duration-1.
pub fn timestep_axis(duration: Timestep) -> Vec<Timestep> {
    (0..duration).collect()
}

/// Calendar date of each timestep, given the simulation's start year/month.
/// One timestep advances the calendar by one month.
pub fn calendar_axis(initial_year: i32, initial_month: u32, duration: Timestep) -> Vec<NaiveDate> {
    (0..duration)
        .filter_map(|t| {
            let months = initial_month.saturating_sub(1) as u64 + t;
            let year = initial_year + (months / 12) as i32;
            let month = (months % 12) as u32 + 1;
            NaiveDate::from_ymd_opt(year, month, 1)
        })
        .collect()
}
