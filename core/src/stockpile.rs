//! Per-archetype stockpile timeseries, assembled from inventory snapshots.

use crate::{
    error::SweepResult,
    query::{FlowQuery, FlowRelation},
    store::ResultStore,
    timeseries::{timeseries, FlowEntry, SeriesMode, UnitConversion},
    types::Timestep,
};
use std::collections::HashMap;

/// Build the stockpile series for every facility of the given archetype.
///
/// Looks up all agent ids whose prototype/spec label matches `archetype`,
/// selects their inventory snapshots (keyed by resource creation time), and
/// folds the rows into one series. The result maps the requested label to
/// its series.
///
/// When no agent matches, the empty id set propagates as `EmptyIdSet` from
/// the query builder — a sweep asking for an archetype the scenario never
/// deployed is caller error, not an empty series.
pub fn stockpile_series(
    store: &ResultStore,
    archetype: &str,
    duration: Timestep,
    mode: SeriesMode,
    conversion: UnitConversion,
) -> SweepResult<HashMap<String, Vec<f64>>> {
    let ids = store.agents_matching(archetype)?;
    log::debug!("archetype '{archetype}' matched {} agent(s)", ids.len());

    let query = FlowQuery::new(FlowRelation::Inventories, "inventories.agentid", ids)?.columns(&[
        "resources.timecreated",
        "resources.quantity",
        "resources.qualid",
    ]);

    let rows = store.inventory_rows(&query)?;
    let entries: Vec<FlowEntry> = rows
        .iter()
        .map(|r| FlowEntry::new(r.time, r.quantity))
        .collect();

    let series = timeseries(&entries, duration, mode, conversion);
    Ok(HashMap::from([(archetype.to_string(), series)]))
}
