//! fuelcycle-core: output aggregation for a fuel-cycle parameter study.
//!
//! The simulation engine is external; it leaves behind one SQLite result
//! store per scenario. This crate reads those stores (schema reader +
//! query builder), folds transaction and inventory rows into fixed-length
//! timeseries, and turns per-scenario metrics into sensitivity tables.
//! It also carries the two orchestration collaborators the sweep needs:
//! template rendering and checked engine invocation.

pub mod config;
pub mod engine;
pub mod error;
pub mod query;
pub mod render;
pub mod sensitivity;
pub mod stockpile;
pub mod store;
pub mod timeseries;
pub mod types;
