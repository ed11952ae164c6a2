//! Shared primitive types used across the harness.

/// A simulation timestep. One timestep = one simulated month.
pub type Timestep = u64;

/// A stable identifier for a simulated agent (facility, institution, region).
pub type AgentId = String;

/// The identifier of one parameterized scenario in a sweep.
pub type ScenarioId = String;
