use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One parameterized run of the engine: an id plus the placeholder values
/// substituted into the input template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub id: String,
    pub params: HashMap<String, String>,
}

/// A whole parameter sweep, loaded from a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Path to the simulation engine binary.
    pub engine_path: String,
    /// Input template with `{{name}}` placeholders.
    pub template_path: String,
    /// Directory for rendered inputs, output stores, and result tables.
    pub work_dir: String,
    /// Scenario id measured against all others in the sensitivity table.
    pub base_case: String,
    /// Facility archetype labels whose stockpiles become metric columns.
    pub archetypes: Vec<String>,
    pub scenarios: Vec<ScenarioConfig>,
}

impl SweepConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: SweepConfig = serde_json::from_str(&content)?;
        if config.scenarios.is_empty() {
            anyhow::bail!("Sweep config {path} lists no scenarios");
        }
        if !config.scenarios.iter().any(|s| s.id == config.base_case) {
            anyhow::bail!(
                "Base case '{}' is not one of the configured scenarios",
                config.base_case
            );
        }
        Ok(config)
    }
}
