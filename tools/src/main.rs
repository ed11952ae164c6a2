//! sweep-runner: headless parameter-sweep driver for the fuel-cycle harness.
//!
//! Usage:
//!   sweep-runner --config sweep.json
//!   sweep-runner --config sweep.json --out-dir results
//!
//! For each scenario: render the input template, run the engine (checked),
//! open the result store, read end-of-horizon stockpile metrics, then emit
//! metrics.csv and sensitivity.csv across all scenarios.

use anyhow::{Context, Result};
use fuelcycle_core::{
    config::{ScenarioConfig, SweepConfig},
    engine::EngineCommand,
    render::render_template,
    sensitivity::{sensitivity_table, MetricTable},
    stockpile::stockpile_series,
    store::ResultStore,
    timeseries::{SeriesMode, UnitConversion},
};
use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let config_path = arg_value(&args, "--config").unwrap_or_else(|| "sweep.json".to_string());
    let out_dir = arg_value(&args, "--out-dir");

    let config = SweepConfig::load(&config_path)?;
    let work_dir = PathBuf::from(out_dir.as_deref().unwrap_or(&config.work_dir));
    fs::create_dir_all(&work_dir)
        .with_context(|| format!("Cannot create work dir {}", work_dir.display()))?;

    println!("fuel-cycle sweep-runner");
    println!("  config:     {config_path}");
    println!("  engine:     {}", config.engine_path);
    println!("  scenarios:  {}", config.scenarios.len());
    println!("  base case:  {}", config.base_case);
    println!();

    let metric_names: Vec<&str> = config.archetypes.iter().map(String::as_str).collect();
    let mut metrics = MetricTable::new(&metric_names);

    for scenario in &config.scenarios {
        let values = run_scenario(&config, scenario, &work_dir)
            .with_context(|| format!("Scenario '{}' failed", scenario.id))?;
        metrics.push_row(&scenario.id, values)?;
    }

    let sensitivity = sensitivity_table(&metrics, &config.base_case)?;

    write_csv(&metrics, &work_dir.join("metrics.csv"))?;
    write_csv(&sensitivity, &work_dir.join("sensitivity.csv"))?;

    print_summary(&sensitivity, &config.base_case);
    Ok(())
}

/// Render, run, aggregate one scenario. Returns the end-of-horizon stockpile
/// (in tons) for each configured archetype, in config order.
fn run_scenario(config: &SweepConfig, scenario: &ScenarioConfig, work_dir: &Path) -> Result<Vec<f64>> {
    log::info!("scenario {} starting", scenario.id);

    let input_path = work_dir.join(format!("{}.xml", scenario.id));
    let store_path = work_dir.join(format!("{}.sqlite", scenario.id));

    render_template(Path::new(&config.template_path), &scenario.params, &input_path)?;

    // Engines append to an existing store; each scenario starts clean.
    if store_path.exists() {
        fs::remove_file(&store_path)?;
    }
    EngineCommand::new(Path::new(&config.engine_path), &input_path, &store_path).run()?;

    let store = ResultStore::open(store_path.to_str().context("non-UTF-8 store path")?)?;
    let meta = store.metadata()?;
    log::info!(
        "scenario {}: {} timesteps starting {}-{:02}",
        scenario.id,
        meta.duration,
        meta.initial_year,
        meta.initial_month
    );

    let mut values = Vec::with_capacity(config.archetypes.len());
    for archetype in &config.archetypes {
        let series = stockpile_series(
            &store,
            archetype,
            meta.duration,
            SeriesMode::Cumulative,
            UnitConversion::KgToTons,
        )?;
        let end_value = series
            .get(archetype)
            .and_then(|s| s.last().copied())
            .unwrap_or(0.0);
        values.push(end_value);
    }
    Ok(values)
}

fn write_csv(table: &MetricTable, path: &Path) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("Cannot create {}", path.display()))?;

    write!(file, "scenario")?;
    for metric in table.metrics() {
        write!(file, ",{metric}")?;
    }
    writeln!(file)?;

    for (scenario, values) in table.rows() {
        write!(file, "{scenario}")?;
        for v in values {
            if v.is_nan() {
                write!(file, ",")?;
            } else {
                write!(file, ",{v}")?;
            }
        }
        writeln!(file)?;
    }
    log::info!("wrote {}", path.display());
    Ok(())
}

fn print_summary(sensitivity: &MetricTable, base_case: &str) {
    println!("=== SENSITIVITY vs {base_case} (% deviation) ===");
    for (scenario, values) in sensitivity.rows() {
        let cells: Vec<String> = values
            .iter()
            .map(|v| {
                if v.is_nan() {
                    "undef".to_string()
                } else {
                    format!("{v:+.2}%")
                }
            })
            .collect();
        println!("  {scenario:<12} {}", cells.join("  "));
    }
}

fn arg_value(args: &[String], flag: &str) -> Option<String> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].clone())
}
