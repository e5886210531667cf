use anyhow::Result;
use energy_transition_planner::{config::Config, planner::Planner, telemetry};
use tracing::info;

fn main() -> Result<()> {
    telemetry::init_tracing();

    let cfg = Config::load()?;
    let planner = Planner::new(&cfg)?;

    // Region name from argv, defaulting to the most populous region.
    let region = std::env::args().nth(1).unwrap_or_else(|| "Sudeste".into());
    info!(%region, "assembling region outlook");

    let view = planner.region_view(&region)?;
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
