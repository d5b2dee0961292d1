//! Builds one demo snapshot and prints it as JSON.
//!
//! Run with:
//! ```
//! cargo run -p demo-data --bin demo-snapshot > snapshot.json
//! ```
//!
//! `DEMO_CONFIG` names an optional JSON config file and `DEMO_SEED` an
//! optional seed for a reproducible snapshot.

use anyhow::Context;
use demo_data::builders::DemoBuilder;
use demo_data::config::DemoConfig;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match std::env::var("DEMO_CONFIG") {
        Ok(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config file {path}"))?;
            DemoConfig::from_json_str(&json)?
        }
        Err(_) => DemoConfig::default(),
    };

    let mut builder = DemoBuilder::new().with_config(config).with_metrics(true);
    if let Ok(seed) = std::env::var("DEMO_SEED") {
        let seed: u64 = seed
            .parse()
            .with_context(|| format!("DEMO_SEED must be an unsigned integer, got {seed:?}"))?;
        builder = builder.with_seed(seed);
    }

    let snapshot = builder.build()?;

    // Summary output
    tracing::info!("Snapshot completed!");
    tracing::info!("  Students: {}", snapshot.students.len());
    tracing::info!("  Parents: {}", snapshot.parents.len());
    tracing::info!("  Teachers: {}", snapshot.teachers.len());
    tracing::info!("  Moments: {}", snapshot.activity_feed.len());
    tracing::info!("  Preschool children: {}", snapshot.preschool.children.len());
    tracing::info!("  Preschool activities: {}", snapshot.preschool.activities.len());
    tracing::info!("  Progress reports: {}", snapshot.preschool.reports.len());

    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
