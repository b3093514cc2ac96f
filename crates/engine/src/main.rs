//! Benchmark driver binary.
//!
//! Seeds the store, dispatches the program sequence, and verifies the
//! final table contents when the loader supplies reference snapshots.
//! Scale comes from `TEMPO_WAREHOUSES` and `TEMPO_PROGRAMS` (defaults 2
//! and 100).

use std::time::Instant;

use tempo_engine::schema::{Config, Db};
use tempo_engine::verify::verify;
use tempo_engine::workload::{run_workload, Loader, SeedLoader};
use tracing::info;

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default)
}

fn main() -> tempo_engine::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config {
        warehouses: env_or("TEMPO_WAREHOUSES", 2),
        programs: env_or("TEMPO_PROGRAMS", 100),
    };
    info!(
        warehouses = config.warehouses,
        programs = config.programs,
        "starting benchmark run"
    );

    let mut db = Db::new(&config);
    let mut loader = SeedLoader::new(&config);

    let started = Instant::now();
    loader.load(&mut db)?;
    info!(elapsed_ms = started.elapsed().as_millis() as u64, "tables loaded");

    let programs = loader.programs()?;
    let started = Instant::now();
    let stats = run_workload(&mut db, &programs)?;
    info!(
        executed = stats.executed,
        rolled_back = stats.rolled_back,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "workload complete"
    );

    if let Some(reference) = loader.reference()? {
        verify(&db, &reference);
    }

    Ok(())
}
