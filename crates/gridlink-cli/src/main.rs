//! Lattice build driver
//!
//! Generates a seeded uniform catalog in a cube, grids it, and logs the
//! resulting cell occupancy.
//!
//! Environment:
//! - `GRIDLINK_POINTS` - number of points (default 1000000)
//! - `GRIDLINK_BOX` - cube side length (default 250)
//! - `GRIDLINK_RADIUS` - search radius (default 10)
//! - `GRIDLINK_REFINE` - refine factor on every axis (default 2)
//! - `GRIDLINK_SEED` - catalog seed (default 0)
//! - `GRIDLINK_CONFIG` - optional JSON `LatticeConfig` file

use std::path::PathBuf;
use std::str::FromStr;

use eyre::WrapErr;
use gridlink::{Domain, GridParameters, Lattice, LatticeConfig, Point};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn load_config() -> eyre::Result<LatticeConfig> {
    let Ok(path) = std::env::var("GRIDLINK_CONFIG").map(PathBuf::from) else {
        return Ok(LatticeConfig::default());
    };

    let text = std::fs::read_to_string(&path)
        .wrap_err_with(|| format!("reading {}", path.display()))?;
    let config: LatticeConfig =
        serde_json::from_str(&text).wrap_err_with(|| format!("parsing {}", path.display()))?;

    info!("Loaded config from {}", path.display());
    Ok(config)
}

fn uniform_catalog(n: usize, side: f64, seed: u64) -> Vec<Point<f64>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            Point::new(
                rng.gen_range(0.0..=side),
                rng.gen_range(0.0..=side),
                rng.gen_range(0.0..=side),
            )
        })
        .collect()
}

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gridlink=info".parse()?)
                .add_directive("gridlink_cli=info".parse()?),
        )
        .init();

    let n: usize = env_or("GRIDLINK_POINTS", 1_000_000);
    let side: f64 = env_or("GRIDLINK_BOX", 250.0);
    let radius: f64 = env_or("GRIDLINK_RADIUS", 10.0);
    let refine: u32 = env_or("GRIDLINK_REFINE", 2);
    let seed: u64 = env_or("GRIDLINK_SEED", 0);
    let config = load_config()?;

    info!(n, side, radius, refine, seed, "Generating catalog");
    let points = uniform_catalog(n, side, seed);

    let params = GridParameters::new(Domain::cube(0.0, side), radius).with_refine([refine; 3]);
    let lattice = Lattice::from_points(&points, &params, &config)?;

    let [nx, ny, nz] = lattice.cell_counts();
    let [dx, dy, dz] = lattice.bin_widths();
    let stats = lattice.stats();
    let occupied = lattice.cells().iter().filter(|c| !c.is_empty()).count();
    let min_occupancy = lattice.cells().iter().map(|c| c.len()).min().unwrap_or(0);
    let mean = lattice.len() as f64 / lattice.shape().total() as f64;

    info!("Lattice {nx} x {ny} x {nz}, bin widths ({dx:.3}, {dy:.3}, {dz:.3})");
    info!(
        "Occupancy: {occupied}/{} cells used, min {min_occupancy}, mean {mean:.2}, max {}",
        lattice.shape().total(),
        stats.max_occupancy
    );
    info!(
        "Initial capacity {} per cell, {} regrowths, built in {:.2?}",
        stats.expected_per_cell, stats.regrowths, stats.elapsed
    );

    Ok(())
}
