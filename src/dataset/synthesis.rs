//! Synthetic dataset generation for first runs and tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Dirichlet, Distribution};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::Dataset;
use crate::domain::{EnergyRecord, Region};

/// Equal concentration over the five production sources, so the sampled
/// mixes are uniform over the simplex.
const MIX_ALPHA: [f64; 5] = [1.0, 1.0, 1.0, 1.0, 1.0];

/// Coverage and sampling controls for the synthetic dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisConfig {
    pub start_year: i32,
    /// Inclusive.
    pub end_year: i32,
    /// Fixed seed for reproducible datasets; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            start_year: 2010,
            end_year: 2023,
            seed: None,
        }
    }
}

/// Generate one record per (region, year) over the configured coverage.
///
/// Every record keeps the mix-sum invariant: the five production fields
/// are a Dirichlet split of the sampled `total_energy`, so they add up
/// to it exactly (modulo float rounding).
pub fn synthesize(config: &SynthesisConfig) -> Dataset {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mix = Dirichlet::new(&MIX_ALPHA).expect("uniform concentration is a valid alpha");

    let years_per_region = (config.end_year - config.start_year + 1).max(0) as usize;
    let mut records = Vec::with_capacity(Region::ALL.len() * years_per_region);

    for region in Region::ALL {
        for year in config.start_year..=config.end_year {
            let total_energy = rng.gen_range(1000.0..5000.0);
            let shares = mix.sample(&mut rng);
            records.push(EnergyRecord {
                region,
                year,
                total_energy,
                population: rng.gen_range(1_000_000.0..50_000_000.0),
                gdp_growth: rng.gen_range(-2.0..8.0),
                solar_potential: rng.gen_range(50.0..95.0),
                wind_potential: rng.gen_range(30.0..90.0),
                hydro_potential: rng.gen_range(40.0..85.0),
                energy_hydro: shares[0] * total_energy,
                energy_thermal: shares[1] * total_energy,
                energy_wind: shares[2] * total_energy,
                energy_solar: shares[3] * total_energy,
                energy_nuclear: shares[4] * total_energy,
            });
        }
    }

    info!(
        rows = records.len(),
        start_year = config.start_year,
        end_year = config.end_year,
        seeded = config.seed.is_some(),
        "synthesized energy dataset"
    );
    Dataset::new(records)
}
