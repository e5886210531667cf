//! Fixed feature and target layouts for the two estimators.
//!
//! Column selection lives here instead of being spread through training
//! and inference as string lookups. The arrays are ordered; every matrix
//! row handed to smartcore is built through these functions.

use crate::domain::{EnergyRecord, RegionCovariates};

/// Layout for the solar production estimator.
pub struct SolarSchema;

impl SolarSchema {
    pub const PREDICTORS: [&'static str; 4] =
        ["year", "population", "gdp_growth", "solar_potential"];
    pub const TARGET: &'static str = "energy_solar";

    pub fn predictors(record: &EnergyRecord) -> [f64; 4] {
        Self::predictors_for(record.year, &record.covariates())
    }

    /// Inference-side row: the requested year substituted into the
    /// region's latest covariates.
    pub fn predictors_for(year: i32, covariates: &RegionCovariates) -> [f64; 4] {
        [
            year as f64,
            covariates.population,
            covariates.gdp_growth,
            covariates.solar_potential,
        ]
    }

    pub fn target(record: &EnergyRecord) -> f64 {
        record.energy_solar
    }
}

/// Layout for the multi-target transition estimator. The target order
/// (solar, wind, hydro) is part of the model contract; forecast payloads
/// are built from outputs by position.
pub struct TransitionSchema;

impl TransitionSchema {
    pub const PREDICTORS: [&'static str; 6] = [
        "year",
        "population",
        "gdp_growth",
        "solar_potential",
        "wind_potential",
        "hydro_potential",
    ];
    pub const TARGETS: [&'static str; 3] =
        ["energy_solar", "energy_eólica", "energy_hidrelétrica"];

    pub fn predictors(record: &EnergyRecord) -> [f64; 6] {
        Self::predictors_for(record.year, &record.covariates())
    }

    pub fn predictors_for(year: i32, covariates: &RegionCovariates) -> [f64; 6] {
        [
            year as f64,
            covariates.population,
            covariates.gdp_growth,
            covariates.solar_potential,
            covariates.wind_potential,
            covariates.hydro_potential,
        ]
    }

    /// Targets in model output order.
    pub fn targets(record: &EnergyRecord) -> [f64; 3] {
        [record.energy_solar, record.energy_wind, record.energy_hydro]
    }
}
