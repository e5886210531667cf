use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::dataset::SynthesisConfig;
use crate::ml::TrainingParams;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    pub training: TrainingParams,
    pub forecast: ForecastConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// CSV snapshot location; synthesized and written here when absent.
    pub snapshot_path: PathBuf,
    pub synthesis: SynthesisConfig,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from("data/energy_data.csv"),
            synthesis: SynthesisConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Number of consecutive years forecast after the dataset's max year.
    pub horizon_years: u32,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self { horizon_years: 5 }
    }
}

impl Config {
    /// Defaults, overridden by `config/default.toml`, overridden by
    /// `ETP__`-prefixed environment variables (e.g.
    /// `ETP__TRAINING__N_TREES=200`).
    pub fn load() -> Result<Self> {
        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file("config/default.toml"))
            .merge(Env::prefixed("ETP__").split("__"));
        Ok(figment.extract()?)
    }
}
