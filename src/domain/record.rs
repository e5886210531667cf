use serde::{Deserialize, Serialize};

use super::region::Region;

/// Relative tolerance used when checking that the per-source production
/// fields of a record add up to its `total_energy`.
pub const MIX_SUM_TOLERANCE: f64 = 1e-6;

/// One observed year of a region's energy production and covariates.
///
/// Field order matches the snapshot column order. The accented column
/// names are kept on the wire via serde renames; in code the fields use
/// plain ASCII.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnergyRecord {
    pub region: Region,
    pub year: i32,
    /// Total production across every source, including the ones the
    /// transition models do not predict.
    pub total_energy: f64,
    pub population: f64,
    /// Annual GDP growth in percent; may be negative.
    pub gdp_growth: f64,
    /// Solar irradiation potential score, 0-100.
    pub solar_potential: f64,
    pub wind_potential: f64,
    pub hydro_potential: f64,
    #[serde(rename = "energy_hidrelétrica")]
    pub energy_hydro: f64,
    #[serde(rename = "energy_termelétrica")]
    pub energy_thermal: f64,
    #[serde(rename = "energy_eólica")]
    pub energy_wind: f64,
    pub energy_solar: f64,
    pub energy_nuclear: f64,
}

impl EnergyRecord {
    /// Sum of the five per-source production fields.
    pub fn production_sum(&self) -> f64 {
        self.energy_hydro + self.energy_thermal + self.energy_wind + self.energy_solar
            + self.energy_nuclear
    }

    /// Whether the production mix is consistent with `total_energy`
    /// within `MIX_SUM_TOLERANCE` (relative, with a floor of 1.0 so
    /// near-zero totals do not blow up the comparison).
    pub fn mix_is_consistent(&self) -> bool {
        let scale = self.total_energy.abs().max(1.0);
        (self.production_sum() - self.total_energy).abs() <= MIX_SUM_TOLERANCE * scale
    }

    pub fn covariates(&self) -> RegionCovariates {
        RegionCovariates::from(self)
    }
}

/// The slow-moving regional features fed to the estimators, taken from a
/// region's most recent record at inference time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RegionCovariates {
    pub population: f64,
    pub gdp_growth: f64,
    pub solar_potential: f64,
    pub wind_potential: f64,
    pub hydro_potential: f64,
}

impl From<&EnergyRecord> for RegionCovariates {
    fn from(record: &EnergyRecord) -> Self {
        Self {
            population: record.population,
            gdp_growth: record.gdp_growth,
            solar_potential: record.solar_potential,
            wind_potential: record.wind_potential,
            hydro_potential: record.hydro_potential,
        }
    }
}

/// Per-year production totals for a region's historical series.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HistoricalMix {
    pub year: i32,
    #[serde(rename = "energy_hidrelétrica")]
    pub energy_hydro: f64,
    #[serde(rename = "energy_termelétrica")]
    pub energy_thermal: f64,
    #[serde(rename = "energy_eólica")]
    pub energy_wind: f64,
    pub energy_solar: f64,
    pub energy_nuclear: f64,
    pub total_energy: f64,
}
