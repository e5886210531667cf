//! Horizon forecasting of the renewable production mix.

use serde::{Deserialize, Serialize};

use crate::domain::RegionCovariates;
use crate::ml::{PredictError, TransitionModel};

/// Predicted renewable production for one future year, clamped to
/// physical bounds. Wire keys keep the historical spellings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransitionForecast {
    pub year: i32,
    pub solar: f64,
    #[serde(rename = "eolica")]
    pub wind: f64,
    #[serde(rename = "hidreletrica")]
    pub hydro: f64,
    /// Sum of the clamped components above.
    pub total_estimated: f64,
}

impl TransitionForecast {
    /// Build one forecast from raw model outputs ordered
    /// [solar, wind, hydro]. Regression can extrapolate below zero;
    /// production cannot, so components clamp at 0 and the total is the
    /// sum of the clamped values.
    pub(crate) fn from_raw(year: i32, raw: [f64; 3]) -> Self {
        let solar = raw[0].max(0.0);
        let wind = raw[1].max(0.0);
        let hydro = raw[2].max(0.0);
        Self {
            year,
            solar,
            wind,
            hydro,
            total_estimated: solar + wind + hydro,
        }
    }
}

/// Forecast the renewable mix for each requested year, preserving the
/// order of `years`. An empty request yields an empty forecast.
pub fn predict_transition(
    model: &TransitionModel,
    covariates: &RegionCovariates,
    years: &[i32],
) -> Result<Vec<TransitionForecast>, PredictError> {
    let mut forecasts = Vec::with_capacity(years.len());
    for &year in years {
        let raw = model.predict_raw(year, covariates)?;
        forecasts.push(TransitionForecast::from_raw(year, raw));
    }
    Ok(forecasts)
}
