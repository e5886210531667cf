//! Startup assembly and the two region-facing operations.
//!
//! A [`Planner`] is built once: dataset loaded (or synthesized), both
//! estimators trained. Afterwards it is immutable and every request is
//! answered from it, so lookups and forecasts are repeatable.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::info;

use crate::config::Config;
use crate::dataset::{load_or_generate, Dataset, SnapshotStore};
use crate::domain::{EnergyRecord, HistoricalMix, Region};
use crate::error::PlannerError;
use crate::forecast::{predict_transition, TransitionForecast};
use crate::ml::{train, TrainedModels};
use crate::recommend::{recommend, Recommendation};

/// Immutable request-serving context.
#[derive(Debug)]
pub struct Planner {
    dataset: Dataset,
    models: TrainedModels,
    horizon_years: u32,
}

impl Planner {
    /// Full bootstrap: snapshot (or synthesis) plus model training.
    pub fn new(config: &Config) -> Result<Self, PlannerError> {
        let store = SnapshotStore::new(&config.data.snapshot_path);
        let dataset = load_or_generate(&store, &config.data.synthesis)?;
        Self::with_dataset(dataset, config)
    }

    /// Train on an already materialized dataset, skipping snapshot IO.
    pub fn with_dataset(dataset: Dataset, config: &Config) -> Result<Self, PlannerError> {
        let models = train(&dataset, &config.training)?;
        info!(
            rows = dataset.len(),
            max_year = dataset.max_year(),
            horizon_years = config.forecast.horizon_years,
            "planner ready"
        );
        Ok(Self {
            dataset,
            models,
            horizon_years: config.forecast.horizon_years,
        })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn models(&self) -> &TrainedModels {
        &self.models
    }

    /// Resolve a region name to its most recent record. Unknown names
    /// and known regions without records both map to `RegionNotFound`,
    /// mirroring a by-name dataset lookup.
    fn lookup(&self, region_name: &str) -> Result<(Region, &EnergyRecord), PlannerError> {
        let not_found = || PlannerError::RegionNotFound(region_name.to_string());
        let region = Region::from_str(region_name).map_err(|_| not_found())?;
        let latest = self.dataset.latest_record(region).ok_or_else(not_found)?;
        Ok((region, latest))
    }

    /// Full outlook for one region: its latest record, the aggregated
    /// history, forecasts over the configured horizon and the
    /// recommendations derived from them.
    pub fn region_view(&self, region_name: &str) -> Result<RegionView, PlannerError> {
        let (region, latest) = self.lookup(region_name)?;
        let historical = self.dataset.history(region);
        let years = self.forecast_years();
        let predictions =
            predict_transition(&self.models.transition, &latest.covariates(), &years)?;
        let recommendations = recommend(latest, &predictions);
        Ok(RegionView {
            current: latest.clone(),
            historical,
            predictions,
            recommendations,
        })
    }

    /// Renewable production estimate for one target year, reported under
    /// the legacy field names.
    pub fn predict_for(
        &self,
        region_name: &str,
        target_year: i32,
    ) -> Result<RenewableForecast, PlannerError> {
        let (_, latest) = self.lookup(region_name)?;
        let raw = self
            .models
            .transition
            .predict_raw(target_year, &latest.covariates())?;
        Ok(RenewableForecast::from(TransitionForecast::from_raw(
            target_year,
            raw,
        )))
    }

    /// Consecutive years following the dataset's max year.
    fn forecast_years(&self) -> Vec<i32> {
        let max_year = match self.dataset.max_year() {
            Some(year) => year,
            None => return Vec::new(),
        };
        (1..=self.horizon_years as i32)
            .map(|offset| max_year + offset)
            .collect()
    }
}

/// Composite payload for one region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionView {
    #[serde(rename = "current_data")]
    pub current: EnergyRecord,
    pub historical: Vec<HistoricalMix>,
    pub predictions: Vec<TransitionForecast>,
    pub recommendations: Vec<Recommendation>,
}

/// Single-year estimate under the legacy key names. The values are
/// predicted production levels, not potential scores; the names are kept
/// for wire compatibility.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenewableForecast {
    pub solar_potential: f64,
    pub wind_potential: f64,
    pub hydro_potential: f64,
    /// Sum of the three clamped components.
    pub total_renewable: f64,
}

impl From<TransitionForecast> for RenewableForecast {
    fn from(forecast: TransitionForecast) -> Self {
        Self {
            solar_potential: forecast.solar,
            wind_potential: forecast.wind,
            hydro_potential: forecast.hydro,
            total_renewable: forecast.total_estimated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{synthesize, SynthesisConfig};
    use crate::recommend::RecommendationKind;

    fn config() -> Config {
        let mut config = Config::default();
        config.data.synthesis.seed = Some(17);
        config.training.n_trees = 20;
        config
    }

    fn planner() -> Planner {
        let dataset = synthesize(&SynthesisConfig {
            seed: Some(17),
            ..SynthesisConfig::default()
        });
        Planner::with_dataset(dataset, &config()).unwrap()
    }

    #[test]
    fn test_region_view_shape() {
        let planner = planner();
        let view = planner.region_view("Nordeste").unwrap();

        assert_eq!(view.current.region, Region::Nordeste);
        assert_eq!(view.current.year, 2023);
        assert_eq!(view.historical.len(), 14);
        assert_eq!(view.historical.first().unwrap().year, 2010);
        assert_eq!(view.historical.last().unwrap().year, 2023);

        let years: Vec<i32> = view.predictions.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![2024, 2025, 2026, 2027, 2028]);
        for prediction in &view.predictions {
            assert!(prediction.solar >= 0.0);
            assert!(prediction.wind >= 0.0);
            assert!(prediction.hydro >= 0.0);
            assert!(
                (prediction.total_estimated
                    - (prediction.solar + prediction.wind + prediction.hydro))
                    .abs()
                    < 1e-9
            );
        }
        assert!(view.recommendations.len() <= 3);
    }

    #[test]
    fn test_unknown_region_is_not_found() {
        let planner = planner();
        let err = planner.region_view("Atlântida").unwrap_err();
        assert!(matches!(err, PlannerError::RegionNotFound(name) if name == "Atlântida"));

        let err = planner.predict_for("atlantida", 2030).unwrap_err();
        assert!(matches!(err, PlannerError::RegionNotFound(_)));
    }

    #[test]
    fn test_known_region_without_records_is_not_found() {
        let dataset = synthesize(&SynthesisConfig {
            seed: Some(17),
            ..SynthesisConfig::default()
        });
        let only_norte =
            Dataset::new(dataset.region_records(Region::Norte).cloned().collect());
        let planner = Planner::with_dataset(only_norte, &config()).unwrap();

        assert!(planner.region_view("Norte").is_ok());
        let err = planner.region_view("Sul").unwrap_err();
        assert!(matches!(err, PlannerError::RegionNotFound(name) if name == "Sul"));
    }

    #[test]
    fn test_predict_for_matches_region_view_forecast() {
        let planner = planner();
        let view = planner.region_view("Sudeste").unwrap();
        let single = planner.predict_for("Sudeste", 2024).unwrap();

        // Same model, same covariates, same year: identical numbers
        // under the legacy names.
        let first = &view.predictions[0];
        assert_eq!(single.solar_potential, first.solar);
        assert_eq!(single.wind_potential, first.wind);
        assert_eq!(single.hydro_potential, first.hydro);
        assert_eq!(single.total_renewable, first.total_estimated);
    }

    #[test]
    fn test_region_view_is_repeatable() {
        let planner = planner();
        let a = planner.region_view("Sul").unwrap();
        let b = planner.region_view("Sul").unwrap();
        assert_eq!(a.predictions, b.predictions);
        assert_eq!(a.recommendations, b.recommendations);
    }

    #[test]
    fn test_zero_horizon_yields_no_predictions() {
        let dataset = synthesize(&SynthesisConfig {
            seed: Some(17),
            ..SynthesisConfig::default()
        });
        let mut config = config();
        config.forecast.horizon_years = 0;
        let planner = Planner::with_dataset(dataset, &config).unwrap();

        let view = planner.region_view("Norte").unwrap();
        assert!(view.predictions.is_empty());
        // Recommendations depend only on the current record.
        assert!(view.recommendations.len() <= 3);
    }

    #[test]
    fn test_empty_dataset_fails_construction() {
        let err = Planner::with_dataset(Dataset::default(), &config()).unwrap_err();
        assert!(matches!(err, PlannerError::Training(_)));
    }

    #[test]
    fn test_view_wire_format() {
        let planner = planner();
        let view = planner.region_view("Centro-Oeste").unwrap();
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["current_data"]["region"], "Centro-Oeste");
        assert!(json["current_data"]["energy_hidrelétrica"].is_number());
        assert!(json["historical"].as_array().unwrap().len() == 14);
        assert!(json["predictions"][0]["eolica"].is_number());
        assert!(json.get("recommendations").is_some());
    }

    #[test]
    fn test_solar_recommendation_follows_rule_inputs() {
        let planner = planner();
        for name in ["Norte", "Nordeste", "Centro-Oeste", "Sudeste", "Sul"] {
            let view = planner.region_view(name).unwrap();
            let current = &view.current;
            let fired = view
                .recommendations
                .iter()
                .any(|r| r.kind == RecommendationKind::Solar);
            let expected = current.energy_solar / current.total_energy < 0.10
                && current.solar_potential > 70.0;
            assert_eq!(fired, expected, "solar rule mismatch for {name}");
        }
    }
}
