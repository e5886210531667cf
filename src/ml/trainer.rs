//! Startup training: one seeded shuffle split, two fitted estimators.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::dataset::Dataset;
use crate::domain::EnergyRecord;

use super::forest::{ForestParams, MultiTargetForest, RandomForest};
use super::models::{SolarModel, TransitionModel};
use super::schema::{SolarSchema, TransitionSchema};
use super::{TrainingError, ValidationMetrics};

/// Trainer controls. The defaults reproduce the historical model setup:
/// 100 trees, seed 42, 20% holdout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingParams {
    pub n_trees: usize,
    pub max_depth: Option<u16>,
    pub seed: u64,
    /// Fraction of rows reserved for holdout metrics, rounded up but
    /// never starving the training slice.
    pub holdout_ratio: f64,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: None,
            seed: 42,
            holdout_ratio: 0.2,
        }
    }
}

/// Both estimators, fit once at startup.
#[derive(Debug)]
pub struct TrainedModels {
    pub solar: SolarModel,
    pub transition: TransitionModel,
}

/// Fit the solar and transition estimators from the full dataset.
///
/// Both models train on the same shuffled row split. The transition
/// estimator is a bundle of one forest per target, seeded seed, seed+1,
/// seed+2 so sibling forests draw distinct bootstrap samples.
pub fn train(dataset: &Dataset, params: &TrainingParams) -> Result<TrainedModels, TrainingError> {
    if dataset.is_empty() {
        return Err(TrainingError::EmptyDataset);
    }

    let records = dataset.records();
    let (train_idx, holdout_idx) = shuffled_split(records.len(), params.holdout_ratio, params.seed);
    info!(
        train_rows = train_idx.len(),
        holdout_rows = holdout_idx.len(),
        n_trees = params.n_trees,
        seed = params.seed,
        "training energy estimators"
    );

    let forest_params = ForestParams {
        n_trees: params.n_trees,
        max_depth: params.max_depth,
        seed: params.seed,
    };

    // Solar estimator.
    let x = rows(records, &train_idx, |r| SolarSchema::predictors(r).to_vec());
    let y = column(records, &train_idx, SolarSchema::target);
    let forest = RandomForest::fit(
        &x,
        &y,
        forest_params,
        &SolarSchema::PREDICTORS,
        SolarSchema::TARGET,
    )?;
    let holdout_x = rows(records, &holdout_idx, |r| SolarSchema::predictors(r).to_vec());
    let holdout_y = column(records, &holdout_idx, SolarSchema::target);
    let solar = SolarModel::new(attach_metrics(forest, &holdout_x, &holdout_y));

    // Transition estimator: one forest per target, in output order.
    let x = rows(records, &train_idx, |r| {
        TransitionSchema::predictors(r).to_vec()
    });
    let holdout_x = rows(records, &holdout_idx, |r| {
        TransitionSchema::predictors(r).to_vec()
    });
    let mut forests = Vec::with_capacity(TransitionSchema::TARGETS.len());
    for (offset, target_column) in TransitionSchema::TARGETS.into_iter().enumerate() {
        let y = column(records, &train_idx, |r| {
            TransitionSchema::targets(r)[offset]
        });
        let forest = RandomForest::fit(
            &x,
            &y,
            forest_params.with_seed_offset(offset as u64),
            &TransitionSchema::PREDICTORS,
            target_column,
        )?;
        let holdout_y = column(records, &holdout_idx, |r| {
            TransitionSchema::targets(r)[offset]
        });
        forests.push(attach_metrics(forest, &holdout_x, &holdout_y));
    }
    let transition = TransitionModel::new(MultiTargetForest::new(forests));

    Ok(TrainedModels { solar, transition })
}

/// Deterministic shuffled split of `0..n` into (train, holdout) index
/// sets. The holdout size rounds up but leaves at least one training row.
fn shuffled_split(n: usize, holdout_ratio: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let holdout_len = ((n as f64) * holdout_ratio.clamp(0.0, 1.0)).ceil() as usize;
    let holdout_len = holdout_len.min(n.saturating_sub(1));
    let holdout = indices.split_off(n - holdout_len);
    (indices, holdout)
}

fn rows<F>(records: &[EnergyRecord], indices: &[usize], extract: F) -> Vec<Vec<f64>>
where
    F: Fn(&EnergyRecord) -> Vec<f64>,
{
    indices.iter().map(|&i| extract(&records[i])).collect()
}

fn column<F>(records: &[EnergyRecord], indices: &[usize], extract: F) -> Vec<f64>
where
    F: Fn(&EnergyRecord) -> f64,
{
    indices.iter().map(|&i| extract(&records[i])).collect()
}

/// Score the holdout slice and stash the result in the forest metadata.
/// Metrics are informational only, so scoring failures degrade to a log
/// line instead of failing startup.
fn attach_metrics(forest: RandomForest, holdout_x: &[Vec<f64>], holdout_y: &[f64]) -> RandomForest {
    if holdout_x.is_empty() {
        return forest;
    }
    match forest.predict_batch(holdout_x) {
        Ok(predictions) => {
            let metrics = ValidationMetrics::from_predictions(&predictions, holdout_y);
            if let Some(m) = &metrics {
                debug!(
                    target_column = %forest.metadata().target_column,
                    mae = m.mae,
                    rmse = m.rmse,
                    mape = m.mape,
                    r2 = m.r2,
                    "holdout metrics"
                );
            }
            forest.with_holdout_metrics(metrics)
        }
        Err(err) => {
            warn!(error = %err, "holdout scoring failed");
            forest
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{synthesize, SynthesisConfig};
    use crate::domain::Region;

    fn dataset() -> Dataset {
        synthesize(&SynthesisConfig {
            seed: Some(21),
            ..SynthesisConfig::default()
        })
    }

    fn fast_params() -> TrainingParams {
        TrainingParams {
            n_trees: 20,
            ..TrainingParams::default()
        }
    }

    #[test]
    fn test_split_sizes_and_disjointness() {
        let (train, holdout) = shuffled_split(70, 0.2, 42);
        assert_eq!(train.len(), 56);
        assert_eq!(holdout.len(), 14);

        let mut all: Vec<usize> = train.iter().chain(&holdout).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..70).collect::<Vec<usize>>());
    }

    #[test]
    fn test_split_rounds_up_but_keeps_a_training_row() {
        let (train, holdout) = shuffled_split(10, 0.25, 1);
        assert_eq!(holdout.len(), 3);
        assert_eq!(train.len(), 7);

        let (train, holdout) = shuffled_split(1, 0.2, 1);
        assert_eq!(train.len(), 1);
        assert!(holdout.is_empty());

        let (train, holdout) = shuffled_split(5, 1.0, 1);
        assert_eq!(train.len(), 1);
        assert_eq!(holdout.len(), 4);
    }

    #[test]
    fn test_split_is_seeded() {
        assert_eq!(shuffled_split(50, 0.2, 7), shuffled_split(50, 0.2, 7));
        assert_ne!(shuffled_split(50, 0.2, 7), shuffled_split(50, 0.2, 8));
    }

    #[test]
    fn test_train_rejects_empty_dataset() {
        let err = train(&Dataset::default(), &fast_params()).unwrap_err();
        assert!(matches!(err, TrainingError::EmptyDataset));
    }

    #[test]
    fn test_trained_models_carry_schema_metadata() {
        let models = train(&dataset(), &fast_params()).unwrap();

        let solar_meta = models.solar.metadata();
        assert_eq!(solar_meta.target_column, "energy_solar");
        assert_eq!(
            solar_meta.feature_names,
            vec!["year", "population", "gdp_growth", "solar_potential"]
        );
        assert_eq!(solar_meta.training_samples, 56);
        assert!(solar_meta.holdout_metrics.is_some());

        let targets: Vec<&str> = models
            .transition
            .metadata()
            .iter()
            .map(|m| m.target_column.as_str())
            .collect();
        assert_eq!(
            targets,
            vec!["energy_solar", "energy_eólica", "energy_hidrelétrica"]
        );
    }

    #[test]
    fn test_training_is_deterministic() {
        let data = dataset();
        let a = train(&data, &fast_params()).unwrap();
        let b = train(&data, &fast_params()).unwrap();

        let cov = data.latest_record(Region::Norte).unwrap().covariates();
        assert_eq!(
            a.transition.predict_raw(2025, &cov).unwrap(),
            b.transition.predict_raw(2025, &cov).unwrap()
        );
        assert_eq!(
            a.solar.predict(2025, &cov).unwrap(),
            b.solar.predict(2025, &cov).unwrap()
        );
    }

    #[test]
    fn test_transition_outputs_stay_near_observed_scale() {
        let data = dataset();
        let models = train(&data, &fast_params()).unwrap();
        let cov = data.latest_record(Region::Sudeste).unwrap().covariates();

        let out = models.transition.predict_raw(2024, &cov).unwrap();
        // Forest outputs are averages of observed targets, so they stay
        // within the observed production range.
        for value in out {
            assert!(value >= 0.0);
            assert!(value < 5000.0);
        }
    }
}
