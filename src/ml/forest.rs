//! Thin wrappers around smartcore's random forest regressor.

use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;

use super::{ModelMetadata, PredictError, TrainingError, ValidationMetrics};

/// Hyperparameters for one forest fit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_trees: usize,
    /// `None` grows trees until the leaves are pure.
    pub max_depth: Option<u16>,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: None,
            seed: 42,
        }
    }
}

impl ForestParams {
    /// Sibling forests in a multi-target bundle train on distinct but
    /// deterministic seeds.
    pub fn with_seed_offset(self, offset: u64) -> Self {
        Self {
            seed: self.seed.wrapping_add(offset),
            ..self
        }
    }

    fn to_smartcore(self) -> RandomForestRegressorParameters {
        RandomForestRegressorParameters {
            max_depth: self.max_depth,
            min_samples_leaf: 1,
            min_samples_split: 2,
            n_trees: self.n_trees,
            m: None, // sqrt(n_features)
            keep_samples: false,
            seed: self.seed,
        }
    }
}

/// A trained single-target forest plus its fit metadata.
#[derive(Debug)]
pub struct RandomForest {
    model: RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>,
    metadata: ModelMetadata,
}

impl RandomForest {
    /// Fit one forest over fixed-order feature rows.
    pub fn fit(
        features: &[Vec<f64>],
        targets: &[f64],
        params: ForestParams,
        feature_names: &[&str],
        target_column: &str,
    ) -> Result<Self, TrainingError> {
        if features.is_empty() || targets.is_empty() {
            return Err(TrainingError::EmptyDataset);
        }
        if features.len() != targets.len() {
            return Err(TrainingError::SampleMismatch {
                rows: features.len(),
                targets: targets.len(),
            });
        }

        let n_samples = features.len();
        let n_features = features[0].len();
        let mut flat = Vec::with_capacity(n_samples * n_features);
        for row in features {
            if row.len() != n_features {
                return Err(TrainingError::RaggedFeatures {
                    expected: n_features,
                });
            }
            flat.extend_from_slice(row);
        }

        let x = DenseMatrix::new(n_samples, n_features, flat, false);
        let y = targets.to_vec();
        let model = RandomForestRegressor::fit(&x, &y, params.to_smartcore()).map_err(|e| {
            TrainingError::Fit {
                target_column: target_column.to_string(),
                reason: format!("{e:?}"),
            }
        })?;

        let metadata = ModelMetadata {
            model_id: format!("rf_{}", uuid::Uuid::new_v4()),
            trained_at: chrono::Utc::now(),
            training_samples: n_samples,
            feature_names: feature_names.iter().map(|s| s.to_string()).collect(),
            target_column: target_column.to_string(),
            holdout_metrics: None,
        };

        Ok(Self { model, metadata })
    }

    /// Attach holdout metrics computed by the trainer.
    pub(crate) fn with_holdout_metrics(mut self, metrics: Option<ValidationMetrics>) -> Self {
        self.metadata.holdout_metrics = metrics;
        self
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// Predict a single value from one feature row.
    pub fn predict_row(&self, features: &[f64]) -> Result<f64, PredictError> {
        let predictions = self.predict_batch(&[features.to_vec()])?;
        predictions.first().copied().ok_or_else(|| PredictError {
            target_column: self.metadata.target_column.clone(),
            reason: "model returned no predictions".to_string(),
        })
    }

    /// Predict one value per feature row.
    pub fn predict_batch(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, PredictError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let predict_err = |reason: String| PredictError {
            target_column: self.metadata.target_column.clone(),
            reason,
        };

        let n_features = rows[0].len();
        let mut flat = Vec::with_capacity(rows.len() * n_features);
        for row in rows {
            if row.len() != n_features {
                return Err(predict_err(format!(
                    "expected {} features per row, got {}",
                    n_features,
                    row.len()
                )));
            }
            flat.extend_from_slice(row);
        }

        let x = DenseMatrix::new(rows.len(), n_features, flat, false);
        self.model
            .predict(&x)
            .map_err(|e| predict_err(format!("{e:?}")))
    }
}

/// Fixed-order bundle of forests acting as one multi-output regressor.
/// Output `i` always comes from the forest trained on target `i`.
#[derive(Debug)]
pub struct MultiTargetForest {
    forests: Vec<RandomForest>,
}

impl MultiTargetForest {
    pub fn new(forests: Vec<RandomForest>) -> Self {
        Self { forests }
    }

    pub fn outputs(&self) -> usize {
        self.forests.len()
    }

    pub fn forests(&self) -> &[RandomForest] {
        &self.forests
    }

    /// One prediction per target, in bundle order.
    pub fn predict_row(&self, features: &[f64]) -> Result<Vec<f64>, PredictError> {
        self.forests
            .iter()
            .map(|forest| forest.predict_row(features))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // y = 2*x1 + 3*x2
    fn linear_training_data() -> (Vec<Vec<f64>>, Vec<f64>) {
        let x = vec![
            vec![1.0, 1.0],
            vec![2.0, 1.0],
            vec![1.0, 2.0],
            vec![2.0, 2.0],
            vec![3.0, 3.0],
            vec![4.0, 2.0],
            vec![2.0, 4.0],
            vec![3.0, 1.0],
            vec![1.0, 3.0],
            vec![4.0, 4.0],
        ];
        let y = vec![5.0, 7.0, 8.0, 10.0, 15.0, 14.0, 14.0, 9.0, 11.0, 20.0];
        (x, y)
    }

    fn params() -> ForestParams {
        ForestParams {
            n_trees: 10,
            max_depth: Some(5),
            seed: 42,
        }
    }

    #[test]
    fn test_fit_and_predict_in_range() {
        let (x, y) = linear_training_data();
        let forest = RandomForest::fit(&x, &y, params(), &["x1", "x2"], "y").unwrap();

        assert_eq!(forest.metadata().training_samples, 10);
        assert_eq!(forest.metadata().feature_names, vec!["x1", "x2"]);
        assert_eq!(forest.metadata().target_column, "y");

        // Interior point: y = 2*2 + 3*3 = 13.
        let pred = forest.predict_row(&[2.0, 3.0]).unwrap();
        assert!(pred > 5.0 && pred < 20.0, "prediction {pred} out of range");
    }

    #[test]
    fn test_fit_rejects_empty_dataset() {
        let err = RandomForest::fit(&[], &[], params(), &["x1"], "y").unwrap_err();
        assert!(matches!(err, TrainingError::EmptyDataset));
    }

    #[test]
    fn test_fit_rejects_count_mismatch() {
        let err = RandomForest::fit(
            &[vec![1.0], vec![2.0]],
            &[1.0],
            params(),
            &["x1"],
            "y",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TrainingError::SampleMismatch {
                rows: 2,
                targets: 1
            }
        ));
    }

    #[test]
    fn test_fit_rejects_ragged_rows() {
        let err = RandomForest::fit(
            &[vec![1.0, 2.0], vec![3.0]],
            &[1.0, 2.0],
            params(),
            &["x1", "x2"],
            "y",
        )
        .unwrap_err();
        assert!(matches!(err, TrainingError::RaggedFeatures { expected: 2 }));
    }

    #[test]
    fn test_fit_and_predict_on_minimal_shapes() {
        // One row, one feature: the smallest matrices both the fit and
        // predict paths ever assemble. A single constant target makes
        // every tree a root leaf, so predictions are exact.
        let forest = RandomForest::fit(&[vec![1.0]], &[7.0], params(), &["x1"], "y").unwrap();
        assert_eq!(forest.predict_row(&[1.0]).unwrap(), 7.0);
        assert_eq!(forest.predict_row(&[123.0]).unwrap(), 7.0);
        assert_eq!(
            forest.predict_batch(&[vec![1.0], vec![2.0]]).unwrap(),
            vec![7.0, 7.0]
        );
    }

    #[test]
    fn test_seeded_fit_is_deterministic() {
        let (x, y) = linear_training_data();
        let a = RandomForest::fit(&x, &y, params(), &["x1", "x2"], "y").unwrap();
        let b = RandomForest::fit(&x, &y, params(), &["x1", "x2"], "y").unwrap();
        let row = [2.5, 1.5];
        assert_eq!(a.predict_row(&row).unwrap(), b.predict_row(&row).unwrap());
    }

    #[test]
    fn test_predict_batch_matches_single_rows() {
        let (x, y) = linear_training_data();
        let forest = RandomForest::fit(&x, &y, params(), &["x1", "x2"], "y").unwrap();
        let rows = vec![vec![1.0, 1.0], vec![3.0, 2.0]];
        let batch = forest.predict_batch(&rows).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0], forest.predict_row(&rows[0]).unwrap());
        assert_eq!(batch[1], forest.predict_row(&rows[1]).unwrap());
    }

    #[test]
    fn test_multi_target_bundle_preserves_order() {
        let (x, y) = linear_training_data();
        // Second target is the negation, so the two outputs diverge.
        let neg: Vec<f64> = y.iter().map(|v| -v).collect();

        let first = RandomForest::fit(&x, &y, params(), &["x1", "x2"], "a").unwrap();
        let second =
            RandomForest::fit(&x, &neg, params().with_seed_offset(1), &["x1", "x2"], "b").unwrap();
        let bundle = MultiTargetForest::new(vec![first, second]);

        assert_eq!(bundle.outputs(), 2);
        let out = bundle.predict_row(&[2.0, 2.0]).unwrap();
        assert_eq!(out.len(), 2);
        assert!(out[0] > 0.0);
        assert!(out[1] < 0.0);
        assert_eq!(bundle.forests()[0].metadata().target_column, "a");
        assert_eq!(bundle.forests()[1].metadata().target_column, "b");
    }
}
