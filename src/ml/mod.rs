//! Model training and inference on top of smartcore's random forests.
//!
//! Two estimators are fit once at startup from the full dataset:
//! - a single-target regressor for solar production, and
//! - a fixed-order multi-target regressor for the energy transition
//!   (solar, wind and hydro production per future year).
//!
//! Trained models are immutable; all mutation happens inside training.

pub mod forest;
pub mod models;
pub mod schema;
pub mod trainer;

pub use forest::{ForestParams, MultiTargetForest, RandomForest};
pub use models::{SolarModel, TransitionModel};
pub use trainer::{train, TrainedModels, TrainingParams};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why model training failed. Training runs once at startup and any
/// failure here is fatal for the process.
#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("cannot train on an empty dataset")]
    EmptyDataset,

    #[error("feature and target count mismatch: {rows} rows, {targets} targets")]
    SampleMismatch { rows: usize, targets: usize },

    #[error("feature rows must all have {expected} columns")]
    RaggedFeatures { expected: usize },

    #[error("random forest fit failed for {target_column}: {reason}")]
    Fit {
        target_column: String,
        reason: String,
    },
}

/// A trained model rejected an inference request.
#[derive(Debug, Error)]
#[error("prediction failed for {target_column}: {reason}")]
pub struct PredictError {
    pub target_column: String,
    pub reason: String,
}

/// Descriptive metadata captured when a forest is fit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_id: String,
    pub trained_at: chrono::DateTime<chrono::Utc>,
    pub training_samples: usize,
    pub feature_names: Vec<String>,
    pub target_column: String,
    /// Holdout quality; absent when the split left no holdout rows.
    pub holdout_metrics: Option<ValidationMetrics>,
}

/// Regression quality on the holdout slice. Logged for operators and
/// kept in metadata; never part of a caller-facing payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationMetrics {
    pub mae: f64,  // Mean Absolute Error
    pub rmse: f64, // Root Mean Square Error
    pub mape: f64, // Mean Absolute Percentage Error
    pub r2: f64,   // R-squared
}

impl ValidationMetrics {
    /// Compute holdout metrics; `None` when the slices are empty or of
    /// different lengths.
    pub fn from_predictions(predictions: &[f64], targets: &[f64]) -> Option<Self> {
        if predictions.is_empty() || predictions.len() != targets.len() {
            return None;
        }
        let n = predictions.len() as f64;

        let mae = predictions
            .iter()
            .zip(targets)
            .map(|(p, t)| (p - t).abs())
            .sum::<f64>()
            / n;

        let mse = predictions
            .iter()
            .zip(targets)
            .map(|(p, t)| (p - t).powi(2))
            .sum::<f64>()
            / n;
        let rmse = mse.sqrt();

        // Skip near-zero targets to avoid division blow-ups.
        let mape = predictions
            .iter()
            .zip(targets)
            .filter(|(_, t)| t.abs() > 1e-10)
            .map(|(p, t)| ((p - t) / t).abs() * 100.0)
            .sum::<f64>()
            / n;

        let mean_target = targets.iter().sum::<f64>() / n;
        let ss_tot = targets
            .iter()
            .map(|t| (t - mean_target).powi(2))
            .sum::<f64>();
        let ss_res = predictions
            .iter()
            .zip(targets)
            .map(|(p, t)| (t - p).powi(2))
            .sum::<f64>();
        let r2 = if ss_tot.abs() < 1e-10 {
            0.0
        } else {
            1.0 - ss_res / ss_tot
        };

        Some(Self {
            mae,
            rmse,
            mape,
            r2,
        })
    }
}
