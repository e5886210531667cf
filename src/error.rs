use thiserror::Error;

use crate::dataset::SnapshotError;
use crate::ml::{PredictError, TrainingError};

/// Failure taxonomy surfaced by the planner operations.
#[derive(Debug, Error)]
pub enum PlannerError {
    /// The requested region is unknown or has no records.
    #[error("region not found: {0}")]
    RegionNotFound(String),

    /// Startup training failed; the process must refuse to start.
    #[error("model training failed: {0}")]
    Training(#[from] TrainingError),

    /// The snapshot could not be read or replaced.
    #[error("dataset snapshot failed: {0}")]
    Snapshot(#[from] SnapshotError),

    /// A trained model rejected an inference request.
    #[error("forecast failed: {0}")]
    Prediction(#[from] PredictError),
}
