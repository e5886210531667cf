//! The two trained estimators exposed to the planner.

use crate::domain::RegionCovariates;

use super::forest::{MultiTargetForest, RandomForest};
use super::schema::{SolarSchema, TransitionSchema};
use super::{ModelMetadata, PredictError};

/// Single-target estimator of a region's solar production for a year.
#[derive(Debug)]
pub struct SolarModel {
    forest: RandomForest,
}

impl SolarModel {
    pub fn new(forest: RandomForest) -> Self {
        Self { forest }
    }

    /// Raw regression output in dataset production units; not clamped.
    pub fn predict(&self, year: i32, covariates: &RegionCovariates) -> Result<f64, PredictError> {
        self.forest
            .predict_row(&SolarSchema::predictors_for(year, covariates))
    }

    pub fn metadata(&self) -> &ModelMetadata {
        self.forest.metadata()
    }
}

/// Multi-target estimator of the renewable mix, output order
/// [solar, wind, hydro] per [`TransitionSchema::TARGETS`].
#[derive(Debug)]
pub struct TransitionModel {
    forests: MultiTargetForest,
}

impl TransitionModel {
    pub fn new(forests: MultiTargetForest) -> Self {
        Self { forests }
    }

    /// Raw per-target regression outputs; clamping to physical bounds is
    /// the forecast layer's job.
    pub fn predict_raw(
        &self,
        year: i32,
        covariates: &RegionCovariates,
    ) -> Result<[f64; 3], PredictError> {
        let row = TransitionSchema::predictors_for(year, covariates);
        let outputs = self.forests.predict_row(&row)?;
        let n = outputs.len();
        outputs.try_into().map_err(|_| PredictError {
            target_column: "transition".to_string(),
            reason: format!("expected {} outputs, got {n}", TransitionSchema::TARGETS.len()),
        })
    }

    /// Metadata per target forest, in output order.
    pub fn metadata(&self) -> Vec<&ModelMetadata> {
        self.forests.forests().iter().map(|f| f.metadata()).collect()
    }
}
