//! Energy Transition Planner
//!
//! Regional energy-mix forecasting with investment recommendations.
//!
//! The pipeline, assembled once at startup into an immutable
//! [`planner::Planner`]:
//! - dataset: CSV snapshot loading with synthetic regeneration
//! - ml: random forest estimators for solar production and the
//!   renewable transition
//! - forecast: clamped per-year production forecasts
//! - recommend: threshold rules over the current mix
//!
//! HTTP routing and request marshaling live outside this crate.

pub mod config;
pub mod dataset;
pub mod domain;
pub mod error;
pub mod forecast;
pub mod ml;
pub mod planner;
pub mod recommend;
pub mod telemetry;

pub use config::Config;
pub use error::PlannerError;
pub use planner::{Planner, RegionView, RenewableForecast};
