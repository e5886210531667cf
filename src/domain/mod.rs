//! Core domain types shared across the dataset, model and planner layers.

pub mod record;
pub mod region;

pub use record::*;
pub use region::*;
