//! Investment recommendations derived from the current energy mix.
//!
//! Three independent threshold rules run in a fixed order; each can fire
//! at most once and none suppresses another. The thresholds are policy
//! constants, not tunables.

use serde::{Deserialize, Serialize};

use crate::domain::EnergyRecord;
use crate::forecast::TransitionForecast;

/// Share of current production below which solar is considered untapped.
const SOLAR_SHARE_CEILING: f64 = 0.10;
/// Potential score a region must exceed for the solar rule to fire.
const SOLAR_POTENTIAL_FLOOR: f64 = 70.0;
/// Share of current production below which wind is considered untapped.
const WIND_SHARE_CEILING: f64 = 0.15;
/// Thermal share above which the region is flagged for transition.
const THERMAL_SHARE_FLOOR: f64 = 0.30;

/// Investment category a recommendation targets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Solar,
    #[serde(rename = "eolica")]
    Wind,
    #[serde(rename = "transição")]
    Transition,
}

/// Urgency grade attached to a recommendation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Priority {
    #[serde(rename = "alta")]
    High,
    #[serde(rename = "media")]
    Medium,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub priority: Priority,
    pub message: String,
    pub suggestion: String,
}

/// Share of `part` in `total`. A region reporting zero (or negative)
/// total production has no meaningful mix, so every share is defined as
/// zero rather than dividing by it.
fn share(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        part / total
    } else {
        0.0
    }
}

fn solar_rule(current: &EnergyRecord) -> Option<Recommendation> {
    let solar_share = share(current.energy_solar, current.total_energy);
    if solar_share < SOLAR_SHARE_CEILING && current.solar_potential > SOLAR_POTENTIAL_FLOOR {
        Some(Recommendation {
            kind: RecommendationKind::Solar,
            priority: Priority::High,
            message: format!(
                "Alto potencial para energia solar ({:.1}%)",
                current.solar_potential
            ),
            suggestion: "Investir em parques solares e incentivar microgeração".to_string(),
        })
    } else {
        None
    }
}

fn wind_rule(current: &EnergyRecord) -> Option<Recommendation> {
    let wind_share = share(current.energy_wind, current.total_energy);
    if wind_share < WIND_SHARE_CEILING {
        Some(Recommendation {
            kind: RecommendationKind::Wind,
            priority: Priority::Medium,
            message: format!(
                "Potencial eólico moderado ({:.1}%)",
                current.wind_potential
            ),
            suggestion: "Desenvolver projetos eólicos em áreas costeiras".to_string(),
        })
    } else {
        None
    }
}

fn thermal_rule(current: &EnergyRecord) -> Option<Recommendation> {
    let thermal_share = share(current.energy_thermal, current.total_energy);
    if thermal_share > THERMAL_SHARE_FLOOR {
        Some(Recommendation {
            kind: RecommendationKind::Transition,
            priority: Priority::High,
            message: "Alta dependência de termelétricas".to_string(),
            suggestion: "Substituir gradualmente por fontes renováveis".to_string(),
        })
    } else {
        None
    }
}

/// Evaluate the rules against the region's most recent record.
///
/// `_predictions` is part of the engine's interface so forecast-aware
/// rules can be added without changing callers; no current rule reads it.
pub fn recommend(
    current: &EnergyRecord,
    _predictions: &[TransitionForecast],
) -> Vec<Recommendation> {
    [solar_rule, wind_rule, thermal_rule]
        .iter()
        .filter_map(|rule| rule(current))
        .collect()
}
