use serde::{Deserialize, Serialize};

/// Macro-region the dataset is partitioned by.
///
/// The CSV snapshot and all caller-facing payloads use the Portuguese
/// names, including the accented/hyphenated spellings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Region {
    Norte,
    Nordeste,
    #[serde(rename = "Centro-Oeste")]
    CentroOeste,
    Sudeste,
    Sul,
}

impl Region {
    /// Fixed enumeration order used by dataset synthesis.
    pub const ALL: [Region; 5] = [
        Region::Norte,
        Region::Nordeste,
        Region::CentroOeste,
        Region::Sudeste,
        Region::Sul,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Norte => "Norte",
            Self::Nordeste => "Nordeste",
            Self::CentroOeste => "Centro-Oeste",
            Self::Sudeste => "Sudeste",
            Self::Sul => "Sul",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Region {
    type Err = &'static str;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Norte" => Ok(Self::Norte),
            "Nordeste" => Ok(Self::Nordeste),
            "Centro-Oeste" => Ok(Self::CentroOeste),
            "Sudeste" => Ok(Self::Sudeste),
            "Sul" => Ok(Self::Sul),
            _ => Err("invalid region; expected Norte, Nordeste, Centro-Oeste, Sudeste or Sul"),
        }
    }
}
