//! Dataset loading, synthesis and in-memory access.
//!
//! The planner works off a single flat table of [`EnergyRecord`]s keyed by
//! (region, year). It is loaded from a CSV snapshot when one exists and
//! synthesized (then persisted) when it does not.

pub mod provider;
pub mod synthesis;

pub use provider::{load_or_generate, SnapshotError, SnapshotStore};
pub use synthesis::{synthesize, SynthesisConfig};

use std::collections::BTreeMap;

use itertools::Itertools;

use crate::domain::{EnergyRecord, HistoricalMix, Region};

/// An ordered, immutable collection of energy records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<EnergyRecord>,
}

impl Dataset {
    pub fn new(records: Vec<EnergyRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[EnergyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Latest observed year across all regions, if any records exist.
    pub fn max_year(&self) -> Option<i32> {
        self.records.iter().map(|r| r.year).max()
    }

    pub fn region_records(&self, region: Region) -> impl Iterator<Item = &EnergyRecord> + '_ {
        self.records.iter().filter(move |r| r.region == region)
    }

    /// Most recent record for a region. With duplicate years the last
    /// occurrence wins, matching the ordering of the snapshot.
    pub fn latest_record(&self, region: Region) -> Option<&EnergyRecord> {
        self.region_records(region).max_by_key(|r| r.year)
    }

    /// Per-year production totals for a region, ascending by year.
    /// Duplicate (region, year) rows are summed into one entry.
    pub fn history(&self, region: Region) -> Vec<HistoricalMix> {
        let mut by_year: BTreeMap<i32, HistoricalMix> = BTreeMap::new();
        for record in self.region_records(region) {
            let entry = by_year.entry(record.year).or_insert_with(|| HistoricalMix {
                year: record.year,
                ..HistoricalMix::default()
            });
            entry.energy_hydro += record.energy_hydro;
            entry.energy_thermal += record.energy_thermal;
            entry.energy_wind += record.energy_wind;
            entry.energy_solar += record.energy_solar;
            entry.energy_nuclear += record.energy_nuclear;
            entry.total_energy += record.total_energy;
        }
        by_year.into_values().collect()
    }

    /// (region, year) keys that appear more than once, each reported once.
    pub fn duplicate_keys(&self) -> Vec<(Region, i32)> {
        self.records
            .iter()
            .map(|r| (r.region, r.year))
            .duplicates()
            .collect()
    }
}
