//! CSV snapshot persistence and the load-or-generate bootstrap path.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use super::synthesis::{synthesize, SynthesisConfig};
use super::Dataset;
use crate::domain::EnergyRecord;

/// Why a snapshot could not be used. `Missing` and `Malformed` are
/// recoverable by regeneration; `Io` is not.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot missing at {path}")]
    Missing { path: PathBuf },

    #[error("snapshot has malformed rows: {0}")]
    Malformed(#[source] csv::Error),

    #[error("snapshot io failed: {0}")]
    Io(#[from] io::Error),
}

impl SnapshotError {
    /// csv wraps underlying read/write failures; keep those in the `Io`
    /// class so they are not mistaken for a corrupt file.
    fn from_csv(err: csv::Error) -> Self {
        if err.is_io_error() {
            Self::Io(io::Error::new(io::ErrorKind::Other, err))
        } else {
            Self::Malformed(err)
        }
    }
}

/// A CSV file holding the full dataset, one row per (region, year).
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode the snapshot. An absent file is reported as
    /// `Missing`; any other open failure stays an `Io` error.
    pub fn load(&self) -> Result<Dataset, SnapshotError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(SnapshotError::Missing {
                    path: self.path.clone(),
                })
            }
            Err(err) => return Err(SnapshotError::Io(err)),
        };

        let mut reader = csv::Reader::from_reader(file);
        let mut records = Vec::new();
        for row in reader.deserialize() {
            let record: EnergyRecord = row.map_err(SnapshotError::from_csv)?;
            records.push(record);
        }
        Ok(Dataset::new(records))
    }

    /// Write the full dataset, creating parent directories as needed.
    pub fn save(&self, dataset: &Dataset) -> Result<(), SnapshotError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(&self.path)?;
        let mut writer = csv::Writer::from_writer(file);
        for record in dataset.records() {
            writer.serialize(record).map_err(SnapshotError::from_csv)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Bootstrap the dataset: load the snapshot when it is usable, otherwise
/// synthesize a fresh one and persist it for the next run.
///
/// A missing, unparseable or empty snapshot triggers regeneration;
/// filesystem failures propagate so a wedged disk does not silently
/// degrade into synthetic data.
pub fn load_or_generate(
    store: &SnapshotStore,
    synthesis: &SynthesisConfig,
) -> Result<Dataset, SnapshotError> {
    match store.load() {
        // Junk without delimiters decodes as a header-only file, so an
        // empty dataset is treated as unusable rather than trained on.
        Ok(dataset) if dataset.is_empty() => {
            warn!(path = %store.path().display(), "snapshot decoded to zero rows, regenerating");
            regenerate(store, synthesis)
        }
        Ok(dataset) => {
            report_quality(&dataset);
            info!(
                rows = dataset.len(),
                path = %store.path().display(),
                "loaded energy snapshot"
            );
            Ok(dataset)
        }
        Err(SnapshotError::Missing { path }) => {
            info!(path = %path.display(), "snapshot missing, synthesizing dataset");
            regenerate(store, synthesis)
        }
        Err(SnapshotError::Malformed(err)) => {
            warn!(error = %err, path = %store.path().display(), "snapshot unreadable, regenerating");
            regenerate(store, synthesis)
        }
        Err(err @ SnapshotError::Io(_)) => Err(err),
    }
}

fn regenerate(store: &SnapshotStore, synthesis: &SynthesisConfig) -> Result<Dataset, SnapshotError> {
    let dataset = synthesize(synthesis);
    store.save(&dataset)?;
    info!(
        rows = dataset.len(),
        path = %store.path().display(),
        "persisted synthesized snapshot"
    );
    Ok(dataset)
}

/// Loaded snapshots are trusted as-is, but key collisions and drifted
/// mixes are worth a warning since they skew history aggregation.
fn report_quality(dataset: &Dataset) {
    let duplicates = dataset.duplicate_keys();
    if !duplicates.is_empty() {
        warn!(
            keys = duplicates.len(),
            "snapshot contains duplicate (region, year) rows"
        );
    }
    let drifted = dataset
        .records()
        .iter()
        .filter(|r| !r.mix_is_consistent())
        .count();
    if drifted > 0 {
        warn!(rows = drifted, "production mix does not sum to total_energy");
    }
}
