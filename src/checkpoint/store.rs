//! Checkpoint file store
//!
//! Maps dataset names to `<results_dir>/<name>.csv` and owns all file
//! I/O. Saves are atomic with respect to the run: the row set is written
//! to a temp file in the same directory, synced, then renamed over the
//! final path, so a partially written checkpoint is never observable —
//! its mere existence would be read as "already computed" on the next
//! run.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::table::RowSet;

use super::codec;
use super::errors::{CheckpointError, CheckpointResult};

/// File-backed checkpoint store for one results directory.
pub struct CheckpointStore {
    results_dir: PathBuf,
}

impl CheckpointStore {
    /// Opens a store rooted at `results_dir`, creating the directory if
    /// it does not exist.
    pub fn open(results_dir: impl Into<PathBuf>) -> CheckpointResult<Self> {
        let results_dir = results_dir.into();

        if !results_dir.exists() {
            fs::create_dir_all(&results_dir).map_err(|e| CheckpointError::CreateDir {
                path: results_dir.display().to_string(),
                source: e,
            })?;
        }

        Ok(Self { results_dir })
    }

    /// Checkpoint file path for a dataset name.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.results_dir.join(format!("{}.csv", name))
    }

    /// Whether a checkpoint exists for the dataset. Existence alone is
    /// the resume signal.
    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).exists()
    }

    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }

    /// Loads a dataset's checkpoint. A missing or empty file yields an
    /// empty row set; decoded values are always text.
    pub fn load(&self, name: &str) -> CheckpointResult<RowSet> {
        let path = self.path_for(name);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(RowSet::new()),
            Err(e) => {
                return Err(CheckpointError::Read {
                    path: path.display().to_string(),
                    source: e,
                })
            }
        };

        Ok(codec::decode(&content))
    }

    /// Saves a dataset's checkpoint atomically.
    ///
    /// An empty row set produces an empty file: the resume signal must
    /// exist even when the dataset has no rows.
    pub fn save(&self, name: &str, rows: &RowSet) -> CheckpointResult<()> {
        let path = self.path_for(name);
        let tmp_path = self.results_dir.join(format!("{}.csv.tmp", name));
        let content = codec::encode(rows);

        let write_err = |e| CheckpointError::Write {
            path: path.display().to_string(),
            source: e,
        };

        let mut file = File::create(&tmp_path).map_err(write_err)?;
        file.write_all(content.as_bytes()).map_err(write_err)?;
        file.sync_all().map_err(write_err)?;
        drop(file);

        fs::rename(&tmp_path, &path).map_err(write_err)?;

        Ok(())
    }
}
