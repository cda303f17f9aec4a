//! Persistence for matrix data
//!
//! [`Persistence`] is the seam between the server and wherever records live.
//! [`Storage`] keeps them in a single TOML file.

use crate::matrix::MatrixData;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads and saves the complete record set
///
/// A save either fully succeeds or returns an error; callers must not assume
/// any retry.
pub trait Persistence: Send + Sync {
    fn load(&self) -> Result<MatrixData>;
    fn save(&self, data: &MatrixData) -> Result<()>;
}

/// TOML file storage
pub struct Storage {
    file_path: PathBuf,
}

impl Storage {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }
}

impl Persistence for Storage {
    /// Load and validate the data file; a missing file yields empty data
    fn load(&self) -> Result<MatrixData> {
        if !self.file_path.exists() {
            debug!(path = %self.file_path.display(), "data file not found, starting empty");
            return Ok(MatrixData::new());
        }

        let content = fs::read_to_string(&self.file_path)
            .with_context(|| format!("Failed to read {}", self.file_path.display()))?;
        let data: MatrixData = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.file_path.display()))?;
        data.validate()
            .with_context(|| format!("Invalid record in {}", self.file_path.display()))?;
        Ok(data)
    }

    /// Write via a temporary sibling file and rename, so a failed write never
    /// leaves a truncated data file behind
    fn save(&self, data: &MatrixData) -> Result<()> {
        let content = toml::to_string_pretty(data)?;
        let tmp_path = self.file_path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.file_path)
            .with_context(|| format!("Failed to replace {}", self.file_path.display()))?;
        Ok(())
    }
}
