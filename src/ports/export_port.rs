//! Dataset export port.

use crate::domain::dataset::Dataset;
use crate::domain::error::CuratorError;
use std::path::{Path, PathBuf};

pub trait ExportPort {
    /// File extension written by this exporter, without the dot.
    fn extension(&self) -> &'static str;

    fn write(&self, dataset: &Dataset, path: &Path) -> Result<(), CuratorError>;

    /// Writes `<dir>/<base_name>.<extension>` and returns the path written.
    fn export(
        &self,
        dataset: &Dataset,
        dir: &Path,
        base_name: &str,
    ) -> Result<PathBuf, CuratorError> {
        let path = dir.join(format!("{}.{}", base_name, self.extension()));
        self.write(dataset, &path)?;
        Ok(path)
    }
}
