//! Nested JSON export: metadata plus records with `structured`,
//! `unstructured` and `all_news`.

use crate::domain::dataset::Dataset;
use crate::domain::error::CuratorError;
use crate::ports::export_port::ExportPort;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy)]
pub struct JsonExporter {
    pretty: bool,
}

impl JsonExporter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Default for JsonExporter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ExportPort for JsonExporter {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn write(&self, dataset: &Dataset, path: &Path) -> Result<(), CuratorError> {
        let export_err = |e: std::io::Error| CuratorError::Export {
            path: path.display().to_string(),
            reason: e.to_string(),
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(export_err)?;
        }

        let mut writer = BufWriter::new(File::create(path).map_err(export_err)?);
        // serde_json writes non-finite floats as null
        if self.pretty {
            serde_json::to_writer_pretty(&mut writer, dataset)?;
        } else {
            serde_json::to_writer(&mut writer, dataset)?;
        }
        writer.flush()?;
        Ok(())
    }
}
