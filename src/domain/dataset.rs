//! The finished, exportable dataset.

use crate::domain::exchange::Exchange;
use crate::domain::field::Field;
use crate::domain::merge::DailyRecord;
use crate::domain::quality::QualityReport;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// `YYYYmmdd_HHMMSS` stamp used in export file names.
pub const FILE_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetMetadata {
    pub symbol: String,
    pub exchange: Exchange,
    #[serde(rename = "collection_date")]
    pub collection_timestamp: DateTime<Utc>,
    pub days_requested: usize,
    pub days_collected: usize,
    #[serde(rename = "data_quality")]
    pub quality: QualityReport,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub metadata: DatasetMetadata,
    #[serde(rename = "data")]
    pub records: Vec<DailyRecord>,
}

impl Dataset {
    /// `<SYMBOL>_<YYYYmmdd_HHMMSS>`, the export file name without extension.
    pub fn base_name(&self) -> String {
        format!(
            "{}_{}",
            self.metadata.symbol,
            self.metadata.collection_timestamp.format(FILE_STAMP_FORMAT)
        )
    }

    /// Structured columns in field order, taken from the first record.
    pub fn structured_fields(&self) -> Vec<Field> {
        self.records
            .first()
            .map(|r| r.structured.keys().copied().collect())
            .unwrap_or_default()
    }
}
