//! Row-oriented CSV export, one line per daily record.

use crate::domain::dataset::Dataset;
use crate::domain::error::CuratorError;
use crate::domain::merge::DATE_FORMAT;
use crate::domain::numeric::finite;
use crate::ports::export_port::ExportPort;
use std::fs;
use std::path::Path;

const NEWS_COLUMNS: [&str; 5] = [
    "news_headline",
    "news_summary",
    "news_sentiment",
    "news_source",
    "news_relevance",
];

#[derive(Debug, Default, Clone, Copy)]
pub struct CsvExporter;

fn number(value: f64) -> String {
    finite(value).map(|v| v.to_string()).unwrap_or_default()
}

impl ExportPort for CsvExporter {
    fn extension(&self) -> &'static str {
        "csv"
    }

    fn write(&self, dataset: &Dataset, path: &Path) -> Result<(), CuratorError> {
        let export_err = |reason: String| CuratorError::Export {
            path: path.display().to_string(),
            reason,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| export_err(e.to_string()))?;
        }

        let fields = dataset.structured_fields();
        let mut wtr = csv::Writer::from_path(path).map_err(|e| export_err(e.to_string()))?;

        let mut header = vec!["date".to_string()];
        header.extend(fields.iter().map(|f| f.to_string()));
        header.extend(NEWS_COLUMNS.iter().map(|c| c.to_string()));
        wtr.write_record(&header)?;

        for record in &dataset.records {
            let news = &record.representative_news;
            let mut row = vec![record.date.format(DATE_FORMAT).to_string()];
            row.extend(
                fields
                    .iter()
                    .map(|f| record.structured.get(f).map(|v| number(*v)).unwrap_or_default()),
            );
            row.push(news.headline.clone());
            row.push(news.summary.clone());
            row.push(number(news.sentiment));
            row.push(news.source.clone());
            row.push(number(news.relevance));
            wtr.write_record(&row)?;
        }

        wtr.flush()?;
        Ok(())
    }
}
