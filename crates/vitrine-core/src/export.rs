//! CSV export of the currently visible page.

use chrono::{DateTime, Local};
use thiserror::Error;

use crate::record::Record;

/// Excel-friendly UTF-8 byte order mark.
const UTF8_BOM: &str = "\u{feff}";

/// Column headers, in output order.
const HEADERS: [&str; 5] = ["ID", "Title", "Price", "Category", "Description"];

/// Errors from export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Nothing visible to export.
    #[error("no records to export")]
    EmptyPage,

    #[error("csv write failed: {0}")]
    Write(#[from] csv::Error),
}

/// Render the given page slice as BOM-prefixed CSV text.
///
/// Free-text fields with embedded quotes are quoted with the quotes
/// doubled; category and description use their display fallbacks.
pub fn render_csv(records: &[Record]) -> Result<String, ExportError> {
    if records.is_empty() {
        return Err(ExportError::EmptyPage);
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADERS)?;
    for record in records {
        writer.write_record([
            record.id.to_string(),
            record.title.clone(),
            record.price.to_string(),
            record.category_name().to_string(),
            record.description_or_default().to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .expect("flushing an in-memory csv writer cannot fail");
    let body = String::from_utf8(bytes).expect("csv output is UTF-8");
    Ok(format!("{UTF8_BOM}{body}"))
}

/// `products_YYYY-MM-DD_HH-MM.csv`, stamped with the given local time.
pub fn export_filename(now: DateTime<Local>) -> String {
    format!("products_{}.csv", now.format("%Y-%m-%d_%H-%M"))
}

/// Filename stamped with the current local time.
pub fn timestamped_filename() -> String {
    export_filename(Local::now())
}
