//! CSV text -> `Dataset`, delegated to the `csv` crate.
//!
//! The reader is lenient: records may be shorter or longer than the header,
//! blank records are skipped and a record the reader rejects is logged and
//! dropped instead of failing the whole cycle.

use super::dto::{Dataset, FieldSet, Row};
use super::error::LoadError;

pub fn parse_csv(csv_text: &str) -> Result<Dataset, LoadError> {
    // Strip UTF-8 BOM if present
    let text = csv_text.trim_start_matches('\u{FEFF}');

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| LoadError::Malformed(e.to_string()))?
        .clone();
    let fields = FieldSet::new(headers.iter());

    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for (index, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Skipping malformed CSV record #{}: {}", index + 1, e);
                skipped += 1;
                continue;
            }
        };

        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let mut row = Row::new();
        for (position, header) in headers.iter().enumerate() {
            if !fields.contains(header) {
                continue;
            }
            let value = record.get(position).unwrap_or("");
            row.insert(header.to_string(), value.to_string());
        }
        rows.push(row);
    }

    log::debug!(
        "Parsed CSV: {} fields, {} rows, {} skipped",
        fields.len(),
        rows.len(),
        skipped
    );

    Ok(Dataset::new(fields, rows))
}
