use serde::{Deserialize, Serialize};

use super::dto::{FieldSet, RoleMapping};
use crate::shared::text::normalize;

/// Maximum number of columns in the table view.
pub const MAX_TABLE_COLUMNS: usize = 12;

/// Colour family of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTone {
    Free,
    Busy,
    Maintenance,
    Neutral,
}

impl StatusTone {
    pub fn for_status(status: &str) -> Self {
        let status = normalize(status);
        if status.contains("livre") {
            StatusTone::Free
        } else if status.contains("ocup") {
            StatusTone::Busy
        } else if status.contains("manut") || status.contains("bloq") {
            StatusTone::Maintenance
        } else {
            StatusTone::Neutral
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            StatusTone::Free => "status-free",
            StatusTone::Busy => "status-busy",
            StatusTone::Maintenance => "status-maintenance",
            StatusTone::Neutral => "status-neutral",
        }
    }
}

/// Columns of the table view: mapped role columns first (role order, no
/// repeats), then the remaining fields in header order, at most 12.
pub fn table_columns(fields: &FieldSet, mapping: &RoleMapping) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    let ordered = mapping
        .iter()
        .map(|(_, column)| column)
        .chain(fields.iter());

    for column in ordered {
        if columns.len() == MAX_TABLE_COLUMNS {
            break;
        }
        if !columns.iter().any(|c| c == column) {
            columns.push(column.to_string());
        }
    }
    columns
}
