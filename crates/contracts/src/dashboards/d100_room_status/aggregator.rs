use std::collections::{HashMap, HashSet};

use super::dto::{Dataset, Role, RoleMapping, RoleOptions, StatusCount};
use crate::shared::text::normalize;

/// Label grouping rows whose status cell is blank.
pub const NO_STATUS_LABEL: &str = "Sem status";

/// Counts all rows by trimmed status value, most frequent first.
///
/// Ties keep first-encounter order. Without a status column the result is empty.
pub fn count_by_status(dataset: &Dataset, status_column: Option<&str>) -> Vec<StatusCount> {
    let Some(column) = status_column else {
        return Vec::new();
    };

    let mut counts: Vec<StatusCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in &dataset.rows {
        let value = row.get(column).trim();
        let label = if value.is_empty() { NO_STATUS_LABEL } else { value };
        match index.get(label) {
            Some(&position) => counts[position].count += 1,
            None => {
                index.insert(label.to_string(), counts.len());
                counts.push(StatusCount {
                    label: label.to_string(),
                    count: 1,
                });
            }
        }
    }

    // stable: equal counts stay in first-encounter order
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Distinct non-blank trimmed values of a column, sorted case/accent-insensitively.
pub fn distinct_values(dataset: &Dataset, column: &str) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut values: Vec<String> = Vec::new();
    for row in &dataset.rows {
        let value = row.get(column).trim();
        if !value.is_empty() && seen.insert(value) {
            values.push(value.to_string());
        }
    }
    values.sort_by_cached_key(|v| (normalize(v), v.clone()));
    values
}

/// Dropdown option lists for the filterable roles that have a column.
pub fn role_options(dataset: &Dataset, mapping: &RoleMapping) -> RoleOptions {
    let mut options = RoleOptions::default();
    for role in Role::FILTERABLE {
        if let Some(column) = mapping.get(role) {
            options.insert(role, distinct_values(dataset, column));
        }
    }
    options
}
