use super::dto::{Dataset, RoleMapping, Row, Selections};
use crate::shared::text::normalize;

/// Rows matching the free-text query and every active selection, in dataset order.
///
/// - the query is compared against the normalized, space-joined text of all
///   cells of the row (not only mapped columns);
/// - a selection compares the trimmed cell of the role's column against the
///   selected value exactly, without normalization;
/// - a selection for a role without a mapped column is skipped.
pub fn filter_rows<'a>(
    dataset: &'a Dataset,
    mapping: &RoleMapping,
    query: &str,
    selections: &Selections,
) -> Vec<&'a Row> {
    let needle = normalize(query);
    let criteria = active_criteria(mapping, selections);

    dataset
        .rows
        .iter()
        .filter(|row| matches_query(row, &needle) && matches_selections(row, &criteria))
        .collect()
}

/// Normalized search text of a row.
pub fn search_text(row: &Row) -> String {
    normalize(&row.values().collect::<Vec<_>>().join(" "))
}

fn matches_query(row: &Row, needle: &str) -> bool {
    needle.is_empty() || search_text(row).contains(needle)
}

fn active_criteria<'m>(
    mapping: &'m RoleMapping,
    selections: &'m Selections,
) -> Vec<(&'m str, &'m str)> {
    selections
        .iter()
        .filter_map(|(role, value)| match mapping.get(role) {
            Some(column) => Some((column, value)),
            None => {
                log::debug!("Selection for unmapped role {} skipped", role.key());
                None
            }
        })
        .collect()
}

fn matches_selections(row: &Row, criteria: &[(&str, &str)]) -> bool {
    criteria
        .iter()
        .all(|(column, value)| row.get(column).trim() == *value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d100_room_status::dto::Role;
    use crate::dashboards::d100_room_status::column_mapper::detect_mapping;

    fn rooms() -> Dataset {
        Dataset::from_rows(vec![
            Row::from_pairs([("SALA", "101"), ("STATUS", "Livre"), ("BLOCO", "A")]),
            Row::from_pairs([("SALA", "102"), ("STATUS", "Ocupada"), ("BLOCO", "A")]),
            Row::from_pairs([("SALA", "201"), ("STATUS", "Livre"), ("BLOCO", "B")]),
        ])
    }

    fn room_numbers(rows: &[&Row]) -> Vec<String> {
        rows.iter().map(|r| r.get("SALA").to_string()).collect()
    }

    #[test]
    fn test_no_criteria_returns_everything_in_order() {
        let dataset = rooms();
        let mapping = detect_mapping(&dataset.fields);
        let rows = filter_rows(&dataset, &mapping, "   ", &Selections::default());
        assert_eq!(room_numbers(&rows), vec!["101", "102", "201"]);
    }

    #[test]
    fn test_location_selection() {
        let dataset = rooms();
        let mapping = detect_mapping(&dataset.fields);
        let selections = Selections::default().with(Role::Location, "A");
        let rows = filter_rows(&dataset, &mapping, "", &selections);
        assert_eq!(room_numbers(&rows), vec!["101", "102"]);
    }

    #[test]
    fn test_selection_is_exact_not_normalized() {
        let dataset = rooms();
        let mapping = detect_mapping(&dataset.fields);
        let selections = Selections::default().with(Role::Status, "livre");
        assert!(filter_rows(&dataset, &mapping, "", &selections).is_empty());
    }

    #[test]
    fn test_selection_compares_trimmed_cell() {
        let dataset = Dataset::from_rows(vec![Row::from_pairs([
            ("SALA", "301"),
            ("STATUS", "  Livre "),
        ])]);
        let mapping = detect_mapping(&dataset.fields);
        let selections = Selections::default().with(Role::Status, "Livre");
        assert_eq!(filter_rows(&dataset, &mapping, "", &selections).len(), 1);
    }

    #[test]
    fn test_query_is_accent_and_case_insensitive_over_all_cells() {
        let dataset = Dataset::from_rows(vec![
            Row::from_pairs([("SALA", "101"), ("EQUIPAMENTO", "Projetor")]),
            Row::from_pairs([("SALA", "102"), ("EQUIPAMENTO", "Televisão")]),
        ]);
        let mapping = detect_mapping(&dataset.fields);
        let rows = filter_rows(&dataset, &mapping, "TELEVISAO", &Selections::default());
        assert_eq!(room_numbers(&rows), vec!["102"]);
    }

    #[test]
    fn test_included_rows_contain_the_query() {
        let dataset = rooms();
        let mapping = detect_mapping(&dataset.fields);
        for query in ["liv", "10", "a", "ocupada 102", "zzz"] {
            let needle = normalize(query);
            for row in filter_rows(&dataset, &mapping, query, &Selections::default()) {
                assert!(search_text(row).contains(&needle));
            }
        }
    }

    #[test]
    fn test_query_and_selection_combine() {
        let dataset = rooms();
        let mapping = detect_mapping(&dataset.fields);
        let selections = Selections::default().with(Role::Status, "Livre");
        let rows = filter_rows(&dataset, &mapping, "20", &selections);
        assert_eq!(room_numbers(&rows), vec!["201"]);
    }

    #[test]
    fn test_selection_for_unmapped_role_is_skipped() {
        let dataset = rooms();
        let mapping = detect_mapping(&dataset.fields);
        assert!(!mapping.is_mapped(Role::Shift));
        let selections = Selections::default().with(Role::Shift, "Manhã");
        assert_eq!(filter_rows(&dataset, &mapping, "", &selections).len(), 3);
    }
}
