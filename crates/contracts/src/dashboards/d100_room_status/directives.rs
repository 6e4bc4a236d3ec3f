//! Query-string directives of the board page and of the snapshot API.
//!
//! Page: `mode=tv`, `refresh=<ms>`, `view=table` and one column override per
//! role (`room=`/`sala=`, `status=`, `location=`/`local=`, ...).
//! API: additionally `q` and `sel_<role>` for the filters.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::dto::{Role, RoleOverrides, Selections};

pub const DEFAULT_REFRESH_MS: u32 = 60_000;
pub const MIN_REFRESH_MS: u32 = 5_000;

const MODE_PARAM: &str = "mode";
const TV_MODE: &str = "tv";
const REFRESH_PARAM: &str = "refresh";
const VIEW_PARAM: &str = "view";
const QUERY_PARAM: &str = "q";
const SELECTION_PREFIX: &str = "sel_";

/// Layout of the room list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Cards,
    Table,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Cards => ViewMode::Table,
            ViewMode::Table => ViewMode::Cards,
        }
    }
}

/// Directives read once per page load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardDirectives {
    pub tv_mode: bool,
    pub refresh_ms: u32,
    pub view: ViewMode,
    pub overrides: RoleOverrides,
}

impl Default for BoardDirectives {
    fn default() -> Self {
        Self {
            tv_mode: false,
            refresh_ms: DEFAULT_REFRESH_MS,
            view: ViewMode::Cards,
            overrides: RoleOverrides::default(),
        }
    }
}

impl BoardDirectives {
    /// Parses `location.search` (with or without the leading `?`).
    pub fn from_query(search: &str) -> Self {
        Self::from_params(&parse_query(search))
    }

    pub fn from_params(params: &BTreeMap<String, String>) -> Self {
        let view = match params.get(VIEW_PARAM).map(|v| v.trim()) {
            Some("table") | Some("tabela") => ViewMode::Table,
            _ => ViewMode::Cards,
        };
        Self {
            tv_mode: params.get(MODE_PARAM).map(|m| m.trim()) == Some(TV_MODE),
            refresh_ms: refresh_interval(params.get(REFRESH_PARAM).map(String::as_str)),
            view,
            overrides: overrides_from(params),
        }
    }
}

/// Filters and overrides accepted by `/api/d100/board`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardQuery {
    pub query: String,
    pub selections: Selections,
    pub overrides: RoleOverrides,
}

impl BoardQuery {
    pub fn from_params(params: &BTreeMap<String, String>) -> Self {
        let mut selections = Selections::default();
        for (name, value) in params {
            if let Some(role) = name
                .strip_prefix(SELECTION_PREFIX)
                .and_then(Role::from_param)
            {
                selections.set(role, value.as_str());
            }
        }
        Self {
            query: params.get(QUERY_PARAM).cloned().unwrap_or_default(),
            selections,
            overrides: overrides_from(params),
        }
    }
}

/// `refresh` accepted only when numeric and at least `MIN_REFRESH_MS`.
pub fn refresh_interval(value: Option<&str>) -> u32 {
    value
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|ms| *ms >= MIN_REFRESH_MS)
        .unwrap_or(DEFAULT_REFRESH_MS)
}

/// Query string (without `?`) with `mode=tv` switched on or off; every
/// other pair is kept as-is, duplicates and bracketed keys included.
pub fn toggle_tv_query(search: &str) -> String {
    let mut pairs = query_pairs(search);
    let is_tv = last_value(&pairs, MODE_PARAM).map(str::trim) == Some(TV_MODE);
    pairs.retain(|(name, _)| name != MODE_PARAM);
    if !is_tv {
        pairs.push((MODE_PARAM.to_string(), TV_MODE.to_string()));
    }
    serde_urlencoded::to_string(&pairs).unwrap_or_default()
}

/// Parameters of a query string, last value wins on repeated keys.
/// Keys this board does not know are carried along untouched.
pub fn parse_query(search: &str) -> BTreeMap<String, String> {
    query_pairs(search).into_iter().collect()
}

fn query_pairs(search: &str) -> Vec<(String, String)> {
    serde_urlencoded::from_str(search.trim_start_matches('?')).unwrap_or_default()
}

fn last_value<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .rev()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_str())
}

fn overrides_from(params: &BTreeMap<String, String>) -> RoleOverrides {
    let mut overrides = RoleOverrides::default();
    for (name, value) in params {
        if let Some(role) = Role::from_param(name) {
            overrides.set(role, value.as_str());
        }
    }
    overrides
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let directives = BoardDirectives::from_query("");
        assert_eq!(directives, BoardDirectives::default());
        assert_eq!(directives.refresh_ms, DEFAULT_REFRESH_MS);
    }

    #[test]
    fn test_refresh_interval_rules() {
        assert_eq!(refresh_interval(Some("5000")), 5000);
        assert_eq!(refresh_interval(Some("120000")), 120000);
        assert_eq!(refresh_interval(Some("4999")), DEFAULT_REFRESH_MS);
        assert_eq!(refresh_interval(Some("abc")), DEFAULT_REFRESH_MS);
        assert_eq!(refresh_interval(Some("")), DEFAULT_REFRESH_MS);
        assert_eq!(refresh_interval(None), DEFAULT_REFRESH_MS);
    }

    #[test]
    fn test_page_directives() {
        let directives =
            BoardDirectives::from_query("?mode=tv&refresh=30000&view=table&sala=Ambiente&turno=Per%C3%ADodo");
        assert!(directives.tv_mode);
        assert_eq!(directives.refresh_ms, 30000);
        assert_eq!(directives.view, ViewMode::Table);
        assert_eq!(directives.overrides.get(Role::Room), Some("Ambiente"));
        assert_eq!(directives.overrides.get(Role::Shift), Some("Período"));
        assert_eq!(directives.overrides.get(Role::Status), None);
    }

    #[test]
    fn test_english_keys_and_blank_overrides() {
        let directives = BoardDirectives::from_query("room=Espaco&status=");
        assert_eq!(directives.overrides.get(Role::Room), Some("Espaco"));
        assert_eq!(directives.overrides.get(Role::Status), None);
    }

    #[test]
    fn test_toggle_tv_keeps_other_params() {
        let on = toggle_tv_query("?sala=Ambiente");
        let params = parse_query(&on);
        assert_eq!(params.get("mode").map(String::as_str), Some("tv"));
        assert_eq!(params.get("sala").map(String::as_str), Some("Ambiente"));

        let off = toggle_tv_query(&on);
        let params = parse_query(&off);
        assert!(!params.contains_key("mode"));
        assert_eq!(params.get("sala").map(String::as_str), Some("Ambiente"));
    }

    #[test]
    fn test_repeated_keys_last_wins() {
        let directives = BoardDirectives::from_query("?mode=tv&sala=A&sala=B&refresh=10000");
        assert!(directives.tv_mode);
        assert_eq!(directives.refresh_ms, 10000);
        assert_eq!(directives.overrides.get(Role::Room), Some("B"));
    }

    #[test]
    fn test_foreign_bracketed_keys_are_ignored() {
        let directives = BoardDirectives::from_query("?mode=tv&sala=Ambiente&utm[source]=x");
        assert!(directives.tv_mode);
        assert_eq!(directives.overrides.get(Role::Room), Some("Ambiente"));

        let directives = BoardDirectives::from_query("?utm%5Bsource%5D=x&view=table");
        assert_eq!(directives.view, ViewMode::Table);
    }

    #[test]
    fn test_plus_decodes_to_space() {
        let directives = BoardDirectives::from_query("?sala=Numero+da+sala&mode=tv");
        assert!(directives.tv_mode);
        assert_eq!(directives.overrides.get(Role::Room), Some("Numero da sala"));
    }

    #[test]
    fn test_toggle_tv_keeps_foreign_and_repeated_params() {
        let on = toggle_tv_query("?utm[source]=x&sala=A&sala=B");
        let pairs = query_pairs(&on);
        assert_eq!(
            pairs,
            vec![
                ("utm[source]".to_string(), "x".to_string()),
                ("sala".to_string(), "A".to_string()),
                ("sala".to_string(), "B".to_string()),
                ("mode".to_string(), "tv".to_string()),
            ]
        );

        let off = toggle_tv_query(&on);
        let pairs = query_pairs(&off);
        assert_eq!(pairs.len(), 3);
        assert!(pairs.iter().all(|(name, _)| name != "mode"));
    }

    #[test]
    fn test_toggle_tv_drops_repeated_mode() {
        let off = toggle_tv_query("mode=tv&mode=tv&sala=A");
        assert_eq!(parse_query(&off).get("mode"), None);
        assert_eq!(parse_query(&off).get("sala").map(String::as_str), Some("A"));
    }

    #[test]
    fn test_board_query() {
        let query = BoardQuery::from_params(&parse_query(
            "q=lab&sel_status=Livre&sel_local=A&sel_turno=&status=Situa%C3%A7%C3%A3o",
        ));
        assert_eq!(query.query, "lab");
        assert_eq!(query.selections.get(Role::Status), Some("Livre"));
        assert_eq!(query.selections.get(Role::Location), Some("A"));
        assert_eq!(query.selections.get(Role::Shift), None);
        assert_eq!(query.overrides.get(Role::Status), Some("Situação"));
        assert_eq!(query.overrides.get(Role::Room), None);
    }
}
