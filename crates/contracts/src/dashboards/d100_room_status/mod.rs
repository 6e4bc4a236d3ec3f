pub mod aggregator;
pub mod board_state;
pub mod column_mapper;
pub mod dataset;
pub mod directives;
pub mod dto;
pub mod error;
pub mod presentation;
pub mod row_filter;

pub use aggregator::{count_by_status, distinct_values, role_options, NO_STATUS_LABEL};
pub use board_state::{ApplyOutcome, BoardState, CycleCounter, CycleTicket};
pub use column_mapper::{build_mapping, detect_mapping};
pub use dataset::parse_csv;
pub use directives::{BoardDirectives, BoardQuery, ViewMode};
pub use dto::*;
pub use error::{LoadError, SOURCE_NOT_CONFIGURED, SOURCE_STATE_HEADER};
pub use presentation::{table_columns, StatusTone};
pub use row_filter::filter_rows;
