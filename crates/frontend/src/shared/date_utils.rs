//! Date/time formatting for the board header.

use chrono::{DateTime, FixedOffset, Offset, Utc};

/// pt-BR `toLocaleString` layout: `04/03/2024, 08:05:09`.
pub fn format_pt_br(timestamp: DateTime<Utc>, offset_seconds: i32) -> String {
    let offset = FixedOffset::east_opt(offset_seconds).unwrap_or_else(|| Utc.fix());
    timestamp
        .with_timezone(&offset)
        .format("%d/%m/%Y, %H:%M:%S")
        .to_string()
}

/// Header label for the last successful load.
pub fn last_updated_label(timestamp: Option<DateTime<Utc>>, offset_seconds: i32) -> String {
    match timestamp {
        Some(ts) => format!("Atualizado em {}", format_pt_br(ts, offset_seconds)),
        None => "Ainda não carregado".to_string(),
    }
}
