use chrono::Utc;
use contracts::dashboards::d100_room_status::{
    parse_csv, ApplyOutcome, BoardQuery, BoardSnapshot, BoardState, CycleCounter, LoadError,
};

use super::source::SheetSource;

/// Raw CSV text of the configured sheet.
pub async fn fetch_source(source: &dyn SheetSource) -> Result<String, LoadError> {
    source.fetch_csv().await
}

/// One full load cycle: fetch, parse, map, then filter and count.
///
/// Load failures do not fail the request; they come back as snapshot warnings.
pub async fn build_snapshot(source: &dyn SheetSource, query: &BoardQuery) -> BoardSnapshot {
    let mut cycles = CycleCounter::default();
    let ticket = cycles.begin();

    let outcome = match source.fetch_csv().await {
        Ok(text) => parse_csv(&text),
        Err(e) => Err(e),
    };

    let mut state = BoardState::default();
    match state.apply(ticket, outcome, &query.overrides, Utc::now()) {
        ApplyOutcome::Applied => tracing::info!(
            "D100 Board: {} rows, {} fields",
            state.dataset.len(),
            state.dataset.fields.len()
        ),
        ApplyOutcome::Failed => tracing::warn!("D100 Board: load failed, serving empty board"),
        ApplyOutcome::Stale => {}
    }

    let mut selections = query.selections.clone();
    selections.retain_available(&state.options);

    state.snapshot(&query.query, &selections)
}
