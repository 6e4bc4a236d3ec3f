//! Single-owner state of the room board across load cycles.
//!
//! Each load is tagged with a `CycleTicket` when it starts. A completion is
//! applied only if its ticket is newer than the last settled one, so a slow
//! response can never overwrite data from a later request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::aggregator::{count_by_status, role_options};
use super::column_mapper::build_mapping;
use super::dto::{
    BoardSnapshot, BoardWarning, Dataset, Role, RoleMapping, RoleOptions, RoleOverrides, Row,
    Selections, StatusCount,
};
use super::error::LoadError;
use super::row_filter::filter_rows;

/// Sequence number of one started load cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CycleTicket(u64);

impl CycleTicket {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Issues strictly increasing tickets.
#[derive(Debug, Clone, Default)]
pub struct CycleCounter {
    issued: u64,
}

impl CycleCounter {
    pub fn begin(&mut self) -> CycleTicket {
        self.issued += 1;
        CycleTicket(self.issued)
    }

    pub fn last_issued(&self) -> CycleTicket {
        CycleTicket(self.issued)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// New dataset installed.
    Applied,
    /// Load failed; previous data kept, warning raised.
    Failed,
    /// Older than an already settled cycle; nothing changed.
    Stale,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardState {
    pub dataset: Dataset,
    pub mapping: RoleMapping,
    pub options: RoleOptions,
    pub warnings: Vec<BoardWarning>,
    pub last_updated: Option<DateTime<Utc>>,
    settled: CycleTicket,
}

impl BoardState {
    pub fn settled(&self) -> CycleTicket {
        self.settled
    }

    /// Settles one load cycle.
    pub fn apply(
        &mut self,
        ticket: CycleTicket,
        outcome: Result<Dataset, LoadError>,
        overrides: &RoleOverrides,
        now: DateTime<Utc>,
    ) -> ApplyOutcome {
        if ticket <= self.settled {
            log::debug!(
                "Discarding stale cycle {} (settled {})",
                ticket.value(),
                self.settled.value()
            );
            return ApplyOutcome::Stale;
        }
        self.settled = ticket;

        match outcome {
            Ok(dataset) => {
                let mapping = build_mapping(&dataset.fields, overrides);
                let options = role_options(&dataset, &mapping);

                let mut warnings = Vec::new();
                if !mapping.is_mapped(Role::Room) {
                    warnings.push(BoardWarning::MissingRoomColumn);
                }

                log::info!(
                    "Cycle {}: {} rows, {} fields",
                    ticket.value(),
                    dataset.len(),
                    dataset.fields.len()
                );

                self.dataset = dataset;
                self.mapping = mapping;
                self.options = options;
                self.warnings = warnings;
                self.last_updated = Some(now);
                ApplyOutcome::Applied
            }
            Err(error) => {
                log::warn!("Cycle {} failed: {}", ticket.value(), error);
                let warning = match error {
                    LoadError::NotConfigured => BoardWarning::SourceNotConfigured,
                    other => BoardWarning::LoadFailed {
                        message: other.to_string(),
                    },
                };
                self.warnings
                    .retain(|w| matches!(w, BoardWarning::MissingRoomColumn));
                self.warnings.push(warning);
                ApplyOutcome::Failed
            }
        }
    }

    pub fn counts(&self) -> Vec<StatusCount> {
        count_by_status(&self.dataset, self.mapping.get(Role::Status))
    }

    pub fn filter(&self, query: &str, selections: &Selections) -> Vec<&Row> {
        filter_rows(&self.dataset, &self.mapping, query, selections)
    }

    pub fn snapshot(&self, query: &str, selections: &Selections) -> BoardSnapshot {
        BoardSnapshot {
            fields: self.dataset.fields.clone(),
            mapping: self.mapping.clone(),
            options: self.options.clone(),
            counts: self.counts(),
            rows: self.filter(query, selections).into_iter().cloned().collect(),
            total_rows: self.dataset.len(),
            warnings: self.warnings.clone(),
            fetched_at: self.last_updated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d100_room_status::dataset::parse_csv;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 4, hour, 0, 0).unwrap()
    }

    fn sheet(csv: &str) -> Result<Dataset, LoadError> {
        parse_csv(csv)
    }

    #[test]
    fn test_tickets_increase() {
        let mut counter = CycleCounter::default();
        let first = counter.begin();
        let second = counter.begin();
        assert!(second > first);
        assert_eq!(counter.last_issued(), second);
    }

    #[test]
    fn test_success_installs_dataset_mapping_and_options() {
        let mut counter = CycleCounter::default();
        let mut state = BoardState::default();
        let outcome = state.apply(
            counter.begin(),
            sheet("SALA,STATUS,BLOCO\n101,Livre,A\n102,Ocupada,B\n"),
            &RoleOverrides::default(),
            at(8),
        );
        assert_eq!(outcome, ApplyOutcome::Applied);
        assert_eq!(state.dataset.len(), 2);
        assert_eq!(state.mapping.room.as_deref(), Some("SALA"));
        assert_eq!(state.options.for_role(Role::Location), &["A".to_string(), "B".to_string()]);
        assert!(state.warnings.is_empty());
        assert_eq!(state.last_updated, Some(at(8)));
    }

    #[test]
    fn test_failure_keeps_previous_data() {
        let mut counter = CycleCounter::default();
        let mut state = BoardState::default();
        state.apply(
            counter.begin(),
            sheet("SALA,STATUS\n101,Livre\n102,Livre\n103,Ocupada\n"),
            &RoleOverrides::default(),
            at(8),
        );

        let outcome = state.apply(
            counter.begin(),
            Err(LoadError::Status(500)),
            &RoleOverrides::default(),
            at(9),
        );
        assert_eq!(outcome, ApplyOutcome::Failed);
        assert_eq!(state.dataset.len(), 3);
        assert_eq!(state.last_updated, Some(at(8)));
        assert!(matches!(
            state.warnings.as_slice(),
            [BoardWarning::LoadFailed { .. }]
        ));

        let outcome = state.apply(
            counter.begin(),
            sheet("SALA,STATUS\n201,Livre\n"),
            &RoleOverrides::default(),
            at(10),
        );
        assert_eq!(outcome, ApplyOutcome::Applied);
        assert_eq!(state.dataset.len(), 1);
        assert!(state.warnings.is_empty());
    }

    #[test]
    fn test_repeated_failures_do_not_stack_warnings() {
        let mut counter = CycleCounter::default();
        let mut state = BoardState::default();
        for _ in 0..3 {
            state.apply(
                counter.begin(),
                Err(LoadError::Network("timeout".into())),
                &RoleOverrides::default(),
                at(8),
            );
        }
        assert_eq!(state.warnings.len(), 1);
        assert!(state.dataset.is_empty());
        assert_eq!(state.last_updated, None);
    }

    #[test]
    fn test_unconfigured_source_warning() {
        let mut counter = CycleCounter::default();
        let mut state = BoardState::default();
        state.apply(
            counter.begin(),
            Err(LoadError::NotConfigured),
            &RoleOverrides::default(),
            at(8),
        );
        assert_eq!(state.warnings, vec![BoardWarning::SourceNotConfigured]);
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut counter = CycleCounter::default();
        let mut state = BoardState::default();
        let timer = counter.begin();
        let manual = counter.begin();

        let outcome = state.apply(
            manual,
            sheet("SALA,STATUS\n101,Ocupada\n"),
            &RoleOverrides::default(),
            at(9),
        );
        assert_eq!(outcome, ApplyOutcome::Applied);

        let outcome = state.apply(
            timer,
            sheet("SALA,STATUS\n101,Livre\n102,Livre\n"),
            &RoleOverrides::default(),
            at(8),
        );
        assert_eq!(outcome, ApplyOutcome::Stale);
        assert_eq!(state.dataset.len(), 1);
        assert_eq!(state.settled(), manual);
        assert_eq!(state.last_updated, Some(at(9)));
    }

    #[test]
    fn test_missing_room_column_warning_and_override() {
        let mut counter = CycleCounter::default();
        let mut state = BoardState::default();
        let csv = "Identificador,Situação\nA-1,Livre\n";

        state.apply(counter.begin(), sheet(csv), &RoleOverrides::default(), at(8));
        assert_eq!(state.warnings, vec![BoardWarning::MissingRoomColumn]);

        let overrides = RoleOverrides::default().with(Role::Room, "identificador");
        state.apply(counter.begin(), sheet(csv), &overrides, at(9));
        assert!(state.warnings.is_empty());
        assert_eq!(state.mapping.room.as_deref(), Some("Identificador"));
    }

    #[test]
    fn test_snapshot_counts_ignore_filters() {
        let mut counter = CycleCounter::default();
        let mut state = BoardState::default();
        state.apply(
            counter.begin(),
            sheet("SALA,STATUS\n101,Livre\n102,Livre\n103,Ocupada\n"),
            &RoleOverrides::default(),
            at(8),
        );
        let selections = Selections::default().with(Role::Status, "Ocupada");
        let snapshot = state.snapshot("", &selections);
        assert_eq!(snapshot.rows.len(), 1);
        assert_eq!(snapshot.total_rows, 3);
        assert_eq!(snapshot.counts[0], StatusCount { label: "Livre".into(), count: 2 });
        assert_eq!(snapshot.fetched_at, Some(at(8)));
    }
}
