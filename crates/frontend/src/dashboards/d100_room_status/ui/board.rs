use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use contracts::dashboards::d100_room_status::directives::toggle_tv_query;
use contracts::dashboards::d100_room_status::{
    table_columns, ApplyOutcome, BoardDirectives, BoardState, CycleCounter, Role, Selections,
    ViewMode,
};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::filter_bar::FilterBar;
use super::room_card::RoomCard;
use super::room_table::RoomTable;
use super::summary_strip::SummaryStrip;
use super::warning_banner::WarningBanner;
use crate::dashboards::d100_room_status::api;
use crate::shared::components::ui::Button;
use crate::shared::date_utils::last_updated_label;
use crate::shared::location;

/// Room status board: loads the sheet, refreshes it on a timer and renders
/// the filtered rooms as cards or as a table.
#[component]
pub fn RoomStatusBoard(directives: BoardDirectives) -> impl IntoView {
    let tv_mode = directives.tv_mode;
    let refresh_ms = directives.refresh_ms;
    let overrides = StoredValue::new(directives.overrides);

    let board = RwSignal::new(BoardState::default());
    let cycles = StoredValue::new(CycleCounter::default());
    let (loading, set_loading) = signal(false);
    let query = RwSignal::new(String::new());
    let selections = RwSignal::new(Selections::default());
    let view_mode = RwSignal::new(directives.view);
    let banner_dismissed = RwSignal::new(false);
    let utc_offset = location::local_offset_seconds();

    // Starts one load cycle. Several may be in flight; only the newest
    // completion is applied.
    let load = move || {
        let Some(ticket) = cycles.try_update_value(|c| c.begin()) else {
            return;
        };
        let Some(overrides) = overrides.try_with_value(|o| o.clone()) else {
            return;
        };
        set_loading.set(true);

        spawn_local(async move {
            let outcome = api::fetch_dataset().await;

            let Some(applied) =
                board.try_update(|state| state.apply(ticket, outcome, &overrides, Utc::now()))
            else {
                // board unmounted meanwhile
                return;
            };

            match applied {
                ApplyOutcome::Applied => {
                    let options = board.with_untracked(|b| b.options.clone());
                    selections.update(|s| s.retain_available(&options));
                    banner_dismissed.set(false);
                }
                ApplyOutcome::Failed => banner_dismissed.set(false),
                ApplyOutcome::Stale => log::debug!("Ignored stale load #{}", ticket.value()),
            }

            if cycles.try_with_value(|c| c.last_issued()) == Some(ticket) {
                set_loading.set(false);
            }
        });
    };

    // Initial load
    Effect::new(move |_| load());

    // Auto-refresh until the board is unmounted
    let alive = Arc::new(AtomicBool::new(true));
    {
        let alive = alive.clone();
        spawn_local(async move {
            loop {
                TimeoutFuture::new(refresh_ms).await;
                if !alive.load(Ordering::Relaxed) {
                    break;
                }
                load();
            }
        });
    }
    on_cleanup(move || alive.store(false, Ordering::Relaxed));

    let counts = Memo::new(move |_| board.with(|b| b.counts()));
    let visible_rows = Memo::new(move |_| {
        board.with(|b| {
            query.with(|q| {
                selections.with(|s| b.filter(q, s).into_iter().cloned().collect::<Vec<_>>())
            })
        })
    });
    let total_rows = Memo::new(move |_| board.with(|b| b.dataset.len()));
    let mapping = Memo::new(move |_| board.with(|b| b.mapping.clone()));
    let columns = Memo::new(move |_| board.with(|b| table_columns(&b.dataset.fields, &b.mapping)));
    let warnings = Signal::derive(move || board.with(|b| b.warnings.clone()));
    let selected_status =
        Signal::derive(move || selections.with(|s| s.get(Role::Status).map(str::to_string)));
    let status_column = Signal::derive(move || mapping.with(|m| m.status.clone()));

    let updated_label = move || {
        if loading.get() {
            "Atualizando dados…".to_string()
        } else {
            last_updated_label(board.with(|b| b.last_updated), utc_offset)
        }
    };

    let toggle_tv = move |_: leptos::ev::MouseEvent| {
        let target = toggle_tv_query(&location::current_search());
        location::navigate_with_query(&target);
    };

    view! {
        <div id="d100_room_status--board" class=if tv_mode { "board board--tv" } else { "board" }>
            <header class="board__header">
                <div>
                    <h1 class="board__title">"Painel de Salas"</h1>
                    <div class="board__updated">{updated_label}</div>
                </div>
                <div class="board__actions">
                    <Button
                        variant="secondary"
                        disabled=Signal::derive(move || loading.get())
                        on_click=Callback::new(move |_| load())
                    >
                        "Atualizar"
                    </Button>
                    <Button
                        variant="secondary"
                        pressed=Signal::derive(move || view_mode.get() == ViewMode::Table)
                        on_click=Callback::new(move |_| view_mode.update(|v| *v = v.toggled()))
                    >
                        {move || match view_mode.get() {
                            ViewMode::Cards => "Ver tabela",
                            ViewMode::Table => "Ver cards",
                        }}
                    </Button>
                    <Button
                        variant="primary"
                        pressed=tv_mode
                        on_click=Callback::new(toggle_tv)
                    >
                        {if tv_mode { "Sair do modo TV" } else { "Modo TV" }}
                    </Button>
                </div>
            </header>

            <WarningBanner warnings=warnings dismissed=banner_dismissed />

            <FilterBar board=board query=query selections=selections />

            <SummaryStrip
                counts=counts
                selected=selected_status
                on_select=Callback::new(move |label: String| {
                    selections.update(|s| s.set(Role::Status, label))
                })
            />

            <div class="board__result-count">
                {move || format!("{} de {} salas", visible_rows.with(Vec::len), total_rows.get())}
            </div>

            {move || {
                let rows = visible_rows.get();
                if rows.is_empty() {
                    return view! {
                        <div class="board__empty">
                            {move || if loading.get() {
                                "Carregando…"
                            } else {
                                "Nenhuma sala encontrada com os filtros atuais."
                            }}
                        </div>
                    }
                    .into_any();
                }

                match view_mode.get() {
                    ViewMode::Cards => {
                        let mapping = mapping.get();
                        view! {
                            <div class="room-grid">
                                {rows.into_iter().map(|row| view! {
                                    <RoomCard row=row mapping=mapping.clone() />
                                }).collect_view()}
                            </div>
                        }
                        .into_any()
                    }
                    ViewMode::Table => view! {
                        <RoomTable
                            rows=visible_rows
                            columns=columns
                            status_column=status_column
                        />
                    }
                    .into_any(),
                }
            }}
        </div>
    }
}
