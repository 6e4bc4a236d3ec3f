use contracts::dashboards::d100_room_status::{BoardState, Role, Selections};
use leptos::prelude::*;

use crate::shared::components::ui::{Button, SearchInput, Select};

/// Free-text search, one dropdown per filterable role and a reset button.
/// A dropdown is disabled while its role has no column.
#[component]
pub fn FilterBar(
    board: RwSignal<BoardState>,
    query: RwSignal<String>,
    selections: RwSignal<Selections>,
) -> impl IntoView {
    let selects = Role::FILTERABLE
        .into_iter()
        .map(|role| {
            let options = Signal::derive(move || board.with(|b| b.options.for_role(role).to_vec()));
            let value = Signal::derive(move || {
                selections.with(|s| s.get(role).unwrap_or_default().to_string())
            });
            let unmapped = Signal::derive(move || board.with(|b| !b.mapping.is_mapped(role)));

            view! {
                <Select
                    id=format!("filter-{}", role.key())
                    value=value
                    options=options
                    all_label=format!("{} (todos)", role.label())
                    disabled=unmapped
                    on_change=Callback::new(move |v: String| selections.update(|s| s.set(role, v)))
                />
            }
        })
        .collect_view();

    let has_filters = Signal::derive(move || {
        !query.with(|q| q.trim().is_empty()) || !selections.with(Selections::is_empty)
    });

    view! {
        <div class="filter-bar">
            <SearchInput
                id="search"
                value=query
                placeholder="Buscar sala, curso, docente…"
                on_input=Callback::new(move |v: String| query.set(v))
            />
            {selects}
            <Button
                variant="ghost"
                disabled=Signal::derive(move || !has_filters.get())
                on_click=Callback::new(move |_| {
                    query.set(String::new());
                    selections.update(|s| s.clear());
                })
            >
                "Limpar filtros"
            </Button>
        </div>
    }
}
