use contracts::dashboards::d100_room_status::{StatusCount, NO_STATUS_LABEL};
use leptos::prelude::*;

/// Status chips with their counts over the whole sheet. Clicking a chip
/// selects that status; the "no status" group cannot be selected.
#[component]
pub fn SummaryStrip(
    #[prop(into)] counts: Signal<Vec<StatusCount>>,
    #[prop(into)] selected: Signal<Option<String>>,
    on_select: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="summary-strip">
            {move || {
                let current = selected.get();
                counts.get().into_iter().map(|StatusCount { label, count }| {
                    let selectable = label != NO_STATUS_LABEL;
                    let active = current.as_deref() == Some(label.as_str());
                    let class = format!(
                        "summary-chip{}{}",
                        if active { " summary-chip--active" } else { "" },
                        if selectable { "" } else { " summary-chip--static" },
                    );
                    let value = label.clone();
                    view! {
                        <button
                            type="button"
                            class=class
                            disabled=!selectable
                            on:click=move |_| on_select.run(value.clone())
                        >
                            <span class="summary-chip__label">{label}</span>
                            <span class="summary-chip__count">{format!("• {}", count)}</span>
                        </button>
                    }
                }).collect_view()
            }}
        </div>
    }
}
