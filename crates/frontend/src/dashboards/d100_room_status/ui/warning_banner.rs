use contracts::dashboards::d100_room_status::BoardWarning;
use leptos::prelude::*;

#[component]
pub fn WarningBanner(
    #[prop(into)] warnings: Signal<Vec<BoardWarning>>,
    dismissed: RwSignal<bool>,
) -> impl IntoView {
    move || {
        let warnings = warnings.get();
        if warnings.is_empty() || dismissed.get() {
            return view! { <></> }.into_any();
        }
        view! {
            <div class="warning-banner" role="alert">
                <ul class="warning-banner__list">
                    {warnings.iter().map(|w| view! { <li>{w.message()}</li> }).collect_view()}
                </ul>
                <button
                    type="button"
                    class="warning-banner__close"
                    title="Fechar"
                    on:click=move |_| dismissed.set(true)
                >
                    "×"
                </button>
            </div>
        }
        .into_any()
    }
}
