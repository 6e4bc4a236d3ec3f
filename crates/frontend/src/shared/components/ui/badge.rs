use contracts::dashboards::d100_room_status::StatusTone;
use leptos::prelude::*;

/// Status pill coloured by the tone of its text
/// ("livre" green, "ocup" red, "manut"/"bloq" amber, anything else grey).
#[component]
pub fn StatusBadge(
    /// Status text shown in the badge
    #[prop(into)]
    status: String,
    /// Additional CSS classes
    #[prop(optional, into)]
    class: MaybeProp<String>,
) -> impl IntoView {
    let tone = StatusTone::for_status(&status);
    let additional_class = move || class.get().unwrap_or_default();

    view! {
        <span class=move || format!("badge {} {}", tone.css_class(), additional_class())>
            {status}
        </span>
    }
}
