use leptos::prelude::*;

/// Select with label and an "all" entry (empty value) on top.
#[component]
pub fn Select(
    /// Label text (optional)
    #[prop(optional, into)]
    label: MaybeProp<String>,
    /// Current value; empty = the "all" entry
    #[prop(into)]
    value: Signal<String>,
    /// Change event handler
    #[prop(optional)]
    on_change: Option<Callback<String>>,
    /// Values offered below the "all" entry
    #[prop(into)]
    options: Signal<Vec<String>>,
    /// Text of the "all" entry
    #[prop(into)]
    all_label: String,
    /// Disabled state (reactive)
    #[prop(optional, into)]
    disabled: MaybeProp<bool>,
    /// ID for the select element
    #[prop(optional, into)]
    id: MaybeProp<String>,
) -> impl IntoView {
    let select_id = move || id.get().unwrap_or_default();

    view! {
        <div class="form__group">
            {move || label.get().map(|l| view! {
                <label class="form__label" for=select_id>
                    {l}
                </label>
            })}
            <select
                id=select_id
                class="form__select"
                disabled=move || disabled.get().unwrap_or(false)
                prop:value=move || value.get()
                on:change=move |ev| {
                    if let Some(handler) = on_change {
                        handler.run(event_target_value(&ev));
                    }
                }
            >
                <option value="" selected=move || value.get().is_empty()>
                    {all_label}
                </option>
                <For
                    each=move || options.get()
                    key=|val| val.clone()
                    children=move |val| {
                        let val_clone = val.clone();
                        let is_selected = move || value.get() == val_clone;
                        let val_attr = val.clone();
                        view! {
                            <option value=val_attr selected=is_selected>
                                {val}
                            </option>
                        }
                    }
                />
            </select>
        </div>
    }
}
