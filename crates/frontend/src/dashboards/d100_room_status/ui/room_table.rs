use contracts::dashboards::d100_room_status::Row;
use leptos::prelude::*;

use crate::shared::components::ui::StatusBadge;

/// Dense table view; the status column is rendered as a badge.
#[component]
pub fn RoomTable(
    #[prop(into)] rows: Signal<Vec<Row>>,
    #[prop(into)] columns: Signal<Vec<String>>,
    #[prop(into)] status_column: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <div class="room-table__wrapper">
            <table class="room-table">
                <thead>
                    <tr>
                        {move || columns.get().into_iter().map(|column| view! {
                            <th>{column}</th>
                        }).collect_view()}
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let columns = columns.get();
                        let status_column = status_column.get();
                        rows.get().into_iter().map(|row| {
                            let cells = columns.iter().map(|column| {
                                let value = row.get(column).trim().to_string();
                                if status_column.as_deref() == Some(column.as_str()) && !value.is_empty() {
                                    view! { <td><StatusBadge status=value /></td> }.into_any()
                                } else {
                                    view! { <td>{value}</td> }.into_any()
                                }
                            }).collect_view();
                            view! { <tr>{cells}</tr> }
                        }).collect_view()
                    }}
                </tbody>
            </table>
        </div>
    }
}
