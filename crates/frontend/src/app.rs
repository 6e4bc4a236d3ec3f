use crate::dashboards::RoomStatusBoard;
use crate::shared::location;
use contracts::dashboards::d100_room_status::BoardDirectives;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Directives are read once per page load; changing them means navigating.
    let directives = BoardDirectives::from_query(&location::current_search());
    log::info!(
        "Room board: tv={}, refresh={}ms, view={:?}",
        directives.tv_mode,
        directives.refresh_ms,
        directives.view
    );

    view! {
        <RoomStatusBoard directives=directives />
    }
}
