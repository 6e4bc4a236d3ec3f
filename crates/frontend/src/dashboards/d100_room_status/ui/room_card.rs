use contracts::dashboards::d100_room_status::{Role, RoleMapping, Row};
use contracts::shared::text::display_or_dash;
use leptos::prelude::*;

use crate::shared::components::ui::StatusBadge;

/// One room in the card grid. Identity fields fall back to a dash; the
/// optional lines are omitted when blank.
#[component]
pub fn RoomCard(row: Row, mapping: RoleMapping) -> impl IntoView {
    let value = |role: Role| row.value_of(mapping.get(role)).to_string();

    let location = display_or_dash(&value(Role::Location)).to_string();
    let room = display_or_dash(&value(Role::Room)).to_string();
    let status = display_or_dash(&value(Role::Status)).to_string();
    let course = display_or_dash(&value(Role::Course)).to_string();
    let schedule = value(Role::Schedule);
    let instructor = value(Role::Instructor);
    let notes = value(Role::Notes);
    let shift = value(Role::Shift);

    view! {
        <article class="room-card">
            <div class="room-card__header">
                <div>
                    <div class="room-card__location">{location}</div>
                    <div class="room-card__room">{room}</div>
                </div>
                <StatusBadge status=status />
            </div>
            <div class="room-card__body">
                <div class="room-card__course">{course}</div>
                {(!schedule.is_empty()).then(|| view! {
                    <div class="room-card__line">{schedule}</div>
                })}
                {(!shift.is_empty()).then(|| view! {
                    <div class="room-card__line">"Turno: " {shift}</div>
                })}
                {(!instructor.is_empty()).then(|| view! {
                    <div class="room-card__line">"Docente: " {instructor}</div>
                })}
                {(!notes.is_empty()).then(|| view! {
                    <div class="room-card__notes">{notes}</div>
                })}
            </div>
        </article>
    }
}
