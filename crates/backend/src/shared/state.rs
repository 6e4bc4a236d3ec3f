use std::sync::Arc;

use crate::dashboards::d100_room_status::source::SheetSource;
use crate::shared::config::Config;

/// Read-only state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub source: Arc<dyn SheetSource>,
}
