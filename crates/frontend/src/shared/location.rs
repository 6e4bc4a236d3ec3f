//! Access to `window.location`.

/// Current query string, including the leading `?` (empty when absent).
pub fn current_search() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

/// Reloads the current page with another query string.
pub fn navigate_with_query(query: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let location = window.location();
    let path = location.pathname().unwrap_or_else(|_| "/".to_string());
    let target = if query.is_empty() {
        path
    } else {
        format!("{}?{}", path, query)
    };
    if let Err(e) = location.set_href(&target) {
        log::error!("Navigation to {} failed: {:?}", target, e);
    }
}

/// Browser UTC offset in seconds east of Greenwich.
pub fn local_offset_seconds() -> i32 {
    // getTimezoneOffset is minutes *behind* UTC
    -(js_sys::Date::new_0().get_timezone_offset() as i32) * 60
}
