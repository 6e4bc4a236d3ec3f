use contracts::dashboards::d100_room_status::{
    parse_csv, Dataset, LoadError, SOURCE_STATE_HEADER,
};
use gloo_net::http::Request;
use web_sys::RequestCache;

const API_BASE: &str = "/api/d100";

/// Fetches the sheet through the backend proxy and parses it.
///
/// Caching is disabled twice: `cache: no-store` on the request and a
/// timestamp parameter in the URL.
pub async fn fetch_dataset() -> Result<Dataset, LoadError> {
    let url = format!("{}/source?_ts={}", API_BASE, js_sys::Date::now() as u64);

    let response = Request::get(&url)
        .cache(RequestCache::NoStore)
        .send()
        .await
        .map_err(|e| LoadError::Network(e.to_string()))?;

    if !response.ok() {
        let source_state = response.headers().get(SOURCE_STATE_HEADER);
        return Err(LoadError::from_proxy_status(
            response.status(),
            source_state.as_deref(),
        ));
    }

    let text = response
        .text()
        .await
        .map_err(|e| LoadError::NotText(e.to_string()))?;

    parse_csv(&text)
}
