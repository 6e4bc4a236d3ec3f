use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use contracts::dashboards::d100_room_status::{
    BoardQuery, BoardSnapshot, LoadError, SOURCE_NOT_CONFIGURED, SOURCE_STATE_HEADER,
};

use crate::dashboards::d100_room_status::service;
use crate::shared::state::AppState;

/// GET /api/d100/source
///
/// Proxies the configured CSV export, never cached.
pub async fn get_source(State(state): State<AppState>) -> Response {
    match service::fetch_source(state.source.as_ref()).await {
        Ok(csv) => {
            tracing::info!("D100 Board: proxied {} bytes of CSV", csv.len());
            (
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                    (header::CACHE_CONTROL, "no-store"),
                ],
                csv,
            )
                .into_response()
        }
        Err(e) => {
            let status = status_for(&e);
            tracing::error!("D100 Board: failed to fetch CSV source: {}", e);
            let mut response =
                (status, [(header::CACHE_CONTROL, "no-store")], e.to_string()).into_response();
            if e == LoadError::NotConfigured {
                response.headers_mut().insert(
                    SOURCE_STATE_HEADER,
                    HeaderValue::from_static(SOURCE_NOT_CONFIGURED),
                );
            }
            response
        }
    }
}

/// GET /api/d100/board?q=lab&sel_status=Livre&sala=Ambiente
pub async fn get_board(
    State(state): State<AppState>,
    Query(params): Query<BTreeMap<String, String>>,
) -> Result<Json<BoardSnapshot>, StatusCode> {
    let query = BoardQuery::from_params(&params);
    tracing::info!(
        "D100 Board: snapshot requested (q={:?}, {} selections)",
        query.query,
        query.selections.iter().count()
    );

    let snapshot = service::build_snapshot(state.source.as_ref(), &query).await;
    tracing::info!(
        "D100 Board: returning {} of {} rows",
        snapshot.rows.len(),
        snapshot.total_rows
    );
    Ok(Json(snapshot))
}

fn status_for(error: &LoadError) -> StatusCode {
    match error {
        LoadError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::BAD_GATEWAY,
    }
}
