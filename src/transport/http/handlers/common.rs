use crate::app::panel::Panel;
use crate::domain::role::Role;
use crate::error::ConsoleError;
use crate::transport::http::types::{ApiResponse, AppState};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tokio::sync::Mutex;

pub type Rejection = (StatusCode, Json<ApiResponse>);

pub fn failure(status: StatusCode, message: impl Into<String>) -> Rejection {
    (
        status,
        Json(ApiResponse {
            success: false,
            data: None,
            error: Some(message.into()),
        }),
    )
}

pub fn success(data: JsonValue) -> Response {
    (
        StatusCode::OK,
        Json(ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }),
    )
        .into_response()
}

pub fn status_for(err: &ConsoleError) -> StatusCode {
    match err {
        ConsoleError::LoadFailed(_) | ConsoleError::MutationFailed(_) => StatusCode::BAD_GATEWAY,
        ConsoleError::InvalidDraft(_) => StatusCode::BAD_REQUEST,
        ConsoleError::UnknownEntity(_) | ConsoleError::UnknownRole(_) => StatusCode::NOT_FOUND,
        ConsoleError::InvalidSchema(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn console_error(err: ConsoleError) -> Response {
    failure(status_for(&err), err.to_string()).into_response()
}

pub fn parse_role(role: &str) -> Result<Role, Rejection> {
    role.parse::<Role>()
        .map_err(|e| failure(StatusCode::NOT_FOUND, e.to_string()))
}

/// Looks up the panel `entity` on the dashboard of `role`.
pub fn find_panel(
    state: &AppState,
    role: &str,
    entity: &str,
) -> Result<Arc<Mutex<Panel>>, Rejection> {
    let role = parse_role(role)?;
    let entity = entity.trim().to_lowercase();
    state
        .dashboards
        .get(&role)
        .and_then(|d| d.panels.iter().find(|(name, _)| *name == entity))
        .map(|(_, panel)| panel.clone())
        .ok_or_else(|| {
            failure(
                StatusCode::NOT_FOUND,
                format!("Panel '{}' is not on the {} dashboard", entity, role),
            )
        })
}

/// Serializable snapshot of a panel: current page, banner and draft.
pub fn panel_view(panel: &Panel) -> JsonValue {
    let store = panel.store();
    let listing = panel.view();
    serde_json::json!({
        "entity": panel.entity(),
        "status": store.status(),
        "error": store.error_message(),
        "filters": store.filters(),
        "page": store.page(),
        "pageSize": store.page_size(),
        "totalPages": listing.total_pages,
        "filteredTotal": listing.filtered_total,
        "items": listing.items,
        "draft": panel.draft().draft(),
    })
}
