use crate::transport::http::handlers::common::{parse_role, success};
use crate::transport::http::types::{ApiResponse, AppState};
use axum::extract::{Path, State};
use axum::response::IntoResponse;

#[utoipa::path(
    get,
    path = "/api/dashboards/{role}",
    params(
        ("role" = String, Path, description = "Role (admin, coach, judge, organizer, player)")
    ),
    responses(
        (status = 200, description = "Panels of the role's dashboard", body = ApiResponse),
        (status = 404, description = "Unknown role", body = ApiResponse)
    )
)]
pub async fn get_dashboard_handler(
    State(state): State<AppState>,
    Path(role): Path<String>,
) -> impl IntoResponse {
    let role = match parse_role(&role) {
        Ok(r) => r,
        Err(resp) => return resp.into_response(),
    };
    let panels: Vec<&str> = state
        .dashboards
        .get(&role)
        .map(|d| d.panels.iter().map(|(name, _)| name.as_str()).collect())
        .unwrap_or_default();
    success(serde_json::json!({
        "role": role,
        "panels": panels,
    }))
}
