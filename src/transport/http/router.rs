use crate::transport::http::handlers::{dashboards, health, panels};
use crate::transport::http::types::{
    ApiResponse, DeleteRequest, FieldChangeRequest, FiltersRequest, PageRequest, PageStep,
    ToggleRequest,
};
use axum::routing::{delete, get, post};
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        dashboards::get_dashboard_handler,
        panels::get_panel_handler,
        panels::load_panel_handler,
        panels::set_filters_handler,
        panels::set_page_handler,
        panels::open_add_handler,
        panels::open_edit_handler,
        panels::change_field_handler,
        panels::cancel_draft_handler,
        panels::submit_draft_handler,
        panels::delete_record_handler,
        panels::toggle_record_handler,
        panels::dismiss_error_handler
    ),
    components(schemas(
        ApiResponse,
        FiltersRequest,
        PageRequest,
        PageStep,
        FieldChangeRequest,
        DeleteRequest,
        ToggleRequest
    ))
)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    let panel = "/api/dashboards/:role/panels/:entity";
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route("/api/dashboards/:role", get(dashboards::get_dashboard_handler))
        .route(panel, get(panels::get_panel_handler))
        .route(&format!("{}/load", panel), post(panels::load_panel_handler))
        .route(&format!("{}/filters", panel), post(panels::set_filters_handler))
        .route(&format!("{}/page", panel), post(panels::set_page_handler))
        .route(&format!("{}/draft/add", panel), post(panels::open_add_handler))
        .route(
            &format!("{}/draft/edit/:id", panel),
            post(panels::open_edit_handler),
        )
        .route(
            &format!("{}/draft/field", panel),
            post(panels::change_field_handler),
        )
        .route(
            &format!("{}/draft/cancel", panel),
            post(panels::cancel_draft_handler),
        )
        .route(
            &format!("{}/draft/submit", panel),
            post(panels::submit_draft_handler),
        )
        .route(
            &format!("{}/records/:id/delete", panel),
            post(panels::delete_record_handler),
        )
        .route(
            &format!("{}/records/:id/toggle", panel),
            post(panels::toggle_record_handler),
        )
        .route(&format!("{}/error", panel), delete(panels::dismiss_error_handler))
        .with_state(app_state)
}
