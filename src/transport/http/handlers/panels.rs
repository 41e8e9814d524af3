use crate::domain::filter::FilterState;
use crate::domain::record::RecordId;
use crate::transport::http::handlers::common::{
    console_error, failure, find_panel, panel_view, status_for, success,
};
use crate::transport::http::types::{
    json_422, ApiResponse, AppState, DeleteRequest, FieldChangeRequest, FiltersRequest,
    PageRequest, PageStep, ToggleRequest,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tracing::info;

#[utoipa::path(
    get,
    path = "/api/dashboards/{role}/panels/{entity}",
    params(
        ("role" = String, Path, description = "Role"),
        ("entity" = String, Path, description = "Entity panel (e.g. users)")
    ),
    responses(
        (status = 200, description = "Current page, filters, banner and draft", body = ApiResponse),
        (status = 404, description = "Unknown role or panel", body = ApiResponse)
    )
)]
pub async fn get_panel_handler(
    State(state): State<AppState>,
    Path((role, entity)): Path<(String, String)>,
) -> impl IntoResponse {
    let panel = match find_panel(&state, &role, &entity) {
        Ok(p) => p,
        Err(resp) => return resp.into_response(),
    };
    let panel = panel.lock().await;
    success(panel_view(&panel))
}

#[utoipa::path(
    post,
    path = "/api/dashboards/{role}/panels/{entity}/load",
    params(
        ("role" = String, Path, description = "Role"),
        ("entity" = String, Path, description = "Entity panel (e.g. users)")
    ),
    responses(
        (status = 200, description = "Loaded (or superseded by a newer load)", body = ApiResponse),
        (status = 404, description = "Unknown role or panel", body = ApiResponse),
        (status = 502, description = "Data source failed", body = ApiResponse)
    )
)]
pub async fn load_panel_handler(
    State(state): State<AppState>,
    Path((role, entity)): Path<(String, String)>,
) -> impl IntoResponse {
    let panel = match find_panel(&state, &role, &entity) {
        Ok(p) => p,
        Err(resp) => return resp.into_response(),
    };

    // The fetch runs without the panel lock so a newer load can supersede it.
    let pending = panel.lock().await.begin_load();
    let (ticket, result) = pending.fetch().await;
    let load_error = result.as_ref().err().cloned();

    let mut panel = panel.lock().await;
    let applied = panel.finish_load(ticket, result);
    if !applied {
        info!(entity = panel.entity(), "load superseded by a newer request");
        let mut view = panel_view(&panel);
        view["superseded"] = serde_json::Value::Bool(true);
        return success(view);
    }
    match load_error {
        Some(e) => (
            status_for(&e),
            Json(ApiResponse {
                success: false,
                data: Some(panel_view(&panel)),
                error: Some(e.to_string()),
            }),
        )
            .into_response(),
        None => success(panel_view(&panel)),
    }
}

#[utoipa::path(
    post,
    path = "/api/dashboards/{role}/panels/{entity}/filters",
    params(
        ("role" = String, Path, description = "Role"),
        ("entity" = String, Path, description = "Entity panel (e.g. users)")
    ),
    request_body = FiltersRequest,
    responses(
        (status = 200, description = "Filters applied, page reset to 1", body = ApiResponse),
        (status = 404, description = "Unknown role or panel", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn set_filters_handler(
    State(state): State<AppState>,
    Path((role, entity)): Path<(String, String)>,
    request: Result<Json<FiltersRequest>, JsonRejection>,
) -> impl IntoResponse {
    let panel = match find_panel(&state, &role, &entity) {
        Ok(p) => p,
        Err(resp) => return resp.into_response(),
    };
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => {
            return json_422(e, "{\"search\": \"...\", \"filters\": {\"name\": \"value\"}}")
                .into_response()
        }
    };

    let mut panel = panel.lock().await;
    panel.set_filters(FilterState {
        search: request.search.unwrap_or_default(),
        filters: request.filters,
    });
    success(panel_view(&panel))
}

#[utoipa::path(
    post,
    path = "/api/dashboards/{role}/panels/{entity}/page",
    params(
        ("role" = String, Path, description = "Role"),
        ("entity" = String, Path, description = "Entity panel (e.g. users)")
    ),
    request_body = PageRequest,
    responses(
        (status = 200, description = "Page changed (out-of-range requests keep the current page)", body = ApiResponse),
        (status = 400, description = "Neither page nor step given", body = ApiResponse),
        (status = 404, description = "Unknown role or panel", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn set_page_handler(
    State(state): State<AppState>,
    Path((role, entity)): Path<(String, String)>,
    request: Result<Json<PageRequest>, JsonRejection>,
) -> impl IntoResponse {
    let panel = match find_panel(&state, &role, &entity) {
        Ok(p) => p,
        Err(resp) => return resp.into_response(),
    };
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "{\"page\": 2} or {\"step\": \"next\"}").into_response(),
    };

    let mut panel = panel.lock().await;
    match (request.step, request.page) {
        (Some(PageStep::Next), _) => {
            panel.next_page();
        }
        (Some(PageStep::Prev), _) => {
            panel.prev_page();
        }
        (None, Some(page)) => {
            panel.go_to_page(page);
        }
        (None, None) => {
            return failure(StatusCode::BAD_REQUEST, "page or step is required").into_response()
        }
    }
    success(panel_view(&panel))
}

#[utoipa::path(
    post,
    path = "/api/dashboards/{role}/panels/{entity}/draft/add",
    params(
        ("role" = String, Path, description = "Role"),
        ("entity" = String, Path, description = "Entity panel (e.g. users)")
    ),
    responses(
        (status = 200, description = "Add draft opened from the blank template", body = ApiResponse),
        (status = 404, description = "Unknown role or panel", body = ApiResponse)
    )
)]
pub async fn open_add_handler(
    State(state): State<AppState>,
    Path((role, entity)): Path<(String, String)>,
) -> impl IntoResponse {
    let panel = match find_panel(&state, &role, &entity) {
        Ok(p) => p,
        Err(resp) => return resp.into_response(),
    };
    let mut panel = panel.lock().await;
    match panel.open_add() {
        Ok(()) => success(panel_view(&panel)),
        Err(e) => console_error(e),
    }
}

#[utoipa::path(
    post,
    path = "/api/dashboards/{role}/panels/{entity}/draft/edit/{id}",
    params(
        ("role" = String, Path, description = "Role"),
        ("entity" = String, Path, description = "Entity panel (e.g. users)"),
        ("id" = i64, Path, description = "Record identity")
    ),
    responses(
        (status = 200, description = "Edit draft opened", body = ApiResponse),
        (status = 400, description = "Record not found", body = ApiResponse),
        (status = 404, description = "Unknown role or panel", body = ApiResponse)
    )
)]
pub async fn open_edit_handler(
    State(state): State<AppState>,
    Path((role, entity, id)): Path<(String, String, RecordId)>,
) -> impl IntoResponse {
    let panel = match find_panel(&state, &role, &entity) {
        Ok(p) => p,
        Err(resp) => return resp.into_response(),
    };
    let mut panel = panel.lock().await;
    match panel.open_edit(id) {
        Ok(()) => success(panel_view(&panel)),
        Err(e) => console_error(e),
    }
}

#[utoipa::path(
    post,
    path = "/api/dashboards/{role}/panels/{entity}/draft/field",
    params(
        ("role" = String, Path, description = "Role"),
        ("entity" = String, Path, description = "Entity panel (e.g. users)")
    ),
    request_body = FieldChangeRequest,
    responses(
        (status = 200, description = "Pending value updated", body = ApiResponse),
        (status = 400, description = "No draft is open", body = ApiResponse),
        (status = 404, description = "Unknown role or panel", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn change_field_handler(
    State(state): State<AppState>,
    Path((role, entity)): Path<(String, String)>,
    request: Result<Json<FieldChangeRequest>, JsonRejection>,
) -> impl IntoResponse {
    let panel = match find_panel(&state, &role, &entity) {
        Ok(p) => p,
        Err(resp) => return resp.into_response(),
    };
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "{\"name\": \"...\", \"value\": ...}").into_response(),
    };
    let mut panel = panel.lock().await;
    match panel.change_field(&request.name, request.value) {
        Ok(()) => success(panel_view(&panel)),
        Err(e) => console_error(e),
    }
}

#[utoipa::path(
    post,
    path = "/api/dashboards/{role}/panels/{entity}/draft/cancel",
    params(
        ("role" = String, Path, description = "Role"),
        ("entity" = String, Path, description = "Entity panel (e.g. users)")
    ),
    responses(
        (status = 200, description = "Draft discarded", body = ApiResponse),
        (status = 404, description = "Unknown role or panel", body = ApiResponse)
    )
)]
pub async fn cancel_draft_handler(
    State(state): State<AppState>,
    Path((role, entity)): Path<(String, String)>,
) -> impl IntoResponse {
    let panel = match find_panel(&state, &role, &entity) {
        Ok(p) => p,
        Err(resp) => return resp.into_response(),
    };
    let mut panel = panel.lock().await;
    panel.cancel();
    success(panel_view(&panel))
}

#[utoipa::path(
    post,
    path = "/api/dashboards/{role}/panels/{entity}/draft/submit",
    params(
        ("role" = String, Path, description = "Role"),
        ("entity" = String, Path, description = "Entity panel (e.g. users)")
    ),
    responses(
        (status = 200, description = "Draft committed", body = ApiResponse),
        (status = 400, description = "No draft open or draft invalid", body = ApiResponse),
        (status = 404, description = "Unknown role or panel", body = ApiResponse),
        (status = 502, description = "Data source rejected the change", body = ApiResponse)
    )
)]
pub async fn submit_draft_handler(
    State(state): State<AppState>,
    Path((role, entity)): Path<(String, String)>,
) -> impl IntoResponse {
    let panel = match find_panel(&state, &role, &entity) {
        Ok(p) => p,
        Err(resp) => return resp.into_response(),
    };
    let mut panel = panel.lock().await;
    match panel.submit().await {
        Ok(Some(record)) => {
            let mut view = panel_view(&panel);
            view["saved"] = serde_json::Value::Object(record);
            success(view)
        }
        Ok(None) => failure(StatusCode::BAD_REQUEST, "no draft is open").into_response(),
        Err(e) => console_error(e),
    }
}

#[utoipa::path(
    post,
    path = "/api/dashboards/{role}/panels/{entity}/records/{id}/delete",
    params(
        ("role" = String, Path, description = "Role"),
        ("entity" = String, Path, description = "Entity panel (e.g. users)"),
        ("id" = i64, Path, description = "Record identity")
    ),
    request_body = DeleteRequest,
    responses(
        (status = 200, description = "Deleted (or already absent)", body = ApiResponse),
        (status = 400, description = "confirm was not true", body = ApiResponse),
        (status = 404, description = "Unknown role or panel", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 502, description = "Data source rejected the delete", body = ApiResponse)
    )
)]
pub async fn delete_record_handler(
    State(state): State<AppState>,
    Path((role, entity, id)): Path<(String, String, RecordId)>,
    request: Result<Json<DeleteRequest>, JsonRejection>,
) -> impl IntoResponse {
    let panel = match find_panel(&state, &role, &entity) {
        Ok(p) => p,
        Err(resp) => return resp.into_response(),
    };
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "{\"confirm\": true}").into_response(),
    };

    let mut panel = panel.lock().await;
    if !request.confirm {
        // Still routed through the panel so the refusal is logged; nothing changes.
        return match panel.delete(id, false).await {
            Ok(_) => failure(StatusCode::BAD_REQUEST, "confirm must be true to delete")
                .into_response(),
            Err(e) => console_error(e),
        };
    }
    match panel.delete(id, true).await {
        Ok(removed) => {
            let mut view = panel_view(&panel);
            view["removed"] = serde_json::Value::Bool(removed);
            success(view)
        }
        Err(e) => console_error(e),
    }
}

#[utoipa::path(
    post,
    path = "/api/dashboards/{role}/panels/{entity}/records/{id}/toggle",
    params(
        ("role" = String, Path, description = "Role"),
        ("entity" = String, Path, description = "Entity panel (e.g. users)"),
        ("id" = i64, Path, description = "Record identity")
    ),
    request_body = ToggleRequest,
    responses(
        (status = 200, description = "Field flipped (value null if nothing to flip)", body = ApiResponse),
        (status = 404, description = "Unknown role or panel", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 502, description = "Data source rejected the change", body = ApiResponse)
    )
)]
pub async fn toggle_record_handler(
    State(state): State<AppState>,
    Path((role, entity, id)): Path<(String, String, RecordId)>,
    request: Result<Json<ToggleRequest>, JsonRejection>,
) -> impl IntoResponse {
    let panel = match find_panel(&state, &role, &entity) {
        Ok(p) => p,
        Err(resp) => return resp.into_response(),
    };
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "{\"field\": \"isActive\"}").into_response(),
    };

    let mut panel = panel.lock().await;
    match panel.toggle(id, &request.field).await {
        Ok(value) => {
            let mut view = panel_view(&panel);
            view["value"] = serde_json::json!(value);
            success(view)
        }
        Err(e) => console_error(e),
    }
}

#[utoipa::path(
    delete,
    path = "/api/dashboards/{role}/panels/{entity}/error",
    params(
        ("role" = String, Path, description = "Role"),
        ("entity" = String, Path, description = "Entity panel (e.g. users)")
    ),
    responses(
        (status = 200, description = "Banner dismissed", body = ApiResponse),
        (status = 404, description = "Unknown role or panel", body = ApiResponse)
    )
)]
pub async fn dismiss_error_handler(
    State(state): State<AppState>,
    Path((role, entity)): Path<(String, String)>,
) -> impl IntoResponse {
    let panel = match find_panel(&state, &role, &entity) {
        Ok(p) => p,
        Err(resp) => return resp.into_response(),
    };
    let mut panel = panel.lock().await;
    panel.dismiss_error();
    success(panel_view(&panel))
}
