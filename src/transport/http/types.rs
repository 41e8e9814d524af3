use crate::app::dashboard::Dashboard;
use crate::app::panel::Panel;
use crate::domain::model::SchemaRegistry;
use crate::domain::role::Role;
use crate::error::ConsoleResult;
use crate::infra::source::DataSource;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use utoipa::ToSchema;

/// Panels of one role, in dashboard order. Each panel is locked independently.
pub struct DashboardPanels {
    pub panels: Vec<(String, Arc<Mutex<Panel>>)>,
}

#[derive(Clone)]
pub struct AppState {
    pub dashboards: Arc<HashMap<Role, DashboardPanels>>,
}

impl AppState {
    /// Builds one dashboard per role over a shared data source.
    pub fn build(
        registry: &SchemaRegistry,
        source: Arc<dyn DataSource>,
        page_size: usize,
        load_timeout: Option<Duration>,
    ) -> ConsoleResult<Self> {
        let mut dashboards = HashMap::new();
        for role in Role::ALL {
            let dashboard = Dashboard::new(role, registry, source.clone(), page_size, load_timeout)?;
            let panels = dashboard
                .into_panels()
                .into_iter()
                .map(|p| (p.entity().to_string(), Arc::new(Mutex::new(p))))
                .collect();
            dashboards.insert(role, DashboardPanels { panels });
        }
        Ok(Self {
            dashboards: Arc::new(dashboards),
        })
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct FiltersRequest {
    /// Free-text search; empty or absent disables it.
    #[serde(default)]
    pub search: Option<String>,
    /// Categorical filters by name; `all` disables one.
    #[serde(default)]
    pub filters: BTreeMap<String, String>,
}

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PageStep {
    Next,
    Prev,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct PageRequest {
    /// Absolute 1-based page. Ignored when `step` is given.
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub step: Option<PageStep>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct FieldChangeRequest {
    /// Field path, e.g. `name` or `team1.name`.
    pub name: String,
    #[schema(value_type = Object)]
    pub value: JsonValue,
}

#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct DeleteRequest {
    /// Safety switch: deletes are refused unless this is true.
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct ToggleRequest {
    /// Boolean field or toggle action, e.g. `isActive`.
    pub field: String,
}

pub fn json_422(err: JsonRejection, expected: &str) -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ApiResponse {
            success: false,
            data: None,
            error: Some(format!("Invalid JSON body: {} (expected: {})", err, expected)),
        }),
    )
}
