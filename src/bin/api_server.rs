// src/bin/api_server.rs

use std::sync::Arc;
use tourney_console::infra::config::{ConsoleConfig, SourceKind};
use tourney_console::infra::telemetry;
use tourney_console::transport;
use tourney_console::{DataSource, MemorySource, RestSource, SchemaRegistry};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    telemetry::init();

    let config = ConsoleConfig::from_env()?;

    // --- Schema Registry Initialization ---
    let registry = Arc::new(SchemaRegistry::with_catalog()?);
    info!(entities = ?registry.list_models(), "schema registry initialized");

    // --- Data Source Initialization ---
    let source: Arc<dyn DataSource> = match &config.source {
        SourceKind::Memory => {
            info!(delay_ms = config.simulated_delay.as_millis() as u64, "using in-memory fixtures");
            Arc::new(MemorySource::seeded(registry.clone()).with_delay(config.simulated_delay))
        }
        SourceKind::Rest { base_url } => {
            info!(%base_url, "using REST data source");
            Arc::new(RestSource::new(base_url)?)
        }
    };

    let app_state =
        transport::http::AppState::build(&registry, source, config.page_size, config.load_timeout)?;
    info!(page_size = config.page_size, "dashboards initialized");

    // --- API Server Initialization ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);
    let app = transport::http::create_router(app_state)
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()),
        )
        .layer(cors);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %config.bind_addr, "console API listening; Swagger UI at /swagger-ui");

    tokio::select! {
        result = axum::serve(listener, app) => {
            if let Err(e) = &result {
                error!(error = %e, "server stopped");
            }
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
        }
    }

    Ok(())
}
