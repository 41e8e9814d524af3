//! `RestSource` against a stub backend served in-process: query encoding,
//! verb and route per operation, and non-2xx responses becoming errors.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tourney_console::infra::source::ListParams;
use tourney_console::{ConsoleError, DataSource, DraftMode, Panel, RestSource, SchemaRegistry};

#[derive(Debug, Clone)]
struct Call {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Value>,
}

#[derive(Clone, Default)]
struct Backend {
    calls: Arc<Mutex<Vec<Call>>>,
}

fn with_id(body: &Option<Value>, id: i64) -> Value {
    let mut record = body
        .as_ref()
        .and_then(|b| b.as_object().cloned())
        .unwrap_or_default();
    record.insert("id".to_string(), json!(id));
    Value::Object(record)
}

async fn stub_backend(
    State(backend): State<Backend>,
    method: Method,
    uri: Uri,
    Query(query): Query<Vec<(String, String)>>,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    let body: Option<Value> = serde_json::from_slice(&body).ok();
    backend.calls.lock().await.push(Call {
        method: method.clone(),
        path: path.clone(),
        query,
        body: body.clone(),
    });

    let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
    match (method.as_str(), segments.as_slice()) {
        ("GET", [_entity]) => Json(json!({
            "items": [{"id": 1, "name": "Thunder Hawks"}, {"id": 2, "name": "River Wolves"}],
            "totalPages": 1
        }))
        .into_response(),
        ("POST", ["categories"]) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable").into_response()
        }
        ("POST", [_entity]) => (StatusCode::CREATED, Json(with_id(&body, 9))).into_response(),
        ("PUT", [_entity, id]) | ("PATCH", [_entity, id]) => {
            let id = id.parse().unwrap_or(0);
            Json(with_id(&body, id)).into_response()
        }
        ("DELETE", [_entity, _id]) => StatusCode::NO_CONTENT.into_response(),
        _ => (StatusCode::NOT_FOUND, "no such route").into_response(),
    }
}

struct StubServer {
    base_url: String,
    backend: Backend,
    handle: tokio::task::JoinHandle<()>,
}

impl StubServer {
    async fn start() -> StubServer {
        let backend = Backend::default();
        let router = Router::new().fallback(stub_backend).with_state(backend.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        StubServer {
            base_url: format!("http://127.0.0.1:{}/", port),
            backend,
            handle,
        }
    }

    async fn last_call(&self) -> Call {
        self.backend.calls.lock().await.last().cloned().unwrap()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn list_sends_search_filters_paging_and_sort_as_query() {
    let server = StubServer::start().await;
    let source = RestSource::new(&server.base_url).unwrap();

    let params = ListParams {
        search: Some("hawk".to_string()),
        filters: BTreeMap::from([("category".to_string(), "U18".to_string())]),
        page: Some(2),
        page_size: Some(5),
        sort: Some("name".to_string()),
    };
    let response = source.fetch_list("teams", &params).await.unwrap();
    assert_eq!(response.items.len(), 2);
    assert_eq!(response.total_pages, 1);

    let call = server.last_call().await;
    assert_eq!(call.method, Method::GET);
    assert_eq!(call.path, "/teams");
    let expected: Vec<(String, String)> = [
        ("search", "hawk"),
        ("category", "U18"),
        ("page", "2"),
        ("pageSize", "5"),
        ("sort", "name"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    assert_eq!(call.query, expected);

    // An empty search is left out entirely.
    let params = ListParams {
        search: Some(String::new()),
        ..ListParams::default()
    };
    source.fetch_list("teams", &params).await.unwrap();
    assert!(server.last_call().await.query.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn mutations_use_the_matching_verb_and_route() {
    let server = StubServer::start().await;
    let source = RestSource::new(&server.base_url).unwrap();

    let fields = json!({"name": "Desert Foxes"}).as_object().cloned().unwrap();
    let created = source.create("teams", fields.clone()).await.unwrap();
    assert_eq!(created["id"], json!(9));
    let call = server.last_call().await;
    assert_eq!((call.method, call.path.as_str()), (Method::POST, "/teams"));
    assert_eq!(call.body, Some(json!({"name": "Desert Foxes"})));

    let updated = source.update("teams", 3, fields).await.unwrap();
    assert_eq!(updated["id"], json!(3));
    let call = server.last_call().await;
    assert_eq!((call.method, call.path.as_str()), (Method::PUT, "/teams/3"));

    source.remove("teams", 3).await.unwrap();
    let call = server.last_call().await;
    assert_eq!((call.method, call.path.as_str()), (Method::DELETE, "/teams/3"));

    source
        .set_field("matches", 2, "team1.ready", json!(true))
        .await
        .unwrap();
    let call = server.last_call().await;
    assert_eq!((call.method, call.path.as_str()), (Method::PATCH, "/matches/2"));
    assert_eq!(call.body, Some(json!({"team1": {"ready": true}})));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn non_success_status_becomes_an_error() {
    let server = StubServer::start().await;
    let source = RestSource::new(&server.base_url).unwrap();

    let fields = json!({"name": "U12"}).as_object().cloned().unwrap();
    let err = source.create("categories", fields).await.unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("HTTP 500"), "{}", message);
    assert!(message.contains("database unavailable"), "{}", message);

    let err = source
        .fetch_list("teams/archived/2025", &ListParams::default())
        .await
        .unwrap_err();
    assert!(format!("{:#}", err).contains("HTTP 404"));

    // A 204 with no body is still a successful delete.
    source.remove("teams", 3).await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn failed_remote_create_lands_in_the_panel_banner() {
    let server = StubServer::start().await;
    let registry = SchemaRegistry::with_catalog().unwrap();
    let source = Arc::new(RestSource::new(&server.base_url).unwrap());
    let model = registry.require("categories").unwrap();
    let mut panel = Panel::new(model, source, 10, Some(Duration::from_secs(5)));

    panel.load().await.unwrap();
    assert_eq!(panel.store().items().len(), 2);

    panel.open_add().unwrap();
    panel.change_field("name", json!("U12")).unwrap();
    let err = panel.submit().await.unwrap_err();

    assert!(matches!(err, ConsoleError::MutationFailed(_)));
    assert!(panel.store().error_message().unwrap().contains("HTTP 500"));
    assert_eq!(panel.draft().mode(), DraftMode::Adding);
    assert_eq!(panel.store().items().len(), 2);
}
