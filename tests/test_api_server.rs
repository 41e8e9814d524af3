//! Drives the HTTP surface end to end against an in-process server backed by
//! the in-memory data source.

use reqwest::StatusCode;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tourney_console::transport::http::{create_router, AppState};
use tourney_console::{MemorySource, SchemaRegistry};

struct TestServer {
    base_url: String,
    client: reqwest::Client,
    source: Arc<MemorySource>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn start(page_size: usize) -> TestServer {
        let registry = Arc::new(SchemaRegistry::with_catalog().unwrap());
        let source = Arc::new(MemorySource::seeded(registry.clone()));
        let state = AppState::build(
            &registry,
            source.clone(),
            page_size,
            Some(Duration::from_secs(5)),
        )
        .unwrap();
        let router = create_router(state);

        // Ephemeral port so parallel tests never collide.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        TestServer {
            base_url: format!("http://127.0.0.1:{}", port),
            client: reqwest::Client::new(),
            source,
            handle,
        }
    }

    fn panel_url(&self, role: &str, entity: &str, rest: &str) -> String {
        format!(
            "{}/api/dashboards/{}/panels/{}{}",
            self.base_url, role, entity, rest
        )
    }

    async fn post(&self, url: &str, body: Value) -> (StatusCode, Value) {
        let resp = self.client.post(url).json(&body).send().await.unwrap();
        let status = resp.status();
        (status, resp.json().await.unwrap())
    }

    async fn get(&self, url: &str) -> (StatusCode, Value) {
        let resp = self.client.get(url).send().await.unwrap();
        let status = resp.status();
        (status, resp.json().await.unwrap())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn names(view: &Value) -> Vec<String> {
    view["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn health_and_dashboards() {
    let server = TestServer::start(10).await;

    let (status, body) = server.get(&format!("{}/health", server.base_url)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], json!("ok"));
    assert_eq!(body["data"]["dashboards"], json!(5));

    let (status, body) = server
        .get(&format!("{}/api/dashboards/Coach", server.base_url))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["panels"], json!(["teams", "players", "matches"]));

    let (status, body) = server
        .get(&format!("{}/api/dashboards/referee", server.base_url))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));

    // Users are an admin-only panel.
    let (status, _) = server.get(&server.panel_url("player", "users", "")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn load_filter_and_page_through_a_panel() {
    let server = TestServer::start(2).await;

    let (status, body) = server.get(&server.panel_url("admin", "users", "")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], json!("idle"));

    let (status, body) = server
        .post(&server.panel_url("admin", "users", "/load"), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], json!("ready"));
    assert_eq!(body["data"]["filteredTotal"], json!(6));
    assert_eq!(body["data"]["totalPages"], json!(3));

    let page_url = server.panel_url("admin", "users", "/page");
    let (_, body) = server.post(&page_url, json!({"step": "next"})).await;
    assert_eq!(body["data"]["page"], json!(2));
    let (_, body) = server.post(&page_url, json!({"page": 9})).await;
    assert_eq!(body["data"]["page"], json!(2));
    let (status, _) = server.post(&page_url, json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = server
        .post(
            &server.panel_url("admin", "users", "/filters"),
            json!({"search": "", "filters": {"role": "player", "status": "all"}}),
        )
        .await;
    assert_eq!(body["data"]["page"], json!(1));
    assert_eq!(body["data"]["filteredTotal"], json!(2));
    assert_eq!(names(&body), vec!["Emma Rossi", "Felix Braun"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn draft_lifecycle_over_http() {
    let server = TestServer::start(10).await;
    server
        .post(&server.panel_url("organizer", "categories", "/load"), json!({}))
        .await;

    let (status, body) = server
        .post(&server.panel_url("organizer", "categories", "/draft/add"), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["draft"]["mode"], json!("adding"));

    let submit_url = server.panel_url("organizer", "categories", "/draft/submit");
    let (status, body) = server.post(&submit_url, json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("name"));

    let (status, _) = server
        .post(
            &server.panel_url("organizer", "categories", "/draft/field"),
            json!({"name": "name", "value": "U14"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = server.post(&submit_url, json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["saved"]["id"], json!(5));
    assert_eq!(body["data"]["draft"]["mode"], json!("closed"));
    assert_eq!(server.source.snapshot("categories").await.len(), 5);

    // Cancelling an edit leaves the record as it was.
    server
        .post(
            &server.panel_url("organizer", "categories", "/draft/edit/5"),
            json!({}),
        )
        .await;
    server
        .post(
            &server.panel_url("organizer", "categories", "/draft/field"),
            json!({"name": "name", "value": "Discarded"}),
        )
        .await;
    let (_, body) = server
        .post(
            &server.panel_url("organizer", "categories", "/draft/cancel"),
            json!({}),
        )
        .await;
    assert_eq!(body["data"]["draft"]["mode"], json!("closed"));
    let items = body["data"]["items"].as_array().unwrap();
    assert!(items.iter().any(|r| r["name"] == json!("U14")));
    assert!(!items.iter().any(|r| r["name"] == json!("Discarded")));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn delete_needs_confirm_and_toggle_flips() {
    let server = TestServer::start(10).await;
    server
        .post(&server.panel_url("admin", "judges", "/load"), json!({}))
        .await;

    let delete_url = server.panel_url("admin", "judges", "/records/2/delete");
    let (status, _) = server.post(&delete_url, json!({"confirm": false})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(server.source.snapshot("judges").await.len(), 3);

    let (status, body) = server.post(&delete_url, json!({"confirm": true})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["removed"], json!(true));
    assert_eq!(body["data"]["filteredTotal"], json!(2));

    let toggle_url = server.panel_url("admin", "judges", "/records/3/toggle");
    let (status, body) = server.post(&toggle_url, json!({"field": "isActive"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["value"], json!(true));

    let (status, _) = server.post(&toggle_url, json!({"wrong": 1})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn failing_source_shows_a_dismissable_banner() {
    let server = TestServer::start(10).await;
    server.source.set_failing("tournaments", true).await;

    let (status, body) = server
        .post(&server.panel_url("judge", "tournaments", "/load"), json!({}))
        .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["data"]["status"], json!("errored"));
    assert!(body["data"]["error"].is_string());

    let resp = server
        .client
        .delete(server.panel_url("judge", "tournaments", "/error"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["error"], Value::Null);

    // Other roles' panels for the same entity are unaffected.
    let (_, body) = server.get(&server.panel_url("admin", "tournaments", "")).await;
    assert_eq!(body["data"]["status"], json!("idle"));
}
