//! Panels against data sources: loading, last-load-wins, timeouts and
//! mutations that go through the source before touching the store.

use async_trait::async_trait;
use serde_json::{json, Value as JsonValue};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tourney_console::infra::source::{ListParams, ListResponse};
use tourney_console::{
    ConsoleError, Dashboard, DataSource, DraftMode, LoadStatus, MemorySource, Panel, Record,
    RecordId, Role, SchemaRegistry,
};

fn registry() -> Arc<SchemaRegistry> {
    Arc::new(SchemaRegistry::with_catalog().expect("catalog schemas are valid"))
}

fn panel_for(entity: &str, source: Arc<dyn DataSource>, page_size: usize) -> Panel {
    let model = registry().require(entity).unwrap();
    Panel::new(model, source, page_size, Some(Duration::from_secs(5)))
}

#[tokio::test]
async fn load_populates_the_store_sorted_by_default_sort() {
    let source = Arc::new(MemorySource::seeded(registry()));
    let mut panel = panel_for("players", source, 4);
    assert_eq!(panel.store().status(), LoadStatus::Idle);

    panel.load().await.unwrap();
    assert_eq!(panel.store().status(), LoadStatus::Ready);

    let view = panel.view();
    assert_eq!(view.filtered_total, 6);
    assert_eq!(view.total_pages, 2);
    let names: Vec<&str> = view.items.iter().map(|r| r["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Emma Rossi", "Felix Braun", "Gina Alves", "Hugo Lima"]);
}

#[tokio::test]
async fn failed_load_is_caught_into_the_banner() {
    let source = Arc::new(MemorySource::seeded(registry()));
    source.set_failing("teams", true).await;
    let mut panel = panel_for("teams", source.clone(), 10);

    let err = panel.load().await.unwrap_err();
    assert!(matches!(err, ConsoleError::LoadFailed(_)));
    assert_eq!(panel.store().status(), LoadStatus::Errored);
    assert!(panel.store().error_message().unwrap().contains("unavailable"));

    source.set_failing("teams", false).await;
    panel.load().await.unwrap();
    assert_eq!(panel.store().status(), LoadStatus::Ready);
    assert_eq!(panel.store().error_message(), None);
}

/// Answers the first list call slowly and later ones immediately.
struct SlowFirstSource {
    calls: AtomicUsize,
}

#[async_trait]
impl DataSource for SlowFirstSource {
    async fn fetch_list(&self, _entity: &str, _params: &ListParams) -> anyhow::Result<ListResponse> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call == 0 {
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
        let item = json!({"id": (call as i64) + 1, "name": format!("call {}", call)});
        Ok(ListResponse {
            items: vec![item.as_object().cloned().unwrap()],
            total_pages: 1,
        })
    }

    async fn create(&self, _entity: &str, fields: Record) -> anyhow::Result<Record> {
        Ok(fields)
    }

    async fn update(&self, _entity: &str, _id: RecordId, fields: Record) -> anyhow::Result<Record> {
        Ok(fields)
    }

    async fn remove(&self, _entity: &str, _id: RecordId) -> anyhow::Result<()> {
        Ok(())
    }

    async fn set_field(
        &self,
        _entity: &str,
        _id: RecordId,
        _field: &str,
        _value: JsonValue,
    ) -> anyhow::Result<Record> {
        anyhow::bail!("not supported")
    }
}

#[tokio::test]
async fn the_most_recently_issued_load_wins() {
    let source = Arc::new(SlowFirstSource {
        calls: AtomicUsize::new(0),
    });
    let mut panel = panel_for("teams", source, 10);

    let first = panel.begin_load();
    let second = panel.begin_load();
    let (slow, fast) = tokio::join!(first.fetch(), second.fetch());

    // The newer load resolves first; the older one arrives later and is dropped.
    assert!(panel.finish_load(fast.0, fast.1));
    assert!(!panel.finish_load(slow.0, slow.1));
    assert_eq!(panel.store().items()[0]["name"], json!("call 1"));
    assert_eq!(panel.store().status(), LoadStatus::Ready);
}

#[tokio::test]
async fn a_load_that_exceeds_the_timeout_fails() {
    let registry = registry();
    let source = Arc::new(MemorySource::seeded(registry.clone()).with_delay(Duration::from_millis(300)));
    let model = registry.require("teams").unwrap();
    let mut panel = Panel::new(model, source, 10, Some(Duration::from_millis(20)));

    let err = panel.load().await.unwrap_err();
    assert_eq!(err, ConsoleError::LoadFailed("load timed out".to_string()));
    assert_eq!(panel.store().status(), LoadStatus::Errored);
}

#[tokio::test]
async fn add_and_edit_go_through_the_source() {
    let source = Arc::new(MemorySource::seeded(registry()));
    let mut panel = panel_for("teams", source.clone(), 10);
    panel.load().await.unwrap();

    panel.open_add().unwrap();
    panel.change_field("name", json!("Desert Foxes")).unwrap();
    panel.change_field("category", json!("U16")).unwrap();
    let saved = panel.submit().await.unwrap().unwrap();
    assert_eq!(saved["id"], json!(5));
    assert_eq!(panel.draft().mode(), DraftMode::Closed);
    assert_eq!(panel.store().items().last().unwrap()["name"], json!("Desert Foxes"));
    assert_eq!(source.snapshot("teams").await.len(), 5);

    panel.open_edit(5).unwrap();
    panel.change_field("coach", json!("Hana Sato")).unwrap();
    panel.submit().await.unwrap();
    let remote = source.snapshot("teams").await;
    let fox = remote.iter().find(|r| r["id"] == json!(5)).unwrap();
    assert_eq!(fox["coach"], json!("Hana Sato"));
    assert_eq!(panel.store().find(5).unwrap()["coach"], json!("Hana Sato"));
}

#[tokio::test]
async fn rejected_submit_keeps_the_draft_open_and_sets_the_banner() {
    let source = Arc::new(MemorySource::seeded(registry()));
    let mut panel = panel_for("categories", source.clone(), 10);
    panel.load().await.unwrap();
    let before = panel.store().items().to_vec();

    panel.open_add().unwrap();
    panel.change_field("name", json!("U12")).unwrap();
    source.set_failing("categories", true).await;

    let err = panel.submit().await.unwrap_err();
    assert!(matches!(err, ConsoleError::MutationFailed(_)));
    assert_eq!(panel.draft().mode(), DraftMode::Adding);
    assert_eq!(panel.store().items(), before.as_slice());
    assert!(panel.store().error_message().is_some());

    source.set_failing("categories", false).await;
    panel.submit().await.unwrap();
    assert_eq!(panel.store().error_message(), None);
    assert_eq!(panel.store().items().len(), before.len() + 1);
}

#[tokio::test]
async fn delete_requires_confirmation() {
    let source = Arc::new(MemorySource::seeded(registry()));
    let mut panel = panel_for("judges", source.clone(), 10);
    panel.load().await.unwrap();

    assert!(!panel.delete(2, false).await.unwrap());
    assert_eq!(panel.store().items().len(), 3);
    assert_eq!(source.snapshot("judges").await.len(), 3);

    assert!(panel.delete(2, true).await.unwrap());
    assert!(panel.store().find(2).is_none());
    assert_eq!(source.snapshot("judges").await.len(), 2);

    assert!(!panel.delete(2, true).await.unwrap());
}

#[tokio::test]
async fn toggle_updates_source_and_store() {
    let source = Arc::new(MemorySource::seeded(registry()));
    let mut panel = panel_for("users", source.clone(), 10);
    panel.load().await.unwrap();

    assert_eq!(panel.toggle(3, "isActive").await.unwrap(), Some(true));
    let remote = source.snapshot("users").await;
    let chloe = remote.iter().find(|r| r["id"] == json!(3)).unwrap();
    assert_eq!(chloe["isActive"], json!(true));

    assert_eq!(panel.toggle(3, "isActive").await.unwrap(), Some(false));
    assert_eq!(panel.toggle(3, "name").await.unwrap(), None);
    assert_eq!(panel.toggle(404, "isActive").await.unwrap(), None);
}

#[tokio::test]
async fn each_role_gets_its_own_independent_panels() {
    let registry = registry();
    let source: Arc<dyn DataSource> = Arc::new(MemorySource::seeded(registry.clone()));
    let mut admin = Dashboard::new(Role::Admin, &registry, source.clone(), 10, None).unwrap();
    let mut judge = Dashboard::new(Role::Judge, &registry, source, 10, None).unwrap();

    assert_eq!(admin.panel_names().len(), 8);
    assert_eq!(judge.panel_names(), vec!["matches", "tournaments"]);
    assert!(judge.panel("users").is_none());

    assert_eq!(admin.load_all().await, 8);
    assert_eq!(judge.load_all().await, 2);

    admin.panel_mut("matches").unwrap().set_search("hawks");
    assert_eq!(admin.panel("matches").unwrap().view().filtered_total, 2);
    assert_eq!(judge.panel("matches").unwrap().view().filtered_total, 4);
}

#[tokio::test]
async fn invalid_submit_is_returned_without_touching_the_banner() {
    let source = Arc::new(MemorySource::seeded(registry()));
    let mut panel = panel_for("users", source.clone(), 10);
    panel.load().await.unwrap();

    panel.open_add().unwrap();
    let err = panel.submit().await.unwrap_err();
    assert_eq!(err, ConsoleError::InvalidDraft("name is required".to_string()));
    assert_eq!(panel.store().error_message(), None);
    assert_eq!(panel.draft().mode(), DraftMode::Adding);
    assert_eq!(source.snapshot("users").await.len(), 6);
}

#[tokio::test]
async fn memory_source_refuses_to_overflow_identities() {
    let registry = registry();
    let collections = std::collections::HashMap::from([(
        "teams".to_string(),
        vec![json!({"id": i64::MAX, "name": "Last Team"})
            .as_object()
            .cloned()
            .unwrap()],
    )]);
    let source = MemorySource::new(registry, collections);

    let fresh = json!({"name": "Overflow FC"}).as_object().cloned().unwrap();
    let err = source.create("teams", fresh).await.unwrap_err();
    assert!(err.to_string().contains("identity space exhausted"));
    assert_eq!(source.snapshot("teams").await.len(), 1);
}
