//! In-process data source backed by fixture arrays.
//!
//! Stands in for the REST backend: every call optionally sleeps for a fixed
//! delay, then works on the shared collections.

use super::{fixtures, DataSource, ListParams, ListResponse};
use crate::domain::filter::{self, FilterState};
use crate::domain::model::SchemaRegistry;
use crate::domain::paginate;
use crate::domain::record::{field_text, identity_of, set_field_at, Record, RecordId};
use anyhow::anyhow;
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

const DEFAULT_PAGE_SIZE: usize = 10;

pub struct MemorySource {
    registry: Arc<SchemaRegistry>,
    collections: Mutex<HashMap<String, Vec<Record>>>,
    delay: Duration,
    /// Entities whose calls fail, for exercising error banners.
    failing: Mutex<HashSet<String>>,
}

impl MemorySource {
    pub fn new(registry: Arc<SchemaRegistry>, collections: HashMap<String, Vec<Record>>) -> Self {
        Self {
            registry,
            collections: Mutex::new(collections),
            delay: Duration::ZERO,
            failing: Mutex::new(HashSet::new()),
        }
    }

    /// Source seeded with the built-in fixture arrays.
    pub fn seeded(registry: Arc<SchemaRegistry>) -> Self {
        Self::new(registry, fixtures::all())
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Makes every call for `entity` fail (or succeed again).
    pub async fn set_failing(&self, entity: &str, failing: bool) {
        let mut set = self.failing.lock().await;
        if failing {
            set.insert(entity.to_string());
        } else {
            set.remove(entity);
        }
    }

    /// Snapshot of one collection.
    pub async fn snapshot(&self, entity: &str) -> Vec<Record> {
        self.collections
            .lock()
            .await
            .get(entity)
            .cloned()
            .unwrap_or_default()
    }

    async fn enter(&self, entity: &str) -> anyhow::Result<String> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.failing.lock().await.contains(entity) {
            return Err(anyhow!("{} service unavailable", entity));
        }
        let model = self
            .registry
            .get(entity)
            .ok_or_else(|| anyhow!("unknown entity '{}'", entity))?;
        Ok(model.identity_field().to_string())
    }
}

fn position(items: &[Record], identity_field: &str, id: RecordId) -> Option<usize> {
    items
        .iter()
        .position(|r| identity_of(r, identity_field) == Some(id))
}

#[async_trait]
impl DataSource for MemorySource {
    async fn fetch_list(&self, entity: &str, params: &ListParams) -> anyhow::Result<ListResponse> {
        self.enter(entity).await?;
        let model = self
            .registry
            .get(entity)
            .ok_or_else(|| anyhow!("unknown entity '{}'", entity))?;

        let collections = self.collections.lock().await;
        let items = collections.get(entity).map(|v| v.as_slice()).unwrap_or(&[]);

        let filters = FilterState {
            search: params.search.clone().unwrap_or_default(),
            filters: params.filters.clone(),
        };
        let mut selected: Vec<Record> = filter::apply(items, model.as_ref(), &filters)
            .into_iter()
            .cloned()
            .collect();

        if let Some(sort) = params.sort.as_deref() {
            selected.sort_by_key(|r| field_text(r, sort).map(|s| s.to_lowercase()));
        }

        match params.page {
            Some(page) => {
                let size = params.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
                let total_pages = paginate::total_pages(selected.len(), size);
                let items = paginate::page_slice(&selected, page, size).to_vec();
                Ok(ListResponse { items, total_pages })
            }
            None => Ok(ListResponse {
                items: selected,
                total_pages: 1,
            }),
        }
    }

    async fn create(&self, entity: &str, fields: Record) -> anyhow::Result<Record> {
        let identity_field = self.enter(entity).await?;
        let mut collections = self.collections.lock().await;
        let items = collections.entry(entity.to_string()).or_default();

        let mut record = fields;
        let requested = identity_of(&record, &identity_field);
        let taken = requested.is_some_and(|id| position(items, &identity_field, id).is_some());
        if requested.is_none() || taken {
            let next = items
                .iter()
                .filter_map(|r| identity_of(r, &identity_field))
                .max()
                .unwrap_or(0)
                .checked_add(1)
                .ok_or_else(|| anyhow!("{}: identity space exhausted", entity))?;
            set_field_at(&mut record, &identity_field, JsonValue::from(next));
        }
        items.push(record.clone());
        Ok(record)
    }

    async fn update(&self, entity: &str, id: RecordId, fields: Record) -> anyhow::Result<Record> {
        let identity_field = self.enter(entity).await?;
        let mut collections = self.collections.lock().await;
        let items = collections.entry(entity.to_string()).or_default();
        let idx = position(items, &identity_field, id)
            .ok_or_else(|| anyhow!("{} {} not found", entity, id))?;

        let mut record = fields;
        set_field_at(&mut record, &identity_field, JsonValue::from(id));
        items[idx] = record.clone();
        Ok(record)
    }

    async fn remove(&self, entity: &str, id: RecordId) -> anyhow::Result<()> {
        let identity_field = self.enter(entity).await?;
        let mut collections = self.collections.lock().await;
        let items = collections.entry(entity.to_string()).or_default();
        let idx = position(items, &identity_field, id)
            .ok_or_else(|| anyhow!("{} {} not found", entity, id))?;
        items.remove(idx);
        Ok(())
    }

    async fn set_field(
        &self,
        entity: &str,
        id: RecordId,
        field: &str,
        value: JsonValue,
    ) -> anyhow::Result<Record> {
        let identity_field = self.enter(entity).await?;
        if field == identity_field {
            return Err(anyhow!("field '{}' cannot be set", field));
        }
        let mut collections = self.collections.lock().await;
        let items = collections.entry(entity.to_string()).or_default();
        let idx = position(items, &identity_field, id)
            .ok_or_else(|| anyhow!("{} {} not found", entity, id))?;
        set_field_at(&mut items[idx], field, value);
        Ok(items[idx].clone())
    }
}
