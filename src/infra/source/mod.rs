//! Data-access interface consumed by panels.
//!
//! Either the in-memory fixture source or the REST client satisfies it; the
//! store, draft controller and dispatcher never see which one is in use.

use crate::domain::record::{Record, RecordId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

pub mod fixtures;
pub mod memory;
pub mod rest;

pub use memory::MemorySource;
pub use rest::RestSource;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub filters: BTreeMap<String, String>,
    /// 1-based page; None asks for the whole collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    pub items: Vec<Record>,
    pub total_pages: usize,
}

#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch_list(&self, entity: &str, params: &ListParams) -> anyhow::Result<ListResponse>;

    async fn create(&self, entity: &str, fields: Record) -> anyhow::Result<Record>;

    async fn update(&self, entity: &str, id: RecordId, fields: Record) -> anyhow::Result<Record>;

    async fn remove(&self, entity: &str, id: RecordId) -> anyhow::Result<()>;

    /// Sets one field (used for status toggles) and returns the updated record.
    async fn set_field(
        &self,
        entity: &str,
        id: RecordId,
        field: &str,
        value: JsonValue,
    ) -> anyhow::Result<Record>;
}
