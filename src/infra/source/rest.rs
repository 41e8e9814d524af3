//! REST client satisfying `DataSource` against `{base}/{entity}` endpoints.

use super::{DataSource, ListParams, ListResponse};
use crate::domain::record::{set_field_at, Record, RecordId};
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::time::Duration;

pub struct RestSource {
    client: Client,
    base_url: String,
}

impl RestSource {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self, entity: &str) -> String {
        format!("{}/{}", self.base_url, entity)
    }

    fn record_url(&self, entity: &str, id: RecordId) -> String {
        format!("{}/{}/{}", self.base_url, entity, id)
    }
}

/// Turns a non-2xx response into an error carrying the response body.
async fn check(response: Response, what: &str) -> anyhow::Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(anyhow!("{} failed: HTTP {} {}", what, status.as_u16(), body.trim()))
}

async fn decode<T: DeserializeOwned>(response: Response, what: &str) -> anyhow::Result<T> {
    check(response, what)
        .await?
        .json::<T>()
        .await
        .with_context(|| format!("{}: unexpected response body", what))
}

fn query_pairs(params: &ListParams) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    if let Some(search) = params.search.as_ref().filter(|s| !s.is_empty()) {
        pairs.push(("search".to_string(), search.clone()));
    }
    for (name, value) in &params.filters {
        pairs.push((name.clone(), value.clone()));
    }
    if let Some(page) = params.page {
        pairs.push(("page".to_string(), page.to_string()));
    }
    if let Some(size) = params.page_size {
        pairs.push(("pageSize".to_string(), size.to_string()));
    }
    if let Some(sort) = &params.sort {
        pairs.push(("sort".to_string(), sort.clone()));
    }
    pairs
}

#[async_trait]
impl DataSource for RestSource {
    async fn fetch_list(&self, entity: &str, params: &ListParams) -> anyhow::Result<ListResponse> {
        let response = self
            .client
            .get(self.collection_url(entity))
            .query(&query_pairs(params))
            .send()
            .await?;
        decode(response, &format!("list {}", entity)).await
    }

    async fn create(&self, entity: &str, fields: Record) -> anyhow::Result<Record> {
        let response = self
            .client
            .post(self.collection_url(entity))
            .json(&fields)
            .send()
            .await?;
        decode(response, &format!("create {}", entity)).await
    }

    async fn update(&self, entity: &str, id: RecordId, fields: Record) -> anyhow::Result<Record> {
        let response = self
            .client
            .put(self.record_url(entity, id))
            .json(&fields)
            .send()
            .await?;
        decode(response, &format!("update {} {}", entity, id)).await
    }

    async fn remove(&self, entity: &str, id: RecordId) -> anyhow::Result<()> {
        let response = self.client.delete(self.record_url(entity, id)).send().await?;
        check(response, &format!("delete {} {}", entity, id)).await?;
        Ok(())
    }

    async fn set_field(
        &self,
        entity: &str,
        id: RecordId,
        field: &str,
        value: JsonValue,
    ) -> anyhow::Result<Record> {
        let mut patch = Record::new();
        set_field_at(&mut patch, field, value);
        let response = self
            .client
            .patch(self.record_url(entity, id))
            .json(&patch)
            .send()
            .await?;
        decode(response, &format!("set {} on {} {}", field, entity, id)).await
    }
}
