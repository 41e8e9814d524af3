//! One dashboard panel: a Resource Store, its Draft Controller and the data
//! source they sit in front of.
//!
//! Data-source errors stop here: they are recorded as the panel's banner
//! message (and `Errored` status for loads) and also returned to the caller.

use crate::app::dispatcher::MutationDispatcher;
use crate::app::resource_store::{Listing, LoadTicket, ResourceStore};
use crate::domain::draft::{DraftController, Submission};
use crate::domain::filter::FilterState;
use crate::domain::model::ResourceModel;
use crate::domain::record::{field_at, Record, RecordId};
use crate::error::{ConsoleError, ConsoleResult};
use crate::infra::source::{DataSource, ListParams};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub struct Panel {
    store: ResourceStore,
    draft: DraftController,
    source: Arc<dyn DataSource>,
    load_timeout: Option<Duration>,
}

/// A load that has been issued but not fetched yet.
///
/// Owns everything the fetch needs, so callers can await it without holding
/// the panel (and a newer load can supersede it meanwhile).
pub struct PendingLoad {
    ticket: LoadTicket,
    entity: String,
    params: ListParams,
    source: Arc<dyn DataSource>,
    timeout: Option<Duration>,
}

impl PendingLoad {
    pub async fn fetch(self) -> (LoadTicket, ConsoleResult<Vec<Record>>) {
        let call = self.source.fetch_list(&self.entity, &self.params);
        let result = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(r) => r,
                Err(_) => {
                    return (
                        self.ticket,
                        Err(ConsoleError::LoadFailed("load timed out".to_string())),
                    )
                }
            },
            None => call.await,
        };
        let result = result
            .map(|response| response.items)
            .map_err(|e| ConsoleError::LoadFailed(format!("{:#}", e)));
        (self.ticket, result)
    }
}

fn mutation_failed(e: anyhow::Error) -> ConsoleError {
    ConsoleError::MutationFailed(format!("{:#}", e))
}

impl Panel {
    pub fn new(
        model: Arc<dyn ResourceModel>,
        source: Arc<dyn DataSource>,
        page_size: usize,
        load_timeout: Option<Duration>,
    ) -> Self {
        Self {
            store: ResourceStore::new(model, page_size),
            draft: DraftController::new(),
            source,
            load_timeout,
        }
    }

    pub fn entity(&self) -> &str {
        self.store.model().entity_name()
    }

    pub fn store(&self) -> &ResourceStore {
        &self.store
    }

    pub fn draft(&self) -> &DraftController {
        &self.draft
    }

    // --- loading ---

    /// Issues a load; the store turns `Loading` and older loads are superseded.
    pub fn begin_load(&mut self) -> PendingLoad {
        let ticket = self.store.begin_load();
        let model = self.store.model();
        PendingLoad {
            ticket,
            entity: model.entity_name().to_string(),
            params: ListParams {
                sort: model.default_sort().map(|s| s.to_string()),
                ..ListParams::default()
            },
            source: self.source.clone(),
            timeout: self.load_timeout,
        }
    }

    /// Applies a fetched result; returns false when it was superseded.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: ConsoleResult<Vec<Record>>) -> bool {
        if let Err(e) = &result {
            warn!(entity = self.entity(), error = %e, "load failed");
        }
        self.store.complete_load(ticket, result)
    }

    pub async fn load(&mut self) -> ConsoleResult<()> {
        let (ticket, result) = self.begin_load().fetch().await;
        let outcome = result.as_ref().map(|_| ()).map_err(|e| e.clone());
        self.finish_load(ticket, result);
        outcome
    }

    // --- filtering and paging ---

    pub fn view(&self) -> Listing {
        self.store.view()
    }

    pub fn set_search(&mut self, search: &str) {
        self.store.set_search(search);
    }

    pub fn set_filter(&mut self, name: &str, value: &str) {
        self.store.set_filter(name, value);
    }

    pub fn set_filters(&mut self, filters: FilterState) {
        self.store.set_filters(filters);
    }

    pub fn clear_filters(&mut self) {
        self.store.clear_filters();
    }

    pub fn go_to_page(&mut self, page: usize) -> usize {
        self.store.go_to_page(page)
    }

    pub fn next_page(&mut self) -> usize {
        self.store.next_page()
    }

    pub fn prev_page(&mut self) -> usize {
        self.store.prev_page()
    }

    // --- drafts ---

    pub fn open_add(&mut self) -> ConsoleResult<()> {
        let template = self.store.model().blank_template();
        self.draft.open_add(template)
    }

    pub fn open_edit(&mut self, id: RecordId) -> ConsoleResult<()> {
        let record = self.store.find(id).cloned().ok_or_else(|| {
            ConsoleError::InvalidDraft(format!("{} {} not found", self.entity(), id))
        })?;
        let model = self.store.model().clone();
        self.draft.open_edit(&record, model.as_ref())
    }

    pub fn change_field(&mut self, name: &str, value: JsonValue) -> ConsoleResult<()> {
        self.draft.change_field(name, value)
    }

    pub fn cancel(&mut self) {
        self.draft.cancel();
    }

    /// Sends the open draft to the data source and stores the returned record.
    ///
    /// On failure the draft stays open for a retry. Data-source failures also
    /// set the banner; validation errors are only returned.
    pub async fn submit(&mut self) -> ConsoleResult<Option<Record>> {
        let prepared = match MutationDispatcher::prepare(&self.draft, &mut self.store) {
            Ok(Some(record)) => record,
            Ok(None) => return Ok(None),
            Err(e) => {
                // Invalid drafts stay on the form; only failed mutations reach the banner.
                if matches!(e, ConsoleError::MutationFailed(_)) {
                    self.store.set_error(&e);
                }
                return Err(e);
            }
        };

        let entity = self.entity().to_string();
        let remote = match self.draft.submission() {
            Some(Submission::Update(id, _)) => self.source.update(&entity, id, prepared).await,
            _ => self.source.create(&entity, prepared).await,
        };

        let stored = remote.map_err(mutation_failed).and_then(|record| {
            self.store.upsert(record.clone())?;
            Ok(record)
        });
        match stored {
            Ok(record) => {
                self.draft.cancel();
                self.store.clear_error();
                info!(entity = %entity, "record saved");
                Ok(Some(record))
            }
            Err(e) => {
                self.store.set_error(&e);
                Err(e)
            }
        }
    }

    // --- direct actions ---

    /// Deletes record `id` once the caller has confirmed.
    ///
    /// Unconfirmed requests never reach the data source or the store.
    /// Returns true if a record was removed.
    pub async fn delete(&mut self, id: RecordId, confirmed: bool) -> ConsoleResult<bool> {
        if !confirmed {
            return Ok(MutationDispatcher::remove(id, &mut self.store, false));
        }
        if self.store.find(id).is_none() {
            return Ok(false);
        }
        let entity = self.entity().to_string();
        if let Err(e) = self.source.remove(&entity, id).await {
            let e = mutation_failed(e);
            self.store.set_error(&e);
            return Err(e);
        }
        let removed = MutationDispatcher::remove(id, &mut self.store, true);
        self.store.clear_error();
        Ok(removed)
    }

    /// Flips a boolean field (or toggle action) of record `id`.
    ///
    /// Returns None without calling the data source when the record is absent
    /// or the field is not boolean.
    pub async fn toggle(&mut self, id: RecordId, field: &str) -> ConsoleResult<Option<bool>> {
        let path = self.store.model().toggle_target(field).to_string();
        let current = self
            .store
            .find(id)
            .and_then(|r| field_at(r, &path))
            .and_then(JsonValue::as_bool);
        let Some(current) = current else {
            return Ok(None);
        };

        let entity = self.entity().to_string();
        if let Err(e) = self
            .source
            .set_field(&entity, id, &path, JsonValue::Bool(!current))
            .await
        {
            let e = mutation_failed(e);
            self.store.set_error(&e);
            return Err(e);
        }
        let value = MutationDispatcher::toggle(id, field, &mut self.store);
        self.store.clear_error();
        Ok(value)
    }

    pub fn dismiss_error(&mut self) {
        self.store.clear_error();
    }
}
