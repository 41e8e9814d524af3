//! The in-memory Resource Store of one panel.
//!
//! Holds the canonical collection of one entity type together with its load
//! status, banner message, filter inputs and current page. Every operation is
//! synchronous; the data-source call that precedes a mutation resolves first
//! (see `Panel`).

use crate::domain::filter::{self, FilterState};
use crate::domain::model::ResourceModel;
use crate::domain::paginate;
use crate::domain::record::{field_at, identity_of, set_field_at, Record, RecordId};
use crate::error::{ConsoleError, ConsoleResult};
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Identity source for stores that have never observed an identity.
static NEXT_FRESH_ID: AtomicI64 = AtomicI64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    Idle,
    Loading,
    Ready,
    Errored,
}

/// Handle for one issued load. Only the most recently issued ticket is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// One rendered page of a filtered list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    pub filtered_total: usize,
    pub total_pages: usize,
    pub page: usize,
    pub items: Vec<Record>,
}

pub struct ResourceStore {
    model: Arc<dyn ResourceModel>,
    items: Vec<Record>,
    status: LoadStatus,
    error_message: Option<String>,
    filters: FilterState,
    page: usize,
    page_size: usize,
    load_generation: u64,
    /// Largest identity this store has ever held.
    high_water: Option<RecordId>,
}

impl ResourceStore {
    pub fn new(model: Arc<dyn ResourceModel>, page_size: usize) -> Self {
        Self {
            model,
            items: Vec::new(),
            status: LoadStatus::Idle,
            error_message: None,
            filters: FilterState::default(),
            page: 1,
            page_size: page_size.max(1),
            load_generation: 0,
            high_water: None,
        }
    }

    /// Store pre-populated with `items`, already `Ready`.
    pub fn with_items(
        model: Arc<dyn ResourceModel>,
        page_size: usize,
        items: Vec<Record>,
    ) -> Self {
        let mut store = Self::new(model, page_size);
        let ticket = store.begin_load();
        store.complete_load(ticket, Ok(items));
        store
    }

    pub fn model(&self) -> &Arc<dyn ResourceModel> {
        &self.model
    }

    pub fn items(&self) -> &[Record] {
        &self.items
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn find(&self, id: RecordId) -> Option<&Record> {
        self.position(id).map(|idx| &self.items[idx])
    }

    fn position(&self, id: RecordId) -> Option<usize> {
        let identity_field = self.model.identity_field();
        self.items
            .iter()
            .position(|r| identity_of(r, identity_field) == Some(id))
    }

    // --- load lifecycle ---

    /// Marks the store `Loading` and supersedes any load still in flight.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_generation += 1;
        self.status = LoadStatus::Loading;
        debug!(
            entity = self.model.entity_name(),
            generation = self.load_generation,
            "load started"
        );
        LoadTicket(self.load_generation)
    }

    /// Applies a load result. Returns false if `ticket` was superseded.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: ConsoleResult<Vec<Record>>,
    ) -> bool {
        let entity = self.model.entity_name().to_string();
        if ticket.0 != self.load_generation {
            debug!(
                entity = %entity,
                generation = ticket.0,
                current = self.load_generation,
                "superseded load result ignored"
            );
            return false;
        }

        match result {
            Ok(items) => {
                for record in &items {
                    self.observe_identity(record);
                }
                self.items = items;
                self.status = LoadStatus::Ready;
                self.error_message = None;
                self.reconcile_page();
                debug!(entity = %entity, count = self.items.len(), "load finished");
            }
            Err(e) => {
                self.status = LoadStatus::Errored;
                self.error_message = Some(e.message().to_string());
                debug!(entity = %entity, error = %e, "load failed");
            }
        }
        true
    }

    // --- reading ---

    /// Filtered total and the items of `page` for the given filters.
    ///
    /// Does not touch stored state; a page outside the range yields no items.
    pub fn list(&self, filters: &FilterState, page: usize) -> Listing {
        let filtered = filter::apply(&self.items, self.model.as_ref(), filters);
        let total_pages = paginate::total_pages(filtered.len(), self.page_size);
        let items = paginate::page_slice(&filtered, page, self.page_size)
            .iter()
            .map(|r| (*r).clone())
            .collect();
        Listing {
            filtered_total: filtered.len(),
            total_pages,
            page,
            items,
        }
    }

    /// Listing for the store's own filters and page.
    pub fn view(&self) -> Listing {
        self.list(&self.filters, self.page)
    }

    pub fn total_pages(&self) -> usize {
        let filtered = filter::apply(&self.items, self.model.as_ref(), &self.filters);
        paginate::total_pages(filtered.len(), self.page_size)
    }

    // --- filters and navigation ---

    pub fn set_search(&mut self, search: &str) {
        self.filters.search = search.to_string();
        self.page = 1;
    }

    pub fn set_filter(&mut self, name: &str, value: &str) {
        self.filters
            .filters
            .insert(name.to_string(), value.to_string());
        self.page = 1;
    }

    pub fn set_filters(&mut self, filters: FilterState) {
        self.filters = filters;
        self.page = 1;
    }

    pub fn clear_filters(&mut self) {
        self.set_filters(FilterState::default());
    }

    /// Moves to `requested` if it is a valid page; returns the resulting page.
    pub fn go_to_page(&mut self, requested: usize) -> usize {
        self.page = paginate::clamp(self.page, requested, self.total_pages());
        self.page
    }

    pub fn next_page(&mut self) -> usize {
        self.go_to_page(self.page.saturating_add(1))
    }

    pub fn prev_page(&mut self) -> usize {
        self.go_to_page(self.page.saturating_sub(1))
    }

    /// Keeps `page` inside `[1, totalPages]` after the collection changed.
    fn reconcile_page(&mut self) {
        let total = self.total_pages();
        self.page = self.page.clamp(1, total);
    }

    // --- mutations ---

    /// Replaces the record with the same identity in place, or appends it.
    pub fn upsert(&mut self, record: Record) -> ConsoleResult<()> {
        let id = identity_of(&record, self.model.identity_field()).ok_or_else(|| {
            ConsoleError::MutationFailed(format!(
                "{} record has no identity at '{}'",
                self.model.entity_name(),
                self.model.identity_field()
            ))
        })?;
        self.observe_identity(&record);
        match self.position(id) {
            Some(idx) => self.items[idx] = record,
            None => self.items.push(record),
        }
        self.reconcile_page();
        Ok(())
    }

    /// Deletes the record with `id`; returns false if it was absent.
    pub fn remove(&mut self, id: RecordId) -> bool {
        let Some(idx) = self.position(id) else {
            return false;
        };
        self.items.remove(idx);
        self.reconcile_page();
        true
    }

    /// Flips a boolean field of record `id`. `field` may be a toggle action
    /// the schema maps to a field path.
    ///
    /// Returns the new value, or None when the record is absent or the field
    /// is not boolean.
    pub fn toggle_field(&mut self, id: RecordId, field: &str) -> Option<bool> {
        let path = self.model.toggle_target(field).to_string();
        let idx = self.position(id)?;
        let record = &mut self.items[idx];
        let current = field_at(record, &path)?.as_bool()?;
        set_field_at(record, &path, JsonValue::Bool(!current));
        // A toggle can move the record in or out of a categorical filter.
        self.reconcile_page();
        Some(!current)
    }

    // --- identities ---

    fn observe_identity(&mut self, record: &Record) {
        if let Some(id) = identity_of(record, self.model.identity_field()) {
            self.high_water = Some(self.high_water.map_or(id, |hw| hw.max(id)));
        }
    }

    /// Allocates an identity no record of this store has ever held.
    ///
    /// Fails once the store has seen `RecordId::MAX`.
    pub fn next_identity(&mut self) -> ConsoleResult<RecordId> {
        let id = match self.high_water {
            Some(hw) => hw.checked_add(1).ok_or_else(|| {
                ConsoleError::MutationFailed("identity space exhausted".to_string())
            })?,
            None => NEXT_FRESH_ID.fetch_add(1, Ordering::Relaxed),
        };
        self.high_water = Some(id);
        Ok(id)
    }

    // --- banner ---

    pub fn set_error(&mut self, error: &ConsoleError) {
        self.error_message = Some(error.message().to_string());
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }
}
