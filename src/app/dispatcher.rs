//! Applies committed drafts and direct actions (delete, toggle) to a store.

use crate::app::resource_store::ResourceStore;
use crate::domain::draft::{DraftController, Submission};
use crate::domain::record::{set_field_at, Record, RecordId};
use crate::error::{ConsoleError, ConsoleResult};
use serde_json::Value as JsonValue;
use tracing::{debug, info, warn};

/// Stateless: identities are allocated by the store it is handed.
pub struct MutationDispatcher;

impl MutationDispatcher {
    /// Builds the full record a draft would commit, without touching the draft.
    ///
    /// Adds receive a fresh identity from `store`; edits are merged over the
    /// stored record with `targetId`.
    pub fn prepare(
        draft: &DraftController,
        store: &mut ResourceStore,
    ) -> ConsoleResult<Option<Record>> {
        let Some(submission) = draft.submission() else {
            return Ok(None);
        };
        let model = store.model().clone();

        let values = match &submission {
            Submission::Create(v) | Submission::Update(_, v) => v,
        };
        model
            .validate_draft(values)
            .map_err(ConsoleError::InvalidDraft)?;

        let identity_field = model.identity_field();
        let record = match submission {
            Submission::Create(values) => {
                let mut record = values;
                let id = store.next_identity()?;
                set_field_at(&mut record, identity_field, JsonValue::from(id));
                record
            }
            Submission::Update(target_id, values) => {
                let mut record = store.find(target_id).cloned().ok_or_else(|| {
                    ConsoleError::MutationFailed(format!(
                        "{} {} no longer exists",
                        model.entity_name(),
                        target_id
                    ))
                })?;
                merge_into(&mut record, values);
                set_field_at(&mut record, identity_field, JsonValue::from(target_id));
                record
            }
        };
        Ok(Some(record))
    }

    /// Commits the open draft into `store` and closes it.
    ///
    /// Returns the stored record, or None when no draft was open. On error the
    /// draft stays open and the store is untouched.
    pub fn commit_draft(
        draft: &mut DraftController,
        store: &mut ResourceStore,
    ) -> ConsoleResult<Option<Record>> {
        let Some(record) = Self::prepare(draft, store)? else {
            return Ok(None);
        };
        store.upsert(record.clone())?;
        draft.cancel();
        info!(entity = store.model().entity_name(), "draft committed");
        Ok(Some(record))
    }

    /// Deletes record `id` only when `confirmed` is true.
    ///
    /// Returns true if a record was removed.
    pub fn remove(id: RecordId, store: &mut ResourceStore, confirmed: bool) -> bool {
        if !confirmed {
            warn!(
                entity = store.model().entity_name(),
                id, "delete refused: not confirmed"
            );
            return false;
        }
        let removed = store.remove(id);
        debug!(entity = store.model().entity_name(), id, removed, "delete applied");
        removed
    }

    /// Flips a boolean field; returns the new value if the flip happened.
    pub fn toggle(id: RecordId, field: &str, store: &mut ResourceStore) -> Option<bool> {
        let value = store.toggle_field(id, field);
        debug!(
            entity = store.model().entity_name(),
            id,
            field,
            value = ?value,
            "toggle applied"
        );
        value
    }
}

/// Deep-merges `source` over `target`: nested objects merge, everything else replaces.
fn merge_into(target: &mut Record, source: Record) {
    for (key, value) in source {
        match value {
            JsonValue::Object(incoming) => match target.get_mut(&key) {
                Some(JsonValue::Object(existing)) => merge_into(existing, incoming),
                _ => {
                    target.insert(key, JsonValue::Object(incoming));
                }
            },
            value => {
                target.insert(key, value);
            }
        }
    }
}
