//! Add/Edit draft state machine.
//!
//! A single tagged state replaces separate "add modal" / "edit modal" flags,
//! so both can never be open at once.

use crate::domain::model::ResourceModel;
use crate::domain::record::{field_at, identity_of, set_field_at, Record, RecordId};
use crate::error::{ConsoleError, ConsoleResult};
use serde::Serialize;
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Draft {
    #[default]
    Closed,
    Adding {
        values: Record,
    },
    Editing {
        target_id: RecordId,
        values: Record,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftMode {
    Closed,
    Adding,
    Editing,
}

/// What a submitted draft asks the dispatcher to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Create(Record),
    Update(RecordId, Record),
}

#[derive(Debug, Default)]
pub struct DraftController {
    draft: Draft,
}

impl DraftController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn mode(&self) -> DraftMode {
        match self.draft {
            Draft::Closed => DraftMode::Closed,
            Draft::Adding { .. } => DraftMode::Adding,
            Draft::Editing { .. } => DraftMode::Editing,
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.draft, Draft::Closed)
    }

    pub fn target_id(&self) -> Option<RecordId> {
        match self.draft {
            Draft::Editing { target_id, .. } => Some(target_id),
            _ => None,
        }
    }

    pub fn values(&self) -> Option<&Record> {
        match &self.draft {
            Draft::Closed => None,
            Draft::Adding { values } | Draft::Editing { values, .. } => Some(values),
        }
    }

    /// Opens an Add draft from the entity's blank template.
    ///
    /// Any open draft is discarded first.
    pub fn open_add(&mut self, template: Record) -> ConsoleResult<()> {
        if template.is_empty() {
            return Err(ConsoleError::InvalidDraft(
                "blank template has no fields".to_string(),
            ));
        }
        self.draft = Draft::Adding { values: template };
        Ok(())
    }

    /// Opens an Edit draft projecting the record's editable fields.
    ///
    /// Fields absent on the record fall back to the template's blank value.
    /// Any open draft is discarded first.
    pub fn open_edit(&mut self, record: &Record, model: &dyn ResourceModel) -> ConsoleResult<()> {
        let target_id = identity_of(record, model.identity_field()).ok_or_else(|| {
            ConsoleError::InvalidDraft(format!(
                "record has no identity at '{}'",
                model.identity_field()
            ))
        })?;

        let template = model.blank_template();
        let mut values = Record::new();
        for path in model.editable_fields() {
            let value = field_at(record, path)
                .or_else(|| field_at(&template, path))
                .cloned()
                .unwrap_or(JsonValue::Null);
            set_field_at(&mut values, path, value);
        }
        if values.is_empty() {
            return Err(ConsoleError::InvalidDraft(format!(
                "{} has no editable fields",
                model.entity_name()
            )));
        }

        self.draft = Draft::Editing { target_id, values };
        Ok(())
    }

    /// Updates one pending value. Fails when no draft is open.
    pub fn change_field(&mut self, name: &str, value: JsonValue) -> ConsoleResult<()> {
        match &mut self.draft {
            Draft::Closed => Err(ConsoleError::InvalidDraft(
                "no draft is open".to_string(),
            )),
            Draft::Adding { values } | Draft::Editing { values, .. } => {
                set_field_at(values, name, value);
                Ok(())
            }
        }
    }

    /// Discards the draft.
    pub fn cancel(&mut self) {
        self.draft = Draft::Closed;
    }

    /// The pending submission, without closing the draft.
    pub fn submission(&self) -> Option<Submission> {
        match &self.draft {
            Draft::Closed => None,
            Draft::Adding { values } => Some(Submission::Create(values.clone())),
            Draft::Editing { target_id, values } => {
                Some(Submission::Update(*target_id, values.clone()))
            }
        }
    }
}
