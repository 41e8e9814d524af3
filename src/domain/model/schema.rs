use crate::domain::model::{first_blank_field, ResourceModel};
use crate::domain::record::{field_at, Record};
use crate::error::{ConsoleError, ConsoleResult};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Declarative schema for one entity type.
///
/// Instances are built once per entity (see `catalog`) or deserialized from a
/// JSON table, and are immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EntitySchema {
    entity_name: String,
    #[serde(default = "default_identity_field")]
    identity_field: String,
    #[serde(default)]
    searchable_fields: Vec<String>,
    #[serde(default)]
    categorical_filters: BTreeMap<String, String>,
    /// Toggle action → boolean field path.
    #[serde(default)]
    toggles: BTreeMap<String, String>,
    #[serde(default)]
    default_sort: Option<String>,
    #[serde(default)]
    template: Record,
    #[serde(default)]
    editable_fields: Vec<String>,
    #[serde(default)]
    required_fields: Vec<String>,
}

fn default_identity_field() -> String {
    "id".to_string()
}

impl EntitySchema {
    pub fn new(entity_name: &str, identity_field: &str) -> Self {
        Self {
            entity_name: entity_name.to_string(),
            identity_field: identity_field.to_string(),
            searchable_fields: Vec::new(),
            categorical_filters: BTreeMap::new(),
            toggles: BTreeMap::new(),
            default_sort: None,
            template: Record::new(),
            editable_fields: Vec::new(),
            required_fields: Vec::new(),
        }
    }

    pub fn searchable(mut self, fields: &[&str]) -> Self {
        self.searchable_fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn filter(mut self, name: &str, path: &str) -> Self {
        self.categorical_filters
            .insert(name.to_string(), path.to_string());
        self
    }

    pub fn toggle(mut self, action: &str, path: &str) -> Self {
        self.toggles.insert(action.to_string(), path.to_string());
        self
    }

    pub fn sort_by(mut self, path: &str) -> Self {
        self.default_sort = Some(path.to_string());
        self
    }

    /// Adds an editable field and its blank value in the Add template.
    pub fn field(mut self, path: &str, blank: JsonValue) -> Self {
        self.editable_fields.push(path.to_string());
        crate::domain::record::set_field_at(&mut self.template, path, blank);
        self
    }

    pub fn required(mut self, fields: &[&str]) -> Self {
        self.required_fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    /// Checks the structural rules every schema must satisfy.
    pub fn validate(&self) -> ConsoleResult<()> {
        let name = &self.entity_name;
        if name.trim().is_empty() {
            return Err(ConsoleError::InvalidSchema(
                "entity name must not be empty".to_string(),
            ));
        }
        if self.identity_field.trim().is_empty() {
            return Err(ConsoleError::InvalidSchema(format!(
                "{}: identity field must not be empty",
                name
            )));
        }
        if self.editable_fields.is_empty() {
            return Err(ConsoleError::InvalidSchema(format!(
                "{}: at least one editable field is required",
                name
            )));
        }
        if let Some(missing) = self
            .editable_fields
            .iter()
            .find(|f| field_at(&self.template, f).is_none())
        {
            return Err(ConsoleError::InvalidSchema(format!(
                "{}: template has no blank value for '{}'",
                name, missing
            )));
        }
        if self.toggles.values().any(|f| f == &self.identity_field) {
            return Err(ConsoleError::InvalidSchema(format!(
                "{}: the identity field cannot be toggled",
                name
            )));
        }
        Ok(())
    }
}

impl ResourceModel for EntitySchema {
    fn entity_name(&self) -> &str {
        &self.entity_name
    }

    fn identity_field(&self) -> &str {
        &self.identity_field
    }

    fn searchable_fields(&self) -> &[String] {
        &self.searchable_fields
    }

    fn categorical_filters(&self) -> &BTreeMap<String, String> {
        &self.categorical_filters
    }

    fn editable_fields(&self) -> &[String] {
        &self.editable_fields
    }

    fn blank_template(&self) -> Record {
        self.template.clone()
    }

    fn toggle_target<'a>(&'a self, action: &'a str) -> &'a str {
        self.toggles.get(action).map(|s| s.as_str()).unwrap_or(action)
    }

    fn default_sort(&self) -> Option<&str> {
        self.default_sort.as_deref()
    }

    fn validate_draft(&self, values: &Record) -> Result<(), String> {
        match first_blank_field(values, &self.required_fields) {
            Some(field) => Err(format!("{} is required", field)),
            None => Ok(()),
        }
    }
}
