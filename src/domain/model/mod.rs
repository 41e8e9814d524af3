//! Entity schema definitions for the console's resource lists.

use crate::domain::record::{field_text, Record};
use std::collections::BTreeMap;

pub mod catalog;
pub mod registry;
pub mod schema;

pub use catalog::MatchModel;
pub use registry::SchemaRegistry;
pub use schema::EntitySchema;

/// Trait that defines the contract for any entity shown in a resource list.
///
/// The filter engine, store and draft controller work with any model through
/// this trait without knowing the entity's fields. Each model provides:
/// - identity, searchable and categorical field paths
/// - the blank template for Add and the editable projection for Edit
/// - optional draft validation
pub trait ResourceModel: Send + Sync {
    /// Entity name, also used as the panel name (e.g. `users`).
    fn entity_name(&self) -> &str;

    /// Field path holding the unique identity of each record.
    fn identity_field(&self) -> &str;

    /// Field paths matched by the free-text search, in order.
    fn searchable_fields(&self) -> &[String];

    /// Filter name → field path for categorical equality filters.
    fn categorical_filters(&self) -> &BTreeMap<String, String>;

    /// Field paths an Edit draft projects from the record.
    fn editable_fields(&self) -> &[String];

    /// Initial values of an Add draft.
    fn blank_template(&self) -> Record;

    /// Resolves a toggle action (e.g. `isActive`) to the boolean field it flips.
    ///
    /// Default: the action names the field itself.
    fn toggle_target<'a>(&'a self, action: &'a str) -> &'a str {
        action
    }

    /// Field the data source should order lists by, if any.
    fn default_sort(&self) -> Option<&str> {
        None
    }

    /// Validates pending draft values before they are committed.
    /// Returns Ok(()) if valid, Err(String) with error message if invalid.
    ///
    /// Default implementation does no validation.
    fn validate_draft(&self, _values: &Record) -> Result<(), String> {
        Ok(())
    }
}

/// Reports the first field in `required` whose text value is missing or blank.
pub fn first_blank_field<'a>(values: &Record, required: &'a [String]) -> Option<&'a str> {
    required
        .iter()
        .find(|field| {
            field_text(values, field)
                .map(|s| s.trim().is_empty())
                .unwrap_or(true)
        })
        .map(|s| s.as_str())
}
