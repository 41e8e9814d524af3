//! Filter engine: search text plus categorical equality, combined with AND.

use crate::domain::model::ResourceModel;
use crate::domain::record::{field_text, Record};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Categorical value that disables a filter.
pub const ALL: &str = "all";

/// Current filter inputs of one panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub search: String,
    /// Filter name → selected value. Missing, empty and `all` are inactive.
    #[serde(default)]
    pub filters: BTreeMap<String, String>,
}

impl FilterState {
    pub fn with_search(mut self, search: &str) -> Self {
        self.search = search.to_string();
        self
    }

    pub fn with_filter(mut self, name: &str, value: &str) -> Self {
        self.filters.insert(name.to_string(), value.to_string());
        self
    }

    /// Selected value of a categorical filter, if it is active.
    pub fn active_value(&self, name: &str) -> Option<&str> {
        self.filters
            .get(name)
            .map(|v| v.as_str())
            .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(ALL))
    }
}

/// Predicate compiled from a filter state against one schema.
///
/// Search and filter values are case-folded once up front.
pub struct FilterPredicate<'a> {
    searchable: &'a [String],
    search: Option<String>,
    categorical: Vec<(&'a str, String)>,
}

impl<'a> FilterPredicate<'a> {
    pub fn compile(model: &'a dyn ResourceModel, filters: &FilterState) -> Self {
        let search = if filters.search.is_empty() {
            None
        } else {
            Some(filters.search.to_lowercase())
        };
        let categorical = model
            .categorical_filters()
            .iter()
            .filter_map(|(name, path)| {
                filters
                    .active_value(name)
                    .map(|value| (path.as_str(), value.to_lowercase()))
            })
            .collect();
        Self {
            searchable: model.searchable_fields(),
            search,
            categorical,
        }
    }

    /// True when no search and no categorical filter is active.
    pub fn is_identity(&self) -> bool {
        self.search.is_none() && self.categorical.is_empty()
    }

    pub fn matches(&self, record: &Record) -> bool {
        if let Some(needle) = &self.search {
            let hit = self.searchable.iter().any(|path| {
                field_text(record, path)
                    .map(|text| text.to_lowercase().contains(needle.as_str()))
                    .unwrap_or(false)
            });
            if !hit {
                return false;
            }
        }
        self.categorical.iter().all(|(path, expected)| {
            field_text(record, path)
                .map(|text| text.to_lowercase() == *expected)
                .unwrap_or(false)
        })
    }
}

/// Returns the records passing `filters`, in their original order.
pub fn apply<'r>(
    items: &'r [Record],
    model: &dyn ResourceModel,
    filters: &FilterState,
) -> Vec<&'r Record> {
    let predicate = FilterPredicate::compile(model, filters);
    if predicate.is_identity() {
        return items.iter().collect();
    }
    items.iter().filter(|r| predicate.matches(r)).collect()
}
