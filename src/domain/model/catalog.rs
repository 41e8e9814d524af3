//! Built-in schemas for the tournament entities.

use super::{EntitySchema, ResourceModel};
use crate::domain::record::{field_text, Record};
use serde_json::json;
use std::collections::BTreeMap;

pub fn users() -> EntitySchema {
    EntitySchema::new("users", "id")
        .searchable(&["name", "email"])
        .filter("role", "role")
        .filter("status", "status")
        .toggle("isActive", "isActive")
        .sort_by("name")
        .field("name", json!(""))
        .field("email", json!(""))
        .field("role", json!("player"))
        .field("status", json!("active"))
        .field("isActive", json!(true))
        .required(&["name", "email"])
}

pub fn teams() -> EntitySchema {
    EntitySchema::new("teams", "id")
        .searchable(&["name", "coach", "category"])
        .filter("category", "category")
        .sort_by("name")
        .field("name", json!(""))
        .field("coach", json!(""))
        .field("category", json!(""))
        .field("players", json!(0))
        .required(&["name"])
}

pub fn coaches() -> EntitySchema {
    EntitySchema::new("coaches", "id")
        .searchable(&["name", "email", "team"])
        .filter("specialty", "specialty")
        .filter("status", "status")
        .toggle("isActive", "isActive")
        .sort_by("name")
        .field("name", json!(""))
        .field("email", json!(""))
        .field("team", json!(""))
        .field("specialty", json!(""))
        .field("experience", json!(0))
        .field("status", json!("active"))
        .field("isActive", json!(true))
        .required(&["name", "email"])
}

pub fn judges() -> EntitySchema {
    EntitySchema::new("judges", "id")
        .searchable(&["name", "email", "certification"])
        .filter("level", "level")
        .filter("status", "status")
        .toggle("isActive", "isActive")
        .sort_by("name")
        .field("name", json!(""))
        .field("email", json!(""))
        .field("certification", json!(""))
        .field("level", json!("regional"))
        .field("status", json!("active"))
        .field("isActive", json!(true))
        .required(&["name", "email"])
}

pub fn matches() -> EntitySchema {
    EntitySchema::new("matches", "id")
        .searchable(&["team1.name", "team2.name", "venue"])
        .filter("status", "status")
        .filter("round", "round")
        .sort_by("date")
        .field("team1.name", json!(""))
        .field("team2.name", json!(""))
        .field("date", json!(""))
        .field("venue", json!(""))
        .field("round", json!(""))
        .field("status", json!("scheduled"))
        .field("score", json!(""))
        .required(&["team1.name", "team2.name"])
}

pub fn tournaments() -> EntitySchema {
    EntitySchema::new("tournaments", "id")
        .searchable(&["name", "location"])
        .filter("status", "status")
        .filter("category", "category")
        .sort_by("startDate")
        .field("name", json!(""))
        .field("location", json!(""))
        .field("startDate", json!(""))
        .field("endDate", json!(""))
        .field("category", json!(""))
        .field("status", json!("upcoming"))
        .field("teams", json!(0))
        .required(&["name"])
}

pub fn categories() -> EntitySchema {
    EntitySchema::new("categories", "id")
        .searchable(&["name", "description"])
        .filter("ageGroup", "ageGroup")
        .toggle("isActive", "isActive")
        .sort_by("name")
        .field("name", json!(""))
        .field("description", json!(""))
        .field("ageGroup", json!(""))
        .field("isActive", json!(true))
        .required(&["name"])
}

pub fn players() -> EntitySchema {
    EntitySchema::new("players", "id")
        .searchable(&["name", "team", "position"])
        .filter("position", "position")
        .filter("team", "team")
        .toggle("isActive", "isActive")
        .sort_by("name")
        .field("name", json!(""))
        .field("team", json!(""))
        .field("position", json!(""))
        .field("number", json!(0))
        .field("isActive", json!(true))
        .required(&["name"])
}

/// Matches additionally reject a team playing itself.
pub struct MatchModel(EntitySchema);

impl MatchModel {
    pub fn new() -> Self {
        Self(matches())
    }
}

impl Default for MatchModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceModel for MatchModel {
    fn entity_name(&self) -> &str {
        self.0.entity_name()
    }

    fn identity_field(&self) -> &str {
        self.0.identity_field()
    }

    fn searchable_fields(&self) -> &[String] {
        self.0.searchable_fields()
    }

    fn categorical_filters(&self) -> &BTreeMap<String, String> {
        self.0.categorical_filters()
    }

    fn editable_fields(&self) -> &[String] {
        self.0.editable_fields()
    }

    fn blank_template(&self) -> Record {
        self.0.blank_template()
    }

    fn toggle_target<'a>(&'a self, action: &'a str) -> &'a str {
        self.0.toggle_target(action)
    }

    fn default_sort(&self) -> Option<&str> {
        self.0.default_sort()
    }

    fn validate_draft(&self, values: &Record) -> Result<(), String> {
        self.0.validate_draft(values)?;
        let team1 = field_text(values, "team1.name").unwrap_or_default();
        let team2 = field_text(values, "team2.name").unwrap_or_default();
        if team1.trim().to_lowercase() == team2.trim().to_lowercase() {
            return Err("a match needs two different teams".to_string());
        }
        Ok(())
    }
}
