//! Fixed seed records served by the in-memory source.

use crate::domain::record::Record;
use serde_json::{json, Value as JsonValue};
use std::collections::HashMap;

fn records(values: Vec<JsonValue>) -> Vec<Record> {
    values
        .into_iter()
        .filter_map(|v| match v {
            JsonValue::Object(map) => Some(map),
            _ => None,
        })
        .collect()
}

pub fn users() -> Vec<Record> {
    records(vec![
        json!({"id": 1, "name": "Alice Martin", "email": "alice@tourney.example", "role": "admin", "status": "active", "isActive": true}),
        json!({"id": 2, "name": "Bruno Costa", "email": "bruno@tourney.example", "role": "coach", "status": "active", "isActive": true}),
        json!({"id": 3, "name": "Chloe Nguyen", "email": "chloe@tourney.example", "role": "judge", "status": "inactive", "isActive": false}),
        json!({"id": 4, "name": "David Okafor", "email": "david@tourney.example", "role": "organizer", "status": "active", "isActive": true}),
        json!({"id": 5, "name": "Emma Rossi", "email": "emma@tourney.example", "role": "player", "status": "active", "isActive": true}),
        json!({"id": 6, "name": "Felix Braun", "email": "felix@tourney.example", "role": "player", "status": "pending", "isActive": false}),
    ])
}

pub fn teams() -> Vec<Record> {
    records(vec![
        json!({"id": 1, "name": "Thunder Hawks", "coach": "Bruno Costa", "category": "U18", "players": 12}),
        json!({"id": 2, "name": "River Wolves", "coach": "Hana Sato", "category": "U18", "players": 11}),
        json!({"id": 3, "name": "Iron Lions", "coach": "Bruno Costa", "category": "Senior", "players": 14}),
        json!({"id": 4, "name": "Coastal Sharks", "coach": "Ivan Petrov", "category": "U16", "players": 10}),
    ])
}

pub fn coaches() -> Vec<Record> {
    records(vec![
        json!({"id": 1, "name": "Bruno Costa", "email": "bruno@tourney.example", "team": "Thunder Hawks", "specialty": "offense", "experience": 8, "status": "active", "isActive": true}),
        json!({"id": 2, "name": "Hana Sato", "email": "hana@tourney.example", "team": "River Wolves", "specialty": "defense", "experience": 5, "status": "active", "isActive": true}),
        json!({"id": 3, "name": "Ivan Petrov", "email": "ivan@tourney.example", "team": "Coastal Sharks", "specialty": "conditioning", "experience": 12, "status": "inactive", "isActive": false}),
    ])
}

pub fn judges() -> Vec<Record> {
    records(vec![
        json!({"id": 1, "name": "Chloe Nguyen", "email": "chloe@tourney.example", "certification": "FIBA Level 2", "level": "national", "status": "active", "isActive": true}),
        json!({"id": 2, "name": "Omar Haddad", "email": "omar@tourney.example", "certification": "Regional Referee", "level": "regional", "status": "active", "isActive": true}),
        json!({"id": 3, "name": "Paula Silva", "email": "paula@tourney.example", "certification": "FIBA Level 3", "level": "international", "status": "inactive", "isActive": false}),
    ])
}

pub fn matches() -> Vec<Record> {
    records(vec![
        json!({"id": 1, "team1": {"id": 1, "name": "Thunder Hawks"}, "team2": {"id": 2, "name": "River Wolves"}, "date": "2026-03-14", "venue": "Central Arena", "round": "quarterfinal", "status": "completed", "score": "78-72"}),
        json!({"id": 2, "team1": {"id": 3, "name": "Iron Lions"}, "team2": {"id": 4, "name": "Coastal Sharks"}, "date": "2026-03-15", "venue": "North Court", "round": "quarterfinal", "status": "scheduled", "score": ""}),
        json!({"id": 3, "team1": {"id": 1, "name": "Thunder Hawks"}, "team2": {"id": 3, "name": "Iron Lions"}, "date": "2026-03-21", "venue": "Central Arena", "round": "semifinal", "status": "scheduled", "score": ""}),
        json!({"id": 4, "team1": {"id": 2, "name": "River Wolves"}, "team2": {"id": 4, "name": "Coastal Sharks"}, "date": "2026-03-10", "venue": "Harbor Gym", "round": "group", "status": "cancelled", "score": ""}),
    ])
}

pub fn tournaments() -> Vec<Record> {
    records(vec![
        json!({"id": 1, "name": "Spring Cup", "location": "Lisbon", "startDate": "2026-03-10", "endDate": "2026-03-28", "category": "U18", "status": "ongoing", "teams": 8}),
        json!({"id": 2, "name": "Summer League", "location": "Porto", "startDate": "2026-06-01", "endDate": "2026-07-15", "category": "Senior", "status": "upcoming", "teams": 12}),
        json!({"id": 3, "name": "Winter Classic", "location": "Braga", "startDate": "2025-12-05", "endDate": "2025-12-20", "category": "U16", "status": "completed", "teams": 6}),
    ])
}

pub fn categories() -> Vec<Record> {
    records(vec![
        json!({"id": 1, "name": "U16", "description": "Players under sixteen", "ageGroup": "youth", "isActive": true}),
        json!({"id": 2, "name": "U18", "description": "Players under eighteen", "ageGroup": "youth", "isActive": true}),
        json!({"id": 3, "name": "Senior", "description": "Open adult competition", "ageGroup": "adult", "isActive": true}),
        json!({"id": 4, "name": "Masters", "description": "Veterans over forty", "ageGroup": "adult", "isActive": false}),
    ])
}

pub fn players() -> Vec<Record> {
    records(vec![
        json!({"id": 1, "name": "Emma Rossi", "team": "Thunder Hawks", "position": "guard", "number": 7, "isActive": true}),
        json!({"id": 2, "name": "Felix Braun", "team": "Thunder Hawks", "position": "center", "number": 15, "isActive": false}),
        json!({"id": 3, "name": "Gina Alves", "team": "River Wolves", "position": "forward", "number": 9, "isActive": true}),
        json!({"id": 4, "name": "Hugo Lima", "team": "Iron Lions", "position": "guard", "number": 3, "isActive": true}),
        json!({"id": 5, "name": "Iris Moreau", "team": "Coastal Sharks", "position": "forward", "number": 11, "isActive": true}),
        json!({"id": 6, "name": "Jonas Berg", "team": "Iron Lions", "position": "center", "number": 21, "isActive": true}),
    ])
}

/// Seed collections keyed by entity name.
pub fn all() -> HashMap<String, Vec<Record>> {
    HashMap::from([
        ("users".to_string(), users()),
        ("teams".to_string(), teams()),
        ("coaches".to_string(), coaches()),
        ("judges".to_string(), judges()),
        ("matches".to_string(), matches()),
        ("tournaments".to_string(), tournaments()),
        ("categories".to_string(), categories()),
        ("players".to_string(), players()),
    ])
}
