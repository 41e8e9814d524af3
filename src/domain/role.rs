use crate::error::ConsoleError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Console roles; each sees a fixed dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Coach,
    Judge,
    Organizer,
    Player,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::Coach,
        Role::Judge,
        Role::Organizer,
        Role::Player,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Coach => "coach",
            Role::Judge => "judge",
            Role::Organizer => "organizer",
            Role::Player => "player",
        }
    }

    /// Entity panels of this role's dashboard, in display order.
    pub fn panels(&self) -> &'static [&'static str] {
        match self {
            Role::Admin => &[
                "users",
                "teams",
                "coaches",
                "judges",
                "matches",
                "tournaments",
                "categories",
                "players",
            ],
            Role::Organizer => &["tournaments", "matches", "teams", "categories", "judges"],
            Role::Coach => &["teams", "players", "matches"],
            Role::Judge => &["matches", "tournaments"],
            Role::Player => &["matches", "tournaments", "teams"],
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lc = s.trim().to_lowercase();
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == lc)
            .ok_or_else(|| ConsoleError::UnknownRole(s.to_string()))
    }
}
