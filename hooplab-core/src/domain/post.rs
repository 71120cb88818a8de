//! Looking-for-group posts — short-lived matchmaking notices.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::ids::{PostId, UserId};

/// Team size the poster is looking to fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    #[serde(rename = "2s")]
    Twos,
    #[serde(rename = "3s")]
    Threes,
    #[serde(rename = "5s")]
    Fives,
}

impl GameMode {
    pub fn label(&self) -> &'static str {
        match self {
            GameMode::Twos => "2s",
            GameMode::Threes => "3s",
            GameMode::Fives => "5s",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("unknown game mode '{0}' (expected 2s, 3s, or 5s)")]
pub struct ParseGameModeError(pub String);

impl FromStr for GameMode {
    type Err = ParseGameModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "2s" => Ok(GameMode::Twos),
            "3s" => Ok(GameMode::Threes),
            "5s" => Ok(GameMode::Fives),
            _ => Err(ParseGameModeError(s.to_string())),
        }
    }
}

/// One LFG notice. Posts are short-lived: the board purges anything older
/// than its TTL (one hour by default) on the next read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LfgPost {
    pub id: PostId,
    pub user_id: UserId,
    pub gamertag: String,
    pub content: String,
    pub mode: GameMode,
    pub created_at: DateTime<Utc>,
}

impl LfgPost {
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.created_at < now - ttl
    }

    /// Relative age for display: "just now", "5 minutes ago", "2 hours ago",
    /// "3 days ago".
    pub fn age_label(&self, now: DateTime<Utc>) -> String {
        let minutes = (now - self.created_at).num_minutes();
        if minutes < 1 {
            "just now".to_string()
        } else if minutes < 60 {
            format!("{minutes} minute{} ago", plural(minutes))
        } else if minutes < 1440 {
            let hours = minutes / 60;
            format!("{hours} hour{} ago", plural(hours))
        } else {
            let days = minutes / 1440;
            format!("{days} day{} ago", plural(days))
        }
    }
}

fn plural(n: i64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
