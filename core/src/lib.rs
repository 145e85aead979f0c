pub mod details;
pub mod ids;
pub mod kv;
pub mod matches;
pub mod parse;
pub mod prizes;
pub mod roster;
pub mod standings;
pub mod stats;
pub mod tournament;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Domain types (field names follow the persisted JSON documents)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
}

/// Local reference to a picked image, e.g. `file:///home/me/logos/fc.png`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogoRef(pub String);

impl LogoRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: String,
    #[serde(rename = "home")]
    pub home_logo: LogoRef,
    #[serde(rename = "away")]
    pub away_logo: LogoRef,
    pub home_name: String,
    pub away_name: String,
    /// Free text as typed; empty means the match has not been played.
    #[serde(default)]
    pub home_score: String,
    #[serde(default)]
    pub away_score: String,
}

impl Match {
    pub fn is_played(&self) -> bool {
        !self.home_score.is_empty() && !self.away_score.is_empty()
    }

    pub fn score(&self, side: Side) -> &str {
        match side {
            Side::Home => &self.home_score,
            Side::Away => &self.away_score,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn label(&self) -> &'static str {
        match self {
            Side::Home => "home",
            Side::Away => "away",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prize {
    pub id: String,
    pub place: String,
    pub reward: String,
}

/// One line of the points table. Derived from the match list, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StandingsRow {
    pub team: String,
    pub pts: u32,
    #[serde(rename = "W")]
    pub wins: u32,
    #[serde(rename = "D")]
    pub draws: u32,
    #[serde(rename = "L")]
    pub losses: u32,
    #[serde(rename = "P")]
    pub played: u32,
}

impl StandingsRow {
    pub fn new(team: impl Into<String>) -> Self {
        Self { team: team.into(), ..Self::default() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStat {
    pub player: String,
    pub goals: u32,
    pub assists: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
}
