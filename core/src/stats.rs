//! Per-team player counters (goals, assists, cards).
//!
//! The stored `playerStats` document has drifted over time: a team's players
//! may be a JSON array or an object keyed by anything. Every load goes
//! through [`StatsTable::normalize`], which produces the canonical form the
//! rest of the code works on.

use crate::PlayerStat;
use crate::kv::{KeyValueStore, WritePort, keys, write_json};
use crate::parse::{clamp_counter, counter_or_zero};
use log::{debug, error, warn};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Increments applied by one "add / update" entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatDelta {
    pub goals: u32,
    pub assists: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
}

impl StatDelta {
    /// Build from form text. Blank, garbage and negative fields count as 0.
    pub fn parse(goals: &str, assists: &str, yellow_cards: &str, red_cards: &str) -> Self {
        Self {
            goals: counter_or_zero(goals),
            assists: counter_or_zero(assists),
            yellow_cards: counter_or_zero(yellow_cards),
            red_cards: counter_or_zero(red_cards),
        }
    }

    pub fn goals(goals: u32) -> Self {
        Self { goals, ..Self::default() }
    }
}

impl PlayerStat {
    fn from_delta(player: &str, delta: StatDelta) -> Self {
        PlayerStat {
            player: player.to_string(),
            goals: delta.goals,
            assists: delta.assists,
            yellow_cards: delta.yellow_cards,
            red_cards: delta.red_cards,
        }
    }

    fn absorb(&mut self, delta: StatDelta) {
        self.goals = self.goals.saturating_add(delta.goals);
        self.assists = self.assists.saturating_add(delta.assists);
        self.yellow_cards = self.yellow_cards.saturating_add(delta.yellow_cards);
        self.red_cards = self.red_cards.saturating_add(delta.red_cards);
    }

    fn as_delta(&self) -> StatDelta {
        StatDelta {
            goals: self.goals,
            assists: self.assists,
            yellow_cards: self.yellow_cards,
            red_cards: self.red_cards,
        }
    }

    fn is_named(&self, player: &str) -> bool {
        self.player.to_lowercase() == player.to_lowercase()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamStats {
    pub team: String,
    pub players: Vec<PlayerStat>,
}

impl TeamStats {
    fn merge(&mut self, player: &str, delta: StatDelta) {
        match self.players.iter_mut().find(|p| p.is_named(player)) {
            Some(existing) => existing.absorb(delta),
            None => self.players.push(PlayerStat::from_delta(player, delta)),
        }
    }
}

/// Team name to player counters, in the order teams were first entered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsTable {
    teams: Vec<TeamStats>,
}

impl StatsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn teams(&self) -> &[TeamStats] {
        &self.teams
    }

    pub fn players(&self, team: &str) -> Option<&[PlayerStat]> {
        self.teams
            .iter()
            .find(|t| t.team == team)
            .map(|t| t.players.as_slice())
    }

    /// Add `delta` to the named player's counters, creating the team and
    /// player as needed. Player names match case-insensitively. Returns
    /// false when the team or player name is blank.
    pub fn upsert_player_stat(&mut self, team: &str, player: &str, delta: StatDelta) -> bool {
        let (team, player) = (team.trim(), player.trim());
        if team.is_empty() || player.is_empty() {
            return false;
        }
        self.team_mut(team).merge(player, delta);
        true
    }

    pub fn remove_team(&mut self, team: &str) -> bool {
        let before = self.teams.len();
        self.teams.retain(|t| t.team != team);
        self.teams.len() != before
    }

    /// Canonicalize a raw stored document.
    ///
    /// Entries lacking a `player` name or any of the four counters are
    /// dropped; counters given as strings or fractional numbers are coerced
    /// to non-negative integers; repeated player names within a team are
    /// merged. Team names are trimmed, and teams whose names collide after
    /// trimming are merged; blank team names are dropped. Anything that is
    /// not an object yields an empty table.
    pub fn normalize(raw: &Value) -> StatsTable {
        let mut table = StatsTable::new();
        let Some(teams) = raw.as_object() else {
            if !raw.is_null() {
                warn!("playerStats is not an object, ignoring it");
            }
            return table;
        };

        for (stored_team, bucket) in teams {
            let team = stored_team.trim();
            if team.is_empty() {
                warn!("dropping stats stored under a blank team name");
                continue;
            }
            let entries = match RawPlayers::deserialize(bucket) {
                Ok(RawPlayers::Sequence(entries)) => entries,
                Ok(RawPlayers::Keyed(map)) => map.into_iter().map(|(_, v)| v).collect(),
                Err(_) => {
                    warn!("dropping stats for {team}: unexpected shape");
                    continue;
                }
            };

            let stats = table.team_mut(team);
            for entry in &entries {
                match validate_entry(entry) {
                    Some(stat) => stats.merge(&stat.player, stat.as_delta()),
                    None => debug!("dropping malformed stats entry for {team}: {entry}"),
                }
            }
        }
        table
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    fn team_mut(&mut self, team: &str) -> &mut TeamStats {
        let pos = match self.teams.iter().position(|t| t.team == team) {
            Some(pos) => pos,
            None => {
                self.teams.push(TeamStats { team: team.to_string(), players: Vec::new() });
                self.teams.len() - 1
            }
        };
        &mut self.teams[pos]
    }
}

impl Serialize for StatsTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.teams.len()))?;
        for t in &self.teams {
            map.serialize_entry(&t.team, &t.players)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for StatsTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(StatsTable::normalize(&raw))
    }
}

/// The two shapes a team's player list has been stored in.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawPlayers {
    Sequence(Vec<Value>),
    Keyed(Map<String, Value>),
}

fn validate_entry(entry: &Value) -> Option<PlayerStat> {
    let obj = entry.as_object()?;
    let player = obj.get("player")?.as_str()?.trim();
    if player.is_empty() {
        return None;
    }
    Some(PlayerStat {
        player: player.to_string(),
        goals: coerce_counter(obj.get("goals")?)?,
        assists: coerce_counter(obj.get("assists")?)?,
        yellow_cards: coerce_counter(obj.get("yellowCards")?)?,
        red_cards: coerce_counter(obj.get("redCards")?)?,
    })
}

fn coerce_counter(value: &Value) -> Option<u32> {
    match value {
        Value::String(s) => Some(counter_or_zero(s)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(clamp_counter(i))
            } else if let Some(u) = n.as_u64() {
                Some(u32::try_from(u).unwrap_or(u32::MAX))
            } else {
                // Float-to-int `as` truncates toward zero and saturates.
                n.as_f64().map(|f| clamp_counter(f as i64))
            }
        }
        _ => None,
    }
}

/// Owner of the stats table and its persistence.
#[derive(Debug, Clone, Default)]
pub struct StatsBook {
    table: StatsTable,
}

impl StatsBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(&self) -> &StatsTable {
        &self.table
    }

    /// Load and normalize the stored table. The normalized form is written
    /// back only when it differs from what was stored.
    pub fn load(&mut self, kv: &dyn KeyValueStore, port: &dyn WritePort) {
        let raw = match kv.get(keys::PLAYER_STATS) {
            Ok(Some(raw)) => raw,
            Ok(None) => return,
            Err(e) => {
                error!("Error loading stats: {e}");
                return;
            }
        };
        let value: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                error!("Error loading stats: {e}");
                return;
            }
        };

        self.table = StatsTable::normalize(&value);
        if self.table.to_value() != value {
            debug!("rewriting normalized playerStats");
            self.save(port);
        }
    }

    pub fn save(&self, port: &dyn WritePort) {
        write_json(port, keys::PLAYER_STATS, &self.table);
    }

    pub fn upsert(&mut self, team: &str, player: &str, delta: StatDelta, port: &dyn WritePort) -> bool {
        if !self.table.upsert_player_stat(team, player, delta) {
            return false;
        }
        self.save(port);
        true
    }

    pub fn remove_team(&mut self, team: &str, port: &dyn WritePort) -> bool {
        if !self.table.remove_team(team) {
            return false;
        }
        self.save(port);
        true
    }
}
