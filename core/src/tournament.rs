use crate::details::TournamentDetails;
use crate::kv::{KeyValueStore, WritePort};
use crate::matches::MatchStore;
use crate::prizes::PrizeStore;
use crate::roster::Roster;
use crate::standings::{TieBreak, compute_standings_with};
use crate::stats::StatsBook;
use crate::{Player, StandingsRow, Team};

/// Every store the app works with, owned in one place.
#[derive(Debug, Default)]
pub struct Tournament {
    pub details: TournamentDetails,
    pub teams: Roster<Team>,
    pub players: Roster<Player>,
    pub matches: MatchStore,
    pub prizes: PrizeStore,
    pub stats: StatsBook,
    pub tie_break: TieBreak,
    standings: Vec<StandingsRow>,
}

impl Tournament {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every stored document and compute the initial table.
    pub fn load_all(&mut self, kv: &dyn KeyValueStore, port: &dyn WritePort) {
        self.teams.load(kv);
        self.players.load(kv);
        self.matches.load(kv);
        self.prizes.load(kv);
        self.stats.load(kv, port);
        self.refresh_standings();
    }

    /// Recompute the points table from the current match list.
    pub fn refresh_standings(&mut self) -> &[StandingsRow] {
        self.standings = compute_standings_with(self.matches.matches(), self.tie_break);
        &self.standings
    }

    pub fn standings(&self) -> &[StandingsRow] {
        &self.standings
    }
}
