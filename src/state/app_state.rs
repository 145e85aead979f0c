use crate::app::MenuItem;
use crate::state::form::InputForm;
use kickoff_core::Side;

// ---------------------------------------------------------------------------
// Input mode
// ---------------------------------------------------------------------------

/// What keystrokes are currently routed to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Browse,
    /// Typing into the active tab's form.
    Editing,
    /// Typing the two logo paths for the fixture being created.
    Logos,
    /// Live-editing one score of a match.
    Score { match_id: String, side: Side },
    Confirm(PendingAction),
}

/// A destructive action waiting for a yes/no answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    DeleteTeam(String),
    DeletePlayer(String),
    DeleteMatch(String),
    ClearMatches,
    DeletePrize(String),
    DeleteTeamStats(String),
}

impl PendingAction {
    pub fn title(&self) -> &'static str {
        match self {
            PendingAction::DeleteTeam(_) => "Delete Team",
            PendingAction::DeletePlayer(_) => "Delete Player",
            PendingAction::DeleteMatch(_) => "Delete Match",
            PendingAction::ClearMatches => "Clear All",
            PendingAction::DeletePrize(_) => "Delete Prize",
            PendingAction::DeleteTeamStats(_) => "Delete Team",
        }
    }

    pub fn question(&self) -> String {
        match self {
            PendingAction::DeleteTeam(_) => "Are you sure you want to delete this team?".into(),
            PendingAction::DeletePlayer(_) => "Are you sure you want to delete this player?".into(),
            PendingAction::DeleteMatch(_) => "Are you sure?".into(),
            PendingAction::ClearMatches => "Remove all matches?".into(),
            PendingAction::DeletePrize(_) => "Are you sure you want to delete this prize?".into(),
            PendingAction::DeleteTeamStats(team) => format!("Delete {team} and all its players?"),
        }
    }
}

// ---------------------------------------------------------------------------
// List selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListCursor {
    pub selected: usize,
}

impl ListCursor {
    pub fn down(&mut self, len: usize) {
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Keep the cursor inside a list that may have shrunk.
    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

pub mod fields {
    pub const DETAILS_NAME: usize = 0;
    pub const DETAILS_VENUE: usize = 1;
    pub const DETAILS_TEAMS: usize = 2;
    pub const DETAILS_START: usize = 3;
    pub const DETAILS_END: usize = 4;

    pub const HOME_TEAM: usize = 0;
    pub const AWAY_TEAM: usize = 1;

    pub const STATS_TEAM: usize = 0;
    pub const STATS_PLAYER: usize = 1;
    pub const STATS_GOALS: usize = 2;
    pub const STATS_ASSISTS: usize = 3;
    pub const STATS_YELLOW: usize = 4;
    pub const STATS_RED: usize = 5;

    pub const PRIZE_PLACE: usize = 0;
    pub const PRIZE_REWARD: usize = 1;
}

#[derive(Debug, Clone)]
pub struct Forms {
    pub details: InputForm,
    pub team: InputForm,
    pub player: InputForm,
    pub fixture: InputForm,
    pub logos: InputForm,
    pub stats: InputForm,
    pub prize: InputForm,
    pub score: InputForm,
}

impl Default for Forms {
    fn default() -> Self {
        Self {
            details: InputForm::new(&[
                "Tournament Name",
                "Venue",
                "Number of Teams",
                "Start Date",
                "End Date",
            ])
            .with_numeric(&[fields::DETAILS_TEAMS]),
            team: InputForm::new(&["Team Name"]),
            player: InputForm::new(&["Player Name"]),
            fixture: InputForm::new(&["Home Team", "Away Team"]),
            logos: InputForm::new(&["Home Logo", "Away Logo"]),
            stats: InputForm::new(&["Team", "Player", "Goals", "Assists", "Yellow Cards", "Red Cards"])
                .with_numeric(&[
                    fields::STATS_GOALS,
                    fields::STATS_ASSISTS,
                    fields::STATS_YELLOW,
                    fields::STATS_RED,
                ]),
            prize: InputForm::new(&["Place", "Reward"]),
            score: InputForm::new(&["Score"]).with_numeric(&[0]),
        }
    }
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_intro: bool,
    pub show_logs: bool,
    pub should_quit: bool,
    pub mode: InputMode,
    pub last_error: Option<String>,
    pub notice: Option<String>,
    pub forms: Forms,
    pub teams: ListCursor,
    pub players: ListCursor,
    pub matches: ListCursor,
    pub stats_teams: ListCursor,
    pub prizes: ListCursor,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            show_intro: true,
            ..Self::default()
        }
    }
}
