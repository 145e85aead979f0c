use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, InputMode, PendingAction, fields};
use crate::state::picker::FilePicker;
use kickoff_core::Side;
use kickoff_core::details::{DetailsView, TournamentDetails};
use kickoff_core::kv::{KeyValueStore, WritePort};
use kickoff_core::matches::ImagePicker;
use kickoff_core::stats::{StatDelta, TeamStats};
use kickoff_core::tournament::Tournament;
use log::{debug, info};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum MenuItem {
    #[default]
    Home,
    Details,
    Teams,
    Players,
    Matches,
    PointsTable,
    Statistics,
    Prizes,
    Help,
}

impl MenuItem {
    pub const TABS: [MenuItem; 8] = [
        MenuItem::Home,
        MenuItem::Details,
        MenuItem::Teams,
        MenuItem::Players,
        MenuItem::Matches,
        MenuItem::PointsTable,
        MenuItem::Statistics,
        MenuItem::Prizes,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            MenuItem::Home => "Home",
            MenuItem::Details => "Details",
            MenuItem::Teams => "Teams",
            MenuItem::Players => "Players",
            MenuItem::Matches => "Matches",
            MenuItem::PointsTable => "Points Table",
            MenuItem::Statistics => "Statistics",
            MenuItem::Prizes => "Prizes",
            MenuItem::Help => "Help",
        }
    }

    /// Position in the tab bar; Help has none.
    pub fn index(&self) -> Option<usize> {
        Self::TABS.iter().position(|t| t == self)
    }

    fn has_form(&self) -> bool {
        !matches!(self, MenuItem::Details | MenuItem::PointsTable | MenuItem::Help)
    }
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
    pub tournament: Tournament,
    writes: Box<dyn WritePort + Send>,
}

impl App {
    pub fn new(settings: AppSettings, writes: Box<dyn WritePort + Send>) -> Self {
        let app = Self {
            state: AppState::new(),
            tournament: Tournament::new(),
            settings,
            writes,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    pub fn load(&mut self, kv: &dyn KeyValueStore) {
        self.tournament.load_all(kv, self.writes.as_ref());
        info!(
            "loaded {} teams, {} players, {} matches",
            self.tournament.teams.len(),
            self.tournament.players.len(),
            self.tournament.matches.matches().len()
        );
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        self.state.mode = InputMode::Browse;
        if next == MenuItem::PointsTable {
            self.tournament.refresh_standings();
        }
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn next_tab(&mut self) {
        let i = self.state.active_tab.index().map_or(0, |i| (i + 1) % MenuItem::TABS.len());
        self.update_tab(MenuItem::TABS[i]);
    }

    pub fn prev_tab(&mut self) {
        let len = MenuItem::TABS.len();
        let i = self.state.active_tab.index().map_or(0, |i| (i + len - 1) % len);
        self.update_tab(MenuItem::TABS[i]);
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    pub fn dismiss_intro(&mut self) {
        self.state.show_intro = false;
    }

    pub fn quit(&mut self) {
        self.state.should_quit = true;
    }

    pub fn on_error(&mut self, message: String) {
        self.state.notice = None;
        self.state.last_error = Some(message);
    }

    fn on_notice(&mut self, message: impl Into<String>) {
        self.state.last_error = None;
        self.state.notice = Some(message.into());
    }

    // -----------------------------------------------------------------------
    // Form editing
    // -----------------------------------------------------------------------

    pub fn start_editing(&mut self) {
        if self.state.active_tab.has_form() {
            self.state.mode = InputMode::Editing;
        }
    }

    pub fn stop_editing(&mut self) {
        self.state.mode = InputMode::Browse;
    }

    fn active_form(&mut self) -> Option<&mut crate::state::form::InputForm> {
        let forms = &mut self.state.forms;
        match (&self.state.mode, self.state.active_tab) {
            (InputMode::Logos, _) => Some(&mut forms.logos),
            (InputMode::Score { .. }, _) => Some(&mut forms.score),
            (InputMode::Editing, MenuItem::Home) => Some(&mut forms.details),
            (InputMode::Editing, MenuItem::Teams) => Some(&mut forms.team),
            (InputMode::Editing, MenuItem::Players) => Some(&mut forms.player),
            (InputMode::Editing, MenuItem::Matches) => Some(&mut forms.fixture),
            (InputMode::Editing, MenuItem::Statistics) => Some(&mut forms.stats),
            (InputMode::Editing, MenuItem::Prizes) => Some(&mut forms.prize),
            _ => None,
        }
    }

    pub fn type_char(&mut self, c: char) {
        let changed = self.active_form().is_some_and(|form| form.push_char(c));
        if changed {
            self.apply_score_edit();
        }
    }

    pub fn backspace(&mut self) {
        let changed = self.active_form().is_some_and(|form| form.backspace());
        if changed {
            self.apply_score_edit();
        }
    }

    pub fn focus_next_field(&mut self) {
        if let Some(form) = self.active_form() {
            form.focus_next();
        }
    }

    pub fn focus_prev_field(&mut self) {
        if let Some(form) = self.active_form() {
            form.focus_prev();
        }
    }

    /// Enter while a form is focused.
    pub fn submit(&mut self) {
        match (&self.state.mode, self.state.active_tab) {
            (InputMode::Logos, _) => {
                let logos = &self.state.forms.logos;
                let mut picker = FilePicker::new([
                    logos.value(fields::HOME_TEAM).to_string(),
                    logos.value(fields::AWAY_TEAM).to_string(),
                ]);
                self.create_match(&mut picker);
            }
            (InputMode::Score { .. }, _) => self.state.mode = InputMode::Browse,
            (InputMode::Editing, MenuItem::Home) => self.save_details(),
            (InputMode::Editing, MenuItem::Teams) => self.add_team(),
            (InputMode::Editing, MenuItem::Players) => self.add_player(),
            (InputMode::Editing, MenuItem::Matches) => self.request_logos(),
            (InputMode::Editing, MenuItem::Statistics) => self.add_stats(),
            (InputMode::Editing, MenuItem::Prizes) => self.add_prize(),
            _ => {}
        }
    }

    // -----------------------------------------------------------------------
    // Home / details
    // -----------------------------------------------------------------------

    pub fn save_details(&mut self) {
        let form = &self.state.forms.details;
        self.tournament.details = TournamentDetails {
            name: form.value(fields::DETAILS_NAME).to_string(),
            venue: form.value(fields::DETAILS_VENUE).to_string(),
            teams: form.value(fields::DETAILS_TEAMS).to_string(),
            start_date: form.value(fields::DETAILS_START).to_string(),
            end_date: form.value(fields::DETAILS_END).to_string(),
        };
        self.state.mode = InputMode::Browse;
        self.on_notice("Tournament details saved");
        self.update_tab(MenuItem::Details);
    }

    pub fn clear_details(&mut self) {
        self.state.forms.details.clear();
        self.tournament.details.clear();
    }

    pub fn details_view(&self) -> DetailsView {
        DetailsView::from(&self.tournament.details)
    }

    // -----------------------------------------------------------------------
    // Teams / players
    // -----------------------------------------------------------------------

    fn add_team(&mut self) {
        let name = self.state.forms.team.value(0).to_string();
        if let Some(team) = self.tournament.teams.add(&name, self.writes.as_ref()) {
            debug!("added team {}", team.id);
            self.state.forms.team.clear();
        }
    }

    fn add_player(&mut self) {
        let name = self.state.forms.player.value(0).to_string();
        if let Some(player) = self.tournament.players.add(&name, self.writes.as_ref()) {
            debug!("added player {}", player.id);
            self.state.forms.player.clear();
        }
    }

    // -----------------------------------------------------------------------
    // Matches
    // -----------------------------------------------------------------------

    fn request_logos(&mut self) {
        let fixture = &self.state.forms.fixture;
        let names_missing = fixture.value(fields::HOME_TEAM).trim().is_empty()
            || fixture.value(fields::AWAY_TEAM).trim().is_empty();
        if names_missing {
            self.create_match(&mut FilePicker::cancelled());
            return;
        }
        self.state.forms.logos.clear();
        self.state.mode = InputMode::Logos;
    }

    /// Esc on the logo prompt: the picker is dismissed without an answer.
    pub fn cancel_logos(&mut self) {
        self.create_match(&mut FilePicker::cancelled());
    }

    fn create_match(&mut self, picker: &mut dyn ImagePicker) {
        let home = self.state.forms.fixture.value(fields::HOME_TEAM).to_string();
        let away = self.state.forms.fixture.value(fields::AWAY_TEAM).to_string();
        let result = self.tournament.matches.create(&home, &away, picker, self.writes.as_ref());

        match result {
            Ok(created) => {
                let summary = format!("{} vs {} scheduled", created.home_name, created.away_name);
                self.state.forms.fixture.clear();
                self.state.forms.logos.clear();
                self.state.mode = InputMode::Browse;
                self.state.matches.selected = self.tournament.matches.matches().len() - 1;
                self.on_notice(summary);
            }
            Err(e) => {
                if self.state.mode == InputMode::Logos {
                    self.state.mode = InputMode::Browse;
                }
                self.on_error(e.to_string());
            }
        }
    }

    pub fn selected_match_id(&self) -> Option<String> {
        self.tournament
            .matches
            .matches()
            .get(self.state.matches.selected)
            .map(|m| m.id.clone())
    }

    pub fn begin_score_edit(&mut self, side: Side) {
        let Some(match_id) = self.selected_match_id() else {
            return;
        };
        let current = self
            .tournament
            .matches
            .get(&match_id)
            .map(|m| m.score(side).to_string())
            .unwrap_or_default();
        self.state.forms.score.clear();
        self.state.forms.score.set_value(0, current);
        self.state.mode = InputMode::Score { match_id, side };
    }

    /// Every keystroke in the score field is saved as typed.
    fn apply_score_edit(&mut self) {
        let InputMode::Score { match_id, side } = &self.state.mode else {
            return;
        };
        let value = self.state.forms.score.value(0);
        self.tournament.matches.set_score(match_id, *side, value, self.writes.as_ref());
    }

    // -----------------------------------------------------------------------
    // Statistics
    // -----------------------------------------------------------------------

    /// Teams shown on the statistics screen: those with at least one player.
    pub fn visible_stats_teams(&self) -> Vec<&TeamStats> {
        self.tournament
            .stats
            .table()
            .teams()
            .iter()
            .filter(|t| !t.players.is_empty())
            .collect()
    }

    fn add_stats(&mut self) {
        let form = &self.state.forms.stats;
        let team = form.value(fields::STATS_TEAM).to_string();
        let player = form.value(fields::STATS_PLAYER).to_string();
        let delta = StatDelta::parse(
            form.value(fields::STATS_GOALS),
            form.value(fields::STATS_ASSISTS),
            form.value(fields::STATS_YELLOW),
            form.value(fields::STATS_RED),
        );

        if !self.tournament.stats.upsert(&team, &player, delta, self.writes.as_ref()) {
            self.on_error("Enter a team and a player name".to_string());
            return;
        }
        self.state.forms.stats.clear_fields(&[
            fields::STATS_PLAYER,
            fields::STATS_GOALS,
            fields::STATS_ASSISTS,
            fields::STATS_YELLOW,
            fields::STATS_RED,
        ]);
        self.state.forms.stats.focus = fields::STATS_PLAYER;
        self.on_notice(format!("Stats updated for {}", player.trim()));
    }

    // -----------------------------------------------------------------------
    // Prizes
    // -----------------------------------------------------------------------

    fn add_prize(&mut self) {
        let form = &self.state.forms.prize;
        let place = form.value(fields::PRIZE_PLACE).to_string();
        let reward = form.value(fields::PRIZE_REWARD).to_string();
        if self.tournament.prizes.add(&place, &reward, self.writes.as_ref()).is_none() {
            self.on_error("Enter both a place and a reward".to_string());
            return;
        }
        self.state.forms.prize.clear();
    }

    // -----------------------------------------------------------------------
    // Selection and deletion
    // -----------------------------------------------------------------------

    pub fn select_down(&mut self) {
        let len = self.selectable_len();
        if let Some(cursor) = self.active_cursor() {
            cursor.down(len);
        }
    }

    pub fn select_up(&mut self) {
        if let Some(cursor) = self.active_cursor() {
            cursor.up();
        }
    }

    fn selectable_len(&self) -> usize {
        match self.state.active_tab {
            MenuItem::Teams => self.tournament.teams.len(),
            MenuItem::Players => self.tournament.players.len(),
            MenuItem::Matches => self.tournament.matches.matches().len(),
            MenuItem::Statistics => self.visible_stats_teams().len(),
            MenuItem::Prizes => self.tournament.prizes.prizes().len(),
            _ => 0,
        }
    }

    fn active_cursor(&mut self) -> Option<&mut crate::state::app_state::ListCursor> {
        let state = &mut self.state;
        match state.active_tab {
            MenuItem::Teams => Some(&mut state.teams),
            MenuItem::Players => Some(&mut state.players),
            MenuItem::Matches => Some(&mut state.matches),
            MenuItem::Statistics => Some(&mut state.stats_teams),
            MenuItem::Prizes => Some(&mut state.prizes),
            _ => None,
        }
    }

    /// Ask for confirmation before deleting the highlighted entry.
    pub fn request_delete(&mut self) {
        let t = &self.tournament;
        let s = &self.state;
        let action = match s.active_tab {
            MenuItem::Teams => t.teams.items().get(s.teams.selected).map(|x| PendingAction::DeleteTeam(x.id.clone())),
            MenuItem::Players => t
                .players
                .items()
                .get(s.players.selected)
                .map(|x| PendingAction::DeletePlayer(x.id.clone())),
            MenuItem::Matches => self.selected_match_id().map(PendingAction::DeleteMatch),
            MenuItem::Statistics => self
                .visible_stats_teams()
                .get(s.stats_teams.selected)
                .map(|x| PendingAction::DeleteTeamStats(x.team.clone())),
            MenuItem::Prizes => t
                .prizes
                .prizes()
                .get(s.prizes.selected)
                .map(|x| PendingAction::DeletePrize(x.id.clone())),
            _ => None,
        };
        if let Some(action) = action {
            self.state.mode = InputMode::Confirm(action);
        }
    }

    pub fn request_clear_matches(&mut self) {
        if !self.tournament.matches.matches().is_empty() {
            self.state.mode = InputMode::Confirm(PendingAction::ClearMatches);
        }
    }

    pub fn confirm(&mut self) {
        let InputMode::Confirm(action) = std::mem::take(&mut self.state.mode) else {
            return;
        };
        let writes = self.writes.as_ref();
        let t = &mut self.tournament;
        match action {
            PendingAction::DeleteTeam(id) => {
                t.teams.remove(&id, writes);
            }
            PendingAction::DeletePlayer(id) => {
                t.players.remove(&id, writes);
            }
            PendingAction::DeleteMatch(id) => {
                t.matches.remove(&id, writes);
            }
            PendingAction::ClearMatches => t.matches.clear_all(writes),
            PendingAction::DeletePrize(id) => {
                t.prizes.remove(&id, writes);
            }
            PendingAction::DeleteTeamStats(team) => {
                t.stats.remove_team(&team, writes);
            }
        }
        self.clamp_cursors();
    }

    pub fn cancel_confirm(&mut self) {
        if matches!(self.state.mode, InputMode::Confirm(_)) {
            self.state.mode = InputMode::Browse;
        }
    }

    fn clamp_cursors(&mut self) {
        let stats_len = self.visible_stats_teams().len();
        let t = &self.tournament;
        let s = &mut self.state;
        s.teams.clamp(t.teams.len());
        s.players.clamp(t.players.len());
        s.matches.clamp(t.matches.matches().len());
        s.stats_teams.clamp(stats_len);
        s.prizes.clamp(t.prizes.prizes().len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kickoff_core::kv::{MemoryStore, keys};
    use std::sync::Arc;

    /// Writes go straight to a shared in-memory store the test can inspect.
    struct Shared(Arc<MemoryStore>);

    impl WritePort for Shared {
        fn write(&self, key: &str, value: String) {
            self.0.set(key, &value).unwrap();
        }

        fn remove(&self, key: &str) {
            KeyValueStore::remove(self.0.as_ref(), key).unwrap();
        }
    }

    fn app() -> (App, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let mut app = App::new(AppSettings::default(), Box::new(Shared(store.clone())));
        app.dismiss_intro();
        (app, store)
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.type_char(c);
        }
    }

    #[test]
    fn test_team_form_adds_and_clears() {
        let (mut app, store) = app();
        app.update_tab(MenuItem::Teams);
        app.start_editing();
        type_str(&mut app, "  Lions ");
        app.submit();

        assert_eq!(app.tournament.teams.items()[0].name, "Lions");
        assert_eq!(app.state.forms.team.value(0), "");
        assert!(store.get(keys::TEAMS).unwrap().unwrap().contains("Lions"));
    }

    #[test]
    fn test_blank_team_names_write_nothing() {
        let (mut app, store) = app();
        app.update_tab(MenuItem::Teams);
        app.start_editing();
        type_str(&mut app, "   ");
        app.submit();
        assert!(app.tournament.teams.is_empty());
        assert_eq!(store.get(keys::TEAMS).unwrap(), None);
    }

    #[test]
    fn test_match_without_names_reports_alert() {
        let (mut app, _) = app();
        app.update_tab(MenuItem::Matches);
        app.start_editing();
        type_str(&mut app, "Lions");
        app.submit();

        assert_eq!(app.state.last_error.as_deref(), Some("Enter team names first!"));
        assert_eq!(app.state.mode, InputMode::Editing);
        assert!(app.tournament.matches.matches().is_empty());
    }

    #[test]
    fn test_cancelled_logo_prompt_creates_nothing() {
        let (mut app, store) = app();
        app.update_tab(MenuItem::Matches);
        app.start_editing();
        type_str(&mut app, "Lions");
        app.focus_next_field();
        type_str(&mut app, "Tigers");
        app.submit();
        assert_eq!(app.state.mode, InputMode::Logos);

        app.cancel_logos();
        assert!(app.state.last_error.as_deref().unwrap().starts_with("Both teams need a logo!"));
        assert!(app.tournament.matches.matches().is_empty());
        assert_eq!(store.get(keys::MATCHES).unwrap(), None);
        assert_eq!(app.state.forms.fixture.value(fields::HOME_TEAM), "Lions");
    }

    #[test]
    fn test_logo_prompt_creates_fixture_and_scores_save_per_keystroke() {
        let dir = tempfile::tempdir().unwrap();
        let logo = dir.path().join("crest.png");
        std::fs::write(&logo, b"png").unwrap();
        let logo = logo.display().to_string();

        let (mut app, store) = app();
        app.update_tab(MenuItem::Matches);
        app.start_editing();
        type_str(&mut app, "Lions");
        app.focus_next_field();
        type_str(&mut app, "Tigers");
        app.submit();
        type_str(&mut app, &logo);
        app.focus_next_field();
        type_str(&mut app, &logo);
        app.submit();

        assert_eq!(app.state.mode, InputMode::Browse);
        assert_eq!(app.tournament.matches.matches().len(), 1);
        assert!(!app.tournament.matches.matches()[0].is_played());

        app.begin_score_edit(Side::Home);
        type_str(&mut app, "12");
        app.submit();
        app.begin_score_edit(Side::Away);
        type_str(&mut app, "1");
        app.backspace();
        type_str(&mut app, "0");

        let m = &app.tournament.matches.matches()[0];
        assert_eq!((m.home_score.as_str(), m.away_score.as_str()), ("12", "0"));
        let stored = store.get(keys::MATCHES).unwrap().unwrap();
        assert!(stored.contains(r#""homeScore":"12""#));
        assert!(stored.contains(r#""awayScore":"0""#));

        app.update_tab(MenuItem::PointsTable);
        let table = app.tournament.standings();
        assert_eq!(table[0].team, "Lions");
        assert_eq!(table[0].pts, 2);
    }

    #[test]
    fn test_details_save_and_fall_back_to_defaults() {
        let (mut app, _) = app();
        app.start_editing();
        type_str(&mut app, "Winter Cup");
        app.submit();

        assert_eq!(app.state.active_tab, MenuItem::Details);
        let view = app.details_view();
        assert_eq!(view.name, "Winter Cup");
        assert_eq!(view.venue, DetailsView::DEFAULT_VENUE);

        app.clear_details();
        assert_eq!(app.details_view().name, DetailsView::DEFAULT_NAME);
        assert_eq!(app.state.forms.details.value(fields::DETAILS_NAME), "");
    }

    #[test]
    fn test_stats_form_keeps_team_between_entries() {
        let (mut app, _) = app();
        app.update_tab(MenuItem::Statistics);
        app.start_editing();
        type_str(&mut app, "Lions");
        app.focus_next_field();
        type_str(&mut app, "Ali");
        app.focus_next_field();
        type_str(&mut app, "2");
        app.submit();
        type_str(&mut app, "ali");
        app.focus_next_field();
        type_str(&mut app, "1");
        app.submit();

        assert_eq!(app.state.forms.stats.value(fields::STATS_TEAM), "Lions");
        let players = app.tournament.stats.table().players("Lions").unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].goals, 3);
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let (mut app, store) = app();
        app.update_tab(MenuItem::Players);
        app.start_editing();
        type_str(&mut app, "Ali");
        app.submit();
        app.stop_editing();

        app.request_delete();
        app.cancel_confirm();
        assert_eq!(app.tournament.players.len(), 1);

        app.request_delete();
        assert!(matches!(app.state.mode, InputMode::Confirm(PendingAction::DeletePlayer(_))));
        app.confirm();
        assert!(app.tournament.players.is_empty());
        assert_eq!(store.get(keys::PLAYERS).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_tabs_cycle_and_help_returns() {
        let (mut app, _) = app();
        app.prev_tab();
        assert_eq!(app.state.active_tab, MenuItem::Prizes);
        app.next_tab();
        assert_eq!(app.state.active_tab, MenuItem::Home);

        app.update_tab(MenuItem::Help);
        app.exit_help();
        assert_eq!(app.state.active_tab, MenuItem::Home);
    }
}
