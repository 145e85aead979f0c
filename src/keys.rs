use crate::app::{App, MenuItem};
use crate::state::app_state::InputMode;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use kickoff_core::Side;
use std::sync::Arc;
use tokio::sync::Mutex;

pub async fn handle_key_bindings(key_event: KeyEvent, app: &Arc<Mutex<App>>) {
    let mut guard = app.lock().await;
    apply_key(&mut guard, key_event);
}

fn apply_key(app: &mut App, key_event: KeyEvent) {
    if key_event.kind == KeyEventKind::Release {
        return;
    }
    if let (Char('c'), KeyModifiers::CONTROL) = (key_event.code, key_event.modifiers) {
        app.quit();
        return;
    }

    if app.state.show_intro {
        match key_event.code {
            KeyCode::Enter => app.dismiss_intro(),
            Char('q') => app.quit(),
            _ => {}
        }
        return;
    }

    match app.state.mode.clone() {
        InputMode::Browse => browse_key(app, key_event),
        InputMode::Editing | InputMode::Logos | InputMode::Score { .. } => form_key(app, key_event),
        InputMode::Confirm(_) => match key_event.code {
            Char('y') | KeyCode::Enter => app.confirm(),
            Char('n') | KeyCode::Esc => app.cancel_confirm(),
            _ => {}
        },
    }
}

fn form_key(app: &mut App, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Esc if app.state.mode == InputMode::Logos => app.cancel_logos(),
        KeyCode::Esc => app.stop_editing(),
        KeyCode::Enter => app.submit(),
        KeyCode::Tab | KeyCode::Down => app.focus_next_field(),
        KeyCode::BackTab | KeyCode::Up => app.focus_prev_field(),
        KeyCode::Backspace => app.backspace(),
        Char(c) => app.type_char(c),
        _ => {}
    }
}

fn browse_key(app: &mut App, key_event: KeyEvent) {
    match (app.state.active_tab, key_event.code) {
        (_, Char('q')) => app.quit(),

        // Tab switching
        (_, Char(c @ '1'..='8')) => {
            let index = c as usize - '1' as usize;
            app.update_tab(MenuItem::TABS[index]);
        }
        (_, KeyCode::Tab) => app.next_tab(),
        (_, KeyCode::BackTab) => app.prev_tab(),
        (_, Char('?')) => app.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc) => app.exit_help(),

        // Lists
        (_, Char('j') | KeyCode::Down) => app.select_down(),
        (_, Char('k') | KeyCode::Up) => app.select_up(),
        (_, Char('d') | KeyCode::Delete) => app.request_delete(),

        // Forms
        (_, Char('i') | KeyCode::Enter) => app.start_editing(),
        (MenuItem::Home, Char('x')) => app.clear_details(),

        // Matches
        (MenuItem::Matches, Char('h')) => app.begin_score_edit(Side::Home),
        (MenuItem::Matches, Char('a')) => app.begin_score_edit(Side::Away),
        (MenuItem::Matches, Char('X')) => app.request_clear_matches(),

        // Global
        (_, Char('f')) => app.toggle_full_screen(),
        (_, Char('"')) => app.toggle_show_logs(),

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::app_settings::AppSettings;
    use kickoff_core::kv::{LoggedWrites, MemoryStore};

    fn app() -> App {
        App::new(AppSettings::default(), Box::new(LoggedWrites(MemoryStore::new())))
    }

    fn press(app: &mut App, code: KeyCode) {
        apply_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, Char(c));
        }
    }

    #[test]
    fn test_intro_only_accepts_enter_and_quit() {
        let mut app = app();
        press(&mut app, Char('3'));
        assert_eq!(app.state.active_tab, MenuItem::Home);
        press(&mut app, KeyCode::Enter);
        assert!(!app.state.show_intro);
        press(&mut app, Char('3'));
        assert_eq!(app.state.active_tab, MenuItem::Teams);
    }

    #[test]
    fn test_digits_type_into_forms_instead_of_switching_tabs() {
        let mut app = app();
        app.dismiss_intro();
        press(&mut app, Char('8'));
        press(&mut app, Char('i'));
        type_str(&mut app, "1st");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "q100");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.state.active_tab, MenuItem::Prizes);
        let prize = &app.tournament.prizes.prizes()[0];
        assert_eq!((prize.place.as_str(), prize.reward.as_str()), ("1st", "q100"));
        assert!(!app.state.should_quit);
    }

    #[test]
    fn test_escape_leaves_the_form_then_q_quits() {
        let mut app = app();
        app.dismiss_intro();
        press(&mut app, Char('3'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state.mode, InputMode::Editing);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state.mode, InputMode::Browse);
        press(&mut app, Char('q'));
        assert!(app.state.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_from_any_mode() {
        let mut app = app();
        app.dismiss_intro();
        app.start_editing();
        apply_key(&mut app, KeyEvent::new(Char('c'), KeyModifiers::CONTROL));
        assert!(app.state.should_quit);
    }

    #[test]
    fn test_escape_on_logo_prompt_cancels_creation() {
        let mut app = app();
        app.dismiss_intro();
        press(&mut app, Char('5'));
        press(&mut app, Char('i'));
        type_str(&mut app, "Lions");
        press(&mut app, KeyCode::Down);
        type_str(&mut app, "Tigers");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state.mode, InputMode::Logos);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state.mode, InputMode::Browse);
        assert!(app.tournament.matches.matches().is_empty());
        assert!(app.state.last_error.is_some());
    }
}
