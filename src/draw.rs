use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::form_view::FormView;
use crate::components::points_table::PointsTable;
use crate::state::app_state::InputMode;
use crate::state::form::InputForm;
use crate::state::persist::{ERROR_CHAR, SaveState};
use crate::ui::layout::LayoutAreas;
use kickoff_core::Side;

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, save: SaveState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        if app.state.show_intro {
            draw_intro(f, f.area(), app);
            return;
        }

        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }

        match app.state.active_tab {
            MenuItem::Home => draw_home(f, layout.main, app),
            MenuItem::Details => draw_details(f, layout.main, app),
            MenuItem::Teams => draw_roster(
                f,
                layout.main,
                app,
                " Teams ",
                &app.state.forms.team,
                app.tournament.teams.items().iter().map(|t| t.name.as_str()).collect(),
                app.state.teams.selected,
            ),
            MenuItem::Players => draw_roster(
                f,
                layout.main,
                app,
                " Players ",
                &app.state.forms.player,
                app.tournament.players.items().iter().map(|p| p.name.as_str()).collect(),
                app.state.players.selected,
            ),
            MenuItem::Matches => draw_matches(f, layout.main, app),
            MenuItem::PointsTable => draw_points_table(f, layout.main, app),
            MenuItem::Statistics => draw_statistics(f, layout.main, app),
            MenuItem::Prizes => draw_prizes(f, layout.main, app),
            MenuItem::Help => draw_help(f, layout.main),
        }

        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }
        draw_status(f, layout.status, app);

        match &app.state.mode {
            InputMode::Logos => draw_logo_prompt(f, layout.main, app),
            InputMode::Confirm(action) => draw_confirm(f, layout.main, action.title(), &action.question()),
            _ => {}
        }

        draw_save_indicator(f, f.area(), app, save);
    });

    if let Err(e) = result {
        log::error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_intro(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::DarkGray).title(" Kickoff ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let view = app.details_view();
    let [_top_pad, title_area, venue_area, _gap, prompt_area, _bottom_pad] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(inner);

    f.render_widget(
        Paragraph::new(view.name)
            .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        title_area,
    );
    f.render_widget(
        Paragraph::new(format!("{}  |  {} - {}", view.venue, view.start_date, view.end_date))
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center),
        venue_area,
    );
    f.render_widget(
        Paragraph::new("Press Enter to start")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        prompt_area,
    );
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let titles: Vec<Line> = MenuItem::TABS
        .iter()
        .enumerate()
        .map(|(i, t)| Line::from(format!("{} {}", i + 1, t.title())))
        .collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(app.state.active_tab.index())
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

/// Draw a bordered form at the top of `area` and return what is left below it.
fn draw_form(f: &mut Frame, area: Rect, app: &App, form: &InputForm, title: &str) -> Rect {
    let editing = app.state.mode == InputMode::Editing;
    let height = form.fields.len() as u16 + 2;
    let [form_area, rest] =
        Layout::vertical([Constraint::Length(height), Constraint::Fill(1)]).areas(area);

    let color = if editing { Color::Yellow } else { Color::DarkGray };
    let block = default_border(color).title(title.to_string());
    let inner = block.inner(form_area);
    f.render_widget(block, form_area);
    f.render_widget(FormView { form, editing }, inner);
    rest
}

fn draw_home(f: &mut Frame, area: Rect, app: &App) {
    let [form_area, legend] =
        Layout::vertical([Constraint::Length(7), Constraint::Length(1)]).areas(area);
    draw_form(f, form_area, app, &app.state.forms.details, " Create Tournament ");
    f.render_widget(
        Paragraph::new("Keys: i=edit  Tab=next field  Enter=save  x=clear  Esc=stop editing")
            .style(Style::default().fg(Color::DarkGray)),
        legend,
    );
}

fn draw_details(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Tournament Details ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let view = app.details_view();
    let label = Style::default().fg(Color::Gray);
    let row = |name: &'static str, value: String| {
        Line::from(vec![Span::styled(format!("{name:>12}: "), label), Span::raw(value)])
    };
    let lines = vec![
        Line::from(Span::styled(
            view.name.clone(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        row("Venue", view.venue),
        row("Teams", view.teams),
        row("Start Date", view.start_date),
        row("End Date", view.end_date),
    ];
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_roster(
    f: &mut Frame,
    area: Rect,
    app: &App,
    title: &str,
    form: &InputForm,
    names: Vec<&str>,
    selected: usize,
) {
    let rest = draw_form(f, area, app, form, title);
    let block = default_border(Color::White).title(format!(" {} ", names.len()));
    let inner = block.inner(rest);
    f.render_widget(block, rest);

    if names.is_empty() {
        f.render_widget(
            Paragraph::new("Nothing added yet. Press i to type a name, Enter to add.")
                .style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    let lines: Vec<Line> = names
        .iter()
        .enumerate()
        .map(|(i, name)| selectable_line(i == selected, format!("{}. {name}", i + 1)))
        .collect();
    f.render_widget(Paragraph::new(scrolled(lines, selected, inner.height)), inner);
}

fn draw_matches(f: &mut Frame, area: Rect, app: &App) {
    let rest = draw_form(f, area, app, &app.state.forms.fixture, " Create Match ");
    let [list_area, legend] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(rest);

    let block = default_border(Color::White).title(" Fixtures ");
    let inner = block.inner(list_area);
    f.render_widget(block, list_area);

    let matches = app.tournament.matches.matches();
    if matches.is_empty() {
        f.render_widget(
            Paragraph::new("No matches yet.").style(Style::default().fg(Color::DarkGray)),
            inner,
        );
    } else {
        let editing = match &app.state.mode {
            InputMode::Score { match_id, side } => Some((match_id.as_str(), *side)),
            _ => None,
        };
        let selected = app.state.matches.selected;
        let lines: Vec<Line> = matches
            .iter()
            .enumerate()
            .map(|(i, m)| {
                let score = |side: Side| {
                    let value = m.score(side);
                    let cursor = if editing == Some((m.id.as_str(), side)) { "_" } else { "" };
                    if value.is_empty() && cursor.is_empty() {
                        "-".to_string()
                    } else {
                        format!("{value}{cursor}")
                    }
                };
                let text = format!(
                    "{}  [{}] - [{}]  {}",
                    m.home_name,
                    score(Side::Home),
                    score(Side::Away),
                    m.away_name
                );
                selectable_line(i == selected, text)
            })
            .collect();
        f.render_widget(Paragraph::new(scrolled(lines, selected, inner.height)), inner);
    }

    f.render_widget(
        Paragraph::new("Keys: i=new  h/a=home/away score  d=delete  X=clear all")
            .style(Style::default().fg(Color::DarkGray)),
        legend,
    );
}

fn draw_logo_prompt(f: &mut Frame, area: Rect, app: &App) {
    let popup = centered(area, 70, 6);
    f.render_widget(Clear, popup);
    let block = default_border(Color::Yellow).title(" Pick Logos (image paths, Esc cancels) ");
    let inner = block.inner(popup);
    f.render_widget(block, popup);
    f.render_widget(FormView { form: &app.state.forms.logos, editing: true }, inner);
}

fn draw_points_table(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Points Table ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = app.tournament.standings();
    if rows.is_empty() {
        f.render_widget(
            Paragraph::new("No matches played yet.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }
    f.render_widget(PointsTable { rows }, inner);
}

fn draw_statistics(f: &mut Frame, area: Rect, app: &App) {
    let rest = draw_form(f, area, app, &app.state.forms.stats, " Add / Update Player Stats ");
    let block = default_border(Color::White).title(" Player Stats ");
    let inner = block.inner(rest);
    f.render_widget(block, rest);

    let teams = app.visible_stats_teams();
    if teams.is_empty() {
        f.render_widget(
            Paragraph::new("No stats recorded yet.").style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    let heading = Style::default().fg(Color::Gray);
    let mut lines = Vec::new();
    let mut selected_line = 0;
    for (i, team) in teams.iter().enumerate() {
        if i == app.state.stats_teams.selected {
            selected_line = lines.len();
        }
        lines.push(selectable_line(i == app.state.stats_teams.selected, team.team.clone()));
        lines.push(Line::from(Span::styled(
            format!("    {:<20} {:>5} {:>7} {:>6} {:>4}", "Player", "Goals", "Assists", "Yellow", "Red"),
            heading,
        )));
        for p in &team.players {
            lines.push(Line::from(format!(
                "    {:<20} {:>5} {:>7} {:>6} {:>4}",
                p.player, p.goals, p.assists, p.yellow_cards, p.red_cards
            )));
        }
        lines.push(Line::from(""));
    }
    f.render_widget(Paragraph::new(scrolled(lines, selected_line, inner.height)), inner);
}

fn draw_prizes(f: &mut Frame, area: Rect, app: &App) {
    let rest = draw_form(f, area, app, &app.state.forms.prize, " Add Prize ");
    let block = default_border(Color::White).title(" Prizes ");
    let inner = block.inner(rest);
    f.render_widget(block, rest);

    let prizes = app.tournament.prizes.prizes();
    if prizes.is_empty() {
        f.render_widget(
            Paragraph::new("No prizes yet.").style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }
    let selected = app.state.prizes.selected;
    let lines: Vec<Line> = prizes
        .iter()
        .enumerate()
        .map(|(i, p)| selectable_line(i == selected, format!("{}: {}", p.place, p.reward)))
        .collect();
    f.render_widget(Paragraph::new(scrolled(lines, selected, inner.height)), inner);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let block = default_border(Color::White).title(" Help ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let text = "\
1-8 / Tab      switch screens
j/k            move selection
i / Enter      edit the screen's form (Enter again submits)
Tab / Up/Down  move between form fields while editing
Esc            stop editing, leave help
d              delete the selected entry (y/n to confirm)
h / a          edit home / away score of the selected match
X              clear all matches
x              clear the tournament form (Home)
f              full screen
\"              toggle log pane
q / Ctrl-C     quit";
    f.render_widget(Paragraph::new(text), inner);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let widget = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray));
    f.render_widget(widget, area);
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let (text, style) = if let Some(err) = app.state.last_error.as_deref() {
        (err.to_string(), Style::default().fg(Color::Red))
    } else if let Some(notice) = app.state.notice.as_deref() {
        (notice.to_string(), Style::default().fg(Color::Green))
    } else {
        let hint = match app.state.mode {
            InputMode::Browse => "i=edit  j/k=move  d=delete  ?=help  q=quit",
            InputMode::Editing | InputMode::Logos => "Enter=submit  Tab=next field  Esc=stop",
            InputMode::Score { .. } => "type the score, Enter/Esc when done",
            InputMode::Confirm(_) => "y=confirm  n=cancel",
        };
        (hint.to_string(), Style::default().fg(Color::DarkGray))
    };
    f.render_widget(Paragraph::new(text).style(style), area);
}

fn draw_confirm(f: &mut Frame, area: Rect, title: &str, question: &str) {
    let popup = centered(area, 50, 5);
    f.render_widget(Clear, popup);
    let block = default_border(Color::Red).title(format!(" {title} "));
    let inner = block.inner(popup);
    f.render_widget(block, popup);
    f.render_widget(
        Paragraph::new(vec![Line::from(question.to_string()), Line::from(""), Line::from("y / n")])
            .alignment(Alignment::Center),
        inner,
    );
}

fn draw_save_indicator(f: &mut Frame, area: Rect, app: &App, save: SaveState) {
    if !save.is_saving && save.indicator != ERROR_CHAR {
        return;
    }
    let style = match save.indicator {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let indicator = Paragraph::new(save.indicator.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(indicator, area);
}

fn selectable_line(selected: bool, text: String) -> Line<'static> {
    if selected {
        Line::from(Span::styled(
            format!("> {text}"),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(format!("  {text}"))
    }
}

/// Window `lines` so that `focus` stays visible in `height` rows.
fn scrolled(lines: Vec<Line<'static>>, focus: usize, height: u16) -> Vec<Line<'static>> {
    let height = height as usize;
    let start = (focus + 1).saturating_sub(height);
    lines.into_iter().skip(start).take(height.max(1)).collect()
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
