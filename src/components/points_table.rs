use kickoff_core::StandingsRow;
use tui::buffer::Buffer;
use tui::layout::{Constraint, Rect};
use tui::style::{Color, Modifier, Style};
use tui::widgets::{Row, Table, Widget};

pub const HEADINGS: [&str; 6] = ["Team", "P", "W", "D", "L", "Pts"];

/// Standings rendered as a fixed-column table, leader first.
pub struct PointsTable<'a> {
    pub rows: &'a [StandingsRow],
}

impl PointsTable<'_> {
    fn cells(row: &StandingsRow) -> [String; 6] {
        [
            row.team.clone(),
            row.played.to_string(),
            row.wins.to_string(),
            row.draws.to_string(),
            row.losses.to_string(),
            row.pts.to_string(),
        ]
    }
}

impl Widget for PointsTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let header = Row::new(HEADINGS).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
        let rows = self.rows.iter().enumerate().map(|(i, row)| {
            let style = if i == 0 && row.pts > 0 {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };
            Row::new(Self::cells(row)).style(style)
        });

        let widths = [
            Constraint::Fill(1),
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(5),
        ];
        Widget::render(Table::new(rows, widths).header(header), area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect::<String>()
    }

    #[test]
    fn test_header_and_rows_render_in_order() {
        let rows = vec![
            StandingsRow { team: "B".into(), pts: 4, wins: 2, draws: 0, losses: 0, played: 2 },
            StandingsRow { team: "A".into(), pts: 0, wins: 0, draws: 0, losses: 2, played: 2 },
        ];
        let area = Rect::new(0, 0, 40, 4);
        let mut buf = Buffer::empty(area);
        PointsTable { rows: &rows }.render(area, &mut buf);

        let header = line(&buf, 0);
        assert!(header.starts_with("Team"));
        assert!(header.trim_end().ends_with("Pts"));
        assert!(line(&buf, 1).starts_with('B'));
        assert!(line(&buf, 1).trim_end().ends_with('4'));
        assert!(line(&buf, 2).starts_with('A'));
        assert_eq!(line(&buf, 3).trim(), "");
    }

    #[test]
    fn test_cells_follow_heading_order() {
        let row = StandingsRow { team: "Lions".into(), pts: 7, wins: 2, draws: 1, losses: 3, played: 6 };
        assert_eq!(PointsTable::cells(&row), ["Lions", "6", "2", "1", "3", "7"].map(String::from));
    }
}
