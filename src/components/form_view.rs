use crate::state::form::InputForm;
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Style};
use tui::text::{Line, Span};
use tui::widgets::Widget;

/// One line per field: `Label: value`, with a cursor on the focused field
/// while it is being edited.
pub struct FormView<'a> {
    pub form: &'a InputForm,
    pub editing: bool,
}

impl Widget for FormView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label_width = self
            .form
            .fields
            .iter()
            .map(|f| f.label.chars().count())
            .max()
            .unwrap_or(0);

        for (i, field) in self.form.fields.iter().enumerate() {
            let y = area.y + i as u16;
            if y >= area.bottom() {
                break;
            }
            let focused = self.editing && i == self.form.focus;
            let value_style = if focused {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };
            let cursor = if focused { "_" } else { "" };
            let line = Line::from(vec![
                Span::styled(
                    format!("{:>label_width$}: ", field.label),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(format!("{}{cursor}", field.value), value_style),
            ]);
            buf.set_line(area.x, y, &line, area.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_align_and_cursor_marks_focus() {
        let mut form = InputForm::new(&["Place", "Reward"]);
        form.set_value(0, "1st");
        form.focus = 1;

        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        FormView { form: &form, editing: true }.render(area, &mut buf);

        let row = |y: u16| (0..30).map(|x| buf[(x, y)].symbol().to_string()).collect::<String>();
        assert_eq!(row(0).trim_end(), " Place: 1st");
        assert_eq!(row(1).trim_end(), "Reward: _");
    }
}
