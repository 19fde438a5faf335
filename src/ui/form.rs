//! Entity form rendering: a centered card with one line per field.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::AppState;
use crate::form::FieldKind;
use crate::ui::components::centered_rect;

pub fn render_form(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(form) = app.form.as_ref() else {
        return;
    };

    let width = 64u16.min(area.width.saturating_sub(4)).max(40);
    let height = (form.fields.len() as u16 + 5).min(area.height);
    let rect = centered_rect(width, height, area);

    let mut lines: Vec<Line> = Vec::with_capacity(form.fields.len() + 2);
    for (idx, field) in form.fields.iter().enumerate() {
        let focused = idx == form.focus;
        let marker = if focused { "▶" } else { " " };
        let hint = match field.kind {
            FieldKind::Text => "",
            FieldKind::Int => " (number)",
            FieldKind::OptionalDate => " (YYYY-MM-DD, optional)",
        };
        let cursor = if focused { "_" } else { "" };
        let style = if focused {
            Style::default()
                .fg(app.theme.highlight_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };
        lines.push(Line::from(Span::styled(
            format!("{} {}{}: {}{}", marker, field.label, hint, field.value, cursor),
            style,
        )));
    }
    lines.push(Line::raw(""));
    if let Some(message) = &form.error {
        lines.push(Line::from(Span::styled(
            message.clone(),
            Style::default().fg(app.theme.err),
        )));
    } else if app.active_submitting() {
        lines.push(Line::from(Span::styled(
            "Saving…",
            Style::default().fg(app.theme.title),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Enter: save  Esc: cancel  Tab/↓: next field",
            Style::default().fg(app.theme.text),
        )));
    }

    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(form.title.clone())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
