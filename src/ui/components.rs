//! Shared UI components (status bar, toasts, modal helpers).
//!
//! Contains small building blocks reused by every entity screen.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::{AppState, InputMode};
use crate::notify::{Toast, ToastKind};

/// Render the bottom status bar with mode, counts and in-flight markers.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Form => "FORM",
        InputMode::ConfirmDelete => "CONFIRM",
        InputMode::Help => "HELP",
    };
    let busy = if app.active_submitting() {
        "  [saving]"
    } else if app.active_loading() {
        "  [loading]"
    } else {
        ""
    };
    let msg = format!(
        "mode: {mode}  {}:{}  rows/page:{}{}",
        app.active_tab.title().to_lowercase(),
        app.active_count(),
        app.rows_per_page,
        busy
    );
    let p = Paragraph::new(msg).style(
        Style::default()
            .fg(app.theme.status_fg)
            .bg(app.theme.status_bg),
    );
    f.render_widget(p, area);
}

/// Render the newest toasts bottom-right, above the status bar.
pub fn render_toasts(f: &mut Frame, area: Rect, app: &AppState) {
    if app.toasts.is_empty() || area.height < 5 {
        return;
    }
    let toasts: Vec<&Toast> = app.toasts.visible().collect();
    let show = &toasts[toasts.len().saturating_sub(3)..];
    for (i, toast) in show.iter().enumerate() {
        let rows_from_bottom = (show.len() - i) as u16 + 1;
        if rows_from_bottom >= area.height {
            continue;
        }
        let width = (toast.message.chars().count() as u16 + 2).min(area.width.saturating_sub(2));
        let rect = Rect {
            x: area.x + area.width.saturating_sub(width + 1),
            y: area.y + area.height - rows_from_bottom,
            width,
            height: 1,
        };
        let color = match toast.kind {
            ToastKind::Success => app.theme.ok,
            ToastKind::Error => app.theme.err,
        };
        let p = Paragraph::new(format!(" {}", toast.message)).style(
            Style::default()
                .fg(color)
                .bg(app.theme.status_bg)
                .add_modifier(Modifier::BOLD),
        );
        f.render_widget(Clear, rect);
        f.render_widget(p, rect);
    }
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render the delete confirmation prompt for the active tab.
pub fn render_confirm_modal(f: &mut Frame, area: Rect, app: &AppState) {
    let rect = centered_rect(50, 7, area);
    let noun = app.active_tab.noun();
    let mut body = match app.active_pending_delete() {
        Some(id) => format!("Delete {noun} #{id}?\n\n"),
        None => format!("Delete this {noun}?\n\n"),
    };
    if app.active_submitting() {
        body.push_str("Deleting…");
    } else {
        let delete = if app.confirm_choice == 0 {
            "[Delete]"
        } else {
            " Delete "
        };
        let keep = if app.confirm_choice == 1 {
            "[Keep]"
        } else {
            " Keep "
        };
        body.push_str(&format!(
            "  {}    {}\n\nThis action cannot be undone.",
            delete, keep
        ));
    }
    let p = Paragraph::new(body).wrap(Wrap { trim: false }).block(
        Block::default()
            .title("Confirm delete")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

/// Render the help modal with key usage for every mode.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState) {
    let width = 70u16.min(area.width.saturating_sub(4)).max(50);
    let height = 18u16.min(area.height.saturating_sub(2)).max(12);
    let rect = centered_rect(width, height, area);

    let italic = Style::default().add_modifier(Modifier::ITALIC);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled("List screen", bold)),
        Line::from(vec![
            Span::raw("Navigate: "),
            Span::styled("Arrow keys / j k, PageUp/PageDown / h l", italic),
        ]),
        Line::from(vec![
            Span::raw("Switch tab: "),
            Span::styled("Tab / Shift+Tab", italic),
        ]),
        Line::from(vec![Span::raw("New entry: "), Span::styled("n", italic)]),
        Line::from(vec![
            Span::raw("Edit selected: "),
            Span::styled("e / Enter", italic),
        ]),
        Line::from(vec![
            Span::raw("Delete selected: "),
            Span::styled("d / Delete", italic),
        ]),
        Line::from(vec![Span::raw("Refresh: "), Span::styled("r", italic)]),
        Line::from(vec![Span::raw("Quit: "), Span::styled("q", italic)]),
        Line::raw(""),
        Line::from(Span::styled("Form", bold)),
        Line::from(vec![
            Span::raw("Next/previous field: "),
            Span::styled("Tab / Shift+Tab", italic),
        ]),
        Line::from(vec![
            Span::raw("Save: "),
            Span::styled("Enter", italic),
            Span::raw("   Cancel: "),
            Span::styled("Esc", italic),
        ]),
        Line::raw(""),
        Line::from(vec![
            Span::raw("Close help: "),
            Span::styled("Esc / Enter", italic),
        ]),
    ];
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::raw(
        "Keybindings for the list screen can be changed in keybinds.conf.",
    )));

    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title("Help")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
