pub mod components;
pub mod form;
pub mod tables;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{ActiveTab, AppState, InputMode};

pub fn render(f: &mut Frame, app: &mut AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(1)].as_ref())
        .split(f.area());

    render_header(f, root[0], app);

    // The form replaces the list; at most one of the two is visible.
    if app.input_mode == InputMode::Form && app.form.is_some() {
        form::render_form(f, root[1], app);
    } else {
        match app.active_tab {
            ActiveTab::Authors => tables::render_authors_table(f, root[1], app),
            ActiveTab::Copies => tables::render_copies_table(f, root[1], app),
            ActiveTab::Loans => tables::render_loans_table(f, root[1], app),
            ActiveTab::Readers => tables::render_readers_table(f, root[1], app),
        }
    }

    components::render_status_bar(f, root[2], app);
    components::render_toasts(f, root[1], app);

    match app.input_mode {
        InputMode::ConfirmDelete => components::render_confirm_modal(f, f.area(), app),
        InputMode::Help => components::render_help_modal(f, f.area(), app),
        _ => {}
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &AppState) {
    let tabs = ActiveTab::ALL
        .iter()
        .map(|t| {
            if *t == app.active_tab {
                format!("[{}]", t.title())
            } else {
                t.title().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    let p = Paragraph::new(format!(
        "{tabs}  authors:{} copies:{} loans:{} readers:{}  — Tab: switch tab; n: new; e: edit; d: delete; r: refresh; ?: help; q: quit",
        app.authors.items().len(),
        app.copies.items().len(),
        app.loans.items().len(),
        app.readers.items().len(),
    ))
    .block(
        Block::default()
            .title("biblio-manager")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    )
    .style(
        Style::default()
            .fg(app.theme.header_fg)
            .bg(app.theme.header_bg),
    );
    f.render_widget(p, area);
}
