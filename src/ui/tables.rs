//! Entity tables: one paged, read-only table per tab, rows in server order.

use chrono::NaiveDate;
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use crate::app::AppState;

fn fmt_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

fn fmt_opt_id(value: Option<i64>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

fn table_title(base: &str, loading: bool) -> String {
    if loading {
        format!("{base} (refreshing…)")
    } else {
        base.to_string()
    }
}

fn render_placeholder(f: &mut Frame, area: Rect, app: &AppState, title: &str, message: &str) {
    let p = Paragraph::new(message.to_string())
        .style(Style::default().fg(app.theme.text))
        .block(
            Block::default()
                .title(title.to_string())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(p, area);
}

pub fn render_authors_table(f: &mut Frame, area: Rect, app: &mut AppState) {
    let body_height = area.height.saturating_sub(3) as usize;
    if body_height > 0 {
        app.rows_per_page = body_height;
    }

    if app.authors.loading() && app.authors.items().is_empty() {
        return render_placeholder(f, area, app, "Authors", "Loading authors…");
    }
    if app.authors.items().is_empty() {
        return render_placeholder(f, area, app, "Authors", "No authors registered.");
    }

    let cursor = app.authors.cursor();
    let start = (cursor / app.rows_per_page) * app.rows_per_page;
    let end = (start + app.rows_per_page).min(app.authors.items().len());
    let slice = &app.authors.items()[start..end];

    let rows = slice.iter().enumerate().map(|(i, a)| {
        let absolute_index = start + i;
        let style = if absolute_index == cursor {
            Style::default()
                .fg(app.theme.highlight_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };
        Row::new(vec![
            Cell::from(a.id.to_string()),
            Cell::from(a.first_name.clone()),
            Cell::from(a.last_name.clone()),
            Cell::from(fmt_date(a.birth_date)),
            Cell::from(a.nationality.clone()),
        ])
        .style(style)
    });

    let widths = [
        Constraint::Length(6),
        Constraint::Percentage(25),
        Constraint::Percentage(25),
        Constraint::Length(12),
        Constraint::Percentage(25),
    ];
    let header = Row::new(vec!["ID", "FIRST NAME", "LAST NAME", "BORN", "NATIONALITY"]).style(
        Style::default()
            .fg(app.theme.title)
            .add_modifier(Modifier::BOLD),
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(table_title("Authors", app.authors.loading()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .column_spacing(1);

    f.render_widget(table, area);
}

pub fn render_copies_table(f: &mut Frame, area: Rect, app: &mut AppState) {
    let body_height = area.height.saturating_sub(3) as usize;
    if body_height > 0 {
        app.rows_per_page = body_height;
    }

    if app.copies.loading() && app.copies.items().is_empty() {
        return render_placeholder(f, area, app, "Copies", "Loading copies…");
    }
    if app.copies.items().is_empty() {
        return render_placeholder(f, area, app, "Copies", "No copies registered.");
    }

    let cursor = app.copies.cursor();
    let start = (cursor / app.rows_per_page) * app.rows_per_page;
    let end = (start + app.rows_per_page).min(app.copies.items().len());
    let slice = &app.copies.items()[start..end];

    let rows = slice.iter().enumerate().map(|(i, c)| {
        let absolute_index = start + i;
        let style = if absolute_index == cursor {
            Style::default()
                .fg(app.theme.highlight_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };
        Row::new(vec![
            Cell::from(c.id.to_string()),
            Cell::from(fmt_opt_id(c.book_id)),
            Cell::from(c.location.clone()),
        ])
        .style(style)
    });

    let widths = [
        Constraint::Length(6),
        Constraint::Length(8),
        Constraint::Percentage(80),
    ];
    let header = Row::new(vec!["ID", "BOOK", "LOCATION"]).style(
        Style::default()
            .fg(app.theme.title)
            .add_modifier(Modifier::BOLD),
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(table_title("Copies", app.copies.loading()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .column_spacing(1);

    f.render_widget(table, area);
}

pub fn render_loans_table(f: &mut Frame, area: Rect, app: &mut AppState) {
    let body_height = area.height.saturating_sub(3) as usize;
    if body_height > 0 {
        app.rows_per_page = body_height;
    }

    if app.loans.loading() && app.loans.items().is_empty() {
        return render_placeholder(f, area, app, "Loans", "Loading loans…");
    }
    if app.loans.items().is_empty() {
        return render_placeholder(f, area, app, "Loans", "No loans registered.");
    }

    let cursor = app.loans.cursor();
    let start = (cursor / app.rows_per_page) * app.rows_per_page;
    let end = (start + app.rows_per_page).min(app.loans.items().len());
    let slice = &app.loans.items()[start..end];

    let rows = slice.iter().enumerate().map(|(i, l)| {
        let absolute_index = start + i;
        let style = if absolute_index == cursor {
            Style::default()
                .fg(app.theme.highlight_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };
        Row::new(vec![
            Cell::from(l.id.to_string()),
            Cell::from(l.reader_id.to_string()),
            Cell::from(l.librarian_id.to_string()),
            Cell::from(l.copy_id.to_string()),
            Cell::from(fmt_date(l.loan_date)),
            Cell::from(fmt_date(l.return_date)),
        ])
        .style(style)
    });

    let widths = [
        Constraint::Length(6),
        Constraint::Length(8),
        Constraint::Length(10),
        Constraint::Length(6),
        Constraint::Length(12),
        Constraint::Length(12),
    ];
    let header = Row::new(vec!["ID", "READER", "LIBRARIAN", "COPY", "LOANED", "RETURNED"]).style(
        Style::default()
            .fg(app.theme.title)
            .add_modifier(Modifier::BOLD),
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(table_title("Loans", app.loans.loading()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .column_spacing(1);

    f.render_widget(table, area);
}

pub fn render_readers_table(f: &mut Frame, area: Rect, app: &mut AppState) {
    let body_height = area.height.saturating_sub(3) as usize;
    if body_height > 0 {
        app.rows_per_page = body_height;
    }

    if app.readers.loading() && app.readers.items().is_empty() {
        return render_placeholder(f, area, app, "Readers", "Loading readers…");
    }
    if app.readers.items().is_empty() {
        return render_placeholder(f, area, app, "Readers", "No readers registered.");
    }

    let cursor = app.readers.cursor();
    let start = (cursor / app.rows_per_page) * app.rows_per_page;
    let end = (start + app.rows_per_page).min(app.readers.items().len());
    let slice = &app.readers.items()[start..end];

    let rows = slice.iter().enumerate().map(|(i, r)| {
        let absolute_index = start + i;
        let style = if absolute_index == cursor {
            Style::default()
                .fg(app.theme.highlight_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };
        Row::new(vec![
            Cell::from(r.id.to_string()),
            Cell::from(r.person_id.to_string()),
            Cell::from(fmt_date(r.registered_on)),
            Cell::from(r.occupation.clone()),
        ])
        .style(style)
    });

    let widths = [
        Constraint::Length(6),
        Constraint::Length(8),
        Constraint::Length(12),
        Constraint::Percentage(60),
    ];
    let header = Row::new(vec!["ID", "PERSON", "REGISTERED", "OCCUPATION"]).style(
        Style::default()
            .fg(app.theme.title)
            .add_modifier(Modifier::BOLD),
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(table_title("Readers", app.readers.loading()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .column_spacing(1);

    f.render_widget(table, area);
}
