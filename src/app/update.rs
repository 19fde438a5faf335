//! Event loop: crossterm key handling plus completions from spawned API calls.
//!
//! The loop itself stays synchronous. Every network operation is spawned onto
//! the tokio runtime and reports back with exactly one [`ApiEvent`] over a
//! channel; the loop drains the channel between frames and applies each
//! completion to the owning controller. A completion for a tab the user has
//! navigated away from is applied all the same; nothing renders until the
//! user returns to that tab.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::sync::mpsc::{Receiver, Sender};
use std::time::{Duration, Instant};
use tokio::runtime::Handle;

use crate::api::{ApiClient, ApiError};
use crate::app::keymap::KeyAction;
use crate::app::{ActiveTab, AppState, InputMode, with_controller};
use crate::form::FormState;
use crate::model::{Author, BookCopy, Draft, Loan, Reader};
use crate::ui;

/// Completion of one spawned API call.
#[derive(Debug)]
pub enum ApiEvent {
    AuthorsLoaded(Result<Vec<Author>, ApiError>),
    AuthorSaved(Result<(), ApiError>),
    AuthorDeleted(Result<(), ApiError>),
    CopiesLoaded(Result<Vec<BookCopy>, ApiError>),
    CopySaved(Result<(), ApiError>),
    CopyDeleted(Result<(), ApiError>),
    LoansLoaded(Result<Vec<Loan>, ApiError>),
    LoanSaved(Result<(), ApiError>),
    LoanDeleted(Result<(), ApiError>),
    ReadersLoaded(Result<Vec<Reader>, ApiError>),
    ReaderSaved(Result<(), ApiError>),
    ReaderDeleted(Result<(), ApiError>),
}

/// Spawns API calls onto the runtime and routes their completions into the
/// event channel.
pub struct Dispatcher {
    rt: Handle,
    client: ApiClient,
    tx: Sender<ApiEvent>,
}

impl Dispatcher {
    pub fn new(rt: Handle, client: ApiClient, tx: Sender<ApiEvent>) -> Self {
        Self { rt, client, tx }
    }

    /// Fetch the full collection behind a tab.
    pub fn load(&self, tab: ActiveTab) {
        tracing::debug!(tab = tab.title(), "dispatch load");
        let client = self.client.clone();
        let tx = self.tx.clone();
        match tab {
            ActiveTab::Authors => {
                self.rt.spawn(async move {
                    let _ = tx.send(ApiEvent::AuthorsLoaded(client.list_authors().await));
                });
            }
            ActiveTab::Copies => {
                self.rt.spawn(async move {
                    let _ = tx.send(ApiEvent::CopiesLoaded(client.list_copies().await));
                });
            }
            ActiveTab::Loans => {
                self.rt.spawn(async move {
                    let _ = tx.send(ApiEvent::LoansLoaded(client.list_loans().await));
                });
            }
            ActiveTab::Readers => {
                self.rt.spawn(async move {
                    let _ = tx.send(ApiEvent::ReadersLoaded(client.list_readers().await));
                });
            }
        }
    }

    /// Create (`id` absent) or update (`id` present) from a validated draft.
    pub fn save(&self, draft: Draft, id: Option<i64>) {
        tracing::debug!(?id, "dispatch save");
        let client = self.client.clone();
        let tx = self.tx.clone();
        match draft {
            Draft::Author(d) => {
                self.rt.spawn(async move {
                    let res = match id {
                        Some(id) => client.update_author(id, &d).await.map(|_| ()),
                        None => client.create_author(&d).await.map(|_| ()),
                    };
                    let _ = tx.send(ApiEvent::AuthorSaved(res));
                });
            }
            Draft::Copy(d) => {
                self.rt.spawn(async move {
                    let res = match id {
                        Some(id) => client.update_copy(id, &d).await.map(|_| ()),
                        None => client.create_copy(&d).await.map(|_| ()),
                    };
                    let _ = tx.send(ApiEvent::CopySaved(res));
                });
            }
            Draft::Loan(d) => {
                self.rt.spawn(async move {
                    let res = match id {
                        Some(id) => client.update_loan(id, &d).await.map(|_| ()),
                        None => client.create_loan(&d).await.map(|_| ()),
                    };
                    let _ = tx.send(ApiEvent::LoanSaved(res));
                });
            }
            Draft::Reader(d) => {
                self.rt.spawn(async move {
                    let res = match id {
                        Some(id) => client.update_reader(id, &d).await.map(|_| ()),
                        None => client.create_reader(&d).await.map(|_| ()),
                    };
                    let _ = tx.send(ApiEvent::ReaderSaved(res));
                });
            }
        }
    }

    /// Delete a confirmed entity by id.
    pub fn delete(&self, tab: ActiveTab, id: i64) {
        tracing::debug!(tab = tab.title(), id, "dispatch delete");
        let client = self.client.clone();
        let tx = self.tx.clone();
        match tab {
            ActiveTab::Authors => {
                self.rt.spawn(async move {
                    let _ = tx.send(ApiEvent::AuthorDeleted(client.delete_author(id).await));
                });
            }
            ActiveTab::Copies => {
                self.rt.spawn(async move {
                    let _ = tx.send(ApiEvent::CopyDeleted(client.delete_copy(id).await));
                });
            }
            ActiveTab::Loans => {
                self.rt.spawn(async move {
                    let _ = tx.send(ApiEvent::LoanDeleted(client.delete_loan(id).await));
                });
            }
            ActiveTab::Readers => {
                self.rt.spawn(async move {
                    let _ = tx.send(ApiEvent::ReaderDeleted(client.delete_reader(id).await));
                });
            }
        }
    }
}

pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    client: ApiClient,
    rt: Handle,
    theme_path: &str,
    keybinds_path: &str,
) -> Result<()> {
    let (tx, rx): (Sender<ApiEvent>, Receiver<ApiEvent>) = std::sync::mpsc::channel();
    let dispatcher = Dispatcher::new(rt, client, tx);
    let mut app = AppState::with_config(theme_path, keybinds_path);

    // Fetch every collection up front; completions arrive over the channel.
    for tab in ActiveTab::ALL {
        request_load(&mut app, tab, &dispatcher);
    }

    loop {
        app.toasts.prune(Instant::now());

        terminal.draw(|f| {
            ui::render(f, &mut app);
        })?;

        while let Ok(completion) = rx.try_recv() {
            apply_api_event(&mut app, completion, &dispatcher);
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(&mut app, key, &dispatcher);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Start a collection fetch unless one is already in flight.
pub fn request_load(app: &mut AppState, tab: ActiveTab, dispatcher: &Dispatcher) {
    if with_controller!(app, tab, ctl => ctl.begin_load()) {
        dispatcher.load(tab);
    }
}

/// Apply one completion to its owning controller and trigger the follow-up
/// reload after a successful mutation.
pub fn apply_api_event(app: &mut AppState, completion: ApiEvent, dispatcher: &Dispatcher) {
    match completion {
        ApiEvent::AuthorsLoaded(res) => app.authors.finish_load(res, &mut app.toasts),
        ApiEvent::CopiesLoaded(res) => app.copies.finish_load(res, &mut app.toasts),
        ApiEvent::LoansLoaded(res) => app.loans.finish_load(res, &mut app.toasts),
        ApiEvent::ReadersLoaded(res) => app.readers.finish_load(res, &mut app.toasts),

        ApiEvent::AuthorSaved(res) => finish_save(app, ActiveTab::Authors, res, dispatcher),
        ApiEvent::CopySaved(res) => finish_save(app, ActiveTab::Copies, res, dispatcher),
        ApiEvent::LoanSaved(res) => finish_save(app, ActiveTab::Loans, res, dispatcher),
        ApiEvent::ReaderSaved(res) => finish_save(app, ActiveTab::Readers, res, dispatcher),

        ApiEvent::AuthorDeleted(res) => finish_delete(app, ActiveTab::Authors, res, dispatcher),
        ApiEvent::CopyDeleted(res) => finish_delete(app, ActiveTab::Copies, res, dispatcher),
        ApiEvent::LoanDeleted(res) => finish_delete(app, ActiveTab::Loans, res, dispatcher),
        ApiEvent::ReaderDeleted(res) => finish_delete(app, ActiveTab::Readers, res, dispatcher),
    }
}

fn finish_save(
    app: &mut AppState,
    tab: ActiveTab,
    res: Result<(), ApiError>,
    dispatcher: &Dispatcher,
) {
    let reload = with_controller!(app, tab, ctl => ctl.finish_submit(res, &mut app.toasts));
    if reload {
        if app.input_mode == InputMode::Form {
            app.form = None;
            app.input_mode = InputMode::Normal;
        }
        request_load(app, tab, dispatcher);
    }
}

fn finish_delete(
    app: &mut AppState,
    tab: ActiveTab,
    res: Result<(), ApiError>,
    dispatcher: &Dispatcher,
) {
    let reload = with_controller!(app, tab, ctl => ctl.finish_delete(res, &mut app.toasts));
    // The prompt closes on success and failure alike.
    if app.input_mode == InputMode::ConfirmDelete {
        app.input_mode = InputMode::Normal;
    }
    if reload {
        request_load(app, tab, dispatcher);
    }
}

pub fn handle_key(app: &mut AppState, key: KeyEvent, dispatcher: &Dispatcher) {
    match app.input_mode {
        InputMode::Normal => handle_normal_key(app, key, dispatcher),
        InputMode::Form => handle_form_key(app, key, dispatcher),
        InputMode::ConfirmDelete => handle_confirm_key(app, key, dispatcher),
        InputMode::Help => match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') => {
                app.input_mode = InputMode::Normal;
            }
            _ => {}
        },
    }
}

fn handle_normal_key(app: &mut AppState, key: KeyEvent, dispatcher: &Dispatcher) {
    let Some(action) = app.keymap.resolve(&key) else {
        return;
    };
    let step = app.rows_per_page.max(1);
    match action {
        KeyAction::Quit => app.should_quit = true,
        KeyAction::SwitchTab => {
            app.active_tab = app.active_tab.next();
            request_load(app, app.active_tab, dispatcher);
        }
        KeyAction::PrevTab => {
            app.active_tab = app.active_tab.prev();
            request_load(app, app.active_tab, dispatcher);
        }
        KeyAction::MoveUp => with_controller!(app, app.active_tab, ctl => ctl.cursor_up(1)),
        KeyAction::MoveDown => with_controller!(app, app.active_tab, ctl => ctl.cursor_down(1)),
        KeyAction::PageUp => with_controller!(app, app.active_tab, ctl => ctl.cursor_up(step)),
        KeyAction::PageDown => with_controller!(app, app.active_tab, ctl => ctl.cursor_down(step)),
        KeyAction::NewEntry => open_create_form(app),
        KeyAction::EditEntry => open_edit_form(app),
        KeyAction::DeleteEntry => {
            if with_controller!(app, app.active_tab, ctl => ctl.request_delete()) {
                app.confirm_choice = 1;
                app.input_mode = InputMode::ConfirmDelete;
            }
        }
        KeyAction::Refresh => request_load(app, app.active_tab, dispatcher),
        KeyAction::OpenHelp => app.input_mode = InputMode::Help,
        KeyAction::Ignore => {}
    }
}

fn open_create_form(app: &mut AppState) {
    match app.active_tab {
        ActiveTab::Authors => {
            app.authors.select_for_create();
            app.form = Some(FormState::author(None));
        }
        ActiveTab::Copies => {
            app.copies.select_for_create();
            app.form = Some(FormState::copy(None));
        }
        ActiveTab::Loans => {
            app.loans.select_for_create();
            app.form = Some(FormState::loan(None));
        }
        ActiveTab::Readers => {
            app.readers.select_for_create();
            app.form = Some(FormState::reader(None));
        }
    }
    app.input_mode = InputMode::Form;
}

fn open_edit_form(app: &mut AppState) {
    let form = match app.active_tab {
        ActiveTab::Authors => app.authors.select_for_edit().map(|a| FormState::author(Some(&a))),
        ActiveTab::Copies => app.copies.select_for_edit().map(|c| FormState::copy(Some(&c))),
        ActiveTab::Loans => app.loans.select_for_edit().map(|l| FormState::loan(Some(&l))),
        ActiveTab::Readers => app.readers.select_for_edit().map(|r| FormState::reader(Some(&r))),
    };
    if let Some(form) = form {
        app.form = Some(form);
        app.input_mode = InputMode::Form;
    }
}

fn handle_form_key(app: &mut AppState, key: KeyEvent, dispatcher: &Dispatcher) {
    if app.form.is_none() {
        app.input_mode = InputMode::Normal;
        return;
    }
    match key.code {
        KeyCode::Esc => {
            // Cancel is disabled while a save is in flight.
            if app.active_submitting() {
                return;
            }
            with_controller!(app, app.active_tab, ctl => ctl.close_form());
            app.form = None;
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            if app.active_submitting() {
                return;
            }
            submit_form(app, dispatcher);
        }
        KeyCode::Tab | KeyCode::Down => {
            if let Some(form) = app.form.as_mut() {
                form.focus_next();
            }
        }
        KeyCode::BackTab | KeyCode::Up => {
            if let Some(form) = app.form.as_mut() {
                form.focus_prev();
            }
        }
        KeyCode::Backspace => {
            if let Some(form) = app.form.as_mut() {
                form.backspace();
            }
        }
        KeyCode::Char(c) => {
            if let Some(form) = app.form.as_mut() {
                form.insert(c);
            }
        }
        _ => {}
    }
}

fn submit_form(app: &mut AppState, dispatcher: &Dispatcher) {
    let Some(form) = app.form.as_mut() else {
        return;
    };
    match form.validate() {
        Err(message) => form.error = Some(message),
        Ok(draft) => {
            let id = form.editing_id;
            if with_controller!(app, app.active_tab, ctl => ctl.begin_submit()) {
                dispatcher.save(draft, id);
            }
        }
    }
}

fn handle_confirm_key(app: &mut AppState, key: KeyEvent, dispatcher: &Dispatcher) {
    match key.code {
        KeyCode::Esc => {
            // The prompt blocks while the delete is in flight.
            if app.active_submitting() {
                return;
            }
            with_controller!(app, app.active_tab, ctl => ctl.cancel_delete());
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
            app.confirm_choice ^= 1;
        }
        KeyCode::Enter => {
            if app.active_submitting() {
                return;
            }
            if app.confirm_choice == 0 {
                let id = with_controller!(app, app.active_tab, ctl => ctl.begin_delete());
                if let Some(id) = id {
                    dispatcher.delete(app.active_tab, id);
                }
            } else {
                with_controller!(app, app.active_tab, ctl => ctl.cancel_delete());
                app.input_mode = InputMode::Normal;
            }
        }
        _ => {}
    }
}
