//! Generic CRUD orchestration for one entity screen.
//!
//! Every screen runs the same state machine: load the collection, submit a
//! form draft (create or update), delete after confirmation, refresh after any
//! successful mutation. Network completions arrive over the event channel, so
//! each operation is split into a `begin_*` half (runs when the user triggers
//! the action) and a `finish_*` half (runs when the response comes back). Both
//! halves are synchronous and run on the UI thread.
//!
//! `submitting` is the mutual-exclusion flag between mutations: while it is
//! set, no second submit or delete can start. `loading` only guards against
//! spawning a duplicate fetch; refreshing is always allowed.

use crate::api::ApiError;
use crate::notify::Notify;

/// An entity the controller can manage: a stable server id plus the names used
/// in user-facing messages.
pub trait Resource: Clone + Send + 'static {
    /// Singular noun, lowercase ("author").
    const NAME: &'static str;
    /// Plural screen title ("Authors").
    const TITLE: &'static str;

    fn id(&self) -> i64;
}

pub struct ResourceController<R> {
    items: Vec<R>,
    loading: bool,
    submitting: bool,
    selected: Option<R>,
    pending_delete: Option<i64>,
    form_open: bool,
    cursor: usize,
}

impl<R: Resource> ResourceController<R> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            submitting: false,
            selected: None,
            pending_delete: None,
            form_open: false,
            cursor: 0,
        }
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn submitting(&self) -> bool {
        self.submitting
    }

    /// Entity being edited, if the form was opened from a row.
    pub fn selected(&self) -> Option<&R> {
        self.selected.as_ref()
    }

    /// Id awaiting confirmation in the delete prompt.
    pub fn pending_delete(&self) -> Option<i64> {
        self.pending_delete
    }

    pub fn form_open(&self) -> bool {
        self.form_open
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Row under the cursor.
    pub fn current_row(&self) -> Option<&R> {
        self.items.get(self.cursor)
    }

    pub fn cursor_up(&mut self, step: usize) {
        self.cursor = self.cursor.saturating_sub(step.max(1));
    }

    pub fn cursor_down(&mut self, step: usize) {
        let new = self.cursor.saturating_add(step.max(1));
        self.cursor = new.min(self.items.len().saturating_sub(1));
    }

    /// Mark a collection fetch as started. Returns `false` when one is already
    /// in flight, in which case the caller must not spawn another request.
    pub fn begin_load(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        true
    }

    /// Apply a finished collection fetch. On success the list is replaced
    /// wholesale in server order; on failure the previous list is kept and the
    /// classified error is surfaced.
    pub fn finish_load(&mut self, result: Result<Vec<R>, ApiError>, notify: &mut dyn Notify) {
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.cursor = self.cursor.min(self.items.len().saturating_sub(1));
                tracing::debug!(entity = R::NAME, count = self.items.len(), "loaded");
            }
            Err(err) => {
                notify.error(&format!(
                    "Failed to load {}: {}",
                    R::TITLE.to_lowercase(),
                    err
                ));
            }
        }
    }

    /// Open the form empty, for creation.
    pub fn select_for_create(&mut self) {
        self.selected = None;
        self.form_open = true;
    }

    /// Open the form pre-filled from the row under the cursor. Returns the
    /// entity to prefill from, or `None` when the list is empty.
    pub fn select_for_edit(&mut self) -> Option<R> {
        let row = self.items.get(self.cursor)?.clone();
        self.selected = Some(row.clone());
        self.form_open = true;
        Some(row)
    }

    pub fn close_form(&mut self) {
        self.selected = None;
        self.form_open = false;
    }

    /// Mark a create/update as started. Refused while another mutation is in
    /// flight; `submitting` is the mutual-exclusion flag.
    pub fn begin_submit(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        self.submitting = true;
        true
    }

    /// Apply a finished create/update. On success the form closes and the
    /// caller must reload (`true` is returned); on failure the form stays open
    /// with the draft intact.
    pub fn finish_submit(&mut self, result: Result<(), ApiError>, notify: &mut dyn Notify) -> bool {
        self.submitting = false;
        match result {
            Ok(()) => {
                let verb = if self.selected.is_some() {
                    "Updated"
                } else {
                    "Created"
                };
                notify.success(&format!("{} {}.", verb, R::NAME));
                self.selected = None;
                self.form_open = false;
                true
            }
            Err(err) => {
                notify.error(&format!("Failed to save the {}: {}", R::NAME, err));
                false
            }
        }
    }

    /// Open the confirmation prompt for the row under the cursor. Refused
    /// while a mutation is in flight or when the list is empty.
    pub fn request_delete(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        match self.items.get(self.cursor) {
            Some(row) => {
                self.pending_delete = Some(row.id());
                true
            }
            None => false,
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Mark the confirmed delete as started and return the target id. The
    /// prompt stays open until the response arrives.
    pub fn begin_delete(&mut self) -> Option<i64> {
        if self.submitting {
            return None;
        }
        let id = self.pending_delete?;
        self.submitting = true;
        Some(id)
    }

    /// Apply a finished delete. The confirmation prompt closes on both paths;
    /// on success the caller must reload (`true` is returned).
    pub fn finish_delete(&mut self, result: Result<(), ApiError>, notify: &mut dyn Notify) -> bool {
        self.submitting = false;
        self.pending_delete = None;
        match result {
            Ok(()) => {
                notify.success(&format!("Deleted {}.", R::NAME));
                true
            }
            Err(err) => {
                notify.error(&format!("Failed to delete the {}: {}", R::NAME, err));
                false
            }
        }
    }
}

impl<R: Resource> Default for ResourceController<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Widget {
        id: i64,
    }

    impl Resource for Widget {
        const NAME: &'static str = "widget";
        const TITLE: &'static str = "Widgets";
        fn id(&self) -> i64 {
            self.id
        }
    }

    #[derive(Default)]
    struct Recorder {
        successes: Vec<String>,
        errors: Vec<String>,
    }

    impl Notify for Recorder {
        fn success(&mut self, message: &str) {
            self.successes.push(message.to_string());
        }
        fn error(&mut self, message: &str) {
            self.errors.push(message.to_string());
        }
    }

    fn widgets(ids: &[i64]) -> Vec<Widget> {
        ids.iter().map(|&id| Widget { id }).collect()
    }

    #[test]
    fn load_replaces_items_in_server_order() {
        let mut ctl = ResourceController::<Widget>::new();
        let mut notify = Recorder::default();
        assert!(ctl.begin_load());
        assert!(ctl.loading());
        ctl.finish_load(Ok(widgets(&[3, 1, 2])), &mut notify);
        assert!(!ctl.loading());
        assert_eq!(ctl.items(), widgets(&[3, 1, 2]).as_slice());
        assert!(notify.errors.is_empty());
    }

    #[test]
    fn failed_load_keeps_previous_items_and_surfaces_status() {
        let mut ctl = ResourceController::<Widget>::new();
        let mut notify = Recorder::default();
        ctl.begin_load();
        ctl.finish_load(Ok(widgets(&[1, 2])), &mut notify);

        ctl.begin_load();
        ctl.finish_load(Err(ApiError::Status { status: 500 }), &mut notify);
        assert!(!ctl.loading());
        assert_eq!(ctl.items(), widgets(&[1, 2]).as_slice());
        assert_eq!(notify.errors.len(), 1);
        assert!(notify.errors[0].contains("500"));
    }

    #[test]
    fn duplicate_load_is_not_spawned() {
        let mut ctl = ResourceController::<Widget>::new();
        assert!(ctl.begin_load());
        assert!(!ctl.begin_load());
    }

    #[test]
    fn unreachable_load_names_the_base_url() {
        let mut ctl = ResourceController::<Widget>::new();
        let mut notify = Recorder::default();
        ctl.begin_load();
        ctl.finish_load(
            Err(ApiError::Unreachable {
                base_url: "http://intranet:5034/api".into(),
            }),
            &mut notify,
        );
        assert!(notify.errors[0].contains("http://intranet:5034/api"));
    }

    #[test]
    fn submit_lifecycle_success_closes_form_and_requests_reload() {
        let mut ctl = ResourceController::<Widget>::new();
        let mut notify = Recorder::default();
        ctl.select_for_create();
        assert!(ctl.form_open());
        assert!(ctl.begin_submit());
        assert!(ctl.submitting());
        // Second mutation is refused while one is in flight.
        assert!(!ctl.begin_submit());
        assert!(ctl.begin_delete().is_none());

        let reload = ctl.finish_submit(Ok(()), &mut notify);
        assert!(reload);
        assert!(!ctl.submitting());
        assert!(!ctl.form_open());
        assert_eq!(notify.successes, vec!["Created widget.".to_string()]);
    }

    #[test]
    fn submit_failure_leaves_form_open() {
        let mut ctl = ResourceController::<Widget>::new();
        let mut notify = Recorder::default();
        ctl.select_for_create();
        ctl.begin_submit();
        let reload = ctl.finish_submit(Err(ApiError::Status { status: 400 }), &mut notify);
        assert!(!reload);
        assert!(!ctl.submitting());
        assert!(ctl.form_open());
        assert!(notify.errors[0].contains("400"));
    }

    #[test]
    fn editing_reports_updated() {
        let mut ctl = ResourceController::<Widget>::new();
        let mut notify = Recorder::default();
        ctl.finish_load(Ok(widgets(&[9])), &mut notify);
        assert_eq!(ctl.select_for_edit().map(|w| w.id), Some(9));
        ctl.begin_submit();
        ctl.finish_submit(Ok(()), &mut notify);
        assert_eq!(notify.successes, vec!["Updated widget.".to_string()]);
        assert!(ctl.selected().is_none());
    }

    #[test]
    fn delete_lifecycle_closes_prompt_on_both_paths() {
        let mut ctl = ResourceController::<Widget>::new();
        let mut notify = Recorder::default();
        ctl.finish_load(Ok(widgets(&[5, 6])), &mut notify);

        assert!(ctl.request_delete());
        assert_eq!(ctl.pending_delete(), Some(5));
        assert_eq!(ctl.begin_delete(), Some(5));
        assert!(ctl.submitting());
        let reload = ctl.finish_delete(Ok(()), &mut notify);
        assert!(reload);
        assert!(!ctl.submitting());
        assert_eq!(ctl.pending_delete(), None);

        assert!(ctl.request_delete());
        ctl.begin_delete();
        let reload = ctl.finish_delete(Err(ApiError::Status { status: 409 }), &mut notify);
        assert!(!reload);
        assert_eq!(ctl.pending_delete(), None);
        assert!(notify.errors[0].contains("409"));
    }

    #[test]
    fn cancel_delete_clears_the_pending_id() {
        let mut ctl = ResourceController::<Widget>::new();
        let mut notify = Recorder::default();
        ctl.finish_load(Ok(widgets(&[5])), &mut notify);
        ctl.request_delete();
        ctl.cancel_delete();
        assert_eq!(ctl.pending_delete(), None);
        assert!(ctl.begin_delete().is_none());
    }

    #[test]
    fn cursor_stays_within_bounds() {
        let mut ctl = ResourceController::<Widget>::new();
        let mut notify = Recorder::default();
        ctl.finish_load(Ok(widgets(&[1, 2, 3])), &mut notify);
        ctl.cursor_down(1);
        ctl.cursor_down(10);
        assert_eq!(ctl.cursor(), 2);
        ctl.cursor_up(1);
        assert_eq!(ctl.cursor(), 1);
        // A shrinking reload clamps the cursor.
        ctl.finish_load(Ok(widgets(&[1])), &mut notify);
        assert_eq!(ctl.cursor(), 0);
    }
}
