// Unit tests for biblio-manager
// These tests work with the public API without modifying the main codebase

#[cfg(test)]
mod controller_tests {
    use biblio_manager::api::ApiError;
    use biblio_manager::controller::ResourceController;
    use biblio_manager::model::Author;
    use biblio_manager::notify::Notify;

    #[derive(Default)]
    struct RecNotify {
        successes: Vec<String>,
        errors: Vec<String>,
    }

    impl Notify for RecNotify {
        fn success(&mut self, message: &str) {
            self.successes.push(message.to_string());
        }
        fn error(&mut self, message: &str) {
            self.errors.push(message.to_string());
        }
    }

    fn author(id: i64, first: &str) -> Author {
        Author {
            id,
            first_name: first.to_string(),
            last_name: "Doe".to_string(),
            birth_date: None,
            nationality: "Unknown".to_string(),
        }
    }

    #[test]
    fn load_replaces_items_in_server_order() {
        let mut ctl = ResourceController::<Author>::new();
        let mut notify = RecNotify::default();
        assert!(ctl.begin_load());
        ctl.finish_load(
            Ok(vec![author(9, "c"), author(1, "a"), author(4, "b")]),
            &mut notify,
        );
        let ids: Vec<i64> = ctl.items().iter().map(|a| a.id).collect();
        // Whatever order the server returns is the order we keep.
        assert_eq!(ids, vec![9, 1, 4]);
    }

    #[test]
    fn submitting_covers_the_whole_mutation_on_both_paths() {
        let mut ctl = ResourceController::<Author>::new();
        let mut notify = RecNotify::default();

        ctl.select_for_create();
        assert!(ctl.begin_submit());
        assert!(ctl.submitting());
        ctl.finish_submit(Ok(()), &mut notify);
        assert!(!ctl.submitting());

        ctl.select_for_create();
        assert!(ctl.begin_submit());
        assert!(ctl.submitting());
        ctl.finish_submit(Err(ApiError::Status { status: 500 }), &mut notify);
        assert!(!ctl.submitting());
    }

    #[test]
    fn mutations_are_mutually_exclusive() {
        let mut ctl = ResourceController::<Author>::new();
        let mut notify = RecNotify::default();
        ctl.finish_load(Ok(vec![author(1, "a")]), &mut notify);

        ctl.select_for_create();
        assert!(ctl.begin_submit());
        // While the save is in flight neither a second save nor a delete may start.
        assert!(!ctl.begin_submit());
        assert!(!ctl.request_delete());
        assert!(ctl.begin_delete().is_none());
    }

    #[test]
    fn failed_load_surfaces_status_and_keeps_items() {
        let mut ctl = ResourceController::<Author>::new();
        let mut notify = RecNotify::default();
        ctl.begin_load();
        ctl.finish_load(Ok(vec![author(1, "a"), author(2, "b")]), &mut notify);

        ctl.begin_load();
        assert!(ctl.loading());
        ctl.finish_load(Err(ApiError::Status { status: 500 }), &mut notify);
        assert!(!ctl.loading());
        assert_eq!(ctl.items().len(), 2);
        assert!(notify.errors[0].contains("500"));
        assert!(notify.errors[0].contains("authors"));
    }

    #[test]
    fn unreachable_load_names_the_endpoint_not_a_status() {
        let mut ctl = ResourceController::<Author>::new();
        let mut notify = RecNotify::default();
        ctl.begin_load();
        ctl.finish_load(
            Err(ApiError::Unreachable {
                base_url: "http://books.local/api".to_string(),
            }),
            &mut notify,
        );
        assert!(notify.errors[0].contains("http://books.local/api"));
        assert!(!notify.errors[0].contains("status"));
    }

    #[test]
    fn delete_flow_closes_the_prompt_on_success_and_failure() {
        let mut ctl = ResourceController::<Author>::new();
        let mut notify = RecNotify::default();
        ctl.finish_load(Ok(vec![author(7, "a")]), &mut notify);

        assert!(ctl.request_delete());
        assert_eq!(ctl.begin_delete(), Some(7));
        assert!(ctl.finish_delete(Ok(()), &mut notify));
        assert_eq!(ctl.pending_delete(), None);
        assert_eq!(notify.successes.last().unwrap(), "Deleted author.");

        assert!(ctl.request_delete());
        assert_eq!(ctl.begin_delete(), Some(7));
        assert!(!ctl.finish_delete(Err(ApiError::Status { status: 404 }), &mut notify));
        assert_eq!(ctl.pending_delete(), None);
        assert!(notify.errors.last().unwrap().contains("404"));
    }
}

#[cfg(test)]
mod error_tests {
    use biblio_manager::api::ApiError;

    #[test]
    fn each_taxonomy_case_renders_its_own_message() {
        assert!(
            ApiError::Status { status: 503 }
                .to_string()
                .contains("503")
        );
        assert!(
            ApiError::Unreachable {
                base_url: "http://10.0.0.2:5034/api".to_string()
            }
            .to_string()
            .contains("http://10.0.0.2:5034/api")
        );
        assert!(
            ApiError::Request {
                message: "relative URL without a base".to_string()
            }
            .to_string()
            .contains("relative URL without a base")
        );
        assert!(
            ApiError::Unexpected {
                message: "boom".to_string()
            }
            .to_string()
            .contains("unexpected")
        );
    }
}

#[cfg(test)]
mod form_tests {
    use biblio_manager::form::FormState;
    use biblio_manager::model::{Draft, Loan};
    use chrono::NaiveDate;

    #[test]
    fn loan_form_prefills_and_validates_back_to_a_draft() {
        let loan = Loan {
            id: 3,
            reader_id: 10,
            librarian_id: 2,
            copy_id: 55,
            loan_date: NaiveDate::from_ymd_opt(2024, 5, 1),
            return_date: None,
        };
        let form = FormState::loan(Some(&loan));
        assert_eq!(form.editing_id, Some(3));
        assert_eq!(form.fields[0].value, "10");
        assert_eq!(form.fields[3].value, "2024-05-01");
        assert_eq!(form.fields[4].value, "");

        match form.validate().unwrap() {
            Draft::Loan(draft) => {
                assert_eq!(draft.reader_id, 10);
                assert_eq!(draft.loan_date, NaiveDate::from_ymd_opt(2024, 5, 1));
                assert_eq!(draft.return_date, None);
            }
            other => panic!("unexpected draft: {other:?}"),
        }
    }

    #[test]
    fn validation_error_names_the_offending_field() {
        let mut form = FormState::loan(None);
        form.fields[0].value = "not-a-number".to_string();
        form.fields[1].value = "2".to_string();
        form.fields[2].value = "3".to_string();
        let err = form.validate().unwrap_err();
        assert!(err.contains("Reader id"));
    }
}

#[cfg(test)]
mod config_tests {
    use biblio_manager::app::Theme;
    use biblio_manager::app::keymap::Keymap;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn tmp_path(tag: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        let n = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        p.push(format!("biblio_{tag}_{}_{}", std::process::id(), n));
        p
    }

    #[test]
    fn theme_roundtrips_through_its_config_file() {
        let path = tmp_path("theme");
        let theme = Theme::mocha();
        theme.write_file(path.to_str().unwrap()).unwrap();
        let loaded = Theme::from_file(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded.text, theme.text);
        assert_eq!(loaded.ok, theme.ok);
        assert_eq!(loaded.err, theme.err);
    }

    #[test]
    fn theme_load_or_init_creates_the_file() {
        let path = tmp_path("theme_init");
        let _ = Theme::load_or_init(path.to_str().unwrap());
        assert!(path.exists());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn keymap_load_or_init_creates_a_parsable_file() {
        let path = tmp_path("keys");
        let _ = Keymap::load_or_init(path.to_str().unwrap());
        assert!(path.exists());
        let reloaded = Keymap::from_file(path.to_str().unwrap());
        std::fs::remove_file(&path).ok();
        assert!(reloaded.is_some());
    }
}

#[cfg(test)]
mod app_state_tests {
    use biblio_manager::app::{ActiveTab, AppState, InputMode};
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn tmp_path(tag: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        let n = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        p.push(format!("biblio_{tag}_{}_{}", std::process::id(), n));
        p
    }

    fn fresh_app(tag: &str) -> (AppState, PathBuf, PathBuf) {
        let theme = tmp_path(&format!("{tag}_theme"));
        let keys = tmp_path(&format!("{tag}_keys"));
        let app = AppState::with_config(theme.to_str().unwrap(), keys.to_str().unwrap());
        (app, theme, keys)
    }

    #[test]
    fn fresh_state_starts_on_authors_in_normal_mode() {
        let (app, theme, keys) = fresh_app("defaults");
        assert_eq!(app.active_tab, ActiveTab::Authors);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.active_count(), 0);
        assert!(!app.active_loading());
        assert!(!app.active_submitting());
        assert!(app.form.is_none());
        std::fs::remove_file(theme).ok();
        std::fs::remove_file(keys).ok();
    }

    #[test]
    fn tab_cycle_visits_all_screens_and_wraps() {
        let mut tab = ActiveTab::Authors;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(tab.title());
            tab = tab.next();
        }
        assert_eq!(seen, vec!["Authors", "Copies", "Loans", "Readers"]);
        assert_eq!(tab, ActiveTab::Authors);
        assert_eq!(ActiveTab::Authors.prev(), ActiveTab::Readers);
    }
}
