//! Modal entity form: a list of text buffers plus the validation that turns
//! them into a typed draft payload.
//!
//! Every field edits as plain text; `validate` applies the per-entity rules
//! when the user submits. A failed validation keeps the form open with a
//! message and nothing reaches the network.

use chrono::NaiveDate;

use crate::model::{
    Author, AuthorDraft, BookCopy, CopyDraft, Draft, Loan, LoanDraft, Reader, ReaderDraft,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Required free text.
    Text,
    /// Required whole number (a foreign-key id).
    Int,
    /// Optional `YYYY-MM-DD` date; empty means absent.
    OptionalDate,
}

#[derive(Clone, Debug)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
    pub kind: FieldKind,
}

impl FormField {
    fn new(label: &'static str, kind: FieldKind, value: String) -> Self {
        Self { label, value, kind }
    }
}

/// Which entity the form edits; decides the validation applied on submit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormKind {
    Author,
    Copy,
    Loan,
    Reader,
}

/// State of the open entity form.
#[derive(Clone, Debug)]
pub struct FormState {
    pub kind: FormKind,
    pub title: String,
    pub fields: Vec<FormField>,
    pub focus: usize,
    pub error: Option<String>,
    /// Server id when editing; `None` when creating.
    pub editing_id: Option<i64>,
}

fn fmt_opt_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

fn fmt_opt_int(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl FormState {
    fn new(kind: FormKind, title: String, editing_id: Option<i64>, fields: Vec<FormField>) -> Self {
        Self {
            kind,
            title,
            fields,
            focus: 0,
            error: None,
            editing_id,
        }
    }

    pub fn author(existing: Option<&Author>) -> Self {
        let title = match existing {
            Some(a) => format!("Edit author #{}", a.id),
            None => "New author".to_string(),
        };
        Self::new(
            FormKind::Author,
            title,
            existing.map(|a| a.id),
            vec![
                FormField::new(
                    "First name",
                    FieldKind::Text,
                    existing.map(|a| a.first_name.clone()).unwrap_or_default(),
                ),
                FormField::new(
                    "Last name",
                    FieldKind::Text,
                    existing.map(|a| a.last_name.clone()).unwrap_or_default(),
                ),
                FormField::new(
                    "Birth date",
                    FieldKind::OptionalDate,
                    fmt_opt_date(existing.and_then(|a| a.birth_date)),
                ),
                FormField::new(
                    "Nationality",
                    FieldKind::Text,
                    existing.map(|a| a.nationality.clone()).unwrap_or_default(),
                ),
            ],
        )
    }

    pub fn copy(existing: Option<&BookCopy>) -> Self {
        let title = match existing {
            Some(c) => format!("Edit copy #{}", c.id),
            None => "New copy".to_string(),
        };
        Self::new(
            FormKind::Copy,
            title,
            existing.map(|c| c.id),
            vec![
                FormField::new(
                    "Book id",
                    FieldKind::Int,
                    fmt_opt_int(existing.and_then(|c| c.book_id)),
                ),
                FormField::new(
                    "Location",
                    FieldKind::Text,
                    existing.map(|c| c.location.clone()).unwrap_or_default(),
                ),
            ],
        )
    }

    pub fn loan(existing: Option<&Loan>) -> Self {
        let title = match existing {
            Some(l) => format!("Edit loan #{}", l.id),
            None => "New loan".to_string(),
        };
        Self::new(
            FormKind::Loan,
            title,
            existing.map(|l| l.id),
            vec![
                FormField::new(
                    "Reader id",
                    FieldKind::Int,
                    existing.map(|l| l.reader_id.to_string()).unwrap_or_default(),
                ),
                FormField::new(
                    "Librarian id",
                    FieldKind::Int,
                    existing
                        .map(|l| l.librarian_id.to_string())
                        .unwrap_or_default(),
                ),
                FormField::new(
                    "Copy id",
                    FieldKind::Int,
                    existing.map(|l| l.copy_id.to_string()).unwrap_or_default(),
                ),
                FormField::new(
                    "Loan date",
                    FieldKind::OptionalDate,
                    fmt_opt_date(existing.and_then(|l| l.loan_date)),
                ),
                FormField::new(
                    "Return date",
                    FieldKind::OptionalDate,
                    fmt_opt_date(existing.and_then(|l| l.return_date)),
                ),
            ],
        )
    }

    pub fn reader(existing: Option<&Reader>) -> Self {
        let title = match existing {
            Some(r) => format!("Edit reader #{}", r.id),
            None => "New reader".to_string(),
        };
        Self::new(
            FormKind::Reader,
            title,
            existing.map(|r| r.id),
            vec![
                FormField::new(
                    "Person id",
                    FieldKind::Int,
                    existing.map(|r| r.person_id.to_string()).unwrap_or_default(),
                ),
                FormField::new(
                    "Registered on",
                    FieldKind::OptionalDate,
                    fmt_opt_date(existing.and_then(|r| r.registered_on)),
                ),
                FormField::new(
                    "Occupation",
                    FieldKind::Text,
                    existing.map(|r| r.occupation.clone()).unwrap_or_default(),
                ),
            ],
        )
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.checked_sub(1).unwrap_or(self.fields.len() - 1);
    }

    pub fn insert(&mut self, c: char) {
        self.error = None;
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.error = None;
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.pop();
        }
    }

    fn req_text(&self, idx: usize) -> Result<String, String> {
        let field = &self.fields[idx];
        let value = field.value.trim();
        if value.is_empty() {
            Err(format!("{} is required.", field.label))
        } else {
            Ok(value.to_string())
        }
    }

    fn req_int(&self, idx: usize) -> Result<i64, String> {
        let field = &self.fields[idx];
        field
            .value
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("{} must be a whole number.", field.label))
    }

    fn opt_date(&self, idx: usize) -> Result<Option<NaiveDate>, String> {
        let field = &self.fields[idx];
        let value = field.value.trim();
        if value.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(value, DATE_FORMAT)
            .map(Some)
            .map_err(|_| format!("{} must be a YYYY-MM-DD date.", field.label))
    }

    /// Apply the per-entity rules and produce the payload, or the message to
    /// display in the form.
    pub fn validate(&self) -> Result<Draft, String> {
        match self.kind {
            FormKind::Author => Ok(Draft::Author(AuthorDraft {
                first_name: self.req_text(0)?,
                last_name: self.req_text(1)?,
                birth_date: self.opt_date(2)?,
                nationality: self.req_text(3)?,
            })),
            FormKind::Copy => Ok(Draft::Copy(CopyDraft {
                book_id: self.req_int(0)?,
                location: self.req_text(1)?,
            })),
            FormKind::Loan => Ok(Draft::Loan(LoanDraft {
                reader_id: self.req_int(0)?,
                librarian_id: self.req_int(1)?,
                copy_id: self.req_int(2)?,
                loan_date: self.opt_date(3)?,
                return_date: self.opt_date(4)?,
            })),
            FormKind::Reader => Ok(Draft::Reader(ReaderDraft {
                person_id: self.req_int(0)?,
                registered_on: self.opt_date(1)?,
                occupation: self.req_text(2)?,
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(form: &mut FormState, idx: usize, value: &str) {
        form.fields[idx].value = value.to_string();
    }

    #[test]
    fn author_form_validates_into_draft() {
        let mut form = FormState::author(None);
        set(&mut form, 0, "Jorge");
        set(&mut form, 1, "Borges");
        set(&mut form, 2, "1899-08-24");
        set(&mut form, 3, "Argentina");
        match form.validate().unwrap() {
            Draft::Author(draft) => {
                assert_eq!(draft.first_name, "Jorge");
                assert_eq!(
                    draft.birth_date,
                    NaiveDate::from_ymd_opt(1899, 8, 24)
                );
            }
            other => panic!("unexpected draft: {other:?}"),
        }
    }

    #[test]
    fn empty_required_text_is_rejected_with_the_label() {
        let mut form = FormState::author(None);
        set(&mut form, 1, "Borges");
        set(&mut form, 3, "Argentina");
        let err = form.validate().unwrap_err();
        assert!(err.contains("First name"));
    }

    #[test]
    fn malformed_date_is_rejected() {
        let mut form = FormState::loan(None);
        set(&mut form, 0, "1");
        set(&mut form, 1, "2");
        set(&mut form, 2, "3");
        set(&mut form, 3, "24/05/2024");
        let err = form.validate().unwrap_err();
        assert!(err.contains("Loan date"));
    }

    #[test]
    fn blank_optional_date_is_absent() {
        let mut form = FormState::reader(None);
        set(&mut form, 0, "12");
        set(&mut form, 2, "Student");
        match form.validate().unwrap() {
            Draft::Reader(draft) => assert_eq!(draft.registered_on, None),
            other => panic!("unexpected draft: {other:?}"),
        }
    }

    #[test]
    fn non_numeric_id_is_rejected() {
        let mut form = FormState::copy(None);
        set(&mut form, 0, "abc");
        set(&mut form, 1, "Shelf A-3");
        let err = form.validate().unwrap_err();
        assert!(err.contains("Book id"));
    }

    #[test]
    fn edit_form_prefills_from_the_entity() {
        let copy = BookCopy {
            id: 4,
            book_id: Some(101),
            location: "Shelf A-3, row 2".to_string(),
        };
        let form = FormState::copy(Some(&copy));
        assert_eq!(form.editing_id, Some(4));
        assert_eq!(form.fields[0].value, "101");
        assert_eq!(form.fields[1].value, "Shelf A-3, row 2");
        assert_eq!(form.title, "Edit copy #4");
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut form = FormState::copy(None);
        form.focus_prev();
        assert_eq!(form.focus, 1);
        form.focus_next();
        assert_eq!(form.focus, 0);
    }
}
