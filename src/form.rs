//! Form validation controller.
//!
//! Owns the draft data, error map and touched set for one entity form and
//! funnels every mutation through `change`/`blur`/`submit_validate`/`reset`.
//! Errors are cleared optimistically while the user types and re-established
//! only by the next validation pass, so they never flicker mid-keystroke.
//! `submit_validate` is the single gate before a create or update request.

use std::collections::{BTreeMap, BTreeSet};

use crate::validation::{
    duplicate::{is_duplicate, FieldSource},
    validate_field, validate_record, EntityKind, FieldRule,
};

/// Outcome of the pre-submit validation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitValidation {
    pub is_valid: bool,
    /// Sanitized record, returned regardless of validity
    pub data: BTreeMap<String, String>,
}

/// Per-form validation state machine
#[derive(Debug, Clone)]
pub struct FormController {
    kind: EntityKind,
    data: BTreeMap<String, String>,
    errors: BTreeMap<String, Vec<String>>,
    touched: BTreeSet<String>,
}

impl FormController {
    /// Create an empty form for the given entity
    pub fn new(kind: EntityKind) -> Self {
        Self::with_data(kind, BTreeMap::new())
    }

    /// Create a form pre-filled with existing values (edit scenarios)
    pub fn with_data(kind: EntityKind, data: BTreeMap<String, String>) -> Self {
        Self {
            kind,
            data,
            errors: BTreeMap::new(),
            touched: BTreeSet::new(),
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn data(&self) -> &BTreeMap<String, String> {
        &self.data
    }

    pub fn errors(&self) -> &BTreeMap<String, Vec<String>> {
        &self.errors
    }

    pub fn field_errors(&self, field: &str) -> Option<&[String]> {
        self.errors.get(field).map(Vec::as_slice)
    }

    /// A field is touched once it has been blurred at least once
    pub fn is_touched(&self, field: &str) -> bool {
        self.touched.contains(field)
    }

    /// Record a keystroke. Any standing error on the field is cleared
    /// optimistically; the next blur or submit re-validates.
    pub fn change(&mut self, field: &str, value: impl Into<String>) {
        self.data.insert(field.to_string(), value.into());
        self.errors.remove(field);
    }

    /// Handle the field losing focus: mark it touched, validate it, and for
    /// duplicate-sensitive fields merge an advisory duplicate hit.
    pub fn blur<R: FieldSource>(&mut self, field: &str, existing: &[R], exclude_id: Option<i32>) {
        self.touched.insert(field.to_string());

        let Some(rule) = self.kind.rule(field) else {
            return;
        };

        let result = validate_field(self.data.get(field).map(String::as_str), rule);
        let mut errors = result.errors;
        if !rule.is_date() && is_duplicate(&result.value, field, existing, exclude_id) {
            errors.push(duplicate_message(self.kind, rule));
        }

        if errors.is_empty() {
            self.errors.remove(field);
        } else {
            self.errors.insert(field.to_string(), errors);
        }
    }

    /// Validate the whole draft before submission. Every declared field is
    /// validated and every non-date field is duplicate-checked; the merged
    /// error map replaces the current one.
    pub fn submit_validate<R: FieldSource>(
        &mut self,
        existing: &[R],
        exclude_id: Option<i32>,
    ) -> SubmitValidation {
        let result = validate_record(&self.data, self.kind);
        let mut errors = result.errors;

        for rule in self.kind.rules() {
            if rule.is_date() {
                continue;
            }
            let value = result.sanitized.get(rule.field).map(String::as_str);
            if let Some(value) = value {
                if is_duplicate(value, rule.field, existing, exclude_id) {
                    errors
                        .entry(rule.field.to_string())
                        .or_default()
                        .push(duplicate_message(self.kind, rule));
                }
            }
        }

        let is_valid = errors.is_empty();
        self.errors = errors;

        SubmitValidation {
            is_valid,
            data: result.sanitized,
        }
    }

    /// Discard the draft, replacing it with `new_data` (empty by default).
    /// Used after a successful submit or an explicit cancel.
    pub fn reset(&mut self, new_data: Option<BTreeMap<String, String>>) {
        self.data = new_data.unwrap_or_default();
        self.errors.clear();
        self.touched.clear();
    }
}

fn duplicate_message(kind: EntityKind, rule: &FieldRule) -> String {
    format!(
        "A {} with this {} already exists",
        kind.label(),
        rule.label.to_lowercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Book;
    use chrono::Utc;

    fn existing_books() -> Vec<Book> {
        vec![Book {
            id: 1,
            title: "Clean Code".to_string(),
            author: "Robert Martin".to_string(),
            isbn: Some("9780132350884".to_string()),
            created_at: None,
            updated_at: None,
        }]
    }

    #[test]
    fn change_overwrites_draft_and_clears_error() {
        let mut form = FormController::new(EntityKind::Book);
        form.blur::<Book>("title", &[], None);
        assert!(form.field_errors("title").is_some());

        form.change("title", "D");
        assert!(form.field_errors("title").is_none());
        assert_eq!(form.data()["title"], "D");
    }

    #[test]
    fn blur_marks_touched_and_validates() {
        let mut form = FormController::new(EntityKind::Book);
        assert!(!form.is_touched("title"));

        form.change("title", "AB");
        form.blur::<Book>("title", &[], None);
        assert!(form.is_touched("title"));
        assert_eq!(
            form.field_errors("title").unwrap(),
            ["Title must be at least 3 characters"]
        );

        form.change("title", "A Br");
        form.blur::<Book>("title", &[], None);
        assert!(form.field_errors("title").is_none());
        assert!(form.is_touched("title"));
    }

    #[test]
    fn blur_merges_duplicate_hit() {
        let mut form = FormController::new(EntityKind::Book);
        form.change("title", "clean code");
        form.blur("title", &existing_books(), None);
        assert_eq!(
            form.field_errors("title").unwrap(),
            ["A book with this title already exists"]
        );

        // Editing the record itself is not a duplicate
        form.blur("title", &existing_books(), Some(1));
        assert!(form.field_errors("title").is_none());
    }

    #[test]
    fn submit_gates_on_validation_without_touching_network_state() {
        let mut form = FormController::new(EntityKind::Book);
        form.change("title", "AB");
        form.change("author", "Robert Martin");
        form.change("isbn", "978-0132350884");

        let outcome = form.submit_validate::<Book>(&[], None);
        assert!(!outcome.is_valid);
        assert_eq!(
            form.field_errors("title").unwrap(),
            ["Title must be at least 3 characters"]
        );
    }

    #[test]
    fn valid_submit_returns_sanitized_data() {
        let mut form = FormController::new(EntityKind::Book);
        form.change("title", "  Clean Code  ");
        form.change("author", "Robert Martin");
        form.change("isbn", "978-0132350884");

        let outcome = form.submit_validate::<Book>(&[], None);
        assert!(outcome.is_valid);
        assert_eq!(outcome.data["title"], "Clean Code");
        assert_eq!(outcome.data["isbn"], "978-0132350884");
    }

    #[test]
    fn submit_appends_duplicate_errors_for_non_date_fields() {
        let mut form = FormController::new(EntityKind::Book);
        form.change("title", "CLEAN CODE");
        form.change("author", "Somebody Else");
        form.change("isbn", "978-0441013593");

        let outcome = form.submit_validate(&existing_books(), None);
        assert!(!outcome.is_valid);
        assert_eq!(
            form.field_errors("title").unwrap(),
            ["A book with this title already exists"]
        );
        assert!(form.field_errors("author").is_none());
    }

    #[test]
    fn due_date_fields_skip_duplicate_checks() {
        let mut form = FormController::new(EntityKind::Borrowing);
        let today = Utc::now().date_naive().to_string();
        form.change("book_id", "1");
        form.change("member_id", "1");
        form.change("due_date", today);

        // A borrowing with the same due date is not a duplicate
        let existing = vec![crate::models::Borrowing {
            id: 7,
            book_id: 2,
            member_id: 2,
            borrow_date: Utc::now(),
            due_date: Utc::now().date_naive(),
            return_date: None,
        }];
        let outcome = form.submit_validate(&existing, None);
        assert!(outcome.is_valid, "errors: {:?}", form.errors());
    }

    #[test]
    fn past_due_date_fails_submit_regardless_of_other_fields() {
        let mut form = FormController::new(EntityKind::Borrowing);
        let yesterday = (Utc::now().date_naive() - chrono::Duration::days(1)).to_string();
        form.change("book_id", "1");
        form.change("member_id", "1");
        form.change("due_date", yesterday);

        let outcome = form.submit_validate::<Book>(&[], None);
        assert!(!outcome.is_valid);
        assert_eq!(
            form.field_errors("due_date").unwrap(),
            ["Due date cannot be in the past"]
        );
        assert!(form.field_errors("book_id").is_none());
        assert!(form.field_errors("member_id").is_none());
    }

    #[test]
    fn reset_clears_errors_and_touched() {
        let mut form = FormController::new(EntityKind::Book);
        form.change("title", "AB");
        form.blur::<Book>("title", &[], None);
        assert!(form.field_errors("title").is_some());
        assert!(form.is_touched("title"));

        form.reset(None);
        assert!(form.data().is_empty());
        assert!(form.errors().is_empty());
        assert!(!form.is_touched("title"));
    }
}
