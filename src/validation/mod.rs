//! Declarative field validation for the three Librarium entities.
//!
//! Each entity kind carries a fixed rule set; a rule is an ordered list of
//! [`Constraint`]s evaluated in declaration order, so the error list a caller
//! receives is reproducible. Rules trim text input before any check and hand
//! the sanitized value back so callers persist the cleaned form.

pub mod duplicate;
pub mod isbn;
pub mod phone;

use chrono::{NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

/// Which rule set applies to a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Book,
    Member,
    Borrowing,
}

impl EntityKind {
    /// Lowercase label used in user-facing messages
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Book => "book",
            EntityKind::Member => "member",
            EntityKind::Borrowing => "borrowing",
        }
    }

    /// The declared rules for this entity
    pub fn rules(self) -> &'static [FieldRule] {
        match self {
            EntityKind::Book => &BOOK_RULES,
            EntityKind::Member => &MEMBER_RULES,
            EntityKind::Borrowing => &BORROWING_RULES,
        }
    }

    /// Look up the rule for a single field, if the entity declares one
    pub fn rule(self, field: &str) -> Option<&'static FieldRule> {
        self.rules().iter().find(|rule| rule.field == field)
    }
}

/// Lower bound for date-valued fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    Today,
}

impl DateBound {
    fn min_date(self) -> NaiveDate {
        match self {
            DateBound::Today => Utc::now().date_naive(),
        }
    }
}

/// A single declarative constraint. Evaluation order is declaration order;
/// `Required` short-circuits on empty input before anything else runs.
#[derive(Debug)]
pub enum Constraint {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Pattern(&'static Regex, &'static str),
    MinDate(DateBound),
}

/// Declarative rules for one field of an entity
#[derive(Debug)]
pub struct FieldRule {
    pub field: &'static str,
    pub label: &'static str,
    /// Strip leading/trailing whitespace before every check
    pub trim: bool,
    /// Message reported when a required field is empty
    pub message: &'static str,
    pub constraints: Vec<Constraint>,
}

impl FieldRule {
    pub fn is_required(&self) -> bool {
        self.constraints
            .iter()
            .any(|c| matches!(c, Constraint::Required))
    }

    /// Date-valued fields are exempt from duplicate checking
    pub fn is_date(&self) -> bool {
        self.constraints
            .iter()
            .any(|c| matches!(c, Constraint::MinDate(_)))
    }
}

/// Outcome of validating one value against one rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
    /// The value after sanitization (trimmed when the rule asks for it)
    pub value: String,
}

/// Outcome of validating a whole record against an entity's rule set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordValidation {
    pub is_valid: bool,
    pub errors: BTreeMap<String, Vec<String>>,
    /// Sanitized copy of the record, returned regardless of validity
    pub sanitized: BTreeMap<String, String>,
}

static TITLE_CHARSET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\p{N} \-.,'&()]+$").expect("title charset regex"));

static NAME_CHARSET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L} \-.,'&()]+$").expect("name charset regex"));

// ISBN-10 (nine digits plus a digit or X check character) or ISBN-13,
// with optional hyphen/space group separators.
static ISBN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\d[\- ]?){9}[\dXx]$|^(?:\d[\- ]?){12}\d$").expect("isbn regex"));

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?\d{7,15}$").expect("phone regex"));

static BOOK_RULES: Lazy<Vec<FieldRule>> = Lazy::new(|| {
    vec![
        FieldRule {
            field: "title",
            label: "Title",
            trim: true,
            message: "Title is required",
            constraints: vec![
                Constraint::Required,
                Constraint::MinLength(3),
                Constraint::MaxLength(200),
                Constraint::Pattern(
                    &TITLE_CHARSET,
                    "Title may only contain letters, numbers, spaces and -.,'&()",
                ),
            ],
        },
        FieldRule {
            field: "author",
            label: "Author",
            trim: true,
            message: "Author is required",
            constraints: vec![
                Constraint::Required,
                Constraint::MinLength(2),
                Constraint::MaxLength(100),
                Constraint::Pattern(
                    &NAME_CHARSET,
                    "Author may only contain letters, spaces and -.,'&()",
                ),
            ],
        },
        FieldRule {
            field: "isbn",
            label: "ISBN",
            trim: true,
            message: "ISBN is required",
            constraints: vec![
                Constraint::Required,
                Constraint::Pattern(&ISBN_PATTERN, "Enter a valid ISBN-10 or ISBN-13"),
            ],
        },
    ]
});

static MEMBER_RULES: Lazy<Vec<FieldRule>> = Lazy::new(|| {
    vec![
        FieldRule {
            field: "name",
            label: "Name",
            trim: true,
            message: "Name is required",
            constraints: vec![
                Constraint::Required,
                Constraint::MinLength(2),
                Constraint::MaxLength(100),
                Constraint::Pattern(
                    &NAME_CHARSET,
                    "Name may only contain letters, spaces and -.,'&()",
                ),
            ],
        },
        FieldRule {
            field: "email",
            label: "Email",
            trim: true,
            message: "Email is required",
            constraints: vec![
                Constraint::Required,
                Constraint::Pattern(&EMAIL_PATTERN, "Enter a valid email address"),
            ],
        },
        FieldRule {
            field: "phone",
            label: "Phone",
            trim: true,
            message: "Phone is required",
            constraints: vec![Constraint::Pattern(
                &PHONE_PATTERN,
                "Enter a valid phone number",
            )],
        },
    ]
});

static BORROWING_RULES: Lazy<Vec<FieldRule>> = Lazy::new(|| {
    vec![
        FieldRule {
            field: "book_id",
            label: "Book",
            trim: true,
            message: "Select a book",
            constraints: vec![Constraint::Required],
        },
        FieldRule {
            field: "member_id",
            label: "Member",
            trim: true,
            message: "Select a member",
            constraints: vec![Constraint::Required],
        },
        FieldRule {
            field: "due_date",
            label: "Due date",
            trim: true,
            message: "Due date is required",
            constraints: vec![Constraint::Required, Constraint::MinDate(DateBound::Today)],
        },
    ]
});

/// Validate that a text value is non-empty after trimming, returning the
/// trimmed value. Server-side counterpart of the `Required` constraint.
pub fn required_text(value: &str, label: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{} is required and cannot be empty", label));
    }
    Ok(trimmed.to_string())
}

/// Validate one raw value against one rule.
///
/// Empty required fields short-circuit to a single error; empty optional
/// fields pass without running the remaining constraints. Non-empty values
/// accumulate every genuinely violated constraint, in declaration order.
pub fn validate_field(value: Option<&str>, rule: &FieldRule) -> FieldValidation {
    let raw = value.unwrap_or("");
    let value = if rule.trim { raw.trim() } else { raw };

    if value.is_empty() {
        let errors = if rule.is_required() {
            vec![rule.message.to_string()]
        } else {
            Vec::new()
        };
        return FieldValidation {
            is_valid: errors.is_empty(),
            errors,
            value: value.to_string(),
        };
    }

    let mut errors = Vec::new();
    for constraint in &rule.constraints {
        match constraint {
            Constraint::Required => {}
            Constraint::MinLength(min) => {
                if value.chars().count() < *min {
                    errors.push(format!(
                        "{} must be at least {} characters",
                        rule.label, min
                    ));
                }
            }
            Constraint::MaxLength(max) => {
                if value.chars().count() > *max {
                    errors.push(format!("{} must be at most {} characters", rule.label, max));
                }
            }
            Constraint::Pattern(pattern, message) => {
                if !pattern.is_match(value) {
                    errors.push((*message).to_string());
                }
            }
            Constraint::MinDate(bound) => match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
                Ok(date) => {
                    if date < bound.min_date() {
                        errors.push(format!("{} cannot be in the past", rule.label));
                    }
                }
                Err(_) => {
                    errors.push(format!("{} must be a valid date (YYYY-MM-DD)", rule.label));
                }
            },
        }
    }

    FieldValidation {
        is_valid: errors.is_empty(),
        errors,
        value: value.to_string(),
    }
}

/// Validate a whole record against an entity's rule set.
///
/// Every declared field is validated; fields the rule set does not declare
/// pass through into the sanitized copy unchanged.
pub fn validate_record(data: &BTreeMap<String, String>, kind: EntityKind) -> RecordValidation {
    let mut errors = BTreeMap::new();
    let mut sanitized = BTreeMap::new();

    for rule in kind.rules() {
        let result = validate_field(data.get(rule.field).map(String::as_str), rule);
        if !result.is_valid {
            errors.insert(rule.field.to_string(), result.errors);
        }
        if data.contains_key(rule.field) {
            sanitized.insert(rule.field.to_string(), result.value);
        }
    }

    for (field, value) in data {
        if kind.rule(field).is_none() {
            sanitized.insert(field.clone(), value.clone());
        }
    }

    RecordValidation {
        is_valid: errors.is_empty(),
        errors,
        sanitized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn valid_book_passes_every_rule() {
        let data = record(&[
            ("title", "Clean Code"),
            ("author", "Robert Martin"),
            ("isbn", "978-0132350884"),
        ]);
        let result = validate_record(&data, EntityKind::Book);
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
        assert_eq!(result.sanitized["title"], "Clean Code");
    }

    #[test]
    fn short_title_reports_min_length_only() {
        let rule = EntityKind::Book.rule("title").unwrap();
        let result = validate_field(Some("AB"), rule);
        assert!(!result.is_valid);
        assert_eq!(result.errors, vec!["Title must be at least 3 characters"]);
    }

    #[test]
    fn required_empty_short_circuits_to_single_error() {
        let rule = EntityKind::Book.rule("title").unwrap();
        for value in [None, Some(""), Some("   ")] {
            let result = validate_field(value, rule);
            assert_eq!(result.errors, vec!["Title is required"]);
        }
    }

    #[test]
    fn trimmed_value_is_validated_and_returned() {
        let rule = EntityKind::Book.rule("title").unwrap();
        // Three real characters padded to seven must pass as length three
        let result = validate_field(Some("  Ink  "), rule);
        assert!(result.is_valid);
        assert_eq!(result.value, "Ink");
    }

    #[test]
    fn multiple_violations_accumulate_in_declaration_order() {
        let rule = EntityKind::Book.rule("title").unwrap();
        let result = validate_field(Some("!!"), rule);
        assert_eq!(
            result.errors,
            vec![
                "Title must be at least 3 characters".to_string(),
                "Title may only contain letters, numbers, spaces and -.,'&()".to_string(),
            ]
        );
    }

    #[test]
    fn optional_empty_phone_is_valid() {
        let rule = EntityKind::Member.rule("phone").unwrap();
        let result = validate_field(Some(""), rule);
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn phone_pattern_accepts_international_and_local_forms() {
        let rule = EntityKind::Member.rule("phone").unwrap();
        assert!(validate_field(Some("+33123456789"), rule).is_valid);
        assert!(validate_field(Some("5551234567"), rule).is_valid);
        assert!(!validate_field(Some("call me"), rule).is_valid);
        assert!(!validate_field(Some("12345"), rule).is_valid);
    }

    #[test]
    fn email_requires_local_domain_tld_shape() {
        let rule = EntityKind::Member.rule("email").unwrap();
        assert!(validate_field(Some("jane@example.com"), rule).is_valid);
        assert!(!validate_field(Some("jane@example"), rule).is_valid);
        assert!(!validate_field(Some("jane example.com"), rule).is_valid);
    }

    #[test]
    fn isbn_pattern_accepts_both_lengths() {
        let rule = EntityKind::Book.rule("isbn").unwrap();
        assert!(validate_field(Some("978-0132350884"), rule).is_valid);
        assert!(validate_field(Some("0-306-40615-2"), rule).is_valid);
        assert!(validate_field(Some("043942089X"), rule).is_valid);
        assert!(!validate_field(Some("12345"), rule).is_valid);
        assert!(!validate_field(Some("not-an-isbn"), rule).is_valid);
    }

    #[test]
    fn due_date_before_today_fails() {
        let rule = EntityKind::Borrowing.rule("due_date").unwrap();
        let yesterday = (Utc::now().date_naive() - Duration::days(1)).to_string();
        let result = validate_field(Some(&yesterday), rule);
        assert_eq!(result.errors, vec!["Due date cannot be in the past"]);

        let today = Utc::now().date_naive().to_string();
        assert!(validate_field(Some(&today), rule).is_valid);
    }

    #[test]
    fn malformed_due_date_reports_date_format() {
        let rule = EntityKind::Borrowing.rule("due_date").unwrap();
        let result = validate_field(Some("soon"), rule);
        assert_eq!(
            result.errors,
            vec!["Due date must be a valid date (YYYY-MM-DD)"]
        );
    }

    #[test]
    fn required_text_trims_and_rejects_whitespace_only() {
        assert_eq!(required_text("  Dune ", "Title").unwrap(), "Dune");
        assert_eq!(
            required_text("   ", "Title").unwrap_err(),
            "Title is required and cannot be empty"
        );
    }

    #[test]
    fn undeclared_fields_pass_through_sanitized_output() {
        let mut data = record(&[
            ("title", "  Dune  "),
            ("author", "Frank Herbert"),
            ("isbn", "978-0441013593"),
        ]);
        data.insert("shelf".to_string(), "A3".to_string());
        let result = validate_record(&data, EntityKind::Book);
        assert!(result.is_valid);
        assert_eq!(result.sanitized["title"], "Dune");
        assert_eq!(result.sanitized["shelf"], "A3");
    }

    #[test]
    fn invalid_record_still_returns_sanitized_copy() {
        let data = record(&[("title", "  AB  "), ("author", ""), ("isbn", "x")]);
        let result = validate_record(&data, EntityKind::Book);
        assert!(!result.is_valid);
        assert_eq!(result.sanitized["title"], "AB");
        assert!(result.errors.contains_key("title"));
        assert!(result.errors.contains_key("author"));
        assert!(result.errors.contains_key("isbn"));
    }
}
