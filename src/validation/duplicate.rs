//! Advisory duplicate detection over caller-held collections.
//!
//! The scan is case-insensitive and can exclude one record by id so that
//! editing a record does not flag the record itself. It only sees whatever
//! list the caller last fetched; the server's uniqueness constraints remain
//! authoritative.

use crate::models::{Book, Borrowing, Member};

/// Field access for duplicate scanning
pub trait FieldSource {
    fn record_id(&self) -> Option<i32>;
    fn field_value(&self, field: &str) -> Option<String>;
}

/// True when some record other than `exclude_id` carries `value` under
/// `field`, compared case-insensitively. Empty values never match.
pub fn is_duplicate<R: FieldSource>(
    value: &str,
    field: &str,
    existing: &[R],
    exclude_id: Option<i32>,
) -> bool {
    if value.is_empty() {
        return false;
    }

    let needle = value.to_lowercase();
    existing.iter().any(|record| {
        if exclude_id.is_some() && record.record_id() == exclude_id {
            return false;
        }
        record
            .field_value(field)
            .is_some_and(|v| v.to_lowercase() == needle)
    })
}

impl FieldSource for Book {
    fn record_id(&self) -> Option<i32> {
        Some(self.id)
    }

    fn field_value(&self, field: &str) -> Option<String> {
        match field {
            "title" => Some(self.title.clone()),
            "author" => Some(self.author.clone()),
            "isbn" => self.isbn.clone(),
            _ => None,
        }
    }
}

impl FieldSource for Member {
    fn record_id(&self) -> Option<i32> {
        Some(self.id)
    }

    fn field_value(&self, field: &str) -> Option<String> {
        match field {
            "name" => Some(self.name.clone()),
            "email" => Some(self.email.clone()),
            "phone" => self.phone.clone(),
            _ => None,
        }
    }
}

impl FieldSource for Borrowing {
    fn record_id(&self) -> Option<i32> {
        Some(self.id)
    }

    fn field_value(&self, field: &str) -> Option<String> {
        match field {
            "book_id" => Some(self.book_id.to_string()),
            "member_id" => Some(self.member_id.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        id: i32,
        email: &'static str,
    }

    impl FieldSource for Row {
        fn record_id(&self) -> Option<i32> {
            Some(self.id)
        }

        fn field_value(&self, field: &str) -> Option<String> {
            (field == "email").then(|| self.email.to_string())
        }
    }

    #[test]
    fn comparison_is_case_insensitive() {
        let rows = [Row { id: 1, email: "a@b.com" }];
        assert!(is_duplicate("A@B.com", "email", &rows, None));
    }

    #[test]
    fn excluded_record_does_not_match() {
        let rows = [Row { id: 1, email: "a@b.com" }];
        assert!(!is_duplicate("A@B.com", "email", &rows, Some(1)));
        assert!(is_duplicate("A@B.com", "email", &rows, Some(2)));
    }

    #[test]
    fn empty_value_never_matches() {
        let rows = [Row { id: 1, email: "" }];
        assert!(!is_duplicate("", "email", &rows, None));
    }

    #[test]
    fn unknown_field_never_matches() {
        let rows = [Row { id: 1, email: "a@b.com" }];
        assert!(!is_duplicate("a@b.com", "name", &rows, None));
    }
}
