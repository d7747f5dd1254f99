//! Phone number normalization.
//!
//! Accepts international (`+`-prefixed) and local forms, strips separators,
//! and enforces digit-count bounds.

/// Validate a phone number and return it with separators stripped.
pub fn validate(phone: &str) -> Result<String, String> {
    let cleaned: String = phone
        .chars()
        .enumerate()
        .filter(|(i, c)| c.is_ascii_digit() || (*i == 0 && *c == '+'))
        .map(|(_, c)| c)
        .collect();

    if let Some(digits) = cleaned.strip_prefix('+') {
        if !(8..=16).contains(&digits.len()) {
            return Err(
                "International phone number must be 8-16 digits (including country code)"
                    .to_string(),
            );
        }
    } else if !(7..=15).contains(&cleaned.len()) {
        return Err("Phone number must be 7-15 digits".to_string());
    }

    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators_are_stripped() {
        assert_eq!(validate("+1-555-123-4567").unwrap(), "+15551234567");
        assert_eq!(validate("(555) 123 4567").unwrap(), "5551234567");
    }

    #[test]
    fn short_local_number_is_rejected() {
        assert_eq!(
            validate("12345").unwrap_err(),
            "Phone number must be 7-15 digits"
        );
    }

    #[test]
    fn short_international_number_is_rejected() {
        assert_eq!(
            validate("+1234").unwrap_err(),
            "International phone number must be 8-16 digits (including country code)"
        );
    }
}
