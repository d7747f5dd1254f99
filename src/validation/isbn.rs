//! ISBN normalization and check-digit verification.
//!
//! The client-side rule set only checks the shape of an ISBN; the server
//! services run this full verification before a book is stored.

/// Validate an ISBN-10 or ISBN-13 and return it with separators stripped.
pub fn validate(isbn: &str) -> Result<String, String> {
    let cleaned: Vec<char> = isbn
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();

    match cleaned.len() {
        10 => {
            let body_is_digits = cleaned[..9].iter().all(char::is_ascii_digit);
            let check_ok = matches!(cleaned[9], '0'..='9' | 'X' | 'x');
            if !body_is_digits || !check_ok {
                return Err(
                    "ISBN-10 must contain only digits and optionally end with 'X'".to_string(),
                );
            }
            if !isbn10_check_digit_valid(&cleaned) {
                return Err("Invalid ISBN-10 check digit".to_string());
            }
            Ok(cleaned.iter().collect::<String>().to_uppercase())
        }
        13 => {
            if !cleaned.iter().all(char::is_ascii_digit) {
                return Err("ISBN-13 must contain only digits".to_string());
            }
            if !isbn13_check_digit_valid(&cleaned) {
                return Err("Invalid ISBN-13 check digit".to_string());
            }
            Ok(cleaned.into_iter().collect())
        }
        _ => Err("ISBN must be 10 or 13 digits long".to_string()),
    }
}

fn isbn10_check_digit_valid(digits: &[char]) -> bool {
    let check_digit = match digits[9] {
        'X' | 'x' => 10,
        c => match c.to_digit(10) {
            Some(d) => d,
            None => return false,
        },
    };

    let mut total = 0u32;
    for (i, c) in digits[..9].iter().enumerate() {
        let digit = match c.to_digit(10) {
            Some(d) => d,
            None => return false,
        };
        total += digit * (10 - i as u32);
    }

    (total + check_digit) % 11 == 0
}

fn isbn13_check_digit_valid(digits: &[char]) -> bool {
    let digits: Vec<u32> = digits.iter().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != 13 {
        return false;
    }

    let total: u32 = digits[..12]
        .iter()
        .enumerate()
        .map(|(i, d)| if i % 2 == 0 { *d } else { d * 3 })
        .sum();

    digits[12] == (10 - (total % 10)) % 10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_isbn13_is_normalized() {
        assert_eq!(validate("978-0132350884").unwrap(), "9780132350884");
        assert_eq!(validate("978 0 441 01359 3").unwrap(), "9780441013593");
    }

    #[test]
    fn valid_isbn10_is_normalized() {
        assert_eq!(validate("0-306-40615-2").unwrap(), "0306406152");
        assert_eq!(validate("043942089x").unwrap(), "043942089X");
    }

    #[test]
    fn wrong_isbn13_check_digit_is_rejected() {
        let err = validate("978-0132350885").unwrap_err();
        assert_eq!(err, "Invalid ISBN-13 check digit");
    }

    #[test]
    fn wrong_isbn10_check_digit_is_rejected() {
        let err = validate("0306406153").unwrap_err();
        assert_eq!(err, "Invalid ISBN-10 check digit");
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert_eq!(
            validate("123456789").unwrap_err(),
            "ISBN must be 10 or 13 digits long"
        );
    }

    #[test]
    fn non_digit_isbn13_is_rejected() {
        assert_eq!(
            validate("97801323508X4").unwrap_err(),
            "ISBN-13 must contain only digits"
        );
    }

    #[test]
    fn non_digit_isbn10_body_is_rejected() {
        assert_eq!(
            validate("03064X6152").unwrap_err(),
            "ISBN-10 must contain only digits and optionally end with 'X'"
        );
    }
}
