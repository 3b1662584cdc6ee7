//! Russian phone numbers in the `+7 (XXX) XXX-XX-XX` shape.
//!
//! The same normalization backs the per-keystroke formatting in the contact
//! form and the server-side parsing of submitted numbers.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Number of digits in a complete number, including the country code.
pub const PHONE_DIGITS: usize = 11;

const COUNTRY_CODE: char = '7';
const TRUNK_PREFIX: char = '8';

/// Strips everything but ASCII digits, rewrites a leading trunk prefix `8` to
/// the country code, prepends the country code if the number starts with
/// anything else and truncates the result to [`PHONE_DIGITS`] digits.
///
/// Returns an empty string if the input contains no digits.
pub fn normalize_digits(input: &str) -> String {
    let mut digits = input
        .chars()
        .filter(char::is_ascii_digit)
        .collect::<String>();

    if digits.starts_with(TRUNK_PREFIX) {
        digits.replace_range(..1, "7");
    }
    if !digits.is_empty() && !digits.starts_with(COUNTRY_CODE) {
        digits.insert(0, COUNTRY_CODE);
    }
    digits.truncate(PHONE_DIGITS);

    digits
}

/// Formats (possibly incomplete) user input as `+7 (DDD) DDD-DD-DD`.
///
/// Only the parts of the template covered by the available digits are
/// rendered, so partial input yields a prefix of the full rendering.
///
/// #### Example
/// ```rust
/// # use nazaris_models::phone::format_phone;
/// assert_eq!(format_phone("8999"), "+7 (999) ");
/// assert_eq!(format_phone("89991234567"), "+7 (999) 123-45-67");
/// ```
pub fn format_phone(input: &str) -> String {
    render(&normalize_digits(input))
}

/// Counts the ASCII digits in `input` without normalizing it.
pub fn count_digits(input: &str) -> usize {
    input.chars().filter(char::is_ascii_digit).count()
}

fn render(digits: &str) -> String {
    let len = digits.len();
    let slice = |from: usize, to: usize| &digits[from..to.min(len)];

    let mut out = String::with_capacity(18);
    if len > 0 {
        out.push_str("+7");
    }
    if len > 1 {
        out.push_str(" (");
        out.push_str(slice(1, 4));
    }
    if len >= 4 {
        out.push_str(") ");
    }
    if len > 4 {
        out.push_str(slice(4, 7));
    }
    if len > 7 {
        out.push('-');
        out.push_str(slice(7, 9));
    }
    if len > 9 {
        out.push('-');
        out.push_str(slice(9, 11));
    }
    out
}

/// A complete phone number of exactly [`PHONE_DIGITS`] digits starting with
/// the country code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Phone number must contain {PHONE_DIGITS} digits, found {0}.")]
pub struct PhoneNumberError(pub usize);

impl PhoneNumber {
    pub fn parse(input: &str) -> Result<Self, PhoneNumberError> {
        let digits = normalize_digits(input);
        if digits.len() != PHONE_DIGITS {
            return Err(PhoneNumberError(digits.len()));
        }
        Ok(Self(digits))
    }

    /// The normalized digits, e.g. `79991234567`.
    pub fn digits(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(&self.0))
    }
}

impl FromStr for PhoneNumber {
    type Err = PhoneNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for PhoneNumber {
    type Error = PhoneNumberError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn format_incrementally() {
        for (input, expected) in [
            ("", ""),
            ("7", "+7"),
            ("79", "+7 (9"),
            ("799", "+7 (99"),
            ("7999", "+7 (999) "),
            ("79991", "+7 (999) 1"),
            ("7999123", "+7 (999) 123"),
            ("79991234", "+7 (999) 123-4"),
            ("7999123456", "+7 (999) 123-45-6"),
            ("79991234567", "+7 (999) 123-45-67"),
        ] {
            assert_eq!(format_phone(input), expected, "input: {input:?}");
        }
    }

    #[test]
    fn leading_eight_is_rewritten() {
        assert_eq!(format_phone("8"), "+7");
        assert_eq!(format_phone("8 (999) 123-45-67"), "+7 (999) 123-45-67");
    }

    #[test]
    fn other_leading_digit_gets_country_code() {
        assert_eq!(normalize_digits("9991234567"), "79991234567");
        assert_eq!(normalize_digits("0"), "70");
    }

    #[test]
    fn truncated_to_eleven_digits() {
        assert_eq!(normalize_digits("7999123456789"), "79991234567");
        assert_eq!(format_phone("+7 999 123 45 67 89"), "+7 (999) 123-45-67");
    }

    #[test]
    fn non_digits_are_stripped() {
        assert_eq!(normalize_digits("abc"), "");
        assert_eq!(format_phone("tel: +7-999"), "+7 (999) ");
    }

    #[test]
    fn any_digit_string_starts_with_country_code() {
        for first in '0'..='9' {
            for len in 1..=14 {
                let input = std::iter::once(first)
                    .chain(std::iter::repeat('5'))
                    .take(len)
                    .collect::<String>();
                let formatted = format_phone(&input);
                assert!(formatted.starts_with("+7"), "input: {input:?}");
                assert!(count_digits(&formatted) <= PHONE_DIGITS, "input: {input:?}");
            }
        }
    }

    #[test]
    fn reformatting_is_stable() {
        let formatted = format_phone("89991234567");
        assert_eq!(format_phone(&formatted), formatted);
    }

    #[test]
    fn parse_complete_number() {
        let phone = PhoneNumber::parse("89991234567").unwrap();
        assert_eq!(phone.digits(), "79991234567");
        assert_eq!(phone.to_string(), "+7 (999) 123-45-67");
    }

    #[test]
    fn parse_incomplete_number() {
        assert_eq!(PhoneNumber::parse("+7 (999) 123"), Err(PhoneNumberError(7)));
        assert_eq!(PhoneNumber::parse(""), Err(PhoneNumberError(0)));
    }
}
