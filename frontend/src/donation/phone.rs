use thiserror::Error;

use super::digits::to_latin_digits;

pub const PHONE_LENGTH: usize = 11;
pub const PHONE_PREFIX: &str = "09";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    #[error("phone number is empty")]
    Empty,
    #[error("phone number must start with 09")]
    BadPrefix,
    #[error("phone number must be 11 digits, got {0}")]
    BadLength(usize),
    #[error("phone number contains non-digit characters")]
    NotNumeric,
}

/// A mobile number in national format (`09` followed by nine digits),
/// stored with Latin digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Trims the input, maps Persian/Arabic-Indic digits to Latin and checks
    /// the result against `^09\d{9}$`.
    pub fn parse(raw: &str) -> Result<Self, PhoneError> {
        let normalized = to_latin_digits(raw.trim());
        if normalized.is_empty() {
            return Err(PhoneError::Empty);
        }
        if !normalized.chars().all(|c| c.is_ascii_digit()) {
            return Err(PhoneError::NotNumeric);
        }
        if !normalized.starts_with(PHONE_PREFIX) {
            return Err(PhoneError::BadPrefix);
        }
        if normalized.len() != PHONE_LENGTH {
            return Err(PhoneError::BadLength(normalized.len()));
        }
        Ok(Self(normalized))
    }

    #[cfg(test)]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_national_mobile_format() {
        let phone = PhoneNumber::parse("09123456789").unwrap();
        assert_eq!(phone.as_str(), "09123456789");
    }

    #[test]
    fn accepts_persian_digits_and_surrounding_space() {
        let phone = PhoneNumber::parse("  ۰۹۱۲۳۴۵۶۷۸۹ ").unwrap();
        assert_eq!(phone.as_str(), "09123456789");
    }

    #[test]
    fn rejects_ten_digits() {
        assert_eq!(PhoneNumber::parse("0912345678"), Err(PhoneError::BadLength(10)));
    }

    #[test]
    fn rejects_missing_leading_zero() {
        assert_eq!(PhoneNumber::parse("9123456789"), Err(PhoneError::BadPrefix));
    }

    #[test]
    fn rejects_twelve_digits() {
        assert_eq!(PhoneNumber::parse("091234567890"), Err(PhoneError::BadLength(12)));
    }

    #[test]
    fn rejects_separators_and_letters() {
        assert_eq!(PhoneNumber::parse("0912-345-678"), Err(PhoneError::NotNumeric));
        assert_eq!(PhoneNumber::parse("+989123456789"), Err(PhoneError::NotNumeric));
        assert_eq!(PhoneNumber::parse(""), Err(PhoneError::Empty));
        assert_eq!(PhoneNumber::parse("   "), Err(PhoneError::Empty));
    }
}
