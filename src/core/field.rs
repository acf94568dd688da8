//! Field value types and format validation

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// A polymorphic field value used by the generic filter machinery
///
/// `Null` is a real value here: a filter comparing against `Null` is an
/// IS-NULL test, not an ignored filter.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Boolean(bool),
    DateTime(DateTime<Utc>),
    Null,
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the value as a boolean if possible
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::DateTime(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => FieldValue::Null,
        }
    }
}

/// Field format validators for input validation
#[derive(Debug, Clone, Copy)]
pub enum FieldFormat {
    Email,
    Url,
}

impl FieldFormat {
    /// Validate a string against this format
    pub fn validate(&self, value: &str) -> bool {
        match self {
            FieldFormat::Email => Self::is_valid_email(value),
            FieldFormat::Url => Self::is_valid_url(value),
        }
    }

    fn is_valid_email(email: &str) -> bool {
        static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = EMAIL_REGEX.get_or_init(|| {
            Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
        });
        regex.is_match(email)
    }

    fn is_valid_url(url: &str) -> bool {
        static URL_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = URL_REGEX.get_or_init(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").unwrap());
        regex.is_match(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_string() {
        let value = FieldValue::String("test".to_string());
        assert_eq!(value.as_str(), Some("test"));
        assert_eq!(value.as_integer(), None);
        assert!(!value.is_null());
    }

    #[test]
    fn test_field_value_integer() {
        let value = FieldValue::Integer(42);
        assert_eq!(value.as_integer(), Some(42));
        assert_eq!(value.as_str(), None);
    }

    #[test]
    fn test_field_value_from_option() {
        let present: FieldValue = Some(7i64).into();
        assert_eq!(present, FieldValue::Integer(7));

        let absent: FieldValue = Option::<i64>::None.into();
        assert!(absent.is_null());
    }

    #[test]
    fn test_email_format() {
        assert!(FieldFormat::Email.validate("alice@example.com"));
        assert!(FieldFormat::Email.validate("a.b+tag@sub.domain.org"));
        assert!(!FieldFormat::Email.validate("not-an-email"));
        assert!(!FieldFormat::Email.validate("missing@tld"));
        assert!(!FieldFormat::Email.validate(""));
    }

    #[test]
    fn test_url_format() {
        assert!(FieldFormat::Url.validate("https://example.com"));
        assert!(FieldFormat::Url.validate("http://blog.example.com/about"));
        assert!(!FieldFormat::Url.validate("ftp://example.com"));
        assert!(!FieldFormat::Url.validate("example.com"));
    }
}
