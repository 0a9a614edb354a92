//! The quote entity and its creation payload.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A persisted quote row. The id is assigned by the database at insert.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Quote {
    pub id: i32,
    pub author: String,
    pub quote: String,
}

/// Payload for creating a quote.
///
/// Missing fields deserialize to empty strings so that absence surfaces as a
/// per-field length error instead of an opaque deserialization failure. Call
/// [`CreateQuote::trimmed`] before validating; the length rules apply to the
/// trimmed values and the trimmed values are what gets persisted.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuote {
    #[serde(default)]
    #[validate(length(min = 5, max = 255, message = "must be between 5 and 255 characters"))]
    pub author: String,

    #[serde(default)]
    #[validate(length(min = 5, max = 255, message = "must be between 5 and 255 characters"))]
    pub quote: String,
}

impl CreateQuote {
    /// Strip surrounding whitespace from both fields.
    pub fn trimmed(self) -> Self {
        Self {
            author: self.author.trim().to_string(),
            quote: self.quote.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_serialization() {
        let quote = Quote {
            id: 7,
            author: "Mark Twain".to_string(),
            quote: "Good.".to_string(),
        };
        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["author"], "Mark Twain");
        assert_eq!(json["quote"], "Good.");
    }

    #[test]
    fn trimmed_strips_surrounding_whitespace() {
        let payload = CreateQuote {
            author: "  Mark Twain  ".to_string(),
            quote: "\tGood.\n".to_string(),
        }
        .trimmed();
        assert_eq!(payload.author, "Mark Twain");
        assert_eq!(payload.quote, "Good.");
    }

    #[test]
    fn five_character_fields_are_valid() {
        let payload = CreateQuote {
            author: "Twain".to_string(),
            quote: "Good.".to_string(),
        };
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn short_fields_are_rejected() {
        let payload = CreateQuote {
            author: "Al".to_string(),
            quote: "Hi".to_string(),
        };
        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("author"));
        assert!(fields.contains_key("quote"));
    }

    #[test]
    fn whitespace_only_field_fails_after_trim() {
        let payload = CreateQuote {
            author: "     ".to_string(),
            quote: "A decent quote".to_string(),
        }
        .trimmed();
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("author"));
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let payload: CreateQuote = serde_json::from_str("{}").unwrap();
        assert!(payload.author.is_empty());
        assert!(payload.quote.is_empty());
        assert!(payload.validate().is_err());
    }

    #[test]
    fn over_length_field_is_rejected() {
        let payload = CreateQuote {
            author: "Mark Twain".to_string(),
            quote: "x".repeat(256),
        };
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("quote"));
    }
}
