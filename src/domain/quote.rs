use serde::{Deserialize, Serialize};

/// Shown whenever a quote cannot be fetched or is incomplete.
pub const FALLBACK_QUOTE: &str = "Stay positive and keep coding!";

/// Response body of the quote API. Both fields are optional on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub quote: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

impl Quote {
    pub fn new(quote: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            quote: Some(quote.into()),
            author: Some(author.into()),
        }
    }

    /// `"{quote} – {author}"` when both parts are present, the fallback otherwise.
    pub fn display_text(&self) -> String {
        match (non_empty(&self.quote), non_empty(&self.author)) {
            (Some(quote), Some(author)) => format!("{quote} – {author}"),
            _ => FALLBACK_QUOTE.to_string(),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_display_text_with_both_fields() {
        let quote = Quote::new("Talk is cheap. Show me the code.", "Linus Torvalds");
        assert_eq!(
            quote.display_text(),
            "Talk is cheap. Show me the code. – Linus Torvalds"
        );
    }

    #[test]
    fn test_display_text_missing_author() {
        let quote = Quote {
            quote: Some("Anonymous wisdom".to_string()),
            author: None,
        };
        assert_eq!(quote.display_text(), FALLBACK_QUOTE);
    }

    #[test]
    fn test_display_text_empty_quote() {
        let quote = Quote::new("", "Nobody");
        assert_eq!(quote.display_text(), FALLBACK_QUOTE);
    }

    #[test]
    fn test_deserialize_ignores_extra_fields() -> Result<(), serde_json::Error> {
        let quote: Quote = serde_json::from_str(r#"{"id":7,"quote":"q","author":"a"}"#)?;
        assert_eq!(quote, Quote::new("q", "a"));

        let empty: Quote = serde_json::from_str("{}")?;
        assert_eq!(empty, Quote::default());
        Ok(())
    }
}
