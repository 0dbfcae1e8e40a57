//! Quoting helpers for assembling shell command strings.

/// Escape embedded double quotes so a value can sit inside a quoted argument.
pub fn escape(value: &str) -> String {
    value.replace('"', "\\\"")
}

/// Wrap a value in double quotes, escaping any embedded double quotes.
pub fn quote(value: &str) -> String {
    format!("\"{}\"", escape(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_plain() {
        assert_eq!(quote("28 Days Later"), "\"28 Days Later\"");
    }

    #[test]
    fn test_quote_embedded_quotes() {
        assert_eq!(quote("the \"real\" cut"), "\"the \\\"real\\\" cut\"");
    }

    #[test]
    fn test_escape_leaves_other_characters() {
        assert_eq!(escape("a'b$c"), "a'b$c");
        assert_eq!(escape("say \"hi\""), "say \\\"hi\\\"");
    }
}
