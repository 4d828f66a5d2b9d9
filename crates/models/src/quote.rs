//! Formatting helpers for user-facing messages.

use std::fmt::Display;

/// Wrap a single string in double quotes.
pub fn quote_str(s: impl AsRef<str>) -> String {
    format!("\"{}\"", s.as_ref())
}

/// Stringify, sort and single-quote every item, joined with commas.
///
/// ```
/// use arm5_models::quote::quote;
/// assert_eq!(quote(["rego", "creo"]), "'creo', 'rego'");
/// assert_eq!(quote([3]), "'3'");
/// ```
pub fn quote<I>(items: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    let mut items: Vec<String> = items.into_iter().map(|item| item.to_string()).collect();
    items.sort();
    items.iter().map(|s| format!("'{s}'")).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_quote_str() {
        assert_eq!(quote_str("vim"), "\"vim\"");
        assert_eq!(quote_str(""), "\"\"");
    }

    #[rstest]
    #[case(vec![], "")]
    #[case(vec!["b", "a"], "'a', 'b'")]
    #[case(vec!["muto", "creo", "perdo"], "'creo', 'muto', 'perdo'")]
    fn test_quote(#[case] items: Vec<&str>, #[case] expected: &str) {
        assert_eq!(quote(items), expected);
    }
}
