//! [`FuzzPattern`] definition.

use derive_more::Display;
use postgres_types::{FromSql, ToSql};

/// `ILIKE` pattern matching any text containing the given input.
#[derive(Clone, Debug, Display, Eq, FromSql, PartialEq, ToSql)]
#[postgres(transparent)]
pub struct FuzzPattern(String);

impl FuzzPattern {
    /// Creates a new [`FuzzPattern`] out of the given `input`, escaping the
    /// `ILIKE` wildcards in it.
    #[must_use]
    pub fn new(input: &str) -> Self {
        let escaped = input
            .trim()
            .replace('\\', r"\\")
            .replace('%', r"\%")
            .replace('_', r"\_");
        Self(format!("%{escaped}%"))
    }
}

#[cfg(test)]
mod spec {
    use super::FuzzPattern;

    #[test]
    fn escapes_wildcards() {
        for (input, expected) in [
            ("otabek", "%otabek%"),
            ("  Otabek Davronovich ", "%Otabek Davronovich%"),
            ("100%", r"%100\%%"),
            ("a_b", r"%a\_b%"),
            (r"a\b", r"%a\\b%"),
        ] {
            assert_eq!(FuzzPattern::new(input).to_string(), expected);
        }
    }
}
