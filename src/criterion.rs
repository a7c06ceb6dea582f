//! Matching criteria for field and subfield queries.
//!
//! Every query operation on [`Record`](crate::Record) and
//! [`DataField`](crate::DataField) takes one or more [`Criterion`] values.
//! A criterion is either a literal string, compared for exact equality, or a
//! compiled regular expression, tested against the target.
//!
//! # Examples
//!
//! ```ignore
//! use mrom::Criterion;
//!
//! let literal = Criterion::from("245");
//! let pattern = Criterion::pattern("^9[0-9]{2}")?;
//!
//! for field in record.each(&[literal, pattern]) {
//!     println!("{}", field.tag());
//! }
//! ```

use regex::Regex;

/// A matching criterion: a literal string or a regular expression.
///
/// What a criterion is matched against depends on the query target:
/// a subfield's code, a control field's tag, or a data field's tag
/// concatenated with its indicators.
#[derive(Debug, Clone)]
pub enum Criterion {
    /// Matches iff the target equals the string exactly (case-sensitive).
    Literal(String),
    /// Matches iff the regular expression matches the target.
    Pattern(Regex),
}

impl Criterion {
    /// Create a literal criterion.
    #[must_use]
    pub fn literal(literal: impl Into<String>) -> Self {
        Criterion::Literal(literal.into())
    }

    /// Create a pattern criterion from a regex string.
    ///
    /// # Errors
    ///
    /// Returns a `regex::Error` if the pattern is not a valid regular
    /// expression.
    ///
    /// # Examples
    ///
    /// ```
    /// use mrom::Criterion;
    ///
    /// let criterion = Criterion::pattern("^00[0-9a-z]$").unwrap();
    /// assert!(criterion.matches("001"));
    /// ```
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Criterion::Pattern(Regex::new(pattern)?))
    }

    /// Test this criterion against a target string.
    #[must_use]
    pub fn matches(&self, target: &str) -> bool {
        match self {
            Criterion::Literal(literal) => literal == target,
            Criterion::Pattern(pattern) => pattern.is_match(target),
        }
    }
}

impl From<&str> for Criterion {
    fn from(literal: &str) -> Self {
        Criterion::Literal(literal.to_string())
    }
}

impl From<String> for Criterion {
    fn from(literal: String) -> Self {
        Criterion::Literal(literal)
    }
}

impl From<Regex> for Criterion {
    fn from(pattern: Regex) -> Self {
        Criterion::Pattern(pattern)
    }
}
