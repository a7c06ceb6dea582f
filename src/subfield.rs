//! Subfields: the coded data elements nested inside data fields.

use crate::criterion::Criterion;
use serde::{Deserialize, Serialize};

/// A subfield within a data field.
///
/// A subfield is an atomic `(code, data)` pair with no identity beyond its
/// value: two subfields with equal code and data compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subfield {
    /// Subfield code (single character, case-sensitive).
    pub code: char,
    /// Subfield data.
    pub data: String,
}

impl Subfield {
    /// Create a new subfield.
    ///
    /// # Examples
    ///
    /// ```
    /// use mrom::Subfield;
    ///
    /// let subfield = Subfield::new('a', "A title :");
    /// assert_eq!(subfield.code, 'a');
    /// ```
    #[must_use]
    pub fn new(code: char, data: impl Into<String>) -> Self {
        Subfield {
            code,
            data: data.into(),
        }
    }

    /// Test whether this subfield's code satisfies the given criterion.
    ///
    /// A literal criterion must equal the code exactly; a pattern criterion
    /// must match it.
    #[must_use]
    pub fn matches(&self, criterion: &Criterion) -> bool {
        let mut buf = [0u8; 4];
        criterion.matches(self.code.encode_utf8(&mut buf))
    }
}

impl From<(char, &str)> for Subfield {
    fn from((code, data): (char, &str)) -> Self {
        Subfield::new(code, data)
    }
}

impl From<(char, String)> for Subfield {
    fn from((code, data): (char, String)) -> Self {
        Subfield { code, data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_matches_literal_code() {
        let subfield = Subfield::new('a', "data");
        assert!(subfield.matches(&Criterion::from("a")));
        assert!(!subfield.matches(&Criterion::from("b")));
        assert!(!subfield.matches(&Criterion::from("A")));
    }

    #[test]
    fn test_matches_pattern() {
        let subfield = Subfield::new('u', "data");
        assert!(subfield.matches(&Criterion::from(Regex::new("[uf]").unwrap())));
        assert!(!subfield.matches(&Criterion::from(Regex::new("[xyz]").unwrap())));
    }

    #[test]
    fn test_value_equality() {
        assert_eq!(Subfield::new('a', "data"), Subfield::new('a', "data"));
        assert_ne!(Subfield::new('a', "data"), Subfield::new('b', "data"));
        assert_ne!(Subfield::new('a', "data"), Subfield::new('a', "other"));
    }

    #[test]
    fn test_from_pair() {
        let subfield = Subfield::from(('z', "data 5"));
        assert_eq!(subfield, Subfield::new('z', "data 5"));
    }
}
