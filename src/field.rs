//! MARC field structures: the control/data variants and their operations.
//!
//! This module provides the field types of the record model:
//! - [`Field`] — closed union over the two field variants
//! - [`ControlField`] — tag plus a single data element
//! - [`DataField`] — tag plus ordered indicators and subfields
//!
//! A field's variant is fixed at construction by the shape of its tag and
//! never changes: tags of the form `00` followed by one alphanumeric
//! character (`001`, `00a`, `00Z`) are control tags; every other tag is a
//! data tag. See [`is_control_field_tag`].
//!
//! # Examples
//!
//! Build a data field fluently and query its subfields:
//!
//! ```ignore
//! use mrom::{Criterion, DataField};
//!
//! let field = DataField::builder("245")
//!     .indicator('1')
//!     .indicator('0')
//!     .subfield('a', "The Great Gatsby :")
//!     .subfield('c', "F. Scott Fitzgerald.")
//!     .build();
//!
//! assert_eq!(field.value(), "The Great Gatsby : F. Scott Fitzgerald.");
//! for subfield in field.each(&[Criterion::from("a")]) {
//!     println!("{}", subfield.data);
//! }
//! ```
//!
//! Narrow a [`Field`] by matching on its variant:
//!
//! ```ignore
//! match field {
//!     Field::Control(control) => println!("{}: {}", control.tag, control.data),
//!     Field::Data(data) => println!("{}: {}", data.tag, data.value()),
//! }
//! ```

use crate::criterion::Criterion;
use crate::error::{MarcError, Result};
use crate::subfield::Subfield;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::ops::Index;

lazy_static! {
    static ref CONTROL_TAG: Regex =
        Regex::new("^00[0-9A-Za-z]$").expect("control tag pattern compiles");
}

/// Test whether a tag names a control field.
///
/// A tag is a control tag iff it is two literal zeros followed by one
/// alphanumeric character, case-insensitive on the third character. This is
/// the single rule used everywhere a tag is classified, independent of any
/// other properties a value carries.
///
/// # Examples
///
/// ```
/// use mrom::is_control_field_tag;
///
/// assert!(is_control_field_tag("001"));
/// assert!(is_control_field_tag("00Z"));
/// assert!(!is_control_field_tag("010"));
/// assert!(!is_control_field_tag("0aa"));
/// ```
#[must_use]
pub fn is_control_field_tag(tag: &str) -> bool {
    CONTROL_TAG.is_match(tag)
}

/// A field of a record: either a control field or a data field.
///
/// The variant is decided by the tag shape at construction time and is
/// fixed for the life of the field. Use pattern matching (or the `as_*`
/// accessors) to reach variant-specific members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Field {
    /// A control field (tags `001`-`009`, `00a`-`00z`).
    Control(ControlField),
    /// A data field (every other tag).
    Data(DataField),
}

impl Field {
    /// The field's tag.
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Field::Control(field) => &field.tag,
            Field::Data(field) => &field.tag,
        }
    }

    /// True iff this field is a control field.
    #[must_use]
    pub fn is_control_field(&self) -> bool {
        matches!(self, Field::Control(_))
    }

    /// True iff this field is a data field.
    #[must_use]
    pub fn is_data_field(&self) -> bool {
        matches!(self, Field::Data(_))
    }

    /// Borrow the control variant, if this is a control field.
    #[must_use]
    pub fn as_control_field(&self) -> Option<&ControlField> {
        match self {
            Field::Control(field) => Some(field),
            Field::Data(_) => None,
        }
    }

    /// Borrow the data variant, if this is a data field.
    #[must_use]
    pub fn as_data_field(&self) -> Option<&DataField> {
        match self {
            Field::Control(_) => None,
            Field::Data(field) => Some(field),
        }
    }

    /// Mutably borrow the control variant, if this is a control field.
    pub fn as_control_field_mut(&mut self) -> Option<&mut ControlField> {
        match self {
            Field::Control(field) => Some(field),
            Field::Data(_) => None,
        }
    }

    /// Mutably borrow the data variant, if this is a data field.
    pub fn as_data_field_mut(&mut self) -> Option<&mut DataField> {
        match self {
            Field::Control(_) => None,
            Field::Data(field) => Some(field),
        }
    }

    /// Test whether this field satisfies the given criterion.
    ///
    /// Delegates to [`ControlField::matches`] or [`DataField::matches`]
    /// according to the variant.
    #[must_use]
    pub fn matches(&self, criterion: &Criterion) -> bool {
        match self {
            Field::Control(field) => field.matches(criterion),
            Field::Data(field) => field.matches(criterion),
        }
    }
}

impl From<ControlField> for Field {
    fn from(field: ControlField) -> Self {
        Field::Control(field)
    }
}

impl From<DataField> for Field {
    fn from(field: DataField) -> Self {
        Field::Data(field)
    }
}

/// A control field: a tag and a single data element.
///
/// Control fields, unlike data fields, have no indicators or subfields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlField {
    /// Field tag (case-sensitive).
    pub tag: String,
    /// The field's single data element.
    pub data: String,
}

impl ControlField {
    /// Create a new control field.
    #[must_use]
    pub fn new(tag: impl Into<String>, data: impl Into<String>) -> Self {
        ControlField {
            tag: tag.into(),
            data: data.into(),
        }
    }

    /// Test whether this field's tag satisfies the given criterion.
    ///
    /// A literal criterion must equal the tag exactly; a pattern criterion
    /// must match it.
    #[must_use]
    pub fn matches(&self, criterion: &Criterion) -> bool {
        criterion.matches(&self.tag)
    }
}

/// A data field: a tag with ordered indicators and ordered subfields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataField {
    /// Field tag (case-sensitive).
    pub tag: String,
    /// Indicators, in order (each a single character).
    pub indicators: SmallVec<[char; 2]>,
    /// Subfields, in order (stored in `SmallVec` to avoid allocation for
    /// typical fields with 4 or fewer subfields).
    pub subfields: SmallVec<[Subfield; 4]>,
}

impl DataField {
    /// Create a new data field with no indicators and no subfields.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        DataField {
            tag: tag.into(),
            indicators: SmallVec::new(),
            subfields: SmallVec::new(),
        }
    }

    /// Create a builder for constructing data fields fluently.
    ///
    /// # Examples
    ///
    /// ```
    /// use mrom::DataField;
    ///
    /// let field = DataField::builder("245")
    ///     .indicator('1')
    ///     .indicator('0')
    ///     .subfield('a', "Title")
    ///     .build();
    ///
    /// assert_eq!(field.subfield_codes(), vec!['a']);
    /// ```
    #[must_use]
    pub fn builder(tag: impl Into<String>) -> DataFieldBuilder {
        DataFieldBuilder {
            field: DataField::new(tag),
        }
    }

    /// Test whether this field satisfies the given criterion.
    ///
    /// The criterion is matched against the tag concatenated with all
    /// indicators, in order. As a special case, a literal criterion that
    /// equals the bare tag matches regardless of the indicators.
    ///
    /// # Examples
    ///
    /// ```
    /// use mrom::{Criterion, DataField};
    ///
    /// let mut field = DataField::new("987");
    /// field.indicators.extend(['4', 'a']);
    ///
    /// assert!(field.matches(&Criterion::from("987")));
    /// assert!(field.matches(&Criterion::from("9874a")));
    /// assert!(!field.matches(&Criterion::from("9874z")));
    /// ```
    #[must_use]
    pub fn matches(&self, criterion: &Criterion) -> bool {
        match criterion {
            Criterion::Literal(literal) => {
                *literal == self.tag || *literal == self.composed_tag()
            }
            Criterion::Pattern(pattern) => pattern.is_match(&self.composed_tag()),
        }
    }

    /// The tag concatenated with all indicators, in order.
    fn composed_tag(&self) -> String {
        let mut composed = String::with_capacity(self.tag.len() + self.indicators.len());
        composed.push_str(&self.tag);
        composed.extend(self.indicators.iter());
        composed
    }

    /// The codes of the subfields, in field order.
    ///
    /// Duplicate codes appear as often as the field has duplicate subfields.
    /// O(n).
    #[must_use]
    pub fn subfield_codes(&self) -> Vec<char> {
        self.subfields.iter().map(|subfield| subfield.code).collect()
    }

    /// The field's content without tag, indicators, and subfield codes.
    ///
    /// The data from each subfield is concatenated in field order, separated
    /// by a single space. Empty string if the field has no subfields. O(n).
    #[must_use]
    pub fn value(&self) -> String {
        self.subfields
            .iter()
            .map(|subfield| subfield.data.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    // ========================================================================
    // Subfield mutation
    // ========================================================================

    /// Add subfields to the end of the field, in the given order.
    ///
    /// Accepts anything convertible into [`Subfield`]: existing instances,
    /// [`SubfieldValue`](crate::SubfieldValue) objects, or `(code, data)`
    /// pairs. Zero items is a valid no-op.
    ///
    /// Returns the number of subfields in the field afterwards.
    ///
    /// # Examples
    ///
    /// ```
    /// use mrom::DataField;
    ///
    /// let mut field = DataField::new("987");
    /// let count = field.append([('z', "data 5"), ('w', "data 6")]);
    /// assert_eq!(count, 2);
    /// ```
    pub fn append<I, S>(&mut self, subfields: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<Subfield>,
    {
        self.splice_subfields(false, subfields)
    }

    /// Add subfields to the start of the field, in the given order.
    ///
    /// Accepts the same item shapes as [`append`](Self::append). Zero items
    /// is a valid no-op. Returns the number of subfields in the field
    /// afterwards.
    pub fn prepend<I, S>(&mut self, subfields: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<Subfield>,
    {
        self.splice_subfields(true, subfields)
    }

    /// Alias for [`append`](Self::append).
    pub fn push<I, S>(&mut self, subfields: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<Subfield>,
    {
        self.append(subfields)
    }

    /// Alias for [`prepend`](Self::prepend).
    pub fn unshift<I, S>(&mut self, subfields: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<Subfield>,
    {
        self.prepend(subfields)
    }

    fn splice_subfields<I, S>(&mut self, at_front: bool, subfields: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<Subfield>,
    {
        let items = subfields.into_iter().map(Into::into);
        if at_front {
            self.subfields.insert_many(0, items);
        } else {
            self.subfields.extend(items);
        }
        self.subfields.len()
    }

    /// Delete every subfield matching any of the given criteria, in place.
    ///
    /// Zero criteria is a valid no-op, as is a set of criteria matching
    /// nothing. Surviving subfields keep their relative order.
    pub fn delete(&mut self, criteria: &[Criterion]) {
        if criteria.is_empty() {
            return;
        }
        self.subfields
            .retain(|subfield| !criteria.iter().any(|criterion| subfield.matches(criterion)));
    }

    // ========================================================================
    // Subfield queries
    // ========================================================================

    /// True iff every given criterion is satisfied by at least one subfield.
    ///
    /// The criteria carry an implicit AND; a single subfield may satisfy
    /// several of them. The scan stops as soon as every criterion has been
    /// matched once.
    ///
    /// # Errors
    ///
    /// Returns [`MarcError::NoCriteria`] when called with zero criteria,
    /// since "no criteria" is ambiguous between vacuous truth and falsity.
    pub fn has_all(&self, criteria: &[Criterion]) -> Result<bool> {
        if criteria.is_empty() {
            return Err(MarcError::NoCriteria("has_all"));
        }
        let mut pending: Vec<&Criterion> = criteria.iter().collect();
        for subfield in self.each(criteria) {
            pending.retain(|criterion| !subfield.matches(criterion));
            if pending.is_empty() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// True iff at least one subfield matches at least one criterion
    /// (implicit OR).
    ///
    /// # Errors
    ///
    /// Returns [`MarcError::NoCriteria`] when called with zero criteria.
    pub fn has_any(&self, criteria: &[Criterion]) -> Result<bool> {
        if criteria.is_empty() {
            return Err(MarcError::NoCriteria("has_any"));
        }
        Ok(self.each(criteria).next().is_some())
    }

    /// Find the first subfield matching the given criteria.
    ///
    /// Criteria are tried in the order given, not in subfield order: for
    /// each criterion in turn the subfields are scanned in field order, and
    /// the first hit wins. Later criteria are only consulted when every
    /// earlier criterion matched nothing. `None` with zero criteria or when
    /// nothing matches.
    #[must_use]
    pub fn find_first(&self, criteria: &[Criterion]) -> Option<&Subfield> {
        criteria.iter().find_map(|criterion| {
            self.subfields
                .iter()
                .find(|subfield| subfield.matches(criterion))
        })
    }

    /// Iterate over the subfields matching any of the given criteria, in
    /// field order.
    ///
    /// With zero criteria, yields every subfield. A subfield matching
    /// several criteria is yielded once, in its natural position. Every
    /// call starts a fresh traversal.
    pub fn each<'a>(&'a self, criteria: &'a [Criterion]) -> impl Iterator<Item = &'a Subfield> {
        self.subfields.iter().filter(move |subfield| {
            criteria.is_empty()
                || criteria
                    .iter()
                    .any(|criterion| subfield.matches(criterion))
        })
    }

    /// Collect the subfields matching the given criteria, in field order.
    ///
    /// Unlike [`each`](Self::each), zero criteria yields an empty list, not
    /// every subfield.
    #[must_use]
    pub fn pick<'a>(&'a self, criteria: &'a [Criterion]) -> Vec<&'a Subfield> {
        if criteria.is_empty() {
            Vec::new()
        } else {
            self.each(criteria).collect()
        }
    }
}

/// Enable dictionary-like access to subfield data using `field['a']`.
///
/// Returns the data of the first subfield with the given code, or panics if
/// none exists. For fallible access, use [`DataField::find_first`] instead.
///
/// # Examples
///
/// ```ignore
/// let title = &field['a'];
/// ```
impl Index<char> for DataField {
    type Output = str;

    fn index(&self, code: char) -> &Self::Output {
        self.subfields
            .iter()
            .find(|subfield| subfield.code == code)
            .map(|subfield| subfield.data.as_str())
            .expect("subfield not found")
    }
}

/// Builder for fluently constructing data fields.
///
/// # Examples
///
/// ```
/// use mrom::DataField;
///
/// let field = DataField::builder("650")
///     .indicators(" 0")
///     .subfield('a', "Subject")
///     .subfield('x', "Subdivision")
///     .build();
/// ```
#[derive(Debug)]
pub struct DataFieldBuilder {
    field: DataField,
}

impl DataFieldBuilder {
    /// Add one indicator to the field being built.
    #[must_use]
    pub fn indicator(mut self, indicator: char) -> Self {
        self.field.indicators.push(indicator);
        self
    }

    /// Add one indicator per character of the given string, in order.
    #[must_use]
    pub fn indicators(mut self, indicators: &str) -> Self {
        self.field.indicators.extend(indicators.chars());
        self
    }

    /// Add a subfield to the field being built.
    #[must_use]
    pub fn subfield(mut self, code: char, data: impl Into<String>) -> Self {
        self.field.subfields.push(Subfield::new(code, data));
        self
    }

    /// Build the field.
    #[must_use]
    pub fn build(self) -> DataField {
        self.field
    }
}
