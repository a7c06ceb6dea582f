//! MARC record structure and its field-level operations.
//!
//! This module provides [`Record`] (a leader plus an ordered collection of
//! fields) together with its query, mutation, and sort operations, the
//! [`RecordType`] enumeration, and the [`SortMode`] selector.
//!
//! # Examples
//!
//! Build a record fluently and query it:
//!
//! ```ignore
//! use mrom::{ControlField, Criterion, DataField, Record};
//!
//! let record = Record::builder("02259cam a2200457 a 4500")
//!     .field(ControlField::new("001", "12345"))
//!     .field(
//!         DataField::builder("245")
//!             .indicators("10")
//!             .subfield('a', "A title")
//!             .build(),
//!     )
//!     .build();
//!
//! let title = record.find_first(&[Criterion::from("245")]);
//! assert!(title.is_some());
//! ```

use crate::criterion::Criterion;
use crate::error::{MarcError, Result};
use crate::field::Field;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The type of a record.
///
/// Carried only by transports that have somewhere to put it (the `type`
/// attribute of a MARCXML record element); other transports ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordType {
    /// A bibliographic record.
    Bibliographic,
    /// An authority record.
    Authority,
    /// A holdings record.
    Holdings,
    /// A classification record.
    Classification,
    /// A community information record.
    Community,
}

impl FromStr for RecordType {
    type Err = MarcError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Bibliographic" => Ok(RecordType::Bibliographic),
            "Authority" => Ok(RecordType::Authority),
            "Holdings" => Ok(RecordType::Holdings),
            "Classification" => Ok(RecordType::Classification),
            "Community" => Ok(RecordType::Community),
            other => Err(MarcError::InvalidRecordType(other.to_string())),
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordType::Bibliographic => "Bibliographic",
            RecordType::Authority => "Authority",
            RecordType::Holdings => "Holdings",
            RecordType::Classification => "Classification",
            RecordType::Community => "Community",
        };
        f.write_str(name)
    }
}

/// Sort mode for [`Record::sort`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Sort by the full tag, case-folded to lower case.
    #[default]
    Strict,
    /// Sort by only the first character of the tag, case-folded to lower
    /// case.
    Loose,
}

/// A MARC record: a leader plus an ordered collection of fields.
///
/// Fields are normally ordered by tag, but this is not a requirement: the
/// collection keeps whatever order it is given. [`Record::add`] and
/// [`Record::sort`], used consistently, keep it ordered by tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// The fixed field at the beginning of the record that provides
    /// information for its processing. Opaque to this model, never
    /// validated.
    pub leader: String,

    /// Record id.
    ///
    /// Carried only by transports that have somewhere to put it (the `id`
    /// attribute of a MARCXML record element). If present, the id should
    /// start with a letter or underscore and then contain only letters,
    /// digits, underscores, hyphens, and periods. This model documents the
    /// constraint but does not enforce it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Record type, if known.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub record_type: Option<RecordType>,

    /// The control and data fields of the record, in collection order.
    pub fields: Vec<Field>,
}

impl Record {
    /// Create a new record with the given leader and no fields.
    #[must_use]
    pub fn new(leader: impl Into<String>) -> Self {
        Record {
            leader: leader.into(),
            id: None,
            record_type: None,
            fields: Vec::new(),
        }
    }

    /// Create a builder for fluently constructing records.
    ///
    /// The builder places fields in the order given; use [`Record::sort`]
    /// afterwards if tag order is wanted.
    ///
    /// # Examples
    ///
    /// ```
    /// use mrom::{ControlField, Record, RecordType};
    ///
    /// let record = Record::builder("02259cam a2200457 a 4500")
    ///     .id("anp20170336")
    ///     .record_type(RecordType::Bibliographic)
    ///     .field(ControlField::new("001", "12345"))
    ///     .build();
    ///
    /// assert_eq!(record.fields.len(), 1);
    /// ```
    #[must_use]
    pub fn builder(leader: impl Into<String>) -> RecordBuilder {
        RecordBuilder {
            record: Record::new(leader),
        }
    }

    // ========================================================================
    // Field mutation
    // ========================================================================

    /// Add fields to the record, keeping the fields ordered by tag.
    ///
    /// Accepts anything convertible into [`Field`]: existing instances
    /// (ownership transfers; nothing is copied) or interchange values
    /// (classified control-vs-data by tag shape and normalized).
    ///
    /// A single field is inserted directly before the first existing field
    /// whose tag is strictly greater (ordinary case-sensitive string
    /// comparison), which places it after any existing fields with an equal
    /// tag; if no tag is greater it goes at the end. Every other field keeps
    /// its position.
    ///
    /// Several fields are appended to the end and then the whole collection
    /// is re-sorted with [`SortMode::Strict`]; unlike the single-field path
    /// this normalizes any pre-existing custom order. Zero fields is a
    /// valid no-op.
    ///
    /// If the fields were not sorted to begin with, there is no guarantee
    /// about where the new fields land.
    pub fn add<I, F>(&mut self, fields: I)
    where
        I: IntoIterator<Item = F>,
        F: Into<Field>,
    {
        let mut items: Vec<Field> = fields.into_iter().map(Into::into).collect();
        if items.len() == 1 {
            // Frequent case: insert a single field directly in place.
            let field = items.remove(0);
            let insertion_point = self
                .fields
                .iter()
                .position(|existing| existing.tag() > field.tag())
                .unwrap_or(self.fields.len());
            self.fields.insert(insertion_point, field);
        } else if !items.is_empty() {
            self.fields.append(&mut items);
            self.sort(SortMode::Strict);
        }
    }

    /// Delete every field matching any of the given criteria, in place.
    ///
    /// Zero criteria is a valid no-op, as is a set of criteria matching
    /// nothing. Surviving fields keep their relative order.
    pub fn delete(&mut self, criteria: &[Criterion]) {
        if criteria.is_empty() {
            return;
        }
        self.fields
            .retain(|field| !criteria.iter().any(|criterion| field.matches(criterion)));
    }

    /// Stable sort of the fields by tag.
    ///
    /// [`SortMode::Strict`] keys on the full tag, [`SortMode::Loose`] on
    /// only its first character; both case-fold the key to lower case.
    /// Fields with equal keys keep their relative order exactly. A record
    /// with no fields is a valid no-op.
    pub fn sort(&mut self, mode: SortMode) {
        match mode {
            SortMode::Strict => self
                .fields
                .sort_by_cached_key(|field| field.tag().to_lowercase()),
            SortMode::Loose => self.fields.sort_by_cached_key(|field| {
                field
                    .tag()
                    .chars()
                    .next()
                    .map(|c| c.to_lowercase().collect::<String>())
                    .unwrap_or_default()
            }),
        }
    }

    // ========================================================================
    // Field queries
    // ========================================================================

    /// True iff every given criterion is satisfied by at least one field.
    ///
    /// The criteria carry an implicit AND; a single field may satisfy
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
        for field in self.each(criteria) {
            pending.retain(|criterion| !field.matches(criterion));
            if pending.is_empty() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// True iff at least one field matches at least one criterion
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

    /// Find the first field matching the given criteria.
    ///
    /// Criteria are tried in the order given, not in record order: for each
    /// criterion in turn the fields are scanned in record order, and the
    /// first hit wins. Later criteria are only consulted when every earlier
    /// criterion matched nothing. `None` with zero criteria or when nothing
    /// matches.
    #[must_use]
    pub fn find_first(&self, criteria: &[Criterion]) -> Option<&Field> {
        criteria
            .iter()
            .find_map(|criterion| self.fields.iter().find(|field| field.matches(criterion)))
    }

    /// Iterate over the fields matching any of the given criteria, in
    /// record order.
    ///
    /// With zero criteria, yields every field. A field matching several
    /// criteria is yielded once, in its natural position. Every call starts
    /// a fresh traversal.
    pub fn each<'a>(&'a self, criteria: &'a [Criterion]) -> impl Iterator<Item = &'a Field> {
        self.fields.iter().filter(move |field| {
            criteria.is_empty()
                || criteria.iter().any(|criterion| field.matches(criterion))
        })
    }
}

/// Builder for fluently constructing records.
///
/// # Examples
///
/// ```
/// use mrom::{ControlField, DataField, Record};
///
/// let record = Record::builder("02259cam a2200457 a 4500")
///     .field(ControlField::new("001", "12345"))
///     .field(DataField::builder("245").subfield('a', "Title").build())
///     .build();
/// ```
#[derive(Debug)]
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    /// Set the record id.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.record.id = Some(id.into());
        self
    }

    /// Set the record type.
    #[must_use]
    pub fn record_type(mut self, record_type: RecordType) -> Self {
        self.record.record_type = Some(record_type);
        self
    }

    /// Add a field to the record being built, after any already added.
    #[must_use]
    pub fn field(mut self, field: impl Into<Field>) -> Self {
        self.record.fields.push(field.into());
        self
    }

    /// Build the record.
    #[must_use]
    pub fn build(self) -> Record {
        self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{ControlField, DataField};
    use regex::Regex;

    const LEADER: &str = "02259cam a2200457 a 4500";

    fn pattern(pattern: &str) -> Criterion {
        Criterion::from(Regex::new(pattern).unwrap())
    }

    fn control(tag: &str, data: &str) -> Field {
        Field::from(ControlField::new(tag, data))
    }

    fn data(tag: &str, indicators: &str, subfields: &[(char, &str)]) -> Field {
        let mut field = DataField::new(tag);
        field.indicators.extend(indicators.chars());
        field.append(subfields.iter().copied());
        Field::from(field)
    }

    fn make_record() -> Record {
        let mut record = Record::new(LEADER);
        record.id = Some("anp20170336".to_string());
        record.record_type = Some(RecordType::Bibliographic);
        record.fields = vec![
            control("001", "data 1"),
            data("035", "ab", &[('a', "data 3")]),
            data("100", "  ", &[('a', "Author, An.")]),
            data(
                "245",
                "12",
                &[
                    ('a', "A title :"),
                    ('b', "of a book /"),
                    ('c', "by An Author."),
                ],
            ),
            data("910", "ab", &[('a', "910ab data")]),
            data("910", "xy", &[('a', "910xy data")]),
        ];
        record
    }

    fn tags(record: &Record) -> Vec<&str> {
        record.fields.iter().map(Field::tag).collect()
    }

    #[test]
    fn test_new_record_is_empty() {
        let record = Record::new(LEADER);
        assert_eq!(record.leader, LEADER);
        assert!(record.fields.is_empty());
        assert!(record.id.is_none());
        assert!(record.record_type.is_none());
    }

    #[test]
    fn test_record_type_from_str_round_trips() {
        for record_type in [
            RecordType::Bibliographic,
            RecordType::Authority,
            RecordType::Holdings,
            RecordType::Classification,
            RecordType::Community,
        ] {
            let parsed: RecordType = record_type.to_string().parse().unwrap();
            assert_eq!(parsed, record_type);
        }
    }

    #[test]
    fn test_record_type_from_str_rejects_unknown() {
        let result = RecordType::from_str("bibliographic");
        assert!(matches!(result, Err(MarcError::InvalidRecordType(_))));
    }

    #[test]
    fn test_add_single_field_to_empty_record() {
        let mut record = Record::new(LEADER);
        record.add([control("009", "data")]);
        assert_eq!(tags(&record), vec!["009"]);
    }

    #[test]
    fn test_add_single_field_keeps_strict_order() {
        let mut record = make_record();
        record.add([data("200", "  ", &[('a', "200 data")])]);
        assert_eq!(
            tags(&record),
            vec!["001", "035", "100", "200", "245", "910", "910"]
        );
    }

    #[test]
    fn test_add_single_field_lands_after_equal_tags() {
        let mut record = make_record();
        record.add([data("245", "zx", &[('z', "1"), ('y', "2")])]);
        assert_eq!(
            tags(&record),
            vec!["001", "035", "100", "245", "245", "910", "910"]
        );
        // The pre-existing 245 stays first.
        let criteria_245 = [Criterion::from("245")];
        let both: Vec<_> = record.each(&criteria_245).collect();
        assert_eq!(
            both[0].as_data_field().unwrap().indicators.as_slice(),
            ['1', '2']
        );
        assert_eq!(
            both[1].as_data_field().unwrap().indicators.as_slice(),
            ['z', 'x']
        );
    }

    #[test]
    fn test_add_single_field_with_greatest_tag_goes_last() {
        let mut record = make_record();
        record.add([data("999", "  ", &[])]);
        assert_eq!(tags(&record).last(), Some(&"999"));
    }

    #[test]
    fn test_add_multiple_fields_sorts_the_whole_record() {
        let mut record = make_record();
        record.add(vec![
            data("245", "zx", &[('z', "1"), ('y', "2")]),
            control("009", "data for 009"),
            control("005", "005 data"),
            data("910", "gh", &[('z', "910gh data")]),
            data("500", "  ", &[('a', "A note.")]),
        ]);
        assert_eq!(
            tags(&record),
            vec!["001", "005", "009", "035", "100", "245", "245", "500", "910", "910", "910"]
        );
        // Stability: the appended 910gh ends up after the two existing 910s.
        let last = record.fields.last().unwrap().as_data_field().unwrap();
        assert_eq!(last.indicators.as_slice(), ['g', 'h']);
    }

    #[test]
    fn test_add_nothing_is_a_noop() {
        let mut record = make_record();
        record.add(Vec::<Field>::new());
        assert_eq!(record, make_record());
    }

    #[test]
    fn test_add_uses_case_sensitive_comparison_unlike_sort() {
        // add: "abc" > "XYZ" byte-wise, so the new field goes first.
        let mut record = Record::new(LEADER);
        record.fields = vec![data("abc", "", &[])];
        record.add([data("XYZ", "", &[])]);
        assert_eq!(tags(&record), vec!["XYZ", "abc"]);

        // sort: case-folded keys put "abc" before "XYZ".
        record.sort(SortMode::Strict);
        assert_eq!(tags(&record), vec!["abc", "XYZ"]);
    }

    #[test]
    fn test_delete_matching_fields() {
        let mut record = make_record();
        record.delete(&[
            Criterion::from("001"),
            pattern("^245"),
            Criterion::from("910xy"),
        ]);
        assert_eq!(tags(&record), vec!["035", "100", "910"]);
    }

    #[test]
    fn test_delete_with_no_matches_is_a_noop() {
        let mut record = make_record();
        record.delete(&[
            Criterion::from("zzz"),
            Criterion::from("245zz"),
            pattern("^00a"),
        ]);
        assert_eq!(record, make_record());
    }

    #[test]
    fn test_delete_with_no_criteria_is_a_noop() {
        let mut record = make_record();
        record.delete(&[]);
        assert_eq!(record, make_record());
    }

    #[test]
    fn test_each_with_no_criteria_yields_all_fields() {
        let record = make_record();
        assert_eq!(record.each(&[]).count(), 6);
    }

    #[test]
    fn test_each_matches_tag_and_indicators() {
        let record = make_record();
        let criteria = [Criterion::from("910ab")];
        let matched: Vec<_> = record.each(&criteria).collect();
        assert_eq!(matched.len(), 1);
        assert_eq!(
            matched[0].as_data_field().unwrap().indicators.as_slice(),
            ['a', 'b']
        );

        let criteria = [Criterion::from("100  ")];
        assert_eq!(record.each(&criteria).count(), 1);
        let criteria = [Criterion::from("100zz")];
        assert_eq!(record.each(&criteria).count(), 0);
    }

    #[test]
    fn test_each_yields_in_record_order_not_argument_order() {
        let record = make_record();
        let criteria = [
            Criterion::from("910ab"),
            pattern("^001"),
            Criterion::from("245"),
        ];
        let matched: Vec<&str> = record.each(&criteria).map(Field::tag).collect();
        assert_eq!(matched, vec!["001", "245", "910"]);
    }

    #[test]
    fn test_find_first_in_criterion_order() {
        let record = make_record();
        // 245 appears later in the record than 100, but its criterion comes
        // first.
        let found = record.find_first(&[Criterion::from("245"), Criterion::from("100")]);
        assert_eq!(found.unwrap().tag(), "245");

        let found = record.find_first(&[pattern("910xy"), pattern("910ab")]);
        assert_eq!(
            found.unwrap().as_data_field().unwrap().indicators.as_slice(),
            ['x', 'y']
        );

        let found = record.find_first(&[
            Criterion::from("zzz"),
            Criterion::from("910ab"),
            Criterion::from("100"),
        ]);
        assert_eq!(found.unwrap().tag(), "910");
    }

    #[test]
    fn test_find_first_returns_first_occurrence_of_repeated_tag() {
        let record = make_record();
        let found = record.find_first(&[Criterion::from("910")]).unwrap();
        assert_eq!(
            found.as_data_field().unwrap().indicators.as_slice(),
            ['a', 'b']
        );
    }

    #[test]
    fn test_find_first_with_nothing_to_find() {
        let record = make_record();
        assert!(record.find_first(&[]).is_none());
        assert!(record.find_first(&[Criterion::from("999")]).is_none());
        assert!(record.find_first(&[Criterion::from("245zz")]).is_none());
        assert!(Record::new(LEADER)
            .find_first(&[Criterion::from("001")])
            .is_none());
    }

    #[test]
    fn test_has_all() {
        let record = make_record();
        assert!(record
            .has_all(&[
                Criterion::from("245"),
                Criterion::from("001"),
                Criterion::from("910xy"),
            ])
            .unwrap());
        assert!(record
            .has_all(&[pattern("^245"), pattern("^001$"), pattern("^910xy$")])
            .unwrap());
        assert!(!record.has_all(&[Criterion::from("zzz")]).unwrap());
        assert!(!record
            .has_all(&[Criterion::from("245"), Criterion::from("245xx")])
            .unwrap());
    }

    #[test]
    fn test_has_any() {
        let record = make_record();
        assert!(record.has_any(&[Criterion::from("245")]).unwrap());
        assert!(record
            .has_any(&[
                Criterion::from("zzz"),
                pattern("^910ab"),
                Criterion::from("910xy"),
            ])
            .unwrap());
        assert!(!record.has_any(&[Criterion::from("910zz")]).unwrap());
        assert!(!record
            .has_any(&[Criterion::from("zzz"), pattern("^910zz$")])
            .unwrap());
    }

    #[test]
    fn test_has_all_and_has_any_require_criteria() {
        let record = make_record();
        assert!(matches!(
            record.has_all(&[]),
            Err(MarcError::NoCriteria("has_all"))
        ));
        assert!(matches!(
            record.has_any(&[]),
            Err(MarcError::NoCriteria("has_any"))
        ));
    }

    #[test]
    fn test_strict_sort_is_stable_and_case_insensitive() {
        let mut record = Record::new(LEADER);
        record.fields = vec![
            control("005", ""),
            control("001", ""),
            control("00Z", ""),
            control("00f", ""),
            data("910", "", &[]),
            data("0bc", "", &[]),
            data("XYZ", "", &[]),
            data("abc", "", &[]),
            data("300", "", &[]),
            data("650", "22", &[]),
            data("650", "11", &[]),
            data("650", "33", &[]),
            data("650", "33", &[]),
        ];
        record.sort(SortMode::Strict);
        assert_eq!(
            tags(&record),
            vec![
                "001", "005", "00f", "00Z", "0bc", "300", "650", "650", "650", "650", "910",
                "abc", "XYZ"
            ]
        );
        // Equal keys keep their original relative order.
        let indicator_pairs: Vec<String> = record
            .each(&[Criterion::from("650")])
            .map(|f| f.as_data_field().unwrap().indicators.iter().collect())
            .collect();
        assert_eq!(indicator_pairs, vec!["22", "11", "33", "33"]);
    }

    #[test]
    fn test_loose_sort_keys_on_first_character_only() {
        let mut record = Record::new(LEADER);
        record.fields = vec![
            data("652", "22", &[]),
            data("651", "11", &[]),
            data("653", "33", &[]),
            data("650", "00", &[]),
            control("005", ""),
            control("001", ""),
            control("00Z", ""),
            control("00f", ""),
            data("300", "", &[]),
            data("XYZ", "", &[]),
            data("abc", "", &[]),
        ];
        record.sort(SortMode::Loose);
        assert_eq!(
            tags(&record),
            vec!["005", "001", "00Z", "00f", "300", "652", "651", "653", "650", "abc", "XYZ"]
        );
    }

    #[test]
    fn test_sort_defaults_to_strict() {
        let mut record = Record::new(LEADER);
        record.fields = vec![
            data("691", "", &[]),
            data("682", "", &[]),
            data("673", "", &[]),
            data("664", "", &[]),
        ];
        record.sort(SortMode::default());
        assert_eq!(tags(&record), vec!["664", "673", "682", "691"]);
    }

    #[test]
    fn test_sort_on_empty_record_is_a_noop() {
        let mut record = Record::new(LEADER);
        record.sort(SortMode::Strict);
        record.sort(SortMode::Loose);
        assert!(record.fields.is_empty());
    }

    #[test]
    fn test_clone_is_independent() {
        let original = make_record();
        let mut clone = original.clone();
        assert_eq!(clone, original);

        clone.add([control("009", "added")]);
        if let Some(field) = clone.fields[1].as_data_field_mut() {
            field.append([('q', "added subfield")]);
        }
        assert_eq!(original.fields.len(), 6);
        assert_eq!(
            original.fields[1].as_data_field().unwrap().subfields.len(),
            1
        );
    }

    #[test]
    fn test_builder() {
        let record = Record::builder(LEADER)
            .id("anp20170336")
            .record_type(RecordType::Bibliographic)
            .field(control("001", "data 1"))
            .field(data("245", "12", &[('a', "A title :")]))
            .build();
        assert_eq!(record.leader, LEADER);
        assert_eq!(record.id.as_deref(), Some("anp20170336"));
        assert_eq!(record.record_type, Some(RecordType::Bibliographic));
        assert_eq!(tags(&record), vec!["001", "245"]);
    }
}
