//! Common test helpers and fixtures shared across the test suite.

use mrom::{ControlField, DataField, Field, Record, RecordType};

/// The leader used by most fixture records.
pub const LEADER: &str = "02259cam a2200457 a 4500";

/// Build a control field wrapped in the `Field` union.
#[allow(dead_code)]
pub fn control(tag: &str, data: &str) -> Field {
    Field::from(ControlField::new(tag, data))
}

/// Build a data field wrapped in the `Field` union.
///
/// Indicators are given as one character per indicator; subfields as
/// `(code, data)` pairs in field order.
#[allow(dead_code)]
pub fn data(tag: &str, indicators: &str, subfields: &[(char, &str)]) -> Field {
    let mut field = DataField::new(tag);
    field.indicators.extend(indicators.chars());
    field.append(subfields.iter().copied());
    Field::from(field)
}

/// Creates a realistic record for operation testing.
///
/// Contains a control field, singly- and doubly-occurring data field tags,
/// and indicator variety, so tag, tag+indicator, and pattern criteria all
/// have something to distinguish.
#[allow(dead_code)]
pub fn create_realistic_record() -> Record {
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

/// The tags of a record's fields, in collection order.
#[allow(dead_code)]
pub fn tags(record: &Record) -> Vec<&str> {
    record.fields.iter().map(Field::tag).collect()
}
