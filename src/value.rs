//! Interchange value shapes and their conversion into model types.
//!
//! These are the plain shapes that parser collaborators produce to construct
//! records, and that writer collaborators consume. They mirror the wire
//! contract exactly, shorthands included, and the conversions here normalize
//! those shorthands:
//!
//! - `indicators` given as one string becomes one indicator per character;
//!   given as a list, it is copied element by element.
//! - `subfields` given as a flat string list is consumed as alternating
//!   `(code, data)` pairs; given as a list of `{code, data}` objects, it is
//!   copied element by element.
//! - A field value is classified control-vs-data purely by the shape of its
//!   tag (see [`is_control_field_tag`]), independent of which optional
//!   properties happen to be present.
//!
//! # Examples
//!
//! ```ignore
//! use mrom::{Record, RecordValue};
//!
//! let value: RecordValue = serde_json::from_str(
//!     r#"{
//!         "leader": "02259cam a2200457 a 4500",
//!         "fields": [
//!             { "tag": "001", "data": "12345" },
//!             { "tag": "245", "indicators": "10", "subfields": ["a", "A title"] }
//!         ]
//!     }"#,
//! )?;
//! let record = Record::from_value(value);
//! ```

use crate::field::{is_control_field_tag, ControlField, DataField, Field};
use crate::record::{Record, RecordType};
use crate::subfield::Subfield;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Interchange shape of a whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordValue {
    /// Record id, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Record type, if any.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub record_type: Option<RecordType>,
    /// The record leader.
    pub leader: String,
    /// The record's fields; a missing list means no fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldValue>>,
}

/// Interchange shape of a field: one of the two field value forms.
///
/// Which form a value parses as does not decide the field variant it
/// constructs; only its tag does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// The control field form (`tag` + `data`).
    Control(ControlFieldValue),
    /// The data field form (`tag` + optional `indicators`/`subfields`).
    Data(DataFieldValue),
}

impl FieldValue {
    /// The value's tag.
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            FieldValue::Control(value) => &value.tag,
            FieldValue::Data(value) => &value.tag,
        }
    }
}

/// Interchange shape of a control field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlFieldValue {
    /// Field tag.
    pub tag: String,
    /// The field's single data element.
    pub data: String,
}

/// Interchange shape of a data field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFieldValue {
    /// Field tag.
    pub tag: String,
    /// Indicators, compact or listed; missing means none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indicators: Option<IndicatorsValue>,
    /// Subfields, flat or listed; missing means none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subfields: Option<SubfieldsValue>,
}

/// Interchange shape of a subfield.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubfieldValue {
    /// Subfield code (single character).
    pub code: char,
    /// Subfield data.
    pub data: String,
}

/// The two interchange spellings of a data field's indicators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndicatorsValue {
    /// All indicators in one string, one per character.
    Compact(String),
    /// One single-character string per indicator.
    List(Vec<String>),
}

impl IndicatorsValue {
    /// Normalize to one `char` per indicator, in order.
    ///
    /// List elements are assumed single-character; only the first character
    /// of each is kept, and empty elements are skipped.
    pub(crate) fn into_indicators(self) -> SmallVec<[char; 2]> {
        match self {
            IndicatorsValue::Compact(s) => s.chars().collect(),
            IndicatorsValue::List(list) => {
                list.iter().filter_map(|s| s.chars().next()).collect()
            }
        }
    }
}

/// The two interchange spellings of a data field's subfields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubfieldsValue {
    /// A flat list of strings, alternating code and data.
    Flat(Vec<String>),
    /// One `{code, data}` object per subfield.
    Values(Vec<SubfieldValue>),
}

impl SubfieldsValue {
    /// Normalize to owned subfields, in order.
    ///
    /// The flat form is consumed two elements at a time; each pair's code is
    /// the first character of its first element. A trailing unpaired code
    /// yields a subfield with empty data.
    pub(crate) fn into_subfields(self) -> SmallVec<[Subfield; 4]> {
        match self {
            SubfieldsValue::Flat(list) => list
                .chunks(2)
                .filter_map(|pair| {
                    let code = pair.first().and_then(|code| code.chars().next())?;
                    let data = pair.get(1).cloned().unwrap_or_default();
                    Some(Subfield { code, data })
                })
                .collect(),
            SubfieldsValue::Values(list) => list.into_iter().map(Into::into).collect(),
        }
    }
}

// ============================================================================
// Value -> model conversions
// ============================================================================

impl From<SubfieldValue> for Subfield {
    fn from(value: SubfieldValue) -> Self {
        Subfield {
            code: value.code,
            data: value.data,
        }
    }
}

impl From<ControlFieldValue> for Field {
    fn from(value: ControlFieldValue) -> Self {
        if is_control_field_tag(&value.tag) {
            Field::Control(ControlField {
                tag: value.tag,
                data: value.data,
            })
        } else {
            // A data tag wins over the properties present; the stray data
            // element has nowhere to go and is dropped.
            Field::Data(DataField::new(value.tag))
        }
    }
}

impl From<DataFieldValue> for Field {
    fn from(value: DataFieldValue) -> Self {
        if is_control_field_tag(&value.tag) {
            Field::Control(ControlField {
                tag: value.tag,
                data: String::new(),
            })
        } else {
            Field::Data(DataField {
                tag: value.tag,
                indicators: value
                    .indicators
                    .map(IndicatorsValue::into_indicators)
                    .unwrap_or_default(),
                subfields: value
                    .subfields
                    .map(SubfieldsValue::into_subfields)
                    .unwrap_or_default(),
            })
        }
    }
}

impl From<FieldValue> for Field {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Control(value) => value.into(),
            FieldValue::Data(value) => value.into(),
        }
    }
}

impl From<RecordValue> for Record {
    fn from(value: RecordValue) -> Self {
        Record {
            leader: value.leader,
            id: value.id,
            record_type: value.record_type,
            fields: value
                .fields
                .map(|fields| fields.into_iter().map(Into::into).collect())
                .unwrap_or_default(),
        }
    }
}

// ============================================================================
// Explicit from_value factories
// ============================================================================

impl Subfield {
    /// Construct a subfield from its interchange value.
    #[must_use]
    pub fn from_value(value: SubfieldValue) -> Self {
        value.into()
    }
}

impl ControlField {
    /// Construct a control field from its interchange value.
    ///
    /// No tag classification happens here; the caller has already chosen
    /// the variant. Use [`Field::from_value`] to classify by tag shape.
    #[must_use]
    pub fn from_value(value: ControlFieldValue) -> Self {
        ControlField {
            tag: value.tag,
            data: value.data,
        }
    }
}

impl DataField {
    /// Construct a data field from its interchange value, normalizing the
    /// indicator and subfield shorthands.
    ///
    /// No tag classification happens here; the caller has already chosen
    /// the variant. Use [`Field::from_value`] to classify by tag shape.
    #[must_use]
    pub fn from_value(value: DataFieldValue) -> Self {
        DataField {
            tag: value.tag,
            indicators: value
                .indicators
                .map(IndicatorsValue::into_indicators)
                .unwrap_or_default(),
            subfields: value
                .subfields
                .map(SubfieldsValue::into_subfields)
                .unwrap_or_default(),
        }
    }
}

impl Field {
    /// Construct a field from an interchange value, selecting the variant
    /// by the tag-shape rule.
    ///
    /// A value with a control tag becomes a [`ControlField`] (a missing
    /// `data` element becomes the empty string); a value with a data tag
    /// becomes a [`DataField`] (a stray `data` element is dropped).
    #[must_use]
    pub fn from_value(value: FieldValue) -> Self {
        value.into()
    }
}

impl Record {
    /// Construct a record from its interchange value.
    ///
    /// Every field value is classified and normalized as in
    /// [`Field::from_value`]; a missing field list means no fields.
    #[must_use]
    pub fn from_value(value: RecordValue) -> Self {
        value.into()
    }
}
