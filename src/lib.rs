#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # MROM: MARC Record Object Model
//!
//! An in-memory object model for MARC bibliographic records: a record is a
//! leader plus an ordered collection of tagged fields, and a data field
//! further contains ordered indicators and coded subfields.
//!
//! This crate is the consumer-facing core of a larger ecosystem. Wire-format
//! readers and writers (MARCXML, ISO 2709, JSON transports) live elsewhere
//! and talk to this model through the plain interchange shapes in [`value`].
//!
//! ## Quick Start
//!
//! ### Building records
//!
//! ```ignore
//! use mrom::{ControlField, DataField, Record};
//!
//! let mut record = Record::new("02259cam a2200457 a 4500");
//! record.add([ControlField::new("001", "12345")]);
//! record.add([DataField::builder("245")
//!     .indicators("10")
//!     .subfield('a', "The Great Gatsby /")
//!     .subfield('c', "F. Scott Fitzgerald.")
//!     .build()]);
//! ```
//!
//! ### Querying fields and subfields
//!
//! ```ignore
//! use mrom::Criterion;
//!
//! // Criteria are literal strings or regex patterns.
//! let subjects = [Criterion::pattern("^6[0-9]{2}")?];
//! for field in record.each(&subjects) {
//!     if let Some(data_field) = field.as_data_field() {
//!         println!("{}: {}", data_field.tag, data_field.value());
//!     }
//! }
//! ```
//!
//! ### Constructing from interchange values
//!
//! ```ignore
//! use mrom::{Record, RecordValue};
//!
//! let value: RecordValue = serde_json::from_str(input)?;
//! let record = Record::from_value(value);
//! ```
//!
//! ## Modules
//!
//! - [`record`] — `Record`, its field operations, `RecordType`, `SortMode`
//! - [`field`] — `Field` (control/data union), `ControlField`, `DataField`
//! - [`subfield`] — `Subfield`
//! - [`criterion`] — `Criterion` matching argument for all queries
//! - [`value`] — plain interchange shapes and their normalization
//! - [`error`] — error types and result type

pub mod criterion;
pub mod error;
pub mod field;
pub mod record;
pub mod subfield;
/// Plain interchange shapes (`RecordValue`, `FieldValue`, …) and their
/// normalizing conversions into model types.
pub mod value;

pub use criterion::Criterion;
pub use error::{MarcError, Result};
pub use field::{is_control_field_tag, ControlField, DataField, DataFieldBuilder, Field};
pub use record::{Record, RecordBuilder, RecordType, SortMode};
pub use subfield::Subfield;
pub use value::{
    ControlFieldValue, DataFieldValue, FieldValue, IndicatorsValue, RecordValue, SubfieldValue,
    SubfieldsValue,
};
