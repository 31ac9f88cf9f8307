//! Feast records and the file pipelines around them.
//!
//! This crate provides:
//! - [`FeastRecord`], one calendar day and its flags
//! - Record-file I/O ([`read_records`], [`write_records`]) with lenient
//!   parsing of headers and booleans
//! - [`TextParser`] for the raw Bulgarian calendar text
//! - Pipelines: [`apply_fasts`], [`annotate_moon`], [`Summary`]
//! - Month export ([`month_json`])

pub mod error;
pub mod month;
pub mod pipeline;
pub mod record;
pub mod table;
pub mod text;

pub use error::FeastError;
pub use month::{month_json, records_for_month};
pub use pipeline::{FastReport, MoonReport, Summary, annotate_moon, apply_fasts};
pub use record::{FeastRecord, format_flag, parse_flag};
pub use table::{
    COLUMNS, Delimiter, FeastTable, WriteOptions, parse_records, read_records, read_text_file,
    write_records, write_records_to,
};
pub use text::{DEFAULT_YEAR, MONTH_NAMES, TextParser, clean_feast_name, month_of_line};
