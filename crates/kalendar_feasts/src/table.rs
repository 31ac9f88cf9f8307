//! Reading and writing tab- or comma-separated record files.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use csv::{QuoteStyle, ReaderBuilder, StringRecord, WriterBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::FeastError;
use crate::record::{FeastRecord, format_flag, parse_flag};

/// Column order used when writing.
pub const COLUMNS: [&str; 7] = [
    "date",
    "feast_name",
    "description",
    "show_fish",
    "show_oil",
    "show_strict_fast",
    "moon_phase",
];

/// Field separator for record files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Delimiter {
    /// Tab for `.tsv`/`.tab` files, comma otherwise.
    #[default]
    Auto,
    Comma,
    Tab,
}

impl Delimiter {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Comma => "comma",
            Self::Tab => "tab",
        }
    }

    /// The separator byte, resolving `Auto` against an optional path.
    pub fn byte_for(self, path: Option<&Path>) -> u8 {
        match self {
            Self::Comma => b',',
            Self::Tab => b'\t',
            Self::Auto => {
                let ext = path
                    .and_then(Path::extension)
                    .and_then(|e| e.to_str())
                    .map(str::to_ascii_lowercase);
                match ext.as_deref() {
                    Some("tsv" | "tab") => b'\t',
                    _ => b',',
                }
            }
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Delimiter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "comma" | "," | "csv" => Ok(Self::Comma),
            "tab" | "\\t" | "tsv" => Ok(Self::Tab),
            other => Err(format!("unknown delimiter '{other}' (auto, comma, tab)")),
        }
    }
}

/// Options for [`write_records`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteOptions {
    pub delimiter: Delimiter,
    /// Quote every field instead of only those that need it.
    pub quote_all: bool,
    /// Emit the `moon_phase` column.
    pub moon_column: bool,
}

/// Records read from a file, plus whether it carried a phase column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeastTable {
    pub records: Vec<FeastRecord>,
    pub has_moon_column: bool,
}

/// Read a whole file as UTF-8, dropping a leading byte-order mark.
pub fn read_text_file(path: &Path) -> Result<String, FeastError> {
    let bytes = fs::read(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            FeastError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            FeastError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    let text = String::from_utf8(bytes).map_err(|_| FeastError::Encoding {
        path: path.to_path_buf(),
    })?;
    Ok(match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text,
    })
}

/// Read a record file.
pub fn read_records(path: &Path, delimiter: Delimiter) -> Result<FeastTable, FeastError> {
    let text = read_text_file(path)?;
    let table = parse_records(&text, delimiter.byte_for(Some(path)))?;
    debug!(path = %path.display(), rows = table.records.len(), "read record file");
    Ok(table)
}

/// Parse record-file text with an explicit separator byte.
pub fn parse_records(text: &str, delimiter: u8) -> Result<FeastTable, FeastError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(text.as_bytes());

    let columns = Columns::locate(reader.headers()?)?;
    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        records.push(columns.record(&row));
    }

    Ok(FeastTable {
        records,
        has_moon_column: columns.moon_phase.is_some(),
    })
}

/// Write records to a file, creating or truncating it.
pub fn write_records(
    path: &Path,
    records: &[FeastRecord],
    options: &WriteOptions,
) -> Result<(), FeastError> {
    let file = File::create(path).map_err(|source| FeastError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let delimiter = options.delimiter.byte_for(Some(path));
    write_records_to(BufWriter::new(file), records, delimiter, options)?;
    debug!(path = %path.display(), rows = records.len(), "wrote record file");
    Ok(())
}

/// Write records to any writer with an explicit separator byte.
pub fn write_records_to<W: Write>(
    writer: W,
    records: &[FeastRecord],
    delimiter: u8,
    options: &WriteOptions,
) -> Result<(), FeastError> {
    let quote_style = if options.quote_all {
        QuoteStyle::Always
    } else {
        QuoteStyle::Necessary
    };
    let mut out = WriterBuilder::new()
        .delimiter(delimiter)
        .quote_style(quote_style)
        .from_writer(writer);

    let width = if options.moon_column { 7 } else { 6 };
    out.write_record(&COLUMNS[..width])?;

    for r in records {
        let phase = r.moon_phase.map(|p| p.to_string()).unwrap_or_default();
        let row = [
            r.date.as_str(),
            r.feast_name.as_str(),
            r.description.as_str(),
            format_flag(r.show_fish),
            format_flag(r.show_oil),
            format_flag(r.show_strict_fast),
            phase.as_str(),
        ];
        out.write_record(&row[..width])?;
    }
    out.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Header positions, matched case-insensitively.
#[derive(Debug, Clone, Copy)]
struct Columns {
    date: usize,
    feast_name: Option<usize>,
    description: Option<usize>,
    show_fish: Option<usize>,
    show_oil: Option<usize>,
    show_strict_fast: Option<usize>,
    moon_phase: Option<usize>,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self, FeastError> {
        let names: Vec<String> = headers
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_lowercase())
            .collect();
        let find = |aliases: &[&str]| names.iter().position(|n| aliases.contains(&n.as_str()));

        let date = find(&["date"]).ok_or(FeastError::MissingColumn { column: "date" })?;
        Ok(Self {
            date,
            feast_name: find(&["feast_name", "name"]),
            description: find(&["description"]),
            show_fish: find(&["show_fish"]),
            show_oil: find(&["show_oil"]),
            show_strict_fast: find(&["show_strict_fast"]),
            moon_phase: find(&["moon_phase"]),
        })
    }

    fn record(&self, row: &StringRecord) -> FeastRecord {
        let cell = |idx: Option<usize>| idx.and_then(|i| row.get(i)).unwrap_or("");
        let date = cell(Some(self.date)).trim().to_string();
        let moon_phase = parse_phase(cell(self.moon_phase), &date);
        FeastRecord {
            feast_name: cell(self.feast_name).trim().to_string(),
            description: cell(self.description).trim().to_string(),
            show_fish: parse_flag(cell(self.show_fish)),
            show_oil: parse_flag(cell(self.show_oil)),
            show_strict_fast: parse_flag(cell(self.show_strict_fast)),
            moon_phase,
            date,
        }
    }
}

fn parse_phase(cell: &str, date: &str) -> Option<i8> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    match cell.parse::<i8>() {
        Ok(code) => Some(code),
        Err(_) => {
            warn!(date, value = cell, "ignoring unreadable moon_phase");
            None
        }
    }
}
