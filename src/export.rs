//! Spreadsheet-friendly CSV snapshot of a client listing.

use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::Deserialize;
use thiserror::Error;

use crate::dates::format_date;
use crate::domain::client::Client;
use crate::domain::types::TypeConstraintError;

/// Header row, in column order.
pub const EXPORT_COLUMNS: [&str; 6] = ["id", "name", "company", "status", "value", "created_at"];

/// UTF-8 byte-order mark; spreadsheet tools need it to detect the encoding.
pub const BYTE_ORDER_MARK: &str = "\u{feff}";

pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to flush csv buffer: {0}")]
    Flush(String),
}

/// Single ASCII field separator.
///
/// Fields containing this character, a double quote or a line break are
/// quoted; all others are written verbatim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "char")]
pub struct ExportDelimiter(u8);

impl ExportDelimiter {
    pub const COMMA: ExportDelimiter = ExportDelimiter(b',');
    pub const SEMICOLON: ExportDelimiter = ExportDelimiter(b';');

    pub fn new(delimiter: char) -> Result<Self, TypeConstraintError> {
        match u8::try_from(delimiter) {
            Ok(byte) if byte.is_ascii() && !matches!(byte, b'"' | b'\r' | b'\n') => Ok(Self(byte)),
            _ => Err(TypeConstraintError::InvalidValue(format!(
                "unsupported export delimiter {delimiter:?}"
            ))),
        }
    }

    pub const fn as_byte(self) -> u8 {
        self.0
    }
}

impl Default for ExportDelimiter {
    fn default() -> Self {
        Self::COMMA
    }
}

impl TryFrom<char> for ExportDelimiter {
    type Error = TypeConstraintError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Serializes `clients` in the given order.
///
/// Output is deterministic: identical input always yields identical bytes.
/// Missing company and value are written as empty fields.
pub fn clients_to_csv(clients: &[Client], delimiter: ExportDelimiter) -> Result<Vec<u8>, ExportError> {
    let buffer = BYTE_ORDER_MARK.as_bytes().to_vec();
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter.as_byte())
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(buffer);

    writer.write_record(EXPORT_COLUMNS)?;
    for client in clients {
        writer.write_record([
            client.id.to_string(),
            client.name.to_string(),
            client
                .company
                .as_ref()
                .map(|c| c.to_string())
                .unwrap_or_default(),
            client.status.to_string(),
            format_value(client.value),
            client.created_at.format(TIMESTAMP_FORMAT).to_string(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|err| ExportError::Flush(err.error().to_string()))
}

fn format_value(value: Option<f64>) -> String {
    value
        .filter(|v| v.is_finite())
        .map(|v| v.to_string())
        .unwrap_or_default()
}

/// Suggested download name; the only place the bucketing date appears.
pub fn export_filename(today: NaiveDate) -> String {
    format!("clients_{}.csv", format_date(today))
}
