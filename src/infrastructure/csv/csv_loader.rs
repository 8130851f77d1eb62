// ============================================================
// CSV LOADER
// ============================================================
// Read header-row CSV files into rows; a missing file is an empty table

use std::borrow::Cow;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use encoding_rs::{UTF_8, WINDOWS_1252};
use tracing::{debug, warn};

use crate::domain::csv::{CsvField, CsvRow};
use crate::domain::error::{AppError, Result};

/// Comma-separated loader with encoding fallback
#[derive(Debug, Clone, Default)]
pub struct CsvLoader;

impl CsvLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load every row of the file at `path`.
    ///
    /// A file that does not exist yields no rows rather than an error.
    pub fn load(&self, path: &Path) -> Result<Vec<CsvRow>> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "CSV file not found, treating as empty");
                return Ok(Vec::new());
            }
            Err(err) => {
                return Err(AppError::IoError(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    err
                )))
            }
        };

        let content = decode(&bytes, path);
        self.parse_content(&content).map_err(|err| match err {
            AppError::ParseError(msg) => {
                AppError::ParseError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Load the file and convert each row into a typed record.
    pub fn load_as<T: From<CsvRow>>(&self, path: &Path) -> Result<Vec<T>> {
        Ok(self.load(path)?.into_iter().map(T::from).collect())
    }

    /// Parse CSV content from string
    pub fn parse_content(&self, content: &str) -> Result<Vec<CsvRow>> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::Headers)
            .flexible(true) // Allow rows with different lengths
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .clone();

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;
            rows.push(parse_row(index, &headers, &record));
        }

        Ok(rows)
    }
}

/// Pair header names with values; short rows simply lack the trailing columns.
fn parse_row(index: usize, headers: &StringRecord, record: &StringRecord) -> CsvRow {
    let fields = headers
        .iter()
        .zip(record.iter())
        .map(|(header, value)| CsvField::new(header, value))
        .collect();
    CsvRow::new(index, fields)
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

fn decode<'a>(bytes: &'a [u8], path: &Path) -> Cow<'a, str> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let (content, had_errors) = UTF_8.decode_without_bom_handling(bytes);
    if !had_errors {
        return content;
    }

    warn!(
        path = %path.display(),
        "CSV file is not valid UTF-8, decoding as Windows-1252"
    );
    let (content, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
    content
}
