// ============================================================
// CSV ROW TYPES
// ============================================================
// One row of a header-row CSV file, keyed by column name

/// A single field in a CSV row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvField {
    /// Column name (header)
    pub name: String,

    /// Raw cell value
    pub value: String,
}

impl CsvField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A single row in a CSV file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvRow {
    /// Row index (0-based, header excluded)
    pub index: usize,

    /// Fields in header order. Columns missing from a short row are absent.
    pub fields: Vec<CsvField>,
}

impl CsvRow {
    pub fn new(index: usize, fields: Vec<CsvField>) -> Self {
        Self { index, fields }
    }

    /// Raw value of `column`, if the row has it.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == column)
            .map(|f| f.value.as_str())
    }

    /// Trimmed value of `column`; blank cells count as missing.
    pub fn get_trimmed(&self, column: &str) -> Option<&str> {
        self.get(column)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// Trimmed owned value of `column`; blank cells count as missing.
    pub fn get_owned(&self, column: &str) -> Option<String> {
        self.get_trimmed(column).map(str::to_string)
    }
}
