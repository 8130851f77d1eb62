// ============================================================
// CSV DOMAIN LAYER
// ============================================================
// Row types for header-row CSV data
// No I/O, no async

mod csv_row;

pub use csv_row::{CsvField, CsvRow};
