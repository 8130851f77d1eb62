// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// Loading flat CSV data files from disk

mod csv_loader;

pub use csv_loader::CsvLoader;
