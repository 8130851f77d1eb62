pub mod college;
pub mod department;
pub mod error;
pub mod page;
pub mod records;

// CSV row types
pub mod csv;
