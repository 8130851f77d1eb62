pub mod site_pages;
pub mod staff_directory;
