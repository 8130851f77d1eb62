pub mod use_cases;

pub use use_cases::site_pages::SitePagesUseCase;
