//! Data models for the book information service

pub mod book;
pub mod version;

// Re-export commonly used types
pub use book::{BookInformation, BookInformationDisplay, BookInformationInput, NewBookInformation};
pub use version::ApiVersion;
