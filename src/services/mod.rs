//! Business logic services

pub mod books;

use crate::repository::DynBookInformationRepository;

pub use books::{BookInformationService, DeleteOutcome};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: BookInformationService,
}

impl Services {
    /// Create all services on top of the given repository
    pub fn new(repository: DynBookInformationRepository) -> Self {
        Self {
            books: BookInformationService::new(
                repository,
                tracing::info_span!("book_information_service"),
            ),
        }
    }
}
