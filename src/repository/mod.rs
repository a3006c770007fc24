//! Repository layer for book information storage
//!
//! [`BookInformationRepository`] is the only path to entity storage. Two
//! implementations fulfil it: [`PgBookInformationRepository`] over a Postgres
//! pool and [`InMemoryBookInformationRepository`] for development and tests.

pub mod books;
pub mod memory;

use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::book::{BookInformation, NewBookInformation},
};

pub use books::PgBookInformationRepository;
pub use memory::InMemoryBookInformationRepository;

/// Persistence operations over the book information table
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookInformationRepository: Send + Sync {
    /// All records in storage order; empty when the table is empty
    async fn list_all(&self) -> AppResult<Vec<BookInformation>>;

    /// Record with the given id, if any
    async fn get_by_id(&self, id: i32) -> AppResult<Option<BookInformation>>;

    /// Records whose title contains `term`, ignoring case.
    /// Callers reject empty terms before reaching this layer.
    async fn search(&self, term: &str) -> AppResult<Vec<BookInformation>>;

    /// Insert a record. Fails with `Conflict` when the title is taken.
    async fn create(&self, book: &NewBookInformation) -> AppResult<BookInformation>;

    /// Overwrite the record with `book.id`. Fails with `NotFound` when absent.
    async fn update(&self, book: &BookInformation) -> AppResult<BookInformation>;

    /// Remove the record with `book.id`. Fails with `NotFound` when absent.
    async fn delete(&self, book: &BookInformation) -> AppResult<()>;

    /// Check that storage is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// Shared handle to whichever store backs the service
pub type DynBookInformationRepository = Arc<dyn BookInformationRepository>;
