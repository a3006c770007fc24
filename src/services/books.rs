//! Book information business rules

use tracing::Span;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{BookInformationDisplay, BookInformationInput, NewBookInformation},
    repository::DynBookInformationRepository,
};

/// Result of a delete request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound { reason: String },
}

#[derive(Clone)]
pub struct BookInformationService {
    repository: DynBookInformationRepository,
    /// Every event this service emits is parented to this span
    log: Span,
}

impl BookInformationService {
    pub fn new(repository: DynBookInformationRepository, log: Span) -> Self {
        Self { repository, log }
    }

    /// All books in display shape. An empty vec means there are none.
    pub async fn list_books(&self) -> AppResult<Vec<BookInformationDisplay>> {
        let books = self.repository.list_all().await?;
        tracing::debug!(parent: &self.log, count = books.len(), "Listed book informations");
        Ok(books.into_iter().map(Into::into).collect())
    }

    pub async fn get_book(&self, id: i32) -> AppResult<Option<BookInformationDisplay>> {
        Ok(self.repository.get_by_id(id).await?.map(Into::into))
    }

    /// Create a book whose available count starts equal to its stock
    pub async fn create_book(
        &self,
        input: BookInformationInput,
    ) -> AppResult<BookInformationDisplay> {
        input.validate()?;

        let new = NewBookInformation::from(input);
        let created = self.repository.create(&new).await?;

        tracing::info!(
            parent: &self.log,
            book_id = created.id,
            title = %created.title,
            stock = created.stock,
            "Created book information"
        );
        Ok(created.into())
    }

    /// Replace title and stock of an existing book.
    ///
    /// `available` keeps its stored value, so it can end up above `stock`
    /// when stock is lowered. That case is logged, not corrected.
    pub async fn update_book(
        &self,
        id: i32,
        input: BookInformationInput,
    ) -> AppResult<Option<BookInformationDisplay>> {
        input.validate()?;

        let Some(mut book) = self.repository.get_by_id(id).await? else {
            return Ok(None);
        };

        book.apply_input(input);
        if book.available > book.stock {
            tracing::warn!(
                parent: &self.log,
                book_id = id,
                stock = book.stock,
                available = book.available,
                "Available count exceeds stock after update"
            );
        }

        let updated = match self.repository.update(&book).await {
            Ok(updated) => updated,
            // Deleted between the read and the write
            Err(AppError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(e),
        };

        tracing::info!(parent: &self.log, book_id = id, "Updated book information");
        Ok(Some(updated.into()))
    }

    pub async fn delete_book(&self, id: i32) -> AppResult<DeleteOutcome> {
        let not_found = || DeleteOutcome::NotFound {
            reason: "Book info not found".to_string(),
        };

        let Some(book) = self.repository.get_by_id(id).await? else {
            return Ok(not_found());
        };

        match self.repository.delete(&book).await {
            Ok(()) => {
                tracing::info!(parent: &self.log, book_id = id, "Deleted book information");
                Ok(DeleteOutcome::Deleted)
            }
            Err(AppError::NotFound(_)) => Ok(not_found()),
            Err(e) => Err(e),
        }
    }

    /// Case-insensitive title substring search
    pub async fn search_books(&self, term: &str) -> AppResult<Vec<BookInformationDisplay>> {
        if term.is_empty() {
            return Err(AppError::Validation("Please enter search data".to_string()));
        }

        let books = self.repository.search(term).await?;
        tracing::debug!(parent: &self.log, term, count = books.len(), "Searched book informations");
        Ok(books.into_iter().map(Into::into).collect())
    }

    /// Readiness probe: storage must answer
    pub async fn check_ready(&self) -> AppResult<()> {
        self.repository
            .ping()
            .await
            .map_err(|e| AppError::Unavailable(e.to_string()))
    }
}
