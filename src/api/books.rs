//! Book information endpoints
//!
//! One handler family serves every minor version of the v2 API; the resolved
//! [`ApiVersion`] is passed in so versions can diverge where behavior differs.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{BookInformationDisplay, BookInformationInput},
        version::ApiVersion,
    },
    services::DeleteOutcome,
    AppState,
};

use super::{BookId, ValidatedJson};

/// Plain confirmation message
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Search query parameters
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-insensitive substring of the title
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
}

/// Get all book informations
#[utoipa::path(
    get,
    path = "/{version}/BookInformation",
    tag = "book-information",
    params(("version" = String, Path, description = "API version segment: v2, v2.0 or v2.1")),
    responses(
        (status = 200, description = "Book informations", body = Vec<BookInformationDisplay>),
        (status = 404, description = "Book Informations not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    version: ApiVersion,
) -> AppResult<Json<Vec<BookInformationDisplay>>> {
    let books = match version {
        ApiVersion::V2_0 | ApiVersion::V2_1 => state.services.books.list_books().await?,
    };

    if books.is_empty() {
        return Err(AppError::NotFound("Book Informations not found".to_string()));
    }

    tracing::debug!(%version, count = books.len(), "Listing book informations");
    Ok(Json(books))
}

/// Get a book information by ID
#[utoipa::path(
    get,
    path = "/{version}/BookInformation/{id}",
    tag = "book-information",
    params(
        ("version" = String, Path, description = "API version segment"),
        ("id" = i32, Path, description = "Book information ID")
    ),
    responses(
        (status = 200, description = "Book information", body = BookInformationDisplay),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    _version: ApiVersion,
    BookId(id): BookId,
) -> AppResult<Json<BookInformationDisplay>> {
    state
        .services
        .books
        .get_book(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
}

/// Create a new book information
#[utoipa::path(
    post,
    path = "/{version}/BookInformation",
    tag = "book-information",
    params(("version" = String, Path, description = "API version segment")),
    request_body = BookInformationInput,
    responses(
        (status = 200, description = "Book information created", body = BookInformationDisplay),
        (status = 400, description = "Invalid book data or duplicate title", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    _version: ApiVersion,
    ValidatedJson(input): ValidatedJson<BookInformationInput>,
) -> AppResult<Json<BookInformationDisplay>> {
    let created = state.services.books.create_book(input).await.map_err(|e| match e {
        AppError::Conflict(msg) => {
            AppError::Conflict(format!("Book information is not created. {}", msg))
        }
        other => other,
    })?;
    Ok(Json(created))
}

/// Update a book information by ID
#[utoipa::path(
    put,
    path = "/{version}/BookInformation/{id}",
    tag = "book-information",
    params(
        ("version" = String, Path, description = "API version segment"),
        ("id" = i32, Path, description = "Book information ID")
    ),
    request_body = BookInformationInput,
    responses(
        (status = 200, description = "Book information updated", body = BookInformationDisplay),
        (status = 400, description = "Invalid book information data", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    _version: ApiVersion,
    BookId(id): BookId,
    ValidatedJson(input): ValidatedJson<BookInformationInput>,
) -> AppResult<Json<BookInformationDisplay>> {
    state
        .services
        .books
        .update_book(id, input)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
}

/// Delete a book information by ID
#[utoipa::path(
    delete,
    path = "/{version}/BookInformation/{id}",
    tag = "book-information",
    params(
        ("version" = String, Path, description = "API version segment"),
        ("id" = i32, Path, description = "Book information ID")
    ),
    responses(
        (status = 200, description = "Book information deleted", body = MessageResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    _version: ApiVersion,
    BookId(id): BookId,
) -> AppResult<Json<MessageResponse>> {
    match state.services.books.delete_book(id).await? {
        DeleteOutcome::Deleted => Ok(Json(MessageResponse {
            message: "Successfully deleted the book information".to_string(),
        })),
        DeleteOutcome::NotFound { reason } => Err(AppError::NotFound(reason)),
    }
}

/// Search book informations by title
#[utoipa::path(
    get,
    path = "/{version}/BookInformation/search",
    tag = "book-information",
    params(
        ("version" = String, Path, description = "API version segment"),
        SearchQuery
    ),
    responses(
        (status = 200, description = "Matching book informations", body = Vec<BookInformationDisplay>),
        (status = 400, description = "Please enter search data", body = crate::error::ErrorResponse),
        (status = 404, description = "No book informations found matching the search term", body = crate::error::ErrorResponse)
    )
)]
pub async fn search_books(
    State(state): State<AppState>,
    _version: ApiVersion,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<BookInformationDisplay>>> {
    let term = query.search_term.unwrap_or_default();
    if term.is_empty() {
        return Err(AppError::Validation("Please enter search data".to_string()));
    }

    let books = state.services.books.search_books(&term).await?;
    if books.is_empty() {
        return Err(AppError::NotFound(
            "No book informations found matching the search term".to_string(),
        ));
    }
    Ok(Json(books))
}
