//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Book Information API",
        version = "2.1.0",
        description = "Book information inventory service. Minor versions 2.0 and 2.1 are \
                       selected by the path segment (v2.0, v2.1) or by the `ver` media-type \
                       parameter, e.g. `Accept: application/json; ver=2.1`."
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Book information
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        books::search_books,
    ),
    components(
        schemas(
            crate::models::book::BookInformationInput,
            crate::models::book::BookInformationDisplay,
            crate::models::version::ApiVersion,
            books::MessageResponse,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "book-information", description = "Book information management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
