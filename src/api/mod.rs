//! API handlers for the book information REST endpoints

pub mod books;
pub mod health;
pub mod openapi;

use std::any::Any;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Json, Path, RawPathParams, Request},
    http::{
        header::{HeaderName, HeaderValue, ACCEPT},
        request::Parts,
    },
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::{de::DeserializeOwned, Deserialize};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::version::{media_type_version, ApiVersion, PathVersion},
    AppState,
};

/// Response header listing every served minor version
pub const SUPPORTED_VERSIONS_HEADER: &str = "api-supported-versions";

/// Build the application router with all routes
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    let book_information = Router::new()
        .route("/", get(books::list_books).post(books::create_book))
        .route("/search", get(books::search_books))
        .route(
            "/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static(SUPPORTED_VERSIONS_HEADER),
            HeaderValue::from_static(ApiVersion::SUPPORTED_HEADER),
        ));

    let mut app = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest("/:version/BookInformation", book_information)
        .with_state(state.clone());

    if state.config.server.swagger {
        app = app.merge(openapi::create_openapi_router());
    }

    app.layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// A panicking handler is answered like any other unexpected fault
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    AppError::Internal(format!("handler panicked: {}", detail)).into_response()
}

/// Pick the API version from the `v{version}` path segment and the `ver`
/// media-type parameter of `Accept`.
///
/// A path naming only the major version defers to the header; with neither
/// naming a minor version the default applies.
pub fn resolve_version(path: Option<&str>, accept_ver: Option<&str>) -> AppResult<ApiVersion> {
    let unsupported =
        |v: &str| AppError::UnsupportedVersion(format!("The API version '{}' is not supported", v));

    let from_path = path
        .map(|p| p.parse::<PathVersion>().map_err(|_| unsupported(p)))
        .transpose()?;
    let from_header = accept_ver
        .map(|v| v.parse::<ApiVersion>().map_err(|_| unsupported(v)))
        .transpose()?;

    match (from_path, from_header) {
        (Some(PathVersion::Exact(p)), Some(h)) if p != h => Err(AppError::UnsupportedVersion(
            format!("The API version in the path ({}) does not match the requested version ({})", p, h),
        )),
        (Some(PathVersion::Exact(p)), _) => Ok(p),
        (_, Some(h)) => Ok(h),
        _ => Ok(ApiVersion::DEFAULT),
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ApiVersion
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let params = RawPathParams::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        let segment = params
            .iter()
            .find(|(name, _)| *name == "version")
            .map(|(_, value)| value.to_string());

        let accept_ver = parts
            .headers
            .get_all(ACCEPT)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(|value| media_type_version(value).map(str::to_string));

        resolve_version(segment.as_deref(), accept_ver.as_deref())
    }
}

/// Integer book id from the `{id}` path segment
pub struct BookId(pub i32);

#[derive(Deserialize)]
struct BookIdParams {
    id: i32,
}

#[async_trait]
impl<S> FromRequestParts<S> for BookId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(params) = Path::<BookIdParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        Ok(BookId(params.id))
    }
}

/// JSON body that must deserialize and pass `validator` rules
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await.map_err(|e| {
            tracing::debug!(error = %e.body_text(), "Rejected request body");
            AppError::BadRequest("Invalid book data".to_string())
        })?;

        data.validate()?;
        Ok(ValidatedJson(data))
    }
}
