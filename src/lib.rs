//! Book Information Service
//!
//! Inventory of book records (title, stock, available) behind a versioned
//! REST JSON API. Requests flow through three layers:
//!
//! - [`api`]: HTTP handlers per API minor version, status mapping and fault containment
//! - [`services`]: business rules and shape mapping
//! - [`repository`]: storage access, Postgres or in-memory

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use repository::DynBookInformationRepository;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    pub fn new(config: AppConfig, repository: DynBookInformationRepository) -> Self {
        Self {
            config: Arc::new(config),
            services: Arc::new(services::Services::new(repository)),
        }
    }
}
