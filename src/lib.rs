//! Librarium Library Management System
//!
//! A Rust implementation of the Librarium library management application:
//! a REST JSON API for books, members and borrowings, plus the client-side
//! core any front end needs — declarative field validation, a form
//! validation controller, a toast notification queue and a classified-error
//! HTTP client.

use std::sync::Arc;

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod models;
pub mod notify;
pub mod repository;
pub mod services;
pub mod validation;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
