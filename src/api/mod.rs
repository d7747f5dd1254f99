//! API handlers for Librarium REST endpoints

pub mod books;
pub mod borrowings;
pub mod health;
pub mod members;
pub mod openapi;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Confirmation body for delete operations
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
