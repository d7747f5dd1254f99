//! HTTP client for the Librarium REST API.
//!
//! Every request goes through a single send path that classifies failures:
//! a transport failure before any response becomes a `Network` error with a
//! fixed message, a non-success status becomes an `Http` error carrying the
//! server's `error`/`message` payload, and an unparsable success body is
//! surfaced as a `Parse` error rather than swallowed. The wrapper performs
//! no retries and enforces no timeouts; every failure reaches the caller
//! exactly once.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::api::MessageResponse;
use crate::models::{
    Book, BorrowingDetails, CreateBook, CreateBorrowing, CreateMember, Member, ReturnBorrowing,
    UpdateBook, UpdateMember,
};

/// Fixed message for transport-level failures; the low-level detail from the
/// transport is discarded.
pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error: unable to reach the server. Please check your connection.";

/// Classified request failure
#[derive(Error, Debug)]
pub enum ApiError {
    /// The server responded with a failure status
    #[error("{message}")]
    Http {
        status: u16,
        message: String,
        details: Option<Value>,
    },
    /// The request failed before any response was received
    #[error("{message}")]
    Network { message: String },
    /// A success response carried a body that did not parse
    #[error("{message}")]
    Parse { message: String },
}

impl ApiError {
    /// HTTP status code, present only for `Http` errors
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// User-facing message tailored by status code, suitable for a toast
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http { status, .. } => match status {
                400 => "Invalid data provided. Please check your input.".to_string(),
                404 => "The requested resource was not found.".to_string(),
                409 => "This record already exists or conflicts with another.".to_string(),
                _ => "Something went wrong. Please try again.".to_string(),
            },
            ApiError::Network { message } => message.clone(),
            ApiError::Parse { .. } => "Something went wrong. Please try again.".to_string(),
        }
    }
}

/// Typed client for the Librarium REST endpoints
#[derive(Debug, Clone)]
pub struct LibraryClient {
    base_url: String,
    headers: HeaderMap,
    http: reqwest::Client,
}

impl LibraryClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_headers(base_url, HeaderMap::new())
    }

    /// Build a client with extra default headers. The JSON content type is
    /// always present unless the caller explicitly supplies their own.
    pub fn with_headers(base_url: impl Into<String>, extra: HeaderMap) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in extra.iter() {
            headers.insert(name, value.clone());
        }

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            base_url,
            headers,
            http: reqwest::Client::new(),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
            .headers(self.headers.clone())
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await.map_err(|_| ApiError::Network {
            message: NETWORK_ERROR_MESSAGE.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            let status_text = status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string();
            let body = response.text().await.unwrap_or_default();
            return Err(match serde_json::from_str::<Value>(&body) {
                Ok(details) => {
                    let message = details
                        .get("error")
                        .and_then(Value::as_str)
                        .or_else(|| details.get("message").and_then(Value::as_str))
                        .map(str::to_string)
                        .unwrap_or(status_text);
                    ApiError::Http {
                        status: status.as_u16(),
                        message,
                        details: Some(details),
                    }
                }
                Err(_) => ApiError::Http {
                    status: status.as_u16(),
                    message: status_text,
                    details: None,
                },
            });
        }

        response.json::<T>().await.map_err(|e| ApiError::Parse {
            message: format!("Failed to parse server response: {}", e),
        })
    }

    // --- Books ---

    pub async fn list_books(&self) -> Result<Vec<Book>, ApiError> {
        self.send(self.request(Method::GET, "/books")).await
    }

    pub async fn get_book(&self, id: i32) -> Result<Book, ApiError> {
        self.send(self.request(Method::GET, &format!("/books/{}", id)))
            .await
    }

    pub async fn create_book(&self, book: &CreateBook) -> Result<Book, ApiError> {
        self.send_json(Method::POST, "/books", book).await
    }

    pub async fn update_book(&self, id: i32, book: &UpdateBook) -> Result<Book, ApiError> {
        self.send_json(Method::PUT, &format!("/books/{}", id), book)
            .await
    }

    pub async fn delete_book(&self, id: i32) -> Result<MessageResponse, ApiError> {
        self.send(self.request(Method::DELETE, &format!("/books/{}", id)))
            .await
    }

    // --- Members ---

    pub async fn list_members(&self) -> Result<Vec<Member>, ApiError> {
        self.send(self.request(Method::GET, "/members")).await
    }

    pub async fn get_member(&self, id: i32) -> Result<Member, ApiError> {
        self.send(self.request(Method::GET, &format!("/members/{}", id)))
            .await
    }

    pub async fn create_member(&self, member: &CreateMember) -> Result<Member, ApiError> {
        self.send_json(Method::POST, "/members", member).await
    }

    pub async fn update_member(&self, id: i32, member: &UpdateMember) -> Result<Member, ApiError> {
        self.send_json(Method::PUT, &format!("/members/{}", id), member)
            .await
    }

    pub async fn delete_member(&self, id: i32) -> Result<MessageResponse, ApiError> {
        self.send(self.request(Method::DELETE, &format!("/members/{}", id)))
            .await
    }

    // --- Borrowings ---

    pub async fn list_borrowings(&self) -> Result<Vec<BorrowingDetails>, ApiError> {
        self.send(self.request(Method::GET, "/borrowings")).await
    }

    pub async fn create_borrowing(
        &self,
        borrowing: &CreateBorrowing,
    ) -> Result<BorrowingDetails, ApiError> {
        self.send_json(Method::POST, "/borrowings", borrowing).await
    }

    pub async fn return_book(
        &self,
        request: &ReturnBorrowing,
    ) -> Result<BorrowingDetails, ApiError> {
        self.send_json(Method::POST, "/borrowings/return", request)
            .await
    }

    pub async fn member_borrowings(
        &self,
        member_id: i32,
    ) -> Result<Vec<BorrowingDetails>, ApiError> {
        self.send(self.request(Method::GET, &format!("/borrowings/member/{}", member_id)))
            .await
    }

    async fn send_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self
            .http
            .request(method, format!("{}{}", self.base_url, path))
            .json(body)
            .headers(self.headers.clone());
        self.send(request).await
    }
}
