//! API integration tests
//!
//! Run against a live server with: cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080";

async fn create_test_book(client: &Client, title: &str, isbn: &str) -> i64 {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": title,
            "author": "Test Author",
            "isbn": isbn
        }))
        .send()
        .await
        .expect("Failed to send create book request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No book ID")
}

async fn create_test_member(client: &Client, name: &str, email: &str) -> i64 {
    let response = client
        .post(format!("{}/members", BASE_URL))
        .json(&json!({
            "name": name,
            "email": email
        }))
        .send()
        .await
        .expect("Failed to send create member request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No member ID")
}

async fn delete_book(client: &Client, id: i64) {
    client
        .delete(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send delete request");
}

async fn delete_member(client: &Client, id: i64) {
    client
        .delete(format!("{}/members/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send delete request");
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_list_books() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.is_array());
}

#[tokio::test]
#[ignore]
async fn test_create_get_and_delete_book() {
    let client = Client::new();
    let book_id = create_test_book(&client, "The Pragmatic Programmer", "978-0201616224").await;

    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["title"], "The Pragmatic Programmer");
    // ISBN is stored normalized
    assert_eq!(body["isbn"], "9780201616224");

    delete_book(&client, book_id).await;

    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_create_book_with_empty_title_fails() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "",
            "author": "Somebody",
            "isbn": null
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
#[ignore]
async fn test_create_book_with_bad_check_digit_fails() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "Imaginary Book",
            "author": "Nobody",
            "isbn": "978-0132350885"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Invalid ISBN-13 check digit");
}

#[tokio::test]
#[ignore]
async fn test_duplicate_isbn_conflicts() {
    let client = Client::new();
    let book_id = create_test_book(&client, "Refactoring", "978-0134757599").await;

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "Refactoring (copy)",
            "author": "Martin Fowler",
            "isbn": "9780134757599"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["code"], "RESOURCE_ALREADY_EXISTS");

    delete_book(&client, book_id).await;
}

#[tokio::test]
#[ignore]
async fn test_duplicate_member_email_conflicts() {
    let client = Client::new();
    let member_id = create_test_member(&client, "Ada Lovelace", "ada@example.org").await;

    // Same address, different case
    let response = client
        .post(format!("{}/members", BASE_URL))
        .json(&json!({
            "name": "Ada L.",
            "email": "ADA@example.org"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);

    delete_member(&client, member_id).await;
}

#[tokio::test]
#[ignore]
async fn test_borrow_and_return_flow() {
    let client = Client::new();
    let book_id = create_test_book(&client, "Domain-Driven Design", "978-0321125217").await;
    let member_id = create_test_member(&client, "Grace Hopper", "grace@example.org").await;

    // Borrow the book
    let response = client
        .post(format!("{}/borrowings", BASE_URL))
        .json(&json!({
            "book_id": book_id,
            "member_id": member_id
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["is_returned"], false);

    // Borrowing the same book again conflicts
    let response = client
        .post(format!("{}/borrowings", BASE_URL))
        .json(&json!({
            "book_id": book_id,
            "member_id": member_id
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // Deleting the book while borrowed is refused
    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 422);

    // The borrowing shows up in the member's list
    let response = client
        .get(format!("{}/borrowings/member/{}", BASE_URL, member_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body.as_array().map(Vec::len), Some(1));

    // Return it
    let response = client
        .post(format!("{}/borrowings/return", BASE_URL))
        .json(&json!({
            "book_id": book_id,
            "member_id": member_id
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["is_returned"], true);

    // Returning twice yields 404
    let response = client
        .post(format!("{}/borrowings/return", BASE_URL))
        .json(&json!({
            "book_id": book_id,
            "member_id": member_id
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);

    delete_book(&client, book_id).await;
    delete_member(&client, member_id).await;
}

#[tokio::test]
#[ignore]
async fn test_get_missing_book_reports_classified_error() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books/999999", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Book with ID 999999 not found");
    assert_eq!(body["code"], "RESOURCE_NOT_FOUND");
}
