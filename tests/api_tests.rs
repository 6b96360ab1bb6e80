//! API end-to-end tests
//!
//! These expect a server on a freshly migrated and seeded database.

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:5000";

async fn send(request: reqwest::RequestBuilder) -> (u16, Value) {
    let response = request.send().await.expect("Failed to send request");
    let status = response.status().as_u16();
    let body: Value = response.json().await.expect("Failed to parse response");
    (status, body)
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_422_on_delete_non_existent_book() {
    let client = Client::new();
    let (status, body) = send(client.delete(format!("{}/books/1000", BASE_URL))).await;

    assert_eq!(status, 422);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "unprocessable");
}

#[tokio::test]
#[ignore]
async fn test_405_on_delete_when_no_record_is_specified() {
    let client = Client::new();
    let (status, body) = send(client.delete(format!("{}/books", BASE_URL))).await;

    assert_eq!(status, 405);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Method Not Allowed");
}

#[tokio::test]
#[ignore]
async fn test_405_on_get_a_single_book() {
    let client = Client::new();
    let (status, body) = send(client.get(format!("{}/books/1000", BASE_URL))).await;

    assert_eq!(status, 405);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Method Not Allowed");
}

#[tokio::test]
#[ignore]
async fn test_404_sent_requesting_beyond_valid_page() {
    let client = Client::new();
    let (status, body) = send(client.get(format!("{}/books?page=1000", BASE_URL))).await;

    assert_eq!(status, 404);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "resource not found");
}

#[tokio::test]
#[ignore]
async fn test_200_sent_posting_a_new_book() {
    let client = Client::new();
    let (status, body) = send(client.post(format!("{}/books", BASE_URL)).json(&json!({
        "title": "Anansi Boys",
        "author": "Neil Gaiman",
        "rating": 5
    })))
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert!(!body["books"].as_array().expect("books is not an array").is_empty());
    assert!(body["total_books"].as_i64().unwrap_or(0) > 0);
    assert!(body["created"].as_i64().unwrap_or(0) > 0);
}

#[tokio::test]
#[ignore]
async fn test_200_posting_a_book_without_rating() {
    let client = Client::new();
    let (status, body) = send(client.post(format!("{}/books", BASE_URL)).json(&json!({
        "title": "Neverwhere",
        "author": "Neil Gaiman"
    })))
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert!(body["created"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_get_paginated_books() {
    let client = Client::new();
    let (status, body) = send(client.get(format!("{}/books", BASE_URL))).await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert!(body["total_books"].as_i64().unwrap_or(0) > 0);
    let books = body["books"].as_array().expect("books is not an array");
    assert!(!books.is_empty() && books.len() <= 10);
}

#[tokio::test]
#[ignore]
async fn test_200_sent_requesting_from_valid_page() {
    let client = Client::new();
    let (status, body) = send(client.get(format!("{}/books?page=1", BASE_URL))).await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
}

#[tokio::test]
#[ignore]
async fn test_search_books_by_title() {
    let client = Client::new();
    let (status, body) = send(
        client
            .post(format!("{}/books", BASE_URL))
            .json(&json!({"search": "gods"})),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert!(body["total_books"].as_i64().unwrap_or(0) >= 1);
    assert!(body.get("created").is_none());

    let (status, body) = send(
        client
            .post(format!("{}/books", BASE_URL))
            .json(&json!({"search": "no such title anywhere"})),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["total_books"], 0);
}

#[tokio::test]
#[ignore]
async fn test_200_deleting_existing_record() {
    let client = Client::new();
    let book_id = 9;
    let (status, body) = send(client.delete(format!("{}/books/{}", BASE_URL, book_id))).await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["deleted"], book_id);
    assert!(!body["books"].as_array().expect("books is not an array").is_empty());
    assert!(body["total_books"].as_i64().unwrap_or(0) > 0);

    // The record is gone: further operations on it are unprocessable
    let (status, _) = send(
        client
            .patch(format!("{}/books/{}", BASE_URL, book_id))
            .json(&json!({"rating": 2})),
    )
    .await;
    assert_eq!(status, 422);
}

#[tokio::test]
#[ignore]
async fn test_200_on_updating_rating_on_existing_book() {
    let client = Client::new();
    let book_id = 11;
    let rating = 1;
    let (status, body) = send(
        client
            .patch(format!("{}/books/{}", BASE_URL, book_id))
            .json(&json!({"rating": rating})),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["id"], book_id);
    assert_eq!(body["book"]["rating"], rating);
}

#[tokio::test]
#[ignore]
async fn test_422_on_updating_non_existent_book() {
    let client = Client::new();
    let (status, body) = send(
        client
            .patch(format!("{}/books/1000", BASE_URL))
            .json(&json!({"rating": 3})),
    )
    .await;

    assert_eq!(status, 422);
    assert_eq!(body["message"], "unprocessable");
}

#[tokio::test]
#[ignore]
async fn test_422_on_empty_update_of_non_existent_book() {
    let client = Client::new();
    let (status, body) = send(
        client
            .patch(format!("{}/books/1000", BASE_URL))
            .json(&json!({})),
    )
    .await;

    assert_eq!(status, 422);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "unprocessable");
}

#[tokio::test]
#[ignore]
async fn test_400_on_empty_update_of_existing_book() {
    let client = Client::new();
    let (status, body) = send(
        client
            .patch(format!("{}/books/12", BASE_URL))
            .json(&json!({})),
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body["message"], "bad request");
}

#[tokio::test]
#[ignore]
async fn test_422_on_update_with_out_of_range_rating() {
    let client = Client::new();
    let (status, body) = send(
        client
            .patch(format!("{}/books/12", BASE_URL))
            .json(&json!({"rating": 0})),
    )
    .await;

    assert_eq!(status, 422);
    assert_eq!(body["message"], "unprocessable");
}

#[tokio::test]
#[ignore]
async fn test_200_on_clearing_rating() {
    let client = Client::new();
    let book_id = 13;
    let (status, body) = send(
        client
            .patch(format!("{}/books/{}", BASE_URL, book_id))
            .json(&json!({"rating": null})),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert!(body["book"]["rating"].is_null());
    assert_eq!(body["book"]["title"], "The Night Circus");
}

#[tokio::test]
#[ignore]
async fn test_ready_check() {
    let client = Client::new();
    let (status, body) = send(client.get(format!("{}/ready", BASE_URL))).await;

    assert_eq!(status, 200);
    assert_eq!(body["status"], "ready");
}
