//! API integration tests
//!
//! These exercise a running server with its database. Start the server, then:
//! cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Unique suffix so repeated runs never collide on unique columns
fn unique() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}", nanos)
}

/// Sync a fresh user through the identity bridge and return it
async fn create_user(client: &Client) -> Value {
    let suffix = unique();
    let response = client
        .post(format!("{}/auth/user", BASE_URL))
        .json(&json!({
            "firebase_uid": format!("test-uid-{}", suffix),
            "email": format!("test-{}@example.com", suffix),
            "name": "Test Reader"
        }))
        .send()
        .await
        .expect("Failed to sync user");

    assert!(response.status().is_success());
    response.json().await.expect("Failed to parse user")
}

/// Create a minimal book uploaded by the given user and return it
async fn create_book(client: &Client, uploader_id: &str) -> Value {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": format!("Test Book {}", unique()),
            "file_url": "https://files.example.com/test.pdf",
            "uploaded_by": uploader_id
        }))
        .send()
        .await
        .expect("Failed to create book");

    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse book")
}

#[tokio::test]
#[ignore]
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
async fn test_user_sync_is_idempotent_and_updates_name() {
    let client = Client::new();
    let suffix = unique();
    let uid = format!("sync-uid-{}", suffix);
    let email = format!("sync-{}@example.com", suffix);

    let first: Value = client
        .post(format!("{}/auth/user", BASE_URL))
        .json(&json!({"firebaseUid": &uid, "email": &email, "name": "Original"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let second: Value = client
        .post(format!("{}/auth/user", BASE_URL))
        .json(&json!({"firebaseUid": &uid, "email": &email, "name": "Original"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(first["id"], second["id"]);
    assert_eq!(second["role"], "USER");

    let renamed: Value = client
        .post(format!("{}/auth/user", BASE_URL))
        .json(&json!({"firebaseUid": &uid, "email": &email, "name": "Renamed"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(renamed["id"], first["id"]);
    assert_eq!(renamed["name"], "Renamed");
}

#[tokio::test]
#[ignore]
async fn test_user_sync_requires_uid_and_email() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/user", BASE_URL))
        .json(&json!({"firebaseUid": "", "email": "not-an-email"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_create_book_requires_title_file_url_and_uploader() {
    let client = Client::new();
    let user = create_user(&client).await;

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "",
            "file_url": "",
            "uploaded_by": user["id"]
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Title, file URL, and uploader are required");
}

#[tokio::test]
#[ignore]
async fn test_create_book_attaches_authors_transactionally() {
    let client = Client::new();
    let user = create_user(&client).await;

    let author: Value = client
        .post(format!("{}/authors", BASE_URL))
        .json(&json!({"name": format!("Author {}", unique())}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": format!("Joined Book {}", unique()),
            "file_url": "https://files.example.com/joined.epub",
            "format": "EPUB",
            "uploaded_by": user["id"],
            "authors": [{"author_id": author["id"], "role": "Illustrator"}]
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 201);
    let book: Value = response.json().await.unwrap();
    let authors = book["authors"].as_array().unwrap();
    assert_eq!(authors.len(), 1);
    assert_eq!(authors[0]["author"]["id"], author["id"]);
    assert_eq!(authors[0]["role"], "Illustrator");

    // A bad author reference must leave no book behind
    let title = format!("Phantom Book {}", unique());
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": &title,
            "file_url": "https://files.example.com/phantom.pdf",
            "uploaded_by": user["id"],
            "authors": [{"author_id": "00000000-0000-0000-0000-000000000000"}]
        }))
        .send()
        .await
        .unwrap();

    assert!(!response.status().is_success());

    let listing: Value = client
        .get(format!("{}/books", BASE_URL))
        .query(&[("search", title.as_str())])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(listing["pagination"]["total"], 0);
}

#[tokio::test]
#[ignore]
async fn test_borrow_lifecycle() {
    let client = Client::new();
    let user = create_user(&client).await;
    let book = create_book(&client, user["id"].as_str().unwrap()).await;

    // Borrow
    let response = client
        .post(format!("{}/borrows", BASE_URL))
        .json(&json!({"user_id": user["id"], "book_id": book["id"]}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
    let borrow: Value = response.json().await.unwrap();
    assert_eq!(borrow["status"], "BORROWED");

    // Due date is exactly 14 days after the borrow date
    let borrow_date = chrono_parse(&borrow["borrow_date"]);
    let due_date = chrono_parse(&borrow["due_date"]);
    assert_eq!(due_date - borrow_date, 14 * 24 * 3600);

    // A second active borrow of the same book is rejected
    let response = client
        .post(format!("{}/borrows", BASE_URL))
        .json(&json!({"user_id": user["id"], "book_id": book["id"]}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Book is already borrowed by this user");

    // Return
    let borrow_id = borrow["id"].as_str().unwrap();
    let response = client
        .post(format!("{}/borrows/{}/return", BASE_URL, borrow_id))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let returned: Value = response.json().await.unwrap();
    assert_eq!(returned["status"], "RETURNED");
    assert!(returned["return_date"].is_string());

    // RETURNED is terminal
    let response = client
        .post(format!("{}/borrows/{}/return", BASE_URL, borrow_id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    // The book can be borrowed again through a new row
    let response = client
        .post(format!("{}/borrows", BASE_URL))
        .json(&json!({"user_id": user["id"], "book_id": book["id"]}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
}

#[tokio::test]
#[ignore]
async fn test_review_aggregates_update_atomically() {
    let client = Client::new();
    let reader_a = create_user(&client).await;
    let reader_b = create_user(&client).await;
    let book = create_book(&client, reader_a["id"].as_str().unwrap()).await;

    // Out-of-range rating
    let response = client
        .post(format!("{}/reviews", BASE_URL))
        .json(&json!({"user_id": reader_a["id"], "book_id": book["id"], "rating": 6}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    // First review
    let response = client
        .post(format!("{}/reviews", BASE_URL))
        .json(&json!({"user_id": reader_a["id"], "book_id": book["id"], "rating": 4}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);

    // Duplicate review by the same user
    let response = client
        .post(format!("{}/reviews", BASE_URL))
        .json(&json!({"user_id": reader_a["id"], "book_id": book["id"], "rating": 5}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "You have already reviewed this book");

    // Second reader
    let response = client
        .post(format!("{}/reviews", BASE_URL))
        .json(&json!({"user_id": reader_b["id"], "book_id": book["id"], "rating": 5}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);

    // Aggregate reflects both committed reviews
    let book_id = book["id"].as_str().unwrap();
    let fetched: Value = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(fetched["ratings_count"], 2);
    assert!((fetched["average_rating"].as_f64().unwrap() - 4.5).abs() < 1e-9);
}

#[tokio::test]
#[ignore]
async fn test_reading_time_accumulates() {
    let client = Client::new();
    let user = create_user(&client).await;
    let book = create_book(&client, user["id"].as_str().unwrap()).await;

    let first: Value = client
        .post(format!("{}/reading-progress", BASE_URL))
        .json(&json!({
            "user_id": user["id"],
            "book_id": book["id"],
            "current_page": 10,
            "reading_time": 30
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(first["reading_time"], 30);

    let second: Value = client
        .post(format!("{}/reading-progress", BASE_URL))
        .json(&json!({
            "user_id": user["id"],
            "book_id": book["id"],
            "current_page": 25,
            "reading_time": 20
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(second["reading_time"], 50);
    assert_eq!(second["current_page"], 25);

    let lookup: Value = client
        .get(format!("{}/reading-progress", BASE_URL))
        .query(&[
            ("user_id", user["id"].as_str().unwrap()),
            ("book_id", book["id"].as_str().unwrap()),
        ])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(lookup["progress"]["reading_time"], 50);
}

#[tokio::test]
#[ignore]
async fn test_wishlist_orders_by_priority_then_recency() {
    let client = Client::new();
    let user = create_user(&client).await;
    let user_id = user["id"].as_str().unwrap();

    for priority in [1, 3, 2] {
        let book = create_book(&client, user_id).await;
        let response = client
            .post(format!("{}/wishlist", BASE_URL))
            .json(&json!({
                "user_id": user["id"],
                "book_id": book["id"],
                "priority": priority
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 201);
    }

    let listing: Value = client
        .get(format!("{}/wishlist", BASE_URL))
        .query(&[("user_id", user_id)])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let priorities: Vec<i64> = listing["wishlist_items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["priority"].as_i64().unwrap())
        .collect();

    assert_eq!(priorities, vec![3, 2, 1]);
}

#[tokio::test]
#[ignore]
async fn test_wishlist_rejects_duplicates_and_removes() {
    let client = Client::new();
    let user = create_user(&client).await;
    let book = create_book(&client, user["id"].as_str().unwrap()).await;

    let response = client
        .post(format!("{}/wishlist", BASE_URL))
        .json(&json!({"user_id": user["id"], "book_id": book["id"]}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/wishlist", BASE_URL))
        .json(&json!({"user_id": user["id"], "book_id": book["id"]}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Book is already in your wishlist");

    let response = client
        .delete(format!("{}/wishlist", BASE_URL))
        .query(&[
            ("user_id", user["id"].as_str().unwrap()),
            ("book_id", book["id"].as_str().unwrap()),
        ])
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Book removed from wishlist");
}

#[tokio::test]
#[ignore]
async fn test_notifications_hide_expired_and_track_unread() {
    let client = Client::new();
    let user = create_user(&client).await;
    let user_id = user["id"].as_str().unwrap();

    // One live, one already expired
    let live: Value = client
        .post(format!("{}/notifications", BASE_URL))
        .json(&json!({
            "user_id": user["id"],
            "type": "DUE_SOON",
            "title": "Book due soon",
            "message": "Return your book by Friday"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    client
        .post(format!("{}/notifications", BASE_URL))
        .json(&json!({
            "user_id": user["id"],
            "type": "PROMO",
            "title": "Old promo",
            "message": "This expired long ago",
            "expires_at": "2000-01-01T00:00:00Z"
        }))
        .send()
        .await
        .unwrap();

    let listing: Value = client
        .get(format!("{}/notifications", BASE_URL))
        .query(&[("user_id", user_id)])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let notifications = listing["notifications"].as_array().unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0]["title"], "Book due soon");
    assert_eq!(listing["unread_count"], 1);

    // Mark read and re-check the unread count
    let response = client
        .patch(format!("{}/notifications", BASE_URL))
        .json(&json!({"notification_id": live["id"]}))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let marked: Value = response.json().await.unwrap();
    assert_eq!(marked["is_read"], true);
    assert!(marked["read_at"].is_string());

    let listing: Value = client
        .get(format!("{}/notifications", BASE_URL))
        .query(&[("user_id", user_id)])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listing["unread_count"], 0);
}

#[tokio::test]
#[ignore]
async fn test_fine_transitions_are_terminal() {
    let client = Client::new();
    let user = create_user(&client).await;

    let fine: Value = client
        .post(format!("{}/fines", BASE_URL))
        .json(&json!({
            "user_id": user["id"],
            "amount": "2.50",
            "reason": "Late return"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fine["status"], "PENDING");

    let response = client
        .patch(format!("{}/fines", BASE_URL))
        .json(&json!({"fine_id": fine["id"], "status": "PAID"}))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let paid: Value = response.json().await.unwrap();
    assert_eq!(paid["status"], "PAID");
    assert!(paid["paid_date"].is_string());

    // PAID is terminal; waiving afterwards is rejected
    let response = client
        .patch(format!("{}/fines", BASE_URL))
        .json(&json!({"fine_id": fine["id"], "status": "WAIVED"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_library_card_end_to_end() {
    let client = Client::new();
    let user = create_user(&client).await;

    let response = client
        .post(format!("{}/library-card", BASE_URL))
        .json(&json!({"user_id": user["id"], "max_borrow_limit": 5}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);

    let card: Value = response.json().await.unwrap();
    let number = card["card_number"].as_str().unwrap();
    assert!(number.starts_with("LC"));
    assert_eq!(number.len(), 12);
    assert_eq!(card["max_borrow_limit"], 5);
    assert_eq!(card["is_active"], true);

    // Expiry is one year out
    let issued = chrono_parse(&card["issued_date"]);
    let expiry = chrono_parse(&card["expiry_date"]);
    assert_eq!(expiry - issued, 365 * 24 * 3600);

    // A second card for the same user is rejected
    let response = client
        .post(format!("{}/library-card", BASE_URL))
        .json(&json!({"user_id": user["id"]}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Library card already exists for this user");

    // Partial update
    let response = client
        .patch(format!("{}/library-card", BASE_URL))
        .json(&json!({"user_id": user["id"], "is_active": false}))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["is_active"], false);
    assert_eq!(updated["max_borrow_limit"], 5);
}

/// Parse an RFC 3339 timestamp value to unix seconds
fn chrono_parse(value: &Value) -> i64 {
    let text = value.as_str().expect("expected timestamp string");
    chrono::DateTime::parse_from_rfc3339(text)
        .expect("invalid timestamp")
        .timestamp()
}
