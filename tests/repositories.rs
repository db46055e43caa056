//! Repository tests: URL shapes, wire field names, error normalization.

use std::sync::Arc;

use mockito::Matcher;
use serde_json::json;

use lms_console::config::{ApiConfig, SessionConfig};
use lms_console::http::ApiClient;
use lms_console::models::book::CreateBook;
use lms_console::models::transaction::{TransactionType, UpdateTransaction};
use lms_console::models::user::LoginRequest;
use lms_console::repository::Repository;
use lms_console::session::SessionStore;

fn repository(base_url: &str) -> Repository {
    let session = Arc::new(SessionStore::in_memory(&SessionConfig::default()));
    let config = ApiConfig {
        base_url: base_url.to_string(),
        timeout_ms: 2000,
    };
    let client = ApiClient::new(&config, session).expect("client should build");
    Repository::new(client)
}

#[tokio::test]
async fn login_posts_credentials_and_returns_the_librarian_identity() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/login/")
        .match_body(Matcher::Json(json!({
            "user_name": "admin",
            "password": "secret"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"id":"3","user_name":"admin","access_token":"A1","refresh_token":"R1"}"#,
        )
        .create_async()
        .await;

    let repository = repository(&server.url());
    let credentials = LoginRequest {
        user_name: "admin".to_string(),
        password: "secret".to_string(),
    };
    let user = repository
        .auth
        .login(&credentials)
        .await
        .expect("login should succeed");
    assert_eq!(user.id, "3");
    assert_eq!(user.user_name, "admin");
    assert_eq!(user.access_token, "A1");
    assert_eq!(user.refresh_token, "R1");
    mock.assert_async().await;
}

#[tokio::test]
async fn get_by_id_miss_surfaces_as_a_not_found_status() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/students/7/")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":"Student not found"}"#)
        .create_async()
        .await;

    let repository = repository(&server.url());
    let err = repository
        .students
        .get_by_id(7)
        .await
        .expect_err("missing id should fail");
    assert!(err.is_not_found());
    assert_eq!(
        err.to_string(),
        "Request failed with status 404: Student not found"
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn create_book_sends_the_backend_field_names() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/books/")
        .match_body(Matcher::Json(json!({
            "Title": "The Dispossessed",
            "author": 2,
            "Genre": "Science fiction",
            "ISBN": "9780061054884",
            "Quantity": 3
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"BookId":11,"Title":"The Dispossessed","author":2,"Genre":"Science fiction","ISBN":"9780061054884","Quantity":3}"#,
        )
        .create_async()
        .await;

    let repository = repository(&server.url());
    let book = repository
        .books
        .create(&CreateBook {
            title: "The Dispossessed".to_string(),
            author: 2,
            genre: "Science fiction".to_string(),
            isbn: "9780061054884".to_string(),
            quantity: 3,
        })
        .await
        .expect("create should succeed");
    assert_eq!(book.id, 11);
    assert_eq!(book.title, "The Dispossessed");
    mock.assert_async().await;
}

#[tokio::test]
async fn transaction_update_goes_out_as_a_partial_patch() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PATCH", "/api/transactions/9/")
        .match_body(Matcher::Json(json!({ "transaction_type": "return" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"transaction_id":9,"student":1,"user":3,"book":11,
                "transaction_type":"return","is_overdue":false,
                "borrowed_date":"2026-07-01T10:00:00Z","due_date":"2026-07-15T10:00:00Z",
                "student_name":"Nadia","librarian_name":"admin","book_name":"The Dispossessed"}"#,
        )
        .create_async()
        .await;

    let repository = repository(&server.url());
    let update = UpdateTransaction {
        transaction_type: Some(TransactionType::Return),
        ..Default::default()
    };
    let transaction = repository
        .transactions
        .update(9, &update)
        .await
        .expect("update should succeed");
    assert_eq!(transaction.transaction_type, TransactionType::Return);
    assert_eq!(transaction.book_name, "The Dispossessed");
    mock.assert_async().await;
}

#[tokio::test]
async fn delete_tolerates_an_empty_204_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", "/api/authors/4/")
        .with_status(204)
        .create_async()
        .await;

    let repository = repository(&server.url());
    repository
        .authors
        .delete(4)
        .await
        .expect("delete should succeed");
    mock.assert_async().await;
}

#[tokio::test]
async fn overdue_borrowers_are_projected_from_full_transactions() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/overdue-emails/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"transaction_id":5,"student":1,"user":3,"book":11,
                 "transaction_type":"borrow","is_overdue":true,
                 "borrowed_date":"2026-06-01T10:00:00Z","due_date":"2026-06-15T10:00:00Z",
                 "student_name":"Nadia","librarian_name":"admin","book_name":"The Dispossessed"},
                {"transaction_id":6,"student":2,"user":3,"book":12,
                 "transaction_type":"borrow","is_overdue":true,
                 "borrowed_date":"2026-06-02T10:00:00Z","due_date":"2026-06-16T10:00:00Z",
                 "student_name":"Omar","librarian_name":"admin","book_name":"Kindred"}]"#,
        )
        .create_async()
        .await;

    let repository = repository(&server.url());
    let borrowers = repository
        .dashboard
        .overdue_borrowers()
        .await
        .expect("fetch should succeed");
    assert_eq!(borrowers.len(), 2);
    assert_eq!(borrowers[0].transaction_id, 5);
    assert_eq!(borrowers[0].student_name, "Nadia");
    assert_eq!(borrowers[1].student_name, "Omar");
    mock.assert_async().await;
}

#[tokio::test]
async fn book_summary_deserializes_the_aggregate_counts() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/book-summary/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"total_borrowed_books":12,"total_returned_books":40,"total_books":180,"total_students":75}"#,
        )
        .create_async()
        .await;

    let repository = repository(&server.url());
    let summary = repository
        .dashboard
        .book_summary()
        .await
        .expect("fetch should succeed");
    assert_eq!(summary.total_borrowed_books, 12);
    assert_eq!(summary.total_students, 75);
    mock.assert_async().await;
}

#[tokio::test]
async fn notify_all_posts_without_a_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/overdue-emails/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Emails queued for 2 borrowers"}"#)
        .create_async()
        .await;

    let repository = repository(&server.url());
    let response = repository
        .dashboard
        .send_overdue_notifications(None)
        .await
        .expect("dispatch should succeed");
    assert_eq!(response.message, "Emails queued for 2 borrowers");
    mock.assert_async().await;
}

#[tokio::test]
async fn notify_selected_posts_the_transaction_id_list() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/overdue-emails/")
        .match_body(Matcher::Json(json!({
            "send_to_all": false,
            "transaction_ids": [5, 6]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Emails queued for 2 borrowers"}"#)
        .create_async()
        .await;

    let repository = repository(&server.url());
    repository
        .dashboard
        .send_overdue_notifications(Some(&[5, 6]))
        .await
        .expect("dispatch should succeed");
    mock.assert_async().await;
}

#[tokio::test]
async fn backend_message_is_preferred_over_the_canonical_reason() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/books")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"database gone"}"#)
        .create_async()
        .await;

    let repository = repository(&server.url());
    let err = repository
        .books
        .get_all()
        .await
        .expect_err("call should fail");
    assert_eq!(
        err.to_string(),
        "Request failed with status 500: database gone"
    );
    mock.assert_async().await;
}
