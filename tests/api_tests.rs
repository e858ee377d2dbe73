// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::Read;
use std::thread;

use nusabiz::api::{ApiClient, ApiError, TransactionFilters};
use nusabiz::chat::ChatSession;
use nusabiz::models::TransactionType;

struct Captured {
    method: String,
    path: String,
    auth: Option<String>,
    body: String,
}

/// Serve exactly one request on an ephemeral port, capturing what arrived.
fn serve_one(status: u16, body: &'static str) -> (String, thread::JoinHandle<Option<Captured>>) {
    let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let url = format!("http://{}", addr);
    let handle = thread::spawn(move || {
        let mut req = server.recv().ok()?;
        let mut req_body = String::new();
        let _ = req.as_reader().read_to_string(&mut req_body);
        let captured = Captured {
            method: req.method().to_string(),
            path: req.url().to_string(),
            auth: req
                .headers()
                .iter()
                .find(|h| h.field.equiv("Authorization"))
                .map(|h| h.value.as_str().to_string()),
            body: req_body,
        };
        let response = tiny_http::Response::from_string(body)
            .with_status_code(status)
            .with_header(
                "Content-Type: application/json"
                    .parse::<tiny_http::Header>()
                    .unwrap(),
            );
        let _ = req.respond(response);
        Some(captured)
    });
    (url, handle)
}

#[test]
fn missing_token_fails_before_any_request() {
    // Nothing listens on this port; the call must fail locally.
    let client = ApiClient::new("http://127.0.0.1:1", None).unwrap();
    match client.me() {
        Err(ApiError::MissingToken) => {}
        other => panic!("expected MissingToken, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn bearer_token_is_attached_and_data_unwrapped() {
    let (url, handle) = serve_one(
        200,
        r#"{"success":true,"data":{"id":"u1","email":"owner@nusabiz.id"}}"#,
    );
    let client = ApiClient::new(url, Some("tok123".into())).unwrap();
    let user = client.me().unwrap();
    assert_eq!(user.email, "owner@nusabiz.id");

    let captured = handle.join().unwrap().unwrap();
    assert_eq!(captured.path, "/users/me");
    assert_eq!(captured.auth.as_deref(), Some("Bearer tok123"));
}

#[test]
fn envelope_failure_surfaces_the_server_message() {
    let (url, _handle) = serve_one(
        200,
        r#"{"success":false,"error":{"message":"Business ID tidak ditemukan"}}"#,
    );
    let client = ApiClient::new(url, Some("tok".into())).unwrap();
    match client.businesses() {
        Err(ApiError::Server(msg)) => assert_eq!(msg, "Business ID tidak ditemukan"),
        other => panic!("expected Server error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn non_json_error_body_falls_back_to_the_status() {
    let (url, _handle) = serve_one(500, "internal blowup");
    let client = ApiClient::new(url, Some("tok".into())).unwrap();
    match client.businesses() {
        Err(ApiError::Server(msg)) => assert!(msg.contains("500"), "got '{}'", msg),
        other => panic!("expected Server error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn unauthorized_maps_to_session_expired() {
    let (url, _handle) = serve_one(401, r#"{"success":false}"#);
    let client = ApiClient::new(url, Some("stale".into())).unwrap();
    match client.businesses() {
        Err(ApiError::SessionExpired) => {}
        other => panic!("expected SessionExpired, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn public_paths_work_without_a_token() {
    let (url, handle) = serve_one(200, r#"{"success":true,"data":{"token":"fresh"}}"#);
    let client = ApiClient::new(url, None).unwrap();
    let auth = client.login("owner@nusabiz.id", "secret").unwrap();
    assert_eq!(auth.token, "fresh");

    let captured = handle.join().unwrap().unwrap();
    assert_eq!(captured.path, "/auth/login");
    assert_eq!(captured.auth, None);
    assert!(captured.body.contains("owner@nusabiz.id"));
}

#[test]
fn transaction_filters_become_query_parameters() {
    let (url, handle) = serve_one(
        200,
        r#"{"success":true,"data":{"transactions":[
            {"id":1,"business_id":9,"transaction_date":"2025-08-01T10:00:00+07:00",
             "type":"Income","category":"Penjualan","amount":15000,
             "description":null,"status":"complete"}
        ],"pagination":{"total":1,"limit":10,"offset":0,"hasMore":false}}}"#,
    );
    let client = ApiClient::new(url, Some("tok".into())).unwrap();
    let filters = TransactionFilters {
        r#type: Some(TransactionType::Income),
        start_date: Some("2025-08-01".into()),
        limit: Some(10),
        ..Default::default()
    };
    let list = client.transactions(9, &filters).unwrap();
    assert_eq!(list.transactions.len(), 1);
    assert_eq!(list.transactions[0].amount, rust_decimal::Decimal::from(15000));
    assert!(list.pagination.is_some());

    let captured = handle.join().unwrap().unwrap();
    assert!(captured.path.starts_with("/businesses/9/transactions?"));
    assert!(captured.path.contains("type=Income"));
    assert!(captured.path.contains("startDate=2025-08-01"));
    assert!(captured.path.contains("limit=10"));
}

#[test]
fn stock_adjustment_patches_a_relative_delta() {
    let (url, handle) = serve_one(200, r#"{"success":true,"data":{"ok":true}}"#);
    let client = ApiClient::new(url, Some("tok".into())).unwrap();
    client.adjust_stock(9, 4, 3).unwrap();

    let captured = handle.join().unwrap().unwrap();
    assert_eq!(captured.method, "PATCH");
    assert_eq!(captured.path, "/businesses/9/products/4/stock");
    assert!(captured.body.contains("\"quantityChange\":3"));
}

#[test]
fn chat_send_success_appends_bot_and_adopts_chat_id() {
    let (url, _handle) = serve_one(
        200,
        r#"{"success":true,"data":{
            "chat":{"id":42,"user_id":"u1"},
            "userMessage":{"id":100,"chat_id":42,"sender":"User","content":"hello",
                           "created_at":"2025-08-01T10:00:00+07:00"},
            "botResponse":{"id":101,"chat_id":42,"sender":"Bot","content":"halo!",
                           "created_at":"2025-08-01T10:00:01+07:00"}}}"#,
    );
    let client = ApiClient::new(url, Some("tok".into())).unwrap();
    let mut chat = ChatSession::new();
    let reply = chat.send(&client, 9, "hello").unwrap().unwrap();
    assert_eq!(reply.content, "halo!");
    assert_eq!(chat.chat_id(), Some(42));
    assert_eq!(chat.messages().len(), 2);
    assert_eq!(chat.messages()[0].content, "hello");
}

#[test]
fn chat_send_failure_leaves_the_list_empty() {
    let (url, _handle) = serve_one(
        200,
        r#"{"success":false,"error":{"message":"AI sedang sibuk"}}"#,
    );
    let client = ApiClient::new(url, Some("tok".into())).unwrap();
    let mut chat = ChatSession::new();
    match chat.send(&client, 9, "hello") {
        Err(ApiError::Server(msg)) => assert_eq!(msg, "AI sedang sibuk"),
        other => panic!("expected Server error, got {:?}", other.map(|_| ())),
    }
    assert!(chat.messages().is_empty());
    assert_eq!(chat.chat_id(), None);
}

#[test]
fn whitespace_send_never_issues_a_request() {
    // Any request would hang against this dead port; the no-op guard means
    // none is made.
    let client = ApiClient::new("http://127.0.0.1:1", Some("tok".into())).unwrap();
    let mut chat = ChatSession::new();
    assert!(chat.send(&client, 9, "   ").unwrap().is_none());
    assert!(chat.messages().is_empty());
}
