//! End-to-end tests against the live mock server over reqwest.
//!
//! # Design
//! Each test starts the mock server on a random port and drives the client
//! through `ReqwestTransport`, so URL joining, header handling, body encoding
//! and response normalization are checked on real HTTP traffic.

use fetcher_core::{
    interceptor_fn, BoxError, Client, ClientConfig, FetchError, Form, Headers, RequestOptions,
    ReqwestTransport, TransportError,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Todo {
    id: String,
    title: String,
    completed: bool,
}

#[derive(Serialize)]
struct CreateTodo<'a> {
    title: &'a str,
}

#[derive(Debug, Deserialize)]
struct Echo {
    method: String,
    headers: std::collections::HashMap<String, String>,
    body: String,
}

async fn client() -> Client<ReqwestTransport> {
    let addr = mock_server::spawn().await.unwrap();
    Client::new(ClientConfig::new().with_base_url(format!("http://{addr}")))
}

#[tokio::test]
async fn crud_lifecycle() {
    let client = client().await;
    let none = RequestOptions::new;

    let listed = client.get::<Vec<Todo>>("/todos", none()).await.unwrap();
    assert_eq!(listed.status, 200);
    assert_eq!(listed.data, Some(Vec::new()));

    let created = client
        .post::<Todo>("/todos", fetcher_core::Body::json(&CreateTodo { title: "Integration" }).unwrap(), none())
        .await
        .unwrap();
    assert_eq!(created.status, 201);
    assert_eq!(created.status_text, "Created");
    let todo = created.data.unwrap();
    assert_eq!(todo.title, "Integration");
    assert!(!todo.completed);
    let path = format!("/todos/{}", todo.id);

    let fetched = client.get::<Todo>(&path, none()).await.unwrap();
    assert_eq!(fetched.data.as_ref(), Some(&todo));

    let updated = client
        .put::<Todo>(&path, json!({"title": "Renamed"}), none())
        .await
        .unwrap();
    assert_eq!(updated.data.unwrap().title, "Renamed");

    let patched = client
        .patch::<Todo>(&path, json!({"completed": true}), none())
        .await
        .unwrap();
    let patched = patched.data.unwrap();
    assert_eq!(patched.title, "Renamed");
    assert!(patched.completed);

    let deleted = client.delete::<Value>(&path, none()).await.unwrap();
    assert_eq!(deleted.status, 204);
    assert!(deleted.data.is_none());

    let err = client.get::<Todo>(&path, none()).await.unwrap_err();
    let envelope = err.into_error_envelope().unwrap();
    assert_eq!(envelope.status, 404);
    assert_eq!(envelope.status_text, "Not Found");
    assert_eq!(envelope.error, Some(json!({"message": "not found"})));
    assert_eq!(envelope.options.url, client.config().resolve_url(&path));
}

#[tokio::test]
async fn json_post_sends_text_body_with_content_type() {
    let client = client().await;
    let echo = client
        .post::<Echo>("/echo", json!({"id": 1}), RequestOptions::new())
        .await
        .unwrap()
        .data
        .unwrap();

    assert_eq!(echo.method, "POST");
    assert_eq!(echo.body, r#"{"id":1}"#);
    assert_eq!(echo.headers["content-type"], "application/json");
}

#[tokio::test]
async fn default_and_per_call_headers_reach_the_server() {
    let addr = mock_server::spawn().await.unwrap();
    let config = ClientConfig::new()
        .with_base_url(format!("http://{addr}"))
        .with_header("X-App", "fetcher")
        .with_header("X-Env", "default");
    let client = Client::new(config);

    let echo = client
        .get::<Echo>("/echo", RequestOptions::new().header("X-Env", "call"))
        .await
        .unwrap()
        .data
        .unwrap();

    assert_eq!(echo.method, "GET");
    assert_eq!(echo.headers["x-app"], "fetcher");
    assert_eq!(echo.headers["x-env"], "call");
    assert!(echo.body.is_empty());
}

#[tokio::test]
async fn interceptor_controls_the_wire_headers() {
    let mut client = client().await;
    client.interceptor(|merged: Headers| async move {
        Ok::<_, BoxError>(merged.with("Authorization", "Bearer secret"))
    });

    let echo = client
        .get::<Echo>("/echo", RequestOptions::new().header("X-Req", "1"))
        .await
        .unwrap();
    assert_eq!(echo.options.headers.get("authorization"), Some("Bearer secret"));
    let echo = echo.data.unwrap();
    assert_eq!(echo.headers["authorization"], "Bearer secret");
    assert_eq!(echo.headers["x-req"], "1");
}

#[tokio::test]
async fn interceptor_failure_sends_nothing() {
    let mut client = client().await;
    client.interceptor(interceptor_fn(|_| Err("no token".into())));

    let err = client
        .post::<Value>("/todos", json!({"title": "never"}), RequestOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Interceptor(_)));

    let mut plain = client.clone();
    plain.interceptor(interceptor_fn(Ok));
    let listed = plain.get::<Vec<Value>>("/todos", RequestOptions::new()).await.unwrap();
    assert_eq!(listed.data, Some(Vec::new()));
}

#[tokio::test]
async fn multipart_upload_gets_boundary_from_transport() {
    let addr = mock_server::spawn().await.unwrap();
    let config = ClientConfig::new()
        .with_base_url(format!("http://{addr}"))
        .with_header("Content-Type", "application/json");
    let client = Client::new(config);
    let form = Form::new()
        .text("title", "report")
        .file("file", "a.txt", "text/plain", b"hello".to_vec());

    let envelope = client
        .post::<Value>("/upload", form, RequestOptions::new())
        .await
        .unwrap();

    assert!(!envelope.options.headers.contains("content-type"));
    let data = envelope.data.unwrap();
    assert!(data["content_type"]
        .as_str()
        .unwrap()
        .starts_with("multipart/form-data; boundary="));
    assert_eq!(data["parts"][0]["name"], "title");
    assert_eq!(data["parts"][0]["size"], 6);
    assert_eq!(data["parts"][1]["file_name"], "a.txt");
    assert_eq!(data["parts"][1]["content_type"], "text/plain");
    assert_eq!(data["parts"][1]["size"], 5);
}

#[tokio::test]
async fn empty_and_text_bodies_degrade_to_no_data() {
    let client = client().await;

    let empty = client.get::<Value>("/empty", RequestOptions::new()).await.unwrap();
    assert_eq!(empty.status, 200);
    assert!(empty.data.is_none());

    let plain = client.get::<Value>("/plain", RequestOptions::new()).await.unwrap();
    assert_eq!(plain.status, 200);
    assert!(plain.data.is_none());
    assert_eq!(plain.headers.get("content-type"), Some("text/plain; charset=utf-8"));
}

#[tokio::test]
async fn repeated_response_headers_are_kept() {
    let client = client().await;
    let envelope = client.get::<Value>("/cookies", RequestOptions::new()).await.unwrap();

    assert_eq!(envelope.status, 200);
    let cookies: Vec<&str> = envelope.headers.get_all("Set-Cookie").collect();
    assert_eq!(cookies, ["a=1", "b=2"]);
    assert_eq!(envelope.data, Some(json!({"cookies": 2})));
}

#[tokio::test]
async fn server_error_with_text_body_has_no_error_payload() {
    let client = client().await;
    let err = client.get::<Value>("/boom", RequestOptions::new()).await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    let envelope = err.error_envelope().unwrap();
    assert_eq!(envelope.status_text, "Internal Server Error");
    assert!(envelope.error.is_none());
}

#[tokio::test]
async fn connection_refused_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = Client::new(ClientConfig::new().with_base_url(format!("http://{addr}")));
    let err = client.get::<Value>("/todos", RequestOptions::new()).await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(TransportError::Reqwest(_))));
}

#[tokio::test]
async fn invalid_header_is_a_transport_error() {
    let client = client().await;
    let err = client
        .get::<Value>("/echo", RequestOptions::new().header("bad header", "x"))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Transport(TransportError::InvalidHeader(_))));
}
