use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use nazaris_client::{
    api::{ContactApiService, ContactClient, SubmissionError},
    controller::{ContactFormController, FormMessage},
    form::{ContactForm, FormFile},
};
use nazaris_utils::assert_matches;
use pretty_assertions::assert_eq;
use serde_json::json;
use tokio::{net::TcpListener, sync::Mutex};
use url::Url;

#[tokio::test]
async fn submit_multipart() {
    // Arrange
    let (endpoint, received) = serve(StatusCode::OK, json!({"ok": true})).await;
    let sut = ContactClient::new(endpoint).unwrap();
    let form = ContactForm {
        file: Some(FormFile {
            filename: "brief.txt".into(),
            content_type: Some("text/plain".into()),
            content: b"hello".to_vec(),
        }),
        ..form()
    };

    // Act
    let result = sut.submit(&form).await;

    // Assert
    result.unwrap();
    let received = received.lock().await.take().unwrap();
    assert_eq!(received.fields["name"], "Иван");
    assert_eq!(received.fields["phone"], "+7 (981) 103-12-03");
    assert_eq!(received.fields["email"], "ivan@example.com");
    assert_eq!(received.fields["workType"], "web-dev");
    assert_eq!(received.fields["budget"], "");
    assert_eq!(received.fields["message"], "Нужен сайт");
    assert_eq!(
        received.file,
        Some(("brief.txt".into(), Some("text/plain".into()), b"hello".to_vec()))
    );
}

#[tokio::test]
async fn submit_rejected() {
    // Arrange
    let (endpoint, _) = serve(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"error": "Email not configured"}),
    )
    .await;
    let sut = ContactClient::new(endpoint).unwrap();

    // Act
    let result = sut.submit(&form()).await;

    // Assert
    assert_matches!(
        result,
        Err(SubmissionError::Rejected { status: 500, error: Some(error) })
            if error == "Email not configured"
    );
}

#[tokio::test]
async fn submit_network_error() {
    // Arrange
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let endpoint = format!("http://{addr}/api/contact").parse().unwrap();
    let sut = ContactClient::new(endpoint).unwrap();

    // Act
    let result = sut.submit(&form()).await;

    // Assert
    assert_matches!(result, Err(SubmissionError::Network(_)));
}

#[tokio::test]
async fn controller_fallback() {
    // Arrange
    let (endpoint, _) = serve(StatusCode::OK, json!({"ok": false})).await;
    let client = ContactClient::new(endpoint).unwrap();
    let sut = ContactFormController::new(client, "nazaris@internet.ru");
    let mut form = form();

    // Act
    let result = sut.handle_submit(&mut form).await;

    // Assert
    let FormMessage::Fallback(fallback) = result else {
        panic!("expected fallback, got {result:?}");
    };
    assert!(fallback.mailto.starts_with("mailto:nazaris@internet.ru?subject="));
    assert_eq!(form, self::form());
}

#[derive(Debug, Default)]
struct Received {
    fields: HashMap<String, String>,
    file: Option<(String, Option<String>, Vec<u8>)>,
}

type Shared = Arc<Mutex<Option<Received>>>;

async fn serve(status: StatusCode, body: serde_json::Value) -> (Url, Shared) {
    let received = Shared::default();

    let router = Router::new()
        .route(
            "/api/contact",
            routing::post(
                move |State(received): State<Shared>, mut multipart: Multipart| async move {
                    let mut result = Received::default();
                    while let Some(field) = multipart.next_field().await.unwrap() {
                        let name = field.name().unwrap().to_owned();
                        if let Some(filename) = field.file_name().map(ToOwned::to_owned) {
                            let content_type = field.content_type().map(ToOwned::to_owned);
                            let content = field.bytes().await.unwrap().to_vec();
                            result.file = Some((filename, content_type, content));
                        } else {
                            result.fields.insert(name, field.text().await.unwrap());
                        }
                    }
                    *received.lock().await = Some(result);
                    respond(status, body)
                },
            ),
        )
        .with_state(Arc::clone(&received));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });

    let endpoint = format!("http://{addr}/api/contact").parse().unwrap();
    (endpoint, received)
}

fn respond(status: StatusCode, body: serde_json::Value) -> Response {
    (status, Json(body)).into_response()
}

fn form() -> ContactForm {
    ContactForm {
        name: " Иван ".into(),
        phone: "+7 (981) 103-12-03".into(),
        email: "ivan@example.com".into(),
        work_type: "web-dev".into(),
        budget: String::new(),
        message: "Нужен сайт".into(),
        file: None,
    }
}
