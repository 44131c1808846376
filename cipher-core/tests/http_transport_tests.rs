#![allow(missing_docs)]
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use cipher_core::client::{HttpTransport, Transport};
use cipher_core::coordinator::{Coordinator, FailureKind, Outcome};
use cipher_core::input::{RawInput, RsaInput};
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// Serves a stand-in computation service on an ephemeral port and returns its base URL.
async fn spawn_service() -> String {
    async fn rsa(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        if body["e"] == 4 {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "success": false, "error": "e must be coprime with phi(n)" })),
            );
        }
        let n = body["p"].as_i64().unwrap_or_default() * body["q"].as_i64().unwrap_or_default();
        (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "sections": [
                    { "section": "Key Generation", "subsections": [{ "title": "n", "content": n.to_string() }] }
                ]
            })),
        )
    }

    let app = Router::new()
        .route("/api/rsa", post(rsa))
        .route("/api/euler", post(|| async { "not json" }));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn rsa_input(e: &str) -> RawInput {
    RawInput::Rsa(RsaInput {
        p: "61".into(),
        q: "53".into(),
        e: e.into(),
        m: "65".into(),
    })
}

#[tokio::test]
async fn test_post_round_trip() {
    let base = spawn_service().await;
    let transport = HttpTransport::new(&format!("{base}/"));
    assert_eq!(transport.base_url(), base);

    let reply = transport
        .post("/api/rsa", &json!({ "p": 61, "q": 53, "e": 17, "m": 65 }))
        .await
        .unwrap();
    assert_eq!(reply["success"], true);
    assert_eq!(reply["sections"][0]["subsections"][0]["content"], "3233");
}

#[tokio::test]
async fn test_error_status_body_is_still_read() {
    let base = spawn_service().await;
    let coordinator = Coordinator::new(HttpTransport::new(&base));

    let Outcome::Failed(diagnostic) = coordinator.submit(&rsa_input("4")).await else {
        panic!("expected failure");
    };
    assert_eq!(diagnostic.kind, FailureKind::Service);
    assert_eq!(diagnostic.message, "e must be coprime with phi(n)");
}

#[tokio::test]
async fn test_report_through_http() {
    let base = spawn_service().await;
    let coordinator = Coordinator::new(HttpTransport::new(&base));

    let Outcome::Rendered(report) = coordinator.submit(&rsa_input("17")).await else {
        panic!("expected a report");
    };
    assert_eq!(report.sections[0].title, "Key Generation");
}

#[tokio::test]
async fn test_non_json_body_is_malformed() {
    let base = spawn_service().await;
    let coordinator = Coordinator::new(HttpTransport::new(&base));
    let input = RawInput::Euler(cipher_core::input::PowerInput {
        base: "3".into(),
        exponent: "5".into(),
        modulus: "7".into(),
    });

    let Outcome::Failed(diagnostic) = coordinator.submit(&input).await else {
        panic!("expected failure");
    };
    assert_eq!(diagnostic.kind, FailureKind::MalformedResponse);
    assert_eq!(diagnostic.message, "Invalid response format");
}

#[tokio::test]
async fn test_unreachable_service() {
    // Bind then drop a listener to get a port nothing is serving on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let coordinator = Coordinator::new(HttpTransport::new(&format!("http://{addr}")));
    let Outcome::Failed(diagnostic) = coordinator.submit(&rsa_input("17")).await else {
        panic!("expected failure");
    };
    assert_eq!(diagnostic.kind, FailureKind::Transport);
    assert!(diagnostic.message.starts_with("Error connecting to server: "));
}
