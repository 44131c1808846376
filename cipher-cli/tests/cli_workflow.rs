#![allow(missing_docs)]
use std::fs;
use std::net::SocketAddr;
use std::process::Command;
use std::sync::mpsc;
use std::thread;

use assert_cmd::prelude::*;
use axum::routing::post;
use axum::{Json, Router};
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::tempdir;
use tokio::net::TcpListener;

/// Echoes the request fields back as a two-section report.
async fn echo(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "success": true,
        "sections": [
            {
                "section": "Request",
                "subsections": [{ "title": "Cipher", "content": body["cipher"].as_str().unwrap_or("none") }]
            },
            {
                "section": "Fields",
                "subsections": [{ "title": "Body", "content": body.to_string() }]
            }
        ]
    }))
}

/// Runs a stand-in computation service on its own thread and returns its URL.
fn spawn_service() -> String {
    let (tx, rx) = mpsc::channel::<SocketAddr>();
    thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async move {
            let app = Router::new()
                .route("/api/co1", post(echo))
                .route("/api/math-ops", post(echo))
                .route(
                    "/api/rsa",
                    post(|| async { Json(json!({ "success": false, "error": "p is not prime" })) }),
                );
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });
    format!("http://{}", rx.recv().unwrap())
}

fn cipher_cli() -> Command {
    let mut cmd = Command::cargo_bin("cipher-cli").expect("Failed to find cipher-cli binary");
    cmd.env_remove("CIPHER_SERVICE_URL").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_key_order() {
    cipher_cli()
        .arg("key-order")
        .arg("data")
        .assert()
        .success()
        .stdout("3 1 4 2\n");
}

#[test]
fn test_key_order_empty_keyword() {
    cipher_cli()
        .arg("key-order")
        .arg("42")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Keyword cannot be empty"));
}

#[test]
fn test_rejection_lists_every_error() {
    // Nothing listens here; a rejected submission must not try to connect.
    cipher_cli()
        .arg("--service-url")
        .arg("http://127.0.0.1:1")
        .arg("rsa")
        .args(["-p", "1", "-q", "x", "-e", "17", "-m", "-3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("p must be a prime number ≥ 2"))
        .stderr(predicate::str::contains("q must be a prime number ≥ 2"))
        .stderr(predicate::str::contains("Message m must be ≥ 0"))
        .stderr(predicate::str::contains("Error connecting").not());
}

#[test]
fn test_hill_oversized_matrix_is_rejected() {
    cipher_cli()
        .arg("--service-url")
        .arg("http://127.0.0.1:1")
        .arg("hill")
        .arg("ABCD")
        .arg("--size")
        .arg("100000")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Matrix size must be between 2 and 5"))
        .stderr(predicate::str::contains("Error connecting").not());
}

#[test]
fn test_unreachable_service() {
    cipher_cli()
        .arg("--service-url")
        .arg("http://127.0.0.1:1")
        .arg("gcd")
        .arg("12")
        .arg("18")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error connecting to server"));
}

#[test]
fn test_keyed_report_end_to_end() {
    // 1. Setup
    let url = spawn_service();

    // 2. Encrypt with the derived column order
    let output = cipher_cli()
        .arg("--service-url")
        .arg(&url)
        .arg("--digest")
        .arg("keyed")
        .arg("attack at dawn")
        .arg("--keyword")
        .arg("data")
        .output()
        .expect("Failed to run keyed");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();

    // 3. Both sections are shown, expanded, with the request echoed back
    assert!(stdout.starts_with("▼ 1. Request\n  [Cipher]\nkeyed\n"));
    assert!(stdout.contains("▼ 2. Fields"));
    assert!(stdout.contains(r#""columnOrder":[3,1,4,2]"#));
    assert!(stdout.contains(r#""plaintext":"ATTACKATDAWN""#));
    assert!(stdout.lines().last().unwrap().starts_with("Digest: "));
}

#[test]
fn test_collapse_and_json() {
    let url = spawn_service();

    cipher_cli()
        .arg("--service-url")
        .arg(&url)
        .arg("--collapse")
        .arg("2")
        .arg("mod-exp")
        .args(["4", "13", "497"])
        .assert()
        .success()
        .stdout(predicate::str::contains("▶ 2. Fields"))
        .stdout(predicate::str::contains("[Cipher]\nnone"))
        .stdout(predicate::str::contains("[Body]").not());

    let output = cipher_cli()
        .arg("--service-url")
        .arg(&url)
        .arg("--json")
        .arg("--collapse")
        .arg("1")
        .arg("rail-fence")
        .arg("WEAREDISCOVERED")
        .arg("--rails")
        .arg("3")
        .arg("--decrypt")
        .output()
        .expect("Failed to run rail-fence");
    assert!(output.status.success());
    let view: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(view["kind"], "report");
    assert_eq!(view["blocks"][0]["expanded"], false);
    assert_eq!(view["blocks"][1]["expanded"], true);
    assert_eq!(view["blocks"][0]["subsections"][0]["content"], "rail_fence");
}

#[test]
fn test_service_failure_is_reported() {
    let url = spawn_service();

    cipher_cli()
        .arg("--service-url")
        .arg(&url)
        .arg("rsa")
        .args(["-p", "61", "-q", "53", "-e", "17", "-m", "65"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("p is not prime"));
}

#[test]
fn test_theme_toggle_persists() {
    // 1. Setup
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let prefs_path = temp_dir.path().join("prefs.json");

    // 2. Starts light
    cipher_cli()
        .arg("--prefs")
        .arg(&prefs_path)
        .arg("theme")
        .arg("show")
        .assert()
        .success()
        .stdout("light\n");

    // 3. Toggle writes the file
    cipher_cli()
        .arg("--prefs")
        .arg(&prefs_path)
        .arg("theme")
        .arg("toggle")
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme set to dark"));
    let saved = fs::read_to_string(&prefs_path).expect("Failed to read prefs file");
    assert!(saved.contains("\"dark\""));

    // 4. A later run sees the saved theme
    cipher_cli()
        .arg("--prefs")
        .arg(&prefs_path)
        .arg("theme")
        .arg("show")
        .assert()
        .success()
        .stdout("dark\n");
}
