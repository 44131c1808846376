#![deny(missing_docs)]
//! A web server for the cipher workbench, exposing every page as a JSON API.

use cipher_core::client::DEFAULT_SERVICE_URL;
use cipher_core::preferences::JsonFileStore;
use cipher_web::{WebState, app};
use local_ip_address::local_ip;
use log::{error, info, warn};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    env_logger::init();

    // Configuration comes from the environment, with local defaults.
    let port = env::var("CIPHER_WEB_PORT")
        .ok()
        .and_then(|raw| raw.parse::<u16>().ok())
        .unwrap_or(3000);
    let service_url =
        env::var("CIPHER_SERVICE_URL").unwrap_or_else(|_| DEFAULT_SERVICE_URL.to_owned());
    let prefs_path = env::var("CIPHER_WEB_PREFS")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(".cipher_prefs.json"));

    let store = JsonFileStore::open(&prefs_path).unwrap_or_else(|e| {
        error!("Failed to load preferences from '{}': {e}", prefs_path.display());
        std::process::exit(1);
    });
    println!("Using preferences at: {}", prefs_path.display());
    println!("Forwarding submissions to: {service_url}");

    let state = Arc::new(WebState::new(&service_url, Box::new(store)));
    let router = app(state);

    // Run the server.
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("listening on:");
    match local_ip() {
        Ok(my_local_ip) => println!("  - http://{my_local_ip}:{port}/api/ciphers"),
        Err(e) => warn!("Could not determine the local IP address: {e}"),
    }
    println!("  - http://127.0.0.1:{port}/api/ciphers");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };
    info!("Server started on {addr}");
    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {e}");
        std::process::exit(1);
    }
}
