//! Development server for the Vitrina page
//!
//! Serves `web/` (the page, its stylesheet and the wasm-pack output in
//! `web/pkg`) with MIME types browsers accept for module scripts and wasm.
//! `PORT` and `VITRINA_WEB_ROOT` override the defaults.

use axum::{
    body::Body,
    http::{header, HeaderValue, Request, StatusCode},
    response::Response,
    routing::get_service,
    Router,
};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tower_http::services::ServeDir;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_ROOT: &str = "web";

const HTML: &str = "text/html; charset=utf-8";

/// Extension to content type, for the types the page loads
const CONTENT_TYPES: &[(&str, &str)] = &[
    ("html", HTML),
    ("js", "application/javascript; charset=utf-8"),
    ("mjs", "application/javascript; charset=utf-8"),
    ("wasm", "application/wasm"),
    ("css", "text/css; charset=utf-8"),
    ("json", "application/json; charset=utf-8"),
];

#[tokio::main]
async fn main() {
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let root = std::env::var_os("VITRINA_WEB_ROOT")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT));

    if !root.join("index.html").is_file() {
        eprintln!("warning: {} has no index.html", root.display());
    }
    if !root.join("pkg").is_dir() {
        eprintln!(
            "warning: {}/pkg is missing, build it with `wasm-pack build crates/vitrina-web --target web --out-dir ../../web/pkg`",
            root.display()
        );
    }

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    println!("vitrina: serving {} at http://{}", root.display(), addr);
    if let Err(e) = axum::serve(listener, app(&root)).await {
        eprintln!("Server error: {}", e);
    }
}

/// Static file router over `root`
fn app(root: &Path) -> Router {
    let files = ServeDir::new(root).precompressed_gzip().precompressed_br();
    Router::new()
        .fallback_service(get_service(files).handle_error(|_| async {
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }))
        .layer(axum::middleware::from_fn(add_headers))
}

/// Content type for a served path, when the default guess needs fixing
fn content_type_for(path: &str) -> Option<&'static str> {
    if path.ends_with('/') {
        return Some(HTML);
    }
    let file = path.rsplit('/').next().unwrap_or(path);
    let (_, extension) = file.rsplit_once('.')?;
    CONTENT_TYPES
        .iter()
        .find(|(ext, _)| ext.eq_ignore_ascii_case(extension))
        .map(|(_, content_type)| *content_type)
}

/// Fix MIME types and disable caching so rebuilt wasm is always picked up
async fn add_headers(request: Request<Body>, next: axum::middleware::Next) -> Response<Body> {
    let content_type = content_type_for(request.uri().path());

    let mut response = next.run(request).await;
    let success = response.status().is_success();
    let headers = response.headers_mut();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));

    // Error bodies keep their own type
    if let (true, Some(content_type)) = (success, content_type) {
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    }

    response
}
