//! Static file serving for the ChromaEuclid explorer page.
//!
//! The frontend is embedded into the binary at compile time. Unknown paths
//! that don't look like files fall back to `index.html` so client-side routes
//! keep working after a reload.

use axum::{
    body::Body,
    extract::Request,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use rust_embed::Embed;
use std::borrow::Cow;
use std::path::Path;

/// Embedded static files from the `web/build` directory.
#[derive(Embed)]
#[folder = "web/build"]
#[include = "*.html"]
#[include = "*.js"]
#[include = "*.css"]
#[include = "*.svg"]
#[include = "*.ico"]
#[include = "assets/*"]
pub struct StaticAssets;

/// Fallback handler for every path the API router does not match.
///
/// Lookup order is the exact path, then the path with `.html` appended.
/// Anything else that has no file extension gets `index.html` so the
/// explorer can be reloaded on any route. Missing files and unknown `/api`
/// routes are 404s.
pub async fn serve_static(request: Request) -> Response {
    let path = request.uri().path().trim_start_matches('/');
    let path = if path.is_empty() { "index.html" } else { path };

    if let Some((name, data)) = find_asset(path) {
        return file_response(&name, data);
    }

    let has_extension = Path::new(path)
        .extension()
        .is_some_and(|ext| !ext.is_empty());
    if has_extension || path == "api" || path.starts_with("api/") {
        return not_found();
    }

    match StaticAssets::get("index.html") {
        Some(index) => file_response("index.html", index.data),
        None => not_found(),
    }
}

/// Finds an embedded file, allowing `/about` to resolve to `about.html`.
fn find_asset(path: &str) -> Option<(String, Cow<'static, [u8]>)> {
    [path.to_string(), format!("{path}.html")]
        .into_iter()
        .find_map(|name| StaticAssets::get(&name).map(|file| (name, file.data)))
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "File not found").into_response()
}

/// Builds a 200 response with content type and caching headers for `name`.
fn file_response(name: &str, data: Cow<'static, [u8]>) -> Response {
    let mime = mime_guess::from_path(name).first_or_octet_stream();

    (
        [
            (header::CONTENT_TYPE, mime.to_string()),
            (header::CACHE_CONTROL, cache_control_for_path(name).to_string()),
        ],
        Body::from(data.into_owned()),
    )
        .into_response()
}

/// Returns the Cache-Control header for a file.
///
/// - Fingerprinted files under `assets/`: one year, immutable
/// - HTML files: always revalidate
/// - Other files: one hour
fn cache_control_for_path(path: &str) -> &'static str {
    if path.starts_with("assets/") {
        "public, max-age=31536000, immutable"
    } else if Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html"))
    {
        "no-cache, must-revalidate"
    } else {
        "public, max-age=3600"
    }
}

/// Returns true if the explorer page was embedded.
#[must_use]
pub fn has_embedded_assets() -> bool {
    StaticAssets::get("index.html").is_some()
}
