//! End-to-end tests for the quill router over the sample site.

use std::{path::Path, sync::Arc};

use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use quill::server::create_router;
use quill_core::{Config, DirSource};
use quill_render::Site;
use tower::ServiceExt;

const SITE_ROOT: &str = "../../site";

fn router() -> Option<axum::Router> {
    let root = Path::new(SITE_ROOT);
    if !root.exists() {
        return None;
    }
    let config = Config::load(&root.join("config/app.toml")).expect("Config should load");
    let site = Site::boot(config, &DirSource::new(root)).expect("Sample site should boot");
    Some(create_router(Arc::new(site), root))
}

async fn get(uri: &str) -> Option<(StatusCode, String, String)> {
    let router = router()?;
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string())
        .unwrap_or_default();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    Some((status, content_type, String::from_utf8(body.to_vec()).unwrap()))
}

#[tokio::test]
async fn test_home_page() {
    let Some((status, content_type, body)) = get("/").await else {
        return;
    };
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "text/html; charset=utf-8");
    assert!(body.contains("<title>Quill Notes | Quill Notes</title>"));
    assert!(body.contains("href=\"/tag/rust\""));
}

#[tokio::test]
async fn test_post_and_missing_post() {
    let Some((status, _, body)) = get("/hello-world").await else {
        return;
    };
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Welcome. This blog is served by quill."));

    let Some((status, _, body)) = get("/goodbye-world").await else {
        return;
    };
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("<h1>Not Found</h1>"));
}

#[tokio::test]
async fn test_feed_content_types() {
    let Some((status, content_type, _)) = get("/rss").await else {
        return;
    };
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "application/atom+xml; charset=utf-8");

    let Some((_, content_type, _)) = get("/sitemap").await else {
        return;
    };
    assert_eq!(content_type, "text/xml; charset=utf-8");
}

#[tokio::test]
async fn test_static_files() {
    let Some((status, _, body)) = get("/humans.txt").await else {
        return;
    };
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Software: quill"));

    let Some((status, _, body)) = get("/assets/css/site.css").await else {
        return;
    };
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(".sidebar"));
}
