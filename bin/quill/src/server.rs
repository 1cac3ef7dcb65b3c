//! HTTP router and request handlers.
//!
//! HTML views are streamed fragment by fragment. The status line is
//! committed when the first fragment arrives: a failure before that yields
//! a clean error response, a failure after it can only append the error
//! body to what the client already has.

use std::{
    convert::Infallible,
    path::{Path as FsPath, PathBuf},
    sync::Arc,
};

use axum::{
    Router,
    body::{Body, Bytes},
    extract::{Path, Request, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use quill_render::{
    ErrorPage, Feed, Fragment, FragmentSink, PipelineError, Site, SinkError, ViewKey,
};
use tokio::{runtime::Handle, sync::mpsc, time::Instant};
use tokio_stream::{StreamExt, wrappers::ReceiverStream};
use tower::ServiceExt;
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

/// Fragments buffered between the render task and the connection.
const FRAGMENT_BUFFER: usize = 8;

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Shared, read-only request state.
#[derive(Debug)]
pub struct AppState {
    /// The booted site.
    pub site: Arc<Site>,

    /// Directory holding the designated top-level static files.
    pub static_dir: PathBuf,
}

type SharedState = Arc<AppState>;

/// Create the router for a booted site whose files live under `root`.
pub fn create_router(site: Arc<Site>, root: &FsPath) -> Router {
    let content = &site.config().content;
    let assets_dir = root.join(&content.assets_dir);
    let static_dir = root.join(&content.static_dir);
    let state = Arc::new(AppState { site, static_dir });

    Router::new()
        .route("/", get(index_handler))
        .route("/archive", get(archive_handler))
        .route("/page/", get(index_handler))
        .route("/page/{slug}", get(page_handler))
        .route("/tag/", get(index_handler))
        .route("/tag/{slug}", get(tag_handler))
        .route("/rss", get(rss_handler))
        .route("/sitemap", get(sitemap_handler))
        .route("/{slug}", get(post_handler))
        .nest_service("/assets", ServeDir::new(assets_dir))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index_handler(State(state): State<SharedState>) -> Response {
    stream_view(&state, ViewKey::Index).await
}

async fn archive_handler(State(state): State<SharedState>) -> Response {
    stream_view(&state, ViewKey::Archive).await
}

async fn page_handler(State(state): State<SharedState>, Path(slug): Path<String>) -> Response {
    stream_view(&state, ViewKey::Page(slug)).await
}

async fn tag_handler(State(state): State<SharedState>, Path(slug): Path<String>) -> Response {
    stream_view(&state, ViewKey::Tag(slug)).await
}

/// Post view, unless the slug names a designated static file.
async fn post_handler(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
    request: Request,
) -> Response {
    if state.site.config().server.is_static_file(&slug) {
        let path = state.static_dir.join(&slug);
        let response = match ServeFile::new(path).oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        };
        if response.status() == StatusCode::NOT_FOUND {
            return not_found(&state.site);
        }
        return response.into_response();
    }
    stream_view(&state, ViewKey::Post(slug)).await
}

async fn rss_handler(State(state): State<SharedState>) -> Response {
    feed_response(&state.site, Feed::Rss)
}

async fn sitemap_handler(State(state): State<SharedState>) -> Response {
    feed_response(&state.site, Feed::Sitemap)
}

async fn fallback_handler(State(state): State<SharedState>) -> Response {
    not_found(&state.site)
}

fn not_found(site: &Site) -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(site.render_error(ErrorPage::NotFound)),
    )
        .into_response()
}

fn internal_error(site: &Site) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(site.render_error(ErrorPage::Internal)),
    )
        .into_response()
}

/// Feeds are rendered whole, so a failure is still a clean 500.
fn feed_response(site: &Site, feed: Feed) -> Response {
    match site.render_feed(feed) {
        Ok(xml) => ([(header::CONTENT_TYPE, feed.content_type())], xml).into_response(),
        Err(e) => {
            tracing::error!(feed = feed.name(), error = %e, "feed render failed");
            internal_error(site)
        }
    }
}

/// Hands fragments to the connection task until the deadline passes.
///
/// Runs on a blocking thread. A send waiting on a client that stopped
/// reading is bounded by the same deadline.
struct ChannelSink {
    tx: mpsc::Sender<(Fragment, String)>,
    deadline: Instant,
    runtime: Handle,
}

impl FragmentSink for ChannelSink {
    fn write_fragment(&mut self, fragment: Fragment, html: String) -> Result<(), SinkError> {
        if Instant::now() >= self.deadline {
            return Err(SinkError::DeadlineExceeded);
        }
        let send = tokio::time::timeout_at(self.deadline, self.tx.send((fragment, html)));
        match self.runtime.block_on(send) {
            Ok(Ok(())) => Ok(()),
            Ok(Err(_)) => Err(SinkError::Closed),
            Err(_) => Err(SinkError::DeadlineExceeded),
        }
    }
}

async fn stream_view(state: &AppState, key: ViewKey) -> Response {
    let site = &state.site;

    // Unknown entities are answered before any fragment exists.
    if site.view(&key).is_none() {
        tracing::debug!(?key, "not found");
        return not_found(site);
    }

    let (tx, mut rx) = mpsc::channel(FRAGMENT_BUFFER);
    let deadline = Instant::now() + site.config().server.render_timeout();
    let render_site = Arc::clone(site);
    let runtime = Handle::current();

    tokio::task::spawn_blocking(move || {
        let Some(view) = render_site.view(&key) else {
            return;
        };
        let mut sink = ChannelSink {
            tx,
            deadline,
            runtime,
        };
        match render_site.pipeline().run(view, &mut sink) {
            Ok(()) => tracing::debug!(?key, "response complete"),
            Err(e @ PipelineError::Template { .. }) => {
                tracing::error!(?key, error = %e, "response ended with error body");
            }
            Err(e @ PipelineError::Sink(_)) => {
                tracing::warn!(?key, error = %e, "response truncated");
            }
        }
    });

    let Some(first) = rx.recv().await else {
        tracing::error!("render task produced no output");
        return internal_error(site);
    };

    if first.0 == Fragment::Error {
        // The header itself failed; nothing has been sent yet.
        return (StatusCode::INTERNAL_SERVER_ERROR, Html(first.1)).into_response();
    }

    let stream = tokio_stream::once(first)
        .chain(ReceiverStream::new(rx))
        .map(|(_, html)| Ok::<_, Infallible>(Bytes::from(html)));

    (
        [(header::CONTENT_TYPE, HTML_CONTENT_TYPE)],
        Body::from_stream(stream),
    )
        .into_response()
}
