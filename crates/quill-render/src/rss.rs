//! Feed projection.
//!
//! The feed is a view over the settings and the full post listing, rendered
//! through the `rss` template on every request.

use chrono::Utc;
use quill_core::{Catalog, Post, Settings};
use serde::Serialize;
use tracing::debug;

/// Data for the `rss` template.
#[derive(Debug, Serialize)]
pub struct FeedProjection<'a> {
    /// Site-wide settings.
    pub site: &'a Settings,

    /// Every post, in listing order.
    pub posts: &'a [Post],

    /// Feed timestamp (RFC 3339): the newest post's machine date, or now
    /// for an empty catalog.
    pub updated: String,
}

impl<'a> FeedProjection<'a> {
    /// Project the feed from the catalog.
    pub fn new(site: &'a Settings, catalog: &'a Catalog) -> Self {
        let posts = catalog.posts();
        let updated = posts
            .first()
            .map(|p| p.machine_date.clone())
            .unwrap_or_else(|| Utc::now().to_rfc3339());

        debug!(count = posts.len(), "projecting feed");
        Self {
            site,
            posts,
            updated,
        }
    }
}
