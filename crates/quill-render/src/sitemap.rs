//! Sitemap projection.

use quill_core::{Catalog, Page, Post, Settings};
use serde::Serialize;
use tracing::debug;

/// Data for the `sitemap` template.
#[derive(Debug, Serialize)]
pub struct SitemapProjection<'a> {
    pub site: &'a Settings,

    /// Every page, in listing order.
    pub pages: &'a [Page],

    /// Every post, in listing order.
    pub posts: &'a [Post],
}

impl<'a> SitemapProjection<'a> {
    /// Project the sitemap from the catalog.
    pub fn new(site: &'a Settings, catalog: &'a Catalog) -> Self {
        debug!(
            pages = catalog.pages().len(),
            posts = catalog.posts().len(),
            "projecting sitemap"
        );
        Self {
            site,
            pages: catalog.pages(),
            posts: catalog.posts(),
        }
    }
}
