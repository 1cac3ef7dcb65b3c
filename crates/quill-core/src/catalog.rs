//! Catalog loading.
//!
//! Reads the page and post listings, attaches post content fragments and
//! builds the slug indices, the tag index and the sidebar snapshot. The
//! resulting [`Catalog`] is immutable.

use std::{collections::HashMap, path::Path};

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::{
    config::ContentConfig,
    content::{Page, Post, Sidebar, Tag, TagSummary},
    error::{BootError, Result},
    source::SiteSource,
    tags::{TagIndex, index_tags},
};

/// Number of posts in the sidebar's recent list.
pub const RECENT_POSTS: usize = 5;

/// Read-only pages, posts, tags and sidebar, built once at boot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pages: Vec<Page>,
    posts: Vec<Post>,
    page_index: HashMap<String, usize>,
    post_index: HashMap<String, usize>,
    tags: TagIndex,
    sidebar: Sidebar,
}

impl Catalog {
    /// Load listings and post fragments from `source`.
    ///
    /// Any unreadable or malformed listing and any missing fragment is an
    /// error; there is no partial catalog.
    pub fn load(content: &ContentConfig, source: &dyn SiteSource) -> Result<Self> {
        info!("loading pages");
        let pages: Vec<Page> = read_listing(source, &content.pages_listing)?;

        info!("loading posts");
        let mut posts: Vec<Post> = read_listing(source, &content.posts_listing)?;
        for post in &mut posts {
            let path = content.post_fragment(&post.slug);
            post.content = source
                .read_to_string(&path)
                .map_err(|e| BootError::missing_fragment(&post.slug, &path, e))?;
            debug!(slug = %post.slug, bytes = post.content.len(), "attached post content");
        }

        Ok(Self::from_listings(pages, posts))
    }

    /// Build the indices from already loaded listings.
    pub fn from_listings(pages: Vec<Page>, posts: Vec<Post>) -> Self {
        let page_index = slug_index("page", pages.iter().map(|p| p.slug.as_str()));
        let post_index = slug_index("post", posts.iter().map(|p| p.slug.as_str()));

        info!("loading tags");
        let tags = index_tags(&posts);

        let sidebar = Sidebar {
            recent: posts.iter().take(RECENT_POSTS).map(Post::summary).collect(),
            tags: tags
                .values()
                .map(|t| TagSummary {
                    title: t.title.clone(),
                    count: t.len(),
                })
                .collect(),
            pages: pages
                .iter()
                .enumerate()
                .filter(|(i, p)| page_index.get(&p.slug) == Some(i))
                .map(|(_, p)| p.clone())
                .collect(),
        };

        info!(
            pages = page_index.len(),
            posts = post_index.len(),
            tags = tags.len(),
            "catalog loaded"
        );

        Self {
            pages,
            posts,
            page_index,
            post_index,
            tags,
            sidebar,
        }
    }

    /// Every page in listing order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Every post in listing order, which is also display and recency order.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Look up a page by slug.
    pub fn page(&self, slug: &str) -> Option<&Page> {
        self.page_index.get(slug).map(|&i| &self.pages[i])
    }

    /// Look up a post by slug.
    pub fn post(&self, slug: &str) -> Option<&Post> {
        self.post_index.get(slug).map(|&i| &self.posts[i])
    }

    /// Slugs of pages that survive collisions, in listing order.
    pub fn page_slugs(&self) -> impl Iterator<Item = &str> {
        self.sidebar.pages.iter().map(|p| p.slug.as_str())
    }

    /// The tag index, sorted by name.
    pub fn tags(&self) -> &TagIndex {
        &self.tags
    }

    /// Look up a tag by name.
    pub fn tag(&self, name: &str) -> Option<&Tag> {
        self.tags.get(name)
    }

    /// Posts carrying `tag`, in catalog order.
    pub fn tag_posts<'a>(&'a self, tag: &'a Tag) -> impl Iterator<Item = &'a Post> + 'a {
        tag.posts_by_title.values().map(|&i| &self.posts[i])
    }

    /// The sidebar snapshot.
    pub fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }
}

fn read_listing<T: DeserializeOwned>(source: &dyn SiteSource, path: &Path) -> Result<Vec<T>> {
    let bytes = source.read(path).map_err(|e| BootError::read(path, e))?;
    serde_json::from_slice(&bytes).map_err(|e| BootError::listing(path, e))
}

/// Slug -> position of the last entry carrying it.
fn slug_index<'a>(kind: &str, slugs: impl Iterator<Item = &'a str>) -> HashMap<String, usize> {
    let mut index = HashMap::new();
    for (position, slug) in slugs.enumerate() {
        if let Some(previous) = index.insert(slug.to_string(), position) {
            warn!(kind, slug, previous, position, "duplicate slug, later entry wins");
        }
    }
    index
}
