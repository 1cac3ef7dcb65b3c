//! Content types: pages, posts, tags and the sidebar snapshot.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A static page from the pages listing.
///
/// Also used as the header/footer descriptor for views that have no page
/// of their own (archive, tag listings, single posts).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Unique key, also the name of the body template.
    pub slug: String,

    /// Page title.
    pub title: String,

    /// Comma separated keywords for meta tags.
    #[serde(default)]
    pub keywords: String,

    /// Description for meta tags.
    #[serde(default)]
    pub description: String,
}

impl Page {
    /// Create a descriptor with only a slug and a title.
    pub fn synthetic(slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            keywords: String::new(),
            description: String::new(),
        }
    }
}

/// A blog post from the posts listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Post title.
    pub title: String,

    /// Unique key, also the name of the content fragment.
    pub slug: String,

    /// Human readable date.
    pub date: String,

    /// Sortable date used by feeds and the sitemap.
    pub machine_date: String,

    /// Comma separated keywords for meta tags.
    #[serde(default)]
    pub keywords: String,

    /// Description for meta tags and feed summaries.
    #[serde(default)]
    pub description: String,

    /// Rendered body, attached from the content fragment at load time.
    #[serde(default)]
    pub content: String,

    /// Tag names in listing order.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Post {
    /// Header/footer descriptor for the single-post view.
    pub fn descriptor(&self) -> Page {
        Page {
            slug: self.slug.clone(),
            title: self.title.clone(),
            keywords: self.keywords.clone(),
            description: self.description.clone(),
        }
    }

    /// Lightweight summary used by the sidebar.
    pub fn summary(&self) -> PostSummary {
        PostSummary {
            title: self.title.clone(),
            slug: self.slug.clone(),
            date: self.date.clone(),
        }
    }
}

/// A tag and the posts that carry it.
///
/// A tag never owns posts: each entry maps a post title to the post's
/// position in the catalog's post listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    /// Tag name.
    pub title: String,

    /// Post title -> index into the post listing, in catalog order.
    pub posts_by_title: IndexMap<String, usize>,
}

impl Tag {
    /// Create an empty tag.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            posts_by_title: IndexMap::new(),
        }
    }

    /// Number of posts referenced by this tag.
    pub fn len(&self) -> usize {
        self.posts_by_title.len()
    }

    /// Whether the tag references no posts. Never true for an indexed tag.
    pub fn is_empty(&self) -> bool {
        self.posts_by_title.is_empty()
    }
}

/// Sidebar entry for a recent post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostSummary {
    pub title: String,
    pub slug: String,
    pub date: String,
}

/// Sidebar entry for a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagSummary {
    pub title: String,
    pub count: usize,
}

/// Immutable sidebar shared by every request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Sidebar {
    /// The first `min(5, total)` posts in catalog order.
    pub recent: Vec<PostSummary>,

    /// Every tag, sorted by name.
    pub tags: Vec<TagSummary>,

    /// Every page, once per slug.
    pub pages: Vec<Page>,
}
