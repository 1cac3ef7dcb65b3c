//! Tag indexing.

use std::collections::BTreeMap;

use tracing::debug;

use crate::content::{Post, Tag};

/// Tag name -> tag, sorted by name.
pub type TagIndex = BTreeMap<String, Tag>;

/// Derive the tag index from the ordered post listing.
///
/// A tag exists iff at least one post lists it. Within a tag, posts are
/// keyed by title; a later post with an already indexed title replaces the
/// earlier reference without moving it.
pub fn index_tags(posts: &[Post]) -> TagIndex {
    let mut index = TagIndex::new();

    for (position, post) in posts.iter().enumerate() {
        for name in &post.tags {
            index
                .entry(name.clone())
                .or_insert_with(|| Tag::new(name.clone()))
                .posts_by_title
                .insert(post.title.clone(), position);
        }
    }

    debug!(tags = index.len(), "tag index built");
    index
}
