//! Data handed to templates.

use quill_core::{Page, Post, Settings, Sidebar};
use serde::Serialize;

/// `{site}`: error pages.
#[derive(Debug, Serialize)]
pub struct SiteContext<'a> {
    pub site: &'a Settings,
}

/// `{site, page}`: Header, Footer and page bodies.
#[derive(Debug, Serialize)]
pub struct PageContext<'a> {
    pub site: &'a Settings,
    pub page: &'a Page,
}

/// `{site, sidebar}`.
#[derive(Debug, Serialize)]
pub struct SidebarContext<'a> {
    pub site: &'a Settings,
    pub sidebar: &'a Sidebar,
}

/// `{site, post}`: Post and Comments.
#[derive(Debug, Serialize)]
pub struct PostContext<'a> {
    pub site: &'a Settings,
    pub post: &'a Post,
}

/// `{site, posts}`: Archive.
#[derive(Debug, Serialize)]
pub struct ArchiveContext<'a> {
    pub site: &'a Settings,
    pub posts: &'a [Post],
}
