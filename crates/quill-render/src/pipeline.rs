//! The render pipeline.
//!
//! A view is written as an ordered run of independently rendered
//! fragments: Header, Sidebar, one or more Body fragments, Comments (single
//! posts only), Footer. Each fragment goes to the sink as soon as it is
//! rendered. Nothing is buffered, so nothing can be taken back: when a
//! fragment fails, the error body is appended after whatever the sink has
//! already accepted.

use std::fmt;

use quill_core::{Page, Post, Tag};
use tracing::{debug, error};

use crate::{
    context::{ArchiveContext, PageContext, PostContext, SidebarContext},
    error::{PipelineError, SinkError},
    site::Site,
    template::{ErrorPage, Layout, page_template_name},
};

/// One independently streamed piece of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment {
    Header,
    Sidebar,
    Body,
    Comments,
    Footer,
    /// The internal-error body appended after a failed fragment.
    Error,
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Header => "Header",
            Self::Sidebar => "Sidebar",
            Self::Body => "Body",
            Self::Comments => "Comments",
            Self::Footer => "Footer",
            Self::Error => "Error",
        };
        f.write_str(name)
    }
}

/// Destination of rendered fragments.
pub trait FragmentSink {
    /// Hand one fragment to the client. Accepted bytes cannot be recalled.
    fn write_fragment(&mut self, fragment: Fragment, html: String) -> Result<(), SinkError>;
}

impl FragmentSink for Vec<(Fragment, String)> {
    fn write_fragment(&mut self, fragment: Fragment, html: String) -> Result<(), SinkError> {
        self.push((fragment, html));
        Ok(())
    }
}

/// A resolved view over catalog entries.
#[derive(Debug, Clone, Copy)]
pub enum View<'a> {
    Index,
    Archive,
    Page(&'a Page),
    Post(&'a Post),
    Tag(&'a Tag),
}

/// The owned, routable form of a [`View`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewKey {
    Index,
    Archive,
    Page(String),
    Post(String),
    Tag(String),
}

/// Writes views of one site to fragment sinks.
#[derive(Debug, Clone, Copy)]
pub struct RenderPipeline<'a> {
    site: &'a Site,
}

impl<'a> RenderPipeline<'a> {
    /// Create a pipeline over `site`.
    pub fn new(site: &'a Site) -> Self {
        Self { site }
    }

    /// Stream `view` into `sink`.
    ///
    /// On a template failure the internal-error body is written as a final
    /// [`Fragment::Error`] and the failure is returned. On a sink failure
    /// nothing further is written.
    pub fn run(&self, view: View<'_>, sink: &mut dyn FragmentSink) -> Result<(), PipelineError> {
        let result = self.emit(view, sink);

        if let Err(PipelineError::Template { fragment, source }) = &result {
            error!(%fragment, error = %source, "fragment failed after streaming began");
            let body = self.site.render_error(ErrorPage::Internal);
            if let Err(e) = sink.write_fragment(Fragment::Error, body) {
                debug!(error = %e, "could not append error body");
            }
        }

        result
    }

    /// Header/footer descriptor for a view.
    pub fn descriptor(&self, view: View<'_>) -> Page {
        match view {
            View::Index => self
                .site
                .catalog()
                .page("index")
                .cloned()
                .unwrap_or_else(|| Page::synthetic("index", &self.site.settings().title)),
            View::Archive => Page::synthetic("archive", "Archive"),
            View::Page(page) => page.clone(),
            View::Post(post) => post.descriptor(),
            View::Tag(tag) => Page::synthetic(
                format!("/tag/{}", tag.title),
                format!("Posts Tagged #{}", tag.title),
            ),
        }
    }

    fn emit(&self, view: View<'_>, sink: &mut dyn FragmentSink) -> Result<(), PipelineError> {
        let site = self.site.settings();
        let catalog = self.site.catalog();
        let descriptor = self.descriptor(view);
        let page = PageContext {
            site,
            page: &descriptor,
        };

        self.write(sink, Fragment::Header, Layout::Header.name(), &page)?;
        self.write(
            sink,
            Fragment::Sidebar,
            Layout::Sidebar.name(),
            &SidebarContext {
                site,
                sidebar: catalog.sidebar(),
            },
        )?;

        match view {
            View::Page(p) => {
                self.write(
                    sink,
                    Fragment::Body,
                    &page_template_name(&p.slug),
                    &PageContext { site, page: p },
                )?;
            }
            View::Post(post) => {
                let ctx = PostContext { site, post };
                self.write(sink, Fragment::Body, Layout::Post.name(), &ctx)?;
                self.write(sink, Fragment::Comments, Layout::Comments.name(), &ctx)?;
            }
            View::Archive => {
                self.write(
                    sink,
                    Fragment::Body,
                    Layout::Archive.name(),
                    &ArchiveContext {
                        site,
                        posts: catalog.posts(),
                    },
                )?;
            }
            View::Index => {
                let limit = self.site.config().server.index_posts;
                for post in catalog.posts().iter().take(limit) {
                    self.write_post(sink, post)?;
                }
            }
            View::Tag(tag) => {
                for post in catalog.tag_posts(tag) {
                    self.write_post(sink, post)?;
                }
            }
        }

        self.write(sink, Fragment::Footer, Layout::Footer.name(), &page)
    }

    fn write_post(&self, sink: &mut dyn FragmentSink, post: &Post) -> Result<(), PipelineError> {
        let ctx = PostContext {
            site: self.site.settings(),
            post,
        };
        self.write(sink, Fragment::Body, Layout::Post.name(), &ctx)
    }

    fn write<T: serde::Serialize>(
        &self,
        sink: &mut dyn FragmentSink,
        fragment: Fragment,
        name: &str,
        data: &T,
    ) -> Result<(), PipelineError> {
        let html = self
            .site
            .templates()
            .render(name, data)
            .map_err(|source| PipelineError::Template { fragment, source })?;
        debug!(%fragment, template = name, bytes = html.len(), "fragment rendered");
        sink.write_fragment(fragment, html)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fixture_site, fixture_site_with};

    fn fragments(out: &[(Fragment, String)]) -> Vec<Fragment> {
        out.iter().map(|(f, _)| *f).collect()
    }

    fn run(site: &Site, key: ViewKey) -> (Vec<(Fragment, String)>, Result<(), PipelineError>) {
        let view = site.view(&key).expect("view exists");
        let mut out = Vec::new();
        let result = site.pipeline().run(view, &mut out);
        (out, result)
    }

    /// Refuses every write after the first `accept`.
    struct ClosingSink {
        accept: usize,
        written: Vec<Fragment>,
    }

    impl FragmentSink for ClosingSink {
        fn write_fragment(&mut self, fragment: Fragment, _html: String) -> Result<(), SinkError> {
            if self.written.len() == self.accept {
                return Err(SinkError::Closed);
            }
            self.written.push(fragment);
            Ok(())
        }
    }

    #[test]
    fn test_page_view_order() {
        let site = fixture_site();
        let (out, result) = run(&site, ViewKey::Page("about".to_string()));

        result.unwrap();
        assert_eq!(
            fragments(&out),
            vec![
                Fragment::Header,
                Fragment::Sidebar,
                Fragment::Body,
                Fragment::Footer
            ]
        );
        assert!(out[0].1.contains("About"));
        assert!(out[2].1.contains("<!--page:about-->"));
    }

    #[test]
    fn test_post_view_has_comments() {
        let site = fixture_site();
        let (out, result) = run(&site, ViewKey::Post("a".to_string()));

        result.unwrap();
        assert_eq!(
            fragments(&out),
            vec![
                Fragment::Header,
                Fragment::Sidebar,
                Fragment::Body,
                Fragment::Comments,
                Fragment::Footer
            ]
        );
        assert!(out[0].1.contains("<!--header-->A"));
        assert!(out[2].1.contains("<p>alpha</p>"));
        assert!(out[3].1.contains("<!--comments:a-->"));
    }

    #[test]
    fn test_tag_view_iterates_in_catalog_order() {
        let site = fixture_site();
        let (out, result) = run(&site, ViewKey::Tag("y".to_string()));

        result.unwrap();
        let bodies: Vec<_> = out
            .iter()
            .filter(|(f, _)| *f == Fragment::Body)
            .map(|(_, html)| html.as_str())
            .collect();
        assert_eq!(bodies.len(), 2);
        assert!(bodies[0].contains("<!--post:a-->"));
        assert!(bodies[1].contains("<!--post:b-->"));
        assert!(out[0].1.contains("Posts Tagged #y"));
    }

    #[test]
    fn test_archive_and_index() {
        let site = fixture_site();

        let (out, result) = run(&site, ViewKey::Archive);
        result.unwrap();
        assert_eq!(out.len(), 4);
        assert!(out[2].1.contains("(a)(b)"));
        assert!(out[0].1.contains("Archive"));

        let (out, result) = run(&site, ViewKey::Index);
        result.unwrap();
        assert_eq!(out.len(), 5);
        assert!(out[0].1.contains("Home"));
    }

    #[test]
    fn test_index_respects_limit() {
        let site = fixture_site_with(|config| config.server.index_posts = 1);
        let (out, result) = run(&site, ViewKey::Index);

        result.unwrap();
        assert_eq!(
            fragments(&out),
            vec![
                Fragment::Header,
                Fragment::Sidebar,
                Fragment::Body,
                Fragment::Footer
            ]
        );
    }

    #[test]
    fn test_body_failure_appends_error_after_streamed_fragments() {
        let site = fixture_site();
        let (out, result) = run(&site, ViewKey::Page("broken".to_string()));

        match result {
            Err(PipelineError::Template { fragment, .. }) => assert_eq!(fragment, Fragment::Body),
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(
            fragments(&out),
            vec![Fragment::Header, Fragment::Sidebar, Fragment::Error]
        );
        assert!(out[2].1.contains("<!--500-->"));
    }

    #[test]
    fn test_sink_failure_stops_without_error_body() {
        let site = fixture_site();
        let view = site.view(&ViewKey::Post("a".to_string())).unwrap();
        let mut sink = ClosingSink {
            accept: 2,
            written: Vec::new(),
        };

        let result = site.pipeline().run(view, &mut sink);
        assert!(matches!(result, Err(PipelineError::Sink(SinkError::Closed))));
        assert_eq!(sink.written, vec![Fragment::Header, Fragment::Sidebar]);
    }

    #[test]
    fn test_descriptors() {
        let site = fixture_site();
        let pipeline = site.pipeline();

        assert_eq!(pipeline.descriptor(View::Archive).slug, "archive");
        let tag = site.catalog().tag("x").unwrap();
        let page = pipeline.descriptor(View::Tag(tag));
        assert_eq!(page.slug, "/tag/x");
        assert_eq!(page.title, "Posts Tagged #x");
    }

    #[test]
    fn test_index_descriptor_without_index_page() {
        let site = fixture_site_with(|_| {});
        let pipeline = site.pipeline();
        assert_eq!(pipeline.descriptor(View::Index).title, "Home");

        let bare = crate::test_support::site_without_index_page();
        assert_eq!(bare.pipeline().descriptor(View::Index).title, "Test Blog");
    }
}
