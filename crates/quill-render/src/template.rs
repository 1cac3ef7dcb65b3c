//! Template compilation.
//!
//! Every template is parsed once at boot into a handlebars registry running
//! in strict mode. Parse failures are boot errors; execution failures (a
//! field missing from the data, say) surface per request as
//! [`TemplateError`].

use std::fmt;

use handlebars::Handlebars;
use quill_core::{BootError, ContentConfig, SiteSource};
use serde::Serialize;
use tracing::debug;

use crate::error::{Result, TemplateError};

/// Layout fragments shared by every HTML view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Header,
    Sidebar,
    Post,
    Archive,
    Comments,
    Footer,
}

impl Layout {
    /// All layouts, in registration order.
    pub const ALL: [Layout; 6] = [
        Layout::Header,
        Layout::Sidebar,
        Layout::Post,
        Layout::Archive,
        Layout::Comments,
        Layout::Footer,
    ];

    /// Registry name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Header => "Header",
            Self::Sidebar => "Sidebar",
            Self::Post => "Post",
            Self::Archive => "Archive",
            Self::Comments => "Comments",
            Self::Footer => "Footer",
        }
    }

    /// Source file inside the templates directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Header => "header.html",
            Self::Sidebar => "sidebar.html",
            Self::Post => "post.html",
            Self::Archive => "archive.html",
            Self::Comments => "comments.html",
            Self::Footer => "footer.html",
        }
    }
}

/// Standalone error documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPage {
    NotFound,
    Internal,
}

impl ErrorPage {
    pub const ALL: [ErrorPage; 2] = [ErrorPage::NotFound, ErrorPage::Internal];

    /// Registry name.
    pub fn name(self) -> &'static str {
        match self {
            Self::NotFound => "404",
            Self::Internal => "500",
        }
    }

    /// Source file inside the templates directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::NotFound => "errors/404.html",
            Self::Internal => "errors/500.html",
        }
    }

    /// Body used when the template itself cannot be rendered.
    pub fn fallback(self) -> &'static str {
        match self {
            Self::NotFound => "<h1>404 Not Found</h1>",
            Self::Internal => "<h1>500 Internal Server Error</h1>",
        }
    }
}

/// Whole-document feed templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    Rss,
    Sitemap,
}

impl Feed {
    pub const ALL: [Feed; 2] = [Feed::Rss, Feed::Sitemap];

    /// Registry name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Rss => "rss",
            Self::Sitemap => "sitemap",
        }
    }

    /// Source file inside the templates directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Rss => "rss.xml",
            Self::Sitemap => "sitemap.xml",
        }
    }

    /// Response content type.
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Rss => "application/atom+xml; charset=utf-8",
            Self::Sitemap => "text/xml; charset=utf-8",
        }
    }
}

/// Registry name of a page's body template.
pub fn page_template_name(slug: &str) -> String {
    format!("page/{slug}")
}

/// Compiled templates, keyed by name.
#[derive(Clone)]
pub struct TemplateRegistry {
    handlebars: Handlebars<'static>,
}

impl fmt::Debug for TemplateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.handlebars.get_templates().keys().collect();
        names.sort();
        f.debug_struct("TemplateRegistry")
            .field("templates", &names)
            .finish()
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRegistry {
    /// Create an empty strict-mode registry.
    #[must_use]
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        Self { handlebars }
    }

    /// Compile the layout, error and feed templates.
    pub fn compile_layouts(
        content: &ContentConfig,
        source: &dyn SiteSource,
    ) -> quill_core::Result<Self> {
        let mut registry = Self::new();

        let files = Layout::ALL
            .iter()
            .map(|l| (l.name(), l.file_name()))
            .chain(ErrorPage::ALL.iter().map(|e| (e.name(), e.file_name())))
            .chain(Feed::ALL.iter().map(|f| (f.name(), f.file_name())));

        for (name, file) in files {
            let path = content.template(file);
            let text = source
                .read_to_string(&path)
                .map_err(|e| BootError::read(&path, e))?;
            registry.register(name, &text)?;
        }

        Ok(registry)
    }

    /// Compile one body template per page slug.
    pub fn compile_pages<'a>(
        &mut self,
        content: &ContentConfig,
        source: &dyn SiteSource,
        slugs: impl IntoIterator<Item = &'a str>,
    ) -> quill_core::Result<()> {
        for slug in slugs {
            let path = content.page_template(slug);
            let text = source
                .read_to_string(&path)
                .map_err(|e| BootError::missing_fragment(slug, &path, e))?;
            self.register(&page_template_name(slug), &text)?;
        }
        Ok(())
    }

    /// Parse and register a template.
    pub fn register(&mut self, name: &str, text: &str) -> quill_core::Result<()> {
        self.handlebars
            .register_template_string(name, text)
            .map_err(|e| BootError::template(name, e.to_string()))?;
        debug!(name, "template compiled");
        Ok(())
    }

    /// Check if a template is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }

    /// Render a named template with the given data.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        if !self.contains(name) {
            return Err(TemplateError::NotFound(name.to_string()));
        }
        self.handlebars
            .render(name, data)
            .map_err(|e| TemplateError::Execution {
                name: name.to_string(),
                message: e.to_string(),
            })
    }
}
