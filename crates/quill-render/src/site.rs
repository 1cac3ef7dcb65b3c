//! The booted site: settings, catalog and compiled templates.

use quill_core::{Catalog, Config, Settings, SiteSource};
use tracing::{info, warn};

use crate::{
    context::SiteContext,
    error::Result,
    pipeline::{RenderPipeline, View, ViewKey},
    rss::FeedProjection,
    sitemap::SitemapProjection,
    template::{ErrorPage, Feed, TemplateRegistry},
};

/// Everything a request needs, built once before the first connection and
/// never mutated afterwards.
#[derive(Debug)]
pub struct Site {
    config: Config,
    catalog: Catalog,
    templates: TemplateRegistry,
}

impl Site {
    /// Run the boot sequence: templates, catalog (with tags and sidebar),
    /// then page body templates. Any failure aborts the boot.
    pub fn boot(config: Config, source: &dyn SiteSource) -> quill_core::Result<Self> {
        info!("loading templates");
        let mut templates = TemplateRegistry::compile_layouts(&config.content, source)?;

        let catalog = Catalog::load(&config.content, source)?;

        info!("loading page templates");
        templates.compile_pages(&config.content, source, catalog.page_slugs())?;

        info!(title = %config.site.title, "site ready");
        Ok(Self {
            config,
            catalog,
            templates,
        })
    }

    /// The full configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Site-wide settings.
    pub fn settings(&self) -> &Settings {
        &self.config.site
    }

    /// The catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The compiled templates.
    pub fn templates(&self) -> &TemplateRegistry {
        &self.templates
    }

    /// Resolve a routed key against the catalog.
    pub fn view(&self, key: &ViewKey) -> Option<View<'_>> {
        match key {
            ViewKey::Index => Some(View::Index),
            ViewKey::Archive => Some(View::Archive),
            ViewKey::Page(slug) => self.catalog.page(slug).map(View::Page),
            ViewKey::Post(slug) => self.catalog.post(slug).map(View::Post),
            ViewKey::Tag(name) => self.catalog.tag(name).map(View::Tag),
        }
    }

    /// A render pipeline over this site.
    pub fn pipeline(&self) -> RenderPipeline<'_> {
        RenderPipeline::new(self)
    }

    /// Render an error document, falling back to a fixed body.
    pub fn render_error(&self, page: ErrorPage) -> String {
        let ctx = SiteContext {
            site: self.settings(),
        };
        self.templates.render(page.name(), &ctx).unwrap_or_else(|e| {
            warn!(template = page.name(), error = %e, "error template failed");
            page.fallback().to_string()
        })
    }

    /// Render a feed over the complete, current listings.
    pub fn render_feed(&self, feed: Feed) -> Result<String> {
        match feed {
            Feed::Rss => {
                let projection = FeedProjection::new(self.settings(), &self.catalog);
                self.templates.render(feed.name(), &projection)
            }
            Feed::Sitemap => {
                let projection = SitemapProjection::new(self.settings(), &self.catalog);
                self.templates.render(feed.name(), &projection)
            }
        }
    }
}
