//! quill render library
//!
//! Template compilation and response composition for the quill blog server.
//!
//! # Modules
//!
//! - [`template`] - Template compiler and named template registry
//! - [`pipeline`] - Ordered fragment streaming for HTML views
//! - [`site`] - The immutable site value built at boot
//! - [`rss`] - Feed projection
//! - [`sitemap`] - Sitemap projection

pub mod context;
pub mod error;
pub mod pipeline;
pub mod rss;
pub mod site;
pub mod sitemap;
pub mod template;

#[cfg(test)]
mod test_support;

pub use error::{PipelineError, SinkError, TemplateError};
pub use pipeline::{Fragment, FragmentSink, RenderPipeline, View, ViewKey};
pub use rss::FeedProjection;
pub use site::Site;
pub use sitemap::SitemapProjection;
pub use template::{ErrorPage, Feed, Layout, TemplateRegistry};
