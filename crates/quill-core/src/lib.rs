//! quill core library
//!
//! Configuration, content model, site sources and the read-only catalog
//! for the quill blog server.

pub mod catalog;
pub mod config;
pub mod content;
pub mod error;
pub mod source;
pub mod tags;

pub use catalog::Catalog;
pub use config::{Config, ContentConfig, ServerConfig, Settings};
pub use content::{Page, Post, PostSummary, Sidebar, Tag, TagSummary};
pub use error::{BootError, Result};
pub use source::{DirSource, MemorySource, SiteSource};
