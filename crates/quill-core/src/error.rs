//! Boot-time error types.
//!
//! Everything in here is fatal: the server refuses to start rather than
//! serve a partially loaded catalog. Request-scoped failures live in
//! `quill-render`.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using `BootError`.
pub type Result<T> = std::result::Result<T, BootError>;

/// Errors raised while loading settings, listings, fragments or templates.
#[derive(Error, Debug)]
pub enum BootError {
    /// Configuration loading or validation error.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A pages or posts listing could not be read or deserialized.
    #[error("Listing error in {path}: {source}")]
    Listing {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A listing or layout file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A post has no content fragment, or a page has no body template.
    #[error("Missing fragment for '{slug}' at {path}: {source}")]
    MissingFragment {
        slug: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A template source failed to parse.
    #[error("Template error in {name}: {message}")]
    Template { name: String, message: String },

    /// File system I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Generic configuration crate error.
    #[error("Config crate error: {0}")]
    ConfigCrate(#[from] config::ConfigError),
}

impl BootError {
    /// Create a new configuration error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source.
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new listing error.
    pub fn listing(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Listing {
            path: path.into(),
            source,
        }
    }

    /// Create a new read error.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Create a new missing-fragment error.
    pub fn missing_fragment(
        slug: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::MissingFragment {
            slug: slug.into(),
            path: path.into(),
            source,
        }
    }

    /// Create a new template error.
    pub fn template(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Template {
            name: name.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err = BootError::config("missing field");
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("missing field"));
    }

    #[test]
    fn test_listing_error() {
        let source = serde_json::from_str::<Vec<u32>>("{").unwrap_err();
        let err = BootError::listing("data/posts.json", source);
        assert!(err.to_string().contains("Listing error"));
        assert!(err.to_string().contains("data/posts.json"));
    }

    #[test]
    fn test_missing_fragment_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = BootError::missing_fragment("hello", "posts/hello.html", io_err);
        assert!(err.to_string().contains("'hello'"));
        assert!(err.to_string().contains("posts/hello.html"));
    }

    #[test]
    fn test_read_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = BootError::read("data/pages.json", io_err);
        assert_eq!(
            err.to_string(),
            "Failed to read data/pages.json: no such file"
        );
    }

    #[test]
    fn test_template_error() {
        let err = BootError::template("Header", "unclosed block");
        assert!(err.to_string().contains("Template error in Header"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BootError = io_err.into();
        assert!(err.to_string().contains("IO error"));
    }
}
