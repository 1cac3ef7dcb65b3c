//! Site configuration management.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::error::{BootError, Result};

/// Main configuration structure for quill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings, shared read-only by every request.
    pub site: Settings,

    /// HTTP server and process settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Locations of listings, fragments, templates and assets.
    #[serde(default)]
    pub content: ContentConfig,
}

/// Site-wide settings exposed to every template as `site`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Public base URL (e.g., "https://example.com").
    pub url: String,

    /// Site title.
    pub title: String,

    /// Site description for meta tags and feeds.
    #[serde(default)]
    pub description: String,

    /// Language code.
    #[serde(default = "default_lang")]
    pub lang: String,

    /// Editor / author contact.
    #[serde(default)]
    pub editor: String,

    /// Webmaster contact.
    #[serde(default)]
    pub webmaster: String,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address to listen on.
    #[serde(default = "default_address")]
    pub address: String,

    /// PID file used by `stop` and `restart`, relative to the site root.
    #[serde(default = "default_pid_file")]
    pub pid_file: PathBuf,

    /// Per-request deadline for fragment streaming.
    #[serde(default = "default_render_timeout")]
    pub render_timeout_secs: u64,

    /// Number of posts shown on the home page.
    #[serde(default = "default_index_posts")]
    pub index_posts: usize,

    /// Top-level files served verbatim (e.g. `/favicon.ico`).
    #[serde(default = "default_static_files")]
    pub static_files: Vec<String>,
}

/// Content locations, all relative to the site root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// JSON listing of pages.
    #[serde(default = "default_pages_listing")]
    pub pages_listing: PathBuf,

    /// JSON listing of posts.
    #[serde(default = "default_posts_listing")]
    pub posts_listing: PathBuf,

    /// Directory of per-page body templates (`{slug}.html`).
    #[serde(default = "default_pages_dir")]
    pub pages_dir: PathBuf,

    /// Directory of post content fragments (`{slug}.html`).
    #[serde(default = "default_posts_dir")]
    pub posts_dir: PathBuf,

    /// Directory of layout, error and feed templates.
    #[serde(default = "default_templates_dir")]
    pub templates_dir: PathBuf,

    /// Directory served under `/assets/`.
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,

    /// Directory holding the top-level static files.
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

// Default value functions
fn default_lang() -> String {
    "en".to_string()
}

fn default_address() -> String {
    "0.0.0.0:9981".to_string()
}

fn default_pid_file() -> PathBuf {
    PathBuf::from("tmp/quill.pid")
}

fn default_render_timeout() -> u64 {
    30
}

fn default_index_posts() -> usize {
    10
}

fn default_static_files() -> Vec<String> {
    vec!["humans.txt".to_string(), "favicon.ico".to_string()]
}

fn default_pages_listing() -> PathBuf {
    PathBuf::from("data/pages.json")
}

fn default_posts_listing() -> PathBuf {
    PathBuf::from("data/posts.json")
}

fn default_pages_dir() -> PathBuf {
    PathBuf::from("pages")
}

fn default_posts_dir() -> PathBuf {
    PathBuf::from("posts")
}

fn default_templates_dir() -> PathBuf {
    PathBuf::from("templates")
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("assets")
}

fn default_static_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            pid_file: default_pid_file(),
            render_timeout_secs: default_render_timeout(),
            index_posts: default_index_posts(),
            static_files: default_static_files(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            pages_listing: default_pages_listing(),
            posts_listing: default_posts_listing(),
            pages_dir: default_pages_dir(),
            posts_dir: default_posts_dir(),
            templates_dir: default_templates_dir(),
            assets_dir: default_assets_dir(),
            static_dir: default_static_dir(),
        }
    }
}

impl ServerConfig {
    /// Deadline applied to each streamed response.
    pub fn render_timeout(&self) -> Duration {
        Duration::from_secs(self.render_timeout_secs)
    }

    /// Whether `name` is one of the designated top-level static files.
    pub fn is_static_file(&self, name: &str) -> bool {
        self.static_files.iter().any(|f| f == name)
    }
}

impl ContentConfig {
    /// Content fragment for a post.
    pub fn post_fragment(&self, slug: &str) -> PathBuf {
        self.posts_dir.join(format!("{slug}.html"))
    }

    /// Body template source for a page.
    pub fn page_template(&self, slug: &str) -> PathBuf {
        self.pages_dir.join(format!("{slug}.html"))
    }

    /// A layout, error or feed template source.
    pub fn template(&self, file: &str) -> PathBuf {
        self.templates_dir.join(file)
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(BootError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            BootError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `QUILL__SECTION__KEY` environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(BootError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("QUILL").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.site.title.is_empty() {
            return Err(BootError::config("site.title cannot be empty"));
        }

        if self.site.url.is_empty() {
            return Err(BootError::config("site.url cannot be empty"));
        }

        if self.site.url.ends_with('/') {
            tracing::warn!("site.url should not have a trailing slash");
        }

        if self.server.index_posts == 0 {
            return Err(BootError::config("server.index_posts must be at least 1"));
        }

        Ok(())
    }

    /// Get the full URL for a path.
    pub fn url_for(&self, path: &str) -> String {
        let base = self.site.url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}
