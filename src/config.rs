//! Configuration file loading with environment variable overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::StoreError;

/// Top-level configuration.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Catalog API settings.
    pub catalog: CatalogConfig,
    /// Store identity used in headers and captions.
    pub store: StoreConfig,
    /// Image layout constants.
    #[serde(default)]
    pub layout: LayoutConfig,
    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
    /// Publisher credentials and toggles.
    #[serde(default)]
    pub publishers: PublishersConfig,
}

/// Catalog API settings.
#[derive(Debug, Deserialize)]
pub struct CatalogConfig {
    /// Endpoint returning the current store listing.
    pub url: String,
    /// Optional bearer token for the catalog API.
    pub token: Option<String>,
}

impl CatalogConfig {
    /// Get the catalog access token, preferring the environment variable.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        std::env::var("STOREFRONT_CATALOG_TOKEN").ok().or_else(|| self.token.clone())
    }
}

/// Store identity used in the image header and captions.
#[derive(Debug, Deserialize)]
pub struct StoreConfig {
    /// Display name, e.g. the game title.
    pub name: String,
    /// Optional link to the full listing, shown in the footer and captions.
    pub details_url: Option<String>,
    /// Optional creator/support code appended to captions.
    pub support_code: Option<String>,
}

/// Image layout constants. Every field has a default so a config file can
/// override only what it cares about.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    /// Cells per row.
    #[serde(default = "default_columns")]
    pub columns: u32,
    /// Cell width in pixels.
    #[serde(default = "default_cell_width")]
    pub cell_width: u32,
    /// Cell height in pixels.
    #[serde(default = "default_cell_height")]
    pub cell_height: u32,
    /// Space between cells.
    #[serde(default = "default_gutter")]
    pub gutter: u32,
    /// Outer margin on the left and right edges.
    #[serde(default = "default_margin")]
    pub margin: u32,
    /// Height of the header band.
    #[serde(default = "default_header_height")]
    pub header_height: u32,
    /// Height of the footer band.
    #[serde(default = "default_footer_height")]
    pub footer_height: u32,
    /// Background fill color (RGB).
    #[serde(default = "default_background")]
    pub background: [u8; 3],
    /// Text color (RGB).
    #[serde(default = "default_text_color")]
    pub text_color: [u8; 3],
    /// Path to the regular TTF font.
    #[serde(default = "default_font")]
    pub font: PathBuf,
    /// Path to the bold TTF font.
    #[serde(default = "default_font_bold")]
    pub font_bold: PathBuf,
    /// Title font size.
    #[serde(default = "default_title_size")]
    pub title_size: f32,
    /// Entry name font size.
    #[serde(default = "default_name_size")]
    pub name_size: f32,
    /// Price font size.
    #[serde(default = "default_price_size")]
    pub price_size: f32,
    /// Category label font size.
    #[serde(default = "default_label_size")]
    pub label_size: f32,
    /// Optional background template image pasted before drawing.
    #[serde(default)]
    pub template: Option<PathBuf>,
}

fn default_columns() -> u32 {
    4
}
fn default_cell_width() -> u32 {
    300
}
fn default_cell_height() -> u32 {
    360
}
fn default_gutter() -> u32 {
    24
}
fn default_margin() -> u32 {
    48
}
fn default_header_height() -> u32 {
    150
}
fn default_footer_height() -> u32 {
    56
}
fn default_background() -> [u8; 3] {
    [18, 18, 24]
}
fn default_text_color() -> [u8; 3] {
    [240, 240, 240]
}
fn default_font() -> PathBuf {
    PathBuf::from("assets/fonts/DejaVuSans.ttf")
}
fn default_font_bold() -> PathBuf {
    PathBuf::from("assets/fonts/DejaVuSans-Bold.ttf")
}
fn default_title_size() -> f32 {
    64.0
}
fn default_name_size() -> f32 {
    22.0
}
fn default_price_size() -> f32 {
    20.0
}
fn default_label_size() -> f32 {
    14.0
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            cell_width: default_cell_width(),
            cell_height: default_cell_height(),
            gutter: default_gutter(),
            margin: default_margin(),
            header_height: default_header_height(),
            footer_height: default_footer_height(),
            background: default_background(),
            text_color: default_text_color(),
            font: default_font(),
            font_bold: default_font_bold(),
            title_size: default_title_size(),
            name_size: default_name_size(),
            price_size: default_price_size(),
            label_size: default_label_size(),
            template: None,
        }
    }
}

/// Output settings.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Where the composed image is written.
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

fn default_output_path() -> PathBuf {
    PathBuf::from("store.png")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { path: default_output_path() }
    }
}

/// Publisher credentials and toggles. All publishers default to disabled.
#[derive(Debug, Default, Deserialize)]
pub struct PublishersConfig {
    /// Microblog (Mastodon-style API) publisher.
    pub microblog: Option<MicroblogConfig>,
    /// Chat webhook (Discord-style) publisher.
    pub chat_webhook: Option<ChatWebhookConfig>,
    /// Forum (Discourse-style API) publisher.
    pub forum: Option<ForumConfig>,
}

/// Microblog publisher settings.
#[derive(Debug, Deserialize)]
pub struct MicroblogConfig {
    /// Whether this publisher runs.
    #[serde(default)]
    pub enabled: bool,
    /// Instance base URL, e.g. `https://mastodon.example`.
    pub base_url: String,
    /// Access token for the posting account.
    pub access_token: Option<String>,
    /// Platform character limit for the caption.
    #[serde(default = "default_character_limit")]
    pub character_limit: usize,
    /// Maximum accepted media upload size in bytes.
    #[serde(default = "default_media_limit")]
    pub media_limit_bytes: usize,
}

fn default_character_limit() -> usize {
    500
}

fn default_media_limit() -> usize {
    5 * 1024 * 1024
}

impl MicroblogConfig {
    /// Get the access token, preferring the environment variable.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        std::env::var("STOREFRONT_MICROBLOG_TOKEN").ok().or_else(|| self.access_token.clone())
    }
}

/// Chat webhook publisher settings.
#[derive(Debug, Deserialize)]
pub struct ChatWebhookConfig {
    /// Whether this publisher runs.
    #[serde(default)]
    pub enabled: bool,
    /// Webhook endpoints to post to. Each is attempted independently.
    pub webhook_urls: Vec<String>,
    /// Display name for the webhook post.
    pub username: Option<String>,
    /// Avatar URL for the webhook post.
    pub avatar_url: Option<String>,
}

/// Forum publisher settings.
#[derive(Debug, Deserialize)]
pub struct ForumConfig {
    /// Whether this publisher runs.
    #[serde(default)]
    pub enabled: bool,
    /// Forum base URL, e.g. `https://forum.example`.
    pub base_url: String,
    /// API key for the posting account.
    pub api_key: Option<String>,
    /// Username the API key acts as.
    pub api_username: String,
    /// Optional category to post into.
    pub category_id: Option<u32>,
}

impl ForumConfig {
    /// Get the API key, preferring the environment variable.
    #[must_use]
    pub fn api_key(&self) -> Option<String> {
        std::env::var("STOREFRONT_FORUM_KEY").ok().or_else(|| self.api_key.clone())
    }
}

impl Config {
    /// Load configuration from the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Err(StoreError::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        let contents = std::fs::read_to_string(path).map_err(|e| {
            StoreError::Config(format!("failed to read config {}: {e}", path.display()))
        })?;
        toml::from_str(&contents).map_err(|e| {
            StoreError::Config(format!("failed to parse config {}: {e}", path.display()))
        })
    }

    /// Validate values that must hold before any network work starts.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError::Config`] for an empty catalog URL or
    /// degenerate layout constants.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.catalog.url.trim().is_empty() {
            return Err(StoreError::Config("catalog.url must not be empty".into()));
        }
        if self.layout.columns == 0 {
            return Err(StoreError::Config("layout.columns must be at least 1".into()));
        }
        if self.layout.cell_width == 0 || self.layout.cell_height == 0 {
            return Err(StoreError::Config("layout cell dimensions must be nonzero".into()));
        }
        Ok(())
    }
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `STOREFRONT_CONFIG` environment variable
/// 3. `storefront.toml` in the working directory
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("STOREFRONT_CONFIG") {
        return PathBuf::from(p);
    }

    PathBuf::from("storefront.toml")
}
