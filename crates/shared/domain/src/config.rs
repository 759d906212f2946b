use crate::constants::{DEFAULT_TEASING_ICON, DEFAULT_TEASING_URL};
use serde::{Deserialize, Deserializer};
use std::net::{IpAddr, Ipv4Addr};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level service configuration.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfigInner {
    pub server: ServerConfig,
    pub teaser: TeaserConfig,
    pub logging: LoggingConfig,
    /// JSON [`crate::models::ForumSeed`] loaded into the store at start-up.
    pub seed: Option<PathBuf>,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(flatten, default)]
    inner: Arc<ApiConfigInner>,
}

impl Deref for ApiConfig {
    type Target = ApiConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ApiConfig {
    fn deref_mut(&mut self) -> &mut ApiConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    pub ssl: Option<SslConfig>,
}

/// TLS certificate/key paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SslConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Teasing feature settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TeaserConfig {
    /// Global switch; nothing is teased while it is off.
    pub dl_teaser_enabled: bool,
    /// Redirect target for categories without `topic_teasing_url`. Blank means `/`.
    #[serde(deserialize_with = "redirect_url_or_root")]
    pub default_redirect_url: String,
    /// Icon for categories without `topic_teasing_icon`. Blank means `shield`.
    #[serde(deserialize_with = "icon_or_shield")]
    pub default_icon: String,
}

/// Logging output settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `EnvFilter` directives, e.g. `teaser_gating=debug`.
    pub filter: Option<String>,
    /// Rolling log files are written here when set.
    pub directory: Option<PathBuf>,
    pub json: bool,
}

fn redirect_url_or_root<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    non_blank_or(deserializer, DEFAULT_TEASING_URL)
}

fn icon_or_shield<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    non_blank_or(deserializer, DEFAULT_TEASING_ICON)
}

fn non_blank_or<'de, D: Deserializer<'de>>(deserializer: D, fallback: &str) -> Result<String, D::Error> {
    let value = String::deserialize(deserializer)?;
    Ok(if value.trim().is_empty() { fallback.to_owned() } else { value })
}

// --- Default ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self { address: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: 4583, ssl: None }
    }
}

impl Default for SslConfig {
    fn default() -> Self {
        Self { cert: PathBuf::from("cert.pem"), key: PathBuf::from("key.pem") }
    }
}

impl Default for TeaserConfig {
    fn default() -> Self {
        Self {
            dl_teaser_enabled: false,
            default_redirect_url: DEFAULT_TEASING_URL.to_owned(),
            default_icon: DEFAULT_TEASING_ICON.to_owned(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), filter: None, directory: None, json: false }
    }
}
