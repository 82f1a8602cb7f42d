use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const VEDIC_API_KEY_ENV: &str = "VEDIC_API_KEY";
pub const GROQ_API_KEY_ENV: &str = "GROQ_API_KEY";
pub const BIND_ENV: &str = "ORIGO_BIND";

const SEARCH_PATHS: &[&str] = &["configs/origo.toml", "../../configs/origo.toml"];
const ORACLE_PROVIDERS: &[&str] = &["groq", "openai", "anthropic", "google", "ollama", "mistral", "deepseek"];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrigoConfig {
    pub server: ServerConfig,
    pub vedic_api: VedicApiConfig,
    pub geocoder: GeocoderConfig,
    pub oracle: OracleConfig,
    pub store: StoreConfig,
    pub credits: CreditsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: "127.0.0.1:5000".to_string() }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VedicApiConfig {
    pub base_url: String,
    pub api_key: String,
    pub timezone_offset: f64,
    pub lang: String,
}

impl Default for VedicApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.vedicastroapi.com/v3-json".to_string(),
            api_key: String::new(),
            timezone_offset: 5.5,
            lang: "en".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeocoderConfig {
    pub base_url: String,
    pub user_agent: String,
    pub fallback_lat: f64,
    pub fallback_lon: f64,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: "TheOrigoApp/1.0".to_string(),
            fallback_lat: 28.6139,
            fallback_lon: 77.2090,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    pub provider: String,
    pub model: String,
    /// Empty means no completion provider is configured.
    pub api_key: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            provider: "groq".to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            api_key: String::new(),
            temperature: 0.7,
            max_tokens: 3000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    #[default]
    Memory,
    JsonDir,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CreditsConfig {
    pub starting_balance: u32,
    pub default_cost: u32,
    pub guest_prefix: String,
}

impl Default for CreditsConfig {
    fn default() -> Self {
        Self { starting_balance: 20, default_cost: 1, guest_prefix: "guest_".to_string() }
    }
}

/// Same lookup order as the other tools: explicit path, then the common
/// relative `configs/origo.toml` locations.
pub fn read_config_text(explicit: Option<&Path>) -> anyhow::Result<Option<String>> {
    if let Some(path) = explicit {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        return Ok(Some(text));
    }
    for p in SEARCH_PATHS {
        if let Ok(text) = fs::read_to_string(p) {
            log::info!("Loaded config from {}", p);
            return Ok(Some(text));
        }
    }
    Ok(None)
}

pub fn parse_config(text: &str) -> anyhow::Result<OrigoConfig> {
    toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse origo.toml: {e}"))
}

/// Secrets and deployment knobs from the environment win over the file.
pub fn apply_env_overrides<F>(config: &mut OrigoConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
    if let Some(key) = present(VEDIC_API_KEY_ENV) {
        config.vedic_api.api_key = key;
    }
    if let Some(key) = present(GROQ_API_KEY_ENV) {
        config.oracle.api_key = key;
    }
    if let Some(bind) = present(BIND_ENV) {
        config.server.bind = bind;
    }
}

pub fn validate(config: &OrigoConfig) -> anyhow::Result<()> {
    if config.server.bind.trim().is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }
    if !ORACLE_PROVIDERS.contains(&config.oracle.provider.as_str()) {
        anyhow::bail!(
            "Unknown oracle.provider '{}' (expected one of {:?})",
            config.oracle.provider,
            ORACLE_PROVIDERS
        );
    }
    if config.store.backend == StoreBackend::JsonDir && config.store.path.is_none() {
        anyhow::bail!("store.backend = \"json_dir\" needs store.path");
    }
    if config.credits.default_cost == 0 {
        anyhow::bail!("credits.default_cost must be at least 1");
    }
    Ok(())
}

pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<OrigoConfig> {
    let mut config = match read_config_text(explicit)? {
        Some(text) => parse_config(&text)?,
        None => {
            log::warn!("No origo.toml found in {:?}, using defaults", SEARCH_PATHS);
            OrigoConfig::default()
        }
    };
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate(&config)?;
    Ok(config)
}
