use anyhow::Context;
use origo_astro::ephemeris::{
    EphemerisSettings, GeoLocation, GeocoderSettings, NominatimGeocoder, VedicAstroAdapter,
};
use origo_astro::ProfileGenerator;
use origo_config::{OrigoConfig, StoreBackend};
use origo_oracle::{CompletionProvider, LlmCompletion, LlmSettings};
use origo_store::{CreditPolicy, DocumentStore, JsonDirStore, MemoryStore};
use std::sync::Arc;

/// Collaborators shared by every request, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub profiles: ProfileGenerator,
    /// `None` when no completion API key is configured.
    pub oracle: Option<Arc<dyn CompletionProvider>>,
    pub credits: CreditPolicy,
}

impl AppState {
    pub async fn from_config(config: &OrigoConfig) -> anyhow::Result<Self> {
        let store = build_store(config).await?;

        if config.vedic_api.api_key.is_empty() {
            log::warn!("VEDIC_API_KEY is not set; chart generation requests will be rejected upstream");
        }
        let ephemeris = VedicAstroAdapter::new(ephemeris_settings(config))
            .context("Failed to build ephemeris HTTP client")?;
        let geocoder = NominatimGeocoder::new(geocoder_settings(config))
            .context("Failed to build geocoder HTTP client")?;
        let profiles = ProfileGenerator::new(Arc::new(geocoder), Arc::new(ephemeris));

        let oracle = build_oracle(config)?;

        Ok(Self {
            store,
            profiles,
            oracle,
            credits: credit_policy(config),
        })
    }
}

async fn build_store(config: &OrigoConfig) -> anyhow::Result<Arc<dyn DocumentStore>> {
    match (config.store.backend, &config.store.path) {
        (StoreBackend::JsonDir, Some(path)) => {
            let store = JsonDirStore::open(path.clone())
                .await
                .with_context(|| format!("Failed to open store directory {}", path.display()))?;
            Ok(Arc::new(store))
        }
        (StoreBackend::JsonDir, None) => anyhow::bail!("store.backend = \"json_dir\" needs store.path"),
        (StoreBackend::Memory, _) => {
            log::warn!("Using in-memory store; user documents are lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

fn build_oracle(config: &OrigoConfig) -> anyhow::Result<Option<Arc<dyn CompletionProvider>>> {
    let oracle = &config.oracle;
    if oracle.api_key.is_empty() && oracle.provider != "ollama" {
        log::warn!("No API key for oracle provider '{}'; chat analysis is disabled", oracle.provider);
        return Ok(None);
    }
    let completion = LlmCompletion::new(LlmSettings {
        provider: oracle.provider.clone(),
        model: oracle.model.clone(),
        api_key: oracle.api_key.clone(),
        temperature: oracle.temperature,
        max_tokens: oracle.max_tokens,
    })?;
    log::info!("Oracle connected: {} ({})", oracle.provider, oracle.model);
    Ok(Some(Arc::new(completion)))
}

pub fn ephemeris_settings(config: &OrigoConfig) -> EphemerisSettings {
    EphemerisSettings {
        base_url: config.vedic_api.base_url.clone(),
        api_key: config.vedic_api.api_key.clone(),
        timezone_offset: config.vedic_api.timezone_offset,
        lang: config.vedic_api.lang.clone(),
        ..EphemerisSettings::default()
    }
}

pub fn geocoder_settings(config: &OrigoConfig) -> GeocoderSettings {
    GeocoderSettings {
        base_url: config.geocoder.base_url.clone(),
        user_agent: config.geocoder.user_agent.clone(),
        fallback: GeoLocation { lat: config.geocoder.fallback_lat, lon: config.geocoder.fallback_lon },
    }
}

pub fn credit_policy(config: &OrigoConfig) -> CreditPolicy {
    CreditPolicy {
        starting_balance: config.credits.starting_balance,
        default_cost: config.credits.default_cost,
        guest_prefix: config.credits.guest_prefix.clone(),
    }
}
