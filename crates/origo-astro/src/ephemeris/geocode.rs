use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::ephemeris::provider::Geocoder;
use crate::ephemeris::types::{GeoLocation, GeocoderSettings};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

/// Geocoder backed by an OpenStreetMap Nominatim search endpoint.
pub struct NominatimGeocoder {
    client: reqwest::Client,
    settings: GeocoderSettings,
}

impl NominatimGeocoder {
    pub fn new(settings: GeocoderSettings) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(settings.user_agent.clone())
            .build()?;
        Ok(Self { client, settings })
    }

    async fn search(&self, place: &str) -> Result<Option<GeoLocation>, reqwest::Error> {
        let url = format!("{}/search", self.settings.base_url.trim_end_matches('/'));
        let places: Vec<NominatimPlace> = self
            .client
            .get(url)
            .query(&[("q", place), ("format", "json"), ("limit", "1")])
            .send()
            .await?
            .json()
            .await?;
        Ok(places.first().and_then(parse_place))
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn locate(&self, place: &str) -> GeoLocation {
        let place = place.trim();
        if place.is_empty() {
            return self.settings.fallback;
        }
        match self.search(place).await {
            Ok(Some(location)) => location,
            Ok(None) => {
                log::warn!("No geocoding match for '{}', using fallback", place);
                self.settings.fallback
            }
            Err(e) => {
                log::warn!("Geocoding '{}' failed: {}", place, e);
                self.settings.fallback
            }
        }
    }
}

fn parse_place(place: &NominatimPlace) -> Option<GeoLocation> {
    let lat = place.lat.trim().parse().ok()?;
    let lon = place.lon.trim().parse().ok()?;
    Some(GeoLocation { lat, lon })
}
