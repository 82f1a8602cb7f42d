use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

impl GeoLocation {
    /// New Delhi, used when a place name cannot be resolved.
    pub const FALLBACK: GeoLocation = GeoLocation { lat: 28.6139, lon: 77.2090 };
}

/// Everything a provider needs to cast a birth chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BirthDetails {
    pub dob: NaiveDate,
    /// Local birth time as entered, e.g. "14:30".
    pub tob: String,
    pub location: GeoLocation,
}

impl BirthDetails {
    /// Date in the DD/MM/YYYY form the provider expects.
    pub fn provider_dob(&self) -> String {
        self.dob.format("%d/%m/%Y").to_string()
    }
}

/// Settings for the remote ephemeris provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EphemerisSettings {
    /// Base URL, e.g. "https://api.vedicastroapi.com/v3-json"
    pub base_url: String,
    pub api_key: String,
    /// Hours east of UTC applied to the birth time
    pub timezone_offset: f64,
    pub lang: String,
    /// Planet names the provider reports that are left out of the charts
    pub excluded_bodies: Vec<String>,
}

impl Default for EphemerisSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.vedicastroapi.com/v3-json".to_string(),
            api_key: String::new(),
            timezone_offset: 5.5,
            lang: "en".to_string(),
            excluded_bodies: ["Uranus", "Neptune", "Pluto", "Mean Node", "True Node"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Settings for the place-name geocoder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocoderSettings {
    pub base_url: String,
    pub user_agent: String,
    pub fallback: GeoLocation,
}

impl Default for GeocoderSettings {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: "TheOrigoApp/1.0".to_string(),
            fallback: GeoLocation::FALLBACK,
        }
    }
}
