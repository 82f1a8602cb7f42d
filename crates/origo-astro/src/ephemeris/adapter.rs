use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use crate::ephemeris::provider::{EphemerisError, EphemerisProvider};
use crate::ephemeris::types::{BirthDetails, EphemerisSettings};
use crate::vedic::chart::ChartInputs;
use crate::vedic::dasha::{CurrentDasha, UNKNOWN_LORD};

const PLANET_DETAILS_PATH: &str = "horoscope/planet-details";
const CURRENT_DASHA_PATH: &str = "dashas/vimshottari-current";
const ASCENDANT_FULL_NAME: &str = "Ascendant";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Ephemeris provider backed by the VedicAstroAPI JSON service.
pub struct VedicAstroAdapter {
    client: reqwest::Client,
    settings: EphemerisSettings,
}

impl VedicAstroAdapter {
    pub fn new(settings: EphemerisSettings) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, settings })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.settings.base_url.trim_end_matches('/'), path)
    }

    fn query(&self, birth: &BirthDetails) -> Vec<(&'static str, String)> {
        vec![
            ("api_key", self.settings.api_key.clone()),
            ("dob", birth.provider_dob()),
            ("tob", birth.tob.clone()),
            ("lat", birth.location.lat.to_string()),
            ("lon", birth.location.lon.to_string()),
            ("tz", self.settings.timezone_offset.to_string()),
            ("lang", self.settings.lang.clone()),
        ]
    }

    async fn fetch(&self, path: &str, birth: &BirthDetails) -> Result<Value, EphemerisError> {
        let endpoint = self.endpoint(path);
        let http_err = |source| EphemerisError::Http { endpoint: endpoint.clone(), source };
        self.client
            .get(&endpoint)
            .query(&self.query(birth))
            .send()
            .await
            .map_err(http_err)?
            .json::<Value>()
            .await
            .map_err(http_err)
    }
}

#[async_trait]
impl EphemerisProvider for VedicAstroAdapter {
    async fn birth_positions(&self, birth: &BirthDetails) -> Result<ChartInputs, EphemerisError> {
        let body = self.fetch(PLANET_DETAILS_PATH, birth).await?;
        let inputs = parse_planet_details(&body, &self.settings.excluded_bodies)?;
        log::info!(
            "Fetched {} body positions (ascendant {})",
            inputs.bodies.len(),
            if inputs.ascendant.is_some() { "present" } else { "missing" }
        );
        Ok(inputs)
    }

    async fn current_dasha(&self, birth: &BirthDetails) -> CurrentDasha {
        match self.fetch(CURRENT_DASHA_PATH, birth).await {
            Ok(body) => match parse_current_dasha(&body) {
                Some(dasha) => {
                    log::info!("Dasha found: {}", dasha.summary());
                    dasha
                }
                None => {
                    log::warn!("Dasha request was not successful: {}", body);
                    CurrentDasha::unavailable()
                }
            },
            Err(e) => {
                log::warn!("Dasha lookup failed: {}", e);
                CurrentDasha::unavailable()
            }
        }
    }
}

/// Extract the ascendant and body longitudes from a planet-details reply.
///
/// The `response` field is either an object keyed by index or an array.
pub fn parse_planet_details(body: &Value, excluded: &[String]) -> Result<ChartInputs, EphemerisError> {
    let entries: Vec<&Value> = match body.get("response") {
        Some(Value::Object(map)) => map.values().collect(),
        Some(Value::Array(items)) => items.iter().collect(),
        Some(Value::String(message)) if !message.is_empty() => {
            return Err(EphemerisError::Rejected { message: message.clone() });
        }
        _ => Vec::new(),
    };
    if entries.is_empty() {
        return Err(EphemerisError::NoData);
    }

    let mut inputs = ChartInputs::default();
    for entry in entries.into_iter().filter(|e| e.is_object()) {
        let full_name = entry.get("full_name").and_then(Value::as_str);
        let name = entry.get("name").and_then(Value::as_str);
        let degree = entry.get("global_degree").and_then(as_degree);

        if full_name == Some(ASCENDANT_FULL_NAME) {
            if degree.is_some() {
                inputs.ascendant = degree;
            }
            continue;
        }
        if name.is_some_and(|n| excluded.iter().any(|x| x == n)) {
            continue;
        }
        if let Some(label) = full_name.or(name) {
            inputs.bodies.push((label.to_string(), degree));
        }
    }
    Ok(inputs)
}

/// Read a current-dasha reply. Different API revisions use either the plain
/// or the `current_` prefixed keys.
pub fn parse_current_dasha(body: &Value) -> Option<CurrentDasha> {
    if body.get("status").and_then(Value::as_i64) != Some(200) {
        return None;
    }
    let current = body.get("response")?.as_object()?;
    let field = |keys: &[&str]| {
        keys.iter()
            .filter_map(|k| current.get(*k).and_then(Value::as_str))
            .find(|s| !s.is_empty())
            .map(str::to_string)
    };

    Some(CurrentDasha {
        mahadasha: field(&["mahadasha", "current_mahadasha"]).unwrap_or_else(|| UNKNOWN_LORD.to_string()),
        antardasha: field(&["antardasha", "current_antardasha"]).unwrap_or_else(|| UNKNOWN_LORD.to_string()),
        pratyantardasha: Some(field(&["pratyantardasha"]).unwrap_or_else(|| UNKNOWN_LORD.to_string())),
        end_date: field(&["end_date"]),
    })
}

fn as_degree(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
