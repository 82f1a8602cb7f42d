//! Birth profile generation: geocode, fetch positions, cast every varga.

use chrono::{DateTime, Datelike, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::ephemeris::{BirthDetails, EphemerisError, EphemerisProvider, GeoLocation, Geocoder};
use crate::error::ChartError;
use crate::vedic::chart::ChartSet;
use crate::vedic::dasha::CurrentDasha;

pub const DOB_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("invalid birth date '{dob}', expected YYYY-MM-DD")]
    InvalidBirthDate { dob: String },
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
    #[error(transparent)]
    Chart(#[from] ChartError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileRequest {
    pub name: String,
    /// Birth date as YYYY-MM-DD
    pub dob: String,
    /// Birth time as HH:MM
    pub tob: String,
    pub city: String,
}

/// Birth data stored alongside the charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BirthProfile {
    pub name: String,
    pub age: u32,
    pub dob: String,
    pub tob: String,
    pub city: String,
    pub coordinates: GeoLocation,
    pub created_at: String,
}

impl Default for BirthProfile {
    fn default() -> Self {
        Self {
            name: String::new(),
            age: 0,
            dob: String::new(),
            tob: String::new(),
            city: String::new(),
            coordinates: GeoLocation::FALLBACK,
            created_at: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedProfile {
    pub profile: BirthProfile,
    pub charts: ChartSet,
    pub dasha: CurrentDasha,
}

/// Completed years by calendar year only, matching how ages were always
/// shown to users.
pub fn age_in_years(dob: NaiveDate, today: NaiveDate) -> u32 {
    u32::try_from(today.year() - dob.year()).unwrap_or(0)
}

pub fn parse_dob(dob: &str) -> Result<NaiveDate, ProfileError> {
    NaiveDate::parse_from_str(dob.trim(), DOB_FORMAT)
        .map_err(|_| ProfileError::InvalidBirthDate { dob: dob.to_string() })
}

/// Builds complete profiles from injected providers.
#[derive(Clone)]
pub struct ProfileGenerator {
    geocoder: Arc<dyn Geocoder>,
    ephemeris: Arc<dyn EphemerisProvider>,
}

impl ProfileGenerator {
    pub fn new(geocoder: Arc<dyn Geocoder>, ephemeris: Arc<dyn EphemerisProvider>) -> Self {
        Self { geocoder, ephemeris }
    }

    pub async fn generate(&self, request: &ProfileRequest) -> Result<GeneratedProfile, ProfileError> {
        self.generate_at(request, Utc::now()).await
    }

    /// Same as [`generate`](Self::generate) with an explicit clock.
    pub async fn generate_at(
        &self,
        request: &ProfileRequest,
        now: DateTime<Utc>,
    ) -> Result<GeneratedProfile, ProfileError> {
        let dob = parse_dob(&request.dob)?;
        let location = self.geocoder.locate(&request.city).await;
        let birth = BirthDetails { dob, tob: request.tob.trim().to_string(), location };

        let inputs = self.ephemeris.birth_positions(&birth).await?;
        let charts = ChartSet::build(&inputs)?;
        log::info!("Built {} divisional charts for '{}'", charts.len(), request.name);

        let dasha = self.ephemeris.current_dasha(&birth).await;

        Ok(GeneratedProfile {
            profile: BirthProfile {
                name: request.name.clone(),
                age: age_in_years(dob, now.date_naive()),
                dob: request.dob.clone(),
                tob: request.tob.clone(),
                city: request.city.clone(),
                coordinates: location,
                created_at: now.to_rfc3339_opts(SecondsFormat::Secs, true),
            },
            charts,
            dasha,
        })
    }
}
