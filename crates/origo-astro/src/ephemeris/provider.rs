use async_trait::async_trait;
use thiserror::Error;

use crate::ephemeris::types::{BirthDetails, GeoLocation};
use crate::vedic::chart::ChartInputs;
use crate::vedic::dasha::CurrentDasha;

/// Errors that can occur while fetching positions from a provider
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("request to {endpoint} failed: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("provider returned no planet data")]
    NoData,
    #[error("provider rejected the request: {message}")]
    Rejected { message: String },
}

/// Source of sidereal body longitudes for a birth moment.
#[async_trait]
pub trait EphemerisProvider: Send + Sync {
    /// Ascendant and body longitudes; bodies the provider cannot place come
    /// back with `None`.
    async fn birth_positions(&self, birth: &BirthDetails) -> Result<ChartInputs, EphemerisError>;

    /// Current dasha periods. Falls back to [`CurrentDasha::unavailable`].
    async fn current_dasha(&self, birth: &BirthDetails) -> CurrentDasha;
}

/// Place-name to coordinate lookup.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Always yields a location; unresolvable names map to a fallback.
    async fn locate(&self, place: &str) -> GeoLocation;
}
