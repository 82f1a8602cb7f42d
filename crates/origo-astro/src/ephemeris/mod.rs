pub mod adapter;
pub mod geocode;
pub mod provider;
pub mod types;

pub use adapter::VedicAstroAdapter;
pub use geocode::NominatimGeocoder;
pub use provider::{EphemerisError, EphemerisProvider, Geocoder};
pub use types::{BirthDetails, EphemerisSettings, GeoLocation, GeocoderSettings};
