//! Divisional chart engine for Origo.
//!
//! Longitudes come from an [`ephemeris::EphemerisProvider`]; the `vedic`
//! module projects them into the sixteen classical vargas and renders the
//! resulting charts as text.

pub mod ephemeris;
pub mod error;
pub mod profile;
pub mod vedic;

pub use error::ChartError;
pub use profile::{GeneratedProfile, ProfileError, ProfileGenerator, ProfileRequest};
pub use vedic::{Chart, ChartInputs, ChartSet, Divisor, Rashi};
