//! The twelve rashis (zodiac signs), each a fixed 30° segment of the ecliptic.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ChartError;

pub const SIGN_SPAN: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Rashi {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

pub const RASHIS: [Rashi; 12] = [
    Rashi::Aries,
    Rashi::Taurus,
    Rashi::Gemini,
    Rashi::Cancer,
    Rashi::Leo,
    Rashi::Virgo,
    Rashi::Libra,
    Rashi::Scorpio,
    Rashi::Sagittarius,
    Rashi::Capricorn,
    Rashi::Aquarius,
    Rashi::Pisces,
];

impl Rashi {
    /// Look up a rashi by its 1-based index (Aries = 1).
    pub fn from_index(index: u8) -> Result<Self, ChartError> {
        match index {
            1..=12 => Ok(RASHIS[(index - 1) as usize]),
            _ => Err(ChartError::InvalidSign { index }),
        }
    }

    /// 1-based index, Aries = 1 .. Pisces = 12.
    pub fn index(self) -> u8 {
        self as u8 + 1
    }

    pub fn name(self) -> &'static str {
        match self {
            Rashi::Aries => "Aries",
            Rashi::Taurus => "Taurus",
            Rashi::Gemini => "Gemini",
            Rashi::Cancer => "Cancer",
            Rashi::Leo => "Leo",
            Rashi::Virgo => "Virgo",
            Rashi::Libra => "Libra",
            Rashi::Scorpio => "Scorpio",
            Rashi::Sagittarius => "Sagittarius",
            Rashi::Capricorn => "Capricorn",
            Rashi::Aquarius => "Aquarius",
            Rashi::Pisces => "Pisces",
        }
    }

    /// Sign containing a longitude already reduced into [0, 360).
    pub(crate) fn containing(normalized: f64) -> Self {
        // Rounding can leave a value that is only representable as 360.0.
        let zero_based = ((normalized / SIGN_SPAN).floor() as usize) % 12;
        RASHIS[zero_based]
    }
}

impl TryFrom<u8> for Rashi {
    type Error = ChartError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Rashi::from_index(index)
    }
}

impl From<Rashi> for u8 {
    fn from(rashi: Rashi) -> u8 {
        rashi.index()
    }
}

impl fmt::Display for Rashi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for rashi in RASHIS {
            assert_eq!(Rashi::from_index(rashi.index()).unwrap(), rashi);
        }
        assert_eq!(Rashi::Aries.index(), 1);
        assert_eq!(Rashi::Pisces.index(), 12);
    }

    #[test]
    fn test_from_index_rejects_out_of_range() {
        assert_eq!(Rashi::from_index(0), Err(ChartError::InvalidSign { index: 0 }));
        assert!(Rashi::from_index(13).is_err());
    }

    #[test]
    fn test_serializes_as_index() {
        assert_eq!(serde_json::to_string(&Rashi::Cancer).unwrap(), "4");
        let leo: Rashi = serde_json::from_str("5").unwrap();
        assert_eq!(leo, Rashi::Leo);
        assert!(serde_json::from_str::<Rashi>("0").is_err());
    }

    #[test]
    fn test_containing_wraps_full_circle() {
        assert_eq!(Rashi::containing(0.0), Rashi::Aries);
        assert_eq!(Rashi::containing(359.999), Rashi::Pisces);
        assert_eq!(Rashi::containing(360.0), Rashi::Aries);
    }
}
