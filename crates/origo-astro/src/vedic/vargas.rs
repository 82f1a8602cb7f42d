//! Divisional chart (varga) projection for Vedic astrology.
//!
//! A D-N chart multiplies each longitude by the harmonic N and reads the sign
//! the result falls in. Only the sixteen classical harmonics are supported.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ChartError;
use crate::vedic::rashi::Rashi;

pub const FULL_CIRCLE: f64 = 360.0;

pub struct Varga {
    pub division: u32,
    pub label: &'static str,
    pub name: &'static str,
}

pub const SUPPORTED_VARGAS: &[Varga] = &[
    Varga { division: 1, label: "D1", name: "Rashi" },
    Varga { division: 2, label: "D2", name: "Hora" },
    Varga { division: 3, label: "D3", name: "Drekkana" },
    Varga { division: 4, label: "D4", name: "Chaturthamsa" },
    Varga { division: 7, label: "D7", name: "Saptamsa" },
    Varga { division: 9, label: "D9", name: "Navamsa" },
    Varga { division: 10, label: "D10", name: "Dasamsa" },
    Varga { division: 12, label: "D12", name: "Dwadasamsa" },
    Varga { division: 16, label: "D16", name: "Shodasamsa" },
    Varga { division: 20, label: "D20", name: "Vimsamsa" },
    Varga { division: 24, label: "D24", name: "Chaturvimsamsa" },
    Varga { division: 27, label: "D27", name: "Bhamsa" },
    Varga { division: 30, label: "D30", name: "Trimsamsa" },
    Varga { division: 40, label: "D40", name: "Khavedamsa" },
    Varga { division: 45, label: "D45", name: "Akshavedamsa" },
    Varga { division: 60, label: "D60", name: "Shashtiamsa" },
];

/// A harmonic number from the supported varga table.
///
/// Holding a `Divisor` means the harmonic was validated on construction, so
/// projection itself never has to reject one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Divisor(u32);

/// Every supported divisor, D1 through D60.
pub const DIVISORS: [Divisor; 16] = [
    Divisor(1),
    Divisor(2),
    Divisor(3),
    Divisor(4),
    Divisor(7),
    Divisor(9),
    Divisor(10),
    Divisor(12),
    Divisor(16),
    Divisor(20),
    Divisor(24),
    Divisor(27),
    Divisor(30),
    Divisor(40),
    Divisor(45),
    Divisor(60),
];

impl Divisor {
    pub const D1: Divisor = Divisor(1);
    pub const D2: Divisor = Divisor(2);
    pub const D9: Divisor = Divisor(9);

    pub fn new(division: u32) -> Result<Self, ChartError> {
        if SUPPORTED_VARGAS.iter().any(|varga| varga.division == division) {
            Ok(Divisor(division))
        } else {
            Err(unrecognized(division.to_string()))
        }
    }

    /// Parse a chart label such as `"D9"` or `"d9"`.
    pub fn from_label(label: &str) -> Result<Self, ChartError> {
        let trimmed = label.trim();
        SUPPORTED_VARGAS
            .iter()
            .find(|varga| varga.label.eq_ignore_ascii_case(trimmed))
            .map(|varga| Divisor(varga.division))
            .ok_or_else(|| unrecognized(trimmed.to_string()))
    }

    pub fn division(self) -> u32 {
        self.0
    }

    pub fn label(self) -> &'static str {
        self.varga().label
    }

    /// Classical name of the varga, e.g. "Navamsa" for D9.
    pub fn name(self) -> &'static str {
        self.varga().name
    }

    fn varga(self) -> &'static Varga {
        SUPPORTED_VARGAS
            .iter()
            .find(|varga| varga.division == self.0)
            .unwrap_or(&SUPPORTED_VARGAS[0])
    }
}

fn unrecognized(divisor: String) -> ChartError {
    ChartError::UnrecognizedDivisor {
        divisor,
        supported: SUPPORTED_VARGAS.iter().map(|varga| varga.division).collect(),
    }
}

impl fmt::Display for Divisor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Divisor {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Divisor::from_label(s)
    }
}

impl TryFrom<u32> for Divisor {
    type Error = ChartError;

    fn try_from(division: u32) -> Result<Self, Self::Error> {
        Divisor::new(division)
    }
}

impl TryFrom<String> for Divisor {
    type Error = ChartError;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        Divisor::from_label(&label)
    }
}

impl From<Divisor> for String {
    fn from(divisor: Divisor) -> String {
        divisor.label().to_string()
    }
}

/// Reduce any finite longitude into [0, 360) with floor-mod semantics, so
/// -10° becomes 350° rather than staying negative.
pub fn normalize_longitude(longitude: f64) -> f64 {
    longitude.rem_euclid(FULL_CIRCLE)
}

/// Sign occupied by `longitude` in the D-`divisor` chart:
/// `floor(((d * n) mod 360) / 30) + 1`.
pub fn project_sign(longitude: f64, divisor: Divisor) -> Rashi {
    let scaled = normalize_longitude(longitude) * divisor.division() as f64;
    Rashi::containing(normalize_longitude(scaled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_supported_vargas() {
        assert_eq!(DIVISORS.len(), SUPPORTED_VARGAS.len());
        for (divisor, varga) in DIVISORS.iter().zip(SUPPORTED_VARGAS) {
            assert_eq!(divisor.division(), varga.division);
            assert_eq!(divisor.label(), varga.label);
        }
    }

    #[test]
    fn test_unsupported_divisor_rejected() {
        assert!(Divisor::new(5).is_err());
        assert!(Divisor::new(0).is_err());
        assert!(Divisor::from_label("D8").is_err());
        match Divisor::new(11) {
            Err(ChartError::UnrecognizedDivisor { divisor, supported }) => {
                assert_eq!(divisor, "11");
                assert_eq!(supported.len(), 16);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_label_parsing() {
        assert_eq!(Divisor::from_label("d9").unwrap(), Divisor::D9);
        assert_eq!(" D60 ".parse::<Divisor>().unwrap().division(), 60);
        assert_eq!(Divisor::D9.name(), "Navamsa");
    }

    #[test]
    fn test_project_sign_rashi_chart() {
        assert_eq!(project_sign(15.0, Divisor::D1), Rashi::Aries);
        assert_eq!(project_sign(95.0, Divisor::D1), Rashi::Cancer);
        assert_eq!(project_sign(359.9, Divisor::D1), Rashi::Pisces);
    }

    #[test]
    fn test_project_sign_navamsa() {
        // 15 * 9 = 135 -> Leo; 95 * 9 = 855 = 135 mod 360 -> Leo
        assert_eq!(project_sign(15.0, Divisor::D9), Rashi::Leo);
        assert_eq!(project_sign(95.0, Divisor::D9), Rashi::Leo);
    }

    #[test]
    fn test_negative_longitude_wraps_forward() {
        assert_eq!(normalize_longitude(-10.0), 350.0);
        assert_eq!(project_sign(-10.0, Divisor::D1), Rashi::Pisces);
        assert_eq!(project_sign(-10.0, Divisor::D1), project_sign(350.0, Divisor::D1));
        assert_eq!(project_sign(-1e-12, Divisor::D1), Rashi::Pisces);
    }

    #[test]
    fn test_divisor_serializes_as_label() {
        assert_eq!(serde_json::to_string(&Divisor::D9).unwrap(), "\"D9\"");
        let d: Divisor = serde_json::from_str("\"D45\"").unwrap();
        assert_eq!(d.division(), 45);
        assert!(serde_json::from_str::<Divisor>("\"D5\"").is_err());
    }
}
