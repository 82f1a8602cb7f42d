//! Current Vimshottari dasha as reported by the ephemeris provider.

use serde::{Deserialize, Serialize};

pub const NOT_AVAILABLE: &str = "N/A";
pub const UNKNOWN_LORD: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentDasha {
    pub mahadasha: String,
    pub antardasha: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pratyantardasha: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl CurrentDasha {
    /// Placeholder stored when the provider could not be reached.
    pub fn unavailable() -> Self {
        Self {
            mahadasha: NOT_AVAILABLE.to_string(),
            antardasha: NOT_AVAILABLE.to_string(),
            pratyantardasha: None,
            end_date: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.mahadasha != NOT_AVAILABLE
    }

    /// "Mahadasha > Antardasha[ > Pratyantardasha]".
    pub fn summary(&self) -> String {
        let mut out = format!("{} > {}", self.mahadasha, self.antardasha);
        if let Some(pd) = &self.pratyantardasha {
            out.push_str(" > ");
            out.push_str(pd);
        }
        out
    }
}

impl Default for CurrentDasha {
    fn default() -> Self {
        Self::unavailable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_shape() {
        let dasha = CurrentDasha::unavailable();
        assert!(!dasha.is_available());
        let value = serde_json::to_value(&dasha).unwrap();
        assert_eq!(value, serde_json::json!({"mahadasha": "N/A", "antardasha": "N/A"}));
    }

    #[test]
    fn test_summary() {
        let dasha = CurrentDasha {
            mahadasha: "Venus".to_string(),
            antardasha: "Saturn".to_string(),
            pratyantardasha: Some("Mercury".to_string()),
            end_date: None,
        };
        assert_eq!(dasha.summary(), "Venus > Saturn > Mercury");
    }
}
