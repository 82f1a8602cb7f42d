use origo_astro::profile::{BirthProfile, GeneratedProfile};
use origo_astro::vedic::{ChartSet, CurrentDasha};
use serde::{Deserialize, Serialize};

/// Profile fields: birth data plus account details captured at sign-up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(flatten)]
    pub birth: BirthProfile,
    #[serde(default)]
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    /// Absent on documents written before credits existed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<u32>,
}

/// One user document: `{ profile, charts, dasha }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub profile: UserProfile,
    #[serde(default)]
    pub charts: ChartSet,
    #[serde(default)]
    pub dasha: CurrentDasha,
}

impl UserRecord {
    pub fn from_generated(uid: &str, generated: GeneratedProfile) -> Self {
        let GeneratedProfile { profile, charts, dasha } = generated;
        Self {
            profile: UserProfile {
                place: Some(profile.city.clone()),
                birth: profile,
                uid: uid.to_string(),
                ..UserProfile::default()
            },
            charts,
            dasha,
        }
    }

    pub fn credits(&self) -> u32 {
        self.profile.credits.unwrap_or(0)
    }
}
