//! Chart sets: one sign placement per body for every supported divisor.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::error::ChartError;
use crate::vedic::rashi::Rashi;
use crate::vedic::vargas::{project_sign, Divisor, DIVISORS};

/// Reserved chart key holding the ascendant's sign.
pub const ASCENDANT_KEY: &str = "Asc";
/// Older records spell the ascendant key out in full.
pub const ASCENDANT_ALIAS: &str = "Ascendant";

/// Raw longitudes handed over by an ephemeris provider.
///
/// `None` (or a non-finite value) means the provider had no position for
/// that body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartInputs {
    pub ascendant: Option<f64>,
    pub bodies: Vec<(String, Option<f64>)>,
}

impl ChartInputs {
    pub fn new(ascendant: Option<f64>) -> Self {
        Self { ascendant, bodies: Vec::new() }
    }

    pub fn with_body(mut self, name: impl Into<String>, longitude: Option<f64>) -> Self {
        self.bodies.push((name.into(), longitude));
        self
    }

    /// Bodies that have a usable longitude, in provider order.
    pub fn known_bodies(&self) -> impl Iterator<Item = (&str, f64)> {
        self.bodies.iter().filter_map(|(name, lon)| match lon {
            Some(lon) if lon.is_finite() => Some((name.as_str(), *lon)),
            _ => None,
        })
    }

    /// Bodies dropped because the provider gave no usable longitude.
    pub fn missing_bodies(&self) -> Vec<ChartError> {
        self.bodies
            .iter()
            .filter(|(_, lon)| !lon.is_some_and(f64::is_finite))
            .map(|(name, _)| ChartError::MissingBody { body: name.clone() })
            .collect()
    }
}

/// Sign placements for a single divisional chart, keyed by body name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Chart {
    placements: BTreeMap<String, Rashi>,
}

impl Chart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, body: impl Into<String>, rashi: Rashi) {
        self.placements.insert(body.into(), rashi);
    }

    pub fn get(&self, body: &str) -> Option<Rashi> {
        self.placements.get(body).copied()
    }

    pub fn ascendant(&self) -> Option<Rashi> {
        self.get(ASCENDANT_KEY).or_else(|| self.get(ASCENDANT_ALIAS))
    }

    /// Every entry except the ascendant.
    pub fn bodies(&self) -> impl Iterator<Item = (&str, Rashi)> {
        self.placements
            .iter()
            .filter(|(name, _)| !is_ascendant_key(name))
            .map(|(name, rashi)| (name.as_str(), *rashi))
    }

    /// Number of entries, ascendant included.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

impl FromIterator<(String, Rashi)> for Chart {
    fn from_iter<I: IntoIterator<Item = (String, Rashi)>>(iter: I) -> Self {
        Self { placements: iter.into_iter().collect() }
    }
}

pub(crate) fn is_ascendant_key(name: &str) -> bool {
    name == ASCENDANT_KEY || name == ASCENDANT_ALIAS
}

/// One chart per supported divisor, keyed by label ("D1" .. "D60").
///
/// Built once per profile and never edited afterwards; new birth data means
/// a new set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChartSet {
    charts: BTreeMap<Divisor, Chart>,
}

impl ChartSet {
    /// Project the ascendant and every known body into all sixteen vargas.
    pub fn build(inputs: &ChartInputs) -> Result<Self, ChartError> {
        let ascendant = inputs
            .ascendant
            .filter(|lon| lon.is_finite())
            .ok_or(ChartError::MissingAscendant)?;

        for missing in inputs.missing_bodies() {
            log::debug!("Omitting from charts: {}", missing);
        }
        let bodies = charted_bodies(inputs);

        let charts = DIVISORS
            .iter()
            .map(|&divisor| (divisor, build_chart(ascendant, &bodies, divisor)))
            .collect();

        Ok(Self { charts })
    }

    pub fn get(&self, divisor: Divisor) -> Option<&Chart> {
        self.charts.get(&divisor)
    }

    /// Look a chart up by label; unknown labels simply have no chart.
    pub fn chart_for_label(&self, label: &str) -> Option<&Chart> {
        Divisor::from_label(label).ok().and_then(|divisor| self.get(divisor))
    }

    /// Charts in ascending divisor order.
    pub fn iter(&self) -> impl Iterator<Item = (Divisor, &Chart)> {
        self.charts.iter().map(|(divisor, chart)| (*divisor, chart))
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}

/// Known bodies minus reserved ascendant names; the first of duplicate names wins.
fn charted_bodies(inputs: &ChartInputs) -> Vec<(&str, f64)> {
    let mut seen = HashSet::new();
    inputs
        .known_bodies()
        .filter(|(name, _)| {
            if is_ascendant_key(name) {
                log::warn!("Ignoring body named '{}': the name is reserved for the ascendant", name);
                false
            } else if !seen.insert(*name) {
                log::warn!("Ignoring duplicate longitude for body '{}'", name);
                false
            } else {
                true
            }
        })
        .collect()
}

fn build_chart(ascendant: f64, bodies: &[(&str, f64)], divisor: Divisor) -> Chart {
    let mut chart = Chart::new();
    chart.insert(ASCENDANT_KEY, project_sign(ascendant, divisor));
    for (name, lon) in bodies {
        chart.insert(*name, project_sign(*lon, divisor));
    }
    chart
}
