//! Whole-sign house numbering and the text rendering of a chart.

use crate::error::ChartError;
use crate::vedic::chart::Chart;
use crate::vedic::rashi::Rashi;

pub const NO_DATA: &str = "No Data Available";
pub const ASCENDANT_MISSING: &str = "Ascendant Missing.";

// Traditional graha order; anything else is listed after these, alphabetically.
const GRAHA_ORDER: &[&str] = &[
    "Sun", "Moon", "Mars", "Mercury", "Jupiter", "Venus", "Saturn", "Rahu", "Ketu",
];

/// House of a body counted from the ascendant's sign, always 1..=12.
pub fn house_number(body: Rashi, ascendant: Rashi) -> u8 {
    let diff = body.index() as i16 - ascendant.index() as i16;
    diff.rem_euclid(12) as u8 + 1
}

pub fn ordinal(n: u8) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

/// Lines describing a chart: the ascendant first, then each body's house.
pub fn describe_chart(chart: &Chart) -> Result<Vec<String>, ChartError> {
    let ascendant = chart.ascendant().ok_or(ChartError::FormattingFailure)?;

    let mut bodies: Vec<(&str, Rashi)> = chart.bodies().collect();
    bodies.sort_by_key(|(name, _)| (graha_rank(name), *name));

    let mut lines = Vec::with_capacity(bodies.len() + 1);
    lines.push(format!("- **LAGNA (Ascendant)**: {} Sign (1st House)", ascendant));
    for (name, rashi) in bodies {
        lines.push(format!(
            "- **{}**: {} House ({})",
            name,
            ordinal(house_number(rashi, ascendant)),
            rashi
        ));
    }
    Ok(lines)
}

/// Render a chart for a prompt. Never fails: a missing chart or ascendant
/// degrades to a sentinel line.
pub fn render_chart(chart: Option<&Chart>) -> String {
    let chart = match chart {
        Some(c) if !c.is_empty() => c,
        _ => return NO_DATA.to_string(),
    };
    match describe_chart(chart) {
        Ok(lines) => lines.join("\n"),
        Err(e) => {
            log::debug!("Chart rendering fell back: {}", e);
            ASCENDANT_MISSING.to_string()
        }
    }
}

fn graha_rank(name: &str) -> usize {
    GRAHA_ORDER
        .iter()
        .position(|g| g.eq_ignore_ascii_case(name))
        .unwrap_or(GRAHA_ORDER.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vedic::chart::ASCENDANT_KEY;
    use crate::vedic::rashi::RASHIS;

    #[test]
    fn test_house_number_range() {
        for body in RASHIS {
            for asc in RASHIS {
                let house = house_number(body, asc);
                assert!((1..=12).contains(&house));
            }
            assert_eq!(house_number(body, body), 1);
        }
        assert_eq!(house_number(Rashi::Aries, Rashi::Pisces), 2);
        assert_eq!(house_number(Rashi::Pisces, Rashi::Aries), 12);
    }

    #[test]
    fn test_ordinal() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(4), "4th");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(12), "12th");
    }

    #[test]
    fn test_describe_orders_grahas() {
        let mut chart = Chart::new();
        chart.insert(ASCENDANT_KEY, Rashi::Aries);
        chart.insert("Venus", Rashi::Taurus);
        chart.insert("Sun", Rashi::Cancer);
        chart.insert("Ceres", Rashi::Leo);

        let lines = describe_chart(&chart).unwrap();
        assert_eq!(
            lines,
            vec![
                "- **LAGNA (Ascendant)**: Aries Sign (1st House)".to_string(),
                "- **Sun**: 4th House (Cancer)".to_string(),
                "- **Venus**: 2nd House (Taurus)".to_string(),
                "- **Ceres**: 5th House (Leo)".to_string(),
            ]
        );
    }

    #[test]
    fn test_render_fallbacks() {
        assert_eq!(render_chart(None), NO_DATA);
        assert_eq!(render_chart(Some(&Chart::new())), NO_DATA);

        let mut headless = Chart::new();
        headless.insert("Sun", Rashi::Leo);
        assert_eq!(describe_chart(&headless), Err(ChartError::FormattingFailure));
        assert_eq!(render_chart(Some(&headless)), ASCENDANT_MISSING);
    }
}
