use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{error::ParseError, plate::Plate};

static STANDARD_PLATES: [Plate; 5] = [
    Plate::new(20.0, "#1d4ed8", "#1e3a8a", 54, 450),
    Plate::new(10.0, "#15803d", "#14532d", 45, 450),
    Plate::new(5.0, "#f5f5f4", "#a8a29e", 30, 230),
    Plate::new(2.5, "#dc2626", "#7f1d1d", 25, 200),
    Plate::new(1.25, "#d4d4d8", "#71717a", 20, 160),
];

static POWERLIFTING_PLATES: [Plate; 9] = [
    Plate::new(25.0, "#dc2626", "#7f1d1d", 27, 450),
    Plate::new(20.0, "#1d4ed8", "#1e3a8a", 22, 450),
    Plate::new(15.0, "#facc15", "#a16207", 19, 400),
    Plate::new(10.0, "#15803d", "#14532d", 16, 325),
    Plate::new(5.0, "#f5f5f4", "#a8a29e", 16, 228),
    Plate::new(2.5, "#171717", "#404040", 15, 190),
    Plate::new(1.25, "#d4d4d8", "#71717a", 12, 160),
    Plate::new(0.5, "#d4d4d8", "#71717a", 8, 134),
    Plate::new(0.25, "#d4d4d8", "#71717a", 6, 100),
];

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Ord, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarStandard {
    #[default]
    Standard,
    Powerlifting,
}

impl BarStandard {
    #[must_use]
    pub fn bar_kg(&self) -> f64 {
        match self {
            BarStandard::Standard | BarStandard::Powerlifting => 20.0,
        }
    }

    /// Heaviest total the widget presents without an "exceeded" warning.
    /// The resolver itself has no ceiling.
    #[must_use]
    pub fn ceiling_kg(&self) -> f64 {
        match self {
            BarStandard::Standard => 300.0,
            BarStandard::Powerlifting => 470.0,
        }
    }

    #[must_use]
    pub fn min_increment_kg(&self) -> f64 {
        0.25
    }

    /// Every denomination manufactured for this standard, heaviest first.
    #[must_use]
    pub fn plates(&self) -> &'static [Plate] {
        match self {
            BarStandard::Standard => &STANDARD_PLATES,
            BarStandard::Powerlifting => &POWERLIFTING_PLATES,
        }
    }
}

impl Display for BarStandard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BarStandard::Standard => write!(f, "Standard"),
            BarStandard::Powerlifting => write!(f, "Powerlifting"),
        }
    }
}

impl FromStr for BarStandard {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "s" | "standard" => Ok(BarStandard::Standard),
            "p" | "pl" | "powerlifting" => Ok(BarStandard::Powerlifting),
            _ => Err(ParseError::BarStandard(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use hashbrown::HashSet;
    use itertools::Itertools;

    use super::*;

    #[test]
    fn plate_sets_are_descending_and_distinct() {
        for standard in [BarStandard::Standard, BarStandard::Powerlifting] {
            let grams = standard.plates().iter().map(Plate::grams).collect::<Vec<_>>();
            assert!(grams.iter().tuple_windows().all(|(a, b)| a > b), "{standard}");
            assert_eq!(grams.iter().collect::<HashSet<_>>().len(), grams.len());
        }
    }

    #[test]
    fn parses_short_and_long_names() {
        assert_eq!("pl".parse::<BarStandard>().unwrap(), BarStandard::Powerlifting);
        assert_eq!(" Standard ".parse::<BarStandard>().unwrap(), BarStandard::Standard);
        assert!("olympic".parse::<BarStandard>().is_err());
    }

    #[test]
    fn ceilings_match_the_widget_warnings() {
        assert_eq!(BarStandard::Standard.ceiling_kg(), 300.0);
        assert_eq!(BarStandard::Powerlifting.ceiling_kg(), 470.0);
    }
}
