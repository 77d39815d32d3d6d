use std::fmt::Display;

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plate {
    weight_kg: f64,
    face_color: &'static str,
    bevel_color: &'static str,
    thickness_mm: u32,
    diameter_mm: u32,
}

impl Plate {
    #[must_use]
    pub const fn new(
        weight_kg: f64,
        face_color: &'static str,
        bevel_color: &'static str,
        thickness_mm: u32,
        diameter_mm: u32,
    ) -> Self {
        Plate {
            weight_kg,
            face_color,
            bevel_color,
            thickness_mm,
            diameter_mm,
        }
    }

    /// A plate with neutral display attributes, for ad hoc denominations.
    #[must_use]
    pub const fn plain(weight_kg: f64) -> Self {
        Plate::new(weight_kg, "#3a3a3a", "#1f1f1f", 20, 450)
    }

    #[must_use]
    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    /// The weight in whole grams. Denominations are keyed by this value.
    #[must_use]
    pub fn grams(&self) -> u32 {
        kg_to_grams(self.weight_kg)
    }

    #[must_use]
    pub fn from_weights(weights: &[f64]) -> Vec<Plate> {
        weights.iter().map(|w| Plate::plain(*w)).collect()
    }
}

#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn kg_to_grams(kg: f64) -> u32 {
    if kg.is_finite() && kg > 0.0 {
        (kg * 1000.0).round() as u32
    } else {
        0
    }
}

impl Display for Plate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}kg", self.weight_kg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grams_key_survives_fractional_weights() {
        assert_eq!(Plate::plain(1.25).grams(), 1250);
        assert_eq!(Plate::plain(0.1 + 0.2).grams(), 300);
        assert_eq!(Plate::plain(-2.5).grams(), 0);
    }

    #[test]
    fn displays_in_kilograms() {
        assert_eq!(Plate::plain(2.5).to_string(), "2.5kg");
        assert_eq!(Plate::plain(20.0).to_string(), "20kg");
    }
}
