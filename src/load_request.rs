use crate::{bar_standard::BarStandard, error::ParseError};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoadRequest {
    pub total_kg: f64,
    pub bar_kg: f64,
    pub min_increment_kg: f64,
}

impl LoadRequest {
    #[must_use]
    pub fn new(total_kg: f64, bar_kg: f64, min_increment_kg: f64) -> Self {
        LoadRequest {
            total_kg,
            bar_kg,
            min_increment_kg,
        }
    }

    #[must_use]
    pub fn for_standard(total_kg: f64, standard: BarStandard) -> Self {
        LoadRequest::new(total_kg, standard.bar_kg(), standard.min_increment_kg())
    }
}

/// Parses a non-negative weight in kilograms, with or without a `kg` suffix.
///
/// # Errors
/// If the text is not a finite, non-negative number.
pub fn parse_kg(s: &str) -> Result<f64, ParseError> {
    let trimmed = s.trim();
    let number = trimmed
        .strip_suffix("kg")
        .or_else(|| trimmed.strip_suffix("KG"))
        .unwrap_or(trimmed)
        .trim();
    let kg = number
        .parse::<f64>()
        .map_err(|_| ParseError::Weight(s.to_string()))?;
    if kg.is_finite() && kg >= 0.0 {
        Ok(kg)
    } else {
        Err(ParseError::Weight(s.to_string()))
    }
}
