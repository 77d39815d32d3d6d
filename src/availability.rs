use hashbrown::HashMap;

use crate::plate::{Plate, kg_to_grams};

/// Which denominations may be loaded. A denomination missing from the mask
/// is available.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AvailabilityMask {
    mask: HashMap<u32, bool>,
}

impl AvailabilityMask {
    #[must_use]
    pub fn new() -> Self {
        AvailabilityMask::default()
    }

    #[must_use]
    pub fn without(weights_kg: &[f64]) -> Self {
        let mut mask = AvailabilityMask::new();
        for kg in weights_kg {
            mask.set(*kg, false);
        }
        mask
    }

    pub fn set(&mut self, weight_kg: f64, available: bool) {
        self.mask.insert(kg_to_grams(weight_kg), available);
    }

    /// Flips the denomination and returns its new availability.
    pub fn toggle(&mut self, weight_kg: f64) -> bool {
        let entry = self.mask.entry(kg_to_grams(weight_kg)).or_insert(true);
        *entry = !*entry;
        *entry
    }

    #[must_use]
    pub fn is_available(&self, weight_kg: f64) -> bool {
        self.mask
            .get(&kg_to_grams(weight_kg))
            .copied()
            .unwrap_or(true)
    }

    pub fn reset(&mut self) {
        self.mask.clear();
    }

    /// The subset of `plates` this mask allows, in the same order.
    #[must_use]
    pub fn filter(&self, plates: &[Plate]) -> Vec<Plate> {
        plates
            .iter()
            .filter(|p| self.is_available(p.weight_kg()))
            .copied()
            .collect()
    }
}
