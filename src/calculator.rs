use tracing::debug;

use crate::{
    availability::AvailabilityMask, bar_standard::BarStandard, load_request::LoadRequest,
    load_result::LoadResult, plate::Plate, resolver,
};

/// State behind a plate calculator widget: the selected bar standard and
/// which of its denominations the lifter has on hand.
#[derive(Clone, Debug, Default)]
pub struct PlateCalculator {
    standard: BarStandard,
    availability: AvailabilityMask,
}

impl PlateCalculator {
    #[must_use]
    pub fn new(standard: BarStandard) -> Self {
        PlateCalculator {
            standard,
            availability: AvailabilityMask::new(),
        }
    }

    #[must_use]
    pub fn with_availability(standard: BarStandard, availability: AvailabilityMask) -> Self {
        PlateCalculator {
            standard,
            availability,
        }
    }

    #[must_use]
    pub fn standard(&self) -> BarStandard {
        self.standard
    }

    /// Switching standards makes every denomination available again.
    pub fn set_standard(&mut self, standard: BarStandard) {
        if standard != self.standard {
            debug!(from = %self.standard, to = %standard, "switching bar standard");
        }
        self.standard = standard;
        self.availability.reset();
    }

    pub fn set_available(&mut self, weight_kg: f64, available: bool) {
        self.availability.set(weight_kg, available);
    }

    pub fn toggle(&mut self, weight_kg: f64) -> bool {
        self.availability.toggle(weight_kg)
    }

    #[must_use]
    pub fn is_available(&self, weight_kg: f64) -> bool {
        self.availability.is_available(weight_kg)
    }

    /// Denominations that may be loaded, heaviest first.
    #[must_use]
    pub fn available_plates(&self) -> Vec<Plate> {
        self.availability.filter(self.standard.plates())
    }

    #[must_use]
    pub fn resolve(&self, total_kg: f64) -> LoadResult {
        let request = LoadRequest::for_standard(total_kg, self.standard);
        resolver::resolve(&request, &self.available_plates())
    }

    /// Whether the widget should warn that the total is past what the bar is
    /// meant to hold. Advisory only.
    #[must_use]
    pub fn exceeds_ceiling(&self, total_kg: f64) -> bool {
        total_kg > self.standard.ceiling_kg()
    }
}
