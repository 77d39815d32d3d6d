use std::fmt::Display;

use itertools::Itertools;

use crate::{plate::Plate, resolver::closest_achievable_kg};

const EXACT_TOLERANCE_KG: f64 = 1e-6;

/// Per-side plate counts for one resolved load, in the order of the plate
/// set that was resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadResult {
    requested_kg: f64,
    bar_kg: f64,
    loaded: Vec<(Plate, usize)>,
}

impl LoadResult {
    #[must_use]
    pub fn new(requested_kg: f64, bar_kg: f64, loaded: Vec<(Plate, usize)>) -> Self {
        LoadResult {
            requested_kg,
            bar_kg,
            loaded,
        }
    }

    #[must_use]
    pub fn bar_kg(&self) -> f64 {
        self.bar_kg
    }

    #[must_use]
    pub fn loaded(&self) -> &[(Plate, usize)] {
        &self.loaded
    }

    #[must_use]
    pub fn count_of(&self, weight_kg: f64) -> usize {
        let grams = Plate::plain(weight_kg).grams();
        self.loaded
            .iter()
            .find(|(plate, _)| plate.grams() == grams)
            .map_or(0, |(_, count)| *count)
    }

    #[must_use]
    pub fn achieved_kg(&self) -> f64 {
        let (plates, counts): (Vec<Plate>, Vec<usize>) = self.loaded.iter().copied().unzip();
        closest_achievable_kg(self.bar_kg, &plates, &counts)
    }

    #[must_use]
    pub fn per_side_kg(&self) -> f64 {
        (self.achieved_kg() - self.bar_kg) / 2.0
    }

    /// What was asked for but could not be loaded.
    #[must_use]
    pub fn remainder_kg(&self) -> f64 {
        (self.requested_kg - self.achieved_kg()).max(0.0)
    }

    #[must_use]
    pub fn is_exact(&self) -> bool {
        (self.requested_kg - self.achieved_kg()).abs() < EXACT_TOLERANCE_KG
    }

    /// Plates for one side, heaviest first, one entry per physical plate.
    #[must_use]
    pub fn side(&self) -> Vec<Plate> {
        self.loaded
            .iter()
            .sorted_by(|(a, _), (b, _)| b.weight_kg().total_cmp(&a.weight_kg()))
            .flat_map(|(plate, count)| std::iter::repeat_n(*plate, *count))
            .collect()
    }

    /// "exact match" or the closest total the bar can carry.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.is_exact() {
            format!("Exact match: {:.2}kg", self.achieved_kg())
        } else {
            format!("Closest achievable: {:.2}kg", self.achieved_kg())
        }
    }
}

impl Display for LoadResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let side = self
            .side()
            .iter()
            .map(Plate::weight_kg)
            .collect::<Vec<_>>();

        write!(f, "{}kg bar + {:?} per side ({})", self.bar_kg, side, self.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(requested_kg: f64, loaded: &[(f64, usize)]) -> LoadResult {
        LoadResult::new(
            requested_kg,
            20.0,
            loaded.iter().map(|(kg, n)| (Plate::plain(*kg), *n)).collect(),
        )
    }

    #[test]
    fn exact_loads_report_an_exact_match() {
        let result = result(100.0, &[(20.0, 2), (10.0, 0)]);
        assert!(result.is_exact());
        assert_eq!(result.per_side_kg(), 40.0);
        assert_eq!(result.summary(), "Exact match: 100.00kg");
    }

    #[test]
    fn short_loads_report_the_closest_total() {
        let result = result(61.0, &[(20.0, 1), (1.25, 0)]);
        assert!(!result.is_exact());
        assert_eq!(result.remainder_kg(), 1.0);
        assert_eq!(result.summary(), "Closest achievable: 60.00kg");
    }

    #[test]
    fn side_lists_every_plate_heaviest_first() {
        let result = result(107.5, &[(1.25, 1), (20.0, 2), (2.5, 0)]);
        let side = result.side().iter().map(Plate::weight_kg).collect::<Vec<_>>();
        assert_eq!(side, vec![20.0, 20.0, 1.25]);
        assert_eq!(result.count_of(20.0), 2);
        assert_eq!(result.count_of(5.0), 0);
    }

    #[test]
    fn displays_bar_side_and_summary() {
        let result = result(70.0, &[(20.0, 1), (5.0, 1)]);
        assert_eq!(
            result.to_string(),
            "20kg bar + [20.0, 5.0] per side (Exact match: 70.00kg)"
        );
    }
}
