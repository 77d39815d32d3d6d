//! Greedy plate loading.
//!
//! Every calculator surface (CLI, HTTP, [`crate::calculator::PlateCalculator`])
//! goes through [`resolve_load`], so the rounding discipline lives in one place.

use itertools::Itertools;

use crate::{
    load_request::LoadRequest,
    load_result::LoadResult,
    plate::Plate,
    rounding::{floor_to, whole_multiples},
};

/// Computes how many plates of each denomination go on *each* side of the
/// bar so that the loaded total is as close as possible to `total_kg`
/// without exceeding it.
///
/// Denominations are visited heaviest first regardless of the order of
/// `plates`; the returned counts are indexed like `plates`. After every
/// denomination the remaining per-side budget is floored onto the effective
/// step, `min(min_increment_kg, lightest plate)`, which keeps binary
/// floating-point drift from accumulating.
///
/// This is greedy, not an exhaustive search. For the shipped plate sets the
/// result is optimal; for arbitrary denominations it may not be.
///
/// Never fails: a total at or below the bar, a non-finite total or an empty
/// plate set all yield zero counts.
#[must_use]
pub fn resolve_load(
    total_kg: f64,
    bar_kg: f64,
    plates: &[Plate],
    min_increment_kg: f64,
) -> Vec<usize> {
    let mut counts = vec![0; plates.len()];

    let Some(lightest) = plates
        .iter()
        .map(Plate::weight_kg)
        .filter(|kg| is_positive(*kg))
        .min_by(f64::total_cmp)
    else {
        return counts;
    };

    let step = if is_positive(min_increment_kg) {
        min_increment_kg.min(lightest)
    } else {
        lightest
    };

    let load = if total_kg.is_finite() && bar_kg.is_finite() {
        (total_kg - bar_kg).max(0.0)
    } else {
        0.0
    };

    let mut per_side = load / 2.0;

    for index in descending(plates) {
        let value = plates[index].weight_kg();
        let n = whole_multiples(per_side, value);
        counts[index] = n;
        #[allow(clippy::cast_precision_loss)]
        let used = n as f64 * value;
        per_side = floor_to(per_side - used, step).max(0.0);
    }

    counts
}

/// Runs [`resolve_load`] for a request and pairs the counts with their plates.
#[must_use]
pub fn resolve(request: &LoadRequest, plates: &[Plate]) -> LoadResult {
    let counts = resolve_load(
        request.total_kg,
        request.bar_kg,
        plates,
        request.min_increment_kg,
    );
    LoadResult::new(
        request.total_kg,
        request.bar_kg,
        plates.iter().copied().zip(counts).collect(),
    )
}

/// The total actually on the bar: `bar + 2 * Σ count * value`.
#[must_use]
pub fn closest_achievable_kg(bar_kg: f64, plates: &[Plate], counts: &[usize]) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let per_side: f64 = plates
        .iter()
        .zip(counts)
        .map(|(plate, count)| plate.weight_kg() * *count as f64)
        .sum();
    bar_kg + 2.0 * per_side
}

fn descending(plates: &[Plate]) -> impl Iterator<Item = usize> + '_ {
    (0..plates.len())
        .filter(|i| is_positive(plates[*i].weight_kg()))
        .sorted_by(|a, b| plates[*b].weight_kg().total_cmp(&plates[*a].weight_kg()))
}

fn is_positive(kg: f64) -> bool {
    kg.is_finite() && kg > 0.0
}
