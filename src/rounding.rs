/// Tolerance applied before flooring so that values sitting on a
/// step boundary (e.g. `0.1 + 0.2`) land on the boundary instead of one step
/// below it. Adequate for loads up to a few hundred kilograms.
pub const EPSILON: f64 = 1e-9;

/// Floors `value` to the nearest multiple of `step` at or below it.
///
/// A non-positive or non-finite `step` leaves the value untouched.
#[must_use]
pub fn floor_to(value: f64, step: f64) -> f64 {
    if !(step.is_finite() && step > 0.0) {
        return value;
    }
    (value / step + EPSILON).floor() * step
}

/// Number of whole `unit`s that fit in `value`, never negative.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn whole_multiples(value: f64, unit: f64) -> usize {
    if !(unit.is_finite() && unit > 0.0) || !(value.is_finite() && value > 0.0) {
        return 0;
    }
    (value / unit + EPSILON).floor() as usize
}
