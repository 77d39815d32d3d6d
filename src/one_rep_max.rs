use serde::Serialize;

/// Training percentages shown next to an estimate, heaviest first.
pub const PERCENTAGES: [u32; 11] = [100, 95, 90, 85, 80, 75, 70, 65, 60, 55, 50];

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PercentageRow {
    pub percent: u32,
    pub kg: f64,
}

/// Epley estimate, `round(weight * (1 + reps / 30))`.
///
/// A negative or non-finite weight estimates to zero.
#[must_use]
pub fn estimate_one_rep_max(weight_kg: f64, reps: u32) -> f64 {
    if !(weight_kg.is_finite() && weight_kg > 0.0) {
        return 0.0;
    }
    (weight_kg * (1.0 + f64::from(reps) / 30.0)).round()
}

#[must_use]
pub fn percentage_table(one_rep_max_kg: f64) -> Vec<PercentageRow> {
    PERCENTAGES
        .iter()
        .map(|percent| PercentageRow {
            percent: *percent,
            kg: (one_rep_max_kg * f64::from(*percent) / 100.0).round(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epley_rounds_to_whole_kilograms() {
        assert_eq!(estimate_one_rep_max(100.0, 5), 117.0);
        assert_eq!(estimate_one_rep_max(100.0, 10), 133.0);
        assert_eq!(estimate_one_rep_max(60.0, 8), 76.0);
    }

    #[test]
    fn zero_reps_is_the_weight_itself() {
        assert_eq!(estimate_one_rep_max(102.4, 0), 102.0);
    }

    #[test]
    fn bad_weights_estimate_to_zero() {
        assert_eq!(estimate_one_rep_max(-10.0, 5), 0.0);
        assert_eq!(estimate_one_rep_max(f64::NAN, 5), 0.0);
    }

    #[test]
    fn table_runs_from_full_to_half() {
        let table = percentage_table(140.0);
        assert_eq!(table.len(), PERCENTAGES.len());
        assert_eq!(table[0], PercentageRow { percent: 100, kg: 140.0 });
        assert_eq!(table[2], PercentageRow { percent: 90, kg: 126.0 });
        assert_eq!(table[10], PercentageRow { percent: 50, kg: 70.0 });
    }
}
