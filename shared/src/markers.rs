//! Best/worst day markers
//!
//! Flags the extreme days of an already-summarized range in place. Ranking
//! uses one metric at a time; ties mark every tied day, which is how the
//! calendar highlights them. Days with no logs rank like any other, so an
//! untouched day is a legitimate worst day.

use serde::{Deserialize, Serialize};

use crate::day_summary::DaySummary;

/// Metric used to rank days within a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingMetric {
    #[default]
    Calories,
    Protein,
    Score,
}

impl RankingMetric {
    fn value(&self, day: &DaySummary) -> f64 {
        match self {
            Self::Calories => day.calories,
            Self::Protein => day.protein_g,
            Self::Score => f64::from(day.score),
        }
    }
}

/// Set `is_best_day` on every day whose metric equals the range maximum and
/// `is_worst_day` on every day equal to the minimum. A single-day or
/// all-equal range marks days as both; an empty slice is a no-op.
pub fn mark_best_worst(days: &mut [DaySummary], metric: RankingMetric) {
    let Some(first) = days.first() else {
        return;
    };

    let mut best = metric.value(first);
    let mut worst = best;
    for day in days.iter().skip(1) {
        let value = metric.value(day);
        if value > best {
            best = value;
        }
        if value < worst {
            worst = value;
        }
    }

    for day in days.iter_mut() {
        let value = metric.value(day);
        day.is_best_day = value == best;
        day.is_worst_day = value == worst;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buckets::DayBucket;
    use crate::day_summary::summarize_day;
    use crate::events::FoodEvent;
    use crate::policy::ScoringPolicy;
    use chrono::{Days, NaiveDate};
    use proptest::prelude::*;

    fn summaries(calorie_days: &[f64]) -> Vec<DaySummary> {
        let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let policy = ScoringPolicy::default();
        calorie_days
            .iter()
            .enumerate()
            .map(|(offset, &calories)| {
                let date = start + Days::new(offset as u64);
                let mut bucket = DayBucket::empty(date);
                if calories > 0.0 {
                    bucket.food.push(FoodEvent {
                        eaten_at: date.and_hms_opt(12, 0, 0).unwrap().and_utc(),
                        calories,
                        protein_g: 0.0,
                        carbs_g: 0.0,
                        fat_g: 0.0,
                    });
                }
                summarize_day(&bucket, &policy)
            })
            .collect()
    }

    #[test]
    fn unique_extremes_get_single_marks() {
        let mut days = summaries(&[1200.0, 2500.0, 1800.0]);
        mark_best_worst(&mut days, RankingMetric::Calories);

        assert!(days[1].is_best_day && !days[1].is_worst_day);
        assert!(days[0].is_worst_day && !days[0].is_best_day);
        assert!(!days[2].is_best_day && !days[2].is_worst_day);
    }

    #[test]
    fn tied_maxima_are_all_marked_best() {
        let mut days = summaries(&[2500.0, 1200.0, 2500.0]);
        mark_best_worst(&mut days, RankingMetric::Calories);

        assert!(days[0].is_best_day);
        assert!(days[2].is_best_day);
        assert!(days[1].is_worst_day);
    }

    #[test]
    fn all_equal_days_are_both_best_and_worst() {
        let mut days = summaries(&[1500.0, 1500.0, 1500.0]);
        mark_best_worst(&mut days, RankingMetric::Calories);

        assert!(days.iter().all(|d| d.is_best_day && d.is_worst_day));
    }

    #[test]
    fn single_day_is_both_best_and_worst() {
        let mut days = summaries(&[1800.0]);
        mark_best_worst(&mut days, RankingMetric::Calories);

        assert!(days[0].is_best_day);
        assert!(days[0].is_worst_day);
    }

    #[test]
    fn empty_slice_is_a_no_op() {
        let mut days: Vec<DaySummary> = Vec::new();
        mark_best_worst(&mut days, RankingMetric::Calories);
        assert!(days.is_empty());
    }

    #[test]
    fn empty_days_rank_as_worst() {
        let mut days = summaries(&[0.0, 2000.0]);
        mark_best_worst(&mut days, RankingMetric::Calories);

        assert!(days[0].is_worst_day);
        assert!(days[1].is_best_day);
    }

    #[test]
    fn switching_metric_overwrites_previous_flags() {
        let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let policy = ScoringPolicy::default();
        let mut days: Vec<DaySummary> = [(2500.0, 10.0), (1200.0, 90.0)]
            .iter()
            .enumerate()
            .map(|(offset, &(calories, protein_g))| {
                let date = start + Days::new(offset as u64);
                let mut bucket = DayBucket::empty(date);
                bucket.food.push(FoodEvent {
                    eaten_at: date.and_hms_opt(12, 0, 0).unwrap().and_utc(),
                    calories,
                    protein_g,
                    carbs_g: 0.0,
                    fat_g: 0.0,
                });
                summarize_day(&bucket, &policy)
            })
            .collect();

        mark_best_worst(&mut days, RankingMetric::Calories);
        assert!(days[0].is_best_day && days[1].is_worst_day);

        mark_best_worst(&mut days, RankingMetric::Protein);
        assert!(days[1].is_best_day && days[0].is_worst_day);
        assert!(!days[0].is_best_day && !days[1].is_worst_day);
    }

    proptest! {
        #[test]
        fn marking_always_yields_a_best_and_a_worst(
            calories in proptest::collection::vec(0.0f64..5000.0, 1..40),
        ) {
            let mut days = summaries(&calories);
            mark_best_worst(&mut days, RankingMetric::Calories);

            prop_assert!(days.iter().any(|d| d.is_best_day));
            prop_assert!(days.iter().any(|d| d.is_worst_day));

            // every best day carries at least as many calories as every worst day
            let best_min = days
                .iter()
                .filter(|d| d.is_best_day)
                .map(|d| d.calories)
                .fold(f64::INFINITY, f64::min);
            let worst_max = days
                .iter()
                .filter(|d| d.is_worst_day)
                .map(|d| d.calories)
                .fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(best_min >= worst_max);
        }

        #[test]
        fn marking_is_idempotent(
            calories in proptest::collection::vec(0.0f64..5000.0, 0..20),
        ) {
            let mut once = summaries(&calories);
            mark_best_worst(&mut once, RankingMetric::Score);
            let mut twice = once.clone();
            mark_best_worst(&mut twice, RankingMetric::Score);
            prop_assert_eq!(once, twice);
        }
    }
}
