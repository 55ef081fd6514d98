//! Peak detection and trend classification for an observation series.
//!
//! The analysis is a pure function of the series: it sorts by year, finds
//! the earliest year holding the maximum count, compares the latest year
//! against that peak and against the first year, and derives a signed,
//! rounded percentage.

use common::{ChartSeries, TrendKind, TrendSummary, Year, SPARSE_THRESHOLD};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, instrument, trace};

use crate::error::{ComputeError, Result};
use crate::series::ObservationSeries;

/// Analyzes a series, producing its peak and trend summary.
///
/// A latest count that ties an earlier peak year is [`TrendKind::AtPeakFlat`]
/// with 0%, not a decline.
///
/// # Errors
///
/// Returns [`ComputeError::EmptySeries`] when the series has no
/// observations.
#[instrument(skip(series), fields(observations = series.len()))]
pub fn analyze(series: &ObservationSeries) -> Result<TrendSummary> {
    let (first_year, first_value) = series.first().ok_or(ComputeError::EmptySeries)?;
    let (current_year, current_value) = series.last().ok_or(ComputeError::EmptySeries)?;
    let (peak_year, peak_value) = find_peak(series).ok_or(ComputeError::EmptySeries)?;
    trace!(%peak_year, peak_value, %first_year, first_value, %current_year, current_value, "located series extremes");

    let (trend, change, percent_change) = if current_value == peak_value {
        let growth = i64::from(current_value) - i64::from(first_value);
        if peak_year == current_year && current_value > first_value {
            match rounded_percent(growth, first_value) {
                Some(percent) => (TrendKind::Growing, growth, Some(percent)),
                None => (TrendKind::NewEstablishments, growth, None),
            }
        } else {
            // Latest count equals the maximum: either no growth since the
            // first year, or tied with an earlier peak year.
            (TrendKind::AtPeakFlat, 0, Some(0))
        }
    } else {
        let change = i64::from(current_value) - i64::from(peak_value);
        (TrendKind::Declined, change, rounded_percent(change, peak_value))
    };

    let summary = TrendSummary {
        peak_year,
        peak_value,
        first_year,
        first_value,
        current_year,
        current_value,
        trend,
        change,
        percent_change,
        sparse: peak_value < SPARSE_THRESHOLD,
        observations: series.len(),
    };
    debug!(
        trend = ?summary.trend,
        percent_change = ?summary.percent_change,
        sparse = summary.sparse,
        "series analyzed"
    );
    Ok(summary)
}

/// Earliest year attaining the maximum count.
fn find_peak(series: &ObservationSeries) -> Option<(Year, u32)> {
    series.iter().fold(None, |best, (year, value)| match best {
        Some((_, best_value)) if best_value >= value => best,
        _ => Some((year, value)),
    })
}

/// `change / base * 100`, rounded half away from zero. `None` when `base`
/// is zero.
pub fn rounded_percent(change: i64, base: u32) -> Option<i64> {
    if base == 0 {
        return None;
    }
    let ratio = Decimal::from(change).checked_mul(Decimal::ONE_HUNDRED)?
        .checked_div(Decimal::from(base))?;
    ratio
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

/// Chart input: ordered year labels, counts and the peak position.
pub fn chart_series(series: &ObservationSeries, summary: &TrendSummary) -> ChartSeries {
    let labels: Vec<String> = series.years().map(|y| y.to_string()).collect();
    let values: Vec<u32> = series.values().collect();
    let peak_index = series
        .years()
        .position(|y| y == summary.peak_year)
        .unwrap_or_default();
    ChartSeries {
        labels,
        values,
        peak_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn series(points: &[(u16, u32)]) -> ObservationSeries {
        points
            .iter()
            .map(|(y, v)| (Year::new(*y).unwrap(), *v))
            .collect()
    }

    fn year(y: u16) -> Year {
        Year::new(y).unwrap()
    }

    #[test]
    fn test_declined_series() {
        let summary = analyze(&series(&[(2015, 10), (2016, 15), (2017, 12)])).unwrap();
        assert_eq!(summary.peak_year, year(2016));
        assert_eq!(summary.peak_value, 15);
        assert_eq!(summary.current_year, year(2017));
        assert_eq!(summary.current_value, 12);
        assert_eq!(summary.first_year, year(2015));
        assert_eq!(summary.first_value, 10);
        assert_eq!(summary.trend, TrendKind::Declined);
        assert_eq!(summary.change, -3);
        assert_eq!(summary.percent_change, Some(-20));
        assert!(!summary.sparse);
        assert_eq!(summary.observations, 3);
    }

    #[test]
    fn test_tied_peak_uses_earliest_year() {
        let summary = analyze(&series(&[(2018, 5), (2019, 8), (2020, 8)])).unwrap();
        assert_eq!(summary.peak_year, year(2019));
        assert_eq!(summary.peak_value, 8);
        assert_eq!(summary.current_year, year(2020));
        assert_eq!(summary.current_value, 8);
        assert_eq!(summary.trend, TrendKind::AtPeakFlat);
        assert_eq!(summary.percent_change, Some(0));
    }

    #[test]
    fn test_return_to_first_year_peak_is_flat() {
        let summary = analyze(&series(&[(2010, 5), (2011, 3), (2012, 5)])).unwrap();
        assert_eq!(summary.peak_year, year(2010));
        assert_eq!(summary.current_year, year(2012));
        assert_eq!(summary.trend, TrendKind::AtPeakFlat);
        assert_eq!(summary.change, 0);
        assert_eq!(summary.percent_change, Some(0));
    }

    #[test]
    fn test_growing_sparse_series() {
        let summary = analyze(&series(&[(2010, 2), (2011, 4)])).unwrap();
        assert_eq!(summary.peak_year, year(2011));
        assert_eq!(summary.trend, TrendKind::Growing);
        assert_eq!(summary.change, 2);
        assert_eq!(summary.percent_change, Some(100));
        assert!(summary.sparse);
    }

    #[test]
    fn test_single_observation_is_flat() {
        let summary = analyze(&series(&[(2020, 42)])).unwrap();
        assert_eq!(summary.peak_year, year(2020));
        assert_eq!(summary.first_year, year(2020));
        assert_eq!(summary.current_year, year(2020));
        assert_eq!(summary.trend, TrendKind::AtPeakFlat);
    }

    #[test]
    fn test_zero_baseline_growth_has_no_percentage() {
        let summary = analyze(&series(&[(2012, 0), (2013, 3)])).unwrap();
        assert_eq!(summary.trend, TrendKind::NewEstablishments);
        assert_eq!(summary.change, 3);
        assert_eq!(summary.percent_change, None);
    }

    #[test]
    fn test_all_zero_series_is_flat() {
        let summary = analyze(&series(&[(2012, 0), (2013, 0)])).unwrap();
        assert_eq!(summary.trend, TrendKind::AtPeakFlat);
        assert_eq!(summary.peak_year, year(2012));
        assert!(summary.sparse);
    }

    #[test]
    fn test_decline_to_zero() {
        let summary = analyze(&series(&[(2012, 4), (2013, 0)])).unwrap();
        assert_eq!(summary.trend, TrendKind::Declined);
        assert_eq!(summary.percent_change, Some(-100));
    }

    #[test]
    fn test_empty_series_is_an_error() {
        let err = analyze(&ObservationSeries::default()).unwrap_err();
        assert!(matches!(err, ComputeError::EmptySeries));
    }

    #[test]
    fn test_gaps_between_years() {
        let summary = analyze(&series(&[(1998, 30), (2005, 45), (2023, 20)])).unwrap();
        assert_eq!(summary.peak_year, year(2005));
        assert_eq!(summary.percent_change, Some(-56));
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(rounded_percent(-1, 40), Some(-3)); // -2.5
        assert_eq!(rounded_percent(1, 40), Some(3)); // 2.5
        assert_eq!(rounded_percent(1, 3), Some(33));
        assert_eq!(rounded_percent(2, 3), Some(67));
        assert_eq!(rounded_percent(5, 0), None);
    }

    #[test]
    fn test_chart_series_marks_peak() {
        let s = series(&[(2015, 10), (2016, 15), (2017, 12)]);
        let summary = analyze(&s).unwrap();
        let chart = chart_series(&s, &summary);
        assert_eq!(chart.labels, vec!["2015", "2016", "2017"]);
        assert_eq!(chart.values, vec![10, 15, 12]);
        assert_eq!(chart.peak_index, 1);
    }

    fn arb_series() -> impl Strategy<Value = Vec<(u16, u32)>> {
        prop::collection::vec((1990u16..2030, 0u32..5000), 1..30)
    }

    proptest! {
        #[test]
        fn prop_peak_dominates_every_value(points in arb_series()) {
            let s = series(&points);
            let summary = analyze(&s).unwrap();
            prop_assert!(s.values().all(|v| v <= summary.peak_value));
            prop_assert!(s.iter().all(|(y, v)| v < summary.peak_value || y >= summary.peak_year));
        }

        #[test]
        fn prop_independent_of_input_order(points in arb_series()) {
            let forward = analyze(&series(&points)).unwrap();
            // Duplicate years keep the last value, so dedupe before reordering.
            let deduped: ObservationSeries = series(&points);
            let reordered: ObservationSeries = deduped.iter().collect::<Vec<_>>().into_iter().rev().collect();
            prop_assert_eq!(analyze(&reordered).unwrap(), forward.clone());
            prop_assert_eq!(analyze(&series(&points)).unwrap(), forward);
        }

        #[test]
        fn prop_years_recover_values(points in arb_series()) {
            let s = series(&points);
            let summary = analyze(&s).unwrap();
            prop_assert_eq!(s.get(summary.peak_year), Some(summary.peak_value));
            prop_assert_eq!(s.get(summary.current_year), Some(summary.current_value));
            prop_assert_eq!(s.get(summary.first_year), Some(summary.first_value));
        }

        #[test]
        fn prop_strict_latest_maximum_is_at_peak(points in arb_series(), bump in 1u32..100) {
            let s = series(&points);
            let max = s.values().max().unwrap_or_default();
            let (last_year, _) = s.last().unwrap();
            let mut raised = s.clone();
            raised.insert(last_year, max + bump);
            let summary = analyze(&raised).unwrap();
            prop_assert_eq!(summary.peak_year, summary.current_year);
            prop_assert!(summary.trend.is_at_peak());
        }

        #[test]
        fn prop_declined_change_is_negative(points in arb_series()) {
            let summary = analyze(&series(&points)).unwrap();
            if summary.trend == TrendKind::Declined {
                prop_assert!(summary.change < 0);
                prop_assert!(summary.current_value < summary.peak_value);
            }
        }
    }
}
