use common::Year;
use std::collections::BTreeMap;

use crate::error::{ComputeError, Result};

/// Year to establishment-count observations for one (county, industry) pair.
///
/// Backed by a `BTreeMap`, so iteration is always in ascending year order no
/// matter how the observations were supplied. Years need not be contiguous.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservationSeries {
    points: BTreeMap<Year, u32>,
}

impl ObservationSeries {
    /// Builds a series; a repeated year keeps the last value supplied.
    pub fn new<I>(points: I) -> Self
    where
        I: IntoIterator<Item = (Year, u32)>,
    {
        Self {
            points: points.into_iter().collect(),
        }
    }

    /// Builds a series from raw year strings and signed counts, validating
    /// both.
    pub fn from_raw<'a, I>(points: I, context: &str) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, i64)>,
    {
        let mut series = BTreeMap::new();
        for (year, value) in points {
            let year: Year = year.parse()?;
            let value = u32::try_from(value).map_err(|_| ComputeError::InvalidCount {
                context: format!("{} in {}", context, year),
                value,
            })?;
            series.insert(year, value);
        }
        Ok(Self { points: series })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, year: Year) -> Option<u32> {
        self.points.get(&year).copied()
    }

    pub fn first(&self) -> Option<(Year, u32)> {
        self.points.first_key_value().map(|(y, v)| (*y, *v))
    }

    pub fn last(&self) -> Option<(Year, u32)> {
        self.points.last_key_value().map(|(y, v)| (*y, *v))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Year, u32)> + '_ {
        self.points.iter().map(|(y, v)| (*y, *v))
    }

    pub fn years(&self) -> impl Iterator<Item = Year> + '_ {
        self.points.keys().copied()
    }

    pub fn values(&self) -> impl Iterator<Item = u32> + '_ {
        self.points.values().copied()
    }

    pub(crate) fn as_map(&self) -> &BTreeMap<Year, u32> {
        &self.points
    }

    pub(crate) fn insert(&mut self, year: Year, value: u32) {
        self.points.insert(year, value);
    }
}

impl FromIterator<(Year, u32)> for ObservationSeries {
    fn from_iter<T: IntoIterator<Item = (Year, u32)>>(iter: T) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn year(y: u16) -> Year {
        Year::new(y).unwrap()
    }

    #[test]
    fn test_iteration_is_ascending() {
        let series = ObservationSeries::new([(year(2017), 12), (year(2015), 10), (year(2016), 15)]);
        let years: Vec<u16> = series.years().map(Year::get).collect();
        assert_eq!(years, vec![2015, 2016, 2017]);
        assert_eq!(series.values().collect::<Vec<_>>(), vec![10, 15, 12]);
        assert_eq!(series.first(), Some((year(2015), 10)));
        assert_eq!(series.last(), Some((year(2017), 12)));
    }

    #[test]
    fn test_repeated_year_keeps_last_value() {
        let series = ObservationSeries::new([(year(2015), 10), (year(2015), 11)]);
        assert_eq!(series.len(), 1);
        assert_eq!(series.get(year(2015)), Some(11));
    }

    #[test]
    fn test_from_raw_validates() {
        let series = ObservationSeries::from_raw([("2012", 3), ("2013", 0)], "42101/5411").unwrap();
        assert_eq!(series.len(), 2);

        let err = ObservationSeries::from_raw([("2012", -1)], "42101/5411").unwrap_err();
        assert!(matches!(err, ComputeError::InvalidCount { value: -1, .. }));

        let err = ObservationSeries::from_raw([("12", 1)], "42101/5411").unwrap_err();
        assert!(matches!(err, ComputeError::InvalidIdentifier(_)));
    }

    #[test]
    fn test_empty_series() {
        let series = ObservationSeries::default();
        assert!(series.is_empty());
        assert_eq!(series.first(), None);
    }
}
