use anyhow::Result;
use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use bikeshare::Trip;

/// How far on either side of the selected minute a trip endpoint may fall
pub const WINDOW_MINUTES: i32 = 60;
pub const MINUTES_PER_DAY: i32 = 24 * 60;

/// The slider uses this value to mean "no filter"
pub const NO_FILTER: i32 = -1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFilter {
    None,
    /// Minutes since midnight, in [0, 1439]
    Minute(u16),
}

impl TimeFilter {
    /// Interprets a slider value, where -1 is the sentinel for no filter.
    pub fn from_slider(value: i32) -> Result<Self> {
        if value == NO_FILTER {
            return Ok(TimeFilter::None);
        }
        if !(0..MINUTES_PER_DAY).contains(&value) {
            bail!("Slider value {value} isn't -1 or a minute of the day");
        }
        Ok(TimeFilter::Minute(value as u16))
    }

    pub fn to_slider(self) -> i32 {
        match self {
            TimeFilter::None => NO_FILTER,
            TimeFilter::Minute(m) => m as i32,
        }
    }

    pub fn is_active(self) -> bool {
        self != TimeFilter::None
    }

    /// Does either endpoint of the trip fall within the window? The window doesn't wrap around
    /// midnight.
    pub fn matches(self, trip: &Trip) -> bool {
        match self {
            TimeFilter::None => true,
            TimeFilter::Minute(m) => {
                let m = m as i32;
                (minute_of_day(&trip.started_at) - m).abs() <= WINDOW_MINUTES
                    || (minute_of_day(&trip.ended_at) - m).abs() <= WINDOW_MINUTES
            }
        }
    }
}

/// Ignores the date and seconds
pub fn minute_of_day(t: &NaiveDateTime) -> i32 {
    (t.hour() * 60 + t.minute()) as i32
}

/// Keeps the trips active around the selected time, preserving order.
pub fn filter_trips_by_minute(trips: &[Trip], filter: TimeFilter) -> Vec<&Trip> {
    match filter {
        TimeFilter::None => trips.iter().collect(),
        TimeFilter::Minute(_) => trips.iter().filter(|trip| filter.matches(trip)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::trip_at;

    #[test]
    fn test_from_slider() {
        assert_eq!(TimeFilter::from_slider(-1).unwrap(), TimeFilter::None);
        assert_eq!(TimeFilter::from_slider(0).unwrap(), TimeFilter::Minute(0));
        assert_eq!(TimeFilter::from_slider(1439).unwrap(), TimeFilter::Minute(1439));
        assert!(TimeFilter::from_slider(1440).is_err());
        assert!(TimeFilter::from_slider(-2).is_err());
        assert_eq!(TimeFilter::Minute(870).to_slider(), 870);
        assert_eq!(TimeFilter::None.to_slider(), -1);
    }

    #[test]
    fn test_minute_of_day_ignores_date_and_seconds() {
        let trip = trip_at("A", "B", "2024-03-17 14:30:59", "2024-03-18 00:01:00");
        assert_eq!(minute_of_day(&trip.started_at), 870);
        assert_eq!(minute_of_day(&trip.ended_at), 1);
    }

    #[test]
    fn test_no_filter_is_identity() {
        let trips = vec![
            trip_at("A", "B", "2024-03-01 08:00", "2024-03-01 08:10"),
            trip_at("B", "C", "2024-03-01 23:00", "2024-03-01 23:10"),
            trip_at("C", "A", "2024-03-01 03:00", "2024-03-01 03:10"),
        ];
        let result = filter_trips_by_minute(&trips, TimeFilter::None);
        assert_eq!(result, trips.iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_window_boundary_is_inclusive() {
        let filter = TimeFilter::Minute(600);
        let excluded = trip_at("A", "B", "2024-03-01 08:55", "2024-03-01 08:58");
        let included = trip_at("A", "B", "2024-03-01 09:00", "2024-03-01 09:00");
        let late = trip_at("A", "B", "2024-03-01 11:00", "2024-03-01 11:01");
        let trips = vec![excluded.clone(), included.clone(), late.clone()];

        let result = filter_trips_by_minute(&trips, filter);
        assert_eq!(result, vec![&included, &late]);
    }

    #[test]
    fn test_either_endpoint_matches() {
        let filter = TimeFilter::Minute(600);
        // Starts long before the window, ends inside it
        let trip = trip_at("A", "B", "2024-03-01 06:00", "2024-03-01 09:30");
        assert!(filter.matches(&trip));
        let trip = trip_at("A", "B", "2024-03-01 06:00", "2024-03-01 07:30");
        assert!(!filter.matches(&trip));
    }

    #[test]
    fn test_no_midnight_wrap() {
        let trip = trip_at("A", "B", "2024-03-01 23:30", "2024-03-01 23:45");
        assert!(!TimeFilter::Minute(0).matches(&trip));
        let trip = trip_at("A", "B", "2024-03-01 00:30", "2024-03-01 00:45");
        assert!(!TimeFilter::Minute(1439).matches(&trip));
    }

    #[test]
    fn test_filtered_trips_all_match() {
        let mut trips = Vec::new();
        for hour in 0..24 {
            for minute in [0, 17, 45] {
                let start = format!("2024-03-01 {hour:02}:{minute:02}");
                let end_hour = (hour + 2) % 24;
                let end = format!("2024-03-01 {end_hour:02}:{minute:02}");
                trips.push(trip_at("A", "B", &start, &end));
            }
        }
        for f in [0u16, 59, 600, 720, 1439] {
            let filter = TimeFilter::Minute(f);
            let kept = filter_trips_by_minute(&trips, filter);
            for trip in &trips {
                let within =
                    |t: &NaiveDateTime| (minute_of_day(t) - f as i32).abs() <= WINDOW_MINUTES;
                let expected = within(&trip.started_at) || within(&trip.ended_at);
                assert_eq!(kept.contains(&trip), expected);
            }
        }
    }
}
