use crate::{StationTraffic, TimeFilter};

/// Maps a value to a radius so the area of a circle grows linearly with the value. Doesn't clamp.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SqrtScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl SqrtScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn eval(&self, x: f64) -> f64 {
        let d0 = signed_sqrt(self.domain.0);
        let d1 = signed_sqrt(self.domain.1);
        // With an empty domain, everything lands in the middle of the range
        let t = if d1 == d0 {
            0.5
        } else {
            (signed_sqrt(x) - d0) / (d1 - d0)
        };
        self.range.0 + t * (self.range.1 - self.range.0)
    }
}

fn signed_sqrt(x: f64) -> f64 {
    if x < 0.0 {
        -(-x).sqrt()
    } else {
        x.sqrt()
    }
}

/// Splits a continuous domain into equal-width pieces, one per output value.
#[derive(Clone, Debug, PartialEq)]
pub struct QuantizeScale {
    thresholds: Vec<f64>,
    range: Vec<f64>,
}

impl QuantizeScale {
    /// `range` must be non-empty
    pub fn new(domain: (f64, f64), range: Vec<f64>) -> Self {
        let n = range.len();
        let (x0, x1) = domain;
        let thresholds = (1..n)
            .map(|i| x0 + (x1 - x0) * (i as f64) / (n as f64))
            .collect();
        Self { thresholds, range }
    }

    pub fn eval(&self, x: f64) -> f64 {
        // Values exactly on a threshold go to the upper piece
        let idx = self.thresholds.partition_point(|t| *t <= x);
        self.range[idx]
    }
}

/// Unfiltered, stations are drawn within this radius range
pub const RADIUS_RANGE: (f64, f64) = (0.0, 25.0);
/// With a time filter, fewer trips count, so keep small stations visible
pub const FILTERED_RADIUS_RANGE: (f64, f64) = (3.0, 50.0);

pub fn radius_scale(traffic: &[StationTraffic], filter: TimeFilter) -> SqrtScale {
    let max = traffic
        .iter()
        .map(|s| s.total_traffic())
        .max()
        .unwrap_or(0);
    let range = if filter.is_active() {
        FILTERED_RADIUS_RANGE
    } else {
        RADIUS_RANGE
    };
    SqrtScale::new((0.0, max as f64), range)
}

/// The three buckets of departure ratio: mostly arrivals, balanced, mostly departures
pub fn departure_bucket_scale() -> QuantizeScale {
    QuantizeScale::new((0.0, 1.0), vec![0.0, 0.5, 1.0])
}

/// The fraction of traffic at a station that's departures. Stations without traffic count as
/// balanced.
pub fn departure_ratio(traffic: &StationTraffic) -> f64 {
    let total = traffic.total_traffic();
    if total == 0 {
        0.5
    } else {
        traffic.departures as f64 / total as f64
    }
}
