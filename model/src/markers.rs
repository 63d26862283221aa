use chrono::NaiveTime;
use colorous::Color;

use bikeshare::StationID;

use crate::scale::{departure_bucket_scale, departure_ratio, radius_scale};
use crate::style::departure_mix;
use crate::{ScreenPt, StationTraffic, TimeFilter, Viewport};

/// Everything needed to draw one station
#[derive(Clone, Debug)]
pub struct Marker {
    pub station: StationID,
    pub pos: ScreenPt,
    pub radius: f64,
    /// 0 is mostly arrivals, 0.5 balanced, 1 mostly departures
    pub departure_bucket: f64,
    pub color: Color,
    pub tooltip: String,
}

pub fn tooltip(traffic: &StationTraffic) -> String {
    format!(
        "{} trips ({} departures, {} arrivals)",
        traffic.total_traffic(),
        traffic.departures,
        traffic.arrivals
    )
}

/// Like "2:30 PM"
pub fn time_label(filter: TimeFilter) -> String {
    match filter {
        TimeFilter::None => "(any time)".to_string(),
        TimeFilter::Minute(m) => {
            let m = m as u32;
            match NaiveTime::from_hms_opt(m / 60, m % 60, 0) {
                Some(t) => t.format("%-I:%M %p").to_string(),
                None => "(any time)".to_string(),
            }
        }
    }
}

/// One marker per station, in the same order
pub fn make_markers(
    traffic: &[StationTraffic],
    filter: TimeFilter,
    viewport: &Viewport,
) -> Vec<Marker> {
    let radius = radius_scale(traffic, filter);
    let buckets = departure_bucket_scale();
    traffic
        .iter()
        .map(|s| {
            let departure_bucket = buckets.eval(departure_ratio(s));
            Marker {
                station: s.id().clone(),
                pos: viewport.project(s.station.pos),
                radius: radius.eval(s.total_traffic() as f64),
                departure_bucket,
                color: departure_mix(departure_bucket),
                tooltip: tooltip(s),
            }
        })
        .collect()
}
