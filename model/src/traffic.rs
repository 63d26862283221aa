use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use bikeshare::{Station, StationID, Trip};

/// A station annotated with how many trips started and ended there.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StationTraffic {
    pub station: Station,
    pub arrivals: usize,
    pub departures: usize,
}

impl StationTraffic {
    pub fn id(&self) -> &StationID {
        &self.station.id
    }

    pub fn total_traffic(&self) -> usize {
        self.arrivals + self.departures
    }
}

/// Counts arrivals and departures per station. The output has one entry per input station, in
/// the same order. Trips referring to unknown stations don't count anywhere.
pub fn compute_station_traffic<'a, I: IntoIterator<Item = &'a Trip>>(
    stations: &[Station],
    trips: I,
) -> Vec<StationTraffic> {
    let mut departures: BTreeMap<&StationID, usize> = BTreeMap::new();
    let mut arrivals: BTreeMap<&StationID, usize> = BTreeMap::new();
    let mut num_trips = 0;
    for trip in trips {
        num_trips += 1;
        *departures.entry(&trip.start_station).or_insert(0) += 1;
        *arrivals.entry(&trip.end_station).or_insert(0) += 1;
    }

    let result: Vec<StationTraffic> = stations
        .iter()
        .map(|station| StationTraffic {
            station: station.clone(),
            arrivals: arrivals.get(&station.id).copied().unwrap_or(0),
            departures: departures.get(&station.id).copied().unwrap_or(0),
        })
        .collect();

    let counted: usize = result.iter().map(|s| s.total_traffic()).sum();
    if counted < 2 * num_trips {
        debug!(
            "{} trip endpoints refer to unknown stations",
            2 * num_trips - counted
        );
    }
    result
}
