use std::collections::BTreeMap;

use anyhow::Result;

use bikeshare::{BikeLanes, Station, StationID, Trip};

use crate::markers::{make_markers, time_label, Marker};
use crate::{
    compute_station_traffic, filter_trips_by_minute, StationTraffic, TimeFilter, Viewport,
    ViewportChange,
};

/// Something that happened, in the order it happened
pub enum Event {
    StationsLoaded(Vec<Station>),
    TripsLoaded(Vec<Trip>),
    LanesLoaded(BikeLanes),
    /// The raw slider value; -1 means no filter
    SliderInput(i32),
    Viewport(ViewportChange),
}

/// What changed after handling an event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Update {
    /// Still waiting on some input
    Nothing,
    /// Only marker positions moved
    Reprojected,
    /// Traffic was counted again, so marker sizes and colors may have changed
    Recomputed,
}

/// All of the state for one session of viewing the map. Stations and trips are loaded once and
/// never modified; traffic and markers are derived from them and thrown away on each change.
pub struct Session {
    stations: Option<Vec<Station>>,
    trips: Option<Vec<Trip>>,
    pub lanes: Vec<BikeLanes>,
    pub filter: TimeFilter,
    pub viewport: Viewport,

    traffic: Vec<StationTraffic>,
    markers: BTreeMap<StationID, Marker>,
}

impl Session {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            stations: None,
            trips: None,
            lanes: Vec::new(),
            filter: TimeFilter::None,
            viewport,

            traffic: Vec::new(),
            markers: BTreeMap::new(),
        }
    }

    /// Are both the stations and trips loaded?
    pub fn is_ready(&self) -> bool {
        self.stations.is_some() && self.trips.is_some()
    }

    pub fn handle(&mut self, ev: Event) -> Result<Update> {
        match ev {
            Event::StationsLoaded(stations) => {
                self.stations = Some(stations);
                Ok(self.recompute_if_ready())
            }
            Event::TripsLoaded(trips) => {
                self.trips = Some(trips);
                Ok(self.recompute_if_ready())
            }
            Event::LanesLoaded(lanes) => {
                self.lanes.push(lanes);
                Ok(Update::Nothing)
            }
            Event::SliderInput(value) => {
                // An invalid value leaves everything as it was
                self.filter = TimeFilter::from_slider(value)?;
                Ok(self.recompute_if_ready())
            }
            Event::Viewport(change) => {
                self.viewport.apply(change)?;
                if !self.is_ready() {
                    return Ok(Update::Nothing);
                }
                for s in &self.traffic {
                    if let Some(marker) = self.markers.get_mut(s.id()) {
                        marker.pos = self.viewport.project(s.station.pos);
                    }
                }
                Ok(Update::Reprojected)
            }
        }
    }

    fn recompute_if_ready(&mut self) -> Update {
        let (stations, trips) = match (&self.stations, &self.trips) {
            (Some(stations), Some(trips)) => (stations, trips),
            _ => return Update::Nothing,
        };

        let active = filter_trips_by_minute(trips, self.filter);
        info!(
            "{} of {} trips active at {}",
            active.len(),
            trips.len(),
            time_label(self.filter)
        );
        self.traffic = compute_station_traffic(stations, active);

        // Update markers by station, dropping any whose station is gone
        let mut stale = std::mem::take(&mut self.markers);
        for marker in make_markers(&self.traffic, self.filter, &self.viewport) {
            stale.remove(&marker.station);
            self.markers.insert(marker.station.clone(), marker);
        }
        if !stale.is_empty() {
            debug!("Removed {} markers", stale.len());
        }
        Update::Recomputed
    }

    pub fn traffic(&self) -> &[StationTraffic] {
        &self.traffic
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.markers.values()
    }

    pub fn marker(&self, id: &StationID) -> Option<&Marker> {
        self.markers.get(id)
    }

    pub fn time_label(&self) -> String {
        time_label(self.filter)
    }
}
