//! Raw bike-share inputs: the station list, the trip log and bike lane geometry, plus where to
//! fetch each of them from.

#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod lanes;
mod source;
mod stations;
mod trips;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub use lanes::BikeLanes;
pub use source::Source;
pub use stations::{Station, StationID};
pub use trips::{parse_timestamp, Trip};

/// Bike lanes in Boston
pub const BOSTON_LANES_URL: &str = "https://bostonopendata-boston.opendata.arcgis.com/datasets/boston::existing-bike-network-2022.geojson";
/// Bike lanes in Cambridge
pub const CAMBRIDGE_LANES_URL: &str = "https://raw.githubusercontent.com/cambridgegis/cambridgegis_data/main/Recreation/Bike_Facilities/RECREATION_BikeFacilities.geojson";
pub const STATIONS_URL: &str = "https://dsc106.com/labs/lab07/data/bluebikes-stations.json";
pub const TRIPS_URL: &str = "https://dsc106.com/labs/lab07/data/bluebikes-traffic-2024-03.csv";

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

pub fn load_stations(source: &Source) -> Result<Vec<Station>> {
    let bytes = source.read()?;
    let stations =
        stations::load(bytes.as_slice()).with_context(|| format!("loading stations from {source}"))?;
    info!("Loaded {} stations from {source}", stations.len());
    Ok(stations)
}

pub fn load_trips(source: &Source) -> Result<Vec<Trip>> {
    let bytes = source.read()?;
    let trips =
        trips::load(bytes.as_slice()).with_context(|| format!("loading trips from {source}"))?;
    info!("Loaded {} trips from {source}", trips.len());
    Ok(trips)
}

pub fn load_lanes(source: &Source) -> Result<BikeLanes> {
    let bytes = source.read()?;
    let lanes = lanes::load(&bytes).with_context(|| format!("loading bike lanes from {source}"))?;
    info!("Loaded {} bike lane lines from {source}", lanes.lines.len());
    Ok(lanes)
}
