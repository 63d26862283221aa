use std::collections::BTreeSet;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::LonLat;

/// The short code of a station, like "A32000". Trips refer to stations by this.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StationID(pub String);

impl StationID {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for StationID {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationID,
    pub name: Option<String>,
    pub pos: LonLat,
    pub capacity: Option<usize>,
}

impl Station {
    pub fn new<S: Into<String>>(id: S, pos: LonLat) -> Self {
        Self {
            id: StationID::new(id),
            name: None,
            pos,
            capacity: None,
        }
    }
}

/// Parses station metadata, either wrapped like `{"data": {"stations": [...]}}` or as a bare
/// array. Keeps the input order.
pub fn load<R: std::io::Read>(reader: R) -> Result<Vec<Station>> {
    let records = match serde_json::from_reader(reader)? {
        Input::Wrapped { data } => data.stations,
        Input::Bare(records) => records,
    };

    let mut seen = BTreeSet::new();
    let mut stations = Vec::new();
    for (idx, rec) in records.into_iter().enumerate() {
        let id = match rec.short_name.or(rec.number) {
            Some(id) => id,
            None => bail!("Station {} has no short_name", idx + 1),
        };
        let (lon, lat) = match (rec.lon.or(rec.long), rec.lat.or(rec.lat_upper)) {
            (Some(lon), Some(lat)) => (lon, lat),
            _ => bail!("Station {:?} is missing lon or lat", id),
        };
        if !seen.insert(id.clone()) {
            bail!("Duplicate {:?}", id);
        }
        stations.push(Station {
            id,
            name: rec.name.or(rec.name_upper),
            pos: LonLat::new(lon, lat),
            capacity: rec.capacity,
        });
    }
    Ok(stations)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Input {
    Wrapped { data: Data },
    Bare(Vec<Record>),
}

#[derive(Deserialize)]
struct Data {
    stations: Vec<Record>,
}

#[derive(Deserialize)]
// Some exports use both spellings of a field; the lowercase one wins.
struct Record {
    short_name: Option<StationID>,
    #[serde(rename = "Number")]
    number: Option<StationID>,
    name: Option<String>,
    #[serde(rename = "NAME")]
    name_upper: Option<String>,
    lon: Option<f64>,
    #[serde(rename = "Long")]
    long: Option<f64>,
    lat: Option<f64>,
    #[serde(rename = "Lat")]
    lat_upper: Option<f64>,
    capacity: Option<usize>,
    // TODO Other fields like region_id and rental_methods aren't used yet
}
