use anyhow::Result;
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::StationID;

/// One rental. Only the time of day of each timestamp matters for filtering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub ride_id: Option<String>,
    pub start_station: StationID,
    pub end_station: StationID,
    pub started_at: NaiveDateTime,
    pub ended_at: NaiveDateTime,
}

/// Parses the trip log. Columns besides the station IDs and timestamps are ignored.
pub fn load<R: std::io::Read>(reader: R) -> Result<Vec<Trip>> {
    let mut trips = Vec::new();
    for (idx, rec) in csv::Reader::from_reader(reader).deserialize().enumerate() {
        let rec: Record = rec?;
        let row = idx + 1;
        let started_at = parse_timestamp(&rec.started_at)
            .map_err(|err| anyhow!("row {row}: bad started_at: {err}"))?;
        let ended_at = parse_timestamp(&rec.ended_at)
            .map_err(|err| anyhow!("row {row}: bad ended_at: {err}"))?;
        trips.push(Trip {
            ride_id: rec.ride_id,
            start_station: rec.start_station_id,
            end_station: rec.end_station_id,
            started_at,
            ended_at,
        });
    }
    Ok(trips)
}

/// Accepts RFC 3339 and the usual `YYYY-MM-DD HH:MM[:SS[.fff]]` forms. With an offset, the local
/// wall-clock time is kept.
pub fn parse_timestamp(x: &str) -> Result<NaiveDateTime> {
    let x = x.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(x) {
        return Ok(dt.naive_local());
    }
    for fmt in [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(x, fmt) {
            return Ok(dt);
        }
    }
    bail!("unknown timestamp format {:?}", x)
}

#[derive(Deserialize)]
struct Record {
    ride_id: Option<String>,
    start_station_id: StationID,
    end_station_id: StationID,
    started_at: String,
    ended_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_load_trips() {
        let input = "\
ride_id,bike_type,started_at,ended_at,start_station_id,end_station_id,is_member
r1,electric,2024-03-01 08:55:02.437,2024-03-01 09:10:40.123,A32000,M32006,1
r2,classic,2024-03-01 23:30:00,2024-03-02 00:05:00,M32006,A32000,0
";
        let trips = load(input.as_bytes()).unwrap();
        assert_eq!(trips.len(), 2);
        assert_eq!(trips[0].ride_id.as_deref(), Some("r1"));
        assert_eq!(trips[0].start_station, StationID::new("A32000"));
        assert_eq!(trips[0].end_station, StationID::new("M32006"));
        assert_eq!(trips[0].started_at.hour(), 8);
        assert_eq!(trips[0].started_at.minute(), 55);
        assert_eq!(trips[1].ended_at.hour(), 0);
    }

    #[test]
    fn test_bad_timestamp() {
        let input = "\
started_at,ended_at,start_station_id,end_station_id
yesterday,2024-03-01 09:10:40,A,B
";
        let err = load(input.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_timestamp_formats() {
        for x in [
            "2024-03-01T14:30:00-05:00",
            "2024-03-01 14:30:00",
            "2024-03-01T14:30:00.5",
            "2024-03-01 14:30",
        ] {
            let dt = parse_timestamp(x).unwrap();
            assert_eq!((dt.hour(), dt.minute()), (14, 30), "{x}");
        }
    }
}
