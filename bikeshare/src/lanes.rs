use anyhow::Result;
use geojson::{GeoJson, Geometry, Value};

use crate::LonLat;

/// One set of bike lane lines. No attributes besides the geometry are kept.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BikeLanes {
    pub lines: Vec<Vec<LonLat>>,
}

pub fn load(bytes: &[u8]) -> Result<BikeLanes> {
    let gj: GeoJson = std::str::from_utf8(bytes)?.parse()?;
    let mut lanes = BikeLanes::default();
    let mut skipped = 0;
    match gj {
        GeoJson::FeatureCollection(fc) => {
            for feature in fc.features {
                if let Some(geometry) = feature.geometry {
                    add_geometry(&mut lanes, &geometry, &mut skipped);
                }
            }
        }
        GeoJson::Feature(feature) => {
            if let Some(geometry) = feature.geometry {
                add_geometry(&mut lanes, &geometry, &mut skipped);
            }
        }
        GeoJson::Geometry(geometry) => add_geometry(&mut lanes, &geometry, &mut skipped),
    }
    if skipped > 0 {
        warn!("Skipped {skipped} geometries that aren't lines");
    }
    Ok(lanes)
}

fn add_geometry(lanes: &mut BikeLanes, geometry: &Geometry, skipped: &mut usize) {
    match &geometry.value {
        Value::LineString(pts) => lanes.lines.push(to_line(pts)),
        Value::MultiLineString(lines) => {
            for pts in lines {
                lanes.lines.push(to_line(pts));
            }
        }
        Value::GeometryCollection(list) => {
            for geometry in list {
                add_geometry(lanes, geometry, skipped);
            }
        }
        _ => {
            *skipped += 1;
        }
    }
}

fn to_line(pts: &[Vec<f64>]) -> Vec<LonLat> {
    pts.iter()
        .filter(|pt| pt.len() >= 2)
        .map(|pt| LonLat::new(pt[0], pt[1]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_lanes() {
        let input = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "properties": {"FacilityType": "Bike Lane"},
             "geometry": {"type": "LineString", "coordinates": [[-71.1, 42.3], [-71.2, 42.4]]}},
            {"type": "Feature", "properties": null,
             "geometry": {"type": "MultiLineString", "coordinates": [
                [[-71.0, 42.0], [-71.0, 42.1]],
                [[-71.3, 42.3], [-71.3, 42.4], [-71.4, 42.4]]
             ]}},
            {"type": "Feature", "properties": null,
             "geometry": {"type": "Point", "coordinates": [-71.0, 42.0]}},
            {"type": "Feature", "properties": null,
             "geometry": {"type": "GeometryCollection", "geometries": [
                {"type": "LineString", "coordinates": [[-71.5, 42.5], [-71.6, 42.6]]},
                {"type": "Point", "coordinates": [-71.5, 42.5]}
             ]}}
        ]}"#;
        let lanes = load(input.as_bytes()).unwrap();
        assert_eq!(lanes.lines.len(), 4);
        assert_eq!(
            lanes.lines[0],
            vec![LonLat::new(-71.1, 42.3), LonLat::new(-71.2, 42.4)]
        );
        assert_eq!(lanes.lines[2].len(), 3);
        assert_eq!(
            lanes.lines[3],
            vec![LonLat::new(-71.5, 42.5), LonLat::new(-71.6, 42.6)]
        );
    }

    #[test]
    fn test_not_geojson() {
        assert!(load(b"ride_id,started_at").is_err());
    }
}
