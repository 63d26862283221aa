use std::fmt::Write;

use anyhow::Result;
use geojson::{Feature, FeatureCollection, GeoJson};

use crate::style::{to_hex, LANE_STYLE, MARKER_FILL_OPACITY, MARKER_STROKE, MARKER_STROKE_WIDTH};
use crate::Session;

/// Draws bike lanes and station markers over the current viewport. Map tiles aren't included.
pub fn to_svg(session: &Session) -> Result<String> {
    let viewport = &session.viewport;
    let mut svg = String::new();
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        viewport.width, viewport.height, viewport.width, viewport.height
    )?;

    writeln!(
        svg,
        r#"  <g fill="none" stroke="{}" stroke-width="{}" stroke-opacity="{}">"#,
        to_hex(LANE_STYLE.color),
        LANE_STYLE.width,
        LANE_STYLE.opacity
    )?;
    for lanes in &session.lanes {
        for line in &lanes.lines {
            if line.len() < 2 {
                continue;
            }
            let pts: Vec<String> = line
                .iter()
                .map(|pt| {
                    let pt = viewport.project(*pt);
                    format!("{:.1},{:.1}", pt.x, pt.y)
                })
                .collect();
            writeln!(svg, r#"    <polyline points="{}"/>"#, pts.join(" "))?;
        }
    }
    writeln!(svg, "  </g>")?;

    // Largest first, so small circles draw on top
    let mut markers: Vec<_> = session.markers().collect();
    markers.sort_by(|a, b| b.radius.total_cmp(&a.radius));
    writeln!(
        svg,
        r#"  <g fill-opacity="{}" stroke="{}" stroke-width="{}">"#,
        MARKER_FILL_OPACITY, MARKER_STROKE, MARKER_STROKE_WIDTH
    )?;
    for marker in markers {
        writeln!(
            svg,
            r#"    <circle data-station="{}" cx="{:.1}" cy="{:.1}" r="{:.2}" fill="{}" data-departure-bucket="{}"><title>{}</title></circle>"#,
            escape(&marker.station.0),
            marker.pos.x,
            marker.pos.y,
            marker.radius,
            to_hex(marker.color),
            marker.departure_bucket,
            escape(&marker.tooltip)
        )?;
    }
    writeln!(svg, "  </g>")?;

    writeln!(
        svg,
        r#"  <text x="10" y="24" font-family="sans-serif" font-size="16">{}</text>"#,
        escape(&session.time_label())
    )?;
    svg.push_str("</svg>\n");
    Ok(svg)
}

/// Stations as points, with their traffic and how they're drawn as properties
pub fn to_geojson(session: &Session) -> Result<String> {
    let mut features = Vec::new();
    for s in session.traffic() {
        let mut feature = Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::new(geojson::Value::Point(vec![
                s.station.pos.lon,
                s.station.pos.lat,
            ]))),
            id: None,
            properties: None,
            foreign_members: None,
        };
        feature.set_property("id", s.id().0.clone());
        if let Some(ref name) = s.station.name {
            feature.set_property("name", name.clone());
        }
        feature.set_property("arrivals", s.arrivals);
        feature.set_property("departures", s.departures);
        feature.set_property("total_traffic", s.total_traffic());
        if let Some(marker) = session.marker(s.id()) {
            feature.set_property("radius", marker.radius);
            feature.set_property("departure_bucket", marker.departure_bucket);
            feature.set_property("color", to_hex(marker.color));
            feature.set_property("tooltip", marker.tooltip.clone());
        }
        features.push(feature);
    }

    let gj = GeoJson::FeatureCollection(FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    });
    Ok(serde_json::to_string_pretty(&gj)?)
}

fn escape(x: &str) -> String {
    x.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
