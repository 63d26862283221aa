use colorous::Color;

/// steelblue
pub const DEPARTURES_COLOR: Color = Color {
    r: 70,
    g: 130,
    b: 180,
};
/// darkorange
pub const ARRIVALS_COLOR: Color = Color {
    r: 255,
    g: 140,
    b: 0,
};

pub const MARKER_FILL_OPACITY: f64 = 0.6;
pub const MARKER_STROKE: &str = "white";
pub const MARKER_STROKE_WIDTH: f64 = 1.0;

/// How every bike lane is drawn
#[derive(Clone, Copy, Debug)]
pub struct LaneStyle {
    pub color: Color,
    pub width: f64,
    pub opacity: f64,
}

pub const LANE_STYLE: LaneStyle = LaneStyle {
    color: Color {
        r: 0x32,
        g: 0xD4,
        b: 0x00,
    },
    width: 3.0,
    opacity: 0.4,
};

/// Blends the departure and arrival colors. A bucket of 1 is all departures, 0 all arrivals.
pub fn departure_mix(bucket: f64) -> Color {
    let t = bucket.clamp(0.0, 1.0);
    let lerp = |d: u8, a: u8| (d as f64 * t + a as f64 * (1.0 - t)).round() as u8;
    Color {
        r: lerp(DEPARTURES_COLOR.r, ARRIVALS_COLOR.r),
        g: lerp(DEPARTURES_COLOR.g, ARRIVALS_COLOR.g),
        b: lerp(DEPARTURES_COLOR.b, ARRIVALS_COLOR.b),
    }
}

pub fn to_hex(color: Color) -> String {
    format!("#{:x}", color)
}
