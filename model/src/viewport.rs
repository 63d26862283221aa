use std::f64::consts::PI;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use bikeshare::LonLat;

/// Size of the whole world at zoom 0, in pixels
const TILE_SIZE: f64 = 512.0;
const MAX_LATITUDE: f64 = 85.051129;

pub const MIN_ZOOM: f64 = 5.0;
pub const MAX_ZOOM: f64 = 18.0;

/// Somewhere between Kendall Square and MIT
pub const DEFAULT_CENTER: LonLat = LonLat {
    lon: -71.09415,
    lat: 42.36027,
};
pub const DEFAULT_ZOOM: f64 = 12.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScreenPt {
    pub x: f64,
    pub y: f64,
}

/// What part of the map is visible on screen, using Web Mercator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: LonLat,
    pub zoom: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewportChange {
    /// Drag the map by some screen pixels
    Pan { dx: f64, dy: f64 },
    Zoom(f64),
    Resize { width: f64, height: f64 },
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            width,
            height,
        }
    }

    fn world_size(&self) -> f64 {
        TILE_SIZE * 2.0_f64.powf(self.zoom)
    }

    /// Where a point appears on screen, relative to the top-left corner. Points off-screen
    /// project outside [0, width] x [0, height].
    pub fn project(&self, pt: LonLat) -> ScreenPt {
        let (x, y) = to_world(pt, self.world_size());
        let (cx, cy) = to_world(self.center, self.world_size());
        ScreenPt {
            x: x - cx + self.width / 2.0,
            y: y - cy + self.height / 2.0,
        }
    }

    pub fn unproject(&self, pt: ScreenPt) -> LonLat {
        let (cx, cy) = to_world(self.center, self.world_size());
        from_world(
            pt.x - self.width / 2.0 + cx,
            pt.y - self.height / 2.0 + cy,
            self.world_size(),
        )
    }

    pub fn apply(&mut self, change: ViewportChange) -> Result<()> {
        match change {
            ViewportChange::Pan { dx, dy } => {
                // Dragging the map right moves the center left
                self.center = self.unproject(ScreenPt {
                    x: self.width / 2.0 - dx,
                    y: self.height / 2.0 - dy,
                });
            }
            ViewportChange::Zoom(zoom) => {
                if !zoom.is_finite() {
                    bail!("Bad zoom {zoom}");
                }
                self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
            }
            ViewportChange::Resize { width, height } => {
                if !(width > 0.0 && height > 0.0) {
                    bail!("Bad viewport size {width}x{height}");
                }
                self.width = width;
                self.height = height;
            }
        }
        Ok(())
    }
}

fn to_world(pt: LonLat, world_size: f64) -> (f64, f64) {
    let lat = pt.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (pt.lon + 180.0) / 360.0 * world_size;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * world_size;
    (x, y)
}

fn from_world(x: f64, y: f64, world_size: f64) -> LonLat {
    let lon = x / world_size * 360.0 - 180.0;
    let n = PI * (1.0 - 2.0 * y / world_size);
    let lat = n.sinh().atan().to_degrees();
    LonLat::new(lon, lat)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    #[test]
    fn test_center_projects_to_middle() {
        let viewport = Viewport::new(800.0, 600.0);
        let pt = viewport.project(DEFAULT_CENTER);
        assert!(close(pt.x, 400.0, 1e-6));
        assert!(close(pt.y, 300.0, 1e-6));
    }

    #[test]
    fn test_orientation() {
        let viewport = Viewport::new(800.0, 600.0);
        let east = viewport.project(LonLat::new(-71.0, 42.36027));
        let north = viewport.project(LonLat::new(-71.09415, 42.4));
        assert!(east.x > 400.0);
        assert!(north.y < 300.0);
    }

    #[test]
    fn test_zoom_doubles_distances() {
        let mut viewport = Viewport::new(800.0, 600.0);
        let pt = LonLat::new(-71.08, 42.35);
        let before = viewport.project(pt);
        viewport.apply(ViewportChange::Zoom(13.0)).unwrap();
        let after = viewport.project(pt);
        assert!(close(after.x - 400.0, 2.0 * (before.x - 400.0), 1e-6));
        assert!(close(after.y - 300.0, 2.0 * (before.y - 300.0), 1e-6));

        viewport.apply(ViewportChange::Zoom(30.0)).unwrap();
        assert_eq!(viewport.zoom, MAX_ZOOM);
        viewport.apply(ViewportChange::Zoom(1.0)).unwrap();
        assert_eq!(viewport.zoom, MIN_ZOOM);
        assert!(viewport.apply(ViewportChange::Zoom(f64::NAN)).is_err());
    }

    #[test]
    fn test_pan_moves_points_with_the_drag() {
        let mut viewport = Viewport::new(800.0, 600.0);
        let pt = LonLat::new(-71.08, 42.35);
        let before = viewport.project(pt);
        viewport
            .apply(ViewportChange::Pan { dx: 30.0, dy: -20.0 })
            .unwrap();
        let after = viewport.project(pt);
        assert!(close(after.x, before.x + 30.0, 1e-6));
        assert!(close(after.y, before.y - 20.0, 1e-6));
    }

    #[test]
    fn test_resize() {
        let mut viewport = Viewport::new(800.0, 600.0);
        viewport
            .apply(ViewportChange::Resize {
                width: 1000.0,
                height: 500.0,
            })
            .unwrap();
        let pt = viewport.project(DEFAULT_CENTER);
        assert!(close(pt.x, 500.0, 1e-6));
        assert!(close(pt.y, 250.0, 1e-6));
        assert!(viewport
            .apply(ViewportChange::Resize {
                width: 0.0,
                height: 500.0,
            })
            .is_err());
    }

    #[test]
    fn test_unproject_round_trip() {
        let viewport = Viewport::new(800.0, 600.0);
        let pt = LonLat::new(-71.05, 42.38);
        let back = viewport.unproject(viewport.project(pt));
        assert!(close(back.lon, pt.lon, 1e-9));
        assert!(close(back.lat, pt.lat, 1e-9));
    }
}
