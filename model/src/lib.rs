#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod filter;
pub mod markers;
pub mod render;
pub mod scale;
mod session;
pub mod style;
mod traffic;
pub mod viewport;

pub use self::filter::{filter_trips_by_minute, minute_of_day, TimeFilter, NO_FILTER};
pub use self::markers::Marker;
pub use self::session::{Event, Session, Update};
pub use self::traffic::{compute_station_traffic, StationTraffic};
pub use self::viewport::{ScreenPt, Viewport, ViewportChange};
