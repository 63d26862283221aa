#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod commands;

use std::io::BufRead;
use std::path::PathBuf;

use anyhow::Result;
use structopt::StructOpt;

use bikeshare::Source;
use model::viewport::DEFAULT_ZOOM;
use model::{Event, Session, Viewport, ViewportChange};

use self::commands::Command;

#[derive(StructOpt)]
#[structopt(name = "viewer", about = "Maps bike-share station traffic by time of day")]
struct Args {
    /// Station metadata JSON, as a path or URL. Defaults to the Bluebikes station list.
    #[structopt(long)]
    stations: Option<Source>,
    /// The trip log CSV, as a path or URL. Defaults to Bluebikes trips from March 2024.
    #[structopt(long)]
    trips: Option<Source>,
    /// Bike lane GeoJSON, as a path or URL. Repeat for more than one. Defaults to the Boston and
    /// Cambridge networks.
    #[structopt(long)]
    lanes: Vec<Source>,
    /// Only count trips within an hour of this minute of the day. -1 counts every trip.
    #[structopt(long, allow_hyphen_values = true)]
    time: Option<i32>,
    /// Write the map as SVG here
    #[structopt(long)]
    svg: Option<PathBuf>,
    /// Write stations with their traffic as GeoJSON here
    #[structopt(long)]
    geojson: Option<PathBuf>,
    #[structopt(long, default_value = "800")]
    width: f64,
    #[structopt(long, default_value = "600")]
    height: f64,
    #[structopt(long)]
    zoom: Option<f64>,
    /// After the first render, read commands from STDIN to move the time slider and map
    #[structopt(long)]
    interactive: bool,
}

impl Args {
    fn lane_sources(&self) -> Result<Vec<Source>> {
        if !self.lanes.is_empty() {
            return Ok(self.lanes.clone());
        }
        Ok(vec![
            bikeshare::BOSTON_LANES_URL.parse()?,
            bikeshare::CAMBRIDGE_LANES_URL.parse()?,
        ])
    }

    /// Everything is loaded before anything is drawn. Any failure here is fatal.
    fn load(&self, session: &mut Session) -> Result<()> {
        for source in self.lane_sources()? {
            session.handle(Event::LanesLoaded(bikeshare::load_lanes(&source)?))?;
        }

        let stations = match self.stations {
            Some(ref source) => source.clone(),
            None => bikeshare::STATIONS_URL.parse()?,
        };
        session.handle(Event::StationsLoaded(bikeshare::load_stations(&stations)?))?;

        let trips = match self.trips {
            Some(ref source) => source.clone(),
            None => bikeshare::TRIPS_URL.parse()?,
        };
        session.handle(Event::TripsLoaded(bikeshare::load_trips(&trips)?))?;
        Ok(())
    }

    fn render(&self, session: &Session) -> Result<()> {
        if let Some(ref path) = self.svg {
            fs_err::write(path, model::render::to_svg(session)?)?;
            info!("Wrote {}", path.display());
        }
        if let Some(ref path) = self.geojson {
            fs_err::write(path, model::render::to_geojson(session)?)?;
            info!("Wrote {}", path.display());
        }
        if self.svg.is_none() && self.geojson.is_none() {
            print_summary(session);
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::from_args();

    let mut viewport = Viewport::new(800.0, 600.0);
    viewport.apply(ViewportChange::Resize {
        width: args.width,
        height: args.height,
    })?;
    viewport.apply(ViewportChange::Zoom(args.zoom.unwrap_or(DEFAULT_ZOOM)))?;

    let mut session = Session::new(viewport);
    args.load(&mut session)?;
    if let Some(time) = args.time {
        session.handle(Event::SliderInput(time))?;
    }
    args.render(&session)?;

    if args.interactive {
        run_commands(&args, &mut session)?;
    }
    Ok(())
}

fn run_commands(args: &Args, session: &mut Session) -> Result<()> {
    println!("{}", commands::HELP);
    for line in std::io::stdin().lock().lines() {
        let line = line?;
        let cmd = match commands::parse(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(err) => {
                warn!("{err}");
                continue;
            }
        };
        let result = match cmd {
            Command::Slider(value) => session.handle(Event::SliderInput(value)),
            Command::Viewport(change) => session.handle(Event::Viewport(change)),
            Command::Render => {
                args.render(session)?;
                continue;
            }
            Command::Quit => break,
        };
        match result {
            // Re-render after every change, like the map would
            Ok(_) => args.render(session)?,
            Err(err) => warn!("Ignoring {:?}: {err}", line.trim()),
        }
    }
    Ok(())
}

/// The busiest stations, since there's nowhere to draw anything
fn print_summary(session: &Session) {
    let mut traffic: Vec<_> = session.traffic().iter().collect();
    traffic.sort_by_key(|s| std::cmp::Reverse(s.total_traffic()));
    println!("Station traffic at {}", session.time_label());
    for s in traffic.into_iter().take(10) {
        let tooltip = session
            .marker(s.id())
            .map(|m| m.tooltip.clone())
            .unwrap_or_default();
        match s.station.name {
            Some(ref name) => println!("  {} ({}): {}", s.id(), name, tooltip),
            None => println!("  {}: {}", s.id(), tooltip),
        }
    }
}
