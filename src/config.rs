//! Command-line configuration.

use std::path::PathBuf;

use clap::Parser;

use crate::application::{AppSettings, MAP_ZOOM_LEVEL, MAX_ZOOM};
use crate::domain::Coords;
use crate::infrastructure::{
    DEFAULT_GEOLOCATION_URL, DisabledGeolocator, FixedGeolocator, Geolocator, IpGeolocator,
};

#[derive(Parser, Debug)]
#[clap(
    name = "mapty",
    version,
    about = "Log runs and rides on a map in your terminal"
)]
pub struct Cli {
    /// Directory holding saved workouts and the log file.
    #[clap(long, default_value = ".mapty")]
    pub data_dir: PathBuf,
    /// Start at this latitude instead of looking up the position.
    #[clap(long, requires = "longitude", allow_negative_numbers = true)]
    pub latitude: Option<f64>,
    /// Start at this longitude instead of looking up the position.
    #[clap(long, requires = "latitude", allow_negative_numbers = true)]
    pub longitude: Option<f64>,
    /// Do not look up the position. The map stays unavailable.
    #[clap(long, conflicts_with_all = ["latitude", "longitude"])]
    pub offline: bool,
    /// Initial map zoom level.
    #[clap(long, default_value_t = MAP_ZOOM_LEVEL, value_parser = clap::value_parser!(u8).range(0..=i64::from(MAX_ZOOM)))]
    pub zoom: u8,
    /// Also draw markers for saved workouts once the map loads.
    #[clap(long)]
    pub draw_saved_markers: bool,
    /// Endpoint answering IP geolocation queries (ip-api.com format).
    #[clap(long, default_value = DEFAULT_GEOLOCATION_URL)]
    pub geolocation_url: String,
    /// Do not write a log file.
    #[clap(long)]
    pub no_log: bool,
}

impl Cli {
    pub fn settings(&self) -> AppSettings {
        AppSettings {
            zoom: self.zoom,
            draw_saved_markers: self.draw_saved_markers,
        }
    }

    pub fn geolocator(&self) -> Box<dyn Geolocator> {
        if self.offline {
            return Box::new(DisabledGeolocator);
        }
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Box::new(FixedGeolocator(Coords::new(lat, lng))),
            _ => Box::new(IpGeolocator::new(self.geolocation_url.clone())),
        }
    }
}
