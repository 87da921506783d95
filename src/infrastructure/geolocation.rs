//! Position lookup used to centre the map at startup.

use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::Coords;

pub const DEFAULT_GEOLOCATION_URL: &str = "http://ip-api.com/json";

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum GeolocationError {
    /// No position source is available at all.
    #[error("geolocation is not available")]
    Unsupported,
    #[error("position request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("position could not be resolved: {0}")]
    Unresolved(String),
}

impl GeolocationError {
    /// Whether the user should be told about this failure.
    ///
    /// A missing capability is silent; a lookup that was attempted and
    /// failed is reported.
    pub fn should_alert(&self) -> bool {
        !matches!(self, GeolocationError::Unsupported)
    }
}

pub type PositionResult = Result<Coords, GeolocationError>;

pub trait Geolocator: Send {
    fn current_position(&self) -> PositionResult;
}

/// Resolves the machine's approximate position from its public IP address.
#[derive(Debug, Clone)]
pub struct IpGeolocator {
    endpoint: String,
}

impl IpGeolocator {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl Default for IpGeolocator {
    fn default() -> Self {
        Self::new(DEFAULT_GEOLOCATION_URL)
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    message: Option<String>,
}

impl IpApiResponse {
    fn into_coords(self) -> PositionResult {
        match (self.status.as_str(), self.lat, self.lon) {
            ("success", Some(lat), Some(lon)) => Ok(Coords::new(lat, lon)),
            _ => Err(GeolocationError::Unresolved(
                self.message.unwrap_or_else(|| format!("lookup status {}", self.status)),
            )),
        }
    }
}

impl Geolocator for IpGeolocator {
    fn current_position(&self) -> PositionResult {
        let client = reqwest::blocking::Client::builder()
            .timeout(LOOKUP_TIMEOUT)
            .build()?;
        let response: IpApiResponse = client
            .get(&self.endpoint)
            .send()?
            .error_for_status()?
            .json()?;
        response.into_coords()
    }
}

/// Always reports the same position.
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocator(pub Coords);

impl Geolocator for FixedGeolocator {
    fn current_position(&self) -> PositionResult {
        Ok(self.0)
    }
}

/// Stands in for a platform without any position source.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledGeolocator;

impl Geolocator for DisabledGeolocator {
    fn current_position(&self) -> PositionResult {
        Err(GeolocationError::Unsupported)
    }
}

/// Runs the lookup on a background thread.
///
/// The single result arrives on the returned channel; the event loop polls
/// it without blocking.
pub fn spawn_position_lookup(locator: Box<dyn Geolocator>) -> Receiver<PositionResult> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let result = locator.current_position();
        // The receiver is gone only when the app already quit.
        let _ = tx.send(result);
    });
    rx
}
