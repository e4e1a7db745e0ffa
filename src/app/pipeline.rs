//! One dashboard request chain: resolve a place, fetch readings, ask for an
//! insight. Steps run strictly in order and the first failure ends the chain.

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::{
    app::events::AppEvent,
    config::{DashboardConfig, StartLocation},
    data::{
        geocode::GeocodeClient, geoip::GeoIpClient, insight::InsightClient,
        proxy::ReadingsClient,
    },
    domain::{
        air_quality::AirQualityReading,
        location::{Coordinate, GeocodeResolution, Location},
    },
    error::DashboardError,
};

#[derive(Debug, Clone)]
pub struct Services {
    pub geoip: GeoIpClient,
    pub geocoder: GeocodeClient,
    pub readings: ReadingsClient,
    pub insights: InsightClient,
}

impl Services {
    pub fn new(config: &DashboardConfig, proxy_url: &str) -> Self {
        Self {
            geoip: GeoIpClient::with_url(config.endpoints.geoip_url.clone()),
            geocoder: GeocodeClient::with_base_urls(
                config.endpoints.geocode_url.clone(),
                config.endpoints.reverse_geocode_url.clone(),
            ),
            readings: ReadingsClient::new(proxy_url),
            insights: InsightClient::new(config.insight.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Origin {
    Detect,
    Search(String),
    Coordinates(Coordinate),
    Known(Location),
}

impl From<&StartLocation> for Origin {
    fn from(start: &StartLocation) -> Self {
        match start {
            StartLocation::Detect => Self::Detect,
            StartLocation::City(city) => Self::Search(city.clone()),
            StartLocation::Coordinates(coordinate) => Self::Coordinates(*coordinate),
        }
    }
}

#[derive(Debug)]
pub enum PipelineUpdate {
    Progress(String),
    /// Readings together with the place they were fetched for.
    ReadingsFetched {
        location: Location,
        reading: AirQualityReading,
    },
    InsightGenerated(String),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Geolocate,
    ReverseGeocode,
    Search,
    Readings,
}

fn failure_message(step: Step, err: &DashboardError) -> &'static str {
    match (step, err) {
        (Step::Geolocate, _) => "Unable to detect your location. Press / to search for a city.",
        (Step::ReverseGeocode, _) => "Unable to determine the name of your location.",
        (Step::Search, DashboardError::NotFound(_)) => err.user_message(),
        (Step::Search, DashboardError::InvalidInput(_)) => "Enter a city name to search.",
        (Step::Search, _) => "Location search failed. Please try again.",
        (Step::Readings, _) => "Failed to fetch air quality data. Press r to retry.",
    }
}

struct Reporter {
    tx: mpsc::Sender<AppEvent>,
    generation: u64,
}

impl Reporter {
    async fn send(&self, update: PipelineUpdate) -> bool {
        self.tx
            .send(AppEvent::Pipeline {
                generation: self.generation,
                update,
            })
            .await
            .is_ok()
    }

    async fn fail(&self, step: Step, err: &DashboardError) {
        warn!(generation = self.generation, ?step, error = %err, "dashboard step failed");
        self.send(PipelineUpdate::Failed(failure_message(step, err).to_string()))
            .await;
    }
}

pub async fn run(
    services: Services,
    origin: Origin,
    generation: u64,
    tx: mpsc::Sender<AppEvent>,
) {
    let reporter = Reporter { tx, generation };
    debug!(generation, ?origin, "pipeline started");

    let Some(location) = resolve_location(&services, origin, &reporter).await else {
        return;
    };

    reporter
        .send(PipelineUpdate::Progress(format!(
            "Fetching air quality for {}...",
            location.name
        )))
        .await;
    let reading = match services.readings.fetch(location.coordinate).await {
        Ok(reading) => reading,
        Err(err) => {
            reporter.fail(Step::Readings, &err).await;
            return;
        }
    };
    let current = reading.current.clone();
    let place = location.display_name();
    if !reporter
        .send(PipelineUpdate::ReadingsFetched { location, reading })
        .await
    {
        return;
    }

    reporter
        .send(PipelineUpdate::Progress(
            "Generating health insights...".to_string(),
        ))
        .await;
    let text = services
        .insights
        .generate(&place, &current)
        .await;
    reporter.send(PipelineUpdate::InsightGenerated(text)).await;
    debug!(generation, "pipeline finished");
}

async fn resolve_location(
    services: &Services,
    origin: Origin,
    reporter: &Reporter,
) -> Option<Location> {
    let coordinate = match origin {
        Origin::Known(location) => return Some(location),
        Origin::Search(query) => return search(services, &query, reporter).await,
        Origin::Coordinates(coordinate) => coordinate,
        Origin::Detect => {
            reporter
                .send(PipelineUpdate::Progress(
                    "Detecting your location...".to_string(),
                ))
                .await;
            match services.geoip.detect().await {
                Ok(coordinate) => coordinate,
                Err(err) => {
                    reporter.fail(Step::Geolocate, &err).await;
                    return None;
                }
            }
        }
    };

    reporter
        .send(PipelineUpdate::Progress(
            "Resolving place name...".to_string(),
        ))
        .await;
    match services.geocoder.reverse(coordinate).await {
        Ok(location) => Some(location),
        Err(err) => {
            reporter.fail(Step::ReverseGeocode, &err).await;
            None
        }
    }
}

async fn search(services: &Services, query: &str, reporter: &Reporter) -> Option<Location> {
    reporter
        .send(PipelineUpdate::Progress(format!("Searching for {query}...")))
        .await;
    match services.geocoder.resolve(query).await {
        Ok(GeocodeResolution::Selected(location)) => Some(location),
        Ok(GeocodeResolution::NotFound(name)) => {
            reporter
                .fail(Step::Search, &DashboardError::NotFound(name))
                .await;
            None
        }
        Err(err) => {
            reporter.fail(Step::Search, &err).await;
            None
        }
    }
}
