#![allow(clippy::missing_errors_doc)]

use std::{net::SocketAddr, path::PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::config::DEFAULT_MODEL;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "aqi-dashboard",
    version,
    about = "Air quality dashboard with a pass-through proxy backend"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the air quality proxy backend
    Serve(ServeArgs),
    /// Open the air quality dashboard
    Dashboard(DashboardArgs),
}

#[derive(Debug, Args, Clone)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "AQI_BIND", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// Override the upstream air quality provider URL
    #[arg(long, env = "AQI_PROVIDER_URL")]
    pub provider_url: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct DashboardArgs {
    /// City name (default: detect from network location)
    pub city: Option<String>,

    /// Direct latitude (requires --lon)
    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Direct longitude (requires --lat)
    #[arg(long, allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Proxy base URL; an in-process proxy is started when omitted
    #[arg(long, env = "AQI_PROXY_URL")]
    pub proxy_url: Option<String>,

    /// Override the upstream provider used by the in-process proxy
    #[arg(long, env = "AQI_PROVIDER_URL")]
    pub provider_url: Option<String>,

    /// Override the forward geocoding URL
    #[arg(long)]
    pub geocode_url: Option<String>,

    /// Override the reverse geocoding URL
    #[arg(long)]
    pub reverse_geocode_url: Option<String>,

    /// Override the IP geolocation URL
    #[arg(long)]
    pub geoip_url: Option<String>,

    /// API key for the generative-text service
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    /// Generative-text model identifier
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Override the generative-text service base URL
    #[arg(long, env = "GEMINI_URL")]
    pub insight_url: Option<String>,

    /// Hours shown in the trend chart (1..72)
    #[arg(long, default_value_t = 24, value_parser = clap::value_parser!(u16).range(1..=72))]
    pub hours: u16,

    /// Refresh interval in seconds (0 disables, otherwise at least 60)
    #[arg(long, default_value_t = 0, value_parser = parse_refresh_interval)]
    pub refresh_interval: u64,

    /// Print an air quality report to stdout and exit (non-interactive)
    #[arg(long)]
    pub one_shot: bool,

    /// Write logs to this file (the interactive view does not log otherwise)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

pub const MIN_REFRESH_SECS: u64 = 60;

fn parse_refresh_interval(raw: &str) -> Result<u64, String> {
    let secs: u64 = raw
        .parse()
        .map_err(|_| format!("`{raw}` is not a number of seconds"))?;
    if secs != 0 && secs < MIN_REFRESH_SECS {
        return Err(format!(
            "refresh interval must be 0 (disabled) or at least {MIN_REFRESH_SECS} seconds"
        ));
    }
    Ok(secs)
}

impl DashboardArgs {
    pub fn validate(&self) -> anyhow::Result<()> {
        match (self.lat, self.lon) {
            (Some(_), None) | (None, Some(_)) => {
                anyhow::bail!("--lat and --lon must be provided together")
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Command};

    fn dashboard(args: &[&str]) -> super::DashboardArgs {
        let mut argv = vec!["aqi-dashboard", "dashboard"];
        argv.extend_from_slice(args);
        match Cli::parse_from(argv).command {
            Command::Dashboard(args) => args,
            Command::Serve(_) => panic!("expected dashboard command"),
        }
    }

    #[test]
    fn dashboard_defaults() {
        let args = dashboard(&[]);
        assert!(args.city.is_none());
        assert_eq!(args.hours, 24);
        assert_eq!(args.refresh_interval, 0);
        assert!(!args.one_shot);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn parses_city_and_negative_coordinates() {
        let args = dashboard(&["Lima", "--lat", "-12.0464", "--lon", "-77.0428"]);
        assert_eq!(args.city.as_deref(), Some("Lima"));
        assert_eq!(args.lat, Some(-12.0464));
        assert_eq!(args.lon, Some(-77.0428));
    }

    #[test]
    fn rejects_lat_without_lon() {
        let args = dashboard(&["--lat", "59.3"]);
        let err = args.validate().expect_err("expected pairing error");
        assert!(err.to_string().contains("--lat and --lon"));
    }

    #[test]
    fn rejects_out_of_range_hours() {
        let err = Cli::try_parse_from(["aqi-dashboard", "dashboard", "--hours", "100"])
            .expect_err("expected range error");
        assert!(err.to_string().contains("100"));
    }

    #[test]
    fn refresh_interval_below_minimum_is_rejected() {
        let err = Cli::try_parse_from(["aqi-dashboard", "dashboard", "--refresh-interval", "30"])
            .expect_err("expected minimum error");
        assert!(err.to_string().contains("at least 60 seconds"));

        assert_eq!(dashboard(&["--refresh-interval", "0"]).refresh_interval, 0);
        assert_eq!(dashboard(&["--refresh-interval", "60"]).refresh_interval, 60);
        assert_eq!(dashboard(&["--refresh-interval", "900"]).refresh_interval, 900);
    }

    #[test]
    fn parses_serve_bind_address() {
        let cli = Cli::parse_from(["aqi-dashboard", "serve", "--bind", "127.0.0.1:8080"]);
        match cli.command {
            Command::Serve(args) => assert_eq!(args.bind.port(), 8080),
            Command::Dashboard(_) => panic!("expected serve command"),
        }
    }
}
