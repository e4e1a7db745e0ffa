pub mod air_quality;
pub mod location;
