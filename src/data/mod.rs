pub mod air_quality;
pub mod geocode;
pub mod geoip;
pub mod insight;
pub mod proxy;
