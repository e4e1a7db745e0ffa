pub mod insight;
pub mod pollutants;
pub mod summary;
pub mod trend;
