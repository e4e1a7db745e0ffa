use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    pub coordinate: Coordinate,
    pub country: Option<String>,
    pub admin1: Option<String>,
}

impl Location {
    pub fn from_coords(lat: f64, lon: f64) -> Self {
        Self {
            name: format!("{lat:.4}, {lon:.4}"),
            coordinate: Coordinate::new(lat, lon),
            country: None,
            admin1: None,
        }
    }

    pub fn display_name(&self) -> String {
        match (&self.admin1, &self.country) {
            (Some(admin), Some(country)) if admin != &self.name => {
                format!("{}, {}, {}", self.name, admin, country)
            }
            (_, Some(country)) => format!("{}, {}", self.name, country),
            _ => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeResolution {
    Selected(Location),
    NotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_skips_admin_matching_city() {
        let location = Location {
            name: "Stockholm".to_string(),
            coordinate: Coordinate::new(59.3293, 18.0686),
            country: Some("Sweden".to_string()),
            admin1: Some("Stockholm".to_string()),
        };
        assert_eq!(location.display_name(), "Stockholm, Sweden");
    }

    #[test]
    fn from_coords_uses_rounded_label() {
        let location = Location::from_coords(51.50735, -0.12776);
        assert_eq!(location.name, "51.5074, -0.1278");
        assert_eq!(location.display_name(), "51.5074, -0.1278");
    }
}
