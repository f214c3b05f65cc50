use serde::Serialize;
use std::{fmt, str::FromStr};

/// A point on the map, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Encodes the point the way the distance API expects it: `"lat,lng"`.
    pub fn to_query_param(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

// Display rounds to 4 decimals, matching what the widget shows under the map.
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

impl FromStr for Coordinate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| format!("Expected \"LAT,LNG\", got \"{}\"", s))?;
        let latitude = lat
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("Invalid latitude \"{}\": {}", lat.trim(), e))?;
        let longitude = lng
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("Invalid longitude \"{}\": {}", lng.trim(), e))?;
        Ok(Coordinate::new(latitude, longitude))
    }
}

/// Axis-aligned latitude/longitude box that clicks must fall inside.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    pub name: String,
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
    /// Where the map opens; not necessarily the middle of the box.
    pub map_center: Coordinate,
}

impl BoundingBox {
    pub fn iran() -> Self {
        Self {
            name: "Iran".to_string(),
            north: 39.7778,
            south: 25.0643,
            east: 63.3336,
            west: 44.0479,
            map_center: Coordinate::new(35.6892, 51.3890),
        }
    }

    /// Edges are inclusive on all four sides.
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        lat >= self.south && lat <= self.north && lng >= self.west && lng <= self.east
    }

    pub fn contains_coordinate(&self, coord: Coordinate) -> bool {
        self.contains(coord.latitude, coord.longitude)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::iran()
    }
}
