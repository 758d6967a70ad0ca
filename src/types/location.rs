//! Geographic coordinates and the fixed set of Dutch locations the dashboard compares.

use haversine::{distance, Location as HaversineLocation, Units};
use ordered_float::OrderedFloat;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use weerdash::LatLon;
///
/// let de_bilt = LatLon(52.11, 5.1806);
/// assert_eq!(de_bilt.0, 52.11); // Latitude
/// assert_eq!(de_bilt.1, 5.1806); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    /// Great-circle distance to `other` in kilometers.
    pub fn distance_km(&self, other: &LatLon) -> f64 {
        distance(
            HaversineLocation {
                latitude: self.0,
                longitude: self.1,
            },
            HaversineLocation {
                latitude: other.0,
                longitude: other.1,
            },
            Units::Kilometers,
        )
    }

    /// Hashable form of the coordinate, used in cache keys.
    pub(crate) fn key(&self) -> (OrderedFloat<f64>, OrderedFloat<f64>) {
        (OrderedFloat(self.0), OrderedFloat(self.1))
    }
}

/// A named location whose weather can be fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    pub coordinates: LatLon,
}

impl Location {
    pub fn new(name: impl Into<String>, coordinates: LatLon) -> Self {
        Self {
            name: name.into(),
            coordinates,
        }
    }
}

/// The locations offered for comparison, in display order.
pub fn dutch_locations() -> Vec<Location> {
    vec![
        Location::new("De Bilt", LatLon(52.11, 5.1806)),
        Location::new("Leeuwarden", LatLon(53.2014, 5.8086)),
        Location::new("Zandvoort", LatLon(52.3713, 4.5331)),
        Location::new("Maastricht", LatLon(50.8483, 5.6889)),
        Location::new("Enschede", LatLon(52.2183, 6.8958)),
    ]
}
