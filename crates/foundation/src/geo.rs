use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Geographic position in decimal degrees.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// True when both components are finite and inside the WGS84 ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Axis-aligned box around a center point, `center ± radius` on each axis.
///
/// Radii are in degrees and independent per axis.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoBounds {
    pub center: LatLng,
    pub radius_lat: f64,
    pub radius_lng: f64,
}

impl GeoBounds {
    pub const fn new(center: LatLng, radius_lat: f64, radius_lng: f64) -> Self {
        Self {
            center,
            radius_lat,
            radius_lng,
        }
    }

    pub fn min(&self) -> LatLng {
        LatLng::new(
            self.center.lat - self.radius_lat,
            self.center.lng - self.radius_lng,
        )
    }

    pub fn max(&self) -> LatLng {
        LatLng::new(
            self.center.lat + self.radius_lat,
            self.center.lng + self.radius_lng,
        )
    }

    pub fn lat_range(&self) -> RangeInclusive<f64> {
        self.min().lat..=self.max().lat
    }

    pub fn lng_range(&self) -> RangeInclusive<f64> {
        self.min().lng..=self.max().lng
    }

    /// Inclusive on every edge.
    pub fn contains(&self, p: LatLng) -> bool {
        self.lat_range().contains(&p.lat) && self.lng_range().contains(&p.lng)
    }

    pub fn has_valid_radii(&self) -> bool {
        self.radius_lat.is_finite()
            && self.radius_lng.is_finite()
            && self.radius_lat >= 0.0
            && self.radius_lng >= 0.0
    }

    /// Valid radii, and every corner is a valid coordinate.
    pub fn is_valid(&self) -> bool {
        self.has_valid_radii() && self.min().is_valid() && self.max().is_valid()
    }
}
