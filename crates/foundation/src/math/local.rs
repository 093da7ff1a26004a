use crate::geo::LatLng;

/// Planar coordinates relative to a projection origin.
///
/// `east` grows with longitude, `north` with latitude.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LocalPoint {
    pub east: f64,
    pub north: f64,
}

impl LocalPoint {
    pub fn new(east: f64, north: f64) -> Self {
        Self { east, north }
    }
}

/// Equirectangular projection around an origin.
///
/// Only meant for small areas (a few kilometers), where the distortion of
/// treating degrees as a flat grid is invisible on screen.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LocalProjection {
    origin: LatLng,
    units_per_degree: f64,
}

impl LocalProjection {
    pub fn new(origin: LatLng, units_per_degree: f64) -> Self {
        Self {
            origin,
            units_per_degree,
        }
    }

    pub fn origin(&self) -> LatLng {
        self.origin
    }

    pub fn project(&self, p: LatLng) -> LocalPoint {
        LocalPoint::new(
            (p.lng - self.origin.lng) * self.units_per_degree,
            (p.lat - self.origin.lat) * self.units_per_degree,
        )
    }

    pub fn unproject(&self, p: LocalPoint) -> LatLng {
        LatLng::new(
            self.origin.lat + p.north / self.units_per_degree,
            self.origin.lng + p.east / self.units_per_degree,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{LocalPoint, LocalProjection};
    use crate::geo::LatLng;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn origin_projects_to_zero() {
        let origin = LatLng::new(34.0522, -118.2437);
        let p = LocalProjection::new(origin, 9.0).project(origin);
        assert_eq!(p, LocalPoint::new(0.0, 0.0));
    }

    #[test]
    fn scales_offsets_per_axis() {
        let proj = LocalProjection::new(LatLng::new(34.0, -118.0), 9.0);
        let p = proj.project(LatLng::new(34.5, -117.0));
        assert_close(p.east, 9.0, 1e-9);
        assert_close(p.north, 4.5, 1e-9);
    }

    #[test]
    fn unproject_inverts_project() {
        let proj = LocalProjection::new(LatLng::new(34.0522, -118.2437), 100.0);
        let src = LatLng::new(34.06, -118.25);
        let back = proj.unproject(proj.project(src));
        assert_close(back.lat, src.lat, 1e-12);
        assert_close(back.lng, src.lng, 1e-12);
    }
}
