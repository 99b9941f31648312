use crate::error::IgrfError;

/// Reference ellipsoid parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Semi-major axis (meters)
    pub semi_major_axis: f64,
    /// Flattening (dimensionless)
    pub flattening: f64,
}

pub const WGS84: Ellipsoid = Ellipsoid::new(6_378_137.0, 1.0 / 298.257_223_563);

/// Geocentric spherical position: longitude and latitude in degrees, radius in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalCoordinates {
    pub longitude: f64,
    pub latitude: f64,
    pub radius: f64,
}

impl Ellipsoid {
    pub const fn new(semi_major_axis: f64, flattening: f64) -> Self {
        Ellipsoid {
            semi_major_axis,
            flattening,
        }
    }

    pub fn semi_minor_axis(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.flattening)
    }

    pub fn eccentricity_squared(&self) -> f64 {
        2.0 * self.flattening - self.flattening * self.flattening
    }

    /// Converts geodetic longitude, latitude (degrees) and height above the ellipsoid (meters)
    /// to geocentric spherical coordinates. Longitude passes through unchanged.
    pub fn geodetic_to_spherical(
        &self,
        longitude: f64,
        latitude: f64,
        height: f64,
    ) -> Result<SphericalCoordinates, IgrfError> {
        let invalid = IgrfError::InvalidCoordinate {
            longitude,
            latitude,
            height,
        };
        if !(-90.0..=90.0).contains(&latitude) || !longitude.is_finite() || !height.is_finite() {
            return Err(invalid);
        }
        let e2 = self.eccentricity_squared();
        let (sin_lat, cos_lat) = latitude.to_radians().sin_cos();
        let prime_vertical_radius = self.semi_major_axis / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        let xy_projection = (height + prime_vertical_radius) * cos_lat;
        let z_cartesian = (height + (1.0 - e2) * prime_vertical_radius) * sin_lat;
        let radius = xy_projection.hypot(z_cartesian);
        let spherical_latitude = (z_cartesian / radius).asin().to_degrees();
        // the Earth's center has no direction
        if radius.is_nan() || radius <= 0.0 || !spherical_latitude.is_finite() {
            return Err(invalid);
        }
        Ok(SphericalCoordinates {
            longitude,
            latitude: spherical_latitude,
            radius,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn test_wgs84_constants() {
        assert_float_eq!(WGS84.semi_minor_axis(), 6_356_752.314_245_179, abs <= 0.001);
        assert_float_eq!(
            WGS84.eccentricity_squared().sqrt(),
            0.081_819_190_842_622,
            abs <= 1e-12
        );
    }

    #[test]
    fn test_equator() {
        let c = WGS84.geodetic_to_spherical(10.0, 0.0, 1000.0).unwrap();
        assert_eq!(c.longitude, 10.0);
        assert_float_eq!(c.latitude, 0.0, abs <= 1e-12);
        assert_float_eq!(c.radius, WGS84.semi_major_axis + 1000.0, abs <= 1e-6);
    }

    #[test]
    fn test_north_pole() {
        let c = WGS84.geodetic_to_spherical(0.0, 90.0, 0.0).unwrap();
        assert_float_eq!(c.latitude, 90.0, abs <= 1e-9);
        assert_float_eq!(c.radius, WGS84.semi_minor_axis(), abs <= 1e-6);
    }

    #[test]
    fn test_geocentric_latitude_on_surface() {
        let a2 = WGS84.semi_major_axis.powi(2);
        let b2 = WGS84.semi_minor_axis().powi(2);
        for latitude in [-60.0f64, -45.0, 15.0, 45.0, 80.0] {
            let c = WGS84.geodetic_to_spherical(0.0, latitude, 0.0).unwrap();
            let expected =
                ((1.0 - WGS84.eccentricity_squared()) * latitude.to_radians().tan()).atan();
            assert_float_eq!(c.latitude, expected.to_degrees(), abs <= 1e-10);

            let (slat, clat) = latitude.to_radians().sin_cos();
            let rad_sq = (a2 * a2 * clat * clat + b2 * b2 * slat * slat)
                / (a2 * clat * clat + b2 * slat * slat);
            assert_float_eq!(c.radius, rad_sq.sqrt(), abs <= 1e-6);
        }
        let c = WGS84.geodetic_to_spherical(0.0, 45.0, 0.0).unwrap();
        assert_float_eq!(c.latitude, 44.807_576, abs <= 1e-5);
    }

    #[test]
    fn test_sphere_is_identity_on_latitude() {
        let sphere = Ellipsoid::new(6_371_200.0, 0.0);
        let c = sphere.geodetic_to_spherical(-120.0, 33.0, 500.0).unwrap();
        assert_float_eq!(c.latitude, 33.0, abs <= 1e-12);
        assert_float_eq!(c.radius, 6_371_700.0, abs <= 1e-6);
    }

    #[test]
    fn test_invalid_latitude() {
        assert!(matches!(
            WGS84.geodetic_to_spherical(0.0, 91.0, 0.0),
            Err(IgrfError::InvalidCoordinate { .. })
        ));
        assert!(WGS84.geodetic_to_spherical(0.0, f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_invalid_coordinate_reports_every_component() {
        match WGS84.geodetic_to_spherical(12.0, 34.0, f64::NAN) {
            Err(IgrfError::InvalidCoordinate {
                longitude,
                latitude,
                height,
            }) => {
                assert_eq!(longitude, 12.0);
                assert_eq!(latitude, 34.0);
                assert!(height.is_nan());
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            WGS84.geodetic_to_spherical(f64::INFINITY, 0.0, 0.0),
            Err(IgrfError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_earth_center_is_rejected() {
        assert!(matches!(
            WGS84.geodetic_to_spherical(0.0, 0.0, -WGS84.semi_major_axis),
            Err(IgrfError::InvalidCoordinate { .. })
        ));
    }
}
