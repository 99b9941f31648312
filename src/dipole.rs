use crate::constants::{DIPOLE_EARTH_RADIUS, VACUUM_PERMEABILITY};
use crate::interpolation::GaussCoefficients;
use std::f64::consts::PI;

/// Geocentric Cartesian dipole moment in A·m² (z along the rotation axis, x through Greenwich).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DipoleMoment {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Dipole moment from the degree-1 Gauss coefficients.
pub fn dipole_moment(coefficients: &GaussCoefficients) -> DipoleMoment {
    let scale = 4.0 * PI / VACUUM_PERMEABILITY * DIPOLE_EARTH_RADIUS.powi(3);
    let g = |m| coefficients.g(1, m).unwrap_or(0.0);
    let h = |m| coefficients.h(1, m).unwrap_or(0.0);
    DipoleMoment {
        x: scale * g(1),
        y: scale * h(1),
        z: scale * g(0),
    }
}

impl DipoleMoment {
    /// Returns `(amplitude, longitude, latitude)`, angles in degrees.
    ///
    /// The direction is where the moment vector points, which for the present field is the
    /// southern geomagnetic pole.
    pub fn to_spherical(&self) -> (f64, f64, f64) {
        let amplitude = (self.x * self.x + self.y * self.y + self.z * self.z).sqrt();
        let latitude = (self.z / amplitude).asin().to_degrees();
        let longitude = self.y.atan2(self.x).to_degrees();
        (amplitude, longitude, latitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triangle::Triangle;
    use float_eq::assert_float_eq;

    fn degree_one(g10: f64, g11: f64, h11: f64) -> GaussCoefficients {
        let mut g = Triangle::filled(1, 0.0);
        let mut h = Triangle::filled(1, 0.0);
        g[(1, 0)] = g10;
        g[(1, 1)] = g11;
        h[(1, 1)] = h11;
        GaussCoefficients::new(g, h)
    }

    #[test]
    fn test_axial_dipole_points_south() {
        let m = dipole_moment(&degree_one(-29404.8, 0.0, 0.0));
        let (amplitude, _, latitude) = m.to_spherical();
        assert_float_eq!(latitude, -90.0, abs <= 1e-12);
        let expected = 4.0 * PI / VACUUM_PERMEABILITY * DIPOLE_EARTH_RADIUS.powi(3) * 29404.8;
        assert_float_eq!(amplitude, expected, rmax <= 1e-12);
    }

    #[test]
    fn test_tilted_dipole_direction() {
        let m = dipole_moment(&degree_one(-1.0, 1.0, 1.0));
        let (_, longitude, latitude) = m.to_spherical();
        assert_float_eq!(longitude, 45.0, abs <= 1e-12);
        assert_float_eq!(latitude, -(1.0 / 3f64.sqrt()).asin().to_degrees(), abs <= 1e-12);
    }
}
