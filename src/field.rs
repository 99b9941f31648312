use crate::coefficients::CoefficientTable;
use crate::constants::{POLE_TOLERANCE, REFERENCE_RADIUS};
use crate::ellipsoid::{Ellipsoid, SphericalCoordinates, WGS84};
use crate::error::IgrfError;
use crate::interpolation::{coefficients_at, GaussCoefficients};
use crate::legendre::{schmidt_factors, LegendreTable};
use crate::triangle::Triangle;
use std::borrow::Cow;
use std::path::Path;
use time::PrimitiveDateTime;

/// Field vector in nanotesla, in local geodetic east/north/up components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagneticField {
    pub east: f64,
    pub north: f64,
    /// Positive away from the Earth's center
    pub up: f64,
}

impl MagneticField {
    pub fn horizontal_intensity(&self) -> f64 {
        self.east.hypot(self.north)
    }

    pub fn total_intensity(&self) -> f64 {
        (self.east * self.east + self.north * self.north + self.up * self.up).sqrt()
    }

    /// Angle of the horizontal component east of geographic north, in degrees.
    pub fn declination(&self) -> f64 {
        self.east.atan2(self.north).to_degrees()
    }

    /// Dip below the horizontal, in degrees.
    pub fn inclination(&self) -> f64 {
        (-self.up).atan2(self.horizontal_intensity()).to_degrees()
    }
}

/// A loaded field model: the coefficient table plus the geometry it is evaluated against.
///
/// Holds no mutable state, so one instance can serve any number of threads.
#[derive(Debug, Clone)]
pub struct Igrf {
    table: CoefficientTable,
    ellipsoid: Ellipsoid,
    reference_radius: f64,
    schmidt: Triangle<f64>,
}

impl Igrf {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, IgrfError> {
        Ok(Igrf::new(CoefficientTable::load(path)?))
    }

    pub fn new(table: CoefficientTable) -> Self {
        let schmidt = schmidt_factors(table.max_degree());
        Igrf {
            table,
            ellipsoid: WGS84,
            reference_radius: REFERENCE_RADIUS,
            schmidt,
        }
    }

    pub fn with_ellipsoid(mut self, ellipsoid: Ellipsoid) -> Self {
        self.ellipsoid = ellipsoid;
        self
    }

    /// Reference radius `a` of the expansion, in meters.
    pub fn with_reference_radius(mut self, reference_radius: f64) -> Self {
        self.reference_radius = reference_radius;
        self
    }

    pub fn table(&self) -> &CoefficientTable {
        &self.table
    }

    pub fn ellipsoid(&self) -> Ellipsoid {
        self.ellipsoid
    }

    pub fn reference_radius(&self) -> f64 {
        self.reference_radius
    }

    /// Field at geodetic `longitude`, `latitude` (degrees) and `height` (meters) on `date` (UTC).
    pub fn field_at(
        &self,
        longitude: f64,
        latitude: f64,
        height: f64,
        date: PrimitiveDateTime,
    ) -> Result<MagneticField, IgrfError> {
        let coefficients = coefficients_at(date, &self.table)?;
        self.field_from_coefficients(longitude, latitude, height, &coefficients)
    }

    /// Same as [`Igrf::field_at`] with coefficients already interpolated, so that many points
    /// sharing a date interpolate only once.
    pub fn field_from_coefficients(
        &self,
        longitude: f64,
        latitude: f64,
        height: f64,
        coefficients: &GaussCoefficients,
    ) -> Result<MagneticField, IgrfError> {
        let position = self
            .ellipsoid
            .geodetic_to_spherical(longitude, latitude, height)?;
        let schmidt = if coefficients.max_degree() <= self.schmidt.max_degree() {
            Cow::Borrowed(&self.schmidt)
        } else {
            Cow::Owned(schmidt_factors(coefficients.max_degree()))
        };
        evaluate(latitude, &position, self.reference_radius, coefficients, &schmidt)
    }
}

/// Field at a geodetic point on `date` using the WGS84 ellipsoid and the IGRF reference radius.
pub fn field_at(
    longitude: f64,
    latitude: f64,
    height: f64,
    date: PrimitiveDateTime,
    table: &CoefficientTable,
) -> Result<MagneticField, IgrfError> {
    let position = WGS84.geodetic_to_spherical(longitude, latitude, height)?;
    let coefficients = coefficients_at(date, table)?;
    let schmidt = schmidt_factors(coefficients.max_degree());
    evaluate(latitude, &position, REFERENCE_RADIUS, &coefficients, &schmidt)
}

fn evaluate(
    latitude: f64,
    position: &SphericalCoordinates,
    reference_radius: f64,
    coefficients: &GaussCoefficients,
    schmidt: &Triangle<f64>,
) -> Result<MagneticField, IgrfError> {
    let max_n = coefficients.max_degree();
    let colatitude = (90.0 - position.latitude).to_radians();
    let sin_colatitude = colatitude.sin();
    if sin_colatitude.abs() < POLE_TOLERANCE {
        return Err(IgrfError::Singularity { latitude });
    }
    let legendre = LegendreTable::new(max_n, colatitude);

    let mut relative_radius_power = vec![0.0; max_n + 3];
    relative_radius_power[0] = 1.0;
    relative_radius_power[1] = reference_radius / position.radius;
    for n in 2..=max_n + 2 {
        relative_radius_power[n] = relative_radius_power[n - 1] * relative_radius_power[1];
    }

    let longitude_rad = position.longitude.to_radians();
    let mut sin_lon = vec![0.0; max_n + 1];
    let mut cos_lon = vec![0.0; max_n + 1];
    cos_lon[0] = 1.0;
    if max_n >= 1 {
        sin_lon[1] = longitude_rad.sin();
        cos_lon[1] = longitude_rad.cos();
    }
    for m in 2..=max_n {
        let x = m >> 1;
        sin_lon[m] = sin_lon[m - x] * cos_lon[x] + cos_lon[m - x] * sin_lon[x];
        cos_lon[m] = cos_lon[m - x] * cos_lon[x] - sin_lon[m - x] * sin_lon[x];
    }

    let mut east = 0.0;
    let mut north_gc = 0.0;
    let mut radial = 0.0;
    for n in 1..=max_n {
        let r_frac = relative_radius_power[n + 2];
        for m in 0..=n {
            let g = coefficients.g[(n, m)];
            let h = if m == 0 { 0.0 } else { coefficients.h[(n, m)] };
            let mf = m as f64;
            let sp = schmidt[(n, m)] * legendre.p[(n, m)];
            let cosine_part = g * cos_lon[m] + h * sin_lon[m];
            east += r_frac * mf * (-g * sin_lon[m] + h * cos_lon[m]) * sp;
            north_gc += r_frac * cosine_part * schmidt[(n, m)] * legendre.dp[(n, m)];
            radial += (n as f64 + 1.0) * r_frac * cosine_part * sp;
        }
    }
    east *= -1.0 / sin_colatitude;

    // Rotate from the geocentric frame to the local ellipsoid normal
    let (sin_delta, cos_delta) = (-(latitude - position.latitude).to_radians()).sin_cos();
    Ok(MagneticField {
        east,
        north: cos_delta * north_gc + sin_delta * radial,
        up: -sin_delta * north_gc + cos_delta * radial,
    })
}
