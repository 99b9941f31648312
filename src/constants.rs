/// IGRF reference radius (mean Earth radius) in meters.
pub const REFERENCE_RADIUS: f64 = 6_371_200.0;

/// Length of the year used to convert secular variation to a per-second rate.
pub const SECONDS_PER_JULIAN_YEAR: f64 = 365.25 * 24.0 * 60.0 * 60.0;

/// Whole years past the last tabulated epoch for which extrapolation is accepted.
pub const EXTRAPOLATION_YEARS: i32 = 6;

/// Vacuum permeability in N/A².
pub const VACUUM_PERMEABILITY: f64 = 1.2566370621219e-6;

/// Earth radius used for the dipole moment, in meters.
pub const DIPOLE_EARTH_RADIUS: f64 = 6.3781e6;

/// Points closer to the pole than this (in |sin(colatitude)|) are rejected.
pub(crate) const POLE_TOLERANCE: f64 = 1e-12;
