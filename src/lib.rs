//! Geomagnetic field from the International Geomagnetic Reference Field (IGRF).
//!
//! Load the coefficient table once, then query any number of points and dates:
//!
//! ```no_run
//! use time::macros::datetime;
//!
//! let model = igrf_rs::Igrf::load("data/igrf13coeffs.txt")?;
//! let b = model.field_at(45.0, 45.0, 0.0, datetime!(2020-01-01 0:00))?;
//! println!("{} {} {} nT", b.east, b.north, b.up);
//! # Ok::<(), igrf_rs::IgrfError>(())
//! ```

pub mod coefficients;
pub mod constants;
pub mod dipole;
pub mod ellipsoid;
pub mod error;
pub mod field;
pub mod interpolation;
pub mod legendre;
pub mod triangle;
pub mod utils;

pub use coefficients::{CoefficientTable, GaussTerm};
pub use dipole::{dipole_moment, DipoleMoment};
pub use ellipsoid::{Ellipsoid, SphericalCoordinates, WGS84};
pub use error::IgrfError;
pub use field::{field_at, Igrf, MagneticField};
pub use interpolation::{coefficients_at, coefficients_at_epoch, GaussCoefficients};
pub use legendre::{associated_legendre, legendre_derivative, schmidt_factors, LegendreTable};
pub use triangle::Triangle;
