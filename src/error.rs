use std::path::PathBuf;
use thiserror::Error;
use time::PrimitiveDateTime;

#[derive(Error, Debug)]
pub enum IgrfError {
    /// The coefficient file does not exist
    #[error("Gauss coefficient file '{}' not found", .path.display())]
    NotFound { path: PathBuf },

    /// The coefficient file exists but could not be read
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// A line of the coefficient file is malformed
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// The query date is outside the window covered by the table
    #[error("invalid date '{date}': must be >= {valid_from} and < {valid_until}")]
    OutOfRange {
        date: PrimitiveDateTime,
        valid_from: PrimitiveDateTime,
        valid_until: PrimitiveDateTime,
    },

    /// Exact-epoch lookup of a year the table does not tabulate
    #[error("invalid year '{year}': not a tabulated epoch")]
    UnknownEpoch { year: f64 },

    /// The east component is undefined at the geographic poles
    #[error("field is singular at latitude {latitude}")]
    Singularity { latitude: f64 },

    /// Geodetic position outside the latitude range, non-finite, or at the Earth's center
    #[error("invalid coordinate (longitude {longitude}, latitude {latitude}, height {height})")]
    InvalidCoordinate {
        longitude: f64,
        latitude: f64,
        height: f64,
    },

    #[error("{0}")]
    Time(#[from] time::error::ComponentRange),
}

impl IgrfError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        IgrfError::Parse {
            line,
            message: message.into(),
        }
    }
}
