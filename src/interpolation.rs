use crate::coefficients::{CoefficientTable, GaussTerm};
use crate::constants::SECONDS_PER_JULIAN_YEAR;
use crate::error::IgrfError;
use crate::triangle::Triangle;
use crate::utils::datetime_to_decimal_year;
use log::{debug, trace};
use time::PrimitiveDateTime;

/// Gauss coefficients valid at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussCoefficients {
    pub(crate) g: Triangle<f64>,
    pub(crate) h: Triangle<f64>,
}

impl GaussCoefficients {
    /// Builds a coefficient set directly; `h(n, 0)` is forced to zero.
    ///
    /// # Panics
    ///
    /// If `g` and `h` are truncated at different degrees.
    pub fn new(g: Triangle<f64>, mut h: Triangle<f64>) -> Self {
        assert_eq!(g.max_degree(), h.max_degree(), "g and h truncated differently");
        for n in 0..=h.max_degree() {
            h[(n, 0)] = 0.0;
        }
        GaussCoefficients { g, h }
    }

    pub fn max_degree(&self) -> usize {
        self.g.max_degree()
    }

    pub fn g(&self, n: usize, m: usize) -> Option<f64> {
        self.g.get(n, m).copied()
    }

    pub fn h(&self, n: usize, m: usize) -> Option<f64> {
        self.h.get(n, m).copied()
    }
}

/// Coefficients at `date`, interpolated linearly between the bracketing epochs or extrapolated
/// from the last epoch with the tabulated secular variation.
///
/// `date` is taken as UTC and must lie in `[table.valid_from(), table.valid_until())`.
pub fn coefficients_at(
    date: PrimitiveDateTime,
    table: &CoefficientTable,
) -> Result<GaussCoefficients, IgrfError> {
    let valid_from = table.valid_from();
    let valid_until = table.valid_until();
    if date < valid_from || date >= valid_until {
        return Err(IgrfError::OutOfRange {
            date,
            valid_from,
            valid_until,
        });
    }

    let epochs = table.epochs();
    // valid_from is epochs[0], so at least one epoch is <= date
    let index = epochs.partition_point(|epoch| *epoch <= date) - 1;
    let elapsed = (date - epochs[index]).as_seconds_f64();
    let interval = epochs
        .get(index + 1)
        .map(|next| (*next - epochs[index]).as_seconds_f64());
    let year = datetime_to_decimal_year(date);
    trace!("{year:.4} falls in epoch {} (index {index})", table.years()[index]);
    if interval.is_none() {
        debug!(
            "{year:.4} is past the last epoch {}, extrapolating with secular variation",
            table.years()[index]
        );
    }

    Ok(GaussCoefficients {
        g: interpolate(table, GaussTerm::G, index, elapsed, interval),
        h: interpolate(table, GaussTerm::H, index, elapsed, interval),
    })
}

/// Coefficients tabulated for exactly `year`, without interpolation.
pub fn coefficients_at_epoch(
    year: f64,
    table: &CoefficientTable,
) -> Result<GaussCoefficients, IgrfError> {
    let index = table
        .years()
        .iter()
        .position(|&y| y == year)
        .ok_or(IgrfError::UnknownEpoch { year })?;
    Ok(GaussCoefficients {
        g: select(table, GaussTerm::G, index),
        h: select(table, GaussTerm::H, index),
    })
}

fn interpolate(
    table: &CoefficientTable,
    term: GaussTerm,
    index: usize,
    elapsed: f64,
    interval: Option<f64>,
) -> Triangle<f64> {
    let values = table.values(term);
    let rates = table.rates(term);
    let mut result = Triangle::filled(values.max_degree(), 0.0);
    for ((n, m), series) in values.iter() {
        let rate = match interval {
            Some(seconds) => (series[index + 1] - series[index]) / seconds,
            None => rates[(n, m)] / SECONDS_PER_JULIAN_YEAR,
        };
        result[(n, m)] = series[index] + elapsed * rate;
    }
    result
}

fn select(table: &CoefficientTable, term: GaussTerm, index: usize) -> Triangle<f64> {
    let values = table.values(term);
    let mut result = Triangle::filled(values.max_degree(), 0.0);
    for ((n, m), series) in values.iter() {
        result[(n, m)] = series[index];
    }
    result
}
