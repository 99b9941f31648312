use crate::constants::EXTRAPOLATION_YEARS;
use crate::error::IgrfError;
use crate::triangle::Triangle;
use crate::utils;
use log::debug;
use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;
use time::PrimitiveDateTime;

const HEADER_LINES: usize = 3;

/// Largest degree accepted from a table; published models stop well below it.
pub const MAX_DEGREE: usize = 255;

/// Selects the cosine (`g`) or sine (`h`) family of Gauss coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaussTerm {
    G,
    H,
}

/// Gauss coefficients tabulated at every epoch, plus the secular variation past the last one.
///
/// Immutable once loaded. `h(n, 0)` is zero-filled for every degree that has `h` terms, so both
/// families share the same shape.
#[derive(Debug, Clone)]
pub struct CoefficientTable {
    years: Vec<f64>,
    epochs: Vec<PrimitiveDateTime>,
    valid_until: PrimitiveDateTime,
    g: Triangle<Vec<f64>>,
    h: Triangle<Vec<f64>>,
    g_sv: Triangle<f64>,
    h_sv: Triangle<f64>,
    g_present: Triangle<bool>,
    h_present: Triangle<bool>,
}

struct Row {
    term: GaussTerm,
    degree: usize,
    order: usize,
    values: Vec<f64>,
    secular_variation: f64,
}

impl CoefficientTable {
    /// Reads a coefficient file in the IGRF tabular format.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<CoefficientTable, IgrfError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(IgrfError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let table = CoefficientTable::from_reader(BufReader::new(File::open(path)?))?;
        debug!(
            "Loaded {} epochs ({} to {}) up to degree {} from {}",
            table.years.len(),
            table.years[0],
            table.years[table.years.len() - 1],
            table.max_degree(),
            path.display()
        );
        Ok(table)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<CoefficientTable, IgrfError> {
        let mut lines = reader.lines().enumerate();
        for _ in 0..HEADER_LINES {
            match lines.next() {
                Some((_, line)) => {
                    line?;
                }
                None => return Err(IgrfError::parse(HEADER_LINES, "truncated header")),
            }
        }
        let header = match lines.next() {
            Some((_, line)) => line?,
            None => return Err(IgrfError::parse(HEADER_LINES + 1, "missing epoch header")),
        };
        let years = parse_years(HEADER_LINES + 1, &header)?;

        let mut rows = vec![];
        for (index, line) in lines {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            if let Some(row) = parse_row(index + 1, &line, years.len())? {
                rows.push(row);
            }
        }
        let max_degree = match rows.iter().map(|row| row.degree).max() {
            Some(max_degree) => max_degree,
            None => return Err(IgrfError::parse(HEADER_LINES + 2, "no coefficients")),
        };

        let epochs = years
            .iter()
            .map(|&year| utils::decimal_year_to_datetime(year))
            .collect::<Result<Vec<_>, _>>()?;
        let last_year = years[years.len() - 1].floor() as i32;
        let valid_until = utils::start_of_year(last_year + EXTRAPOLATION_YEARS)?;

        let mut table = CoefficientTable {
            g: Triangle::filled(max_degree, vec![0.0; years.len()]),
            h: Triangle::filled(max_degree, vec![0.0; years.len()]),
            g_sv: Triangle::filled(max_degree, 0.0),
            h_sv: Triangle::filled(max_degree, 0.0),
            g_present: Triangle::filled(max_degree, false),
            h_present: Triangle::filled(max_degree, false),
            years,
            epochs,
            valid_until,
        };
        for row in rows {
            let key = (row.degree, row.order);
            let (values, sv, present) = match row.term {
                GaussTerm::G => (&mut table.g, &mut table.g_sv, &mut table.g_present),
                GaussTerm::H => (&mut table.h, &mut table.h_sv, &mut table.h_present),
            };
            values[key] = row.values;
            sv[key] = row.secular_variation;
            present[key] = true;
        }

        // h has no order-0 term; give every degree carrying h terms an explicit zero row
        for n in 1..=max_degree {
            if (0..=n).any(|m| table.h_present[(n, m)]) {
                table.h[(n, 0)].iter_mut().for_each(|value| *value = 0.0);
                table.h_sv[(n, 0)] = 0.0;
                table.h_present[(n, 0)] = true;
            }
        }
        Ok(table)
    }

    /// Epoch years in ascending order.
    pub fn years(&self) -> &[f64] {
        &self.years
    }

    /// Epoch years as datetimes (January 1 for whole years).
    pub fn epochs(&self) -> &[PrimitiveDateTime] {
        &self.epochs
    }

    pub fn valid_from(&self) -> PrimitiveDateTime {
        self.epochs[0]
    }

    /// Exclusive upper bound: January 1, six years after the last epoch.
    pub fn valid_until(&self) -> PrimitiveDateTime {
        self.valid_until
    }

    pub fn max_degree(&self) -> usize {
        self.g.max_degree()
    }

    pub fn contains(&self, term: GaussTerm, n: usize, m: usize) -> bool {
        let present = match term {
            GaussTerm::G => &self.g_present,
            GaussTerm::H => &self.h_present,
        };
        n > 0 && present.get(n, m).copied().unwrap_or(false)
    }

    /// Values of one coefficient at every epoch.
    pub fn series(&self, term: GaussTerm, n: usize, m: usize) -> Option<&[f64]> {
        if !self.contains(term, n, m) {
            return None;
        }
        self.values(term).get(n, m).map(Vec::as_slice)
    }

    /// Rate of change (nT/year) past the last epoch.
    pub fn secular_variation(&self, term: GaussTerm, n: usize, m: usize) -> Option<f64> {
        if !self.contains(term, n, m) {
            return None;
        }
        self.rates(term).get(n, m).copied()
    }

    /// Degrees with at least one coefficient of `term`.
    pub fn degrees(&self, term: GaussTerm) -> Vec<usize> {
        (1..=self.max_degree())
            .filter(|&n| !self.orders(term, n).is_empty())
            .collect()
    }

    pub fn orders(&self, term: GaussTerm, n: usize) -> Vec<usize> {
        (0..=n).filter(|&m| self.contains(term, n, m)).collect()
    }

    pub(crate) fn values(&self, term: GaussTerm) -> &Triangle<Vec<f64>> {
        match term {
            GaussTerm::G => &self.g,
            GaussTerm::H => &self.h,
        }
    }

    pub(crate) fn rates(&self, term: GaussTerm) -> &Triangle<f64> {
        match term {
            GaussTerm::G => &self.g_sv,
            GaussTerm::H => &self.h_sv,
        }
    }
}

fn parse_years(line: usize, header: &str) -> Result<Vec<f64>, IgrfError> {
    let tokens: Vec<&str> = header.split_whitespace().collect();
    if tokens.len() < 5 {
        return Err(IgrfError::parse(line, "epoch header lists no years"));
    }
    let years = tokens[3..tokens.len() - 1]
        .iter()
        .map(|token| number::<f64>(line, token, "epoch year"))
        .collect::<Result<Vec<_>, _>>()?;
    if years.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(IgrfError::parse(line, "epoch years are not ascending"));
    }
    Ok(years)
}

fn parse_row(line: usize, text: &str, epochs: usize) -> Result<Option<Row>, IgrfError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() < 3 {
        return Err(IgrfError::parse(line, "expected tag, degree and order"));
    }
    let degree = number::<usize>(line, tokens[1], "degree")?;
    let order = number::<usize>(line, tokens[2], "order")?;
    let term = match tokens[0] {
        "g" => GaussTerm::G,
        "h" => GaussTerm::H,
        _ => return Ok(None),
    };
    if degree == 0 || degree > MAX_DEGREE || order > degree {
        return Err(IgrfError::parse(
            line,
            format!("invalid degree/order {degree}/{order}"),
        ));
    }
    if tokens.len() != epochs + 4 {
        return Err(IgrfError::parse(
            line,
            format!(
                "expected {} coefficients and a secular variation, found {}",
                epochs,
                tokens.len() - 3
            ),
        ));
    }
    let values = tokens[3..tokens.len() - 1]
        .iter()
        .map(|token| number::<f64>(line, token, "coefficient"))
        .collect::<Result<Vec<_>, _>>()?;
    let secular_variation = number::<f64>(line, tokens[tokens.len() - 1], "secular variation")?;
    Ok(Some(Row {
        term,
        degree,
        order,
        values,
        secular_variation,
    }))
}

fn number<T>(line: usize, token: &str, what: &str) -> Result<T, IgrfError>
where
    T: FromStr,
    T::Err: Display,
{
    token
        .parse::<T>()
        .map_err(|e| IgrfError::parse(line, format!("invalid {what} '{token}': {e}")))
}
