use crate::error::IgrfError;
use time::{Date, Duration, Month, PrimitiveDateTime, Time};

// Convert from year in decimal form (2020.5) to a UTC datetime
pub fn decimal_year_to_datetime(decimal_year: f64) -> Result<PrimitiveDateTime, IgrfError> {
    let year = decimal_year.floor() as i32;
    let start = start_of_year(year)?;
    let fraction = decimal_year - decimal_year.floor();
    let offset = (fraction * secs_in_year(year) as f64).round() as i64;
    Ok(start + Duration::seconds(offset))
}

pub fn datetime_to_decimal_year(date: PrimitiveDateTime) -> f64 {
    let year = date.year();
    let elapsed = Duration::days(date.ordinal() as i64 - 1) + (date.time() - Time::MIDNIGHT);
    year as f64 + elapsed.as_seconds_f64() / secs_in_year(year) as f64
}

/// Midnight on January 1 of `year`.
pub(crate) fn start_of_year(year: i32) -> Result<PrimitiveDateTime, IgrfError> {
    Ok(PrimitiveDateTime::new(
        Date::from_calendar_date(year, Month::January, 1)?,
        Time::MIDNIGHT,
    ))
}

fn secs_in_year(year: i32) -> i64 {
    time::util::days_in_year(year) as i64 * 24 * 60 * 60
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;
    use time::macros::datetime;

    #[test]
    fn test_whole_year_is_january_first() {
        assert_eq!(decimal_year_to_datetime(1900.0).unwrap(), datetime!(1900-01-01 0:00));
        assert_eq!(decimal_year_to_datetime(2020.0).unwrap(), datetime!(2020-01-01 0:00));
    }

    #[test]
    fn test_fractional_year_uses_that_years_length() {
        // 2020 is a leap year: half of it is 183 days
        assert_eq!(decimal_year_to_datetime(2020.5).unwrap(), datetime!(2020-07-02 0:00));
        // 2021 is not: half of it is 182.5 days
        assert_eq!(decimal_year_to_datetime(2021.5).unwrap(), datetime!(2021-07-02 12:00));
    }

    #[test]
    fn test_datetime_to_decimal_year() {
        let year = datetime_to_decimal_year(datetime!(2015-01-01 0:00));
        assert_float_eq!(year, 2015.0, abs <= 1e-12);
        let year = datetime_to_decimal_year(datetime!(2021-07-02 12:00));
        assert_float_eq!(year, 2021.5, abs <= 1e-12);
    }
}
