//! Shared calendar utilities for RTS crates.

/// Gregorian calendar arithmetic used to size and address dense stores.
pub mod calendar {
    /// Number of months in a year.
    pub const MONTHS_PER_YEAR: u32 = 12;

    /// Number of hours in a day.
    pub const HOURS_PER_DAY: u32 = 24;

    /// Returns true for Gregorian leap years: divisible by 4, not by 100
    /// unless also by 400.
    pub fn is_leap_year(year: i32) -> bool {
        (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
    }

    /// Number of days in `month` (1-12) of `year`.
    ///
    /// # Panics
    ///
    /// Panics if `month` is outside 1-12.
    pub fn days_in_month(month: u32, year: i32) -> u32 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if is_leap_year(year) => 29,
            2 => 28,
            _ => panic!("invalid month {month}"),
        }
    }

    /// Number of days in `year`.
    pub fn days_in_year(year: i32) -> u32 {
        if is_leap_year(year) {
            366
        } else {
            365
        }
    }

    /// Total number of days in the inclusive month range
    /// `start_month/start_year` through `end_month/end_year`.
    ///
    /// Returns 0 when the end month precedes the start month.
    pub fn days_in_months(start_month: u32, start_year: i32, end_month: u32, end_year: i32) -> u32 {
        let first = absolute_month(start_month, start_year);
        let last = absolute_month(end_month, end_year);
        let mut total = 0;
        let (mut month, mut year) = (start_month, start_year);
        for _ in first..=last {
            total += days_in_month(month, year);
            if month == MONTHS_PER_YEAR {
                month = 1;
                year += 1;
            } else {
                month += 1;
            }
        }
        total
    }

    /// Dense, comparable month index: `year * 12 + month`.
    pub fn absolute_month(month: u32, year: i32) -> i32 {
        year * MONTHS_PER_YEAR as i32 + month as i32
    }

    /// Inverse of [`absolute_month`], returning `(month, year)`.
    pub fn from_absolute_month(absolute: i32) -> (u32, i32) {
        // month 12 maps to the next multiple of 12, so shift down by one first
        let zero_based = absolute - 1;
        let year = zero_based.div_euclid(MONTHS_PER_YEAR as i32);
        let month = zero_based.rem_euclid(MONTHS_PER_YEAR as i32) as u32 + 1;
        (month, year)
    }

    /// Days since 1970-01-01 for a proleptic Gregorian date.
    pub fn absolute_day(year: i32, month: u32, day: u32) -> i64 {
        let year = if month <= 2 { year as i64 - 1 } else { year as i64 };
        let era = year.div_euclid(400);
        let year_of_era = year - era * 400;
        let shifted_month = (month as i64 + 9) % 12;
        let day_of_year = (153 * shifted_month + 2) / 5 + day as i64 - 1;
        let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
        era * 146_097 + day_of_era - 719_468
    }

    /// 1-based day of the year.
    pub fn day_of_year(year: i32, month: u32, day: u32) -> u32 {
        (absolute_day(year, month, day) - absolute_day(year, 1, 1)) as u32 + 1
    }

}

/// Year types used to group monthly and daily values into annual periods.
pub mod dates {
    use crate::calendar::{days_in_month, MONTHS_PER_YEAR};
    use crate::error::DateError;
    use chrono::NaiveDate;
    use serde::{Deserialize, Serialize};
    use std::fmt;
    use std::str::FromStr;

    /// The annual period a value belongs to.
    ///
    /// A year is labelled by the calendar year in which it begins, so the
    /// water year running Oct 1 2022 to Sep 30 2023 is water year 2022.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub enum YearType {
        #[default]
        Calendar,
        /// October through September.
        Water,
        /// November through October.
        NovToOct,
    }

    impl YearType {
        /// First calendar month of the year type.
        pub fn start_month(&self) -> u32 {
            match self {
                YearType::Calendar => 1,
                YearType::Water => 10,
                YearType::NovToOct => 11,
            }
        }

        /// Last calendar month of the year type.
        pub fn end_month(&self) -> u32 {
            match self.start_month() {
                1 => MONTHS_PER_YEAR,
                start => start - 1,
            }
        }

        /// The year label for a calendar month.
        pub fn year_for(&self, month: u32, year: i32) -> i32 {
            if month >= self.start_month() {
                year
            } else {
                year - 1
            }
        }

        /// First and last day of the labelled year.
        pub fn date_range(&self, year: i32) -> Option<(NaiveDate, NaiveDate)> {
            let start = NaiveDate::from_ymd_opt(year, self.start_month(), 1)?;
            let end_year = if self.start_month() == 1 { year } else { year + 1 };
            let end_month = self.end_month();
            let end = NaiveDate::from_ymd_opt(end_year, end_month, days_in_month(end_month, end_year))?;
            Some((start, end))
        }
    }

    impl fmt::Display for YearType {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let name = match self {
                YearType::Calendar => "Calendar",
                YearType::Water => "Water",
                YearType::NovToOct => "NovToOct",
            };
            write!(f, "{name}")
        }
    }

    impl FromStr for YearType {
        type Err = DateError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s.to_ascii_lowercase().as_str() {
                "calendar" => Ok(YearType::Calendar),
                "water" => Ok(YearType::Water),
                "novtooct" => Ok(YearType::NovToOct),
                other => Err(DateError(format!("unknown year type \"{other}\""))),
            }
        }
    }

}

/// Error types
pub mod error {
    use std::fmt;

    #[derive(Debug)]
    pub struct DateError(pub String);

    impl fmt::Display for DateError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Date error: {}", self.0)
        }
    }

    impl std::error::Error for DateError {}
}
