use crate::error::{Result, TsError};
use crate::interval::IntervalBase;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use rts_utils::calendar::{absolute_day, absolute_month, days_in_month, from_absolute_month};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

const SECONDS_PER_DAY: i64 = 86_400;

/// The finest calendar field a position carries, ordered finest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Precision {
    Second,
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

impl Precision {
    /// Number of leading (year, month, day, hour, minute, second) fields in use.
    fn field_count(&self) -> usize {
        match self {
            Precision::Year => 1,
            Precision::Month => 2,
            Precision::Day => 3,
            Precision::Hour => 4,
            Precision::Minute => 5,
            Precision::Second => 6,
        }
    }
}

/// A calendar timestamp with a declared precision.
///
/// Fields finer than the precision hold their minimum (time fields 0, day
/// and month 1) and are ignored when comparing. Comparison between two
/// positions of different precision happens at the coarser of the two, so
/// `2020-01` equals `2020-01-17`; positions are therefore `PartialOrd` but
/// not `Ord`.
#[derive(Debug, Clone, Copy)]
pub struct TimePosition {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    precision: Precision,
}

impl TimePosition {
    /// Build a position from components. Components finer than `precision`
    /// are reset to their minimum.
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        precision: Precision,
    ) -> Result<TimePosition> {
        let valid = (1..=12).contains(&month)
            && day >= 1
            && day <= days_in_month(month, year)
            && hour < 24
            && minute < 60
            && second < 60;
        if !valid {
            return Err(TsError::InvalidPosition(format!(
                "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
            )));
        }
        let mut position = TimePosition {
            year,
            month,
            day,
            hour,
            minute,
            second,
            precision,
        };
        position.truncate();
        Ok(position)
    }

    pub fn from_year(year: i32) -> TimePosition {
        TimePosition {
            year,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
            precision: Precision::Year,
        }
    }

    pub fn from_ym(year: i32, month: u32) -> Result<TimePosition> {
        TimePosition::new(year, month, 1, 0, 0, 0, Precision::Month)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<TimePosition> {
        TimePosition::new(year, month, day, 0, 0, 0, Precision::Day)
    }

    pub fn from_ymdh(year: i32, month: u32, day: u32, hour: u32) -> Result<TimePosition> {
        TimePosition::new(year, month, day, hour, 0, 0, Precision::Hour)
    }

    /// Parse a position, inferring precision from the fields present:
    /// `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, `YYYY-MM-DD hh`, `YYYY-MM-DD hh:mm`
    /// or `YYYY-MM-DD hh:mm:ss`. `T` is accepted as the date/time separator.
    pub fn parse(text: &str) -> Result<TimePosition> {
        let trimmed = text.trim();
        let invalid = || TsError::InvalidPosition(trimmed.to_string());
        let normalized = trimmed.replacen('T', " ", 1);
        match normalized.split_once(' ') {
            None => match normalized.split('-').count() {
                1 => normalized
                    .parse::<i32>()
                    .map(TimePosition::from_year)
                    .map_err(|_| invalid()),
                2 => {
                    let date = NaiveDate::parse_from_str(&format!("{normalized}-01"), "%Y-%m-%d")
                        .map_err(|_| invalid())?;
                    TimePosition::from_ym(date.year(), date.month())
                }
                3 => {
                    let date =
                        NaiveDate::parse_from_str(&normalized, "%Y-%m-%d").map_err(|_| invalid())?;
                    Ok(TimePosition::from(date))
                }
                _ => Err(invalid()),
            },
            Some((date_text, time_text)) => {
                let date =
                    NaiveDate::parse_from_str(date_text, "%Y-%m-%d").map_err(|_| invalid())?;
                let time_text = time_text.trim();
                let (time, precision) = match time_text.split(':').count() {
                    1 => (
                        NaiveTime::parse_from_str(&format!("{time_text}:00"), "%H:%M"),
                        Precision::Hour,
                    ),
                    2 => (NaiveTime::parse_from_str(time_text, "%H:%M"), Precision::Minute),
                    3 => (NaiveTime::parse_from_str(time_text, "%H:%M:%S"), Precision::Second),
                    _ => return Err(invalid()),
                };
                let time = time.map_err(|_| invalid())?;
                Ok(TimePosition::from(date.and_time(time)).with_precision(precision))
            }
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn second(&self) -> u32 {
        self.second
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// `year * 12 + month`, see [`absolute_month`].
    pub fn absolute_month(&self) -> i32 {
        absolute_month(self.month, self.year)
    }

    /// Days since 1970-01-01.
    pub fn absolute_day(&self) -> i64 {
        absolute_day(self.year, self.month, self.day)
    }

    /// A copy of this position at another precision. Moving to a coarser
    /// precision resets the finer fields; moving to a finer one keeps the
    /// fields, which are already at their minimum.
    pub fn with_precision(&self, precision: Precision) -> TimePosition {
        let mut position = *self;
        position.precision = precision;
        position.truncate();
        position
    }

    /// Lexicographic comparison over the fields both positions carry.
    pub fn compare(&self, other: &TimePosition) -> Ordering {
        let fields = self.precision.max(other.precision).field_count();
        self.fields()[..fields].cmp(&other.fields()[..fields])
    }

    /// Advance by `mult` units of `base`, carrying into coarser fields.
    /// Negative multipliers move backwards. Month and year steps clamp the
    /// day to the length of the target month.
    pub fn add_interval(&mut self, base: IntervalBase, mult: i32) {
        let mult = mult as i64;
        match base {
            IntervalBase::Second => self.add_seconds(mult),
            IntervalBase::Minute => self.add_seconds(mult * 60),
            IntervalBase::Hour => self.add_seconds(mult * 3_600),
            IntervalBase::Day => self.add_days(mult),
            IntervalBase::Week => self.add_days(mult * 7),
            IntervalBase::Month => self.add_months(mult),
            IntervalBase::Year => self.add_years(mult),
        }
        self.truncate();
    }

    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    pub fn to_naive_date_time(&self) -> Option<NaiveDateTime> {
        self.to_naive_date()?
            .and_hms_opt(self.hour, self.minute, self.second)
    }

    fn fields(&self) -> [i64; 6] {
        [
            self.year as i64,
            self.month as i64,
            self.day as i64,
            self.hour as i64,
            self.minute as i64,
            self.second as i64,
        ]
    }

    fn truncate(&mut self) {
        let fields = self.precision.field_count();
        if fields < 6 {
            self.second = 0;
        }
        if fields < 5 {
            self.minute = 0;
        }
        if fields < 4 {
            self.hour = 0;
        }
        if fields < 3 {
            self.day = 1;
        }
        if fields < 2 {
            self.month = 1;
        }
    }

    fn add_seconds(&mut self, seconds: i64) {
        let total =
            self.hour as i64 * 3_600 + self.minute as i64 * 60 + self.second as i64 + seconds;
        let days = total.div_euclid(SECONDS_PER_DAY);
        let rest = total.rem_euclid(SECONDS_PER_DAY);
        self.hour = (rest / 3_600) as u32;
        self.minute = (rest % 3_600 / 60) as u32;
        self.second = (rest % 60) as u32;
        self.add_days(days);
    }

    fn add_days(&mut self, days: i64) {
        let mut remaining = days;
        while remaining > 0 {
            let left_in_month = (days_in_month(self.month, self.year) - self.day) as i64;
            if remaining <= left_in_month {
                self.day += remaining as u32;
                return;
            }
            remaining -= left_in_month + 1;
            self.day = 1;
            self.step_month(1);
        }
        while remaining < 0 {
            if -remaining < self.day as i64 {
                self.day -= (-remaining) as u32;
                return;
            }
            remaining += self.day as i64;
            self.step_month(-1);
            self.day = days_in_month(self.month, self.year);
        }
    }

    fn add_months(&mut self, months: i64) {
        self.step_month(months);
        self.day = self.day.min(days_in_month(self.month, self.year));
    }

    fn add_years(&mut self, years: i64) {
        self.year += years as i32;
        self.day = self.day.min(days_in_month(self.month, self.year));
    }

    fn step_month(&mut self, months: i64) {
        let (month, year) = from_absolute_month(self.absolute_month() + months as i32);
        self.month = month;
        self.year = year;
    }
}

impl PartialEq for TimePosition {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl PartialOrd for TimePosition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl From<NaiveDate> for TimePosition {
    fn from(date: NaiveDate) -> Self {
        TimePosition {
            year: date.year(),
            month: date.month(),
            day: date.day(),
            hour: 0,
            minute: 0,
            second: 0,
            precision: Precision::Day,
        }
    }
}

impl From<NaiveDateTime> for TimePosition {
    fn from(date_time: NaiveDateTime) -> Self {
        TimePosition {
            year: date_time.year(),
            month: date_time.month(),
            day: date_time.day(),
            hour: date_time.hour(),
            minute: date_time.minute(),
            second: date_time.second(),
            precision: Precision::Second,
        }
    }
}

impl fmt::Display for TimePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.year)?;
        let fields = self.precision.field_count();
        if fields >= 2 {
            write!(f, "-{:02}", self.month)?;
        }
        if fields >= 3 {
            write!(f, "-{:02}", self.day)?;
        }
        if fields >= 4 {
            write!(f, " {:02}", self.hour)?;
        }
        if fields >= 5 {
            write!(f, ":{:02}", self.minute)?;
        }
        if fields >= 6 {
            write!(f, ":{:02}", self.second)?;
        }
        Ok(())
    }
}

impl FromStr for TimePosition {
    type Err = TsError;

    fn from_str(s: &str) -> Result<Self> {
        TimePosition::parse(s)
    }
}

impl Serialize for TimePosition {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimePosition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        TimePosition::parse(&text).map_err(de::Error::custom)
    }
}
