use crate::error::{Result, TsError};
use crate::position::Precision;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The unit of spacing between values in a regular time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IntervalBase {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl IntervalBase {
    pub fn name(&self) -> &'static str {
        match self {
            IntervalBase::Second => "Sec",
            IntervalBase::Minute => "Min",
            IntervalBase::Hour => "Hour",
            IntervalBase::Day => "Day",
            IntervalBase::Week => "Week",
            IntervalBase::Month => "Month",
            IntervalBase::Year => "Year",
        }
    }

    /// The position precision needed to address values at this interval.
    pub fn precision(&self) -> Precision {
        match self {
            IntervalBase::Second => Precision::Second,
            IntervalBase::Minute => Precision::Minute,
            IntervalBase::Hour => Precision::Hour,
            IntervalBase::Day | IntervalBase::Week => Precision::Day,
            IntervalBase::Month => Precision::Month,
            IntervalBase::Year => Precision::Year,
        }
    }
}

impl fmt::Display for IntervalBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for IntervalBase {
    type Err = TsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sec" | "second" | "seconds" => Ok(IntervalBase::Second),
            "min" | "minute" | "minutes" => Ok(IntervalBase::Minute),
            "hour" | "hours" | "hr" => Ok(IntervalBase::Hour),
            "day" | "days" | "daily" => Ok(IntervalBase::Day),
            "week" | "weeks" | "weekly" => Ok(IntervalBase::Week),
            "month" | "months" | "mon" | "monthly" => Ok(IntervalBase::Month),
            "year" | "years" | "yearly" | "annual" => Ok(IntervalBase::Year),
            _ => Err(TsError::UnknownInterval(s.to_string())),
        }
    }
}

/// Interval base plus multiplier, e.g. `Day` or `6Hour`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeInterval {
    pub base: IntervalBase,
    pub mult: u32,
}

impl TimeInterval {
    pub fn new(base: IntervalBase, mult: u32) -> TimeInterval {
        TimeInterval { base, mult }
    }

    /// Parse text such as `Day`, `1Month` or `24Hour`.
    /// A missing multiplier means 1; a multiplier of 0 is rejected.
    pub fn parse(text: &str) -> Result<TimeInterval> {
        let trimmed = text.trim();
        let digits = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| TsError::UnknownInterval(trimmed.to_string()))?;
        let (mult_text, base_text) = trimmed.split_at(digits);
        let mult = if mult_text.is_empty() {
            1
        } else {
            mult_text
                .parse::<u32>()
                .map_err(|_| TsError::UnknownInterval(trimmed.to_string()))?
        };
        if mult == 0 {
            return Err(TsError::UnknownInterval(trimmed.to_string()));
        }
        let base = base_text
            .parse::<IntervalBase>()
            .map_err(|_| TsError::UnknownInterval(trimmed.to_string()))?;
        Ok(TimeInterval { base, mult })
    }
}

impl From<IntervalBase> for TimeInterval {
    fn from(base: IntervalBase) -> Self {
        TimeInterval { base, mult: 1 }
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mult == 1 {
            write!(f, "{}", self.base)
        } else {
            write!(f, "{}{}", self.mult, self.base)
        }
    }
}

impl FromStr for TimeInterval {
    type Err = TsError;

    fn from_str(s: &str) -> Result<Self> {
        TimeInterval::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_interval() {
        assert_eq!(
            TimeInterval::parse("Day").unwrap(),
            TimeInterval::new(IntervalBase::Day, 1)
        );
        assert_eq!(
            TimeInterval::parse("24Hour").unwrap(),
            TimeInterval::new(IntervalBase::Hour, 24)
        );
        assert_eq!(
            "1month".parse::<TimeInterval>().unwrap(),
            TimeInterval::new(IntervalBase::Month, 1)
        );
        assert!(TimeInterval::parse("0Day").is_err());
        assert!(TimeInterval::parse("15").is_err());
        assert!(TimeInterval::parse("Fortnight").is_err());
    }

    #[test]
    fn test_display_interval() {
        assert_eq!(TimeInterval::new(IntervalBase::Month, 1).to_string(), "Month");
        assert_eq!(TimeInterval::new(IntervalBase::Hour, 6).to_string(), "6Hour");
        assert_eq!(IntervalBase::Minute.to_string(), "Min");
    }

    #[test]
    fn test_week_precision_is_day() {
        assert_eq!(IntervalBase::Week.precision(), Precision::Day);
    }
}
