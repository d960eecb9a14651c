use crate::error::{Result, TsError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies a time series: `Location.Source.DataType.Interval[.Scenario]`,
/// optionally followed by `~InputType~InputName`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TsIdent {
    pub location: String,
    pub source: String,
    pub data_type: String,
    pub interval: String,
    pub scenario: String,
    pub input_type: String,
    pub input_name: String,
    /// Short name used in legends and lookups; not part of the identifier text.
    pub alias: String,
}

impl TsIdent {
    pub fn new(location: &str, source: &str, data_type: &str, interval: &str) -> TsIdent {
        TsIdent {
            location: location.to_string(),
            source: source.to_string(),
            data_type: data_type.to_string(),
            interval: interval.to_string(),
            ..TsIdent::default()
        }
    }

    /// Identifier without the input type and name.
    pub fn main_identifier(&self) -> String {
        let mut text = format!(
            "{}.{}.{}.{}",
            self.location, self.source, self.data_type, self.interval
        );
        if !self.scenario.is_empty() {
            text.push('.');
            text.push_str(&self.scenario);
        }
        text
    }
}

impl fmt::Display for TsIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.main_identifier())?;
        if !self.input_type.is_empty() {
            write!(f, "~{}", self.input_type)?;
            if !self.input_name.is_empty() {
                write!(f, "~{}", self.input_name)?;
            }
        }
        Ok(())
    }
}

impl FromStr for TsIdent {
    type Err = TsError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.trim().split('~');
        let main = parts.next().unwrap_or_default();
        let input_type = parts.next().unwrap_or_default().to_string();
        let input_name = parts.next().unwrap_or_default().to_string();
        let fields: Vec<&str> = main.split('.').collect();
        if !(4..=5).contains(&fields.len()) || fields[0].is_empty() {
            return Err(TsError::InvalidIdentifier(format!(
                "\"{s}\" is not Location.Source.DataType.Interval[.Scenario]"
            )));
        }
        Ok(TsIdent {
            location: fields[0].to_string(),
            source: fields[1].to_string(),
            data_type: fields[2].to_string(),
            interval: fields[3].to_string(),
            scenario: fields.get(4).map(|s| s.to_string()).unwrap_or_default(),
            input_type,
            input_name,
            alias: String::new(),
        })
    }
}
