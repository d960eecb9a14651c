use crate::position::TimePosition;
use serde::{Deserialize, Serialize};

/// A single value read from a time series together with its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TsData {
    pub date: TimePosition,
    pub value: f64,
    pub units: String,
    /// Quality flag; empty when unset or when the series carries no flags.
    pub flag: String,
    /// Duration of the value in interval units; 0 for regular series.
    pub duration: i32,
}
