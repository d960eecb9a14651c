//! Series registry handed to commands instead of a process-wide manager.

use log::debug;
use rts_core::store::TimeSeries;
use rts_utils::dates::YearType;
use std::collections::BTreeMap;

/// Everything a command needs besides its arguments: the series built so
/// far, keyed by name, and the year type used for annual grouping.
#[derive(Debug, Default)]
pub struct Context {
    pub year_type: YearType,
    series: BTreeMap<String, Box<dyn TimeSeries>>,
}

impl Context {
    pub fn new(year_type: YearType) -> Context {
        Context {
            year_type,
            series: BTreeMap::new(),
        }
    }

    /// Register a series, replacing any previous series with the same name.
    pub fn insert(&mut self, name: &str, series: Box<dyn TimeSeries>) {
        if self.series.insert(name.to_string(), series).is_some() {
            debug!("Replaced series \"{name}\"");
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn TimeSeries> {
        self.series.get(name).map(|series| series.as_ref())
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn TimeSeries + 'static)> {
        self.series.get_mut(name).map(|series| series.as_mut())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }
}
