use crate::ident::TsIdent;
use crate::interval::{IntervalBase, TimeInterval};
use crate::position::TimePosition;
use serde::Serialize;

/// Default sentinel for values with no observation.
pub const DEFAULT_MISSING: f64 = -999.0;

/// Values within this distance of the sentinel are treated as missing.
const MISSING_TOLERANCE: f64 = 0.001;

/// Header shared by every time series granularity: period of record,
/// interval, missing value sentinel, units and identification.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesDescriptor {
    ident: TsIdent,
    description: String,
    sequence_id: String,
    date1: Option<TimePosition>,
    date2: Option<TimePosition>,
    date1_original: Option<TimePosition>,
    date2_original: Option<TimePosition>,
    interval: TimeInterval,
    missing: f64,
    units: String,
    units_original: String,
    has_flags: bool,
    dirty: bool,
    data_size: usize,
    genesis: Vec<String>,
}

impl SeriesDescriptor {
    pub fn new(interval: TimeInterval) -> SeriesDescriptor {
        SeriesDescriptor {
            ident: TsIdent {
                interval: interval.to_string(),
                ..TsIdent::default()
            },
            description: String::new(),
            sequence_id: String::new(),
            date1: None,
            date2: None,
            date1_original: None,
            date2_original: None,
            interval,
            missing: DEFAULT_MISSING,
            units: String::new(),
            units_original: String::new(),
            has_flags: false,
            dirty: true,
            data_size: 0,
            genesis: Vec::new(),
        }
    }

    pub fn ident(&self) -> &TsIdent {
        &self.ident
    }

    pub fn set_ident(&mut self, ident: TsIdent) {
        self.ident = ident;
    }

    pub fn alias(&self) -> &str {
        &self.ident.alias
    }

    pub fn set_alias(&mut self, alias: &str) {
        self.ident.alias = alias.to_string();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: &str) {
        self.description = description.to_string();
    }

    pub fn sequence_id(&self) -> &str {
        &self.sequence_id
    }

    pub fn set_sequence_id(&mut self, sequence_id: &str) {
        self.sequence_id = sequence_id.to_string();
    }

    /// First position of the period of record.
    pub fn date1(&self) -> Option<TimePosition> {
        self.date1
    }

    /// Last position of the period of record.
    pub fn date2(&self) -> Option<TimePosition> {
        self.date2
    }

    /// Bounds are set through the store so they take its precision.
    pub(crate) fn set_date1(&mut self, date: TimePosition) {
        self.date1 = Some(date);
    }

    pub(crate) fn set_date2(&mut self, date: TimePosition) {
        self.date2 = Some(date);
    }

    /// Period of the source data, which may be wider than the period of record.
    pub fn date1_original(&self) -> Option<TimePosition> {
        self.date1_original
    }

    pub fn date2_original(&self) -> Option<TimePosition> {
        self.date2_original
    }

    pub fn set_date1_original(&mut self, date: TimePosition) {
        self.date1_original = Some(date);
    }

    pub fn set_date2_original(&mut self, date: TimePosition) {
        self.date2_original = Some(date);
    }

    pub fn interval(&self) -> TimeInterval {
        self.interval
    }

    pub fn interval_base(&self) -> IntervalBase {
        self.interval.base
    }

    pub fn interval_mult(&self) -> u32 {
        self.interval.mult
    }

    /// Changes the multiplier only; the base is fixed by the store.
    /// Multipliers other than 1 are rejected at allocation.
    pub fn set_interval_mult(&mut self, mult: u32) {
        self.interval.mult = mult;
        self.ident.interval = self.interval.to_string();
    }

    pub fn missing(&self) -> f64 {
        self.missing
    }

    /// Set the missing value sentinel. NaN is allowed.
    pub fn set_missing(&mut self, missing: f64) {
        self.missing = missing;
    }

    /// True for NaN and for values within 0.001 of the missing sentinel.
    pub fn is_data_missing(&self, value: f64) -> bool {
        if value.is_nan() {
            return true;
        }
        (value - self.missing).abs() <= MISSING_TOLERANCE
    }

    pub fn units(&self) -> &str {
        &self.units
    }

    pub fn set_units(&mut self, units: &str) {
        self.units = units.to_string();
    }

    pub fn units_original(&self) -> &str {
        &self.units_original
    }

    pub fn set_units_original(&mut self, units: &str) {
        self.units_original = units.to_string();
    }

    pub fn has_flags(&self) -> bool {
        self.has_flags
    }

    /// Request flag storage. Takes effect at the next allocation; use
    /// `allocate_flag_space` on an already allocated store.
    pub fn set_has_flags(&mut self, has_flags: bool) {
        self.has_flags = has_flags;
    }

    /// True when values changed since derived statistics were last computed.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }

    /// Number of positions in the period of record, computed at allocation.
    pub fn data_size(&self) -> usize {
        self.data_size
    }

    pub(crate) fn set_data_size(&mut self, size: usize) {
        self.data_size = size;
    }

    /// History of how the series was created and modified.
    pub fn genesis(&self) -> &[String] {
        &self.genesis
    }

    pub fn add_to_genesis(&mut self, entry: &str) {
        self.genesis.push(entry.to_string());
    }
}
