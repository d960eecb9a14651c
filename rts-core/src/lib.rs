pub mod data;
pub mod date_range;
pub mod descriptor;
pub mod error;
pub mod granularity;
pub mod ident;
pub mod interval;
pub mod legend;
pub mod position;
pub mod store;
