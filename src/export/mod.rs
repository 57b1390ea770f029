//! Export of the collected record set.

pub mod csv;

pub use csv::{from_csv, to_csv};
