//! Records: rows of named scalar values, and their CSV storage.

pub mod csv;
pub mod error;
mod value;

pub use crate::value::{Record, Value};
