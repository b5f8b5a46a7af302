//! Helpers shared by the tests of the workspace crates.

pub mod fixtures;
pub mod manual_source;

pub use manual_source::{ManualSensorSource, RegistrationRecord};
