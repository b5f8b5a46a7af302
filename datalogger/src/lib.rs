//! # Crate datalogger
//!
//! ## datalogger
//!
//! The `datalogger` crate runs a sensor sweep experiment: it records accelerometer and gyroscope
//! readings for every combination of a list of sampling frequencies and magnetometer states,
//! and uploads everything it recorded to a remote server as a single JSON document.
//!
//! Features include:
//! - A tick driven sweep scheduler that registers and unregisters sensor listeners for each
//!   (magnetometer state, frequency) cell and reports progress.
//! - An in-memory accumulator that labels every reading with the cell it was recorded in and
//!   drops readings that arrive outside a registration window.
//! - A one-shot HTTP upload with a shared API key.
//! - UI notifications (progress, notices, dialogs) delivered over a channel to whoever owns the UI.
//! - A simulated sensor source generating noisy readings, for demos and tests.
//!
//! **NOTE** Failed uploads are not retried and the recorded data is dropped.

pub mod adapters;
pub(crate) mod constants;
mod helpers;
pub mod models;
pub mod ports;
pub mod services;

pub use models::config::DataLoggerConfig;
pub use models::errors::DataLoggerError;
pub use models::ui::{ui_channel, Notice, UiEvent, UiHandle};
pub use services::DataLogger;
