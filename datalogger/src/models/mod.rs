pub mod accumulator;
pub mod config;
pub mod errors;
pub(crate) mod http_client;
pub mod listeners;
pub mod payload;
pub mod scheduler;
pub mod ui;
