//! Library half of the `drg` binary: configuration and logging.

pub mod config;
pub mod logging;
