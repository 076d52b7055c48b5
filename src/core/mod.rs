//! Core functionality for cellframe.
//!
//! Configuration shared by the library and the command-line interface.

mod config;

pub use config::{AssetsConfig, Config};
