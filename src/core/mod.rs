//! Shared core pieces used across raster, filter, brush and input modules.
//!
//! Platform-agnostic: no windowing or GPU dependencies.

pub mod config;
pub mod errors;

pub use config::EngineConfig;
pub use errors::CoreError;
