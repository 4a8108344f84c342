//! # Vesta Config
//!
//! Configuration management for Vesta.
//! Supports layered configuration from files and environment variables,
//! validation that fails fast, and runtime refresh.

mod app_config;
mod loader;
mod validation;

pub use app_config::*;
pub use loader::*;
pub use validation::*;
