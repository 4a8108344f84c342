//! # Vesta Core
//!
//! Core types and error definitions shared by every Vesta crate:
//! the unified [`VestaError`], logical database partitions and
//! tracing initialization.

pub mod database;
pub mod error;
pub mod result;
pub mod telemetry;

pub use database::*;
pub use error::*;
pub use result::*;
