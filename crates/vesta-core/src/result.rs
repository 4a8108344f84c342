//! Result type aliases for Vesta.

use crate::VestaError;

/// A specialized `Result` type for Vesta operations.
pub type VestaResult<T> = Result<T, VestaError>;
