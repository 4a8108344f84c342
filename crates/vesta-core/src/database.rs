//! Logical database partitions.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// A Redis logical database index.
///
/// Key material lives in [`DatabaseId::ADMIN`], away from the churn of
/// ordinary cache data in [`DatabaseId::DEFAULT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatabaseId(pub u8);

impl DatabaseId {
    /// General-purpose cache data (database 0).
    pub const DEFAULT: Self = Self(0);

    /// Administrative data such as data-protection keys (database 1).
    pub const ADMIN: Self = Self(1);

    /// Returns the numeric index sent with `SELECT`.
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }
}

impl Default for DatabaseId {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Display for DatabaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "db{}", self.0)
    }
}

impl From<u8> for DatabaseId {
    fn from(index: u8) -> Self {
        Self(index)
    }
}
