//! Account identities for claimants and providers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::TypesError;

/// The identity of a ledger participant (a data/model owner or a cloud provider).
///
/// Identities are opaque account strings issued by the execution environment.
/// The registry only compares them for equality and orders them for snapshots.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Identity(String);

impl Identity {
    /// Create an identity from a raw account string without validation.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Create an identity, rejecting empty or whitespace-bearing strings.
    pub fn parse(raw: impl Into<String>) -> Result<Self, TypesError> {
        let id = Self(raw.into());
        if id.is_valid() {
            Ok(id)
        } else {
            Err(TypesError::InvalidIdentity(id.0))
        }
    }

    /// Return the raw account string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this identity can act on the ledger.
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty() && !self.0.chars().any(char::is_whitespace)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Identity {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<&str> for Identity {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
