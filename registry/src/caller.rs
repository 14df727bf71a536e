//! Caller identity as established by the execution environment.

use ppml_types::Identity;
use std::fmt;

use crate::RegistryError;

/// An identity the execution environment has already authenticated.
///
/// Claimants and providers never name themselves in a registry call; the
/// caller value is threaded into every state-changing operation and selects
/// the ledger or record the call may touch.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AuthenticatedCaller {
    identity: Identity,
}

impl AuthenticatedCaller {
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Reject callers the environment could not attach a usable identity to.
    pub(crate) fn ensure_usable(&self) -> Result<(), RegistryError> {
        if self.identity.is_valid() {
            Ok(())
        } else {
            Err(RegistryError::Unauthorized {
                caller: self.identity.to_string(),
                reason: "caller has no usable identity",
            })
        }
    }
}

impl fmt::Display for AuthenticatedCaller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identity)
    }
}
