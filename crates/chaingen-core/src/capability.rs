//! Explicit capability presence.

use crate::error::{CodegenError, Result};
use crate::protocol::ProtocolName;

/// A capability slot vended for a protocol family.
///
/// `Unsupported` means "not applicable to this family", never "not loaded
/// yet".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capability<T> {
    Present(T),
    Unsupported,
}

impl<T> Capability<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, Capability::Present(_))
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, Capability::Unsupported)
    }

    pub fn present(self) -> Option<T> {
        match self {
            Capability::Present(value) => Some(value),
            Capability::Unsupported => None,
        }
    }

    pub fn as_ref(&self) -> Capability<&T> {
        match self {
            Capability::Present(value) => Capability::Present(value),
            Capability::Unsupported => Capability::Unsupported,
        }
    }

    pub fn map<U, F>(self, f: F) -> Capability<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Capability::Present(value) => Capability::Present(f(value)),
            Capability::Unsupported => Capability::Unsupported,
        }
    }

    /// Unwrap a capability the caller cannot proceed without.
    pub fn require(self, protocol: ProtocolName, capability: &'static str) -> Result<T> {
        match self {
            Capability::Present(value) => Ok(value),
            Capability::Unsupported => Err(CodegenError::UnsupportedCapability {
                protocol: protocol.to_string(),
                capability,
            }),
        }
    }
}

impl<T> From<Option<T>> for Capability<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Capability::Present(v),
            None => Capability::Unsupported,
        }
    }
}
