//! Opaque identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one attribute of an object class.
///
/// Equality and hashing follow the underlying value, so two handles built from
/// the same integer are interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeHandle(u32);

impl AttributeHandle {
    /// Wrap a raw attribute identifier.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The underlying identifier.
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for AttributeHandle {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for AttributeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies an object instance in the shared object model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectInstanceHandle(u32);

impl ObjectInstanceHandle {
    /// Wrap a raw instance identifier.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The underlying identifier.
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ObjectInstanceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a joined federate, or the RTI itself.
///
/// The value [`FederateHandle::RTI`] is reserved: it marks updates generated by
/// the infrastructure. [`FederateHandle::new`] refuses it, so no joined
/// federate can carry that identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FederateHandle(u32);

impl FederateHandle {
    /// Source identity of infrastructure-generated updates.
    pub const RTI: Self = Self(u32::MAX);

    /// Wrap a raw federate identifier.
    ///
    /// Returns `None` for the reserved RTI value.
    pub const fn new(raw: u32) -> Option<Self> {
        if raw == Self::RTI.0 { None } else { Some(Self(raw)) }
    }

    /// The underlying identifier.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// True if this is the RTI sentinel.
    pub const fn is_rti(self) -> bool {
        self.0 == Self::RTI.0
    }
}

impl fmt::Display for FederateHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_rti() { f.write_str("RTI") } else { write!(f, "{}", self.0) }
    }
}
