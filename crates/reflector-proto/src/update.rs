//! Outbound attribute updates.

use std::collections::HashMap;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::{AttributeHandle, FederateHandle, ObjectInstanceHandle};

/// Attribute values for one object instance, ready for delivery.
///
/// Built fresh per request and handed to the delivery layer; it has no
/// identity of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeUpdate {
    /// Instance the values belong to.
    pub object: ObjectInstanceHandle,
    /// User-supplied tag (empty for infrastructure updates).
    pub tag: Bytes,
    /// Encoded value per attribute.
    pub attributes: HashMap<AttributeHandle, Bytes>,
    /// Who produced the update. [`FederateHandle::RTI`] for reflections.
    pub source: FederateHandle,
}

impl AttributeUpdate {
    /// Create an update authored by a federate.
    pub fn new(
        object: ObjectInstanceHandle,
        tag: Bytes,
        attributes: HashMap<AttributeHandle, Bytes>,
        source: FederateHandle,
    ) -> Self {
        Self { object, tag, attributes, source }
    }

    /// Create an infrastructure-generated update: empty tag, RTI source.
    pub fn from_rti(
        object: ObjectInstanceHandle,
        attributes: HashMap<AttributeHandle, Bytes>,
    ) -> Self {
        Self { object, tag: Bytes::new(), attributes, source: FederateHandle::RTI }
    }

    /// True if the RTI, not a federate, produced this update.
    pub fn is_from_rti(&self) -> bool {
        self.source.is_rti()
    }

    /// Encoded value of one attribute, if present.
    pub fn value(&self, handle: AttributeHandle) -> Option<&Bytes> {
        self.attributes.get(&handle)
    }
}
