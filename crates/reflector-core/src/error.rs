//! Reflection error types.

use reflector_proto::{AttributeHandle, EncodingError};
use thiserror::Error;

use crate::FederationProperty;

/// Errors that abort a whole `generate_update` call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReflectError {
    /// The deployment handed us a protocol version the codec table does not
    /// know. Raised before any attribute is resolved.
    #[error("configuration error: {0}")]
    Configuration(#[source] EncodingError),
}

/// Per-attribute failures, collected alongside the successful values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeError {
    /// The handle does not name any federation property.
    #[error("unknown attribute: {handle}")]
    UnknownAttribute {
        /// The requested handle.
        handle: AttributeHandle,
    },

    /// The property exists, but the federation's object class does not
    /// define it.
    #[error("attribute {handle} ({property}) is not defined for this federation")]
    UndefinedForAggregate {
        /// The requested handle.
        handle: AttributeHandle,
        /// The property it maps to.
        property: FederationProperty,
    },

    /// The property value could not be encoded.
    #[error("failed to encode attribute {handle} ({property}): {source}")]
    Encoding {
        /// The requested handle.
        handle: AttributeHandle,
        /// The property being encoded.
        property: FederationProperty,
        /// Underlying codec failure.
        #[source]
        source: EncodingError,
    },
}

impl AttributeError {
    /// The handle this failure belongs to.
    pub fn handle(&self) -> AttributeHandle {
        match self {
            Self::UnknownAttribute { handle }
            | Self::UndefinedForAggregate { handle, .. }
            | Self::Encoding { handle, .. } => *handle,
        }
    }

    /// Returns true if retrying with a corrected handle set could succeed.
    ///
    /// Handle mistakes are the caller's to fix. Encoding failures depend on
    /// the value, not the request.
    pub fn is_request_error(&self) -> bool {
        match self {
            Self::UnknownAttribute { .. } | Self::UndefinedForAggregate { .. } => true,
            Self::Encoding { .. } => false,
        }
    }
}
