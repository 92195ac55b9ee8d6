//! Reflector core.
//!
//! Computes the current values of the federation's management attributes and
//! packages them into an [`AttributeUpdate`] addressed to the federation's
//! object instance. Never performs I/O; the caller delivers the result.
//!
//! ## Architecture
//!
//! ```text
//! MomFederation::generate_update(version, handles)
//!   ├─ codec_for(version)              (fails fast on unknown tags)
//!   ├─ FederationProperty::from_handle (unknown -> AttributeError)
//!   ├─ FederationObject::defines       (undefined -> AttributeError)
//!   └─ FederationProperty::resolve     (value or placeholder + trace)
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod diagnostics;
mod error;
mod federation;
mod mom_federation;
mod property;

pub use diagnostics::{DiagnosticSink, NoopSink, TracingSink};
pub use error::{AttributeError, ReflectError};
pub use federation::{FederateRecord, Federation, FederationObject, RTI_NAME, RTI_VERSION};
pub use mom_federation::{MomFederation, Reflection};
pub use property::FederationProperty;
pub use reflector_proto::{
    AttributeHandle, AttributeHandleSet, AttributeUpdate, FederateHandle, ObjectInstanceHandle,
    ProtocolVersion,
};
