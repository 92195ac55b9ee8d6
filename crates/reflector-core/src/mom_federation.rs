//! MOM federation
//!
//! Links the object instance that represents a federation to the management
//! state behind it, and turns that state into attribute updates on request.
//!
//! ## Responsibilities
//!
//! - Federate registry: records added on join, removed on resign, cleared on
//!   teardown
//! - Update generation: resolve each requested handle and collect the encoded
//!   values into one [`AttributeUpdate`] sourced from the RTI
//!
//! ## Design
//!
//! - Single owner: callers serialize mutation and generation through one
//!   owner, so an update always sees a consistent federate set
//! - Per-handle failures: a bad handle is reported next to the good values,
//!   only an unknown protocol version aborts the call

use std::{collections::HashMap, sync::Arc};

use reflector_proto::{
    AttributeHandleSet, AttributeUpdate, FederateHandle, ProtocolVersion, codec_for,
};

use crate::{
    AttributeError, DiagnosticSink, FederateRecord, Federation, FederationObject,
    FederationProperty, ReflectError, TracingSink,
};

/// Result of one update generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reflection {
    /// Update holding every attribute that resolved.
    pub update: AttributeUpdate,
    /// Handles that did not resolve, ordered by handle.
    pub failures: Vec<AttributeError>,
}

impl Reflection {
    /// True if every requested handle resolved.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A federation's management state plus the object that represents it.
pub struct MomFederation<S = TracingSink>
where
    S: DiagnosticSink,
{
    /// Federation metadata (name, RTI identity)
    federation: Federation,
    /// Joined federates by handle
    federates: HashMap<FederateHandle, Arc<FederateRecord>>,
    /// Object instance updates are addressed to
    object: FederationObject,
    /// Where unsupported-property diagnostics go
    sink: S,
}

impl MomFederation<TracingSink> {
    /// Create a MOM federation that reports diagnostics through `tracing`.
    pub fn new(federation: Federation, object: FederationObject) -> Self {
        Self::with_sink(federation, object, TracingSink)
    }
}

impl<S> MomFederation<S>
where
    S: DiagnosticSink,
{
    /// Create a MOM federation with a custom diagnostic sink.
    pub fn with_sink(federation: Federation, object: FederationObject, sink: S) -> Self {
        Self { federation, federates: HashMap::new(), object, sink }
    }

    /// Federation metadata.
    pub fn federation(&self) -> &Federation {
        &self.federation
    }

    /// The object instance representing the federation.
    pub fn object(&self) -> &FederationObject {
        &self.object
    }

    /// Register a federate, replacing any record with the same handle.
    ///
    /// Returns the replaced record.
    pub fn add_federate(&mut self, record: Arc<FederateRecord>) -> Option<Arc<FederateRecord>> {
        tracing::debug!(federate = %record.handle, name = %record.name, "federate added");
        self.federates.insert(record.handle, record)
    }

    /// Remove a federate. Returns `None` if it was not registered.
    pub fn remove_federate(&mut self, handle: FederateHandle) -> Option<Arc<FederateRecord>> {
        let removed = self.federates.remove(&handle);
        if removed.is_some() {
            tracing::debug!(federate = %handle, "federate removed");
        }
        removed
    }

    /// Look up a federate.
    pub fn federate(&self, handle: FederateHandle) -> Option<&Arc<FederateRecord>> {
        self.federates.get(&handle)
    }

    /// Number of registered federates.
    pub fn federate_count(&self) -> usize {
        self.federates.len()
    }

    /// Iterate over registered federates in unspecified order.
    pub fn federates(&self) -> impl Iterator<Item = &Arc<FederateRecord>> {
        self.federates.values()
    }

    /// Drop every federate record. Used on federation teardown.
    pub fn clear(&mut self) {
        tracing::debug!(count = self.federates.len(), "clearing federates");
        self.federates.clear();
    }

    /// Build an update carrying the current values of `handles`.
    ///
    /// The update targets the federation's object instance, has an empty tag,
    /// and names [`FederateHandle::RTI`] as its source. Handles that cannot be
    /// resolved are returned in [`Reflection::failures`] instead of the
    /// update.
    ///
    /// # Errors
    ///
    /// Returns `ReflectError::Configuration` if `version` is not a known
    /// protocol version. Nothing is resolved in that case.
    pub fn generate_update(
        &self,
        version: ProtocolVersion,
        handles: &AttributeHandleSet,
    ) -> Result<Reflection, ReflectError> {
        let codec = codec_for(version).map_err(ReflectError::Configuration)?;

        let mut attributes = HashMap::with_capacity(handles.len());
        let mut failures = Vec::new();

        for &handle in handles {
            let Some(property) = FederationProperty::from_handle(handle) else {
                failures.push(AttributeError::UnknownAttribute { handle });
                continue;
            };

            if !self.object.defines(handle) {
                failures.push(AttributeError::UndefinedForAggregate { handle, property });
                continue;
            }

            match property.resolve(codec, &self.federation, &self.sink) {
                Ok(value) => {
                    attributes.insert(handle, value);
                },
                Err(source) => {
                    failures.push(AttributeError::Encoding { handle, property, source });
                },
            }
        }

        failures.sort_by_key(AttributeError::handle);

        if !failures.is_empty() {
            tracing::debug!(
                federation = %self.federation.name(),
                %version,
                failed = failures.len(),
                "some requested attributes did not resolve"
            );
        }

        let update = AttributeUpdate::from_rti(self.object.instance_handle(), attributes);
        Ok(Reflection { update, failures })
    }
}

impl<S> std::fmt::Debug for MomFederation<S>
where
    S: DiagnosticSink,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MomFederation")
            .field("federation", &self.federation.name())
            .field("object", &self.object.instance_handle())
            .field("federate_count", &self.federates.len())
            .finish()
    }
}
