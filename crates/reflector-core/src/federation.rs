//! Federation state read by the property accessors.

use reflector_proto::{AttributeHandle, AttributeHandleSet, FederateHandle, ObjectInstanceHandle};

use crate::FederationProperty;

/// Product name reported by the `RtiVersion` property unless overridden.
pub const RTI_NAME: &str = "Reflector";

/// Product version reported by the `RtiVersion` property unless overridden.
pub const RTI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Management metadata of a federation execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Federation {
    name: String,
    rti_name: String,
    rti_version: String,
}

impl Federation {
    /// Create federation metadata with the default RTI identity.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rti_name: RTI_NAME.to_string(),
            rti_version: RTI_VERSION.to_string(),
        }
    }

    /// Override the RTI identity reported to federates.
    #[must_use]
    pub fn with_rti(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.rti_name = name.into();
        self.rti_version = version.into();
        self
    }

    /// Federation execution name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `"<rti name> v<rti version>"`.
    pub fn rti_version(&self) -> String {
        format!("{} v{}", self.rti_name, self.rti_version)
    }
}

/// The object instance that represents the federation in the object model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FederationObject {
    handle: ObjectInstanceHandle,
    /// Attributes declared by the instance's object class.
    class_attributes: AttributeHandleSet,
}

impl FederationObject {
    /// An instance whose class declares every federation property.
    pub fn new(handle: ObjectInstanceHandle) -> Self {
        let class_attributes = FederationProperty::ALL.iter().map(|p| p.handle()).collect();
        Self { handle, class_attributes }
    }

    /// An instance whose class declares only `class_attributes`.
    pub fn with_attributes(
        handle: ObjectInstanceHandle,
        class_attributes: AttributeHandleSet,
    ) -> Self {
        Self { handle, class_attributes }
    }

    /// Handle used to address updates for this instance.
    pub fn instance_handle(&self) -> ObjectInstanceHandle {
        self.handle
    }

    /// True if the instance's class declares `attribute`.
    pub fn defines(&self, attribute: AttributeHandle) -> bool {
        self.class_attributes.contains(attribute)
    }
}

/// Management record of one joined federate.
///
/// Created by join handling and shared with the registry; the registry never
/// mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FederateRecord {
    /// Federate handle assigned at join.
    pub handle: FederateHandle,
    /// Name the federate joined with.
    pub name: String,
    /// Federate type string supplied at join.
    pub federate_type: String,
}

impl FederateRecord {
    /// Create a federate record.
    pub fn new(
        handle: FederateHandle,
        name: impl Into<String>,
        federate_type: impl Into<String>,
    ) -> Self {
        Self { handle, name: name.into(), federate_type: federate_type.into() }
    }
}
