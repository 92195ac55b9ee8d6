//! Federation properties and their accessors.
//!
//! Every property maps to exactly one [`Accessor`] through an exhaustive
//! `match`, so a new variant does not compile until it has one.

use std::{borrow::Cow, fmt};

use bytes::Bytes;
use reflector_proto::{AttributeHandle, EncodingError, StringCodec};

use crate::{DiagnosticSink, Federation};

/// The management attributes of the federation object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FederationProperty {
    /// Name of the federation execution.
    FederationName,
    /// Handles of the joined federates.
    FederatesInFederation,
    /// RTI product name and version.
    RtiVersion,
    /// Designator of the MIM module in use.
    MimDesignator,
    /// Designators of the FOM modules in use.
    FomModuleDesignatorList,
    /// Current FOM document data.
    CurrentFdd,
    /// FED file identifier (HLA 1.3).
    FedId,
    /// Name of the logical time implementation.
    TimeImplementationName,
    /// Label of the last federation save.
    LastSaveName,
    /// Logical time of the last federation save.
    LastSaveTime,
    /// Label of the next scheduled save.
    NextSaveName,
    /// Logical time of the next scheduled save.
    NextSaveTime,
    /// Auto-provide switch.
    AutoProvide,
    /// Convey-region-designator-sets switch.
    ConveyRegionDesignatorSets,
}

/// How a property's value is produced.
#[derive(Clone, Copy)]
pub(crate) enum Accessor {
    /// Read from the federation and encode as a string.
    Text(for<'a> fn(&'a Federation) -> Cow<'a, str>),
    /// Known property without an implementation yet.
    NotYetSupported,
}

fn federation_name(federation: &Federation) -> Cow<'_, str> {
    Cow::Borrowed(federation.name())
}

fn rti_version(federation: &Federation) -> Cow<'_, str> {
    Cow::Owned(federation.rti_version())
}

impl FederationProperty {
    /// Every property, in handle order.
    pub const ALL: [Self; 14] = [
        Self::FederationName,
        Self::FederatesInFederation,
        Self::RtiVersion,
        Self::MimDesignator,
        Self::FomModuleDesignatorList,
        Self::CurrentFdd,
        Self::FedId,
        Self::TimeImplementationName,
        Self::LastSaveName,
        Self::LastSaveTime,
        Self::NextSaveName,
        Self::NextSaveTime,
        Self::AutoProvide,
        Self::ConveyRegionDesignatorSets,
    ];

    /// The attribute handle this property is published under.
    pub const fn handle(self) -> AttributeHandle {
        let raw = match self {
            Self::FederationName => 1,
            Self::FederatesInFederation => 2,
            Self::RtiVersion => 3,
            Self::MimDesignator => 4,
            Self::FomModuleDesignatorList => 5,
            Self::CurrentFdd => 6,
            Self::FedId => 7,
            Self::TimeImplementationName => 8,
            Self::LastSaveName => 9,
            Self::LastSaveTime => 10,
            Self::NextSaveName => 11,
            Self::NextSaveTime => 12,
            Self::AutoProvide => 13,
            Self::ConveyRegionDesignatorSets => 14,
        };
        AttributeHandle::new(raw)
    }

    /// Look up the property published under `handle`.
    pub fn from_handle(handle: AttributeHandle) -> Option<Self> {
        Self::ALL.into_iter().find(|property| property.handle() == handle)
    }

    /// Canonical property name, as used in placeholders and diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::FederationName => "FederationName",
            Self::FederatesInFederation => "FederatesInFederation",
            Self::RtiVersion => "RtiVersion",
            Self::MimDesignator => "MimDesignator",
            Self::FomModuleDesignatorList => "FomModuleDesignatorList",
            Self::CurrentFdd => "CurrentFDD",
            Self::FedId => "FedID",
            Self::TimeImplementationName => "TimeImplementationName",
            Self::LastSaveName => "LastSaveName",
            Self::LastSaveTime => "LastSaveTime",
            Self::NextSaveName => "NextSaveName",
            Self::NextSaveTime => "NextSaveTime",
            Self::AutoProvide => "AutoProvide",
            Self::ConveyRegionDesignatorSets => "ConveyRegionDesignatorSets",
        }
    }

    pub(crate) const fn accessor(self) -> Accessor {
        match self {
            Self::FederationName => Accessor::Text(federation_name),
            Self::RtiVersion => Accessor::Text(rti_version),
            // TODO: encode the joined federate handles once the codec layer
            // has a handle-list encoding per version.
            Self::FederatesInFederation => Accessor::NotYetSupported,
            Self::MimDesignator
            | Self::FomModuleDesignatorList
            | Self::CurrentFdd
            | Self::FedId
            | Self::TimeImplementationName
            | Self::LastSaveName
            | Self::LastSaveTime
            | Self::NextSaveName
            | Self::NextSaveTime
            | Self::AutoProvide
            | Self::ConveyRegionDesignatorSets => Accessor::NotYetSupported,
        }
    }

    /// True if the property has a real value rather than a placeholder.
    pub fn is_supported(self) -> bool {
        matches!(self.accessor(), Accessor::Text(_))
    }

    /// Text sent in place of a value the RTI cannot provide yet.
    pub fn placeholder(self) -> String {
        format!("property [{}] not yet supported", self.name())
    }

    /// Produce the encoded current value of this property.
    ///
    /// Unsupported properties resolve to their [`placeholder`](Self::placeholder)
    /// and report through `sink`; they never fail.
    pub fn resolve<S>(
        self,
        codec: &dyn StringCodec,
        federation: &Federation,
        sink: &S,
    ) -> Result<Bytes, EncodingError>
    where
        S: DiagnosticSink + ?Sized,
    {
        match self.accessor() {
            Accessor::Text(read) => codec.encode_to_bytes(&read(federation)),
            Accessor::NotYetSupported => {
                sink.trace(&format!(
                    "Requested MOM property that isn't supported yet: Federation.{}",
                    self.name()
                ));
                codec.encode_to_bytes(&self.placeholder())
            },
        }
    }
}

impl fmt::Display for FederationProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
