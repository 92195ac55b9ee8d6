//! Fuzz target for [`MomFederation`] update generation
//!
//! Arbitrary registry mutations interleaved with update requests carrying
//! arbitrary handles and version tags.
//!
//! # Invariants
//!
//! - Unknown version tag -> error, never a partial update
//! - Every requested handle is either resolved or reported, never both
//! - Updates always target the federation object with the RTI as source
//! - Generation never changes the federate registry

#![no_main]

use std::sync::Arc;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use reflector_core::{
    AttributeHandleSet, FederateHandle, FederateRecord, Federation, FederationObject,
    MomFederation, NoopSink, ObjectInstanceHandle, ProtocolVersion, ReflectError,
};
use reflector_proto::codec_for;

#[derive(Debug, Arbitrary)]
enum Event {
    Join { raw: u32 },
    Resign { raw: u32 },
    Clear,
    Reflect { tag: u8, handles: Vec<u16> },
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    name: String,
    object: u32,
    events: Vec<Event>,
}

fuzz_target!(|input: FuzzInput| {
    let object = ObjectInstanceHandle::new(input.object);
    let mut mom = MomFederation::with_sink(
        Federation::new(input.name),
        FederationObject::new(object),
        NoopSink,
    );

    for event in input.events {
        match event {
            Event::Join { raw } => {
                if let Some(handle) = FederateHandle::new(raw) {
                    mom.add_federate(Arc::new(FederateRecord::new(handle, "fuzz", "fuzz")));
                }
            },
            Event::Resign { raw } => {
                if let Some(handle) = FederateHandle::new(raw) {
                    mom.remove_federate(handle);
                }
            },
            Event::Clear => mom.clear(),
            Event::Reflect { tag, handles } => {
                let version = ProtocolVersion::from_tag(tag);
                let requested = AttributeHandleSet::from_raw(handles.into_iter().map(u32::from));
                let before = mom.federate_count();

                match mom.generate_update(version, &requested) {
                    Ok(reflection) => {
                        assert!(codec_for(version).is_ok());
                        assert_eq!(reflection.update.object, object);
                        assert!(reflection.update.is_from_rti());
                        assert!(reflection.update.tag.is_empty());

                        for handle in &requested {
                            let resolved = reflection.update.attributes.contains_key(handle);
                            let failed =
                                reflection.failures.iter().any(|f| f.handle() == *handle);
                            assert!(resolved != failed, "handle {handle} double or missing");
                        }
                    },
                    Err(ReflectError::Configuration(_)) => {
                        assert!(codec_for(version).is_err());
                    },
                }

                assert_eq!(mom.federate_count(), before);
            },
        }
    }
});
