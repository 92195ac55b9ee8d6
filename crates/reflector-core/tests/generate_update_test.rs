//! Update generation tests

use std::sync::{Arc, Mutex};

use proptest::prelude::*;
use reflector_core::{
    AttributeError, AttributeHandle, AttributeHandleSet, DiagnosticSink, FederateHandle,
    FederateRecord, Federation, FederationObject, FederationProperty, MomFederation,
    ObjectInstanceHandle, ProtocolVersion, ReflectError,
};
use reflector_proto::{EncodingError, decode_string};

const OBJECT: ObjectInstanceHandle = ObjectInstanceHandle::new(0x4242);

// Sink that keeps every diagnostic for later inspection
#[derive(Clone, Default)]
struct RecordingSink(Arc<Mutex<Vec<String>>>);

impl RecordingSink {
    fn messages(&self) -> Vec<String> {
        self.0.lock().expect("mutex poisoned").clone()
    }
}

impl DiagnosticSink for RecordingSink {
    fn trace(&self, message: &str) {
        self.0.lock().expect("mutex poisoned").push(message.to_string());
    }
}

fn mom_with_sink(name: &str) -> (MomFederation<RecordingSink>, RecordingSink) {
    let sink = RecordingSink::default();
    let mom = MomFederation::with_sink(
        Federation::new(name).with_rti("Reflector", "1.0.0"),
        FederationObject::new(OBJECT),
        sink.clone(),
    );
    (mom, sink)
}

fn handles(properties: &[FederationProperty]) -> AttributeHandleSet {
    properties.iter().map(|p| p.handle()).collect()
}

#[test]
fn empty_request_yields_empty_update() {
    let (mom, sink) = mom_with_sink("Empty");

    let reflection =
        mom.generate_update(ProtocolVersion::IEEE1516E, &AttributeHandleSet::new()).unwrap();

    assert!(reflection.update.attributes.is_empty());
    assert!(reflection.failures.is_empty());
    assert!(sink.messages().is_empty());
}

#[test]
fn update_is_addressed_and_sourced_from_rti() {
    let (mom, _sink) = mom_with_sink("Addressed");

    let reflection = mom
        .generate_update(ProtocolVersion::HLA13, &handles(&[FederationProperty::FederationName]))
        .unwrap();

    assert_eq!(reflection.update.object, OBJECT);
    assert!(reflection.update.tag.is_empty());
    assert_eq!(reflection.update.source, FederateHandle::RTI);
    assert!(reflection.update.is_from_rti());
}

#[test]
fn federation_name_decodes_for_every_version() {
    let (mom, _sink) = mom_with_sink("Ünïcode Federation \u{1F30D}");
    let requested = handles(&[FederationProperty::FederationName]);

    for version in ProtocolVersion::KNOWN {
        let reflection = mom.generate_update(version, &requested).unwrap();
        let value = reflection.update.value(FederationProperty::FederationName.handle()).unwrap();

        assert_eq!(decode_string(version, value).unwrap(), "Ünïcode Federation \u{1F30D}");
    }
}

#[test]
fn rti_version_is_reported() {
    let (mom, sink) = mom_with_sink("Versioned");

    let reflection = mom
        .generate_update(ProtocolVersion::IEEE1516, &handles(&[FederationProperty::RtiVersion]))
        .unwrap();
    let value = reflection.update.value(FederationProperty::RtiVersion.handle()).unwrap();

    assert_eq!(decode_string(ProtocolVersion::IEEE1516, value).unwrap(), "Reflector v1.0.0");
    assert!(sink.messages().is_empty());
}

#[test]
fn unsupported_property_yields_placeholder_and_trace() {
    let (mom, sink) = mom_with_sink("Placeholder");

    let reflection = mom
        .generate_update(ProtocolVersion::IEEE1516E, &handles(&[FederationProperty::AutoProvide]))
        .unwrap();
    let value = reflection.update.value(FederationProperty::AutoProvide.handle()).unwrap();
    let text = decode_string(ProtocolVersion::IEEE1516E, value).unwrap();

    assert_eq!(text, "property [AutoProvide] not yet supported");
    assert!(reflection.is_complete());
    assert_eq!(
        sink.messages(),
        vec!["Requested MOM property that isn't supported yet: Federation.AutoProvide"]
    );
}

#[test]
fn every_unsupported_placeholder_names_its_property() {
    let (mom, _sink) = mom_with_sink("AllProperties");
    let requested = handles(&FederationProperty::ALL);

    let reflection = mom.generate_update(ProtocolVersion::HLA13, &requested).unwrap();
    assert_eq!(reflection.update.attributes.len(), FederationProperty::ALL.len());

    for property in FederationProperty::ALL.into_iter().filter(|p| !p.is_supported()) {
        let value = reflection.update.value(property.handle()).unwrap();
        let text = decode_string(ProtocolVersion::HLA13, value).unwrap();
        assert!(text.contains(property.name()), "{text:?} should name {property}");
    }
}

#[test]
fn unknown_handle_is_reported_without_aborting_others() {
    let (mom, _sink) = mom_with_sink("Mixed");
    let mut requested = handles(&[FederationProperty::FederationName]);
    requested.insert(AttributeHandle::new(9_999));

    let reflection = mom.generate_update(ProtocolVersion::IEEE1516E, &requested).unwrap();

    assert_eq!(reflection.update.attributes.len(), 1);
    assert!(reflection.update.value(FederationProperty::FederationName.handle()).is_some());
    assert_eq!(
        reflection.failures,
        vec![AttributeError::UnknownAttribute { handle: AttributeHandle::new(9_999) }]
    );
}

#[test]
fn handle_undefined_for_object_class_is_reported() {
    let object = FederationObject::with_attributes(
        OBJECT,
        handles(&[FederationProperty::FederationName]),
    );
    let mom = MomFederation::new(Federation::new("Restricted"), object);
    let requested =
        handles(&[FederationProperty::FederationName, FederationProperty::MimDesignator]);

    let reflection = mom.generate_update(ProtocolVersion::HLA13, &requested).unwrap();

    assert_eq!(reflection.update.attributes.len(), 1);
    assert_eq!(
        reflection.failures,
        vec![AttributeError::UndefinedForAggregate {
            handle: FederationProperty::MimDesignator.handle(),
            property: FederationProperty::MimDesignator,
        }]
    );
}

#[test]
fn unknown_version_aborts_before_resolution() {
    let (mom, sink) = mom_with_sink("Misconfigured");
    let requested = handles(&[FederationProperty::FederationName, FederationProperty::CurrentFdd]);

    let result = mom.generate_update(ProtocolVersion::from_tag(0x7F), &requested);

    assert_eq!(
        result,
        Err(ReflectError::Configuration(EncodingError::UnknownVersion { tag: 0x7F }))
    );
    // Nothing was resolved, so the unsupported property never traced
    assert!(sink.messages().is_empty());
}

#[test]
fn generation_does_not_touch_registry() {
    let (mut mom, _sink) = mom_with_sink("Registry");
    let record =
        Arc::new(FederateRecord::new(FederateHandle::new(3).unwrap(), "gamma", "observer"));
    mom.add_federate(Arc::clone(&record));

    let requested = handles(&FederationProperty::ALL);
    mom.generate_update(ProtocolVersion::IEEE1516E, &requested).unwrap();

    assert_eq!(mom.federate_count(), 1);
    assert!(Arc::ptr_eq(mom.federate(record.handle).unwrap(), &record));
}

#[test]
fn prop_every_handle_is_accounted_for() {
    proptest!(|(
        raw in prop::collection::vec(0u32..32, 0..24),
        version_index in 0usize..3,
    )| {
        let (mom, _sink) = mom_with_sink("Accounting");
        let version = ProtocolVersion::KNOWN[version_index];
        let requested = AttributeHandleSet::from_raw(raw.iter().copied());

        let reflection = mom.generate_update(version, &requested).unwrap();

        // PROPERTY: each requested handle lands in exactly one of the outputs
        for handle in &requested {
            let resolved = reflection.update.attributes.contains_key(handle);
            let failed = reflection.failures.iter().any(|f| f.handle() == *handle);
            prop_assert!(resolved ^ failed, "handle {} resolved={} failed={}", handle, resolved, failed);
        }
        prop_assert_eq!(
            reflection.update.attributes.len() + reflection.failures.len(),
            requested.len()
        );
    });
}

#[test]
fn prop_generation_is_deterministic() {
    proptest!(|(raw in prop::collection::vec(0u32..20, 0..16))| {
        let (mom, _sink) = mom_with_sink("Deterministic");
        let requested = AttributeHandleSet::from_raw(raw.iter().copied());

        let first = mom.generate_update(ProtocolVersion::IEEE1516E, &requested).unwrap();
        let second = mom.generate_update(ProtocolVersion::IEEE1516E, &requested.clone()).unwrap();

        prop_assert_eq!(first, second);
    });
}
