//! Coordinator tests

use std::{collections::HashMap, sync::Arc};

use proptest::prelude::*;
use reflector_core::{FederateRecord, FederationProperty};
use reflector_proto::{
    AttributeHandleSet, FederateHandle, ObjectInstanceHandle, ProtocolVersion, decode_string,
};
use reflector_server::{Coordinator, CoordinatorConfig, CoordinatorError};

fn config(name: &str) -> CoordinatorConfig {
    CoordinatorConfig {
        federation_name: name.to_string(),
        rti_name: "Reflector".to_string(),
        rti_version: "0.9".to_string(),
        object_handle: ObjectInstanceHandle::new(0x77),
        channel_capacity: 16,
    }
}

fn federate(raw: u32, name: &str) -> FederateRecord {
    FederateRecord::new(FederateHandle::new(raw).unwrap(), name, "test")
}

#[tokio::test]
async fn join_then_resign_returns_record() {
    let (coordinator, _task) = Coordinator::from_config(&config("JoinResign"));

    assert_eq!(coordinator.join(federate(1, "alpha")).await.unwrap(), None);
    let handle = FederateHandle::new(1).unwrap();

    let removed = coordinator.resign(handle).await.unwrap().unwrap();
    assert_eq!(removed.name, "alpha");

    // Second resign is absence, not an error
    assert_eq!(coordinator.resign(handle).await.unwrap(), None);
}

#[tokio::test]
async fn rejoin_replaces_record() {
    let (coordinator, _task) = Coordinator::from_config(&config("Rejoin"));

    coordinator.join(federate(5, "first")).await.unwrap();
    let replaced = coordinator.join(federate(5, "second")).await.unwrap().unwrap();

    assert_eq!(replaced.name, "first");
    let current = coordinator.federate(FederateHandle::new(5).unwrap()).await.unwrap().unwrap();
    assert_eq!(current.name, "second");
    assert_eq!(coordinator.federate_count().await.unwrap(), 1);
}

#[tokio::test]
async fn generate_update_uses_configured_identity() {
    let (coordinator, _task) = Coordinator::from_config(&config("Configured"));
    let handles: AttributeHandleSet =
        [FederationProperty::FederationName.handle(), FederationProperty::RtiVersion.handle()]
            .into_iter()
            .collect();

    let reflection =
        coordinator.generate_update(ProtocolVersion::IEEE1516E, handles).await.unwrap();
    let update = &reflection.update;

    assert_eq!(update.object, ObjectInstanceHandle::new(0x77));
    assert!(update.is_from_rti());

    let name = update.value(FederationProperty::FederationName.handle()).unwrap();
    let version = update.value(FederationProperty::RtiVersion.handle()).unwrap();
    assert_eq!(decode_string(ProtocolVersion::IEEE1516E, name).unwrap(), "Configured");
    assert_eq!(decode_string(ProtocolVersion::IEEE1516E, version).unwrap(), "Reflector v0.9");
}

#[tokio::test]
async fn unknown_version_is_reported_and_coordinator_survives() {
    let (coordinator, _task) = Coordinator::from_config(&config("Survives"));
    let handles = AttributeHandleSet::from_raw([1]);

    let err = coordinator
        .generate_update(ProtocolVersion::from_tag(0), handles.clone())
        .await
        .unwrap_err();
    assert!(matches!(err, CoordinatorError::Reflect(_)));
    assert!(!err.is_fatal());

    // Next request still served
    let reflection = coordinator.generate_update(ProtocolVersion::HLA13, handles).await.unwrap();
    assert_eq!(reflection.update.attributes.len(), 1);
}

#[tokio::test]
async fn teardown_clears_registry() {
    let (coordinator, task) = Coordinator::from_config(&config("Teardown"));
    coordinator.join(federate(1, "a")).await.unwrap();
    coordinator.join(federate(2, "b")).await.unwrap();

    assert_eq!(coordinator.teardown().await.unwrap(), 2);
    assert_eq!(coordinator.federate_count().await.unwrap(), 0);

    coordinator.shutdown().await.unwrap();
    let mom = task.await.unwrap();
    assert_eq!(mom.federate_count(), 0);
}

#[tokio::test]
async fn concurrent_joins_are_serialized() {
    let (coordinator, _task) = Coordinator::from_config(&config("Concurrent"));

    let joins: Vec<_> = (1..=32)
        .map(|raw| {
            let coordinator = coordinator.clone();
            tokio::spawn(async move { coordinator.join(federate(raw, "worker")).await })
        })
        .collect();
    for join in joins {
        join.await.unwrap().unwrap();
    }

    assert_eq!(coordinator.federate_count().await.unwrap(), 32);
}

/// Registry operation for model-based testing.
#[derive(Debug, Clone)]
enum Operation {
    Join { raw: u32, name_seed: u8 },
    Resign { raw: u32 },
    Teardown,
}

fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        (0u32..8, any::<u8>()).prop_map(|(raw, name_seed)| Operation::Join { raw, name_seed }),
        (0u32..8).prop_map(|raw| Operation::Resign { raw }),
        Just(Operation::Teardown),
    ]
}

#[test]
fn prop_registry_matches_model() {
    proptest!(|(ops in prop::collection::vec(operation(), 0..40))| {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime");

        runtime.block_on(async {
            let (coordinator, _task) = Coordinator::from_config(&config("Model"));
            let mut model: HashMap<u32, Arc<FederateRecord>> = HashMap::new();

            for op in &ops {
                match op {
                    Operation::Join { raw, name_seed } => {
                        let record = federate(*raw, &format!("f{name_seed}"));
                        let expected = model.insert(*raw, Arc::new(record.clone()));
                        let replaced = coordinator.join(record).await.expect("running");
                        prop_assert_eq!(replaced.map(|r| (*r).clone()), expected.map(|r| (*r).clone()));
                    },
                    Operation::Resign { raw } => {
                        let handle = FederateHandle::new(*raw).expect("not sentinel");
                        let expected = model.remove(raw);
                        let removed = coordinator.resign(handle).await.expect("running");
                        prop_assert_eq!(removed.map(|r| (*r).clone()), expected.map(|r| (*r).clone()));
                    },
                    Operation::Teardown => {
                        let removed = coordinator.teardown().await.expect("running");
                        prop_assert_eq!(removed, model.len());
                        model.clear();
                    },
                }

                // PROPERTY: coordinator registry size tracks the model
                prop_assert_eq!(coordinator.federate_count().await.expect("running"), model.len());
            }
            Ok(())
        })?;
    });
}
