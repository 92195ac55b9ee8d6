//! Reflector server binary.
//!
//! Spawns a coordinator for one federation, registers synthetic federates and
//! logs the reflection of the requested MOM attributes.
//!
//! # Usage
//!
//! ```bash
//! # Reflect every federation attribute using the IEEE 1516-2010 encoding
//! reflector-server --federation Demo --protocol 1516e
//!
//! # Reflect selected attributes for an HLA 1.3 federate
//! reflector-server --protocol hla13 --attributes 1,3,42 --federates 3
//! ```

use clap::Parser;
use reflector_core::{FederateRecord, FederationProperty};
use reflector_proto::{
    AttributeHandle, AttributeHandleSet, FederateHandle, ObjectInstanceHandle, ProtocolVersion,
    decode_string,
};
use reflector_server::{Coordinator, CoordinatorConfig, DEFAULT_CHANNEL_CAPACITY};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Reflector MOM server
#[derive(Parser, Debug)]
#[command(name = "reflector-server")]
#[command(about = "Management object model reflection for a federation")]
#[command(version)]
struct Args {
    /// Federation execution name
    #[arg(short, long, default_value = "Federation")]
    federation: String,

    /// RTI product name reported by RtiVersion
    #[arg(long, default_value = reflector_core::RTI_NAME)]
    rti_name: String,

    /// RTI product version reported by RtiVersion
    #[arg(long, default_value = reflector_core::RTI_VERSION)]
    rti_version: String,

    /// Object instance handle of the federation object
    #[arg(long, default_value = "1")]
    object_handle: u32,

    /// Protocol version (hla13, 1516, 1516e)
    #[arg(short, long, default_value = "1516e")]
    protocol: ProtocolVersion,

    /// Attribute handles to reflect, comma separated (default: all)
    #[arg(short, long, value_delimiter = ',')]
    attributes: Vec<u32>,

    /// Number of synthetic federates to join before reflecting
    #[arg(long, default_value = "0")]
    federates: u32,

    /// Coordinator command channel capacity
    #[arg(long, default_value_t = DEFAULT_CHANNEL_CAPACITY)]
    channel_capacity: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    let config = CoordinatorConfig {
        federation_name: args.federation,
        rti_name: args.rti_name,
        rti_version: args.rti_version,
        object_handle: ObjectInstanceHandle::new(args.object_handle),
        channel_capacity: args.channel_capacity,
    };

    let (coordinator, task) = Coordinator::from_config(&config);

    for raw in 0..args.federates {
        let Some(handle) = FederateHandle::new(raw + 1) else {
            tracing::warn!("Federate handle {} is reserved, skipping", raw + 1);
            continue;
        };
        let record = FederateRecord::new(handle, format!("federate-{}", raw + 1), "synthetic");
        coordinator.join(record).await?;
    }
    tracing::info!("{} federates joined", coordinator.federate_count().await?);

    let handles: AttributeHandleSet = if args.attributes.is_empty() {
        FederationProperty::ALL.iter().map(|p| p.handle()).collect()
    } else {
        AttributeHandleSet::from_raw(args.attributes.iter().copied())
    };

    let reflection = coordinator.generate_update(args.protocol, handles).await?;
    let update = &reflection.update;

    tracing::info!(
        "Update for object {} from {} ({} attributes, protocol {})",
        update.object,
        update.source,
        update.attributes.len(),
        args.protocol
    );

    let mut resolved: Vec<(&AttributeHandle, _)> = update.attributes.iter().collect();
    resolved.sort_by_key(|(handle, _)| **handle);
    for (handle, value) in resolved {
        let property = FederationProperty::from_handle(*handle)
            .map_or_else(|| "?".to_string(), |p| p.to_string());
        match decode_string(args.protocol, value) {
            Ok(text) => tracing::info!("  {} {}: {:?}", handle, property, text),
            Err(e) => {
                tracing::warn!("  {} {}: {} bytes, undecodable: {}", handle, property, value.len(), e)
            },
        }
    }

    for failure in &reflection.failures {
        tracing::warn!("  {}", failure);
    }

    let removed = coordinator.teardown().await?;
    tracing::debug!("Teardown removed {} federates", removed);

    coordinator.shutdown().await?;
    task.await?;

    Ok(())
}
