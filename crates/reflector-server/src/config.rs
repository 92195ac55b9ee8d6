//! Coordinator configuration.

use reflector_core::{RTI_NAME, RTI_VERSION};
use reflector_proto::ObjectInstanceHandle;

/// Default capacity of a coordinator's command channel.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Configuration for one federation coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinatorConfig {
    /// Federation execution name
    pub federation_name: String,
    /// RTI product name reported by `RtiVersion`
    pub rti_name: String,
    /// RTI product version reported by `RtiVersion`
    pub rti_version: String,
    /// Object instance representing the federation
    pub object_handle: ObjectInstanceHandle,
    /// Bound on queued commands before senders wait
    pub channel_capacity: usize,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            federation_name: "Federation".to_string(),
            rti_name: RTI_NAME.to_string(),
            rti_version: RTI_VERSION.to_string(),
            object_handle: ObjectInstanceHandle::new(1),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = CoordinatorConfig::default();
        assert_eq!(config.channel_capacity, DEFAULT_CHANNEL_CAPACITY);
        assert_eq!(config.rti_name, RTI_NAME);
    }
}
