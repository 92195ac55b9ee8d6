//! Reflector coordinator.
//!
//! Runs each federation's management state behind a single Tokio task so that
//! membership changes and update generation are serialized. Delivery of the
//! generated updates is left to the caller.
//!
//! ## Architecture
//!
//! ```text
//! reflector-server
//!   ├─ CoordinatorHandle  (cloneable command sender)
//!   ├─ Coordinator        (task owning one MomFederation)
//!   └─ MomFederation      (registry + update generation, reflector-core)
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod coordinator;
mod error;

pub use config::{CoordinatorConfig, DEFAULT_CHANNEL_CAPACITY};
pub use coordinator::{Coordinator, CoordinatorHandle};
pub use error::CoordinatorError;
