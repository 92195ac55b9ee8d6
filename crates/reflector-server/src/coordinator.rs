//! Federation coordinator
//!
//! One task owns one [`MomFederation`]. Joins, resigns, teardown and update
//! generation all arrive as commands on a single channel, so an update never
//! interleaves with a membership change.
//!
//! ## Protocol Flow
//!
//! 1. Caller sends a command through a [`CoordinatorHandle`]
//! 2. The task applies it to the federation it owns
//! 3. The result comes back on the command's reply channel
//!
//! The task exits on [`CoordinatorHandle::shutdown`] or once every handle is
//! dropped, and yields the federation back through its `JoinHandle`.

use std::{ops::ControlFlow, sync::Arc};

use reflector_core::{
    DiagnosticSink, FederateRecord, Federation, FederationObject, MomFederation, ReflectError,
    Reflection, TracingSink,
};
use reflector_proto::{AttributeHandleSet, FederateHandle, ProtocolVersion};
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};

use crate::{CoordinatorConfig, CoordinatorError};

/// Commands accepted by the coordinator task.
#[derive(Debug)]
enum Command {
    Join {
        record: Arc<FederateRecord>,
        reply: oneshot::Sender<Option<Arc<FederateRecord>>>,
    },
    Resign {
        handle: FederateHandle,
        reply: oneshot::Sender<Option<Arc<FederateRecord>>>,
    },
    Lookup {
        handle: FederateHandle,
        reply: oneshot::Sender<Option<Arc<FederateRecord>>>,
    },
    FederateCount {
        reply: oneshot::Sender<usize>,
    },
    GenerateUpdate {
        version: ProtocolVersion,
        handles: AttributeHandleSet,
        reply: oneshot::Sender<Result<Reflection, ReflectError>>,
    },
    Teardown {
        reply: oneshot::Sender<usize>,
    },
    Shutdown,
}

/// Task owning a single federation's management state.
pub struct Coordinator<S>
where
    S: DiagnosticSink,
{
    mom: MomFederation<S>,
    commands: mpsc::Receiver<Command>,
}

impl Coordinator<TracingSink> {
    /// Build a federation from `config` and spawn its coordinator.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn from_config(
        config: &CoordinatorConfig,
    ) -> (CoordinatorHandle, JoinHandle<MomFederation<TracingSink>>) {
        let federation = Federation::new(config.federation_name.clone())
            .with_rti(config.rti_name.clone(), config.rti_version.clone());
        let object = FederationObject::new(config.object_handle);

        Self::spawn(MomFederation::new(federation, object), config.channel_capacity)
    }
}

impl<S> Coordinator<S>
where
    S: DiagnosticSink + 'static,
{
    /// Spawn a coordinator that takes ownership of `mom`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn(
        mom: MomFederation<S>,
        channel_capacity: usize,
    ) -> (CoordinatorHandle, JoinHandle<MomFederation<S>>) {
        let (tx, rx) = mpsc::channel(channel_capacity.max(1));
        let coordinator = Self { mom, commands: rx };
        let task = tokio::spawn(coordinator.run());

        (CoordinatorHandle { commands: tx }, task)
    }

    async fn run(mut self) -> MomFederation<S> {
        tracing::info!(federation = %self.mom.federation().name(), "coordinator started");

        while let Some(command) = self.commands.recv().await {
            if self.handle(command).is_break() {
                break;
            }
        }

        tracing::info!(
            federation = %self.mom.federation().name(),
            federates = self.mom.federate_count(),
            "coordinator stopped"
        );
        self.mom
    }

    fn handle(&mut self, command: Command) -> ControlFlow<()> {
        // A dropped reply receiver means the caller gave up; nothing to do
        match command {
            Command::Join { record, reply } => {
                let _ = reply.send(self.mom.add_federate(record));
            },
            Command::Resign { handle, reply } => {
                let _ = reply.send(self.mom.remove_federate(handle));
            },
            Command::Lookup { handle, reply } => {
                let _ = reply.send(self.mom.federate(handle).cloned());
            },
            Command::FederateCount { reply } => {
                let _ = reply.send(self.mom.federate_count());
            },
            Command::GenerateUpdate { version, handles, reply } => {
                let result = self.mom.generate_update(version, &handles);
                if let Err(e) = &result {
                    tracing::error!("Update generation failed: {}", e);
                }
                let _ = reply.send(result);
            },
            Command::Teardown { reply } => {
                let count = self.mom.federate_count();
                self.mom.clear();
                let _ = reply.send(count);
            },
            Command::Shutdown => return ControlFlow::Break(()),
        }

        ControlFlow::Continue(())
    }
}

/// Cloneable handle for sending commands to a [`Coordinator`].
#[derive(Debug, Clone)]
pub struct CoordinatorHandle {
    commands: mpsc::Sender<Command>,
}

impl CoordinatorHandle {
    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, CoordinatorError> {
        let (reply, response) = oneshot::channel();
        self.commands.send(command(reply)).await.map_err(|_| CoordinatorError::Stopped)?;
        response.await.map_err(|_| CoordinatorError::Stopped)
    }

    /// Register a joined federate. Returns the record it replaced, if any.
    pub async fn join(
        &self,
        record: FederateRecord,
    ) -> Result<Option<Arc<FederateRecord>>, CoordinatorError> {
        let record = Arc::new(record);
        self.request(|reply| Command::Join { record, reply }).await
    }

    /// Remove a resigned federate. `Ok(None)` if it was not registered.
    pub async fn resign(
        &self,
        handle: FederateHandle,
    ) -> Result<Option<Arc<FederateRecord>>, CoordinatorError> {
        self.request(|reply| Command::Resign { handle, reply }).await
    }

    /// Look up a federate record.
    pub async fn federate(
        &self,
        handle: FederateHandle,
    ) -> Result<Option<Arc<FederateRecord>>, CoordinatorError> {
        self.request(|reply| Command::Lookup { handle, reply }).await
    }

    /// Number of registered federates.
    pub async fn federate_count(&self) -> Result<usize, CoordinatorError> {
        self.request(|reply| Command::FederateCount { reply }).await
    }

    /// Generate an attribute update for the federation object.
    ///
    /// # Errors
    ///
    /// Returns `CoordinatorError::Reflect` for an unknown protocol version and
    /// `CoordinatorError::Stopped` if the coordinator has exited.
    pub async fn generate_update(
        &self,
        version: ProtocolVersion,
        handles: AttributeHandleSet,
    ) -> Result<Reflection, CoordinatorError> {
        let result =
            self.request(|reply| Command::GenerateUpdate { version, handles, reply }).await?;
        Ok(result?)
    }

    /// Drop every federate record. Returns how many were removed.
    pub async fn teardown(&self) -> Result<usize, CoordinatorError> {
        self.request(|reply| Command::Teardown { reply }).await
    }

    /// Ask the coordinator to stop after the commands already queued.
    pub async fn shutdown(&self) -> Result<(), CoordinatorError> {
        self.commands.send(Command::Shutdown).await.map_err(|_| CoordinatorError::Stopped)
    }
}
