//! Install/activate/fetch state machine for the shell cache.
//!
//! ```text
//! Parsed -> Installing -> Installed -> Activating -> Activated
//!               |                          |
//!               +-------> Redundant <------+
//! ```
//!
//! Each phase must complete before the next may start. Until the
//! controller reaches `Activated`, fetches are not intercepted.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Interception, ShellCache, ShellRequest, ShellResponse};
use afflink_core::Error;

/// Callbacks invoked by [`LifecycleController`] for each phase.
#[async_trait]
pub trait LifecycleHandler: Send + Sync {
    async fn install(&self) -> Result<(), Error>;
    async fn activate(&self) -> Result<(), Error>;
    async fn fetch(&self, request: &ShellRequest) -> Result<Interception, Error>;
}

#[async_trait]
impl LifecycleHandler for ShellCache {
    async fn install(&self) -> Result<(), Error> {
        self.precache().await.map(|_| ())
    }

    async fn activate(&self) -> Result<(), Error> {
        self.purge_stale().await.map(|_| ())
    }

    async fn fetch(&self, request: &ShellRequest) -> Result<Interception, Error> {
        self.intercept(request).await
    }
}

/// Where the controller is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Parsed,
    Installing,
    Installed,
    Activating,
    Activated,
    /// A phase failed; this controller will never serve requests.
    Redundant,
}

/// Drives a [`LifecycleHandler`] through its phases in order.
pub struct LifecycleController<H: LifecycleHandler> {
    handler: Arc<H>,
    state: RwLock<WorkerState>,
}

impl<H: LifecycleHandler> LifecycleController<H> {
    pub fn new(handler: Arc<H>) -> Self {
        Self { handler, state: RwLock::new(WorkerState::Parsed) }
    }

    pub async fn state(&self) -> WorkerState {
        *self.state.read().await
    }

    /// Run the install phase. Failure makes the controller redundant.
    pub async fn install(&self) -> Result<(), Error> {
        self.transition(WorkerState::Parsed, WorkerState::Installing).await?;

        match self.handler.install().await {
            Ok(()) => {
                *self.state.write().await = WorkerState::Installed;
                tracing::debug!("lifecycle: installed");
                Ok(())
            }
            Err(e) => {
                *self.state.write().await = WorkerState::Redundant;
                tracing::error!("lifecycle: install failed: {}", e);
                Err(e)
            }
        }
    }

    /// Run the activate phase. Requires a completed install.
    pub async fn activate(&self) -> Result<(), Error> {
        self.transition(WorkerState::Installed, WorkerState::Activating).await?;

        match self.handler.activate().await {
            Ok(()) => {
                *self.state.write().await = WorkerState::Activated;
                tracing::debug!("lifecycle: activated");
                Ok(())
            }
            Err(e) => {
                *self.state.write().await = WorkerState::Redundant;
                tracing::error!("lifecycle: activate failed: {}", e);
                Err(e)
            }
        }
    }

    /// Install, then activate.
    pub async fn start(&self) -> Result<(), Error> {
        self.install().await?;
        self.activate().await
    }

    /// Route a request through the handler once activated.
    pub async fn fetch(&self, request: &ShellRequest) -> Result<Interception, Error> {
        if self.state().await != WorkerState::Activated {
            return Ok(Interception::Passthrough);
        }
        self.handler.fetch(request).await
    }

    async fn transition(&self, from: WorkerState, to: WorkerState) -> Result<(), Error> {
        let mut state = self.state.write().await;
        if *state != from {
            return Err(Error::Lifecycle(format!("cannot enter {to:?} from {:?}", *state)));
        }
        *state = to;
        Ok(())
    }
}

impl LifecycleController<ShellCache> {
    /// Answer a request, performing it live when the cache declines it.
    ///
    /// Returns the [`Interception::source`] label with the response.
    pub async fn respond(&self, request: &ShellRequest) -> Result<(&'static str, ShellResponse), Error> {
        let interception = self.fetch(request).await?;
        let source = interception.source();
        let response = match interception {
            Interception::Cached(response) | Interception::Network(response) => response,
            Interception::Passthrough => self.handler.passthrough(request).await?,
        };
        Ok((source, response))
    }
}
