use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use confcat_application::{CategoryService, CategorySessionUseCase, TagService};
use confcat_core::category::CategoryRepository;
use confcat_core::config::{AppConfig, PagingConfig};
use confcat_core::session::{SessionIndex, TagRepository};

/// Shared handler state.
pub struct ServerState {
    pub(crate) sessions: CategorySessionUseCase,
    pub(crate) categories: CategoryService,
    pub(crate) tags: TagService,
    pub(crate) index: Arc<dyn SessionIndex>,
    pub(crate) paging: PagingConfig,
    pub(crate) request_timeout: Duration,
}

impl ServerState {
    /// Builds the state over one store that serves categories, sessions and
    /// tags.
    pub fn from_catalog<C>(catalog: Arc<C>, config: &AppConfig) -> Self
    where
        C: CategoryRepository + SessionIndex + TagRepository + 'static,
    {
        Self {
            sessions: CategorySessionUseCase::new(catalog.clone(), catalog.clone()),
            categories: CategoryService::new(catalog.clone()),
            tags: TagService::new(catalog.clone()),
            index: catalog,
            paging: config.paging.clone(),
            request_timeout: Duration::from_secs(config.server.request_timeout_secs),
        }
    }

    /// Starts the per-request deadline. The token fires once the configured
    /// timeout elapses.
    pub(crate) fn deadline(&self) -> Deadline {
        let token = CancellationToken::new();
        let timer = tokio::spawn({
            let token = token.clone();
            let timeout = self.request_timeout;
            async move {
                tokio::time::sleep(timeout).await;
                token.cancel();
            }
        });
        Deadline { token, timer }
    }
}

/// Cancellation token bound to a timer. Dropping it stops the timer.
pub(crate) struct Deadline {
    token: CancellationToken,
    timer: JoinHandle<()>,
}

impl Deadline {
    pub(crate) fn token(&self) -> CancellationToken {
        self.token.clone()
    }
}

impl Drop for Deadline {
    fn drop(&mut self) {
        self.timer.abort();
    }
}
