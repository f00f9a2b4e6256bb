use std::sync::Arc;

use tokio::net::TcpListener;

use opdiff_engine::{EngineConfig, InMemoryOperandStore, OperandStore, TransactionEngine};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler::{AppState, SharedEngine};
use crate::router::build_router;

/// opdiff HTTP server.
pub struct OpdiffServer {
    config: ServerConfig,
    engine: SharedEngine,
}

impl OpdiffServer {
    /// A server over an in-memory store sized by `config`.
    pub fn new(config: ServerConfig) -> Self {
        let store: Arc<dyn OperandStore> =
            Arc::new(InMemoryOperandStore::with_max_operand_size(config.max_operand_size));
        Self::with_store(config, store)
    }

    /// A server over a caller-provided store backend.
    pub fn with_store(config: ServerConfig, store: Arc<dyn OperandStore>) -> Self {
        let engine_config = EngineConfig {
            duplicate_policy: config.duplicate_policy,
            ..Default::default()
        };
        let engine = Arc::new(TransactionEngine::with_config(store, engine_config));
        Self { config, engine }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn engine(&self) -> &SharedEngine {
        &self.engine
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(
            AppState::new(Arc::clone(&self.engine)),
            self.config.max_request_body,
        )
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!(
            max_operand_size = self.config.max_operand_size,
            duplicate_policy = ?self.config.duplicate_policy,
            "opdiff server listening on {}",
            self.config.bind_addr
        );
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
