//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::dataset::DatasetRegistry;
use crate::explore::{Controller, ControllerResult, SessionConfig, SessionStore};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Read-only datasets loaded at start-up
    pub registry: Arc<DatasetRegistry>,
    /// Recomputes explore state for session input
    pub controller: Arc<Controller>,
    /// Per-session explore state
    pub sessions: Arc<SessionStore>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState with default session limits
    pub fn new(registry: Arc<DatasetRegistry>, config: ApiConfig) -> ControllerResult<Self> {
        Self::with_sessions(registry, config, SessionConfig::default())
    }

    /// Create AppState with custom session store configuration
    pub fn with_sessions(
        registry: Arc<DatasetRegistry>,
        config: ApiConfig,
        session_config: SessionConfig,
    ) -> ControllerResult<Self> {
        let controller = Controller::new(Arc::clone(&registry))?;
        Ok(Self {
            registry,
            controller: Arc::new(controller),
            sessions: Arc::new(SessionStore::new(session_config)),
            config: Arc::new(config),
            start_time: Instant::now(),
        })
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Get live session count
    pub async fn session_count(&self) -> usize {
        self.sessions.count().await
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Allowed CORS origins; permissive when empty
    pub cors_origins: Vec<String>,
    /// Maximum request body size in bytes
    pub max_body_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8050,
            cors_origins: Vec::new(),
            max_body_size: 1024 * 1024, // 1MB
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
