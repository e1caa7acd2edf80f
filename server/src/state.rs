//! Shared application state.
//!
//! DESIGN
//! ======
//! The server keeps no per-user data. `AppState` carries the parsed config
//! and one pooled `reqwest::Client` used for every forwarded request.

use std::sync::Arc;
use std::time::Duration;

use crate::config::ServerConfig;
use crate::error::ServerError;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub http: reqwest::Client,
}

impl AppState {
    /// # Errors
    ///
    /// Fails when the TLS backend of the HTTP client cannot be initialised.
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.proxy_timeout_secs))
            .connect_timeout(Duration::from_secs(config.proxy_connect_timeout_secs))
            .build()?;
        Ok(Self { config: Arc::new(config), http })
    }
}
