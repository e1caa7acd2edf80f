//! Startup failures. Request-time failures never reach here; the proxy turns
//! them into `502` responses.

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("leptos configuration: {0}")]
    Leptos(String),
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(#[from] reqwest::Error),
    #[error("failed to bind port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: std::io::Error,
    },
    #[error("server failed: {0}")]
    Serve(#[source] std::io::Error),
}
