use std::path::PathBuf;

use wire::ApiError;
use wire::api::NameError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid name: {0}")]
    InvalidName(#[from] NameError),
    #[error("invalid screenshot argument `{0}`; expected LABEL=PATH")]
    InvalidScreenshot(String),
    #[error("screen {0} has no generated prototype yet")]
    MissingPrototype(i64),
    #[error("generation failed: {0}")]
    GenerationFailed(String),
    #[error("backend returned no {0} text")]
    EmptyDocument(&'static str),
}

impl CliError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
