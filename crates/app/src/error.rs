use engine::{EngineError, GatewayError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("{0}")]
    Engine(#[from] EngineError),
    #[error("store error: {0}")]
    Gateway(#[from] GatewayError),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("not logged in, run `fintrack login` first")]
    NotLoggedIn,
    #[error("invalid username or password")]
    LoginFailed,
}
