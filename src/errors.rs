use thiserror::Error;

#[derive(Debug, Error)]
pub enum WxError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("unexpected report: {0}")]
    Report(String),

    #[error("invalid url: {0}")]
    Url(String),

    #[error("failed to launch browser: {0}")]
    Launch(String),
}

impl WxError {
    /// Drops the request url from http errors so query secrets never reach the tooltip.
    pub fn without_url(self) -> Self {
        match self {
            WxError::Http(e) => WxError::Http(e.without_url()),
            other => other,
        }
    }
}
