use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("invalid API base URL '{url}'")]
    InvalidApiUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("API base URL '{url}' cannot carry a path")]
    UnsupportedApiUrl { url: String },
    #[error("invalid request timeout '{value}'")]
    InvalidTimeout { value: String },
    #[error("invalid user id '{value}'")]
    InvalidUserId {
        value: String,
        #[source]
        source: uuid::Error,
    },
    #[error("session key must not be empty")]
    EmptySessionKey,
}
