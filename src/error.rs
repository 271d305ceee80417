use std::fmt;

/// Status-derived failures reported by the Planhat API, plus the tenant
/// precondition on the metrics endpoint. Kinds carry no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    InternalError,
    Unknown,
    MissingTenantId,
}

impl ErrorKind {
    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "planhat: bad request",
            ErrorKind::Unauthorized => "planhat: unauthorized request",
            ErrorKind::Forbidden => "planhat: forbidden",
            ErrorKind::NotFound => "planhat: not found",
            ErrorKind::InternalError => "planhat: internal error",
            ErrorKind::Unknown => "planhat: unexpected error occurred",
            ErrorKind::MissingTenantId => {
                "planhat: missing required tenant uuid for this request"
            }
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("planhat: api key required")]
    MissingApiKey,

    #[error("planhat: invalid configuration: {0}")]
    Config(String),

    #[error("planhat: invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("{0}")]
    Api(ErrorKind),

    /// Transport failure (connect, timeout, TLS). Surfaced unchanged, never retried.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("planhat: failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("planhat: failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("planhat: request cancelled")]
    Cancelled,
}

impl Error {
    /// The API kind, if this error came from a mapped status or the tenant check.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Error::Api(kind) => Some(*kind),
            _ => None,
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error::Api(kind)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
