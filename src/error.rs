use thiserror::Error;

pub type Error = PingError;
pub type Result<T> = core::result::Result<T, Error>;

/// Failure of a single HTTP exchange, independent of which step issued it
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("{0}")]
    Http(#[source] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(u16),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => TransportError::Status(status.as_u16()),
            None => TransportError::Http(err),
        }
    }
}

#[derive(Error, Debug)]
pub enum PingError {
    #[error("{step}: failed to fetch {url}: {source}")]
    Fetch {
        step: &'static str,
        url: String,
        #[source]
        source: TransportError,
    },
    #[error("{step}: response from {url} is not valid JSON: {source}")]
    Parse {
        step: &'static str,
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{step}: unexpected payload shape: {reason}")]
    PayloadShape { step: &'static str, reason: String },
    #[error("failed to notify {url}: {source}")]
    Notify {
        url: String,
        #[source]
        source: TransportError,
    },
    #[error("failed to encode the forged payload: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to build the HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("invalid repository `{0}`, expected OWNER/NAME")]
    InvalidRepository(String),

    // Repository detection
    #[error("failed to retrieve HEAD branch (code={0}): {1}")]
    GitNoHead(i32, String),
    #[error("failed to get upstream branch (code={0}): {1}")]
    GitNoUpstream(i32, String),
    #[error("failed to get remote url (code={0}): {1}")]
    GitNoUpstreamURL(i32, String),
    #[error("could not get remote name from upstream branch: {0}")]
    GitBadRemote(String),
    #[error("could not find OWNER/NAME in remote url: {0}")]
    GitBadRemoteURL(String),
    #[error("IOError: {0}")]
    IOError(#[from] std::io::Error),
}
