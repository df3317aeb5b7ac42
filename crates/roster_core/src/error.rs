/// Recoverable failure of a page fetch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server responded with status {0}")]
    Server(u16),
    #[error("unexpected response payload: {0}")]
    Decoding(String),
    /// Rejected before any IO (bad base URL, page 0, page size 0).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}
