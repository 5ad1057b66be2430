use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The service answered with a non-success status.
    #[error("{url} answered with status {status}")]
    Status {
        status: u16,
        url: String,
        body: String,
    },
    #[error("Couldn't decode the response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

impl Error {
    /// The HTTP status carried by the error, if the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
