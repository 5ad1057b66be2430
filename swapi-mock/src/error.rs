use hyper::http;
use std::{io, sync};
use thiserror::Error;

pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IoError: {0}")]
    IoError(#[from] io::Error),
    #[error("The lock was poisoned")]
    PoisonedLock,
    #[error("The server hasn't been configured")]
    NotConfigured,
    #[error("The mock server couldn't start: {0}")]
    ServerStart(String),
    #[error("Invalid header name")]
    InvalidHeaderName,
    #[error("Invalid header value")]
    InvalidHeaderValue,
    #[error("Invalid body")]
    InvalidBody,
    #[error("Hyper error: {0}")]
    HyperError(#[from] hyper::Error),
    #[error("Http Error: {0}")]
    HttpError(#[from] http::Error),
    #[error("Interaction storage error: {0}")]
    InteractionManager(#[source] BoxedError),
    #[error("The recorded interactions differ from the stored ones: {0}")]
    MarkdownDataChanged(#[source] BoxedError),
    #[error(
        "Request {method} {uri} doesn't match interaction {interaction_number} ({recorded_method} {recorded_uri})"
    )]
    PlaybackMismatch {
        interaction_number: usize,
        method: String,
        uri: String,
        recorded_method: String,
        recorded_uri: String,
    },
    #[error("Request {method} {uri} was made after all {recorded} recorded interactions were played back")]
    PlaybackExhausted {
        method: String,
        uri: String,
        recorded: usize,
    },
}

impl<T> From<sync::PoisonError<T>> for Error {
    fn from(_: sync::PoisonError<T>) -> Self {
        Error::PoisonedLock
    }
}

impl From<hyper::header::InvalidHeaderName> for Error {
    fn from(_: hyper::header::InvalidHeaderName) -> Self {
        Error::InvalidHeaderName
    }
}

impl From<hyper::header::InvalidHeaderValue> for Error {
    fn from(_: hyper::header::InvalidHeaderValue) -> Self {
        Error::InvalidHeaderValue
    }
}
