use std::{fmt::Display, io, sync::Arc};
use thiserror::Error;

/// Errors carried by a [`ValueOrError`] or returned when a worker thread
/// cannot be started.
///
/// Every variant is cheap to clone so the error can be handed to each reader
/// of a resolved [`Future`](crate::Future).
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Source(Arc<dyn std::error::Error + Send + Sync>),
    #[error("failed to spawn worker thread: {0}")]
    Spawn(Arc<io::Error>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// An error described only by its message.
    ///
    /// ```
    /// use future_out::Error;
    /// assert_eq!(Error::msg("Bad things").to_string(), "Bad things");
    /// ```
    pub fn msg(message: impl Display) -> Self {
        Error::Message(message.to_string())
    }

    /// Wraps any other error type.
    pub fn new<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Source(Arc::new(err))
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Spawn(Arc::new(err))
    }
}

impl From<&str> for Error {
    fn from(message: &str) -> Self {
        Error::msg(message)
    }
}

impl From<String> for Error {
    fn from(message: String) -> Self {
        Error::Message(message)
    }
}

/// The outcome of a computation that may fail, stored as plain data so it can
/// flow through a [`Future`](crate::Future) like any other value.
///
/// When `error` is `Some`, `value` holds `T::default()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueOrError<T, E = Error> {
    pub value: T,
    pub error: Option<E>,
}

impl<T, E> ValueOrError<T, E> {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn is_err(&self) -> bool {
        self.error.is_some()
    }

    /// Turns the pair back into a `Result`, dropping the placeholder value
    /// when an error is present.
    pub fn into_result(self) -> Result<T, E> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.value),
        }
    }
}

impl<T: Default, E> From<Result<T, E>> for ValueOrError<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => ValueOrError { value, error: None },
            Err(err) => ValueOrError {
                value: T::default(),
                error: Some(err),
            },
        }
    }
}
