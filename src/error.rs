//! # Errors
//!
//! Error types used across the crate, including by the capability traits
//! (`ConfigStore`, `KeyGenerator`, `MultibaseCodec`) that may be implemented in
//! other crates.

use std::fmt::Display;

use thiserror::Error;

/// Log an error with `tracing` and return it from the current function.
///
/// # Example
/// ```
/// use did_web_atproto::error::Err;
/// use did_web_atproto::{Result, tracerr};
///
/// fn with_msg() -> Result<()> {
///     tracerr!(Err::InvalidInput, "message: {}", "some message")
/// }
///
/// fn no_msg() -> Result<()> {
///     tracerr!(Err::InvalidInput)
/// }
/// ```
#[macro_export]
macro_rules! tracerr {
    // with context
    ($code:expr, $($msg:tt)*) => {
        {
        use $crate::error::Context as _;
        tracing::error!($($msg)*);
        return Err($code).context(format!($($msg)*));
        }
    };
    // no context
    ($code:expr) => {
        {
        tracing::error!("{}", $code);
        return Err($code.into());
        }
    }
}

/// Public error type.
#[derive(Error, Debug)]
#[error(transparent)]
pub struct Error(#[from] anyhow::Error);

impl Error {
    /// Render the error as an `OAuth2`-style JSON object.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": self.0.root_cause().to_string(),
            "error_description": self.to_string(),
        })
    }

    /// Returns true if the error is of kind `err`.
    #[must_use]
    pub fn is(&self, err: Err) -> bool {
        self.0.downcast_ref::<Err>().is_some_and(|e| e == &err)
    }
}

/// Typed error kinds.
#[derive(Clone, Copy, Error, Debug, PartialEq, Eq)]
pub enum Err {
    /// No key generation capability is available.
    #[error("generation_unavailable")]
    GenerationUnavailable,

    /// The public key cannot be converted to a multibase value.
    #[error("encoding_unavailable")]
    EncodingUnavailable,

    /// A value read back from storage differs from the value just written.
    #[error("persistence_mismatch")]
    PersistenceMismatch,

    /// The operation requires an identity that does not exist.
    #[error("not_found")]
    NotFound,

    /// Input could not be parsed or is otherwise invalid. (See context for
    /// details)
    #[error("invalid_input")]
    InvalidInput,

    /// The configuration store failed to read, write or delete a value.
    #[error("storage_error")]
    StorageError,

    /// An error occurred trying to serialize data.
    #[error("serialization_error")]
    SerializationError,
}

/// Context is used to decorate errors with useful context information.
pub trait Context<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    /// Adds context to the error.
    ///
    /// # Errors
    ///
    /// * Original error with context appended.
    fn context<C>(self, context: C) -> Result<T, Error>
    where
        C: Display + Send + Sync + 'static;
}

impl<T, E> Context<T, E> for core::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T, Error>
    where
        C: Display + Send + Sync + 'static,
    {
        match self {
            Ok(ok) => Ok(ok),
            Err(e) => Err(Error(anyhow::Error::from(e).context(context))),
        }
    }
}

impl From<Err> for Error {
    fn from(error: Err) -> Self {
        Self(error.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self(anyhow::Error::from(err).context(Err::SerializationError))
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self(anyhow::Error::from(err).context(Err::InvalidInput))
    }
}
