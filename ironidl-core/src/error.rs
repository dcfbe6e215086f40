//! Error types for IronIDL runtime operations.

use crate::exception::ApplicationException;
use thiserror::Error;

/// A declared IDL exception raised by a handler or decoded by a client.
///
/// Generated exception structs implement `std::error::Error`, so they box into
/// this type and are recovered with `downcast`.
pub type UserError = Box<dyn std::error::Error + Send + Sync>;

/// Category of a protocol-level failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtocolErrorKind {
    /// Input ended before a complete value was read.
    UnexpectedEof,
    /// A size prefix was negative.
    NegativeSize,
    /// A message header carried an unknown version.
    BadVersion,
    /// A wire or message kind byte had no known meaning.
    InvalidData,
    /// Nested values exceeded the skip depth limit.
    DepthLimit,
}

/// Core error type returned by generated code and protocols.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or truncated wire data.
    #[error("protocol error ({kind:?}): {message}")]
    Protocol {
        /// Failure category.
        kind: ProtocolErrorKind,
        /// Error message.
        message: String,
    },

    /// Application exception reported by the remote side.
    #[error("application exception: {0}")]
    Application(#[from] ApplicationException),

    /// Declared IDL exception.
    #[error("user exception: {0}")]
    User(UserError),

    /// Transport I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates a protocol error.
    pub fn protocol(kind: ProtocolErrorKind, message: impl Into<String>) -> Self {
        Self::Protocol {
            kind,
            message: message.into(),
        }
    }

    /// Wraps a declared exception value.
    pub fn user<E>(exception: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::User(Box::new(exception))
    }

    /// Returns the protocol error kind, if this is a protocol error.
    #[must_use]
    pub fn protocol_kind(&self) -> Option<ProtocolErrorKind> {
        match self {
            Self::Protocol { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// Result type alias for IronIDL runtime operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exception::ApplicationExceptionKind;

    #[derive(Debug)]
    struct Ouch;

    impl std::fmt::Display for Ouch {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "ouch")
        }
    }

    impl std::error::Error for Ouch {}

    #[test]
    fn test_protocol_error_display() {
        let err = Error::protocol(ProtocolErrorKind::NegativeSize, "list size -1");
        assert_eq!(err.protocol_kind(), Some(ProtocolErrorKind::NegativeSize));
        assert!(err.to_string().contains("list size -1"));
    }

    #[test]
    fn test_user_error_downcast() {
        let err = Error::user(Ouch);
        match err {
            Error::User(inner) => assert!(inner.downcast::<Ouch>().is_ok()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_application_error_from() {
        let x = ApplicationException::new(ApplicationExceptionKind::MissingResult, "no result");
        let err: Error = x.into();
        assert!(err.protocol_kind().is_none());
        assert!(err.to_string().contains("no result"));
    }
}
