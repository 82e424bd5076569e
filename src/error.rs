//! Error types of the protocol layer.
//!
//! [`Error`] covers everything that can go wrong while moving a message
//! between bytes and typed values. NFS status codes are not errors here:
//! they travel inside procedure results. [`HandlerError`] is what a
//! [`NfsHandler`](crate::handler::NfsHandler) reports when it could not
//! produce a result at all.

use crate::protocol::xdr::nfs3::nfsstat3;

/// Errors raised while framing, decoding, validating or encoding a message.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Record marking is incomplete or malformed.
    #[error("malformed record: {0}")]
    Framing(String),

    /// The payload could not be decoded.
    #[error("failed to decode message: {0}")]
    Decode(#[source] std::io::Error),

    /// A value could not be encoded, e.g. an oversized file handle.
    #[error("failed to encode message: {0}")]
    Encode(#[source] std::io::Error),

    /// A record or fragment is longer than the configured limit.
    #[error("record of {length} bytes exceeds the limit of {limit} bytes")]
    RecordTooLarge { length: usize, limit: usize },

    /// The message is well formed but not the one expected here,
    /// e.g. a REPLY where a CALL was expected.
    #[error("unexpected message: {0}")]
    UnexpectedMessage(String),

    /// A reply carries a status its procedure is not allowed to return,
    /// or a failure body with `NFS3_OK`.
    #[error("{procedure} cannot reply with {status:?}")]
    DisallowedStatus { procedure: &'static str, status: nfsstat3 },

    /// The encoded size differs from the precomputed one.
    #[error("encoded {actual} bytes, expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    /// The transport failed.
    #[error(transparent)]
    Io(std::io::Error),
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::Decode(error)
    }
}

/// Failures of a request handler that are not expressible as an NFS status.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// The handler does not implement the procedure. The caller receives
    /// an RPC `PROC_UNAVAIL` reply.
    #[error("procedure is not implemented")]
    Unimplemented,

    /// The handler failed. The caller receives `NFS3ERR_SERVERFAULT`.
    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

/// Result type returned by request handlers.
pub type HandlerResult<T> = Result<T, HandlerError>;
