use std::io;

use crate::codec::Status;

/// Errors produced by the xz adaptors.
///
/// The adaptors implement [`std::io::Read`] and [`std::io::Write`], so these reach callers wrapped
/// in an [`io::Error`]. Underlying IO failures are handed back unchanged; anything else can be
/// recovered with [`io::Error::get_ref`] and `downcast_ref::<Error>()`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The engine reported a status from the error family.
    #[error("lzma engine returned {0}")]
    Codec(Status),

    /// The upstream source ended before the end of the compressed stream.
    #[error("xz stream is truncated")]
    Truncated,

    /// The adaptor was used in a way its protocol does not allow.
    #[error("{0}")]
    Misuse(&'static str),

    /// The underlying sink or source failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    /// The engine status behind this error, if there is one.
    pub fn status(&self) -> Option<Status> {
        match self {
            Error::Codec(status) => Some(*status),
            _ => None,
        }
    }

    fn kind(&self) -> io::ErrorKind {
        match self {
            Error::Codec(Status::MemoryError | Status::MemoryLimitError) => {
                io::ErrorKind::OutOfMemory
            }
            Error::Codec(
                Status::DataError
                | Status::FormatError
                | Status::NoCheck
                | Status::UnsupportedCheck
                | Status::GetCheck,
            ) => io::ErrorKind::InvalidData,
            Error::Codec(_) | Error::Misuse(_) => io::ErrorKind::Other,
            Error::Truncated => io::ErrorKind::UnexpectedEof,
            Error::Io(err) => err.kind(),
        }
    }

    /// A copy of this error to hand out again on later calls.
    ///
    /// IO errors cannot be cloned, so repeats of them keep the kind and message only.
    pub(crate) fn replay(&self) -> Error {
        match self {
            Error::Codec(status) => Error::Codec(*status),
            Error::Truncated => Error::Truncated,
            Error::Misuse(msg) => Error::Misuse(*msg),
            Error::Io(err) => Error::Io(io::Error::new(err.kind(), err.to_string())),
        }
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> io::Error {
        match err {
            Error::Io(err) => err,
            other => io::Error::new(other.kind(), other),
        }
    }
}

pub(crate) type Result<T, E = Error> = std::result::Result<T, E>;
