//! The seam between the stream adaptors and the compression engine.
//!
//! An [`Engine`] is a stateful transform over two windows: it reads from an input slice, writes
//! into an output slice, and reports how far it got along with a [`Status`]. Everything about
//! turning that into byte-stream semantics lives in the adaptors, not here.

use std::fmt;

mod lzma;

pub use self::lzma::LzmaEngine;

/// Mode of a single engine invocation.
///
/// The adaptors only ever issue [`Action::Continue`] and [`Action::Finish`]; the flush and barrier
/// actions are part of the engine contract and are passed through untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Ordinary incremental processing.
    Continue,
    /// Flush all pending output while keeping the current block open.
    SyncFlush,
    /// Flush all pending output and finish the current block.
    FullFlush,
    /// No more input will follow; produce everything that remains.
    Finish,
    /// Finish the current block without flushing every pending byte.
    FullBarrier,
}

/// Result code of a single engine invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// Progress was made, call again.
    Ok,
    /// The end of the stream was reached.
    End,
    /// The input stream has no integrity check.
    NoCheck,
    /// The integrity check of the input stream cannot be verified.
    UnsupportedCheck,
    /// The integrity check type is now known.
    GetCheck,
    /// The engine could not allocate memory.
    MemoryError,
    /// Decoding needs more memory than the configured limit.
    MemoryLimitError,
    /// The input is not in a recognized format.
    FormatError,
    /// The engine was configured with invalid or unsupported options.
    OptionsError,
    /// The compressed data is corrupt.
    DataError,
    /// No progress is possible with the given windows.
    BufferError,
    /// The engine was driven incorrectly.
    ProgrammingError,
    /// The engine needs to seek in its input.
    SeekNeeded,
}

impl Status {
    /// Whether this status belongs to the success family (`Ok` or `End`).
    pub fn is_ok(self) -> bool {
        matches!(self, Status::Ok | Status::End)
    }

    /// Whether this status belongs to the error family.
    pub fn is_err(self) -> bool {
        !self.is_ok()
    }

    fn as_str(self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::End => "STREAM_END",
            Status::NoCheck => "NO_CHECK",
            Status::UnsupportedCheck => "UNSUPPORTED_CHECK",
            Status::GetCheck => "GET_CHECK",
            Status::MemoryError => "MEMORY_ERROR",
            Status::MemoryLimitError => "MEMORY_LIMIT_ERROR",
            Status::FormatError => "FORMAT_ERROR",
            Status::OptionsError => "OPTIONS_ERROR",
            Status::DataError => "DATA_ERROR",
            Status::BufferError => "BUFFER_ERROR",
            Status::ProgrammingError => "PROGRAMMING_ERROR",
            Status::SeekNeeded => "SEEK_NEEDED",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one [`Engine::process`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    /// Bytes read from the front of the input slice.
    pub consumed: usize,
    /// Bytes written to the front of the output slice.
    pub produced: usize,
    /// Status reported by the engine.
    pub status: Status,
}

/// A stateful compression or decompression transform.
///
/// Implementations must never report more consumed or produced bytes than the slices they were
/// handed. Resources held by the engine are released when it is dropped.
pub trait Engine {
    /// Run the engine once over the given windows.
    fn process(&mut self, input: &[u8], output: &mut [u8], action: Action) -> Step;
}

impl<E: Engine + ?Sized> Engine for Box<E> {
    fn process(&mut self, input: &[u8], output: &mut [u8], action: Action) -> Step {
        (**self).process(input, output, action)
    }
}
