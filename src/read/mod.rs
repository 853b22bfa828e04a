//! Decompression from an upstream source.

use std::{
    collections::VecDeque,
    io::{self, Read},
};

use tracing::{debug, warn};

use crate::{
    codec::{Action, Engine, LzmaEngine},
    config::{DecoderOptions, MAX_PULL_SIZE},
    error::{Error, Result},
    flow::{self, Progress},
    session::Session,
};

mod source;

pub use self::source::{Pull, ReadSource, Source};

#[derive(Debug)]
enum State {
    /// More upstream bytes may arrive.
    Decoding,
    /// The stream has ended; only buffered output is left.
    Draining,
    /// Everything has been handed out.
    Done,
    Failed(Error),
    Closed,
}

/// Decompresses an `.xz` stream pulled from an upstream [`Source`].
///
/// Reads may ask for any number of bytes, and the source may deliver its bytes in pieces of any
/// size, including empty ones, and report its end on a later pull than its last data. `Ok(0)` is
/// only returned for an empty `buf` or once the whole stream has been decoded and handed out.
///
/// A stream whose source ends before the end of the xz stream is an
/// [`io::ErrorKind::UnexpectedEof`] error. Errors are sticky: every later read reports the
/// same error without touching the source or the decompressor again.
///
/// ```
/// use std::io::{Read, Write};
///
/// let mut writer = xz_stream::Writer::new(Vec::new())?;
/// writer.write_all(b"my string to compress")?;
/// let compressed = writer.finish()?;
///
/// let mut reader = xz_stream::Reader::new(&compressed[..])?;
/// let mut output = String::new();
/// reader.read_to_string(&mut output)?;
///
/// assert_eq!(output, "my string to compress");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct Reader<S, E = LzmaEngine> {
    source: S,
    session: Session<E>,
    pending: VecDeque<u8>,
    state: State,
}

impl<R: Read> Reader<ReadSource<R>> {
    /// Decompress a single stream read from `reader`.
    pub fn new(reader: R) -> io::Result<Self> {
        Self::from_source(ReadSource::new(reader))
    }
}

impl<S: Source> Reader<S> {
    /// Decompress a single stream pulled from `source`.
    pub fn from_source(source: S) -> io::Result<Self> {
        Self::with_options(source, DecoderOptions::default())
    }

    /// Decompress from `source` with the given options.
    pub fn with_options(source: S, options: DecoderOptions) -> io::Result<Self> {
        let engine = LzmaEngine::decoder(&options)?;
        Ok(Self::with_engine(source, engine))
    }
}

impl<S: Source, E: Engine> Reader<S, E> {
    /// Drive a custom decompression engine instead of the default liblzma decoder.
    pub fn with_engine(source: S, engine: E) -> Self {
        Self {
            source,
            session: Session::new(engine),
            pending: VecDeque::new(),
            state: State::Decoding,
        }
    }

    /// Release the decompressor. Reads after this fail; closing again does nothing.
    pub fn close(&mut self) -> io::Result<()> {
        self.session.release();
        self.pending.clear();
        self.state = State::Closed;
        Ok(())
    }

    /// Compressed bytes consumed so far.
    pub fn total_in(&self) -> u64 {
        self.session.total_in()
    }

    /// Decompressed bytes produced so far, including those not yet read.
    pub fn total_out(&self) -> u64 {
        self.session.total_out()
    }

    /// Pull one batch from upstream and decode it into `pending`.
    fn fill(&mut self, wanted: usize) -> Result<()> {
        let space = self.session.input.prepare(wanted.clamp(1, MAX_PULL_SIZE))?;
        let pulled = self.source.pull(space);

        let filled = match pulled {
            Ok(Pull::Data(n)) => n,
            _ => 0,
        };
        self.session.input.commit(filled)?;

        let action = match pulled? {
            Pull::Data(_) => Action::Continue,
            Pull::Empty => return Ok(()),
            Pull::Exhausted => Action::Finish,
        };

        let progress = flow::run(&mut self.session, action, &mut self.pending)?;

        if progress == Progress::StreamEnd || action == Action::Finish {
            let trailing = self.session.input.remaining();
            if trailing > 0 {
                warn!(trailing, "ignoring data after the end of the xz stream");
            }
            self.session.release();
            self.state = State::Draining;
        }

        Ok(())
    }

    fn fail(&mut self, err: Error) -> io::Error {
        self.session.release();
        self.state = State::Failed(err.replay());
        err.into()
    }
}

impl<S, E> Reader<S, E> {
    /// Acquires a reference to the underlying source.
    pub fn get_ref(&self) -> &S {
        &self.source
    }

    /// Acquires a mutable reference to the underlying source.
    ///
    /// Pulling from the source directly will corrupt the decompressed stream.
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Consumes this reader returning the underlying source.
    ///
    /// Upstream bytes already pulled but not decoded are lost.
    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S: Source, E: Engine> Read for Reader<S, E> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        match &self.state {
            State::Decoding | State::Draining => {}
            State::Done => return Ok(0),
            State::Failed(err) => return Err(err.replay().into()),
            State::Closed => return Err(Error::Misuse("read after close").into()),
        }

        while matches!(self.state, State::Decoding) && self.pending.len() < buf.len() {
            if let Err(err) = self.fill(buf.len()) {
                return Err(self.fail(err));
            }
        }

        let n = self.pending.read(buf)?;
        if n == 0 {
            debug!(
                total_in = self.session.total_in(),
                total_out = self.session.total_out(),
                "finished xz stream"
            );
            self.state = State::Done;
        }
        Ok(n)
    }
}
