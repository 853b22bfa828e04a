//! Compression through a [`std::io::Write`] sink.

use std::io::{self, Write};

use tracing::debug;

use crate::{
    codec::{Action, Engine, LzmaEngine},
    config::MAX_WRITE_SIZE,
    error::Error,
    flow,
    session::Session,
    Level,
};

#[derive(Debug)]
enum State {
    Open,
    Finished,
    Failed(Error),
}

/// Compresses everything written to it into an `.xz` stream on the wrapped sink.
///
/// Compressed bytes are handed to the sink as they are produced, but the compressor buffers a
/// good deal internally: the stream is only complete once [`Writer::close`] (or
/// [`Writer::finish`]) has returned successfully. Dropping a writer without closing it releases
/// the compressor but leaves a truncated stream behind.
///
/// A single `write` accepts at most [`MAX_WRITE_SIZE`](crate::MAX_WRITE_SIZE) bytes.
///
/// Any error leaves the writer failed; every later call reports the same error again.
///
/// ```
/// use std::io::Write;
///
/// let mut writer = xz_stream::Writer::new(Vec::new())?;
/// writer.write_all(b"my string to compress")?;
/// let compressed = writer.finish()?;
///
/// assert_eq!(&compressed[..6], b"\xFD7zXZ\x00");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct Writer<W, E = LzmaEngine> {
    writer: W,
    session: Session<E>,
    state: State,
}

impl<W: Write> Writer<W> {
    /// Compress at [`Level::Default`].
    pub fn new(writer: W) -> io::Result<Self> {
        Self::with_quality(writer, Level::Default)
    }

    /// Compress at a numeric preset level.
    ///
    /// Levels outside [`BEST_SPEED`](crate::BEST_SPEED)..=[`BEST_COMPRESSION`](crate::BEST_COMPRESSION)
    /// are moved to the nearest bound.
    pub fn with_level(writer: W, level: i32) -> io::Result<Self> {
        Self::with_quality(writer, Level::clamped(level))
    }

    /// Compress at the given [`Level`].
    pub fn with_quality(writer: W, level: Level) -> io::Result<Self> {
        let engine = LzmaEngine::encoder(level.into_preset())?;
        Ok(Self::with_engine(writer, engine))
    }
}

impl<W: Write, E: Engine> Writer<W, E> {
    /// Drive a custom compression engine instead of the default liblzma encoder.
    pub fn with_engine(writer: W, engine: E) -> Self {
        Self {
            writer,
            session: Session::new(engine),
            state: State::Open,
        }
    }

    /// Finish the stream: push out all remaining compressed data, flush the sink and release
    /// the compressor.
    ///
    /// The compressor is released even if this fails. Closing an already closed writer does
    /// nothing; closing a failed writer reports its error again.
    pub fn close(&mut self) -> io::Result<()> {
        match &self.state {
            State::Open => {}
            State::Finished => return Ok(()),
            State::Failed(err) => return Err(err.replay().into()),
        }

        let result = flow::run(&mut self.session, Action::Finish, &mut self.writer)
            .and_then(|_| self.writer.flush().map_err(Error::from));

        self.session.release();

        match result {
            Ok(()) => {
                debug!(
                    total_in = self.session.total_in(),
                    total_out = self.session.total_out(),
                    "finished xz stream"
                );
                self.state = State::Finished;
                Ok(())
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// [`close`](Self::close) the writer and hand back the sink.
    pub fn finish(mut self) -> io::Result<W> {
        self.close()?;
        Ok(self.writer)
    }

    /// Uncompressed bytes accepted so far.
    pub fn total_in(&self) -> u64 {
        self.session.total_in()
    }

    /// Compressed bytes produced so far.
    pub fn total_out(&self) -> u64 {
        self.session.total_out()
    }

    fn fail(&mut self, err: Error) -> io::Error {
        self.session.release();
        self.state = State::Failed(err.replay());
        err.into()
    }
}

impl<W, E> Writer<W, E> {
    /// Acquires a reference to the underlying sink.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Acquires a mutable reference to the underlying sink.
    ///
    /// Writing to the sink directly will corrupt the compressed stream.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Consumes this writer returning the underlying sink, whether or not the stream was
    /// finished.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write, E: Engine> Write for Writer<W, E> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &self.state {
            State::Open => {}
            State::Finished => return Err(Error::Misuse("write after close").into()),
            State::Failed(err) => return Err(err.replay().into()),
        }

        if buf.is_empty() {
            return Ok(0);
        }

        let previous_in = self.session.total_in();
        let accepted = &buf[..buf.len().min(MAX_WRITE_SIZE)];

        let result = self
            .session
            .input
            .stage(accepted)
            .and_then(|()| flow::run(&mut self.session, Action::Continue, &mut self.writer));

        match result {
            Ok(_) => Ok((self.session.total_in() - previous_in) as usize),
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Flushes the sink.
    ///
    /// Everything the compressor has emitted is already on the sink by the time `write`
    /// returns, so this does not force the compressor to emit buffered data.
    fn flush(&mut self) -> io::Result<()> {
        if let State::Failed(err) = &self.state {
            return Err(err.replay().into());
        }
        self.writer.flush()
    }
}
