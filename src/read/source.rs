use std::io::{self, Read};

/// Outcome of a single pull from a [`Source`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pull {
    /// This many bytes were written to the front of the buffer.
    Data(usize),
    /// Nothing arrived this time, but more may still follow.
    Empty,
    /// No more bytes will ever arrive.
    Exhausted,
}

/// Upstream supply of compressed bytes for a [`Reader`](crate::Reader).
///
/// Unlike [`Read`], a source can say "nothing yet" without also saying "nothing ever", so the
/// decoder's choice between retrying and finishing is made on explicit states.
pub trait Source {
    /// Fill the front of `buf` with the next bytes, reporting how the attempt went.
    ///
    /// `buf` is never empty, and [`Pull::Data`] must not report more than `buf.len()` bytes.
    fn pull(&mut self, buf: &mut [u8]) -> io::Result<Pull>;
}

impl<S: Source + ?Sized> Source for &mut S {
    fn pull(&mut self, buf: &mut [u8]) -> io::Result<Pull> {
        (**self).pull(buf)
    }
}

impl<S: Source + ?Sized> Source for Box<S> {
    fn pull(&mut self, buf: &mut [u8]) -> io::Result<Pull> {
        (**self).pull(buf)
    }
}

/// [`Source`] over any [`Read`].
///
/// `Ok(0)` is the end of the input and an [`io::ErrorKind::Interrupted`] error is an empty pull
/// to be retried; every other error is passed on.
#[derive(Debug)]
pub struct ReadSource<R> {
    reader: R,
}

impl<R: Read> ReadSource<R> {
    /// Wrap a reader.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R> ReadSource<R> {
    /// Acquires a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Acquires a mutable reference to the underlying reader.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Consumes this source returning the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> Source for ReadSource<R> {
    fn pull(&mut self, buf: &mut [u8]) -> io::Result<Pull> {
        match self.reader.read(buf) {
            Ok(0) => Ok(Pull::Exhausted),
            Ok(n) => Ok(Pull::Data(n)),
            Err(err) if err.kind() == io::ErrorKind::Interrupted => Ok(Pull::Empty),
            Err(err) => Err(err),
        }
    }
}
