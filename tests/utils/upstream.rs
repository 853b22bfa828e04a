use std::io::{self, Read};

use xz_stream::{Pull, Source};

/// A [`Source`] over in-memory bytes that can be made as awkward as real upstreams get.
#[derive(Debug, Clone)]
pub struct Upstream {
    data: Vec<u8>,
    pos: usize,
    chunk: usize,
    stutter: bool,
    empty_next: bool,
    pub pulls: usize,
}

impl Upstream {
    /// Hands out as much as each pull asks for, then reports exhaustion on the following pull.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            pos: 0,
            chunk: usize::MAX,
            stutter: false,
            empty_next: false,
            pulls: 0,
        }
    }

    /// Hands out at most `chunk` bytes per pull.
    pub fn chunked(data: impl Into<Vec<u8>>, chunk: usize) -> Self {
        Self {
            chunk,
            ..Self::new(data)
        }
    }

    /// Hands out a single byte per pull.
    pub fn one_byte(data: impl Into<Vec<u8>>) -> Self {
        Self::chunked(data, 1)
    }

    /// Every other pull delivers nothing without being the end.
    pub fn stuttering(mut self) -> Self {
        self.stutter = true;
        self.empty_next = true;
        self
    }
}

impl Source for Upstream {
    fn pull(&mut self, buf: &mut [u8]) -> io::Result<Pull> {
        assert!(!buf.is_empty(), "pulled with an empty buffer");
        self.pulls += 1;

        if self.stutter {
            self.empty_next = !self.empty_next;
            if !self.empty_next {
                return Ok(Pull::Empty);
            }
        }

        let rest = &self.data[self.pos..];
        if rest.is_empty() {
            return Ok(Pull::Exhausted);
        }

        let n = rest.len().min(buf.len()).min(self.chunk);
        buf[..n].copy_from_slice(&rest[..n]);
        self.pos += n;
        Ok(Pull::Data(n))
    }
}

/// A [`Read`] that is interrupted before every successful read.
#[derive(Debug)]
pub struct Interrupting<R> {
    inner: R,
    interrupt: bool,
}

impl<R> Interrupting<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            interrupt: true,
        }
    }
}

impl<R: Read> Read for Interrupting<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.interrupt = !self.interrupt;
        if !self.interrupt {
            return Err(io::ErrorKind::Interrupted.into());
        }
        self.inner.read(buf)
    }
}

/// A [`Read`] that fails once its data runs out instead of reporting the end.
#[derive(Debug)]
pub struct FailAtEnd<R> {
    inner: R,
}

impl<R> FailAtEnd<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: Read> Read for FailAtEnd<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.inner.read(buf)? {
            0 => Err(io::Error::new(io::ErrorKind::ConnectionAborted, "upstream hung up")),
            n => Ok(n),
        }
    }
}
