use crate::error::{Error, Result};

pub(crate) const fn _assert_send<T: Send>() {}

/// Bytes staged for the engine to consume.
///
/// `buffer` only ever grows; `filled` marks how much of it holds staged bytes, `index` how far the
/// engine has read, and `total` counts every byte consumed over the life of the session.
#[derive(Debug, Default)]
pub(crate) struct InputWindow {
    buffer: Vec<u8>,
    filled: usize,
    index: usize,
    total: u64,
}

impl InputWindow {
    /// Bytes staged but not yet consumed.
    pub(crate) fn unwritten(&self) -> &[u8] {
        &self.buffer[self.index..self.filled]
    }

    pub(crate) fn remaining(&self) -> usize {
        self.filled - self.index
    }

    pub(crate) fn total(&self) -> u64 {
        self.total
    }

    pub(crate) fn advance(&mut self, amount: usize) {
        debug_assert!(amount <= self.remaining());
        self.index += amount;
        self.total += amount as u64;
    }

    /// Replace the window contents with a copy of `bytes`.
    pub(crate) fn stage(&mut self, bytes: &[u8]) -> Result<()> {
        self.prepare(bytes.len())?.copy_from_slice(bytes);
        Ok(())
    }

    /// Hand out `len` bytes of space to fill in place, to be followed by [`Self::commit`].
    ///
    /// Space is only zeroed when the window has to grow.
    pub(crate) fn prepare(&mut self, len: usize) -> Result<&mut [u8]> {
        self.ensure_exhausted()?;
        if self.buffer.len() < len {
            self.buffer.resize(len, 0);
        }
        self.index = 0;
        self.filled = len;
        Ok(&mut self.buffer[..len])
    }

    /// Keep the first `filled` bytes handed out by the last [`Self::prepare`].
    pub(crate) fn commit(&mut self, filled: usize) -> Result<()> {
        if filled > self.filled {
            self.filled = 0;
            return Err(Error::Misuse("source reported more bytes than it was given"));
        }
        self.filled = filled;
        Ok(())
    }

    /// Bytes allocated for staging, whether filled or not.
    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.buffer.len()
    }

    fn ensure_exhausted(&self) -> Result<()> {
        if self.remaining() > 0 {
            return Err(Error::Misuse("staged input has not been consumed yet"));
        }
        Ok(())
    }
}

/// Fixed capacity space the engine writes into.
#[derive(Debug)]
pub(crate) struct OutputWindow {
    buffer: Box<[u8]>,
    index: usize,
    total: u64,
}

impl OutputWindow {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            buffer: vec![0; capacity].into_boxed_slice(),
            index: 0,
            total: 0,
        }
    }

    /// Bytes produced since the last reset.
    pub(crate) fn written(&self) -> &[u8] {
        &self.buffer[..self.index]
    }

    pub(crate) fn unwritten_mut(&mut self) -> &mut [u8] {
        &mut self.buffer[self.index..]
    }

    pub(crate) fn remaining(&self) -> usize {
        self.buffer.len() - self.index
    }

    pub(crate) fn total(&self) -> u64 {
        self.total
    }

    pub(crate) fn advance(&mut self, amount: usize) {
        debug_assert!(amount <= self.remaining());
        self.index += amount;
        self.total += amount as u64;
    }

    /// Make the whole capacity available again; call once `written` has been drained.
    pub(crate) fn reset(&mut self) {
        self.index = 0;
    }
}
