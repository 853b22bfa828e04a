/// Capacity of the engine's output window, in bytes.
///
/// Every engine invocation writes into this window and the adaptors drain it whenever it fills,
/// so it bounds how much compressed or decompressed data is held between drains. liblzma's own
/// tools use buffers of this size for their pipes.
pub const OUTPUT_WINDOW_SIZE: usize = 32 * 1024;

/// Upper bound on a single pull from the upstream source while decoding.
///
/// The decoder sizes pulls by the caller's read request, the only signal available about how
/// much output is wanted. Requests for huge reads would otherwise allocate an input window of the
/// same size.
pub const MAX_PULL_SIZE: usize = 256 * 1024;

/// Upper bound on the bytes a single [`Writer`](crate::Writer) `write` call accepts.
///
/// Each write copies what it accepts into the engine's input window, so larger buffers are taken
/// in pieces of this size rather than duplicated whole; `write_all` loops over them.
pub const MAX_WRITE_SIZE: usize = 8 * OUTPUT_WINDOW_SIZE;

/// Options for creating a [`Reader`](crate::Reader).
#[derive(Clone, Copy, Debug)]
pub struct DecoderOptions {
    mem_limit: u64,
    multiple_members: bool,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            mem_limit: u64::MAX,
            multiple_members: false,
        }
    }
}

impl DecoderOptions {
    /// Create the default options: no memory limit, a single stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the memory the decoder may allocate, in bytes.
    ///
    /// Streams that need more fail with
    /// [`Status::MemoryLimitError`](crate::codec::Status::MemoryLimitError).
    pub fn mem_limit(mut self, limit: u64) -> Self {
        self.mem_limit = limit;
        self
    }

    /// Decode any number of concatenated `.xz` streams, including stream padding between them,
    /// as one output.
    ///
    /// When disabled, decoding stops at the end of the first stream and any bytes following it
    /// are ignored.
    pub fn multiple_members(mut self, enabled: bool) -> Self {
        self.multiple_members = enabled;
        self
    }

    pub(crate) fn get_mem_limit(&self) -> u64 {
        self.mem_limit
    }

    pub(crate) fn is_multiple_members(&self) -> bool {
        self.multiple_members
    }
}
