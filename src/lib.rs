//! Streaming `.xz` compression and decompression over Rust's blocking IO traits.
//!
//! [`Writer`] compresses everything written to it into a [`std::io::Write`] sink, and [`Reader`]
//! decompresses a stream pulled from an upstream [`Source`] (any [`std::io::Read`] works) and
//! serves it through [`std::io::Read`].
//!
//! The compression itself is done by liblzma, using a single LZMA2 filter configured from an
//! integer preset and a CRC64 integrity check. This crate is only concerned with moving bytes in
//! and out of it correctly, whatever sizes callers write and read in and however the upstream
//! source chooses to deliver its data.
//!
//! ```
//! use std::io::{Read, Write};
//!
//! let input = b"my string to compress";
//!
//! let mut writer = xz_stream::Writer::with_level(Vec::new(), xz_stream::BEST_COMPRESSION)?;
//! writer.write_all(input)?;
//! let compressed = writer.finish()?;
//!
//! let mut output = Vec::new();
//! xz_stream::Reader::new(&compressed[..])?.read_to_end(&mut output)?;
//!
//! assert_eq!(output, input);
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! # Engines
//!
//! Both adaptors are generic over the [`codec::Engine`] they drive, defaulting to
//! [`codec::LzmaEngine`]. They are not safe for concurrent use; each adaptor owns its engine
//! exclusively and releases it when closed, when it fails, or when dropped.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_copy_implementations,
    missing_debug_implementations
)]

pub mod codec;
mod config;
mod error;
mod flow;
pub mod read;
mod session;
mod util;
pub mod write;

pub use crate::{
    config::{DecoderOptions, MAX_PULL_SIZE, MAX_WRITE_SIZE, OUTPUT_WINDOW_SIZE},
    error::Error,
    read::{Pull, ReadSource, Reader, Source},
    write::Writer,
};

use tracing::warn;

/// Fastest preset level.
pub const BEST_SPEED: i32 = 0;
/// Preset level used when none is given.
pub const DEFAULT_COMPRESSION: i32 = 6;
/// Preset level producing the smallest output.
pub const BEST_COMPRESSION: i32 = 9;

/// Level of compression data should be compressed with.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// Fastest quality of compression, usually produces bigger size.
    Fastest,
    /// Best quality of compression, usually produces the smallest size.
    Best,
    /// Default quality of compression, preset 6.
    Default,
    /// Precise liblzma preset. Presets above 9 are implicitly clamped to 9.
    Precise(u32),
}

impl Level {
    /// Level for a numeric preset, moving out of range presets to the nearest bound.
    pub(crate) fn clamped(level: i32) -> Self {
        let clamped = level.clamp(BEST_SPEED, BEST_COMPRESSION);
        if clamped != level {
            warn!(level, clamped, "compression level out of range, using nearest bound");
        }
        Self::Precise(clamped as u32)
    }

    pub(crate) fn into_preset(self) -> u32 {
        match self {
            Self::Fastest => BEST_SPEED as u32,
            Self::Best => BEST_COMPRESSION as u32,
            Self::Precise(quality) => quality.min(BEST_COMPRESSION as u32),
            Self::Default => DEFAULT_COMPRESSION as u32,
        }
    }
}

const _: () = {
    util::_assert_send::<Writer<Vec<u8>>>();
    util::_assert_send::<Reader<ReadSource<&'static [u8]>>>();
};
