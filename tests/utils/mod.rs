#![allow(dead_code, unused_imports)] // Different tests use a different subset of functions

mod input_stream;
mod upstream;

use std::io::{Read, Write};

pub use self::{
    input_stream::InputStream,
    upstream::{FailAtEnd, Interrupting, Upstream},
};
pub use std::iter::FromIterator;
pub use xz_stream::{DecoderOptions, Level, Reader, Source, Writer};

pub fn random_bytes(len: usize) -> Vec<u8> {
    Vec::from_iter((0..len).map(|_| rand::random()))
}

/// Bytes that compress well but are not trivially repetitive.
pub fn text_bytes(len: usize) -> Vec<u8> {
    b"the quick brown fox jumps over the lazy dog; "
        .iter()
        .cycle()
        .zip(0..len)
        .map(|(byte, i)| if i % 97 == 0 { b'#' } else { *byte })
        .collect()
}

pub fn read_to_vec(mut read: impl Read) -> Vec<u8> {
    let mut output = vec![];
    read.read_to_end(&mut output).unwrap();
    output
}

/// Read with a fixed buffer size instead of `read_to_end`'s growing one.
pub fn read_in_steps(mut read: impl Read, step: usize) -> Vec<u8> {
    let mut output = vec![];
    let mut buf = vec![0; step];
    loop {
        match read.read(&mut buf).unwrap() {
            0 => return output,
            n => output.extend_from_slice(&buf[..n]),
        }
    }
}

pub mod xz_stream_impl {
    use super::*;

    pub fn compress(input: &InputStream, level: Level) -> Vec<u8> {
        let mut writer = Writer::with_quality(Vec::new(), level).unwrap();
        for chunk in input.chunks() {
            writer.write_all(chunk).unwrap();
        }
        writer.finish().unwrap()
    }

    pub fn compress_bytes(input: &[u8]) -> Vec<u8> {
        compress(&InputStream::from(vec![input.to_vec()]), Level::Fastest)
    }

    pub fn decompress(source: impl Source) -> Vec<u8> {
        read_to_vec(Reader::from_source(source).unwrap())
    }

    pub fn decompress_bytes(input: &[u8]) -> Vec<u8> {
        read_to_vec(Reader::new(input).unwrap())
    }
}

/// Independent implementations to check compatibility against.
pub mod reference {
    use super::*;

    /// liblzma's own reader adaptor.
    pub fn compress(input: &[u8], level: u32) -> Vec<u8> {
        read_to_vec(liblzma::read::XzEncoder::new(input, level))
    }

    /// Pure Rust encoder from lzma-rs.
    pub fn compress_pure(mut input: &[u8]) -> Vec<u8> {
        let mut output = vec![];
        lzma_rs::xz_compress(&mut input, &mut output).unwrap();
        output
    }

    /// Pure Rust decoder from lzma-rs.
    pub fn decompress(mut input: &[u8]) -> Vec<u8> {
        let mut output = vec![];
        lzma_rs::xz_decompress(&mut input, &mut output).unwrap();
        output
    }

    /// The `xz` command line tool, if it is installed.
    pub fn decompress_with_cli(input: &[u8]) -> Option<Vec<u8>> {
        use std::process::{Command, Stdio};

        let mut child = match Command::new("xz")
            .arg("-d")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => panic!("spawning xz: {err}"),
        };

        let mut stdin = child.stdin.take().unwrap();
        let input = input.to_vec();
        let feeder = std::thread::spawn(move || stdin.write_all(&input).unwrap());

        let output = child.wait_with_output().unwrap();
        feeder.join().unwrap();
        assert!(output.status.success(), "xz -d failed");
        Some(output.stdout)
    }
}
