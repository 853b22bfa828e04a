use std::fmt;

use liblzma::stream::{self, Check, Stream};

use crate::{
    codec::{Action, Engine, Status, Step},
    config::DecoderOptions,
    error::Error,
};

/// [`Engine`] backed by liblzma, producing and consuming `.xz` streams with a single LZMA2
/// filter.
pub struct LzmaEngine {
    stream: Stream,
}

impl fmt::Debug for LzmaEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LzmaEngine")
            .field("total_in", &self.stream.total_in())
            .field("total_out", &self.stream.total_out())
            .finish_non_exhaustive()
    }
}

impl LzmaEngine {
    /// Create an encoder using the given preset, which must already be within `0..=9`.
    pub fn encoder(preset: u32) -> Result<Self, Error> {
        let stream = Stream::new_easy_encoder(preset, Check::Crc64)
            .map_err(|err| Error::Codec(convert_error(err)))?;
        Ok(Self { stream })
    }

    /// Create a `.xz` stream decoder.
    pub fn decoder(options: &DecoderOptions) -> Result<Self, Error> {
        let flags = if options.is_multiple_members() {
            stream::CONCATENATED
        } else {
            0
        };
        let stream = Stream::new_stream_decoder(options.get_mem_limit(), flags)
            .map_err(|err| Error::Codec(convert_error(err)))?;
        Ok(Self { stream })
    }
}

impl Engine for LzmaEngine {
    fn process(&mut self, input: &[u8], output: &mut [u8], action: Action) -> Step {
        let previous_in = self.stream.total_in();
        let previous_out = self.stream.total_out();

        let result = self.stream.process(input, output, convert_action(action));

        let status = match result {
            Ok(stream::Status::Ok) => Status::Ok,
            Ok(stream::Status::StreamEnd) => Status::End,
            Ok(stream::Status::GetCheck) => Status::GetCheck,
            // liblzma reports LZMA_BUF_ERROR through this variant
            Ok(stream::Status::MemNeeded) => Status::BufferError,
            Err(err) => convert_error(err),
        };

        Step {
            consumed: (self.stream.total_in() - previous_in) as usize,
            produced: (self.stream.total_out() - previous_out) as usize,
            status,
        }
    }
}

fn convert_action(action: Action) -> stream::Action {
    match action {
        Action::Continue => stream::Action::Run,
        Action::SyncFlush => stream::Action::SyncFlush,
        Action::FullFlush => stream::Action::FullFlush,
        Action::Finish => stream::Action::Finish,
        Action::FullBarrier => stream::Action::FullBarrier,
    }
}

fn convert_error(err: stream::Error) -> Status {
    match err {
        stream::Error::Data => Status::DataError,
        stream::Error::Options => Status::OptionsError,
        stream::Error::Format => Status::FormatError,
        stream::Error::MemLimit => Status::MemoryLimitError,
        stream::Error::Mem => Status::MemoryError,
        stream::Error::Program => Status::ProgrammingError,
        stream::Error::NoCheck => Status::NoCheck,
        stream::Error::UnsupportedCheck => Status::UnsupportedCheck,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_on_empty_encoder_produces_a_complete_stream() {
        let mut engine = LzmaEngine::encoder(6).unwrap();
        let mut output = vec![0; 4096];

        let step = engine.process(&[], &mut output, Action::Finish);

        assert_eq!(step.status, Status::End);
        assert_eq!(step.consumed, 0);
        // magic bytes of the stream header
        assert_eq!(&output[..6], b"\xFD7zXZ\x00");
    }

    #[test]
    fn garbage_is_a_format_error() {
        let mut engine = LzmaEngine::decoder(&DecoderOptions::default()).unwrap();
        let mut output = vec![0; 64];

        let step = engine.process(b"definitely not xz", &mut output, Action::Continue);

        assert_eq!(step.status, Status::FormatError);
        assert_eq!(step.produced, 0);
    }

    #[test]
    fn stalled_finish_is_a_buffer_error() {
        let mut engine = LzmaEngine::decoder(&DecoderOptions::default()).unwrap();
        let mut output = vec![0; 64];

        let mut status = Status::Ok;
        for _ in 0..4 {
            status = engine.process(&[], &mut output, Action::Finish).status;
            if status != Status::Ok {
                break;
            }
        }

        assert_eq!(status, Status::BufferError);
    }
}
