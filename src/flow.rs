//! The drive loop shared by the encoder and decoder.
//!
//! The engine only ever sees one fixed output window, so turning an arbitrarily large batch of
//! input into output means repeatedly invoking it and draining the window in between. Both
//! adaptors use [`run`]; they differ only in where drained bytes go and in when they ask for
//! [`Action::Finish`].

use std::io::Write;

use crate::{
    codec::{Action, Engine, Status},
    error::{Error, Result},
    session::Session,
};

/// How a successful [`run`] ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Progress {
    /// Every staged input byte was consumed and the stream is still open.
    Exhausted,
    /// The engine reported the end of the stream. Staged input may be left over.
    StreamEnd,
}

/// Drive the engine over the staged input until it is consumed, or until the stream ends when
/// `action` is [`Action::Finish`].
///
/// Output is written to `dest` whenever the window fills and once more before returning, so on
/// success everything the engine produced has reached `dest`.
pub(crate) fn run<E: Engine>(
    session: &mut Session<E>,
    action: Action,
    dest: &mut impl Write,
) -> Result<Progress> {
    let finishing = action == Action::Finish;
    let mut more = session.input.remaining() > 0;

    while finishing || more {
        if session.output.remaining() == 0 {
            drain(session, dest)?;
        }

        let status = session.step(action)?;

        if status == Status::End {
            drain(session, dest)?;
            return Ok(Progress::StreamEnd);
        }

        if status.is_err() {
            if finishing && status == Status::BufferError && session.input.remaining() == 0 {
                return Err(Error::Truncated);
            }
            return Err(Error::Codec(status));
        }

        // A full window may leave output buffered inside the engine even with no input left.
        more = session.input.remaining() > 0 || session.output.remaining() == 0;
    }

    drain(session, dest)?;
    Ok(Progress::Exhausted)
}

fn drain<E: Engine>(session: &mut Session<E>, dest: &mut impl Write) -> Result<()> {
    let written = session.output.written();
    if !written.is_empty() {
        dest.write_all(written)?;
    }
    session.output.reset();
    Ok(())
}
