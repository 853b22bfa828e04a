use tracing::{debug, trace};

use crate::{
    codec::{Action, Engine, Status},
    config::OUTPUT_WINDOW_SIZE,
    error::{Error, Result},
    util::{InputWindow, OutputWindow},
};

/// An engine together with the windows it works on.
///
/// The session owns the engine outright; [`Session::release`] drops it, after which any further
/// use is reported as misuse.
#[derive(Debug)]
pub(crate) struct Session<E> {
    engine: Option<E>,
    pub(crate) input: InputWindow,
    pub(crate) output: OutputWindow,
}

impl<E: Engine> Session<E> {
    pub(crate) fn new(engine: E) -> Self {
        Self::with_capacity(engine, OUTPUT_WINDOW_SIZE)
    }

    pub(crate) fn with_capacity(engine: E, output_capacity: usize) -> Self {
        Self {
            engine: Some(engine),
            input: InputWindow::default(),
            output: OutputWindow::new(output_capacity),
        }
    }

    /// Invoke the engine once and advance both windows by what it reports.
    pub(crate) fn step(&mut self, action: Action) -> Result<Status> {
        let engine = self
            .engine
            .as_mut()
            .ok_or(Error::Misuse("codec session used after release"))?;

        let step = engine.process(
            self.input.unwritten(),
            self.output.unwritten_mut(),
            action,
        );

        if step.consumed > self.input.remaining() || step.produced > self.output.remaining() {
            return Err(Error::Codec(Status::ProgrammingError));
        }

        self.input.advance(step.consumed);
        self.output.advance(step.produced);

        trace!(
            ?action,
            consumed = step.consumed,
            produced = step.produced,
            status = %step.status,
            "engine step"
        );

        Ok(step.status)
    }

    pub(crate) fn is_released(&self) -> bool {
        self.engine.is_none()
    }

    /// Drop the engine, freeing everything it allocated. Repeated calls do nothing.
    pub(crate) fn release(&mut self) {
        if self.engine.take().is_some() {
            debug!(
                total_in = self.input.total(),
                total_out = self.output.total(),
                "released codec session"
            );
        }
    }

    pub(crate) fn total_in(&self) -> u64 {
        self.input.total()
    }

    pub(crate) fn total_out(&self) -> u64 {
        self.output.total()
    }

    #[cfg(test)]
    pub(crate) fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }
}
