//! Background execution of the conversion.
//!
//! The transform itself is synchronous; this module runs it on the blocking
//! pool and turns its progress callback into a message stream, so an
//! interactive caller never blocks on a large file. One immutable payload
//! goes in; progress events and exactly one terminal event come out.

use crate::convert::{convert, NotePolicy, Progress};
use crate::error::ConvertError;
use crate::model::BillRecords;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tracing::debug;

/// Enough for every progress report of one run plus the terminal event.
const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Messages emitted by a running conversion task.
#[derive(Debug)]
pub enum Event {
    Progress(Progress),
    /// Terminal: the conversion finished with both record lists.
    Done(BillRecords),
    /// Terminal: the conversion failed.
    Failed(ConvertError),
}

/// A handle to one running conversion.
///
/// [`ConvertTask::recv`] yields zero or more `Progress` events followed by
/// exactly one `Done` or `Failed`, then `None`. Dropping the task (or the
/// owning [`Converter`] starting a new one) abandons the run: cancellation is
/// cooperative, so a pass already executing runs to completion, but its
/// results are never consumed.
#[derive(Debug)]
pub struct ConvertTask {
    events: mpsc::Receiver<Event>,
}

impl ConvertTask {
    /// The next event, or `None` once the terminal event has been taken.
    pub async fn recv(&mut self) -> Option<Event> {
        self.events.recv().await
    }
}

/// The caller-owned conversion session.
///
/// At most one task is active per session: starting a new conversion first
/// aborts whatever was running before, so no two runs ever race on the same
/// caller.
#[derive(Debug, Default)]
pub struct Converter {
    active: Option<AbortHandle>,
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns the conversion on the blocking pool, replacing any prior task.
    pub fn start(&mut self, text: String, policy: NotePolicy) -> ConvertTask {
        if let Some(prior) = self.active.take() {
            prior.abort();
            debug!("terminated previous conversion task");
        }

        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let handle = tokio::task::spawn_blocking(move || {
            let progress_tx = tx.clone();
            // A panic anywhere in the pipeline must still surface as the
            // run's single terminal event.
            let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                convert(&text, policy, |progress| {
                    let _ = progress_tx.blocking_send(Event::Progress(progress));
                })
            }));
            let terminal = match outcome {
                Ok(Ok(records)) => Event::Done(records),
                Ok(Err(err)) => Event::Failed(err),
                Err(panic) => Event::Failed(ConvertError::Processing(panic_message(panic))),
            };
            let _ = tx.blocking_send(terminal);
        });
        self.active = Some(handle.abort_handle());

        ConvertTask { events: rx }
    }
}

fn panic_message(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "conversion task panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::Stage;
    use crate::test::sample_export;

    async fn drain(task: &mut ConvertTask) -> (Vec<Progress>, Option<Event>) {
        let mut progress = Vec::new();
        while let Some(event) = task.recv().await {
            match event {
                Event::Progress(p) => progress.push(p),
                terminal => return (progress, Some(terminal)),
            }
        }
        (progress, None)
    }

    #[tokio::test]
    async fn test_progress_then_exactly_one_terminal() {
        let mut converter = Converter::new();
        let mut task = converter.start(sample_export(), NotePolicy::Merged);

        let (progress, terminal) = drain(&mut task).await;
        assert!(progress.iter().any(|p| p.stage == Stage::Preprocessing));
        assert!(progress.iter().any(|p| p.stage == Stage::Categorizing));
        match terminal {
            Some(Event::Done(records)) => assert!(!records.is_empty()),
            other => panic!("expected Done, got {other:?}"),
        }
        // Nothing after the terminal event.
        assert!(task.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_failure_surfaces_as_terminal_event() {
        let mut converter = Converter::new();
        let mut task = converter.start("\n\n".to_string(), NotePolicy::Merged);

        let (_, terminal) = drain(&mut task).await;
        assert!(matches!(
            terminal,
            Some(Event::Failed(ConvertError::EmptyInput))
        ));
    }

    #[tokio::test]
    async fn test_starting_again_replaces_the_prior_task() {
        let mut converter = Converter::new();
        let _abandoned = converter.start(sample_export(), NotePolicy::Merged);
        let mut task = converter.start(sample_export(), NotePolicy::Merged);

        let (_, terminal) = drain(&mut task).await;
        assert!(matches!(terminal, Some(Event::Done(_))));
    }
}
