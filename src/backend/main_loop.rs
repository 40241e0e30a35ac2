//! Backend event loop: poll scheduling, typing delay, task completion.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tokio::time::timeout;

use crate::poll::{PollScheduler, POLL_INTERVAL};
use crate::protocol::{BackendAction, GuiEvent};

use super::client::{ClientError, InboundMessage, SimulatorClient};
use super::handlers;

/// Delay between a poll returning replies and the replies being shown,
/// while the typing indicator runs.
pub const TYPING_DELAY: Duration = Duration::from_millis(800);

/// Results sent back from spawned transport tasks.
#[derive(Debug)]
pub(super) enum TaskResult {
    SendCompleted(Result<(), ClientError>),
    PollCompleted {
        seq: u64,
        result: Result<Vec<InboundMessage>, ClientError>,
    },
    PageCompleted {
        carousel_id: u64,
        result: Result<String, ClientError>,
    },
}

/// Run the backend event loop on a tokio runtime
pub fn run_backend(action_rx: Receiver<BackendAction>, event_tx: Sender<GuiEvent>) {
    // Create a Tokio runtime for this thread
    let rt = match Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            let _ = event_tx.send(GuiEvent::Error(format!(
                "Failed to create Tokio runtime: {}",
                e
            )));
            return;
        }
    };

    rt.block_on(async move {
        let mut client: Option<SimulatorClient> = None;
        let mut phone = String::new();
        let mut scheduler = PollScheduler::new(POLL_INTERVAL);
        // Replies held back while the typing indicator runs
        let mut pending_replies: VecDeque<(Instant, Vec<String>)> = VecDeque::new();
        let (result_tx, mut result_rx) = mpsc::unbounded_channel::<TaskResult>();

        loop {
            // Check for actions from the UI (non-blocking)
            while let Ok(action) = action_rx.try_recv() {
                handlers::handle_backend_action(
                    action,
                    &mut client,
                    &mut phone,
                    &mut scheduler,
                    &result_tx,
                    &event_tx,
                );
            }

            // Start a poll when one is due and none is in flight
            if let Some(c) = &client {
                if let Some(seq) = scheduler.begin_due(Instant::now()) {
                    handlers::spawn_poll(c.clone(), phone.clone(), seq, result_tx.clone());
                }
            }

            // Flush replies whose typing delay has elapsed
            let now = Instant::now();
            while pending_replies
                .front()
                .is_some_and(|(due, _)| *due <= now)
            {
                if let Some((_, bodies)) = pending_replies.pop_front() {
                    let _ = event_tx.send(GuiEvent::TypingStopped);
                    for body in bodies {
                        let _ = event_tx.send(GuiEvent::ReplyReceived { body });
                    }
                }
            }

            // Wait for task results (with short timeout so we can check for actions)
            match timeout(Duration::from_millis(50), result_rx.recv()).await {
                Ok(Some(result)) => {
                    handlers::handle_task_result(
                        result,
                        &mut scheduler,
                        &mut pending_replies,
                        &event_tx,
                    );
                }
                Ok(None) => {
                    // Result channel closed; nothing left to drive
                    break;
                }
                Err(_) => {
                    // Timeout - this is normal, just loop
                }
            }
        }
    });
}
