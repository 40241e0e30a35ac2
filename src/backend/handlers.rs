//! Action handling and transport-task result routing.

use std::collections::VecDeque;
use std::time::Instant;

use crossbeam_channel::Sender;
use tokio::sync::mpsc::UnboundedSender;

use crate::payload;
use crate::poll::PollScheduler;
use crate::protocol::{BackendAction, GuiEvent};

use super::client::SimulatorClient;
use super::main_loop::{TaskResult, TYPING_DELAY};

/// Handle one action from the UI.
pub(super) fn handle_backend_action(
    action: BackendAction,
    client: &mut Option<SimulatorClient>,
    phone: &mut String,
    scheduler: &mut PollScheduler,
    result_tx: &UnboundedSender<TaskResult>,
    event_tx: &Sender<GuiEvent>,
) {
    match action {
        BackendAction::Configure {
            endpoint,
            phone: id,
        } => {
            *client = Some(SimulatorClient::new(endpoint.clone()));
            *phone = id;
            scheduler.start(Instant::now());
            let _ = event_tx.send(GuiEvent::RawMessage(format!(
                "Transport configured for {}",
                endpoint
            )));
        }

        BackendAction::SendMessage(content) => {
            let Some(c) = client.as_ref() else {
                let _ = event_tx.send(GuiEvent::Error("Transport not configured".into()));
                return;
            };
            let envelope = payload::build_envelope(phone, content);
            let _ = event_tx.send(GuiEvent::RawMessage(format!(
                "→ {} message",
                envelope.entry[0].changes[0].value.messages[0].kind
            )));

            let client = c.clone();
            let result_tx = result_tx.clone();
            tokio::spawn(async move {
                let result = client.send(&envelope).await;
                let _ = result_tx.send(TaskResult::SendCompleted(result));
            });
        }

        BackendAction::FetchMore {
            carousel_id,
            cursor,
        } => {
            let Some(c) = client.as_ref() else {
                let _ = event_tx.send(GuiEvent::PageFailed {
                    carousel_id,
                    reason: "Transport not configured".into(),
                });
                return;
            };
            log::info!(
                "Fetching more {} page {} for '{}'",
                cursor.kind,
                cursor.page,
                cursor.query
            );

            let client = c.clone();
            let result_tx = result_tx.clone();
            tokio::spawn(async move {
                let result = client.fetch_more(&cursor).await;
                let _ = result_tx.send(TaskResult::PageCompleted {
                    carousel_id,
                    result,
                });
            });
        }

        BackendAction::StopPolling => {
            scheduler.stop();
        }
    }
}

/// Spawn one sequence-tagged poll request.
pub(super) fn spawn_poll(
    client: SimulatorClient,
    phone: String,
    seq: u64,
    result_tx: UnboundedSender<TaskResult>,
) {
    tokio::spawn(async move {
        let result = client.poll(&phone).await;
        let _ = result_tx.send(TaskResult::PollCompleted { seq, result });
    });
}

/// Route one completed transport task.
pub(super) fn handle_task_result(
    result: TaskResult,
    scheduler: &mut PollScheduler,
    pending_replies: &mut VecDeque<(Instant, Vec<String>)>,
    event_tx: &Sender<GuiEvent>,
) {
    match result {
        TaskResult::SendCompleted(Ok(())) => {
            let _ = event_tx.send(GuiEvent::Delivered);
        }
        TaskResult::SendCompleted(Err(e)) => {
            // The bubble stays visually sent; there is no retry path.
            log::error!("Simulation send error: {}", e);
        }

        TaskResult::PollCompleted { seq, result } => match result {
            Ok(messages) => {
                if !scheduler.complete(seq) {
                    log::debug!("Discarding stale poll response (seq {})", seq);
                    return;
                }
                if messages.is_empty() {
                    return;
                }
                let _ = event_tx.send(GuiEvent::TypingStarted);
                let bodies = messages.into_iter().map(|m| m.text.body).collect();
                pending_replies.push_back((Instant::now() + TYPING_DELAY, bodies));
            }
            Err(e) => {
                scheduler.complete(seq);
                log::warn!("Poll error: {}", e);
            }
        },

        TaskResult::PageCompleted {
            carousel_id,
            result,
        } => match result {
            Ok(html) => {
                let _ = event_tx.send(GuiEvent::PageLoaded { carousel_id, html });
            }
            Err(e) => {
                log::error!("Infinite scroll error: {}", e);
                let _ = event_tx.send(GuiEvent::PageFailed {
                    carousel_id,
                    reason: e.to_string(),
                });
            }
        },
    }
}
