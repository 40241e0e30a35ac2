/// Backend submodules for transport and message handling
///
/// This module breaks the network side into focused components:
/// - `client`: reqwest wrapper for the send/poll/fetch_more endpoints
/// - `handlers`: action handling and task-result routing
/// - `main_loop`: core event loop, poll scheduling, typing delay
mod client;
mod handlers;
mod main_loop;

pub use client::{ClientError, InboundMessage, InboundText, SimulatorClient};
pub use main_loop::{run_backend, TYPING_DELAY};
