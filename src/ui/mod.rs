//! UI rendering modules for the simchat client.
//!
//! - `composer`: message input, attachment menu, audio recorder mock
//! - `messages`: conversation thread rendering
//! - `sidebar`: collapsible conversation sidebar
//! - `theme`: color schemes

mod composer;
mod messages;
mod sidebar;
mod theme;

pub use composer::*;
pub use messages::*;
pub use sidebar::*;
pub use theme::*;
