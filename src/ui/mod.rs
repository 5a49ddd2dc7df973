//! Terminal front-ends
//!
//! The full-screen TUI is the default; line mode is a reedline prompt for
//! terminals where a full-screen app is unwelcome.

pub mod classic;
pub mod terminal_dialogs;
pub mod tui_app;

pub use terminal_dialogs::{LineDialogs, TerminalDialogs};
