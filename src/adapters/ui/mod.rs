//! Terminal rendering surface. Implements every view port and drives the presenters.

pub mod banner;
pub mod progress;
pub mod toaster;
pub mod tui;
pub mod view;

pub use tui::TuiInputPort;
pub use view::{TerminalView, TuiState};

/// Prints the welcome banner and applies the theme for all subsequent inquire prompts.
/// Call once at startup (e.g. in main after tracing init).
pub fn init_ui() {
    banner::print_welcome();
    tui::apply_theme();
}
