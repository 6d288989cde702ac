//! Terminal mode controller: raw mode, non-blocking input, SGR mouse
//! reporting, and restoration on every exit path.

mod control;
mod guard;
mod mode;

pub use control::{initialize_display, restore_display, DisableMouseReporting, EnableMouseReporting};
pub use guard::{install_restore_hooks, restore_mode, setup_terminal, TerminalGuard};
pub use mode::{enter_raw_mode, set_nonblocking, RawModeSnapshot};
