// Terminal module for fish-atlas-tui
// Owns raw mode and alternate screen lifecycle

mod setup;

pub use setup::{cleanup_terminal_state, setup_terminal};
