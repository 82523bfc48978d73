// Event module for fish-atlas-tui
// Drives the main loop and background task handling

mod loop_handler;

pub use loop_handler::{run, run_headless};
