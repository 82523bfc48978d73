// App module for fish-atlas-tui
// Handles application state and input handling

pub mod input;
pub mod state;

pub use input::handle_input;
pub use state::{App, AppScreen};
