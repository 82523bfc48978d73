use crate::app::state::App;
use crossterm::event::KeyCode;

/// Returns true when the key toggled the help popup.
pub fn handle_help_toggle(app: &mut App, key: KeyCode) -> bool {
    if key == KeyCode::Char('?') {
        app.show_help = !app.show_help;
        return true;
    }
    false
}

/// Returns true when the key toggled the animation pause.
pub fn handle_animation_toggle(app: &mut App, key: KeyCode) -> bool {
    if key == KeyCode::Char(' ') {
        app.animation_paused = !app.animation_paused;
        return true;
    }
    false
}
