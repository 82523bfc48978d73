use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_fish_details_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace => {
            app.close_details();
        }
        KeyCode::Char('q') => {
            app.running = false;
        }
        _ => {}
    }
}
