use crate::app::input::helpers::{wrap_decrement, wrap_increment};
use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

const ZOOM_STEP: f64 = 1.25;
const MAX_ZOOM: f64 = 8.0;
const MIN_ZOOM: f64 = 0.4;

pub fn handle_radial_input(app: &mut App, key: KeyCode) {
    if app.search_active {
        handle_search_input(app, key);
        return;
    }

    match key {
        KeyCode::Char('q') => {
            app.running = false;
        }
        KeyCode::Char('b' | 'r') | KeyCode::Esc => {
            app.screen = AppScreen::Browse;
        }
        KeyCode::Char('/') => {
            app.search_active = true;
        }
        KeyCode::Char('+' | '=') => {
            app.radial_zoom = (app.radial_zoom * ZOOM_STEP).min(MAX_ZOOM);
        }
        KeyCode::Char('-') => {
            app.radial_zoom = (app.radial_zoom / ZOOM_STEP).max(MIN_ZOOM);
        }
        KeyCode::Char('0') => {
            // Reset view, back to the whole circle.
            app.radial_zoom = 1.0;
            app.radial_pan = (0.0, 0.0);
        }
        KeyCode::Left => app.radial_pan.0 -= pan_step(app),
        KeyCode::Right => app.radial_pan.0 += pan_step(app),
        KeyCode::Up => app.radial_pan.1 += pan_step(app),
        KeyCode::Down => app.radial_pan.1 -= pan_step(app),
        _ => {}
    }
}

fn pan_step(app: &App) -> f64 {
    0.15 / app.radial_zoom
}

fn handle_search_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc => {
            app.clear_search();
        }
        KeyCode::Backspace => {
            app.search_input.pop();
            app.run_search();
        }
        KeyCode::Up => {
            app.search_match_index =
                wrap_decrement(app.search_match_index, app.search_matches.len());
        }
        KeyCode::Down => {
            app.search_match_index =
                wrap_increment(app.search_match_index, app.search_matches.len());
        }
        KeyCode::Enter => confirm_search_match(app),
        KeyCode::Char(ch) => {
            app.search_input.push(ch);
            app.run_search();
        }
        _ => {}
    }
}

/// Drills the navigator down to the highlighted match and opens its details.
fn confirm_search_match(app: &mut App) {
    let Some(&row) = app.search_matches.get(app.search_match_index) else {
        return;
    };

    match app.drill_to_row(row) {
        Ok(()) => {
            app.clear_search();
            app.open_details(row);
        }
        Err(e) => {
            app.status_message = format!("Error: {e}");
        }
    }
}
