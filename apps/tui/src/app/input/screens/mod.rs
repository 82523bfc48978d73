use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

mod browse;
mod fish_details;
mod help;
mod radial;

pub fn dispatch_input(app: &mut App, key: KeyCode) {
    // While the search box is open every key belongs to it.
    if app.screen == AppScreen::Radial && app.search_active && !app.show_help {
        radial::handle_radial_input(app, key);
        return;
    }

    if help::handle_help_toggle(app, key) {
        return;
    }

    if app.show_help {
        if key == KeyCode::Esc {
            app.show_help = false;
        }
        return;
    }

    if help::handle_animation_toggle(app, key) {
        return;
    }

    match app.screen {
        AppScreen::Loading => handle_loading_input(app, key),
        AppScreen::Browse => browse::handle_browse_input(app, key),
        AppScreen::Radial => radial::handle_radial_input(app, key),
        AppScreen::FishDetails => fish_details::handle_fish_details_input(app, key),
    }
}

fn handle_loading_input(app: &mut App, key: KeyCode) {
    if matches!(key, KeyCode::Char('q') | KeyCode::Esc) {
        app.running = false;
    }
}
