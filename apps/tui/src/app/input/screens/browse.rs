use crate::app::input::helpers::{step_down, step_up};
use crate::app::state::{App, AppScreen};
use crate::data::find_record;
use crate::domain::Level;
use crossterm::event::KeyCode;

pub fn handle_browse_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('q') => {
            app.running = false;
        }
        KeyCode::Char('r') => {
            app.screen = AppScreen::Radial;
        }
        KeyCode::Esc | KeyCode::Left => {
            if let Some(level) = app.active_level.shallower() {
                app.active_level = level;
            }
        }
        KeyCode::Right => {
            if let Some(level) = app.active_level.deeper() {
                if level_len(app, level) > 0 {
                    app.active_level = level;
                }
            }
        }
        KeyCode::Up => {
            let level = app.active_level;
            let index = step_up(app.index_at(level));
            app.set_index_at(level, index);
        }
        KeyCode::Down => {
            let level = app.active_level;
            let index = step_down(app.index_at(level), level_len(app, level));
            app.set_index_at(level, index);
        }
        KeyCode::Home => {
            let level = app.active_level;
            app.set_index_at(level, 0);
        }
        KeyCode::End => {
            let level = app.active_level;
            let len = level_len(app, level);
            app.set_index_at(level, len.saturating_sub(1));
        }
        KeyCode::Enter => select_current(app),
        _ => {}
    }
}

fn level_len(app: &App, level: Level) -> usize {
    app.navigator.as_ref().map_or(0, |navigator| match level {
        Level::Fish => navigator.fish_rows().len(),
        _ => navigator.options_at(level).len(),
    })
}

/// Applies the highlighted entry of the active column to the navigator,
/// opening the detail popup when the column is the fish list.
fn select_current(app: &mut App) {
    let level = app.active_level;
    if level == Level::Fish {
        open_highlighted_fish(app);
        return;
    }

    let index = app.index_at(level);
    let Some(name) = app
        .navigator
        .as_ref()
        .and_then(|n| n.options_at(level).get(index).cloned())
    else {
        return;
    };

    let result = {
        let Some(navigator) = app.navigator.as_mut() else {
            return;
        };
        match level {
            Level::Ocean => navigator.select_ocean(&name).map(<[String]>::len),
            Level::Species => navigator.select_species(&name).map(<[String]>::len),
            Level::Archetype => navigator.select_archetype(&name).map(<[usize]>::len),
            Level::Fish => return,
        }
    };

    match result {
        Ok(next_len) => {
            // A fresh selection resets everything deeper.
            let mut deeper = level.deeper();
            while let Some(l) = deeper {
                app.set_index_at(l, 0);
                deeper = l.deeper();
            }
            if next_len > 0 {
                if let Some(l) = level.deeper() {
                    app.active_level = l;
                }
            }
            app.status_message = format!("{}: {name}", level.label());
        }
        Err(e) => {
            app.status_message = format!("Error: {e}");
        }
    }
}

fn open_highlighted_fish(app: &mut App) {
    let index = app.index_at(Level::Fish);
    let lookup = {
        let Some(navigator) = app.navigator.as_ref() else {
            return;
        };
        let Some(&row) = navigator.fish_rows().get(index) else {
            return;
        };
        find_record(navigator.records(), navigator.cursor(), row)
            .map(|_| row)
            .map_err(|e| e.to_string())
    };

    match lookup {
        Ok(row) => app.open_details(row),
        Err(e) => app.status_message = format!("Error: {e}"),
    }
}
