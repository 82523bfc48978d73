use color_eyre::Result;
use crossterm::event::{self, Event};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;

use crate::app::{handle_input, App, AppScreen};
use crate::geo::{GeocodeClient, HABITAT_FALLBACK};
use crate::ui;

/// Run the application in headless mode (no UI)
pub async fn run_headless(app: &mut App, json: bool) -> Result<()> {
    // The dataset load was spawned before we got here; wait for it.
    if let Some(task) = app.load_task.take() {
        let records = task.await??;
        app.install_dataset(records);
    }

    if let Some(error) = &app.load_error {
        return Err(color_eyre::eyre::eyre!("Dataset rejected: {error}"));
    }

    if json {
        render_headless_json(app)?;
    } else {
        render_headless_stats(app);
    }

    Ok(())
}

fn render_headless_stats(app: &App) {
    let stats = build_headless_stats(app);

    println!("\nFish Atlas Stats");
    println!("=================");
    println!("Source: {}", stats.source);
    println!("Total fish: {}", stats.total_fish);
    println!("Hierarchy nodes: {}", stats.hierarchy_nodes);

    println!("\nFish by Ocean:");
    for (ocean, count) in &stats.by_ocean {
        println!("- {ocean}: {count}");
    }

    println!("\nFish by Species Group:");
    for (species, count) in &stats.by_species {
        println!("- {species}: {count}");
    }

    println!("\nDeepest Fish:");
    for fish in &stats.deepest {
        println!(
            "- {} | {} | {} | {} m",
            fish.common_name, fish.ocean, fish.species, fish.depth
        );
    }

    println!("\nGenerated: {}", stats.generated);
}

fn render_headless_json(app: &App) -> Result<()> {
    let stats = build_headless_stats(app);
    let json = serde_json::to_string_pretty(&stats)?;
    println!("{json}");
    Ok(())
}

fn build_headless_stats(app: &App) -> HeadlessStats {
    let records = app.records();

    let mut by_ocean: Vec<(String, usize)> = Vec::new();
    let mut by_species: Vec<(String, usize)> = Vec::new();
    for record in records {
        count_into(&mut by_ocean, &record.ocean);
        count_into(&mut by_species, &record.species);
    }

    let mut deepest: Vec<&crate::domain::FishRecord> = records
        .iter()
        .filter(|record| record.depth_value() < f64::MAX)
        .collect();
    deepest.sort_by(|a, b| b.depth_value().total_cmp(&a.depth_value()));
    let deepest = deepest
        .into_iter()
        .take(5)
        .map(|record| HeadlessFish {
            common_name: record.common_name.clone(),
            ocean: record.ocean.clone(),
            species: record.species.clone(),
            depth: record.depth.clone(),
        })
        .collect();

    HeadlessStats {
        source: app.dataset_source.clone(),
        total_fish: records.len(),
        hierarchy_nodes: app.hierarchy.len(),
        by_ocean,
        by_species,
        deepest,
        generated: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    }
}

// Keeps first-seen order, unlike a HashMap.
fn count_into(counts: &mut Vec<(String, usize)>, key: &str) {
    if let Some(entry) = counts.iter_mut().find(|(name, _)| name == key) {
        entry.1 += 1;
    } else {
        counts.push((key.to_string(), 1));
    }
}

#[derive(serde::Serialize)]
struct HeadlessStats {
    source: String,
    total_fish: usize,
    hierarchy_nodes: usize,
    by_ocean: Vec<(String, usize)>,
    by_species: Vec<(String, usize)>,
    deepest: Vec<HeadlessFish>,
    generated: String,
}

#[derive(serde::Serialize)]
struct HeadlessFish {
    common_name: String,
    ocean: String,
    species: String,
    depth: String,
}

/// Run the main application event loop
pub async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    loop {
        // Update animations
        app.update();

        poll_background_tasks(app).await;

        // Draw the UI with better error context
        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        // Handle events with improved error context
        if matches!(
            event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) => {
                    handle_input(app, key.code);
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    // Force a redraw after resize
                    if terminal.draw(|f| ui::ui(app, f)).is_err() {
                        // Non-fatal redraw error
                    }
                }
                Ok(Event::Mouse(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_))
                | Err(_) => {
                    // Ignore non-key events for now
                }
            }
        }
    }
    Ok(())
}

/// Harvests finished background tasks and spawns the geocode lookup for a
/// freshly opened detail popup.
async fn poll_background_tasks(app: &mut App) {
    if app
        .load_task
        .as_ref()
        .is_some_and(tokio::task::JoinHandle::is_finished)
    {
        if let Some(task) = app.load_task.take() {
            match task.await {
                Ok(Ok(records)) => app.install_dataset(records),
                Ok(Err(e)) => app.load_error = Some(e.to_string()),
                Err(e) => app.load_error = Some(format!("load task failed: {e}")),
            }
        }
    }

    if app.screen == AppScreen::FishDetails {
        spawn_geocode_if_needed(app);
    }

    if app
        .geocode_task
        .as_ref()
        .is_some_and(tokio::task::JoinHandle::is_finished)
    {
        if let Some(task) = app.geocode_task.take() {
            let habitat = task
                .await
                .unwrap_or_else(|_| HABITAT_FALLBACK.to_string());
            if let Some(detail) = app.detail.as_mut() {
                detail.habitat = Some(habitat);
            }
        }
    }
}

fn spawn_geocode_if_needed(app: &mut App) {
    let Some(detail) = app.detail.as_ref() else {
        return;
    };
    if detail.habitat.is_some() || app.geocode_task.is_some() {
        return;
    }

    let coordinates = app
        .records()
        .get(detail.row)
        .and_then(crate::domain::FishRecord::coordinates);

    match (coordinates, app.geocode.clone()) {
        (Some((lat, lon)), Some(client)) => {
            app.geocode_task = Some(tokio::spawn(async move {
                resolve_habitat(&client, lat, lon).await
            }));
        }
        _ => {
            // No coordinates or geocoding disabled; settle immediately.
            if let Some(detail) = app.detail.as_mut() {
                detail.habitat = Some(HABITAT_FALLBACK.to_string());
            }
        }
    }
}

async fn resolve_habitat(client: &GeocodeClient, lat: f64, lon: f64) -> String {
    client.habitat_label(lat, lon).await
}
