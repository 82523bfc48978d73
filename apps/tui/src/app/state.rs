use std::sync::Mutex;
use std::time::{Duration, Instant};

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use tachyonfx::{fx, Effect, EffectTimer, Interpolation};
use throbber_widgets_tui::ThrobberState;
use tokio::task::JoinHandle;

use crate::data::{
    build_hierarchy, DatasetError, HierarchyNode, Navigator, NavigatorError,
};
use crate::domain::{FishRecord, Level};
use crate::geo::GeocodeClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Loading,
    Browse,
    Radial,
    FishDetails,
}

/// State of the currently open fish detail popup.
pub struct DetailView {
    pub row: usize,
    pub habitat: Option<String>,
}

pub struct App {
    pub running: bool,
    pub screen: AppScreen,
    pub previous_screen: AppScreen,
    pub show_help: bool,
    pub status_message: String,
    pub dataset_source: String,

    // Data layer, present once the load task finishes cleanly.
    pub navigator: Option<Navigator>,
    pub hierarchy: Vec<HierarchyNode>,
    pub load_task: Option<JoinHandle<Result<Vec<FishRecord>, DatasetError>>>,
    pub load_error: Option<String>,

    // Browse screen cursor position per column.
    pub active_level: Level,
    pub level_indices: [usize; 4],

    pub detail: Option<DetailView>,
    pub geocode: Option<GeocodeClient>,
    pub geocode_task: Option<JoinHandle<String>>,

    // Fuzzy search over the radial view.
    pub search_active: bool,
    pub search_input: String,
    pub search_matches: Vec<usize>,
    pub search_match_index: usize,

    pub radial_zoom: f64,
    pub radial_pan: (f64, f64),

    pub animation_counter: f64,
    pub animation_paused: bool,
    pub last_frame: Instant,
    pub last_tick: Duration,
    pub detail_fx: Mutex<Option<Effect>>,
    pub throbber_state: ThrobberState,
}

impl App {
    pub fn new(dataset_source: String) -> Self {
        Self {
            running: true,
            screen: AppScreen::Loading,
            previous_screen: AppScreen::Browse,
            show_help: false,
            status_message: String::new(),
            dataset_source,
            navigator: None,
            hierarchy: Vec::new(),
            load_task: None,
            load_error: None,
            active_level: Level::Ocean,
            level_indices: [0; 4],
            detail: None,
            geocode: None,
            geocode_task: None,
            search_active: false,
            search_input: String::new(),
            search_matches: Vec::new(),
            search_match_index: 0,
            radial_zoom: 1.0,
            radial_pan: (0.0, 0.0),
            animation_counter: 0.0,
            animation_paused: false,
            last_frame: Instant::now(),
            last_tick: Duration::ZERO,
            detail_fx: Mutex::new(None),
            throbber_state: ThrobberState::default(),
        }
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.last_tick = delta;

        if !self.animation_paused {
            // Cycles between 0 and 2*PI
            self.animation_counter += delta.as_secs_f64() * 2.0;
            if self.animation_counter > 2.0 * std::f64::consts::PI {
                self.animation_counter -= 2.0 * std::f64::consts::PI;
            }
        }

        if self.screen == AppScreen::Loading {
            self.throbber_state.calc_next();
        }
    }

    pub fn records(&self) -> &[FishRecord] {
        self.navigator.as_ref().map_or(&[], Navigator::records)
    }

    pub const fn index_at(&self, level: Level) -> usize {
        self.level_indices[level.index()]
    }

    pub fn set_index_at(&mut self, level: Level, index: usize) {
        self.level_indices[level.index()] = index;
    }

    /// Installs a freshly loaded dataset, or records a fatal error for the
    /// fallback screen when the hierarchy does not validate.
    pub fn install_dataset(&mut self, records: Vec<FishRecord>) {
        match build_hierarchy(&records) {
            Ok(hierarchy) => {
                self.status_message = format!(
                    "Loaded {} fish from {}",
                    records.len(),
                    self.dataset_source
                );
                self.hierarchy = hierarchy;
                self.navigator = Some(Navigator::new(records));
                self.screen = AppScreen::Browse;
            }
            Err(e) => {
                self.load_error = Some(e.to_string());
            }
        }
    }

    pub fn open_details(&mut self, row: usize) {
        self.previous_screen = self.screen;
        self.screen = AppScreen::FishDetails;
        self.detail = Some(DetailView { row, habitat: None });

        if let Ok(mut effect) = self.detail_fx.lock() {
            *effect = Some(fx::coalesce(EffectTimer::from_ms(
                600,
                Interpolation::SineOut,
            )));
        }
    }

    pub fn close_details(&mut self) {
        self.screen = self.previous_screen;
        self.detail = None;
        if let Some(task) = self.geocode_task.take() {
            task.abort();
        }
    }

    /// Recomputes radial-search matches for the current input: record rows
    /// ordered by descending fuzzy score over common and scientific names.
    pub fn run_search(&mut self) {
        self.search_matches.clear();
        self.search_match_index = 0;
        if self.search_input.is_empty() {
            return;
        }

        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(i64, usize)> = self
            .records()
            .iter()
            .enumerate()
            .filter_map(|(row, record)| {
                let haystack = format!("{} {}", record.common_name, record.title);
                matcher
                    .fuzzy_match(&haystack, &self.search_input)
                    .map(|score| (score, row))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        self.search_matches = scored.into_iter().map(|(_, row)| row).collect();
    }

    pub fn clear_search(&mut self) {
        self.search_active = false;
        self.search_input.clear();
        self.search_matches.clear();
        self.search_match_index = 0;
    }

    /// Drives the navigator down to `row`'s full path and positions the
    /// browse columns on it. Used when a search match is confirmed.
    pub fn drill_to_row(&mut self, row: usize) -> Result<(), NavigatorError> {
        let Some(record) = self.records().get(row).cloned() else {
            return Err(NavigatorError::SelectionNotFound {
                level: Level::Fish.as_str(),
                name: format!("row {row}"),
            });
        };
        let Some(navigator) = self.navigator.as_mut() else {
            return Err(NavigatorError::SelectionNotFound {
                level: Level::Fish.as_str(),
                name: format!("row {row}"),
            });
        };

        navigator.select_ocean(&record.ocean)?;
        navigator.select_species(&record.species)?;
        navigator.select_archetype(&record.archetype)?;

        let ocean_index = navigator
            .options_at(Level::Ocean)
            .iter()
            .position(|o| *o == record.ocean)
            .unwrap_or(0);
        let species_index = navigator
            .options_at(Level::Species)
            .iter()
            .position(|s| *s == record.species)
            .unwrap_or(0);
        let archetype_index = navigator
            .options_at(Level::Archetype)
            .iter()
            .position(|a| *a == record.archetype)
            .unwrap_or(0);
        let fish_index = navigator
            .fish_rows()
            .iter()
            .position(|r| *r == row)
            .unwrap_or(0);

        self.level_indices = [ocean_index, species_index, archetype_index, fish_index];
        self.active_level = Level::Fish;
        Ok(())
    }
}
