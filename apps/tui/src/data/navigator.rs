use thiserror::Error;

use crate::domain::{
    rank_by_priority, FishRecord, Level, ARCHETYPE_PRIORITY, SPECIES_PRIORITY,
};

/// Current drill path across the three grouping levels. A deeper level can
/// only be set while every shallower one is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionCursor {
    pub ocean: Option<String>,
    pub species: Option<String>,
    pub archetype: Option<String>,
}

impl SelectionCursor {
    pub fn is_complete(&self) -> bool {
        self.ocean.is_some() && self.species.is_some() && self.archetype.is_some()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigatorError {
    #[error("cannot select a {attempted} before selecting a {missing}")]
    InvalidTransition {
        attempted: &'static str,
        missing: &'static str,
    },
    #[error("{level} {name:?} is not among the current options")]
    SelectionNotFound { level: &'static str, name: String },
}

/// Drill-down state machine over the flat record list. Selections only move
/// forward or re-select an already-open level; re-selecting clears every
/// deeper level and its option list. Pure bookkeeping, no rendering.
#[derive(Debug)]
pub struct Navigator {
    records: Vec<FishRecord>,
    cursor: SelectionCursor,
    ocean_options: Vec<String>,
    species_options: Vec<String>,
    archetype_options: Vec<String>,
    fish_rows: Vec<usize>,
}

impl Navigator {
    pub fn new(records: Vec<FishRecord>) -> Self {
        let mut ocean_options = Vec::new();
        for record in &records {
            if !ocean_options.contains(&record.ocean) {
                ocean_options.push(record.ocean.clone());
            }
        }

        Self {
            records,
            cursor: SelectionCursor::default(),
            ocean_options,
            species_options: Vec::new(),
            archetype_options: Vec::new(),
            fish_rows: Vec::new(),
        }
    }

    pub fn records(&self) -> &[FishRecord] {
        &self.records
    }

    pub const fn cursor(&self) -> &SelectionCursor {
        &self.cursor
    }

    /// Option list for the three grouping levels. `Level::Fish` has row
    /// indices instead, see [`Self::fish_rows`].
    pub fn options_at(&self, level: Level) -> &[String] {
        match level {
            Level::Ocean => &self.ocean_options,
            Level::Species => &self.species_options,
            Level::Archetype => &self.archetype_options,
            Level::Fish => &[],
        }
    }

    /// Row indices into [`Self::records`] for the selected triple, sorted
    /// ascending by numeric depth.
    pub fn fish_rows(&self) -> &[usize] {
        &self.fish_rows
    }

    pub fn select_ocean(&mut self, name: &str) -> Result<&[String], NavigatorError> {
        if !self.ocean_options.iter().any(|o| o == name) {
            return Err(NavigatorError::SelectionNotFound {
                level: Level::Ocean.as_str(),
                name: name.to_string(),
            });
        }

        self.cursor.ocean = Some(name.to_string());
        self.cursor.species = None;
        self.cursor.archetype = None;
        self.archetype_options.clear();
        self.fish_rows.clear();

        let mut species = Vec::new();
        for record in self.records.iter().filter(|r| r.ocean == name) {
            if !species.contains(&record.species) {
                species.push(record.species.clone());
            }
        }
        rank_by_priority(&mut species, &SPECIES_PRIORITY);
        self.species_options = species;

        Ok(&self.species_options)
    }

    pub fn select_species(&mut self, name: &str) -> Result<&[String], NavigatorError> {
        let Some(ocean) = self.cursor.ocean.clone() else {
            return Err(NavigatorError::InvalidTransition {
                attempted: Level::Species.as_str(),
                missing: Level::Ocean.as_str(),
            });
        };
        if !self.species_options.iter().any(|s| s == name) {
            return Err(NavigatorError::SelectionNotFound {
                level: Level::Species.as_str(),
                name: name.to_string(),
            });
        }

        self.cursor.species = Some(name.to_string());
        self.cursor.archetype = None;
        self.fish_rows.clear();

        let mut archetypes = Vec::new();
        for record in self
            .records
            .iter()
            .filter(|r| r.ocean == ocean && r.species == name)
        {
            if !archetypes.contains(&record.archetype) {
                archetypes.push(record.archetype.clone());
            }
        }
        rank_by_priority(&mut archetypes, &ARCHETYPE_PRIORITY);
        self.archetype_options = archetypes;

        Ok(&self.archetype_options)
    }

    pub fn select_archetype(&mut self, name: &str) -> Result<&[usize], NavigatorError> {
        let (Some(ocean), Some(species)) =
            (self.cursor.ocean.clone(), self.cursor.species.clone())
        else {
            return Err(NavigatorError::InvalidTransition {
                attempted: Level::Archetype.as_str(),
                missing: Level::Species.as_str(),
            });
        };
        if !self.archetype_options.iter().any(|a| a == name) {
            return Err(NavigatorError::SelectionNotFound {
                level: Level::Archetype.as_str(),
                name: name.to_string(),
            });
        }

        self.cursor.archetype = Some(name.to_string());

        let mut rows: Vec<usize> = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.ocean == ocean && r.species == species && r.archetype == name)
            .map(|(row, _)| row)
            .collect();
        rows.sort_by(|a, b| {
            self.records[*a]
                .depth_value()
                .total_cmp(&self.records[*b].depth_value())
        });
        self.fish_rows = rows;

        Ok(&self.fish_rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ocean: &str, species: &str, archetype: &str, name: &str, depth: &str) -> FishRecord {
        FishRecord {
            ocean: ocean.to_string(),
            species: species.to_string(),
            archetype: archetype.to_string(),
            common_name: name.to_string(),
            title: format!("{name} sci"),
            depth: depth.to_string(),
            latitude: "0".to_string(),
            longitude: "0".to_string(),
            thumbnail: None,
        }
    }

    fn sample() -> Navigator {
        Navigator::new(vec![
            record("Pacific", "Reef Fish", "Predator", "Grouper", "10"),
            record("Pacific", "Reef Fish", "Prey", "Sardine", "5"),
            record("Pacific", "Others", "Prey", "Blobfish", "900"),
            record("Pacific", "Pelagic Fish", "Predator", "Tuna", "50"),
            record("Atlantic", "Reef Fish", "Predator", "Barracuda", "12"),
        ])
    }

    #[test]
    fn ocean_options_keep_first_seen_order() {
        assert_eq!(sample().options_at(Level::Ocean), ["Pacific", "Atlantic"]);
    }

    #[test]
    fn species_options_follow_the_priority_list() {
        let mut nav = sample();
        let options = nav.select_ocean("Pacific").unwrap();
        assert_eq!(options, ["Reef Fish", "Pelagic Fish", "Others"]);
    }

    #[test]
    fn reselecting_an_ocean_resets_deeper_levels() {
        let mut nav = sample();
        nav.select_ocean("Pacific").unwrap();
        nav.select_species("Reef Fish").unwrap();
        nav.select_ocean("Atlantic").unwrap();

        assert_eq!(
            nav.cursor(),
            &SelectionCursor {
                ocean: Some("Atlantic".to_string()),
                species: None,
                archetype: None,
            }
        );
        assert!(nav.options_at(Level::Archetype).is_empty());
        assert!(nav.fish_rows().is_empty());
    }

    #[test]
    fn species_before_ocean_is_an_invalid_transition() {
        let mut nav = sample();
        assert_eq!(
            nav.select_species("Reef Fish"),
            Err(NavigatorError::InvalidTransition {
                attempted: "species",
                missing: "ocean",
            })
        );
    }

    #[test]
    fn unknown_selection_is_reported_and_leaves_state_untouched() {
        let mut nav = sample();
        nav.select_ocean("Pacific").unwrap();
        let before = nav.cursor().clone();

        let err = nav.select_species("Reef").unwrap_err();
        assert_eq!(
            err,
            NavigatorError::SelectionNotFound {
                level: "species",
                name: "Reef".to_string(),
            }
        );
        assert_eq!(nav.cursor(), &before);
        assert_eq!(
            nav.options_at(Level::Species),
            ["Reef Fish", "Pelagic Fish", "Others"]
        );
    }

    #[test]
    fn fish_rows_sort_ascending_by_depth() {
        let mut nav = Navigator::new(vec![
            record("Pacific", "Reef Fish", "Prey", "Shallow", "10"),
            record("Pacific", "Reef Fish", "Prey", "Shallower", "5"),
        ]);
        nav.select_ocean("Pacific").unwrap();
        nav.select_species("Reef Fish").unwrap();
        let rows = nav.select_archetype("Prey").unwrap();
        assert_eq!(rows, [1, 0]);
    }

    #[test]
    fn end_to_end_drill_down() {
        let mut nav = Navigator::new(vec![
            record("Pacific", "Reef Fish", "Predator", "Grouper", "10"),
            record("Pacific", "Reef Fish", "Prey", "Sardine", "5"),
        ]);

        assert_eq!(nav.select_ocean("Pacific").unwrap(), ["Reef Fish"]);
        assert_eq!(
            nav.select_species("Reef Fish").unwrap(),
            ["Predator", "Prey"]
        );
        let rows = nav.select_archetype("Prey").unwrap().to_vec();
        assert_eq!(rows, [1]);
        assert_eq!(nav.records()[rows[0]].common_name, "Sardine");
        assert!(nav.cursor().is_complete());
    }
}
