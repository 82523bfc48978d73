use serde::{Deserialize, Serialize};

/// One row of the source dataset. Immutable once loaded; depth and the
/// coordinates are kept as the numeric strings the dataset ships.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FishRecord {
    pub ocean: String,
    pub species: String,
    pub archetype: String,
    pub common_name: String,
    pub title: String,
    pub depth: String,
    pub latitude: String,
    pub longitude: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl FishRecord {
    /// Numeric depth for sorting. Unparsable depths sort after everything.
    pub fn depth_value(&self) -> f64 {
        self.depth.trim().parse().unwrap_or(f64::MAX)
    }

    /// `(latitude, longitude)` pair, or `None` when either fails to parse.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let lat = self.latitude.trim().parse().ok()?;
        let lon = self.longitude.trim().parse().ok()?;
        Some((lat, lon))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Ocean,
    Species,
    Archetype,
    Fish,
}

impl Level {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ocean => "ocean",
            Self::Species => "species",
            Self::Archetype => "archetype",
            Self::Fish => "fish",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Ocean => "Ocean",
            Self::Species => "Species",
            Self::Archetype => "Archetype",
            Self::Fish => "Fish",
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Ocean),
            1 => Some(Self::Species),
            2 => Some(Self::Archetype),
            3 => Some(Self::Fish),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Ocean => 0,
            Self::Species => 1,
            Self::Archetype => 2,
            Self::Fish => 3,
        }
    }

    pub const fn deeper(self) -> Option<Self> {
        match self {
            Self::Ocean => Some(Self::Species),
            Self::Species => Some(Self::Archetype),
            Self::Archetype => Some(Self::Fish),
            Self::Fish => None,
        }
    }

    pub const fn shallower(self) -> Option<Self> {
        match self {
            Self::Ocean => None,
            Self::Species => Some(Self::Ocean),
            Self::Archetype => Some(Self::Species),
            Self::Fish => Some(Self::Archetype),
        }
    }
}

/// Species categories shown before everything else, in this order.
pub const SPECIES_PRIORITY: [&str; 5] = [
    "Reef Fish",
    "Pelagic Fish",
    "Eel-like Fish",
    "Demersal Fish",
    "Others",
];

/// Archetype categories shown before everything else, in this order.
pub const ARCHETYPE_PRIORITY: [&str; 3] = ["Predator", "Prey", "Others"];

/// Orders `values` by their position in `priority`. Values absent from the
/// priority list sort lexicographically among themselves and always land
/// after every ranked value.
pub fn rank_by_priority(values: &mut [String], priority: &[&str]) {
    values.sort_by(|a, b| {
        let rank_a = priority.iter().position(|p| p == a);
        let rank_b = priority.iter().position(|p| p == b);
        match (rank_a, rank_b) {
            (None, None) => a.cmp(b),
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (Some(_), None) => std::cmp::Ordering::Less,
            (Some(a), Some(b)) => a.cmp(&b),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(depth: &str, lat: &str, lon: &str) -> FishRecord {
        FishRecord {
            ocean: "Pacific".to_string(),
            species: "Reef Fish".to_string(),
            archetype: "Predator".to_string(),
            common_name: "Clownfish".to_string(),
            title: "Amphiprion ocellaris".to_string(),
            depth: depth.to_string(),
            latitude: lat.to_string(),
            longitude: lon.to_string(),
            thumbnail: None,
        }
    }

    #[test]
    fn depth_value_parses_numeric_strings() {
        assert!((record("12.5", "0", "0").depth_value() - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn unparsable_depth_sorts_last() {
        assert!(record("deep", "0", "0").depth_value() > record("9000", "0", "0").depth_value());
    }

    #[test]
    fn coordinates_require_both_parts() {
        assert_eq!(
            record("1", "-33.8", "151.2").coordinates(),
            Some((-33.8, 151.2))
        );
        assert_eq!(record("1", "north", "151.2").coordinates(), None);
    }

    #[test]
    fn priority_values_come_first_in_declared_order() {
        let mut values = vec![
            "Pelagic Fish".to_string(),
            "Abyssal Fish".to_string(),
            "Reef Fish".to_string(),
        ];
        rank_by_priority(&mut values, &SPECIES_PRIORITY);
        assert_eq!(values, ["Reef Fish", "Pelagic Fish", "Abyssal Fish"]);
    }

    #[test]
    fn unranked_values_sort_lexicographically_after_ranked() {
        let mut values = vec![
            "Zebra Fish".to_string(),
            "Others".to_string(),
            "Anchovy".to_string(),
            "Predator".to_string(),
        ];
        rank_by_priority(&mut values, &ARCHETYPE_PRIORITY);
        assert_eq!(values, ["Predator", "Others", "Anchovy", "Zebra Fish"]);
    }
}
