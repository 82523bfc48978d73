use thiserror::Error;

use crate::data::hierarchy::ROOT_ID;
use crate::data::navigator::SelectionCursor;
use crate::domain::FishRecord;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("no record matches {0}")]
    RecordNotFound(String),
}

/// Resolves a fully specified cursor plus a leaf row index to the exact
/// record. The row disambiguates between records sharing the same
/// `(ocean, species, archetype)` triple.
pub fn find_record<'a>(
    records: &'a [FishRecord],
    cursor: &SelectionCursor,
    row: usize,
) -> Result<&'a FishRecord, LookupError> {
    let (Some(ocean), Some(species), Some(archetype)) =
        (&cursor.ocean, &cursor.species, &cursor.archetype)
    else {
        return Err(LookupError::RecordNotFound(format!(
            "row {row} under an incomplete cursor"
        )));
    };

    records
        .get(row)
        .filter(|r| &r.ocean == ocean && &r.species == species && &r.archetype == archetype)
        .ok_or_else(|| {
            LookupError::RecordNotFound(format!("row {row} in {ocean}/{species}/{archetype}"))
        })
}

/// Resolves a radial-tree leaf id (`Root.<ocean>.<species>.<archetype>.<row>`)
/// back to its record. Interior node ids are not records.
pub fn find_by_node_id<'a>(
    records: &'a [FishRecord],
    id: &str,
) -> Result<(usize, &'a FishRecord), LookupError> {
    let not_found = || LookupError::RecordNotFound(format!("node id {id:?}"));

    let mut segments = id.split('.');
    if segments.next() != Some(ROOT_ID) {
        return Err(not_found());
    }
    let (Some(ocean), Some(species), Some(archetype), Some(row), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(not_found());
    };

    let row: usize = row.parse().map_err(|_| not_found())?;
    let record = records
        .get(row)
        .filter(|r| r.ocean == ocean && r.species == species && r.archetype == archetype)
        .ok_or_else(not_found)?;

    Ok((row, record))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<FishRecord> {
        vec![
            FishRecord {
                ocean: "Pacific".to_string(),
                species: "Reef Fish".to_string(),
                archetype: "Predator".to_string(),
                common_name: "Grouper".to_string(),
                title: "Epinephelus".to_string(),
                depth: "10".to_string(),
                latitude: "0".to_string(),
                longitude: "0".to_string(),
                thumbnail: None,
            },
            FishRecord {
                ocean: "Pacific".to_string(),
                species: "Reef Fish".to_string(),
                archetype: "Prey".to_string(),
                common_name: "Sardine".to_string(),
                title: "Sardinops".to_string(),
                depth: "5".to_string(),
                latitude: "0".to_string(),
                longitude: "0".to_string(),
                thumbnail: None,
            },
        ]
    }

    fn full_cursor(archetype: &str) -> SelectionCursor {
        SelectionCursor {
            ocean: Some("Pacific".to_string()),
            species: Some("Reef Fish".to_string()),
            archetype: Some(archetype.to_string()),
        }
    }

    #[test]
    fn finds_the_exact_record_for_cursor_and_row() {
        let records = records();
        let record = find_record(&records, &full_cursor("Prey"), 1).unwrap();
        assert_eq!(record.common_name, "Sardine");
    }

    #[test]
    fn mismatched_row_is_not_found() {
        let records = records();
        assert!(find_record(&records, &full_cursor("Prey"), 0).is_err());
        assert!(find_record(&records, &full_cursor("Prey"), 7).is_err());
    }

    #[test]
    fn incomplete_cursor_is_not_found() {
        let records = records();
        let cursor = SelectionCursor {
            ocean: Some("Pacific".to_string()),
            ..SelectionCursor::default()
        };
        assert!(find_record(&records, &cursor, 0).is_err());
    }

    #[test]
    fn leaf_node_ids_resolve_to_their_record() {
        let records = records();
        let (row, record) =
            find_by_node_id(&records, "Root.Pacific.Reef Fish.Predator.0").unwrap();
        assert_eq!(row, 0);
        assert_eq!(record.common_name, "Grouper");
    }

    #[test]
    fn interior_and_malformed_ids_are_not_records() {
        let records = records();
        assert!(find_by_node_id(&records, "Root.Pacific.Reef Fish").is_err());
        assert!(find_by_node_id(&records, "Fish.Pacific.Reef Fish.Prey.1").is_err());
        assert!(find_by_node_id(&records, "Root.Pacific.Reef Fish.Prey.x").is_err());
    }
}
