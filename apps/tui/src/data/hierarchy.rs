use std::collections::HashSet;

use thiserror::Error;

use crate::domain::FishRecord;

/// Root id of every taxonomy tree.
pub const ROOT_ID: &str = "Root";

/// One node of the taxonomy tree. The id encodes the full ancestor path as a
/// dot-delimited string (`Root.<ocean>.<species>.<archetype>.<row>` for
/// leaves), so `parent_id` is always the id minus its last segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyNode {
    pub id: String,
    pub parent_id: Option<String>,
    pub display_name: String,
    pub scientific_name: String,
}

impl HierarchyNode {
    pub fn depth(&self) -> usize {
        self.id.matches('.').count()
    }

    pub fn is_leaf_id(&self) -> bool {
        self.depth() == 4
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HierarchyError {
    #[error("cannot build a hierarchy from an empty dataset")]
    EmptyDataset,
    #[error("nodes with dangling parent references: {0:?}")]
    DanglingParents(Vec<String>),
}

/// Builds the full node set for `records`: one root, one node per distinct
/// ocean (first-seen order), one per distinct `(ocean, species)` pair, and
/// one leaf per record disambiguated by its row index.
///
/// Construction is atomic: if any emitted node's parent id does not resolve
/// within the set, no tree is produced. Output order and ids are fully
/// determined by input order, so UI lookups by id stay stable.
pub fn build_hierarchy(records: &[FishRecord]) -> Result<Vec<HierarchyNode>, HierarchyError> {
    if records.is_empty() {
        return Err(HierarchyError::EmptyDataset);
    }

    let mut nodes = vec![HierarchyNode {
        id: ROOT_ID.to_string(),
        parent_id: None,
        display_name: ROOT_ID.to_string(),
        scientific_name: ROOT_ID.to_string(),
    }];

    let mut seen_oceans = HashSet::new();
    for record in records {
        if seen_oceans.insert(record.ocean.as_str()) {
            nodes.push(HierarchyNode {
                id: format!("{ROOT_ID}.{}", record.ocean),
                parent_id: Some(ROOT_ID.to_string()),
                display_name: record.ocean.clone(),
                scientific_name: record.ocean.clone(),
            });
        }
    }

    let mut seen_species = HashSet::new();
    for record in records {
        if seen_species.insert((record.ocean.as_str(), record.species.as_str())) {
            nodes.push(HierarchyNode {
                id: format!("{ROOT_ID}.{}.{}", record.ocean, record.species),
                parent_id: Some(format!("{ROOT_ID}.{}", record.ocean)),
                display_name: record.species.clone(),
                scientific_name: record.species.clone(),
            });
        }
    }

    for (row, record) in records.iter().enumerate() {
        nodes.push(HierarchyNode {
            id: format!(
                "{ROOT_ID}.{}.{}.{}.{row}",
                record.ocean, record.species, record.archetype
            ),
            parent_id: Some(format!("{ROOT_ID}.{}.{}", record.ocean, record.species)),
            display_name: record.common_name.clone(),
            scientific_name: record.title.clone(),
        });
    }

    validate(&nodes)?;
    Ok(nodes)
}

fn validate(nodes: &[HierarchyNode]) -> Result<(), HierarchyError> {
    let ids: HashSet<&str> = nodes.iter().map(|node| node.id.as_str()).collect();

    let dangling: Vec<String> = nodes
        .iter()
        .filter(|node| {
            node.parent_id
                .as_deref()
                .is_some_and(|parent| !ids.contains(parent))
        })
        .map(|node| node.id.clone())
        .collect();

    if dangling.is_empty() {
        Ok(())
    } else {
        Err(HierarchyError::DanglingParents(dangling))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ocean: &str, species: &str, archetype: &str, name: &str) -> FishRecord {
        FishRecord {
            ocean: ocean.to_string(),
            species: species.to_string(),
            archetype: archetype.to_string(),
            common_name: name.to_string(),
            title: format!("{name} sci"),
            depth: "10".to_string(),
            latitude: "0".to_string(),
            longitude: "0".to_string(),
            thumbnail: None,
        }
    }

    #[test]
    fn empty_dataset_is_rejected() {
        assert_eq!(build_hierarchy(&[]), Err(HierarchyError::EmptyDataset));
    }

    #[test]
    fn every_non_root_parent_resolves_and_root_is_unique() {
        let records = vec![
            record("Pacific", "Reef Fish", "Predator", "Moray"),
            record("Pacific", "Pelagic Fish", "Prey", "Sardine"),
            record("Atlantic", "Reef Fish", "Predator", "Barracuda"),
        ];
        let nodes = build_hierarchy(&records).unwrap();

        let ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids.len(), nodes.len(), "ids must be unique");

        let roots = nodes.iter().filter(|n| n.parent_id.is_none()).count();
        assert_eq!(roots, 1);

        for node in &nodes {
            if let Some(parent) = node.parent_id.as_deref() {
                assert!(ids.contains(parent), "dangling parent for {}", node.id);
            }
        }
    }

    #[test]
    fn duplicate_triples_get_distinct_leaf_ids_under_one_parent() {
        let records = vec![
            record("Indian", "Reef Fish", "Prey", "Damselfish"),
            record("Indian", "Reef Fish", "Prey", "Damselfish"),
        ];
        let nodes = build_hierarchy(&records).unwrap();

        let leaves: Vec<&HierarchyNode> = nodes.iter().filter(|n| n.is_leaf_id()).collect();
        assert_eq!(leaves.len(), 2);
        assert_ne!(leaves[0].id, leaves[1].id);
        assert_eq!(leaves[0].parent_id, leaves[1].parent_id);
        assert_eq!(leaves[0].id, "Root.Indian.Reef Fish.Prey.0");
        assert_eq!(leaves[1].id, "Root.Indian.Reef Fish.Prey.1");
    }

    #[test]
    fn output_is_deterministic_for_identical_input() {
        let records = vec![
            record("Arctic", "Demersal Fish", "Prey", "Cod"),
            record("Pacific", "Reef Fish", "Predator", "Grouper"),
        ];
        assert_eq!(
            build_hierarchy(&records).unwrap(),
            build_hierarchy(&records).unwrap()
        );
    }

    #[test]
    fn leaves_carry_display_and_scientific_names() {
        let records = vec![record("Pacific", "Reef Fish", "Predator", "Lionfish")];
        let nodes = build_hierarchy(&records).unwrap();
        let leaf = nodes.iter().find(|n| n.is_leaf_id()).unwrap();
        assert_eq!(leaf.display_name, "Lionfish");
        assert_eq!(leaf.scientific_name, "Lionfish sci");
    }

    #[test]
    fn dangling_parent_fails_validation_with_offenders_listed() {
        let nodes = vec![
            HierarchyNode {
                id: ROOT_ID.to_string(),
                parent_id: None,
                display_name: ROOT_ID.to_string(),
                scientific_name: ROOT_ID.to_string(),
            },
            HierarchyNode {
                id: "Root.Pacific.Reef Fish".to_string(),
                parent_id: Some("Root.Pacific".to_string()),
                display_name: "Reef Fish".to_string(),
                scientific_name: "Reef Fish".to_string(),
            },
        ];
        assert_eq!(
            validate(&nodes),
            Err(HierarchyError::DanglingParents(vec![
                "Root.Pacific.Reef Fish".to_string()
            ]))
        );
    }
}
