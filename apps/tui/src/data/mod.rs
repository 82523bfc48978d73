// Pure data layer: dataset loading, hierarchy construction, drill-down
// selection and detail lookup. Nothing in here touches the terminal.

pub mod hierarchy;
pub mod loader;
pub mod lookup;
pub mod navigator;

pub use hierarchy::{build_hierarchy, HierarchyError, HierarchyNode, ROOT_ID};
pub use loader::{load_dataset, DatasetError};
pub use lookup::{find_by_node_id, find_record, LookupError};
pub use navigator::{Navigator, NavigatorError, SelectionCursor};
