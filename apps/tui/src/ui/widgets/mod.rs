pub mod map;
pub mod popup;
pub mod radial_tree;
