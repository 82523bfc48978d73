pub mod browse;
pub mod fish_details;
pub mod loading;
pub mod radial;
