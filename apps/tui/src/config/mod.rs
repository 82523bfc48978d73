use dotenv::dotenv;
use std::env;

const DEFAULT_DATASET: &str = "data/fishes.csv";

/// Initializes the application configuration from `.env` and the
/// environment. Returns the dataset source (path or URL).
pub fn init_app_config() -> String {
    dotenv().ok();
    get_dataset_source()
}

/// Dataset path or URL, `DATASET_PATH` overriding the bundled sample.
pub fn get_dataset_source() -> String {
    env::var("DATASET_PATH").unwrap_or_else(|_| DEFAULT_DATASET.to_string())
}

/// Reverse geocoding is on unless `GEOCODE_DISABLED` is set.
pub fn geocode_enabled() -> bool {
    env::var("GEOCODE_DISABLED").is_err()
}

pub fn debug_enabled() -> bool {
    env::var("DEBUG").is_ok()
}
