use std::time::Duration;

use thiserror::Error;

/// Habitat text shown whenever reverse geocoding cannot answer.
pub const HABITAT_FALLBACK: &str = "Open ocean";

const GEOCODE_ENDPOINT: &str = "https://nominatim.openstreetmap.org/reverse";
const GEOCODE_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("geocode request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("geocode response carried no display name")]
    MissingName,
}

/// Thin reverse-geocoding client. Lookups are cosmetic: the caller should go
/// through [`GeocodeClient::habitat_label`], which folds every failure into
/// [`HABITAT_FALLBACK`].
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    http: reqwest::Client,
}

impl GeocodeClient {
    pub fn new() -> Result<Self, GeocodeError> {
        let http = reqwest::Client::builder()
            .timeout(GEOCODE_TIMEOUT)
            .user_agent("fish-atlas-tui")
            .build()?;
        Ok(Self { http })
    }

    pub async fn lookup(&self, latitude: f64, longitude: f64) -> Result<String, GeocodeError> {
        let response = self
            .http
            .get(GEOCODE_ENDPOINT)
            .query(&[
                ("format", "jsonv2".to_string()),
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("zoom", "5".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: serde_json::Value = response.json().await?;
        body.get("display_name")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
            .ok_or(GeocodeError::MissingName)
    }

    /// Place name for the popup's "Habitat:" line, never failing.
    pub async fn habitat_label(&self, latitude: f64, longitude: f64) -> String {
        self.lookup(latitude, longitude)
            .await
            .unwrap_or_else(|_| HABITAT_FALLBACK.to_string())
    }
}
