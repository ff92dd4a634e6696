use crate::config::Config;
use crate::{NotifyError, Result};
use reqwest::Client;
use serde::Serialize;
use tracing::{info, warn};

/// Outcome of checking the key verification URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyCheck {
    pub location: String,
    pub status: u16,
    /// True if the location answered 2xx with exactly the configured key
    pub matches: bool,
}

/// GETs `config.key_verification_url` and compares the trimmed body with the key
pub(crate) async fn verify_key_location(client: &Client, config: &Config) -> Result<KeyCheck> {
    let location = config.key_verification_url.clone();

    let response = client
        .get(&location)
        .send()
        .await
        .map_err(|source| NotifyError::Http {
            url: location.clone(),
            source,
        })?;

    let status = response.status();
    let matches = if status.is_success() {
        let body = response.text().await.map_err(|source| NotifyError::Http {
            url: location.clone(),
            source,
        })?;
        body.trim() == config.shared_key
    } else {
        false
    };

    if matches {
        info!("Key location {} serves the configured key", location);
    } else {
        warn!(
            "Key location {} does not serve the configured key (HTTP {})",
            location,
            status.as_u16()
        );
    }

    Ok(KeyCheck {
        location,
        status: status.as_u16(),
        matches,
    })
}
