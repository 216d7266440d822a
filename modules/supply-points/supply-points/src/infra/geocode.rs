use std::time::Duration;

use async_trait::async_trait;
use neeru_utils::SecretString;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use crate::domain::ports::{GeocodeError, Position, ReverseGeocoder};

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    display_name: Option<String>,
    error: Option<String>,
}

/// Reverse geocoding against a maps.co style `/reverse` endpoint.
pub struct MapsCoGeocoder {
    client: reqwest::Client,
    base: Url,
    api_key: Option<SecretString>,
}

impl MapsCoGeocoder {
    /// # Errors
    /// Fails if the HTTP client cannot be built.
    pub fn new(
        base: Url,
        api_key: Option<SecretString>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base,
            api_key,
        })
    }
}

#[async_trait]
impl ReverseGeocoder for MapsCoGeocoder {
    #[instrument(skip_all, fields(base = %self.base, lat = position.lat, lng = position.lng))]
    async fn reverse(&self, position: Position) -> Result<String, GeocodeError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| GeocodeError::Transport("geocoder base URL cannot be a base".to_owned()))?
            .pop_if_empty()
            .push("reverse");
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("lat", &position.lat.to_string())
                .append_pair("lon", &position.lng.to_string());
            if let Some(key) = &self.api_key {
                query.append_pair("api_key", key.expose());
            }
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| GeocodeError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status(status.as_u16()));
        }

        let body: ReverseResponse = response
            .json()
            .await
            .map_err(|e| GeocodeError::Malformed(e.without_url().to_string()))?;
        match (body.display_name, body.error) {
            (Some(address), _) => {
                debug!("Resolved address");
                Ok(address)
            }
            (None, Some(reason)) => Err(GeocodeError::Malformed(reason)),
            (None, None) => Err(GeocodeError::Malformed("missing display_name".to_owned())),
        }
    }
}
