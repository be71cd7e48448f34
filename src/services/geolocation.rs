// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! One-shot lookup of the user's current position.
//!
//! The position is resolved once per session. There is no tracking and no
//! retry: a failure leaves the session without a map.

use crate::config::Config;
use crate::models::Coordinates;
use serde::Deserialize;
use std::time::Duration;

/// Why no position is available.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeolocationError {
    #[error("Geolocation is disabled")]
    Disabled,

    #[error("Geolocation lookup failed: {0}")]
    Lookup(String),

    #[error("Geolocation returned an invalid position {0}")]
    InvalidPosition(Coordinates),
}

/// Response of an IP geolocation endpoint.
///
/// Accepts both `lat`/`lon` (ip-api.com) and `latitude`/`longitude`
/// (ipapi.co) field names.
#[derive(Debug, Deserialize)]
struct IpLocation {
    #[serde(alias = "latitude")]
    lat: f64,
    #[serde(alias = "longitude", alias = "lng")]
    lon: f64,
}

/// Position source for the session.
#[derive(Debug, Clone)]
pub enum GeolocationService {
    /// A configured home position.
    Fixed(Coordinates),
    /// Look the position up from the machine's public IP.
    IpLookup { client: reqwest::Client, url: String },
    /// No position source; the session runs without a map.
    Disabled,
}

impl GeolocationService {
    /// Pick the source from configuration: a fixed position wins over an IP
    /// lookup URL; with neither, geolocation is disabled.
    pub fn from_config(config: &Config) -> Result<Self, GeolocationError> {
        if let Some(home) = config.home_position {
            return Ok(GeolocationService::Fixed(home));
        }

        match &config.geolocation_url {
            Some(url) => {
                let client = reqwest::Client::builder()
                    .timeout(Duration::from_secs(config.geolocation_timeout_secs))
                    .build()
                    .map_err(|e| GeolocationError::Lookup(e.to_string()))?;
                Ok(GeolocationService::IpLookup {
                    client,
                    url: url.clone(),
                })
            }
            None => Ok(GeolocationService::Disabled),
        }
    }

    /// Resolve the current position once.
    pub async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        let position = match self {
            GeolocationService::Fixed(coords) => *coords,
            GeolocationService::IpLookup { client, url } => {
                tracing::info!(url = %url, "Looking up position from IP");
                let location: IpLocation = client
                    .get(url)
                    .send()
                    .await
                    .and_then(|r| r.error_for_status())
                    .map_err(|e| GeolocationError::Lookup(e.to_string()))?
                    .json()
                    .await
                    .map_err(|e| GeolocationError::Lookup(e.to_string()))?;
                Coordinates::new(location.lat, location.lon)
            }
            GeolocationService::Disabled => return Err(GeolocationError::Disabled),
        };

        if !position.is_valid() {
            return Err(GeolocationError::InvalidPosition(position));
        }

        tracing::info!(%position, "Current position resolved");
        Ok(position)
    }
}
