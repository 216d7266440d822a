use neeru_utils::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::UtcOffset;
use time::macros::format_description;

use crate::domain::map::MapConfig;

/// Configuration for the supply-points module.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SupplyPointsConfig {
    /// Name of the document collection.
    pub collection: String,
    pub store: StoreConfig,
    pub geocoder: GeocoderConfig,
    /// Editors allowed to write through the REST API.
    pub identities: Vec<EditorIdentityConfig>,
    /// Offset used for `updatedAt`, e.g. `+05:30`. Host local time when unset.
    pub utc_offset: Option<String>,
    pub map: MapConfig,
}

impl Default for SupplyPointsConfig {
    fn default() -> Self {
        Self {
            collection: "supplyPoints".to_owned(),
            store: StoreConfig::default(),
            geocoder: GeocoderConfig::default(),
            identities: Vec::new(),
            utc_offset: None,
            map: MapConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreConfig {
    #[default]
    Memory,
    Firestore(FirestoreConfig),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FirestoreConfig {
    pub base_url: String,
    pub project_id: String,
    pub database: String,
    pub api_key: Option<SecretString>,
    pub bearer_token: Option<SecretString>,
    pub page_size: u32,
    pub timeout_ms: u64,
}

impl Default for FirestoreConfig {
    fn default() -> Self {
        Self {
            base_url: "https://firestore.googleapis.com/v1".to_owned(),
            project_id: String::new(),
            database: "(default)".to_owned(),
            api_key: None,
            bearer_token: None,
            page_size: 300,
            timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeocoderConfig {
    pub base_url: String,
    pub api_key: Option<SecretString>,
    pub timeout_ms: u64,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://geocode.maps.co".to_owned(),
            api_key: None,
            timeout_ms: 5_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EditorIdentityConfig {
    /// Bearer token presented by this editor.
    pub token: SecretString,
    pub uid: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid utc_offset '{value}': expected +HH:MM or -HH:MM")]
    UtcOffset { value: String },

    #[error("invalid {what} URL '{value}': {reason}")]
    Url {
        what: &'static str,
        value: String,
        reason: String,
    },

    #[error("firestore store requires a non-empty project_id")]
    MissingProjectId,

    #[error("identity '{uid}' has an empty token")]
    EmptyToken { uid: String },

    #[error("collection name must not be empty")]
    EmptyCollection,
}

impl SupplyPointsConfig {
    /// Parsed `utc_offset`.
    ///
    /// # Errors
    /// Returns `ConfigError::UtcOffset` when the value is not `+HH:MM` / `-HH:MM`.
    pub fn offset(&self) -> Result<Option<UtcOffset>, ConfigError> {
        self.utc_offset
            .as_deref()
            .map(|raw| {
                UtcOffset::parse(
                    raw,
                    format_description!("[offset_hour sign:mandatory]:[offset_minute]"),
                )
                .map_err(|_| ConfigError::UtcOffset {
                    value: raw.to_owned(),
                })
            })
            .transpose()
    }

    /// Check everything that can be checked without touching the network.
    ///
    /// # Errors
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.collection.trim().is_empty() {
            return Err(ConfigError::EmptyCollection);
        }
        self.offset()?;
        parse_url("geocoder", &self.geocoder.base_url)?;
        if let StoreConfig::Firestore(fs) = &self.store {
            parse_url("firestore", &fs.base_url)?;
            if fs.project_id.trim().is_empty() {
                return Err(ConfigError::MissingProjectId);
            }
        }
        if let Some(identity) = self.identities.iter().find(|i| i.token.is_empty()) {
            return Err(ConfigError::EmptyToken {
                uid: identity.uid.clone(),
            });
        }
        Ok(())
    }
}

pub(crate) fn parse_url(what: &'static str, value: &str) -> Result<url::Url, ConfigError> {
    url::Url::parse(value).map_err(|e| ConfigError::Url {
        what,
        value: value.to_owned(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = SupplyPointsConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.collection, "supplyPoints");
        assert_eq!(cfg.offset().unwrap(), None);
    }

    #[test]
    fn offset_parses_sign_and_minutes() {
        let cfg = SupplyPointsConfig {
            utc_offset: Some("+05:30".to_owned()),
            ..SupplyPointsConfig::default()
        };
        assert_eq!(cfg.offset().unwrap(), UtcOffset::from_hms(5, 30, 0).ok());

        let bad = SupplyPointsConfig {
            utc_offset: Some("IST".to_owned()),
            ..SupplyPointsConfig::default()
        };
        assert!(matches!(bad.validate(), Err(ConfigError::UtcOffset { .. })));
    }

    #[test]
    fn firestore_needs_a_project() {
        let cfg = SupplyPointsConfig {
            store: StoreConfig::Firestore(FirestoreConfig::default()),
            ..SupplyPointsConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::MissingProjectId));
    }

    #[test]
    fn store_kind_is_tagged() {
        let cfg: SupplyPointsConfig = serde_json::from_value(serde_json::json!({
            "store": { "kind": "firestore", "project_id": "neeru-demo" },
            "identities": [{ "token": "t0k3n", "uid": "u1", "display_name": "Ada" }]
        }))
        .unwrap();
        let StoreConfig::Firestore(fs) = &cfg.store else {
            panic!("expected firestore store");
        };
        assert_eq!(fs.project_id, "neeru-demo");
        assert_eq!(fs.database, "(default)");
        assert_eq!(cfg.identities[0].token.expose(), "t0k3n");
    }
}
