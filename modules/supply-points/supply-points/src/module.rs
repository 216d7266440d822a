use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use supply_points_sdk::{Identity, SupplyPointsClient};
use tracing::info;

use crate::api::rest::auth::EditorTokens;
use crate::api::rest::routes;
use crate::config::{StoreConfig, SupplyPointsConfig, parse_url};
use crate::domain::editor::{AdminEditor, EditorDeps};
use crate::domain::map::MapConfig;
use crate::domain::ports::{
    Clock, DocumentStore, Geolocator, IdentityProvider, Notifier, ReverseGeocoder,
};
use crate::domain::service::{ServiceConfig, SupplyPointsService};
use crate::domain::viewer::Viewer;
use crate::infra::clock::SystemClock;
use crate::infra::geocode::MapsCoGeocoder;
use crate::infra::storage::{FirestoreDocumentStore, FirestoreSettings, InMemoryDocumentStore};
use crate::local_client::SupplyPointsLocalClient;

/// Wired-up supply-points module.
pub struct SupplyPointsModule {
    service: Arc<SupplyPointsService>,
    client: Arc<dyn SupplyPointsClient>,
    geocoder: Arc<dyn ReverseGeocoder>,
    tokens: EditorTokens,
    maps: MapConfig,
}

impl SupplyPointsModule {
    /// Build every adapter named by the configuration.
    ///
    /// # Errors
    /// Fails on invalid configuration or when an HTTP client cannot be built.
    pub fn from_config(cfg: &SupplyPointsConfig) -> anyhow::Result<Self> {
        cfg.validate().context("invalid supply_points configuration")?;

        let store: Arc<dyn DocumentStore> = match &cfg.store {
            StoreConfig::Memory => {
                info!("Using in-memory document store");
                Arc::new(InMemoryDocumentStore::new())
            }
            StoreConfig::Firestore(fs) => {
                info!(project = %fs.project_id, database = %fs.database, "Using Firestore document store");
                let settings = FirestoreSettings {
                    base_url: parse_url("firestore", &fs.base_url)?,
                    project_id: fs.project_id.clone(),
                    database: fs.database.clone(),
                    api_key: fs.api_key.clone(),
                    bearer_token: fs.bearer_token.clone(),
                    page_size: fs.page_size,
                    timeout: Duration::from_millis(fs.timeout_ms),
                };
                Arc::new(FirestoreDocumentStore::new(settings).context("building Firestore client")?)
            }
        };

        let geocoder = MapsCoGeocoder::new(
            parse_url("geocoder", &cfg.geocoder.base_url)?,
            cfg.geocoder.api_key.clone(),
            Duration::from_millis(cfg.geocoder.timeout_ms),
        )
        .context("building geocoder client")?;

        let clock = SystemClock::new(cfg.offset()?);
        Ok(Self::assemble(cfg, store, Arc::new(clock), Arc::new(geocoder)))
    }

    /// Build around caller-supplied adapters.
    ///
    /// # Errors
    /// Fails on invalid configuration.
    pub fn with_adapters(
        cfg: &SupplyPointsConfig,
        store: Arc<dyn DocumentStore>,
        clock: Arc<dyn Clock>,
        geocoder: Arc<dyn ReverseGeocoder>,
    ) -> anyhow::Result<Self> {
        cfg.validate().context("invalid supply_points configuration")?;
        Ok(Self::assemble(cfg, store, clock, geocoder))
    }

    fn assemble(
        cfg: &SupplyPointsConfig,
        store: Arc<dyn DocumentStore>,
        clock: Arc<dyn Clock>,
        geocoder: Arc<dyn ReverseGeocoder>,
    ) -> Self {
        let service = Arc::new(SupplyPointsService::new(
            store,
            clock,
            ServiceConfig {
                collection: cfg.collection.clone(),
            },
        ));
        let client: Arc<dyn SupplyPointsClient> =
            Arc::new(SupplyPointsLocalClient::new(service.clone()));
        let tokens: EditorTokens = cfg
            .identities
            .iter()
            .map(|i| {
                (
                    i.token.clone(),
                    Identity::new(i.uid.clone(), i.display_name.clone()),
                )
            })
            .collect();
        info!(
            collection = %cfg.collection,
            editors = tokens.len(),
            "Supply points module ready"
        );
        Self {
            service,
            client,
            geocoder,
            tokens,
            maps: cfg.map.clone(),
        }
    }

    #[must_use]
    pub fn client(&self) -> Arc<dyn SupplyPointsClient> {
        self.client.clone()
    }

    #[must_use]
    pub fn service(&self) -> Arc<SupplyPointsService> {
        self.service.clone()
    }

    /// Routes under `/supply-points/v1`.
    pub fn router(&self) -> Router {
        routes::router(self.service.clone(), self.maps.clone(), self.tokens.clone())
    }

    #[must_use]
    pub fn viewer(&self) -> Viewer {
        Viewer::new(self.client.clone(), self.maps.clone())
    }

    /// An editor session bound to the given host-side collaborators.
    pub fn admin_editor(
        &self,
        identity: Arc<dyn IdentityProvider>,
        geolocator: Arc<dyn Geolocator>,
        notifier: Arc<dyn Notifier>,
    ) -> AdminEditor {
        AdminEditor::new(EditorDeps {
            client: self.client.clone(),
            identity,
            geolocator,
            geocoder: self.geocoder.clone(),
            notifier,
        })
    }
}
