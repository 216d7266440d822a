#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Shared wiring for supply-points integration tests.
//!
//! Builds a module over the in-memory store with a fixed clock, plus an
//! editor whose collaborators are all inspectable.

#![allow(dead_code)] // Each test binary uses a different subset

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use supply_points::SupplyPointsModule;
use supply_points::config::SupplyPointsConfig;
use supply_points::domain::editor::AdminEditor;
use supply_points::domain::ports::{GeocodeError, Position, ReverseGeocoder};
use supply_points::infra::clock::FixedClock;
use supply_points::infra::geolocation::FixedGeolocator;
use supply_points::infra::identity::StaticIdentityProvider;
use supply_points::infra::notify::RecordingNotifier;
use supply_points::infra::storage::InMemoryDocumentStore;
use supply_points_sdk::{Identity, QueueStatus, SupplyPointDraft, WaterLevel};
use time::macros::datetime;

pub const COLLECTION: &str = "supplyPoints";
pub const STAMP: &str = "18:04 09-11-2025";

#[must_use]
pub fn ada() -> Identity {
    Identity::new("u-ada", Some("Ada Lovelace".to_owned()))
}

#[must_use]
pub fn grace() -> Identity {
    Identity::new("u-grace", Some("Grace Hopper".to_owned()))
}

#[must_use]
pub fn draft(name: &str) -> SupplyPointDraft {
    SupplyPointDraft {
        name: name.to_owned(),
        location: "Ward 7, Market Road".to_owned(),
        open_hours: "5am - 9am".to_owned(),
        water_level: WaterLevel::Full,
        queue_status: QueueStatus::Light,
        plus_code: "12.9716, 77.5946".to_owned(),
    }
}

/// Geocoder answering with a fixed result and counting calls.
#[derive(Default)]
pub struct ScriptedGeocoder {
    pub fail: bool,
    pub calls: Mutex<Vec<Position>>,
}

#[async_trait]
impl ReverseGeocoder for ScriptedGeocoder {
    async fn reverse(&self, position: Position) -> Result<String, GeocodeError> {
        self.calls.lock().push(position);
        if self.fail {
            Err(GeocodeError::Status(429))
        } else {
            Ok("MG Road, Bengaluru".to_owned())
        }
    }
}

pub struct Harness {
    pub store: Arc<InMemoryDocumentStore>,
    pub module: SupplyPointsModule,
    pub geocoder: Arc<ScriptedGeocoder>,
}

impl Harness {
    #[must_use]
    pub fn new() -> Self {
        Self::with_geocoder(ScriptedGeocoder::default())
    }

    #[must_use]
    pub fn with_geocoder(geocoder: ScriptedGeocoder) -> Self {
        let store = Arc::new(InMemoryDocumentStore::new());
        let geocoder = Arc::new(geocoder);
        let module = SupplyPointsModule::with_adapters(
            &SupplyPointsConfig::default(),
            store.clone(),
            Arc::new(FixedClock(datetime!(2025-11-09 18:04 +05:30))),
            geocoder.clone(),
        )
        .expect("default config is valid");
        Self {
            store,
            module,
            geocoder,
        }
    }

    pub fn editor(
        &self,
        identity: Arc<StaticIdentityProvider>,
        geolocator: FixedGeolocator,
    ) -> (AdminEditor, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        let editor =
            self.module
                .admin_editor(identity, Arc::new(geolocator), notifier.clone());
        (editor, notifier)
    }

    /// Editor for `who`, already signed in and loaded.
    pub async fn signed_in_editor(&self, who: Identity) -> (AdminEditor, Arc<RecordingNotifier>) {
        let provider = Arc::new(StaticIdentityProvider::signed_in(who));
        let (mut editor, notifier) = self.editor(provider, FixedGeolocator::Unsupported);
        editor.activate().await;
        (editor, notifier)
    }
}
