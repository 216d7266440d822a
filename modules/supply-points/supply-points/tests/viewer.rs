#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Read-only board: one fetch on activation, cards derived per point.

mod support;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use supply_points::domain::map::MapConfig;
use supply_points::domain::viewer::{LastUpdate, Viewer, ViewerLoad};
use supply_points_sdk::{
    Identity, Severity, Snapshot, SupplyPoint, SupplyPointDraft, SupplyPointId,
    SupplyPointsClient, SupplyPointsError,
};
use support::{COLLECTION, Harness, STAMP, draft, grace};

struct Unreachable;

#[async_trait]
impl SupplyPointsClient for Unreachable {
    async fn list_points(&self) -> Result<Snapshot, SupplyPointsError> {
        Err(SupplyPointsError::unavailable("offline"))
    }

    async fn create_point(
        &self,
        _editor: &Identity,
        _draft: SupplyPointDraft,
    ) -> Result<SupplyPoint, SupplyPointsError> {
        Err(SupplyPointsError::unavailable("offline"))
    }

    async fn replace_point(
        &self,
        _editor: &Identity,
        _id: &SupplyPointId,
        _draft: SupplyPointDraft,
    ) -> Result<SupplyPoint, SupplyPointsError> {
        Err(SupplyPointsError::unavailable("offline"))
    }

    async fn delete_point(&self, _id: &SupplyPointId) -> Result<(), SupplyPointsError> {
        Err(SupplyPointsError::unavailable("offline"))
    }
}

#[tokio::test]
async fn loads_once_and_renders_cards() {
    let h = Harness::new();
    h.module.service().create(&grace(), draft("Ward tank")).await.unwrap();
    let mut viewer = h.module.viewer();

    assert_eq!(
        viewer.load().await,
        ViewerLoad::Loaded {
            cards: 1,
            rejected: 0
        }
    );

    let card = &viewer.cards()[0];
    assert_eq!(card.name, "Ward tank");
    assert_eq!(card.water_severity, Severity::Ok);
    assert_eq!(card.queue_severity, Severity::Ok);
    assert!(card.coordinates_valid);
    assert!(card.embed_url.contains("bbox=77.5896%2C12.9666%2C77.5996%2C"));
    assert!(card.embed_url.ends_with("marker=12.9716%2C77.5946"));
    assert_eq!(
        card.directions_url,
        "https://www.google.com/maps/dir/?api=1&destination=12.9716%2C77.5946"
    );
    assert_eq!(
        card.last_update,
        Some(LastUpdate {
            by: "Grace Hopper".to_owned(),
            at: STAMP.to_owned(),
        })
    );

    // No refresh after activation, even when the store changes.
    h.module.service().create(&grace(), draft("Second")).await.unwrap();
    assert_eq!(viewer.load().await, ViewerLoad::AlreadyActive);
    assert_eq!(viewer.cards().len(), 1);
}

#[tokio::test]
async fn legacy_documents_without_audit_fields_have_no_last_update() {
    let h = Harness::new();
    let serde_json::Value::Object(fields) = json!({
        "name": "Old pump",
        "location": "Ward 2",
        "openHours": "dawn to dusk",
        "waterLevel": "Medium",
        "queueStatus": "Heavy",
        "plusCode": "12.5, 77.25"
    }) else {
        unreachable!()
    };
    h.store.seed(COLLECTION, "old-pump", fields);
    let mut viewer = h.module.viewer();

    viewer.load().await;

    let card = &viewer.cards()[0];
    assert_eq!(card.last_update, None);
    assert_eq!(card.water_severity, Severity::Caution);
    assert_eq!(card.queue_severity, Severity::Critical);
    assert_eq!(
        card.osm_link,
        "https://www.openstreetmap.org/?mlat=12.5&mlon=77.25#map=18/12.5/77.25"
    );
}

#[tokio::test]
async fn failed_fetch_shows_an_empty_board() {
    let mut viewer = Viewer::new(Arc::new(Unreachable), MapConfig::default());

    assert!(matches!(viewer.load().await, ViewerLoad::Failed(msg) if msg.contains("offline")));
    assert!(viewer.cards().is_empty());
}
