//! `SupplyPointsClient` trait definition.

use async_trait::async_trait;

use crate::errors::SupplyPointsError;
use crate::models::{Identity, Snapshot, SupplyPoint, SupplyPointDraft, SupplyPointId};

/// Public API of the `supply-points` module.
///
/// Every mutation is a full-document write: there is no version token and
/// no conflict detection, so the last write of a given id wins.
#[async_trait]
pub trait SupplyPointsClient: Send + Sync {
    /// Read the whole collection.
    async fn list_points(&self) -> Result<Snapshot, SupplyPointsError>;

    /// Insert a new point; the store assigns the id.
    async fn create_point(
        &self,
        editor: &Identity,
        draft: SupplyPointDraft,
    ) -> Result<SupplyPoint, SupplyPointsError>;

    /// Overwrite the point stored under `id`.
    async fn replace_point(
        &self,
        editor: &Identity,
        id: &SupplyPointId,
        draft: SupplyPointDraft,
    ) -> Result<SupplyPoint, SupplyPointsError>;

    /// Remove the point stored under `id`. Irreversible.
    async fn delete_point(&self, id: &SupplyPointId) -> Result<(), SupplyPointsError>;
}
