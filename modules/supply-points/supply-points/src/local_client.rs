//! Local implementation of `SupplyPointsClient`.
//!
//! Delegates to the domain service and converts errors to SDK error types.

use std::sync::Arc;

use async_trait::async_trait;
use supply_points_sdk::{
    Identity, Snapshot, SupplyPoint, SupplyPointDraft, SupplyPointId, SupplyPointsClient,
    SupplyPointsError,
};

use crate::domain::service::SupplyPointsService;

pub struct SupplyPointsLocalClient {
    service: Arc<SupplyPointsService>,
}

impl SupplyPointsLocalClient {
    #[must_use]
    pub fn new(service: Arc<SupplyPointsService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl SupplyPointsClient for SupplyPointsLocalClient {
    async fn list_points(&self) -> Result<Snapshot, SupplyPointsError> {
        self.service.list().await.map_err(Into::into)
    }

    async fn create_point(
        &self,
        editor: &Identity,
        draft: SupplyPointDraft,
    ) -> Result<SupplyPoint, SupplyPointsError> {
        self.service.create(editor, draft).await.map_err(Into::into)
    }

    async fn replace_point(
        &self,
        editor: &Identity,
        id: &SupplyPointId,
        draft: SupplyPointDraft,
    ) -> Result<SupplyPoint, SupplyPointsError> {
        self.service
            .replace(editor, id, draft)
            .await
            .map_err(Into::into)
    }

    async fn delete_point(&self, id: &SupplyPointId) -> Result<(), SupplyPointsError> {
        self.service.delete(id).await.map_err(Into::into)
    }
}
