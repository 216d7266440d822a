use std::sync::Arc;

use supply_points_sdk::{Identity, PlusCode, Snapshot, SupplyPoint, SupplyPointDraft, SupplyPointId};
use tracing::{debug, error, info, instrument};

use crate::domain::document::{ValidateDraft, decode_snapshot, encode};
use crate::domain::error::DomainError;
use crate::domain::ports::{Clock, DocumentStore};
use crate::domain::timestamp::format_updated_at;

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub collection: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            collection: "supplyPoints".to_owned(),
        }
    }
}

/// Pass-through over the supply point collection.
///
/// Writes are full-document and unconditional: two editors saving the same
/// id both succeed and the later write wins.
pub struct SupplyPointsService {
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
    config: ServiceConfig,
}

impl SupplyPointsService {
    pub fn new(store: Arc<dyn DocumentStore>, clock: Arc<dyn Clock>, config: ServiceConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    #[must_use]
    pub fn collection(&self) -> &str {
        &self.config.collection
    }

    #[instrument(skip(self), fields(collection = %self.config.collection))]
    pub async fn list(&self) -> Result<Snapshot, DomainError> {
        debug!("Listing supply points");
        let docs = self
            .store
            .list_all(&self.config.collection)
            .await
            .inspect_err(|e| error!(error = %e, "Failed to list supply points"))?;
        let snapshot = decode_snapshot(&self.config.collection, docs);
        debug!(
            points = snapshot.points.len(),
            rejected = snapshot.rejected.len(),
            "Listed supply points"
        );
        Ok(snapshot)
    }

    #[instrument(skip(self, editor, draft), fields(collection = %self.config.collection, editor = %editor.uid))]
    pub async fn create(
        &self,
        editor: &Identity,
        draft: SupplyPointDraft,
    ) -> Result<SupplyPoint, DomainError> {
        info!("Creating supply point");
        draft.validate()?;

        let (updated_by, updated_at) = self.audit_stamp(editor)?;
        let fields = encode(&draft, &updated_by, &updated_at);
        let id = self
            .store
            .insert(&self.config.collection, fields)
            .await
            .inspect_err(|e| error!(error = %e, "Failed to insert supply point"))?;

        info!(id = %id, "Created supply point");
        Ok(stored(id, draft, updated_by, updated_at))
    }

    #[instrument(skip(self, editor, draft), fields(collection = %self.config.collection, editor = %editor.uid, id = %id))]
    pub async fn replace(
        &self,
        editor: &Identity,
        id: &SupplyPointId,
        draft: SupplyPointDraft,
    ) -> Result<SupplyPoint, DomainError> {
        info!("Replacing supply point");
        draft.validate()?;

        let (updated_by, updated_at) = self.audit_stamp(editor)?;
        let fields = encode(&draft, &updated_by, &updated_at);
        self.store
            .replace(&self.config.collection, id, fields)
            .await
            .inspect_err(|e| error!(error = %e, "Failed to replace supply point"))?;

        info!("Replaced supply point");
        Ok(stored(id.clone(), draft, updated_by, updated_at))
    }

    #[instrument(skip(self), fields(collection = %self.config.collection, id = %id))]
    pub async fn delete(&self, id: &SupplyPointId) -> Result<(), DomainError> {
        info!("Deleting supply point");
        self.store
            .delete(&self.config.collection, id)
            .await
            .inspect_err(|e| error!(error = %e, "Failed to delete supply point"))?;
        info!("Deleted supply point");
        Ok(())
    }

    fn audit_stamp(&self, editor: &Identity) -> Result<(String, String), DomainError> {
        Ok((
            editor.editor_name().to_owned(),
            format_updated_at(self.clock.now())?,
        ))
    }
}

fn stored(
    id: SupplyPointId,
    draft: SupplyPointDraft,
    updated_by: String,
    updated_at: String,
) -> SupplyPoint {
    SupplyPoint {
        id,
        name: draft.name,
        location: draft.location,
        open_hours: draft.open_hours,
        water_level: draft.water_level,
        queue_status: draft.queue_status,
        plus_code: PlusCode::new(draft.plus_code),
        updated_by: Some(updated_by),
        updated_at: Some(updated_at),
    }
}
