//! Read-only board.

use std::sync::Arc;

use supply_points_sdk::{QueueStatus, Severity, SupplyPoint, SupplyPointId, SupplyPointsClient, WaterLevel};
use tracing::{info, warn};

use crate::domain::map::{MapConfig, MapLinks};

/// Who last saved a point and when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastUpdate {
    pub by: String,
    pub at: String,
}

/// Everything needed to render one point on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplyCard {
    pub id: SupplyPointId,
    pub name: String,
    pub location: String,
    pub open_hours: String,
    pub water_level: WaterLevel,
    pub water_severity: Severity,
    pub queue_status: QueueStatus,
    pub queue_severity: Severity,
    pub embed_url: String,
    pub osm_link: String,
    pub directions_url: String,
    pub coordinates_valid: bool,
    pub last_update: Option<LastUpdate>,
}

impl SupplyCard {
    #[must_use]
    pub fn render(point: &SupplyPoint, maps: &MapConfig) -> Self {
        let links = MapLinks::derive(maps, &point.plus_code);
        Self {
            id: point.id.clone(),
            name: point.name.clone(),
            location: point.location.clone(),
            open_hours: point.open_hours.clone(),
            water_level: point.water_level,
            water_severity: point.water_level.severity(),
            queue_status: point.queue_status,
            queue_severity: point.queue_status.severity(),
            embed_url: links.embed_url,
            osm_link: links.osm_link,
            directions_url: links.directions_url,
            coordinates_valid: links.coordinates_valid,
            last_update: point.last_update().map(|(by, at)| LastUpdate {
                by: by.to_owned(),
                at: at.to_owned(),
            }),
        }
    }
}

#[must_use]
pub fn render_board(points: &[SupplyPoint], maps: &MapConfig) -> Vec<SupplyCard> {
    points.iter().map(|p| SupplyCard::render(p, maps)).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerLoad {
    Loaded { cards: usize, rejected: usize },
    /// The read failed; whatever was shown before is still shown.
    Failed(String),
    /// Activation already happened; the board does not refresh itself.
    AlreadyActive,
}

pub struct Viewer {
    client: Arc<dyn SupplyPointsClient>,
    maps: MapConfig,
    cards: Vec<SupplyCard>,
    activated: bool,
}

impl Viewer {
    pub fn new(client: Arc<dyn SupplyPointsClient>, maps: MapConfig) -> Self {
        Self {
            client,
            maps,
            cards: Vec::new(),
            activated: false,
        }
    }

    /// Fetch the collection once. Later calls are no-ops.
    pub async fn load(&mut self) -> ViewerLoad {
        if self.activated {
            return ViewerLoad::AlreadyActive;
        }
        self.activated = true;

        match self.client.list_points().await {
            Ok(snapshot) => {
                self.cards = render_board(&snapshot.points, &self.maps);
                info!(cards = self.cards.len(), "Board loaded");
                ViewerLoad::Loaded {
                    cards: self.cards.len(),
                    rejected: snapshot.rejected.len(),
                }
            }
            Err(e) => {
                warn!(error = %e, "Board load failed, keeping previous cards");
                ViewerLoad::Failed(e.to_string())
            }
        }
    }

    #[must_use]
    pub fn cards(&self) -> &[SupplyCard] {
        &self.cards
    }
}
