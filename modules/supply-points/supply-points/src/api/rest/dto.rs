use serde::{Deserialize, Serialize};
use supply_points_sdk::{
    DocFields, QueueStatus, Severity, SupplyPoint, SupplyPointDraft, WaterLevel,
};

use crate::domain::error::DomainError;
use crate::domain::viewer::SupplyCard;

/// REST DTO for a stored supply point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyPointDto {
    pub id: String,
    pub name: String,
    pub location: String,
    pub open_hours: String,
    pub water_level: String,
    pub queue_status: String,
    pub plus_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// REST DTO for the admin form. Status fields default like the blank form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SupplyPointReq {
    pub name: String,
    pub location: String,
    pub open_hours: String,
    #[serde(default)]
    pub water_level: Option<String>,
    #[serde(default)]
    pub queue_status: Option<String>,
    pub plus_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastUpdateDto {
    pub by: String,
    pub at: String,
}

/// One rendered board entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyCardDto {
    pub id: String,
    pub name: String,
    pub location: String,
    pub open_hours: String,
    pub water_level: String,
    pub water_severity: String,
    pub queue_status: String,
    pub queue_severity: String,
    pub map_embed_url: String,
    pub osm_url: String,
    pub directions_url: String,
    pub coordinates_valid: bool,
    pub last_update: Option<LastUpdateDto>,
}

fn severity(s: Severity) -> String {
    match s {
        Severity::Ok => "ok",
        Severity::Caution => "caution",
        Severity::Critical => "critical",
    }
    .to_owned()
}

impl From<SupplyPoint> for SupplyPointDto {
    fn from(p: SupplyPoint) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.name,
            location: p.location,
            open_hours: p.open_hours,
            water_level: p.water_level.as_str().to_owned(),
            queue_status: p.queue_status.as_str().to_owned(),
            plus_code: p.plus_code.to_string(),
            updated_by: p.updated_by,
            updated_at: p.updated_at,
        }
    }
}

impl From<SupplyCard> for SupplyCardDto {
    fn from(c: SupplyCard) -> Self {
        Self {
            id: c.id.to_string(),
            name: c.name,
            location: c.location,
            open_hours: c.open_hours,
            water_level: c.water_level.as_str().to_owned(),
            water_severity: severity(c.water_severity),
            queue_status: c.queue_status.as_str().to_owned(),
            queue_severity: severity(c.queue_severity),
            map_embed_url: c.embed_url,
            osm_url: c.osm_link,
            directions_url: c.directions_url,
            coordinates_valid: c.coordinates_valid,
            last_update: c.last_update.map(|u| LastUpdateDto { by: u.by, at: u.at }),
        }
    }
}

impl TryFrom<SupplyPointReq> for SupplyPointDraft {
    type Error = DomainError;

    fn try_from(req: SupplyPointReq) -> Result<Self, Self::Error> {
        let water_level = req
            .water_level
            .as_deref()
            .map(str::parse::<WaterLevel>)
            .transpose()
            .map_err(|e| DomainError::validation(DocFields::WATER_LEVEL, e.to_string()))?
            .unwrap_or_default();
        let queue_status = req
            .queue_status
            .as_deref()
            .map(str::parse::<QueueStatus>)
            .transpose()
            .map_err(|e| DomainError::validation(DocFields::QUEUE_STATUS, e.to_string()))?
            .unwrap_or_default();
        Ok(Self {
            name: req.name,
            location: req.location,
            open_hours: req.open_hours,
            water_level,
            queue_status,
            plus_code: req.plus_code,
        })
    }
}
