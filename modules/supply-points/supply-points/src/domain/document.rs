//! Strict conversion between stored documents and typed supply points.
//!
//! The store enforces no schema, so every document is checked right after it
//! is read and every draft right before it is written.

use serde_json::Value;
use supply_points_sdk::{
    DocFields, PlusCode, QueueStatus, Snapshot, SupplyPoint, SupplyPointDraft, UnknownVariant,
    WaterLevel,
};
use thiserror::Error;
use tracing::warn;

use crate::domain::error::DomainError;
use crate::domain::ports::{Document, Fields};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("missing field '{0}'")]
    Missing(&'static str),

    #[error("field '{0}' is not a string")]
    NotAString(&'static str),

    #[error("field 'name' is empty")]
    EmptyName,

    #[error(transparent)]
    Unknown(#[from] UnknownVariant),
}

fn required<'a>(fields: &'a Fields, key: &'static str) -> Result<&'a str, DecodeError> {
    match fields.get(key) {
        None | Some(Value::Null) => Err(DecodeError::Missing(key)),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(DecodeError::NotAString(key)),
    }
}

fn optional(fields: &Fields, key: &'static str) -> Result<Option<String>, DecodeError> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(DecodeError::NotAString(key)),
    }
}

impl TryFrom<Document> for SupplyPoint {
    type Error = DecodeError;

    fn try_from(doc: Document) -> Result<Self, Self::Error> {
        let fields = &doc.fields;
        let name = required(fields, DocFields::NAME)?;
        if name.trim().is_empty() {
            return Err(DecodeError::EmptyName);
        }
        // plusCode is only required to be present; bad coordinates degrade the map, not the record.
        Ok(SupplyPoint {
            name: name.to_owned(),
            location: required(fields, DocFields::LOCATION)?.to_owned(),
            open_hours: required(fields, DocFields::OPEN_HOURS)?.to_owned(),
            water_level: required(fields, DocFields::WATER_LEVEL)?.parse::<WaterLevel>()?,
            queue_status: required(fields, DocFields::QUEUE_STATUS)?.parse::<QueueStatus>()?,
            plus_code: PlusCode::new(required(fields, DocFields::PLUS_CODE)?),
            updated_by: optional(fields, DocFields::UPDATED_BY)?,
            updated_at: optional(fields, DocFields::UPDATED_AT)?,
            id: doc.id,
        })
    }
}

/// Split raw documents into valid points and the ids that failed validation.
#[must_use]
pub fn decode_snapshot(collection: &str, docs: Vec<Document>) -> Snapshot {
    let mut snapshot = Snapshot::default();
    for doc in docs {
        let id = doc.id.clone();
        match SupplyPoint::try_from(doc) {
            Ok(point) => snapshot.points.push(point),
            Err(e) => {
                warn!(collection, id = %id, error = %e, "Rejected malformed supply point document");
                snapshot.rejected.push(id);
            }
        }
    }
    snapshot
}

/// Write-side checks for a form payload.
pub trait ValidateDraft {
    /// # Errors
    /// Returns `DomainError::Validation` naming the first offending wire field.
    fn validate(&self) -> Result<(), DomainError>;
}

impl ValidateDraft for SupplyPointDraft {
    fn validate(&self) -> Result<(), DomainError> {
        let required = [
            (DocFields::NAME, &self.name),
            (DocFields::LOCATION, &self.location),
            (DocFields::OPEN_HOURS, &self.open_hours),
            (DocFields::PLUS_CODE, &self.plus_code),
        ];
        if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(DomainError::validation(*field, "must not be empty"));
        }
        if !PlusCode::new(self.plus_code.as_str()).is_well_formed() {
            return Err(DomainError::validation(
                DocFields::PLUS_CODE,
                "expected \"lat, lng\" with latitude in [-90, 90] and longitude in [-180, 180]",
            ));
        }
        Ok(())
    }
}

/// Full document body for a draft plus the recomputed audit fields.
#[must_use]
pub fn encode(draft: &SupplyPointDraft, updated_by: &str, updated_at: &str) -> Fields {
    let mut fields = Fields::new();
    let mut put = |key: &str, value: &str| {
        fields.insert(key.to_owned(), Value::String(value.to_owned()));
    };
    put(DocFields::NAME, &draft.name);
    put(DocFields::LOCATION, &draft.location);
    put(DocFields::OPEN_HOURS, &draft.open_hours);
    put(DocFields::WATER_LEVEL, draft.water_level.as_str());
    put(DocFields::QUEUE_STATUS, draft.queue_status.as_str());
    put(DocFields::PLUS_CODE, &draft.plus_code);
    put(DocFields::UPDATED_BY, updated_by);
    put(DocFields::UPDATED_AT, updated_at);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use supply_points_sdk::SupplyPointId;

    fn doc(value: Value) -> Document {
        let Value::Object(fields) = value else {
            panic!("test document must be an object");
        };
        Document::new("doc-1", fields)
    }

    fn valid() -> Value {
        json!({
            "name": "Ward 4 tanker",
            "location": "Gandhi Nagar",
            "openHours": "6am - 9am",
            "waterLevel": "Medium",
            "queueStatus": "Heavy",
            "plusCode": "12.9716, 77.5946",
            "updatedBy": "Ada",
            "updatedAt": "07:05 03-02-2025"
        })
    }

    #[test]
    fn decodes_complete_document() {
        let point = SupplyPoint::try_from(doc(valid())).unwrap();
        assert_eq!(point.id.as_str(), "doc-1");
        assert_eq!(point.water_level, WaterLevel::Medium);
        assert_eq!(point.queue_status, QueueStatus::Heavy);
        assert_eq!(point.last_update(), Some(("Ada", "07:05 03-02-2025")));
    }

    #[test]
    fn audit_fields_are_optional() {
        let mut v = valid();
        v.as_object_mut().unwrap().remove("updatedBy");
        let point = SupplyPoint::try_from(doc(v)).unwrap();
        assert_eq!(point.updated_by, None);
        assert_eq!(point.last_update(), None);
    }

    #[test]
    fn rejects_unknown_enum_literal() {
        let mut v = valid();
        v["waterLevel"] = json!("Overflowing");
        let err = SupplyPoint::try_from(doc(v)).unwrap_err();
        assert!(matches!(err, DecodeError::Unknown(UnknownVariant { value, .. }) if value == "Overflowing"));
    }

    #[test]
    fn rejects_missing_and_mistyped_fields() {
        let mut v = valid();
        v.as_object_mut().unwrap().remove("openHours");
        assert_eq!(
            SupplyPoint::try_from(doc(v)).unwrap_err(),
            DecodeError::Missing("openHours")
        );

        let mut v = valid();
        v["location"] = json!(42);
        assert_eq!(
            SupplyPoint::try_from(doc(v)).unwrap_err(),
            DecodeError::NotAString("location")
        );
    }

    #[test]
    fn malformed_plus_code_is_kept_on_read() {
        let mut v = valid();
        v["plusCode"] = json!("not-a-number, also-not");
        let point = SupplyPoint::try_from(doc(v)).unwrap();
        assert!(point.plus_code.coordinates().lat.is_nan());
    }

    #[test]
    #[tracing_test::traced_test]
    fn snapshot_separates_rejected_ids() {
        let mut bad = valid();
        bad["queueStatus"] = json!("Endless");
        let docs = vec![
            doc(valid()),
            Document {
                id: "doc-2".into(),
                ..doc(bad)
            },
        ];
        let snapshot = decode_snapshot("supplyPoints", docs);
        assert_eq!(snapshot.points.len(), 1);
        assert_eq!(snapshot.rejected, vec![SupplyPointId::from("doc-2")]);
        assert!(logs_contain("Rejected malformed supply point document"));
        assert!(logs_contain("doc-2"));
    }

    #[test]
    fn draft_validation_names_the_field() {
        let draft = SupplyPointDraft {
            name: "Tank".to_owned(),
            location: "  ".to_owned(),
            open_hours: "all day".to_owned(),
            plus_code: "1, 2".to_owned(),
            ..SupplyPointDraft::default()
        };
        assert_eq!(
            draft.validate().unwrap_err(),
            DomainError::validation("location", "must not be empty")
        );

        let draft = SupplyPointDraft {
            location: "Market".to_owned(),
            plus_code: "north, south".to_owned(),
            ..draft
        };
        assert!(matches!(draft.validate(), Err(DomainError::Validation { field, .. }) if field == "plusCode"));
    }

    #[test]
    fn encode_writes_every_field() {
        let draft = SupplyPointDraft {
            name: "Tank".to_owned(),
            location: "Market".to_owned(),
            open_hours: "all day".to_owned(),
            plus_code: "1, 2".to_owned(),
            ..SupplyPointDraft::default()
        };
        let fields = encode(&draft, "Ada", "09:00 01-01-2025");
        assert_eq!(fields.len(), 8);
        assert_eq!(fields["waterLevel"], json!("Full"));
        assert_eq!(fields["queueStatus"], json!("Light"));
        assert_eq!(fields["updatedBy"], json!("Ada"));
    }
}
