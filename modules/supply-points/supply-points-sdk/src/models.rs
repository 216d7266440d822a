//! Public models for the `supply-points` module.
//!
//! These are transport-agnostic data structures that define the contract
//! between the module and its consumers. Document wire names live in
//! [`DocFields`].

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Name written to `updatedBy` when the signed-in identity has no display name.
pub const FALLBACK_EDITOR_NAME: &str = "Unknown";

/// Field keys of a supply point document, as stored in the collection.
pub struct DocFields;

impl DocFields {
    pub const NAME: &'static str = "name";
    pub const LOCATION: &'static str = "location";
    pub const OPEN_HOURS: &'static str = "openHours";
    pub const WATER_LEVEL: &'static str = "waterLevel";
    pub const QUEUE_STATUS: &'static str = "queueStatus";
    pub const PLUS_CODE: &'static str = "plusCode";
    pub const UPDATED_BY: &'static str = "updatedBy";
    pub const UPDATED_AT: &'static str = "updatedAt";
}

/// Store-assigned document id. Opaque and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SupplyPointId(String);

impl SupplyPointId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SupplyPointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SupplyPointId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for SupplyPointId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// A value outside one of the closed enumerations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// How alarming a status is for a visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Ok,
    Caution,
    /// Rendered with a warning marker.
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaterLevel {
    #[default]
    Full,
    Medium,
    Low,
}

impl WaterLevel {
    pub const ALL: [Self; 3] = [Self::Full, Self::Medium, Self::Low];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Full => "Full",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    #[must_use]
    pub fn severity(self) -> Severity {
        match self {
            Self::Full => Severity::Ok,
            Self::Medium => Severity::Caution,
            Self::Low => Severity::Critical,
        }
    }
}

impl FromStr for WaterLevel {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "water level",
                value: s.to_owned(),
            })
    }
}

impl fmt::Display for WaterLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueueStatus {
    #[default]
    Light,
    Moderate,
    Heavy,
}

impl QueueStatus {
    pub const ALL: [Self; 3] = [Self::Light, Self::Moderate, Self::Heavy];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Moderate => "Moderate",
            Self::Heavy => "Heavy",
        }
    }

    #[must_use]
    pub fn severity(self) -> Severity {
        match self {
            Self::Light => Severity::Ok,
            Self::Moderate => Severity::Caution,
            Self::Heavy => Severity::Critical,
        }
    }
}

impl FromStr for QueueStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "queue status",
                value: s.to_owned(),
            })
    }
}

impl fmt::Display for QueueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric coordinates; either component is `NaN` when its token is not a number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// Raw `"lat, lng"` text as typed into the form.
///
/// Despite the name this is not an Open Location Code.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlusCode(String);

impl PlusCode {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Latitude and longitude tokens: the first two comma-separated parts, trimmed.
    /// A missing part is the empty string.
    #[must_use]
    pub fn split(&self) -> (&str, &str) {
        let mut parts = self.0.split(',').map(str::trim);
        let lat = parts.next().unwrap_or_default();
        let lng = parts.next().unwrap_or_default();
        (lat, lng)
    }

    /// Numeric form of [`split`](Self::split). Never fails: a missing or
    /// non-numeric token becomes `NaN`, a present but blank one becomes `0`.
    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        let mut parts = self.0.split(',').map(str::trim);
        Coordinates {
            lat: coerce(parts.next()),
            lng: coerce(parts.next()),
        }
    }

    /// Exactly two non-blank finite numeric tokens with latitude in [-90, 90]
    /// and longitude in [-180, 180].
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        let (lat, lng) = self.split();
        if self.0.split(',').count() != 2 || lat.is_empty() || lng.is_empty() {
            return false;
        }
        let Coordinates { lat, lng } = self.coordinates();
        lat.is_finite()
            && lng.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lng)
    }
}

fn coerce(token: Option<&str>) -> f64 {
    match token {
        None => f64::NAN,
        Some("") => 0.0,
        Some(t) => t.parse().unwrap_or(f64::NAN),
    }
}

impl fmt::Display for PlusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PlusCode {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// A stored supply point.
#[derive(Debug, Clone, PartialEq)]
pub struct SupplyPoint {
    pub id: SupplyPointId,
    pub name: String,
    pub location: String,
    pub open_hours: String,
    pub water_level: WaterLevel,
    pub queue_status: QueueStatus,
    pub plus_code: PlusCode,
    pub updated_by: Option<String>,
    pub updated_at: Option<String>,
}

impl SupplyPoint {
    /// The form contents that would reproduce this point.
    #[must_use]
    pub fn to_draft(&self) -> SupplyPointDraft {
        SupplyPointDraft {
            name: self.name.clone(),
            location: self.location.clone(),
            open_hours: self.open_hours.clone(),
            water_level: self.water_level,
            queue_status: self.queue_status,
            plus_code: self.plus_code.as_str().to_owned(),
        }
    }

    /// `(updated_by, updated_at)` only when both are recorded.
    #[must_use]
    pub fn last_update(&self) -> Option<(&str, &str)> {
        match (&self.updated_by, &self.updated_at) {
            (Some(by), Some(at)) => Some((by.as_str(), at.as_str())),
            _ => None,
        }
    }
}

/// Editable form payload. `Default` is the blank form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SupplyPointDraft {
    pub name: String,
    pub location: String,
    pub open_hours: String,
    pub water_level: WaterLevel,
    pub queue_status: QueueStatus,
    pub plus_code: String,
}

/// Result of reading the whole collection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    pub points: Vec<SupplyPoint>,
    /// Documents that failed validation on read and were left out of `points`.
    pub rejected: Vec<SupplyPointId>,
}

impl Snapshot {
    #[must_use]
    pub fn contains(&self, id: &SupplyPointId) -> bool {
        self.points.iter().any(|p| &p.id == id)
    }

    #[must_use]
    pub fn find(&self, id: &SupplyPointId) -> Option<&SupplyPoint> {
        self.points.iter().find(|p| &p.id == id)
    }
}

/// A signed-in editor as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub uid: String,
    pub display_name: Option<String>,
}

impl Identity {
    pub fn new(uid: impl Into<String>, display_name: Option<String>) -> Self {
        Self {
            uid: uid.into(),
            display_name,
        }
    }

    /// Value recorded in `updatedBy`.
    #[must_use]
    pub fn editor_name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(FALLBACK_EDITOR_NAME)
    }

    /// First word of the display name, used in the greeting.
    #[must_use]
    pub fn first_name(&self) -> Option<&str> {
        self.display_name
            .as_deref()
            .and_then(|name| name.split_whitespace().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plus_code_splits_and_trims() {
        let code = PlusCode::new("12.9716, 77.5946");
        assert_eq!(code.split(), ("12.9716", "77.5946"));
        let c = code.coordinates();
        assert!((c.lat - 12.9716).abs() < f64::EPSILON);
        assert!((c.lng - 77.5946).abs() < f64::EPSILON);
        assert!(code.is_well_formed());
    }

    #[test]
    fn non_numeric_tokens_become_nan() {
        let code = PlusCode::new("not-a-number, also-not");
        assert_eq!(code.split(), ("not-a-number", "also-not"));
        let c = code.coordinates();
        assert!(c.lat.is_nan());
        assert!(c.lng.is_nan());
        assert!(!c.is_finite());
        assert!(!code.is_well_formed());
    }

    #[test]
    fn missing_longitude_is_empty_token() {
        let code = PlusCode::new("12.5");
        assert_eq!(code.split(), ("12.5", ""));
        assert!(code.coordinates().lng.is_nan());
        assert!(!code.is_well_formed());
    }

    #[test]
    fn blank_token_counts_as_zero_but_is_not_well_formed() {
        let code = PlusCode::new("12.5, ");
        assert_eq!(code.split(), ("12.5", ""));
        let c = code.coordinates();
        assert!((c.lat - 12.5).abs() < f64::EPSILON);
        assert!(c.lng.abs() < f64::EPSILON);
        assert!(!code.is_well_formed());
        assert!(!PlusCode::new(",77.5").is_well_formed());
    }

    #[test]
    fn extra_tokens_and_out_of_range_are_not_well_formed() {
        assert!(!PlusCode::new("1, 2, 3").is_well_formed());
        assert!(!PlusCode::new("91, 10").is_well_formed());
        assert!(!PlusCode::new("10, -181").is_well_formed());
        assert!(!PlusCode::new("inf, 10").is_well_formed());
        assert!(PlusCode::new("-90,180").is_well_formed());
    }

    #[test]
    fn enums_parse_only_exact_literals() {
        assert_eq!("Medium".parse::<WaterLevel>(), Ok(WaterLevel::Medium));
        assert_eq!("Heavy".parse::<QueueStatus>(), Ok(QueueStatus::Heavy));
        let err = "medium".parse::<WaterLevel>().unwrap_err();
        assert_eq!(err.value, "medium");
        assert!("Empty".parse::<QueueStatus>().is_err());
    }

    #[test]
    fn severity_follows_status() {
        assert_eq!(WaterLevel::Full.severity(), Severity::Ok);
        assert_eq!(WaterLevel::Medium.severity(), Severity::Caution);
        assert_eq!(WaterLevel::Low.severity(), Severity::Critical);
        assert_eq!(QueueStatus::Light.severity(), Severity::Ok);
        assert_eq!(QueueStatus::Moderate.severity(), Severity::Caution);
        assert_eq!(QueueStatus::Heavy.severity(), Severity::Critical);
    }

    #[test]
    fn blank_draft_defaults_to_full_and_light() {
        let draft = SupplyPointDraft::default();
        assert_eq!(draft.water_level, WaterLevel::Full);
        assert_eq!(draft.queue_status, QueueStatus::Light);
        assert!(draft.name.is_empty());
    }

    #[test]
    fn identity_names() {
        let anna = Identity::new("u1", Some("Anna Maria Kumar".to_owned()));
        assert_eq!(anna.editor_name(), "Anna Maria Kumar");
        assert_eq!(anna.first_name(), Some("Anna"));

        let nameless = Identity::new("u2", None);
        assert_eq!(nameless.editor_name(), FALLBACK_EDITOR_NAME);
        assert_eq!(nameless.first_name(), None);

        let blank = Identity::new("u3", Some(String::new()));
        assert_eq!(blank.editor_name(), FALLBACK_EDITOR_NAME);
    }

    #[test]
    fn last_update_requires_both_parts() {
        let mut point = SupplyPoint {
            id: "a".into(),
            name: "Tank".to_owned(),
            location: "Ward 4".to_owned(),
            open_hours: "6-9".to_owned(),
            water_level: WaterLevel::Low,
            queue_status: QueueStatus::Heavy,
            plus_code: PlusCode::new("1, 2"),
            updated_by: Some("Anna".to_owned()),
            updated_at: None,
        };
        assert_eq!(point.last_update(), None);
        point.updated_at = Some("09:05 01-02-2025".to_owned());
        assert_eq!(point.last_update(), Some(("Anna", "09:05 01-02-2025")));
        assert_eq!(point.to_draft().plus_code, "1, 2");
    }
}
