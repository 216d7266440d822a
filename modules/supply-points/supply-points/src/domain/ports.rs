//! Outbound ports: everything the board talks to but does not own.

use async_trait::async_trait;
use serde_json::{Map, Value};
use supply_points_sdk::{Identity, SupplyPointId};
use thiserror::Error;
use time::OffsetDateTime;
use tokio::sync::watch;

/// Raw field map of one stored document, keyed by wire name.
pub type Fields = Map<String, Value>;

/// One document as the store returns it.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: SupplyPointId,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<SupplyPointId>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("document '{id}' not found in '{collection}'")]
    NotFound {
        collection: String,
        id: SupplyPointId,
    },

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed store response: {0}")]
    Malformed(String),
}

/// Schema-less document collection reachable over the network.
///
/// Each call is a single-document operation; the store offers no
/// transaction spanning several documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn list_all(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Insert and return the id assigned by the store.
    async fn insert(&self, collection: &str, fields: Fields) -> Result<SupplyPointId, StoreError>;

    /// Overwrite the whole document. Fails with `NotFound` if `id` does not exist.
    async fn replace(
        &self,
        collection: &str,
        id: &SupplyPointId,
        fields: Fields,
    ) -> Result<(), StoreError>;

    /// Remove the document. Deleting a missing id is not an error.
    async fn delete(&self, collection: &str, id: &SupplyPointId) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    SignedOut,
    SignedIn(Identity),
}

impl AuthState {
    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::SignedOut => None,
            Self::SignedIn(identity) => Some(identity),
        }
    }
}

/// Live view of the provider's auth state. Dropping it unsubscribes.
#[derive(Debug)]
pub struct AuthSubscription {
    rx: watch::Receiver<AuthState>,
}

impl AuthSubscription {
    #[must_use]
    pub fn new(rx: watch::Receiver<AuthState>) -> Self {
        Self { rx }
    }

    #[must_use]
    pub fn current(&self) -> AuthState {
        self.rx.borrow().clone()
    }

    /// Wait for the next transition. `None` once the provider is gone.
    pub async fn changed(&mut self) -> Option<AuthState> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    pub fn unsubscribe(self) {
        drop(self);
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("sign-in was cancelled")]
    Cancelled,

    #[error("sign-in rejected: {0}")]
    Rejected(String),

    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}

/// Federated sign-in.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self) -> Result<Identity, AuthError>;

    async fn sign_out(&self);

    fn observe_state(&self) -> AuthSubscription;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

impl Position {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Coordinate text written into the form, six decimals each.
    #[must_use]
    pub fn to_plus_code(&self) -> String {
        format!("{:.6}, {:.6}", self.lat, self.lng)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeolocationError {
    #[error("geolocation is not supported on this device")]
    Unsupported,

    #[error("geolocation permission denied")]
    PermissionDenied,

    #[error("position unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn current_position(&self) -> Result<Position, GeolocationError>;
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeocodeError {
    #[error("geocoder request failed: {0}")]
    Transport(String),

    #[error("geocoder returned HTTP {0}")]
    Status(u16),

    #[error("geocoder response malformed: {0}")]
    Malformed(String),
}

/// Lookup of a human-readable address for a position.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    async fn reverse(&self, position: Position) -> Result<String, GeocodeError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient message shown to the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

pub trait Clock: Send + Sync {
    fn now(&self) -> OffsetDateTime;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plus_code_from_position_has_six_decimals() {
        let pos = Position::new(12.971_598_7, 77.594_562);
        assert_eq!(pos.to_plus_code(), "12.971599, 77.594562");
    }

    #[tokio::test]
    async fn subscription_reports_transitions() {
        let (tx, rx) = watch::channel(AuthState::SignedOut);
        let mut sub = AuthSubscription::new(rx);
        assert_eq!(sub.current(), AuthState::SignedOut);

        let ada = Identity::new("u1", Some("Ada Lovelace".to_owned()));
        tx.send_replace(AuthState::SignedIn(ada.clone()));
        assert_eq!(sub.changed().await, Some(AuthState::SignedIn(ada)));

        drop(tx);
        assert_eq!(sub.changed().await, None);
    }

    #[test]
    fn unsubscribe_releases_receiver() {
        let (tx, rx) = watch::channel(AuthState::SignedOut);
        let sub = AuthSubscription::new(rx);
        assert_eq!(tx.receiver_count(), 1);
        sub.unsubscribe();
        assert_eq!(tx.receiver_count(), 0);
    }
}
