//! Supply Points SDK
//!
//! Public contract of the `supply-points` module:
//! - `SupplyPointsClient` trait
//! - Model types for supply points, drafts and editor identities
//! - Error type (`SupplyPointsError`)
//!
//! ## Usage
//!
//! ```ignore
//! use supply_points_sdk::{SupplyPointsClient, SupplyPointDraft};
//!
//! let snapshot = client.list_points().await?;
//! let created = client.create_point(&identity, draft).await?;
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod client;
pub mod errors;
pub mod models;

pub use client::SupplyPointsClient;
pub use errors::SupplyPointsError;
pub use models::{
    Coordinates, DocFields, FALLBACK_EDITOR_NAME, Identity, PlusCode, QueueStatus, Severity,
    Snapshot, SupplyPoint, SupplyPointDraft, SupplyPointId, UnknownVariant, WaterLevel,
};
