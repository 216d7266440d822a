//! Supply Points Module
//!
//! Public board of water supply points with an authenticated admin editor.
//! The whole module is a pass-through over one document collection: read
//! every document, render it, write edited documents back.
//!
//! ## Public API
//!
//! The public API is defined in the `supply-points-sdk` crate and re-exported here:
//! - `SupplyPointsClient` - trait for in-process consumers
//! - `SupplyPoint`, `SupplyPointDraft`, `Snapshot`, `Identity` - data models
//! - `SupplyPointsError` - error types
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
// === PUBLIC API (from SDK) ===
pub use supply_points_sdk::{
    Identity, Snapshot, SupplyPoint, SupplyPointDraft, SupplyPointId, SupplyPointsClient,
    SupplyPointsError,
};

// === ERROR CATALOG ===
pub mod errors;

// === COMPOSITION ROOT ===
pub mod module;
pub use module::SupplyPointsModule;

// === LOCAL CLIENT ===
pub mod local_client;

// === INTERNAL MODULES ===
// Exposed for integration tests and the host binary. Prefer the SDK types.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
