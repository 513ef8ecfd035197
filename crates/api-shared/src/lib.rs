//! # API Shared
//!
//! Shared definitions for the Medicine Finder HTTP API and its clients.
//!
//! Contains:
//! - JSON wire types with OpenAPI schemas (`wire` module)
//! - The `HealthService`
//!
//! Used by `api-rest`.

pub mod health;
pub mod wire;

pub use health::HealthService;
pub use wire::*;
