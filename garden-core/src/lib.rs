//! Core procedural-garden simulation library.
//!
//! Main components:
//! - [`shape`] — petal/leaf silhouette archetypes and their 2D outlines.
//! - [`params`] — flower parameter sets and the random generator.
//! - [`flower`] — the flower model builder (stem, receptacle, petals, leaves).
//! - [`growth`] — per-instance seed-to-bloom growth state.
//! - [`lighting`] — time-of-day driven sun and light model.
//! - [`garden`] — the planted-flower collection and per-frame scene output.
//! - [`suggest`] — contract with the external AI parameter-suggestion service.
//! - [`color`] — RGB color values and hex parsing.
//! - [`error`] — shared error type.
//! - [`types`] — shared type aliases and IDs.

pub mod color;
pub mod error;
pub mod flower;
pub mod garden;
pub mod growth;
pub mod lighting;
pub mod params;
pub mod shape;
pub mod suggest;
pub mod types;
