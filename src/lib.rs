//! Planting quality-of-life plugins for a survival-crafting host.
//!
//! Two plugins, loadable independently:
//! - [`PlantEasilyPlugin`] — validated placement with a configurable
//!   multi-ghost grid preview. Each preview is checked per frame against
//!   terrain cultivation, biome restrictions, growth clearance, and
//!   overhead sunlight blockage.
//! - [`PlantEverythingPlugin`] — a data-driven catalog of plantables
//!   (pickables, crops, saplings, vines) loaded from a `.flora.ron` asset.
//!
//! The host engine's terrain and collision services stay behind the trait
//! seams in [`host`]; install real backends as `TerrainIndex`/`SpatialIndex`
//! resources before adding the plugins.

pub mod config;
pub mod easily;
pub mod everything;
pub mod host;

pub use easily::PlantEasilyPlugin;
pub use everything::PlantEverythingPlugin;
