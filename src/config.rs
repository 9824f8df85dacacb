// src/config.rs
//! Read-only snapshot of the external configuration provider.
//!
//! The host keeps whatever config framework it likes; this crate only sees
//! a `PlacementConfig` resource plus a `ConfigSnapshotChanged` event the
//! host forwards whenever a grid-affecting value changes.

use bevy::prelude::*;

/// Settings the placement core consumes. Values may change at runtime;
/// the host signals that with [`ConfigSnapshotChanged`].
#[derive(Resource, Clone, Debug)]
pub struct PlacementConfig {
    /// Ghost grid rows. Values below 1 are clamped at grid build time.
    pub rows: u32,
    /// Ghost grid columns. Values below 1 are clamped at grid build time.
    pub columns: u32,
    /// Held modifier that hands placement control to alternate input.
    pub gamepad_modifier_key: KeyCode,
    /// Block placement while the root ghost reports an unhealthy status.
    pub prevent_invalid_planting: bool,
    /// Block placement unless every ghost in the grid is healthy.
    pub prevent_partial_planting: bool,
    pub berry_bush_snap_radius: f32,
    pub mushroom_snap_radius: f32,
    pub flower_snap_radius: f32,
    /// Fallback snap radius for kinds without a dedicated setting.
    pub pickable_snap_radius: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            rows: 1,
            columns: 1,
            gamepad_modifier_key: KeyCode::ShiftLeft,
            prevent_invalid_planting: true,
            prevent_partial_planting: true,
            berry_bush_snap_radius: 1.5,
            mushroom_snap_radius: 0.5,
            flower_snap_radius: 1.0,
            pickable_snap_radius: 2.0,
        }
    }
}

/// Grid dimensions, snapshotted once per grid build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridConfig {
    pub rows: u32,
    pub columns: u32,
}

impl GridConfig {
    pub fn from_config(config: &PlacementConfig) -> Self {
        Self {
            rows: config.rows.max(1),
            columns: config.columns.max(1),
        }
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.columns as usize
    }
}

/// Fired by the host after it refreshes [`PlacementConfig`]. Any pending
/// ghost grid is torn down and rebuilt at the new size on the next frame.
#[derive(Event, Clone, Copy, Debug, Default)]
pub struct ConfigSnapshotChanged;
