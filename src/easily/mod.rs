// src/easily/mod.rs
//! PlantEasily: placement validation and the multi-ghost grid preview.
//!
//! A placement session owns a grid of preview ("ghost") instances. Each
//! frame every ghost is checked against the terrain and spatial backends,
//! producing an index-aligned status sequence, per-ghost highlight flags,
//! and the aggregate can-place decision.

pub mod ghosts;
pub mod input;
pub mod predicates;
pub mod status;

use bevy::prelude::*;

use crate::config::{ConfigSnapshotChanged, PlacementConfig};
use crate::host::{SpatialIndex, TerrainIndex};
use ghosts::{BeginPlacement, CancelPlacement, GhostGrid, PlacementDecision, PlacementSession};
use input::InputMode;

pub struct PlantEasilyPlugin;

impl Plugin for PlantEasilyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlacementConfig>()
            .init_resource::<GhostGrid>()
            .init_resource::<PlacementSession>()
            .init_resource::<PlacementDecision>()
            .init_resource::<InputMode>()
            .add_event::<ConfigSnapshotChanged>()
            .add_event::<BeginPlacement>()
            .add_event::<CancelPlacement>()
            // One deterministic per-frame sequence: session changes, then
            // teardown, then (re)populate, then evaluate, then input mode.
            .add_systems(
                Update,
                (
                    ghosts::begin_placement_sessions,
                    ghosts::teardown_on_config_change,
                    ghosts::teardown_on_cancel,
                    ghosts::sync_ghost_grid,
                    ghosts::evaluate_ghost_statuses,
                    input::update_input_mode,
                )
                    .chain(),
            );

        // Hosts normally install real backends before adding this plugin;
        // otherwise keep the conservative stand-ins.
        if !app.world().contains_resource::<TerrainIndex>() {
            app.init_resource::<TerrainIndex>();
        }
        if !app.world().contains_resource::<SpatialIndex>() {
            app.init_resource::<SpatialIndex>();
        }
    }
}
