// src/everything/kinds.rs
//! Resource-kind tags for plantables.

use serde::{Deserialize, Serialize};

use crate::config::PlacementConfig;

/// What a plantable fundamentally is. Attached at definition time so
/// per-kind tuning never needs to match on prefab names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlantKind {
    BerryBush,
    Mushroom,
    Flower,
    Crop,
    Sapling,
    Vine,
    Pickable,
}

/// Radius used when snapping a ghost onto existing resources of this kind.
#[inline]
pub fn snap_radius(kind: PlantKind, config: &PlacementConfig) -> f32 {
    match kind {
        PlantKind::BerryBush => config.berry_bush_snap_radius,
        PlantKind::Mushroom => config.mushroom_snap_radius,
        PlantKind::Flower => config.flower_snap_radius,
        PlantKind::Crop | PlantKind::Sapling | PlantKind::Vine | PlantKind::Pickable => {
            config.pickable_snap_radius
        }
    }
}
