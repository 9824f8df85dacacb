// src/easily/status.rs
//! Per-ghost placement verdicts and the check composition.

use bevy::math::Vec3;

use super::ghosts::GhostGrid;
use super::predicates;
use crate::config::PlacementConfig;
use crate::host::{BiomeMask, SpatialQuery, TerrainQuery};

/// Placement verdict for a single ghost, ordered by severity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PlacementStatus {
    #[default]
    Healthy,
    LackResources,
    NotCultivated,
    WrongBiome,
    NoSpace,
    NoSun,
    Invalid,
}

impl PlacementStatus {
    #[inline]
    pub fn is_healthy(self) -> bool {
        self == Self::Healthy
    }
}

/// Placement rules read off a candidate piece. Borrowed data; the evaluator
/// never owns the candidate.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlacementRules {
    /// The candidate only accepts cultivated ground.
    pub cultivated_ground_only: bool,
    /// Biomes the candidate may be placed in. Empty = unrestricted.
    pub allowed_biomes: BiomeMask,
    /// Growth clearance for growing-plant candidates. `None` marks a
    /// non-growing candidate and skips the space and sunlight checks.
    pub grow_radius: Option<f32>,
}

/// Runs the placement checks in a fixed order against `position`.
///
/// Every triggered check unconditionally overwrites the running status, so
/// the LAST failing check decides the verdict. That order dependence is the
/// observed contract; callers must not reorder the checks. `initial` lets a
/// prior cost check seed `LackResources` before the spatial checks run.
pub fn evaluate_placement(
    rules: &PlacementRules,
    position: Vec3,
    terrain: &dyn TerrainQuery,
    spatial: &dyn SpatialQuery,
    initial: PlacementStatus,
) -> PlacementStatus {
    let mut status = initial;

    if rules.cultivated_ground_only && !predicates::is_cultivated(terrain, position) {
        status = PlacementStatus::NotCultivated;
    }

    if !predicates::is_biome_allowed(terrain, position, rules.allowed_biomes) {
        status = PlacementStatus::WrongBiome;
    }

    if let Some(grow_radius) = rules.grow_radius {
        if !predicates::has_grow_space(spatial, position, grow_radius) {
            status = PlacementStatus::NoSpace;
        }
        if predicates::has_roof(spatial, position) {
            status = PlacementStatus::NoSun;
        }
    }

    status
}

/// Aggregate can-place decision over the whole grid. An empty grid raises
/// no objection; the host's own placement rules still apply.
pub fn placement_allowed(grid: &GhostGrid, config: &PlacementConfig) -> bool {
    if grid.is_empty() {
        return true;
    }
    if config.prevent_partial_planting {
        return grid.statuses().iter().all(|s| s.is_healthy());
    }
    if config.prevent_invalid_planting {
        // Root ghost is always logical index 0.
        return grid.statuses()[0].is_healthy();
    }
    true
}
