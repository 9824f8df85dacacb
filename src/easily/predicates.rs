// src/easily/predicates.rs
//! Stateless spatial predicates behind the placement checks.
//!
//! Each predicate is pure given its inputs and costs one synchronous query
//! against the host backend. They run once per ghost per frame; ghost
//! counts are bounded by the configured grid size, so no caching.

use bevy::math::Vec3;

use crate::host::{BiomeMask, SpatialQuery, TerrainQuery, PLANT_OBSTRUCTION_MASK, ROOF_MASK};

/// Height of the upward ray used to detect sunlight blockage.
pub const ROOF_RAY_HEIGHT: f32 = 100.0;

/// Cultivation state of the ground under `p`. A position with no heightmap
/// tile reports not-cultivated (terrain-boundary case).
#[inline]
pub fn is_cultivated(terrain: &dyn TerrainQuery, p: Vec3) -> bool {
    terrain.cultivated_at(p).unwrap_or(false)
}

/// An empty `allowed` mask means no biome restriction.
#[inline]
pub fn is_biome_allowed(terrain: &dyn TerrainQuery, p: Vec3, allowed: BiomeMask) -> bool {
    allowed == BiomeMask::NONE || allowed.any(terrain.biome_at(p))
}

/// True iff nothing obstructing sits within `grow_radius` of `p`.
#[inline]
pub fn has_grow_space(spatial: &dyn SpatialQuery, p: Vec3, grow_radius: f32) -> bool {
    spatial.overlap_sphere(p, grow_radius, PLANT_OBSTRUCTION_MASK) == 0
}

/// True iff a solid surface sits above `p` within [`ROOF_RAY_HEIGHT`].
#[inline]
pub fn has_roof(spatial: &dyn SpatialQuery, p: Vec3) -> bool {
    spatial.raycast(p, Vec3::Y, ROOF_RAY_HEIGHT, ROOF_MASK)
}
