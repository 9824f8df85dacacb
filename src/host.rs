// src/host.rs
//! Seams to the host engine: terrain lookups and the physics/spatial index.
//! The placement core only ever talks to these traits, so the host (or a
//! test) decides the backing implementation.

use bevy::prelude::*;
use std::sync::Arc;

// ---------- Collision layers ----------

/// Bitmask over the host's collision layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct CollisionMask(pub u32);

impl CollisionMask {
    pub const NONE: Self = Self(0);
    pub const GROUND: Self = Self(1 << 0);
    pub const STATIC_SOLID: Self = Self(1 << 1);
    pub const GROUND_SMALL: Self = Self(1 << 2);
    pub const PIECE: Self = Self(1 << 3);
    pub const PIECE_NONSOLID: Self = Self(1 << 4);
    pub const ITEM: Self = Self(1 << 5);

    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub fn any(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }
}

/// Layers that obstruct a plant's growth radius.
pub const PLANT_OBSTRUCTION_MASK: CollisionMask = CollisionMask::GROUND
    .union(CollisionMask::STATIC_SOLID)
    .union(CollisionMask::GROUND_SMALL)
    .union(CollisionMask::PIECE)
    .union(CollisionMask::PIECE_NONSOLID);

/// Layers that count as a roof for the sunlight check.
pub const ROOF_MASK: CollisionMask = CollisionMask::GROUND
    .union(CollisionMask::STATIC_SOLID)
    .union(CollisionMask::PIECE);

/// Layers considered when snapping ghosts onto existing resources.
pub const SNAP_MASK: CollisionMask = PLANT_OBSTRUCTION_MASK.union(CollisionMask::ITEM);

// ---------- Biomes (lightweight bitmask) ----------

/// Bitmask of world biomes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct BiomeMask(pub u32);

impl BiomeMask {
    pub const NONE: Self = Self(0);
    pub const MEADOWS: Self = Self(1 << 0);
    pub const BLACK_FOREST: Self = Self(1 << 1);
    pub const SWAMP: Self = Self(1 << 2);
    pub const MOUNTAIN: Self = Self(1 << 3);
    pub const PLAINS: Self = Self(1 << 4);
    pub const OCEAN: Self = Self(1 << 5);
    pub const MISTLANDS: Self = Self(1 << 6);
    pub const ASHLANDS: Self = Self(1 << 7);
    pub const DEEP_NORTH: Self = Self(1 << 8);

    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    pub fn any(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }
}

// ---------- Traits: terrain and spatial queries ----------

/// Heightmap-backed terrain lookups.
pub trait TerrainQuery: Send + Sync + 'static {
    /// Cultivation state of the heightmap tile under `p`.
    /// `None` means no tile is loaded there (outside the terrain).
    fn cultivated_at(&self, p: Vec3) -> Option<bool>;

    /// Biome bits at `p`. Empty where no terrain exists.
    fn biome_at(&self, p: Vec3) -> BiomeMask;
}

/// Synchronous queries against the host's spatial/collision index.
pub trait SpatialQuery: Send + Sync + 'static {
    /// Number of colliders on `mask` layers within `radius` of `center`,
    /// excluding the querying candidate itself.
    fn overlap_sphere(&self, center: Vec3, radius: f32, mask: CollisionMask) -> usize;

    /// True iff a ray from `origin` along `dir` hits anything on `mask`
    /// layers within `max_dist`.
    fn raycast(&self, origin: Vec3, dir: Vec3, max_dist: f32, mask: CollisionMask) -> bool;
}

// ---------- Resource wrappers ----------

/// Handle to the host's terrain backend.
#[derive(Resource, Clone)]
pub struct TerrainIndex(pub Arc<dyn TerrainQuery>);

impl TerrainIndex {
    pub fn new(query: impl TerrainQuery) -> Self {
        Self(Arc::new(query))
    }

    /// Stand-in until the host installs a real backend: no tiles anywhere.
    pub fn unloaded() -> Self {
        Self::new(UnloadedTerrain)
    }
}

impl Default for TerrainIndex {
    fn default() -> Self {
        Self::unloaded()
    }
}

/// Handle to the host's spatial/collision index.
#[derive(Resource, Clone)]
pub struct SpatialIndex(pub Arc<dyn SpatialQuery>);

impl SpatialIndex {
    pub fn new(query: impl SpatialQuery) -> Self {
        Self(Arc::new(query))
    }

    /// Stand-in until the host installs a real backend: empty world.
    pub fn empty() -> Self {
        Self::new(OpenSpace)
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::empty()
    }
}

/// Terrain backend with no loaded tiles and no biome data.
pub struct UnloadedTerrain;

impl TerrainQuery for UnloadedTerrain {
    fn cultivated_at(&self, _p: Vec3) -> Option<bool> {
        None
    }

    fn biome_at(&self, _p: Vec3) -> BiomeMask {
        BiomeMask::NONE
    }
}

/// Spatial backend with nothing to collide with.
pub struct OpenSpace;

impl SpatialQuery for OpenSpace {
    fn overlap_sphere(&self, _center: Vec3, _radius: f32, _mask: CollisionMask) -> usize {
        0
    }

    fn raycast(&self, _origin: Vec3, _dir: Vec3, _max_dist: f32, _mask: CollisionMask) -> bool {
        false
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;

    /// Scripted terrain: one global tile state plus fixed biome bits.
    pub struct ScriptedTerrain {
        /// `None` simulates a missing heightmap tile.
        pub tile: Option<bool>,
        pub biome: BiomeMask,
    }

    impl TerrainQuery for ScriptedTerrain {
        fn cultivated_at(&self, _p: Vec3) -> Option<bool> {
            self.tile
        }

        fn biome_at(&self, _p: Vec3) -> BiomeMask {
            self.biome
        }
    }

    /// Scripted physics: fixed overlap count and roof answer.
    pub struct ScriptedSpace {
        pub overlaps: usize,
        pub roof: bool,
    }

    impl SpatialQuery for ScriptedSpace {
        fn overlap_sphere(&self, _center: Vec3, _radius: f32, _mask: CollisionMask) -> usize {
            self.overlaps
        }

        fn raycast(&self, _origin: Vec3, _dir: Vec3, _max_dist: f32, _mask: CollisionMask) -> bool {
            self.roof
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collision_mask_union_and_any() {
        let mask = CollisionMask::GROUND.union(CollisionMask::PIECE);
        assert!(mask.any(CollisionMask::PIECE));
        assert!(!mask.any(CollisionMask::ITEM));
        assert!(SNAP_MASK.any(CollisionMask::ITEM));
        assert!(!PLANT_OBSTRUCTION_MASK.any(CollisionMask::ITEM));
    }

    #[test]
    fn biome_mask_semantics() {
        let allowed = BiomeMask::MEADOWS.union(BiomeMask::PLAINS);
        assert!(allowed.any(BiomeMask::PLAINS));
        assert!(!allowed.any(BiomeMask::SWAMP));
        assert!(allowed.contains(BiomeMask::MEADOWS));
        assert!(!allowed.contains(BiomeMask::MEADOWS.union(BiomeMask::SWAMP)));
    }

    #[test]
    fn default_backends_are_conservative() {
        let terrain = TerrainIndex::default();
        let spatial = SpatialIndex::default();
        assert_eq!(terrain.0.cultivated_at(Vec3::ZERO), None);
        assert_eq!(terrain.0.biome_at(Vec3::ZERO), BiomeMask::NONE);
        assert_eq!(spatial.0.overlap_sphere(Vec3::ZERO, 5.0, SNAP_MASK), 0);
        assert!(!spatial.0.raycast(Vec3::ZERO, Vec3::Y, 100.0, ROOF_MASK));
    }
}
