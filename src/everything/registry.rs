// src/everything/registry.rs
//! Data-driven flora catalog + loader.
//!
//! Per-flora tuning (cultivation requirement, biome restrictions, growth
//! clearance, costs, respawn times) lives in a `.flora.ron` asset, never in
//! code. The loader rejects duplicate names up front so lookups stay
//! unambiguous.

use bevy::asset::{io::Reader, AssetLoader, LoadContext};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::kinds::PlantKind;
use crate::easily::status::PlacementRules;
use crate::host::BiomeMask;

// ---------- Definitions (data form) ----------

/// Growth tuning for plantables that grow over time. Its presence is what
/// makes the space and sunlight checks apply.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GrowthDef {
    /// Clearance the plant needs around itself to keep growing.
    pub grow_radius: f32,
    #[serde(default)]
    pub grow_time_secs: Option<f32>,
    #[serde(default = "default_scale")]
    pub min_scale: f32,
    #[serde(default = "default_scale")]
    pub max_scale: f32,
}

fn default_scale() -> f32 {
    1.0
}

/// What planting one instance costs the player.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResourceCost {
    pub item: String,
    pub amount: u32,
}

/// One catalog entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlantableDef {
    /// Unique human-readable name (used for lookup).
    pub name: String,
    pub kind: PlantKind,
    #[serde(default)]
    pub cultivated_ground_only: bool,
    /// Empty mask = no biome restriction.
    #[serde(default)]
    pub allowed_biomes: BiomeMask,
    /// Present only for growing plants; pickables and decor omit it.
    #[serde(default)]
    pub growth: Option<GrowthDef>,
    #[serde(default)]
    pub cost: Option<ResourceCost>,
    /// Respawn delay for harvestable spawners.
    #[serde(default)]
    pub respawn_secs: Option<f32>,
}

impl From<&PlantableDef> for PlacementRules {
    fn from(def: &PlantableDef) -> Self {
        Self {
            cultivated_ground_only: def.cultivated_ground_only,
            allowed_biomes: def.allowed_biomes,
            grow_radius: def.growth.as_ref().map(|g| g.grow_radius),
        }
    }
}

// ---------- Runtime catalog asset ----------

#[derive(Asset, TypePath, Clone, Debug)]
pub struct FloraCatalog {
    /// Ordered list; the index in this vector is the stable id.
    pub defs: Vec<PlantableDef>,
    /// Name -> index for quick lookups.
    pub name_to_index: HashMap<String, u32>,
}

impl FloraCatalog {
    /// Builds the catalog, rejecting duplicate names.
    pub fn from_defs(defs: Vec<PlantableDef>) -> Result<Self, FloraCatalogLoadError> {
        let mut name_to_index = HashMap::with_capacity(defs.len());
        for (i, def) in defs.iter().enumerate() {
            if let Some(prev) = name_to_index.insert(def.name.clone(), i as u32) {
                return Err(FloraCatalogLoadError::DuplicateName {
                    name: def.name.clone(),
                    first: prev,
                    second: i as u32,
                });
            }
        }
        Ok(Self { defs, name_to_index })
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).map(|&i| i as usize)
    }

    pub fn get(&self, index: usize) -> Option<&PlantableDef> {
        self.defs.get(index)
    }

    pub fn by_name(&self, name: &str) -> Option<&PlantableDef> {
        self.index_of(name).and_then(|i| self.get(i))
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

// ---------- Asset loader for `.flora.ron` ----------

#[derive(Default)]
pub struct FloraCatalogLoader;

impl AssetLoader for FloraCatalogLoader {
    type Asset = FloraCatalog;
    type Settings = ();
    type Error = FloraCatalogLoadError;

    fn extensions(&self) -> &[&str] {
        &["flora.ron"]
    }

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        let defs: Vec<PlantableDef> =
            ron::de::from_bytes(&bytes).map_err(|e| FloraCatalogLoadError::Ron(e.to_string()))?;
        FloraCatalog::from_defs(defs)
    }
}

// ---------- Loader errors ----------

#[derive(thiserror::Error, Debug)]
pub enum FloraCatalogLoadError {
    #[error("I/O while reading flora catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON parse error: {0}")]
    Ron(String),
    #[error("duplicate plantable name '{name}' (first idx {first}, second idx {second})")]
    DuplicateName { name: String, first: u32, second: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
    (
        name: "raspberry_bush",
        kind: BerryBush,
        allowed_biomes: (1),
        cost: Some((item: "Raspberries", amount: 5)),
        respawn_secs: Some(300.0),
    ),
    (
        name: "carrot",
        kind: Crop,
        cultivated_ground_only: true,
        allowed_biomes: (0),
        growth: Some((grow_radius: 0.5, grow_time_secs: Some(4000.0))),
    ),
]"#;

    #[test]
    fn catalog_parses_from_ron() {
        let defs: Vec<PlantableDef> = ron::de::from_str(SAMPLE).unwrap();
        let catalog = FloraCatalog::from_defs(defs).unwrap();
        assert_eq!(catalog.len(), 2);

        let bush = catalog.by_name("raspberry_bush").unwrap();
        assert_eq!(bush.kind, PlantKind::BerryBush);
        assert!(!bush.cultivated_ground_only);
        assert!(bush.allowed_biomes.any(BiomeMask::MEADOWS));
        assert!(bush.growth.is_none());
        assert_eq!(bush.respawn_secs, Some(300.0));

        let carrot = catalog.by_name("carrot").unwrap();
        assert!(carrot.cultivated_ground_only);
        assert_eq!(carrot.growth.as_ref().unwrap().grow_radius, 0.5);
        assert_eq!(carrot.growth.as_ref().unwrap().min_scale, 1.0);
    }

    #[test]
    fn shipped_catalog_parses_cleanly() {
        let text = include_str!("../../assets/flora/plantables.flora.ron");
        let defs: Vec<PlantableDef> = ron::de::from_str(text).unwrap();
        let catalog = FloraCatalog::from_defs(defs).unwrap();
        assert!(catalog.len() >= 10);
        // Crops require cultivated ground and carry growth data.
        let carrot = catalog.by_name("carrot").unwrap();
        assert!(carrot.cultivated_ground_only);
        assert!(carrot.growth.is_some());
        // Pickables respawn and skip the growth checks.
        let bush = catalog.by_name("raspberry_bush").unwrap();
        assert!(bush.respawn_secs.is_some());
        assert!(bush.growth.is_none());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let def = |name: &str| PlantableDef {
            name: name.to_string(),
            kind: PlantKind::Pickable,
            cultivated_ground_only: false,
            allowed_biomes: BiomeMask::NONE,
            growth: None,
            cost: None,
            respawn_secs: None,
        };
        let err = FloraCatalog::from_defs(vec![def("thistle"), def("thistle")]).unwrap_err();
        match err {
            FloraCatalogLoadError::DuplicateName { name, first, second } => {
                assert_eq!(name, "thistle");
                assert_eq!((first, second), (0, 1));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rules_bridge_reads_growth_presence() {
        let defs: Vec<PlantableDef> = ron::de::from_str(SAMPLE).unwrap();
        let catalog = FloraCatalog::from_defs(defs).unwrap();

        let bush_rules = PlacementRules::from(catalog.by_name("raspberry_bush").unwrap());
        assert_eq!(bush_rules.grow_radius, None);
        assert!(!bush_rules.cultivated_ground_only);

        let carrot_rules = PlacementRules::from(catalog.by_name("carrot").unwrap());
        assert_eq!(carrot_rules.grow_radius, Some(0.5));
        assert!(carrot_rules.cultivated_ground_only);
        assert_eq!(carrot_rules.allowed_biomes, BiomeMask::NONE);
    }
}
