// src/everything/mod.rs
//! PlantEverything: the data-driven flora catalog.
//!
//! Loads the plantable definitions from a RON asset and exposes them for
//! the host to turn into placeable candidates. The placement core only ever
//! sees the distilled [`PlacementRules`](crate::easily::status::PlacementRules).

pub mod kinds;
pub mod registry;

use bevy::prelude::*;

use registry::{FloraCatalog, FloraCatalogLoader};

/// Where the catalog manifest lives.
#[derive(Resource, Clone)]
pub struct FloraSettings {
    pub catalog_path: String,
}

impl Default for FloraSettings {
    fn default() -> Self {
        Self {
            catalog_path: "flora/plantables.flora.ron".to_string(),
        }
    }
}

/// Handle to the loaded catalog asset.
#[derive(Resource, Default)]
pub struct FloraCatalogHandle(pub Handle<FloraCatalog>);

pub struct PlantEverythingPlugin;

impl Plugin for PlantEverythingPlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<FloraCatalog>()
            .register_asset_loader(FloraCatalogLoader)
            .init_resource::<FloraSettings>()
            .init_resource::<FloraCatalogHandle>()
            .add_systems(Startup, load_catalog)
            .add_systems(Update, monitor_catalog_ready);
    }
}

/// Startup: request loading the catalog manifest, store the handle.
fn load_catalog(
    mut handle: ResMut<FloraCatalogHandle>,
    settings: Res<FloraSettings>,
    assets: Res<AssetServer>,
) {
    if handle.0.is_strong() {
        return;
    }
    handle.0 = assets.load(settings.catalog_path.as_str());
    info!("Flora: loading catalog from '{}'", settings.catalog_path);
}

/// One-shot readiness log once the catalog asset resolves.
fn monitor_catalog_ready(
    mut logged: Local<bool>,
    handle: Res<FloraCatalogHandle>,
    catalogs: Res<Assets<FloraCatalog>>,
) {
    if *logged {
        return;
    }
    if let Some(catalog) = catalogs.get(&handle.0) {
        info!("Flora: catalog ready with {} plantables", catalog.len());
        *logged = true;
    }
}
