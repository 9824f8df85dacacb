// src/easily/ghosts.rs
//! Ghost-grid bookkeeping and lifecycle.
//!
//! The grid of preview instances lives in [`GhostGrid`]: the root ghost the
//! player steers plus row-major clones, with an index-aligned status
//! sequence. Build, teardown, and per-frame evaluation run as one chained
//! `Update` sequence, so teardown commands are applied before the populate
//! step observes the grid.

use bevy::prelude::*;
use bevy::render::view::RenderLayers;

use super::status::{evaluate_placement, placement_allowed, PlacementRules, PlacementStatus};
use crate::config::{ConfigSnapshotChanged, GridConfig, PlacementConfig};
use crate::host::{SpatialIndex, TerrainIndex};

/// Render layer preview instances are moved to (visual only, never solid).
pub const GHOST_RENDER_LAYER: usize = 7;

// ---------- Components ----------

/// Marker on every preview instance, root included.
#[derive(Component, Clone, Copy, Debug)]
pub struct Ghost {
    pub row: u32,
    pub column: u32,
    /// The primary ghost directly following player input.
    pub is_root: bool,
}

/// Visual feedback flag; the host's renderer tints the ghost when set.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct GhostHighlight {
    pub invalid: bool,
}

// ---------- Events ----------

/// Host signal: a placement operation started, with `root` as the
/// player-controlled ghost and `rules` read off the candidate.
#[derive(Event, Clone, Copy, Debug)]
pub struct BeginPlacement {
    pub root: Entity,
    pub rules: PlacementRules,
}

/// Host signal: the placement operation ended without placing.
#[derive(Event, Clone, Copy, Debug, Default)]
pub struct CancelPlacement;

// ---------- Resources ----------

/// The placement operation currently driving the grid, if any.
#[derive(Resource, Default)]
pub struct PlacementSession(pub Option<ActivePlacement>);

#[derive(Clone, Copy, Debug)]
pub struct ActivePlacement {
    pub root: Entity,
    pub rules: PlacementRules,
}

/// Aggregate can-place verdict consumed by the host's build system.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct PlacementDecision {
    pub allowed: bool,
}

/// Preview instances in row-major order plus their statuses.
///
/// Invariant: `statuses.len() == len()` after every mutation, and logical
/// index (0,0) is always the root entity itself, never a clone.
#[derive(Resource, Default)]
pub struct GhostGrid {
    root: Option<Entity>,
    extras: Vec<Entity>,
    statuses: Vec<PlacementStatus>,
    dims: (u32, u32),
}

impl GhostGrid {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn len(&self) -> usize {
        usize::from(self.root.is_some()) + self.extras.len()
    }

    #[inline]
    pub fn root(&self) -> Option<Entity> {
        self.root
    }

    /// (rows, columns) captured at build time. (0, 0) while empty.
    #[inline]
    pub fn dims(&self) -> (u32, u32) {
        self.dims
    }

    #[inline]
    pub fn statuses(&self) -> &[PlacementStatus] {
        &self.statuses
    }

    /// Entities in evaluation order: row-major, root first.
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.root.into_iter().chain(self.extras.iter().copied())
    }

    /// Entity at logical cell (row, column), if the grid holds one.
    pub fn entity_at(&self, row: u32, column: u32) -> Option<Entity> {
        let (rows, columns) = self.dims;
        if row >= rows || column >= columns {
            return None;
        }
        let index = (row * columns + column) as usize;
        if index == 0 {
            self.root
        } else {
            self.extras.get(index - 1).copied()
        }
    }

    pub(crate) fn set_status(&mut self, index: usize, status: PlacementStatus) {
        if let Some(slot) = self.statuses.get_mut(index) {
            *slot = status;
        }
    }

    pub(crate) fn begin(&mut self, root: Entity, grid: GridConfig) {
        self.root = Some(root);
        self.extras.clear();
        self.statuses.clear();
        self.statuses.push(PlacementStatus::Healthy);
        self.dims = (grid.rows, grid.columns);
    }

    pub(crate) fn push_extra(&mut self, entity: Entity) {
        self.extras.push(entity);
        self.statuses.push(PlacementStatus::Healthy);
    }
}

/// Immediately tears the grid down: despawns every clone, forgets the root,
/// clears the status sequence. Clones already removed by the host
/// out-of-band are skipped, never an error.
fn destroy_ghosts(grid: &mut GhostGrid, commands: &mut Commands, live: &Query<(), With<Ghost>>) {
    if let Some(root) = grid.root.take() {
        if live.get(root).is_ok() {
            commands.entity(root).remove::<(Ghost, GhostHighlight)>();
        }
    }
    for entity in grid.extras.drain(..) {
        if live.get(entity).is_ok() {
            commands.entity(entity).despawn();
        } else {
            debug!("ghost {entity:?} already destroyed, skipping");
        }
    }
    grid.statuses.clear();
    grid.dims = (0, 0);
}

// ---------- Systems ----------

/// Starts a session from the latest `BeginPlacement`, dropping any grid the
/// previous session left behind.
pub(super) fn begin_placement_sessions(
    mut events: EventReader<BeginPlacement>,
    mut session: ResMut<PlacementSession>,
    mut grid: ResMut<GhostGrid>,
    mut commands: Commands,
    live: Query<(), With<Ghost>>,
) {
    let Some(request) = events.read().last().copied() else {
        return;
    };
    if !grid.is_empty() {
        destroy_ghosts(&mut grid, &mut commands, &live);
    }
    session.0 = Some(ActivePlacement {
        root: request.root,
        rules: request.rules,
    });
}

/// Any configuration change invalidates the grid layout; the session keeps
/// running and the grid is rebuilt at the new size next frame.
pub(super) fn teardown_on_config_change(
    mut events: EventReader<ConfigSnapshotChanged>,
    mut grid: ResMut<GhostGrid>,
    mut commands: Commands,
    live: Query<(), With<Ghost>>,
) {
    if events.is_empty() {
        return;
    }
    events.clear();
    if !grid.is_empty() {
        debug!("configuration snapshot changed, dropping ghost grid");
        destroy_ghosts(&mut grid, &mut commands, &live);
    }
}

/// Cancelling placement ends the session and drops the grid.
pub(super) fn teardown_on_cancel(
    mut events: EventReader<CancelPlacement>,
    mut session: ResMut<PlacementSession>,
    mut grid: ResMut<GhostGrid>,
    mut commands: Commands,
    live: Query<(), With<Ghost>>,
) {
    if events.is_empty() {
        return;
    }
    events.clear();
    destroy_ghosts(&mut grid, &mut commands, &live);
    session.0 = None;
}

/// While a session is active, makes sure Rows x Columns previews exist.
/// Cell (0,0) is the root itself; every other cell is an entity clone moved
/// to the ghost render layer. Clones mirror the root's transform verbatim
/// each frame until a snapping step repositions them.
pub(super) fn sync_ghost_grid(
    mut commands: Commands,
    config: Res<PlacementConfig>,
    session: Res<PlacementSession>,
    mut grid: ResMut<GhostGrid>,
    mut transforms: Query<&mut Transform>,
) {
    let Some(active) = session.0 else {
        return;
    };
    // Root despawned out-of-band (scene unload): nothing to drive.
    let Ok(root_tf) = transforms.get(active.root).copied() else {
        return;
    };

    if grid.is_empty() {
        let dims = GridConfig::from_config(&config);
        grid.begin(active.root, dims);
        commands.entity(active.root).insert((
            Ghost {
                row: 0,
                column: 0,
                is_root: true,
            },
            GhostHighlight::default(),
        ));

        for row in 0..dims.rows {
            for column in 0..dims.columns {
                if row == 0 && column == 0 {
                    continue;
                }
                let clone = commands
                    .entity(active.root)
                    .clone_and_spawn()
                    .insert((
                        Ghost {
                            row,
                            column,
                            is_root: false,
                        },
                        GhostHighlight::default(),
                        RenderLayers::layer(GHOST_RENDER_LAYER),
                        root_tf,
                    ))
                    .id();
                grid.push_extra(clone);
            }
        }
        info!(
            "built {}x{} ghost grid ({} previews)",
            dims.rows,
            dims.columns,
            dims.cell_count()
        );
        return;
    }

    for extra in grid.extras.iter().copied() {
        if let Ok(mut tf) = transforms.get_mut(extra) {
            *tf = root_tf;
        }
    }
}

/// Per-frame re-evaluation of every ghost, in row-major order, feeding the
/// status sequence, the per-ghost highlight, and the aggregate decision.
pub(super) fn evaluate_ghost_statuses(
    config: Res<PlacementConfig>,
    session: Res<PlacementSession>,
    terrain: Res<TerrainIndex>,
    spatial: Res<SpatialIndex>,
    mut grid: ResMut<GhostGrid>,
    mut decision: ResMut<PlacementDecision>,
    mut ghosts: Query<(&Transform, &mut GhostHighlight), With<Ghost>>,
) {
    let Some(active) = session.0 else {
        decision.allowed = false;
        return;
    };
    if grid.is_empty() {
        decision.allowed = false;
        return;
    }

    let ordered: Vec<Entity> = grid.iter().collect();
    for (index, entity) in ordered.into_iter().enumerate() {
        let Ok((tf, mut highlight)) = ghosts.get_mut(entity) else {
            continue;
        };
        let status = evaluate_placement(
            &active.rules,
            tf.translation,
            terrain.0.as_ref(),
            spatial.0.as_ref(),
            PlacementStatus::Healthy,
        );
        highlight.invalid = !status.is_healthy();
        grid.set_status(index, status);
    }

    decision.allowed = placement_allowed(&grid, &config);
}
