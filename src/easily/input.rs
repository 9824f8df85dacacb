// src/easily/input.rs
//! Chooses between default and alternate (gamepad) placement input.

use bevy::prelude::*;

use super::ghosts::GhostGrid;
use crate::config::PlacementConfig;

/// True iff alternate input should override default placement input: a root
/// ghost exists and the configured modifier key is held. Stateless.
#[inline]
pub fn gamepad_override_active(
    grid: &GhostGrid,
    keys: &ButtonInput<KeyCode>,
    config: &PlacementConfig,
) -> bool {
    grid.root().is_some() && keys.pressed(config.gamepad_modifier_key)
}

/// Where placement input comes from this frame.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct InputMode {
    pub alternate_override: bool,
}

/// Refreshed once per frame after the grid systems have run. `keys` is
/// optional so headless hosts without an input plugin stay on the default
/// path.
pub(super) fn update_input_mode(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    config: Res<PlacementConfig>,
    grid: Res<GhostGrid>,
    mut mode: ResMut<InputMode>,
) {
    mode.alternate_override = keys
        .map(|keys| gamepad_override_active(&grid, &keys, &config))
        .unwrap_or(false);
}
