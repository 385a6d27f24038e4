#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Player movement system that turns input snapshots into clamped motion.
//!
//! Each frame the player derives a movement delta from the input snapshot
//! according to its [`MovementMode`], then moves one axis at a time and pushes
//! its leading edge back against every blocking tile the move ran into.

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use gridwalk_core::{InputEvent, InputState, MovementMode, PixelPoint, PixelRect, PlayerConfig};
use gridwalk_world::{collision::rect_collisions, TileGrid};

/// Side length of the player's square bounding box in pixels.
pub const PLAYER_SIZE: i32 = 16;

/// Speeds applied to the elapsed frame time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerTuning {
    /// Travel speed in pixels per millisecond.
    pub speed: f32,
    /// Turning speed in radians per millisecond.
    pub rotation_speed: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            speed: 0.2,
            rotation_speed: 0.005,
        }
    }
}

impl From<&PlayerConfig> for PlayerTuning {
    fn from(config: &PlayerConfig) -> Self {
        Self {
            speed: config.speed,
            rotation_speed: config.rotation_speed,
        }
    }
}

/// The controllable entity walking over the tile grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    rect: PixelRect,
    mode: MovementMode,
    tuning: PlayerTuning,
    rotation: f32,
    screen_position: Vec2,
}

impl Player {
    /// Creates a player whose bounding box starts at `origin`.
    #[must_use]
    pub fn new(origin: PixelPoint, mode: MovementMode, tuning: PlayerTuning) -> Self {
        Self {
            rect: PixelRect::new(origin.x, origin.y, PLAYER_SIZE, PLAYER_SIZE),
            mode,
            tuning,
            rotation: 0.0,
            screen_position: Vec2::new(-1.0, -1.0),
        }
    }

    /// Bounding box in world pixels.
    #[must_use]
    pub const fn rect(&self) -> PixelRect {
        self.rect
    }

    /// Input-to-motion mapping fixed at construction.
    #[must_use]
    pub const fn mode(&self) -> MovementMode {
        self.mode
    }

    /// Heading in radians. Zero points down the screen, `π/2` points right.
    #[must_use]
    pub const fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Screen-space center recorded by the last render.
    #[must_use]
    pub const fn screen_position(&self) -> Vec2 {
        self.screen_position
    }

    /// Records where the camera drew the player's center.
    ///
    /// Only [`MovementMode::RotateWithMouse`] reads it, one frame later.
    pub fn set_screen_position(&mut self, position: Vec2) {
        self.screen_position = position;
    }

    /// Hook for discrete input events. The player currently ignores them.
    pub fn handle_event(&mut self, _event: &InputEvent) {}

    /// Advances the player by one frame of `elapsed_ms` milliseconds.
    pub fn update(&mut self, elapsed_ms: f32, input: &InputState, grid: &TileGrid) {
        let delta = self.plan_movement(elapsed_ms, input);
        self.move_by(delta, grid);
        tracing::trace!(
            x = self.rect.left(),
            y = self.rect.top(),
            rotation = self.rotation,
            "player updated"
        );
    }

    /// Computes the unclamped movement delta for this frame.
    ///
    /// Rotating modes update the heading as a side effect. When opposing keys
    /// are held together the first of left/right or up/down wins; in
    /// [`MovementMode::RotateWithKeys`] right is checked before left.
    pub fn plan_movement(&mut self, elapsed_ms: f32, input: &InputState) -> Vec2 {
        let keys = input.keys;
        let speed = self.tuning.speed * elapsed_ms;

        match self.mode {
            MovementMode::ArrowKeys => {
                let mut movement = Vec2::ZERO;
                if keys.left {
                    movement.x -= speed;
                } else if keys.right {
                    movement.x += speed;
                }
                if keys.up {
                    movement.y -= speed;
                } else if keys.down {
                    movement.y += speed;
                }

                if movement.x != 0.0 && movement.y != 0.0 {
                    // Split the per-axis speed by the angle between the components
                    // so the diagonal magnitude equals the axis speed.
                    let angle = (movement.y / movement.x).atan();
                    movement = Vec2::new(
                        movement.x * angle.sin().abs(),
                        movement.y * angle.cos().abs(),
                    );
                }
                movement
            }
            MovementMode::RotateWithKeys => {
                let turn = self.tuning.rotation_speed * elapsed_ms;
                if keys.right {
                    self.rotation -= turn;
                } else if keys.left {
                    self.rotation += turn;
                }
                self.heading_movement(input, speed)
            }
            MovementMode::RotateWithMouse => {
                let offset = input.pointer - self.screen_position;
                self.rotation = FRAC_PI_2 - offset.y.atan2(offset.x);
                self.heading_movement(input, speed)
            }
        }
    }

    /// Moves by `delta`, resolving the horizontal axis fully before the vertical one.
    ///
    /// After each axis step every blocking tile overlapped by the new position
    /// pushes the leading edge flush against that tile's near boundary. A zero
    /// component leaves its axis untouched even when overlapping.
    pub fn move_by(&mut self, delta: Vec2, grid: &TileGrid) {
        let tile_side = grid.tile_side();

        self.rect.offset_x(delta.x);
        for tile in rect_collisions(grid, &self.rect) {
            if delta.x > 0.0 {
                self.rect.set_right(tile.column().saturating_mul(tile_side));
            } else if delta.x < 0.0 {
                self.rect.set_left(tile.column().saturating_add(1).saturating_mul(tile_side));
            }
        }

        self.rect.offset_y(delta.y);
        for tile in rect_collisions(grid, &self.rect) {
            if delta.y > 0.0 {
                self.rect.set_bottom(tile.row().saturating_mul(tile_side));
            } else if delta.y < 0.0 {
                self.rect.set_top(tile.row().saturating_add(1).saturating_mul(tile_side));
            }
        }
    }

    fn heading_movement(&self, input: &InputState, speed: f32) -> Vec2 {
        let heading = Vec2::new(self.rotation.sin(), self.rotation.cos());
        if input.keys.up {
            heading * speed
        } else if input.keys.down {
            -heading * speed
        } else {
            Vec2::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridwalk_core::MovementKeys;

    fn keys(up: bool, down: bool, left: bool, right: bool) -> InputState {
        InputState::new(
            MovementKeys {
                up,
                down,
                left,
                right,
            },
            Vec2::ZERO,
        )
    }

    fn player(mode: MovementMode) -> Player {
        Player::new(PixelPoint::new(0, 0), mode, PlayerTuning::default())
    }

    #[test]
    fn arrow_keys_move_along_single_axis() {
        let mut player = player(MovementMode::ArrowKeys);
        let delta = player.plan_movement(10.0, &keys(false, false, false, true));
        assert_eq!(delta, Vec2::new(2.0, 0.0));

        let delta = player.plan_movement(10.0, &keys(true, false, false, false));
        assert_eq!(delta, Vec2::new(0.0, -2.0));
    }

    #[test]
    fn diagonal_arrow_movement_keeps_configured_speed() {
        let mut player = player(MovementMode::ArrowKeys);
        for (up, down, left, right) in [
            (true, false, true, false),
            (true, false, false, true),
            (false, true, true, false),
            (false, true, false, true),
        ] {
            let delta = player.plan_movement(20.0, &keys(up, down, left, right));
            assert!((delta.length() - 4.0).abs() < 1e-5, "delta {delta:?}");
            assert!(delta.x != 0.0 && delta.y != 0.0);
        }
    }

    #[test]
    fn opposing_keys_prefer_left_and_up() {
        let mut player = player(MovementMode::ArrowKeys);
        let delta = player.plan_movement(10.0, &keys(true, true, true, true));
        assert!(delta.x < 0.0);
        assert!(delta.y < 0.0);
    }

    #[test]
    fn rotate_with_keys_accumulates_heading() {
        let mut player = player(MovementMode::RotateWithKeys);
        let _ = player.plan_movement(100.0, &keys(false, false, true, false));
        assert!((player.rotation() - 0.5).abs() < 1e-6);

        let _ = player.plan_movement(100.0, &keys(false, false, true, true));
        assert!(player.rotation().abs() < 1e-6, "right wins over left");
    }

    #[test]
    fn rotate_with_keys_moves_along_heading() {
        let mut player = player(MovementMode::RotateWithKeys);
        let forward = player.plan_movement(10.0, &keys(true, false, false, false));
        assert!((forward - Vec2::new(0.0, 2.0)).length() < 1e-6);

        let backward = player.plan_movement(10.0, &keys(false, true, false, false));
        assert!((backward - Vec2::new(0.0, -2.0)).length() < 1e-6);

        let idle = player.plan_movement(10.0, &keys(false, false, false, false));
        assert_eq!(idle, Vec2::ZERO);
    }

    #[test]
    fn rotate_with_mouse_faces_the_pointer() {
        let mut player = player(MovementMode::RotateWithMouse);
        player.set_screen_position(Vec2::new(100.0, 100.0));

        let mut input = keys(true, false, false, false);
        input.pointer = Vec2::new(200.0, 100.0);
        let delta = player.plan_movement(10.0, &input);
        assert!((player.rotation() - FRAC_PI_2).abs() < 1e-6);
        assert!((delta - Vec2::new(2.0, 0.0)).length() < 1e-5);

        input.pointer = Vec2::new(100.0, 0.0);
        let delta = player.plan_movement(10.0, &input);
        assert!((delta - Vec2::new(0.0, -2.0)).length() < 1e-5);
    }

    #[test]
    fn rotate_with_mouse_does_not_accumulate() {
        let mut player = player(MovementMode::RotateWithMouse);
        player.set_screen_position(Vec2::new(0.0, 0.0));
        let mut input = keys(false, false, true, false);
        input.pointer = Vec2::new(0.0, 50.0);

        let _ = player.plan_movement(100.0, &input);
        let first = player.rotation();
        let _ = player.plan_movement(100.0, &input);
        assert_eq!(player.rotation(), first);
        assert!(first.abs() < 1e-6);
    }

    #[test]
    fn screen_position_starts_off_screen() {
        let player = player(MovementMode::RotateWithMouse);
        assert_eq!(player.screen_position(), Vec2::new(-1.0, -1.0));
    }
}
