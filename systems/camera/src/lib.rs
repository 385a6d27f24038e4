#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Camera system that follows the player and projects the world into screen space.

use glam::Vec2;
use gridwalk_core::PixelPoint;
use gridwalk_system_movement::Player;
use gridwalk_world::TileGrid;

/// Fraction of the remaining distance the view covers each frame.
pub const FOLLOW_FACTOR: f32 = 1.0 / 5.0;

/// Length of the heading line drawn from the player's center.
pub const HEADING_LENGTH: f32 = 12.0;

/// Screen-space layout of one frame, produced by [`Camera::render`].
#[derive(Clone, Debug, PartialEq)]
pub struct Projection {
    /// Side length of a tile square in pixels.
    pub tile_side: f32,
    /// Top-left corners of the solid tiles that intersect the viewport.
    pub solid_tiles: Vec<Vec2>,
    /// Top-left corner of the whole grid.
    pub grid_origin: Vec2,
    /// Pixel extent of the whole grid.
    pub grid_size: Vec2,
    /// Center of the player's body.
    pub player_center: Vec2,
    /// Radius of the player's body.
    pub player_radius: f32,
    /// End point of the heading line starting at `player_center`.
    pub heading_end: Vec2,
}

/// View rectangle in world pixels that eases toward the player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    origin: Vec2,
    size: Vec2,
}

impl Camera {
    /// Creates a camera looking at the world origin with the provided viewport size.
    #[must_use]
    pub const fn new(viewport: Vec2) -> Self {
        Self {
            origin: Vec2::ZERO,
            size: viewport,
        }
    }

    /// Top-left corner of the view in world pixels.
    #[must_use]
    pub const fn view_origin(&self) -> Vec2 {
        self.origin
    }

    /// Size of the view in pixels.
    #[must_use]
    pub const fn view_size(&self) -> Vec2 {
        self.size
    }

    /// Center of the view in world pixels.
    #[must_use]
    pub fn view_center(&self) -> Vec2 {
        self.origin + self.size / 2.0
    }

    /// Snaps the view so its center sits exactly on the player's center.
    pub fn recenter(&mut self, player: &Player) {
        self.origin = player_center(player) - self.size / 2.0;
        tracing::debug!(x = self.origin.x, y = self.origin.y, "camera recentered");
    }

    /// Eases toward the player and projects the visible world into screen space.
    ///
    /// The player's screen-space center is handed back through
    /// [`Player::set_screen_position`].
    pub fn render(&mut self, grid: &TileGrid, player: &mut Player) -> Projection {
        let target = player_center(player);
        self.origin += (target - self.view_center()) * FOLLOW_FACTOR;

        let tile_side = grid.tile_side() as f32;
        let solid_tiles = grid
            .solid_tiles()
            .map(|tile| Vec2::new(tile.column() as f32, tile.row() as f32) * tile_side - self.origin)
            .filter(|corner| self.is_visible(*corner, tile_side))
            .collect();

        let center = target - self.origin;
        let rotation = player.rotation();
        player.set_screen_position(center);

        Projection {
            tile_side,
            solid_tiles,
            grid_origin: -self.origin,
            grid_size: Vec2::new(grid.pixel_width() as f32, grid.pixel_height() as f32),
            player_center: center,
            player_radius: (player.rect().width() / 2) as f32,
            heading_end: center + Vec2::new(rotation.sin(), rotation.cos()) * HEADING_LENGTH,
        }
    }

    fn is_visible(&self, corner: Vec2, tile_side: f32) -> bool {
        corner.x + tile_side > 0.0
            && corner.y + tile_side > 0.0
            && corner.x < self.size.x
            && corner.y < self.size.y
    }
}

fn player_center(player: &Player) -> Vec2 {
    let PixelPoint { x, y } = player.rect().center();
    Vec2::new(x as f32, y as f32)
}
