#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Gridwalk prototype.
//!
//! This crate defines the vocabulary that connects the tile world, the pure
//! systems and the adapters. Adapters capture an [`InputState`] snapshot and a
//! batch of [`InputEvent`] values once per frame, systems consume them together
//! with the immutable tile grid, and the camera projects the result into
//! screen space for the adapters to present. Nothing in here owns mutable simulation state.

use glam::Vec2;
use serde::Deserialize;

/// Canonical title shown when the experience boots.
pub const WELCOME_BANNER: &str = "Gridwalk";

/// Tile code describing a passable cell.
pub const EMPTY_TILE: TileCode = 0;

/// Tile code describing a solid cell that blocks movement.
pub const SOLID_TILE: TileCode = 1;

/// Largest pixel coordinate a moving rectangle may reach on either axis.
///
/// Positions stay within the range where every integer is exactly
/// representable as `f32`, so fractional steps never lose whole pixels.
pub const MAX_PIXEL_COORDINATE: i32 = 1 << 24;

/// Integer code stored in every tile of the grid.
///
/// Text layouts encode one decimal digit per tile, so codes never exceed 9.
pub type TileCode = u8;

/// Location of a single tile expressed as column and row indices.
///
/// Coordinates are signed because sample points that fall left of or above the
/// grid map to negative indices; those are simply outside the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCoord {
    column: i32,
    row: i32,
}

impl TileCoord {
    /// Creates a new tile coordinate.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the tile.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Zero-based row index of the tile.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }
}

/// Integer pixel position in world space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelPoint {
    /// Horizontal position in pixels.
    pub x: i32,
    /// Vertical position in pixels.
    pub y: i32,
}

impl PixelPoint {
    /// Creates a new pixel position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Tile containing the pixel, using floor division by the tile side.
    ///
    /// `tile_side` must be positive.
    #[must_use]
    pub const fn tile(self, tile_side: i32) -> TileCoord {
        TileCoord::new(self.x.div_euclid(tile_side), self.y.div_euclid(tile_side))
    }
}

/// Axis-aligned rectangle with integer position and size.
///
/// `right` and `bottom` are exclusive: a rectangle at `x = 0` with a width of
/// 16 covers pixels `0..16` and reports `right() == 16`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelRect {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl PixelRect {
    /// Creates a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Left edge.
    #[must_use]
    pub const fn left(&self) -> i32 {
        self.x
    }

    /// Top edge.
    #[must_use]
    pub const fn top(&self) -> i32 {
        self.y
    }

    /// Exclusive right edge.
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Top-left corner.
    #[must_use]
    pub const fn origin(&self) -> PixelPoint {
        PixelPoint::new(self.x, self.y)
    }

    /// Center point, offset from the origin by half the size rounded down.
    #[must_use]
    pub const fn center(&self) -> PixelPoint {
        PixelPoint::new(
            self.x.saturating_add(self.width / 2),
            self.y.saturating_add(self.height / 2),
        )
    }

    /// Moves the rectangle so its left edge sits at `left`.
    pub fn set_left(&mut self, left: i32) {
        self.x = left;
    }

    /// Moves the rectangle so its exclusive right edge sits at `right`.
    pub fn set_right(&mut self, right: i32) {
        self.x = right.saturating_sub(self.width);
    }

    /// Moves the rectangle so its top edge sits at `top`.
    pub fn set_top(&mut self, top: i32) {
        self.y = top;
    }

    /// Moves the rectangle so its exclusive bottom edge sits at `bottom`.
    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom.saturating_sub(self.height);
    }

    /// Adds a fractional horizontal delta, truncating the result toward zero.
    ///
    /// The result is clamped to [`MAX_PIXEL_COORDINATE`]; a NaN delta is ignored.
    pub fn offset_x(&mut self, delta: f32) {
        self.x = offset_coordinate(self.x, delta);
    }

    /// Adds a fractional vertical delta, truncating the result toward zero.
    ///
    /// The result is clamped to [`MAX_PIXEL_COORDINATE`]; a NaN delta is ignored.
    pub fn offset_y(&mut self, delta: f32) {
        self.y = offset_coordinate(self.y, delta);
    }
}

fn offset_coordinate(value: i32, delta: f32) -> i32 {
    if delta.is_nan() {
        return value;
    }
    let limit = MAX_PIXEL_COORDINATE as f32;
    (value as f32 + delta).clamp(-limit, limit) as i32
}

/// Input-to-motion mapping selected for a player when it is created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MovementMode {
    /// Arrow keys translate the player along the screen axes.
    ArrowKeys,
    /// Left/right keys rotate, up/down keys move along the heading.
    RotateWithKeys,
    /// The heading follows the pointer, up/down keys move along it.
    #[default]
    RotateWithMouse,
}

/// Movement keys that are currently held down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MovementKeys {
    /// Up arrow.
    pub up: bool,
    /// Down arrow.
    pub down: bool,
    /// Left arrow.
    pub left: bool,
    /// Right arrow.
    pub right: bool,
}

/// Immutable snapshot of the continuous input state for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputState {
    /// Movement keys held during the frame.
    pub keys: MovementKeys,
    /// Pointer position in window coordinates.
    pub pointer: Vec2,
}

impl InputState {
    /// Creates a snapshot from held keys and the pointer position.
    #[must_use]
    pub const fn new(keys: MovementKeys, pointer: Vec2) -> Self {
        Self { keys, pointer }
    }
}

/// Keys reported through discrete press events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
}

/// Discrete events drained by the game loop once per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// The user asked to close the window.
    CloseRequested,
    /// A movement key went down during the frame.
    KeyPressed(Key),
    /// The primary pointer button went down at the given window position.
    PointerPressed(Vec2),
}

/// Complete configuration for a Gridwalk session.
///
/// Every field carries a default so a configuration file only needs to name
/// the values it changes.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Window and frame pacing settings.
    pub window: WindowConfig,
    /// Tile grid construction settings.
    pub grid: GridConfig,
    /// Player spawn and movement tuning.
    pub player: PlayerConfig,
}

/// Window and frame pacing settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    /// Logical window width in pixels.
    pub width: u32,
    /// Logical window height in pixels.
    pub height: u32,
    /// Frame rate the loop limiter aims for. Zero disables the limiter.
    pub target_fps: u32,
    /// Whether presentation synchronises with the display refresh.
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 720,
            height: 480,
            target_fps: 60,
            vsync: true,
        }
    }
}

/// Tile grid construction settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Number of tile columns.
    pub columns: u32,
    /// Number of tile rows.
    pub rows: u32,
    /// Side length of a square tile in pixels.
    pub tile_side: u32,
    /// Number of random solid placements performed at startup.
    pub random_solid_tiles: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: 10,
            rows: 10,
            tile_side: 32,
            random_solid_tiles: 10,
        }
    }
}

/// Player spawn and movement tuning.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    /// Spawn position of the player's left edge in pixels.
    pub spawn_x: i32,
    /// Spawn position of the player's top edge in pixels.
    pub spawn_y: i32,
    /// Travel speed in pixels per millisecond.
    pub speed: f32,
    /// Turning speed in radians per millisecond.
    pub rotation_speed: f32,
    /// Input-to-motion mapping.
    pub movement: MovementMode,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            spawn_x: 0,
            spawn_y: 0,
            speed: 0.2,
            rotation_speed: 0.005,
            movement: MovementMode::default(),
        }
    }
}
