#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Gridwalk adapters.
//!
//! Systems describe what a frame should look like as a [`Scene`] expressed in
//! screen pixels. Backends own the platform loop: once per frame they gather a
//! [`FrameInput`], hand it to the caller's update closure together with the
//! scene, and then present whatever the closure left in the scene.

mod headless;

pub use headless::HeadlessBackend;

use anyhow::Result as AnyResult;
use glam::Vec2;
use gridwalk_core::{InputEvent, InputState};
use thiserror::Error;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::from_rgb_u8(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::from_rgb_u8(0, 0, 0);
    /// Opaque green.
    pub const GREEN: Self = Self::from_rgb_u8(0, 255, 0);
    /// Opaque red.
    pub const RED: Self = Self::from_rgb_u8(255, 0, 0);

    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Input gathered by a backend before the scene is updated.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Continuous input state sampled at the start of the frame.
    pub state: InputState,
    /// Discrete events observed since the previous frame, oldest first.
    pub events: Vec<InputEvent>,
}

impl FrameInput {
    /// Creates a frame input from a state snapshot and drained events.
    #[must_use]
    pub fn new(state: InputState, events: Vec<InputEvent>) -> Self {
        Self { state, events }
    }

    /// Reports whether the frame carries a close request.
    #[must_use]
    pub fn close_requested(&self) -> bool {
        self.events
            .iter()
            .any(|event| matches!(event, InputEvent::CloseRequested))
    }
}

/// Outcome of a frame update telling the backend whether to keep looping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameControl {
    /// Present this frame and run another one.
    Continue,
    /// Present this frame and stop the loop.
    Exit,
}

/// Rectangle outline drawn in screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutlinePresentation {
    /// Top-left corner in screen pixels.
    pub origin: Vec2,
    /// Width and height in pixels.
    pub size: Vec2,
    /// Line thickness in pixels.
    pub thickness: f32,
    /// Line color.
    pub color: Color,
}

/// Player drawn as a filled circle with a heading line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerPresentation {
    /// Center of the body in screen pixels.
    pub center: Vec2,
    /// Radius of the body in pixels.
    pub radius: f32,
    /// End point of the heading line that starts at `center`.
    pub heading_end: Vec2,
    /// Fill color of the body.
    pub body_color: Color,
    /// Color of the heading line.
    pub heading_color: Color,
}

/// Scene description for a single frame, expressed in screen pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Side length of a tile square in pixels.
    pub tile_side: f32,
    /// Top-left corners of the solid tiles to draw.
    pub solid_tiles: Vec<Vec2>,
    /// Fill color of solid tiles.
    pub tile_color: Color,
    /// Outline around the whole grid.
    pub grid_outline: OutlinePresentation,
    /// The player, if it has been placed in the scene.
    pub player: Option<PlayerPresentation>,
    /// Caption text drawn in the corner of the frame.
    pub caption: String,
}

impl Scene {
    /// Creates an empty scene for tiles of the provided side length.
    #[must_use]
    pub fn new(tile_side: f32) -> Self {
        Self {
            tile_side,
            solid_tiles: Vec::new(),
            tile_color: Color::BLACK,
            grid_outline: OutlinePresentation {
                origin: Vec2::ZERO,
                size: Vec2::ZERO,
                thickness: 1.0,
                color: Color::BLACK,
            },
            player: None,
            caption: String::new(),
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Logical window width in pixels.
    pub window_width: u32,
    /// Logical window height in pixels.
    pub window_height: u32,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed first.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    ///
    /// Returns an error when either window dimension is zero or does not fit
    /// the backend's signed size range.
    pub fn new<T>(
        window_title: T,
        window_width: u32,
        window_height: u32,
        clear_color: Color,
        scene: Scene,
    ) -> Result<Self, RenderingError>
    where
        T: Into<String>,
    {
        let limit = i32::MAX as u32;
        if window_width == 0 || window_height == 0 || window_width > limit || window_height > limit
        {
            return Err(RenderingError::InvalidWindowSize {
                width: window_width,
                height: window_height,
            });
        }

        Ok(Self {
            window_title: window_title.into(),
            window_width,
            window_height,
            clear_color,
            scene,
        })
    }

    /// Window size as a vector.
    #[must_use]
    pub fn window_size(&self) -> Vec2 {
        Vec2::new(self.window_width as f32, self.window_height as f32)
    }
}

/// Rendering backend capable of presenting Gridwalk scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until the update closure asks to exit or the
    /// platform shuts down.
    ///
    /// `update_scene` runs once per frame with the input gathered for that
    /// frame and may rewrite the scene before it is presented. The frame on
    /// which it returns [`FrameControl::Exit`] is still presented.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(FrameInput, &mut Scene) -> FrameControl + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RenderingError {
    /// Window dimensions must be positive.
    #[error("window size must be positive and fit in i32 (received {width}x{height})")]
    InvalidWindowSize {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
}
