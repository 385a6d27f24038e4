#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Gridwalk.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.

use anyhow::{Context, Result};
use glam::Vec2;
use gridwalk_core::{InputEvent, InputState, Key, MovementKeys};
use gridwalk_rendering::{FrameControl, FrameInput, Presentation, RenderingBackend, Scene};
use macroquad::{
    color::BLACK,
    input::{
        is_key_down, is_key_pressed, is_mouse_button_pressed, is_quit_requested, mouse_position,
        prevent_quit, KeyCode, MouseButton,
    },
};
use std::{sync::mpsc, time::Duration};

const KEY_BINDINGS: [(KeyCode, Key); 4] = [
    (KeyCode::Up, Key::Up),
    (KeyCode::Down, Key::Down),
    (KeyCode::Left, Key::Left),
    (KeyCode::Right, Key::Right),
];

const CAPTION_POSITION: Vec2 = Vec2::new(8.0, 20.0);
const CAPTION_FONT_SIZE: f32 = 20.0;
const HEADING_THICKNESS: f32 = 1.0;

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs frame timing once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

/// Counts presented frames and reports the rate once per second.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    fn record_frame(&mut self, frame: Duration) -> Option<f32> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let per_second = self.frames as f32 / seconds;
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(per_second)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(FrameInput, &mut Scene) -> FrameControl + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            window_width,
            window_height,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: i32::try_from(window_width).context("window width out of range")?,
            window_height: i32::try_from(window_height).context("window height out of range")?,
            window_resizable: false,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }
        tracing::info!(
            title = %config.window_title,
            width = window_width,
            height = window_height,
            "opening window"
        );

        let (finished_sender, finished_receiver) = mpsc::channel::<u64>();

        macroquad::Window::from_config(config, async move {
            prevent_quit();
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();
            let mut presented = 0_u64;

            loop {
                let frame_input = gather_frame_input();

                macroquad::window::clear_background(background);
                let control = update_scene(frame_input, &mut scene);
                draw_scene(&scene);
                presented += 1;

                let frame = Duration::from_secs_f32(macroquad::time::get_frame_time().max(0.0));
                if let Some(per_second) = fps_counter.record_frame(frame) {
                    if show_fps {
                        tracing::info!(fps = per_second, "frame rate");
                    }
                }

                macroquad::window::next_frame().await;
                if control == FrameControl::Exit {
                    break;
                }
            }

            let _ = finished_sender.send(presented);
        });

        match finished_receiver.recv() {
            Ok(presented) => tracing::info!(presented, "window loop finished"),
            Err(_) => tracing::info!("window closed by the platform"),
        }

        Ok(())
    }
}

fn gather_frame_input() -> FrameInput {
    let keys = MovementKeys {
        up: is_key_down(KeyCode::Up),
        down: is_key_down(KeyCode::Down),
        left: is_key_down(KeyCode::Left),
        right: is_key_down(KeyCode::Right),
    };
    let (cursor_x, cursor_y) = mouse_position();
    let pressed: Vec<Key> = KEY_BINDINGS
        .iter()
        .filter(|(code, _)| is_key_pressed(*code))
        .map(|(_, key)| *key)
        .collect();

    frame_input_from_observations(
        keys,
        Vec2::new(cursor_x, cursor_y),
        is_key_pressed(KeyCode::Escape),
        is_quit_requested(),
        &pressed,
        is_mouse_button_pressed(MouseButton::Left),
    )
}

fn frame_input_from_observations(
    keys: MovementKeys,
    cursor_position: Vec2,
    escape_pressed: bool,
    quit_requested: bool,
    pressed_keys: &[Key],
    pointer_pressed: bool,
) -> FrameInput {
    let mut events = Vec::with_capacity(pressed_keys.len() + 2);
    if escape_pressed || quit_requested {
        events.push(InputEvent::CloseRequested);
    }
    events.extend(pressed_keys.iter().copied().map(InputEvent::KeyPressed));
    if pointer_pressed {
        events.push(InputEvent::PointerPressed(cursor_position));
    }

    FrameInput::new(InputState::new(keys, cursor_position), events)
}

fn draw_scene(scene: &Scene) {
    let tile_color = to_macroquad_color(scene.tile_color);
    for corner in &scene.solid_tiles {
        macroquad::shapes::draw_rectangle(
            corner.x,
            corner.y,
            scene.tile_side,
            scene.tile_side,
            tile_color,
        );
    }

    let outline = scene.grid_outline;
    macroquad::shapes::draw_rectangle_lines(
        outline.origin.x,
        outline.origin.y,
        outline.size.x,
        outline.size.y,
        outline.thickness,
        to_macroquad_color(outline.color),
    );

    if let Some(player) = scene.player {
        macroquad::shapes::draw_circle(
            player.center.x,
            player.center.y,
            player.radius,
            to_macroquad_color(player.body_color),
        );
        macroquad::shapes::draw_line(
            player.center.x,
            player.center.y,
            player.heading_end.x,
            player.heading_end.y,
            HEADING_THICKNESS,
            to_macroquad_color(player.heading_color),
        );
    }

    if !scene.caption.is_empty() {
        let _ = macroquad::text::draw_text(
            &scene.caption,
            CAPTION_POSITION.x,
            CAPTION_POSITION.y,
            CAPTION_FONT_SIZE,
            BLACK,
        );
    }
}

fn to_macroquad_color(color: gridwalk_rendering::Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
