//! Per-frame orchestration of the grid, the player and the camera.

use std::time::Duration;

use gridwalk_core::InputEvent;
use gridwalk_rendering::{
    Color, FrameControl, FrameInput, OutlinePresentation, PlayerPresentation, Scene,
};
use gridwalk_system_bootstrap::Startup;
use gridwalk_system_camera::{Camera, Projection};
use gridwalk_system_movement::Player;
use gridwalk_world::TileGrid;

use crate::frame_clock::FrameClock;

/// Owns the simulation state for the lifetime of the process.
#[derive(Debug)]
pub(crate) struct GameLoop {
    grid: TileGrid,
    player: Player,
    camera: Camera,
    clock: FrameClock,
    target_fps: u32,
    running: bool,
    frames: u64,
}

impl GameLoop {
    /// Takes ownership of the assembled startup state.
    pub(crate) fn new(startup: Startup, target_fps: u32) -> Self {
        let Startup {
            grid,
            player,
            camera,
        } = startup;

        Self {
            grid,
            player,
            camera,
            clock: FrameClock::new(),
            target_fps,
            running: true,
            frames: 0,
        }
    }

    /// Runs one paced iteration: waits for the frame budget, then advances by
    /// the real elapsed time.
    pub(crate) fn frame(&mut self, input: FrameInput, scene: &mut Scene) -> FrameControl {
        let elapsed = self.clock.tick(self.target_fps);
        self.advance(elapsed, input, scene)
    }

    /// Runs one iteration with an explicit frame duration.
    ///
    /// A close request stops the loop after this iteration has been rendered.
    pub(crate) fn advance(
        &mut self,
        elapsed: Duration,
        input: FrameInput,
        scene: &mut Scene,
    ) -> FrameControl {
        self.clock.record(elapsed);
        scene.caption = format!("FPS: {:.0}", self.clock.fps());

        for event in &input.events {
            match event {
                InputEvent::CloseRequested => {
                    if self.running {
                        tracing::info!(frames = self.frames, "close requested");
                    }
                    self.running = false;
                }
                other => {
                    self.player.handle_event(other);
                    self.grid.handle_event(other);
                }
            }
        }

        let elapsed_ms = elapsed.as_secs_f32() * 1_000.0;
        self.player.update(elapsed_ms, &input.state, &self.grid);
        let projection = self.camera.render(&self.grid, &mut self.player);
        fill_scene(scene, projection);
        self.frames += 1;

        if self.running {
            FrameControl::Continue
        } else {
            FrameControl::Exit
        }
    }

    /// The playing field.
    pub(crate) fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// The controllable entity.
    pub(crate) fn player(&self) -> &Player {
        &self.player
    }

    /// Number of completed iterations.
    pub(crate) fn frames(&self) -> u64 {
        self.frames
    }
}

fn fill_scene(scene: &mut Scene, projection: Projection) {
    scene.tile_side = projection.tile_side;
    scene.solid_tiles = projection.solid_tiles;
    scene.tile_color = Color::BLACK;
    scene.grid_outline = OutlinePresentation {
        origin: projection.grid_origin,
        size: projection.grid_size,
        thickness: 1.0,
        color: Color::BLACK,
    };
    scene.player = Some(PlayerPresentation {
        center: projection.player_center,
        radius: projection.player_radius,
        heading_end: projection.heading_end,
        body_color: Color::GREEN,
        heading_color: Color::RED,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use gridwalk_core::{
        InputState, Key, MovementKeys, MovementMode, PixelPoint, TileCoord, SOLID_TILE,
    };
    use gridwalk_system_movement::PlayerTuning;

    fn game(mode: MovementMode) -> GameLoop {
        let mut grid = TileGrid::new(10, 10, 32);
        assert!(grid.set(TileCoord::new(1, 0), SOLID_TILE));
        let player = Player::new(PixelPoint::new(0, 0), mode, PlayerTuning::default());
        let mut camera = Camera::new(Vec2::new(720.0, 480.0));
        camera.recenter(&player);

        GameLoop::new(
            Startup {
                grid,
                player,
                camera,
            },
            60,
        )
    }

    fn holding_right() -> FrameInput {
        let keys = MovementKeys {
            right: true,
            ..MovementKeys::default()
        };
        FrameInput::new(InputState::new(keys, Vec2::ZERO), Vec::new())
    }

    #[test]
    fn advance_moves_the_player_by_elapsed_time() {
        let mut game = game(MovementMode::ArrowKeys);
        let mut scene = Scene::new(32.0);

        let control = game.advance(Duration::from_millis(25), holding_right(), &mut scene);
        assert_eq!(control, FrameControl::Continue);
        assert_eq!(game.player().rect().left(), 5);
        assert_eq!(game.frames(), 1);
    }

    #[test]
    fn walls_stop_the_player() {
        let mut game = game(MovementMode::ArrowKeys);
        let mut scene = Scene::new(32.0);

        for _ in 0..20 {
            let _ = game.advance(Duration::from_millis(16), holding_right(), &mut scene);
        }
        assert_eq!(game.player().rect().right(), 32);
        assert_eq!(game.grid().solid_count(), 1);
    }

    #[test]
    fn close_request_finishes_the_frame_then_exits() {
        let mut game = game(MovementMode::ArrowKeys);
        let mut scene = Scene::new(32.0);
        let mut input = holding_right();
        input.events.push(InputEvent::KeyPressed(Key::Right));
        input.events.push(InputEvent::CloseRequested);

        let control = game.advance(Duration::from_millis(25), input, &mut scene);
        assert_eq!(control, FrameControl::Exit);
        assert_eq!(game.player().rect().left(), 5);
        assert!(scene.player.is_some());
        assert_eq!(game.frames(), 1);
    }

    #[test]
    fn scene_is_filled_from_the_camera_projection() {
        let mut game = game(MovementMode::ArrowKeys);
        let mut scene = Scene::new(0.0);
        scene.tile_color = Color::WHITE;

        let _ = game.advance(Duration::from_millis(16), FrameInput::default(), &mut scene);

        assert_eq!(scene.tile_side, 32.0);
        assert_eq!(scene.solid_tiles, vec![Vec2::new(384.0, 232.0)]);
        assert_eq!(scene.tile_color, Color::BLACK);
        assert_eq!(scene.grid_outline.origin, Vec2::new(352.0, 232.0));
        assert_eq!(scene.grid_outline.size, Vec2::new(320.0, 320.0));
        assert_eq!(scene.grid_outline.thickness, 1.0);
        assert_eq!(scene.grid_outline.color, Color::BLACK);

        let player = scene.player.expect("player is drawn");
        assert_eq!(player.center, Vec2::new(360.0, 240.0));
        assert_eq!(player.radius, 8.0);
        assert_eq!(player.body_color, Color::GREEN);
        assert_eq!(player.heading_color, Color::RED);
    }

    #[test]
    fn caption_shows_the_frame_rate() {
        let mut game = game(MovementMode::ArrowKeys);
        let mut scene = Scene::new(32.0);

        let _ = game.advance(Duration::from_millis(20), FrameInput::default(), &mut scene);
        assert_eq!(scene.caption, "FPS: 50");
    }

    #[test]
    fn mouse_mode_reads_position_from_previous_render() {
        let mut game = game(MovementMode::RotateWithMouse);
        let mut scene = Scene::new(32.0);

        let _ = game.advance(Duration::from_millis(16), FrameInput::default(), &mut scene);
        assert_eq!(game.player().screen_position(), Vec2::new(360.0, 240.0));

        let keys = MovementKeys {
            up: true,
            ..MovementKeys::default()
        };
        let input = FrameInput::new(InputState::new(keys, Vec2::new(360.0, 400.0)), Vec::new());
        let _ = game.advance(Duration::from_millis(50), input, &mut scene);

        assert!(game.player().rotation().abs() < 1e-6);
        assert_eq!(game.player().rect().origin(), PixelPoint::new(0, 10));
    }

    #[test]
    fn frame_paces_to_target_rate() {
        let mut game = game(MovementMode::ArrowKeys);
        let mut scene = Scene::new(32.0);

        let _ = game.frame(FrameInput::default(), &mut scene);
        let started = std::time::Instant::now();
        let _ = game.frame(FrameInput::default(), &mut scene);
        assert!(started.elapsed() >= Duration::from_millis(10));
        assert_eq!(game.frames(), 2);
    }
}
