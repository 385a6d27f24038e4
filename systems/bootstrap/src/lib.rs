#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that assembles the initial Gridwalk state.

use glam::Vec2;
use gridwalk_core::{GameConfig, GridConfig, PixelPoint, PlayerConfig, WELCOME_BANNER};
use gridwalk_system_camera::Camera;
use gridwalk_system_movement::{Player, PlayerTuning};
use gridwalk_world::{GridFormatError, TileGrid};
use rand::Rng;

/// Everything the game loop owns once startup has finished.
#[derive(Clone, Debug)]
pub struct Startup {
    /// The playing field.
    pub grid: TileGrid,
    /// The controllable entity.
    pub player: Player,
    /// The view following the player, already centered on it.
    pub camera: Camera,
}

/// Produces the state required to start playing.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner(&self) -> &'static str {
        WELCOME_BANNER
    }

    /// Builds the tile grid.
    ///
    /// When `layout` is provided the grid takes its dimensions and contents
    /// from the text. Otherwise an empty grid of the configured size receives
    /// the configured number of random solid tiles.
    pub fn tile_grid<R>(
        &self,
        config: &GridConfig,
        layout: Option<&str>,
        rng: &mut R,
    ) -> Result<TileGrid, GridFormatError>
    where
        R: Rng + ?Sized,
    {
        let mut grid = TileGrid::new(config.columns, config.rows, config.tile_side);
        match layout {
            Some(text) => grid.load_from_text(text)?,
            None => grid.randomize(config.random_solid_tiles, rng),
        }

        tracing::info!(
            columns = grid.columns(),
            rows = grid.rows(),
            solid = grid.solid_count(),
            "tile grid ready"
        );
        Ok(grid)
    }

    /// Spawns the player at the configured position.
    #[must_use]
    pub fn player(&self, config: &PlayerConfig) -> Player {
        Player::new(
            PixelPoint::new(config.spawn_x, config.spawn_y),
            config.movement,
            PlayerTuning::from(config),
        )
    }

    /// Creates a camera for the viewport, snapped onto the player.
    #[must_use]
    pub fn camera(&self, viewport: Vec2, player: &Player) -> Camera {
        let mut camera = Camera::new(viewport);
        camera.recenter(player);
        camera
    }

    /// Assembles the grid, the player and the camera from a full configuration.
    pub fn startup<R>(
        &self,
        config: &GameConfig,
        layout: Option<&str>,
        rng: &mut R,
    ) -> Result<Startup, GridFormatError>
    where
        R: Rng + ?Sized,
    {
        let grid = self.tile_grid(&config.grid, layout, rng)?;
        let player = self.player(&config.player);
        let viewport = Vec2::new(config.window.width as f32, config.window.height as f32);
        let camera = self.camera(viewport, &player);
        Ok(Startup {
            grid,
            player,
            camera,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridwalk_core::MovementMode;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn welcome_banner_names_the_game() {
        assert_eq!(Bootstrap.welcome_banner(), "Gridwalk");
    }

    #[test]
    fn random_grid_uses_configured_size() {
        let config = GridConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let grid = Bootstrap
            .tile_grid(&config, None, &mut rng)
            .expect("random grids cannot fail");

        assert_eq!(grid.columns(), 10);
        assert_eq!(grid.rows(), 10);
        assert_eq!(grid.tile_side(), 32);
        assert!(grid.solid_count() >= 1);
        assert!(grid.solid_count() <= 10);
    }

    #[test]
    fn same_seed_builds_same_grid() {
        let config = GridConfig::default();
        let first = Bootstrap
            .tile_grid(&config, None, &mut ChaCha8Rng::seed_from_u64(99))
            .expect("grid");
        let second = Bootstrap
            .tile_grid(&config, None, &mut ChaCha8Rng::seed_from_u64(99))
            .expect("grid");

        assert_eq!(first.to_text(), second.to_text());
    }

    #[test]
    fn layout_replaces_random_placement() {
        let config = GridConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let grid = Bootstrap
            .tile_grid(&config, Some("010\n000\n"), &mut rng)
            .expect("layout parses");

        assert_eq!(grid.columns(), 3);
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.solid_count(), 1);
    }

    #[test]
    fn malformed_layout_is_reported() {
        let config = GridConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let error = Bootstrap
            .tile_grid(&config, Some("01\n0\n"), &mut rng)
            .expect_err("ragged layout");

        assert!(matches!(error, GridFormatError::RaggedRow { line: 2, .. }));
    }

    #[test]
    fn startup_centers_camera_on_spawned_player() {
        let mut config = GameConfig::default();
        config.player.spawn_x = 64;
        config.player.spawn_y = 32;
        config.player.movement = MovementMode::ArrowKeys;

        let startup = Bootstrap
            .startup(&config, None, &mut ChaCha8Rng::seed_from_u64(3))
            .expect("startup");

        assert_eq!(startup.player.rect().origin(), PixelPoint::new(64, 32));
        assert_eq!(startup.player.mode(), MovementMode::ArrowKeys);
        assert_eq!(startup.camera.view_center(), Vec2::new(72.0, 40.0));
        assert_eq!(startup.camera.view_size(), Vec2::new(720.0, 480.0));
    }
}
