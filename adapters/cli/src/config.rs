//! Loading the session configuration and applying command-line overrides.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use gridwalk_core::{GameConfig, MovementMode, MAX_PIXEL_COORDINATE};
use serde::{
    de::{
        value::{Error as ValueError, StrDeserializer},
        IntoDeserializer,
    },
    Deserialize,
};

/// Settings given on the command line that take precedence over the file.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Overrides {
    /// Replaces the configured movement mode.
    pub(crate) movement: Option<MovementMode>,
    /// Turns vsync off regardless of the file.
    pub(crate) no_vsync: bool,
}

/// Reads the configuration file at `path`, or returns the defaults when no
/// path was given.
pub(crate) fn load(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        tracing::info!("using built-in configuration");
        return Ok(GameConfig::default());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config =
        parse(&text).with_context(|| format!("failed to parse config file {}", path.display()))?;
    tracing::info!(path = %path.display(), "loaded configuration");
    Ok(config)
}

/// Parses a TOML configuration document and checks its values.
pub(crate) fn parse(text: &str) -> Result<GameConfig> {
    let config: GameConfig = toml::from_str(text)?;
    validate(&config)?;
    Ok(config)
}

/// Applies command-line overrides on top of a loaded configuration.
pub(crate) fn apply(config: &mut GameConfig, overrides: Overrides) {
    if let Some(movement) = overrides.movement {
        config.player.movement = movement;
    }
    if overrides.no_vsync {
        config.window.vsync = false;
    }
}

/// Parses a movement mode as written in configuration files.
pub(crate) fn parse_movement(value: &str) -> Result<MovementMode, String> {
    let deserializer: StrDeserializer<'_, ValueError> = value.into_deserializer();
    MovementMode::deserialize(deserializer).map_err(|error| error.to_string())
}

/// Fastest accepted travel speed in pixels per millisecond.
const MAX_PLAYER_SPEED: f32 = 100.0;

fn validate(config: &GameConfig) -> Result<()> {
    if config.grid.tile_side == 0 {
        bail!("grid.tile_side must be at least 1");
    }
    if !config.player.speed.is_finite() || config.player.speed < 0.0 {
        bail!("player.speed must be a non-negative number");
    }
    if config.player.speed > MAX_PLAYER_SPEED {
        bail!("player.speed must not exceed {MAX_PLAYER_SPEED} pixels per millisecond");
    }
    let spawn_range = -MAX_PIXEL_COORDINATE..=MAX_PIXEL_COORDINATE;
    if !spawn_range.contains(&config.player.spawn_x) || !spawn_range.contains(&config.player.spawn_y)
    {
        bail!("player.spawn_x and player.spawn_y must lie within ±{MAX_PIXEL_COORDINATE} pixels");
    }
    if !config.player.rotation_speed.is_finite() {
        bail!("player.rotation_speed must be a finite number");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_yields_defaults() {
        let config = load(None).expect("defaults");
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn file_values_replace_defaults() {
        let config = parse(
            r#"
            [window]
            target_fps = 30

            [player]
            movement = "arrow-keys"
            speed = 0.5
            "#,
        )
        .expect("valid configuration");

        assert_eq!(config.window.target_fps, 30);
        assert_eq!(config.window.width, 720);
        assert_eq!(config.player.movement, MovementMode::ArrowKeys);
        assert_eq!(config.player.speed, 0.5);
        assert_eq!(config.grid.columns, 10);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse("[grid]\ncolums = 4\n").is_err());
        assert!(parse("[audio]\nvolume = 1\n").is_err());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let error = parse("[grid]\ntile_side = 0\n").expect_err("zero tile side");
        assert!(error.to_string().contains("tile_side"));

        assert!(parse("[player]\nspeed = -1.0\n").is_err());
    }

    #[test]
    fn values_outside_the_pixel_range_are_rejected() {
        let error = parse("[player]\nspeed = 1.0e10\n").expect_err("huge speed");
        assert!(error.to_string().contains("player.speed"));

        let error = parse("[player]\nspawn_x = 2147483643\n").expect_err("spawn near i32::MAX");
        assert!(error.to_string().contains("spawn_x"));
        assert!(parse("[player]\nspawn_y = -2147483648\n").is_err());

        assert!(parse("[player]\nspeed = 100.0\nspawn_x = 16777216\n").is_ok());
    }

    #[test]
    fn unreadable_file_names_the_path() {
        let error = load(Some(Path::new("/nonexistent/gridwalk.toml"))).expect_err("missing file");
        assert!(format!("{error:#}").contains("/nonexistent/gridwalk.toml"));
    }

    #[test]
    fn overrides_take_precedence() {
        let mut config = GameConfig::default();
        apply(
            &mut config,
            Overrides {
                movement: Some(MovementMode::RotateWithKeys),
                no_vsync: true,
            },
        );
        assert_eq!(config.player.movement, MovementMode::RotateWithKeys);
        assert!(!config.window.vsync);

        let before = config.clone();
        apply(&mut config, Overrides::default());
        assert_eq!(config, before);
    }

    #[test]
    fn movement_names_match_configuration_files() {
        assert_eq!(parse_movement("arrow-keys"), Ok(MovementMode::ArrowKeys));
        assert_eq!(
            parse_movement("rotate-with-keys"),
            Ok(MovementMode::RotateWithKeys)
        );
        assert_eq!(
            parse_movement("rotate-with-mouse"),
            Ok(MovementMode::RotateWithMouse)
        );
        assert!(parse_movement("teleport").is_err());
    }

    #[test]
    fn unknown_movement_lists_the_configuration_names() {
        let error = parse_movement("ArrowKeys").expect_err("variant names are not accepted");
        assert!(error.contains("ArrowKeys"));
        for name in ["arrow-keys", "rotate-with-keys", "rotate-with-mouse"] {
            assert!(error.contains(name), "{error}");
        }
    }
}
