//! Game configuration
//!
//! Every section falls back to its defaults when missing from the file, so a
//! config only needs to name what it changes.

use hierarchy_engine::config::Config;
use hierarchy_engine::entities::SpawnArea;
use hierarchy_engine::foundation::math::Vector2;
use serde::{Deserialize, Serialize};

use crate::input::{InputState, ScriptStep};

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Arena bounds and border walls
    pub arena: ArenaConfig,

    /// Tank handling and dimensions
    pub tank: TankConfig,

    /// Shot behavior
    pub projectile: ProjectileConfig,

    /// Target placement
    pub target: TargetConfig,

    /// Fixed-step run settings
    pub simulation: SimulationConfig,

    /// Destructible obstacles
    pub obstacles: Vec<ObstacleConfig>,

    /// Interior walls, on top of the border
    pub walls: Vec<WallConfig>,
}

/// Arena configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Arena width
    pub width: f32,

    /// Arena height
    pub height: f32,

    /// Surround the arena with walls
    pub border_walls: bool,

    /// Thickness of each border wall
    pub wall_thickness: f32,
}

/// Tank configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TankConfig {
    /// Drive speed (units per second)
    pub speed: f32,

    /// Hull turn rate (radians per second)
    pub hull_turn_speed: f32,

    /// Turret turn rate (radians per second)
    pub turret_turn_speed: f32,

    /// Barrel length from the turret pivot to the muzzle
    pub barrel_length: f32,

    /// Spawn position
    pub start_position: Vector2,

    /// Hull half size
    pub hull_half_extents: Vector2,
}

/// Projectile configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    /// Travel speed (units per second)
    pub speed: f32,

    /// Seconds before a shot expires
    pub lifetime: f32,

    /// Collider radius
    pub radius: f32,

    /// Seconds between shots
    pub fire_cooldown: f32,

    /// Hit points removed from an obstacle per hit
    pub damage: u32,
}

/// Target configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Collider radius
    pub radius: f32,

    /// Targets alive at once
    pub count: usize,

    /// Where targets spawn and respawn
    pub spawn_area: SpawnArea,
}

/// Obstacle placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleConfig {
    /// Hits before it breaks
    pub hit_points: u32,

    /// Center position
    pub position: Vector2,

    /// Half size
    pub half_extents: Vector2,
}

/// Wall placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallConfig {
    /// Rotation in radians
    #[serde(default)]
    pub rotation: f32,

    /// Center position
    pub position: Vector2,

    /// Half size
    pub half_extents: Vector2,
}

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Frames to run
    pub frames: u64,

    /// Fixed timestep in seconds
    pub timestep: f32,

    /// Seed for target placement
    pub seed: u64,

    /// Looping input script
    pub script: Vec<ScriptStep>,
}

impl Config for GameConfig {}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena: ArenaConfig::default(),
            tank: TankConfig::default(),
            projectile: ProjectileConfig::default(),
            target: TargetConfig::default(),
            simulation: SimulationConfig::default(),
            obstacles: vec![
                ObstacleConfig {
                    hit_points: 3,
                    position: Vector2::new(160.0, 120.0),
                    half_extents: Vector2::new(24.0, 24.0),
                },
                ObstacleConfig {
                    hit_points: 3,
                    position: Vector2::new(480.0, 360.0),
                    half_extents: Vector2::new(24.0, 24.0),
                },
            ],
            walls: Vec::new(),
        }
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 480.0,
            border_walls: true,
            wall_thickness: 10.0,
        }
    }
}

impl Default for TankConfig {
    fn default() -> Self {
        Self {
            speed: 100.0,
            hull_turn_speed: 1.0,
            turret_turn_speed: 1.0,
            barrel_length: 40.0,
            start_position: Vector2::new(320.0, 240.0),
            hull_half_extents: Vector2::new(20.0, 18.0),
        }
    }
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            speed: 300.0,
            lifetime: 1.5,
            radius: 6.0,
            fire_cooldown: 0.25,
            damage: 1,
        }
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            radius: 15.0,
            count: 1,
            spawn_area: SpawnArea::new(Vector2::new(40.0, 40.0), Vector2::new(600.0, 440.0)),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            frames: 1800,
            timestep: 1.0 / 60.0,
            seed: 0x7a4b,
            script: vec![
                ScriptStep::new(90, held(|i| {
                    i.turret_right = true;
                    i.fire = true;
                })),
                ScriptStep::new(60, held(|i| i.forward = true)),
                ScriptStep::new(45, held(|i| {
                    i.hull_left = true;
                    i.fire = true;
                })),
                ScriptStep::new(60, held(|i| i.backward = true)),
                ScriptStep::new(90, held(|i| {
                    i.turret_left = true;
                    i.fire = true;
                })),
            ],
        }
    }
}

fn held(press: impl FnOnce(&mut InputState)) -> InputState {
    let mut input = InputState::default();
    press(&mut input);
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use hierarchy_engine::config::ConfigFormat;

    #[test]
    fn test_defaults_match_arena_game() {
        let config = GameConfig::default();
        assert_eq!(config.arena.width, 640.0);
        assert_eq!(config.arena.height, 480.0);
        assert_eq!(config.tank.speed, 100.0);
        assert_eq!(config.projectile.speed, 300.0);
        assert_eq!(config.projectile.lifetime, 1.5);
        assert_eq!(config.target.radius, 15.0);
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let text = "[tank]\nspeed = 50.0\n\n[simulation]\nframes = 10\nseed = 3\n";
        let config = GameConfig::from_str_with_format(text, ConfigFormat::Toml).unwrap();
        assert_eq!(config.tank.speed, 50.0);
        assert_eq!(config.tank.turret_turn_speed, 1.0);
        assert_eq!(config.simulation.frames, 10);
        assert_eq!(config.simulation.script, SimulationConfig::default().script);
        assert_eq!(config.obstacles.len(), 2);
    }

    #[test]
    fn test_walls_from_toml_tables() {
        let text = r#"
            [[walls]]
            position = { x = 100.0, y = 50.0 }
            half_extents = { x = 5.0, y = 40.0 }
        "#;
        let config = GameConfig::from_str_with_format(text, ConfigFormat::Toml).unwrap();
        assert_eq!(config.walls.len(), 1);
        assert_eq!(config.walls[0].rotation, 0.0);
        assert_eq!(config.walls[0].half_extents, Vector2::new(5.0, 40.0));
    }

    #[test]
    fn test_ron_round_trip() {
        let config = GameConfig::default();
        let text = config.to_string_with_format(ConfigFormat::Ron).unwrap();
        let parsed = GameConfig::from_str_with_format(&text, ConfigFormat::Ron).unwrap();
        assert_eq!(parsed, config);
    }
}
