//! Arena session
//!
//! Owns the scene graph and runs the fixed-step frame:
//!
//! ```text
//! input -> hull/turret mutations, spawns -> collision queries
//!       -> update hooks -> sweep -> draw
//! ```
//!
//! Every mutation propagates global transforms before the next line runs, so
//! collision queries always see the current layout.

use std::collections::BTreeSet;
use std::path::Path;

use hierarchy_engine::config::{Config, ConfigError};
use hierarchy_engine::debug::{colors, draw_collider, CollisionDebugColors, DebugDrawSystem, DebugShape};
use hierarchy_engine::entities::{Entity, Obstacle, Projectile, SpawnArea, Sprite, Target, Wall};
use hierarchy_engine::foundation::math::Vector2;
use hierarchy_engine::foundation::time::FpsCounter;
use hierarchy_engine::physics::{CollisionLayers, CollisionPair, PhysicsCollisionSystem};
use hierarchy_engine::scene::{NodeId, SceneError, SceneGraph};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use crate::config::GameConfig;
use crate::input::{InputSource, InputState};

/// Barrel sprite thickness
const BARREL_HALF_WIDTH: f32 = 4.0;

/// Game errors
#[derive(Error, Debug)]
pub enum GameError {
    /// Scene graph rejected an operation
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The fixed timestep must be positive and finite
    #[error("Invalid timestep: {0}")]
    InvalidTimestep(f32),

    /// Spawn area corners and widths must be finite
    #[error("Invalid spawn area: {0:?}")]
    InvalidSpawnArea(SpawnArea),
}

/// What happened during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Index of the finished frame
    pub frame: u64,
    /// Shots fired
    pub shots_fired: u32,
    /// Targets hit
    pub targets_hit: u32,
    /// Obstacle hits
    pub obstacles_hit: u32,
    /// Shots stopped by walls
    pub walls_hit: u32,
    /// Whether the hull move was reverted
    pub hull_blocked: bool,
    /// Nodes swept after the update pass
    pub removed: usize,
}

/// Running arena session
pub struct Game {
    config: GameConfig,
    graph: SceneGraph<Entity>,
    physics: PhysicsCollisionSystem<NodeId>,
    draw: DebugDrawSystem,
    debug_colors: CollisionDebugColors,
    rng: StdRng,
    fps: FpsCounter,

    hull: NodeId,
    turret: NodeId,
    barrel: NodeId,
    targets: Vec<NodeId>,

    score: u32,
    frame: u64,
    fire_cooldown: f32,
}

impl Game {
    /// Build the arena described by `config`
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        let timestep = config.simulation.timestep;
        if !timestep.is_finite() || timestep <= 0.0 {
            return Err(GameError::InvalidTimestep(timestep));
        }
        if !config.target.spawn_area.is_finite() {
            return Err(GameError::InvalidSpawnArea(config.target.spawn_area));
        }

        let mut graph = SceneGraph::new();

        let hull = graph.create_node(Entity::Sprite(
            Sprite::new(config.tank.hull_half_extents, colors::BLUE).solid(),
        ));
        graph.set_position(hull, config.tank.start_position)?;
        let turret = graph.create_child(hull, Entity::Plain)?;
        let half_barrel = config.tank.barrel_length * 0.5;
        let barrel = graph.create_child(
            turret,
            Entity::Sprite(Sprite::new(Vector2::new(half_barrel, BARREL_HALF_WIDTH), colors::GREEN)),
        )?;
        graph.set_position(barrel, Vector2::new(half_barrel, 0.0))?;

        let mut game = Self {
            rng: StdRng::seed_from_u64(config.simulation.seed),
            config,
            graph,
            physics: PhysicsCollisionSystem::new(),
            draw: DebugDrawSystem::new(),
            debug_colors: CollisionDebugColors::default(),
            fps: FpsCounter::new(),
            hull,
            turret,
            barrel,
            targets: Vec::new(),
            score: 0,
            frame: 0,
            fire_cooldown: 0.0,
        };
        game.build_arena()?;

        info!(
            "Arena ready: {} nodes, {} targets, {} obstacles",
            game.graph.len(),
            game.targets.len(),
            game.config.obstacles.len()
        );
        Ok(game)
    }

    /// Load configuration from `path` when given, otherwise use defaults
    pub fn load(path: Option<&Path>) -> Result<Self, GameError> {
        Self::new(GameConfig::load_or_default(path)?)
    }

    fn build_arena(&mut self) -> Result<(), GameError> {
        let arena = self.config.arena.clone();
        if arena.border_walls {
            let (w, h, t) = (arena.width, arena.height, arena.wall_thickness * 0.5);
            let horizontal = Vector2::new(w * 0.5, t);
            let vertical = Vector2::new(t, h * 0.5);
            self.spawn_wall(Vector2::new(w * 0.5, t), 0.0, horizontal)?;
            self.spawn_wall(Vector2::new(w * 0.5, h - t), 0.0, horizontal)?;
            self.spawn_wall(Vector2::new(t, h * 0.5), 0.0, vertical)?;
            self.spawn_wall(Vector2::new(w - t, h * 0.5), 0.0, vertical)?;
        }
        for wall in self.config.walls.clone() {
            self.spawn_wall(wall.position, wall.rotation, wall.half_extents)?;
        }
        for obstacle in self.config.obstacles.clone() {
            let id = self
                .graph
                .create_node(Entity::Obstacle(Obstacle::new(obstacle.half_extents, obstacle.hit_points)));
            self.graph.set_position(id, obstacle.position)?;
            self.sync_node(id)?;
        }
        for _ in 0..self.config.target.count {
            let id = self.graph.create_node(Entity::Target(Target::new(self.config.target.radius)));
            self.targets.push(id);
            self.respawn_target(id)?;
        }
        self.sync_node(self.hull)?;

        self.draw.draw_persistent(
            "arena",
            DebugShape::Polygon {
                points: vec![
                    Vector2::zero(),
                    Vector2::new(0.0, arena.height),
                    Vector2::new(arena.width, arena.height),
                    Vector2::new(arena.width, 0.0),
                ],
                color: colors::GREY,
                duration: 0.0,
            },
        );
        Ok(())
    }

    fn spawn_wall(&mut self, position: Vector2, rotation: f32, half_extents: Vector2) -> Result<NodeId, GameError> {
        let id = self.graph.create_node(Entity::Wall(Wall::new(half_extents)));
        self.graph.set_position(id, position)?;
        self.graph.set_rotation(id, rotation)?;
        self.sync_node(id)?;
        Ok(id)
    }

    /// Refresh a node's collider after moving it outside the update pass
    fn sync_node(&mut self, id: NodeId) -> Result<(), GameError> {
        let global = self.graph.global_transform(id).ok_or(SceneError::UnknownNode(id))?;
        if let Some(entity) = self.graph.payload_mut(id) {
            entity.sync_collider(&global);
        }
        Ok(())
    }

    fn respawn_target(&mut self, id: NodeId) -> Result<(), GameError> {
        let position = Target::random_spawn_point(&mut self.rng, &self.config.target.spawn_area);
        self.graph.set_position(id, position)?;
        self.sync_node(id)?;
        debug!("Target {id:?} spawned at {position}");
        Ok(())
    }

    /// Run the configured number of frames; returns the final score
    pub fn run(&mut self, input: &mut impl InputSource) -> Result<u32, GameError> {
        for _ in 0..self.config.simulation.frames {
            let state = input.poll(self.frame);
            self.step(state)?;
        }
        info!("Final score: {}", self.score);
        Ok(self.score)
    }

    /// Advance one fixed step
    pub fn step(&mut self, input: InputState) -> Result<FrameReport, GameError> {
        let dt = self.config.simulation.timestep;
        let mut report = FrameReport {
            frame: self.frame,
            ..FrameReport::default()
        };

        self.draw.update(dt);
        self.fire_cooldown = (self.fire_cooldown - dt).max(0.0);

        report.hull_blocked = self.drive_hull(input, dt)?;
        self.graph
            .rotate(self.turret, input.turret_turn() * self.config.tank.turret_turn_speed * dt)?;
        if input.fire && self.fire_cooldown <= 0.0 {
            self.fire()?;
            self.fire_cooldown = self.config.projectile.fire_cooldown;
            report.shots_fired += 1;
        }

        self.resolve_hits(&mut report)?;

        self.graph.update(dt);
        report.removed = self.graph.sweep_removed().len();

        self.draw_frame();

        self.frame += 1;
        if self.fps.tick(dt) {
            info!(
                "Frame {}: {} fps, score {}, {} nodes, {} debug shapes",
                self.frame,
                self.fps.fps(),
                self.score,
                self.graph.len(),
                self.draw.shape_count()
            );
        }
        Ok(report)
    }

    /// Turn and drive the hull, undoing the move if it ends inside a wall or
    /// obstacle. Returns whether the move was undone.
    fn drive_hull(&mut self, input: InputState, dt: f32) -> Result<bool, GameError> {
        let turn = input.hull_turn() * self.config.tank.hull_turn_speed * dt;
        let distance = input.drive() * self.config.tank.speed * dt;
        let before = self.graph.local_transform(self.hull).ok_or(SceneError::UnknownNode(self.hull))?;

        self.graph.rotate(self.hull, turn)?;
        // local x is the hull's facing
        self.graph.translate(self.hull, Vector2::new(distance, 0.0))?;
        self.sync_node(self.hull)?;

        if !self.hull_blocked() {
            return Ok(false);
        }
        self.graph.set_local_transform(self.hull, before)?;
        self.sync_node(self.hull)?;
        debug!("Hull move blocked at frame {}", self.frame);
        Ok(true)
    }

    fn hull_blocked(&self) -> bool {
        let Some(hull) = self.graph.payload(self.hull).and_then(Entity::collider) else {
            return false;
        };
        let blockers = CollisionLayers::WALL | CollisionLayers::OBSTACLE;
        self.graph
            .iter()
            .filter(|(_, entity)| entity.layer().intersects(blockers))
            .filter_map(|(_, entity)| entity.collider())
            .any(|collider| collider.overlaps(&hull))
    }

    fn fire(&mut self) -> Result<NodeId, GameError> {
        let turret = self.graph.global_transform(self.turret).ok_or(SceneError::UnknownNode(self.turret))?;
        let muzzle = turret.transform_point(Vector2::new(self.config.tank.barrel_length, 0.0));
        let facing = turret.rotation_z();

        let settings = &self.config.projectile;
        let shot = self
            .graph
            .create_node(Entity::Projectile(Projectile::new(settings.speed, settings.lifetime, settings.radius)));
        self.graph.set_position(shot, muzzle)?;
        self.graph.set_rotation(shot, facing)?;
        self.sync_node(shot)?;
        debug!("Shot {shot:?} fired from {muzzle} heading {facing:.3} rad");
        Ok(shot)
    }

    fn resolve_hits(&mut self, report: &mut FrameReport) -> Result<(), GameError> {
        self.physics.clear_bodies();
        for (id, entity) in self.graph.iter() {
            if let Some(body) = entity.collision_body() {
                self.physics.register(id, body);
            }
        }
        let pairs: Vec<CollisionPair<NodeId>> = self.physics.detect_collisions().iter().copied().collect();

        let mut respawned = BTreeSet::new();
        for pair in pairs {
            let Some((shot, other)) = self.split_shot_pair(pair) else {
                continue;
            };
            if respawned.contains(&other) {
                continue;
            }

            let damage = self.config.projectile.damage;
            match self.graph.payload_mut(other) {
                Some(Entity::Target(target)) => {
                    target.register_hit();
                    self.score += 1;
                    report.targets_hit += 1;
                    debug!("Shot {shot:?} hit target {other:?}, score {}", self.score);
                    respawned.insert(other);
                }
                Some(Entity::Obstacle(obstacle)) if obstacle.is_active() => {
                    if obstacle.apply_hit(damage) {
                        info!("Obstacle {other:?} destroyed");
                    } else {
                        debug!("Shot {shot:?} hit obstacle {other:?}, {} hit points left", obstacle.hit_points());
                    }
                    report.obstacles_hit += 1;
                }
                Some(Entity::Wall(_)) => {
                    debug!("Shot {shot:?} stopped by wall {other:?}");
                    report.walls_hit += 1;
                }
                _ => continue,
            }

            if let Some(projectile) = self.graph.payload_mut(shot).and_then(Entity::as_projectile_mut) {
                projectile.consume();
            }
            if respawned.contains(&other) {
                self.respawn_target(other)?;
            }
        }
        Ok(())
    }

    /// Order a pair as (live projectile, other body)
    fn split_shot_pair(&self, pair: CollisionPair<NodeId>) -> Option<(NodeId, NodeId)> {
        let live_shot = |id: NodeId| {
            self.graph
                .payload(id)
                .and_then(Entity::as_projectile)
                .is_some_and(|projectile| !projectile.is_consumed())
        };
        if live_shot(pair.first) {
            Some((pair.first, pair.second))
        } else if live_shot(pair.second) {
            Some((pair.second, pair.first))
        } else {
            None
        }
    }

    fn draw_frame(&mut self) {
        self.graph.draw(&mut self.draw);
        if let Some(collider) = self.graph.payload(self.hull).and_then(Entity::collider) {
            let colliding = self.physics.current_collisions().iter().any(|pair| pair.other(&self.hull).is_some());
            draw_collider(&mut self.draw, &collider, &self.debug_colors, colliding);
        }
    }

    /// Targets hit so far
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Frames completed
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Active configuration
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The scene
    pub fn graph(&self) -> &SceneGraph<Entity> {
        &self.graph
    }

    /// Debug shapes recorded so far
    pub fn debug_draw(&self) -> &DebugDrawSystem {
        &self.draw
    }

    /// Hull node
    pub fn hull(&self) -> NodeId {
        self.hull
    }

    /// Turret pivot node, child of the hull
    pub fn turret(&self) -> NodeId {
        self.turret
    }

    /// Barrel sprite node, child of the turret
    pub fn barrel(&self) -> NodeId {
        self.barrel
    }

    /// Target nodes
    pub fn targets(&self) -> &[NodeId] {
        &self.targets
    }
}
