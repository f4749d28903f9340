//! Entity bindings
//!
//! Payload types that sit on scene nodes and keep one collider in sync with
//! their node's global transform. Each refreshes its own collider inside its
//! update hook; nothing else writes it.

mod obstacle;
mod projectile;
mod sprite;
mod target;
mod wall;

pub use obstacle::Obstacle;
pub use projectile::Projectile;
pub use sprite::Sprite;
pub use target::{SpawnArea, Target};
pub use wall::Wall;

use crate::debug::DebugDrawSystem;
use crate::foundation::math::{Matrix3, Vector2, Vector3};
use crate::physics::{Collider, CollisionBody, CollisionLayers, AABB};
use crate::scene::{NodeHooks, NodeTransform};

/// The payload of a game scene node
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    /// Pure transform node (a pivot or grouping node)
    Plain,
    /// Visible box with no gameplay role beyond an optional solid collider
    Sprite(Sprite),
    /// Moving projectile
    Projectile(Projectile),
    /// Respawning target
    Target(Target),
    /// Destructible obstacle
    Obstacle(Obstacle),
    /// Static wall
    Wall(Wall),
}

impl Entity {
    /// Current world-space collider, if the entity takes part in collision
    pub fn collider(&self) -> Option<Collider> {
        match self {
            Self::Plain => None,
            Self::Sprite(sprite) => sprite.collider().map(Collider::from),
            Self::Projectile(projectile) => Some(projectile.collider().into()),
            Self::Target(target) => Some(target.collider().into()),
            Self::Obstacle(obstacle) => obstacle.collider().map(Collider::from),
            Self::Wall(wall) => Some(wall.collider().into()),
        }
    }

    /// Collision layer this entity sits on
    pub fn layer(&self) -> CollisionLayers {
        match self {
            Self::Plain => CollisionLayers::empty(),
            Self::Sprite(_) => CollisionLayers::TANK,
            Self::Projectile(_) => CollisionLayers::PROJECTILE,
            Self::Target(_) => CollisionLayers::TARGET,
            Self::Obstacle(_) => CollisionLayers::OBSTACLE,
            Self::Wall(_) => CollisionLayers::WALL,
        }
    }

    /// Layers this entity collides with
    pub fn mask(&self) -> CollisionLayers {
        match self {
            Self::Plain => CollisionLayers::empty(),
            Self::Sprite(_) => CollisionLayers::OBSTACLE | CollisionLayers::WALL | CollisionLayers::TARGET,
            Self::Projectile(_) => CollisionLayers::TARGET | CollisionLayers::OBSTACLE | CollisionLayers::WALL,
            Self::Target(_) | Self::Obstacle(_) | Self::Wall(_) => CollisionLayers::PROJECTILE | CollisionLayers::TANK,
        }
    }

    /// Collider plus filtering data, ready to register for pair detection
    pub fn collision_body(&self) -> Option<CollisionBody> {
        self.collider().map(|collider| CollisionBody {
            collider,
            layer: self.layer(),
            mask: self.mask(),
        })
    }

    /// Recompute the collider from a global transform outside an update pass
    ///
    /// Needed right after spawning or teleporting a node, so the collider is
    /// valid for queries before the next update hook runs.
    pub fn sync_collider(&mut self, global: &Matrix3) {
        match self {
            Self::Plain => {}
            Self::Sprite(sprite) => sprite.sync_collider(global),
            Self::Projectile(projectile) => projectile.sync_collider(global),
            Self::Target(target) => target.sync_collider(global),
            Self::Obstacle(obstacle) => obstacle.sync_collider(global),
            Self::Wall(wall) => wall.sync_collider(global),
        }
    }

    /// Projectile payload
    pub fn as_projectile(&self) -> Option<&Projectile> {
        match self {
            Self::Projectile(projectile) => Some(projectile),
            _ => None,
        }
    }

    /// Projectile payload
    pub fn as_projectile_mut(&mut self) -> Option<&mut Projectile> {
        match self {
            Self::Projectile(projectile) => Some(projectile),
            _ => None,
        }
    }

    /// Target payload
    pub fn as_target_mut(&mut self) -> Option<&mut Target> {
        match self {
            Self::Target(target) => Some(target),
            _ => None,
        }
    }

    /// Obstacle payload
    pub fn as_obstacle_mut(&mut self) -> Option<&mut Obstacle> {
        match self {
            Self::Obstacle(obstacle) => Some(obstacle),
            _ => None,
        }
    }
}

impl NodeHooks for Entity {
    fn on_update(&mut self, transform: &mut NodeTransform<'_>, delta_time: f32) {
        match self {
            Self::Plain => {}
            Self::Sprite(sprite) => sprite.on_update(transform, delta_time),
            Self::Projectile(projectile) => projectile.on_update(transform, delta_time),
            Self::Target(target) => target.on_update(transform, delta_time),
            Self::Obstacle(obstacle) => obstacle.on_update(transform, delta_time),
            Self::Wall(wall) => wall.on_update(transform, delta_time),
        }
    }

    fn on_draw(&self, global: &Matrix3, draw: &mut DebugDrawSystem) {
        match self {
            Self::Plain => {}
            Self::Sprite(sprite) => sprite.on_draw(global, draw),
            Self::Projectile(projectile) => projectile.on_draw(global, draw),
            Self::Target(target) => target.on_draw(global, draw),
            Self::Obstacle(obstacle) => obstacle.on_draw(global, draw),
            Self::Wall(wall) => wall.on_draw(global, draw),
        }
    }

    fn wants_removal(&self) -> bool {
        match self {
            Self::Projectile(projectile) => projectile.wants_removal(),
            _ => false,
        }
    }
}

/// Corners of a node-local box centered on the origin, in world space
///
/// Same order as [`AABB::corners`], so the result is a closed outline.
pub(crate) fn oriented_corners(global: &Matrix3, half_extents: Vector2) -> Vec<Vector2> {
    local_box(half_extents)
        .corners()
        .iter()
        .map(|corner| global.transform_point(corner.truncate()))
        .collect()
}

/// World-space box around a node-local box centered on the origin
pub(crate) fn world_box(global: &Matrix3, half_extents: Vector2) -> AABB {
    local_box(half_extents).transformed(global)
}

fn local_box(half_extents: Vector2) -> AABB {
    AABB::from_center_extents(Vector3::zero(), half_extents.extend(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneGraph;

    #[test]
    fn test_plain_nodes_do_not_collide() {
        assert!(Entity::Plain.collider().is_none());
        assert!(Entity::Plain.collision_body().is_none());
    }

    #[test]
    fn test_layers_and_masks_pair_up() {
        let projectile = Entity::Projectile(Projectile::new(300.0, 1.5, 6.0));
        let target = Entity::Target(Target::new(15.0));
        let wall = Entity::Wall(Wall::new(Vector2::new(10.0, 10.0)));
        for other in [&target, &wall] {
            assert!(CollisionLayers::should_collide(
                projectile.layer(),
                projectile.mask(),
                other.layer(),
                other.mask()
            ));
        }
        assert!(!CollisionLayers::should_collide(target.layer(), target.mask(), wall.layer(), wall.mask()));
    }

    #[test]
    fn test_colliders_follow_parent_transform() {
        let mut graph = SceneGraph::new();
        let pivot = graph.create_node(Entity::Plain);
        let target = graph.create_child(pivot, Entity::Target(Target::new(15.0))).unwrap();
        graph.set_position(target, Vector2::new(5.0, 0.0)).unwrap();
        graph.set_position(pivot, Vector2::new(100.0, 50.0)).unwrap();
        graph.update(1.0 / 60.0);

        let collider = graph.payload(target).and_then(Entity::collider).unwrap();
        assert_eq!(collider.center(), Vector3::new(105.0, 50.0, 0.0));
    }

    #[test]
    fn test_world_box_of_unrotated_node() {
        let global = Matrix3::from_translation(10.0, 20.0);
        let aabb = world_box(&global, Vector2::new(2.0, 3.0));
        assert_eq!(aabb.min(), Vector3::new(8.0, 17.0, 0.0));
        assert_eq!(aabb.max(), Vector3::new(12.0, 23.0, 0.0));
        assert_eq!(oriented_corners(&global, Vector2::new(2.0, 3.0))[0], Vector2::new(8.0, 17.0));
    }
}
