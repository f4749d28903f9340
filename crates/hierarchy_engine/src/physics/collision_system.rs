//! Brute-force collision pair detection
//!
//! Bodies are registered under caller-chosen keys (scene node ids in the
//! game). [`PhysicsCollisionSystem::detect_collisions`] tests every
//! layer-compatible pair and reports each overlapping pair once, ordered by
//! key. At a handful of bodies per frame no broad phase is needed.

use std::collections::{BTreeMap, BTreeSet};

use crate::foundation::math::Vector3;
use crate::physics::collision::{Collider, Ray, RayHit};
use crate::physics::collision_layers::CollisionLayers;

/// Collision pair representing two bodies that are overlapping
///
/// Always stores the smaller key first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollisionPair<K> {
    /// Smaller key
    pub first: K,
    /// Larger key
    pub second: K,
}

impl<K: Ord> CollisionPair<K> {
    /// Create a new collision pair in key order
    pub fn new(a: K, b: K) -> Self {
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    /// The other key of the pair, if `key` is part of it
    pub fn other(&self, key: &K) -> Option<&K> {
        if &self.first == key {
            Some(&self.second)
        } else if &self.second == key {
            Some(&self.first)
        } else {
            None
        }
    }
}

/// A registered collider with its filtering data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionBody {
    /// World-space shape
    pub collider: Collider,
    /// Layers this body sits on
    pub layer: CollisionLayers,
    /// Layers this body collides with
    pub mask: CollisionLayers,
}

/// Collision detection over a set of keyed bodies
#[derive(Debug, Clone)]
pub struct PhysicsCollisionSystem<K: Ord + Copy> {
    bodies: BTreeMap<K, CollisionBody>,
    current_pairs: BTreeSet<CollisionPair<K>>,
    previous_pairs: BTreeSet<CollisionPair<K>>,
}

impl<K: Ord + Copy> Default for PhysicsCollisionSystem<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Copy> PhysicsCollisionSystem<K> {
    /// Create an empty system
    pub fn new() -> Self {
        Self {
            bodies: BTreeMap::new(),
            current_pairs: BTreeSet::new(),
            previous_pairs: BTreeSet::new(),
        }
    }

    /// Register a body, replacing any previous one under the same key
    pub fn register(&mut self, key: K, body: CollisionBody) {
        self.bodies.insert(key, body);
    }

    /// Unregister a body
    pub fn unregister(&mut self, key: K) -> Option<CollisionBody> {
        self.bodies.remove(&key)
    }

    /// Replace the shape of a registered body
    pub fn update_collider(&mut self, key: K, collider: Collider) -> bool {
        match self.bodies.get_mut(&key) {
            Some(body) => {
                body.collider = collider;
                true
            }
            None => false,
        }
    }

    /// Drop every body, keeping last frame's pairs for enter/exit reporting
    pub fn clear_bodies(&mut self) {
        self.bodies.clear();
    }

    /// Drop all bodies and pair history
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.current_pairs.clear();
        self.previous_pairs.clear();
    }

    /// Test every layer-compatible pair; returns the overlapping ones
    pub fn detect_collisions(&mut self) -> &BTreeSet<CollisionPair<K>> {
        std::mem::swap(&mut self.current_pairs, &mut self.previous_pairs);
        self.current_pairs.clear();

        let bodies: Vec<(&K, &CollisionBody)> = self.bodies.iter().collect();
        for (i, (key_a, a)) in bodies.iter().enumerate() {
            for (key_b, b) in &bodies[i + 1..] {
                if !CollisionLayers::should_collide(a.layer, a.mask, b.layer, b.mask) {
                    continue;
                }
                if a.collider.overlaps(&b.collider) {
                    self.current_pairs.insert(CollisionPair::new(**key_a, **key_b));
                }
            }
        }

        &self.current_pairs
    }

    /// Pairs that started overlapping in the last detection pass
    pub fn collisions_entered(&self) -> Vec<CollisionPair<K>> {
        self.current_pairs.difference(&self.previous_pairs).copied().collect()
    }

    /// Pairs that stopped overlapping in the last detection pass
    pub fn collisions_exited(&self) -> Vec<CollisionPair<K>> {
        self.previous_pairs.difference(&self.current_pairs).copied().collect()
    }

    /// Pairs found by the last detection pass
    pub fn current_collisions(&self) -> &BTreeSet<CollisionPair<K>> {
        &self.current_pairs
    }

    /// Nearest body hit by a ray whose layers intersect `mask`
    pub fn cast_ray(&self, ray: &Ray, mask: CollisionLayers) -> Option<(K, RayHit)> {
        self.bodies
            .iter()
            .filter(|(_, body)| body.layer.intersects(mask))
            .filter_map(|(key, body)| body.collider.intersect_ray(ray).map(|hit| (*key, hit)))
            .min_by(|(_, a), (_, b)| a.distance.total_cmp(&b.distance))
    }

    /// Bodies containing `point` whose layers intersect `mask`
    pub fn query_point(&self, point: Vector3, mask: CollisionLayers) -> Vec<K> {
        self.bodies
            .iter()
            .filter(|(_, body)| body.layer.intersects(mask) && body.collider.overlaps_point(point))
            .map(|(key, _)| *key)
            .collect()
    }

    /// Get a registered body
    pub fn body(&self, key: K) -> Option<&CollisionBody> {
        self.bodies.get(&key)
    }

    /// Check if a key is registered
    pub fn has_body(&self, key: K) -> bool {
        self.bodies.contains_key(&key)
    }

    /// Get the number of registered bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }
}
