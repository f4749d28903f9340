//! Collision layer system for filtering collision detection
//!
//! Every body sits on one or more layers and carries a mask of the layers it
//! wants to hear about. A pair is tested only when each body's mask contains
//! the other's layer.

use bitflags::bitflags;

bitflags! {
    /// Collision layer definitions
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct CollisionLayers: u32 {
        /// The player's tank
        const TANK = 1 << 0;
        /// Projectiles in flight
        const PROJECTILE = 1 << 1;
        /// Respawning targets
        const TARGET = 1 << 2;
        /// Destructible obstacles
        const OBSTACLE = 1 << 3;
        /// Static walls
        const WALL = 1 << 4;
    }
}

impl CollisionLayers {
    /// Check if two bodies should collide based on their layers and masks
    ///
    /// A's layer must be in B's mask and B's layer must be in A's mask.
    pub fn should_collide(layer_a: Self, mask_a: Self, layer_b: Self, mask_b: Self) -> bool {
        layer_a.intersects(mask_b) && layer_b.intersects(mask_a)
    }
}
