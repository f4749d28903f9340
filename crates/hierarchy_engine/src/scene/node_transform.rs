//! Transform access handed to update hooks

use crate::foundation::math::{Matrix3, Vector2};

/// Mutable view of one node's transform during an update hook
///
/// Every mutation recomputes this node's global transform at once; the
/// graph propagates the change to the node's descendants when the hook
/// returns.
pub struct NodeTransform<'a> {
    parent_global: Matrix3,
    local: &'a mut Matrix3,
    global: &'a mut Matrix3,
    moved: bool,
}

impl<'a> NodeTransform<'a> {
    pub(crate) fn new(parent_global: Matrix3, local: &'a mut Matrix3, global: &'a mut Matrix3) -> Self {
        Self {
            parent_global,
            local,
            global,
            moved: false,
        }
    }

    /// True if the hook changed the local transform
    pub(crate) fn moved(&self) -> bool {
        self.moved
    }

    fn refresh(&mut self) {
        *self.global = self.parent_global * *self.local;
        self.moved = true;
    }

    /// Local transform relative to the parent
    pub fn local(&self) -> &Matrix3 {
        &*self.local
    }

    /// Global transform
    pub fn global(&self) -> &Matrix3 {
        &*self.global
    }

    /// Global position
    pub fn global_position(&self) -> Vector2 {
        self.global.translation()
    }

    /// Global rotation in radians
    pub fn global_rotation(&self) -> f32 {
        self.global.rotation_z()
    }

    /// Replace the whole local transform
    pub fn set_local(&mut self, local: Matrix3) {
        *self.local = local;
        self.refresh();
    }

    /// Replace the local position, keeping rotation and scale
    pub fn set_position(&mut self, position: Vector2) {
        self.local.set_translation(position.x, position.y);
        self.refresh();
    }

    /// Replace the local rotation, keeping scale and position
    pub fn set_rotation(&mut self, radians: f32) {
        replace_rotation(self.local, radians);
        self.refresh();
    }

    /// Replace the local scale, keeping rotation and position
    pub fn set_scale(&mut self, scale: Vector2) {
        replace_scale(self.local, scale);
        self.refresh();
    }

    /// Move along the node's own axes
    pub fn translate(&mut self, offset: Vector2) {
        self.local.translate(offset.x, offset.y);
        self.refresh();
    }

    /// Rotate by an additional angle
    pub fn rotate(&mut self, radians: f32) {
        self.local.rotate_z(radians);
        self.refresh();
    }

    /// Scale by additional factors
    pub fn scale(&mut self, factors: Vector2) {
        self.local.scale(factors.x, factors.y, 1.0);
        self.refresh();
    }
}

/// Rebuild `local` as translation * rotation * scale with a new rotation
///
/// Scale is read back as axis lengths, so a mirrored transform loses its
/// reflection.
pub(crate) fn replace_rotation(local: &mut Matrix3, radians: f32) {
    let position = local.translation();
    let scale = local.scale_2d();
    *local = compose(position, radians, scale);
}

/// Rebuild `local` as translation * rotation * scale with a new scale
pub(crate) fn replace_scale(local: &mut Matrix3, scale: Vector2) {
    let position = local.translation();
    let rotation = local.rotation_z();
    *local = compose(position, rotation, scale);
}

fn compose(position: Vector2, rotation: f32, scale: Vector2) -> Matrix3 {
    let mut m = Matrix3::from_translation(position.x, position.y);
    m.rotate_z(rotation);
    m.scale(scale.x, scale.y, 1.0);
    m
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::HALF_PI;
    use approx::assert_relative_eq;

    #[test]
    fn test_mutations_refresh_global() {
        let parent = Matrix3::from_translation(10.0, 0.0);
        let mut local = Matrix3::identity();
        let mut global = parent;
        let mut transform = NodeTransform::new(parent, &mut local, &mut global);
        assert!(!transform.moved());

        transform.set_position(Vector2::new(5.0, 0.0));
        assert!(transform.moved());
        assert_relative_eq!(transform.global_position(), Vector2::new(15.0, 0.0));
    }

    #[test]
    fn test_translate_follows_rotation() {
        let mut local = Matrix3::identity();
        let mut global = Matrix3::identity();
        let mut transform = NodeTransform::new(Matrix3::identity(), &mut local, &mut global);
        transform.set_rotation(HALF_PI);
        transform.translate(Vector2::new(2.0, 0.0));
        assert_relative_eq!(transform.global_position(), Vector2::new(0.0, 2.0), epsilon = 1e-5);
    }

    #[test]
    fn test_replace_rotation_keeps_scale_and_position() {
        let mut local = Matrix3::from_translation(3.0, 4.0);
        local.scale(2.0, 5.0, 1.0);
        replace_rotation(&mut local, 0.75);
        assert_relative_eq!(local.translation(), Vector2::new(3.0, 4.0));
        assert_relative_eq!(local.scale_2d(), Vector2::new(2.0, 5.0), epsilon = 1e-5);
        assert_relative_eq!(local.rotation_z(), 0.75, epsilon = 1e-5);
    }

    #[test]
    fn test_replace_scale_keeps_rotation_and_position() {
        let mut local = Matrix3::from_translation(-1.0, 2.0);
        local.rotate_z(-0.5);
        replace_scale(&mut local, Vector2::new(3.0, 3.0));
        assert_relative_eq!(local.translation(), Vector2::new(-1.0, 2.0));
        assert_relative_eq!(local.rotation_z(), -0.5, epsilon = 1e-5);
        assert_relative_eq!(local.scale_2d(), Vector2::new(3.0, 3.0), epsilon = 1e-5);
    }
}
