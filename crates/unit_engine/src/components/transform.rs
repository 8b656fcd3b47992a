//! Transform component
//!
//! Pure data component representing spatial state in world space, Y-up
//! right-handed, local forward along -Z. Sibling components (camera,
//! listener, render object) pull from it every frame; it never touches a
//! native engine itself.

use crate::core::config::ConfigView;
use crate::engines::Engines;
use crate::error::EngineError;
use crate::foundation::math::{degrees_to_radians, Quat, Vec3};
use crate::gameobject::{Component, ComponentId};
use std::any::Any;

/// World-space position, rotation and scale of a GameObject
///
/// Config fields (all optional): `position` `[x, y, z]` (origin),
/// `rotation` `[x, y, z]` Euler angles in degrees (identity), `scale`
/// `[x, y, z]` (ones).
#[derive(Debug, Clone, PartialEq)]
pub struct TransformComponent {
    /// World space position
    pub position: Vec3,
    /// World space rotation
    pub rotation: Quat,
    /// World space scale factors
    pub scale: Vec3,
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl TransformComponent {
    /// Create a transform at a position with identity rotation and scale
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Move by an offset
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Apply an additional rotation from Euler angles in degrees
    pub fn rotate_euler_degrees(&mut self, x: f32, y: f32, z: f32) {
        let rotation = Quat::from_euler_angles(
            degrees_to_radians(x),
            degrees_to_radians(y),
            degrees_to_radians(z),
        );
        self.rotation = rotation * self.rotation;
    }

    /// Unit forward vector (-Z rotated into world space)
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::new(0.0, 0.0, -1.0)
    }

    /// Unit up vector (+Y rotated into world space)
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::new(0.0, 1.0, 0.0)
    }
}

impl Component for TransformComponent {
    fn id(&self) -> ComponentId {
        ComponentId::Transform
    }

    fn awake(&mut self, config: &ConfigView, _engines: &mut Engines) -> Result<(), EngineError> {
        self.position = config.vec3_or("position", Vec3::zeros())?;
        let euler = config.vec3_or("rotation", Vec3::zeros())?;
        self.rotation = Quat::from_euler_angles(
            degrees_to_radians(euler.x),
            degrees_to_radians(euler.y),
            degrees_to_radians(euler.z),
        );
        self.scale = config.vec3_or("scale", Vec3::new(1.0, 1.0, 1.0))?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
