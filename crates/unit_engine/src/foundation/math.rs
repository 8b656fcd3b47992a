//! Math types shared across the engine
//!
//! Thin aliases over nalgebra so the rest of the crate reads in engine
//! vocabulary. All coordinates are Y-up right-handed; the local forward
//! axis is -Z.

/// 3D vector type
pub type Vec3 = nalgebra::Vector3<f32>;

/// Unit quaternion rotation type
pub type Quat = nalgebra::UnitQuaternion<f32>;

/// Convert degrees to radians
pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees.to_radians()
}

/// Convert radians to degrees
pub fn radians_to_degrees(radians: f32) -> f32 {
    radians.to_degrees()
}

/// Position and orientation pair, as reported by the physics backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// World space position
    pub position: Vec3,
    /// World space rotation
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
        }
    }
}

/// Build a rotation that aligns the local -Z axis with `direction`
///
/// Returns identity for a zero-length direction.
pub fn face_direction(direction: Vec3) -> Quat {
    if direction.norm_squared() < f32::EPSILON {
        return Quat::identity();
    }
    let forward = Vec3::new(0.0, 0.0, -1.0);
    Quat::rotation_between(&forward, &direction.normalize())
        .unwrap_or_else(|| Quat::from_axis_angle(&Vec3::y_axis(), std::f32::consts::PI))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn face_direction_points_forward_axis_at_target() {
        let dir = Vec3::new(1.0, 0.0, -1.0);
        let rot = face_direction(dir);
        let forward = rot * Vec3::new(0.0, 0.0, -1.0);
        assert_relative_eq!(forward, dir.normalize(), epsilon = 1e-5);
    }

    #[test]
    fn face_direction_handles_opposite_direction() {
        let rot = face_direction(Vec3::new(0.0, 0.0, 1.0));
        let forward = rot * Vec3::new(0.0, 0.0, -1.0);
        assert_relative_eq!(forward, Vec3::new(0.0, 0.0, 1.0), epsilon = 1e-5);
    }

    #[test]
    fn face_direction_zero_is_identity() {
        assert_eq!(face_direction(Vec3::zeros()), Quat::identity());
    }
}
