//! Headless physics backend
//!
//! Bookkeeping implementation of [`PhysicsBackend`] used by tests and
//! SDK-free hosts. Bodies are stored in a slotmap; parameter rules mirror
//! the wrapped SDK's (forces and velocity writes are rejected on
//! non-dynamic bodies and leave state unchanged). No simulation stepping
//! happens here.

use super::{AxisLock, BodyDesc, BodyHandle, BodyKind, MaterialProps, PhysicsBackend};
use crate::error::EngineError;
use crate::foundation::math::{Pose, Quat, Vec3};
use slotmap::SlotMap;

/// Bookkept state of one rigid body
#[derive(Debug, Clone)]
pub struct BodyState {
    /// Creation parameters, with setters applied on top
    pub desc: BodyDesc,
    /// Current pose
    pub pose: Pose,
    /// Shape scale applied after creation
    pub scale: Vec3,
    /// Current linear velocity
    pub linear_velocity: Vec3,
    /// Current angular velocity
    pub angular_velocity: Vec3,
    /// Sum of forces applied this lifetime
    pub accumulated_force: Vec3,
    /// Sum of torques applied this lifetime
    pub accumulated_torque: Vec3,
    /// Axis-lock constraint flags
    pub locks: AxisLock,
    /// Whether gravity acts on the body
    pub gravity_enabled: bool,
    /// Whether the body is part of the simulation
    pub active: bool,
}

/// In-memory [`PhysicsBackend`] with no native dependency
#[derive(Default)]
pub struct HeadlessPhysics {
    bodies: SlotMap<BodyHandle, BodyState>,
}

impl HeadlessPhysics {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Inspect a body's bookkept state (test hook)
    pub fn body(&self, handle: BodyHandle) -> Option<&BodyState> {
        self.bodies.get(handle)
    }

    fn get(&self, handle: BodyHandle) -> Result<&BodyState, EngineError> {
        self.bodies
            .get(handle)
            .ok_or_else(|| EngineError::native("unknown body handle"))
    }

    fn get_mut(&mut self, handle: BodyHandle) -> Result<&mut BodyState, EngineError> {
        self.bodies
            .get_mut(handle)
            .ok_or_else(|| EngineError::native("unknown body handle"))
    }

    fn get_dynamic(&mut self, handle: BodyHandle) -> Result<&mut BodyState, EngineError> {
        let body = self.get_mut(handle)?;
        match body.desc.kind {
            BodyKind::Dynamic => Ok(body),
            BodyKind::Static => Err(EngineError::native(format!(
                "operation requires a dynamic body, `{}` is static",
                body.desc.name
            ))),
            BodyKind::Kinematic => Err(EngineError::native(format!(
                "operation requires a dynamic body, `{}` is kinematic",
                body.desc.name
            ))),
        }
    }

    fn get_simulated(&mut self, handle: BodyHandle) -> Result<&mut BodyState, EngineError> {
        let body = self.get_mut(handle)?;
        if body.desc.kind.is_simulated() {
            Ok(body)
        } else {
            Err(EngineError::native(format!(
                "operation requires a simulated body, `{}` is static",
                body.desc.name
            )))
        }
    }
}

impl PhysicsBackend for HeadlessPhysics {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn create_body(&mut self, desc: &BodyDesc) -> Result<BodyHandle, EngineError> {
        if desc.mass <= 0.0 && desc.kind != BodyKind::Static {
            return Err(EngineError::native(format!(
                "body `{}` must have positive mass",
                desc.name
            )));
        }
        let handle = self.bodies.insert(BodyState {
            pose: Pose {
                position: desc.position,
                rotation: Quat::identity(),
            },
            scale: Vec3::new(1.0, 1.0, 1.0),
            linear_velocity: Vec3::zeros(),
            angular_velocity: Vec3::zeros(),
            accumulated_force: Vec3::zeros(),
            accumulated_torque: Vec3::zeros(),
            locks: AxisLock::empty(),
            gravity_enabled: desc.kind == BodyKind::Dynamic,
            active: true,
            desc: desc.clone(),
        });
        log::debug!("created {:?} body `{}`", desc.kind, desc.name);
        Ok(handle)
    }

    fn destroy_body(&mut self, body: BodyHandle) -> Result<(), EngineError> {
        self.bodies
            .remove(body)
            .map(|b| log::debug!("destroyed body `{}`", b.desc.name))
            .ok_or_else(|| EngineError::native("unknown body handle"))
    }

    fn set_body_active(&mut self, body: BodyHandle, active: bool) -> Result<(), EngineError> {
        self.get_mut(body)?.active = active;
        Ok(())
    }

    fn pose(&self, body: BodyHandle) -> Result<Pose, EngineError> {
        Ok(self.get(body)?.pose)
    }

    fn set_position(&mut self, body: BodyHandle, position: Vec3) -> Result<(), EngineError> {
        self.get_mut(body)?.pose.position = position;
        Ok(())
    }

    fn set_rotation(&mut self, body: BodyHandle, rotation: Quat) -> Result<(), EngineError> {
        self.get_mut(body)?.pose.rotation = rotation;
        Ok(())
    }

    fn set_scale(&mut self, body: BodyHandle, scale: Vec3) -> Result<(), EngineError> {
        if scale.x <= 0.0 || scale.y <= 0.0 || scale.z <= 0.0 {
            return Err(EngineError::native("scale factors must be positive"));
        }
        self.get_mut(body)?.scale = scale;
        Ok(())
    }

    fn add_force(&mut self, body: BodyHandle, force: Vec3) -> Result<(), EngineError> {
        let body = self.get_dynamic(body)?;
        body.accumulated_force += force;
        Ok(())
    }

    fn add_impulse(&mut self, body: BodyHandle, impulse: Vec3) -> Result<(), EngineError> {
        let body = self.get_dynamic(body)?;
        let mass = body.desc.mass;
        body.linear_velocity += impulse / mass;
        Ok(())
    }

    fn add_torque(&mut self, body: BodyHandle, torque: Vec3) -> Result<(), EngineError> {
        let body = self.get_dynamic(body)?;
        body.accumulated_torque += torque;
        Ok(())
    }

    fn move_kinematic(&mut self, body: BodyHandle, target: Vec3) -> Result<(), EngineError> {
        let body = self.get_mut(body)?;
        if body.desc.kind != BodyKind::Kinematic {
            return Err(EngineError::native(format!(
                "move target requires a kinematic body, `{}` is {:?}",
                body.desc.name, body.desc.kind
            )));
        }
        body.pose.position = target;
        Ok(())
    }

    fn set_linear_velocity(
        &mut self,
        body: BodyHandle,
        velocity: Vec3,
    ) -> Result<(), EngineError> {
        self.get_dynamic(body)?.linear_velocity = velocity;
        Ok(())
    }

    fn set_angular_velocity(
        &mut self,
        body: BodyHandle,
        velocity: Vec3,
    ) -> Result<(), EngineError> {
        self.get_dynamic(body)?.angular_velocity = velocity;
        Ok(())
    }

    fn linear_velocity(&self, body: BodyHandle) -> Result<Vec3, EngineError> {
        Ok(self.get(body)?.linear_velocity)
    }

    fn angular_velocity(&self, body: BodyHandle) -> Result<Vec3, EngineError> {
        Ok(self.get(body)?.angular_velocity)
    }

    fn set_mass(&mut self, body: BodyHandle, mass: f32) -> Result<(), EngineError> {
        if mass <= 0.0 {
            return Err(EngineError::native("mass must be positive"));
        }
        self.get_simulated(body)?.desc.mass = mass;
        Ok(())
    }

    fn mass(&self, body: BodyHandle) -> Result<f32, EngineError> {
        Ok(self.get(body)?.desc.mass)
    }

    fn set_static_friction(
        &mut self,
        body: BodyHandle,
        friction: f32,
    ) -> Result<(), EngineError> {
        if friction < 0.0 {
            return Err(EngineError::native("friction must be non-negative"));
        }
        self.get_simulated(body)?.desc.material.static_friction = friction;
        Ok(())
    }

    fn set_dynamic_friction(
        &mut self,
        body: BodyHandle,
        friction: f32,
    ) -> Result<(), EngineError> {
        if friction < 0.0 {
            return Err(EngineError::native("friction must be non-negative"));
        }
        self.get_simulated(body)?.desc.material.dynamic_friction = friction;
        Ok(())
    }

    fn set_restitution(&mut self, body: BodyHandle, restitution: f32) -> Result<(), EngineError> {
        if !(0.0..=1.0).contains(&restitution) {
            return Err(EngineError::native("restitution must be between 0 and 1"));
        }
        self.get_simulated(body)?.desc.material.restitution = restitution;
        Ok(())
    }

    fn set_axis_locks(&mut self, body: BodyHandle, locks: AxisLock) -> Result<(), EngineError> {
        self.get_simulated(body)?.locks = locks;
        Ok(())
    }

    fn axis_locks(&self, body: BodyHandle) -> Result<AxisLock, EngineError> {
        Ok(self.get(body)?.locks)
    }

    fn set_gravity_enabled(&mut self, body: BodyHandle, enabled: bool) -> Result<(), EngineError> {
        self.get_dynamic(body)?.gravity_enabled = enabled;
        Ok(())
    }

    fn materials(&self, body: BodyHandle) -> Result<Vec<MaterialProps>, EngineError> {
        Ok(vec![self.get(body)?.desc.material])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::ShapeDesc;

    fn sphere(kind: BodyKind) -> BodyDesc {
        BodyDesc {
            name: "test_body".to_string(),
            shape: ShapeDesc::Sphere { radius: 1.0 },
            kind,
            mass: 10.0,
            ..BodyDesc::default()
        }
    }

    #[test]
    fn force_on_static_body_is_rejected_and_state_unchanged() {
        let mut physics = HeadlessPhysics::new();
        let body = physics.create_body(&sphere(BodyKind::Static)).unwrap();

        let before = physics.body(body).unwrap().clone();
        assert!(physics.add_force(body, Vec3::new(0.0, 100.0, 0.0)).is_err());

        let after = physics.body(body).unwrap();
        assert_eq!(after.accumulated_force, before.accumulated_force);
        assert_eq!(after.linear_velocity, before.linear_velocity);
        assert_eq!(after.pose.position, before.pose.position);
    }

    #[test]
    fn impulse_on_dynamic_body_changes_velocity_by_mass_ratio() {
        let mut physics = HeadlessPhysics::new();
        let body = physics.create_body(&sphere(BodyKind::Dynamic)).unwrap();

        physics.add_impulse(body, Vec3::new(20.0, 0.0, 0.0)).unwrap();
        assert_eq!(
            physics.linear_velocity(body).unwrap(),
            Vec3::new(2.0, 0.0, 0.0)
        );
    }

    #[test]
    fn move_kinematic_only_applies_to_kinematic_bodies() {
        let mut physics = HeadlessPhysics::new();
        let kinematic = physics.create_body(&sphere(BodyKind::Kinematic)).unwrap();
        let dynamic = physics.create_body(&sphere(BodyKind::Dynamic)).unwrap();

        let target = Vec3::new(1.0, 2.0, 3.0);
        physics.move_kinematic(kinematic, target).unwrap();
        assert_eq!(physics.pose(kinematic).unwrap().position, target);

        assert!(physics.move_kinematic(dynamic, target).is_err());
        assert_eq!(physics.pose(dynamic).unwrap().position, Vec3::zeros());
    }

    #[test]
    fn kinematic_bodies_accept_material_setters_but_not_forces() {
        let mut physics = HeadlessPhysics::new();
        let body = physics.create_body(&sphere(BodyKind::Kinematic)).unwrap();

        physics.set_static_friction(body, 0.5).unwrap();
        physics.set_mass(body, 5.0).unwrap();
        assert!(physics.add_force(body, Vec3::x()).is_err());
        assert!(physics.set_linear_velocity(body, Vec3::x()).is_err());
    }

    #[test]
    fn restitution_out_of_range_is_rejected() {
        let mut physics = HeadlessPhysics::new();
        let body = physics.create_body(&sphere(BodyKind::Dynamic)).unwrap();
        assert!(physics.set_restitution(body, 1.5).is_err());
        assert_eq!(
            physics.body(body).unwrap().desc.material.restitution,
            1.0
        );
    }

    #[test]
    fn axis_locks_round_trip() {
        let mut physics = HeadlessPhysics::new();
        let body = physics.create_body(&sphere(BodyKind::Dynamic)).unwrap();

        let locks = AxisLock::LINEAR_Y | AxisLock::ANGULAR_X | AxisLock::ANGULAR_Z;
        physics.set_axis_locks(body, locks).unwrap();
        assert_eq!(physics.axis_locks(body).unwrap(), locks);
    }

    #[test]
    fn destroyed_handle_is_rejected() {
        let mut physics = HeadlessPhysics::new();
        let body = physics.create_body(&sphere(BodyKind::Dynamic)).unwrap();
        physics.destroy_body(body).unwrap();
        assert!(physics.pose(body).is_err());
        assert!(physics.destroy_body(body).is_err());
    }

    #[test]
    fn material_list_reflects_setters() {
        let mut physics = HeadlessPhysics::new();
        let body = physics.create_body(&sphere(BodyKind::Dynamic)).unwrap();
        physics.set_restitution(body, 0.25).unwrap();

        let materials = physics.materials(body).unwrap();
        assert_eq!(materials.len(), 1);
        assert_eq!(materials[0].restitution, 0.25);
    }
}
