//! Rigid body component
//!
//! Wraps one native physics body. Configuration picks the shape and
//! simulation role at awake; after that all mutators forward to the physics
//! backend and report native rejections to the caller. The body's simulated
//! pose is pulled back in `late_update` so siblings can read it after the
//! physics step.

use crate::components::TransformComponent;
use crate::core::config::ConfigView;
use crate::engines::Engines;
use crate::error::EngineError;
use crate::foundation::math::{Pose, Quat, Vec3};
use crate::gameobject::{Component, ComponentId, UpdateContext};
use crate::physics::{
    AxisLock, BodyDesc, BodyHandle, BodyKind, MaterialProps, PhysicsBackend, ShapeDesc,
};
use std::any::Any;

/// Physics body wrapper
///
/// Config fields: `shape` ("sphere", "box" or "capsule", default "box"),
/// shape dimensions (`radius`, `width`/`height`/`depth`), `static` (false),
/// `kinematic` (false), `mass` (1000), `position` (origin or the Transform
/// sibling's position once started), `linear_damping`/`angular_damping` (0),
/// `static_friction`/`dynamic_friction`/`restitution` (1).
#[derive(Debug)]
pub struct RigidBodyComponent {
    body: Option<BodyHandle>,
    kind: BodyKind,
    pose: Pose,
    active: bool,
}

impl Default for RigidBodyComponent {
    fn default() -> Self {
        Self {
            body: None,
            kind: BodyKind::Dynamic,
            pose: Pose::default(),
            active: false,
        }
    }
}

impl RigidBodyComponent {
    /// Handle of the wrapped body, if created
    pub fn handle(&self) -> Option<BodyHandle> {
        self.body
    }

    /// Simulation role chosen at awake
    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    /// Pose captured after the most recent physics step
    pub fn pose(&self) -> Pose {
        self.pose
    }

    fn require_handle(&self) -> Result<BodyHandle, EngineError> {
        self.body
            .ok_or_else(|| EngineError::native("rigid body was not created"))
    }

    /// Apply a continuous force; rejected for non-dynamic bodies
    pub fn add_force(&self, engines: &mut Engines, force: Vec3) -> Result<(), EngineError> {
        engines.physics.add_force(self.require_handle()?, force)
    }

    /// Apply an instantaneous impulse; rejected for non-dynamic bodies
    pub fn add_impulse(&self, engines: &mut Engines, impulse: Vec3) -> Result<(), EngineError> {
        engines.physics.add_impulse(self.require_handle()?, impulse)
    }

    /// Apply a torque; rejected for non-dynamic bodies
    pub fn add_torque(&self, engines: &mut Engines, torque: Vec3) -> Result<(), EngineError> {
        engines.physics.add_torque(self.require_handle()?, torque)
    }

    /// Drive a kinematic body toward a target position
    pub fn move_to(&self, engines: &mut Engines, target: Vec3) -> Result<(), EngineError> {
        engines.physics.move_kinematic(self.require_handle()?, target)
    }

    /// Teleport the body
    pub fn set_position(&mut self, engines: &mut Engines, position: Vec3) -> Result<(), EngineError> {
        engines.physics.set_position(self.require_handle()?, position)?;
        self.pose.position = position;
        Ok(())
    }

    /// Reorient the body
    pub fn set_rotation(&mut self, engines: &mut Engines, rotation: Quat) -> Result<(), EngineError> {
        engines.physics.set_rotation(self.require_handle()?, rotation)?;
        self.pose.rotation = rotation;
        Ok(())
    }

    /// Rescale the collision shape
    pub fn set_scale(&self, engines: &mut Engines, scale: Vec3) -> Result<(), EngineError> {
        engines.physics.set_scale(self.require_handle()?, scale)
    }

    /// Set linear velocity; rejected for non-dynamic bodies
    pub fn set_linear_velocity(
        &self,
        engines: &mut Engines,
        velocity: Vec3,
    ) -> Result<(), EngineError> {
        engines
            .physics
            .set_linear_velocity(self.require_handle()?, velocity)
    }

    /// Set angular velocity; rejected for non-dynamic bodies
    pub fn set_angular_velocity(
        &self,
        engines: &mut Engines,
        velocity: Vec3,
    ) -> Result<(), EngineError> {
        engines
            .physics
            .set_angular_velocity(self.require_handle()?, velocity)
    }

    /// Current linear velocity
    pub fn linear_velocity(&self, engines: &Engines) -> Result<Vec3, EngineError> {
        engines.physics.linear_velocity(self.require_handle()?)
    }

    /// Current angular velocity
    pub fn angular_velocity(&self, engines: &Engines) -> Result<Vec3, EngineError> {
        engines.physics.angular_velocity(self.require_handle()?)
    }

    /// Current body mass
    pub fn mass(&self, engines: &Engines) -> Result<f32, EngineError> {
        engines.physics.mass(self.require_handle()?)
    }

    /// Set body mass; rejected for static bodies
    pub fn set_mass(&self, engines: &mut Engines, mass: f32) -> Result<(), EngineError> {
        engines.physics.set_mass(self.require_handle()?, mass)
    }

    /// Set static friction; rejected for static bodies
    pub fn set_static_friction(
        &self,
        engines: &mut Engines,
        friction: f32,
    ) -> Result<(), EngineError> {
        engines
            .physics
            .set_static_friction(self.require_handle()?, friction)
    }

    /// Set dynamic friction; rejected for static bodies
    pub fn set_dynamic_friction(
        &self,
        engines: &mut Engines,
        friction: f32,
    ) -> Result<(), EngineError> {
        engines
            .physics
            .set_dynamic_friction(self.require_handle()?, friction)
    }

    /// Set restitution; rejected for static bodies
    pub fn set_restitution(
        &self,
        engines: &mut Engines,
        restitution: f32,
    ) -> Result<(), EngineError> {
        engines
            .physics
            .set_restitution(self.require_handle()?, restitution)
    }

    /// Lock or free linear motion along X
    pub fn constrain_x(&self, engines: &mut Engines, locked: bool) -> Result<(), EngineError> {
        self.set_lock(engines, AxisLock::LINEAR_X, locked)
    }

    /// Lock or free linear motion along Y
    pub fn constrain_y(&self, engines: &mut Engines, locked: bool) -> Result<(), EngineError> {
        self.set_lock(engines, AxisLock::LINEAR_Y, locked)
    }

    /// Lock or free linear motion along Z
    pub fn constrain_z(&self, engines: &mut Engines, locked: bool) -> Result<(), EngineError> {
        self.set_lock(engines, AxisLock::LINEAR_Z, locked)
    }

    /// Lock or free rotation around an axis
    pub fn constrain_rotation(
        &self,
        engines: &mut Engines,
        lock: AxisLock,
        locked: bool,
    ) -> Result<(), EngineError> {
        self.set_lock(engines, lock, locked)
    }

    fn set_lock(
        &self,
        engines: &mut Engines,
        lock: AxisLock,
        locked: bool,
    ) -> Result<(), EngineError> {
        let handle = self.require_handle()?;
        let mut locks = engines.physics.axis_locks(handle)?;
        locks.set(lock, locked);
        engines.physics.set_axis_locks(handle, locks)
    }

    /// Enable or disable gravity; rejected for non-dynamic bodies
    pub fn set_gravity_enabled(
        &self,
        engines: &mut Engines,
        enabled: bool,
    ) -> Result<(), EngineError> {
        engines
            .physics
            .set_gravity_enabled(self.require_handle()?, enabled)
    }
}

fn shape_from_config(config: &ConfigView) -> Result<ShapeDesc, EngineError> {
    match config.str_or("shape", "box")? {
        "sphere" => Ok(ShapeDesc::Sphere {
            radius: config.f32_or("radius", 0.5)?,
        }),
        "box" => Ok(ShapeDesc::Box {
            width: config.f32_or("width", 1.0)?,
            height: config.f32_or("height", 1.0)?,
            depth: config.f32_or("depth", 1.0)?,
        }),
        "capsule" => Ok(ShapeDesc::Capsule {
            radius: config.f32_or("radius", 0.5)?,
            height: config.f32_or("height", 1.0)?,
        }),
        _ => Err(EngineError::InvalidField {
            field: "shape".to_string(),
            expected: "one of \"sphere\", \"box\", \"capsule\"",
        }),
    }
}

impl Component for RigidBodyComponent {
    fn id(&self) -> ComponentId {
        ComponentId::RigidBody
    }

    fn awake(&mut self, config: &ConfigView, engines: &mut Engines) -> Result<(), EngineError> {
        let is_static = config.bool_or("static", false)?;
        let is_kinematic = config.bool_or("kinematic", false)?;
        if is_static && is_kinematic {
            return Err(EngineError::InvalidField {
                field: "kinematic".to_string(),
                expected: "at most one of `static` and `kinematic` to be set",
            });
        }
        self.kind = if is_static {
            BodyKind::Static
        } else if is_kinematic {
            BodyKind::Kinematic
        } else {
            BodyKind::Dynamic
        };

        let desc = BodyDesc {
            name: config.str_or("name", "")?.to_string(),
            shape: shape_from_config(config)?,
            kind: self.kind,
            position: config.vec3_or("position", Vec3::zeros())?,
            mass: config.f32_or("mass", 1000.0)?,
            linear_damping: config.f32_or("linear_damping", 0.0)?,
            angular_damping: config.f32_or("angular_damping", 0.0)?,
            material: MaterialProps {
                static_friction: config.f32_or("static_friction", 1.0)?,
                dynamic_friction: config.f32_or("dynamic_friction", 1.0)?,
                restitution: config.f32_or("restitution", 1.0)?,
            },
        };
        self.pose.position = desc.position;
        self.body = Some(engines.physics.create_body(&desc)?);
        self.active = true;
        Ok(())
    }

    fn start(&mut self, ctx: &mut UpdateContext<'_>) -> Result<(), EngineError> {
        // Snap the body to the Transform sibling's placement if present.
        let start_pose = ctx
            .siblings
            .get_as::<TransformComponent>(ComponentId::Transform)
            .map(|tr| (tr.position, tr.rotation, tr.scale));
        if let Some((position, rotation, scale)) = start_pose {
            let handle = self.require_handle()?;
            ctx.engines.physics.set_position(handle, position)?;
            ctx.engines.physics.set_rotation(handle, rotation)?;
            ctx.engines.physics.set_scale(handle, scale)?;
            self.pose = Pose { position, rotation };
        }
        Ok(())
    }

    fn late_update(&mut self, ctx: &mut UpdateContext<'_>) {
        // Pull the post-step pose so siblings read settled state next frame.
        let Some(handle) = self.body else { return };
        match ctx.engines.physics.pose(handle) {
            Ok(pose) => self.pose = pose,
            Err(e) => log::warn!("`{}`: rigid body pose query failed: {e}", ctx.owner),
        }
    }

    fn on_enable(&mut self, engines: &mut Engines) {
        let Some(handle) = self.body else { return };
        if !self.active {
            match engines.physics.set_body_active(handle, true) {
                Ok(()) => self.active = true,
                Err(e) => log::warn!("rigid body activation failed: {e}"),
            }
        }
    }

    fn on_disable(&mut self, engines: &mut Engines) {
        let Some(handle) = self.body else { return };
        if self.active {
            match engines.physics.set_body_active(handle, false) {
                Ok(()) => self.active = false,
                Err(e) => log::warn!("rigid body deactivation failed: {e}"),
            }
        }
    }

    fn teardown(&mut self, engines: &mut Engines) {
        if let Some(handle) = self.body.take() {
            self.active = false;
            if let Err(e) = engines.physics.destroy_body(handle) {
                log::warn!("rigid body teardown failed: {e}");
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
