//! Physics backend seam
//!
//! The component layer delegates all rigid-body work to a wrapped native
//! physics engine. [`PhysicsBackend`] is that seam: handle-based create and
//! destroy, parameter setters, force application, and axis-locking
//! constraints. The shipped [`HeadlessPhysics`] backend bookkeeps body state
//! and enforces the parameter rules a real SDK would (no forces on static
//! bodies, kinematic-only teleport targets) so the layer runs and tests
//! without any native library.

mod headless;

pub use headless::HeadlessPhysics;

use crate::error::EngineError;
use crate::foundation::math::{Pose, Quat, Vec3};
use bitflags::bitflags;
use slotmap::new_key_type;

new_key_type! {
    /// Opaque handle to a rigid body owned by the physics backend
    pub struct BodyHandle;
}

bitflags! {
    /// Per-axis motion constraints on a rigid body
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct AxisLock: u8 {
        /// Lock linear motion along X
        const LINEAR_X = 1 << 0;
        /// Lock linear motion along Y
        const LINEAR_Y = 1 << 1;
        /// Lock linear motion along Z
        const LINEAR_Z = 1 << 2;
        /// Lock rotation around X
        const ANGULAR_X = 1 << 3;
        /// Lock rotation around Y
        const ANGULAR_Y = 1 << 4;
        /// Lock rotation around Z
        const ANGULAR_Z = 1 << 5;
    }
}

/// Simulation role of a rigid body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Immovable; never simulated
    Static,
    /// Fully simulated
    Dynamic,
    /// Moved programmatically, pushes dynamic bodies
    Kinematic,
}

impl BodyKind {
    /// Whether the body participates in dynamics (dynamic or kinematic)
    pub fn is_simulated(self) -> bool {
        !matches!(self, Self::Static)
    }
}

/// Collision shape of a rigid body
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeDesc {
    /// Sphere with the given radius
    Sphere {
        /// Sphere radius
        radius: f32,
    },
    /// Box with the given extents
    Box {
        /// Extent along X
        width: f32,
        /// Extent along Y
        height: f32,
        /// Extent along Z
        depth: f32,
    },
    /// Capsule with the given radius and cylinder height
    Capsule {
        /// Capsule radius
        radius: f32,
        /// Height of the cylindrical section
        height: f32,
    },
}

/// Surface material parameters of a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialProps {
    /// Friction applied between surfaces not moving laterally to each other
    pub static_friction: f32,
    /// Friction applied between surfaces moving relative to each other
    pub dynamic_friction: f32,
    /// Bounciness, between 0 and 1
    pub restitution: f32,
}

impl Default for MaterialProps {
    fn default() -> Self {
        Self {
            static_friction: 1.0,
            dynamic_friction: 1.0,
            restitution: 1.0,
        }
    }
}

/// Creation parameters for a rigid body
#[derive(Debug, Clone, PartialEq)]
pub struct BodyDesc {
    /// Name of the owning GameObject, used in diagnostics
    pub name: String,
    /// Collision shape
    pub shape: ShapeDesc,
    /// Simulation role
    pub kind: BodyKind,
    /// Initial world position
    pub position: Vec3,
    /// Body mass (ignored for static bodies)
    pub mass: f32,
    /// Linear velocity damping
    pub linear_damping: f32,
    /// Angular velocity damping
    pub angular_damping: f32,
    /// Surface material
    pub material: MaterialProps,
}

impl Default for BodyDesc {
    fn default() -> Self {
        Self {
            name: String::new(),
            shape: ShapeDesc::Sphere { radius: 0.5 },
            kind: BodyKind::Dynamic,
            position: Vec3::zeros(),
            mass: 1000.0,
            linear_damping: 0.0,
            angular_damping: 0.0,
            material: MaterialProps::default(),
        }
    }
}

/// Interface to the wrapped native physics engine
///
/// Setters that only apply to simulated bodies return
/// [`EngineError::NativeCall`] when rejected and must leave the body's state
/// unchanged.
pub trait PhysicsBackend {
    /// Upcast for backend introspection (used by tests and tooling)
    fn as_any(&self) -> &dyn std::any::Any;

    /// Create a rigid body and return its handle
    fn create_body(&mut self, desc: &BodyDesc) -> Result<BodyHandle, EngineError>;

    /// Destroy a rigid body
    fn destroy_body(&mut self, body: BodyHandle) -> Result<(), EngineError>;

    /// Include or exclude a body from simulation without destroying it
    fn set_body_active(&mut self, body: BodyHandle, active: bool) -> Result<(), EngineError>;

    /// Current position and orientation
    fn pose(&self, body: BodyHandle) -> Result<Pose, EngineError>;

    /// Teleport to a world position
    fn set_position(&mut self, body: BodyHandle, position: Vec3) -> Result<(), EngineError>;

    /// Teleport to a world orientation
    fn set_rotation(&mut self, body: BodyHandle, rotation: Quat) -> Result<(), EngineError>;

    /// Rescale the collision shape
    fn set_scale(&mut self, body: BodyHandle, scale: Vec3) -> Result<(), EngineError>;

    /// Apply a continuous force (dynamic bodies only)
    fn add_force(&mut self, body: BodyHandle, force: Vec3) -> Result<(), EngineError>;

    /// Apply an instantaneous impulse (dynamic bodies only)
    fn add_impulse(&mut self, body: BodyHandle, impulse: Vec3) -> Result<(), EngineError>;

    /// Apply a torque (dynamic bodies only)
    fn add_torque(&mut self, body: BodyHandle, torque: Vec3) -> Result<(), EngineError>;

    /// Move a kinematic body toward a target position (kinematic bodies only)
    fn move_kinematic(&mut self, body: BodyHandle, target: Vec3) -> Result<(), EngineError>;

    /// Set linear velocity (dynamic bodies only)
    fn set_linear_velocity(&mut self, body: BodyHandle, velocity: Vec3)
        -> Result<(), EngineError>;

    /// Set angular velocity (dynamic bodies only)
    fn set_angular_velocity(
        &mut self,
        body: BodyHandle,
        velocity: Vec3,
    ) -> Result<(), EngineError>;

    /// Current linear velocity
    fn linear_velocity(&self, body: BodyHandle) -> Result<Vec3, EngineError>;

    /// Current angular velocity
    fn angular_velocity(&self, body: BodyHandle) -> Result<Vec3, EngineError>;

    /// Set body mass (simulated bodies only)
    fn set_mass(&mut self, body: BodyHandle, mass: f32) -> Result<(), EngineError>;

    /// Current body mass
    fn mass(&self, body: BodyHandle) -> Result<f32, EngineError>;

    /// Set static friction (simulated bodies only)
    fn set_static_friction(&mut self, body: BodyHandle, friction: f32)
        -> Result<(), EngineError>;

    /// Set dynamic friction (simulated bodies only)
    fn set_dynamic_friction(
        &mut self,
        body: BodyHandle,
        friction: f32,
    ) -> Result<(), EngineError>;

    /// Set restitution (simulated bodies only)
    fn set_restitution(&mut self, body: BodyHandle, restitution: f32)
        -> Result<(), EngineError>;

    /// Replace the axis-lock constraint flags
    fn set_axis_locks(&mut self, body: BodyHandle, locks: AxisLock) -> Result<(), EngineError>;

    /// Current axis-lock constraint flags
    fn axis_locks(&self, body: BodyHandle) -> Result<AxisLock, EngineError>;

    /// Enable or disable gravity for a body (dynamic bodies only)
    fn set_gravity_enabled(&mut self, body: BodyHandle, enabled: bool)
        -> Result<(), EngineError>;

    /// Materials attached to the body's shapes
    fn materials(&self, body: BodyHandle) -> Result<Vec<MaterialProps>, EngineError>;
}
