//! Render backend seam
//!
//! Scene-node mutation, camera frustum/viewport control and light management
//! are delegated to a wrapped native rendering engine behind
//! [`RenderBackend`]. Handles are opaque slotmap keys; the shipped
//! [`HeadlessRender`] backend bookkeeps the full node/camera/light state for
//! SDK-free hosts and tests.

mod headless;

pub use headless::{CameraState, HeadlessRender, LightState, NodeState};

use crate::error::EngineError;
use crate::foundation::math::{Quat, Vec3};
use slotmap::new_key_type;

new_key_type! {
    /// Opaque handle to a scene node with an attached entity
    pub struct NodeHandle;
}

new_key_type! {
    /// Opaque handle to a camera
    pub struct CameraHandle;
}

new_key_type! {
    /// Opaque handle to a light
    pub struct LightHandle;
}

/// Camera projection kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionKind {
    /// Perspective projection
    #[default]
    Perspective,
    /// Orthographic projection
    Orthographic,
}

/// Light kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightKind {
    /// Omnidirectional positional light
    #[default]
    Point,
    /// Infinitely distant light with a direction only
    Directional,
    /// Cone-shaped positional light
    Spot,
}

/// Local camera rotation axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationAxis {
    /// Rotation around the local X axis
    Pitch,
    /// Rotation around the local Y axis
    Yaw,
    /// Rotation around the local Z axis
    Roll,
}

/// Normalized viewport rectangle, all coordinates in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Left edge
    pub left: f32,
    /// Top edge
    pub top: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width: 1.0,
            height: 1.0,
        }
    }
}

/// Interface to the wrapped native rendering engine
pub trait RenderBackend {
    /// Upcast for backend introspection (used by tests and tooling)
    fn as_any(&self) -> &dyn std::any::Any;

    // --- scene nodes ---

    /// Create a scene node with an entity for the named mesh
    ///
    /// Node names are unique; a duplicate name is rejected.
    fn create_node(&mut self, name: &str, mesh: &str) -> Result<NodeHandle, EngineError>;

    /// Destroy a scene node and its entity
    fn destroy_node(&mut self, node: NodeHandle) -> Result<(), EngineError>;

    /// Set node world position
    fn set_node_position(&mut self, node: NodeHandle, position: Vec3) -> Result<(), EngineError>;

    /// Set node world orientation
    fn set_node_rotation(&mut self, node: NodeHandle, rotation: Quat) -> Result<(), EngineError>;

    /// Set node absolute scale
    fn set_node_scale(&mut self, node: NodeHandle, scale: Vec3) -> Result<(), EngineError>;

    /// Apply a relative scale on top of the current one
    fn scale_node(&mut self, node: NodeHandle, factor: Vec3) -> Result<(), EngineError>;

    /// Apply a relative rotation around an axis
    fn rotate_node(
        &mut self,
        node: NodeHandle,
        axis: Vec3,
        radians: f32,
    ) -> Result<(), EngineError>;

    /// Reorient the node so its forward axis points at a world position
    fn node_look_at(&mut self, node: NodeHandle, target: Vec3) -> Result<(), EngineError>;

    /// Show or hide the node
    fn set_node_visible(&mut self, node: NodeHandle, visible: bool) -> Result<(), EngineError>;

    /// Toggle shadow casting for the node's entity
    fn set_cast_shadows(&mut self, node: NodeHandle, cast: bool) -> Result<(), EngineError>;

    /// Distance beyond which the entity is not rendered; 0 means unlimited
    fn set_render_distance(&mut self, node: NodeHandle, distance: f32)
        -> Result<(), EngineError>;

    /// Assign a material to the node's entity
    fn set_material(&mut self, node: NodeHandle, material: &str) -> Result<(), EngineError>;

    // --- cameras ---

    /// Create a camera; `z_order` orders viewports on the render target
    fn create_camera(&mut self, name: &str, z_order: i32) -> Result<CameraHandle, EngineError>;

    /// Destroy a camera (and its viewport, if any)
    fn destroy_camera(&mut self, camera: CameraHandle) -> Result<(), EngineError>;

    /// Set camera world position
    fn set_camera_position(
        &mut self,
        camera: CameraHandle,
        position: Vec3,
    ) -> Result<(), EngineError>;

    /// Set camera world orientation
    fn set_camera_orientation(
        &mut self,
        camera: CameraHandle,
        orientation: Quat,
    ) -> Result<(), EngineError>;

    /// Current camera world orientation
    fn camera_orientation(&self, camera: CameraHandle) -> Result<Quat, EngineError>;

    /// Reorient the camera so it points at a world position
    fn camera_look_at(&mut self, camera: CameraHandle, target: Vec3) -> Result<(), EngineError>;

    /// Rotate around a local axis; `world` rotates around the world axis instead
    fn rotate_camera(
        &mut self,
        camera: CameraHandle,
        axis: RotationAxis,
        radians: f32,
        world: bool,
    ) -> Result<(), EngineError>;

    /// Set near and far clip planes
    fn set_clip_planes(
        &mut self,
        camera: CameraHandle,
        near: f32,
        far: f32,
    ) -> Result<(), EngineError>;

    /// Switch between perspective and orthographic projection
    fn set_projection(
        &mut self,
        camera: CameraHandle,
        kind: ProjectionKind,
    ) -> Result<(), EngineError>;

    /// Set vertical field of view in degrees
    fn set_fov_y(&mut self, camera: CameraHandle, degrees: f32) -> Result<(), EngineError>;

    /// Set the near-plane frustum extents explicitly
    fn set_frustum_extents(
        &mut self,
        camera: CameraHandle,
        left: f32,
        right: f32,
        top: f32,
        bottom: f32,
    ) -> Result<(), EngineError>;

    /// Set the orthographic window dimensions (recomputes aspect ratio)
    fn set_ortho_window(
        &mut self,
        camera: CameraHandle,
        width: f32,
        height: f32,
    ) -> Result<(), EngineError>;

    /// Create the camera's viewport; a camera has at most one
    fn create_viewport(
        &mut self,
        camera: CameraHandle,
        viewport: &Viewport,
    ) -> Result<(), EngineError>;

    /// Update the dimensions of an existing viewport
    fn set_viewport(
        &mut self,
        camera: CameraHandle,
        viewport: &Viewport,
    ) -> Result<(), EngineError>;

    /// Destroy the camera's viewport
    fn destroy_viewport(&mut self, camera: CameraHandle) -> Result<(), EngineError>;

    /// Enable or disable a named compositor on the camera's viewport
    fn set_compositor_enabled(
        &mut self,
        camera: CameraHandle,
        compositor: &str,
        enabled: bool,
    ) -> Result<(), EngineError>;

    // --- lights ---

    /// Create a light
    fn create_light(
        &mut self,
        kind: LightKind,
        color: Vec3,
        intensity: f32,
    ) -> Result<LightHandle, EngineError>;

    /// Destroy a light
    fn destroy_light(&mut self, light: LightHandle) -> Result<(), EngineError>;

    /// Set light world position (positional kinds)
    fn set_light_position(
        &mut self,
        light: LightHandle,
        position: Vec3,
    ) -> Result<(), EngineError>;

    /// Set light direction (directional and spot kinds)
    fn set_light_direction(
        &mut self,
        light: LightHandle,
        direction: Vec3,
    ) -> Result<(), EngineError>;

    /// Set light color
    fn set_light_color(&mut self, light: LightHandle, color: Vec3) -> Result<(), EngineError>;

    /// Set light intensity
    fn set_light_intensity(
        &mut self,
        light: LightHandle,
        intensity: f32,
    ) -> Result<(), EngineError>;
}
