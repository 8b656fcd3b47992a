//! Headless render backend
//!
//! Bookkeeps scene nodes, cameras, viewports and lights without a GPU.
//! Enforces the same structural rules as the wrapped scene graph: unique
//! node names, at most one viewport per camera, compositors only on cameras
//! that have a viewport.

use super::{
    CameraHandle, LightHandle, LightKind, NodeHandle, ProjectionKind, RenderBackend,
    RotationAxis, Viewport,
};
use crate::error::EngineError;
use crate::foundation::math::{face_direction, Quat, Vec3};
use slotmap::SlotMap;
use std::collections::{HashMap, HashSet};

/// Bookkept state of one scene node and its entity
#[derive(Debug, Clone)]
pub struct NodeState {
    /// Unique node name
    pub name: String,
    /// Mesh attached to the entity
    pub mesh: String,
    /// World position
    pub position: Vec3,
    /// World orientation
    pub rotation: Quat,
    /// Absolute scale
    pub scale: Vec3,
    /// Whether the node is rendered
    pub visible: bool,
    /// Whether the entity casts shadows
    pub cast_shadows: bool,
    /// Render distance; 0 means unlimited
    pub render_distance: f32,
    /// Assigned material, if any
    pub material: Option<String>,
}

/// Bookkept state of one camera
#[derive(Debug, Clone)]
pub struct CameraState {
    /// Camera name
    pub name: String,
    /// Viewport stacking order
    pub z_order: i32,
    /// World position
    pub position: Vec3,
    /// World orientation
    pub orientation: Quat,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
    /// Projection kind
    pub projection: ProjectionKind,
    /// Vertical field of view in degrees
    pub fov_y: f32,
    /// Explicit frustum extents, if set (left, right, top, bottom)
    pub frustum_extents: Option<(f32, f32, f32, f32)>,
    /// Orthographic window, if set (width, height)
    pub ortho_window: Option<(f32, f32)>,
    /// The camera's viewport, if created
    pub viewport: Option<Viewport>,
    /// Names of currently enabled compositors
    pub compositors: HashSet<String>,
}

/// Bookkept state of one light
#[derive(Debug, Clone)]
pub struct LightState {
    /// Light kind
    pub kind: LightKind,
    /// Light color
    pub color: Vec3,
    /// Light intensity
    pub intensity: f32,
    /// World position (positional kinds)
    pub position: Vec3,
    /// Direction (directional and spot kinds)
    pub direction: Vec3,
}

/// In-memory [`RenderBackend`] with no native dependency
#[derive(Default)]
pub struct HeadlessRender {
    nodes: SlotMap<NodeHandle, NodeState>,
    node_names: HashMap<String, NodeHandle>,
    cameras: SlotMap<CameraHandle, CameraState>,
    lights: SlotMap<LightHandle, LightState>,
}

impl HeadlessRender {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live scene nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Inspect a node's bookkept state (test hook)
    pub fn node(&self, handle: NodeHandle) -> Option<&NodeState> {
        self.nodes.get(handle)
    }

    /// Inspect a camera's bookkept state (test hook)
    pub fn camera(&self, handle: CameraHandle) -> Option<&CameraState> {
        self.cameras.get(handle)
    }

    /// Inspect a light's bookkept state (test hook)
    pub fn light(&self, handle: LightHandle) -> Option<&LightState> {
        self.lights.get(handle)
    }

    fn node_mut(&mut self, handle: NodeHandle) -> Result<&mut NodeState, EngineError> {
        self.nodes
            .get_mut(handle)
            .ok_or_else(|| EngineError::native("unknown node handle"))
    }

    fn camera_mut(&mut self, handle: CameraHandle) -> Result<&mut CameraState, EngineError> {
        self.cameras
            .get_mut(handle)
            .ok_or_else(|| EngineError::native("unknown camera handle"))
    }

    fn light_mut(&mut self, handle: LightHandle) -> Result<&mut LightState, EngineError> {
        self.lights
            .get_mut(handle)
            .ok_or_else(|| EngineError::native("unknown light handle"))
    }
}

impl RenderBackend for HeadlessRender {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn create_node(&mut self, name: &str, mesh: &str) -> Result<NodeHandle, EngineError> {
        if name.is_empty() || mesh.is_empty() {
            return Err(EngineError::native("node and mesh names must be non-empty"));
        }
        if self.node_names.contains_key(name) {
            return Err(EngineError::native(format!(
                "a scene node named `{name}` already exists"
            )));
        }
        let handle = self.nodes.insert(NodeState {
            name: name.to_string(),
            mesh: mesh.to_string(),
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            visible: true,
            cast_shadows: true,
            render_distance: 0.0,
            material: None,
        });
        self.node_names.insert(name.to_string(), handle);
        log::debug!("created scene node `{name}` with mesh `{mesh}`");
        Ok(handle)
    }

    fn destroy_node(&mut self, node: NodeHandle) -> Result<(), EngineError> {
        let state = self
            .nodes
            .remove(node)
            .ok_or_else(|| EngineError::native("unknown node handle"))?;
        self.node_names.remove(&state.name);
        log::debug!("destroyed scene node `{}`", state.name);
        Ok(())
    }

    fn set_node_position(&mut self, node: NodeHandle, position: Vec3) -> Result<(), EngineError> {
        self.node_mut(node)?.position = position;
        Ok(())
    }

    fn set_node_rotation(&mut self, node: NodeHandle, rotation: Quat) -> Result<(), EngineError> {
        self.node_mut(node)?.rotation = rotation;
        Ok(())
    }

    fn set_node_scale(&mut self, node: NodeHandle, scale: Vec3) -> Result<(), EngineError> {
        self.node_mut(node)?.scale = scale;
        Ok(())
    }

    fn scale_node(&mut self, node: NodeHandle, factor: Vec3) -> Result<(), EngineError> {
        let state = self.node_mut(node)?;
        state.scale.component_mul_assign(&factor);
        Ok(())
    }

    fn rotate_node(
        &mut self,
        node: NodeHandle,
        axis: Vec3,
        radians: f32,
    ) -> Result<(), EngineError> {
        if axis.norm_squared() < f32::EPSILON {
            return Err(EngineError::native("rotation axis must be non-zero"));
        }
        let state = self.node_mut(node)?;
        let rotation = Quat::from_axis_angle(&nalgebra::Unit::new_normalize(axis), radians);
        state.rotation = state.rotation * rotation;
        Ok(())
    }

    fn node_look_at(&mut self, node: NodeHandle, target: Vec3) -> Result<(), EngineError> {
        let state = self.node_mut(node)?;
        state.rotation = face_direction(target - state.position);
        Ok(())
    }

    fn set_node_visible(&mut self, node: NodeHandle, visible: bool) -> Result<(), EngineError> {
        self.node_mut(node)?.visible = visible;
        Ok(())
    }

    fn set_cast_shadows(&mut self, node: NodeHandle, cast: bool) -> Result<(), EngineError> {
        self.node_mut(node)?.cast_shadows = cast;
        Ok(())
    }

    fn set_render_distance(
        &mut self,
        node: NodeHandle,
        distance: f32,
    ) -> Result<(), EngineError> {
        if distance < 0.0 {
            return Err(EngineError::native("render distance must be non-negative"));
        }
        self.node_mut(node)?.render_distance = distance;
        Ok(())
    }

    fn set_material(&mut self, node: NodeHandle, material: &str) -> Result<(), EngineError> {
        if material.is_empty() {
            return Err(EngineError::native("material name must be non-empty"));
        }
        self.node_mut(node)?.material = Some(material.to_string());
        Ok(())
    }

    fn create_camera(&mut self, name: &str, z_order: i32) -> Result<CameraHandle, EngineError> {
        if name.is_empty() {
            return Err(EngineError::native("camera name must be non-empty"));
        }
        let handle = self.cameras.insert(CameraState {
            name: name.to_string(),
            z_order,
            position: Vec3::zeros(),
            orientation: Quat::identity(),
            near: 1.0,
            far: 10000.0,
            projection: ProjectionKind::Perspective,
            fov_y: 45.0,
            frustum_extents: None,
            ortho_window: None,
            viewport: None,
            compositors: HashSet::new(),
        });
        log::debug!("created camera `{name}` (z-order {z_order})");
        Ok(handle)
    }

    fn destroy_camera(&mut self, camera: CameraHandle) -> Result<(), EngineError> {
        let state = self
            .cameras
            .remove(camera)
            .ok_or_else(|| EngineError::native("unknown camera handle"))?;
        log::debug!("destroyed camera `{}`", state.name);
        Ok(())
    }

    fn set_camera_position(
        &mut self,
        camera: CameraHandle,
        position: Vec3,
    ) -> Result<(), EngineError> {
        self.camera_mut(camera)?.position = position;
        Ok(())
    }

    fn set_camera_orientation(
        &mut self,
        camera: CameraHandle,
        orientation: Quat,
    ) -> Result<(), EngineError> {
        self.camera_mut(camera)?.orientation = orientation;
        Ok(())
    }

    fn camera_orientation(&self, camera: CameraHandle) -> Result<Quat, EngineError> {
        self.cameras
            .get(camera)
            .map(|c| c.orientation)
            .ok_or_else(|| EngineError::native("unknown camera handle"))
    }

    fn camera_look_at(&mut self, camera: CameraHandle, target: Vec3) -> Result<(), EngineError> {
        let state = self.camera_mut(camera)?;
        state.orientation = face_direction(target - state.position);
        Ok(())
    }

    fn rotate_camera(
        &mut self,
        camera: CameraHandle,
        axis: RotationAxis,
        radians: f32,
        world: bool,
    ) -> Result<(), EngineError> {
        let state = self.camera_mut(camera)?;
        let unit = match axis {
            RotationAxis::Pitch => Vec3::x_axis(),
            RotationAxis::Yaw => Vec3::y_axis(),
            RotationAxis::Roll => Vec3::z_axis(),
        };
        let rotation = Quat::from_axis_angle(&unit, radians);
        state.orientation = if world {
            rotation * state.orientation
        } else {
            state.orientation * rotation
        };
        Ok(())
    }

    fn set_clip_planes(
        &mut self,
        camera: CameraHandle,
        near: f32,
        far: f32,
    ) -> Result<(), EngineError> {
        if near <= 0.0 || far <= near {
            return Err(EngineError::native(
                "clip planes require 0 < near < far",
            ));
        }
        let state = self.camera_mut(camera)?;
        state.near = near;
        state.far = far;
        Ok(())
    }

    fn set_projection(
        &mut self,
        camera: CameraHandle,
        kind: ProjectionKind,
    ) -> Result<(), EngineError> {
        self.camera_mut(camera)?.projection = kind;
        Ok(())
    }

    fn set_fov_y(&mut self, camera: CameraHandle, degrees: f32) -> Result<(), EngineError> {
        if !(0.0..180.0).contains(&degrees) || degrees == 0.0 {
            return Err(EngineError::native(
                "field of view must be between 0 and 180 degrees exclusive",
            ));
        }
        self.camera_mut(camera)?.fov_y = degrees;
        Ok(())
    }

    fn set_frustum_extents(
        &mut self,
        camera: CameraHandle,
        left: f32,
        right: f32,
        top: f32,
        bottom: f32,
    ) -> Result<(), EngineError> {
        if left >= right || bottom >= top {
            return Err(EngineError::native("degenerate frustum extents"));
        }
        self.camera_mut(camera)?.frustum_extents = Some((left, right, top, bottom));
        Ok(())
    }

    fn set_ortho_window(
        &mut self,
        camera: CameraHandle,
        width: f32,
        height: f32,
    ) -> Result<(), EngineError> {
        if width <= 0.0 || height <= 0.0 {
            return Err(EngineError::native("ortho window must have positive size"));
        }
        self.camera_mut(camera)?.ortho_window = Some((width, height));
        Ok(())
    }

    fn create_viewport(
        &mut self,
        camera: CameraHandle,
        viewport: &Viewport,
    ) -> Result<(), EngineError> {
        let state = self.camera_mut(camera)?;
        if state.viewport.is_some() {
            return Err(EngineError::native(format!(
                "camera `{}` already has a viewport",
                state.name
            )));
        }
        state.viewport = Some(*viewport);
        Ok(())
    }

    fn set_viewport(
        &mut self,
        camera: CameraHandle,
        viewport: &Viewport,
    ) -> Result<(), EngineError> {
        let state = self.camera_mut(camera)?;
        if state.viewport.is_none() {
            return Err(EngineError::native(format!(
                "camera `{}` has no viewport",
                state.name
            )));
        }
        state.viewport = Some(*viewport);
        Ok(())
    }

    fn destroy_viewport(&mut self, camera: CameraHandle) -> Result<(), EngineError> {
        let state = self.camera_mut(camera)?;
        if state.viewport.take().is_none() {
            return Err(EngineError::native(format!(
                "camera `{}` has no viewport to destroy",
                state.name
            )));
        }
        state.compositors.clear();
        Ok(())
    }

    fn set_compositor_enabled(
        &mut self,
        camera: CameraHandle,
        compositor: &str,
        enabled: bool,
    ) -> Result<(), EngineError> {
        let state = self.camera_mut(camera)?;
        if state.viewport.is_none() {
            return Err(EngineError::native(format!(
                "camera `{}` needs a viewport before compositors apply",
                state.name
            )));
        }
        if enabled {
            state.compositors.insert(compositor.to_string());
        } else {
            state.compositors.remove(compositor);
        }
        Ok(())
    }

    fn create_light(
        &mut self,
        kind: LightKind,
        color: Vec3,
        intensity: f32,
    ) -> Result<LightHandle, EngineError> {
        if intensity < 0.0 {
            return Err(EngineError::native("light intensity must be non-negative"));
        }
        let handle = self.lights.insert(LightState {
            kind,
            color,
            intensity,
            position: Vec3::zeros(),
            direction: Vec3::new(0.0, -1.0, 0.0),
        });
        log::debug!("created {kind:?} light");
        Ok(handle)
    }

    fn destroy_light(&mut self, light: LightHandle) -> Result<(), EngineError> {
        self.lights
            .remove(light)
            .map(|_| ())
            .ok_or_else(|| EngineError::native("unknown light handle"))
    }

    fn set_light_position(
        &mut self,
        light: LightHandle,
        position: Vec3,
    ) -> Result<(), EngineError> {
        let state = self.light_mut(light)?;
        if state.kind == LightKind::Directional {
            return Err(EngineError::native("directional lights have no position"));
        }
        state.position = position;
        Ok(())
    }

    fn set_light_direction(
        &mut self,
        light: LightHandle,
        direction: Vec3,
    ) -> Result<(), EngineError> {
        if direction.norm_squared() < f32::EPSILON {
            return Err(EngineError::native("light direction must be non-zero"));
        }
        let state = self.light_mut(light)?;
        if state.kind == LightKind::Point {
            return Err(EngineError::native("point lights have no direction"));
        }
        state.direction = direction.normalize();
        Ok(())
    }

    fn set_light_color(&mut self, light: LightHandle, color: Vec3) -> Result<(), EngineError> {
        self.light_mut(light)?.color = color;
        Ok(())
    }

    fn set_light_intensity(
        &mut self,
        light: LightHandle,
        intensity: f32,
    ) -> Result<(), EngineError> {
        if intensity < 0.0 {
            return Err(EngineError::native("light intensity must be non-negative"));
        }
        self.light_mut(light)?.intensity = intensity;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn duplicate_node_names_are_rejected() {
        let mut render = HeadlessRender::new();
        render.create_node("player", "player.mesh").unwrap();
        assert!(render.create_node("player", "other.mesh").is_err());
        assert_eq!(render.node_count(), 1);
    }

    #[test]
    fn node_name_is_reusable_after_destroy() {
        let mut render = HeadlessRender::new();
        let node = render.create_node("player", "player.mesh").unwrap();
        render.destroy_node(node).unwrap();
        assert!(render.create_node("player", "player.mesh").is_ok());
    }

    #[test]
    fn relative_scale_compounds() {
        let mut render = HeadlessRender::new();
        let node = render.create_node("crate", "crate.mesh").unwrap();
        render.set_node_scale(node, Vec3::new(2.0, 2.0, 2.0)).unwrap();
        render.scale_node(node, Vec3::new(0.5, 1.0, 2.0)).unwrap();
        assert_eq!(render.node(node).unwrap().scale, Vec3::new(1.0, 2.0, 4.0));
    }

    #[test]
    fn camera_viewport_is_exclusive() {
        let mut render = HeadlessRender::new();
        let camera = render.create_camera("main", 0).unwrap();

        render.create_viewport(camera, &Viewport::default()).unwrap();
        assert!(render.create_viewport(camera, &Viewport::default()).is_err());

        render.destroy_viewport(camera).unwrap();
        assert!(render.destroy_viewport(camera).is_err());
    }

    #[test]
    fn compositors_require_a_viewport() {
        let mut render = HeadlessRender::new();
        let camera = render.create_camera("main", 0).unwrap();
        assert!(render.set_compositor_enabled(camera, "bloom", true).is_err());

        render.create_viewport(camera, &Viewport::default()).unwrap();
        render.set_compositor_enabled(camera, "bloom", true).unwrap();
        assert!(render.camera(camera).unwrap().compositors.contains("bloom"));

        render.set_compositor_enabled(camera, "bloom", false).unwrap();
        assert!(render.camera(camera).unwrap().compositors.is_empty());
    }

    #[test]
    fn camera_look_at_points_forward_axis() {
        let mut render = HeadlessRender::new();
        let camera = render.create_camera("main", 0).unwrap();
        render
            .set_camera_position(camera, Vec3::new(0.0, 0.0, 5.0))
            .unwrap();
        render.camera_look_at(camera, Vec3::zeros()).unwrap();

        let orientation = render.camera_orientation(camera).unwrap();
        let forward = orientation * Vec3::new(0.0, 0.0, -1.0);
        assert_relative_eq!(forward, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-5);
    }

    #[test]
    fn world_and_local_rotations_compose_differently() {
        let mut render = HeadlessRender::new();
        let camera = render.create_camera("main", 0).unwrap();
        let half_pi = std::f32::consts::FRAC_PI_2;

        render
            .rotate_camera(camera, RotationAxis::Yaw, half_pi, false)
            .unwrap();
        render
            .rotate_camera(camera, RotationAxis::Pitch, half_pi, false)
            .unwrap();
        let local = render.camera_orientation(camera).unwrap();

        let camera2 = render.create_camera("second", 1).unwrap();
        render
            .rotate_camera(camera2, RotationAxis::Yaw, half_pi, false)
            .unwrap();
        render
            .rotate_camera(camera2, RotationAxis::Pitch, half_pi, true)
            .unwrap();
        let world = render.camera_orientation(camera2).unwrap();

        let local_fwd = local * Vec3::new(0.0, 0.0, -1.0);
        let world_fwd = world * Vec3::new(0.0, 0.0, -1.0);
        assert!((local_fwd - world_fwd).norm() > 1e-3);
    }

    #[test]
    fn invalid_clip_planes_are_rejected() {
        let mut render = HeadlessRender::new();
        let camera = render.create_camera("main", 0).unwrap();
        assert!(render.set_clip_planes(camera, 0.0, 100.0).is_err());
        assert!(render.set_clip_planes(camera, 10.0, 5.0).is_err());
        assert_eq!(render.camera(camera).unwrap().near, 1.0);
        assert_eq!(render.camera(camera).unwrap().far, 10000.0);
    }

    #[test]
    fn directional_light_rejects_position() {
        let mut render = HeadlessRender::new();
        let light = render
            .create_light(LightKind::Directional, Vec3::new(1.0, 1.0, 1.0), 1.0)
            .unwrap();
        assert!(render.set_light_position(light, Vec3::y()).is_err());
        render.set_light_direction(light, Vec3::new(0.0, -1.0, 0.3)).unwrap();
    }
}
