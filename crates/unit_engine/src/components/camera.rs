//! Camera component
//!
//! Wraps one native render camera. Every frame it re-resolves the Transform
//! sibling and pushes its position to the camera; all frustum, viewport and
//! compositor control forwards to the render backend. The viewport is the
//! camera's on-screen effect: it is created on enable and destroyed on
//! disable so a disabled camera costs nothing without losing its settings.

use crate::core::config::ConfigView;
use crate::engines::Engines;
use crate::error::EngineError;
use crate::foundation::math::{degrees_to_radians, Quat, Vec3};
use crate::gameobject::{Component, ComponentId, UpdateContext};
use crate::components::TransformComponent;
use crate::render::{CameraHandle, ProjectionKind, RenderBackend, RotationAxis, Viewport};
use std::any::Any;

/// Render camera wrapper
///
/// Config fields (all optional): `name` ("main_camera"), `z_order` (0),
/// `fov_y` degrees (45), `near` (1), `far` (10000), `ortho` (false).
#[derive(Debug, Default)]
pub struct CameraComponent {
    camera: Option<CameraHandle>,
    viewport_dims: Viewport,
    viewport_active: bool,
}

impl CameraComponent {
    /// Handle of the wrapped camera, if created
    pub fn handle(&self) -> Option<CameraHandle> {
        self.camera
    }

    fn require_handle(&self) -> Result<CameraHandle, EngineError> {
        self.camera
            .ok_or_else(|| EngineError::native("camera was not created"))
    }

    /// Point the camera at a world position
    pub fn look_at(&self, engines: &mut Engines, target: Vec3) -> Result<(), EngineError> {
        engines.render.camera_look_at(self.require_handle()?, target)
    }

    /// Replace the camera orientation
    pub fn set_orientation(
        &self,
        engines: &mut Engines,
        orientation: Quat,
    ) -> Result<(), EngineError> {
        engines
            .render
            .set_camera_orientation(self.require_handle()?, orientation)
    }

    /// Current orientation as Euler angles in degrees (x, y, z)
    pub fn orientation_degrees(&self, engines: &Engines) -> Result<Vec3, EngineError> {
        let orientation = engines.render.camera_orientation(self.require_handle()?)?;
        let (roll, pitch, yaw) = orientation.euler_angles();
        Ok(Vec3::new(
            roll.to_degrees(),
            pitch.to_degrees(),
            yaw.to_degrees(),
        ))
    }

    /// Rotate around the local X axis by degrees
    pub fn pitch_degrees(
        &self,
        engines: &mut Engines,
        degrees: f32,
        world: bool,
    ) -> Result<(), EngineError> {
        self.pitch_radians(engines, degrees_to_radians(degrees), world)
    }

    /// Rotate around the local X axis by radians
    pub fn pitch_radians(
        &self,
        engines: &mut Engines,
        radians: f32,
        world: bool,
    ) -> Result<(), EngineError> {
        engines
            .render
            .rotate_camera(self.require_handle()?, RotationAxis::Pitch, radians, world)
    }

    /// Rotate around the local Y axis by degrees
    pub fn yaw_degrees(
        &self,
        engines: &mut Engines,
        degrees: f32,
        world: bool,
    ) -> Result<(), EngineError> {
        self.yaw_radians(engines, degrees_to_radians(degrees), world)
    }

    /// Rotate around the local Y axis by radians
    pub fn yaw_radians(
        &self,
        engines: &mut Engines,
        radians: f32,
        world: bool,
    ) -> Result<(), EngineError> {
        engines
            .render
            .rotate_camera(self.require_handle()?, RotationAxis::Yaw, radians, world)
    }

    /// Rotate around the local Z axis by degrees
    pub fn roll_degrees(
        &self,
        engines: &mut Engines,
        degrees: f32,
        world: bool,
    ) -> Result<(), EngineError> {
        self.roll_radians(engines, degrees_to_radians(degrees), world)
    }

    /// Rotate around the local Z axis by radians
    pub fn roll_radians(
        &self,
        engines: &mut Engines,
        radians: f32,
        world: bool,
    ) -> Result<(), EngineError> {
        engines
            .render
            .rotate_camera(self.require_handle()?, RotationAxis::Roll, radians, world)
    }

    /// Set the near and far clip planes
    pub fn set_planes(&self, engines: &mut Engines, near: f32, far: f32) -> Result<(), EngineError> {
        engines.render.set_clip_planes(self.require_handle()?, near, far)
    }

    /// Switch between orthographic and perspective projection
    pub fn set_projection(&self, engines: &mut Engines, ortho: bool) -> Result<(), EngineError> {
        let kind = if ortho {
            ProjectionKind::Orthographic
        } else {
            ProjectionKind::Perspective
        };
        engines.render.set_projection(self.require_handle()?, kind)
    }

    /// Set the vertical field of view in degrees
    pub fn set_fov_y(&self, engines: &mut Engines, degrees: f32) -> Result<(), EngineError> {
        engines.render.set_fov_y(self.require_handle()?, degrees)
    }

    /// Set the near-plane frustum extents explicitly
    pub fn set_frustum_dimensions(
        &self,
        engines: &mut Engines,
        left: f32,
        right: f32,
        top: f32,
        bottom: f32,
    ) -> Result<(), EngineError> {
        engines
            .render
            .set_frustum_extents(self.require_handle()?, left, right, top, bottom)
    }

    /// Set the orthographic window dimensions
    pub fn set_ortho_window_dimensions(
        &self,
        engines: &mut Engines,
        width: f32,
        height: f32,
    ) -> Result<(), EngineError> {
        engines
            .render
            .set_ortho_window(self.require_handle()?, width, height)
    }

    /// Show or hide the viewport, updating its dimensions when showing
    ///
    /// Showing an already-visible viewport just moves it; hiding an
    /// already-hidden one is a no-op.
    pub fn set_viewport_visibility(
        &mut self,
        engines: &mut Engines,
        visible: bool,
        dims: Viewport,
    ) -> Result<(), EngineError> {
        self.viewport_dims = dims;
        let handle = self.require_handle()?;
        match (visible, self.viewport_active) {
            (true, false) => {
                engines.render.create_viewport(handle, &dims)?;
                self.viewport_active = true;
                Ok(())
            }
            (true, true) => engines.render.set_viewport(handle, &dims),
            (false, true) => {
                engines.render.destroy_viewport(handle)?;
                self.viewport_active = false;
                Ok(())
            }
            (false, false) => Ok(()),
        }
    }

    /// Move/resize the visible viewport
    pub fn set_viewport_dimensions(
        &mut self,
        engines: &mut Engines,
        dims: Viewport,
    ) -> Result<(), EngineError> {
        self.viewport_dims = dims;
        if self.viewport_active {
            engines.render.set_viewport(self.require_handle()?, &dims)
        } else {
            Ok(())
        }
    }

    /// Enable or disable a named compositor on this camera's viewport
    pub fn set_compositor(
        &self,
        engines: &mut Engines,
        compositor: &str,
        enabled: bool,
    ) -> Result<(), EngineError> {
        engines
            .render
            .set_compositor_enabled(self.require_handle()?, compositor, enabled)
    }
}

impl Component for CameraComponent {
    fn id(&self) -> ComponentId {
        ComponentId::Camera
    }

    fn awake(&mut self, config: &ConfigView, engines: &mut Engines) -> Result<(), EngineError> {
        let name = config.str_or("name", "main_camera")?;
        let z_order = config.i32_or("z_order", 0)?;
        let handle = engines.render.create_camera(name, z_order)?;
        self.camera = Some(handle);

        engines
            .render
            .set_fov_y(handle, config.f32_or("fov_y", 45.0)?)?;
        engines.render.set_clip_planes(
            handle,
            config.f32_or("near", 1.0)?,
            config.f32_or("far", 10000.0)?,
        )?;
        if config.bool_or("ortho", false)? {
            engines
                .render
                .set_projection(handle, ProjectionKind::Orthographic)?;
        }
        Ok(())
    }

    fn start(&mut self, ctx: &mut UpdateContext<'_>) -> Result<(), EngineError> {
        // Sibling existence is verified here, not in awake: the Transform
        // may be added after the camera during population.
        if !ctx.siblings.contains(ComponentId::Transform) {
            log::warn!("`{}`: camera has no Transform sibling", ctx.owner);
            return Err(EngineError::MissingSibling {
                owner: ctx.owner.to_string(),
                kind: ComponentId::Transform,
            });
        }
        Ok(())
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        // Re-resolved every frame; the sibling may have been replaced.
        let Some(tr) = ctx.siblings.get_as::<TransformComponent>(ComponentId::Transform) else {
            return;
        };
        let Some(handle) = self.camera else { return };
        if let Err(e) = ctx.engines.render.set_camera_position(handle, tr.position) {
            log::warn!("`{}`: camera position push failed: {e}", ctx.owner);
        }
    }

    fn on_enable(&mut self, engines: &mut Engines) {
        let Some(handle) = self.camera else { return };
        if !self.viewport_active {
            match engines.render.create_viewport(handle, &self.viewport_dims) {
                Ok(()) => self.viewport_active = true,
                Err(e) => log::warn!("camera viewport creation failed: {e}"),
            }
        }
    }

    fn on_disable(&mut self, engines: &mut Engines) {
        let Some(handle) = self.camera else { return };
        if self.viewport_active {
            if let Err(e) = engines.render.destroy_viewport(handle) {
                log::warn!("camera viewport destruction failed: {e}");
            }
            self.viewport_active = false;
        }
    }

    fn teardown(&mut self, engines: &mut Engines) {
        if let Some(handle) = self.camera.take() {
            self.viewport_active = false;
            if let Err(e) = engines.render.destroy_camera(handle) {
                log::warn!("camera teardown failed: {e}");
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
