//! Render object component
//!
//! Wraps one scene node with an attached mesh entity. The node follows the
//! Transform sibling every frame (position, rotation and scale); visibility
//! tracks the component's enabled state so a disabled render object simply
//! vanishes from the scene.

use crate::components::TransformComponent;
use crate::core::config::ConfigView;
use crate::engines::Engines;
use crate::error::EngineError;
use crate::foundation::math::Vec3;
use crate::gameobject::{Component, ComponentId, UpdateContext};
use crate::render::{NodeHandle, RenderBackend};
use std::any::Any;

/// Scene node plus mesh entity wrapper
///
/// Config fields: `mesh` (required), `name` (required, unique per
/// scene), `material` (optional), `visible` (true), `cast_shadows` (true),
/// `render_distance` (0, unlimited).
#[derive(Debug, Default)]
pub struct RenderObjectComponent {
    node: Option<NodeHandle>,
    visible: bool,
}

impl RenderObjectComponent {
    /// Handle of the wrapped scene node, if created
    pub fn handle(&self) -> Option<NodeHandle> {
        self.node
    }

    fn require_handle(&self) -> Result<NodeHandle, EngineError> {
        self.node
            .ok_or_else(|| EngineError::native("render node was not created"))
    }

    /// Assign a material to the mesh entity
    pub fn set_material(&self, engines: &mut Engines, material: &str) -> Result<(), EngineError> {
        engines.render.set_material(self.require_handle()?, material)
    }

    /// Toggle shadow casting
    pub fn set_cast_shadows(&self, engines: &mut Engines, cast: bool) -> Result<(), EngineError> {
        engines.render.set_cast_shadows(self.require_handle()?, cast)
    }

    /// Distance beyond which the entity is culled; 0 means unlimited
    pub fn set_render_distance(
        &self,
        engines: &mut Engines,
        distance: f32,
    ) -> Result<(), EngineError> {
        engines
            .render
            .set_render_distance(self.require_handle()?, distance)
    }

    /// Show or hide the node independently of the enabled state
    pub fn set_visible(&mut self, engines: &mut Engines, visible: bool) -> Result<(), EngineError> {
        engines.render.set_node_visible(self.require_handle()?, visible)?;
        self.visible = visible;
        Ok(())
    }

    /// Apply a relative rotation around an axis
    pub fn rotate(
        &self,
        engines: &mut Engines,
        axis: Vec3,
        radians: f32,
    ) -> Result<(), EngineError> {
        engines.render.rotate_node(self.require_handle()?, axis, radians)
    }

    /// Apply a relative scale factor
    pub fn scale_by(&self, engines: &mut Engines, factor: Vec3) -> Result<(), EngineError> {
        engines.render.scale_node(self.require_handle()?, factor)
    }

    /// Reorient the node toward a world position
    pub fn look_at(&self, engines: &mut Engines, target: Vec3) -> Result<(), EngineError> {
        engines.render.node_look_at(self.require_handle()?, target)
    }
}

impl Component for RenderObjectComponent {
    fn id(&self) -> ComponentId {
        ComponentId::RenderObject
    }

    fn awake(&mut self, config: &ConfigView, engines: &mut Engines) -> Result<(), EngineError> {
        let mesh = config.required_str("mesh")?;
        let name = config.required_str("name")?;
        let handle = engines.render.create_node(name, mesh)?;
        self.node = Some(handle);

        if config.contains("material") {
            engines
                .render
                .set_material(handle, config.required_str("material")?)?;
        }
        self.visible = config.bool_or("visible", true)?;
        engines.render.set_node_visible(handle, self.visible)?;
        engines
            .render
            .set_cast_shadows(handle, config.bool_or("cast_shadows", true)?)?;
        let distance = config.f32_or("render_distance", 0.0)?;
        if distance > 0.0 {
            engines.render.set_render_distance(handle, distance)?;
        }
        Ok(())
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        let Some(placement) = ctx
            .siblings
            .get_as::<TransformComponent>(ComponentId::Transform)
            .map(|tr| (tr.position, tr.rotation, tr.scale))
        else {
            return;
        };
        let Some(handle) = self.node else { return };
        let pushed = ctx
            .engines
            .render
            .set_node_position(handle, placement.0)
            .and_then(|()| ctx.engines.render.set_node_rotation(handle, placement.1))
            .and_then(|()| ctx.engines.render.set_node_scale(handle, placement.2));
        if let Err(e) = pushed {
            log::warn!("`{}`: render node placement push failed: {e}", ctx.owner);
        }
    }

    fn on_enable(&mut self, engines: &mut Engines) {
        let Some(handle) = self.node else { return };
        if self.visible {
            if let Err(e) = engines.render.set_node_visible(handle, true) {
                log::warn!("render node show failed: {e}");
            }
        }
    }

    fn on_disable(&mut self, engines: &mut Engines) {
        let Some(handle) = self.node else { return };
        if let Err(e) = engines.render.set_node_visible(handle, false) {
            log::warn!("render node hide failed: {e}");
        }
    }

    fn teardown(&mut self, engines: &mut Engines) {
        if let Some(handle) = self.node.take() {
            if let Err(e) = engines.render.destroy_node(handle) {
                log::warn!("render node teardown failed: {e}");
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
