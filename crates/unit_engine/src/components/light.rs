//! Light component
//!
//! Wraps one native light. Positional kinds (point and spot) follow the
//! Transform sibling every frame; directional lights only carry a direction
//! and ignore the transform position.

use crate::components::TransformComponent;
use crate::core::config::ConfigView;
use crate::engines::Engines;
use crate::error::EngineError;
use crate::foundation::math::Vec3;
use crate::gameobject::{Component, ComponentId, UpdateContext};
use crate::render::{LightHandle, LightKind, RenderBackend};
use std::any::Any;

/// Light wrapper
///
/// Config fields: `kind` ("point", "directional" or "spot", default
/// "point"), `color` `[r, g, b]` (white), `intensity` (1.0), `direction`
/// `[x, y, z]` (straight down; directional and spot kinds only).
#[derive(Debug, Default)]
pub struct LightComponent {
    light: Option<LightHandle>,
    kind: LightKind,
}

impl LightComponent {
    /// Handle of the wrapped light, if created
    pub fn handle(&self) -> Option<LightHandle> {
        self.light
    }

    /// Light kind chosen at awake
    pub fn kind(&self) -> LightKind {
        self.kind
    }

    fn require_handle(&self) -> Result<LightHandle, EngineError> {
        self.light
            .ok_or_else(|| EngineError::native("light was not created"))
    }

    /// Set the light color
    pub fn set_color(&self, engines: &mut Engines, color: Vec3) -> Result<(), EngineError> {
        engines.render.set_light_color(self.require_handle()?, color)
    }

    /// Set the light intensity
    pub fn set_intensity(&self, engines: &mut Engines, intensity: f32) -> Result<(), EngineError> {
        engines
            .render
            .set_light_intensity(self.require_handle()?, intensity)
    }

    /// Set the light direction; rejected for point lights
    pub fn set_direction(&self, engines: &mut Engines, direction: Vec3) -> Result<(), EngineError> {
        engines
            .render
            .set_light_direction(self.require_handle()?, direction)
    }
}

impl Component for LightComponent {
    fn id(&self) -> ComponentId {
        ComponentId::Light
    }

    fn awake(&mut self, config: &ConfigView, engines: &mut Engines) -> Result<(), EngineError> {
        self.kind = match config.str_or("kind", "point")? {
            "point" => LightKind::Point,
            "directional" => LightKind::Directional,
            "spot" => LightKind::Spot,
            _ => {
                return Err(EngineError::InvalidField {
                    field: "kind".to_string(),
                    expected: "one of \"point\", \"directional\", \"spot\"",
                })
            }
        };

        let color = config.vec3_or("color", Vec3::new(1.0, 1.0, 1.0))?;
        let intensity = config.f32_or("intensity", 1.0)?;
        let handle = engines.render.create_light(self.kind, color, intensity)?;
        self.light = Some(handle);

        if self.kind != LightKind::Point {
            let direction = config.vec3_or("direction", Vec3::new(0.0, -1.0, 0.0))?;
            engines.render.set_light_direction(handle, direction)?;
        }
        Ok(())
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        // Directional lights have no position to follow.
        if self.kind == LightKind::Directional {
            return;
        }
        let Some(tr) = ctx.siblings.get_as::<TransformComponent>(ComponentId::Transform) else {
            return;
        };
        let Some(handle) = self.light else { return };
        if let Err(e) = ctx.engines.render.set_light_position(handle, tr.position) {
            log::warn!("`{}`: light position push failed: {e}", ctx.owner);
        }
    }

    fn teardown(&mut self, engines: &mut Engines) {
        if let Some(handle) = self.light.take() {
            if let Err(e) = engines.render.destroy_light(handle) {
                log::warn!("light teardown failed: {e}");
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameobject::{FactoryRegistry, GameObject};
    use crate::render::HeadlessRender;

    fn render_of(engines: &Engines) -> &HeadlessRender {
        engines.render.as_any().downcast_ref().unwrap()
    }

    #[test]
    fn awake_defaults_to_white_point_light() {
        let mut engines = Engines::headless();
        let mut light = LightComponent::default();
        light.awake(&ConfigView::new(), &mut engines).unwrap();

        assert_eq!(light.kind(), LightKind::Point);
        let state = render_of(&engines).light(light.handle().unwrap()).unwrap();
        assert_eq!(state.color, Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(state.intensity, 1.0);
    }

    #[test]
    fn unknown_kind_is_invalid_field() {
        let mut engines = Engines::headless();
        let err = LightComponent::default()
            .awake(&ConfigView::new().with("kind", "area"), &mut engines)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidField { ref field, .. } if field == "kind"));
    }

    #[test]
    fn directional_light_gets_normalized_direction() {
        let mut engines = Engines::headless();
        let mut light = LightComponent::default();
        let config = ConfigView::new()
            .with("kind", "directional")
            .with("direction", Vec3::new(0.0, -2.0, 0.0));
        light.awake(&config, &mut engines).unwrap();

        let state = render_of(&engines).light(light.handle().unwrap()).unwrap();
        assert_eq!(state.direction, Vec3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn point_light_follows_transform() {
        let mut engines = Engines::headless();
        let registry = FactoryRegistry::with_builtin();
        let mut go = GameObject::new("lamp");
        go.add_component(
            &registry,
            ComponentId::Transform,
            &ConfigView::new().with("position", Vec3::new(0.0, 4.0, 0.0)),
            &mut engines,
        )
        .unwrap();
        go.add_component(&registry, ComponentId::Light, &ConfigView::new(), &mut engines)
            .unwrap();
        go.start_pending(&mut engines);
        go.update(0.016, &mut engines);

        let handle = go
            .component_as::<LightComponent>(ComponentId::Light)
            .unwrap()
            .handle()
            .unwrap();
        assert_eq!(
            render_of(&engines).light(handle).unwrap().position,
            Vec3::new(0.0, 4.0, 0.0)
        );
    }

    #[test]
    fn directional_light_ignores_transform() {
        let mut engines = Engines::headless();
        let registry = FactoryRegistry::with_builtin();
        let mut go = GameObject::new("sun");
        go.add_component(
            &registry,
            ComponentId::Transform,
            &ConfigView::new().with("position", Vec3::new(100.0, 100.0, 0.0)),
            &mut engines,
        )
        .unwrap();
        go.add_component(
            &registry,
            ComponentId::Light,
            &ConfigView::new().with("kind", "directional"),
            &mut engines,
        )
        .unwrap();
        go.start_pending(&mut engines);
        go.update(0.016, &mut engines);

        let handle = go
            .component_as::<LightComponent>(ComponentId::Light)
            .unwrap()
            .handle()
            .unwrap();
        assert_eq!(render_of(&engines).light(handle).unwrap().position, Vec3::zeros());
    }
}
