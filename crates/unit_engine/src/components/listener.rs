//! Audio listener component
//!
//! Pushes the Transform sibling's placement to the native audio listener
//! every frame. Velocity is derived from consecutive positions so doppler
//! works without the audio engine knowing about the physics step.

use crate::audio::{AudioBackend, ListenerAttributes};
use crate::components::TransformComponent;
use crate::core::config::ConfigView;
use crate::engines::Engines;
use crate::error::EngineError;
use crate::foundation::math::Vec3;
use crate::gameobject::{Component, ComponentId, UpdateContext};
use std::any::Any;

/// Audio listener wrapper
///
/// Config fields: `listener_index` (0). Hosts driving several listeners
/// (split screen) give each listener component a distinct index.
#[derive(Debug, Default)]
pub struct ListenerComponent {
    index: usize,
    last_position: Option<Vec3>,
}

impl ListenerComponent {
    /// Listener slot this component drives
    pub fn index(&self) -> usize {
        self.index
    }
}

impl Component for ListenerComponent {
    fn id(&self) -> ComponentId {
        ComponentId::Listener
    }

    fn awake(&mut self, config: &ConfigView, _engines: &mut Engines) -> Result<(), EngineError> {
        self.index = config.u32_or("listener_index", 0)? as usize;
        Ok(())
    }

    fn start(&mut self, ctx: &mut UpdateContext<'_>) -> Result<(), EngineError> {
        if !ctx.siblings.contains(ComponentId::Transform) {
            return Err(EngineError::MissingSibling {
                owner: ctx.owner.to_string(),
                kind: ComponentId::Transform,
            });
        }
        Ok(())
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        let Some(tr) = ctx.siblings.get_as::<TransformComponent>(ComponentId::Transform) else {
            return;
        };

        // First frame has no previous sample; report zero velocity rather
        // than a spike from the spawn position.
        let velocity = match self.last_position {
            Some(last) if ctx.dt > 0.0 => (tr.position - last) / ctx.dt,
            _ => Vec3::zeros(),
        };
        self.last_position = Some(tr.position);

        let attributes = ListenerAttributes {
            position: tr.position,
            velocity,
            forward: tr.forward(),
            up: tr.up(),
        };
        if let Err(e) = ctx
            .engines
            .audio
            .set_listener_attributes(self.index, &attributes)
        {
            log::warn!("`{}`: listener attribute push failed: {e}", ctx.owner);
        }
    }

    fn on_disable(&mut self, _engines: &mut Engines) {
        // Drop the velocity sample so re-enabling does not read a stale
        // position from before the gap.
        self.last_position = None;
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
    use crate::audio::HeadlessAudio;
    use crate::gameobject::{FactoryRegistry, GameObject};
    use approx::assert_relative_eq;

    fn audio_of(engines: &Engines) -> &HeadlessAudio {
        engines.audio.as_any().downcast_ref().unwrap()
    }

    fn listener_rig(engines: &mut Engines) -> GameObject {
        let registry = FactoryRegistry::with_builtin();
        let mut go = GameObject::new("listener_rig");
        go.add_component(
            &registry,
            ComponentId::Transform,
            &ConfigView::new().with("position", Vec3::new(0.0, 1.0, 0.0)),
            engines,
        )
        .unwrap();
        go.add_component(&registry, ComponentId::Listener, &ConfigView::new(), engines)
            .unwrap();
        go.start_pending(engines);
        go
    }

    #[test]
    fn update_pushes_transform_placement() {
        let mut engines = Engines::headless();
        let mut go = listener_rig(&mut engines);
        go.update(0.016, &mut engines);

        let attrs = audio_of(&engines).listener(0).unwrap();
        assert_eq!(attrs.position, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(attrs.forward, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(attrs.up, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn first_frame_velocity_is_zero_then_derived() {
        let mut engines = Engines::headless();
        let mut go = listener_rig(&mut engines);

        go.update(0.5, &mut engines);
        assert_eq!(audio_of(&engines).listener(0).unwrap().velocity, Vec3::zeros());

        go.component_mut_as::<TransformComponent>(ComponentId::Transform)
            .unwrap()
            .translate(Vec3::new(1.0, 0.0, 0.0));
        go.update(0.5, &mut engines);
        assert_relative_eq!(
            audio_of(&engines).listener(0).unwrap().velocity,
            Vec3::new(2.0, 0.0, 0.0),
            epsilon = 1e-5
        );
    }

    #[test]
    fn reenable_after_a_move_does_not_spike_velocity() {
        let mut engines = Engines::headless();
        let mut go = listener_rig(&mut engines);
        go.update(0.5, &mut engines);

        // Teleport while the listener is off; the stale sample must not
        // survive the gap.
        go.set_enabled(ComponentId::Listener, false, &mut engines);
        go.component_mut_as::<TransformComponent>(ComponentId::Transform)
            .unwrap()
            .translate(Vec3::new(10.0, 0.0, 0.0));
        go.update(0.5, &mut engines);
        go.set_enabled(ComponentId::Listener, true, &mut engines);
        go.update(0.5, &mut engines);

        let attrs = audio_of(&engines).listener(0).unwrap();
        assert_eq!(attrs.position, Vec3::new(10.0, 1.0, 0.0));
        assert_eq!(attrs.velocity, Vec3::zeros());
    }

    #[test]
    fn start_without_transform_reports_missing_sibling() {
        let mut engines = Engines::headless();
        let registry = FactoryRegistry::with_builtin();
        let mut go = GameObject::new("bare");
        go.add_component(&registry, ComponentId::Listener, &ConfigView::new(), &mut engines)
            .unwrap();
        go.start_pending(&mut engines);

        // The failed start leaves the component disabled, not crashed.
        assert!(!go.state(ComponentId::Listener).unwrap().is_enabled());
    }
}
