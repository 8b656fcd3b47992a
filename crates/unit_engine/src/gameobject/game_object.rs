//! GameObject: aggregate root owning a directory of components

use super::component::{Component, ComponentId, ComponentState, SiblingView, UpdateContext};
use super::factory::FactoryRegistry;
use crate::core::config::ConfigView;
use crate::engines::Engines;
use crate::error::EngineError;

/// One entry in the component directory
///
/// The component box is `Option` only so dispatch can temporarily take it
/// out while handing the rest of the directory to the hook as a
/// [`SiblingView`]; outside dispatch it is always `Some`.
pub(crate) struct Slot {
    pub(crate) kind: ComponentId,
    pub(crate) state: ComponentState,
    pub(crate) component: Option<Box<dyn Component>>,
}

/// Aggregate entity owning at most one component per kind
///
/// Components are dispatched in registration order. Structural mutation
/// (add/remove) is impossible from inside a hook because dispatch borrows
/// the whole object; the host loop defers such changes to end-of-frame.
pub struct GameObject {
    name: String,
    slots: Vec<Slot>,
}

impl GameObject {
    /// Create an empty GameObject
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slots: Vec::new(),
        }
    }

    /// The GameObject's name, used in diagnostics
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of owned components
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the directory is empty
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether a component of this kind exists
    pub fn has(&self, kind: ComponentId) -> bool {
        self.slots.iter().any(|slot| slot.kind == kind)
    }

    /// Lifecycle state of a component, if present
    pub fn state(&self, kind: ComponentId) -> Option<ComponentState> {
        self.slots
            .iter()
            .find(|slot| slot.kind == kind)
            .map(|slot| slot.state)
    }

    /// Construct a component via the registry, `awake` it and insert it
    ///
    /// Fails without modifying the directory when a component of this kind
    /// already exists, when no factory is registered for the kind, or when
    /// `awake` rejects the configuration record.
    pub fn add_component(
        &mut self,
        registry: &FactoryRegistry,
        kind: ComponentId,
        config: &ConfigView,
        engines: &mut Engines,
    ) -> Result<(), EngineError> {
        if self.has(kind) {
            return Err(EngineError::DuplicateComponent {
                owner: self.name.clone(),
                kind,
            });
        }
        let mut component = registry.create(kind)?;
        component.awake(config, engines)?;
        self.slots.push(Slot {
            kind,
            state: ComponentState::Awake,
            component: Some(component),
        });
        log::debug!("`{}`: added {kind:?} component", self.name);
        Ok(())
    }

    /// Look up an owned component by kind
    pub fn component(&self, kind: ComponentId) -> Option<&dyn Component> {
        self.slots
            .iter()
            .find(|slot| slot.kind == kind)
            .and_then(|slot| slot.component.as_deref())
    }

    /// Look up an owned component by kind and downcast it
    pub fn component_as<T: Component>(&self, kind: ComponentId) -> Option<&T> {
        self.component(kind).and_then(|c| c.as_any().downcast_ref())
    }

    /// Mutable typed lookup, for host-side forwarding calls
    pub fn component_mut_as<T: Component>(&mut self, kind: ComponentId) -> Option<&mut T> {
        self.slots
            .iter_mut()
            .find(|slot| slot.kind == kind)
            .and_then(|slot| slot.component.as_deref_mut())
            .and_then(|c| c.as_any_mut().downcast_mut())
    }

    /// Detach and destroy a component, returning whether one was removed
    ///
    /// An enabled component is disabled first, then torn down exactly once.
    pub fn remove_component(&mut self, kind: ComponentId, engines: &mut Engines) -> bool {
        let Some(idx) = self.slots.iter().position(|slot| slot.kind == kind) else {
            return false;
        };
        let mut slot = self.slots.remove(idx);
        if let Some(component) = slot.component.as_mut() {
            if slot.state.is_enabled() {
                component.on_disable(engines);
            }
            component.teardown(engines);
        }
        slot.state = ComponentState::Destroyed;
        log::debug!("`{}`: removed {kind:?} component", self.name);
        true
    }

    /// Run `start` on every component still waiting for it
    ///
    /// Called by the scene once after population and again each frame so
    /// components added to a live object get started too. A component whose
    /// `start` reports an error is disabled instead of dispatched.
    pub fn start_pending(&mut self, engines: &mut Engines) {
        for idx in 0..self.slots.len() {
            if self.slots[idx].state != ComponentState::Awake {
                continue;
            }
            self.slots[idx].state = ComponentState::Started;
            let started = self.dispatch(idx, engines, 0.0, |component, ctx| component.start(ctx));
            match started {
                Some(Ok(())) => {
                    if let Some(component) = self.slots[idx].component.as_mut() {
                        component.on_enable(engines);
                    }
                    self.slots[idx].state = ComponentState::Enabled;
                }
                Some(Err(e)) => {
                    log::error!(
                        "`{}`: {:?} component failed to start, disabling it: {e}",
                        self.name,
                        self.slots[idx].kind
                    );
                    self.slots[idx].state = ComponentState::Disabled;
                }
                None => {}
            }
        }
    }

    /// Dispatch `update` to every enabled component in registration order
    pub fn update(&mut self, dt: f32, engines: &mut Engines) {
        for idx in 0..self.slots.len() {
            if self.slots[idx].state.is_enabled() {
                self.dispatch(idx, engines, dt, |component, ctx| component.update(ctx));
            }
        }
    }

    /// Dispatch `late_update` after all `update`s of the frame completed
    pub fn late_update(&mut self, dt: f32, engines: &mut Engines) {
        for idx in 0..self.slots.len() {
            if self.slots[idx].state.is_enabled() {
                self.dispatch(idx, engines, dt, |component, ctx| {
                    component.late_update(ctx);
                });
            }
        }
    }

    /// Toggle a started component between enabled and disabled
    ///
    /// Returns whether a transition happened; toggling to the current state
    /// is a no-op, so the underlying attach/detach runs at most once per
    /// transition.
    pub fn set_enabled(&mut self, kind: ComponentId, enabled: bool, engines: &mut Engines) -> bool {
        let Some(slot) = self.slots.iter_mut().find(|slot| slot.kind == kind) else {
            return false;
        };
        let Some(component) = slot.component.as_mut() else {
            return false;
        };
        match (slot.state, enabled) {
            (ComponentState::Enabled, false) => {
                component.on_disable(engines);
                slot.state = ComponentState::Disabled;
                true
            }
            (ComponentState::Disabled, true) => {
                component.on_enable(engines);
                slot.state = ComponentState::Enabled;
                true
            }
            _ => false,
        }
    }

    /// Tear down every component and empty the directory
    pub fn destroy(&mut self, engines: &mut Engines) {
        for slot in &mut self.slots {
            if let Some(component) = slot.component.as_mut() {
                if slot.state.is_enabled() {
                    component.on_disable(engines);
                }
                component.teardown(engines);
            }
            slot.state = ComponentState::Destroyed;
        }
        self.slots.clear();
        log::debug!("`{}`: destroyed", self.name);
    }

    /// Take the component out of its slot, run a hook with a sibling view
    /// over the rest of the directory, and put it back.
    fn dispatch<R>(
        &mut self,
        idx: usize,
        engines: &mut Engines,
        dt: f32,
        hook: impl FnOnce(&mut dyn Component, &mut UpdateContext<'_>) -> R,
    ) -> Option<R> {
        let mut component = self.slots[idx].component.take()?;
        let result = {
            let mut ctx = UpdateContext {
                siblings: SiblingView::new(&self.slots),
                engines,
                dt,
                owner: &self.name,
            };
            hook(component.as_mut(), &mut ctx)
        };
        self.slots[idx].component = Some(component);
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::TransformComponent;
    use crate::foundation::math::Vec3;
    use crate::render::RenderBackend;

    fn setup() -> (GameObject, FactoryRegistry, Engines) {
        (
            GameObject::new("test_object"),
            FactoryRegistry::with_builtin(),
            Engines::headless(),
        )
    }

    #[test]
    fn duplicate_add_fails_and_directory_is_unchanged() {
        let (mut go, registry, mut engines) = setup();
        let config = ConfigView::new();

        go.add_component(&registry, ComponentId::Transform, &config, &mut engines)
            .unwrap();
        let err = go
            .add_component(&registry, ComponentId::Transform, &config, &mut engines)
            .unwrap_err();

        assert!(matches!(err, EngineError::DuplicateComponent { .. }));
        assert_eq!(go.len(), 1);
    }

    #[test]
    fn unregistered_kind_adds_nothing() {
        let (mut go, registry, mut engines) = setup();
        let err = go
            .add_component(&registry, ComponentId::Collider, &ConfigView::new(), &mut engines)
            .unwrap_err();

        assert!(matches!(err, EngineError::UnregisteredKind(_)));
        assert_eq!(go.len(), 0);
    }

    #[test]
    fn failed_awake_adds_nothing() {
        let (mut go, registry, mut engines) = setup();
        // RenderObject requires a mesh field.
        let err = go
            .add_component(
                &registry,
                ComponentId::RenderObject,
                &ConfigView::new(),
                &mut engines,
            )
            .unwrap_err();

        assert!(matches!(err, EngineError::MissingField { .. }));
        assert!(!go.has(ComponentId::RenderObject));
    }

    #[test]
    fn absent_component_lookup_is_none() {
        let (go, _registry, _engines) = setup();
        assert!(go.component(ComponentId::Transform).is_none());
        assert!(go.component_as::<TransformComponent>(ComponentId::Transform).is_none());
    }

    #[test]
    fn camera_without_transform_is_disabled_at_start_without_crashing() {
        let (mut go, registry, mut engines) = setup();
        go.add_component(&registry, ComponentId::Camera, &ConfigView::new(), &mut engines)
            .unwrap();

        go.start_pending(&mut engines);
        assert_eq!(go.state(ComponentId::Camera), Some(ComponentState::Disabled));

        // A frame still runs; the disabled camera is skipped.
        go.update(0.016, &mut engines);
        go.late_update(0.016, &mut engines);
    }

    #[test]
    fn camera_resolves_transform_sibling_and_tracks_its_position() {
        let (mut go, registry, mut engines) = setup();
        let position = Vec3::new(3.0, 1.0, -2.0);
        go.add_component(
            &registry,
            ComponentId::Transform,
            &ConfigView::new().with("position", position),
            &mut engines,
        )
        .unwrap();
        go.add_component(&registry, ComponentId::Camera, &ConfigView::new(), &mut engines)
            .unwrap();

        go.start_pending(&mut engines);
        assert_eq!(go.state(ComponentId::Camera), Some(ComponentState::Enabled));

        go.update(0.016, &mut engines);
        go.late_update(0.016, &mut engines);

        let camera = go
            .component_as::<crate::components::CameraComponent>(ComponentId::Camera)
            .unwrap();
        let handle = camera.handle().unwrap();
        let render = engines
            .render
            .as_any()
            .downcast_ref::<crate::render::HeadlessRender>()
            .unwrap();
        assert_eq!(render.camera(handle).unwrap().position, position);
    }

    #[test]
    fn enable_disable_toggling_is_idempotent() {
        let (mut go, registry, mut engines) = setup();
        go.add_component(&registry, ComponentId::Transform, &ConfigView::new(), &mut engines)
            .unwrap();
        go.start_pending(&mut engines);

        assert!(go.set_enabled(ComponentId::Transform, false, &mut engines));
        assert!(!go.set_enabled(ComponentId::Transform, false, &mut engines));
        assert_eq!(
            go.state(ComponentId::Transform),
            Some(ComponentState::Disabled)
        );

        assert!(go.set_enabled(ComponentId::Transform, true, &mut engines));
        assert!(!go.set_enabled(ComponentId::Transform, true, &mut engines));
        assert_eq!(
            go.state(ComponentId::Transform),
            Some(ComponentState::Enabled)
        );
    }

    #[test]
    fn remove_component_reports_absence() {
        let (mut go, registry, mut engines) = setup();
        go.add_component(&registry, ComponentId::Transform, &ConfigView::new(), &mut engines)
            .unwrap();

        assert!(go.remove_component(ComponentId::Transform, &mut engines));
        assert!(!go.remove_component(ComponentId::Transform, &mut engines));
        assert!(go.is_empty());
    }
}
