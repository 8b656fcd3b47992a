//! Component factory registry
//!
//! One constructor per component kind, registered before any GameObject is
//! built and read-only afterward. Replaces the per-kind factory classes of
//! a classic component hierarchy with a single table of plain function
//! pointers, so lookups are cheap and the table is trivially shareable.

use super::component::{Component, ComponentId};
use crate::components::{
    AudioSourceComponent, CameraComponent, LightComponent, ListenerComponent,
    RenderObjectComponent, RigidBodyComponent, TransformComponent,
};
use crate::error::EngineError;
use std::collections::HashMap;

/// Constructor for a default-constructed component of a fixed kind
pub type ComponentCtor = fn() -> Box<dyn Component>;

/// Registry mapping [`ComponentId`] to its constructor
///
/// Populated at startup; an unregistered kind at creation time is a
/// configuration error, never a silent null.
#[derive(Default)]
pub struct FactoryRegistry {
    ctors: HashMap<ComponentId, ComponentCtor>,
}

impl FactoryRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with every built-in component kind registered
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(ComponentId::Transform, || {
            Box::new(TransformComponent::default())
        });
        registry.register(ComponentId::Camera, || Box::new(CameraComponent::default()));
        registry.register(ComponentId::RigidBody, || {
            Box::new(RigidBodyComponent::default())
        });
        registry.register(ComponentId::Listener, || {
            Box::new(ListenerComponent::default())
        });
        registry.register(ComponentId::AudioSource, || {
            Box::new(AudioSourceComponent::default())
        });
        registry.register(ComponentId::RenderObject, || {
            Box::new(RenderObjectComponent::default())
        });
        registry.register(ComponentId::Light, || Box::new(LightComponent::default()));
        registry
    }

    /// Register a constructor for a kind
    ///
    /// Re-registering a kind replaces the previous constructor; this is
    /// logged because the registry is meant to be populated exactly once.
    pub fn register(&mut self, kind: ComponentId, ctor: ComponentCtor) {
        if self.ctors.insert(kind, ctor).is_some() {
            log::warn!("factory for {kind:?} was replaced");
        }
    }

    /// Whether a constructor is registered for a kind
    pub fn contains(&self, kind: ComponentId) -> bool {
        self.ctors.contains_key(&kind)
    }

    /// Create a new default-constructed component of the given kind
    ///
    /// Ownership transfers to the caller.
    pub fn create(&self, kind: ComponentId) -> Result<Box<dyn Component>, EngineError> {
        let ctor = self
            .ctors
            .get(&kind)
            .ok_or(EngineError::UnregisteredKind(kind))?;
        let component = ctor();
        debug_assert_eq!(component.id(), kind, "factory produced the wrong kind");
        Ok(component)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_factories_produce_matching_kinds() {
        let registry = FactoryRegistry::with_builtin();
        for kind in [
            ComponentId::Transform,
            ComponentId::Camera,
            ComponentId::RigidBody,
            ComponentId::Listener,
            ComponentId::AudioSource,
            ComponentId::RenderObject,
            ComponentId::Light,
        ] {
            let component = registry.create(kind).unwrap();
            assert_eq!(component.id(), kind);
        }
    }

    #[test]
    fn unregistered_kind_is_a_configuration_error() {
        let registry = FactoryRegistry::with_builtin();
        let err = registry.create(ComponentId::Collider).unwrap_err();
        assert!(matches!(
            err,
            EngineError::UnregisteredKind(ComponentId::Collider)
        ));
    }

    #[test]
    fn empty_registry_rejects_everything() {
        let registry = FactoryRegistry::new();
        assert!(!registry.contains(ComponentId::Transform));
        assert!(registry.create(ComponentId::Transform).is_err());
    }
}
