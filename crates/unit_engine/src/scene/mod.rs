//! Scene: GameObject storage and the frame loop
//!
//! A scene owns the engine backends and every live GameObject, keyed by a
//! slotmap handle and dispatched in spawn order. The loop is single-threaded
//! and cooperative; structural mutation of the object set during a frame
//! goes through [`Scene::despawn_deferred`] and is applied once the frame's
//! `late_update` pass finished.

use crate::core::config::ConfigView;
use crate::engines::Engines;
use crate::error::EngineError;
use crate::gameobject::{ComponentId, FactoryRegistry, GameObject};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Stable handle to a GameObject owned by a scene
    pub struct GameObjectKey;
}

/// Container driving the per-frame component dispatch
pub struct Scene {
    engines: Engines,
    registry: FactoryRegistry,
    objects: SlotMap<GameObjectKey, GameObject>,
    // Spawn order; slotmap iteration order is unspecified.
    order: Vec<GameObjectKey>,
    pending_despawn: Vec<GameObjectKey>,
}

impl Scene {
    /// Create a scene over the given backends and component registry
    pub fn new(engines: Engines, registry: FactoryRegistry) -> Self {
        Self {
            engines,
            registry,
            objects: SlotMap::with_key(),
            order: Vec::new(),
            pending_despawn: Vec::new(),
        }
    }

    /// Scene over headless backends with the built-in components registered
    pub fn headless() -> Self {
        Self::new(Engines::headless(), FactoryRegistry::with_builtin())
    }

    /// The wrapped engine backends
    pub fn engines(&self) -> &Engines {
        &self.engines
    }

    /// Mutable access to the backends, for host-side forwarding calls
    pub fn engines_mut(&mut self) -> &mut Engines {
        &mut self.engines
    }

    /// Number of live GameObjects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the scene holds no GameObjects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Create an empty GameObject and return its handle
    pub fn spawn(&mut self, name: impl Into<String>) -> GameObjectKey {
        let name = name.into();
        log::debug!("spawning `{name}`");
        let key = self.objects.insert(GameObject::new(name));
        self.order.push(key);
        key
    }

    /// Look up a GameObject
    pub fn get(&self, key: GameObjectKey) -> Option<&GameObject> {
        self.objects.get(key)
    }

    /// Mutable lookup of a GameObject
    pub fn get_mut(&mut self, key: GameObjectKey) -> Option<&mut GameObject> {
        self.objects.get_mut(key)
    }

    /// Add a component to a spawned GameObject
    ///
    /// The component is constructed through the scene's registry and awoken
    /// against the backends; it starts on the next [`Scene::frame`].
    pub fn add_component(
        &mut self,
        key: GameObjectKey,
        kind: ComponentId,
        config: &ConfigView,
    ) -> Result<(), EngineError> {
        let object = self
            .objects
            .get_mut(key)
            .ok_or_else(|| EngineError::native("unknown GameObject key"))?;
        object.add_component(&self.registry, kind, config, &mut self.engines)
    }

    /// Destroy a GameObject immediately, returning whether it existed
    ///
    /// Never call this while a frame is in flight for the same scene; use
    /// [`Scene::despawn_deferred`] from frame-driven code instead.
    pub fn despawn(&mut self, key: GameObjectKey) -> bool {
        let Some(mut object) = self.objects.remove(key) else {
            return false;
        };
        object.destroy(&mut self.engines);
        self.order.retain(|k| *k != key);
        true
    }

    /// Queue a despawn to run after the current frame's `late_update` pass
    ///
    /// Queueing the same key twice, or a key that is gone by end of frame,
    /// is harmless.
    pub fn despawn_deferred(&mut self, key: GameObjectKey) {
        self.pending_despawn.push(key);
    }

    /// Advance the scene by one frame
    ///
    /// Pass order: pending `start`s (objects spawned or populated since the
    /// last frame), then `update` for every object, then `late_update` for
    /// every object, then deferred despawns. Each pass visits objects in
    /// spawn order.
    pub fn frame(&mut self, dt: f32) {
        for key in &self.order {
            if let Some(object) = self.objects.get_mut(*key) {
                object.start_pending(&mut self.engines);
            }
        }
        for key in &self.order {
            if let Some(object) = self.objects.get_mut(*key) {
                object.update(dt, &mut self.engines);
            }
        }
        for key in &self.order {
            if let Some(object) = self.objects.get_mut(*key) {
                object.late_update(dt, &mut self.engines);
            }
        }
        self.flush_despawns();
    }

    fn flush_despawns(&mut self) {
        while let Some(key) = self.pending_despawn.pop() {
            if self.despawn(key) {
                log::debug!("applied deferred despawn");
            }
        }
    }
}

impl Drop for Scene {
    fn drop(&mut self) {
        for (_, object) in &mut self.objects {
            object.destroy(&mut self.engines);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioBackend, HeadlessAudio};
    use crate::components::{RigidBodyComponent, TransformComponent};
    use crate::foundation::math::Vec3;
    use crate::gameobject::ComponentState;
    use crate::physics::{HeadlessPhysics, PhysicsBackend};

    fn listener_object(scene: &mut Scene, position: Vec3) -> GameObjectKey {
        let key = scene.spawn("listener_rig");
        scene
            .add_component(
                key,
                ComponentId::Transform,
                &ConfigView::new().with("position", position),
            )
            .unwrap();
        scene
            .add_component(key, ComponentId::Listener, &ConfigView::new())
            .unwrap();
        key
    }

    #[test]
    fn components_start_on_first_frame() {
        let mut scene = Scene::headless();
        let key = listener_object(&mut scene, Vec3::zeros());
        assert_eq!(
            scene.get(key).unwrap().state(ComponentId::Listener),
            Some(ComponentState::Awake)
        );

        scene.frame(0.016);
        assert_eq!(
            scene.get(key).unwrap().state(ComponentId::Listener),
            Some(ComponentState::Enabled)
        );
    }

    #[test]
    fn component_added_to_live_object_starts_next_frame() {
        let mut scene = Scene::headless();
        let key = scene.spawn("late_bloomer");
        scene.frame(0.016);

        scene
            .add_component(key, ComponentId::Transform, &ConfigView::new())
            .unwrap();
        scene.frame(0.016);
        assert_eq!(
            scene.get(key).unwrap().state(ComponentId::Transform),
            Some(ComponentState::Enabled)
        );
    }

    #[test]
    fn deferred_despawn_runs_the_full_frame_first() {
        let mut scene = Scene::headless();
        let key = listener_object(&mut scene, Vec3::new(0.0, 2.0, 0.0));
        scene.frame(0.016);

        scene.despawn_deferred(key);
        scene.frame(0.016);

        // The object is gone, but its listener still pushed attributes
        // during the frame the despawn was queued in.
        assert!(scene.get(key).is_none());
        assert!(scene.is_empty());
        let audio: &HeadlessAudio = scene.engines().audio.as_any().downcast_ref().unwrap();
        assert_eq!(audio.listener(0).unwrap().position, Vec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn despawn_tears_native_state_down() {
        let mut scene = Scene::headless();
        let key = scene.spawn("crate");
        scene
            .add_component(key, ComponentId::RigidBody, &ConfigView::new())
            .unwrap();
        scene.frame(0.016);

        let handle = scene
            .get(key)
            .unwrap()
            .component_as::<RigidBodyComponent>(ComponentId::RigidBody)
            .unwrap()
            .handle()
            .unwrap();
        assert!(scene.despawn(key));

        let physics: &HeadlessPhysics =
            scene.engines().physics.as_any().downcast_ref().unwrap();
        assert!(physics.body(handle).is_none());
    }

    #[test]
    fn despawn_of_unknown_key_is_false_and_deferred_duplicate_is_harmless() {
        let mut scene = Scene::headless();
        let key = scene.spawn("ghost");
        scene.despawn_deferred(key);
        scene.despawn_deferred(key);
        scene.frame(0.016);

        assert!(scene.is_empty());
        assert!(!scene.despawn(key));
    }

    #[test]
    fn objects_update_in_spawn_order() {
        let mut scene = Scene::headless();
        // Two listener rigs sharing index 0; the later spawn wins the frame.
        let _first = listener_object(&mut scene, Vec3::new(1.0, 0.0, 0.0));
        let second = listener_object(&mut scene, Vec3::new(2.0, 0.0, 0.0));
        scene.frame(0.016);

        let audio: &HeadlessAudio = scene.engines().audio.as_any().downcast_ref().unwrap();
        assert_eq!(audio.listener(0).unwrap().position, Vec3::new(2.0, 0.0, 0.0));

        // Despawning the later rig hands the slot back to the earlier one.
        scene.despawn(second);
        scene.frame(0.016);
        let audio: &HeadlessAudio = scene.engines().audio.as_any().downcast_ref().unwrap();
        assert_eq!(audio.listener(0).unwrap().position, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn transform_moved_by_host_reaches_siblings_same_frame() {
        let mut scene = Scene::headless();
        let key = listener_object(&mut scene, Vec3::zeros());
        scene.frame(0.016);

        scene
            .get_mut(key)
            .unwrap()
            .component_mut_as::<TransformComponent>(ComponentId::Transform)
            .unwrap()
            .translate(Vec3::new(0.0, 0.0, -5.0));
        scene.frame(0.016);

        let audio: &HeadlessAudio = scene.engines().audio.as_any().downcast_ref().unwrap();
        assert_eq!(audio.listener(0).unwrap().position, Vec3::new(0.0, 0.0, -5.0));
    }
}
