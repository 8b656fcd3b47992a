//! Component contract: identity, lifecycle hooks and sibling access

use super::game_object::Slot;
use crate::core::config::ConfigView;
use crate::engines::Engines;
use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Enumerated tag identifying a component's kind
///
/// Each GameObject holds at most one component per kind; the tag is the
/// directory key and the factory-registry key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentId {
    /// Spatial transform data
    Transform,
    /// Render camera wrapper
    Camera,
    /// Physics rigid body wrapper
    RigidBody,
    /// Physics trigger/collider wrapper
    Collider,
    /// Audio 3D listener wrapper
    Listener,
    /// Audio source wrapper
    AudioSource,
    /// 2D image overlay wrapper
    ImageRender,
    /// Scene node + entity wrapper
    RenderObject,
    /// Render light wrapper
    Light,
}

/// Lifecycle state of a component slot
///
/// `Constructed → Awake → Started → {Enabled ⇄ Disabled} → Destroyed`.
/// `update`/`late_update` run only while `Enabled`; `Destroyed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentState {
    /// Created by the factory, `awake` not yet run
    Constructed,
    /// `awake` completed, waiting for `start`
    Awake,
    /// `start` completed (transient; slots move straight to `Enabled`)
    Started,
    /// Receiving per-frame dispatch
    Enabled,
    /// Excluded from per-frame dispatch, native effect detached
    Disabled,
    /// Torn down; the slot is about to be dropped
    Destroyed,
}

impl ComponentState {
    /// Whether per-frame hooks run in this state
    pub fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }
}

/// Read-only view of the sibling components of the one being dispatched
///
/// Obtained fresh on every dispatch; sibling references must never be cached
/// across frames, because a sibling may be removed or replaced at any time.
pub struct SiblingView<'a> {
    slots: &'a [Slot],
}

impl<'a> SiblingView<'a> {
    pub(super) fn new(slots: &'a [Slot]) -> Self {
        Self { slots }
    }

    /// Look up a sibling by kind
    ///
    /// Returns `None` when absent, or when `kind` names the component
    /// currently being dispatched (a component is not its own sibling).
    pub fn get(&self, kind: ComponentId) -> Option<&dyn Component> {
        self.slots
            .iter()
            .find(|slot| slot.kind == kind)
            .and_then(|slot| slot.component.as_deref())
    }

    /// Look up a sibling by kind and downcast it to a concrete type
    pub fn get_as<T: Component>(&self, kind: ComponentId) -> Option<&T> {
        self.get(kind).and_then(|c| c.as_any().downcast_ref())
    }

    /// Whether a sibling of this kind exists
    pub fn contains(&self, kind: ComponentId) -> bool {
        self.get(kind).is_some()
    }
}

/// Per-dispatch context handed to lifecycle hooks
pub struct UpdateContext<'a> {
    /// Siblings of the component being dispatched
    pub siblings: SiblingView<'a>,
    /// The wrapped native subsystems
    pub engines: &'a mut Engines,
    /// Seconds since the previous frame (0 during `start`)
    pub dt: f32,
    /// Name of the owning GameObject, for diagnostics
    pub owner: &'a str,
}

/// A behavior/data unit attached to a GameObject
///
/// Concrete components wrap exactly one native-engine object and forward
/// mutators and queries to it. All hooks except [`Component::id`] have
/// default no-op implementations; implement only what the kind needs.
///
/// Sibling lookups must not happen before `start`: at `awake` time the rest
/// of the directory may not exist yet.
pub trait Component: Any + std::fmt::Debug {
    /// The kind tag this component was declared with
    fn id(&self) -> ComponentId;

    /// One-time initialization from a configuration record
    ///
    /// Validates required fields and creates the wrapped native object.
    /// Optional fields fall back to their documented defaults.
    fn awake(&mut self, config: &ConfigView, engines: &mut Engines) -> Result<(), EngineError> {
        let _ = (config, engines);
        Ok(())
    }

    /// Called exactly once after every component on the GameObject exists
    ///
    /// The place to resolve cross-component references. A reported error
    /// disables the component instead of crashing the frame loop.
    fn start(&mut self, ctx: &mut UpdateContext<'_>) -> Result<(), EngineError> {
        let _ = ctx;
        Ok(())
    }

    /// Called once per frame while enabled
    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        let _ = ctx;
    }

    /// Called once per frame after every component's `update` has completed
    fn late_update(&mut self, ctx: &mut UpdateContext<'_>) {
        let _ = ctx;
    }

    /// Attach the component's effect on the wrapped subsystem
    fn on_enable(&mut self, engines: &mut Engines) {
        let _ = engines;
    }

    /// Detach the component's effect without destroying the component
    fn on_disable(&mut self, engines: &mut Engines) {
        let _ = engines;
    }

    /// Release the wrapped native object
    ///
    /// Invoked exactly once, on removal or GameObject destruction.
    /// Implementations guard their handle with `Option::take` so a stray
    /// second call cannot double-free.
    fn teardown(&mut self, engines: &mut Engines) {
        let _ = engines;
    }

    /// Upcast for sibling downcasting
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for sibling downcasting
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
