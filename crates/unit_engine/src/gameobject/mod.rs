//! GameObject/Component architecture
//!
//! A [`GameObject`] owns a directory of heterogeneous [`Component`]s, at
//! most one per [`ComponentId`], and drives their lifecycle: `awake` on add,
//! `start` once the object is populated, `update`/`late_update` every frame
//! while enabled, `on_enable`/`on_disable` on state toggles, and a single
//! `teardown` on destruction. Factories for each kind live in a
//! [`FactoryRegistry`] populated at startup.

pub mod component;
pub mod factory;
pub mod game_object;

pub use component::{Component, ComponentId, ComponentState, SiblingView, UpdateContext};
pub use factory::{ComponentCtor, FactoryRegistry};
pub use game_object::GameObject;
