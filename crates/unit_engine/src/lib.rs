//! # Unit Engine
//!
//! A GameObject/Component layer over wrapped native subsystems (physics,
//! audio, rendering), each behind a backend trait with a shipped headless
//! implementation.
//!
//! ## Features
//!
//! - **Component Lifecycle**: awake, start, update, lateUpdate and
//!   enable/disable hooks dispatched per frame in registration order
//! - **Factory Registry**: data-driven component construction by kind
//! - **Backend Seams**: physics, audio and render engines behind traits,
//!   swappable for native SDK wrappers
//! - **Headless Backends**: full bookkeeping implementations so scenes run
//!   and test without any native library
//! - **Config Records**: typed, read-only configuration views with RON
//!   deserialization
//!
//! ## Quick Start
//!
//! ```rust
//! use unit_engine::prelude::*;
//!
//! fn main() -> Result<(), EngineError> {
//!     let mut scene = Scene::headless();
//!
//!     let player = scene.spawn("player");
//!     scene.add_component(
//!         player,
//!         ComponentId::Transform,
//!         &ConfigView::new().with("position", Vec3::new(0.0, 1.0, 0.0)),
//!     )?;
//!     scene.add_component(player, ComponentId::Listener, &ConfigView::new())?;
//!
//!     scene.frame(1.0 / 60.0);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod audio;
pub mod components;
pub mod core;
pub mod foundation;
pub mod gameobject;
pub mod physics;
pub mod render;
pub mod scene;

mod engines;
mod error;

pub use engines::Engines;
pub use error::EngineError;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        components::{
            AudioSourceComponent, CameraComponent, LightComponent, ListenerComponent,
            RenderObjectComponent, RigidBodyComponent, TransformComponent,
        },
        core::config::{ConfigValue, ConfigView},
        foundation::{
            math::{Quat, Vec3},
            time::Timer,
        },
        gameobject::{Component, ComponentId, ComponentState, FactoryRegistry, GameObject},
        scene::{GameObjectKey, Scene},
        EngineError, Engines,
    };
}
