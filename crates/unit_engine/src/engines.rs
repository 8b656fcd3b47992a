//! Native engine bundle
//!
//! Components never talk to a concrete SDK; they receive this bundle of
//! boxed backend trait objects and forward through it.

use crate::audio::{AudioBackend, HeadlessAudio};
use crate::physics::{HeadlessPhysics, PhysicsBackend};
use crate::render::{HeadlessRender, RenderBackend};

/// The three wrapped native subsystems
pub struct Engines {
    /// Physics engine seam
    pub physics: Box<dyn PhysicsBackend>,
    /// Audio engine seam
    pub audio: Box<dyn AudioBackend>,
    /// Rendering engine seam
    pub render: Box<dyn RenderBackend>,
}

impl Engines {
    /// Bundle three backend implementations
    pub fn new(
        physics: Box<dyn PhysicsBackend>,
        audio: Box<dyn AudioBackend>,
        render: Box<dyn RenderBackend>,
    ) -> Self {
        Self {
            physics,
            audio,
            render,
        }
    }

    /// Bundle the shipped headless backends
    pub fn headless() -> Self {
        Self::new(
            Box::new(HeadlessPhysics::new()),
            Box::new(HeadlessAudio::new()),
            Box::new(HeadlessRender::new()),
        )
    }
}
