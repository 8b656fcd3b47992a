//! Audio backend seam
//!
//! Marshals 3D listener attributes and source playback to a wrapped native
//! audio engine. The listener API is indexed so split-screen hosts can drive
//! several listeners; components normally use index 0.

mod headless;

pub use headless::{HeadlessAudio, PlaybackState, SourceState};

use crate::error::EngineError;
use crate::foundation::math::Vec3;
use slotmap::new_key_type;

new_key_type! {
    /// Opaque handle to a playing-capable audio source
    pub struct SourceHandle;
}

/// 3D listener attributes pushed once per frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListenerAttributes {
    /// World position of the listener
    pub position: Vec3,
    /// Listener velocity, used for doppler
    pub velocity: Vec3,
    /// Unit forward vector
    pub forward: Vec3,
    /// Unit up vector
    pub up: Vec3,
}

impl Default for ListenerAttributes {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            velocity: Vec3::zeros(),
            forward: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::new(0.0, 1.0, 0.0),
        }
    }
}

/// Interface to the wrapped native audio engine
pub trait AudioBackend {
    /// Upcast for backend introspection (used by tests and tooling)
    fn as_any(&self) -> &dyn std::any::Any;

    /// Replace the attributes of the listener at `index`
    fn set_listener_attributes(
        &mut self,
        index: usize,
        attributes: &ListenerAttributes,
    ) -> Result<(), EngineError>;

    /// Create a source for the named sound asset
    fn create_source(&mut self, sound: &str) -> Result<SourceHandle, EngineError>;

    /// Destroy a source
    fn destroy_source(&mut self, source: SourceHandle) -> Result<(), EngineError>;

    /// Start or resume playback
    fn play(&mut self, source: SourceHandle) -> Result<(), EngineError>;

    /// Pause playback, keeping position
    fn pause(&mut self, source: SourceHandle) -> Result<(), EngineError>;

    /// Stop playback and rewind
    fn stop(&mut self, source: SourceHandle) -> Result<(), EngineError>;

    /// Set playback volume; values are clamped to `0.0..=1.0`
    fn set_volume(&mut self, source: SourceHandle, volume: f32) -> Result<(), EngineError>;

    /// Enable or disable looping
    fn set_looping(&mut self, source: SourceHandle, looping: bool) -> Result<(), EngineError>;

    /// Move the source in world space
    fn set_source_position(
        &mut self,
        source: SourceHandle,
        position: Vec3,
    ) -> Result<(), EngineError>;
}
