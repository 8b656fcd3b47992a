//! Headless audio backend
//!
//! Records listener attributes and source state without producing sound.

use super::{AudioBackend, ListenerAttributes, SourceHandle};
use crate::error::EngineError;
use crate::foundation::math::Vec3;
use slotmap::SlotMap;
use std::collections::HashMap;

/// Playback state of a source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Not playing, rewound
    #[default]
    Stopped,
    /// Currently playing
    Playing,
    /// Paused mid-playback
    Paused,
}

/// Bookkept state of one audio source
#[derive(Debug, Clone)]
pub struct SourceState {
    /// Name of the sound asset
    pub sound: String,
    /// Playback volume in `0.0..=1.0`
    pub volume: f32,
    /// Whether playback loops
    pub looping: bool,
    /// World position of the source
    pub position: Vec3,
    /// Current playback state
    pub playback: PlaybackState,
}

/// In-memory [`AudioBackend`] with no native dependency
#[derive(Default)]
pub struct HeadlessAudio {
    listeners: HashMap<usize, ListenerAttributes>,
    sources: SlotMap<SourceHandle, SourceState>,
}

impl HeadlessAudio {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Last attributes pushed for a listener index (test hook)
    pub fn listener(&self, index: usize) -> Option<&ListenerAttributes> {
        self.listeners.get(&index)
    }

    /// Inspect a source's bookkept state (test hook)
    pub fn source(&self, handle: SourceHandle) -> Option<&SourceState> {
        self.sources.get(handle)
    }

    fn get_mut(&mut self, handle: SourceHandle) -> Result<&mut SourceState, EngineError> {
        self.sources
            .get_mut(handle)
            .ok_or_else(|| EngineError::native("unknown source handle"))
    }
}

impl AudioBackend for HeadlessAudio {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn set_listener_attributes(
        &mut self,
        index: usize,
        attributes: &ListenerAttributes,
    ) -> Result<(), EngineError> {
        self.listeners.insert(index, *attributes);
        Ok(())
    }

    fn create_source(&mut self, sound: &str) -> Result<SourceHandle, EngineError> {
        if sound.is_empty() {
            return Err(EngineError::native("sound asset name is empty"));
        }
        let handle = self.sources.insert(SourceState {
            sound: sound.to_string(),
            volume: 1.0,
            looping: false,
            position: Vec3::zeros(),
            playback: PlaybackState::Stopped,
        });
        log::debug!("created audio source `{sound}`");
        Ok(handle)
    }

    fn destroy_source(&mut self, source: SourceHandle) -> Result<(), EngineError> {
        self.sources
            .remove(source)
            .map(|s| log::debug!("destroyed audio source `{}`", s.sound))
            .ok_or_else(|| EngineError::native("unknown source handle"))
    }

    fn play(&mut self, source: SourceHandle) -> Result<(), EngineError> {
        self.get_mut(source)?.playback = PlaybackState::Playing;
        Ok(())
    }

    fn pause(&mut self, source: SourceHandle) -> Result<(), EngineError> {
        let state = self.get_mut(source)?;
        if state.playback == PlaybackState::Playing {
            state.playback = PlaybackState::Paused;
        }
        Ok(())
    }

    fn stop(&mut self, source: SourceHandle) -> Result<(), EngineError> {
        self.get_mut(source)?.playback = PlaybackState::Stopped;
        Ok(())
    }

    fn set_volume(&mut self, source: SourceHandle, volume: f32) -> Result<(), EngineError> {
        self.get_mut(source)?.volume = volume.clamp(0.0, 1.0);
        Ok(())
    }

    fn set_looping(&mut self, source: SourceHandle, looping: bool) -> Result<(), EngineError> {
        self.get_mut(source)?.looping = looping;
        Ok(())
    }

    fn set_source_position(
        &mut self,
        source: SourceHandle,
        position: Vec3,
    ) -> Result<(), EngineError> {
        self.get_mut(source)?.position = position;
        Ok(())
    }
}
