//! Audio source component
//!
//! Wraps one native audio source. Playback control forwards to the audio
//! backend; the source follows the Transform sibling in world space. On
//! disable the source pauses and remembers whether it was playing so enable
//! can resume it.

use crate::components::TransformComponent;
use crate::core::config::ConfigView;
use crate::engines::Engines;
use crate::error::EngineError;
use crate::audio::{AudioBackend, SourceHandle};
use crate::gameobject::{Component, ComponentId, UpdateContext};
use std::any::Any;

/// Positional audio source wrapper
///
/// Config fields: `sound` (required asset name), `volume` (1.0), `looping`
/// (false), `autoplay` (false).
#[derive(Debug, Default)]
pub struct AudioSourceComponent {
    source: Option<SourceHandle>,
    autoplay: bool,
    playing: bool,
    resume_on_enable: bool,
}

impl AudioSourceComponent {
    /// Handle of the wrapped source, if created
    pub fn handle(&self) -> Option<SourceHandle> {
        self.source
    }

    /// Whether the component believes playback is running
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    fn require_handle(&self) -> Result<SourceHandle, EngineError> {
        self.source
            .ok_or_else(|| EngineError::native("audio source was not created"))
    }

    /// Start or resume playback
    pub fn play(&mut self, engines: &mut Engines) -> Result<(), EngineError> {
        engines.audio.play(self.require_handle()?)?;
        self.playing = true;
        Ok(())
    }

    /// Pause playback, keeping position
    pub fn pause(&mut self, engines: &mut Engines) -> Result<(), EngineError> {
        engines.audio.pause(self.require_handle()?)?;
        self.playing = false;
        Ok(())
    }

    /// Stop playback and rewind
    pub fn stop(&mut self, engines: &mut Engines) -> Result<(), EngineError> {
        engines.audio.stop(self.require_handle()?)?;
        self.playing = false;
        Ok(())
    }

    /// Set playback volume, clamped by the backend to `0.0..=1.0`
    pub fn set_volume(&self, engines: &mut Engines, volume: f32) -> Result<(), EngineError> {
        engines.audio.set_volume(self.require_handle()?, volume)
    }

    /// Enable or disable looping
    pub fn set_looping(&self, engines: &mut Engines, looping: bool) -> Result<(), EngineError> {
        engines.audio.set_looping(self.require_handle()?, looping)
    }
}

impl Component for AudioSourceComponent {
    fn id(&self) -> ComponentId {
        ComponentId::AudioSource
    }

    fn awake(&mut self, config: &ConfigView, engines: &mut Engines) -> Result<(), EngineError> {
        let sound = config.required_str("sound")?;
        let handle = engines.audio.create_source(&sound)?;
        self.source = Some(handle);

        engines
            .audio
            .set_volume(handle, config.f32_or("volume", 1.0)?)?;
        engines
            .audio
            .set_looping(handle, config.bool_or("looping", false)?)?;
        self.autoplay = config.bool_or("autoplay", false)?;
        Ok(())
    }

    fn start(&mut self, ctx: &mut UpdateContext<'_>) -> Result<(), EngineError> {
        if self.autoplay {
            let handle = self.require_handle()?;
            ctx.engines.audio.play(handle)?;
            self.playing = true;
        }
        Ok(())
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        let Some(tr) = ctx.siblings.get_as::<TransformComponent>(ComponentId::Transform) else {
            return;
        };
        let Some(handle) = self.source else { return };
        if let Err(e) = ctx.engines.audio.set_source_position(handle, tr.position) {
            log::warn!("`{}`: source position push failed: {e}", ctx.owner);
        }
    }

    fn on_enable(&mut self, engines: &mut Engines) {
        if !self.resume_on_enable {
            return;
        }
        self.resume_on_enable = false;
        let Some(handle) = self.source else { return };
        match engines.audio.play(handle) {
            Ok(()) => self.playing = true,
            Err(e) => log::warn!("audio source resume failed: {e}"),
        }
    }

    fn on_disable(&mut self, engines: &mut Engines) {
        let Some(handle) = self.source else { return };
        if self.playing {
            self.resume_on_enable = true;
            match engines.audio.pause(handle) {
                Ok(()) => self.playing = false,
                Err(e) => log::warn!("audio source pause failed: {e}"),
            }
        }
    }

    fn teardown(&mut self, engines: &mut Engines) {
        if let Some(handle) = self.source.take() {
            self.playing = false;
            if let Err(e) = engines.audio.destroy_source(handle) {
                log::warn!("audio source teardown failed: {e}");
            }
        }
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
    use crate::audio::{HeadlessAudio, PlaybackState};
    use crate::foundation::math::Vec3;
    use crate::gameobject::{FactoryRegistry, GameObject};

    fn audio_of(engines: &Engines) -> &HeadlessAudio {
        engines.audio.as_any().downcast_ref().unwrap()
    }

    #[test]
    fn awake_requires_sound_field() {
        let mut engines = Engines::headless();
        let err = AudioSourceComponent::default()
            .awake(&ConfigView::new(), &mut engines)
            .unwrap_err();
        assert!(matches!(err, EngineError::MissingField { ref field } if field == "sound"));
    }

    #[test]
    fn awake_applies_volume_and_looping() {
        let mut engines = Engines::headless();
        let mut src = AudioSourceComponent::default();
        let config = ConfigView::new()
            .with("sound", "music.ogg")
            .with("volume", 0.25)
            .with("looping", true);
        src.awake(&config, &mut engines).unwrap();

        let state = audio_of(&engines).source(src.handle().unwrap()).unwrap();
        assert_eq!(state.volume, 0.25);
        assert!(state.looping);
        assert_eq!(state.playback, PlaybackState::Stopped);
    }

    #[test]
    fn autoplay_starts_playback_on_start() {
        let mut engines = Engines::headless();
        let registry = FactoryRegistry::with_builtin();
        let mut go = GameObject::new("jukebox");
        let config = ConfigView::new().with("sound", "music.ogg").with("autoplay", true);
        go.add_component(&registry, ComponentId::AudioSource, &config, &mut engines)
            .unwrap();
        go.start_pending(&mut engines);

        let src = go
            .component_as::<AudioSourceComponent>(ComponentId::AudioSource)
            .unwrap();
        assert!(src.is_playing());
        let state = audio_of(&engines).source(src.handle().unwrap()).unwrap();
        assert_eq!(state.playback, PlaybackState::Playing);
    }

    #[test]
    fn disable_pauses_and_enable_resumes() {
        let mut engines = Engines::headless();
        let registry = FactoryRegistry::with_builtin();
        let mut go = GameObject::new("jukebox");
        let config = ConfigView::new().with("sound", "music.ogg").with("autoplay", true);
        go.add_component(&registry, ComponentId::AudioSource, &config, &mut engines)
            .unwrap();
        go.start_pending(&mut engines);

        go.set_enabled(ComponentId::AudioSource, false, &mut engines);
        let handle = go
            .component_as::<AudioSourceComponent>(ComponentId::AudioSource)
            .unwrap()
            .handle()
            .unwrap();
        assert_eq!(
            audio_of(&engines).source(handle).unwrap().playback,
            PlaybackState::Paused
        );

        go.set_enabled(ComponentId::AudioSource, true, &mut engines);
        assert_eq!(
            audio_of(&engines).source(handle).unwrap().playback,
            PlaybackState::Playing
        );
    }

    #[test]
    fn disable_while_stopped_does_not_resume_later() {
        let mut engines = Engines::headless();
        let registry = FactoryRegistry::with_builtin();
        let mut go = GameObject::new("jukebox");
        let config = ConfigView::new().with("sound", "music.ogg");
        go.add_component(&registry, ComponentId::AudioSource, &config, &mut engines)
            .unwrap();
        go.start_pending(&mut engines);

        go.set_enabled(ComponentId::AudioSource, false, &mut engines);
        go.set_enabled(ComponentId::AudioSource, true, &mut engines);

        let src = go
            .component_as::<AudioSourceComponent>(ComponentId::AudioSource)
            .unwrap();
        assert!(!src.is_playing());
        assert_eq!(
            audio_of(&engines).source(src.handle().unwrap()).unwrap().playback,
            PlaybackState::Stopped
        );
    }

    #[test]
    fn update_follows_transform() {
        let mut engines = Engines::headless();
        let registry = FactoryRegistry::with_builtin();
        let mut go = GameObject::new("emitter");
        go.add_component(
            &registry,
            ComponentId::Transform,
            &ConfigView::new().with("position", Vec3::new(3.0, 0.0, -2.0)),
            &mut engines,
        )
        .unwrap();
        go.add_component(
            &registry,
            ComponentId::AudioSource,
            &ConfigView::new().with("sound", "hum.wav"),
            &mut engines,
        )
        .unwrap();
        go.start_pending(&mut engines);
        go.update(0.016, &mut engines);

        let handle = go
            .component_as::<AudioSourceComponent>(ComponentId::AudioSource)
            .unwrap()
            .handle()
            .unwrap();
        assert_eq!(
            audio_of(&engines).source(handle).unwrap().position,
            Vec3::new(3.0, 0.0, -2.0)
        );
    }
}
