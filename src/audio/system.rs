use std::{io::Cursor, time::Duration};

use rodio::{Decoder, Source};
use tracing::{info, warn};

use crate::audio::{error::AudioError, playback::PlaybackEngine, state::PlaybackState};

/// Plays the most recent render. Works without an output device; every
/// playback call then reports [`AudioError::DeviceError`].
pub struct AudioSystem {
    engine: Option<PlaybackEngine>,
    device_error: Option<String>,
    state: PlaybackState,
    total_duration: Option<Duration>,
}

impl Default for AudioSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioSystem {
    pub fn new() -> Self {
        match PlaybackEngine::new() {
            Ok(engine) => Self::with_engine(Some(engine), None),
            Err(e) => {
                warn!("audio output unavailable: {e}");
                Self::with_engine(None, Some(e.to_string()))
            }
        }
    }

    /// An audio system that never opens a device.
    pub fn silent() -> Self {
        Self::with_engine(None, Some("audio output disabled".to_string()))
    }

    fn with_engine(engine: Option<PlaybackEngine>, device_error: Option<String>) -> Self {
        Self {
            engine,
            device_error,
            state: PlaybackState::Stopped,
            total_duration: None,
        }
    }

    fn engine(&self) -> Result<&PlaybackEngine, AudioError> {
        self.engine.as_ref().ok_or_else(|| {
            AudioError::DeviceError(
                self.device_error
                    .clone()
                    .unwrap_or_else(|| "no output device".to_string()),
            )
        })
    }

    pub fn has_output(&self) -> bool {
        self.engine.is_some()
    }

    pub fn play_bytes(&mut self, bytes: Vec<u8>) -> Result<(), AudioError> {
        let engine = self.engine()?;
        let source = Decoder::new(Cursor::new(bytes))
            .map_err(|e| AudioError::DecodingError(e.to_string()))?;
        let total_duration = source.total_duration();

        engine.clear();
        engine.play_source(source);
        engine.play();

        info!(?total_duration, "playing render");
        self.total_duration = total_duration;
        self.state = PlaybackState::Playing;
        Ok(())
    }

    pub fn toggle_pause(&mut self) -> Result<PlaybackState, AudioError> {
        let engine = self.engine()?;
        self.state = match self.state {
            PlaybackState::Playing => {
                engine.pause();
                PlaybackState::Paused
            }
            PlaybackState::Paused => {
                engine.play();
                PlaybackState::Playing
            }
            PlaybackState::Stopped => return Err(AudioError::NothingLoaded),
        };
        Ok(self.state)
    }

    pub fn stop(&mut self) {
        if let Some(engine) = &self.engine {
            engine.clear();
        }
        self.state = PlaybackState::Stopped;
        self.total_duration = None;
    }

    /// Returns `true` once, when the loaded render has played to the end.
    pub fn poll_finished(&mut self) -> bool {
        let finished = matches!(self.state, PlaybackState::Playing)
            && self.engine.as_ref().is_some_and(|engine| engine.is_empty());
        if finished {
            self.state = PlaybackState::Stopped;
        }
        finished
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Current position and, when the decoder knows it, total length.
    pub fn progress(&self) -> Option<(Duration, Option<Duration>)> {
        if self.state == PlaybackState::Stopped {
            return None;
        }
        let position = self.engine.as_ref()?.get_pos();
        Some((position, self.total_duration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_system_reports_missing_device() {
        let mut audio = AudioSystem::silent();
        assert!(!audio.has_output());
        assert!(matches!(
            audio.play_bytes(vec![0; 16]),
            Err(AudioError::DeviceError(_))
        ));
        assert!(matches!(audio.toggle_pause(), Err(AudioError::DeviceError(_))));
        assert_eq!(audio.state(), PlaybackState::Stopped);
        assert!(audio.progress().is_none());
        assert!(!audio.poll_finished());
    }

    #[test]
    fn stop_is_harmless_without_output() {
        let mut audio = AudioSystem::silent();
        audio.stop();
        assert_eq!(audio.state(), PlaybackState::Stopped);
    }
}
