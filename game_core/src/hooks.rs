//! Optional collaborators fed by the match after every tick.
//!
//! Each collaborator is a typed `Option`; an absent one drops its events.

use crate::events::{EffectEvent, RoundSummary, SoundEvent};
use crate::resources::Events;

/// Receives named audio cues
pub trait AudioSink {
    fn play(&mut self, sound: SoundEvent);
}

/// Receives visual effect triggers
pub trait EffectsSink {
    fn trigger(&mut self, effect: EffectEvent);
}

/// Receives the end-of-game summary
pub trait ProgressionSink {
    fn record(&mut self, summary: &RoundSummary);
}

/// Wired-in collaborators for one match
#[derive(Default)]
pub struct Hooks {
    pub audio: Option<Box<dyn AudioSink>>,
    pub effects: Option<Box<dyn EffectsSink>>,
    pub progression: Option<Box<dyn ProgressionSink>>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_audio(mut self, sink: impl AudioSink + 'static) -> Self {
        self.audio = Some(Box::new(sink));
        self
    }

    pub fn with_effects(mut self, sink: impl EffectsSink + 'static) -> Self {
        self.effects = Some(Box::new(sink));
        self
    }

    pub fn with_progression(mut self, sink: impl ProgressionSink + 'static) -> Self {
        self.progression = Some(Box::new(sink));
        self
    }

    /// Forward one tick's events. Effects are dropped when particles are off.
    pub fn dispatch(&mut self, events: &Events, particles: bool) {
        if let Some(audio) = self.audio.as_mut() {
            for sound in &events.sounds {
                audio.play(*sound);
            }
        }
        if particles {
            if let Some(effects) = self.effects.as_mut() {
                for effect in &events.effects {
                    effects.trigger(*effect);
                }
            }
        }
        if let (Some(progression), Some(summary)) = (self.progression.as_mut(), &events.summary) {
            progression.record(summary);
        }
    }
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field("audio", &self.audio.is_some())
            .field("effects", &self.effects.is_some())
            .field("progression", &self.progression.is_some())
            .finish()
    }
}
