//! Sound cues
//!
//! [`MusicDirector`] decides what to play from phase changes and game events;
//! on the web, [`AudioManager`] drives the `<audio>` elements.

use crate::assets::Cue;
use crate::sim::{GameEvent, GamePhase};

/// One playback instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueCommand {
    Play(Cue),
    Pause(Cue),
    /// Seek back to the beginning
    Rewind(Cue),
}

/// Tracks which jingles already ran on the current screen
#[derive(Debug, Clone, Default)]
pub struct MusicDirector {
    intro_played: bool,
    outro_played: bool,
}

impl MusicDirector {
    pub fn new() -> Self {
        Self::default()
    }

    /// React to the events of one frame, then to the phase being shown
    pub fn direct(&mut self, events: &[GameEvent], phase: GamePhase) -> Vec<CueCommand> {
        let mut commands = Vec::new();
        for event in events {
            self.on_event(*event, &mut commands);
        }
        self.on_frame(phase, &mut commands);
        commands
    }

    fn on_event(&mut self, event: GameEvent, out: &mut Vec<CueCommand>) {
        use CueCommand::*;
        match event {
            GameEvent::Started => {
                out.extend([Pause(Cue::IntroOutro), Rewind(Cue::IntroOutro)]);
                self.intro_played = false;
                out.push(Play(Cue::Background));
            }
            GameEvent::EnemyPwned { .. } => {
                out.extend([Rewind(Cue::Pwn), Play(Cue::Pwn)]);
            }
            // The outro starts from the game over screen itself
            GameEvent::PlayerCaught => {}
            GameEvent::Reset => {
                out.extend([
                    Pause(Cue::Background),
                    Rewind(Cue::Background),
                    Rewind(Cue::IntroOutro),
                ]);
                self.intro_played = false;
                self.outro_played = false;
            }
        }
    }

    fn on_frame(&mut self, phase: GamePhase, out: &mut Vec<CueCommand>) {
        use CueCommand::*;
        match phase {
            GamePhase::Start if !self.intro_played => {
                out.push(Play(Cue::IntroOutro));
                self.intro_played = true;
            }
            GamePhase::GameOver if !self.outro_played => {
                out.extend([
                    Pause(Cue::Background),
                    Rewind(Cue::Background),
                    Play(Cue::IntroOutro),
                ]);
                self.outro_played = true;
            }
            _ => {}
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::collections::HashMap;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{AudioContext, HtmlAudioElement, OscillatorType};

    use super::CueCommand;
    use crate::Settings;
    use crate::assets::{Cue, LoadSignal};

    struct Track {
        element: HtmlAudioElement,
        ready: LoadSignal,
    }

    /// Plays recorded cues through `<audio>` elements
    pub struct AudioManager {
        tracks: HashMap<Cue, Track>,
        /// Synth fallback for the kill sound while pwn.wav is still loading
        ctx: Option<AudioContext>,
        settings: Settings,
    }

    impl AudioManager {
        /// Start loading every cue. Never blocks.
        pub fn new(settings: Settings) -> Self {
            let mut tracks = HashMap::new();
            for cue in Cue::ALL {
                match HtmlAudioElement::new_with_src(cue.path()) {
                    Ok(element) => {
                        element.set_loop(cue.loops());
                        let ready = LoadSignal::new();
                        let signal = ready.clone();
                        let on_ready = Closure::<dyn FnMut()>::new(move || signal.complete());
                        element.set_oncanplaythrough(Some(on_ready.as_ref().unchecked_ref()));
                        on_ready.forget();
                        tracks.insert(cue, Track { element, ready });
                    }
                    Err(e) => log::warn!("Audio cue {:?} unavailable: {:?}", cue, e),
                }
            }

            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - no fallback sounds");
            }

            let manager = Self {
                tracks,
                ctx,
                settings,
            };
            manager.apply_volumes();
            manager
        }

        pub fn set_settings(&mut self, settings: Settings) {
            self.settings = settings;
            self.apply_volumes();
        }

        fn apply_volumes(&self) {
            for (cue, track) in &self.tracks {
                let vol = if cue.is_music() {
                    self.settings.effective_music()
                } else {
                    self.settings.effective_sfx()
                };
                track.element.set_volume(vol as f64);
            }
        }

        pub fn apply(&self, commands: &[CueCommand]) {
            for command in commands {
                match *command {
                    CueCommand::Play(cue) => self.play(cue),
                    CueCommand::Pause(cue) => {
                        if let Some(track) = self.tracks.get(&cue) {
                            let _ = track.element.pause();
                        }
                    }
                    CueCommand::Rewind(cue) => {
                        if let Some(track) = self.tracks.get(&cue) {
                            track.element.set_current_time(0.0);
                        }
                    }
                }
            }
        }

        fn play(&self, cue: Cue) {
            match self.tracks.get(&cue) {
                Some(track) if track.ready.is_ready() || cue.is_music() => {
                    // Autoplay may be refused before the first gesture
                    let _ = track.element.play();
                }
                _ if cue == Cue::Pwn => self.play_fallback_pwn(),
                _ => {}
            }
        }

        /// Short descending zap
        fn play_fallback_pwn(&self) {
            let vol = self.settings.effective_sfx();
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
            let Ok(osc) = ctx.create_oscillator() else { return };
            let Ok(gain) = ctx.create_gain() else { return };
            osc.set_type(OscillatorType::Square);
            if osc.connect_with_audio_node(&gain).is_err()
                || gain.connect_with_audio_node(&ctx.destination()).is_err()
            {
                return;
            }
            let t = ctx.current_time();
            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            osc.frequency().set_value_at_time(880.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(220.0, t + 0.12)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }
    }
}
