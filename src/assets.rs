//! Game assets and load-completion signals
//!
//! Loads are fire-and-forget. Each asset owns a [`LoadSignal`] that the
//! loader completes from its `onload`/`canplaythrough` callback; the renderer
//! and audio only ever ask whether the signal has fired.

use std::cell::Cell;
use std::rc::Rc;

/// Sprite sheets and backdrops
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageId {
    Background,
    Hero,
    Logo,
}

impl ImageId {
    pub const ALL: [ImageId; 3] = [ImageId::Background, ImageId::Hero, ImageId::Logo];

    pub fn path(self) -> &'static str {
        match self {
            ImageId::Background => "assets/game_pwnzer/bg.png",
            ImageId::Hero => "assets/game_pwnzer/pwnzer.png",
            ImageId::Logo => "assets/game_pwnzer/logo.png",
        }
    }
}

/// Recorded sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Jeet pwned
    Pwn,
    /// Title screen and game over jingle
    IntroOutro,
    /// Looping in-game music
    Background,
}

impl Cue {
    pub const ALL: [Cue; 3] = [Cue::Pwn, Cue::IntroOutro, Cue::Background];

    pub fn path(self) -> &'static str {
        match self {
            Cue::Pwn => "assets/game_pwnzer/pwn.wav",
            Cue::IntroOutro => "assets/game_pwnzer/intro.mp3",
            Cue::Background => "assets/game_pwnzer/background.mp3",
        }
    }

    pub fn loops(self) -> bool {
        self == Cue::Background
    }

    pub fn is_music(self) -> bool {
        self != Cue::Pwn
    }
}

/// One-shot "finished loading" flag shared between a loader callback and readers
#[derive(Debug, Clone, Default)]
pub struct LoadSignal(Rc<Cell<bool>>);

impl LoadSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn complete(&self) {
        self.0.set(true);
    }

    pub fn is_ready(&self) -> bool {
        self.0.get()
    }
}

/// Readiness of every image the renderer may draw
#[derive(Debug, Clone, Default)]
pub struct ImageStatus {
    background: LoadSignal,
    hero: LoadSignal,
    logo: LoadSignal,
}

impl ImageStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything already loaded (tests, headless runs)
    pub fn all_ready() -> Self {
        let status = Self::new();
        for id in ImageId::ALL {
            status.signal(id).complete();
        }
        status
    }

    pub fn signal(&self, id: ImageId) -> &LoadSignal {
        match id {
            ImageId::Background => &self.background,
            ImageId::Hero => &self.hero,
            ImageId::Logo => &self.logo,
        }
    }

    pub fn is_ready(&self, id: ImageId) -> bool {
        self.signal(id).is_ready()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_shared_between_clones() {
        let status = ImageStatus::new();
        let loader_side = status.signal(ImageId::Logo).clone();
        assert!(!status.is_ready(ImageId::Logo));
        loader_side.complete();
        assert!(status.is_ready(ImageId::Logo));
        assert!(!status.is_ready(ImageId::Background));
    }

    #[test]
    fn test_all_ready() {
        let status = ImageStatus::all_ready();
        assert!(ImageId::ALL.iter().all(|&id| status.is_ready(id)));
    }

    #[test]
    fn test_only_background_loops() {
        let looping: Vec<Cue> = Cue::ALL.into_iter().filter(|c| c.loops()).collect();
        assert_eq!(looping, vec![Cue::Background]);
        assert!(!Cue::Pwn.is_music());
    }
}
