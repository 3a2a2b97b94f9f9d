//! Outbound hooks into audio, the indicator hardware and the renderer.
//!
//! Every call is fire and forget: implementations log or swallow their own
//! failures and never report them back to the game.

use serde::{Deserialize, Serialize};

use crate::FrameView;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sound {
    Success,
    Error,
    Explosion,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Music {
    Menu,
    Game,
    Puzzle,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorColor {
    Off,
    Red,
    Green,
    Blue,
    Yellow,
}

impl IndicatorColor {
    pub const fn rgb(self) -> (u8, u8, u8) {
        use IndicatorColor::*;
        match self {
            Off => (0, 0, 0),
            Red => (255, 0, 0),
            Green => (0, 255, 0),
            Blue => (0, 0, 255),
            Yellow => (255, 255, 0),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedbackPattern {
    Success,
    Error,
    Warning,
}

impl FeedbackPattern {
    /// Buzzer tones as `(frequency_hz, duration_ms)`.
    pub const fn tones(self) -> &'static [(u16, u16)] {
        match self {
            Self::Success => &[(440, 100), (880, 200)],
            Self::Error => &[(880, 100), (220, 300)],
            Self::Warning => &[(660, 100), (660, 100)],
        }
    }
}

pub trait AudioSink {
    fn play(&mut self, sound: Sound);

    fn play_music(&mut self, _music: Music) {}
}

/// The status LED and buzzer of the companion board.
pub trait Indicator {
    fn set_color(&mut self, color: IndicatorColor);
    fn play_pattern(&mut self, pattern: FeedbackPattern);
}

pub trait Renderer {
    fn render_frame(&mut self, view: &FrameView<'_>);
}

/// The audio and hardware hooks handed to the session each frame.
pub struct Collaborators<'a> {
    pub audio: &'a mut dyn AudioSink,
    pub indicator: &'a mut dyn Indicator,
}

impl<'a> Collaborators<'a> {
    pub fn new(audio: &'a mut dyn AudioSink, indicator: &'a mut dyn Indicator) -> Self {
        Self { audio, indicator }
    }
}

/// Audio backend that only logs what it would play.
#[derive(Clone, Debug, Default)]
pub struct LogAudio {
    music: Option<Music>,
}

impl LogAudio {
    pub fn music(&self) -> Option<Music> {
        self.music
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, sound: Sound) {
        log::info!("[audio] {:?}", sound);
    }

    fn play_music(&mut self, music: Music) {
        if self.music != Some(music) {
            log::info!("[audio] Music {:?}", music);
            self.music = Some(music);
        }
    }
}

/// Indicator with no board attached: remembers the LED colour and logs the
/// buzzer tones it would have played.
#[derive(Clone, Debug)]
pub struct StubHardware {
    color: IndicatorColor,
}

impl StubHardware {
    pub fn new() -> Self {
        log::info!("[hw] Hardware interface in stub mode");
        Self {
            color: IndicatorColor::Off,
        }
    }

    pub fn color(&self) -> IndicatorColor {
        self.color
    }
}

impl Default for StubHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl Indicator for StubHardware {
    fn set_color(&mut self, color: IndicatorColor) {
        let (r, g, b) = color.rgb();
        log::info!("[hw] LED -> R:{} G:{} B:{}", r, g, b);
        self.color = color;
    }

    fn play_pattern(&mut self, pattern: FeedbackPattern) {
        log::info!("[hw] Buzzer pattern {:?}", pattern);
        for (frequency, duration) in pattern.tones() {
            log::info!("[hw] Buzzer {}Hz for {}ms", frequency, duration);
        }
    }
}
