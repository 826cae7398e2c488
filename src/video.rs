//! Options offered when requesting a video render.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output resolution understood by the render endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum Resolution {
    #[serde(rename = "360p")]
    #[value(name = "360p")]
    P360,
    #[default]
    #[serde(rename = "480p")]
    #[value(name = "480p")]
    P480,
    #[serde(rename = "720p")]
    #[value(name = "720p")]
    P720,
}

impl Resolution {
    pub const ALL: [Resolution; 3] = [Resolution::P360, Resolution::P480, Resolution::P720];

    /// Value sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::P360 => "360p",
            Resolution::P480 => "480p",
            Resolution::P720 => "720p",
        }
    }

    /// Frame size the server renders at
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Resolution::P360 => (640, 360),
            Resolution::P480 => (854, 480),
            Resolution::P720 => (1280, 720),
        }
    }

    /// Next option in dropdown order, wrapping around
    pub fn next(&self) -> Self {
        cycle(&Self::ALL, *self)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow::anyhow!("Unknown resolution '{}' (expected 360p, 480p or 720p)", s))
    }
}

/// Background track picked for the video
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum AudioMood {
    Epic,
    #[default]
    Happy,
    Sad,
}

impl AudioMood {
    pub const ALL: [AudioMood; 3] = [AudioMood::Epic, AudioMood::Happy, AudioMood::Sad];

    /// Value sent on the wire (the server looks up `<mood>.mp3`)
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioMood::Epic => "Epic",
            AudioMood::Happy => "Happy",
            AudioMood::Sad => "Sad",
        }
    }

    pub fn next(&self) -> Self {
        cycle(&Self::ALL, *self)
    }
}

impl fmt::Display for AudioMood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AudioMood {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow::anyhow!("Unknown audio mood '{}' (expected Epic, Happy or Sad)", s))
    }
}

/// The two dropdown values read when a video is requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VideoOptions {
    pub resolution: Resolution,
    pub audio_mood: AudioMood,
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T) -> T {
    let index = all.iter().position(|v| *v == current).unwrap_or(0);
    all[(index + 1) % all.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_wire_names() {
        assert_eq!(serde_json::to_string(&Resolution::P720).unwrap(), "\"720p\"");
        assert_eq!("480P".parse::<Resolution>().unwrap(), Resolution::P480);
        assert!("1080p".parse::<Resolution>().is_err());
    }

    #[test]
    fn test_resolution_dimensions() {
        assert_eq!(Resolution::default().dimensions(), (854, 480));
        assert_eq!(Resolution::P360.dimensions(), (640, 360));
    }

    #[test]
    fn test_options_cycle() {
        assert_eq!(Resolution::P720.next(), Resolution::P360);
        assert_eq!(AudioMood::Happy.next(), AudioMood::Sad);
        assert_eq!(AudioMood::Sad.next(), AudioMood::Epic);
    }

    #[test]
    fn test_audio_mood_parse() {
        assert_eq!("epic".parse::<AudioMood>().unwrap(), AudioMood::Epic);
        assert_eq!(serde_json::to_string(&AudioMood::Sad).unwrap(), "\"Sad\"");
    }
}
