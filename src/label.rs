//! Audio track titles.
//!
//! Each audio track is classified along two independent axes, the source
//! ([`SourceKind`]) and the sample rate ([`SampleRate`]). The title written
//! into the output's `title`/`handler_name` metadata is derived on demand by
//! [`label`]; nothing is cached.
//!
//! # Example
//!
//! ```
//! use movmux::{SampleRate, SourceKind, TrackLabel};
//!
//! let mut track = TrackLabel::default();
//! track.set_source_kind(SourceKind::Digital);
//! track.set_sample_rate(SampleRate::Rate44_1k);
//! assert_eq!(track.title(), "Digital 44.1 kHz");
//! ```

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Where the audio was captured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SourceKind {
    /// Not specified. Contributes nothing to the title.
    #[default]
    Unset,
    /// Analog capture.
    Analog,
    /// Digital capture.
    Digital,
}

impl SourceKind {
    /// The title fragment for this source, empty for [`SourceKind::Unset`].
    pub fn as_title_part(self) -> &'static str {
        match self {
            SourceKind::Unset => "",
            SourceKind::Analog => "Analog",
            SourceKind::Digital => "Digital",
        }
    }
}

impl Display for SourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            SourceKind::Unset => f.write_str("none"),
            _ => f.write_str(self.as_title_part()),
        }
    }
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "none" | "unset" => Ok(SourceKind::Unset),
            "analog" | "analogue" => Ok(SourceKind::Analog),
            "digital" => Ok(SourceKind::Digital),
            other => Err(format!("unknown source kind: {other}")),
        }
    }
}

/// The sample rate of the audio track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SampleRate {
    /// Not specified. Contributes nothing to the title.
    #[default]
    Unset,
    /// 48 kHz.
    Rate48k,
    /// 44.1 kHz.
    Rate44_1k,
}

impl SampleRate {
    /// The title fragment for this rate, empty for [`SampleRate::Unset`].
    pub fn as_title_part(self) -> &'static str {
        match self {
            SampleRate::Unset => "",
            SampleRate::Rate48k => "48 kHz",
            SampleRate::Rate44_1k => "44.1 kHz",
        }
    }

    /// The rate in hertz, if set.
    pub fn hertz(self) -> Option<u32> {
        match self {
            SampleRate::Unset => None,
            SampleRate::Rate48k => Some(48_000),
            SampleRate::Rate44_1k => Some(44_100),
        }
    }
}

impl Display for SampleRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            SampleRate::Unset => f.write_str("none"),
            _ => f.write_str(self.as_title_part()),
        }
    }
}

impl FromStr for SampleRate {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace(' ', "");
        match normalized.as_str() {
            "" | "none" | "unset" => Ok(SampleRate::Unset),
            "48" | "48k" | "48khz" | "48000" | "48000hz" => Ok(SampleRate::Rate48k),
            "44.1" | "44.1k" | "44.1khz" | "44100" | "44100hz" => Ok(SampleRate::Rate44_1k),
            _ => Err(format!("unknown sample rate: {}", value.trim())),
        }
    }
}

/// Derive a track title from its two classification axes.
///
/// Empty parts are dropped; two non-empty parts are joined by one space.
pub fn label(source_kind: SourceKind, sample_rate: SampleRate) -> String {
    match (source_kind.as_title_part(), sample_rate.as_title_part()) {
        ("", "") => String::new(),
        (source, "") => source.to_string(),
        ("", rate) => rate.to_string(),
        (source, rate) => format!("{source} {rate}"),
    }
}

/// Classification of one audio track.
///
/// Each axis holds one choice at a time, so picking
/// [`SourceKind::Analog`] replaces a previous [`SourceKind::Digital`] and
/// leaves the sample rate alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TrackLabel {
    /// Source axis.
    pub source_kind: SourceKind,
    /// Sample rate axis.
    pub sample_rate: SampleRate,
}

impl TrackLabel {
    /// Create a label with both axes set.
    pub fn new(source_kind: SourceKind, sample_rate: SampleRate) -> Self {
        Self {
            source_kind,
            sample_rate,
        }
    }

    /// Replace the source choice.
    pub fn set_source_kind(&mut self, source_kind: SourceKind) {
        self.source_kind = source_kind;
    }

    /// Replace the sample rate choice.
    pub fn set_sample_rate(&mut self, sample_rate: SampleRate) {
        self.sample_rate = sample_rate;
    }

    /// Checkbox semantics: selecting the active source clears the axis,
    /// selecting any other source replaces it.
    pub fn toggle_source_kind(&mut self, source_kind: SourceKind) {
        self.source_kind = if self.source_kind == source_kind {
            SourceKind::Unset
        } else {
            source_kind
        };
    }

    /// Checkbox semantics for the sample rate axis.
    pub fn toggle_sample_rate(&mut self, sample_rate: SampleRate) {
        self.sample_rate = if self.sample_rate == sample_rate {
            SampleRate::Unset
        } else {
            sample_rate
        };
    }

    /// Reset both axes.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// The derived title. See [`label`].
    pub fn title(&self) -> String {
        label(self.source_kind, self.sample_rate)
    }
}
