//! # movmux
//!
//! Build FFmpeg command lines that mux one video with one or two audio
//! tracks into a single MOV file, and optionally launch them.
//!
//! `movmux` does not decode or inspect media. Given a [`MuxRequest`] (input
//! paths, optional `-ss` offsets typed as text, and a classification for each
//! audio track) it either produces a [`CommandLine`] or a precise
//! [`MuxError`] describing the first invalid input.
//!
//! ## Quick Start
//!
//! ### Build a Command
//!
//! ```no_run
//! use movmux::{CommandBuilder, MuxRequest};
//!
//! let request = MuxRequest::new("clip.mov", "take.wav").with_video_offset("2.5");
//! let command = CommandBuilder::new().build(&request)?;
//! // ffmpeg -ss 2.5 -i "clip.mov" -i "take.wav" -map 0:v -map 1:a -c copy ...
//! println!("{command}");
//! # Ok::<(), movmux::MuxError>(())
//! ```
//!
//! ### Two Audio Tracks with Titles
//!
//! ```no_run
//! use movmux::{CommandBuilder, MuxRequest, SampleRate, SourceKind, TrackLabel};
//!
//! let request = MuxRequest::new("clip.mov", "analog.wav")
//!     .with_audio2("digital.wav")
//!     .with_audio1_label(TrackLabel::new(SourceKind::Analog, SampleRate::Rate48k))
//!     .with_audio2_label(TrackLabel::new(SourceKind::Digital, SampleRate::Rate44_1k));
//! let command = CommandBuilder::new().build(&request)?;
//! assert!(command.is_dual_track());
//! movmux::launch(&command)?;
//! # Ok::<(), movmux::MuxError>(())
//! ```
//!
//! ## Command Shape
//!
//! - one `-i` group per input, each preceded by `-ss <seconds>` when that
//!   input has a non-zero offset
//! - `-map 0:v -map 1:a` (plus `-map 2:a` with a second audio track)
//! - `-c copy`, never re-encoding
//! - with a second audio track: `-copyinkf`, `title`/`handler_name`
//!   metadata for both audio streams, and
//!   `-movflags +use_metadata_tags+faststart`; otherwise
//!   `-movflags +faststart`
//! - `-avoid_negative_ts make_zero -shortest` and the quoted output path

pub mod builder;
pub mod command;
pub mod configuration;
pub mod error;
pub mod label;
pub mod launch;
pub mod request;
pub mod seconds;
pub mod validation;

pub use builder::{CommandBuilder, FileProbe, LocalFiles};
pub use command::{ArgGroup, CommandLine, Value, quote_argument};
pub use configuration::{MuxOptions, NumberLocale};
pub use error::{MuxError, OffsetError, OffsetTarget};
pub use label::{SampleRate, SourceKind, TrackLabel, label};
pub use launch::launch;
pub use request::{MuxRequest, default_output_path};
pub use seconds::{Seconds, parse_offset};
pub use validation::ValidationReport;
