//! Mux request inputs.
//!
//! [`MuxRequest`] collects the raw fields a user fills in: input paths,
//! offset text, track classifications and an optional output path. Nothing
//! is validated here; [`CommandBuilder`](crate::CommandBuilder) does that.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::configuration::MuxOptions;
use crate::label::TrackLabel;

/// Everything needed to synthesize one mux command.
///
/// # Example
///
/// ```
/// use movmux::{MuxRequest, SampleRate, SourceKind, TrackLabel};
///
/// let request = MuxRequest::new("clip.mov", "take1.wav")
///     .with_audio2("take2.wav")
///     .with_video_offset("1.5")
///     .with_audio1_label(TrackLabel::new(SourceKind::Analog, SampleRate::Rate48k));
/// assert!(request.output_path.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MuxRequest {
    /// Video input. Required.
    pub video_path: Option<PathBuf>,
    /// First audio input. Required.
    pub audio1_path: Option<PathBuf>,
    /// Second audio input. Ignored unless it names an existing file.
    pub audio2_path: Option<PathBuf>,
    /// Output file. Derived from the video path when blank.
    pub output_path: Option<PathBuf>,
    /// Raw `-ss` text for the video input.
    pub video_offset: Option<String>,
    /// Raw `-ss` text for the first audio input.
    pub audio1_offset: Option<String>,
    /// Raw `-ss` text for the second audio input.
    pub audio2_offset: Option<String>,
    /// Classification of the first audio track.
    pub audio1_label: TrackLabel,
    /// Classification of the second audio track.
    pub audio2_label: TrackLabel,
}

impl MuxRequest {
    /// Create a request with the two required inputs.
    pub fn new<P1: AsRef<Path>, P2: AsRef<Path>>(video: P1, audio1: P2) -> Self {
        Self {
            video_path: Some(video.as_ref().to_path_buf()),
            audio1_path: Some(audio1.as_ref().to_path_buf()),
            ..Self::default()
        }
    }

    /// Set the second audio input.
    #[must_use]
    pub fn with_audio2<P: AsRef<Path>>(mut self, audio2: P) -> Self {
        self.audio2_path = Some(audio2.as_ref().to_path_buf());
        self
    }

    /// Set the output path.
    #[must_use]
    pub fn with_output<P: AsRef<Path>>(mut self, output: P) -> Self {
        self.output_path = Some(output.as_ref().to_path_buf());
        self
    }

    /// Set the video offset text.
    #[must_use]
    pub fn with_video_offset<S: Into<String>>(mut self, offset: S) -> Self {
        self.video_offset = Some(offset.into());
        self
    }

    /// Set the first audio offset text.
    #[must_use]
    pub fn with_audio1_offset<S: Into<String>>(mut self, offset: S) -> Self {
        self.audio1_offset = Some(offset.into());
        self
    }

    /// Set the second audio offset text.
    #[must_use]
    pub fn with_audio2_offset<S: Into<String>>(mut self, offset: S) -> Self {
        self.audio2_offset = Some(offset.into());
        self
    }

    /// Set the first audio track classification.
    #[must_use]
    pub fn with_audio1_label(mut self, label: TrackLabel) -> Self {
        self.audio1_label = label;
        self
    }

    /// Set the second audio track classification.
    #[must_use]
    pub fn with_audio2_label(mut self, label: TrackLabel) -> Self {
        self.audio2_label = label;
        self
    }

    /// The output path the command will write to: the explicit one, or the
    /// default derived from a non-blank video path.
    pub fn resolved_output_path(&self, options: &MuxOptions) -> Option<PathBuf> {
        if let Some(output) = non_blank(self.output_path.as_deref()) {
            return Some(output.to_path_buf());
        }

        non_blank(self.video_path.as_deref()).map(|video| default_output_path(video, options))
    }

    /// Write the default output path into a blank `output_path`.
    ///
    /// Returns `true` if the field was filled. Building does not do this
    /// itself; call it first when the caller wants to show the derived path.
    pub fn fill_default_output(&mut self, options: &MuxOptions) -> bool {
        if !is_blank(self.output_path.as_deref()) {
            return false;
        }

        match self.resolved_output_path(options) {
            Some(output) => {
                self.output_path = Some(output);
                true
            }
            None => false,
        }
    }
}

/// `<dir>/<stem><suffix>.<extension>` next to the video, `<stem>_mux.mov`
/// with default options.
pub fn default_output_path(video: &Path, options: &MuxOptions) -> PathBuf {
    let directory = video.parent().unwrap_or_else(|| Path::new(""));

    let mut file_name = OsString::from(video.file_stem().unwrap_or_default());
    file_name.push(options.output_suffix());
    file_name.push(".");
    file_name.push(options.output_extension());

    directory.join(file_name)
}

/// Absent, empty, or whitespace-only.
pub fn is_blank(path: Option<&Path>) -> bool {
    path.is_none_or(|p| p.as_os_str().to_string_lossy().trim().is_empty())
}

pub(crate) fn non_blank(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| !is_blank(Some(p)))
}
