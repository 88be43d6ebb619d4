//! Command synthesis.
//!
//! [`CommandBuilder`] validates a [`MuxRequest`] and assembles the FFmpeg
//! invocation that muxes one video with one or two audio tracks into a
//! stream-copied MOV.
//!
//! # Example
//!
//! ```no_run
//! use movmux::{CommandBuilder, MuxRequest};
//!
//! let builder = CommandBuilder::new();
//! let command = builder.build(&MuxRequest::new("clip.mov", "take.wav"))?;
//! println!("{command}");
//! # Ok::<(), movmux::MuxError>(())
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::path::Path;
use std::sync::Arc;

use crate::command::{ArgGroup, CommandLine, Value};
use crate::configuration::MuxOptions;
use crate::error::{MuxError, OffsetTarget};
use crate::request::{MuxRequest, default_output_path, non_blank};
use crate::seconds::{Seconds, parse_offset};
use crate::validation::{ValidationReport, validate_request};

/// Answers whether a path names an existing file.
///
/// [`LocalFiles`] asks the filesystem. Tests and embedders can supply their
/// own implementation through [`CommandBuilder::with_probe`].
pub trait FileProbe: Send + Sync {
    /// `true` if `path` exists and is a file.
    fn is_file(&self, path: &Path) -> bool;
}

/// [`FileProbe`] backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFiles;

impl FileProbe for LocalFiles {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// Validates mux requests and assembles their command lines.
#[derive(Clone)]
pub struct CommandBuilder {
    pub(crate) options: MuxOptions,
    pub(crate) probe: Arc<dyn FileProbe>,
}

impl Debug for CommandBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CommandBuilder")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Default for CommandBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandBuilder {
    /// A builder with default [`MuxOptions`] and the local filesystem.
    pub fn new() -> Self {
        Self::with_options(MuxOptions::new())
    }

    /// A builder with custom options and the local filesystem.
    pub fn with_options(options: MuxOptions) -> Self {
        Self {
            options,
            probe: Arc::new(LocalFiles),
        }
    }

    /// Replace the existence check.
    #[must_use]
    pub fn with_probe(mut self, probe: Arc<dyn FileProbe>) -> Self {
        self.probe = probe;
        self
    }

    /// The options in use.
    pub fn options(&self) -> &MuxOptions {
        &self.options
    }

    /// Validate `request` and assemble its command line.
    ///
    /// Checks run in a fixed order and the first failure is returned: video
    /// input, Audio 1 input, then the video, Audio 1 and Audio 2 offsets. A
    /// blank or missing Audio 2 input is not an error; the command is built
    /// for a single audio track instead. A blank output path is replaced by
    /// the default derived from the video path, in the returned command
    /// only; `request` is never modified.
    ///
    /// # Errors
    ///
    /// Returns [`MuxError::MissingOrInvalidVideoInput`],
    /// [`MuxError::MissingOrInvalidAudio1Input`],
    /// [`MuxError::InvalidOffsetFormat`] or [`MuxError::NegativeOffset`].
    pub fn build(&self, request: &MuxRequest) -> Result<CommandLine, MuxError> {
        let video = self
            .existing_file(request.video_path.as_deref())
            .ok_or(MuxError::MissingOrInvalidVideoInput)?;
        let audio1 = self
            .existing_file(request.audio1_path.as_deref())
            .ok_or(MuxError::MissingOrInvalidAudio1Input)?;
        let audio2 = self.existing_file(request.audio2_path.as_deref());

        let output = request
            .resolved_output_path(&self.options)
            .unwrap_or_else(|| default_output_path(video, &self.options));

        let video_offset = self.offset(request.video_offset.as_deref(), OffsetTarget::Video)?;
        let audio1_offset = self.offset(request.audio1_offset.as_deref(), OffsetTarget::Audio1)?;
        let audio2_offset = self.offset(request.audio2_offset.as_deref(), OffsetTarget::Audio2)?;

        log::debug!(
            "Building {} mux command (output={})",
            if audio2.is_some() { "dual-track" } else { "single-track" },
            output.display(),
        );

        let mut groups = vec![ArgGroup::Bare(Value::program(self.options.program()))];

        push_input(&mut groups, video_offset, video);
        push_input(&mut groups, audio1_offset, audio1);
        if let Some(audio2) = audio2 {
            push_input(&mut groups, audio2_offset, audio2);
        }

        groups.push(ArgGroup::flag("-map", Value::plain("0:v")));
        groups.push(ArgGroup::flag("-map", Value::plain("1:a")));
        if audio2.is_some() {
            groups.push(ArgGroup::flag("-map", Value::plain("2:a")));
        }

        groups.push(ArgGroup::flag("-c", Value::plain("copy")));

        if audio2.is_some() {
            let audio1_title = request.audio1_label.title();
            let audio2_title = request.audio2_label.title();

            groups.push(ArgGroup::Switch("-copyinkf"));
            groups.push(ArgGroup::flag("-metadata:s:a:0", Value::keyed("title", &audio1_title)));
            groups.push(ArgGroup::flag(
                "-metadata:s:a:0",
                Value::keyed("handler_name", &audio1_title),
            ));
            groups.push(ArgGroup::flag("-metadata:s:a:1", Value::keyed("title", &audio2_title)));
            groups.push(ArgGroup::flag(
                "-metadata:s:a:1",
                Value::keyed("handler_name", &audio2_title),
            ));
            groups.push(ArgGroup::flag(
                "-movflags",
                Value::plain("+use_metadata_tags+faststart"),
            ));
        } else {
            groups.push(ArgGroup::flag("-movflags", Value::plain("+faststart")));
        }

        groups.push(ArgGroup::flag("-avoid_negative_ts", Value::plain("make_zero")));
        groups.push(ArgGroup::Switch("-shortest"));
        groups.push(ArgGroup::Bare(Value::path(&output)));

        Ok(CommandLine {
            groups,
            output_path: output,
            dual_track: audio2.is_some(),
        })
    }

    /// Run every check `build` would run without stopping at the first
    /// failure, and collect notices about the request.
    pub fn validate(&self, request: &MuxRequest) -> ValidationReport {
        validate_request(self, request)
    }

    /// Parse one offset with this builder's locale.
    ///
    /// # Errors
    ///
    /// Returns [`MuxError::InvalidOffsetFormat`] or
    /// [`MuxError::NegativeOffset`] tagged with `which`.
    pub fn offset(
        &self,
        text: Option<&str>,
        which: OffsetTarget,
    ) -> Result<Option<Seconds>, MuxError> {
        parse_offset(text, self.options.number_locale()).map_err(|error| error.at(which))
    }

    pub(crate) fn existing_file<'a>(&self, path: Option<&'a Path>) -> Option<&'a Path> {
        non_blank(path).filter(|p| self.probe.is_file(p))
    }
}

fn push_input(groups: &mut Vec<ArgGroup>, offset: Option<Seconds>, path: &Path) {
    if let Some(offset) = offset {
        groups.push(ArgGroup::flag("-ss", Value::plain(offset.to_string())));
    }
    groups.push(ArgGroup::flag("-i", Value::path(path)));
}
