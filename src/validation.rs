//! Request validation.
//!
//! [`CommandBuilder::build`] stops at the first invalid input.
//! [`CommandBuilder::validate`] runs the same checks to the end and adds
//! warnings about requests that build but look wrong (an output that
//! overwrites a file, an Audio 2 path that does not exist).
//!
//! # Example
//!
//! ```no_run
//! use movmux::{CommandBuilder, MuxRequest};
//!
//! let report = CommandBuilder::new().validate(&MuxRequest::new("clip.mov", "take.wav"));
//! for warning in &report.warnings {
//!     eprintln!("{warning}");
//! }
//! assert_eq!(report.is_valid(), report.errors.is_empty());
//! ```

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::Path;

use crate::builder::CommandBuilder;
use crate::error::OffsetTarget;
use crate::request::{MuxRequest, is_blank, non_blank};

/// Every finding about one [`MuxRequest`].
///
/// `errors` holds the messages [`CommandBuilder::build`] would return, in
/// the order `build` checks them; offset errors are prefixed with their
/// input (`audio1 offset: ...`). `warnings` flag requests that build but
/// probably do not do what the user wants. `info` describes the command
/// that would be produced.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Mux shape, resolved output path, emitted offsets.
    pub info: Vec<String>,
    /// Findings that do not stop `build`.
    pub warnings: Vec<String>,
    /// Findings that make `build` fail.
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// `true` exactly when `build` succeeds for the same request.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of entries across all three lists.
    pub fn issue_count(&self) -> usize {
        self.info.len() + self.warnings.len() + self.errors.len()
    }
}

impl Display for ValidationReport {
    /// One `[INFO]`, `[WARN]` or `[ERROR]` line per entry, then a verdict.
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let tagged = [("INFO", &self.info), ("WARN", &self.warnings), ("ERROR", &self.errors)];
        for (tag, entries) in tagged {
            for entry in entries {
                writeln!(f, "[{tag}] {entry}")?;
            }
        }

        match self.errors.len() {
            0 => writeln!(f, "Command can be built."),
            1 => writeln!(f, "1 error; command cannot be built."),
            count => writeln!(f, "{count} errors; command cannot be built."),
        }
    }
}

/// Inputs, output, then offsets; nothing short-circuits.
pub(crate) fn validate_request(
    builder: &CommandBuilder,
    request: &MuxRequest,
) -> ValidationReport {
    let mut report = ValidationReport::default();
    let options = builder.options();

    // ── Inputs ─────────────────────────────────────────────────────
    let video = builder.existing_file(request.video_path.as_deref());
    if video.is_none() {
        report.errors.push("Select a valid video input.".to_string());
    }

    if builder.existing_file(request.audio1_path.as_deref()).is_none() {
        report.errors.push("Select a valid Audio 1 input.".to_string());
    }

    let dual_track = builder.existing_file(request.audio2_path.as_deref()).is_some();
    if let (false, Some(audio2)) = (dual_track, non_blank(request.audio2_path.as_deref())) {
        report.warnings.push(format!(
            "Audio 2 input {} does not exist; muxing a single audio track",
            audio2.display(),
        ));
    }

    report.info.push(if dual_track {
        "Mode: video + 2 audio tracks (metadata titles written)".to_string()
    } else {
        "Mode: video + 1 audio track".to_string()
    });

    // ── Output ─────────────────────────────────────────────────────
    if let Some(output) = request.resolved_output_path(options) {
        if is_blank(request.output_path.as_deref()) {
            report
                .info
                .push(format!("Output (derived): {}", output.display()));
        } else {
            report.info.push(format!("Output: {}", output.display()));
        }

        if builder.probe.is_file(&output) {
            report.warnings.push(format!(
                "Output {} already exists and will be overwritten",
                output.display(),
            ));
        }

        if !has_extension(&output, options.output_extension()) {
            report.warnings.push(format!(
                "Output {} does not end in .{}; the MOV flags may not apply",
                output.display(),
                options.output_extension(),
            ));
        }

        if video.is_some_and(|video| video == output.as_path()) {
            report
                .warnings
                .push("Output path is the same as the video input".to_string());
        }
    }

    // ── Offsets ────────────────────────────────────────────────────
    let offsets = [
        (OffsetTarget::Video, request.video_offset.as_deref()),
        (OffsetTarget::Audio1, request.audio1_offset.as_deref()),
        (OffsetTarget::Audio2, request.audio2_offset.as_deref()),
    ];

    for (which, text) in offsets {
        match builder.offset(text, which) {
            Ok(Some(seconds)) => {
                let rendered = seconds.to_string();
                if rendered == "0" {
                    report.warnings.push(format!(
                        "{which} offset {} rounds to -ss 0 at millisecond precision",
                        seconds.as_secs_f64(),
                    ));
                }
                if which == OffsetTarget::Audio2 && !dual_track {
                    report
                        .warnings
                        .push("audio2 offset is ignored without an Audio 2 input".to_string());
                } else {
                    report.info.push(format!("{which} offset: -ss {rendered}"));
                }
            }
            Ok(None) => {}
            Err(error) => report.errors.push(format!("{which} offset: {error}")),
        }
    }

    report
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension))
}
