//! Error types for the `movmux` crate.
//!
//! This module defines [`MuxError`], the unified error type returned by all
//! fallible operations in the crate. Validation variants carry the exact
//! user-facing message; collaborator variants (process launch, I/O) carry
//! the upstream reason.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::io::Error as IoError;

use thiserror::Error;

/// Which input an `-ss` offset belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OffsetTarget {
    /// The video input (`-i` group 0).
    Video,
    /// The first audio input (`-i` group 1).
    Audio1,
    /// The optional second audio input (`-i` group 2).
    Audio2,
}

impl Display for OffsetTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            OffsetTarget::Video => "video",
            OffsetTarget::Audio1 => "audio1",
            OffsetTarget::Audio2 => "audio2",
        };
        f.write_str(name)
    }
}

/// The unified error type for all `movmux` operations.
///
/// [`CommandBuilder::build`](crate::CommandBuilder::build) only ever returns
/// the validation variants. They are deterministic: the same request always
/// reproduces the same error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MuxError {
    /// The video path is blank or does not point at an existing file.
    #[error("Select a valid video input.")]
    MissingOrInvalidVideoInput,

    /// The first audio path is blank or does not point at an existing file.
    #[error("Select a valid Audio 1 input.")]
    MissingOrInvalidAudio1Input,

    /// An offset could not be parsed as a number.
    #[error("The -ss value must be a number (e.g. 2 or 2.5) or blank.")]
    InvalidOffsetFormat {
        /// The input whose offset was rejected.
        which: OffsetTarget,
    },

    /// An offset parsed to a negative number.
    #[error("The -ss value must be non-negative.")]
    NegativeOffset {
        /// The input whose offset was rejected.
        which: OffsetTarget,
    },

    /// The shell hosting the command could not be started.
    #[error("Failed to start {program}: {reason}")]
    LaunchFailed {
        /// The shell program that was spawned.
        program: String,
        /// Underlying reason the spawn failed.
        reason: String,
    },

    /// An I/O error occurred outside of request validation.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),
}

impl MuxError {
    /// Returns `true` for errors caused by the user's input rather than by
    /// the environment.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            MuxError::MissingOrInvalidVideoInput
                | MuxError::MissingOrInvalidAudio1Input
                | MuxError::InvalidOffsetFormat { .. }
                | MuxError::NegativeOffset { .. }
        )
    }

    /// The offset input this error refers to, if any.
    pub fn offset_target(&self) -> Option<OffsetTarget> {
        match self {
            MuxError::InvalidOffsetFormat { which } | MuxError::NegativeOffset { which } => {
                Some(*which)
            }
            _ => None,
        }
    }
}

/// Failure of a single offset parse, before it is attributed to an input.
///
/// Returned by [`parse_offset`](crate::seconds::parse_offset). Use
/// [`OffsetError::at`] to turn it into a [`MuxError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OffsetError {
    /// Neither the invariant nor the locale-specific format matched.
    #[error("The -ss value must be a number (e.g. 2 or 2.5) or blank.")]
    InvalidFormat,

    /// The value parsed but is below zero.
    #[error("The -ss value must be non-negative.")]
    Negative,
}

impl OffsetError {
    /// Attach the input the offset belongs to.
    pub fn at(self, which: OffsetTarget) -> MuxError {
        match self {
            OffsetError::InvalidFormat => MuxError::InvalidOffsetFormat { which },
            OffsetError::Negative => MuxError::NegativeOffset { which },
        }
    }
}
