//! Command synthesis configuration.
//!
//! [`MuxOptions`] is a builder that threads the program token, the user's
//! number locale, and the default-output naming rules through
//! [`CommandBuilder`](crate::CommandBuilder) without polluting every
//! function signature.
//!
//! # Example
//!
//! ```
//! use movmux::{MuxOptions, NumberLocale};
//!
//! let options = MuxOptions::new()
//!     .with_program("ffmpeg")
//!     .with_number_locale(NumberLocale::decimal_comma());
//! assert_eq!(options.program(), "ffmpeg");
//! ```

use std::env;

/// Program token written at the start of every command line.
pub const DEFAULT_PROGRAM: &str = "ffmpeg";

/// Suffix appended to the video file stem for the default output path.
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_mux";

/// Extension forced onto the default output path.
pub const DEFAULT_OUTPUT_EXTENSION: &str = "mov";

/// Language codes whose conventional decimal separator is a comma.
const DECIMAL_COMMA_LANGUAGES: &[&str] = &[
    "af", "az", "be", "bg", "bs", "ca", "cs", "da", "de", "el", "es", "et", "eu", "fi", "fo",
    "fr", "gl", "hr", "hu", "hy", "id", "is", "it", "ka", "kk", "ky", "lt", "lv", "mk", "mn",
    "nb", "nl", "nn", "no", "pl", "pt", "ro", "ru", "sk", "sl", "sq", "sr", "sv", "tr", "uk",
    "uz", "vi",
];

/// Decimal conventions of the user's locale.
///
/// Offsets are parsed with the invariant format first (`.` decimal point);
/// the locale is only consulted when that fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberLocale {
    decimal_separator: char,
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self::invariant()
    }
}

impl NumberLocale {
    /// The invariant locale: `.` as the decimal separator.
    pub const fn invariant() -> Self {
        Self {
            decimal_separator: '.',
        }
    }

    /// A locale that writes decimals with a comma (`2,5`).
    pub const fn decimal_comma() -> Self {
        Self {
            decimal_separator: ',',
        }
    }

    /// The decimal separator of this locale.
    pub fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    /// Resolve a POSIX-style locale tag such as `de_DE.UTF-8`, `fr-CA` or `C`.
    ///
    /// Unknown or empty tags resolve to the invariant locale.
    pub fn from_tag(tag: &str) -> Self {
        let language: String = tag
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_alphabetic())
            .collect::<String>()
            .to_ascii_lowercase();

        if DECIMAL_COMMA_LANGUAGES.contains(&language.as_str()) {
            Self::decimal_comma()
        } else {
            Self::invariant()
        }
    }

    /// Detect the user's number locale.
    ///
    /// `LC_ALL` and `LC_NUMERIC` win when set, then the operating system's
    /// preferred locale (the Windows user locale, `CFLocale` on macOS), then
    /// `LANG`.
    pub fn from_environment() -> Self {
        let candidates = [
            env::var("LC_ALL").ok(),
            env::var("LC_NUMERIC").ok(),
            sys_locale::get_locale(),
            env::var("LANG").ok(),
        ];
        Self::from_first_tag(candidates.into_iter().flatten())
    }

    /// Resolve the first non-blank tag, or the invariant locale if there is
    /// none.
    pub fn from_first_tag<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match tags.into_iter().find(|tag| !tag.as_ref().trim().is_empty()) {
            Some(tag) => {
                let locale = Self::from_tag(tag.as_ref());
                log::debug!(
                    "Number locale {} -> decimal separator '{}'",
                    tag.as_ref(),
                    locale.decimal_separator,
                );
                locale
            }
            None => Self::invariant(),
        }
    }
}

/// Configuration for command synthesis.
///
/// All fields have sensible defaults; a default-constructed value produces
/// `ffmpeg ...` command lines and `<stem>_mux.mov` output names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MuxOptions {
    pub(crate) program: String,
    pub(crate) number_locale: NumberLocale,
    pub(crate) output_suffix: String,
    pub(crate) output_extension: String,
}

impl Default for MuxOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl MuxOptions {
    /// Create options with default settings and the locale detected from
    /// the environment.
    pub fn new() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            number_locale: NumberLocale::from_environment(),
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
            output_extension: DEFAULT_OUTPUT_EXTENSION.to_string(),
        }
    }

    /// Set the program token (e.g. a full path to an FFmpeg binary).
    #[must_use]
    pub fn with_program<S: Into<String>>(mut self, program: S) -> Self {
        self.program = program.into();
        self
    }

    /// Set the locale used as the fallback when parsing offsets.
    #[must_use]
    pub fn with_number_locale(mut self, locale: NumberLocale) -> Self {
        self.number_locale = locale;
        self
    }

    /// Set the suffix appended to the video stem for the default output.
    #[must_use]
    pub fn with_output_suffix<S: Into<String>>(mut self, suffix: S) -> Self {
        self.output_suffix = suffix.into();
        self
    }

    /// Set the extension of the default output. A leading dot is ignored.
    #[must_use]
    pub fn with_output_extension<S: AsRef<str>>(mut self, extension: S) -> Self {
        self.output_extension = extension.as_ref().trim_start_matches('.').to_string();
        self
    }

    /// The program token.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The fallback locale for offset parsing.
    pub fn number_locale(&self) -> NumberLocale {
        self.number_locale
    }

    /// Suffix used by the default output derivation.
    pub fn output_suffix(&self) -> &str {
        &self.output_suffix
    }

    /// Extension used by the default output derivation, without the dot.
    pub fn output_extension(&self) -> &str {
        &self.output_extension
    }
}
