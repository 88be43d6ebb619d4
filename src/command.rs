//! Assembled command lines and quoting.
//!
//! A [`CommandLine`] is an ordered list of [`ArgGroup`]s. Every value keeps
//! two forms: the raw argument (what the program receives in `argv`) and the
//! rendered shell text (what is shown, copied, or handed to a shell).
//!
//! Quoting is deliberately minimal and targets `cmd.exe`: values are wrapped
//! in double quotes and embedded double quotes get a backslash. Nothing else
//! is escaped.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};

/// Wrap a value in double quotes, escaping embedded double quotes with a
/// backslash.
///
/// ```
/// assert_eq!(movmux::quote_argument(r#"a "b" c"#), r#""a \"b\" c""#);
/// ```
pub fn quote_argument(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\\\""))
}

/// One value inside an argument group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value {
    raw: String,
    rendered: String,
}

impl Value {
    /// A value emitted as-is (flags' fixed operands such as `0:v`).
    pub fn plain<S: Into<String>>(text: S) -> Self {
        let raw = text.into();
        Self {
            rendered: raw.clone(),
            raw,
        }
    }

    /// A value emitted through [`quote_argument`].
    pub fn quoted<S: Into<String>>(text: S) -> Self {
        let raw = text.into();
        Self {
            rendered: quote_argument(&raw),
            raw,
        }
    }

    /// A path, quoted.
    pub fn path(path: &Path) -> Self {
        Self::quoted(path.to_string_lossy())
    }

    /// `key=` followed by the quoted text, as in `title="Analog 48 kHz"`.
    pub fn keyed(key: &str, text: &str) -> Self {
        Self {
            raw: format!("{key}={text}"),
            rendered: format!("{key}={}", quote_argument(text)),
        }
    }

    /// The program token: quoted only when it would otherwise split.
    pub(crate) fn program(program: &str) -> Self {
        if program.contains(char::is_whitespace) || program.contains('"') {
            Self::quoted(program)
        } else {
            Self::plain(program)
        }
    }

    /// The argument as the program receives it.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The argument as written on the command line.
    pub fn rendered(&self) -> &str {
        &self.rendered
    }
}

/// A flag with its operand, or a bare value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgGroup {
    /// `-flag value`.
    Flag {
        /// The flag, including its leading dash.
        flag: &'static str,
        /// The operand.
        value: Value,
    },
    /// `-flag` without an operand.
    Switch(&'static str),
    /// A positional value (program token, output path).
    Bare(Value),
}

impl ArgGroup {
    pub(crate) fn flag(flag: &'static str, value: Value) -> Self {
        ArgGroup::Flag { flag, value }
    }

    fn push_raw(&self, arguments: &mut Vec<String>) {
        match self {
            ArgGroup::Flag { flag, value } => {
                arguments.push((*flag).to_string());
                arguments.push(value.raw().to_string());
            }
            ArgGroup::Switch(flag) => arguments.push((*flag).to_string()),
            ArgGroup::Bare(value) => arguments.push(value.raw().to_string()),
        }
    }
}

impl Display for ArgGroup {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ArgGroup::Flag { flag, value } => write!(f, "{flag} {}", value.rendered()),
            ArgGroup::Switch(flag) => f.write_str(flag),
            ArgGroup::Bare(value) => f.write_str(value.rendered()),
        }
    }
}

/// A fully validated mux command.
///
/// Produced by [`CommandBuilder::build`](crate::CommandBuilder::build). The
/// [`Display`] output is the exact command string, reproducible byte for
/// byte for the same request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub(crate) groups: Vec<ArgGroup>,
    pub(crate) output_path: PathBuf,
    pub(crate) dual_track: bool,
}

impl CommandLine {
    /// The argument groups in emission order, program token first.
    pub fn groups(&self) -> &[ArgGroup] {
        &self.groups
    }

    /// The program token (e.g. `ffmpeg`), unquoted.
    pub fn program(&self) -> &str {
        match self.groups.first() {
            Some(ArgGroup::Bare(value)) => value.raw(),
            _ => "",
        }
    }

    /// Unquoted arguments after the program token, suitable for
    /// [`std::process::Command::args`].
    pub fn arguments(&self) -> Vec<String> {
        let mut arguments = Vec::new();
        for group in self.groups.iter().skip(1) {
            group.push_raw(&mut arguments);
        }
        arguments
    }

    /// The rendered command without the program token.
    pub fn arguments_line(&self) -> String {
        render(self.groups.iter().skip(1))
    }

    /// Where the output will be written. Already resolved when the request
    /// left it blank.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// `true` when a second audio input is muxed.
    pub fn is_dual_track(&self) -> bool {
        self.dual_track
    }
}

impl Display for CommandLine {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&render(self.groups.iter()))
    }
}

fn render<'a, I: Iterator<Item = &'a ArgGroup>>(groups: I) -> String {
    groups
        .map(ArgGroup::to_string)
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}
