//! Running a command in a visible shell.
//!
//! [`launch`] hands a [`CommandLine`] to the platform shell and returns
//! as soon as the shell has started. The exit status of FFmpeg is never
//! observed; the shell window is where the user follows progress.
//!
//! On Windows the command line is passed to `cmd.exe /s /k` inside one
//! extra pair of quotes, so a quoted program path survives cmd's
//! quote stripping. That is the shell the quoting in
//! [`quote_argument`](crate::quote_argument) targets. Elsewhere the line is
//! passed to `sh -c`.

use std::env;
use std::io::Result as IoResult;
use std::process::{Child, Command, ExitStatus};
use std::thread::{self, JoinHandle};

use crate::command::CommandLine;
use crate::error::MuxError;

#[cfg(windows)]
const SHELL: &str = "cmd.exe";

#[cfg(not(windows))]
const SHELL: &str = "sh";

/// Start `command` in a shell and return without waiting for it.
///
/// The working directory is the current directory of this process. The
/// shell is reaped from a background thread once it exits.
///
/// # Errors
///
/// Returns [`MuxError::LaunchFailed`] if the shell cannot be spawned and
/// [`MuxError::IoError`] if the current directory cannot be read.
pub fn launch(command: &CommandLine) -> Result<(), MuxError> {
    let working_directory = env::current_dir()?;
    let mut shell = shell_command(&command.to_string());
    shell.current_dir(&working_directory);

    log::info!(
        "Launching {} in {} (cwd={})",
        command.program(),
        SHELL,
        working_directory.display(),
    );

    let child = shell.spawn().map_err(|error| MuxError::LaunchFailed {
        program: SHELL.to_string(),
        reason: error.to_string(),
    })?;
    reap(child);

    Ok(())
}

/// Wait for `child` on a detached thread so it never lingers as a zombie.
fn reap(mut child: Child) -> JoinHandle<IoResult<ExitStatus>> {
    thread::spawn(move || {
        let status = child.wait();
        log::debug!("Shell {} exited: {status:?}", child.id());
        status
    })
}

/// `/s /k "<line>"`: with `/s`, cmd strips exactly the outer pair of quotes
/// and runs the rest unchanged.
#[cfg(any(windows, test))]
fn cmd_arguments(command_line: &str) -> String {
    format!("/s /k \"{command_line}\"")
}

#[cfg(windows)]
fn shell_command(command_line: &str) -> Command {
    use std::os::windows::process::CommandExt;

    // CREATE_NEW_CONSOLE gives the shell its own window.
    const CREATE_NEW_CONSOLE: u32 = 0x0000_0010;

    let mut shell = Command::new(SHELL);
    shell
        .raw_arg(cmd_arguments(command_line))
        .creation_flags(CREATE_NEW_CONSOLE);
    shell
}

#[cfg(not(windows))]
fn shell_command(command_line: &str) -> Command {
    let mut shell = Command::new(SHELL);
    shell.arg("-c").arg(command_line);
    shell
}
