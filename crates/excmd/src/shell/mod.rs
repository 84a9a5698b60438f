//! Subprocess execution for `:shellcmd`.
//!
//! Runs synchronously on the calling thread and captures stdout, stderr
//! and the exit status. No timeout is applied.

use std::process::{Command, Stdio};

use log::debug;

use crate::host::ShellOutput;

/// Run `argv[0]` with the remaining arguments. Spawn failures come back as
/// status -1 with the OS error in stderr.
pub fn run_argv(argv: &[String]) -> ShellOutput {
    let Some((program, args)) = argv.split_first() else {
        return ShellOutput {
            status: -1,
            stdout: String::new(),
            stderr: "empty command".to_string(),
        };
    };
    debug!("running {program} {args:?}");
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output();
    match output {
        Ok(out) => ShellOutput {
            status: out.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&out.stdout).to_string(),
            stderr: String::from_utf8_lossy(&out.stderr).to_string(),
        },
        Err(err) => ShellOutput {
            status: -1,
            stdout: String::new(),
            stderr: err.to_string(),
        },
    }
}
