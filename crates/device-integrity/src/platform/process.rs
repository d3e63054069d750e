// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

use std::io::{self, BufRead, BufReader, Read};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use crate::error::CapabilityError;

/// Longest line accepted from the child; anything past it is dropped.
const MAX_LINE_BYTES: u64 = 4096;

/// Owns a spawned child and tears it down when dropped.
struct ChildGuard {
    child: Child,
}

impl ChildGuard {
    fn spawn(command: &mut Command) -> io::Result<Self> {
        command.spawn().map(|child| Self { child })
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        // kill() fails if the child already exited, wait() still has to reap it
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Spawn `program`, read at most one line from its stdout and stop it.
///
/// The child is killed and reaped on every return path, including timeout.
/// Lines are cut at [`MAX_LINE_BYTES`].
///
/// Only the direct child is stopped. A grandchild that inherited stdout keeps
/// the pipe open, and with it the detached reader thread, until it exits.
pub fn run_first_line(
    program: &str,
    args: &[&str],
    timeout: Duration,
) -> Result<Option<String>, CapabilityError> {
    let mut guard = ChildGuard::spawn(
        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null()),
    )
    .map_err(|source| CapabilityError::Spawn {
        program: program.to_string(),
        source,
    })?;

    let stdout = match guard.child.stdout.take() {
        Some(stdout) => stdout,
        None => return Ok(None),
    };

    // Reader runs detached so the wait can be bounded; killing the child
    // closes the pipe and lets it finish.
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut line = String::new();
        let result = BufReader::new(stdout.take(MAX_LINE_BYTES))
            .read_line(&mut line)
            .map(|read| if read == 0 { None } else { Some(line) });
        let _ = tx.send(result);
    });

    match rx.recv_timeout(timeout) {
        Ok(Ok(line)) => Ok(line.map(|l| l.trim_end_matches(['\r', '\n']).to_string())),
        Ok(Err(source)) => Err(CapabilityError::io(program, source)),
        Err(RecvTimeoutError::Timeout) => Err(CapabilityError::Timeout {
            program: program.to_string(),
            timeout,
        }),
        Err(RecvTimeoutError::Disconnected) => Err(CapabilityError::io(
            program,
            io::Error::new(io::ErrorKind::BrokenPipe, "stdout reader exited"),
        )),
    }
}
