//! Command execution — DRAIN, SEND, and COLLECT phases keyed on the READY
//! prompt.
//!
//! A TSO session interleaves input lines and output batches; the host prints
//! a literal `READY` line when it is waiting for the next input. One command
//! execution therefore runs in three phases:
//!
//! - **DRAIN** — empty probes flush output left over from a prior,
//!   uncollected command. A batch *opening* with `READY` means the session
//!   is clean.
//! - **SEND** — the command text goes out as one input line.
//! - **COLLECT** — empty probes pull the remaining output until a batch
//!   *ends* with `READY`.
//!
//! The first-line check in DRAIN versus the last-line check in COLLECT is
//! deliberate: a drained session answers a probe with the prompt alone,
//! while command output arrives in chunks that the prompt terminates.

use tracing::{debug, warn};

use crate::error::{Result, TsoClientError};
use crate::session::SessionManager;
use crate::transport::TsoTransport;

/// Prompt the host prints when it is ready for the next input line.
pub const READY_PROMPT: &str = "READY";

/// Empty probes sent to flush stale output before a command.
pub const MAX_CLEAR_PROBES: u32 = 6;

/// Output polls allowed after a command before giving up.
pub const MAX_OUTPUT_POLLS: u32 = 120;

/// Outcome of one command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Whether the command ran to the READY prompt.
    pub success: bool,
    /// Command output, in order, with READY prompt lines removed.
    pub output: Vec<String>,
}

/// Runs one command to completion against a managed session.
///
/// Borrows the [`SessionManager`] (and thereby the session handle) for the
/// duration of a single command. The session is always ended afterwards,
/// whatever the outcome, so the next command must re-acquire one.
pub struct CommandExecutor<'a, T: TsoTransport> {
    manager: &'a mut SessionManager<T>,
    max_clear_probes: u32,
    max_output_polls: u32,
}

impl<'a, T: TsoTransport> CommandExecutor<'a, T> {
    /// Create an executor borrowing `manager` for one command.
    pub fn new(manager: &'a mut SessionManager<T>) -> Self {
        Self {
            manager,
            max_clear_probes: MAX_CLEAR_PROBES,
            max_output_polls: MAX_OUTPUT_POLLS,
        }
    }

    /// Cap the number of DRAIN probes (default [`MAX_CLEAR_PROBES`]).
    pub fn with_clear_probes(mut self, probes: u32) -> Self {
        self.max_clear_probes = probes;
        self
    }

    /// Cap the number of COLLECT polls (default [`MAX_OUTPUT_POLLS`]).
    pub fn with_output_polls(mut self, polls: u32) -> Self {
        self.max_output_polls = polls;
        self
    }

    /// Execute `command`, collecting all output up to the READY prompt.
    ///
    /// Fails with [`TsoClientError::SessionUnavailable`] when the manager
    /// holds no session, and with [`TsoClientError::ReadyTimeout`] when the
    /// prompt never arrives within the poll budget. The session is ended
    /// before returning on every path.
    pub fn execute(mut self, command: &str) -> Result<CommandResult> {
        let result = self.run(command);
        self.manager.end_session();
        result
    }

    fn run(&mut self, command: &str) -> Result<CommandResult> {
        if self.manager.current_handle().is_none() {
            return Err(TsoClientError::SessionUnavailable);
        }

        if !self.drain()? {
            // One-shot recovery: replace the session and go straight to the
            // send, without draining again.
            warn!("session never reached READY while draining, replacing it");
            self.manager.end_session();
            self.manager.acquire_session()?;
        }

        debug!(%command, "sending TSO command");
        let mut output = self.poll(command)?;

        let mut polls = 0u32;
        while !ends_ready(&output) {
            if polls >= self.max_output_polls {
                return Err(TsoClientError::ReadyTimeout { polls });
            }
            polls += 1;
            output.extend(self.poll("")?);
        }

        Ok(CommandResult {
            success: true,
            output: strip_ready(output),
        })
    }

    /// Send empty probes until a batch opens with the READY prompt.
    /// Returns `false` when the probe budget runs out first.
    fn drain(&mut self) -> Result<bool> {
        for probe in 0..self.max_clear_probes {
            let batch = self.poll("")?;
            if batch.first().map(|l| l.trim()) == Some(READY_PROMPT) {
                debug!(probe, "session drained");
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// One send round trip: transmit `text` and parse the reply batch.
    fn poll(&mut self, text: &str) -> Result<Vec<String>> {
        let handle = self
            .manager
            .current_handle()
            .ok_or(TsoClientError::SessionUnavailable)?
            .to_string();
        let transport = self.manager.transport_mut();
        let response = transport.send_message(&handle, text)?;
        Ok(transport.retrieve_messages(&response))
    }
}

/// Whether the accumulated output currently ends with the READY prompt.
fn ends_ready(lines: &[String]) -> bool {
    lines.last().map(|l| l.trim()) == Some(READY_PROMPT)
}

/// Drop READY prompt lines and strip trailing whitespace from the rest.
fn strip_ready(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .filter(|l| l.trim() != READY_PROMPT)
        .map(|l| l.trim_end().to_string())
        .collect()
}
