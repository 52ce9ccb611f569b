//! Interactive TSO command execution over the z/OSMF REST interface.
//!
//! A client-side wrapper around the z/OSMF TSO address space servlet,
//! providing:
//!
//! - **SessionManager** — validated session acquisition within a bounded
//!   retry budget, and explicit teardown
//! - **CommandExecutor** — one command at a time: stale output drained,
//!   command sent, output collected until the READY prompt
//! - **TsoTransport** — the blocking transport contract the HTTP layer
//!   implements, with a scripted in-memory implementation for tests
//!
//! The host signals readiness for input with a literal `READY` line; the
//! session and execution logic here revolves around observing that prompt
//! in the right place. Every command runs in its own session: the executor
//! tears the session down when it finishes, and the next command acquires a
//! fresh one.

pub mod config;
pub mod error;
pub mod exec;
pub mod retry;
pub mod session;
pub mod transport;

pub use config::{ClientConfig, SessionProfile};
pub use error::{Result, TransportError, TsoClientError};
pub use exec::{
    CommandExecutor, CommandResult, MAX_CLEAR_PROBES, MAX_OUTPUT_POLLS, READY_PROMPT,
};
pub use retry::RetryPolicy;
pub use session::{SessionManager, MAX_SESSION_RETRIES};
pub use transport::{Call, ScriptedTransport, TsoTransport, PING_SUCCESSFUL};
