//! Session lifecycle — obtaining a validated TSO session handle and
//! releasing it.

use tracing::{debug, info, warn};

use crate::config::{ClientConfig, SessionProfile};
use crate::error::{Result, TransportError, TsoClientError};
use crate::retry::RetryPolicy;
use crate::transport::{TsoTransport, PING_SUCCESSFUL};

/// Attempt budget for establishing a usable session.
pub const MAX_SESSION_RETRIES: u32 = 5;

/// Owns the current session handle and knows how to (re)validate it.
///
/// The handle is never handed out without having been pinged successfully or
/// freshly started within the same call. The manager is the single writer of
/// the handle; [`CommandExecutor`](crate::exec::CommandExecutor) borrows it
/// mutably for one command at a time.
#[derive(Debug)]
pub struct SessionManager<T: TsoTransport> {
    transport: T,
    profile: SessionProfile,
    handle: Option<String>,
    retry: RetryPolicy,
}

impl<T: TsoTransport> SessionManager<T> {
    /// Create a manager with no current session.
    pub fn new(transport: T, profile: SessionProfile) -> Self {
        Self {
            transport,
            profile,
            handle: None,
            retry: RetryPolicy::default(),
        }
    }

    /// Create a manager from a client configuration, adopting the configured
    /// session handle when one is present.
    pub fn from_config(transport: T, config: &ClientConfig) -> Self {
        let mut manager = Self::new(transport, config.profile.clone());
        manager.handle = config.session.clone().filter(|s| !s.is_empty());
        manager
    }

    /// Adopt an existing session handle; it is validated on the next
    /// [`acquire_session`](Self::acquire_session).
    pub fn with_session(mut self, handle: impl Into<String>) -> Self {
        self.handle = Some(handle.into());
        self
    }

    /// Override the retry policy (tests use [`RetryPolicy::immediate`]).
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// The currently held session handle, if any.
    pub fn current_handle(&self) -> Option<&str> {
        self.handle.as_deref()
    }

    /// Shared access to the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub(crate) fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Validate the current session or start a fresh one, within the retry
    /// budget.
    ///
    /// An existing handle is pinged first; anything but a "Ping successful"
    /// reply replaces it with a freshly started session. Transient transport
    /// faults pause for the retry delay and count against the budget;
    /// permanent faults clear the handle and propagate immediately.
    /// Exhausting the budget clears the handle and reports
    /// [`TsoClientError::SessionUnavailable`]. The budget check runs after
    /// every attempt, including a successful final one.
    pub fn acquire_session(&mut self) -> Result<String> {
        let mut success = false;
        let mut count = 0u32;

        loop {
            count += 1;
            match self.validate_or_start() {
                Ok(()) => success = true,
                Err(fault) if fault.is_transient() => {
                    warn!(attempt = count, %fault, "session attempt failed");
                }
                Err(fault) => {
                    self.handle = None;
                    return Err(fault.into());
                }
            }

            if count >= self.retry.max_attempts {
                self.handle = None;
                break;
            }
            if success {
                break;
            }
            self.retry.pause();
        }

        match &self.handle {
            Some(handle) => Ok(handle.clone()),
            None => Err(TsoClientError::SessionUnavailable),
        }
    }

    /// One validation attempt: ping the held handle (skipped when absent)
    /// and start a new session unless the ping succeeded.
    fn validate_or_start(&mut self) -> std::result::Result<(), TransportError> {
        let ping = match &self.handle {
            Some(handle) => self.transport.ping_session(handle)?,
            // No session to ping — treated as an unsuccessful ping.
            None => String::new(),
        };

        if ping.eq_ignore_ascii_case(PING_SUCCESSFUL) {
            debug!("existing TSO session is alive");
            return Ok(());
        }

        let handle = self.transport.start_session(&self.profile)?;
        info!(%handle, "TSO session started");
        self.handle = Some(handle);
        Ok(())
    }

    /// End the current session, if any.
    ///
    /// The stored handle is cleared before the transport call so a failing
    /// `end` cannot leave a stale handle behind. A no-op when no session is
    /// held.
    pub fn end_session(&mut self) {
        if let Some(handle) = self.handle.take() {
            match self.transport.end_session(&handle) {
                Ok(()) => info!(%handle, "TSO session ended"),
                Err(fault) => warn!(%handle, %fault, "failed to end TSO session"),
            }
        }
    }
}
