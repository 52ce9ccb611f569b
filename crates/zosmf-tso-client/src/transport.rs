//! Transport contract for the z/OSMF TSO address space servlet, plus a
//! scripted in-memory implementation for tests and offline use.
//!
//! The real transport performs the HTTP round trips (session start, ping,
//! message send, session end) and parses the JSON response envelope. This
//! crate only consumes the five operations below; nothing here touches the
//! network.

use std::collections::VecDeque;

use crate::config::SessionProfile;
use crate::error::TransportError;

/// Reply text a successful ping carries (matched case-insensitively).
pub const PING_SUCCESSFUL: &str = "ping successful";

/// Blocking transport to the z/OSMF TSO address space servlet.
///
/// `Response` is the opaque per-send envelope; [`retrieve_messages`]
/// extracts the ordered output lines from it.
///
/// [`retrieve_messages`]: TsoTransport::retrieve_messages
pub trait TsoTransport {
    /// Opaque response envelope returned by one send round trip.
    type Response;

    /// Start a new TSO session; returns the servlet key identifying it.
    fn start_session(&mut self, profile: &SessionProfile)
        -> Result<String, TransportError>;

    /// Ping an existing session. A live session answers "Ping successful".
    fn ping_session(&mut self, handle: &str) -> Result<String, TransportError>;

    /// Send one input line (possibly empty) to the session.
    fn send_message(&mut self, handle: &str, text: &str)
        -> Result<Self::Response, TransportError>;

    /// Extract the ordered output lines from a response envelope.
    fn retrieve_messages(&self, response: &Self::Response) -> Vec<String>;

    /// End the session identified by `handle`.
    fn end_session(&mut self, handle: &str) -> Result<(), TransportError>;
}

// ---------------------------------------------------------------------------
// Scripted transport
// ---------------------------------------------------------------------------

/// A transport call observed by [`ScriptedTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// `start_session` was invoked.
    Start,
    /// `ping_session` was invoked with this handle.
    Ping(String),
    /// `send_message` was invoked.
    Send {
        /// Session handle the message was sent to.
        handle: String,
        /// Input line that was sent (empty for a probe).
        text: String,
    },
    /// `end_session` was invoked with this handle.
    End(String),
}

/// In-memory transport replaying canned replies, for tests and offline runs.
///
/// Ping, start, and send replies are consumed front-to-back, one per call;
/// ends succeed unless an end fault has been queued. Every call is recorded
/// in [`calls`](Self::calls) for inspection. Running past the end of a reply
/// queue yields a permanent fault.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    ping_replies: VecDeque<Result<String, TransportError>>,
    start_replies: VecDeque<Result<String, TransportError>>,
    send_replies: VecDeque<Result<Vec<String>, TransportError>>,
    end_faults: VecDeque<TransportError>,
    /// Every call made against this transport, in order.
    pub calls: Vec<Call>,
}

impl ScriptedTransport {
    /// Create a transport with no scripted replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a ping reply.
    pub fn ping_reply(mut self, reply: &str) -> Self {
        self.ping_replies.push_back(Ok(reply.to_string()));
        self
    }

    /// Queue a ping fault.
    pub fn ping_fault(mut self, fault: TransportError) -> Self {
        self.ping_replies.push_back(Err(fault));
        self
    }

    /// Queue a session-start reply (the new servlet key).
    pub fn start_reply(mut self, handle: &str) -> Self {
        self.start_replies.push_back(Ok(handle.to_string()));
        self
    }

    /// Queue a session-start fault.
    pub fn start_fault(mut self, fault: TransportError) -> Self {
        self.start_replies.push_back(Err(fault));
        self
    }

    /// Queue one send reply batch.
    pub fn send_batch(mut self, lines: &[&str]) -> Self {
        self.send_replies
            .push_back(Ok(lines.iter().map(|l| l.to_string()).collect()));
        self
    }

    /// Queue a send fault.
    pub fn send_fault(mut self, fault: TransportError) -> Self {
        self.send_replies.push_back(Err(fault));
        self
    }

    /// Queue an end fault (ends succeed by default).
    pub fn end_fault(mut self, fault: TransportError) -> Self {
        self.end_faults.push_back(fault);
        self
    }

    /// Number of `start_session` calls observed.
    pub fn starts(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, Call::Start)).count()
    }

    /// Number of `send_message` calls observed.
    pub fn sends(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Send { .. }))
            .count()
    }

    /// Number of `end_session` calls observed.
    pub fn ends(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, Call::End(_))).count()
    }
}

fn exhausted(what: &str) -> TransportError {
    TransportError::Permanent(format!("scripted transport: no {what} replies left"))
}

impl TsoTransport for ScriptedTransport {
    type Response = Vec<String>;

    fn start_session(
        &mut self,
        _profile: &SessionProfile,
    ) -> Result<String, TransportError> {
        self.calls.push(Call::Start);
        self.start_replies
            .pop_front()
            .unwrap_or_else(|| Err(exhausted("start")))
    }

    fn ping_session(&mut self, handle: &str) -> Result<String, TransportError> {
        self.calls.push(Call::Ping(handle.to_string()));
        self.ping_replies
            .pop_front()
            .unwrap_or_else(|| Err(exhausted("ping")))
    }

    fn send_message(
        &mut self,
        handle: &str,
        text: &str,
    ) -> Result<Self::Response, TransportError> {
        self.calls.push(Call::Send {
            handle: handle.to_string(),
            text: text.to_string(),
        });
        self.send_replies
            .pop_front()
            .unwrap_or_else(|| Err(exhausted("send")))
    }

    fn retrieve_messages(&self, response: &Self::Response) -> Vec<String> {
        response.clone()
    }

    fn end_session(&mut self, handle: &str) -> Result<(), TransportError> {
        self.calls.push(Call::End(handle.to_string()));
        match self.end_faults.pop_front() {
            Some(fault) => Err(fault),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replies_consumed_in_order() {
        let mut t = ScriptedTransport::new()
            .ping_reply("Ping successful")
            .ping_reply("Session not found");
        assert_eq!(t.ping_session("A").unwrap(), "Ping successful");
        assert_eq!(t.ping_session("A").unwrap(), "Session not found");
    }

    #[test]
    fn test_exhausted_queue_is_permanent_fault() {
        let mut t = ScriptedTransport::new();
        let fault = t.ping_session("A").unwrap_err();
        assert!(!fault.is_transient());
    }

    #[test]
    fn test_calls_recorded() {
        let mut t = ScriptedTransport::new()
            .start_reply("KEY-1")
            .send_batch(&["READY"]);
        t.start_session(&SessionProfile::default()).unwrap();
        t.send_message("KEY-1", "TIME").unwrap();
        t.end_session("KEY-1").unwrap();
        assert_eq!(
            t.calls,
            vec![
                Call::Start,
                Call::Send {
                    handle: "KEY-1".to_string(),
                    text: "TIME".to_string()
                },
                Call::End("KEY-1".to_string()),
            ]
        );
        assert_eq!(t.starts(), 1);
        assert_eq!(t.sends(), 1);
        assert_eq!(t.ends(), 1);
    }

    #[test]
    fn test_retrieve_returns_batch_lines() {
        let mut t = ScriptedTransport::new().send_batch(&["line one", "READY"]);
        let response = t.send_message("K", "").unwrap();
        assert_eq!(t.retrieve_messages(&response), vec!["line one", "READY"]);
    }

    #[test]
    fn test_end_fault_queued() {
        let mut t = ScriptedTransport::new()
            .end_fault(TransportError::Transient("disconnect".into()));
        assert!(t.end_session("K").is_err());
        assert!(t.end_session("K").is_ok());
    }
}
