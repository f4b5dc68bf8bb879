use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Lifecycle of the single server connection.
///
/// `Connecting -> Open -> Closed`, with `Errored` reachable from
/// `Connecting` or `Open`. `Closed` and `Errored` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ConnectionState {
    Connecting = 0,
    Open = 1,
    Closed = 2,
    Errored = 3,
}

impl ConnectionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, ConnectionState::Closed | ConnectionState::Errored)
    }
}

impl From<u8> for ConnectionState {
    fn from(value: u8) -> Self {
        match value {
            0 => ConnectionState::Connecting,
            1 => ConnectionState::Open,
            2 => ConnectionState::Closed,
            _ => ConnectionState::Errored,
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConnectionState::Connecting => "connecting",
            ConnectionState::Open => "open",
            ConnectionState::Closed => "closed",
            ConnectionState::Errored => "errored",
        };
        f.write_str(s)
    }
}

/// Shared, lock-free view of the connection state.
#[derive(Debug, Clone)]
pub struct ConnectionStatus {
    endpoint: Arc<str>,
    state: Arc<AtomicU8>,
}

impl ConnectionStatus {
    pub fn new(endpoint: &str) -> Self {
        ConnectionStatus {
            endpoint: Arc::from(endpoint),
            state: Arc::new(AtomicU8::new(ConnectionState::Connecting as u8)),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn get(&self) -> ConnectionState {
        ConnectionState::from(self.state.load(Ordering::SeqCst))
    }

    pub fn is_open(&self) -> bool {
        self.get() == ConnectionState::Open
    }

    /// Move to `next`. Transitions out of a terminal state are ignored;
    /// returns whether the state changed.
    pub(crate) fn transition(&self, next: ConnectionState) -> bool {
        let current = self.get();
        if current.is_terminal() || current == next {
            return false;
        }
        if current == ConnectionState::Open && next == ConnectionState::Connecting {
            return false;
        }
        self.state.store(next as u8, Ordering::SeqCst);
        tracing::debug!(endpoint = %self.endpoint, from = %current, to = %next, "connection state");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_connecting() {
        let status = ConnectionStatus::new("ws://localhost:3001");
        assert_eq!(status.get(), ConnectionState::Connecting);
        assert!(!status.is_open());
        assert_eq!(status.endpoint(), "ws://localhost:3001");
    }

    #[test]
    fn test_terminal_states_never_reopen() {
        let status = ConnectionStatus::new("ws://x");
        assert!(status.transition(ConnectionState::Open));
        assert!(status.transition(ConnectionState::Closed));
        assert!(!status.transition(ConnectionState::Open));
        assert!(!status.transition(ConnectionState::Connecting));
        assert_eq!(status.get(), ConnectionState::Closed);
    }

    #[test]
    fn test_errored_from_connecting() {
        let status = ConnectionStatus::new("ws://x");
        assert!(status.transition(ConnectionState::Errored));
        assert!(!status.transition(ConnectionState::Open));
        assert_eq!(status.get(), ConnectionState::Errored);
    }

    #[test]
    fn test_no_transition_back_to_connecting() {
        let status = ConnectionStatus::new("ws://x");
        status.transition(ConnectionState::Open);
        assert!(!status.transition(ConnectionState::Connecting));
        assert!(status.is_open());
    }

    #[test]
    fn test_clones_share_state() {
        let status = ConnectionStatus::new("ws://x");
        let view = status.clone();
        status.transition(ConnectionState::Open);
        assert!(view.is_open());
    }

    #[test]
    fn test_state_display() {
        assert_eq!(ConnectionState::Errored.to_string(), "errored");
        assert_eq!(ConnectionState::from(1), ConnectionState::Open);
    }
}
