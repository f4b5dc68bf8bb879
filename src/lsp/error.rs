use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("failed to connect to {endpoint}: {reason}")]
    Connect { endpoint: String, reason: String },
    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
    #[error("failed to serialize message: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("connection closed")]
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_error_names_endpoint() {
        let e = BridgeError::Connect {
            endpoint: "ws://localhost:3001".into(),
            reason: "refused".into(),
        };
        assert_eq!(
            e.to_string(),
            "failed to connect to ws://localhost:3001: refused"
        );
    }

    #[test]
    fn test_converts_into_anyhow() {
        let any: anyhow::Error = BridgeError::Closed.into();
        assert_eq!(any.to_string(), "connection closed");
    }
}
