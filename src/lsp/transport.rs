//! Transport abstraction for raw JSON-RPC text frames.
use crate::lsp::error::BridgeError;
use async_trait::async_trait;

/// Minimal async trait for a message transport.
/// - `send` takes one JSON-RPC body and transmits it as a single frame.
/// - `read` returns the next frame body, or `None` once the peer closed.
#[async_trait]
pub trait LspTransport: Send {
    async fn send(&mut self, json_body: &str) -> Result<(), BridgeError>;
    async fn read(&mut self) -> Result<Option<String>, BridgeError>;
    async fn close(&mut self) -> Result<(), BridgeError>;
}

/// Opens transports to an endpoint.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, endpoint: &str) -> Result<Box<dyn LspTransport>, BridgeError>;
}
