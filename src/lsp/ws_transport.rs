// WebSocket transport: one JSON-RPC body per text frame, no Content-Length framing.
use crate::lsp::error::BridgeError;
use crate::lsp::transport::{Connector, LspTransport};
use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::{Error, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

pub struct WsTransport {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsTransport {
    pub fn new(stream: WebSocketStream<MaybeTlsStream<TcpStream>>) -> Self {
        WsTransport { stream }
    }
}

#[async_trait]
impl LspTransport for WsTransport {
    async fn send(&mut self, json_body: &str) -> Result<(), BridgeError> {
        self.stream
            .send(Message::Text(json_body.to_string().into()))
            .await
            .map_err(|e| match e {
                Error::ConnectionClosed | Error::AlreadyClosed => BridgeError::Closed,
                other => BridgeError::WebSocket(other),
            })
    }

    async fn read(&mut self) -> Result<Option<String>, BridgeError> {
        while let Some(message) = self.stream.next().await {
            match message? {
                Message::Text(text) => return Ok(Some(text.to_string())),
                Message::Binary(data) => match String::from_utf8(data.to_vec()) {
                    Ok(text) => return Ok(Some(text)),
                    Err(_) => {
                        tracing::warn!(len = data.len(), "skipping non-UTF-8 binary frame");
                    }
                },
                Message::Close(frame) => {
                    tracing::debug!(?frame, "peer sent close frame");
                    return Ok(None);
                }
                // Pings are answered by tungstenite; pongs carry nothing for us.
                _ => {}
            }
        }
        Ok(None)
    }

    async fn close(&mut self) -> Result<(), BridgeError> {
        self.stream.close(None).await?;
        Ok(())
    }
}

pub struct WsConnector;

#[async_trait]
impl Connector for WsConnector {
    async fn connect(&self, endpoint: &str) -> Result<Box<dyn LspTransport>, BridgeError> {
        let (stream, response) =
            connect_async(endpoint)
                .await
                .map_err(|e| BridgeError::Connect {
                    endpoint: endpoint.to_string(),
                    reason: e.to_string(),
                })?;
        tracing::debug!(status = %response.status(), "websocket upgrade accepted");
        Ok(Box::new(WsTransport::new(stream)))
    }
}
