//! The transport bridge: one server connection, one UI port pair.
//!
//! The bridge runs as a single cooperative loop. While connecting, every
//! message from the UI is rejected. Once open it fires the on-open action
//! exactly once, then relays frames in both directions until either side
//! goes away. There is no reconnect.
use crate::lsp::connection::{ConnectionState, ConnectionStatus};
use crate::lsp::error::BridgeError;
use crate::lsp::message_creator::MessageFactory;
use crate::lsp::ports::{self, UiHandle, UiPorts};
use crate::lsp::protocol::describe_frame;
use crate::lsp::transport::{Connector, LspTransport};
use crate::lsp::types::{InitializeParams, OutgoingMessage};
use tokio::sync::{mpsc, oneshot};

/// What happens when the connection opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OnOpen {
    /// Send the `initialize` request.
    Initialize,
    /// Signal readiness to the UI and let it drive the handshake.
    Ready,
}

#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub endpoint: String,
    pub on_open: OnOpen,
    pub initialize: InitializeParams,
}

/// Counters collected over one bridge lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeReport {
    /// Frames delivered to the UI.
    pub relayed: u64,
    /// UI messages written to the socket.
    pub sent: u64,
    /// UI messages rejected because the connection was not open, or lost
    /// in a failed write.
    pub dropped: u64,
    pub final_state: ConnectionState,
}

pub struct Bridge<C: Connector> {
    connector: C,
    config: BridgeConfig,
    status: ConnectionStatus,
    ports: UiPorts,
}

impl<C: Connector> Bridge<C> {
    pub fn new(connector: C, config: BridgeConfig) -> (Self, UiHandle) {
        let status = ConnectionStatus::new(&config.endpoint);
        let (ports, handle) = ports::channel(status.clone());
        (
            Bridge {
                connector,
                config,
                status,
                ports,
            },
            handle,
        )
    }

    pub async fn run(self) -> BridgeReport {
        let Bridge {
            connector,
            config,
            status,
            ports,
        } = self;
        let UiPorts {
            incoming,
            mut outgoing,
            ready,
        } = ports;

        let mut relay = Relay {
            factory: MessageFactory::new(),
            status,
            incoming: Some(incoming),
            ready,
            relayed: 0,
            sent: 0,
            dropped: 0,
        };
        let mut ui_open = true;

        tracing::info!(endpoint = %config.endpoint, "connecting");
        let connect = connector.connect(&config.endpoint);
        tokio::pin!(connect);

        let connected = loop {
            tokio::select! {
                biased;
                result = &mut connect => break Some(result),
                message = outgoing.recv() => match message {
                    Some(message) => relay.reject(&message),
                    None => {
                        ui_open = false;
                        break None;
                    }
                },
            }
        };

        match connected {
            Some(Ok(mut transport)) => {
                // Whatever the UI queued while connecting predates the open event.
                relay.reject_queued(&mut outgoing);
                relay.status.transition(ConnectionState::Open);
                tracing::info!(endpoint = %config.endpoint, "connection open");
                relay
                    .serve(transport.as_mut(), &config, &mut outgoing, &mut ui_open)
                    .await;
            }
            Some(Err(e)) => {
                // Not retried. Later sends are rejected by the open check.
                tracing::error!(error = %e, "connection failed");
                relay.status.transition(ConnectionState::Errored);
            }
            None => {
                tracing::info!("ui port closed while connecting, giving up");
                relay.status.transition(ConnectionState::Closed);
            }
        }

        // UI sees end-of-stream on its inbound port.
        relay.incoming = None;

        while ui_open {
            match outgoing.recv().await {
                Some(message) => relay.reject(&message),
                None => ui_open = false,
            }
        }

        let report = relay.report();
        tracing::info!(
            relayed = report.relayed,
            sent = report.sent,
            dropped = report.dropped,
            state = %report.final_state,
            "bridge finished"
        );
        report
    }
}

struct Relay {
    factory: MessageFactory,
    status: ConnectionStatus,
    incoming: Option<mpsc::UnboundedSender<String>>,
    ready: Option<oneshot::Sender<()>>,
    relayed: u64,
    sent: u64,
    dropped: u64,
}

impl Relay {
    async fn serve(
        &mut self,
        transport: &mut dyn LspTransport,
        config: &BridgeConfig,
        outgoing: &mut mpsc::UnboundedReceiver<OutgoingMessage>,
        ui_open: &mut bool,
    ) {
        if let Err(e) = self.on_open(transport, config).await {
            tracing::error!(error = %e, "on-open action failed");
            self.status.transition(ConnectionState::Errored);
            return;
        }

        loop {
            tokio::select! {
                frame = transport.read() => match frame {
                    Ok(Some(frame)) => self.on_message(frame),
                    Ok(None) => {
                        tracing::info!("server closed the connection");
                        self.status.transition(ConnectionState::Closed);
                        return;
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "connection error");
                        self.status.transition(ConnectionState::Errored);
                        return;
                    }
                },
                message = outgoing.recv() => match message {
                    Some(message) => {
                        if let Err(e) = self.send_to_server(transport, &message).await {
                            tracing::error!(error = %e, "send failed");
                            self.dropped += 1;
                            self.status.transition(ConnectionState::Errored);
                            return;
                        }
                    }
                    None => {
                        *ui_open = false;
                        self.close(transport).await;
                        return;
                    }
                },
            }
        }
    }

    async fn on_open(
        &mut self,
        transport: &mut dyn LspTransport,
        config: &BridgeConfig,
    ) -> Result<(), BridgeError> {
        match config.on_open {
            OnOpen::Initialize => {
                let request = self.factory.initialize(&config.initialize)?;
                transport.send(&serde_json::to_string(&request)?).await?;
                tracing::info!(id = request.id, "sent initialize");
            }
            OnOpen::Ready => {
                if let Some(ready) = self.ready.take() {
                    if ready.send(()).is_err() {
                        tracing::debug!("ready signal has no listener");
                    }
                    tracing::info!("signalled ready");
                }
            }
        }
        Ok(())
    }

    async fn send_to_server(
        &mut self,
        transport: &mut dyn LspTransport,
        message: &OutgoingMessage,
    ) -> Result<(), BridgeError> {
        if !self.status.is_open() {
            self.reject(message);
            return Ok(());
        }
        let body = match self.factory.encode(message) {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(error = %e, "dropping unencodable message");
                self.dropped += 1;
                return Ok(());
            }
        };
        transport.send(&body).await?;
        self.sent += 1;
        tracing::trace!(%body, "sent");
        Ok(())
    }

    fn on_message(&mut self, frame: String) {
        tracing::debug!(kind = ?describe_frame(&frame), "received frame");
        match &self.incoming {
            Some(incoming) if incoming.send(frame).is_ok() => self.relayed += 1,
            _ => tracing::debug!("inbound port closed, frame discarded"),
        }
    }

    /// Reject only what is queued right now, so a busy UI cannot stall us.
    fn reject_queued(&mut self, outgoing: &mut mpsc::UnboundedReceiver<OutgoingMessage>) {
        for _ in 0..outgoing.len() {
            match outgoing.try_recv() {
                Ok(message) => self.reject(&message),
                Err(_) => break,
            }
        }
    }

    fn reject(&mut self, message: &OutgoingMessage) {
        self.dropped += 1;
        tracing::error!(state = %self.status.get(), ?message, "WebSocket is not open");
    }

    async fn close(&mut self, transport: &mut dyn LspTransport) {
        tracing::info!("ui port closed, closing connection");
        if let Err(e) = transport.close().await {
            tracing::warn!(error = %e, "close handshake failed");
        }
        self.status.transition(ConnectionState::Closed);
    }

    fn report(&self) -> BridgeReport {
        BridgeReport {
            relayed: self.relayed,
            sent: self.sent,
            dropped: self.dropped,
            final_state: self.status.get(),
        }
    }
}
