//! Message ports between the bridge and the UI layer.
use crate::lsp::connection::ConnectionStatus;
use crate::lsp::types::OutgoingMessage;
use tokio::sync::{mpsc, oneshot};

/// Bridge-side ends.
pub struct UiPorts {
    /// bridge -> UI, raw frame strings.
    pub incoming: mpsc::UnboundedSender<String>,
    /// UI -> bridge.
    pub outgoing: mpsc::UnboundedReceiver<OutgoingMessage>,
    /// Zero-payload readiness signal, fired at most once.
    pub ready: Option<oneshot::Sender<()>>,
}

/// UI-side ends.
pub struct UiHandle {
    pub incoming: mpsc::UnboundedReceiver<String>,
    pub outgoing: mpsc::UnboundedSender<OutgoingMessage>,
    pub ready: oneshot::Receiver<()>,
    pub status: ConnectionStatus,
}

pub fn channel(status: ConnectionStatus) -> (UiPorts, UiHandle) {
    let (incoming_tx, incoming_rx) = mpsc::unbounded_channel();
    let (outgoing_tx, outgoing_rx) = mpsc::unbounded_channel();
    let (ready_tx, ready_rx) = oneshot::channel();

    (
        UiPorts {
            incoming: incoming_tx,
            outgoing: outgoing_rx,
            ready: Some(ready_tx),
        },
        UiHandle {
            incoming: incoming_rx,
            outgoing: outgoing_tx,
            ready: ready_rx,
            status,
        },
    )
}
