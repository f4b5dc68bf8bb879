use tokio::io::BufReader;

use crate::cli::Config;
use crate::frontend;
use crate::lsp::bridge::Bridge;
use crate::lsp::ports::UiHandle;
use crate::lsp::ws_transport::WsConnector;

pub async fn run(config: Config) -> anyhow::Result<()> {
    let (bridge, ui) = Bridge::new(WsConnector, config.bridge);
    let UiHandle {
        incoming,
        outgoing,
        ready,
        status,
    } = ui;

    let bridge_task = tokio::spawn(bridge.run());
    let pump = tokio::spawn(async move {
        let stdin = BufReader::new(tokio::io::stdin());
        if let Err(e) = frontend::pump_messages(stdin, outgoing).await {
            tracing::error!(error = %e, "stdin framing error");
        }
    });
    tokio::spawn(async move {
        if ready.await.is_ok() {
            tracing::info!("server ready");
        }
    });

    let drained = tokio::select! {
        result = frontend::drain_frames(incoming, tokio::io::stdout()) => result.map(Some),
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupted");
            Ok(None)
        }
    };

    // Dropping the pump's sender lets the bridge close the socket and finish.
    pump.abort();
    let report = bridge_task.await?;

    tracing::info!(
        endpoint = status.endpoint(),
        state = %status.get(),
        dropped = report.dropped,
        "done"
    );

    if let Some(frames) = drained? {
        tracing::debug!(frames, "stdout drained");
    }
    Ok(())
}
