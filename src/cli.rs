use clap::Parser;

use crate::lsp::bridge::{BridgeConfig, OnOpen};
use crate::lsp::types::InitializeParams;

#[derive(Debug, Clone)]
pub struct Config {
    pub bridge: BridgeConfig,
    pub log_level: String,
}

#[derive(Parser, Debug)]
#[command(name = "lsp_ws_bridge")]
#[command(
    about = "Relay JSON-RPC between stdio and a language server over WebSocket",
    long_about = "Reads Content-Length framed messages from stdin and writes each server frame to stdout with the same framing.\n\
                  A message like {\"method\":..,\"params\":..} without jsonrpc or id is wrapped in a JSON-RPC request; anything else is sent as-is.\n\
                  Example endpoint: wss://localhost:3000/api/v1/humio-lsp-raw"
)]
pub struct Cli {
    /// WebSocket endpoint of the language server.
    #[arg(long, env = "LSP_BRIDGE_ENDPOINT", default_value = "ws://localhost:3001")]
    pub endpoint: String,
    /// Action taken once the connection opens.
    #[arg(long, env = "LSP_BRIDGE_ON_OPEN", value_enum, default_value_t = OnOpen::Initialize)]
    pub on_open: OnOpen,
    /// `rootPath` sent in the initialize request.
    #[arg(long, env = "LSP_BRIDGE_ROOT_PATH")]
    pub root_path: Option<String>,
    /// Send this process id as `processId` instead of null.
    #[arg(long)]
    pub send_process_id: bool,
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl Cli {
    pub fn from_args() -> Self {
        Self::parse()
    }

    pub fn into_config(self) -> Config {
        Config {
            bridge: BridgeConfig {
                endpoint: self.endpoint,
                on_open: self.on_open,
                initialize: InitializeParams {
                    process_id: self.send_process_id.then(std::process::id),
                    root_path: self.root_path,
                    ..Default::default()
                },
            },
            log_level: self.log_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_reproduce_local_variant() {
        let cli = Cli::try_parse_from(["lsp_ws_bridge"]).unwrap();
        let config = cli.into_config();
        if std::env::var("LSP_BRIDGE_ENDPOINT").is_err() {
            assert_eq!(config.bridge.endpoint, "ws://localhost:3001");
        }
        if std::env::var("LSP_BRIDGE_ON_OPEN").is_err() {
            assert_eq!(config.bridge.on_open, OnOpen::Initialize);
        }
        assert_eq!(config.bridge.initialize.process_id, None);
    }

    #[test]
    fn test_flags_override() {
        let cli = Cli::try_parse_from([
            "lsp_ws_bridge",
            "--endpoint",
            "wss://localhost:3000/api/v1/humio-lsp-raw",
            "--on-open",
            "ready",
            "--root-path",
            "/srv/project",
            "--send-process-id",
        ])
        .unwrap();
        let config = cli.into_config();
        assert_eq!(
            config.bridge.endpoint,
            "wss://localhost:3000/api/v1/humio-lsp-raw"
        );
        assert_eq!(config.bridge.on_open, OnOpen::Ready);
        assert_eq!(
            config.bridge.initialize.root_path.as_deref(),
            Some("/srv/project")
        );
        assert_eq!(
            config.bridge.initialize.process_id,
            Some(std::process::id())
        );
    }
}
