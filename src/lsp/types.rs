use lsp_types::ClientCapabilities;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Request {
    pub jsonrpc: String,
    pub id: i32,
    pub method: String,
    pub params: serde_json::Value,
}

impl Request {
    pub fn new(id: i32, method: String, params: serde_json::Value) -> Self {
        Request {
            jsonrpc: "2.0".to_string(),
            id,
            method,
            params,
        }
    }
}

/// Parameters of the `initialize` handshake. Field order is the wire order.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InitializeParams {
    pub process_id: Option<u32>,
    pub root_path: Option<String>,
    pub capabilities: ClientCapabilities,
}

/// A message produced by the UI layer for delivery to the server.
#[derive(Debug, Clone, PartialEq)]
pub enum OutgoingMessage {
    /// Already-serialized text, sent as-is.
    Raw(String),
    /// Wrapped in a JSON-RPC request envelope before sending.
    Call {
        method: String,
        params: serde_json::Value,
    },
}

impl OutgoingMessage {
    pub fn raw(text: impl Into<String>) -> Self {
        OutgoingMessage::Raw(text.into())
    }

    pub fn call(method: impl Into<String>, params: serde_json::Value) -> Self {
        OutgoingMessage::Call {
            method: method.into(),
            params,
        }
    }

    /// Interpret one message from the UI.
    ///
    /// A JSON object carrying `method` but neither `jsonrpc` nor `id` is a
    /// `{method, params}` pair; anything else is forwarded verbatim, so a
    /// caller-chosen id is never replaced.
    pub fn from_text(text: &str) -> Self {
        if let Ok(serde_json::Value::Object(mut map)) = serde_json::from_str(text) {
            if !map.contains_key("jsonrpc") && !map.contains_key("id") {
                if let Some(serde_json::Value::String(method)) = map.remove("method") {
                    let params = map
                        .remove("params")
                        .unwrap_or_else(|| serde_json::json!({}));
                    return Self::call(method, params);
                }
            }
        }
        Self::raw(text)
    }
}
