use crate::lsp::error::BridgeError;
use crate::lsp::types::{InitializeParams, OutgoingMessage, Request};
use lsp_types::request::{Initialize, Request as _};
use serde::Serialize;

/// Every request carries this id. Responses are not correlated.
pub const REQUEST_ID: i32 = 1;

pub struct MessageFactory;

impl MessageFactory {
    pub fn new() -> Self {
        MessageFactory
    }

    pub fn get_id(&self) -> i32 {
        REQUEST_ID
    }

    pub fn create_request<T: Serialize>(
        &self,
        method: &str,
        params: T,
    ) -> Result<Request, BridgeError> {
        Ok(Request::new(
            self.get_id(),
            method.to_string(),
            serde_json::to_value(params)?,
        ))
    }

    pub fn initialize(&self, params: &InitializeParams) -> Result<Request, BridgeError> {
        self.create_request(Initialize::METHOD, params)
    }

    /// Serialize an outgoing message into the text put on the wire.
    pub fn encode(&self, message: &OutgoingMessage) -> Result<String, BridgeError> {
        match message {
            OutgoingMessage::Raw(text) => Ok(text.clone()),
            OutgoingMessage::Call { method, params } => {
                let request = self.create_request(method, params)?;
                Ok(serde_json::to_string(&request)?)
            }
        }
    }
}

impl Default for MessageFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_initialize_handshake_bytes() {
        let factory = MessageFactory::new();
        let request = factory.initialize(&InitializeParams::default()).unwrap();
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"processId":null,"rootPath":null,"capabilities":{}}}"#
        );
    }

    #[test]
    fn test_initialize_with_configured_fields() {
        let factory = MessageFactory::new();
        let params = InitializeParams {
            process_id: Some(42),
            root_path: Some("/work".to_string()),
            ..Default::default()
        };
        let request = factory.initialize(&params).unwrap();
        assert_eq!(request.params["processId"], json!(42));
        assert_eq!(request.params["rootPath"], json!("/work"));
    }

    #[test]
    fn test_encode_call_wraps_envelope() {
        let factory = MessageFactory::new();
        let msg = OutgoingMessage::call("textDocument/hover", json!({"uri": "file:///a"}));
        assert_eq!(
            factory.encode(&msg).unwrap(),
            r#"{"jsonrpc":"2.0","id":1,"method":"textDocument/hover","params":{"uri":"file:///a"}}"#
        );
    }

    #[test]
    fn test_encode_raw_is_verbatim() {
        let factory = MessageFactory::new();
        let text = r#"{ "anything" : [1, 2] }"#;
        assert_eq!(factory.encode(&OutgoingMessage::raw(text)).unwrap(), text);
    }

    #[test]
    fn test_id_never_increments() {
        let factory = MessageFactory::new();
        let a = factory.create_request("a", json!({})).unwrap();
        let b = factory.create_request("b", json!({})).unwrap();
        assert_eq!(a.id, REQUEST_ID);
        assert_eq!(b.id, REQUEST_ID);
    }
}
