/// Rough shape of an inbound frame, for log fields only.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameKind {
    Response { id: serde_json::Value },
    Error { id: serde_json::Value },
    Notification { method: String },
    Request { id: serde_json::Value, method: String },
    Other,
}

/// Classify a frame without validating it. Unparseable text is `Other`.
pub fn describe_frame(frame: &str) -> FrameKind {
    let json: serde_json::Value = match serde_json::from_str(frame) {
        Ok(json) => json,
        Err(_) => return FrameKind::Other,
    };

    let method = json
        .get("method")
        .and_then(|m| m.as_str())
        .map(str::to_string);

    match (json.get("id").cloned(), method) {
        (Some(id), Some(method)) => FrameKind::Request { id, method },
        (None, Some(method)) => FrameKind::Notification { method },
        (Some(id), None) if json.get("result").is_some() => FrameKind::Response { id },
        (Some(id), None) if json.get("error").is_some() => FrameKind::Error { id },
        _ => FrameKind::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response() {
        assert_eq!(
            describe_frame(r#"{"jsonrpc":"2.0","id":1,"result":{}}"#),
            FrameKind::Response { id: json!(1) }
        );
    }

    #[test]
    fn test_error_response() {
        assert_eq!(
            describe_frame(r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32601,"message":"nope"}}"#),
            FrameKind::Error { id: json!(1) }
        );
    }

    #[test]
    fn test_notification() {
        assert_eq!(
            describe_frame(r#"{"jsonrpc":"2.0","method":"window/logMessage","params":{}}"#),
            FrameKind::Notification {
                method: "window/logMessage".to_string()
            }
        );
    }

    #[test]
    fn test_server_request() {
        assert_eq!(
            describe_frame(r#"{"jsonrpc":"2.0","id":"a","method":"workspace/configuration"}"#),
            FrameKind::Request {
                id: json!("a"),
                method: "workspace/configuration".to_string()
            }
        );
    }

    #[test]
    fn test_garbage_is_other() {
        assert_eq!(describe_frame("}{"), FrameKind::Other);
        assert_eq!(describe_frame("[1,2]"), FrameKind::Other);
    }
}
