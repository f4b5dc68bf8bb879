//! Stdio front-end standing in for the UI layer.
//!
//! Both directions use LSP base-protocol framing (`Content-Length` header,
//! blank line, body) so frames containing newlines stay intact.
use crate::lsp::types::OutgoingMessage;
use anyhow::anyhow;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

/// Read framed messages and push each one onto the outgoing port.
/// Returns the number of messages submitted.
pub async fn pump_messages<R>(
    mut reader: R,
    outgoing: mpsc::UnboundedSender<OutgoingMessage>,
) -> anyhow::Result<u64>
where
    R: AsyncRead + Unpin,
{
    let mut count = 0;
    while let Some(body) = read_message_from(&mut reader).await? {
        if outgoing.send(OutgoingMessage::from_text(&body)).is_err() {
            tracing::debug!("bridge stopped accepting messages");
            break;
        }
        count += 1;
    }
    Ok(count)
}

/// Write every inbound frame until the bridge closes the port.
pub async fn drain_frames<W>(
    mut incoming: mpsc::UnboundedReceiver<String>,
    mut writer: W,
) -> anyhow::Result<u64>
where
    W: AsyncWrite + Unpin,
{
    let mut count = 0;
    while let Some(frame) = incoming.recv().await {
        write_message_to(&mut writer, &frame).await?;
        count += 1;
    }
    Ok(count)
}

pub(crate) async fn write_message_to<W>(writer: &mut W, json_body: &str) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let header = format!("Content-Length: {}\r\n\r\n", json_body.len());
    writer.write_all(header.as_bytes()).await?;
    writer.write_all(json_body.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

/// Read one framed message. `None` on a clean end of input between messages.
pub(crate) async fn read_message_from<R>(reader: &mut R) -> anyhow::Result<Option<String>>
where
    R: AsyncRead + Unpin,
{
    let mut header_buffer = Vec::new();

    loop {
        let byte = match reader.read_u8().await {
            Ok(byte) => byte,
            Err(e)
                if e.kind() == std::io::ErrorKind::UnexpectedEof && header_buffer.is_empty() =>
            {
                return Ok(None)
            }
            Err(e) => return Err(e.into()),
        };
        header_buffer.push(byte);
        if header_buffer.ends_with(b"\r\n\r\n") {
            break;
        }
    }

    let header_str = String::from_utf8(header_buffer)?;
    let content_length = get_content_length_from(&header_str)?;
    let mut payload_buffer = vec![0u8; content_length];
    reader.read_exact(&mut payload_buffer).await?;

    Ok(Some(String::from_utf8(payload_buffer)?))
}

/// Extract Content-Length from header string. Case-insensitive search.
fn get_content_length_from(header: &str) -> anyhow::Result<usize> {
    for line in header.lines() {
        if line.to_lowercase().starts_with("content-length:") {
            if let Some(v) = line.split(':').nth(1) {
                return Ok(v.trim().parse::<usize>()?);
            }
        }
    }
    Err(anyhow!("Content-Length header not found"))
}
