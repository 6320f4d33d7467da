//! RPC stdio Server
//!
//! Line-delimited JSON-RPC 2.0 over any async reader/writer pair. Events
//! dispatched while a request runs are written as notifications before that
//! request's response.

use crate::events::DispatchedEvent;
use crate::rpc::handlers::handle_request;
use crate::rpc::types::{RpcError, RpcNotification, RpcRequest, RpcResponse};
use crate::services::BookmarksApi;
use crate::tree::BookmarkModel;
use serde::Serialize;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, error, info, instrument, warn};

/// Run the server on stdin/stdout until stdin closes
#[instrument(skip(api, events))]
pub async fn run_stdio_server<M: BookmarkModel>(
    api: &mut BookmarksApi<M>,
    events: &mut broadcast::Receiver<DispatchedEvent>,
) -> anyhow::Result<()> {
    info!("Bookmarks stdio server started");

    let reader = BufReader::new(tokio::io::stdin());
    let mut writer = BufWriter::new(tokio::io::stdout());
    serve(api, events, reader, &mut writer).await?;

    info!("Bookmarks stdio server stopped (stdin closed)");
    Ok(())
}

/// Serve requests from `reader` until EOF
///
/// Returns Ok(()) at end of input, or Err on I/O failure.
pub async fn serve<M, R, W>(
    api: &mut BookmarksApi<M>,
    events: &mut broadcast::Receiver<DispatchedEvent>,
    reader: R,
    writer: &mut W,
) -> anyhow::Result<()>
where
    M: BookmarkModel,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        debug!("RPC request: {}", line);

        let response = match decode_request(&line) {
            Ok(request) => dispatch(api, request),
            Err(response) => response,
        };

        flush_events(events, writer).await?;
        write_message(writer, &response).await?;
    }

    Ok(())
}

/// Parse one line into a request, or the error response to send instead
fn decode_request(line: &str) -> Result<RpcRequest, RpcResponse> {
    let value: Value = serde_json::from_str(line).map_err(|e| {
        warn!("Failed to parse JSON-RPC request: {}", e);
        // Unknown id since parsing failed
        RpcResponse::error(0, RpcError::parse_error(format!("Invalid JSON: {}", e)))
    })?;

    let id = value.get("id").and_then(Value::as_u64).unwrap_or(0);
    serde_json::from_value(value).map_err(|e| {
        warn!("Invalid JSON-RPC request: {}", e);
        RpcResponse::error(id, RpcError::invalid_request(e.to_string()))
    })
}

#[instrument(skip(api, request), fields(method = %request.method, id = %request.id))]
fn dispatch<M: BookmarkModel>(api: &mut BookmarksApi<M>, request: RpcRequest) -> RpcResponse {
    match handle_request(api, &request.method, request.params) {
        Ok(result) => {
            debug!("RPC request {} succeeded", request.id);
            RpcResponse::success(request.id, result)
        }
        Err(error) => {
            warn!(
                "RPC request {} failed: {} (code: {})",
                request.id, error.message, error.code
            );
            RpcResponse::error(request.id, error)
        }
    }
}

/// Write every event received so far as a notification
async fn flush_events<W: AsyncWrite + Unpin>(
    events: &mut broadcast::Receiver<DispatchedEvent>,
    writer: &mut W,
) -> anyhow::Result<()> {
    loop {
        match events.try_recv() {
            Ok(event) => match RpcNotification::from_event(&event) {
                Ok(notification) => write_message(writer, &notification).await?,
                Err(e) => error!("Dropping {} with malformed arguments: {}", event.name, e),
            },
            Err(TryRecvError::Lagged(skipped)) => {
                warn!("Event listener lagged, {} events lost", skipped);
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return Ok(()),
        }
    }
}

async fn write_message<W, T>(writer: &mut W, message: &T) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let json = serde_json::to_string(message)?;
    writer.write_all(json.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}
