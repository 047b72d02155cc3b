//! Single-attempt, deadline-bounded transfers.
//!
//! These primitives never retry. A failure of any kind is returned to the
//! caller, which decides whether another endpoint is worth trying.

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;
use tracing::{debug, trace};

use super::http::{HttpClient, HttpResponse};
use crate::data::TransferProgress;
use crate::error::{FetchError, Result};

/// GET `url` and buffer the whole body in memory.
pub async fn fetch_bytes<C: HttpClient>(
    client: &C,
    url: &str,
    timeout: Option<Duration>,
) -> Result<Bytes> {
    with_deadline(url, timeout, async {
        let response = open(client, url, timeout).await?;
        let mut body = response.body;
        let mut buffer = BytesMut::new();

        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(|e| FetchError::transport(url, e))?;
            buffer.extend_from_slice(&chunk);
        }

        debug!(url, bytes = buffer.len(), "fetched");
        Ok(buffer.freeze())
    })
    .await
}

/// GET `url` and stream the body into a freshly created `dest`.
///
/// The destination is only created once the server has answered with a
/// success status. The file handle is released on every exit path; a failed
/// transfer may leave a truncated file behind. Returns the bytes written.
pub async fn fetch_to_file<C: HttpClient>(
    client: &C,
    url: &str,
    dest: &Path,
    timeout: Option<Duration>,
    on_progress: Option<&(dyn Fn(&TransferProgress) + Send + Sync)>,
) -> Result<u64> {
    with_deadline(url, timeout, async {
        let response = open(client, url, timeout).await?;
        let total_bytes = response.content_length;
        let mut body = response.body;

        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| FetchError::io(parent, e))?;
        }
        let mut file = tokio::fs::File::create(dest)
            .await
            .map_err(|e| FetchError::io(dest, e))?;

        let mut bytes_downloaded = 0u64;
        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(|e| FetchError::transport(url, e))?;
            file.write_all(&chunk)
                .await
                .map_err(|e| FetchError::io(dest, e))?;
            bytes_downloaded += chunk.len() as u64;

            if let Some(callback) = on_progress {
                callback(&TransferProgress {
                    bytes_downloaded,
                    total_bytes,
                });
            }
        }

        file.flush().await.map_err(|e| FetchError::io(dest, e))?;
        debug!(url, bytes = bytes_downloaded, dest = %dest.display(), "stored");
        Ok(bytes_downloaded)
    })
    .await
}

/// Send the request and insist on a 2xx status.
async fn open<C: HttpClient>(
    client: &C,
    url: &str,
    timeout: Option<Duration>,
) -> Result<HttpResponse<C::Error>> {
    trace!(url, ?timeout, "GET");
    let response = client
        .get(url, timeout)
        .await
        .map_err(|e| FetchError::transport(url, e))?;

    if !response.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: response.status,
        });
    }

    Ok(response)
}

/// Bound `attempt` by `timeout`; expiry drops (cancels) the in-flight request.
async fn with_deadline<T>(
    url: &str,
    timeout: Option<Duration>,
    attempt: impl Future<Output = Result<T>>,
) -> Result<T> {
    match timeout {
        Some(limit) => tokio::time::timeout(limit, attempt)
            .await
            .map_err(|elapsed| FetchError::transport(url, elapsed))?,
        None => attempt.await,
    }
}
