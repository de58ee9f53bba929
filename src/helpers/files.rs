//! Base64 / data-URL file conversion

use crate::error::{PortalError, PortalResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::Path;
use tokio::fs;
use tracing::debug;

const BASE64_MARKER: &str = "base64,";

/// Encode bytes as a `data:` URL
pub fn encode_data_url(bytes: &[u8], mime: &str) -> String {
    format!("data:{};{}{}", mime, BASE64_MARKER, STANDARD.encode(bytes))
}

/// Drop a `data:...;base64,` prefix if present
pub fn strip_data_url(content: &str) -> &str {
    match content.find(BASE64_MARKER) {
        Some(pos) => &content[pos + BASE64_MARKER.len()..],
        None => content,
    }
}

/// Read a file and encode it as a `data:` URL
pub async fn encode_file(path: &Path, mime: &str) -> PortalResult<String> {
    let bytes = fs::read(path)
        .await
        .map_err(|e| PortalError::io(format!("reading {}", path.display()), e))?;
    Ok(encode_data_url(&bytes, mime))
}

/// Decode base64 content (raw or data URL) into a file; returns bytes written
pub async fn decode_base64_file(content: &str, path: &Path) -> PortalResult<usize> {
    let payload: String = strip_data_url(content)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let bytes = STANDARD.decode(payload)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| PortalError::io(format!("creating {}", parent.display()), e))?;
    }
    fs::write(path, &bytes)
        .await
        .map_err(|e| PortalError::io(format!("writing {}", path.display()), e))?;

    debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(bytes.len())
}
