use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::probe::UNAVAILABLE;

/// This node's identity on the private overlay network (Tailscale).
///
/// `os` and `peers` are absent in the offline placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayStatus {
    pub ip: String,
    pub hostname: String,
    pub online: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peers: Option<usize>,
}

impl OverlayStatus {
    /// Placeholder used when the status command fails or prints garbage.
    #[must_use]
    pub fn offline() -> Self {
        Self {
            ip: UNAVAILABLE.to_string(),
            hostname: UNAVAILABLE.to_string(),
            online: false,
            os: None,
            peers: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct StatusDocument {
    #[serde(rename = "Self", default)]
    self_node: Option<SelfNode>,
    #[serde(rename = "Peer", default)]
    peer: Option<HashMap<String, Value>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SelfNode {
    #[serde(rename = "TailscaleIPs", default)]
    tailscale_ips: Option<Vec<String>>,
    #[serde(default)]
    host_name: Option<String>,
    #[serde(default)]
    online: Option<bool>,
    #[serde(rename = "OS", default)]
    os: Option<String>,
}

/// Parses `tailscale status --json`.
///
/// Missing fields inside a well-formed document fall back individually; only
/// a document that is not JSON at all is an error.
///
/// # Errors
/// Returns the JSON error if `output` cannot be decoded.
pub fn parse_overlay(output: &str) -> Result<OverlayStatus, serde_json::Error> {
    let doc: StatusDocument = serde_json::from_str(output)?;
    let node = doc.self_node.unwrap_or_default();
    let or_unavailable = |v: Option<String>| v.unwrap_or_else(|| UNAVAILABLE.to_string());

    Ok(OverlayStatus {
        ip: or_unavailable(node.tailscale_ips.and_then(|ips| ips.into_iter().next())),
        hostname: or_unavailable(node.host_name),
        online: node.online.unwrap_or(false),
        os: Some(or_unavailable(node.os)),
        peers: Some(doc.peer.map_or(0, |p| p.len())),
    })
}
