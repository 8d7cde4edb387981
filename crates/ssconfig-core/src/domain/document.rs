//! The aggregate settings document.
//!
//! [`ConfigurationDocument`] is the single value persisted per installation.
//! It is decoded leniently (unknown fields ignored, missing or `null` fields
//! defaulted) and then passed through [`ConfigurationDocument::repair`], which
//! restores every invariant the rest of the client relies on:
//!
//! - `servers` is never empty.
//! - `local_port` is never zero.
//! - `active_index` lies in `[-1, servers.len() - 1]`.
//! - `active_index == -1` only when a selection strategy is set.
//!
//! # Wire format (for beginners)
//!
//! The document is stored as JSON.  Field names follow the names existing
//! installations already use, which is why the Rust field `servers` appears
//! as `configs` on disk and `active_index` as `index`:
//!
//! ```json
//! {
//!   "configs": [{ "server": "203.0.113.7", "server_port": 8388, "password": "…",
//!                 "method": "aes-256-cfb", "remarks": "", "timeout": 5 }],
//!   "index": 0,
//!   "shareOverLan": false,
//!   "isDefault": false,
//!   "localPort": 1080,
//!   "logViewer": { "fontName": "Consolas", "fontSize": 8.0, … },
//!   "proxy": { "useProxy": false, "proxyType": 0, … }
//! }
//! ```
//!
//! The `#[serde(default)]` attribute on the struct makes every field optional
//! on input: a missing field takes the value from `Default::default()`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::log_viewer::LogViewerConfig;
use super::proxy::UpstreamProxyConfig;
use super::server::ServerProfile;
use super::wire::null_as_default;

/// Local listener port used when the document does not set one.
pub const DEFAULT_LOCAL_PORT: i32 = 1080;

/// Persisted settings for one client installation.
///
/// `Default` yields the raw "nothing decoded" state (no servers, local port
/// `0`).  Call [`repair`](Self::repair) before handing it to the rest of the
/// client, or start from [`baseline`](Self::baseline).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigurationDocument {
    /// Upstream servers in menu order.
    #[serde(rename = "configs", deserialize_with = "null_as_default")]
    pub servers: Vec<ServerProfile>,

    /// Server selection strategy name.  When set, `active_index` is ignored.
    #[serde(rename = "strategy", skip_serializing_if = "Option::is_none")]
    pub selection_strategy: Option<String>,

    /// Position of the active server, or `-1` to let the strategy decide.
    #[serde(rename = "index")]
    pub active_index: i32,

    pub share_over_lan: bool,

    /// `true` while the document has never been explicitly saved.
    #[serde(rename = "isDefault")]
    pub is_default_document: bool,

    pub local_port: i32,
    pub availability_statistics: bool,
    pub auto_check_update: bool,
    pub auto_update_feeds: bool,
    pub check_pre_release: bool,

    #[serde(rename = "isVerboseLogging")]
    pub verbose_logging: bool,

    #[serde(deserialize_with = "null_as_default")]
    pub log_viewer: LogViewerConfig,

    /// Upstream proxy the client chains through.
    #[serde(rename = "proxy", deserialize_with = "null_as_default")]
    pub proxy: UpstreamProxyConfig,
}

impl ConfigurationDocument {
    /// The hard-coded fallback returned when the stored document cannot be read.
    pub fn baseline() -> Self {
        Self {
            servers: vec![ServerProfile::default()],
            active_index: 0,
            is_default_document: true,
            local_port: DEFAULT_LOCAL_PORT,
            auto_check_update: true,
            ..Self::default()
        }
    }

    /// `true` when a selection strategy overrides `active_index`.
    pub fn uses_strategy(&self) -> bool {
        self.selection_strategy.is_some()
    }

    /// Restores the document invariants in place.
    ///
    /// Idempotent: a second call never changes anything.
    pub fn repair(&mut self) {
        if self.servers.is_empty() {
            debug!("server list empty, inserting default profile");
            self.servers.push(ServerProfile::default());
        }
        if self.local_port == 0 {
            debug!(port = DEFAULT_LOCAL_PORT, "local port unset, using default");
            self.local_port = DEFAULT_LOCAL_PORT;
        }
        self.clamp_selection();
        self.log_viewer.check_config();
        self.proxy.check_config();
    }

    /// Pulls `active_index` back into `[-1, servers.len() - 1]`.
    ///
    /// A document without a strategy must name a concrete server, so `-1`
    /// becomes `0` in that case.
    pub fn clamp_selection(&mut self) {
        let last = i32::try_from(self.servers.len()).unwrap_or(i32::MAX) - 1;
        if self.active_index > last {
            debug!(index = self.active_index, last, "active index past end of server list");
            self.active_index = last;
        }
        if self.active_index < -1 {
            self.active_index = -1;
        }
        if self.active_index == -1 && !self.uses_strategy() {
            self.active_index = 0;
        }
    }

    /// The active server, or a default profile when the index does not
    /// point into the list (e.g. a strategy is in charge).
    pub fn current_server(&self) -> ServerProfile {
        usize::try_from(self.active_index)
            .ok()
            .and_then(|i| self.servers.get(i))
            .cloned()
            .unwrap_or_default()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn server(address: &str) -> ServerProfile {
        ServerProfile {
            address: address.to_string(),
            password: "pw".to_string(),
            ..ServerProfile::default()
        }
    }

    fn with_servers(n: usize) -> ConfigurationDocument {
        ConfigurationDocument {
            servers: (0..n).map(|i| server(&format!("10.0.0.{i}"))).collect(),
            local_port: 1081,
            ..ConfigurationDocument::default()
        }
    }

    // ── baseline ──────────────────────────────────────────────────────────────

    #[test]
    fn test_baseline_is_ready_to_use() {
        let doc = ConfigurationDocument::baseline();

        assert_eq!(doc.servers, vec![ServerProfile::default()]);
        assert_eq!(doc.active_index, 0);
        assert_eq!(doc.local_port, 1080);
        assert!(doc.auto_check_update);
        assert!(doc.is_default_document);
        assert_eq!(doc.log_viewer, LogViewerConfig::default());
        assert_eq!(doc.proxy, UpstreamProxyConfig::default());
    }

    #[test]
    fn test_baseline_is_unchanged_by_repair() {
        let mut doc = ConfigurationDocument::baseline();
        doc.repair();
        assert_eq!(doc, ConfigurationDocument::baseline());
    }

    // ── repair ────────────────────────────────────────────────────────────────

    #[test]
    fn test_repair_fills_empty_document() {
        // Arrange
        let mut doc = ConfigurationDocument::default();

        // Act
        doc.repair();

        // Assert
        assert_eq!(doc.servers.len(), 1);
        assert_eq!(doc.local_port, 1080);
        assert_eq!(doc.active_index, 0);
    }

    #[test]
    fn test_repair_clamps_index_past_inserted_default() {
        // Arrange: no servers but a stale index
        let mut doc = ConfigurationDocument {
            active_index: 5,
            ..ConfigurationDocument::default()
        };

        // Act
        doc.repair();

        // Assert
        assert_eq!(doc.servers, vec![ServerProfile::default()]);
        assert_eq!(doc.active_index, 0);
    }

    #[test]
    fn test_repair_forces_concrete_selection_without_strategy() {
        let mut doc = with_servers(2);
        doc.active_index = -1;

        doc.repair();

        assert_eq!(doc.active_index, 0);
    }

    #[test]
    fn test_repair_keeps_strategy_selection() {
        let mut doc = with_servers(2);
        doc.active_index = -1;
        doc.selection_strategy = Some("LowestLatency".to_string());

        doc.repair();

        assert_eq!(doc.active_index, -1);
    }

    #[test]
    fn test_repair_keeps_explicit_local_port() {
        let mut doc = with_servers(1);
        doc.repair();
        assert_eq!(doc.local_port, 1081);
    }

    #[test]
    fn test_repair_runs_nested_checks() {
        let mut doc = with_servers(1);
        doc.proxy.proxy_type = 42;
        doc.log_viewer.font_size = -3.0;

        doc.repair();

        assert_eq!(doc.proxy.proxy_type, 0);
        assert_eq!(doc.log_viewer.font_size, 8.0);
    }

    #[test]
    fn test_repair_is_idempotent() {
        let inputs = [
            ConfigurationDocument::default(),
            ConfigurationDocument {
                active_index: -7,
                ..with_servers(3)
            },
            ConfigurationDocument {
                active_index: 99,
                selection_strategy: Some("Balancing".to_string()),
                ..with_servers(4)
            },
        ];

        for input in inputs {
            let mut once = input.clone();
            once.repair();
            let mut twice = once.clone();
            twice.repair();
            assert_eq!(once, twice, "repair must be idempotent for {input:?}");
        }
    }

    // ── clamp_selection ───────────────────────────────────────────────────────

    #[test]
    fn test_clamp_selection_pulls_index_to_last_server() {
        let mut doc = with_servers(3);
        doc.active_index = 10;

        doc.clamp_selection();

        assert_eq!(doc.active_index, 2);
    }

    #[test]
    fn test_clamp_selection_raises_negative_index() {
        let mut doc = with_servers(3);
        doc.active_index = -4;
        doc.selection_strategy = Some("HighAvailability".to_string());

        doc.clamp_selection();

        assert_eq!(doc.active_index, -1);
    }

    #[test]
    fn test_clamp_selection_negative_index_without_strategy_becomes_zero() {
        let mut doc = with_servers(3);
        doc.active_index = -4;

        doc.clamp_selection();

        assert_eq!(doc.active_index, 0);
    }

    // ── current_server ────────────────────────────────────────────────────────

    #[test]
    fn test_current_server_returns_selected_profile() {
        let mut doc = with_servers(3);
        doc.active_index = 1;
        assert_eq!(doc.current_server().address, "10.0.0.1");
    }

    #[test]
    fn test_current_server_falls_back_to_default_when_strategy_selects() {
        let mut doc = with_servers(3);
        doc.active_index = -1;
        doc.selection_strategy = Some("LowestLatency".to_string());

        assert_eq!(doc.current_server(), ServerProfile::default());
    }

    // ── wire format ───────────────────────────────────────────────────────────

    #[test]
    fn test_document_uses_legacy_field_names() {
        let doc = ConfigurationDocument::baseline();

        let json = serde_json::to_value(&doc).expect("serialize");

        for key in ["configs", "index", "isDefault", "localPort", "isVerboseLogging", "logViewer", "proxy"] {
            assert!(json.get(key).is_some(), "missing wire field {key}");
        }
        assert!(json.get("strategy").is_none(), "unset strategy is omitted");
    }

    #[test]
    fn test_document_decodes_nulls_as_defaults() {
        let json = r#"{ "configs": null, "logViewer": null, "proxy": null, "strategy": null }"#;

        let doc: ConfigurationDocument = serde_json::from_str(json).expect("deserialize");

        assert!(doc.servers.is_empty());
        assert_eq!(doc.log_viewer, LogViewerConfig::default());
        assert_eq!(doc.proxy, UpstreamProxyConfig::default());
        assert_eq!(doc.selection_strategy, None);
    }
}
