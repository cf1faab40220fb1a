use std::path::PathBuf;

use legis_analysis::RefineSettings;
use legis_common::anthropic::AnthropicClientConfig;

use crate::error::AppError;

/// Server configuration loaded explicitly from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic: AnthropicClientConfig,
    pub refine: RefineSettings,
    /// When set, tools only read PDFs below this directory.
    pub document_root: Option<PathBuf>,
    /// Serve MCP over TCP instead of stdio.
    pub tcp_listen_addr: Option<String>,
}

impl Config {
    /// Optional:
    /// - `LEGIS_DOCUMENT_ROOT`: directory the document tools are confined to
    /// - `MCP_TCP_LISTEN_ADDR`: e.g. "127.0.0.1:7400"
    /// - `ANTHROPIC_*`: see `AnthropicClientConfig::from_env` and `RefineSettings::from_env`
    pub fn from_env() -> Result<Self, AppError> {
        let document_root = match std::env::var("LEGIS_DOCUMENT_ROOT") {
            Ok(root) => {
                let canonical = std::fs::canonicalize(&root).map_err(|e| {
                    AppError::Config(format!("LEGIS_DOCUMENT_ROOT {root} is not usable: {e}"))
                })?;
                if !canonical.is_dir() {
                    return Err(AppError::Config(format!(
                        "LEGIS_DOCUMENT_ROOT {root} is not a directory"
                    )));
                }
                Some(canonical)
            }
            Err(_) => None,
        };

        Ok(Self {
            anthropic: AnthropicClientConfig::from_env(),
            refine: RefineSettings::from_env(),
            document_root,
            tcp_listen_addr: std::env::var("MCP_TCP_LISTEN_ADDR").ok(),
        })
    }
}
