use std::net::SocketAddr;

use legis_analysis::RefineSettings;
use legis_common::anthropic::AnthropicClientConfig;

use crate::error::ConfigError;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8501";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub max_upload_bytes: usize,
    pub anthropic: AnthropicClientConfig,
    pub refine: RefineSettings,
}

impl Config {
    /// Optional:
    /// - `LEGIS_WEB_LISTEN_ADDR` (default: "0.0.0.0:8501")
    /// - `LEGIS_MAX_UPLOAD_BYTES` (default: 50 MiB)
    /// - `ANTHROPIC_*`: see `AnthropicClientConfig::from_env` and `RefineSettings::from_env`
    pub fn from_env() -> Result<Self, ConfigError> {
        let listen_addr = std::env::var("LEGIS_WEB_LISTEN_ADDR")
            .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = listen_addr.parse().map_err(|_| ConfigError::Invalid {
            name: "LEGIS_WEB_LISTEN_ADDR",
            value: listen_addr.clone(),
        })?;

        let max_upload_bytes = match std::env::var("LEGIS_MAX_UPLOAD_BYTES") {
            Ok(v) => v.parse().map_err(|_| ConfigError::Invalid {
                name: "LEGIS_MAX_UPLOAD_BYTES",
                value: v.clone(),
            })?,
            Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Self {
            listen_addr,
            max_upload_bytes,
            anthropic: AnthropicClientConfig::from_env(),
            refine: RefineSettings::from_env(),
        })
    }
}
