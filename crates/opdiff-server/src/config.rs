use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use opdiff_engine::DuplicatePolicy;
use opdiff_store::DEFAULT_MAX_OPERAND_SIZE;

use crate::error::{ServerError, ServerResult};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Largest decoded operand the store accepts, in bytes.
    pub max_operand_size: usize,
    /// Largest request body the transport reads, in bytes. Must leave room
    /// for Base64 expansion so that oversized operands reach the store and
    /// get a proper capacity error.
    pub max_request_body: usize,
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            max_operand_size: DEFAULT_MAX_OPERAND_SIZE,
            max_request_body: 8 * 1024 * 1024,
            duplicate_policy: DuplicatePolicy::Overwrite,
        }
    }
}

impl ServerConfig {
    /// Parse a TOML document; absent keys take their defaults.
    pub fn from_toml_str(s: &str) -> ServerResult<Self> {
        toml::from_str(s).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> ServerResult<String> {
        toml::to_string_pretty(self).map_err(|e| ServerError::Config(e.to_string()))
    }
}
