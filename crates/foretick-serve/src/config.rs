//! Service configuration.
//!
//! Everything is environment-driven, with a `FORETICK_`-prefixed variable
//! taking precedence over the generic one where both exist.
//!
//! | Setting | Primary | Fallback | Default |
//! |---------|---------|----------|---------|
//! | Bind address | `FORETICK_BIND` | - | `0.0.0.0:5001` |
//! | Artifact directory | `FORETICK_ARTIFACT_DIR` | - | `model_artifacts` |
//! | Redis URL | `FORETICK_REDIS_URL` | `REDIS_URL` | none (no durable cache) |
//! | Quote batch timeout (ms) | `FORETICK_QUOTE_TIMEOUT_MS` | - | `5000` |

use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_BIND: &str = "0.0.0.0:5001";
const DEFAULT_ARTIFACT_DIR: &str = "model_artifacts";
const DEFAULT_QUOTE_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone)]
pub struct ServeConfig {
    pub bind_addr: String,
    pub artifact_dir: PathBuf,
    pub redis_url: Option<String>,
    pub quote_batch_timeout: Duration,
}

impl ServeConfig {
    pub fn from_env() -> Self {
        let bind_addr = env::var("FORETICK_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_owned());

        let artifact_dir = env::var("FORETICK_ARTIFACT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_ARTIFACT_DIR));

        let redis_url = env::var("FORETICK_REDIS_URL")
            .or_else(|_| env::var("REDIS_URL"))
            .ok();

        let quote_batch_timeout = env::var("FORETICK_QUOTE_TIMEOUT_MS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(DEFAULT_QUOTE_TIMEOUT_MS));

        Self {
            bind_addr,
            artifact_dir,
            redis_url,
            quote_batch_timeout,
        }
    }
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND.to_owned(),
            artifact_dir: PathBuf::from(DEFAULT_ARTIFACT_DIR),
            redis_url: None,
            quote_batch_timeout: Duration::from_millis(DEFAULT_QUOTE_TIMEOUT_MS),
        }
    }
}
