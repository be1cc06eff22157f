//! Process-wide portal configuration, read once from `PORTAL_CONFIG`.

use std::path::PathBuf;

use store::PortalConfig;
use tokio::sync::OnceCell;

use crate::error::ApiError;

static CONFIG: OnceCell<PortalConfig> = OnceCell::const_new();

/// Path of the configuration file: `PORTAL_CONFIG`, else `portal.toml`.
pub fn config_path() -> PathBuf {
    dotenvy::dotenv().ok();
    std::env::var("PORTAL_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(PortalConfig::filename()))
}

/// Get or load the portal configuration.
///
/// A missing file yields the defaults. A file that fails to parse is an error.
pub async fn get_config() -> Result<&'static PortalConfig, ApiError> {
    CONFIG
        .get_or_try_init(|| async {
            let path = config_path();
            match tokio::fs::read_to_string(&path).await {
                Ok(text) => PortalConfig::from_toml(&text)
                    .map_err(|e| ApiError::Config(format!("{}: {}", path.display(), e))),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    tracing::warn!("{} not found, using default configuration", path.display());
                    Ok(PortalConfig::default())
                }
                Err(e) => Err(ApiError::Config(format!("{}: {}", path.display(), e))),
            }
        })
        .await
}
