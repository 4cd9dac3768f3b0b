use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

use chirpy_api::profanity::CensorMode;
use chirpy_api::{Platform, StaticDirs};

#[derive(Debug, Clone)]
pub struct Config {
    pub db_url: PathBuf,
    pub platform: Platform,
    pub host: String,
    pub port: u16,
    pub static_dirs: StaticDirs,
    pub censor: CensorMode,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.into());

        let port = var("CHIRPY_PORT", "8080")
            .parse::<u16>()
            .context("CHIRPY_PORT must be a port number")?;
        let censor = var("CENSOR_MODE", "exact")
            .parse::<CensorMode>()
            .context("CENSOR_MODE is invalid")?;

        Ok(Self {
            db_url: var("DB_URL", "chirpy.db").into(),
            platform: Platform::from_env_value(lookup("PLATFORM").as_deref()),
            host: var("CHIRPY_HOST", "0.0.0.0"),
            port,
            static_dirs: StaticDirs {
                app: var("STATIC_DIR", "./static").into(),
                assets: var("ASSETS_DIR", "./assets").into(),
            },
            censor,
        })
    }

    /// Resolve `host:port`. The host may be an IP literal or a name such as `localhost`.
    pub async fn addr(&self) -> Result<SocketAddr> {
        tokio::net::lookup_host((self.host.as_str(), self.port))
            .await
            .with_context(|| format!("cannot resolve CHIRPY_HOST '{}'", self.host))?
            .next()
            .with_context(|| format!("CHIRPY_HOST '{}' resolved to no addresses", self.host))
    }
}
