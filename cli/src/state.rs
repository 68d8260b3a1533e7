//! Resolved settings shared by every command

use crate::args::Cli;
use anyhow::{bail, Context};
use rewards_admin_networking::{AdminClient, ClientConfig};
use rewards_admin_persistence::SessionVault;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

const APP_DIR: &str = "RewardsAdmin";

pub struct AppState {
    pub data_dir: PathBuf,
    pub api_url: Option<String>,
    pub token: Option<String>,
    pub session: Option<String>,
    pub timeout: Duration,
    pub json: bool,
}

impl AppState {
    pub fn from_cli(cli: &Cli) -> Self {
        let data_dir = cli.data_dir.clone().unwrap_or_else(|| {
            dirs_next::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR)
        });

        Self {
            data_dir,
            api_url: cli.api_url.clone(),
            token: cli.token.clone(),
            session: cli.session.clone(),
            timeout: Duration::from_secs(cli.timeout),
            json: cli.json,
        }
    }

    pub async fn vault(&self) -> anyhow::Result<SessionVault> {
        SessionVault::open(&self.data_dir)
            .await
            .with_context(|| format!("opening session store in {}", self.data_dir.display()))
    }

    /// Build an API client from `--token`/`--api-url`, or from a saved session
    pub async fn client(&self) -> anyhow::Result<AdminClient> {
        let (base_url, token) = match &self.token {
            Some(token) => match &self.api_url {
                Some(url) => (url.clone(), token.clone()),
                None => bail!("--api-url is required when --token is given"),
            },
            None => {
                let active = self.vault().await?.unlock(self.session.as_deref()).await?;
                debug!("Using session '{}'", active.session.name);
                let url = self.api_url.clone().unwrap_or(active.session.base_url);
                (url, active.token)
            }
        };

        let config = ClientConfig::new(base_url)
            .with_token(token)
            .with_timeout(self.timeout);
        Ok(AdminClient::new(config)?)
    }
}
