use config::{Config, Environment};
use serde::Deserialize;

use crate::error::Result;

/// Runtime settings, read from `FCI_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub api_url: String,
    pub index_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Page holding the current Goings-on week start between `BOF` and `EOF`.
    pub date_page: String,
    /// Page holding the next Signpost publication date between `BOF` and `EOF`.
    pub pubdate_page: String,
}

impl Settings {
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .set_default("api_url", "https://en.wikipedia.org/w/api.php")?
            .set_default("index_url", "https://en.wikipedia.org/w/index.php")?
            .set_default("timeout_secs", 30)?
            .set_default(
                "user_agent",
                concat!("fc_importer/", env!("CARGO_PKG_VERSION")),
            )?
            .set_default("date_page", "User:Resident Mario/godate")?
            .set_default("pubdate_page", "User:Resident Mario/pubdate")?
            .add_source(Environment::with_prefix("FCI").try_parsing(true))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Account name without the bot-password suffix (`Name@tool` → `Name`).
    pub fn account(&self) -> Option<&str> {
        self.username
            .as_deref()
            .map(|u| u.split('@').next().unwrap_or(u))
            .filter(|u| !u.is_empty())
    }
}
