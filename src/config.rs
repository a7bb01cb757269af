use serde::Deserialize;
use std::path::Path;

const CONFIG_FILE_PATH: &str = "data/config.toml";

#[derive(Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Config {
    pub database_url: String,
}

impl Config {
    async fn read_from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let cfg_str = tokio::fs::read_to_string(path).await?;
        Ok(toml::from_str(&cfg_str)?)
    }

    pub async fn read_default() -> eyre::Result<Self> {
        if let Ok(database_url) = std::env::var("DATABASE_URL") {
            return Ok(Self { database_url });
        }

        Self::read_from_file(CONFIG_FILE_PATH).await
    }
}
