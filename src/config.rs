use anyhow::{anyhow, Result};
use reqwest::Url;
use std::env;
use std::path::PathBuf;

use crate::bot::access::AdminAllowList;
use crate::services::schedule_source::DEFAULT_API_BASE;

pub const DEFAULT_IMAGE_URL: &str = "https://jpcdn.it/img/small/ced62d70d4d0bc5ec60a3b894831e48e.png";
pub const DEFAULT_CUSTOM_LISTS_FILE: &str = "custom_lists.json";
pub const DEFAULT_HTTP_PORT: u16 = 3000;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub animeschedule_token: String,
    pub api_base: String,
    pub start_image: Url,
    pub list_image: Url,
    pub admin_ids: AdminAllowList,
    pub custom_lists_file: PathBuf,
    /// When set, custom lists live in SQLite instead of the JSON file.
    pub database_url: Option<String>,
    pub http_port: u16,
    pub fetch_timeout_secs: u64,
}

/// Reads a variable, treating unset and blank values alike.
fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn required_var(name: &str) -> Result<String> {
    optional_var(name).ok_or_else(|| anyhow!("{} must be set", name))
}

fn image_url(name: &str) -> Result<Url> {
    let raw = optional_var(name).unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string());
    Url::parse(raw.trim()).map_err(|e| anyhow!("Invalid {}: {}", name, e))
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let telegram_bot_token = required_var("TELEGRAM_BOT_TOKEN")?;
        let animeschedule_token = required_var("ANIMESCHEDULE_TOKEN")?;

        let api_base = optional_var("ANIMESCHEDULE_API_BASE")
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let start_image = image_url("START_IMAGE")?;
        let list_image = image_url("LIST_IMAGE")?;

        let admin_ids = AdminAllowList::parse(&env::var("ADMIN_IDS").unwrap_or_default())?;

        let custom_lists_file = optional_var("CUSTOM_LISTS_FILE")
            .unwrap_or_else(|| DEFAULT_CUSTOM_LISTS_FILE.to_string())
            .into();

        let database_url = optional_var("DATABASE_URL");
        if let Some(url) = &database_url {
            if !url.trim().starts_with("sqlite:") {
                return Err(anyhow!("DATABASE_URL must be a sqlite: URL"));
            }
        }

        let http_port = match optional_var("HTTP_PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|_| anyhow!("Invalid HTTP_PORT"))?,
            None => DEFAULT_HTTP_PORT,
        };

        let fetch_timeout_secs = match optional_var("SCHEDULE_FETCH_TIMEOUT_SECS") {
            Some(secs) => secs
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| anyhow!("Invalid SCHEDULE_FETCH_TIMEOUT_SECS"))?,
            None => DEFAULT_FETCH_TIMEOUT_SECS,
        };

        Ok(Config {
            telegram_bot_token,
            animeschedule_token,
            api_base,
            start_image,
            list_image,
            admin_ids,
            custom_lists_file,
            database_url,
            http_port,
            fetch_timeout_secs,
        })
    }
}
