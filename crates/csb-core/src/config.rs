use std::{env, fs, path::Path, time::Duration};

use crate::{domain::UserId, errors::Error, Result};

pub const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";

/// Typed configuration for the bot.
#[derive(Clone, Debug)]
pub struct Config {
    pub telegram_bot_token: String,
    /// The only identity allowed to use `/send`. `None` means nobody is.
    pub admin_id: Option<UserId>,

    // GitHub
    pub github_api_base: String,
    /// `None` keeps the HTTP client's default (no explicit timeout).
    pub github_request_timeout: Option<Duration>,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (the process environment in
    /// production, a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let telegram_bot_token = lookup("TELEGRAM_BOT_TOKEN").unwrap_or_default();
        if telegram_bot_token.trim().is_empty() {
            return Err(Error::Config(
                "TELEGRAM_BOT_TOKEN environment variable is required".to_string(),
            ));
        }

        let admin_id = parse_admin_id(lookup("BOT_ADMIN_ID"));

        let github_api_base = lookup("GITHUB_API_BASE")
            .and_then(non_empty)
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_GITHUB_API_BASE.to_string());

        let github_request_timeout = lookup("GITHUB_REQUEST_TIMEOUT_SECS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        Ok(Self {
            telegram_bot_token,
            admin_id,
            github_api_base,
            github_request_timeout,
        })
    }
}

fn parse_admin_id(raw: Option<String>) -> Option<UserId> {
    let raw = raw.and_then(non_empty)?;
    match raw.trim().parse::<i64>() {
        Ok(id) => Some(UserId(id)),
        Err(_) => {
            tracing::warn!("BOT_ADMIN_ID is not an integer; /send is disabled");
            None
        }
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let Some((key, val)) = parse_dotenv_line(raw) else {
            continue;
        };
        if env::var_os(&key).is_some() {
            continue; // do not override existing env
        }
        env::set_var(key, val);
    }
}

fn parse_dotenv_line(raw: &str) -> Option<(String, String)> {
    let line = raw.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let (k, v) = line.split_once('=')?;
    let key = k.trim();
    if key.is_empty() {
        return None;
    }

    let mut val = v.trim().to_string();
    // Strip optional surrounding quotes.
    if val.len() >= 2
        && ((val.starts_with('"') && val.ends_with('"'))
            || (val.starts_with('\'') && val.ends_with('\'')))
    {
        val = val[1..val.len() - 1].to_string();
    }

    Some((key.to_string(), val))
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
