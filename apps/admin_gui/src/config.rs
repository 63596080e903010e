use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use clap::Parser;
use client_core::DEFAULT_API_BASE_URL;
use serde::Deserialize;
use url::Url;

pub const CONFIG_FILE_NAME: &str = "admin.toml";

#[derive(Debug, Parser)]
#[command(name = "admin_gui", about = "Mila event and order administration")]
pub struct Args {
    /// Base URL of the events/orders API.
    #[arg(long)]
    pub api_base_url: Option<String>,
    /// Explicit settings file; when absent `admin.toml` is looked up in the
    /// working directory and then in the user config directory.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub window_title: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            request_timeout_secs: 15,
            window_title: "Mila · Administración".into(),
        }
    }
}

pub fn load_settings(args: &Args) -> anyhow::Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => read_settings_file(path)?
            .with_context(|| format!("config file {} does not exist", path.display()))?,
        None => match default_config_path() {
            Some(path) => read_settings_file(&path)?.unwrap_or_default(),
            None => Settings::default(),
        },
    };

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());

    if let Some(url) = &args.api_base_url {
        settings.api_base_url = url.clone();
    }

    settings.api_base_url = normalize_base_url(&settings.api_base_url)?;
    if settings.request_timeout_secs == 0 {
        bail!("request_timeout_secs must be greater than zero");
    }
    Ok(settings)
}

/// `Ok(None)` when the file is missing.
pub fn read_settings_file(path: &Path) -> anyhow::Result<Option<Settings>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read {}", path.display()))
        }
    };
    let settings = toml::from_str::<Settings>(&raw)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(Some(settings))
}

fn default_config_path() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }
    dirs::config_dir().map(|dir| dir.join("mila_admin").join(CONFIG_FILE_NAME))
}

pub fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("ADMIN_API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = lookup("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        match v.trim().parse::<u64>() {
            Ok(secs) => settings.request_timeout_secs = secs,
            Err(_) => tracing::warn!(value = %v, "ignoring invalid APP__REQUEST_TIMEOUT_SECS"),
        }
    }

    if let Some(v) = lookup("APP__WINDOW_TITLE") {
        settings.window_title = v;
    }
}

pub fn normalize_base_url(raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).with_context(|| format!("invalid api base url '{raw}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("api base url must use http or https, got '{}'", url.scheme());
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
