use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::util::strip_quotes;

pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the service, e.g. `https://taskora.onrender.com`.
    pub url: String,
    /// API key, sent as the `apikey` query parameter.
    pub key: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Whether to verify TLS certificates.
    pub verify: bool,
}

impl ClientConfig {
    pub fn new(url: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            key: key.into(),
            timeout: DEFAULT_TIMEOUT,
            verify: true,
        }
    }
}

#[derive(Debug, Default)]
struct RcConfig {
    url: Option<String>,
    key: Option<String>,
    timeout: Option<String>,
    verify: Option<bool>,
}

/// Resolves a config for one service from explicit values, the process
/// environment, `.taskorarc`, then built-in defaults.
pub(crate) fn load_config(
    url_key: &str,
    default_url: Option<&str>,
    url: Option<String>,
    key: Option<String>,
) -> Result<ClientConfig> {
    resolve(
        &|name: &str| std::env::var(name).ok(),
        &rc_candidates(),
        url_key,
        default_url,
        url,
        key,
    )
}

fn resolve(
    env: &dyn Fn(&str) -> Option<String>,
    rc_candidates: &[PathBuf],
    url_key: &str,
    default_url: Option<&str>,
    url: Option<String>,
    key: Option<String>,
) -> Result<ClientConfig> {
    let url_var = format!("TASKORA_{}", url_key.to_uppercase());
    let mut url = url.or_else(|| env(&url_var));
    // Keys read from the environment or rc file are trimmed; an explicit key is kept as given.
    let mut key = key.or_else(|| env("TASKORA_API_KEY").map(|v| v.trim().to_string()));
    let mut timeout = env("TASKORA_TIMEOUT");
    let mut verify: Option<bool> = None;

    for rc_path in rc_candidates {
        if rc_path.exists() {
            let cfg = read_rc(rc_path, url_key).with_context(|| {
                format!("failed to read configuration file {}", rc_path.display())
            })?;

            if url.is_none() {
                url = cfg.url;
            }
            if key.is_none() {
                key = cfg.key;
            }
            if timeout.is_none() {
                timeout = cfg.timeout;
            }
            verify = cfg.verify;
            break;
        }
    }

    let url = match url.or_else(|| default_url.map(str::to_string)) {
        Some(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => bail!(
            "Missing configuration: url (pass a base URL, set {} or put `{}:` in .taskorarc)",
            url_var,
            url_key
        ),
    };

    let key = match key {
        Some(v) if !v.trim().is_empty() => v,
        _ => bail!(
            "Missing configuration: key (set TASKORA_API_KEY or put `key:` in one of: {})",
            display_paths(rc_candidates)
        ),
    };

    let timeout = match timeout {
        Some(raw) => parse_timeout(&raw)?,
        None => DEFAULT_TIMEOUT,
    };

    Ok(ClientConfig {
        url,
        key,
        timeout,
        verify: verify.unwrap_or(true),
    })
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    let secs: f64 = raw
        .trim()
        .parse()
        .with_context(|| format!("invalid timeout {:?} (expected seconds)", raw))?;
    if !secs.is_finite() || secs <= 0.0 {
        bail!("invalid timeout {:?} (must be a positive number of seconds)", raw);
    }
    Duration::try_from_secs_f64(secs)
        .with_context(|| format!("invalid timeout {:?} (out of range)", raw))
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return ".taskorarc".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn read_rc(path: &Path, url_key: &str) -> Result<RcConfig> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_rc(&text, url_key))
}

fn parse_rc(text: &str, url_key: &str) -> RcConfig {
    let mut cfg = RcConfig::default();

    // Support formatting where `key:` is on one line and the token is on the next line.
    let mut pending_key: Option<&str> = None;

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(pk) = pending_key.take() {
            // Continuation value line (no colon, or a bare URL)
            if !line.contains(':') || line.starts_with("http://") || line.starts_with("https://") {
                cfg.set(pk, url_key, strip_quotes(line));
                continue;
            }
        }

        if let Some((k, v)) = line.split_once(':') {
            let k = k.trim();
            let v = strip_quotes(v.trim());
            match k {
                "verify" => {
                    if !v.is_empty() {
                        cfg.verify = Some(v != "0");
                    }
                }
                "key" | "timeout" => {
                    if v.is_empty() {
                        pending_key = Some(k);
                    } else {
                        cfg.set(k, url_key, v);
                    }
                }
                k if k == url_key => {
                    if v.is_empty() {
                        pending_key = Some(k);
                    } else {
                        cfg.set(k, url_key, v);
                    }
                }
                _ => {}
            }
        }
    }

    cfg
}

impl RcConfig {
    fn set(&mut self, name: &str, url_key: &str, value: &str) {
        let value = Some(value.to_string());
        match name {
            "key" => self.key = value,
            "timeout" => self.timeout = value,
            n if n == url_key => self.url = value,
            _ => {}
        }
    }
}

fn rc_candidates() -> Vec<PathBuf> {
    // 1) TASKORA_RC (explicit)
    // 2) ./.taskorarc
    // 3) ~/.taskorarc
    if let Ok(p) = std::env::var("TASKORA_RC") {
        return vec![PathBuf::from(p)];
    }

    let mut v = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        v.push(cwd.join(".taskorarc"));
    }
    if let Some(home) = dirs::home_dir() {
        v.push(home.join(".taskorarc"));
    }
    v
}
