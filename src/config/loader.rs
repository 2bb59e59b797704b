use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::types::AppConfig;

/// Discover and load the app config.
///
/// Priority:
/// 1. `--config` flag (explicit path)
/// 2. `$ISSUEMYST_CONFIG` environment variable
/// 3. `$XDG_CONFIG_HOME/issuemyst/config.toml`
/// 4. `~/.config/issuemyst/config.toml`
///
/// Without any of these the defaults apply. An explicit path that does not
/// exist is an error; discovered paths are only used when they are files.
pub fn load_config(explicit_path: Option<&Path>) -> Result<AppConfig> {
    let path = match explicit_path {
        Some(path) => Some(path.to_path_buf()),
        None => find_global_config(),
    };
    let Some(path) = path else {
        tracing::debug!("config: none found, using defaults");
        return Ok(AppConfig::default());
    };
    tracing::debug!("config: loading {}", path.display());
    let contents =
        std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
    parse_config(&contents).with_context(|| format!("parsing TOML from {}", path.display()))
}

/// Parse config TOML. Unknown keys are ignored.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let mut config: AppConfig = toml::from_str(contents)?;
    config.server.url = normalize_server_url(&config.server.url);
    Ok(config)
}

/// Strip trailing slashes so `<url>/` is always the backend root.
pub fn normalize_server_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_owned()
}

fn find_global_config() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("ISSUEMYST_CONFIG") {
        let p = PathBuf::from(&path);
        if p.is_file() {
            return Some(p);
        }
    }

    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        let p = PathBuf::from(xdg).join("issuemyst/config.toml");
        if p.is_file() {
            return Some(p);
        }
    }

    let home = std::env::var("HOME").ok().map(PathBuf::from)?;
    let p = home.join(".config/issuemyst/config.toml");
    p.is_file().then_some(p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_trailing_slashes() {
        assert_eq!(normalize_server_url("http://localhost:8000/"), "http://localhost:8000");
        assert_eq!(normalize_server_url(" https://issue.myst.rs// "), "https://issue.myst.rs");
        assert_eq!(normalize_server_url("https://issue.myst.rs"), "https://issue.myst.rs");
    }

    #[test]
    fn parse_normalizes_url() {
        let config = parse_config("[server]\nurl = \"http://127.0.0.1:9000/\"\n").unwrap();
        assert_eq!(config.server.url, "http://127.0.0.1:9000");
    }
}
