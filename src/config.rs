use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, anyhow};

const APP_DIR: &str = "turkeybowl_terminal";
const DEFAULT_TICK_MS: u64 = 250;
const MIN_TICK_MS: u64 = 50;
const DEFAULT_LOG_FILTER: &str = "turkeybowl_terminal=info";
const DEFAULT_ADMIN_KEYWORD: &str = "gobble";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub tick: Duration,
    pub log_filter: String,
    pub admin_keyword: String,
}

impl AppConfig {
    /// Command line value wins over the environment, which wins over defaults.
    pub fn resolve(cli_data_dir: Option<PathBuf>) -> Result<Self> {
        Self::from_lookup(cli_data_dir, |key| std::env::var(key).ok())
    }

    pub fn from_lookup(
        cli_data_dir: Option<PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let non_blank = |key: &str| lookup(key).filter(|val| !val.trim().is_empty());

        let data_dir = cli_data_dir
            .or_else(|| non_blank("TURKEYBOWL_DATA_DIR").map(PathBuf::from))
            .or_else(|| default_data_dir(&non_blank))
            .ok_or_else(|| anyhow!("no data directory: pass --data-dir or set TURKEYBOWL_DATA_DIR"))?;
        let tick_ms = non_blank("TURKEYBOWL_TICK_MS")
            .and_then(|val| val.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_TICK_MS)
            .max(MIN_TICK_MS);
        let log_filter =
            non_blank("TURKEYBOWL_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        let admin_keyword = non_blank("TURKEYBOWL_ADMIN_KEYWORD")
            .unwrap_or_else(|| DEFAULT_ADMIN_KEYWORD.to_string());

        Ok(Self {
            data_dir,
            tick: Duration::from_millis(tick_ms),
            log_filter,
            admin_keyword,
        })
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("turkeybowl.log")
    }
}

fn default_data_dir(lookup: &impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    // Prefer XDG data.
    if let Some(base) = lookup("XDG_DATA_HOME") {
        return Some(PathBuf::from(base).join(APP_DIR));
    }
    let home = lookup("HOME")?;
    Some(PathBuf::from(home).join(".local").join("share").join(APP_DIR))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_follow_xdg_then_home() {
        let cfg = AppConfig::from_lookup(None, env(&[("HOME", "/home/fan")])).unwrap();
        assert_eq!(
            cfg.data_dir,
            PathBuf::from("/home/fan/.local/share/turkeybowl_terminal")
        );
        assert_eq!(cfg.tick, Duration::from_millis(250));
        assert_eq!(cfg.admin_keyword, "gobble");

        let cfg = AppConfig::from_lookup(
            None,
            env(&[("HOME", "/home/fan"), ("XDG_DATA_HOME", "/data")]),
        )
        .unwrap();
        assert_eq!(cfg.data_dir, PathBuf::from("/data/turkeybowl_terminal"));
    }

    #[test]
    fn cli_beats_env_and_tick_is_clamped() {
        let cfg = AppConfig::from_lookup(
            Some(PathBuf::from("/cli")),
            env(&[("TURKEYBOWL_DATA_DIR", "/env"), ("TURKEYBOWL_TICK_MS", "5")]),
        )
        .unwrap();
        assert_eq!(cfg.data_dir, PathBuf::from("/cli"));
        assert_eq!(cfg.tick, Duration::from_millis(50));
    }

    #[test]
    fn blank_home_is_an_error() {
        assert!(AppConfig::from_lookup(None, env(&[("HOME", "  ")])).is_err());
    }
}
