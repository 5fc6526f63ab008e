use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::model::TournamentData;
use crate::seed;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    Players,
    Teams,
    History,
    Settings,
}

impl DataKind {
    pub const ALL: [DataKind; 4] = [
        DataKind::Players,
        DataKind::Teams,
        DataKind::History,
        DataKind::Settings,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            DataKind::Players => "players.json",
            DataKind::Teams => "teams.json",
            DataKind::History => "history.json",
            DataKind::Settings => "settings.json",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DataKind::Players => "players",
            DataKind::Teams => "teams",
            DataKind::History => "history",
            DataKind::Settings => "settings",
        }
    }
}

/// JSON files under one directory, one per [`DataKind`].
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, kind: DataKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }

    /// Reads every kind, falling back to the built-in data per kind.
    pub fn load_data(&self) -> TournamentData {
        TournamentData {
            players: self.load_or_default(DataKind::Players, seed::default_players),
            teams: self.load_or_default(DataKind::Teams, seed::default_teams),
            history: self.load_or_default(DataKind::History, seed::default_history),
            settings: self.load_or_default(DataKind::Settings, seed::default_settings),
        }
    }

    pub fn load_or_default<T: DeserializeOwned>(
        &self,
        kind: DataKind,
        default: impl FnOnce() -> T,
    ) -> T {
        let path = self.path_for(kind);
        let Ok(raw) = fs::read_to_string(&path) else {
            return default();
        };
        match serde_json::from_str::<T>(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(path = %path.display(), "unreadable {} file, using defaults: {err}", kind.label());
                default()
            }
        }
    }

    pub fn save_kind(&self, data: &TournamentData, kind: DataKind) -> Result<()> {
        match kind {
            DataKind::Players => self.save(kind, &data.players),
            DataKind::Teams => self.save(kind, &data.teams),
            DataKind::History => self.save(kind, &data.history),
            DataKind::Settings => self.save(kind, &data.settings),
        }
    }

    pub fn save_all(&self, data: &TournamentData) -> Result<()> {
        for kind in DataKind::ALL {
            self.save_kind(data, kind)?;
        }
        Ok(())
    }

    pub fn save<T: Serialize>(&self, kind: DataKind, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create {}", self.dir.display()))?;
        let path = self.path_for(kind);
        let json = serde_json::to_string(value)
            .with_context(|| format!("failed to encode {}", kind.label()))?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).with_context(|| format!("failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("failed to replace {}", path.display()))?;
        info!("{} saved", kind.label());
        Ok(())
    }

    /// Deletes every saved file so the next load returns the built-in data.
    pub fn reset(&self) -> Result<()> {
        for kind in DataKind::ALL {
            let path = self.path_for(kind);
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                Err(err) => {
                    return Err(err).with_context(|| format!("failed to remove {}", path.display()));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_store_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("nothing-here"));
        assert_eq!(store.load_data(), seed::default_data());
    }

    #[test]
    fn corrupt_kind_falls_back_alone() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());
        let mut data = seed::default_data();
        data.settings.event_location = "Back lot".to_string();
        store.save_all(&data).unwrap();
        fs::write(store.path_for(DataKind::Teams), "{not json").unwrap();

        let loaded = store.load_data();
        assert_eq!(loaded.settings.event_location, "Back lot");
        assert_eq!(loaded.teams, seed::default_teams());
    }

    #[test]
    fn save_leaves_no_tmp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());
        store.save(DataKind::Players, &seed::default_players()).unwrap();
        assert!(store.path_for(DataKind::Players).exists());
        assert!(!dir.path().join("players.json.tmp").exists());
    }
}
