//! Whole-dataset export and import as a single JSON bundle.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{EventSettings, History, Player, Team, TournamentData};
use crate::store::DataKind;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub players: Option<Vec<Player>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teams: Option<Vec<Team>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<History>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<EventSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_date: Option<String>,
}

impl Bundle {
    pub fn from_data(data: &TournamentData, exported_at: DateTime<Utc>) -> Self {
        Self {
            players: Some(data.players.clone()),
            teams: Some(data.teams.clone()),
            history: Some(data.history.clone()),
            settings: Some(data.settings.clone()),
            export_date: Some(exported_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }

    /// Replaces every part present in the bundle and returns which kinds changed.
    pub fn apply(self, data: &mut TournamentData) -> Vec<DataKind> {
        let mut replaced = Vec::with_capacity(4);
        if let Some(players) = self.players {
            data.players = players;
            replaced.push(DataKind::Players);
        }
        if let Some(teams) = self.teams {
            data.teams = teams;
            replaced.push(DataKind::Teams);
        }
        if let Some(history) = self.history {
            data.history = history;
            replaced.push(DataKind::History);
        }
        if let Some(settings) = self.settings {
            data.settings = settings;
            replaced.push(DataKind::Settings);
        }
        replaced
    }
}

pub fn default_export_name(date: NaiveDate) -> String {
    format!("turkeybowl-data-{}.json", date.format("%Y-%m-%d"))
}

pub fn export_json(data: &TournamentData, exported_at: DateTime<Utc>) -> Result<String> {
    serde_json::to_string_pretty(&Bundle::from_data(data, exported_at))
        .context("failed to encode export bundle")
}

/// Writes the bundle. A directory target gets the dated default file name.
pub fn export_to(path: &Path, data: &TournamentData) -> Result<PathBuf> {
    let now = Utc::now();
    let target = if path.is_dir() {
        path.join(default_export_name(now.date_naive()))
    } else {
        path.to_path_buf()
    };
    let json = export_json(data, now)?;
    fs::write(&target, json).with_context(|| format!("failed to write {}", target.display()))?;
    Ok(target)
}

/// Parses the whole bundle before touching `data`, so bad input changes nothing.
pub fn import_str(raw: &str, data: &mut TournamentData) -> Result<Vec<DataKind>> {
    let bundle: Bundle = serde_json::from_str(raw).context("invalid JSON bundle")?;
    Ok(bundle.apply(data))
}

pub fn import_from(path: &Path, data: &mut TournamentData) -> Result<Vec<DataKind>> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    import_str(&raw, data).with_context(|| format!("failed to import {}", path.display()))
}
