use std::{fs, io, path::Path};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

use crate::{
    network::{Building, Junction, Network, Railway, Train},
    shared::time::Timestamp,
};

pub const CURRENT_VERSION: &str = "1.0.0";

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Snapshot is missing the {0} field")]
    MissingField(&'static str),
}

/// Versioned, flat record of a whole game.
///
/// Timestamps are ISO-8601 strings on the wire. Saves written before
/// junctions or trains existed load with those collections empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub buildings: Vec<Building>,
    pub railways: Vec<Railway>,
    #[serde(default)]
    pub junctions: Vec<Junction>,
    #[serde(default)]
    pub trains: Vec<Train>,
    #[serde(default)]
    pub money: Option<i64>,
    #[serde(default)]
    pub total_spent: Option<i64>,
    #[serde(default = "Utc::now")]
    pub saved_at: Timestamp,
    #[serde(default)]
    pub version: String,
}

const REQUIRED_FIELDS: [&str; 2] = ["buildings", "railways"];

impl Snapshot {
    pub fn from_json(json: &str) -> Result<Self, self::Error> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        for field in REQUIRED_FIELDS {
            if value.get(field).is_none() {
                return Err(self::Error::MissingField(field));
            }
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json(&self) -> Result<String, self::Error> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, self::Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Network {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            buildings: self.buildings.clone(),
            railways: self.railways.clone(),
            junctions: self.junctions.clone(),
            trains: self.trains.clone(),
            money: Some(self.money),
            total_spent: Some(self.total_spent),
            saved_at: Utc::now(),
            version: CURRENT_VERSION.to_string(),
        }
    }

    /// Replaces the whole game with `snapshot`, keeping the configuration.
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.clear_all();
        self.buildings = snapshot.buildings;
        self.railways = snapshot.railways;
        self.junctions = snapshot.junctions;
        self.trains = snapshot.trains;
        self.money = snapshot.money.unwrap_or(self.config.starting_money);
        self.total_spent = snapshot.total_spent.unwrap_or(0);
        debug!(
            "Restored snapshot version {:?} saved at {}",
            snapshot.version, snapshot.saved_at
        );
    }

    /// Pretty printed snapshot for sharing.
    pub fn export_json(&self) -> Result<String, self::Error> {
        self.snapshot().to_json_pretty()
    }

    pub fn try_import_json(&mut self, json: &str) -> Result<(), self::Error> {
        let snapshot = Snapshot::from_json(json)?;
        self.restore(snapshot);
        Ok(())
    }

    /// Loads an exported game. On failure the current game is left untouched.
    pub fn import_json(&mut self, json: &str) -> bool {
        match self.try_import_json(json) {
            Ok(()) => true,
            Err(err) => {
                error!("Failed to import game: {err}");
                false
            }
        }
    }

    pub fn try_save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), self::Error> {
        fs::write(path, self.snapshot().to_json()?)?;
        Ok(())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> bool {
        match self.try_save_to_path(path) {
            Ok(()) => true,
            Err(err) => {
                error!("Failed to save game: {err}");
                false
            }
        }
    }

    pub fn try_load_from_path<P: AsRef<Path>>(&mut self, path: P) -> Result<(), self::Error> {
        let json = fs::read_to_string(path)?;
        self.try_import_json(&json)
    }

    /// Loads a saved game. On failure the current game is left untouched.
    pub fn load_from_path<P: AsRef<Path>>(&mut self, path: P) -> bool {
        match self.try_load_from_path(path) {
            Ok(()) => true,
            Err(err) => {
                error!("Failed to load game: {err}");
                false
            }
        }
    }
}

pub fn has_saved_game<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().exists()
}

pub fn delete_saved_game<P: AsRef<Path>>(path: P) -> bool {
    match fs::remove_file(path) {
        Ok(()) => true,
        Err(err) => {
            error!("Failed to delete saved game: {err}");
            false
        }
    }
}
