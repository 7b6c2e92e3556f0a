//! Per-controller memory of the last state each zone accepted.
//!
//! Lives next to the config in the platform data directory as TOML, keyed
//! by controller address and zone number:
//!
//! ```toml
//! ["192.168.1.40".2]
//! brightness = 100
//!
//! ["192.168.1.40".2.color]
//! r = 255
//! g = 0
//! b = 0
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use oelo_core::{ZoneId, ZoneMemory};

use crate::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ZoneStore {
    controllers: BTreeMap<String, BTreeMap<String, ZoneMemory>>,
}

impl ZoneStore {
    /// Load from `path`. A missing file is an empty store.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(toml::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Remembered zones for one controller. Entries outside `zone_count`
    /// are ignored.
    pub fn zones(&self, address: &str, zone_count: u8) -> BTreeMap<ZoneId, ZoneMemory> {
        let Some(zones) = self.controllers.get(address.trim()) else {
            return BTreeMap::new();
        };
        zones
            .iter()
            .filter_map(|(key, memory)| {
                let zone = ZoneId::new(key.parse().ok()?, zone_count).ok()?;
                Some((zone, memory.clone()))
            })
            .collect()
    }

    pub fn remember(&mut self, address: &str, zone: ZoneId, memory: ZoneMemory) {
        self.controllers
            .entry(address.trim().to_owned())
            .or_default()
            .insert(zone.to_string(), memory);
    }
}

/// Resolve the zone store path via XDG / platform conventions.
pub fn zone_store_path() -> PathBuf {
    ProjectDirs::from("com", "oelo", "oelo").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".local");
            p.push("share");
            p.push("oelo");
            p.push("zones.toml");
            p
        },
        |dirs| dirs.data_local_dir().join("zones.toml"),
    )
}
