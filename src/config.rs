use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardColors {
    pub light_square: u32,
    pub dark_square: u32,
    pub danger_marker: u32,
    pub piece: u32,
}

impl Default for BoardColors {
    fn default() -> Self {
        Self {
            light_square: 0xF0D9B5,
            dark_square: 0xB58863,
            danger_marker: 0xD62828,
            piece: 0x1B1B1B,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    pub cell_size: u32,
    pub light_theme: bool,
    pub show_coordinates: bool,
    pub colors: BoardColors,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            cell_size: 64,
            light_theme: true,
            show_coordinates: true,
            colors: BoardColors::default(),
        }
    }
}

impl GlobalConfig {
    const MIN_CELL_SIZE: u32 = 24;
    const MAX_CELL_SIZE: u32 = 160;

    fn path() -> crate::error::Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("eightqueens").join("config.toml"))
            .ok_or(crate::error::Error::ConfigDirNotFound)
    }

    pub fn from_toml(text: &str) -> crate::error::Result<Self> {
        let mut config: GlobalConfig = toml::from_str(text)?;
        config.cell_size = config.cell_size.clamp(Self::MIN_CELL_SIZE, Self::MAX_CELL_SIZE);
        Ok(config)
    }

    pub fn load() -> crate::error::Result<Self> {
        let path = Self::path()?;
        debug!("Loading config from {}", path.to_string_lossy());
        let config = Self::from_toml(&fs::read_to_string(&path)?)?;
        info!("Loaded config from {}", path.to_string_lossy());
        Ok(config)
    }

    pub fn save(&self) -> crate::error::Result<()> {
        let path = Self::path()?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&path, toml::to_string_pretty(self)?)?;
        debug!("Saved config to {}", path.to_string_lossy());
        Ok(())
    }
}
