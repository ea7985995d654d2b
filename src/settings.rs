use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::error::Category;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::{PoisonError, RwLock},
};

use crate::error::{Error, Result};
use crate::models::LogoSlot;
use crate::render::{ContactInfo, SheetOptions};

pub const DEFAULT_SETTINGS_FILE: &str = "rotulos.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub database_path: PathBuf,
    pub contact_email: String,
    pub whatsapp: String,
    pub default_left_logo: PathBuf,
    pub default_right_logo: PathBuf,
    /// Named print queue; the system default when unset
    pub printer: Option<String>,
    pub shelf_life_days: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        let contact = ContactInfo::default();
        Self {
            database_path: "rotulos.sqlite3".into(),
            contact_email: contact.email,
            whatsapp: contact.whatsapp,
            default_left_logo: "logo_izquierdo.png".into(),
            default_right_logo: "logo_derecho.png".into(),
            printer: None,
            shelf_life_days: 365,
        }
    }
}

impl AppSettings {
    pub fn contact(&self) -> ContactInfo {
        ContactInfo {
            email: self.contact_email.clone(),
            whatsapp: self.whatsapp.clone(),
        }
    }

    pub fn sheet_options(&self) -> SheetOptions {
        SheetOptions {
            shelf_life_days: self.shelf_life_days,
            contact: self.contact(),
            ..SheetOptions::default()
        }
    }

    pub fn default_logo(&self, slot: LogoSlot) -> &Path {
        match slot {
            LogoSlot::Left => &self.default_left_logo,
            LogoSlot::Right => &self.default_right_logo,
        }
    }
}

/// JSON settings file. Missing files, unknown keys and text that is not JSON
/// fall back to defaults; a well-formed file with a bad value is an error.
pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<AppSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))
                .map_err(Error::Settings)?;
            match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(err) if err.classify() == Category::Data => {
                    return Err(Error::Settings(anyhow::Error::new(err).context(format!(
                        "Invalid value in settings file {}",
                        path.display()
                    ))));
                }
                Err(err) => {
                    log::warn!(
                        "Ignoring unreadable settings in {}: {}",
                        path.display(),
                        err
                    );
                    AppSettings::default()
                }
            }
        } else {
            AppSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn settings(&self) -> AppSettings {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn update(&self, settings: AppSettings) -> Result<()> {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        self.persist(&settings).map_err(Error::Settings)?;
        *guard = settings;
        Ok(())
    }

    /// Relative paths in the file are taken from the settings file's folder.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return path.to_path_buf();
        }
        match self.path.parent() {
            Some(dir) => dir.join(path),
            None => path.to_path_buf(),
        }
    }

    fn persist(&self, data: &AppSettings) -> anyhow::Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}
