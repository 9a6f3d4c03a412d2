//! User preferences, persisted as a single blob in the synced namespace.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use mailquill_store::{StorageBackend, StoreError};
use mailquill_verse::Translation;

use crate::error::CoreError;

const SETTINGS_KEY: &str = "mailquill.settings";

/// Template-related preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    pub enabled: bool,
    pub default_category: String,
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            default_category: "Work".to_string(),
        }
    }
}

/// Signature-related preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignatureSettings {
    pub auto_insert: bool,
    /// Preferred Bible translation for the verse of the day.
    pub translation: Translation,
}

impl Default for SignatureSettings {
    fn default() -> Self {
        Self {
            auto_insert: true,
            translation: Translation::default(),
        }
    }
}

/// The full preferences blob. Unknown fields in a stored blob are ignored,
/// missing ones take their defaults, so the shape can grow across versions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub templates: TemplateSettings,
    pub signatures: SignatureSettings,
}

/// Owns the settings blob in the synced store.
pub struct SettingsManager {
    store: Arc<dyn StorageBackend>,
    settings: Settings,
}

impl SettingsManager {
    /// Create a manager over the synced store. Call [`load`](Self::load)
    /// before use.
    pub fn new(store: Arc<dyn StorageBackend>) -> Self {
        Self {
            store,
            settings: Settings::default(),
        }
    }

    /// Load settings from the store, replacing in-memory state. A missing
    /// or unreadable blob yields the defaults.
    pub async fn load(&mut self) -> Result<&Settings, CoreError> {
        self.settings = match self.store.get(SETTINGS_KEY).await? {
            Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
                warn!("Discarding unreadable settings blob: {}", e);
                Settings::default()
            }),
            None => Settings::default(),
        };

        debug!("Settings loaded");
        Ok(&self.settings)
    }

    pub fn get(&self) -> &Settings {
        &self.settings
    }

    /// Apply a mutation and persist the result.
    pub async fn update<F>(&mut self, apply: F) -> Result<&Settings, CoreError>
    where
        F: FnOnce(&mut Settings),
    {
        apply(&mut self.settings);
        self.save().await?;
        Ok(&self.settings)
    }

    /// Restore defaults and persist them.
    pub async fn reset(&mut self) -> Result<(), CoreError> {
        self.settings = Settings::default();
        self.save().await?;
        info!("Settings reset to defaults");
        Ok(())
    }

    async fn save(&self) -> Result<(), CoreError> {
        let value = serde_json::to_value(&self.settings)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.store.set(SETTINGS_KEY, value).await?;
        Ok(())
    }
}
