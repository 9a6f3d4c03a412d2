//! Autofill profiles: named bundles of variable values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use mailquill_store::{load_collection, save_collection, ImportStrategy, StorageBackend};

use crate::error::CoreError;

const PROFILES_KEY: &str = "mailquill.profiles";
const ACTIVE_PROFILE_KEY: &str = "mailquill.active_profile";
const FALLBACK_NAME: &str = "Untitled Profile";

/// A named bundle of variable values used to pre-fill template
/// placeholders. At most one profile carries `is_default`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub name: String,
    pub variables: HashMap<String, String>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    pub is_default: bool,
}

/// Input for [`ProfileManager::create`].
#[derive(Debug, Clone, Default)]
pub struct NewProfile {
    pub name: String,
    pub variables: HashMap<String, String>,
    pub is_default: bool,
}

/// Partial update for [`ProfileManager::update`].
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub variables: Option<HashMap<String, String>>,
    pub is_default: Option<bool>,
}

/// Import-payload shape.
#[derive(Debug, Deserialize)]
struct ProfileRecord {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    variables: HashMap<String, String>,
    #[serde(default)]
    is_default: bool,
}

/// Summary of the profile collection.
#[derive(Debug, Clone)]
pub struct ProfileStats {
    pub total: usize,
    pub has_default: bool,
    pub has_active: bool,
    pub active_profile_name: Option<String>,
}

/// Owns the profile collection and the active-profile pointer.
pub struct ProfileManager {
    store: Arc<dyn StorageBackend>,
    profiles: Vec<Profile>,
    active_id: Option<Uuid>,
}

impl ProfileManager {
    /// Create a manager over the local store. Call [`load`](Self::load)
    /// before use.
    pub fn new(store: Arc<dyn StorageBackend>) -> Self {
        Self {
            store,
            profiles: Vec::new(),
            active_id: None,
        }
    }

    /// Load the collection and active pointer, replacing in-memory state.
    /// A pointer that no longer resolves to a profile is cleared.
    pub async fn load(&mut self) -> Result<usize, CoreError> {
        self.profiles = load_collection(self.store.as_ref(), PROFILES_KEY).await?;

        self.active_id = match self.store.get(ACTIVE_PROFILE_KEY).await? {
            Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
                warn!("Discarding unreadable active-profile pointer: {}", e);
                None
            }),
            None => None,
        };

        if let Some(id) = self.active_id {
            if !self.profiles.iter().any(|p| p.id == id) {
                warn!("Active profile {} no longer exists, clearing", id);
                self.active_id = None;
                self.persist_active().await?;
            }
        }

        debug!("Loaded {} profiles", self.profiles.len());
        Ok(self.profiles.len())
    }

    async fn persist(&self) -> Result<(), CoreError> {
        save_collection(self.store.as_ref(), PROFILES_KEY, &self.profiles).await?;
        Ok(())
    }

    async fn persist_active(&self) -> Result<(), CoreError> {
        let value = serde_json::to_value(self.active_id)
            .map_err(|e| mailquill_store::StoreError::Serialization(e.to_string()))?;
        self.store.set(ACTIVE_PROFILE_KEY, value).await?;
        Ok(())
    }

    fn clear_other_defaults(&mut self, keep: Uuid) {
        for profile in &mut self.profiles {
            if profile.id != keep {
                profile.is_default = false;
            }
        }
    }

    /// Create a profile. Setting `is_default` clears the flag on every
    /// other profile in the same persist cycle.
    pub async fn create(&mut self, new: NewProfile) -> Result<Profile, CoreError> {
        let now = Utc::now();
        let profile = Profile {
            id: Uuid::new_v4(),
            name: if new.name.trim().is_empty() {
                FALLBACK_NAME.to_string()
            } else {
                new.name
            },
            variables: new.variables,
            created: now,
            modified: now,
            is_default: new.is_default,
        };

        if profile.is_default {
            self.clear_other_defaults(profile.id);
        }

        self.profiles.push(profile.clone());
        self.persist().await?;

        info!("Profile created: {}", profile.name);
        Ok(profile)
    }

    /// Merge a partial update onto a profile; `Ok(None)` when the id is
    /// unknown. The default-exclusivity rule applies when the update sets
    /// `is_default`.
    pub async fn update(
        &mut self,
        id: Uuid,
        update: ProfileUpdate,
    ) -> Result<Option<Profile>, CoreError> {
        let Some(profile) = self.profiles.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        if let Some(name) = update.name {
            profile.name = name;
        }
        if let Some(variables) = update.variables {
            profile.variables = variables;
        }
        if let Some(is_default) = update.is_default {
            profile.is_default = is_default;
        }
        profile.modified = Utc::now();
        let updated = profile.clone();

        if updated.is_default {
            self.clear_other_defaults(id);
        }

        self.persist().await?;
        info!("Profile updated: {}", updated.name);
        Ok(Some(updated))
    }

    /// Remove a profile; `Ok(false)` when the id is unknown. Zero profiles
    /// is a valid state. Deleting the active profile clears the pointer.
    pub async fn delete(&mut self, id: Uuid) -> Result<bool, CoreError> {
        let Some(index) = self.profiles.iter().position(|p| p.id == id) else {
            return Ok(false);
        };

        let removed = self.profiles.remove(index);

        if self.active_id == Some(id) {
            self.active_id = None;
            self.persist_active().await?;
        }

        self.persist().await?;
        info!("Profile deleted: {}", removed.name);
        Ok(true)
    }

    pub fn get(&self, id: Uuid) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    pub fn all(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn default_profile(&self) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.is_default)
    }

    /// The profile supplying autofill values: the active pointer if set,
    /// else the default profile, else none.
    pub fn get_active(&self) -> Option<&Profile> {
        match self.active_id {
            Some(id) => self.get(id),
            None => self.default_profile(),
        }
    }

    /// Point autofill at a profile; `Ok(false)` when the id is unknown.
    pub async fn set_active(&mut self, id: Uuid) -> Result<bool, CoreError> {
        if self.get(id).is_none() {
            return Ok(false);
        }

        self.active_id = Some(id);
        self.persist_active().await?;
        Ok(true)
    }

    pub async fn clear_active(&mut self) -> Result<(), CoreError> {
        self.active_id = None;
        self.persist_active().await
    }

    /// Values for `names` from the active profile. Only names the profile
    /// actually fills are returned - an empty-string value counts as absent.
    pub fn variable_values(&self, names: &[String]) -> HashMap<String, String> {
        let Some(profile) = self.get_active() else {
            return HashMap::new();
        };

        names
            .iter()
            .filter_map(|name| {
                profile
                    .variables
                    .get(name)
                    .filter(|value| !value.is_empty())
                    .map(|value| (name.clone(), value.clone()))
            })
            .collect()
    }

    /// Set one variable on a profile; `Ok(false)` when the id is unknown.
    pub async fn set_variable(
        &mut self,
        id: Uuid,
        name: &str,
        value: &str,
    ) -> Result<bool, CoreError> {
        let Some(profile) = self.profiles.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };

        profile.variables.insert(name.to_string(), value.to_string());
        profile.modified = Utc::now();
        self.persist().await?;
        Ok(true)
    }

    /// Merge several variables onto a profile; `Ok(false)` when the id is
    /// unknown.
    pub async fn merge_variables(
        &mut self,
        id: Uuid,
        variables: HashMap<String, String>,
    ) -> Result<bool, CoreError> {
        let Some(profile) = self.profiles.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };

        profile.variables.extend(variables);
        profile.modified = Utc::now();
        self.persist().await?;
        Ok(true)
    }

    /// Import a serialized profile array.
    ///
    /// Merge skips names that already exist and gives added records fresh
    /// identity; replace regenerates identity for **every** imported record.
    /// Returns how many records were added or imported.
    pub async fn import_json(
        &mut self,
        data: &str,
        strategy: ImportStrategy,
    ) -> Result<usize, CoreError> {
        let records: Vec<ProfileRecord> = serde_json::from_str(data)
            .map_err(|e| CoreError::MalformedImport(e.to_string()))?;

        let count = match strategy {
            ImportStrategy::MergeSkipDuplicateByName => {
                let existing: std::collections::HashSet<String> =
                    self.profiles.iter().map(|p| p.name.clone()).collect();

                let mut added = 0;
                for record in records {
                    let name = record
                        .name
                        .clone()
                        .unwrap_or_else(|| FALLBACK_NAME.to_string());
                    if existing.contains(&name) {
                        continue;
                    }
                    self.profiles.push(Self::normalize(record));
                    added += 1;
                }
                added
            }
            ImportStrategy::ReplaceAll => {
                self.profiles = records.into_iter().map(Self::normalize).collect();
                self.profiles.len()
            }
        };

        // An import payload may carry several defaults; keep the first.
        let mut seen_default = false;
        for profile in &mut self.profiles {
            if profile.is_default {
                if seen_default {
                    profile.is_default = false;
                } else {
                    seen_default = true;
                }
            }
        }

        self.persist().await?;
        info!("Imported {} profiles", count);
        Ok(count)
    }

    /// Every imported profile gets a fresh id and timestamps, regardless of
    /// strategy.
    fn normalize(record: ProfileRecord) -> Profile {
        let now = Utc::now();
        Profile {
            id: Uuid::new_v4(),
            name: record.name.filter(|n| !n.trim().is_empty()).unwrap_or_else(|| FALLBACK_NAME.to_string()),
            variables: record.variables,
            created: now,
            modified: now,
            is_default: record.is_default,
        }
    }

    /// Full collection, pretty-printed.
    pub fn export_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.profiles)
            .map_err(|e| CoreError::Store(mailquill_store::StoreError::Serialization(e.to_string())))
    }

    pub fn stats(&self) -> ProfileStats {
        ProfileStats {
            total: self.profiles.len(),
            has_default: self.profiles.iter().any(|p| p.is_default),
            has_active: self.active_id.is_some(),
            active_profile_name: self.get_active().map(|p| p.name.clone()),
        }
    }
}

#[cfg(test)]
#[path = "profiles_tests.rs"]
mod tests;
