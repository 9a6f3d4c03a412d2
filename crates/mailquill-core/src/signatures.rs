//! Signature bodies and the shared user profile they draw from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use mailquill_store::{load_collection, save_collection, StorageBackend, StoreError};
use mailquill_verse::VerseQuoteProvider;

use crate::error::CoreError;
use crate::vars;

const SIGNATURES_KEY: &str = "mailquill.signatures";
const USER_PROFILE_KEY: &str = "mailquill.user_profile";
const ACTIVE_SIGNATURE_KEY: &str = "mailquill.active_signature";

/// Social profile links substituted into signature bodies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
    pub facebook: String,
    pub instagram: String,
    pub twitter: String,
    pub linkedin: String,
    pub youtube: String,
}

/// The single shared record holding the canonical values for the fixed
/// signature schema. Unknown fields from older or foreign payloads are
/// preserved in `extra`, not rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub full_name: String,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub subtitle: String,
    pub company: String,
    pub phone: String,
    pub mobile: String,
    pub email: String,
    pub website: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub social: SocialLinks,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl UserProfile {
    /// The fixed-schema substitution values. Extra fields are preserved in
    /// storage but never substituted.
    fn substitution_map(&self) -> HashMap<String, String> {
        HashMap::from([
            ("full_name".to_string(), self.full_name.clone()),
            ("first_name".to_string(), self.first_name.clone()),
            ("last_name".to_string(), self.last_name.clone()),
            ("title".to_string(), self.title.clone()),
            ("subtitle".to_string(), self.subtitle.clone()),
            ("company".to_string(), self.company.clone()),
            ("phone".to_string(), self.phone.clone()),
            ("mobile".to_string(), self.mobile.clone()),
            ("email".to_string(), self.email.clone()),
            ("website".to_string(), self.website.clone()),
            ("address".to_string(), self.address.clone()),
            ("city".to_string(), self.city.clone()),
            ("state".to_string(), self.state.clone()),
            ("zip".to_string(), self.zip.clone()),
            ("facebook".to_string(), self.social.facebook.clone()),
            ("instagram".to_string(), self.social.instagram.clone()),
            ("twitter".to_string(), self.social.twitter.clone()),
            ("linkedin".to_string(), self.social.linkedin.clone()),
            ("youtube".to_string(), self.social.youtube.clone()),
        ])
    }
}

/// Shallow-merge update for the user profile: supplied fields replace,
/// absent fields keep their value.
#[derive(Debug, Clone, Default)]
pub struct UserProfileUpdate {
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub social: Option<SocialLinks>,
    pub extra: Option<HashMap<String, Value>>,
}

/// A signature body.
///
/// `variables` is derived from `html`, like template variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signature {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category: String,
    pub is_default: bool,
    pub html: String,
    pub variables: Vec<String>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// Input for [`SignatureManager::add`].
#[derive(Debug, Clone, Default)]
pub struct NewSignature {
    pub name: String,
    pub description: String,
    pub category: String,
    pub html: String,
}

/// Partial update for [`SignatureManager::update`].
#[derive(Debug, Clone, Default)]
pub struct SignatureUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub html: Option<String>,
    pub is_default: Option<bool>,
}

/// Import-payload shape.
#[derive(Debug, Deserialize)]
struct SignatureRecord {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    html: String,
}

/// Owns the signature collection, the shared user profile, and the
/// active-signature pointer.
///
/// Unlike templates and profiles, the collection is never empty: first use
/// seeds a built-in set, and deleting the last remaining signature is
/// refused.
pub struct SignatureManager {
    store: Arc<dyn StorageBackend>,
    signatures: Vec<Signature>,
    user_profile: UserProfile,
    active_id: Option<Uuid>,
}

impl SignatureManager {
    /// Create a manager over the local store. Call [`load`](Self::load)
    /// before use.
    pub fn new(store: Arc<dyn StorageBackend>) -> Self {
        Self {
            store,
            signatures: Vec::new(),
            user_profile: UserProfile::default(),
            active_id: None,
        }
    }

    /// Load state from the store, seeding the default signatures when the
    /// collection is empty.
    pub async fn load(&mut self) -> Result<usize, CoreError> {
        self.signatures = load_collection(self.store.as_ref(), SIGNATURES_KEY).await?;

        self.user_profile = match self.store.get(USER_PROFILE_KEY).await? {
            Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
                warn!("Discarding unreadable user profile: {}", e);
                UserProfile::default()
            }),
            None => UserProfile::default(),
        };

        self.active_id = match self.store.get(ACTIVE_SIGNATURE_KEY).await? {
            Some(value) => serde_json::from_value(value).unwrap_or(None),
            None => None,
        };

        if self.signatures.is_empty() {
            self.seed_defaults().await?;
        } else if let Some(id) = self.active_id {
            if !self.signatures.iter().any(|s| s.id == id) {
                warn!("Active signature {} no longer exists, clearing", id);
                self.active_id = None;
                self.persist_active().await?;
            }
        }

        debug!("Loaded {} signatures", self.signatures.len());
        Ok(self.signatures.len())
    }

    async fn seed_defaults(&mut self) -> Result<(), CoreError> {
        info!("No signatures present, seeding defaults");

        let seeds = [
            (
                "Classic Professional",
                "Full signature with contact details, social links and the verse of the day",
                "professional",
                CLASSIC_PROFESSIONAL_HTML,
                true,
            ),
            (
                "Simple Professional",
                "Clean and simple professional signature",
                "professional",
                SIMPLE_PROFESSIONAL_HTML,
                false,
            ),
            (
                "Minimal",
                "Just the essentials",
                "minimal",
                MINIMAL_HTML,
                false,
            ),
        ];

        let now = Utc::now();
        self.signatures = seeds
            .iter()
            .map(|(name, description, category, html, is_default)| Signature {
                id: Uuid::new_v4(),
                name: name.to_string(),
                description: description.to_string(),
                category: category.to_string(),
                is_default: *is_default,
                html: html.to_string(),
                variables: vars::extract_variables(html),
                created: now,
                modified: now,
            })
            .collect();

        // The default seed is also the active signature.
        self.active_id = self.signatures.first().map(|s| s.id);

        self.persist().await?;
        self.persist_active().await?;
        Ok(())
    }

    async fn persist(&self) -> Result<(), CoreError> {
        save_collection(self.store.as_ref(), SIGNATURES_KEY, &self.signatures).await?;
        Ok(())
    }

    async fn persist_active(&self) -> Result<(), CoreError> {
        let value = serde_json::to_value(self.active_id)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.store.set(ACTIVE_SIGNATURE_KEY, value).await?;
        Ok(())
    }

    async fn persist_user_profile(&self) -> Result<(), CoreError> {
        let value = serde_json::to_value(&self.user_profile)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.store.set(USER_PROFILE_KEY, value).await?;
        Ok(())
    }

    pub fn get(&self, id: Uuid) -> Option<&Signature> {
        self.signatures.iter().find(|s| s.id == id)
    }

    pub fn all(&self) -> &[Signature] {
        &self.signatures
    }

    pub fn by_category(&self, category: &str) -> Vec<&Signature> {
        self.signatures
            .iter()
            .filter(|s| s.category == category)
            .collect()
    }

    /// The signature used for insertion: the active pointer if it resolves,
    /// else the first in collection order.
    pub fn active(&self) -> Option<&Signature> {
        match self.active_id {
            Some(id) => self.get(id).or_else(|| self.signatures.first()),
            None => self.signatures.first(),
        }
    }

    /// Point insertion at a signature; `Ok(false)` when the id is unknown.
    pub async fn set_active(&mut self, id: Uuid) -> Result<bool, CoreError> {
        if self.get(id).is_none() {
            return Ok(false);
        }

        self.active_id = Some(id);
        self.persist_active().await?;
        Ok(true)
    }

    /// Add a signature. Defaults: name `"New Signature"`, category
    /// `"custom"`.
    pub async fn add(&mut self, new: NewSignature) -> Result<Signature, CoreError> {
        let now = Utc::now();
        let signature = Signature {
            id: Uuid::new_v4(),
            name: if new.name.trim().is_empty() {
                "New Signature".to_string()
            } else {
                new.name
            },
            description: new.description,
            category: if new.category.trim().is_empty() {
                "custom".to_string()
            } else {
                new.category
            },
            is_default: false,
            variables: vars::extract_variables(&new.html),
            html: new.html,
            created: now,
            modified: now,
        };

        self.signatures.push(signature.clone());
        self.persist().await?;

        info!("Signature added: {}", signature.name);
        Ok(signature)
    }

    /// Merge a partial update onto a signature; `Ok(false)` when the id is
    /// unknown. `variables` follows the resulting html.
    pub async fn update(&mut self, id: Uuid, update: SignatureUpdate) -> Result<bool, CoreError> {
        let Some(signature) = self.signatures.iter_mut().find(|s| s.id == id) else {
            return Ok(false);
        };

        if let Some(name) = update.name {
            signature.name = name;
        }
        if let Some(description) = update.description {
            signature.description = description;
        }
        if let Some(category) = update.category {
            signature.category = category;
        }
        if let Some(html) = update.html {
            signature.variables = vars::extract_variables(&html);
            signature.html = html;
        }
        if let Some(is_default) = update.is_default {
            signature.is_default = is_default;
        }
        signature.modified = Utc::now();

        self.persist().await?;
        Ok(true)
    }

    /// Remove a signature.
    ///
    /// Refused (`Ok(false)`, collection unmodified) when this is the last
    /// remaining signature or the id is unknown. Deleting the active
    /// signature reassigns the pointer to the first remaining record.
    pub async fn delete(&mut self, id: Uuid) -> Result<bool, CoreError> {
        let Some(index) = self.signatures.iter().position(|s| s.id == id) else {
            return Ok(false);
        };

        if self.signatures.len() == 1 {
            warn!("Refusing to delete the last signature");
            return Ok(false);
        }

        if self.active_id == Some(id) {
            let replacement = self
                .signatures
                .iter()
                .find(|s| s.id != id)
                .map(|s| s.id);
            self.active_id = replacement;
            self.persist_active().await?;
        }

        let removed = self.signatures.remove(index);
        self.persist().await?;

        info!("Signature deleted: {}", removed.name);
        Ok(true)
    }

    /// Render a signature for insertion.
    ///
    /// Resolves to the active signature when no id is given. Fixed-schema
    /// fields are filled from the user profile (missing values render
    /// blank); dynamic placeholders resolve through the verse provider;
    /// anything still unresolved is blanked rather than leaking `{{token}}`
    /// text into sent mail. An unknown id renders as the empty string.
    pub async fn processed(
        &self,
        signature_id: Option<Uuid>,
        verses: &VerseQuoteProvider,
    ) -> Result<String, CoreError> {
        let signature = match signature_id {
            Some(id) => self.get(id),
            None => self.active(),
        };
        let Some(signature) = signature else {
            warn!("No signature available to process");
            return Ok(String::new());
        };

        let filled = vars::substitute_known(&signature.html, &self.user_profile.substitution_map());
        let with_dynamic = verses.process_special_placeholders(&filled).await;
        Ok(vars::blank_unresolved(&with_dynamic))
    }

    pub fn user_profile(&self) -> &UserProfile {
        &self.user_profile
    }

    /// Shallow-merge an update into the shared user profile and persist it.
    pub async fn update_user_profile(
        &mut self,
        update: UserProfileUpdate,
    ) -> Result<(), CoreError> {
        let profile = &mut self.user_profile;

        if let Some(value) = update.full_name {
            profile.full_name = value;
        }
        if let Some(value) = update.first_name {
            profile.first_name = value;
        }
        if let Some(value) = update.last_name {
            profile.last_name = value;
        }
        if let Some(value) = update.title {
            profile.title = value;
        }
        if let Some(value) = update.subtitle {
            profile.subtitle = value;
        }
        if let Some(value) = update.company {
            profile.company = value;
        }
        if let Some(value) = update.phone {
            profile.phone = value;
        }
        if let Some(value) = update.mobile {
            profile.mobile = value;
        }
        if let Some(value) = update.email {
            profile.email = value;
        }
        if let Some(value) = update.website {
            profile.website = value;
        }
        if let Some(value) = update.address {
            profile.address = value;
        }
        if let Some(value) = update.city {
            profile.city = value;
        }
        if let Some(value) = update.state {
            profile.state = value;
        }
        if let Some(value) = update.zip {
            profile.zip = value;
        }
        if let Some(value) = update.social {
            profile.social = value;
        }
        if let Some(value) = update.extra {
            profile.extra = value;
        }

        self.persist_user_profile().await?;
        info!("User profile updated");
        Ok(())
    }

    /// Import a serialized signature array: merge by name, skip duplicates,
    /// fresh identity for added records. A top level that is not an array
    /// fails with [`CoreError::MalformedImport`].
    pub async fn import_json(&mut self, data: &str) -> Result<usize, CoreError> {
        let records: Vec<SignatureRecord> = serde_json::from_str(data)
            .map_err(|e| CoreError::MalformedImport(e.to_string()))?;

        let existing: std::collections::HashSet<String> =
            self.signatures.iter().map(|s| s.name.clone()).collect();

        let now = Utc::now();
        let mut added = 0;
        for record in records {
            let name = record
                .name
                .clone()
                .unwrap_or_else(|| "New Signature".to_string());
            if existing.contains(&name) {
                continue;
            }

            self.signatures.push(Signature {
                id: Uuid::new_v4(),
                name,
                description: record.description,
                category: record.category.unwrap_or_else(|| "custom".to_string()),
                is_default: false,
                variables: vars::extract_variables(&record.html),
                html: record.html,
                created: now,
                modified: now,
            });
            added += 1;
        }

        if added > 0 {
            self.persist().await?;
        }

        info!("Imported {} signatures", added);
        Ok(added)
    }

    /// Full collection, pretty-printed.
    pub fn export_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.signatures)
            .map_err(|e| CoreError::Store(StoreError::Serialization(e.to_string())))
    }
}

const CLASSIC_PROFESSIONAL_HTML: &str = r#"<div style="font-family: Georgia, serif; font-size: 14px; color: #222; margin-top: 24px;">
  <div style="font-size: 22px; font-weight: 600; color: #491f95;">{{full_name}}</div>
  <div style="font-size: 12px; font-weight: 600;">{{title}}</div>
  <div style="font-size: 12px; color: #787878;">{{subtitle}}</div>
  <div style="font-size: 12px;">{{company}}</div>
  <div style="margin-top: 8px;">
    <a href="tel:{{phone}}" style="color: #000;">{{phone}}</a><br>
    <a href="mailto:{{email}}" style="color: #000;">{{email}}</a><br>
    <a href="{{website}}" style="color: #000;" target="_blank">{{website}}</a>
  </div>
  <div style="margin-top: 8px;">{{address}}<br>{{city}}, {{state}} {{zip}}</div>
  <div style="margin-top: 8px;">
    <a href="{{facebook}}" target="_blank">Facebook</a> |
    <a href="{{instagram}}" target="_blank">Instagram</a> |
    <a href="{{twitter}}" target="_blank">Twitter</a> |
    <a href="{{linkedin}}" target="_blank">LinkedIn</a>
  </div>
  <div style="margin-top: 12px; font-size: 12px; font-style: italic; color: #491f95;">{{verse_of_the_day}}</div>
</div>"#;

const SIMPLE_PROFESSIONAL_HTML: &str = r#"<div style="font-family: Arial, sans-serif; font-size: 14px; color: #333; margin-top: 20px;">
  <div style="font-weight: bold; font-size: 16px; color: #2c3e50;">{{full_name}}</div>
  <div style="color: #7f8c8d; margin-top: 5px;">{{title}}</div>
  <div style="color: #7f8c8d;">{{company}}</div>
  <div style="margin-top: 10px;">
    <div><a href="tel:{{phone}}" style="color: #3498db; text-decoration: none;">{{phone}}</a></div>
    <div><a href="mailto:{{email}}" style="color: #3498db; text-decoration: none;">{{email}}</a></div>
    <div><a href="{{website}}" style="color: #3498db; text-decoration: none;" target="_blank">{{website}}</a></div>
  </div>
</div>"#;

const MINIMAL_HTML: &str = r#"<div style="font-family: Arial, sans-serif; font-size: 13px; color: #555; margin-top: 20px;">
  <div style="font-weight: 600;">{{full_name}}</div>
  <div style="color: #888;">{{title}}</div>
  <div style="margin-top: 8px;">
    <a href="mailto:{{email}}" style="color: #0066cc; text-decoration: none;">{{email}}</a> |
    <a href="tel:{{phone}}" style="color: #0066cc; text-decoration: none;">{{phone}}</a>
  </div>
</div>"#;

#[cfg(test)]
#[path = "signatures_tests.rs"]
mod tests;
