//! Email template management.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use mailquill_store::{
    load_collection, save_collection, usage_of, ImportStrategy, StorageBackend, StorageUsage,
    StoreError,
};

use crate::error::CoreError;
use crate::library::{selection_templates, LibrarySelection};
use crate::vars;

const TEMPLATES_KEY: &str = "mailquill.templates";
const FALLBACK_NAME: &str = "Untitled Template";
const FALLBACK_CATEGORY: &str = "Other";

const DEFAULT_CATEGORIES: &[&str] = &[
    "Work",
    "Personal",
    "Support",
    "Sales",
    "Follow-up",
    "Signature",
    "Other",
];

/// An email template.
///
/// `variables` is derived, never authored: it is recomputed from the current
/// subject and body on every change and never trusted from an import
/// payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    pub id: Uuid,
    pub name: String,
    pub subject: String,
    pub body: String,
    pub category: String,
    pub variables: Vec<String>,
    pub usage_count: u64,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Template {
    fn recompute_variables(&mut self) {
        self.variables = extract_from(&self.subject, &self.body);
    }
}

/// Input for [`TemplateManager::create`].
#[derive(Debug, Clone, Default)]
pub struct NewTemplate {
    pub name: String,
    pub subject: String,
    pub body: String,
    pub category: String,
}

/// Partial update for [`TemplateManager::update`]. `None` keeps the old
/// value; an explicit empty string clears the field.
#[derive(Debug, Clone, Default)]
pub struct TemplateUpdate {
    pub name: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub category: Option<String>,
}

/// Import-payload shape: every field optional, computed fields ignored.
#[derive(Debug, Deserialize)]
struct TemplateRecord {
    #[serde(default)]
    id: Option<Uuid>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    subject: Option<String>,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    usage_count: Option<u64>,
    #[serde(default)]
    created: Option<DateTime<Utc>>,
    #[serde(default)]
    modified: Option<DateTime<Utc>>,
}

/// Aggregate counts over the collection.
#[derive(Debug, Clone)]
pub struct TemplateStats {
    pub total: usize,
    pub by_category: HashMap<String, usize>,
    pub with_variables: usize,
    pub total_variables: usize,
    pub total_usage: u64,
}

fn extract_from(subject: &str, body: &str) -> Vec<String> {
    vars::extract_variables(&format!("{subject} {body}"))
}

fn non_empty_or(value: String, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

/// Owns the template collection and its persistence.
pub struct TemplateManager {
    store: Arc<dyn StorageBackend>,
    templates: Vec<Template>,
    categories: Vec<String>,
}

impl TemplateManager {
    /// Create a manager over the local store. Call [`load`](Self::load)
    /// before use.
    pub fn new(store: Arc<dyn StorageBackend>) -> Self {
        Self {
            store,
            templates: Vec::new(),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Load the collection from the store, replacing any in-memory state.
    pub async fn load(&mut self) -> Result<usize, CoreError> {
        self.templates = load_collection(self.store.as_ref(), TEMPLATES_KEY).await?;

        // Registered categories survive only through the templates using
        // them; re-register any that the seed list does not cover.
        for template in &self.templates {
            if !self.categories.contains(&template.category) {
                self.categories.push(template.category.clone());
            }
        }

        debug!("Loaded {} templates", self.templates.len());
        Ok(self.templates.len())
    }

    async fn persist(&self) -> Result<(), CoreError> {
        save_collection(self.store.as_ref(), TEMPLATES_KEY, &self.templates).await?;
        Ok(())
    }

    /// Create a template. Never fails on well-formed input; empty name and
    /// category fall back to placeholders.
    pub async fn create(&mut self, new: NewTemplate) -> Result<Template, CoreError> {
        let now = Utc::now();
        let template = Template {
            id: Uuid::new_v4(),
            name: non_empty_or(new.name, FALLBACK_NAME),
            variables: extract_from(&new.subject, &new.body),
            subject: new.subject,
            body: new.body,
            category: non_empty_or(new.category, FALLBACK_CATEGORY),
            usage_count: 0,
            created: now,
            modified: now,
        };

        self.add_category(template.category.clone());
        self.templates.push(template.clone());
        self.persist().await?;

        info!("Template created: {}", template.name);
        Ok(template)
    }

    /// Merge a partial update onto a template. `Ok(None)` when the id is
    /// unknown. `variables` is recomputed from the resulting subject/body.
    pub async fn update(
        &mut self,
        id: Uuid,
        update: TemplateUpdate,
    ) -> Result<Option<Template>, CoreError> {
        let Some(template) = self.templates.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };

        if let Some(name) = update.name {
            template.name = name;
        }
        if let Some(subject) = update.subject {
            template.subject = subject;
        }
        if let Some(body) = update.body {
            template.body = body;
        }
        if let Some(category) = update.category {
            template.category = category;
        }
        template.recompute_variables();
        template.modified = Utc::now();

        let updated = template.clone();
        self.add_category(updated.category.clone());
        self.persist().await?;

        info!("Template updated: {}", updated.name);
        Ok(Some(updated))
    }

    /// Remove a template; `Ok(false)` when the id is unknown. There is no
    /// minimum-count floor.
    pub async fn delete(&mut self, id: Uuid) -> Result<bool, CoreError> {
        let Some(index) = self.templates.iter().position(|t| t.id == id) else {
            return Ok(false);
        };

        let removed = self.templates.remove(index);
        self.persist().await?;

        info!("Template deleted: {}", removed.name);
        Ok(true)
    }

    pub fn get(&self, id: Uuid) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn all(&self) -> &[Template] {
        &self.templates
    }

    pub fn by_category(&self, category: &str) -> Vec<&Template> {
        self.templates
            .iter()
            .filter(|t| t.category == category)
            .collect()
    }

    /// Case-insensitive substring match across name, subject, body and
    /// category; a template matches if any field contains the query.
    pub fn search(&self, query: &str) -> Vec<&Template> {
        let query = query.to_lowercase();
        self.templates
            .iter()
            .filter(|t| {
                t.name.to_lowercase().contains(&query)
                    || t.subject.to_lowercase().contains(&query)
                    || t.body.to_lowercase().contains(&query)
                    || t.category.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Templates ordered by descending usage.
    pub fn most_used(&self, limit: usize) -> Vec<&Template> {
        let mut ordered: Vec<&Template> = self.templates.iter().collect();
        ordered.sort_by(|a, b| b.usage_count.cmp(&a.usage_count));
        ordered.truncate(limit);
        ordered
    }

    /// Copy a template under a `" (Copy)"` name with fresh identity and
    /// zeroed usage.
    pub async fn duplicate(&mut self, id: Uuid) -> Result<Option<Template>, CoreError> {
        let Some(original) = self.get(id) else {
            return Ok(None);
        };

        let now = Utc::now();
        let copy = Template {
            id: Uuid::new_v4(),
            name: format!("{} (Copy)", original.name),
            usage_count: 0,
            created: now,
            modified: now,
            ..original.clone()
        };

        self.templates.push(copy.clone());
        self.persist().await?;
        Ok(Some(copy))
    }

    /// Record one successful insertion into the host document. Unknown ids
    /// are a no-op; `modified` is not touched.
    pub async fn increment_usage(&mut self, id: Uuid) -> Result<(), CoreError> {
        let Some(template) = self.templates.iter_mut().find(|t| t.id == id) else {
            return Ok(());
        };

        template.usage_count += 1;
        self.persist().await
    }

    /// Registered categories, seed set first.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Register a category; `false` if it already exists.
    pub fn add_category(&mut self, category: String) -> bool {
        if self.categories.contains(&category) {
            return false;
        }
        self.categories.push(category);
        true
    }

    /// Merge the built-in library into the collection. Entries whose name
    /// already exists are skipped. Returns how many were added.
    pub async fn import_prebuilt(
        &mut self,
        selection: LibrarySelection,
    ) -> Result<usize, CoreError> {
        let existing: std::collections::HashSet<String> =
            self.templates.iter().map(|t| t.name.clone()).collect();

        let mut added = 0;
        for entry in selection_templates(selection) {
            if existing.contains(entry.name) {
                continue;
            }

            let now = Utc::now();
            let template = Template {
                id: Uuid::new_v4(),
                name: entry.name.to_string(),
                subject: entry.subject.to_string(),
                body: entry.body.to_string(),
                category: entry.category.to_string(),
                variables: extract_from(entry.subject, entry.body),
                usage_count: 0,
                created: now,
                modified: now,
            };
            self.add_category(template.category.clone());
            self.templates.push(template);
            added += 1;
        }

        if added > 0 {
            self.persist().await?;
        }

        info!("Imported {} prebuilt templates", added);
        Ok(added)
    }

    /// Import a serialized template array.
    ///
    /// Merge skips payload records whose name already exists (the existing
    /// record is untouched) and gives added records fresh identity; replace
    /// normalizes the payload wholesale. A top level that is not an array
    /// fails with [`CoreError::MalformedImport`] and leaves the collection
    /// untouched. Returns how many records were added (merge) or imported
    /// (replace).
    pub async fn import_json(
        &mut self,
        data: &str,
        strategy: ImportStrategy,
    ) -> Result<usize, CoreError> {
        let records: Vec<TemplateRecord> = serde_json::from_str(data)
            .map_err(|e| CoreError::MalformedImport(e.to_string()))?;

        let count = match strategy {
            ImportStrategy::MergeSkipDuplicateByName => {
                let existing: std::collections::HashSet<String> =
                    self.templates.iter().map(|t| t.name.clone()).collect();

                let mut added = 0;
                for record in records {
                    let name = record
                        .name
                        .clone()
                        .unwrap_or_else(|| FALLBACK_NAME.to_string());
                    if existing.contains(&name) {
                        continue;
                    }
                    self.templates.push(Self::normalize(record, true));
                    added += 1;
                }
                added
            }
            ImportStrategy::ReplaceAll => {
                self.templates = records
                    .into_iter()
                    .map(|r| Self::normalize(r, false))
                    .collect();
                self.templates.len()
            }
        };

        let categories: Vec<String> = self.templates.iter().map(|t| t.category.clone()).collect();
        for category in categories {
            self.add_category(category);
        }

        self.persist().await?;
        info!("Imported {} templates", count);
        Ok(count)
    }

    /// Build a collection record from an import payload entry.
    ///
    /// `fresh_identity` discards payload id/timestamps (merge imports);
    /// replace imports keep them when present. Variables are always
    /// recomputed.
    fn normalize(record: TemplateRecord, fresh_identity: bool) -> Template {
        let now = Utc::now();
        let subject = record.subject.unwrap_or_default();
        let body = record.body.unwrap_or_default();

        Template {
            id: if fresh_identity {
                Uuid::new_v4()
            } else {
                record.id.unwrap_or_else(Uuid::new_v4)
            },
            name: non_empty_or(record.name.unwrap_or_default(), FALLBACK_NAME),
            variables: extract_from(&subject, &body),
            subject,
            body,
            category: non_empty_or(record.category.unwrap_or_default(), FALLBACK_CATEGORY),
            usage_count: record.usage_count.unwrap_or(0),
            created: if fresh_identity { now } else { record.created.unwrap_or(now) },
            modified: if fresh_identity { now } else { record.modified.unwrap_or(now) },
        }
    }

    /// Full collection, pretty-printed.
    pub fn export_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.templates)
            .map_err(|e| CoreError::Store(StoreError::Serialization(e.to_string())))
    }

    /// How much of the persistence ceiling the collection uses.
    pub fn storage_usage(&self) -> Result<StorageUsage, CoreError> {
        Ok(usage_of(&self.templates)?)
    }

    pub fn stats(&self) -> TemplateStats {
        let mut by_category: HashMap<String, usize> = HashMap::new();
        let mut with_variables = 0;
        let mut total_variables = 0;
        let mut total_usage = 0;

        for template in &self.templates {
            *by_category.entry(template.category.clone()).or_insert(0) += 1;
            if !template.variables.is_empty() {
                with_variables += 1;
                total_variables += template.variables.len();
            }
            total_usage += template.usage_count;
        }

        TemplateStats {
            total: self.templates.len(),
            by_category,
            with_variables,
            total_variables,
            total_usage,
        }
    }
}

#[cfg(test)]
#[path = "templates_tests.rs"]
mod tests;
