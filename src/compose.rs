//! Thin orchestration between the data layer and the host page.
//!
//! The presentation layer drives the picker flow: list the templates, show
//! the selected template's variables pre-filled from the active profile,
//! collect values, and apply. Everything host-page-specific lives behind
//! [`HostSink`].

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use mailquill_core::{
    vars, CoreError, ProfileManager, SignatureManager, Template, TemplateManager,
};
use mailquill_verse::VerseQuoteProvider;

/// Which editable field of the compose window receives content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetField {
    Subject,
    Body,
}

/// Compose-flow errors.
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The host document rejected the insertion.
    #[error("Host sink rejected content: {0}")]
    Sink(String),
}

/// The host document, reduced to the one operation this crate needs:
/// accept a final string for a compose field. How it lands in the host
/// page's editable fields is the embedder's concern.
#[async_trait]
pub trait HostSink: Send + Sync {
    async fn insert(&self, field: TargetField, content: &str) -> Result<(), ComposeError>;
}

/// Orchestrates the template and signature flows against a host sink.
///
/// Managers are injected once at construction; [`init`](Self::init) runs
/// their load lifecycles.
pub struct ComposeService<S: HostSink> {
    pub templates: TemplateManager,
    pub profiles: ProfileManager,
    pub signatures: SignatureManager,
    pub verses: VerseQuoteProvider,
    sink: S,
}

impl<S: HostSink> ComposeService<S> {
    pub fn new(
        templates: TemplateManager,
        profiles: ProfileManager,
        signatures: SignatureManager,
        verses: VerseQuoteProvider,
        sink: S,
    ) -> Self {
        Self {
            templates,
            profiles,
            signatures,
            verses,
            sink,
        }
    }

    /// Load every manager from the store.
    pub async fn init(&mut self) -> Result<(), ComposeError> {
        self.templates.load().await?;
        self.profiles.load().await?;
        self.signatures.load().await?;
        Ok(())
    }

    /// Templates available to the picker.
    pub fn template_choices(&self) -> &[Template] {
        self.templates.all()
    }

    /// The variable names a template needs, in order of first appearance.
    pub fn required_variables(&self, id: Uuid) -> Option<&[String]> {
        self.templates.get(id).map(|t| t.variables.as_slice())
    }

    /// Autofill values for a template's variables from the active profile.
    /// Only variables the profile actually fills are returned.
    pub fn prefill(&self, id: Uuid) -> HashMap<String, String> {
        match self.templates.get(id) {
            Some(template) => self.profiles.variable_values(&template.variables),
            None => HashMap::new(),
        }
    }

    /// Substitute `values` into a template and insert the result into the
    /// host document.
    ///
    /// `Ok(false)` when the id is unknown. Usage is counted exactly once,
    /// after both fields were accepted by the sink.
    pub async fn apply_template(
        &mut self,
        id: Uuid,
        values: &HashMap<String, String>,
    ) -> Result<bool, ComposeError> {
        let Some(template) = self.templates.get(id) else {
            return Ok(false);
        };

        let has_subject = !template.subject.is_empty();
        let has_body = !template.body.is_empty();
        let subject = vars::substitute(&template.subject, values);
        let body = vars::substitute(&template.body, values);

        if has_subject {
            self.sink.insert(TargetField::Subject, &subject).await?;
        }
        if has_body {
            self.sink.insert(TargetField::Body, &body).await?;
        }

        self.templates.increment_usage(id).await?;
        debug!("Applied template {}", id);
        Ok(true)
    }

    /// Render a signature (the active one when no id is given) and insert
    /// it into the compose body.
    pub async fn insert_signature(&mut self, id: Option<Uuid>) -> Result<(), ComposeError> {
        let html = self.signatures.processed(id, &self.verses).await?;
        if html.is_empty() {
            return Ok(());
        }

        self.sink.insert(TargetField::Body, &html).await?;
        debug!("Inserted signature");
        Ok(())
    }
}

#[cfg(test)]
#[path = "compose_tests.rs"]
mod tests;
