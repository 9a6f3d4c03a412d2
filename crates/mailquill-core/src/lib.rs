//! # Mailquill Core
//!
//! The data layer behind the compose surface: email templates with
//! `{{variable}}` substitution, named autofill profiles, signature bodies
//! drawing from a shared user profile, and the synced settings blob.
//!
//! ## Components
//!
//! - [`TemplateManager`] - CRUD, search, usage bookkeeping, prebuilt library
//!   seeding, import/export
//! - [`ProfileManager`] - Variable-value bundles with default/active
//!   selection
//! - [`SignatureManager`] - Fixed-schema signature bodies and the shared
//!   [`UserProfile`] record
//! - [`SettingsManager`] - The synced preferences blob
//! - [`vars`] - Placeholder extraction and substitution
//!
//! Managers are constructed once with an injected storage backend and loaded
//! explicitly; lookups that miss return `Ok(None)`/`Ok(false)` sentinels
//! rather than errors.

pub mod error;
pub mod library;
pub mod profiles;
pub mod settings;
pub mod signatures;
pub mod templates;
pub mod vars;

pub use error::CoreError;
pub use library::{LibraryCategory, LibrarySelection, LibraryTemplate};
pub use profiles::{NewProfile, Profile, ProfileManager, ProfileStats, ProfileUpdate};
pub use settings::{Settings, SettingsManager};
pub use signatures::{
    NewSignature, Signature, SignatureManager, SignatureUpdate, SocialLinks, UserProfile,
    UserProfileUpdate,
};
pub use templates::{NewTemplate, Template, TemplateManager, TemplateStats, TemplateUpdate};
