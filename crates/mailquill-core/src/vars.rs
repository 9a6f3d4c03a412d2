//! Placeholder extraction and substitution.
//!
//! A placeholder is `{{identifier}}` where `identifier` matches `\w+`.
//! Unmatched braces and placeholders with non-word bodies (the verse
//! provider's `{{verse:KEY}}` form) are simply not matched.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::{HashMap, HashSet};

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{(\w+)\}\}").unwrap());

/// Collect the unique placeholder identifiers in `text`, in order of first
/// appearance.
pub fn extract_variables(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ordered = Vec::new();

    for caps in PLACEHOLDER_RE.captures_iter(text) {
        let name = caps[1].to_string();
        if seen.insert(name.clone()) {
            ordered.push(name);
        }
    }

    ordered
}

/// Replace every placeholder in `text`.
///
/// Placeholders named in `values` take their value (possibly empty); every
/// other placeholder renders as the empty string. Unresolved placeholders
/// never survive into the output - downstream consumers rely on blanks
/// rather than literal `{{token}}` text leaking into sent mail.
pub fn substitute(text: &str, values: &HashMap<String, String>) -> String {
    PLACEHOLDER_RE
        .replace_all(text, |caps: &Captures<'_>| {
            values.get(&caps[1]).cloned().unwrap_or_default()
        })
        .into_owned()
}

/// Replace only the placeholders named in `values`, leaving the rest in
/// place for a later pass.
pub fn substitute_known(text: &str, values: &HashMap<String, String>) -> String {
    PLACEHOLDER_RE
        .replace_all(text, |caps: &Captures<'_>| match values.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Blank every remaining word-body placeholder.
pub fn blank_unresolved(text: &str) -> String {
    PLACEHOLDER_RE.replace_all(text, "").into_owned()
}
