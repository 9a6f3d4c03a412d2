//! Verse and quote records, translations, and the daily rotation corpus.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A scripture verse in a specific translation.
///
/// `version` carries degradation labels when the verse was served from a
/// fallback tier (e.g. `"ESV (offline)"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verse {
    pub text: String,
    pub reference: String,
    pub version: String,
}

/// An inspirational quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

/// Bible translation codes the provider understands.
///
/// `Nkjv`, `Csb` and `Esv` ship with bundled preset tables; the rest resolve
/// through the remote service or its fallbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Translation {
    #[serde(rename = "NKJV")]
    Nkjv,
    #[serde(rename = "CSB")]
    Csb,
    #[serde(rename = "ESV")]
    Esv,
    #[serde(rename = "KJV")]
    Kjv,
    #[serde(rename = "NIV")]
    Niv,
    #[serde(rename = "NLT")]
    Nlt,
    #[serde(rename = "NASB")]
    Nasb,
    #[serde(rename = "AMP")]
    Amp,
    #[serde(rename = "MSG")]
    Msg,
}

impl Translation {
    /// Display code, as it appears in a verse's `version` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Translation::Nkjv => "NKJV",
            Translation::Csb => "CSB",
            Translation::Esv => "ESV",
            Translation::Kjv => "KJV",
            Translation::Niv => "NIV",
            Translation::Nlt => "NLT",
            Translation::Nasb => "NASB",
            Translation::Amp => "AMP",
            Translation::Msg => "MSG",
        }
    }

    /// Closest translation code the remote service actually serves.
    pub fn api_code(&self) -> &'static str {
        match self {
            Translation::Nkjv | Translation::Kjv => "kjv",
            _ => "web",
        }
    }

    /// Whether a preset table ships with the crate.
    pub fn is_bundled(&self) -> bool {
        matches!(
            self,
            Translation::Nkjv | Translation::Csb | Translation::Esv
        )
    }
}

impl Default for Translation {
    fn default() -> Self {
        Translation::Csb
    }
}

impl fmt::Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Translation {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "NKJV" => Ok(Translation::Nkjv),
            "CSB" => Ok(Translation::Csb),
            "ESV" => Ok(Translation::Esv),
            "KJV" => Ok(Translation::Kjv),
            "NIV" => Ok(Translation::Niv),
            "NLT" => Ok(Translation::Nlt),
            "NASB" => Ok(Translation::Nasb),
            "AMP" => Ok(Translation::Amp),
            "MSG" => Ok(Translation::Msg),
            _ => Err(()),
        }
    }
}

/// Verse keys in rotation order. The daily selection indexes into this list.
pub const CORPUS_KEYS: &[&str] = &[
    "1cor-3:23",
    "1cor-10:31",
    "1cor-13:4-7",
    "phil-4:13",
    "phil-4:6-7",
    "prov-3:5-6",
    "prov-16:3",
    "prov-18:10",
    "ps-23:1",
    "ps-46:1",
    "ps-119:105",
    "john-3:16",
    "john-14:6",
    "rom-8:28",
    "rom-12:2",
    "jer-29:11",
    "matt-28:19-20",
    "1thess-5:16-18",
];

/// Human-readable references, as the remote service expects them.
static DISPLAY_REFERENCES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("1cor-3:23", "1 Corinthians 3:23"),
        ("1cor-10:31", "1 Corinthians 10:31"),
        ("1cor-13:4-7", "1 Corinthians 13:4-7"),
        ("phil-4:13", "Philippians 4:13"),
        ("phil-4:6-7", "Philippians 4:6-7"),
        ("prov-3:5-6", "Proverbs 3:5-6"),
        ("prov-16:3", "Proverbs 16:3"),
        ("prov-18:10", "Proverbs 18:10"),
        ("ps-23:1", "Psalm 23:1"),
        ("ps-46:1", "Psalm 46:1"),
        ("ps-119:105", "Psalm 119:105"),
        ("john-3:16", "John 3:16"),
        ("john-14:6", "John 14:6"),
        ("rom-8:28", "Romans 8:28"),
        ("rom-12:2", "Romans 12:2"),
        ("jer-29:11", "Jeremiah 29:11"),
        ("matt-28:19-20", "Matthew 28:19-20"),
        ("1thess-5:16-18", "1 Thessalonians 5:16-18"),
    ])
});

/// Resolve a corpus key to its display reference.
pub fn display_reference(key: &str) -> Option<&'static str> {
    DISPLAY_REFERENCES.get(key).copied()
}

/// The static quote corpus.
pub static QUOTES: Lazy<Vec<Quote>> = Lazy::new(|| {
    [
        (
            "Education is the most powerful weapon which you can use to change the world.",
            "Nelson Mandela",
        ),
        (
            "The beautiful thing about learning is that no one can take it away from you.",
            "B.B. King",
        ),
        (
            "Education is not preparation for life; education is life itself.",
            "John Dewey",
        ),
        (
            "The function of education is to teach one to think intensively and to think critically. Intelligence plus character - that is the goal of true education.",
            "Martin Luther King Jr.",
        ),
        (
            "Live as if you were to die tomorrow. Learn as if you were to live forever.",
            "Mahatma Gandhi",
        ),
        (
            "The only person who is educated is the one who has learned how to learn and change.",
            "Carl Rogers",
        ),
        ("Excellence is not a skill. It is an attitude.", "Ralph Marston"),
        (
            "Success is not final, failure is not fatal: it is the courage to continue that counts.",
            "Winston Churchill",
        ),
        ("The expert in anything was once a beginner.", "Helen Hayes"),
        (
            "Do not go where the path may lead, go instead where there is no path and leave a trail.",
            "Ralph Waldo Emerson",
        ),
    ]
    .iter()
    .map(|(text, author)| Quote {
        text: (*text).to_string(),
        author: (*author).to_string(),
    })
    .collect()
});

/// Deterministic daily index into a corpus of `corpus_size` entries.
///
/// Uses the 1-based ordinal day of the year, so the same date and size
/// always yield the same index, and the selection wraps around the corpus.
pub fn daily_index(date: NaiveDate, corpus_size: usize) -> usize {
    date.ordinal() as usize % corpus_size.max(1)
}
