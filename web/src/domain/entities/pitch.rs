//! Pitch domain entity
//!
//! A user-submitted startup idea, stored as a `startup` document.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Longest slug we derive from a title
const MAX_SLUG_LEN: usize = 96;

/// Longest document id we accept from a URL
const MAX_ID_LEN: usize = 128;

/// Prefix of unpublished draft documents
const DRAFT_PREFIX: &str = "drafts.";

/// Identifier of a pitch document in the content store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PitchId(pub String);

impl PitchId {
    /// Parse an id coming from outside (path segment, query string).
    ///
    /// Store ids are limited to `[A-Za-z0-9._-]`; anything else cannot name a
    /// document, so callers can treat a parse failure as "not found".
    /// Draft ids are rejected too; only published pitches are public.
    pub fn parse(raw: &str) -> Option<Self> {
        let valid = !raw.is_empty()
            && raw.len() <= MAX_ID_LEN
            && !raw.starts_with(DRAFT_PREFIX)
            && raw
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));

        valid.then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PitchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A startup pitch
#[derive(Debug, Clone, Serialize)]
pub struct Pitch {
    #[serde(rename = "_id")]
    pub id: PitchId,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub category: String,
    /// Image URL submitted as the pitch's link
    pub image: String,
    /// Markdown body
    pub pitch: String,
    pub views: i64,
    pub created_at: DateTime<Utc>,
}

impl Pitch {
    /// Path of the pitch page
    pub fn path(&self) -> String {
        format!("/startup/{}", urlencoding::encode(self.id.as_str()))
    }
}

/// Validated data needed to create a new pitch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPitch {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub category: String,
    pub image: String,
    pub pitch: String,
}

/// Listing parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PitchQuery {
    /// Case-insensitive match against title or category
    pub search: Option<String>,
    pub limit: i64,
}

impl PitchQuery {
    pub const DEFAULT_LIMIT: i64 = 20;
    pub const MAX_LIMIT: i64 = 100;

    /// Normalize raw listing input: blank searches are dropped and the limit
    /// is clamped to `1..=MAX_LIMIT`.
    pub fn new(search: Option<&str>, limit: Option<i64>) -> Self {
        Self {
            search: search
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            limit: limit
                .unwrap_or(Self::DEFAULT_LIMIT)
                .clamp(1, Self::MAX_LIMIT),
        }
    }

    /// Whether a pitch satisfies the search filter
    pub fn matches(&self, pitch: &Pitch) -> bool {
        match &self.search {
            None => true,
            Some(term) => {
                let term = term.to_lowercase();
                pitch.title.to_lowercase().contains(&term)
                    || pitch.category.to_lowercase().contains(&term)
            }
        }
    }
}

fn non_alphanumeric_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("static slug pattern is valid"))
}

/// Derive a URL slug from a title
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let dashed = non_alphanumeric_runs().replace_all(&lowered, "-");
    let trimmed = dashed.trim_matches('-');

    let mut slug: String = trimmed.chars().take(MAX_SLUG_LEN).collect();
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
