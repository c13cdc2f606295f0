//! Pitch form validation
//!
//! Every field is required; the link must be an absolute http(s) URL.
//! All failures are collected so the form can show each field's message.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::entities::{slugify, NewPitch};

/// Raw pitch submission, as posted by the form or the JSON API
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PitchForm {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub pitch: Option<String>,
}

impl PitchForm {
    /// Submitted value of a field, for re-filling the form
    pub fn value(&self, field: &str) -> &str {
        let value = match field {
            "title" => self.title.as_deref(),
            "description" => self.description.as_deref(),
            "category" => self.category.as_deref(),
            "link" => self.link.as_deref(),
            "pitch" => self.pitch.as_deref(),
            _ => None,
        };
        value.unwrap_or("")
    }
}

/// Field name to messages, ordered by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// First message for a field; the form shows one per field
    pub fn first(&self, field: &str) -> Option<&str> {
        self.0
            .get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .filter_map(|(field, messages)| messages.first().map(|m| format!("{}: {}", field, m)))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

fn required<'a>(
    errors: &mut FieldErrors,
    field: &str,
    label: &str,
    value: &'a Option<String>,
) -> Option<&'a str> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Some(v),
        _ => {
            errors.add(field, format!("{} is required", label));
            None
        }
    }
}

fn is_web_url(raw: &str) -> bool {
    match Url::parse(raw) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}

/// Validate a submission into the data needed to create a pitch
pub fn validate_pitch(form: &PitchForm) -> Result<NewPitch, FieldErrors> {
    let mut errors = FieldErrors::default();

    let title = required(&mut errors, "title", "Title", &form.title);
    let description = required(&mut errors, "description", "Description", &form.description);
    let category = required(&mut errors, "category", "Category", &form.category);
    let link = required(&mut errors, "link", "Link", &form.link);
    let pitch = required(&mut errors, "pitch", "Pitch", &form.pitch);

    if let Some(link) = link {
        if !is_web_url(link) {
            errors.add("link", "Link must be a valid URL");
        }
    }

    match (title, description, category, link, pitch) {
        (Some(title), Some(description), Some(category), Some(link), Some(pitch))
            if errors.is_empty() =>
        {
            Ok(NewPitch {
                title: title.to_string(),
                slug: slugify(title),
                description: description.to_string(),
                category: category.to_string(),
                image: link.to_string(),
                pitch: pitch.to_string(),
            })
        }
        _ => Err(errors),
    }
}
