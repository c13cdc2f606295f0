//! Sanity adapter for PitchRepository
//!
//! Pitches live in the content lake as `startup` documents.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use super::client::SanityClient;
use crate::domain::entities::{NewPitch, Pitch, PitchId, PitchQuery};
use crate::domain::ports::PitchRepository;
use crate::error::{DomainError, SanityError};

const STARTUP_PROJECTION: &str = r#"{
  _id,
  _createdAt,
  title,
  "slug": slug.current,
  description,
  category,
  image,
  pitch,
  "view": coalesce(view, 0)
}"#;

const STARTUP_BY_ID_QUERY: &str = r#"*[_type == "startup" && _id == $id][0]"#;

const STARTUP_VIEWS_QUERY: &str =
    r#"*[_type == "startup" && _id == $id][0]{ _id, "view": coalesce(view, 0) }"#;

const STARTUPS_FILTER: &str = r#"*[_type == "startup" && defined(slug.current) && (!defined($search) || title match $search || category match $search)] | order(_createdAt desc)"#;

/// Shape of a projected `startup` document
#[derive(Debug, Deserialize)]
struct StartupDocument {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_createdAt")]
    created_at: DateTime<Utc>,
    // Documents edited in the Studio may miss fields
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    pitch: Option<String>,
    #[serde(rename = "view", default)]
    views: Option<i64>,
}

impl From<StartupDocument> for Pitch {
    fn from(doc: StartupDocument) -> Self {
        Pitch {
            id: PitchId(doc.id),
            title: doc.title.unwrap_or_default(),
            slug: doc.slug.unwrap_or_default(),
            description: doc.description.unwrap_or_default(),
            category: doc.category.unwrap_or_default(),
            image: doc.image.unwrap_or_default(),
            pitch: doc.pitch.unwrap_or_default(),
            views: doc.views.unwrap_or(0),
            created_at: doc.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ViewsDocument {
    #[serde(rename = "view", default)]
    views: Option<i64>,
}

/// System fields of a freshly created document
#[derive(Debug, Deserialize)]
struct CreatedDocument {
    #[serde(rename = "_createdAt", default)]
    created_at: Option<DateTime<Utc>>,
}

/// Sanity implementation of PitchRepository
pub struct SanityPitchRepository {
    client: Arc<SanityClient>,
}

impl SanityPitchRepository {
    pub fn new(client: Arc<SanityClient>) -> Self {
        Self { client }
    }

    fn create_mutation(pitch: &NewPitch) -> Value {
        json!({
            "create": {
                "_type": "startup",
                "title": pitch.title,
                "slug": { "_type": "slug", "current": pitch.slug },
                "description": pitch.description,
                "category": pitch.category,
                "image": pitch.image,
                "pitch": pitch.pitch,
                "view": 0
            }
        })
    }

    fn increment_mutation(id: &PitchId) -> Value {
        json!({
            "patch": {
                "id": id.as_str(),
                "setIfMissing": { "view": 0 },
                "inc": { "view": 1 }
            }
        })
    }

    fn list_query(limit: i64) -> String {
        format!("{}[0...{}]{}", STARTUPS_FILTER, limit, STARTUP_PROJECTION)
    }
}

#[async_trait]
impl PitchRepository for SanityPitchRepository {
    async fn create(&self, pitch: &NewPitch) -> Result<Pitch, DomainError> {
        let response = self
            .client
            .mutate(vec![Self::create_mutation(pitch)])
            .await?;

        let result = response
            .results
            .into_iter()
            .next()
            .ok_or(SanityError::EmptyMutation)?;

        let created_at = result
            .document
            .and_then(|doc| serde_json::from_value::<CreatedDocument>(doc).ok())
            .and_then(|doc| doc.created_at)
            .unwrap_or_else(Utc::now);

        tracing::info!(pitch_id = %result.id, transaction_id = %response.transaction_id, "Created pitch");

        Ok(Pitch {
            id: PitchId(result.id),
            title: pitch.title.clone(),
            slug: pitch.slug.clone(),
            description: pitch.description.clone(),
            category: pitch.category.clone(),
            image: pitch.image.clone(),
            pitch: pitch.pitch.clone(),
            views: 0,
            created_at,
        })
    }

    async fn find_by_id(&self, id: &PitchId) -> Result<Option<Pitch>, DomainError> {
        let groq = format!("{}{}", STARTUP_BY_ID_QUERY, STARTUP_PROJECTION);
        // Fresh: the page is opened right after the redirect that follows a create
        let doc: Option<StartupDocument> = self
            .client
            .query(&groq, &[("id", json!(id.as_str()))], true)
            .await?;

        Ok(doc.map(Pitch::from))
    }

    async fn find_views(&self, id: &PitchId) -> Result<Option<i64>, DomainError> {
        let doc: Option<ViewsDocument> = self
            .client
            .query(STARTUP_VIEWS_QUERY, &[("id", json!(id.as_str()))], true)
            .await?;

        Ok(doc.map(|d| d.views.unwrap_or(0)))
    }

    async fn increment_views(&self, id: &PitchId) -> Result<(), DomainError> {
        self.client
            .mutate(vec![Self::increment_mutation(id)])
            .await?;
        Ok(())
    }

    async fn list(&self, query: &PitchQuery) -> Result<Vec<Pitch>, DomainError> {
        let search = match &query.search {
            Some(term) => json!(format!("{}*", term)),
            None => Value::Null,
        };

        let docs: Vec<StartupDocument> = self
            .client
            .query(&Self::list_query(query.limit), &[("search", search)], false)
            .await?;

        Ok(docs.into_iter().map(Pitch::from).collect())
    }
}
