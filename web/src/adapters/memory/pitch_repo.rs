use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::{NewPitch, Pitch, PitchId, PitchQuery};
use crate::domain::ports::PitchRepository;
use crate::error::DomainError;

/// In-memory implementation of PitchRepository
#[derive(Default)]
pub struct InMemoryPitchRepository {
    pitches: RwLock<HashMap<PitchId, Pitch>>,
}

impl InMemoryPitchRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a pitch
    #[cfg(test)]
    pub fn with_pitch(self, pitch: Pitch) -> Self {
        if let Ok(mut pitches) = self.pitches.write() {
            pitches.insert(pitch.id.clone(), pitch);
        }
        self
    }
}

fn poisoned<T>(_: T) -> DomainError {
    DomainError::Internal("pitch store lock poisoned".to_string())
}

#[async_trait]
impl PitchRepository for InMemoryPitchRepository {
    async fn create(&self, new_pitch: &NewPitch) -> Result<Pitch, DomainError> {
        let pitch = Pitch {
            id: PitchId(Uuid::new_v4().to_string()),
            title: new_pitch.title.clone(),
            slug: new_pitch.slug.clone(),
            description: new_pitch.description.clone(),
            category: new_pitch.category.clone(),
            image: new_pitch.image.clone(),
            pitch: new_pitch.pitch.clone(),
            views: 0,
            created_at: Utc::now(),
        };

        let mut pitches = self.pitches.write().map_err(poisoned)?;
        pitches.insert(pitch.id.clone(), pitch.clone());
        Ok(pitch)
    }

    async fn find_by_id(&self, id: &PitchId) -> Result<Option<Pitch>, DomainError> {
        let pitches = self.pitches.read().map_err(poisoned)?;
        Ok(pitches.get(id).cloned())
    }

    async fn find_views(&self, id: &PitchId) -> Result<Option<i64>, DomainError> {
        let pitches = self.pitches.read().map_err(poisoned)?;
        Ok(pitches.get(id).map(|p| p.views))
    }

    async fn increment_views(&self, id: &PitchId) -> Result<(), DomainError> {
        let mut pitches = self.pitches.write().map_err(poisoned)?;
        match pitches.get_mut(id) {
            Some(pitch) => {
                pitch.views += 1;
                Ok(())
            }
            None => Err(DomainError::NotFound(format!("Pitch {} not found", id))),
        }
    }

    async fn list(&self, query: &PitchQuery) -> Result<Vec<Pitch>, DomainError> {
        let pitches = self.pitches.read().map_err(poisoned)?;
        let mut matching: Vec<Pitch> = pitches
            .values()
            .filter(|p| query.matches(p))
            .cloned()
            .collect();

        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matching.truncate(query.limit.max(0) as usize);
        Ok(matching)
    }
}
