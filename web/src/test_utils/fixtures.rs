//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use chrono::{DateTime, Utc};

use crate::app::PitchForm;
use crate::domain::entities::{NewPitch, Pitch, PitchId};

/// A form that passes validation
pub fn test_form() -> PitchForm {
    PitchForm {
        title: Some("Solar Kites".to_string()),
        description: Some("Kites that charge your phone while you fly them".to_string()),
        category: Some("Energy".to_string()),
        link: Some("https://example.com/kite.png".to_string()),
        pitch: Some("## Problem\n\nPhones die at the beach.".to_string()),
    }
}

/// Validated data matching `test_form`
pub fn test_new_pitch() -> NewPitch {
    NewPitch {
        title: "Solar Kites".to_string(),
        slug: "solar-kites".to_string(),
        description: "Kites that charge your phone while you fly them".to_string(),
        category: "Energy".to_string(),
        image: "https://example.com/kite.png".to_string(),
        pitch: "## Problem\n\nPhones die at the beach.".to_string(),
    }
}

/// Create a stored pitch with default values
pub fn test_pitch() -> Pitch {
    test_pitch_created_at("pitch-1", "Energy", Utc::now())
}

/// Create a stored pitch with a specific id, category and creation time
pub fn test_pitch_created_at(id: &str, category: &str, created_at: DateTime<Utc>) -> Pitch {
    Pitch {
        id: PitchId(id.to_string()),
        title: format!("Pitch {}", id),
        slug: format!("pitch-{}", id),
        description: "A startup idea".to_string(),
        category: category.to_string(),
        image: "https://example.com/image.png".to_string(),
        pitch: "An **idea**".to_string(),
        views: 0,
        created_at,
    }
}

/// Create a stored pitch that already has some views
pub fn test_pitch_with_views(views: i64) -> Pitch {
    Pitch {
        views,
        ..test_pitch()
    }
}
