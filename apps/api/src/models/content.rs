use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Gender requested for the portrait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[serde(alias = "muž")]
    Man,
    #[serde(alias = "žena")]
    Woman,
}

impl Gender {
    /// Czech label used in the user-data block of the prompt.
    pub fn czech_label(self) -> &'static str {
        match self {
            Gender::Man => "muž",
            Gender::Woman => "žena",
        }
    }

    /// English noun the image prompt must mention ("a man" / "a woman").
    pub fn english_noun(self) -> &'static str {
        match self {
            Gender::Man => "man",
            Gender::Woman => "woman",
        }
    }
}

/// Form submission. Consumed once by the generation pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct UserInput {
    pub profession: String,
    pub activities: String,
    pub gender: Gender,
}

/// Result of one successful generation cycle. Replaced wholesale, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub title: String,
    pub historical_description: String,
    pub image_prompt: String,
    /// `data:image/jpeg;base64,...`
    pub image_url: String,
    pub coat_of_arms_prompt: String,
    pub coat_of_arms_image_url: String,
    pub generated_at: DateTime<Utc>,
}
