//! Generation session: the UI's state as one explicit value.
//!
//! Idle → Loading (submit) → Success | Failed (settlement). A new submit moves
//! back to Loading from any state and clears the previous content or error.
//! A settlement only applies while its own submission is the one loading, so a
//! slow earlier request can never overwrite a newer one.

use parking_lot::RwLock;
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::models::content::GeneratedContent;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerationState {
    #[default]
    Idle,
    Loading {
        generation_id: Uuid,
    },
    Success {
        generation_id: Uuid,
        content: GeneratedContent,
    },
    Failed {
        generation_id: Uuid,
        message: String,
    },
}

#[derive(Debug, Default)]
pub struct GenerationSession {
    state: RwLock<GenerationState>,
}

impl GenerationSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new submission and returns its id.
    pub fn begin(&self) -> Uuid {
        let generation_id = Uuid::new_v4();
        *self.state.write() = GenerationState::Loading { generation_id };
        generation_id
    }

    /// Applies the outcome of submission `generation_id`.
    /// Returns `false` if the submission is no longer the one loading.
    pub fn settle(&self, generation_id: Uuid, outcome: Result<GeneratedContent, String>) -> bool {
        let mut state = self.state.write();
        let is_current = matches!(
            &*state,
            GenerationState::Loading { generation_id: loading } if *loading == generation_id
        );
        if !is_current {
            warn!(%generation_id, "Discarding stale generation result");
            return false;
        }

        *state = match outcome {
            Ok(content) => GenerationState::Success {
                generation_id,
                content,
            },
            Err(message) => GenerationState::Failed {
                generation_id,
                message,
            },
        };
        true
    }

    pub fn snapshot(&self) -> GenerationState {
        self.state.read().clone()
    }

    /// Content of the last successful generation, if the session is in Success.
    pub fn current_content(&self) -> Option<GeneratedContent> {
        match &*self.state.read() {
            GenerationState::Success { content, .. } => Some(content.clone()),
            _ => None,
        }
    }
}
