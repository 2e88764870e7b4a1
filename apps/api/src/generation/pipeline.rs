//! Generation pipeline: one submit from form input to `GeneratedContent`.
//!
//! Flow: build_prompt → text generation → parse_sections → image-prompt gate →
//!       portrait + coat of arms (concurrent, joined) → GeneratedContent.
//!
//! Both image prompts must be present before any image call is made; a missing
//! one aborts the whole pipeline. Missing title or description only degrade to
//! their placeholders.

use std::time::Instant;

use chrono::Utc;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::parser::{parse_sections, SectionKey};
use crate::generation::prompts::build_prompt;
use crate::llm_client::{AspectRatio, GenerativeBackend};
use crate::models::content::{GeneratedContent, UserInput};
use crate::render::data_url;

/// Runs the full pipeline against `backend`. No retries: the first failure is returned.
pub async fn run_generation(
    backend: &dyn GenerativeBackend,
    input: &UserInput,
) -> Result<GeneratedContent, AppError> {
    let started = Instant::now();

    let prompt = build_prompt(input);
    let reply = backend
        .generate_text(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("text generation failed: {e}")))?;
    info!(
        reply_chars = reply.chars().count(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Text generation finished"
    );

    let sections = parse_sections(&reply);
    let missing = sections.missing();
    if !missing.is_empty() {
        let tokens: Vec<&str> = missing.iter().map(|key| key.token()).collect();
        warn!(missing = ?tokens, "Reply is missing sections; using placeholders");
    }

    let (Some(image_prompt), Some(coat_of_arms_prompt)) = (
        sections.get(SectionKey::ImagePrompt),
        sections.get(SectionKey::CoatOfArmsPrompt),
    ) else {
        return Err(AppError::MissingImagePrompts);
    };

    let (portrait, coat_of_arms) = tokio::try_join!(
        backend.generate_image(image_prompt, AspectRatio::Landscape),
        backend.generate_image(coat_of_arms_prompt, AspectRatio::Square),
    )
    .map_err(|e| AppError::Llm(format!("image generation failed: {e}")))?;

    info!(
        portrait_bytes = portrait.bytes.len(),
        coat_of_arms_bytes = coat_of_arms.bytes.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Image generation finished"
    );

    Ok(GeneratedContent {
        title: sections.resolve(SectionKey::HistoricalTitle).to_string(),
        historical_description: sections
            .resolve(SectionKey::HistoricalDescription)
            .to_string(),
        image_prompt: image_prompt.to_string(),
        image_url: data_url::encode(&portrait.mime_type, &portrait.bytes),
        coat_of_arms_prompt: coat_of_arms_prompt.to_string(),
        coat_of_arms_image_url: data_url::encode(&coat_of_arms.mime_type, &coat_of_arms.bytes),
        generated_at: Utc::now(),
    })
}
