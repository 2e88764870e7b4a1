//! Shared test doubles: a scripted generative backend, a font-free block typeface
//! and small image fixtures.

use std::io::Cursor;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use parking_lot::Mutex;

use crate::layout::Typeface;
use crate::llm_client::{AspectRatio, GeneratedImage, GenerativeBackend, LlmError};
use crate::models::content::GeneratedContent;
use crate::render::data_url;

pub fn sample_png(width: u32, height: u32, color: Rgba<u8>) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, color))
        .write_to(&mut buf, ImageFormat::Png)
        .expect("encoding a fixture PNG cannot fail");
    buf.into_inner()
}

pub fn sample_image_url(width: u32, height: u32, color: Rgba<u8>) -> String {
    data_url::encode("image/png", &sample_png(width, height, color))
}

pub fn sample_content(title: &str, description: &str) -> GeneratedContent {
    GeneratedContent {
        title: title.to_string(),
        historical_description: description.to_string(),
        image_prompt: "a man painting".to_string(),
        image_url: sample_image_url(32, 18, Rgba([120, 80, 40, 255])),
        coat_of_arms_prompt: "a shield".to_string(),
        coat_of_arms_image_url: sample_image_url(16, 16, Rgba([40, 80, 120, 255])),
        generated_at: Utc.with_ymd_and_hms(1750, 1, 1, 12, 0, 0).unwrap(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// BlockFace
// ────────────────────────────────────────────────────────────────────────────

/// Monospace face that draws each visible char as a filled block.
/// Advance is half the pixel size; glyph blocks sit on the baseline.
pub struct BlockFace;

impl Typeface for BlockFace {
    fn measure(&self, text: &str, px: f32) -> f32 {
        text.chars().count() as f32 * px * 0.5
    }

    fn ascent(&self, px: f32) -> f32 {
        px * 0.8
    }

    fn draw(&self, canvas: &mut RgbaImage, text: &str, x: f32, baseline: f32, px: f32, color: Rgba<u8>) {
        let advance = px * 0.5;
        let glyph_width = (advance * 0.8).max(1.0) as u32;
        let glyph_height = (px * 0.7).max(1.0) as u32;
        let top = (baseline - px * 0.7).round() as i32;
        for (i, c) in text.chars().enumerate() {
            if c.is_whitespace() {
                continue;
            }
            let left = (x + i as f32 * advance).round() as i32;
            draw_filled_rect_mut(
                canvas,
                Rect::at(left, top).of_size(glyph_width, glyph_height),
                color,
            );
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// ScriptedBackend
// ────────────────────────────────────────────────────────────────────────────

/// Generative backend with a fixed text reply and solid-color PNG images.
pub struct ScriptedBackend {
    reply: Option<String>,
    return_images: bool,
    prompts: Mutex<Vec<String>>,
    image_requests: Mutex<Vec<(String, AspectRatio)>>,
}

impl ScriptedBackend {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            return_images: true,
            prompts: Mutex::new(Vec::new()),
            image_requests: Mutex::new(Vec::new()),
        }
    }

    /// Text generation fails with `EmptyContent`.
    pub fn failing_text() -> Self {
        Self {
            reply: None,
            ..Self::replying("")
        }
    }

    /// Image generation succeeds at the HTTP level but returns zero images.
    pub fn without_images(mut self) -> Self {
        self.return_images = false;
        self
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().last().cloned()
    }

    pub fn image_requests(&self) -> Vec<(String, AspectRatio)> {
        self.image_requests.lock().clone()
    }
}

#[async_trait]
impl GenerativeBackend for ScriptedBackend {
    async fn generate_text(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().push(prompt.to_string());
        self.reply.clone().ok_or(LlmError::EmptyContent)
    }

    async fn generate_image(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
    ) -> Result<GeneratedImage, LlmError> {
        self.image_requests
            .lock()
            .push((prompt.to_string(), aspect_ratio));
        if !self.return_images {
            return Err(LlmError::NoImages);
        }

        let (width, height, color) = match aspect_ratio {
            AspectRatio::Landscape => (32, 18, Rgba([150, 90, 60, 255])),
            AspectRatio::Square => (16, 16, Rgba([60, 90, 150, 255])),
        };
        Ok(GeneratedImage {
            bytes: sample_png(width, height, color),
            mime_type: "image/png".to_string(),
        })
    }
}
