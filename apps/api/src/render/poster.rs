//! Poster Composer: draws the fixed poster layout onto a 1000×1700 canvas.
//!
//! # Layout (top to bottom)
//! 1. flat background
//! 2. portrait at full content width, 16:9, with drop shadow and 2px border
//! 3. title, bold display face, greedy-wrapped and centered
//! 4. historical description, body face, greedy-wrapped and centered
//! 5. coat of arms, 250px square, centered at the vertical cursor
//! 6. muted footer caption near the bottom edge
//!
//! Both source images are decoded concurrently with the background fill; drawing
//! starts once all three are ready. Any decode failure aborts the whole poster.

use std::io::Cursor;
use std::time::Instant;

use bytes::Bytes;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut};
use imageproc::filter::gaussian_blur_f32;
use imageproc::rect::Rect;
use tracing::info;

use crate::layout::{last_baseline, wrap_lines, PosterFonts, Typeface};
use crate::models::content::GeneratedContent;
use crate::render::{data_url, PosterError};

pub const POSTER_WIDTH: u32 = 1000;
pub const POSTER_HEIGHT: u32 = 1700;
pub const DOWNLOAD_FILENAME: &str = "kronikar-profesi-plakat.png";
pub const FOOTER_TEXT: &str = "Vygenerováno Kronikářem profesí";

const PADDING: u32 = 60;

const BACKGROUND: Rgba<u8> = Rgba([0xFF, 0xFB, 0xEB, 0xFF]);
const TEXT_COLOR: Rgba<u8> = Rgba([0x44, 0x40, 0x3C, 0xFF]);
const BORDER_COLOR: Rgba<u8> = Rgba([0xD6, 0xD3, 0xD1, 0xFF]);
const FOOTER_COLOR: Rgba<u8> = Rgba([0xA8, 0xA2, 0x9E, 0xFF]);

const SHADOW_ALPHA: u8 = 51; // 0.2
const SHADOW_BLUR: f32 = 20.0;
const SHADOW_OFFSET_Y: i64 = 10;
const BORDER_WIDTH: u32 = 2;

const TEXT_TOP_GAP: f32 = 100.0;
const TITLE_PX: f32 = 60.0;
const TITLE_LINE_HEIGHT: f32 = 70.0;
const TITLE_GAP: f32 = 50.0;
const DESCRIPTION_PX: f32 = 24.0;
const DESCRIPTION_LINE_HEIGHT: f32 = 38.0;
const DESCRIPTION_GAP: f32 = 80.0;
const COAT_OF_ARMS_SIZE: u32 = 250;
const FOOTER_PX: f32 = 18.0;

/// A flattened poster, PNG encoded.
#[derive(Debug, Clone)]
pub struct Poster {
    pub png: Bytes,
    pub width: u32,
    pub height: u32,
}

impl Poster {
    pub fn data_url(&self) -> String {
        data_url::encode("image/png", &self.png)
    }
}

#[derive(Clone)]
pub struct PosterComposer {
    fonts: PosterFonts,
}

impl PosterComposer {
    pub fn new(fonts: PosterFonts) -> Self {
        Self { fonts }
    }

    /// Composes the poster for `content`. Deterministic for identical inputs.
    pub async fn compose(&self, content: &GeneratedContent) -> Result<Poster, PosterError> {
        let started = Instant::now();

        let background =
            blocking(|| Ok(RgbaImage::from_pixel(POSTER_WIDTH, POSTER_HEIGHT, BACKGROUND)));
        let portrait = decode_image(content.image_url.clone());
        let coat_of_arms = decode_image(content.coat_of_arms_image_url.clone());
        let (mut canvas, portrait, coat_of_arms) =
            tokio::try_join!(background, portrait, coat_of_arms)?;

        let fonts = self.fonts.clone();
        let title = content.title.clone();
        let description = content.historical_description.clone();
        let png = blocking(move || {
            draw_layout(&mut canvas, &fonts, &portrait, &coat_of_arms, &title, &description);
            encode_png(canvas)
        })
        .await?;

        info!(
            bytes = png.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Poster composed"
        );

        Ok(Poster {
            png: Bytes::from(png),
            width: POSTER_WIDTH,
            height: POSTER_HEIGHT,
        })
    }
}

async fn blocking<T, F>(task: F) -> Result<T, PosterError>
where
    F: FnOnce() -> Result<T, PosterError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| PosterError::Join(e.to_string()))?
}

async fn decode_image(url: String) -> Result<DynamicImage, PosterError> {
    blocking(move || {
        let (_, bytes) = data_url::decode(&url)?;
        image::load_from_memory(&bytes).map_err(PosterError::Decode)
    })
    .await
}

fn encode_png(canvas: RgbaImage) -> Result<Vec<u8>, PosterError> {
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(canvas)
        .write_to(&mut buf, ImageFormat::Png)
        .map_err(PosterError::Encode)?;
    Ok(buf.into_inner())
}

// ────────────────────────────────────────────────────────────────────────────
// Drawing
// ────────────────────────────────────────────────────────────────────────────

fn draw_layout(
    canvas: &mut RgbaImage,
    fonts: &PosterFonts,
    portrait: &DynamicImage,
    coat_of_arms: &DynamicImage,
    title: &str,
    description: &str,
) {
    let content_width = POSTER_WIDTH - PADDING * 2;
    let portrait_height = content_width * 9 / 16;

    draw_drop_shadow(canvas, PADDING, PADDING, content_width, portrait_height);
    let portrait = portrait
        .resize_exact(content_width, portrait_height, FilterType::Triangle)
        .to_rgba8();
    imageops::overlay(canvas, &portrait, PADDING as i64, PADDING as i64);
    draw_border(canvas, PADDING, PADDING, content_width, portrait_height);

    let center_x = POSTER_WIDTH as f32 / 2.0;
    let max_width = content_width as f32;
    let mut cursor = (PADDING + portrait_height) as f32 + TEXT_TOP_GAP;

    let title_block = TextBlock {
        face: fonts.title.as_ref(),
        px: TITLE_PX,
        line_height: TITLE_LINE_HEIGHT,
        color: TEXT_COLOR,
    };
    cursor = title_block.draw_centered(canvas, title, center_x, cursor, max_width) + TITLE_GAP;

    let description_block = TextBlock {
        face: fonts.body.as_ref(),
        px: DESCRIPTION_PX,
        line_height: DESCRIPTION_LINE_HEIGHT,
        color: TEXT_COLOR,
    };
    cursor = description_block.draw_centered(canvas, description, center_x, cursor, max_width)
        + DESCRIPTION_GAP;

    let coat_of_arms = coat_of_arms
        .resize_exact(COAT_OF_ARMS_SIZE, COAT_OF_ARMS_SIZE, FilterType::Triangle)
        .to_rgba8();
    imageops::overlay(
        canvas,
        &coat_of_arms,
        ((POSTER_WIDTH - COAT_OF_ARMS_SIZE) / 2) as i64,
        cursor.round() as i64,
    );

    let footer_baseline = POSTER_HEIGHT as f32 - PADDING as f32 / 1.5;
    let footer_width = fonts.body.measure(FOOTER_TEXT, FOOTER_PX);
    fonts.body.draw(
        canvas,
        FOOTER_TEXT,
        center_x - footer_width / 2.0,
        footer_baseline,
        FOOTER_PX,
        FOOTER_COLOR,
    );
}

/// Text style for one wrapped block.
struct TextBlock<'a> {
    face: &'a dyn Typeface,
    px: f32,
    line_height: f32,
    color: Rgba<u8>,
}

impl TextBlock<'_> {
    /// Greedy-wraps `text` to `max_width`, draws each line centered on `center_x`
    /// starting at `first_baseline`, and returns the baseline of the last line.
    fn draw_centered(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        center_x: f32,
        first_baseline: f32,
        max_width: f32,
    ) -> f32 {
        let lines = wrap_lines(text, max_width, |candidate| {
            self.face.measure(candidate, self.px)
        });

        for (i, line) in lines.iter().enumerate() {
            let baseline = first_baseline + i as f32 * self.line_height;
            let x = center_x - self.face.measure(line, self.px) / 2.0;
            self.face.draw(canvas, line, x, baseline, self.px, self.color);
        }

        last_baseline(first_baseline, lines.len(), self.line_height)
    }
}

fn draw_drop_shadow(canvas: &mut RgbaImage, x: u32, y: u32, width: u32, height: u32) {
    // Room for the blur tail (~3 sigma) on every side.
    let margin = (SHADOW_BLUR * 1.5).ceil() as u32;
    let mut layer = RgbaImage::new(width + margin * 2, height + margin * 2);
    draw_filled_rect_mut(
        &mut layer,
        Rect::at(margin as i32, margin as i32).of_size(width, height),
        Rgba([0, 0, 0, SHADOW_ALPHA]),
    );
    let layer = gaussian_blur_f32(&layer, SHADOW_BLUR / 2.0);
    imageops::overlay(
        canvas,
        &layer,
        x as i64 - margin as i64,
        y as i64 - margin as i64 + SHADOW_OFFSET_Y,
    );
}

/// Strokes a border centered on the rectangle edge, like a canvas `strokeRect`.
fn draw_border(canvas: &mut RgbaImage, x: u32, y: u32, width: u32, height: u32) {
    for step in 0..BORDER_WIDTH {
        let offset = step as i32 - (BORDER_WIDTH / 2) as i32;
        let rect = Rect::at(x as i32 + offset, y as i32 + offset).of_size(
            (width as i32 - 2 * offset) as u32,
            (height as i32 - 2 * offset) as u32,
        );
        draw_hollow_rect_mut(canvas, rect, BORDER_COLOR);
    }
}
