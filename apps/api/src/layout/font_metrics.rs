//! Font faces used by the poster renderer.
//!
//! Layout code only sees the `Typeface` trait: width measurement, ascent and a draw
//! call positioned on the alphabetic baseline (the same convention as a 2D canvas
//! `fillText`). `GlyphFace` is the production implementation backed by a
//! TrueType/OpenType font loaded through `ab_glyph` and rasterized by `imageproc`.
//!
//! The DejaVu faces under `assets/fonts/` are compiled into the binary and used
//! unless a font file path is configured.

use std::path::Path;
use std::sync::Arc;

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use anyhow::{anyhow, Context, Result};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;

const EMBEDDED_TITLE_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSerif-Bold.ttf");
const EMBEDDED_BODY_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

/// A face that can measure and draw single lines of text at a pixel size.
pub trait Typeface: Send + Sync {
    /// Advance width of `text` in pixels, including kerning.
    fn measure(&self, text: &str, px: f32) -> f32;

    /// Distance from the top of the line box to the baseline.
    fn ascent(&self, px: f32) -> f32;

    /// Draws `text` with its left edge at `x` and its baseline at `baseline`.
    fn draw(&self, canvas: &mut RgbaImage, text: &str, x: f32, baseline: f32, px: f32, color: Rgba<u8>);
}

// ────────────────────────────────────────────────────────────────────────────
// GlyphFace (ab_glyph)
// ────────────────────────────────────────────────────────────────────────────

pub struct GlyphFace {
    font: FontVec,
}

impl GlyphFace {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let font = FontVec::try_from_vec(bytes).map_err(|e| anyhow!("invalid font data: {e}"))?;
        Ok(Self { font })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).with_context(|| format!("failed to read font file {}", path.display()))?;
        Self::from_bytes(bytes).with_context(|| format!("failed to parse font file {}", path.display()))
    }
}

impl Typeface for GlyphFace {
    fn measure(&self, text: &str, px: f32) -> f32 {
        let scaled = self.font.as_scaled(PxScale::from(px));
        let mut width = 0.0_f32;
        let mut prev = None;
        for c in text.chars() {
            let glyph_id = scaled.glyph_id(c);
            if let Some(prev_id) = prev {
                width += scaled.kern(prev_id, glyph_id);
            }
            width += scaled.h_advance(glyph_id);
            prev = Some(glyph_id);
        }
        width
    }

    fn ascent(&self, px: f32) -> f32 {
        self.font.as_scaled(PxScale::from(px)).ascent()
    }

    fn draw(&self, canvas: &mut RgbaImage, text: &str, x: f32, baseline: f32, px: f32, color: Rgba<u8>) {
        // imageproc positions text by the top of the line box.
        let top = baseline - self.ascent(px);
        draw_text_mut(
            canvas,
            color,
            x.round() as i32,
            top.round() as i32,
            PxScale::from(px),
            &self.font,
            text,
        );
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Poster font set
// ────────────────────────────────────────────────────────────────────────────

/// The two faces the poster uses: a bold display face for the title and a body
/// face for the description and footer.
#[derive(Clone)]
pub struct PosterFonts {
    pub title: Arc<dyn Typeface>,
    pub body: Arc<dyn Typeface>,
}

impl PosterFonts {
    pub fn new(title: Arc<dyn Typeface>, body: Arc<dyn Typeface>) -> Self {
        Self { title, body }
    }

    /// Loads the configured font files, falling back to the embedded faces.
    pub fn load(title_path: Option<&str>, body_path: Option<&str>) -> Result<Self> {
        let title = load_face(title_path, EMBEDDED_TITLE_FONT).context("loading poster title font")?;
        let body = load_face(body_path, EMBEDDED_BODY_FONT).context("loading poster body font")?;
        Ok(Self::new(Arc::new(title), Arc::new(body)))
    }
}

fn load_face(path: Option<&str>, embedded: &[u8]) -> Result<GlyphFace> {
    match path {
        Some(path) => GlyphFace::from_file(path),
        None => GlyphFace::from_bytes(embedded.to_vec()),
    }
}
