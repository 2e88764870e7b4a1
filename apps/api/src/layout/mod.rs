// Poster text layout: font faces and greedy line wrapping.
// Pure measurement lives here; drawing onto the canvas lives in `render`.

pub mod font_metrics;
pub mod wrap;

// Re-export the public API consumed by the renderer and main.
pub use font_metrics::{PosterFonts, Typeface};
pub use wrap::{last_baseline, wrap_lines};
