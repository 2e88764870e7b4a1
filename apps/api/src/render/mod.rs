// Poster rendering: composes generated images and text into one PNG.
// Image decode and drawing are CPU-bound and run inside tokio::task::spawn_blocking.

pub mod data_url;
pub mod handlers;
pub mod poster;

use thiserror::Error;

pub use poster::{Poster, PosterComposer};

#[derive(Debug, Error)]
pub enum PosterError {
    #[error("invalid data URL: {0}")]
    InvalidDataUrl(String),

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("failed to encode poster: {0}")]
    Encode(#[source] image::ImageError),

    #[error("render task failed: {0}")]
    Join(String),
}
