pub mod fonts;
pub mod manifest;
pub mod textures;

use thiserror::Error;

/// Errors from asset loading and parsing.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image {path}: {source}")]
    Image {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error("invalid manifest: {0}")]
    Manifest(#[from] serde_json::Error),
    #[error("manifest references unknown texture '{0}'")]
    UnknownTexture(String),
}
