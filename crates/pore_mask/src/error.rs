use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MaskError {
    #[error("Failed to load image: {0}")]
    ImageLoad(#[from] image::ImageError),

    #[error("Input has no usable file name: {}", .0.display())]
    InvalidFileName(PathBuf),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Serialized annotation is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("Failed to parse TOML configuration: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Unsupported configuration format. Please use .toml or .json files")]
    UnsupportedConfigFormat,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MaskError>;
