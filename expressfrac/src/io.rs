use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use thiserror::Error;

use crate::Config;

#[derive(Error, Debug)]
pub enum LoadConfigError {
    #[error("IO")]
    IO(#[from] std::io::Error),
    #[error("JSON parse")]
    Json(#[from] serde_json::Error),
    #[error("RON parse")]
    Ron(#[from] ron::error::SpannedError),
    #[error("Unsupported config format: {0:?}")]
    UnsupportedFormat(String),
    #[error("Invalid configuration")]
    Invalid(#[from] crate::Error),
}

/// Load a run configuration from a `.json` or `.ron` file.
///
/// The configuration is only parsed here. Use [`Config::validate`] to check its values.
pub fn load_config(path: impl AsRef<Path>) -> std::result::Result<Config, LoadConfigError> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "json" => {
            let f = BufReader::new(File::open(path)?);
            Ok(serde_json::from_reader(f)?)
        }
        "ron" => {
            let f = File::open(path)?;
            Ok(ron::de::from_reader(f)?)
        }
        _ => Err(LoadConfigError::UnsupportedFormat(path.display().to_string())),
    }
}
