use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::ScoringWeights;

/// Errors that can occur while loading global scoring weights
#[derive(Debug, Error)]
pub enum WeightsError {
    #[error("read weights file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse weights JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("parse weights TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Load weights from a JSON or TOML file (chosen by extension)
///
/// Fields absent from the file keep their default value.
pub fn load_weights_from_file<P: AsRef<Path>>(path: P) -> Result<ScoringWeights, WeightsError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| WeightsError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let is_toml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("toml"));

    if is_toml {
        Ok(toml::from_str(&text)?)
    } else {
        Ok(serde_json::from_str(&text)?)
    }
}

/// Load weights, falling back to the built-in defaults on any failure
pub fn load_weights_or_default(path: Option<&str>) -> ScoringWeights {
    let Some(path) = path.filter(|p| !p.trim().is_empty()) else {
        tracing::info!("No weights file configured, using default weights");
        return ScoringWeights::default();
    };

    match load_weights_from_file(path) {
        Ok(weights) => {
            tracing::info!("Loaded scoring weights from {}", path);
            weights
        }
        Err(e) => {
            tracing::warn!("Using default weights ({})", e);
            ScoringWeights::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_json_weights_merges_defaults() {
        let file = write_file(".json", r#"{"quietness": 0.5, "sea_proximity": 0.0}"#);
        let weights = load_weights_from_file(file.path()).unwrap();

        assert_eq!(weights.quietness, 0.5);
        assert_eq!(weights.sea_proximity, 0.0);
        assert_eq!(weights.low_tourism, 1.0);
    }

    #[test]
    fn test_load_toml_weights() {
        let file = write_file(".toml", "walkability = 0.25\n");
        let weights = load_weights_from_file(file.path()).unwrap();

        assert_eq!(weights.walkability, 0.25);
        assert_eq!(weights.sun_exposure, 0.9);
    }

    #[test]
    fn test_malformed_weights_error() {
        let file = write_file(".json", "[1, 2");
        assert!(matches!(
            load_weights_from_file(file.path()),
            Err(WeightsError::Json(_))
        ));
    }

    #[test]
    fn test_fallback_to_defaults() {
        assert_eq!(
            load_weights_or_default(Some("/nonexistent/weights.json")),
            ScoringWeights::default()
        );
        assert_eq!(load_weights_or_default(None), ScoringWeights::default());

        let file = write_file(".json", "not json");
        let path = file.path().to_string_lossy().into_owned();
        assert_eq!(load_weights_or_default(Some(&path)), ScoringWeights::default());
    }
}
