use anyhow::Error;
use serde::{Deserialize, Serialize};

/// Thresholds for the ordered expression rules.
///
/// Heights are in pixels, `smile` is in normalized image units and MAR is unitless.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClassifierConfig {
    pub epsilon: f32,
    pub surprised_min_mar: f32,
    pub surprised_min_eyebrow_height: f32,
    pub surprised_min_eye_height: f32,
    pub happy_min_smile: f32,
    pub happy_min_mar: f32,
    pub sad_max_smile: f32,
    pub sad_max_eyebrow_height: f32,
}

impl ClassifierConfig {
    pub fn new() -> Self {
        ClassifierConfig {
            epsilon: 1e-6,
            surprised_min_mar: 0.4,
            surprised_min_eyebrow_height: 15.0,
            surprised_min_eye_height: 8.0,
            happy_min_smile: 0.003,
            happy_min_mar: 0.15,
            sad_max_smile: -0.002,
            sad_max_eyebrow_height: 12.0,
        }
    }

    /// Loads overrides from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        let config: ClassifierConfig = serde_json::from_str(json)?;
        Ok(config)
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::config::ClassifierConfig;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ClassifierConfig::from_json_str(r#"{"happy_min_mar": 0.2}"#).unwrap();
        assert_eq!(config.happy_min_mar, 0.2);
        assert_eq!(config.surprised_min_mar, 0.4);
        assert_eq!(config.sad_max_eyebrow_height, 12.0);
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        assert!(ClassifierConfig::from_json_str(r#"{"happy_min_mar": "high"}"#).is_err());
    }
}
