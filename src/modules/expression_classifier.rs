use serde::Serialize;
use tracing::{debug, warn};
use crate::config::config::ClassifierConfig;
use crate::helper::metrics_helper::{compute_face_metrics, FaceMetrics};
use crate::modules::expression::Expression;
use crate::utils::coordinate::{FaceMeshIndex, LandmarkSet};

/// Label plus the metrics it was derived from. `metrics` is `None` when the
/// frame had no usable face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub expression: Expression,
    pub metrics: Option<FaceMetrics>,
}

/// Geometric expression classifier. Holds only its thresholds, so one
/// instance can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct ExpressionClassifier {
    config: ClassifierConfig,
}

impl ExpressionClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        ExpressionClassifier { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// classify maps one frame's landmarks to an expression.
    ///
    /// Missing, empty or too-short landmark sets yield `Neutral`.
    ///
    /// # Arguments
    /// * `landmarks` - normalized landmarks of the first detected face, if any
    /// * `frame_width` - capture width in pixels
    /// * `frame_height` - capture height in pixels
    ///
    /// # Returns
    /// * `Expression`
    pub fn classify(&self, landmarks: Option<&LandmarkSet>, frame_width: u32, frame_height: u32) -> Expression {
        self.evaluate(landmarks, frame_width, frame_height).expression
    }

    /// evaluate is `classify` that also returns the computed metrics for diagnostics.
    pub fn evaluate(&self, landmarks: Option<&LandmarkSet>, frame_width: u32, frame_height: u32) -> Classification {
        let landmarks = match landmarks {
            Some(landmarks) if !landmarks.is_empty() => landmarks,
            _ => return Classification { expression: Expression::Neutral, metrics: None },
        };

        let keypoints = match landmarks.keypoints() {
            Some(keypoints) => keypoints,
            None => {
                warn!(
                    points = landmarks.len(),
                    required = FaceMeshIndex::REQUIRED_POINTS,
                    "landmark set too short for the face mesh layout"
                );
                return Classification { expression: Expression::Neutral, metrics: None };
            }
        };

        let metrics = compute_face_metrics(&keypoints, frame_width, frame_height, self.config.epsilon);
        let expression = self.decide(&metrics);
        debug!(
            mar = metrics.mar,
            smile = metrics.smile,
            eye_height = metrics.eye_height,
            eyebrow_height = metrics.eyebrow_height,
            %expression,
            "classified frame"
        );

        Classification { expression, metrics: Some(metrics) }
    }

    /// Ordered rules, first match wins.
    pub fn decide(&self, metrics: &FaceMetrics) -> Expression {
        let cfg = &self.config;

        if metrics.mar > cfg.surprised_min_mar
            && metrics.eyebrow_height > cfg.surprised_min_eyebrow_height
            && metrics.eye_height > cfg.surprised_min_eye_height
        {
            return Expression::Surprised;
        }

        if metrics.smile > cfg.happy_min_smile && metrics.mar > cfg.happy_min_mar {
            return Expression::Happy;
        }

        if metrics.smile < cfg.sad_max_smile && metrics.eyebrow_height < cfg.sad_max_eyebrow_height {
            return Expression::Sad;
        }

        Expression::Neutral
    }
}
