use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use crate::utils::coordinate::{Coordinate2D, ExpressionKeypoints};

/// Scalars derived from one face, recomputed on every classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceMetrics {
    /// Inner-mouth opening over mouth width.
    pub mar: f32,
    /// Mouth-corner lift above the lip center, normalized units. Positive means raised.
    pub smile: f32,
    /// Mean eye opening, pixels.
    pub eye_height: f32,
    /// Mean eye-top to inner-eyebrow distance, pixels. Larger means raised.
    pub eyebrow_height: f32,
    /// Inner-lip opening, pixels.
    pub mouth_height: f32,
}

/// Scales a normalized point into pixel space.
fn to_pixels(point: Coordinate2D, frame_width: f32, frame_height: f32) -> Vector2<f32> {
    Vector2::new(point.x * frame_width, point.y * frame_height)
}

/// compute_face_metrics derives the expression metrics from the keypoints.
///
/// MAR and the eye/eyebrow heights use pixel coordinates so that non-square
/// frames are measured consistently. The smile metric stays in normalized
/// coordinates, matching the scale of its thresholds.
///
/// # Arguments
/// * `keypoints` - normalized keypoints of one face
/// * `frame_width` - frame width in pixels
/// * `frame_height` - frame height in pixels
/// * `epsilon` - guard added to the mouth width
///
/// # Returns
/// * `FaceMetrics`
pub fn compute_face_metrics(
    keypoints: &ExpressionKeypoints,
    frame_width: u32,
    frame_height: u32,
    epsilon: f32,
) -> FaceMetrics {
    let (w, h) = (frame_width as f32, frame_height as f32);

    let mouth_left = to_pixels(keypoints.mouth_left, w, h);
    let mouth_right = to_pixels(keypoints.mouth_right, w, h);
    let upper_lip = to_pixels(keypoints.upper_lip, w, h);
    let lower_lip = to_pixels(keypoints.lower_lip, w, h);

    let mouth_height = (lower_lip.y - upper_lip.y).abs();
    let mouth_width = (mouth_right.x - mouth_left.x).abs();
    let mar = mouth_height / (mouth_width + epsilon);

    let mouth_center_y = (keypoints.upper_lip.y + keypoints.lower_lip.y) / 2.0;
    let left_corner_diff = keypoints.mouth_left.y - mouth_center_y;
    let right_corner_diff = keypoints.mouth_right.y - mouth_center_y;
    let smile = -(left_corner_diff + right_corner_diff) / 2.0;

    let eyes = [
        (keypoints.left_eye_top, keypoints.left_eye_bottom, keypoints.left_eyebrow_inner),
        (keypoints.right_eye_top, keypoints.right_eye_bottom, keypoints.right_eyebrow_inner),
    ];
    let mut eye_height = 0.0;
    let mut eyebrow_height = 0.0;
    for (top, bottom, brow) in eyes {
        let top = to_pixels(top, w, h);
        let bottom = to_pixels(bottom, w, h);
        let brow = to_pixels(brow, w, h);
        eye_height += (top - bottom).y.abs();
        eyebrow_height += (top - brow).y;
    }

    FaceMetrics {
        mar,
        smile,
        eye_height: eye_height / eyes.len() as f32,
        eyebrow_height: eyebrow_height / eyes.len() as f32,
        mouth_height,
    }
}
