use anyhow::Error;
use ndarray::Array2;
use crate::error::ExpressifyError;
use crate::utils::coordinate::{Coordinate2D, ExpressionKeypoints, FaceMeshIndex, LandmarkSet};

/// Number of points in a Face Mesh result without iris refinement.
pub const FACE_MESH_POINTS: usize = 468;

/// convert_array_to_landmarks wraps an `(n, 2)` array of normalized points.
///
/// # Arguments
/// * `points` - Array2<f32> with one `[x, y]` row per landmark
///
/// # Returns
/// * `Result<LandmarkSet, Error>`
pub fn convert_array_to_landmarks(points: Array2<f32>) -> Result<LandmarkSet, Error> {
    if points.ncols() != 2 {
        return Err(Error::from(ExpressifyError::MalformedLandmarks(format!(
            "expected 2 columns per point, got {}",
            points.ncols()
        ))));
    }
    Ok(LandmarkSet::from_array_unchecked(points))
}

/// convert_points_to_landmarks packs provider points into a landmark set, keeping their order.
pub fn convert_points_to_landmarks(points: &[Coordinate2D]) -> Result<LandmarkSet, Error> {
    let mut result: Vec<f32> = Vec::with_capacity(points.len() * 2);
    for point in points {
        result.extend_from_slice(&[point.x, point.y]);
    }

    let arr = Array2::from_shape_vec((points.len(), 2), result)?;
    convert_array_to_landmarks(arr)
}

/// convert_json_to_landmarks parses a JSON array of `{"x": .., "y": ..}` objects.
///
/// An empty array is valid and yields an empty set.
pub fn convert_json_to_landmarks(json: &str) -> Result<LandmarkSet, Error> {
    let points: Vec<Coordinate2D> = serde_json::from_str(json)?;
    convert_points_to_landmarks(&points)
}

/// convert_keypoints_to_landmarks lays the twelve keypoints out at their Face Mesh
/// indices inside a full-size set. Every other point sits at the frame center.
///
/// Replay tools and tests use this to build synthetic faces.
pub fn convert_keypoints_to_landmarks(keypoints: &ExpressionKeypoints) -> LandmarkSet {
    let mut arr = Array2::<f32>::from_elem((FACE_MESH_POINTS, 2), 0.5);

    let placed = [
        (FaceMeshIndex::MOUTH_LEFT, keypoints.mouth_left),
        (FaceMeshIndex::MOUTH_RIGHT, keypoints.mouth_right),
        (FaceMeshIndex::UPPER_LIP, keypoints.upper_lip),
        (FaceMeshIndex::LOWER_LIP, keypoints.lower_lip),
        (FaceMeshIndex::MOUTH_TOP, keypoints.mouth_top),
        (FaceMeshIndex::MOUTH_BOTTOM, keypoints.mouth_bottom),
        (FaceMeshIndex::LEFT_EYEBROW_INNER, keypoints.left_eyebrow_inner),
        (FaceMeshIndex::RIGHT_EYEBROW_INNER, keypoints.right_eyebrow_inner),
        (FaceMeshIndex::LEFT_EYE_TOP, keypoints.left_eye_top),
        (FaceMeshIndex::LEFT_EYE_BOTTOM, keypoints.left_eye_bottom),
        (FaceMeshIndex::RIGHT_EYE_TOP, keypoints.right_eye_top),
        (FaceMeshIndex::RIGHT_EYE_BOTTOM, keypoints.right_eye_bottom),
    ];
    for (idx, point) in placed {
        arr[[idx, 0]] = point.x;
        arr[[idx, 1]] = point.y;
    }

    LandmarkSet::from_array_unchecked(arr)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::utils::coordinate::{Coordinate2D, ExpressionKeypoints, LandmarkSet};
    use crate::utils::landmark::convert_keypoints_to_landmarks;

    pub const FRAME_WIDTH: u32 = 640;
    pub const FRAME_HEIGHT: u32 = 480;

    /// Synthetic face for a 640x480 frame.
    ///
    /// * `lip_gap` - normalized inner-lip opening; MAR = lip_gap * 7.5
    /// * `corner_lift` - how far the mouth corners sit above the lip center (the smile metric)
    /// * `brow_gap` - normalized eye-top to eyebrow distance; pixels = brow_gap * 480
    /// * `eye_open` - normalized eye opening; pixels = eye_open * 480
    pub fn face(lip_gap: f32, corner_lift: f32, brow_gap: f32, eye_open: f32) -> LandmarkSet {
        let mouth_y = 0.70;
        let eye_top_y = 0.40;
        convert_keypoints_to_landmarks(&ExpressionKeypoints {
            mouth_left: Coordinate2D::new(0.45, mouth_y - corner_lift),
            mouth_right: Coordinate2D::new(0.55, mouth_y - corner_lift),
            upper_lip: Coordinate2D::new(0.50, mouth_y - lip_gap / 2.0),
            lower_lip: Coordinate2D::new(0.50, mouth_y + lip_gap / 2.0),
            mouth_top: Coordinate2D::new(0.50, mouth_y - lip_gap / 2.0 - 0.02),
            mouth_bottom: Coordinate2D::new(0.50, mouth_y + lip_gap / 2.0 + 0.03),
            left_eyebrow_inner: Coordinate2D::new(0.45, eye_top_y - brow_gap),
            right_eyebrow_inner: Coordinate2D::new(0.55, eye_top_y - brow_gap),
            left_eye_top: Coordinate2D::new(0.42, eye_top_y),
            left_eye_bottom: Coordinate2D::new(0.42, eye_top_y + eye_open),
            right_eye_top: Coordinate2D::new(0.58, eye_top_y),
            right_eye_bottom: Coordinate2D::new(0.58, eye_top_y + eye_open),
        })
    }

    pub fn neutral_face() -> LandmarkSet {
        face(0.01, 0.0, 0.03, 0.015)
    }

    pub fn happy_face() -> LandmarkSet {
        face(0.03, 0.01, 0.03, 0.015)
    }

    pub fn sad_face() -> LandmarkSet {
        face(0.01, -0.01, 0.02, 0.015)
    }

    pub fn surprised_face() -> LandmarkSet {
        face(0.08, 0.0, 0.04, 0.025)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::Array2;
    use crate::utils::coordinate::{Coordinate2D, FaceMeshIndex};
    use crate::utils::landmark::{convert_array_to_landmarks, convert_json_to_landmarks, convert_points_to_landmarks, FACE_MESH_POINTS};
    use crate::utils::landmark::fixtures::happy_face;

    #[test]
    fn test_convert_points_to_landmarks() {
        let points = vec![
            Coordinate2D::new(0.1, 0.2),
            Coordinate2D::new(0.3, 0.4),
            Coordinate2D::new(0.5, 0.6),
        ];
        let set = convert_points_to_landmarks(&points).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.point(1), Some(Coordinate2D::new(0.3, 0.4)));
    }

    #[test]
    fn test_convert_json_to_landmarks() {
        let json = r#"[{"x":0.4512,"y":0.7021},{"x":0.5498,"y":0.6987}]"#;
        let set = convert_json_to_landmarks(json).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.point(0), Some(Coordinate2D::new(0.4512, 0.7021)));

        let empty = convert_json_to_landmarks("[]").unwrap();
        assert!(empty.is_empty());

        assert!(convert_json_to_landmarks(r#"{"x":1}"#).is_err());
    }

    #[test]
    fn test_convert_array_rejects_wrong_width() {
        let result = convert_array_to_landmarks(Array2::zeros((10, 3)));
        assert!(result.is_err());
        assert!(convert_array_to_landmarks(Array2::zeros((10, 2))).is_ok());
    }

    #[test]
    fn test_keypoints_land_on_face_mesh_indices() {
        let face = happy_face();
        assert_eq!(face.len(), FACE_MESH_POINTS);
        let keypoints = face.keypoints().unwrap();
        assert_eq!(face.point(FaceMeshIndex::MOUTH_LEFT), Some(keypoints.mouth_left));
        assert_eq!(face.point(1), Some(Coordinate2D::new(0.5, 0.5)));
    }
}
