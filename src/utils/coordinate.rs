use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

/// Face Mesh indices of the points the classifier reads.
///
/// The landmark provider must emit points in the MediaPipe Face Mesh order
/// (468 points, 478 with iris refinement).
pub struct FaceMeshIndex;

impl FaceMeshIndex {
    pub const MOUTH_LEFT: usize = 61;
    pub const MOUTH_RIGHT: usize = 291;
    pub const UPPER_LIP: usize = 13;
    pub const LOWER_LIP: usize = 14;
    pub const MOUTH_TOP: usize = 0;
    pub const MOUTH_BOTTOM: usize = 17;
    pub const LEFT_EYEBROW_INNER: usize = 70;
    pub const RIGHT_EYEBROW_INNER: usize = 300;
    pub const LEFT_EYE_TOP: usize = 159;
    pub const LEFT_EYE_BOTTOM: usize = 145;
    pub const RIGHT_EYE_TOP: usize = 386;
    pub const RIGHT_EYE_BOTTOM: usize = 374;

    /// Smallest landmark count that covers every index above.
    pub const REQUIRED_POINTS: usize = 387;
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate2D {
    pub x: f32,
    pub y: f32,
}

impl Coordinate2D {
    pub fn new(x: f32, y: f32) -> Self {
        Coordinate2D { x, y }
    }
}

/// The twelve points pulled out of a landmark set, still normalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpressionKeypoints {
    pub mouth_left: Coordinate2D,
    pub mouth_right: Coordinate2D,
    pub upper_lip: Coordinate2D,
    pub lower_lip: Coordinate2D,
    pub mouth_top: Coordinate2D,
    pub mouth_bottom: Coordinate2D,
    pub left_eyebrow_inner: Coordinate2D,
    pub right_eyebrow_inner: Coordinate2D,
    pub left_eye_top: Coordinate2D,
    pub left_eye_bottom: Coordinate2D,
    pub right_eye_top: Coordinate2D,
    pub right_eye_bottom: Coordinate2D,
}

/// Normalized landmarks of a single face, one `[x, y]` row per point.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkSet {
    points: Array2<f32>,
}

impl LandmarkSet {
    /// Wraps an `(n, 2)` array. Callers go through the constructors in
    /// `utils::landmark`, which check the shape.
    pub(crate) fn from_array_unchecked(points: Array2<f32>) -> Self {
        LandmarkSet { points }
    }

    pub fn len(&self) -> usize {
        self.points.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.points.nrows() == 0
    }

    pub fn view(&self) -> ArrayView2<'_, f32> {
        self.points.view()
    }

    pub fn point(&self, index: usize) -> Option<Coordinate2D> {
        if index >= self.points.nrows() {
            return None;
        }
        Some(Coordinate2D::new(self.points[[index, 0]], self.points[[index, 1]]))
    }

    /// Extracts the classifier's keypoints, or `None` when the set is too
    /// short for the Face Mesh layout.
    pub fn keypoints(&self) -> Option<ExpressionKeypoints> {
        if self.len() < FaceMeshIndex::REQUIRED_POINTS {
            return None;
        }
        Some(ExpressionKeypoints {
            mouth_left: self.point(FaceMeshIndex::MOUTH_LEFT)?,
            mouth_right: self.point(FaceMeshIndex::MOUTH_RIGHT)?,
            upper_lip: self.point(FaceMeshIndex::UPPER_LIP)?,
            lower_lip: self.point(FaceMeshIndex::LOWER_LIP)?,
            mouth_top: self.point(FaceMeshIndex::MOUTH_TOP)?,
            mouth_bottom: self.point(FaceMeshIndex::MOUTH_BOTTOM)?,
            left_eyebrow_inner: self.point(FaceMeshIndex::LEFT_EYEBROW_INNER)?,
            right_eyebrow_inner: self.point(FaceMeshIndex::RIGHT_EYEBROW_INNER)?,
            left_eye_top: self.point(FaceMeshIndex::LEFT_EYE_TOP)?,
            left_eye_bottom: self.point(FaceMeshIndex::LEFT_EYE_BOTTOM)?,
            right_eye_top: self.point(FaceMeshIndex::RIGHT_EYE_TOP)?,
            right_eye_bottom: self.point(FaceMeshIndex::RIGHT_EYE_BOTTOM)?,
        })
    }
}
