//! Hand landmarks as delivered by a hand-tracking collaborator.
//!
//! A detected hand is a fixed 21-point skeleton in frame pixel coordinates.
//! Anything that does not look like one (wrong point count, NaN, points off
//! the frame) is rejected here so that callers can treat it as "no hand".

use thiserror::Error;

/// Number of points in a hand skeleton.
pub const LANDMARK_COUNT: usize = 21;
pub const WRIST:      usize = 0;
pub const INDEX_TIP:  usize = 8;
pub const MIDDLE_TIP: usize = 12;

/// A 2D point in frame pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Point { x, y }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LandmarkError {
    #[error("expected 21 landmarks, got {found}")]
    WrongCount { found: usize },
    #[error("landmark {index} is not finite")]
    NonFinite { index: usize },
    #[error("landmark {index} at ({x}, {y}) lies outside the {width}x{height} frame")]
    OutOfBounds { index: usize, x: f32, y: f32, width: u32, height: u32 },
}

/// One hand's validated skeleton.
#[derive(Clone, Debug, PartialEq)]
pub struct HandLandmarks {
    points: [Point; LANDMARK_COUNT],
}

impl HandLandmarks {
    /// Build from raw `(x, y)` pairs, checking count and finiteness.
    pub fn from_points<P: Copy + Into<Point>>(raw: &[P]) -> Result<Self, LandmarkError> {
        if raw.len() != LANDMARK_COUNT {
            return Err(LandmarkError::WrongCount { found: raw.len() });
        }
        let mut points = [Point::default(); LANDMARK_COUNT];
        for (index, (slot, &p)) in points.iter_mut().zip(raw).enumerate() {
            let p: Point = p.into();
            if !p.x.is_finite() || !p.y.is_finite() {
                return Err(LandmarkError::NonFinite { index });
            }
            *slot = p;
        }
        Ok(HandLandmarks { points })
    }

    /// Reject the skeleton if any point falls outside a `width × height` frame.
    pub fn within(self, width: u32, height: u32) -> Result<Self, LandmarkError> {
        let (w, h) = (width as f32, height as f32);
        for (index, p) in self.points.iter().enumerate() {
            if p.x < 0.0 || p.y < 0.0 || p.x >= w || p.y >= h {
                return Err(LandmarkError::OutOfBounds {
                    index, x: p.x, y: p.y, width, height,
                });
            }
        }
        Ok(self)
    }

    pub fn points(&self) -> &[Point; LANDMARK_COUNT] { &self.points }

    /// Landmark `index`; panics if `index >= LANDMARK_COUNT`.
    pub fn point(&self, index: usize) -> Point { self.points[index] }

    /// Distance between two landmarks.
    pub fn distance(&self, a: usize, b: usize) -> f32 {
        self.points[a].distance(self.points[b])
    }

    /// The pointing fingertip used for hit-testing keys.
    pub fn index_tip(&self) -> Point { self.points[INDEX_TIP] }

    /// Index-tip to middle-tip distance; small values mean "pinched".
    pub fn pinch_distance(&self) -> f32 {
        self.distance(INDEX_TIP, MIDDLE_TIP)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(x: f32, y: f32) -> Vec<(f32, f32)> {
        vec![(x, y); LANDMARK_COUNT]
    }

    #[test]
    fn wrong_count_rejected() {
        let err = HandLandmarks::from_points(&flat(1.0, 1.0)[..20]).unwrap_err();
        assert_eq!(err, LandmarkError::WrongCount { found: 20 });
    }

    #[test]
    fn nan_rejected() {
        let mut pts = flat(1.0, 1.0);
        pts[3] = (f32::NAN, 2.0);
        assert_eq!(
            HandLandmarks::from_points(&pts).unwrap_err(),
            LandmarkError::NonFinite { index: 3 }
        );
    }

    #[test]
    fn out_of_frame_rejected() {
        let mut pts = flat(10.0, 10.0);
        pts[20] = (1280.0, 10.0);
        let hand = HandLandmarks::from_points(&pts).unwrap();
        assert!(matches!(
            hand.within(1280, 720),
            Err(LandmarkError::OutOfBounds { index: 20, .. })
        ));
    }

    #[test]
    fn pinch_distance_is_euclidean() {
        let mut pts = flat(0.0, 0.0);
        pts[INDEX_TIP]  = (100.0, 100.0);
        pts[MIDDLE_TIP] = (103.0, 104.0);
        let hand = HandLandmarks::from_points(&pts).unwrap();
        assert!((hand.pinch_distance() - 5.0).abs() < 1e-6);
        assert_eq!(hand.index_tip(), Point::new(100.0, 100.0));
    }
}
