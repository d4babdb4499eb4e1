use nalgebra::{Point3, Vector3};

/// An axis-aligned box spanned by two corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl BoundingBox {
    /// Computes the tight bounding box of a point set, or `None` if the set is empty.
    pub fn from_points(points: &[Point3<f64>]) -> Option<Self> {
        let first = points.first()?;
        let (min, max) = points.iter().skip(1).fold((*first, *first), |(lo, hi), p| {
            (lo.inf(p), hi.sup(p))
        });
        Some(Self { min, max })
    }

    /// Returns a copy grown by `margin` on every side.
    pub fn expanded(&self, margin: f64) -> Self {
        let delta = Vector3::repeat(margin);
        Self {
            min: self.min - delta,
            max: self.max + delta,
        }
    }

    pub fn contains(&self, point: &Point3<f64>) -> bool {
        (0..3).all(|i| point[i] >= self.min[i] && point[i] <= self.max[i])
    }
}

/// Arithmetic mean of a point set, or `None` if the set is empty.
pub fn centroid(points: &[Point3<f64>]) -> Option<Point3<f64>> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Some(Point3::from(sum / points.len() as f64))
}

/// Half-open arithmetic progression `min, min + step, ...` strictly below `max`.
///
/// The i-th sample is computed as `min + i * step` rather than by accumulation, and the
/// sample count is `ceil((max - min) / step)`. Returns an empty list for a non-positive
/// step or an empty interval.
pub fn axis_samples(min: f64, max: f64, step: f64) -> Vec<f64> {
    let count = axis_sample_count(min, max, step);
    (0..count).map(|i| min + i as f64 * step).collect()
}

pub fn axis_sample_count(min: f64, max: f64, step: f64) -> usize {
    if !(step > 0.0) || !(max > min) {
        return 0;
    }
    let count = ((max - min) / step).ceil();
    if count.is_finite() { count as usize } else { 0 }
}
