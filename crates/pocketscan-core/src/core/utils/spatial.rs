use kiddo::{ImmutableKdTree, SquaredEuclidean};
use nalgebra::Point3;

/// A k-d tree over atom coordinates answering nearest-atom and radius queries.
///
/// Built once as a balanced immutable tree; any number of atoms may share a coordinate on
/// one axis. Item indices are positions in the slice the index was built from, so results
/// can be mapped straight back to `Protein::atoms()`.
pub struct AtomIndex {
    tree: Option<ImmutableKdTree<f64, 3>>,
    len: usize,
}

impl AtomIndex {
    pub fn new(positions: &[Point3<f64>]) -> Self {
        let coords: Vec<[f64; 3]> = positions.iter().map(|p| [p.x, p.y, p.z]).collect();
        let tree = (!coords.is_empty()).then(|| ImmutableKdTree::new_from_slice(&coords));
        Self {
            tree,
            len: coords.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Euclidean distance from `point` to its closest atom, or `None` for an empty index.
    pub fn nearest_distance(&self, point: &Point3<f64>) -> Option<f64> {
        let tree = self.tree.as_ref()?;
        let nearest = tree.nearest_one::<SquaredEuclidean>(&[point.x, point.y, point.z]);
        Some(nearest.distance.sqrt())
    }

    /// All atoms within `radius` (inclusive) of `point`, as `(atom index, distance)` pairs
    /// ordered by atom index.
    pub fn within(&self, point: &Point3<f64>, radius: f64) -> Vec<(usize, f64)> {
        let Some(tree) = self.tree.as_ref() else {
            return Vec::new();
        };
        if !(radius >= 0.0) {
            return Vec::new();
        }
        // The tree compares squared distances; widen slightly and re-check exactly below.
        let query_radius_sq = radius * radius * (1.0 + 1e-9) + 1e-12;
        let mut hits: Vec<(usize, f64)> = tree
            .within_unsorted::<SquaredEuclidean>(&[point.x, point.y, point.z], query_radius_sq)
            .into_iter()
            .map(|neighbour| (neighbour.item as usize, neighbour.distance.sqrt()))
            .filter(|&(_, distance)| distance <= radius)
            .collect();
        hits.sort_unstable_by_key(|&(index, _)| index);
        hits
    }
}
