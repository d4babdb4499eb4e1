use crate::core::utils::geometry::BoundingBox;
use nalgebra::Point3;
use rand::prelude::*;
use rand::rngs::StdRng;
use tracing::instrument;

/// Builds the deterministic generator for one randomized step.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Draws a fresh seed from the thread-local generator.
pub fn fresh_seed() -> u64 {
    rand::thread_rng().r#gen()
}

fn uniform_in(lo: f64, hi: f64, rng: &mut impl Rng) -> f64 {
    if hi > lo { rng.gen_range(lo..hi) } else { lo }
}

/// Draws `count` points uniformly inside `bounds`, one (x, y, z) triple at a time.
#[instrument(level = "trace", skip_all, fields(count))]
pub fn uniform_points_in_box(
    bounds: &BoundingBox,
    count: usize,
    rng: &mut impl Rng,
) -> Vec<Point3<f64>> {
    (0..count)
        .map(|_| {
            let x = uniform_in(bounds.min.x, bounds.max.x, rng);
            let y = uniform_in(bounds.min.y, bounds.max.y, rng);
            let z = uniform_in(bounds.min.z, bounds.max.z, rng);
            Point3::new(x, y, z)
        })
        .collect()
}

/// Picks `amount` distinct items uniformly without replacement, in draw order.
///
/// Returns all items unchanged when `amount` is not smaller than the input.
#[instrument(level = "trace", skip_all, fields(from = items.len(), amount))]
pub fn subsample<T: Clone>(items: &[T], amount: usize, rng: &mut impl Rng) -> Vec<T> {
    if amount >= items.len() {
        return items.to_vec();
    }
    rand::seq::index::sample(rng, items.len(), amount)
        .into_iter()
        .map(|i| items[i].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn unit_box() -> BoundingBox {
        BoundingBox {
            min: Point3::new(-1.0, 0.0, 2.0),
            max: Point3::new(1.0, 0.5, 4.0),
        }
    }

    #[test]
    fn same_seed_gives_same_points() {
        let a = uniform_points_in_box(&unit_box(), 50, &mut seeded_rng(11));
        let b = uniform_points_in_box(&unit_box(), 50, &mut seeded_rng(11));
        let c = uniform_points_in_box(&unit_box(), 50, &mut seeded_rng(12));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn uniform_points_stay_inside_half_open_box() {
        let bounds = unit_box();
        let points = uniform_points_in_box(&bounds, 500, &mut seeded_rng(3));
        assert_eq!(points.len(), 500);
        for p in &points {
            assert!(p.x >= bounds.min.x && p.x < bounds.max.x);
            assert!(p.y >= bounds.min.y && p.y < bounds.max.y);
            assert!(p.z >= bounds.min.z && p.z < bounds.max.z);
        }
    }

    #[test]
    fn flat_axis_collapses_to_its_minimum() {
        let bounds = BoundingBox {
            min: Point3::new(0.0, 1.0, 0.0),
            max: Point3::new(1.0, 1.0, 1.0),
        };
        let points = uniform_points_in_box(&bounds, 20, &mut seeded_rng(5));
        assert!(points.iter().all(|p| p.y == 1.0));
    }

    #[test]
    fn subsample_draws_distinct_items_deterministically() {
        let items: Vec<usize> = (0..1000).collect();
        let picked = subsample(&items, 100, &mut seeded_rng(9));
        assert_eq!(picked.len(), 100);
        assert_eq!(picked.iter().collect::<HashSet<_>>().len(), 100);
        assert_eq!(picked, subsample(&items, 100, &mut seeded_rng(9)));
    }

    #[test]
    fn subsample_returns_everything_when_amount_is_large() {
        let items = vec!['a', 'b', 'c'];
        assert_eq!(subsample(&items, 3, &mut seeded_rng(1)), items);
        assert_eq!(subsample(&items, 10, &mut seeded_rng(1)), items);
    }
}
