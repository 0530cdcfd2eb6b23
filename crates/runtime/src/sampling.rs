//! Weighted sampling without replacement.

use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use tracing::warn;

/// Draws up to `count` items from `pool`, one at a time.
///
/// Each draw picks an item with probability proportional to its weight among
/// the items still in the pool, then removes it. Sampling stops early, with a
/// warning, once the remaining weight is zero.
pub fn draw_without_replacement<T, R>(
    mut pool: Vec<T>,
    count: usize,
    weight: impl Fn(&T) -> f64,
    rng: &mut R,
) -> Vec<T>
where
    R: Rng + ?Sized,
{
    let mut drawn = Vec::with_capacity(count.min(pool.len()));
    while drawn.len() < count && !pool.is_empty() {
        let weights: Vec<f64> = pool.iter().map(&weight).collect();
        let dist = match WeightedIndex::new(&weights) {
            Ok(dist) => dist,
            Err(error) => {
                warn!(
                    target: "runtime::sampling",
                    remaining = pool.len(),
                    drawn = drawn.len(),
                    %error,
                    "remaining weight is zero, returning a partial draw"
                );
                break;
            }
        };
        drawn.push(pool.remove(dist.sample(rng)));
    }
    drawn
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn draws_distinct_items() {
        let mut rng = StdRng::seed_from_u64(3);
        let drawn = draw_without_replacement((0..10).collect(), 4, |_| 1.0, &mut rng);
        let mut sorted = drawn.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(drawn.len(), 4);
        assert_eq!(sorted.len(), 4);
    }

    #[test]
    fn zero_weight_items_are_never_drawn() {
        let mut rng = StdRng::seed_from_u64(5);
        let drawn = draw_without_replacement(
            vec![1, 2, 3, 4],
            4,
            |n| if n % 2 == 0 { 1.0 } else { 0.0 },
            &mut rng,
        );
        let mut drawn = drawn;
        drawn.sort_unstable();
        assert_eq!(drawn, vec![2, 4]);
    }

    #[test]
    fn all_zero_pool_yields_nothing() {
        let mut rng = StdRng::seed_from_u64(5);
        let drawn = draw_without_replacement(vec!['a', 'b'], 1, |_| 0.0, &mut rng);
        assert!(drawn.is_empty());
    }
}
