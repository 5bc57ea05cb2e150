//! Unbiased permutation of question sets.

use rand::Rng;
use rand::seq::SliceRandom;

/// Return a uniformly shuffled copy of `items`, leaving the input untouched.
pub fn shuffle<T: Clone>(items: &[T]) -> Vec<T> {
    shuffle_with(items, &mut rand::rng())
}

/// Same as [`shuffle`] with a caller-supplied random source.
///
/// `SliceRandom::shuffle` is a Fisher-Yates shuffle, so each of the n!
/// orderings is equally likely.
pub fn shuffle_with<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    shuffled.shuffle(rng);
    shuffled
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn sorted(mut items: Vec<u32>) -> Vec<u32> {
        items.sort_unstable();
        items
    }

    #[test]
    fn test_shuffle_empty_and_singleton() {
        let empty: Vec<u32> = Vec::new();
        assert!(shuffle(&empty).is_empty());
        assert_eq!(shuffle(&[42]), vec![42]);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let items = vec![5, 1, 1, 9, 3, 3, 3, 7];
        let shuffled = shuffle(&items);

        assert_eq!(shuffled.len(), items.len());
        assert_eq!(sorted(shuffled), sorted(items.clone()));
        assert_eq!(items, vec![5, 1, 1, 9, 3, 3, 3, 7]);
    }

    #[test]
    fn test_seeded_shuffle_is_reproducible() {
        let items: Vec<u32> = (0..20).collect();
        let first = shuffle_with(&items, &mut StdRng::seed_from_u64(7));
        let second = shuffle_with(&items, &mut StdRng::seed_from_u64(7));
        assert_eq!(first, second);
    }

    #[test]
    fn test_every_ordering_appears_evenly() {
        let items = [0u32, 1, 2];
        let mut rng = StdRng::seed_from_u64(2024);
        let mut counts: HashMap<Vec<u32>, usize> = HashMap::new();

        for _ in 0..6000 {
            *counts.entry(shuffle_with(&items, &mut rng)).or_default() += 1;
        }

        assert_eq!(counts.len(), 6);
        for (ordering, count) in counts {
            assert!(
                (800..=1200).contains(&count),
                "ordering {:?} seen {} times",
                ordering,
                count
            );
        }
    }
}
