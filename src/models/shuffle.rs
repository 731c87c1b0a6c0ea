//! Fisher-Yates shuffle used to randomize session order.
use rand::Rng;

/// Returns a shuffled copy of `items`. The input slice is left as it was.
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut order = items.to_vec();
    for i in (1..order.len()).rev() {
        let j = rng.gen_range(0..=i);
        order.swap(i, j);
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_shuffle_is_permutation() {
        let source: Vec<u32> = (0..50).collect();
        let mut rng = StdRng::seed_from_u64(7);

        let mut order = shuffled(&source, &mut rng);

        assert_eq!(order.len(), source.len());
        order.sort();
        assert_eq!(order, source);
    }

    #[test]
    fn test_shuffle_keeps_duplicates() {
        let source = vec!["a", "b", "a", "a", "c"];
        let mut rng = StdRng::seed_from_u64(3);

        let mut order = shuffled(&source, &mut rng);
        order.sort();

        assert_eq!(order, vec!["a", "a", "a", "b", "c"]);
    }

    #[test]
    fn test_source_is_not_mutated() {
        let source = vec![1, 2, 3, 4, 5];
        let snapshot = source.clone();
        let mut rng = StdRng::seed_from_u64(11);

        let _ = shuffled(&source, &mut rng);

        assert_eq!(source, snapshot);
    }

    #[test]
    fn test_shuffle_is_deterministic_with_seed() {
        let source: Vec<u32> = (0..20).collect();
        let make = |seed: u64| shuffled(&source, &mut StdRng::seed_from_u64(seed));

        assert_eq!(make(99), make(99));
    }

    #[test]
    fn test_empty_and_single() {
        let mut rng = StdRng::seed_from_u64(1);

        assert!(shuffled::<u8, _>(&[], &mut rng).is_empty());
        assert_eq!(shuffled(&[42], &mut rng), vec![42]);
    }

    #[test]
    fn test_every_position_is_reachable() {
        // Each of 3 elements should land first at least once over many seeds.
        let source = [0usize, 1, 2];
        let mut seen_first = [false; 3];
        for seed in 0..200 {
            let order = shuffled(&source, &mut StdRng::seed_from_u64(seed));
            seen_first[order[0]] = true;
        }
        assert_eq!(seen_first, [true; 3]);
    }
}
