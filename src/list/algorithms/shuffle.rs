use crate::list::{next_of, prev_of, List, Node};
use rand::Rng;
use std::ptr::NonNull;

impl<T> List<T> {
    /// Shuffle the elements into a uniformly random order drawn from `rng`.
    ///
    /// This is the Fisher–Yates shuffle carried out on the ring: for `i` from
    /// the length down to 2, an index `x` is drawn from `0..i` and the element
    /// `x` links after the front trades places with the last element of the
    /// unshuffled prefix. Each round fixes one more position, from the back
    /// inward. Nodes are relinked; none is allocated or released.
    ///
    /// # Complexity
    ///
    /// This operation draws *n* - 1 random numbers and walks up to *O*(*n*²)
    /// links in total to locate the drawn elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use rand::rngs::StdRng;
    /// use rand::SeedableRng;
    /// use ring_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter(0..10);
    /// list.shuffle_with(&mut StdRng::seed_from_u64(7));
    ///
    /// let mut values = Vec::from_iter(list);
    /// values.sort();
    /// assert_eq!(values, Vec::from_iter(0..10));
    /// ```
    pub fn shuffle_with<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        let len = self.len();
        if len < 2 {
            return;
        }
        let mut last = self.back_node();
        for i in (2..=len).rev() {
            let x = rng.gen_range(0..i);
            // SAFETY: `x < i <= len`, so `picked` is an element node at or
            // before `last`, which is the element at index `i - 1`.
            unsafe {
                let picked = self.nth_node(x);
                if picked != last {
                    self.swap_with_last(picked, last);
                }
                // `picked` now sits at index `i - 1`.
                last = prev_of(picked);
            }
        }
        log::trace!("shuffled a list of {} elements", len);
    }

    /// Shuffle the elements into a uniformly random order drawn from the
    /// thread-local generator. Enabled by `feature = "std-rng"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter(["a", "b", "c"]);
    /// list.shuffle();
    /// assert_eq!(list.len(), 3);
    /// ```
    #[cfg(feature = "std-rng")]
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::thread_rng());
    }

    /// Swap `picked` with `last`, where `picked` comes strictly before `last`.
    ///
    /// `last` is moved right after `picked`, then `picked` is moved to where
    /// `last` used to be.
    unsafe fn swap_with_last(&mut self, picked: NonNull<Node<T>>, last: NonNull<Node<T>>) {
        let after_picked = next_of(picked);
        if after_picked == last {
            self.relink_before(last, picked);
            return;
        }
        let after_last = next_of(last);
        self.relink_before(last, after_picked);
        self.relink_before(picked, after_last);
    }
}

#[cfg(test)]
mod tests {
    use crate::list::{assert_ring, List};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;
    use std::iter::FromIterator;

    #[test]
    fn shuffle_small_lists_is_noop() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut empty = List::<u8>::new();
        empty.shuffle_with(&mut rng);
        assert!(empty.is_empty());
        assert_ring(&empty);

        let mut single = List::from_iter([42]);
        single.shuffle_with(&mut rng);
        assert_eq!(Vec::from_iter(single), vec![42]);
    }

    #[test]
    fn shuffle_is_permutation() {
        let mut rng = StdRng::seed_from_u64(2);
        for len in 2..20 {
            let mut list = List::from_iter(0..len);
            list.shuffle_with(&mut rng);
            assert_ring(&list);
            let mut values = Vec::from_iter(list);
            values.sort();
            assert_eq!(values, Vec::from_iter(0..len));
        }
    }

    #[test]
    fn shuffle_is_deterministic_for_a_seed() {
        let mut first = List::from_iter(0..16);
        let mut second = first.clone();
        first.shuffle_with(&mut StdRng::seed_from_u64(3));
        second.shuffle_with(&mut StdRng::seed_from_u64(3));
        assert_eq!(first, second);
    }

    #[test]
    fn shuffle_is_uniform() {
        const TRIALS: usize = 24_000;
        let mut rng = StdRng::seed_from_u64(4);
        let mut counts: HashMap<Vec<u8>, usize> = HashMap::new();
        for _ in 0..TRIALS {
            let mut list = List::from_iter([0u8, 1, 2, 3]);
            list.shuffle_with(&mut rng);
            *counts.entry(Vec::from_iter(list)).or_default() += 1;
        }
        assert_eq!(counts.len(), 24);
        let expected = (TRIALS / 24) as f64;
        let chi_square: f64 = counts
            .values()
            .map(|&observed| {
                let diff = observed as f64 - expected;
                diff * diff / expected
            })
            .sum();
        // 23 degrees of freedom; 49.73 is the 0.1% critical value.
        assert!(chi_square < 49.73, "chi-square {} too large", chi_square);
    }

    #[cfg(feature = "std-rng")]
    #[test]
    fn shuffle_with_thread_rng() {
        let mut list = List::from_iter(0..32);
        list.shuffle();
        assert_ring(&list);
        let mut values = Vec::from_iter(list);
        values.sort();
        assert_eq!(values, Vec::from_iter(0..32));

        let mut queue = crate::Queue::from_iter(vec!["b".to_string(), "a".to_string()]);
        crate::queue::shuffle(Some(&mut queue));
        crate::queue::shuffle(None);
        assert_eq!(queue.size(), 2);
    }
}
