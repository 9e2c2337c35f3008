use crate::list::{next_of, prev_of, List};

mod shuffle;
mod sort;

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other)
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T> List<T> {
    /// Returns `true` if the `List` contains an element equal to the given value.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([0, 1, 2]);
    /// assert_eq!(list.contains(&0), true);
    /// assert_eq!(list.contains(&10), false);
    /// ```
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.iter().any(|e| e == x)
    }

    /// Removes the middle element and returns it, or `None` if the list is
    /// empty.
    ///
    /// The middle of a list of length *n* is the element at index
    /// ⌊(*n* - 1) / 2⌋, so six elements lose the one at index 2 and five
    /// elements lose the one at index 2 as well. It is found with a slow
    /// cursor moving one link per step and a fast cursor moving two, which
    /// stops once it reaches the back node or the node right before it.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([0, 1, 2, 3, 4, 5]);
    /// assert_eq!(list.remove_middle(), Some(2));
    /// assert_eq!(Vec::from_iter(list), vec![0, 1, 3, 4, 5]);
    /// ```
    pub fn remove_middle(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let back = self.back_node();
        let mut slow = self.front_node();
        let mut fast = slow;
        // SAFETY: the list is not empty, and `fast` never walks past `back`,
        // so `slow` always stays on an element node.
        unsafe {
            while fast != back && next_of(fast) != back {
                fast = next_of(next_of(fast));
                slow = next_of(slow);
            }
            Some(self.detach_node(slow).into_element())
        }
    }

    /// Removes every element that belongs to a run of two or more adjacent
    /// equal elements, keeping only the elements without an equal neighbor.
    /// Returns the number of removed elements.
    ///
    /// On a sorted list this leaves exactly the values that occurred once.
    /// An empty list, or a list without adjacent duplicates, is left as is.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter(["a", "a", "b", "c", "c", "c"]);
    /// assert_eq!(list.remove_duplicate_runs(), 5);
    /// assert_eq!(Vec::from_iter(list), vec!["b"]);
    /// ```
    pub fn remove_duplicate_runs(&mut self) -> usize
    where
        T: PartialEq,
    {
        let ghost = self.ghost_node();
        let mut node = self.front_node();
        let mut in_run = false;
        let mut removed = 0;
        while node != ghost {
            // SAFETY: `node` is an element node, and `next` is compared before
            // `node` is detached, so neither is read after being released.
            unsafe {
                let next = next_of(node);
                let equals_next =
                    next != ghost && (*node.as_ptr()).element == (*next.as_ptr()).element;
                if equals_next || in_run {
                    drop(self.detach_node(node));
                    removed += 1;
                }
                in_run = equals_next;
                node = next;
            }
        }
        log::trace!("removed {} elements in duplicate runs", removed);
        removed
    }

    /// Swaps every two adjacent elements, starting from the front. A trailing
    /// element without a partner stays last.
    ///
    /// Nodes are relinked, not their payloads: the element at index 0 trades
    /// places with the element at index 1, index 2 with index 3, and so on.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter(["a", "b", "c", "d", "e"]);
    /// list.swap_pairs();
    /// assert_eq!(Vec::from_iter(list), vec!["b", "a", "d", "c", "e"]);
    /// ```
    pub fn swap_pairs(&mut self) {
        let len = self.len();
        if len < 2 {
            return;
        }
        let ghost = self.ghost_node();
        // Rotate the whole ring through the back: each pair is moved to the
        // back in swapped order, so after `len` moves every node is home.
        // SAFETY: all the moved nodes are element nodes of the list.
        unsafe {
            for _ in 0..len / 2 {
                let first = self.front_node();
                let second = next_of(first);
                self.relink_before(second, ghost);
                self.relink_before(first, ghost);
            }
            if len % 2 == 1 {
                self.relink_before(self.front_node(), ghost);
            }
        }
    }

    /// Reverses the order of the elements in place.
    ///
    /// No node is allocated or released; the old back node stays put while the
    /// nodes before it are moved to the back one by one.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// list.reverse();
    /// assert_eq!(Vec::from_iter(list), vec![3, 2, 1]);
    /// ```
    pub fn reverse(&mut self) {
        let ghost = self.ghost_node();
        let pivot = self.back_node();
        // SAFETY: `pivot.prev` is checked against the ghost node before it is
        // moved, so only element nodes are moved.
        unsafe {
            while pivot != ghost && prev_of(pivot) != ghost {
                self.relink_before(prev_of(pivot), ghost);
            }
        }
    }
}
