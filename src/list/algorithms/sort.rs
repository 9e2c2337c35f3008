use crate::list::{connect, next_of, List, Node};
use std::cmp::Ordering;
use std::ptr::NonNull;

impl<T> List<T> {
    /// Sort the list in ascending order.
    ///
    /// This sort is stable (i.e., does not reorder equal elements).
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* * log(*n*)) time and
    /// *O*(log(*n*)) memory for the recursion.
    ///
    /// # Current Implementation
    ///
    /// The ring is opened into a chain that ends at the ghost node, sorted by a
    /// top-down merge sort that only rewrites `next` links, and closed again by
    /// one forward pass that restores every `prev` link. Nodes are never
    /// allocated, released or copied.
    ///
    /// If the comparison panics, the elements that were being sorted are
    /// leaked and the list is left empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::List;
    /// use std::iter::FromIterator;
    /// let mut list = List::from_iter([5, 2, 4, 3, 1]);
    ///
    /// list.sort();
    ///
    /// assert_eq!(Vec::from_iter(list), vec![1, 2, 3, 4, 5]);
    /// ```
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        merge_sort(self, |a, b| a.lt(b));
    }

    /// Sort the list with a comparator function.
    ///
    /// This sort is stable (i.e., does not reorder equal elements).
    ///
    /// The comparator function must define a total ordering for the
    /// elements in the list. If the ordering is not total, the order
    /// of the elements is unspecified.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::List;
    /// use std::iter::FromIterator;
    /// let mut v = List::from_iter([5, 4, 1, 3, 2]);
    ///
    /// // reverse sorting
    /// v.sort_by(|a, b| b.cmp(a));
    /// assert_eq!(Vec::from_iter(v), vec![5, 4, 3, 2, 1]);
    /// ```
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        merge_sort(self, |a, b| compare(a, b) == Ordering::Less)
    }
}

fn merge_sort<T, F>(list: &mut List<T>, mut less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    let (front, back) = (list.front_node(), list.back_node());
    if front == back {
        return;
    }
    let ghost = list.ghost_node();
    // SAFETY: the list holds at least two elements, so `front..=back` is a
    // chain of element nodes whose last `next` link is the ghost node. The
    // ghost node is self-linked while the chain is detached, so a panicking
    // comparison leaks the chain instead of leaving a broken ring behind.
    unsafe {
        connect(ghost, ghost);
        let sorted = merge_sort_chain(front, ghost, &mut less);
        close_ring(ghost, sorted);
    }
    log::trace!("sorted a list of {} elements", list.len());
}

/// Sort the chain starting at `head` and terminated by `end`, returning the
/// new head. Only `next` links are meaningful on return.
unsafe fn merge_sort_chain<T, F>(
    head: NonNull<Node<T>>,
    end: NonNull<Node<T>>,
    less: &mut F,
) -> NonNull<Node<T>>
where
    F: FnMut(&T, &T) -> bool,
{
    if head == end || next_of(head) == end {
        return head;
    }
    let (mut slow, mut fast) = (head, head);
    while next_of(fast) != end && next_of(next_of(fast)) != end {
        fast = next_of(next_of(fast));
        slow = next_of(slow);
    }
    let right = next_of(slow);
    (*slow.as_ptr()).next = end;

    let left = merge_sort_chain(head, end, less);
    let right = merge_sort_chain(right, end, less);
    merge_chains(left, right, end, less)
}

/// Merge two sorted chains terminated by `end`. On ties the node of `left`
/// goes first, which keeps the sort stable.
unsafe fn merge_chains<T, F>(
    mut left: NonNull<Node<T>>,
    mut right: NonNull<Node<T>>,
    end: NonNull<Node<T>>,
    less: &mut F,
) -> NonNull<Node<T>>
where
    F: FnMut(&T, &T) -> bool,
{
    let mut head = end;
    let mut tail: Option<NonNull<Node<T>>> = None;
    while left != end && right != end {
        let taken = if less(&(*right.as_ptr()).element, &(*left.as_ptr()).element) {
            let node = right;
            right = next_of(node);
            node
        } else {
            let node = left;
            left = next_of(node);
            node
        };
        match tail {
            Some(tail) => (*tail.as_ptr()).next = taken,
            None => head = taken,
        }
        tail = Some(taken);
    }
    let rest = if left != end { left } else { right };
    match tail {
        Some(tail) => (*tail.as_ptr()).next = rest,
        None => head = rest,
    }
    head
}

/// Re-derive every `prev` link from the `next` chain starting at `head`, and
/// close the chain back into a ring at `ghost`.
unsafe fn close_ring<T>(ghost: NonNull<Node<T>>, head: NonNull<Node<T>>) {
    let mut prev = ghost;
    let mut node = head;
    while node != ghost {
        (*node.as_ptr()).prev = prev;
        prev = node;
        node = next_of(node);
    }
    connect(ghost, head);
    connect(prev, ghost);
}

#[cfg(test)]
mod tests {
    use crate::list::{assert_ring, List};
    use std::iter::FromIterator;

    #[test]
    fn sort_small_lists() {
        fn test_case(input: &[i32]) {
            let mut list = List::from_iter(input.iter().copied());
            list.sort();
            assert_ring(&list);
            let mut expected = input.to_vec();
            expected.sort();
            assert_eq!(Vec::from_iter(list), expected);
        }
        test_case(&[]);
        test_case(&[1]);
        test_case(&[2, 1]);
        test_case(&[1, 2]);
        test_case(&[3, 1, 2]);
        test_case(&[5, 5, 1, 5, 1]);
        test_case(&[9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);
        test_case(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn sort_strings_lexicographically() {
        let mut list = List::from_iter(["pear", "apple", "fig", "applesauce", "Zebra"]);
        list.sort();
        assert_eq!(
            Vec::from_iter(list),
            vec!["Zebra", "apple", "applesauce", "fig", "pear"]
        );
    }

    #[test]
    fn sort_is_stable() {
        let input = [(3, 'a'), (1, 'b'), (3, 'c'), (2, 'd'), (1, 'e'), (3, 'f')];
        let mut list = List::from_iter(input.iter().copied());
        list.sort_by(|a, b| a.0.cmp(&b.0));
        assert_ring(&list);
        assert_eq!(
            Vec::from_iter(list),
            vec![(1, 'b'), (1, 'e'), (2, 'd'), (3, 'a'), (3, 'c'), (3, 'f')]
        );
    }

    #[test]
    fn sort_keeps_nodes() {
        let mut list = List::from_iter(vec![String::from("b"), String::from("a")]);
        let mut before: Vec<*const String> = list.iter().map(|s| s as *const String).collect();
        list.sort();
        before.reverse();
        let after: Vec<*const String> = list.iter().map(|s| s as *const String).collect();
        assert_eq!(after, before);
    }

    #[test]
    fn sort_panic_leaves_empty_list() {
        let mut list = List::from_iter([3, 2, 1]);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            list.sort_by(|_, _| panic!("comparison failed"))
        }));
        assert!(result.is_err());
        assert!(list.is_empty());
        assert_ring(&list);
    }
}
