//! A queue of owned strings on top of [`List`], with the operations a queue
//! driver needs.
//!
//! The operations come in two shapes:
//! - methods on [`Queue`], for callers that always hold a queue;
//! - free functions taking `Option<&mut Queue>`, for drivers that may hold no
//!   queue at all. `None` stands for the absent queue: every function reports
//!   the documented "nothing happened" result (`false`, `0`, `None`) for it and
//!   never touches anything.
//!
//! # Examples
//!
//! ```
//! use ring_queue::queue;
//!
//! let mut q = queue::new_queue().unwrap();
//! assert!(queue::insert_tail(Some(&mut q), "b"));
//! assert!(queue::insert_head(Some(&mut q), "a"));
//!
//! let mut buf = [0u8; 8];
//! let element = queue::remove_head(Some(&mut q), Some(&mut buf)).unwrap();
//! assert_eq!(element.value(), "a");
//! assert_eq!(&buf[..2], b"a\0");
//! queue::release_element(element);
//!
//! assert_eq!(queue::size(Some(&q)), 1);
//! assert_eq!(queue::size(None), 0);
//! assert!(!queue::insert_head(None, "c"));
//! queue::free_queue(Some(q));
//! ```

use crate::{Element, Error, List};
use rand::Rng;

/// A queue of owned strings.
pub type Queue = List<String>;

impl List<String> {
    /// Inserts a copy of `value` at the head.
    ///
    /// On failure the queue is left untouched and nothing is leaked.
    pub fn insert_head(&mut self, value: &str) -> Result<(), Error> {
        self.try_push_front_with(|| duplicate(value))
    }

    /// Inserts a copy of `value` at the tail.
    ///
    /// On failure the queue is left untouched and nothing is leaked.
    pub fn insert_tail(&mut self, value: &str) -> Result<(), Error> {
        self.try_push_back_with(|| duplicate(value))
    }

    /// Unlinks the head element and hands it over, or returns `None` if the
    /// queue is empty.
    ///
    /// If `buf` is given, the payload is copied into it: at most
    /// `buf.len() - 1` bytes, then zero bytes up to the end of the buffer.
    /// Longer payloads are cut silently. An empty buffer receives nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Queue;
    ///
    /// let mut q = Queue::new();
    /// q.insert_tail("abcdef").unwrap();
    /// let mut buf = [0xffu8; 4];
    /// let element = q.remove_head(Some(&mut buf)).unwrap();
    /// assert_eq!(&buf, b"abc\0");
    /// assert_eq!(element.value(), "abcdef");
    /// ```
    pub fn remove_head(&mut self, buf: Option<&mut [u8]>) -> Option<Element<String>> {
        let element = self.pop_front_element()?;
        if let Some(buf) = buf {
            copy_truncated(element.value(), buf);
        }
        Some(element)
    }

    /// Unlinks the tail element and hands it over, or returns `None` if the
    /// queue is empty. See [`Queue::remove_head`] for the handling of `buf`.
    pub fn remove_tail(&mut self, buf: Option<&mut [u8]>) -> Option<Element<String>> {
        let element = self.pop_back_element()?;
        if let Some(buf) = buf {
            copy_truncated(element.value(), buf);
        }
        Some(element)
    }

    /// Returns the number of elements, counted by walking the ring.
    pub fn size(&self) -> usize {
        self.len()
    }

    /// Deletes the middle element (see [`List::remove_middle`]).
    ///
    /// Returns `false` if the queue is empty.
    pub fn delete_middle(&mut self) -> bool {
        self.remove_middle().is_some()
    }

    /// Deletes every element that has an equal neighbor, leaving only the
    /// strings that occur once in a sorted queue (see
    /// [`List::remove_duplicate_runs`]).
    ///
    /// Always succeeds; an empty queue is left as is.
    pub fn delete_duplicates(&mut self) -> bool {
        self.remove_duplicate_runs();
        true
    }
}

fn duplicate(value: &str) -> Result<String, Error> {
    let mut owned = String::new();
    owned.try_reserve_exact(value.len())?;
    owned.push_str(value);
    Ok(owned)
}

fn copy_truncated(value: &str, buf: &mut [u8]) {
    let capacity = match buf.len().checked_sub(1) {
        Some(capacity) => capacity,
        None => return,
    };
    let len = value.len().min(capacity);
    buf[..len].copy_from_slice(&value.as_bytes()[..len]);
    buf[len..].fill(0);
}

fn present<Q>(queue: Option<Q>) -> Result<Q, Error> {
    queue.ok_or(Error::AbsentQueue)
}

fn report<R>(op: &str, result: Result<R, Error>) -> Option<R> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            log::debug!("{}: {}", op, err);
            None
        }
    }
}

/// Creates an empty queue, or returns `None` if its sentinel node could not
/// be allocated.
pub fn new_queue() -> Option<Queue> {
    report("new_queue", Queue::try_new())
}

/// Releases every element of the queue front to back, then the queue itself.
/// Does nothing for an absent queue.
pub fn free_queue(queue: Option<Queue>) {
    drop(queue);
}

/// Inserts a copy of `value` at the head. Returns `false` if the queue is
/// absent or the allocation failed, in which case nothing changed.
pub fn insert_head(queue: Option<&mut Queue>, value: &str) -> bool {
    report(
        "insert_head",
        present(queue).and_then(|queue| queue.insert_head(value)),
    )
    .is_some()
}

/// Inserts a copy of `value` at the tail. Returns `false` if the queue is
/// absent or the allocation failed, in which case nothing changed.
pub fn insert_tail(queue: Option<&mut Queue>, value: &str) -> bool {
    report(
        "insert_tail",
        present(queue).and_then(|queue| queue.insert_tail(value)),
    )
    .is_some()
}

/// Unlinks the head element, see [`Queue::remove_head`]. Returns `None` for
/// an absent or empty queue.
pub fn remove_head(queue: Option<&mut Queue>, buf: Option<&mut [u8]>) -> Option<Element<String>> {
    report("remove_head", present(queue))?.remove_head(buf)
}

/// Unlinks the tail element, see [`Queue::remove_tail`]. Returns `None` for
/// an absent or empty queue.
pub fn remove_tail(queue: Option<&mut Queue>, buf: Option<&mut [u8]>) -> Option<Element<String>> {
    report("remove_tail", present(queue))?.remove_tail(buf)
}

/// Releases an element obtained from [`remove_head`] or [`remove_tail`],
/// payload first.
pub fn release_element(element: Element<String>) {
    element.release();
}

/// Returns the number of elements, or 0 for an absent queue.
pub fn size(queue: Option<&Queue>) -> usize {
    queue.map_or(0, Queue::size)
}

/// Deletes the middle element. Returns `false` for an absent or empty queue.
pub fn delete_middle(queue: Option<&mut Queue>) -> bool {
    report("delete_middle", present(queue)).map_or(false, Queue::delete_middle)
}

/// Deletes every element with an equal neighbor. Returns `false` only for an
/// absent queue.
pub fn delete_duplicates(queue: Option<&mut Queue>) -> bool {
    report("delete_duplicates", present(queue)).map_or(false, Queue::delete_duplicates)
}

/// Swaps every two adjacent elements. Does nothing for an absent queue.
pub fn swap_pairs(queue: Option<&mut Queue>) {
    if let Some(queue) = report("swap_pairs", present(queue)) {
        queue.swap_pairs();
    }
}

/// Reverses the queue. Does nothing for an absent queue.
pub fn reverse(queue: Option<&mut Queue>) {
    if let Some(queue) = report("reverse", present(queue)) {
        queue.reverse();
    }
}

/// Sorts the queue in ascending lexicographic order, stable. Does nothing for
/// an absent queue.
pub fn sort(queue: Option<&mut Queue>) {
    if let Some(queue) = report("sort", present(queue)) {
        queue.sort();
    }
}

/// Shuffles the queue with randomness from `rng`. Does nothing for an absent
/// queue.
pub fn shuffle_with<R>(queue: Option<&mut Queue>, rng: &mut R)
where
    R: Rng + ?Sized,
{
    if let Some(queue) = report("shuffle", present(queue)) {
        queue.shuffle_with(rng);
    }
}

/// Shuffles the queue with the thread-local generator. Does nothing for an
/// absent queue. Enabled by `feature = "std-rng"`.
#[cfg(feature = "std-rng")]
pub fn shuffle(queue: Option<&mut Queue>) {
    shuffle_with(queue, &mut rand::thread_rng());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::assert_ring;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn queue_of(values: &[&str]) -> Queue {
        let mut queue = Queue::new();
        for value in values {
            queue.insert_tail(value).unwrap();
        }
        queue
    }

    fn contents(queue: &Queue) -> Vec<&str> {
        queue.iter().map(String::as_str).collect()
    }

    #[test]
    fn insert_then_remove_round_trip() {
        let mut queue = Queue::new();
        queue.insert_head("abc").unwrap();
        let element = queue.remove_head(None).unwrap();
        assert_eq!(element.value(), "abc");
        assert!(queue.is_empty());
        assert_ring(&queue);
    }

    #[test]
    fn remove_from_both_ends() {
        let mut queue = queue_of(&["a", "b", "c"]);
        queue.insert_head("z").unwrap();
        assert_eq!(queue.remove_tail(None).unwrap().into_value(), "c");
        assert_eq!(queue.remove_head(None).unwrap().into_value(), "z");
        assert_eq!(contents(&queue), ["a", "b"]);
        assert!(Queue::new().remove_tail(None).is_none());
    }

    #[test]
    fn remove_copies_into_buffer() {
        let mut queue = queue_of(&["hello", "hi"]);

        let mut buf = [0xffu8; 4];
        queue.remove_head(Some(&mut buf)).unwrap().release();
        assert_eq!(&buf, b"hel\0");

        let mut buf = [0xffu8; 6];
        queue.remove_head(Some(&mut buf)).unwrap().release();
        assert_eq!(&buf, b"hi\0\0\0\0");

        queue.insert_tail("x").unwrap();
        let mut buf = [0xffu8; 1];
        queue.remove_tail(Some(&mut buf)).unwrap().release();
        assert_eq!(&buf, b"\0");

        queue.insert_tail("x").unwrap();
        let mut buf: [u8; 0] = [];
        assert_eq!(queue.remove_tail(Some(&mut buf)).unwrap().value(), "x");
    }

    #[test]
    fn inserted_value_is_an_owned_copy() {
        let mut source = String::from("abc");
        let mut queue = Queue::new();
        queue.insert_tail(&source).unwrap();
        source.push('d');
        assert_eq!(contents(&queue), ["abc"]);
    }

    #[test]
    fn delete_middle_and_duplicates() {
        let mut queue = queue_of(&["a", "b", "c", "d", "e", "f"]);
        assert!(queue.delete_middle());
        assert_eq!(contents(&queue), ["a", "b", "d", "e", "f"]);

        let mut empty = Queue::new();
        assert!(!empty.delete_middle());
        assert!(empty.delete_duplicates());

        let mut queue = queue_of(&["c", "a", "c", "b", "a", "c"]);
        queue.sort();
        assert!(queue.delete_duplicates());
        assert_eq!(contents(&queue), ["b"]);
    }

    #[test]
    fn absent_queue_is_never_touched() {
        assert!(!insert_head(None, "a"));
        assert!(!insert_tail(None, "a"));
        assert!(remove_head(None, None).is_none());
        let mut buf = [7u8; 4];
        assert!(remove_tail(None, Some(&mut buf)).is_none());
        assert_eq!(buf, [7; 4]);
        assert_eq!(size(None), 0);
        assert!(!delete_middle(None));
        assert!(!delete_duplicates(None));
        swap_pairs(None);
        reverse(None);
        sort(None);
        shuffle_with(None, &mut StdRng::seed_from_u64(0));
        free_queue(None);
    }

    #[test]
    fn handle_operations_on_present_queue() {
        let mut queue = new_queue().unwrap();
        for value in ["a", "b", "c", "d", "e"].iter() {
            assert!(insert_tail(Some(&mut queue), value));
        }
        swap_pairs(Some(&mut queue));
        assert_eq!(contents(&queue), ["b", "a", "d", "c", "e"]);
        reverse(Some(&mut queue));
        assert_eq!(contents(&queue), ["e", "c", "d", "a", "b"]);
        sort(Some(&mut queue));
        assert_eq!(contents(&queue), ["a", "b", "c", "d", "e"]);
        assert!(delete_middle(Some(&mut queue)));
        assert_eq!(size(Some(&queue)), 4);
        shuffle_with(Some(&mut queue), &mut StdRng::seed_from_u64(9));
        assert_eq!(size(Some(&queue)), 4);
        assert!(delete_duplicates(Some(&mut queue)));
        let element = remove_tail(Some(&mut queue), None).unwrap();
        release_element(element);
        assert_eq!(size(Some(&queue)), 3);
        free_queue(Some(queue));
    }
}
