use std::alloc::{self, Layout};
use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::ptr::{self, NonNull};

use crate::list::element::Element;
use crate::{Error, Iter, IterMut};

pub mod element;
pub mod iterator;

mod algorithms;

/// The `List` is a doubly-linked list with owned nodes, implemented as a cyclic
/// list anchored by a sentinel ("ghost") node.
///
/// Inserting or removing at either end takes constant time. The list keeps no
/// length counter, so [`List::len`] walks the ring in *O*(*n*) time and every
/// mutation only has to keep the links consistent.
///
/// The ring invariant holds before and after every public operation: for every
/// node `x` (the ghost node included), `x.next.prev == x` and `x.prev.next == x`.
/// An empty list is exactly a ghost node linked to itself.
///
/// # Naming Conventions
///
/// - `front..=back`: a closed range of list nodes, both inclusive;
/// - `start..end`: a half-open range of list nodes, left inclusive and right
///   exclusive (probably the ghost node).
pub struct List<T> {
    ghost: NonNull<Node<T>>,
    _marker: PhantomData<Box<Node<T>>>,
}

#[repr(C)]
pub(crate) struct Node<T> {
    pub(crate) next: NonNull<Node<T>>,
    pub(crate) prev: NonNull<Node<T>>,
    pub(crate) element: T,
}

/// Reads `node.next` without creating a reference to the node, so it also
/// works on the ghost node, whose `element` is never initialized.
#[inline]
pub(crate) unsafe fn next_of<T>(node: NonNull<Node<T>>) -> NonNull<Node<T>> {
    (*node.as_ptr()).next
}

/// Reads `node.prev`, see [`next_of`].
#[inline]
pub(crate) unsafe fn prev_of<T>(node: NonNull<Node<T>>) -> NonNull<Node<T>> {
    (*node.as_ptr()).prev
}

/// Links `prev -> next` and `next -> prev`.
#[inline]
pub(crate) unsafe fn connect<T>(prev: NonNull<Node<T>>, next: NonNull<Node<T>>) {
    (*prev.as_ptr()).next = next;
    (*next.as_ptr()).prev = prev;
}

// private methods
impl<T> List<T> {
    pub(crate) fn ghost_node(&self) -> NonNull<Node<T>> {
        self.ghost
    }
    pub(crate) fn front_node(&self) -> NonNull<Node<T>> {
        // SAFETY: `ghost.next` is always valid (either `ghost` itself, or the first element
        // in the list).
        unsafe { next_of(self.ghost_node()) }
    }
    pub(crate) fn back_node(&self) -> NonNull<Node<T>> {
        // SAFETY: `ghost.prev` is always valid (either `ghost` itself, or the last element
        // in the list).
        unsafe { prev_of(self.ghost_node()) }
    }

    /// Returns the node `n` links after the front node, or the ghost node if
    /// `n` is the length of the list.
    ///
    /// It is unsafe because it does not check `n <= len`; walking further
    /// passes through the ghost node and yields it as if it were an element.
    pub(crate) unsafe fn nth_node(&self, n: usize) -> NonNull<Node<T>> {
        let mut node = self.front_node();
        for _ in 0..n {
            node = next_of(node);
        }
        node
    }

    /// Detach a single node `node` from the list, and return it as a box.
    ///
    /// It is unsafe because it does not check whether `node` belongs to the list.
    ///
    /// If the `node` does not belong to the list, or it is the ghost node, this
    /// function call will make the list ill-formed.
    pub(crate) unsafe fn detach_node(&mut self, node: NonNull<Node<T>>) -> Box<Node<T>> {
        debug_assert_ne!(node, self.ghost_node(), "Cannot detach the ghost node");
        connect(prev_of(node), next_of(node));
        Box::from_raw(node.as_ptr())
    }

    /// Attach a single node `node` to the list, between `prev` and `next`.
    ///
    /// It is unsafe because it does not check whether `prev` and `next` belongs
    /// to the list, or whether the `prev` and `next` is adjacent (only in
    /// `#[cfg(debug_assertions)]`).
    ///
    /// If the `prev` and `next` does not belong to the list, or they are not
    /// adjacent nodes, this function call will make the list ill-formed.
    pub(crate) unsafe fn attach_node(
        &mut self,
        prev: NonNull<Node<T>>,
        next: NonNull<Node<T>>,
        node: NonNull<Node<T>>,
    ) {
        #[cfg(debug_assertions)]
        assert_adjacent(prev, next);
        connect(prev, node);
        connect(node, next);
        #[cfg(debug_assertions)]
        {
            assert_adjacent(prev, node);
            assert_adjacent(node, next);
        }
    }

    /// Move `node` out of its current position and re-attach it right before
    /// `next`. Nothing is allocated or released.
    ///
    /// It is unsafe because both nodes must belong to the list, `node` must not
    /// be the ghost node, and `node` must differ from `next`.
    pub(crate) unsafe fn relink_before(&mut self, node: NonNull<Node<T>>, next: NonNull<Node<T>>) {
        debug_assert_ne!(node, next, "Cannot move a node before itself");
        connect(prev_of(node), next_of(node));
        self.attach_node(prev_of(next), next, node);
    }

    /// Allocate a node between `prev` and `next`, filling it with the element
    /// produced by `make`.
    ///
    /// The node is allocated first. If `make` fails, the node is released and
    /// the list is left untouched.
    unsafe fn try_attach_with<F>(
        &mut self,
        prev: NonNull<Node<T>>,
        next: NonNull<Node<T>>,
        make: F,
    ) -> Result<(), Error>
    where
        F: FnOnce() -> Result<T, Error>,
    {
        let node = Node::<T>::try_alloc()?;
        let element = match make() {
            Ok(element) => element,
            Err(err) => {
                Node::dealloc_uninit(node);
                return Err(err);
            }
        };
        Node::init(node, element);
        self.attach_node(prev, next, node);
        Ok(())
    }
}

impl<T> List<T> {
    /// Create an empty `List`, reporting a failed allocation of the ghost node
    /// instead of aborting.
    ///
    /// # Examples
    /// ```
    /// use ring_queue::List;
    /// let list = List::<u32>::try_new().unwrap();
    /// assert!(list.is_empty());
    /// ```
    pub fn try_new() -> Result<Self, Error> {
        let ghost = Node::<T>::try_alloc()?;
        // SAFETY: `ghost` is freshly allocated storage of the right layout.
        unsafe { Node::init_links(ghost) };
        Ok(Self {
            ghost,
            _marker: PhantomData,
        })
    }

    /// Create an empty `List`
    ///
    /// # Examples
    /// ```
    /// use ring_queue::List;
    /// let list: List<u32> = List::new();
    /// ```
    #[inline]
    pub fn new() -> Self {
        match Self::try_new() {
            Ok(list) => list,
            Err(_) => alloc::handle_alloc_error(Layout::new::<Node<T>>()),
        }
    }

    /// Returns `true` if the `List` is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::List;
    ///
    /// let mut list = List::new();
    /// assert!(list.is_empty());
    ///
    /// list.push_front("foo");
    /// assert!(!list.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.front_node() == self.ghost_node()
    }

    /// Returns the number of elements, counted by walking the ring.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::List;
    ///
    /// let mut list = List::new();
    /// list.push_front(2);
    /// list.push_back(3);
    /// assert_eq!(list.len(), 2);
    /// ```
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Removes and drops all elements from the `List`, front to back.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    #[inline]
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    /// Provides a reference to the front element, or `None` if the list is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.front(), None);
    ///
    /// list.push_front(1);
    /// assert_eq!(list.front(), Some(&1));
    /// ```
    #[inline]
    pub fn front(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the list is not empty, so the front node carries an element.
        Some(unsafe { &(*self.front_node().as_ptr()).element })
    }

    /// Provides a reference to the back element, or `None` if the list is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.back(), None);
    ///
    /// list.push_back(1);
    /// assert_eq!(list.back(), Some(&1));
    /// ```
    #[inline]
    pub fn back(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the list is not empty, so the back node carries an element.
        Some(unsafe { &(*self.back_node().as_ptr()).element })
    }

    /// Adds an element produced by `make` first in the list.
    ///
    /// The node is allocated before `make` runs; on any failure nothing is
    /// inserted and no storage is leaked.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::{Error, List};
    ///
    /// let mut list = List::new();
    /// assert!(list.try_push_front_with(|| Ok(1)).is_ok());
    /// assert!(list.try_push_front_with(|| Err(Error::AbsentQueue)).is_err());
    /// assert_eq!(list.len(), 1);
    /// ```
    pub fn try_push_front_with<F>(&mut self, make: F) -> Result<(), Error>
    where
        F: FnOnce() -> Result<T, Error>,
    {
        // SAFETY: the ghost node and the front node are adjacent nodes of the list.
        unsafe { self.try_attach_with(self.ghost_node(), self.front_node(), make) }
    }

    /// Appends an element produced by `make` to the back of the list.
    ///
    /// See [`List::try_push_front_with`] for the failure behavior.
    pub fn try_push_back_with<F>(&mut self, make: F) -> Result<(), Error>
    where
        F: FnOnce() -> Result<T, Error>,
    {
        // SAFETY: the back node and the ghost node are adjacent nodes of the list.
        unsafe { self.try_attach_with(self.back_node(), self.ghost_node(), make) }
    }

    /// Adds an element first in the list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_front(2);
    /// assert_eq!(list.front().unwrap(), &2);
    ///
    /// list.push_front(1);
    /// assert_eq!(list.front().unwrap(), &1);
    /// ```
    pub fn push_front(&mut self, elt: T) {
        if self.try_push_front_with(|| Ok(elt)).is_err() {
            alloc::handle_alloc_error(Layout::new::<Node<T>>());
        }
    }

    /// Appends an element to the back of a list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::List;
    ///
    /// let mut list = List::new();
    /// list.push_back(1);
    /// list.push_back(3);
    /// assert_eq!(list.back().unwrap(), &3);
    /// ```
    pub fn push_back(&mut self, elt: T) {
        if self.try_push_back_with(|| Ok(elt)).is_err() {
            alloc::handle_alloc_error(Layout::new::<Node<T>>());
        }
    }

    /// Unlinks the first element and hands it over as an [`Element`], or
    /// returns `None` if the list is empty. Nothing is released.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::List;
    ///
    /// let mut list = List::new();
    /// list.push_back(7);
    /// let element = list.pop_front_element().unwrap();
    /// assert_eq!(*element, 7);
    /// assert!(list.is_empty());
    /// ```
    pub fn pop_front_element(&mut self) -> Option<Element<T>> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the list is not empty, so the front node is an element node.
        Some(Element::new(unsafe { self.detach_node(self.front_node()) }))
    }

    /// Unlinks the last element and hands it over as an [`Element`], or
    /// returns `None` if the list is empty.
    pub fn pop_back_element(&mut self) -> Option<Element<T>> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the list is not empty, so the back node is an element node.
        Some(Element::new(unsafe { self.detach_node(self.back_node()) }))
    }

    /// Removes the first element and returns it, or `None` if the list is
    /// empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.pop_front(), None);
    ///
    /// list.push_front(1);
    /// list.push_front(3);
    /// assert_eq!(list.pop_front(), Some(3));
    /// assert_eq!(list.pop_front(), Some(1));
    /// assert_eq!(list.pop_front(), None);
    /// ```
    pub fn pop_front(&mut self) -> Option<T> {
        self.pop_front_element().map(Element::into_value)
    }

    /// Removes the last element from a list and returns it, or `None` if
    /// it is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.pop_back(), None);
    /// list.push_back(1);
    /// list.push_back(3);
    /// assert_eq!(list.pop_back(), Some(3));
    /// ```
    pub fn pop_back(&mut self) -> Option<T> {
        self.pop_back_element().map(Element::into_value)
    }

    /// Provides a forward iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_back(0);
    /// list.push_back(1);
    /// list.push_back(2);
    ///
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&0));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Provides a forward iterator with mutable references.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_back(0);
    /// list.push_back(1);
    ///
    /// for element in list.iter_mut() {
    ///     *element += 10;
    /// }
    ///
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&10));
    /// assert_eq!(iter.next(), Some(&11));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }
}

impl<T: Debug> Debug for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Node<T> {
    /// Obtain uninitialized storage for a node from the global allocator.
    fn try_alloc() -> Result<NonNull<Node<T>>, Error> {
        let layout = Layout::new::<Node<T>>();
        // SAFETY: `Node<T>` always holds two pointers, so `layout` is not zero-sized.
        let raw = unsafe { alloc::alloc(layout) }.cast::<Node<T>>();
        NonNull::new(raw).ok_or_else(|| {
            log::debug!("failed to allocate a node of {} bytes", layout.size());
            Error::NodeAlloc {
                size: layout.size(),
            }
        })
    }

    /// Release storage from [`Node::try_alloc`] that was never initialized.
    unsafe fn dealloc_uninit(node: NonNull<Node<T>>) {
        alloc::dealloc(node.as_ptr().cast(), Layout::new::<Node<T>>());
    }

    /// Link storage from [`Node::try_alloc`] to itself, leaving `element`
    /// uninitialized. This is all the ghost node ever holds.
    unsafe fn init_links(node: NonNull<Node<T>>) {
        let raw = node.as_ptr();
        ptr::addr_of_mut!((*raw).next).write(node);
        ptr::addr_of_mut!((*raw).prev).write(node);
    }

    /// Initialize storage from [`Node::try_alloc`] as a self-linked node
    /// carrying `element`.
    unsafe fn init(node: NonNull<Node<T>>, element: T) {
        Node::init_links(node);
        ptr::addr_of_mut!((*node.as_ptr()).element).write(element);
    }

    pub(crate) fn into_element(self: Box<Self>) -> T {
        self.element
    }
}

#[cfg(any(test, debug_assertions))]
fn assert_adjacent<T>(prev: NonNull<Node<T>>, next: NonNull<Node<T>>) {
    unsafe {
        assert_eq!(next_of(prev), next);
        assert_eq!(prev_of(next), prev);
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.clear();
        // SAFETY: the ghost node was allocated with the layout of `Node<T>` in
        // `List::try_new`, its `element` was never initialized, and the list is
        // the only owner of it.
        unsafe { Node::dealloc_uninit(self.ghost) };
    }
}

unsafe impl<T: Send> Send for List<T> {}

unsafe impl<T: Sync> Sync for List<T> {}

#[cfg(test)]
pub(crate) fn assert_ring<T>(list: &List<T>) {
    let ghost = list.ghost_node();
    let (mut forward, mut node) = (0, ghost);
    loop {
        unsafe {
            assert_adjacent(node, next_of(node));
            node = next_of(node);
        }
        if node == ghost {
            break;
        }
        forward += 1;
    }
    let (mut backward, mut node) = (0, ghost);
    loop {
        node = unsafe { prev_of(node) };
        if node == ghost {
            break;
        }
        backward += 1;
    }
    assert_eq!(forward, backward);
}

#[cfg(test)]
mod tests {
    use crate::list::{assert_ring, List};
    use crate::Error;
    use std::cell::RefCell;
    use std::iter::FromIterator;

    #[derive(Debug)]
    struct DropChecker<'a, T: Copy> {
        value: T,
        dropped: &'a RefCell<Vec<T>>,
    }
    impl<'a, T: Copy> DropChecker<'a, T> {
        fn new(value: T, dropped: &'a RefCell<Vec<T>>) -> Self {
            Self { value, dropped }
        }
    }
    impl<'a, T: Copy> Drop for DropChecker<'a, T> {
        fn drop(&mut self) {
            self.dropped.borrow_mut().push(self.value);
        }
    }

    #[test]
    fn list_create() {
        let mut list = List::<i32>::new();
        assert!(list.is_empty());
        assert_ring(&list);
        list.push_back(1);
        assert!(!list.is_empty());
        assert_eq!(list.pop_back(), Some(1));
        assert!(list.is_empty());
        assert_ring(&list);
    }

    #[test]
    fn list_drop() {
        let dropped = RefCell::new(Vec::<i32>::new());
        let mut list = List::new();
        list.push_back(DropChecker::new(1, &dropped));
        list.push_back(DropChecker::new(2, &dropped));
        list.push_back(DropChecker::new(3, &dropped));
        drop(list);
        assert_eq!(dropped.borrow().as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn list_drop_empty() {
        drop(List::<String>::new());
        drop(List::<String>::try_new().unwrap());
    }

    #[test]
    fn list_push_and_pop() {
        let mut list = List::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);

        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        assert_eq!(list.pop_front(), None);
        assert_eq!(list.pop_back(), None);

        list.push_back(1);
        assert_eq!(list.back(), Some(&1));
        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());

        list.push_front(1);
        list.push_front(2);
        list.push_back(3);
        assert_ring(&list);
        assert_eq!(list.len(), 3);
        assert_eq!(list.back(), Some(&3));
        assert_eq!(list.front(), Some(&2));
        assert_eq!(list.pop_front(), Some(2));
        assert_eq!(list.pop_back(), Some(3));

        assert_eq!(list.front(), Some(&1));
        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        assert!(list.is_empty());
        assert_ring(&list);
    }

    #[test]
    fn list_failed_insert_leaves_list_untouched() {
        let mut list = List::from_iter([1, 2, 3]);
        let err = list
            .try_push_front_with(|| Err(Error::NodeAlloc { size: 0 }))
            .unwrap_err();
        assert_eq!(err, Error::NodeAlloc { size: 0 });
        assert!(list.try_push_back_with(|| Err(Error::AbsentQueue)).is_err());
        assert_ring(&list);
        assert_eq!(Vec::from_iter(list.iter().copied()), vec![1, 2, 3]);

        assert!(list.try_push_back_with(|| Ok(4)).is_ok());
        assert!(list.try_push_front_with(|| Ok(0)).is_ok());
        assert_eq!(Vec::from_iter(list), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn list_popped_element_outlives_list() {
        let dropped = RefCell::new(Vec::<i32>::new());
        let mut list = List::new();
        list.push_back(DropChecker::new(1, &dropped));
        list.push_back(DropChecker::new(2, &dropped));
        let element = list.pop_back_element().unwrap();
        drop(list);
        assert_eq!(dropped.borrow().as_slice(), &[1]);
        assert_eq!(element.value, 2);
        element.release();
        assert_eq!(dropped.borrow().as_slice(), &[1, 2]);
    }

    #[test]
    fn list_len_after_mixed_operations() {
        let mut list = List::new();
        for i in 0..10 {
            if i % 2 == 0 {
                list.push_front(i);
            } else {
                list.push_back(i);
            }
        }
        assert_eq!(list.len(), 10);
        for _ in 0..3 {
            list.pop_front();
            list.pop_back();
        }
        assert_eq!(list.len(), 4);
        assert_ring(&list);
        list.clear();
        assert_eq!(list.len(), 0);
        assert_ring(&list);
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    #[repr(align(64))]
    struct Aligned(u8);

    #[test]
    fn list_over_aligned_payload() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut list = List::new();
        for value in [3, 1, 4, 1, 5].iter() {
            list.push_back(Aligned(*value));
        }
        list.push_front(Aligned(9));
        assert_eq!(list.pop_front(), Some(Aligned(9)));
        assert_eq!(list.pop_back(), Some(Aligned(5)));
        list.push_back(Aligned(2));
        for value in list.iter() {
            assert_eq!(value as *const Aligned as usize % 64, 0);
        }

        list.sort();
        assert_eq!(Vec::from_iter(list.iter().map(|a| a.0)), vec![1, 1, 2, 3, 4]);
        list.reverse();
        assert_eq!(Vec::from_iter(list.iter().map(|a| a.0)), vec![4, 3, 2, 1, 1]);
        list.shuffle_with(&mut StdRng::seed_from_u64(3));
        assert_eq!(list.len(), 5);
        assert_ring(&list);
        drop(list);

        drop(List::<Aligned>::new());
    }
}
