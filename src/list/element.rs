use crate::list::Node;
use std::fmt;
use std::ops::{Deref, DerefMut};

/// An element unlinked from a [`List`], still holding its node storage and its
/// payload.
///
/// Removing an element from a list does not release it: ownership of both the
/// node and the payload moves to the holder of the `Element`, who decides when
/// to [`release`] it (dropping it has the same effect) or to take the payload
/// out with [`into_value`].
///
/// # Examples
///
/// ```
/// use ring_queue::List;
/// use std::iter::FromIterator;
///
/// let mut list = List::from_iter(["x".to_string(), "y".to_string()]);
/// let element = list.pop_front_element().unwrap();
/// assert_eq!(element.value(), "x");
/// assert_eq!(list.len(), 1);
/// element.release();
/// ```
///
/// [`List`]: crate::List
/// [`release`]: Element::release
/// [`into_value`]: Element::into_value
pub struct Element<T> {
    node: Box<Node<T>>,
}

impl<T> Element<T> {
    /// Wrap a node that has already been detached from its list.
    pub(crate) fn new(node: Box<Node<T>>) -> Self {
        Self { node }
    }

    /// Provides a reference to the payload.
    #[inline]
    pub fn value(&self) -> &T {
        &self.node.element
    }

    /// Provides a mutable reference to the payload.
    #[inline]
    pub fn value_mut(&mut self) -> &mut T {
        &mut self.node.element
    }

    /// Releases the node storage and returns the payload.
    pub fn into_value(self) -> T {
        self.node.into_element()
    }

    /// Releases the payload, then the node storage.
    ///
    /// The element cannot be used afterwards.
    pub fn release(self) {
        drop(self.into_value());
    }
}

impl<T> Deref for Element<T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.value()
    }
}

impl<T> DerefMut for Element<T> {
    fn deref_mut(&mut self) -> &mut T {
        self.value_mut()
    }
}

impl<T: fmt::Debug> fmt::Debug for Element<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Element").field(self.value()).finish()
    }
}

impl<T: PartialEq> PartialEq<T> for Element<T> {
    fn eq(&self, other: &T) -> bool {
        self.value() == other
    }
}

unsafe impl<T: Send> Send for Element<T> {}

unsafe impl<T: Sync> Sync for Element<T> {}
